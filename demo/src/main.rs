//! Text pathfinding demo.
//!
//! Run: cargo run --bin pathgrid-demo -- [options]
//!
//! Options:
//!   --map FILE          load an ASCII scene (`.` open, `#` blocked, `S`, `E`)
//!   --size WxH          grid size for a random scene (default 26x20)
//!   --start X,Y         start cell (default 3,9)
//!   --end X,Y           end cell (default 22,9)
//!   --density F         fraction of cells to block at random (default 0.25)
//!   --seed N            obstacle seed
//!   --algorithm NAME    dijkstra | manhattan | octile | all (default all)
//!   --relax RULE        distance | priority (default distance)
//!   --steps             print a frame after every expansion
//!   -v                  more logging (repeatable)

use std::process;

use pathgrid_demo::{init_logging, render_run, run, seeded_scene, verbosity};
use pathgrid_search::{Algorithm, Point, RelaxRule, Scene, SceneConfig};

struct Options {
    scene: SceneConfig,
    map: Option<String>,
    algorithms: Vec<Algorithm>,
    relax: RelaxRule,
    steps: bool,
    verbose: usize,
}

fn parse_pair(s: &str, sep: char) -> Result<(i32, i32), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}', got {s:?}"))?;
    let a = a.trim().parse().map_err(|e| format!("{a:?}: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("{b:?}: {e}"))?;
    Ok((a, b))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options {
        scene: SceneConfig {
            obstacle_density: 0.25,
            ..SceneConfig::default()
        },
        map: None,
        algorithms: Algorithm::ALL.to_vec(),
        relax: RelaxRule::Distance,
        steps: false,
        verbose: 0,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--map" => opts.map = Some(value()?),
            "--size" => {
                let (w, h) = parse_pair(&value()?, 'x')?;
                opts.scene.width = w;
                opts.scene.height = h;
            }
            "--start" => opts.scene.start = Point::from(parse_pair(&value()?, ',')?),
            "--end" => opts.scene.end = Point::from(parse_pair(&value()?, ',')?),
            "--density" => {
                let v = value()?;
                opts.scene.obstacle_density = v.parse().map_err(|e| format!("{v:?}: {e}"))?;
            }
            "--seed" => {
                let v = value()?;
                opts.scene.seed = Some(v.parse().map_err(|e| format!("{v:?}: {e}"))?);
            }
            "--algorithm" => {
                opts.algorithms = match value()?.as_str() {
                    "dijkstra" => vec![Algorithm::Dijkstra],
                    "manhattan" => vec![Algorithm::AStarManhattan],
                    "octile" => vec![Algorithm::AStarOctile],
                    "all" => Algorithm::ALL.to_vec(),
                    other => return Err(format!("unknown algorithm {other:?}")),
                }
            }
            "--relax" => {
                opts.relax = match value()?.as_str() {
                    "distance" => RelaxRule::Distance,
                    "priority" => RelaxRule::Priority,
                    other => return Err(format!("unknown relax rule {other:?}")),
                }
            }
            "--steps" => opts.steps = true,
            "-v" => opts.verbose += 1,
            "-vv" => opts.verbose += 2,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(opts)
}

fn load_scene(opts: &Options) -> Result<Scene, Box<dyn std::error::Error>> {
    match &opts.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(Scene::parse(&text)?)
        }
        None => Ok(seeded_scene(&opts.scene)?),
    }
}

fn main() {
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    init_logging(verbosity(opts.verbose));

    let scene = match load_scene(&opts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    for &algorithm in &opts.algorithms {
        let outcome = match run(&scene, algorithm, opts.relax, opts.steps) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };
        for (i, frame) in outcome.frames.iter().enumerate() {
            println!("{} step {}\n{frame}\n", algorithm.name(), i + 1);
        }
        println!("{}", render_run(&scene, &outcome));
        println!("{}\n", outcome.summary());
    }
}
