//! Text harness shared by the `pathgrid-demo` binary.
//!
//! Builds a scene (from a map file or a [`SceneConfig`] with random
//! obstacles), runs the selected algorithms and renders the outcome as text.

use std::time::{Duration, Instant};

use log::{LevelFilter, Log, Metadata, Record};
use pathgrid_search::scene::Overlay;
use pathgrid_search::{
    Algorithm, GraphError, Point, RelaxRule, Scene, SceneConfig, SearchConfig, SearchResult,
};
use rand::{Rng, RngExt, SeedableRng};

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Route `log` records at `level` or above to stderr. Safe to call twice.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Map a `-v` count to a level filter.
pub fn verbosity(count: usize) -> LevelFilter {
    match count {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// ---------------------------------------------------------------------------
// Scene setup
// ---------------------------------------------------------------------------

/// Build a scene from `cfg`, blocking roughly `obstacle_density` of the
/// cells. Endpoints are never blocked.
pub fn random_scene(cfg: &SceneConfig, rng: &mut impl Rng) -> Result<Scene, GraphError> {
    let mut graph = cfg.build();
    graph.node_at(cfg.start)?;
    graph.node_at(cfg.end)?;
    let density = cfg.obstacle_density.clamp(0.0, 1.0);
    for p in graph.range() {
        if p == cfg.start || p == cfg.end {
            continue;
        }
        let r: f64 = rng.random();
        if r < density {
            graph.set_blocked(p, true)?;
        }
    }
    log::info!(
        "scene {}x{}: {} blocked cells",
        cfg.width,
        cfg.height,
        graph.blocked_count()
    );
    Ok(Scene {
        graph,
        start: cfg.start,
        end: cfg.end,
    })
}

/// [`random_scene`] seeded from `cfg.seed`, or from the OS when unset.
pub fn seeded_scene(cfg: &SceneConfig) -> Result<Scene, GraphError> {
    let mut rng = match cfg.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_rng(&mut rand::rng()),
    };
    random_scene(cfg, &mut rng)
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// One algorithm's outcome on a scene.
#[derive(Debug, Clone)]
pub struct Run {
    pub algorithm: Algorithm,
    pub result: SearchResult,
    pub elapsed: Duration,
    /// Expanded cells in order.
    pub explored: Vec<Point>,
    /// Rendered frames, one per expansion, when stepping was requested.
    pub frames: Vec<String>,
}

impl Run {
    /// Summary line: algorithm, length, expansions, time.
    pub fn summary(&self) -> String {
        let length = match self.result.length {
            Some(l) => format!("{l:.3}"),
            None => "no path".to_string(),
        };
        format!(
            "{:<15} length: {:<8} visited: {:<5} time: {:.3}ms",
            self.algorithm.name(),
            length,
            self.result.visited,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

/// Search `scene` with `algorithm`, optionally capturing a frame per step.
pub fn run(
    scene: &Scene,
    algorithm: Algorithm,
    relax: RelaxRule,
    capture_frames: bool,
) -> Result<Run, GraphError> {
    let config = SearchConfig { algorithm, relax };
    let mut session = scene.session(config)?;
    let mut frames = Vec::new();
    let started = Instant::now();
    if capture_frames {
        loop {
            let report = session.step();
            if report.done {
                break;
            }
            let open = session.open_points();
            let visited = session.visited_points();
            frames.push(scene.render(&Overlay {
                path: &[],
                open: &open,
                visited: &visited,
            }));
        }
    }
    let result = session.run_to_end();
    let elapsed = started.elapsed();
    Ok(Run {
        algorithm,
        result,
        elapsed,
        explored: session.visited_points(),
        frames,
    })
}

/// Final picture of a run: the path over the cells it explored.
pub fn render_run(scene: &Scene, run: &Run) -> String {
    scene.render(&Overlay {
        path: &run.result.path,
        open: &[],
        visited: &run.explored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_scene_is_reproducible() {
        let cfg = SceneConfig {
            obstacle_density: 0.3,
            seed: Some(42),
            ..SceneConfig::default()
        };
        let a = seeded_scene(&cfg).unwrap();
        let b = seeded_scene(&cfg).unwrap();
        assert_eq!(
            a.render(&Overlay::default()),
            b.render(&Overlay::default())
        );
        assert!(a.graph.blocked_count() > 0);
        assert!(!a.graph.is_blocked(cfg.start).unwrap());
        assert!(!a.graph.is_blocked(cfg.end).unwrap());
    }

    #[test]
    fn unseeded_scene_keeps_endpoints_open() {
        let cfg = SceneConfig {
            obstacle_density: 1.0,
            seed: None,
            ..SceneConfig::default()
        };
        let scene = seeded_scene(&cfg).unwrap();
        assert_eq!(scene.graph.blocked_count(), scene.graph.len() - 2);
        assert!(!scene.graph.is_blocked(cfg.start).unwrap());
        assert!(!scene.graph.is_blocked(cfg.end).unwrap());
    }

    #[test]
    fn zero_density_blocks_nothing() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let scene = random_scene(&SceneConfig::default(), &mut rng).unwrap();
        assert_eq!(scene.graph.blocked_count(), 0);
        let r = run(&scene, Algorithm::Dijkstra, RelaxRule::Distance, false).unwrap();
        assert_eq!(r.result.length, Some(19.0));
        assert!(r.frames.is_empty());
    }

    #[test]
    fn endpoints_outside_grid_are_rejected() {
        let cfg = SceneConfig {
            end: Point::new(40, 2),
            ..SceneConfig::default()
        };
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(
            random_scene(&cfg, &mut rng).unwrap_err(),
            GraphError::InvalidCoordinates(Point::new(40, 2))
        );
    }

    #[test]
    fn frames_follow_expansions() {
        let scene = Scene::parse("S..\n.#.\n..E").unwrap();
        let r = run(&scene, Algorithm::AStarManhattan, RelaxRule::Distance, true).unwrap();
        assert_eq!(r.frames.len(), r.result.visited);
        assert!(r.frames[0].starts_with('S'));
        assert!(r.summary().contains("length: 4.000"));
        assert_eq!(r.explored.len(), r.result.visited);
        let picture = render_run(&scene, &r);
        assert_eq!(picture.matches('*').count(), r.result.path.len() - 2);
    }

    #[test]
    fn summary_without_path() {
        let scene = Scene::parse("S#E").unwrap();
        let r = run(&scene, Algorithm::Dijkstra, RelaxRule::Distance, false).unwrap();
        assert!(r.summary().contains("no path"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity(0), LevelFilter::Warn);
        assert_eq!(verbosity(1), LevelFilter::Info);
        assert_eq!(verbosity(7), LevelFilter::Trace);
    }
}
