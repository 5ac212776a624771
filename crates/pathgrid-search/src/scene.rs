//! Text scenes: build a grid graph from ASCII art and draw search state back.
//!
//! ```text
//! S..#....
//! .#.#.##.
//! .#...#.E
//! ```
//!
//! `.` is an open cell, `#` a blocked one, `S` and `E` the endpoints.

use std::fmt;

use pathgrid_core::Point;

use crate::config::SearchConfig;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::search::{SearchResult, SearchSession, run_search_with};

pub const OPEN: char = '.';
pub const BLOCKED: char = '#';
pub const START: char = 'S';
pub const END: char = 'E';
pub const PATH: char = '*';
pub const FRONTIER: char = 'o';
pub const VISITED: char = 'x';

/// A grid graph with its two endpoints.
#[derive(Debug, Clone)]
pub struct Scene {
    pub graph: Graph,
    pub start: Point,
    pub end: Point,
}

impl Scene {
    /// Parse a scene. Lines must share one width; surrounding whitespace of
    /// the whole text is ignored.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MapError::Empty);
        }

        let rows: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = rows[0].chars().count();
        let mut blocked = Vec::new();
        let mut start = None;
        let mut end = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    OPEN => {}
                    BLOCKED => blocked.push(pos),
                    START | END => {
                        let slot = if ch == START { &mut start } else { &mut end };
                        if slot.replace(pos).is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos });
                        }
                    }
                    _ => return Err(MapError::InvalidChar { ch, pos }),
                }
            }
        }

        let start = start.ok_or(MapError::MissingStart)?;
        let end = end.ok_or(MapError::MissingEnd)?;
        let mut graph = Graph::build_grid(width as i32, rows.len() as i32);
        for p in blocked {
            graph.set_blocked(p, true)?;
        }
        Ok(Self { graph, start, end })
    }

    /// Search from `start` to `end`.
    pub fn search(&self, config: impl Into<SearchConfig>) -> Result<SearchResult, GraphError> {
        run_search_with(&self.graph, self.start, self.end, config.into())
    }

    /// A steppable session from `start` to `end`.
    pub fn session(
        &self,
        config: impl Into<SearchConfig>,
    ) -> Result<SearchSession<'_>, GraphError> {
        SearchSession::with_config(&self.graph, self.start, self.end, config.into())
    }

    /// Draw the scene with an optional overlay.
    pub fn render(&self, overlay: &Overlay<'_>) -> String {
        render(&self.graph, self.start, self.end, overlay)
    }
}

/// Search state to draw on top of a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub path: &'a [Point],
    pub open: &'a [Point],
    pub visited: &'a [Point],
}

/// Draw `graph` as text, one line per row.
///
/// Precedence: endpoints, path, blocked, frontier, visited, open. Positions
/// inside the graph's range without a node are drawn as spaces.
pub fn render(graph: &Graph, start: Point, end: Point, overlay: &Overlay<'_>) -> String {
    let rng = graph.range();
    let width = rng.width().max(0) as usize;
    let mut cells = vec![' '; rng.len()];

    for (_, node) in graph.nodes() {
        if let Some(i) = rng.index_of(node.pos()) {
            cells[i] = if node.is_blocked() { BLOCKED } else { OPEN };
        }
    }
    let mut mark = |pts: &[Point], ch: char, over_blocked: bool| {
        for &p in pts {
            if let Some(i) = rng.index_of(p) {
                if over_blocked || cells[i] != BLOCKED {
                    cells[i] = ch;
                }
            }
        }
    };
    mark(overlay.visited, VISITED, false);
    mark(overlay.open, FRONTIER, false);
    mark(overlay.path, PATH, true);
    mark(&[start], START, true);
    mark(&[end], END, true);

    let mut out = String::with_capacity(cells.len() + rng.height().max(0) as usize);
    for (i, row) in cells.chunks(width.max(1)).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row);
    }
    out
}

/// Errors that can occur when parsing a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// The text contains no cells.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `.#SE`.
    InvalidChar { ch: char, pos: Point },
    /// A second `S` or `E`.
    DuplicateMarker { ch: char, pos: Point },
    MissingStart,
    MissingEnd,
    Graph(GraphError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scene: empty map"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "scene: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "scene: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "scene: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
            Self::MissingStart => write!(f, "scene: no start marker '{START}'"),
            Self::MissingEnd => write!(f, "scene: no end marker '{END}'"),
            Self::Graph(e) => write!(f, "scene: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for MapError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Algorithm;

    const GAP: &str = "\
S.#..
..#..
.....
..#..
..#.E";

    #[test]
    fn parse_gap_scene() {
        let scene = Scene::parse(GAP).unwrap();
        assert_eq!(scene.start, Point::new(0, 0));
        assert_eq!(scene.end, Point::new(4, 4));
        assert_eq!(scene.graph.len(), 25);
        assert_eq!(scene.graph.blocked_count(), 4);
        assert!(!scene.graph.is_blocked(Point::new(2, 2)).unwrap());
    }

    #[test]
    fn search_gap_scene() {
        let scene = Scene::parse(GAP).unwrap();
        for algo in Algorithm::ALL {
            let r = scene.search(algo).unwrap();
            assert_eq!(r.length, Some(8.0));
            assert!(r.path.contains(&Point::new(2, 2)));
        }
    }

    #[test]
    fn render_round_trips_plain_scene() {
        let scene = Scene::parse(GAP).unwrap();
        assert_eq!(scene.render(&Overlay::default()), GAP);
    }

    #[test]
    fn render_path_overlay() {
        let scene = Scene::parse("S..\n.#.\n..E").unwrap();
        let path = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
        ];
        let open = [Point::new(0, 1), Point::new(1, 1)];
        let visited = [Point::new(0, 2), Point::new(1, 0)];
        let out = scene.render(&Overlay {
            path: &path,
            open: &open,
            visited: &visited,
        });
        assert_eq!(out, "S**\no#*\nx.E");
    }

    #[test]
    fn session_from_scene() {
        let scene = Scene::parse("S#E\n...").unwrap();
        let mut s = scene.session(Algorithm::AStarManhattan).unwrap();
        let r = s.run_to_end();
        assert_eq!(r.length, Some(4.0));
        assert_eq!(r.path.len(), 5);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Scene::parse("  \n ").unwrap_err(), MapError::Empty);
        assert_eq!(
            Scene::parse("S..\n..\n..E").unwrap_err(),
            MapError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            Scene::parse("S.?\n..E").unwrap_err(),
            MapError::InvalidChar {
                ch: '?',
                pos: Point::new(2, 0)
            }
        );
        assert_eq!(
            Scene::parse("S.S\n..E").unwrap_err(),
            MapError::DuplicateMarker {
                ch: 'S',
                pos: Point::new(2, 0)
            }
        );
        assert_eq!(Scene::parse("...\n..E").unwrap_err(), MapError::MissingStart);
        assert_eq!(Scene::parse("S..\n...").unwrap_err(), MapError::MissingEnd);
    }

    #[test]
    fn error_display() {
        let e = MapError::InvalidChar {
            ch: 'x',
            pos: Point::new(1, 2),
        };
        assert_eq!(e.to_string(), "scene: invalid character \u{201c}x\u{201d} at (1, 2)");
        let e = MapError::from(GraphError::InvalidCoordinates(Point::new(9, 9)));
        assert_eq!(e.to_string(), "scene: graph: no node at (9, 9)");
    }

    #[test]
    fn render_sparse_graph() {
        let mut g = Graph::new();
        g.add_node(Point::new(0, 0)).unwrap();
        g.add_node(Point::new(2, 1)).unwrap();
        let out = render(&g, Point::new(0, 0), Point::new(2, 1), &Overlay::default());
        assert_eq!(out, "S  \n  E");
    }
}
