//! Shortest-path search on weighted grid graphs.
//!
//! This crate provides:
//!
//! - an undirected weighted [`Graph`] with per-node blocked flags, built as a
//!   4-connected grid by [`Graph::build_grid`] or node by node;
//! - **Dijkstra** and **A\*** (Manhattan or octile heuristic) through one
//!   shared engine, either in one call ([`run_search`]) or one expansion at a
//!   time ([`SearchSession::step`]) for visualisation;
//! - ASCII [`Scene`]s for building graphs from text and drawing search state.
//!
//! Each search keeps its own bookkeeping, so a graph can be searched many
//! times (or by several sessions at once) without being reset.
//!
//! ```
//! use pathgrid_core::Point;
//! use pathgrid_search::{Algorithm, Graph, run_search};
//!
//! let mut g = Graph::build_grid(5, 5);
//! g.set_blocked(Point::new(2, 1), true).unwrap();
//! let r = run_search(&g, Point::new(0, 0), Point::new(4, 4), Algorithm::AStarManhattan).unwrap();
//! assert!(r.found);
//! assert_eq!(r.length, Some(8.0));
//! ```

mod config;
mod error;
mod frontier;
mod graph;
mod heuristic;
pub mod scene;
mod search;

pub use pathgrid_core::{Point, Range};

pub use config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, RelaxRule, SceneConfig, SearchConfig};
pub use error::GraphError;
pub use frontier::Frontier;
pub use graph::{Connection, Graph, Node, NodeId};
pub use heuristic::{Algorithm, Heuristic, SQRT_2, manhattan, octile, zero};
pub use scene::{MapError, Overlay, Scene};
pub use search::{
    NodeState, SearchResult, SearchSession, SearchStatus, StepReport, run_search,
    run_search_with,
};
