//! Dijkstra / A* search driven one expansion at a time.
//!
//! A [`SearchSession`] borrows a [`Graph`] immutably and keeps all per-search
//! bookkeeping in its own arena, so any number of sessions can share a graph
//! and the graph cannot change under a running search.

use pathgrid_core::Point;

use crate::config::{RelaxRule, SearchConfig};
use crate::error::GraphError;
use crate::frontier::Frontier;
use crate::graph::{Graph, NodeId};
use crate::heuristic::{Algorithm, Heuristic};

/// Per-node search bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    /// Best known distance from the start.
    pub g: f32,
    /// Heuristic estimate of the remaining distance.
    pub h: f32,
    /// Priority key, always `g + h`.
    pub f: f32,
    pub predecessor: Option<NodeId>,
    pub visited: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            g: f32::INFINITY,
            h: 0.0,
            f: f32::INFINITY,
            predecessor: None,
            visited: false,
        }
    }
}

impl NodeState {
    #[inline]
    fn set_costs(&mut self, g: f32, h: f32) {
        self.g = g;
        self.h = h;
        self.f = g + h;
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Expanding,
    Succeeded,
    Failed,
}

impl SearchStatus {
    #[inline]
    pub fn is_done(self) -> bool {
        !matches!(self, Self::Expanding)
    }
}

/// What a single [`SearchSession::step`] did.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    /// Node moved to the visited set, if any.
    pub expanded: Option<Point>,
    /// Nodes inserted into or re-keyed in the frontier by this step.
    pub newly_open: Vec<Point>,
    /// The search has terminated (found or failed).
    pub done: bool,
}

impl StepReport {
    fn finished() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }
}

/// Outcome of a finished search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub found: bool,
    /// Cells from start to end inclusive; empty when no path exists.
    pub path: Vec<Point>,
    /// Total edge weight along `path`; `None` when no path exists.
    pub length: Option<f32>,
    /// Number of nodes expanded.
    pub visited: usize,
}

impl SearchResult {
    fn not_found(visited: usize) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            length: None,
            visited,
        }
    }
}

/// A resumable shortest-path search over a borrowed graph.
pub struct SearchSession<'g, H = Algorithm> {
    graph: &'g Graph,
    heuristic: H,
    relax: RelaxRule,
    start: NodeId,
    goal: NodeId,
    goal_pos: Point,
    state: Vec<NodeState>,
    open: Frontier,
    visited: Vec<NodeId>,
    status: SearchStatus,
}

impl<'g> SearchSession<'g> {
    /// Start a search with one of the built-in algorithms.
    pub fn new(
        graph: &'g Graph,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> Result<Self, GraphError> {
        Self::with_config(graph, start, end, SearchConfig::new(algorithm))
    }

    pub fn with_config(
        graph: &'g Graph,
        start: Point,
        end: Point,
        config: SearchConfig,
    ) -> Result<Self, GraphError> {
        Self::with_heuristic(graph, start, end, config.algorithm, config.relax)
    }
}

impl<'g, H: Heuristic> SearchSession<'g, H> {
    /// Start a search with a custom heuristic.
    ///
    /// Fails with [`GraphError::InvalidCoordinates`] if either endpoint is not
    /// a node of `graph`. Endpoints are accepted even when blocked.
    pub fn with_heuristic(
        graph: &'g Graph,
        start: Point,
        end: Point,
        heuristic: H,
        relax: RelaxRule,
    ) -> Result<Self, GraphError> {
        let start_id = graph.node_at(start)?;
        let goal = graph.node_at(end)?;

        let mut state = vec![NodeState::default(); graph.len()];
        let mut open = Frontier::with_capacity(graph.len());

        let s = &mut state[start_id.index()];
        s.set_costs(0.0, heuristic.estimate(start, end));
        open.insert(start_id, s.f);

        log::debug!("search {start} -> {end} over {} nodes ({relax:?})", graph.len());

        Ok(Self {
            graph,
            heuristic,
            relax,
            start: start_id,
            goal,
            goal_pos: end,
            state,
            open,
            visited: Vec::new(),
            status: SearchStatus::Expanding,
        })
    }

    /// Run one iteration of the expansion loop.
    ///
    /// Pops the best frontier node; if it is the goal, or the frontier is
    /// empty, the search finishes. Otherwise the node is marked visited and
    /// its unvisited, unblocked neighbours are relaxed. Calling `step` after
    /// the search finished is a no-op.
    pub fn step(&mut self) -> StepReport {
        if self.status.is_done() {
            return StepReport::finished();
        }

        let Some(current) = self.open.pop_min() else {
            self.status = SearchStatus::Failed;
            log::debug!(
                "no path to {} after {} expansions",
                self.goal_pos,
                self.visited.len()
            );
            return StepReport::finished();
        };

        if current == self.goal {
            self.status = SearchStatus::Succeeded;
            log::debug!(
                "reached {} at cost {} after {} expansions",
                self.goal_pos,
                self.state[current.index()].g,
                self.visited.len()
            );
            return StepReport::finished();
        }

        let graph = self.graph;
        let ci = current.index();
        self.state[ci].visited = true;
        self.visited.push(current);
        let current_g = self.state[ci].g;
        let current_pos = graph.pos_of(current);
        log::trace!("expanding {current_pos} (g = {current_g})");

        let mut newly_open = Vec::new();
        for edge in graph.neighbors(current) {
            let Some(node) = graph.get(edge.to) else {
                continue;
            };
            let n = &mut self.state[edge.to.index()];
            // The goal is entered even when blocked.
            if n.visited || (node.is_blocked() && edge.to != self.goal) {
                continue;
            }

            let tentative_g = current_g + edge.weight;
            if self.open.contains(edge.to) {
                let bound = match self.relax {
                    RelaxRule::Distance => n.g,
                    RelaxRule::Priority => n.f,
                };
                if tentative_g >= bound {
                    continue;
                }
                n.set_costs(tentative_g, n.h);
            } else {
                n.set_costs(tentative_g, self.heuristic.estimate(node.pos(), self.goal_pos));
            }
            n.predecessor = Some(current);
            self.open.insert(edge.to, n.f);
            newly_open.push(node.pos());
        }

        StepReport {
            expanded: Some(current_pos),
            newly_open,
            done: false,
        }
    }

    /// Step until the search finishes and return its result.
    pub fn run_to_end(&mut self) -> SearchResult {
        loop {
            if let Some(result) = self.result() {
                return result;
            }
            self.step();
        }
    }

    /// The result, once the search has finished.
    pub fn result(&self) -> Option<SearchResult> {
        match self.status {
            SearchStatus::Expanding => None,
            SearchStatus::Failed => Some(SearchResult::not_found(self.visited.len())),
            SearchStatus::Succeeded => Some(self.reconstruct()),
        }
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.graph.pos_of(self.start)
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.goal_pos
    }

    /// Frontier members in pop order.
    pub fn open_points(&self) -> Vec<Point> {
        self.open.iter().map(|id| self.graph.pos_of(id)).collect()
    }

    /// Visited nodes in expansion order.
    pub fn visited_points(&self) -> Vec<Point> {
        self.visited.iter().map(|&id| self.graph.pos_of(id)).collect()
    }

    /// Bookkeeping for the node at `p`.
    pub fn state_at(&self, p: Point) -> Option<&NodeState> {
        let id = self.graph.node_at(p).ok()?;
        self.state.get(id.index())
    }

    fn reconstruct(&self) -> SearchResult {
        let mut path = Vec::new();
        let mut cur = Some(self.goal);
        while let Some(id) = cur {
            path.push(self.graph.pos_of(id));
            cur = self.state[id.index()].predecessor;
        }
        path.reverse();
        SearchResult {
            found: true,
            path,
            length: Some(self.state[self.goal.index()].g),
            visited: self.visited.len(),
        }
    }
}

/// Run a complete search from `start` to `end`.
pub fn run_search(
    graph: &Graph,
    start: Point,
    end: Point,
    algorithm: Algorithm,
) -> Result<SearchResult, GraphError> {
    run_search_with(graph, start, end, SearchConfig::new(algorithm))
}

/// Run a complete search with explicit options.
pub fn run_search_with(
    graph: &Graph,
    start: Point,
    end: Point,
    config: SearchConfig,
) -> Result<SearchResult, GraphError> {
    Ok(SearchSession::with_config(graph, start, end, config)?.run_to_end())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn result_round_trip() {
        let g = Graph::build_grid(4, 4);
        let r = run_search(&g, Point::new(0, 0), Point::new(3, 2), Algorithm::AStarOctile).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn missing_length_serializes_as_null() {
        let r = SearchResult::not_found(3);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["length"], serde_json::Value::Null);
        assert_eq!(json["visited"], 3);
    }
}
