use std::collections::HashMap;
use std::fmt;

use pathgrid_core::{Point, Range};

use crate::error::GraphError;

/// Opaque node identity: an index into the owning [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw index. Only meaningful for the graph that issued it.
    #[inline]
    pub const fn from_index(idx: usize) -> Self {
        Self(idx)
    }

    /// The raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A weighted edge to a neighbouring node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub to: NodeId,
    pub weight: f32,
}

/// A graph vertex: coordinates, blocked flag and outgoing edges.
///
/// Search bookkeeping (costs, predecessor) is not stored here; every
/// [`SearchSession`](crate::SearchSession) keeps its own.
#[derive(Debug, Clone)]
pub struct Node {
    pos: Point,
    blocked: bool,
    edges: Vec<Connection>,
}

impl Node {
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    #[inline]
    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }
}

/// Undirected weighted graph whose nodes carry grid coordinates.
///
/// [`Graph::build_grid`] produces the usual 4-connected unit-weight grid, but
/// nothing in the search engine depends on that shape: nodes can be added
/// anywhere with [`Graph::add_node`] and wired with [`Graph::connect`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    lookup: HashMap<Point, NodeId>,
    bounds: Range,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `width` × `height` grid with unit-weight edges between
    /// orthogonal neighbours.
    ///
    /// Node ids follow row-major order. Diagonal edges are never created:
    /// they would let paths cut corners past blocked cells.
    pub fn build_grid(width: i32, height: i32) -> Self {
        let rng = Range::sized(width, height);
        let mut g = Self {
            nodes: Vec::with_capacity(rng.len()),
            lookup: HashMap::with_capacity(rng.len()),
            bounds: Range::default(),
        };
        for p in rng {
            g.push_node(p);
        }
        let w = rng.width().max(0) as usize;
        for (i, p) in rng.iter().enumerate() {
            let id = NodeId(i);
            if p.x + 1 < rng.max.x {
                g.link(id, NodeId(i + 1), 1.0);
            }
            if p.y + 1 < rng.max.y {
                g.link(id, NodeId(i + w), 1.0);
            }
        }
        log::debug!("built {}x{} grid graph ({} nodes)", width, height, g.len());
        g
    }

    /// Add an isolated node at `p`.
    pub fn add_node(&mut self, p: Point) -> Result<NodeId, GraphError> {
        if self.lookup.contains_key(&p) {
            return Err(GraphError::DuplicateNode(p));
        }
        Ok(self.push_node(p))
    }

    /// Connect `a` and `b` in both directions with the same `weight`.
    pub fn connect(&mut self, a: NodeId, b: NodeId, weight: f32) -> Result<(), GraphError> {
        for id in [a, b] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        if weight.is_nan() || weight < 0.0 {
            log::warn!("rejecting edge {a} <-> {b} with weight {weight}");
            return Err(GraphError::NegativeWeight { weight });
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        self.link(a, b, weight);
        Ok(())
    }

    /// Look up the node at `p`.
    pub fn node_at(&self, p: Point) -> Result<NodeId, GraphError> {
        self.lookup
            .get(&p)
            .copied()
            .ok_or(GraphError::InvalidCoordinates(p))
    }

    /// Set the blocked flag of the node at `p`. Edges are left untouched; a
    /// blocked node is simply never entered by a search.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), GraphError> {
        let id = self.node_at(p)?;
        self.nodes[id.0].blocked = blocked;
        Ok(())
    }

    /// Flip the blocked flag at `p`, returning the new value.
    pub fn toggle_blocked(&mut self, p: Point) -> Result<bool, GraphError> {
        let id = self.node_at(p)?;
        let n = &mut self.nodes[id.0];
        n.blocked = !n.blocked;
        Ok(n.blocked)
    }

    /// Unblock every node.
    pub fn clear_blocked(&mut self) {
        for n in &mut self.nodes {
            n.blocked = false;
        }
    }

    /// Whether the node at `p` is blocked.
    pub fn is_blocked(&self, p: Point) -> Result<bool, GraphError> {
        Ok(self.nodes[self.node_at(p)?.0].blocked)
    }

    /// Number of blocked nodes.
    pub fn blocked_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.blocked).count()
    }

    /// Node record for `id`, if it belongs to this graph.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Coordinates of `id`.
    #[inline]
    pub fn point(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(Node::pos)
    }

    /// Outgoing edges of `id` (empty for unknown ids).
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Connection] {
        self.get(id).map(Node::edges).unwrap_or(&[])
    }

    /// Iterate over `(id, node)` pairs in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Smallest rectangle containing every node.
    #[inline]
    pub fn range(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Coordinates of a node id issued by this graph.
    #[inline]
    pub(crate) fn pos_of(&self, id: NodeId) -> Point {
        self.nodes[id.0].pos
    }

    fn push_node(&mut self, p: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            pos: p,
            blocked: false,
            edges: Vec::with_capacity(4),
        });
        self.lookup.insert(p, id);
        self.bounds = if self.bounds.is_empty() {
            Range::new(p.x, p.y, p.x + 1, p.y + 1)
        } else {
            Range::new(
                self.bounds.min.x.min(p.x),
                self.bounds.min.y.min(p.y),
                self.bounds.max.x.max(p.x + 1),
                self.bounds.max.y.max(p.y + 1),
            )
        };
        id
    }

    fn link(&mut self, a: NodeId, b: NodeId, weight: f32) {
        self.nodes[a.0].edges.push(Connection { to: b, weight });
        self.nodes[b.0].edges.push(Connection { to: a, weight });
    }
}
