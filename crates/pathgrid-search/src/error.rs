use std::fmt;

use pathgrid_core::Point;

use crate::graph::NodeId;

/// Errors raised by [`Graph`](crate::Graph) construction and lookups.
///
/// A search that finds no path is not an error; see
/// [`SearchResult::found`](crate::SearchResult::found).
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The coordinates do not name a node of the graph.
    InvalidCoordinates(Point),
    /// The node id does not belong to the graph.
    UnknownNode(NodeId),
    /// A node already exists at these coordinates.
    DuplicateNode(Point),
    /// An edge weight was negative or NaN.
    NegativeWeight { weight: f32 },
    /// An edge would connect a node to itself.
    SelfLoop(NodeId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinates(p) => write!(f, "graph: no node at {p}"),
            Self::UnknownNode(id) => write!(f, "graph: unknown node {id}"),
            Self::DuplicateNode(p) => write!(f, "graph: a node already exists at {p}"),
            Self::NegativeWeight { weight } => {
                write!(f, "graph: edge weight must be non-negative, got {weight}")
            }
            Self::SelfLoop(id) => write!(f, "graph: refusing to connect {id} to itself"),
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = GraphError::InvalidCoordinates(Point::new(7, -1));
        assert_eq!(e.to_string(), "graph: no node at (7, -1)");
        let e = GraphError::NegativeWeight { weight: -2.5 };
        assert_eq!(
            e.to_string(),
            "graph: edge weight must be non-negative, got -2.5"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&GraphError::SelfLoop(NodeId::from_index(3)));
    }
}
