use pathgrid_core::Point;

use crate::graph::Graph;
use crate::heuristic::Algorithm;

/// Default scene width, in cells.
pub const DEFAULT_WIDTH: i32 = 26;
/// Default scene height, in cells.
pub const DEFAULT_HEIGHT: i32 = 20;

/// When a rediscovered frontier node counts as improved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelaxRule {
    /// Update when the new distance beats the node's current `g` cost.
    #[default]
    Distance,
    /// Update when the new distance beats the node's current `f` cost.
    ///
    /// Identical to [`RelaxRule::Distance`] for Dijkstra (`h` is 0). With a
    /// non-zero heuristic it accepts some longer paths, so A* results are no
    /// longer guaranteed optimal. Kept for parity with older visualisations.
    Priority,
}

/// Options for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub relax: RelaxRule,
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }
}

impl From<Algorithm> for SearchConfig {
    fn from(algorithm: Algorithm) -> Self {
        Self::new(algorithm)
    }
}

/// Description of a grid scene: size, endpoints and how to search it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
    pub search: SearchConfig,
    /// Fraction of cells a harness should block at random, in `[0, 1]`.
    pub obstacle_density: f64,
    /// Seed for obstacle placement; `None` lets the harness pick one.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start: Point::new(3, 9),
            end: Point::new(22, 9),
            search: SearchConfig::default(),
            obstacle_density: 0.0,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Build the empty grid this scene describes.
    pub fn build(&self) -> Graph {
        Graph::build_grid(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SceneConfig::default();
        assert_eq!((cfg.width, cfg.height), (26, 20));
        assert_eq!(cfg.search.algorithm, Algorithm::Dijkstra);
        assert_eq!(cfg.search.relax, RelaxRule::Distance);
        let g = cfg.build();
        assert_eq!(g.len(), 26 * 20);
        assert!(g.node_at(cfg.start).is_ok());
        assert!(g.node_at(cfg.end).is_ok());
    }

    #[test]
    fn search_config_from_algorithm() {
        let cfg: SearchConfig = Algorithm::AStarOctile.into();
        assert_eq!(cfg.algorithm, Algorithm::AStarOctile);
        assert_eq!(cfg.relax, RelaxRule::Distance);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn scene_round_trip() {
        let cfg = SceneConfig {
            width: 10,
            height: 4,
            start: Point::new(0, 1),
            end: Point::new(9, 3),
            search: SearchConfig {
                algorithm: Algorithm::AStarManhattan,
                relax: RelaxRule::Priority,
            },
            obstacle_density: 0.25,
            seed: Some(7),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let back: SceneConfig = serde_json::from_str(r#"{"width": 8}"#).unwrap();
        assert_eq!(back.width, 8);
        assert_eq!(back.height, DEFAULT_HEIGHT);
        assert_eq!(back.start, Point::new(3, 9));
    }
}
