//! Distance estimates and the algorithms that use them.

use std::fmt;

use pathgrid_core::Point;

/// √2, the cost of one diagonal step on an 8-connected grid.
pub const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Estimate of the remaining cost between two cells.
///
/// Must never overestimate the true cost (admissible) for A* to return
/// shortest paths.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f32;
}

impl<F: Fn(Point, Point) -> f32> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f32 {
        self(from, to)
    }
}

/// Always 0. Turns A* into uniform-cost search (Dijkstra).
#[inline]
pub fn zero(_from: Point, _to: Point) -> f32 {
    0.0
}

/// Manhattan (L1) distance. Exact lower bound on the 4-connected grid.
#[inline]
pub fn manhattan(from: Point, to: Point) -> f32 {
    let (dx, dy) = from.abs_delta(to);
    (dx + dy) as f32
}

/// Octile distance: unit orthogonal steps plus √2 diagonal steps.
///
/// [`Graph::build_grid`](crate::Graph::build_grid) has no diagonal edges, so
/// this bound is admissible there but looser than [`manhattan`].
#[inline]
pub fn octile(from: Point, to: Point) -> f32 {
    let (dx, dy) = from.abs_delta(to);
    (dx + dy) as f32 + (SQRT_2 - 2.0) * dx.min(dy) as f32
}

/// Built-in search algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStarManhattan,
    AStarOctile,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::AStarManhattan,
        Algorithm::AStarOctile,
    ];

    /// Human-readable label.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStarManhattan => "A* (Manhattan)",
            Self::AStarOctile => "A* (Octile)",
        }
    }

    /// The next algorithm in [`Algorithm::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Dijkstra => Self::AStarManhattan,
            Self::AStarManhattan => Self::AStarOctile,
            Self::AStarOctile => Self::Dijkstra,
        }
    }

    /// The heuristic this algorithm plugs into the search.
    pub fn heuristic(self) -> fn(Point, Point) -> f32 {
        match self {
            Self::Dijkstra => zero,
            Self::AStarManhattan => manhattan,
            Self::AStarOctile => octile,
        }
    }
}

impl Heuristic for Algorithm {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f32 {
        self.heuristic()(from, to)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn zero_is_zero() {
        assert_eq!(zero(Point::new(0, 0), Point::new(9, 4)), 0.0);
    }

    #[test]
    fn manhattan_values() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(4, 4)), 8.0);
        assert_eq!(manhattan(Point::new(3, 9), Point::new(22, 9)), 19.0);
        assert_eq!(manhattan(Point::new(5, 1), Point::new(2, 6)), 8.0);
        assert_eq!(manhattan(Point::new(2, 2), Point::new(2, 2)), 0.0);
    }

    #[test]
    fn octile_values() {
        let d = octile(Point::new(0, 0), Point::new(4, 4));
        assert!((d - 4.0 * SQRT_2).abs() < EPS);
        let d = octile(Point::new(0, 0), Point::new(5, 2));
        assert!((d - (3.0 + 2.0 * SQRT_2)).abs() < EPS);
        assert_eq!(octile(Point::new(1, 1), Point::new(1, 6)), 5.0);
    }

    #[test]
    fn octile_never_exceeds_manhattan() {
        let origin = Point::new(3, 3);
        for y in -4..10 {
            for x in -4..10 {
                let p = Point::new(x, y);
                assert!(octile(p, origin) <= manhattan(p, origin) + EPS);
                assert!(octile(p, origin) >= 0.0);
            }
        }
    }

    #[test]
    fn algorithm_heuristics() {
        let (a, b) = (Point::new(0, 0), Point::new(3, 4));
        assert_eq!(Algorithm::Dijkstra.estimate(a, b), 0.0);
        assert_eq!(Algorithm::AStarManhattan.estimate(a, b), 7.0);
        assert!((Algorithm::AStarOctile.estimate(a, b) - (1.0 + 3.0 * SQRT_2)).abs() < EPS);
    }

    #[test]
    fn algorithm_cycle() {
        let mut a = Algorithm::default();
        for expected in Algorithm::ALL {
            assert_eq!(a, expected);
            a = a.next();
        }
        assert_eq!(a, Algorithm::Dijkstra);
    }

    #[test]
    fn closures_are_heuristics() {
        let scaled = |a: Point, b: Point| manhattan(a, b) * 0.5;
        assert_eq!(scaled.estimate(Point::new(0, 0), Point::new(2, 2)), 2.0);
        assert_eq!(Algorithm::AStarOctile.to_string(), "A* (Octile)");
    }
}
