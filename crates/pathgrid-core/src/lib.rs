//! **pathgrid-core**: geometry primitives shared by the pathgrid crates.
//!
//! [`Point`] identifies a grid cell and [`Range`] describes the half-open
//! rectangle a grid graph covers.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
