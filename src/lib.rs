//! Immutable 3D primitives: points, line segments and oriented cubes.
//!
//! All comparisons use the absolute tolerance [`EPSILON`]. The types implement an
//! epsilon-based `PartialEq` only; use their `grid_key` methods where a hashable key is
//! needed.

pub mod error;
pub mod intersection;
pub mod primitive;
pub mod tolerance;

#[cfg(test)]
pub mod proptest;

pub use error::{ErrorKind, GeometryError};
pub use primitive::aabb::Aabb;
pub use primitive::cube::{Cube3D, CubeKey};
pub use primitive::line::Line3D;
pub use primitive::point::{Point3D, PointKey};
pub use primitive::rotation::{Axis, EulerAngles};
pub use tolerance::EPSILON;
