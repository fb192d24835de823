//! The primitive solids and the small value types they are built from.
//!
//! Every type here is a constant-size, immutable value: operations return new values and
//! never mutate their receiver.

pub mod aabb;
pub mod cube;
pub mod line;
pub mod point;
pub mod rotation;
