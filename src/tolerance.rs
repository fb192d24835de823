//! Numeric tolerances shared by every primitive.

use ordered_float::OrderedFloat;

/// Tolerance used for equality, degeneracy and near-zero checks.
pub const EPSILON: f64 = 1.0e-10;

/// Step of the grid scalars are snapped to when building hash keys.
pub const GRID: f64 = EPSILON;

/// Epsilon-tolerant scalar comparison.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Snaps a scalar to the nearest multiple of [`GRID`].
///
/// Values that compare equal under [`approx_eq`] but sit on opposite sides of a
/// grid cell boundary quantize to neighbouring cells, so equal values may still
/// produce different keys.
///
/// Above roughly `f64::MAX * GRID` (about 1.8e298) in magnitude the scaled value
/// overflows to infinity, so all such values of one sign share a single key.
pub fn quantize(value: f64) -> OrderedFloat<f64> {
    OrderedFloat((value / GRID).round())
}
