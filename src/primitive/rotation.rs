use crate::tolerance::EPSILON;
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

#[cfg(test)]
use proptest_derive::Arbitrary;

/// One of the three principal axes of the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// Rotates `v` right-handedly by `angle` radians about this axis, through the origin.
    ///
    /// Only the two coordinates perpendicular to the axis are recomputed; the coordinate
    /// along the axis is copied, so it survives even when another coordinate is infinite.
    pub fn rotate(self, v: Vector3<f64>, angle: f64) -> Vector3<f64> {
        let (sin, cos) = angle.sin_cos();
        match self {
            Axis::X => Vector3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos),
            Axis::Y => Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos),
            Axis::Z => Vector3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z),
        }
    }

    /// The same rotation as [`Axis::rotate`], as a matrix.
    pub fn rotation(self, angle: f64) -> Rotation3<f64> {
        let (sin, cos) = angle.sin_cos();
        let matrix = match self {
            Axis::X => Matrix3::new(
                1.0, 0.0, 0.0, //
                0.0, cos, -sin, //
                0.0, sin, cos,
            ),
            Axis::Y => Matrix3::new(
                cos, 0.0, sin, //
                0.0, 1.0, 0.0, //
                -sin, 0.0, cos,
            ),
            Axis::Z => Matrix3::new(
                cos, -sin, 0.0, //
                sin, cos, 0.0, //
                0.0, 0.0, 1.0,
            ),
        };
        Rotation3::from_matrix_unchecked(matrix)
    }
}

/// Extrinsic Euler angles in radians, applied about the fixed X, then Y, then Z axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns a copy with `delta` added to the angle about `axis`.
    pub fn accumulated(&self, axis: Axis, delta: f64) -> Self {
        let mut out = *self;
        match axis {
            Axis::X => out.x += delta,
            Axis::Y => out.y += delta,
            Axis::Z => out.z += delta,
        }
        out
    }

    /// Maps a vector from the local frame into the world frame.
    ///
    /// Angles whose magnitude does not exceed [`EPSILON`] are skipped.
    pub fn apply(&self, v: Vector3<f64>) -> Vector3<f64> {
        Axis::ALL.iter().fold(v, |acc, &axis| {
            let angle = self.angle(axis);
            if angle.abs() > EPSILON {
                axis.rotate(acc, angle)
            } else {
                acc
            }
        })
    }

    /// Maps a vector from the world frame back into the local frame: -Z, then -Y, then -X.
    pub fn apply_inverse(&self, v: Vector3<f64>) -> Vector3<f64> {
        Axis::ALL.iter().rev().fold(v, |acc, &axis| {
            let angle = self.angle(axis);
            if angle.abs() > EPSILON {
                axis.rotate(acc, -angle)
            } else {
                acc
            }
        })
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        use crate::tolerance::approx_eq;
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

/// Rotates `point` by `angle` radians about the line through `pivot` along `axis`,
/// using Rodrigues' rotation formula:
///
/// `v' = v·cosθ + (k×v)·sinθ + k·(k·v)·(1−cosθ)` with `v = point − pivot`.
pub fn rotate_about_pivot(
    point: Vector3<f64>,
    pivot: Vector3<f64>,
    axis: &Unit<Vector3<f64>>,
    angle: f64,
) -> Vector3<f64> {
    let v = point - pivot;
    let (sin, cos) = angle.sin_cos();
    let k = axis.as_ref();

    let rotated = v * cos + k.cross(&v) * sin + k * (k.dot(&v) * (1.0 - cos));

    rotated + pivot
}
