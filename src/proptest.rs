use crate::primitive::cube::Cube3D;
use crate::primitive::line::Line3D;
use crate::primitive::point::Point3D;
use nalgebra::{Unit, Vector3};
use proptest::prelude::*;

/// A Strategy to generate f64 values within the range [-50.0, 50.0].
/// though it is set up to be likely to produce zeros, round numbers, and edge cases.
pub fn scalar_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop_oneof![
            Just(0.0),
            Just(1.0),
            Just(-1.0),
            Just(10.0),
            Just(-10.0),
            Just(0.5),
            Just(-0.5),
            Just(std::f64::consts::PI),
            Just(-std::f64::consts::PI),
        ],
        -50.0..=50.0,
    ]
}

/// Angles in radians, biased towards the quarter turns and zero.
pub fn angle_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(std::f64::consts::FRAC_PI_2),
        Just(std::f64::consts::PI),
        Just(-std::f64::consts::FRAC_PI_4),
        -std::f64::consts::TAU..std::f64::consts::TAU,
    ]
}

pub fn arbitrary_vector() -> impl Strategy<Value = Vector3<f64>> {
    (scalar_strategy(), scalar_strategy(), scalar_strategy())
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

pub fn arbitrary_unit_vector() -> impl Strategy<Value = Unit<Vector3<f64>>> {
    arbitrary_vector()
        .prop_filter("Non-zero vector", |v| v.norm() > 0.0001)
        .prop_map(Unit::new_normalize)
}

pub fn arbitrary_point() -> impl Strategy<Value = Point3D> {
    arbitrary_vector().prop_map(Point3D::from)
}

/// Points far enough from the origin to be normalized without numerical trouble.
pub fn arbitrary_direction() -> impl Strategy<Value = Point3D> {
    arbitrary_point().prop_filter("Non-zero direction", |p| p.magnitude() > 0.0001)
}

pub fn arbitrary_line() -> impl Strategy<Value = Line3D> {
    (arbitrary_point(), arbitrary_point())
        .prop_filter_map("Non-degenerate line", |(a, b)| {
            if a.distance_to(b) > 0.0001 {
                Line3D::new(a, b).ok()
            } else {
                None
            }
        })
}

pub fn side_length_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(2.0), Just(10.0), 0.01..=25.0]
}

pub fn arbitrary_axis_aligned_cube() -> impl Strategy<Value = Cube3D> {
    (arbitrary_point(), side_length_strategy())
        .prop_filter_map("Valid cube", |(center, side)| Cube3D::new(center, side).ok())
}

pub fn arbitrary_cube() -> impl Strategy<Value = Cube3D> {
    (
        arbitrary_point(),
        side_length_strategy(),
        angle_strategy(),
        angle_strategy(),
        angle_strategy(),
    )
        .prop_filter_map("Valid cube", |(center, side, rx, ry, rz)| {
            Cube3D::with_rotation(center, side, rx, ry, rz).ok()
        })
}

/// A parameter along a segment, hitting both endpoints and the midpoint often.
pub fn unit_parameter() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.5), Just(1.0), 0.0..=1.0]
}
