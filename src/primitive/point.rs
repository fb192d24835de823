use crate::error::GeometryError;
use crate::primitive::rotation::Axis;
use crate::tolerance::{approx_eq, quantize, EPSILON};
use nalgebra::{Point3, Vector3};
use ordered_float::OrderedFloat;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use tracing::{debug, trace, warn};

/// A point in 3D space, which doubles as a free vector where the context calls for one.
///
/// Equality is epsilon-tolerant per coordinate (see [`EPSILON`]), so the type implements
/// `PartialEq` but not `Eq` or `Hash`; use [`Point3D::grid_key`] to key maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point3D {
    coords: Vector3<f64>,
}

/// Quantized, hashable stand-in for a [`Point3D`].
///
/// Points that compare equal usually share a key, but two points within epsilon of each
/// other can land in neighbouring grid cells and get different keys. Coordinates beyond
/// about ±1.8e298 all map to the same infinite key component (see [`quantize`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey([OrderedFloat<f64>; 3]);

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: Vector3::new(x, y, z),
        }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Converts spherical coordinates to Cartesian ones.
    ///
    /// # Arguments
    ///
    /// * `radius` - Distance from the origin; must be non-negative.
    /// * `theta` - Azimuthal angle in the x-y plane, measured from the x-axis.
    /// * `phi` - Polar angle, measured from the positive z-axis.
    pub fn from_spherical(radius: f64, theta: f64, phi: f64) -> Result<Self, GeometryError> {
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius(radius));
        }

        Ok(Self::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ))
    }

    /// Converts cylindrical coordinates `(radius, theta, z)` to Cartesian ones.
    pub fn from_cylindrical(radius: f64, theta: f64, z: f64) -> Result<Self, GeometryError> {
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius(radius));
        }

        Ok(Self::new(radius * theta.cos(), radius * theta.sin(), z))
    }

    pub fn x(&self) -> f64 {
        self.coords.x
    }

    pub fn y(&self) -> f64 {
        self.coords.y
    }

    pub fn z(&self) -> f64 {
        self.coords.z
    }

    pub fn coords(&self) -> Vector3<f64> {
        self.coords
    }

    /// Euclidean (L2) distance.
    pub fn distance_to(&self, other: Point3D) -> f64 {
        (self.coords - other.coords).norm()
    }

    /// Manhattan (L1) distance.
    pub fn manhattan_distance_to(&self, other: Point3D) -> f64 {
        (self.coords - other.coords).abs().sum()
    }

    /// Distance from the origin.
    pub fn magnitude(&self) -> f64 {
        self.coords.norm()
    }

    pub fn rotate_x(&self, angle: f64) -> Self {
        self.rotate(Axis::X, angle)
    }

    pub fn rotate_y(&self, angle: f64) -> Self {
        self.rotate(Axis::Y, angle)
    }

    pub fn rotate_z(&self, angle: f64) -> Self {
        self.rotate(Axis::Z, angle)
    }

    /// Rotates about a principal axis through the coordinate origin, not through this point.
    pub fn rotate(&self, axis: Axis, angle: f64) -> Self {
        Self {
            coords: axis.rotate(self.coords, angle),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x() + dx, self.y() + dy, self.z() + dz)
    }

    /// Component-wise scaling. Zero and negative factors are allowed; they flatten or
    /// mirror the point.
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Self {
        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            warn!(point = %self, sx, sy, sz, "scaling point with a zero factor");
        }
        Self::new(self.x() * sx, self.y() * sy, self.z() * sz)
    }

    pub fn dot_product(&self, other: Point3D) -> f64 {
        self.coords.dot(&other.coords)
    }

    /// Right-handed cross product: `x̂ × ŷ = ẑ`.
    pub fn cross_product(&self, other: Point3D) -> Self {
        Self {
            coords: self.coords.cross(&other.coords),
        }
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// Vectors shorter than [`EPSILON`] are rejected with [`GeometryError::ZeroVector`].
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        let magnitude = self.magnitude();
        if magnitude < EPSILON {
            debug!(vector = %self, "cannot normalize a zero-length vector");
            return Err(GeometryError::ZeroVector(magnitude));
        }

        let normalized = Self {
            coords: self.coords / magnitude,
        };
        trace!(from = %self, to = %normalized, "normalized vector");
        Ok(normalized)
    }

    pub fn midpoint(&self, other: Point3D) -> Self {
        Self::new(
            (self.x() + other.x()) / 2.0,
            (self.y() + other.y()) / 2.0,
            (self.z() + other.z()) / 2.0,
        )
    }

    pub fn grid_key(&self) -> PointKey {
        PointKey([quantize(self.x()), quantize(self.y()), quantize(self.z())])
    }

    pub fn geogebra_string(&self) -> String {
        format!("({:}, {:}, {:})", self.x(), self.y(), self.z())
    }
}

impl PartialEq for Point3D {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x(), other.x()) && approx_eq(self.y(), other.y()) && approx_eq(self.z(), other.z())
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3D({:.2}, {:.2}, {:.2})", self.x(), self.y(), self.z())
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(coords: Vector3<f64>) -> Self {
        Self { coords }
    }
}

impl From<Point3<f64>> for Point3D {
    fn from(point: Point3<f64>) -> Self {
        Self {
            coords: point.coords,
        }
    }
}

impl From<Point3D> for Vector3<f64> {
    fn from(point: Point3D) -> Self {
        point.coords
    }
}

impl From<Point3D> for Point3<f64> {
    fn from(point: Point3D) -> Self {
        Point3::from(point.coords)
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Point3D) -> Point3D {
        Self {
            coords: self.coords + rhs.coords,
        }
    }
}

impl Sub for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Point3D) -> Point3D {
        Self {
            coords: self.coords - rhs.coords,
        }
    }
}

impl Neg for Point3D {
    type Output = Point3D;

    fn neg(self) -> Point3D {
        Self {
            coords: -self.coords,
        }
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: f64) -> Point3D {
        Self {
            coords: self.coords * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::proptest::{arbitrary_direction, arbitrary_point, scalar_strategy};
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::f64::consts::{FRAC_PI_2, PI};

    const DELTA: f64 = 1e-9;

    #[test]
    fn origin_is_all_zeros() {
        let origin = Point3D::origin();
        assert_eq!((origin.x(), origin.y(), origin.z()), (0.0, 0.0, 0.0));
        assert_eq!(origin, Point3D::default());
    }

    #[test]
    fn spherical_conversion() {
        let p = Point3D::from_spherical(2.0, FRAC_PI_2, FRAC_PI_2).unwrap();
        assert_eq!(p, Point3D::new(0.0, 2.0, 0.0));

        let north = Point3D::from_spherical(5.0, 1.0, 0.0).unwrap();
        assert!((north.z() - 5.0).abs() < DELTA);
    }

    #[test]
    fn cylindrical_conversion_keeps_height() {
        let p = Point3D::from_cylindrical(5.0, FRAC_PI_2, 10.0).unwrap();
        assert!(p.x().abs() < DELTA);
        assert!((p.y() - 5.0).abs() < DELTA);
        assert_eq!(p.z(), 10.0);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = Point3D::from_spherical(-1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, GeometryError::NegativeRadius(-1.0));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(Point3D::from_cylindrical(-0.5, 0.0, 1.0).is_err());
        assert!(Point3D::from_spherical(0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn distances() {
        let a = Point3D::origin();
        assert_eq!(a.distance_to(Point3D::new(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(a.manhattan_distance_to(Point3D::new(3.0, -4.0, 5.0)), 12.0);
        assert_eq!(Point3D::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[test]
    fn cross_product_of_basis_vectors() {
        let i = Point3D::new(1.0, 0.0, 0.0);
        let j = Point3D::new(0.0, 1.0, 0.0);
        assert_eq!(i.cross_product(j), Point3D::new(0.0, 0.0, 1.0));
        assert_eq!(i.dot_product(j), 0.0);
    }

    #[test]
    fn rotations_are_about_the_origin() {
        let p = Point3D::new(1.0, 0.0, 0.0);
        assert_eq!(p.rotate_z(FRAC_PI_2), Point3D::new(0.0, 1.0, 0.0));
        assert_eq!(p.rotate_y(FRAC_PI_2), Point3D::new(0.0, 0.0, -1.0));
        assert_eq!(Point3D::new(0.0, 1.0, 0.0).rotate_x(FRAC_PI_2), Point3D::new(0.0, 0.0, 1.0));

        // A point off the axis swings around the origin, not around itself.
        let far = Point3D::new(10.0, 0.0, 5.0).rotate_z(PI);
        assert_eq!(far, Point3D::new(-10.0, 0.0, 5.0));
    }

    #[test]
    fn rotation_keeps_axis_coordinate_of_unbounded_point() {
        let p = Point3D::new(f64::INFINITY, 1.0, 5.0);
        assert_eq!(p.rotate_z(0.7).z(), 5.0);
        assert_eq!(p.rotate_x(0.7).x(), f64::INFINITY);
    }

    #[test]
    fn translate_and_scale() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(p.translate(5.0, -1.0, 2.0), Point3D::new(6.0, 1.0, 5.0));
        assert_eq!(Point3D::new(2.0, 3.0, 4.0).scale(2.0, 1.5, 0.5), Point3D::new(4.0, 4.5, 2.0));
        assert_eq!(p.scale(0.0, -1.0, 1.0), Point3D::new(0.0, -2.0, 3.0));
    }

    #[test]
    fn normalize_rejects_zero_and_near_zero() {
        let err = Point3D::origin().normalize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
        assert!(Point3D::new(1e-11, 0.0, 0.0).normalize().is_err());

        let unit = Point3D::new(3.0, 4.0, 0.0).normalize().unwrap();
        assert_eq!(unit, Point3D::new(0.6, 0.8, 0.0));
    }

    #[test]
    fn midpoint_averages() {
        let mid = Point3D::origin().midpoint(Point3D::new(4.0, 6.0, 8.0));
        assert_eq!(mid, Point3D::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn equality_is_epsilon_tolerant() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(p, Point3D::new(1.0 + 1e-11, 2.0, 3.0 - 1e-11));
        assert_ne!(p, Point3D::new(1.0 + 1e-9, 2.0, 3.0));
    }

    #[test]
    fn grid_key_collapses_tiny_differences() {
        let mut keys = HashSet::new();
        keys.insert(Point3D::new(1.0, 2.0, 3.0).grid_key());
        keys.insert(Point3D::new(1.0 + 1e-13, 2.0, 3.0).grid_key());
        keys.insert(Point3D::new(-0.0, 0.0, 0.0).grid_key());
        keys.insert(Point3D::origin().grid_key());
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Point3D::new(1.0, -2.5, 3.14159).to_string(), "Point3D(1.00, -2.50, 3.14)");
    }

    #[test]
    fn nalgebra_round_trip() {
        let p = Point3D::new(1.5, -2.0, 7.0);
        let na: Point3<f64> = p.into();
        assert_eq!(na, Point3::new(1.5, -2.0, 7.0));
        assert_eq!(Point3D::from(na), p);
    }

    #[test]
    fn operators() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Point3D::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Point3D::new(2.0, 1.5, 1.0));
        assert_eq!(-a, Point3D::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Point3D::new(2.0, 4.0, 6.0));
    }

    proptest! {
        #[test]
        fn cross_product_is_anti_commutative(a in arbitrary_point(), b in arbitrary_point()) {
            let ab = a.cross_product(b);
            let ba = b.cross_product(a);
            prop_assert!((ab + ba).magnitude() < DELTA);
        }

        #[test]
        fn dot_product_is_commutative(a in arbitrary_point(), b in arbitrary_point()) {
            prop_assert_eq!(a.dot_product(b), b.dot_product(a));
        }

        #[test]
        fn cross_product_is_perpendicular(a in arbitrary_point(), b in arbitrary_point()) {
            let c = a.cross_product(b);
            prop_assert!(c.dot_product(a).abs() < 1e-6);
            prop_assert!(c.dot_product(b).abs() < 1e-6);
        }

        #[test]
        fn normalize_has_unit_magnitude(p in arbitrary_direction()) {
            let unit = p.normalize().unwrap();
            prop_assert!((unit.magnitude() - 1.0).abs() < DELTA);
            prop_assert!(unit.cross_product(p).magnitude() < 1e-6);
        }

        #[test]
        fn rotation_preserves_magnitude(p in arbitrary_point(), angle in -7.0..7.0f64) {
            prop_assert!((p.rotate_x(angle).magnitude() - p.magnitude()).abs() < DELTA);
            prop_assert!((p.rotate_y(angle).magnitude() - p.magnitude()).abs() < DELTA);
            prop_assert!((p.rotate_z(angle).magnitude() - p.magnitude()).abs() < DELTA);
        }

        #[test]
        fn translate_then_inverse_returns(p in arbitrary_point(), dx in scalar_strategy(), dy in scalar_strategy(), dz in scalar_strategy()) {
            prop_assert_eq!(p.translate(dx, dy, dz).translate(-dx, -dy, -dz), p);
        }

        #[test]
        fn distance_is_symmetric_and_bounded_by_manhattan(a in arbitrary_point(), b in arbitrary_point()) {
            prop_assert_eq!(a.distance_to(b), b.distance_to(a));
            prop_assert!(a.distance_to(b) <= a.manhattan_distance_to(b) + DELTA);
        }

        #[test]
        fn spherical_radius_is_magnitude(r in 0.0..100.0f64, theta in -7.0..7.0f64, phi in -7.0..7.0f64) {
            let p = Point3D::from_spherical(r, theta, phi).unwrap();
            prop_assert!((p.magnitude() - r).abs() < DELTA);
        }
    }
}
