use crate::error::GeometryError;
use crate::intersection::closest_approach;
use crate::primitive::point::{Point3D, PointKey};
use crate::tolerance::EPSILON;
use std::fmt;
use tracing::{debug, trace, warn};

/// A directed line segment in 3D space.
///
/// The endpoints are always epsilon-distinct. Equality is order-sensitive: a segment and
/// its reverse cover the same points but are not equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3D {
    start: Point3D,
    end: Point3D,
}

impl Line3D {
    /// Creates a new `Line3D` from `start` to `end`.
    ///
    /// # Arguments
    ///
    /// * `start` - The starting point of the segment.
    /// * `end` - The ending point of the segment; must differ from `start`.
    pub fn new(start: Point3D, end: Point3D) -> Result<Self, GeometryError> {
        if start == end {
            debug!(%start, %end, "rejected degenerate line");
            return Err(GeometryError::DegenerateLine);
        }
        trace!(%start, %end, "created line");
        Ok(Self { start, end })
    }

    pub fn from_points(start: Point3D, end: Point3D) -> Result<Self, GeometryError> {
        Self::new(start, end)
    }

    /// Creates a segment of the given `length` leaving `start` along `direction`.
    ///
    /// `direction` need not be normalized, but it must not be the zero vector.
    pub fn from_direction_vector(
        start: Point3D,
        direction: Point3D,
        length: f64,
    ) -> Result<Self, GeometryError> {
        let length = GeometryError::require_positive("length", length)?;
        let offset = direction.normalize()?.scale(length, length, length);
        Self::new(start, start + offset)
    }

    pub fn start(&self) -> Point3D {
        self.start
    }

    pub fn end(&self) -> Point3D {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// The unnormalized direction, `end - start`.
    pub fn direction(&self) -> Point3D {
        self.end - self.start
    }

    /// The direction scaled to unit length.
    ///
    /// Cannot fail: the endpoints of a `Line3D` are never epsilon-equal, so the direction
    /// is never shorter than [`EPSILON`].
    pub fn normalized_direction(&self) -> Point3D {
        let direction = self.direction();
        Point3D::from(direction.coords() / direction.magnitude())
    }

    pub fn midpoint(&self) -> Point3D {
        self.start.midpoint(self.end)
    }

    /// Evaluates `start + t * direction`. Values of `t` outside `[0, 1]` extrapolate
    /// beyond the segment.
    pub fn point_at_parameter(&self, t: f64) -> Point3D {
        if !(0.0..=1.0).contains(&t) {
            warn!(t, line = %self, "parameter outside [0, 1], extrapolating past the segment");
        }
        let scaled = self.direction().scale(t, t, t);
        self.start + scaled
    }

    /// Parameter of the projection of `point` onto the segment, clamped to `[0, 1]`.
    fn clamped_projection(&self, point: Point3D) -> f64 {
        let direction = self.direction();
        let to_point = point - self.start;
        let t = to_point.dot_product(direction) / direction.dot_product(direction);
        t.clamp(0.0, 1.0)
    }

    pub fn closest_point_to(&self, point: Point3D) -> Point3D {
        // Project the point onto the segment.
        self.point_at_parameter(self.clamped_projection(point))
    }

    pub fn distance_to_point(&self, point: Point3D) -> f64 {
        let distance = point.distance_to(self.closest_point_to(point));
        trace!(%point, distance, "distance from point to line");
        distance
    }

    /// Minimum distance between this segment and `other`.
    ///
    /// See [`closest_approach`] for how the closest pair is found.
    pub fn shortest_distance_to(&self, other: &Line3D) -> f64 {
        let [s, t] = closest_approach(self, other).parameters();
        let distance = self
            .point_at_parameter(s)
            .distance_to(other.point_at_parameter(t));
        trace!(distance, s, t, "shortest distance between lines");
        distance
    }

    pub fn is_parallel_to(&self, other: &Line3D) -> bool {
        self.normalized_direction()
            .cross_product(other.normalized_direction())
            .magnitude()
            < EPSILON
    }

    pub fn is_perpendicular_to(&self, other: &Line3D) -> bool {
        self.normalized_direction()
            .dot_product(other.normalized_direction())
            .abs()
            < EPSILON
    }

    pub fn contains_point(&self, point: Point3D) -> bool {
        self.distance_to_point(point) < EPSILON
    }

    /// The acute angle between the two segments' directions, in `[0, π/2]`.
    pub fn angle_to(&self, other: &Line3D) -> f64 {
        let dot = self
            .normalized_direction()
            .dot_product(other.normalized_direction())
            .abs();
        dot.clamp(-1.0, 1.0).acos()
    }

    /// Shifts both endpoints.
    ///
    /// Fails only if rounding at large magnitudes collapses the endpoints together.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Result<Self, GeometryError> {
        Self::new(
            self.start.translate(dx, dy, dz),
            self.end.translate(dx, dy, dz),
        )
    }

    /// Rescales the segment about its start point; the start stays fixed.
    pub fn scale(&self, factor: f64) -> Result<Self, GeometryError> {
        let factor = GeometryError::require_positive("scale factor", factor)?;
        let scaled = self.direction().scale(factor, factor, factor);
        Self::new(self.start, self.start + scaled)
    }

    pub fn reverse(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn grid_key(&self) -> [PointKey; 2] {
        [self.start.grid_key(), self.end.grid_key()]
    }

    pub fn geogebra_string(&self) -> String {
        format!(
            "Segment({}, {})",
            self.start.geogebra_string(),
            self.end.geogebra_string()
        )
    }
}

impl fmt::Display for Line3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line3D[start={}, end={}, length={:.2}]",
            self.start,
            self.end,
            self.length()
        )
    }
}
