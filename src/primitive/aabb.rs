use crate::primitive::point::Point3D;

/// Axis-Aligned Bounding Box (AABB) structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the AABB.
    pub min: Point3D,
    /// Maximum corner of the AABB.
    pub max: Point3D,
}

impl Aabb {
    /// Creates an AABB that encompasses all the given points.
    ///
    /// # Arguments
    ///
    /// * `points` - The points to be enclosed by the AABB.
    ///
    /// # Returns
    ///
    /// An AABB that encloses all the given points. With no points at all the corners are
    /// left at `+inf` / `-inf`.
    pub fn around_points(points: impl IntoIterator<Item = Point3D>) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];

        for pt in points {
            for (axis, value) in [pt.x(), pt.y(), pt.z()].into_iter().enumerate() {
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
        }

        Self {
            min: Point3D::new(min[0], min[1], min[2]),
            max: Point3D::new(max[0], max[1], max[2]),
        }
    }

    /// Calculates the center point of the AABB.
    pub fn center(&self) -> Point3D {
        self.min.midpoint(self.max)
    }

    /// Extent along each axis, `max - min`.
    pub fn size(&self) -> Point3D {
        self.max - self.min
    }

    /// Whether `pt` lies inside or on the boundary of the box.
    pub fn contains_point(&self, pt: Point3D) -> bool {
        (self.min.x()..=self.max.x()).contains(&pt.x())
            && (self.min.y()..=self.max.y()).contains(&pt.y())
            && (self.min.z()..=self.max.z()).contains(&pt.z())
    }
}
