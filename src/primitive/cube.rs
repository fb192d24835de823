use crate::error::GeometryError;
use crate::intersection::spheres_overlap;
use crate::primitive::aabb::Aabb;
use crate::primitive::line::Line3D;
use crate::primitive::point::{Point3D, PointKey};
use crate::primitive::rotation::{rotate_about_pivot, Axis, EulerAngles};
use crate::tolerance::{approx_eq, quantize, EPSILON};
use itertools::Itertools;
use nalgebra::{Unit, Vector3};
use ordered_float::OrderedFloat;
use std::fmt;
use tracing::{debug, trace};

/// Corner signs of the unit cube, bottom face (z < 0) counter-clockwise, then the top face
/// in the same order so that vertex `i + 4` sits directly above vertex `i`.
const VERTEX_SIGNS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Vertex index pairs of the 12 edges: bottom face, top face, then the verticals.
pub const EDGE_INDICES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Outward face directions, ordered -X, +X, -Y, +Y, -Z, +Z.
const FACE_DIRECTIONS: [[f64; 3]; 6] = [
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
];

/// A cube in 3D space, described by its center, side length and an orientation.
///
/// The orientation is a set of extrinsic Euler angles applied about the world X, Y and Z
/// axes in that order; it maps the axis-aligned cube centered at the origin onto the
/// world-space cube before it is moved to `center`. Vertices, edges and face centers are
/// recomputed on every call.
#[derive(Debug, Clone, Copy)]
pub struct Cube3D {
    center: Point3D,
    side_length: f64,
    rotation: EulerAngles,
}

/// Quantized, hashable stand-in for a [`Cube3D`]. Same caveats as [`PointKey`], including
/// the shared key for magnitudes beyond about 1.8e298.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeKey {
    center: PointKey,
    scalars: [OrderedFloat<f64>; 4],
}

impl Cube3D {
    /// Creates an axis-aligned cube.
    pub fn new(center: Point3D, side_length: f64) -> Result<Self, GeometryError> {
        Self::with_rotation(center, side_length, 0.0, 0.0, 0.0)
    }

    /// Creates a cube rotated by `rotation_x`, then `rotation_y`, then `rotation_z`
    /// radians about the world axes.
    pub fn with_rotation(
        center: Point3D,
        side_length: f64,
        rotation_x: f64,
        rotation_y: f64,
        rotation_z: f64,
    ) -> Result<Self, GeometryError> {
        let side_length = GeometryError::require_positive("side length", side_length)?;
        let cube = Self {
            center,
            side_length,
            rotation: EulerAngles::new(rotation_x, rotation_y, rotation_z),
        };
        debug!(%cube, "created cube");
        Ok(cube)
    }

    /// Rebuilds a cube from its eight corners.
    ///
    /// The center is the mean of the corners and the side length is derived from their
    /// mean distance to it (the circumscribed radius is `s·√3/2`). Orientation is not
    /// recovered: the result is always axis-aligned, whatever the input's orientation.
    pub fn from_vertices(vertices: &[Point3D]) -> Result<Self, GeometryError> {
        if vertices.len() != 8 {
            debug!(count = vertices.len(), "wrong vertex count for a cube");
            return Err(GeometryError::VertexCount(vertices.len()));
        }

        let count = vertices.len() as f64;
        let sum = vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords());
        let center = Point3D::from(sum / count);

        let mean_distance = vertices.iter().map(|v| center.distance_to(*v)).sum::<f64>() / count;
        let side_length = mean_distance * 2.0 / 3.0_f64.sqrt();

        Self::new(center, side_length)
    }

    /// The largest cube centered in the box spanned by `min` and `max`; its side is the
    /// box's smallest dimension.
    pub fn from_bounds(min: Point3D, max: Point3D) -> Result<Self, GeometryError> {
        let size = max - min;
        if !(size.x() > 0.0 && size.y() > 0.0 && size.z() > 0.0) {
            debug!(%min, %max, "bounds are empty or inverted");
            return Err(GeometryError::InvertedBounds);
        }

        let side_length = size.x().min(size.y()).min(size.z());
        Self::new(min.midpoint(max), side_length)
    }

    pub fn from_aabb(aabb: &Aabb) -> Result<Self, GeometryError> {
        Self::from_bounds(aabb.min, aabb.max)
    }

    pub fn center(&self) -> Point3D {
        self.center
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn rotation(&self) -> EulerAngles {
        self.rotation
    }

    pub fn rotation_x(&self) -> f64 {
        self.rotation.x
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation.y
    }

    pub fn rotation_z(&self) -> f64 {
        self.rotation.z
    }

    pub fn volume(&self) -> f64 {
        self.side_length.powi(3)
    }

    pub fn surface_area(&self) -> f64 {
        6.0 * self.side_length.powi(2)
    }

    pub fn total_edge_length(&self) -> f64 {
        12.0 * self.side_length
    }

    pub fn space_diagonal(&self) -> f64 {
        self.side_length * 3.0_f64.sqrt()
    }

    pub fn circumscribed_sphere_radius(&self) -> f64 {
        self.space_diagonal() / 2.0
    }

    pub fn inscribed_sphere_radius(&self) -> f64 {
        self.side_length / 2.0
    }

    fn half(&self) -> f64 {
        self.side_length / 2.0
    }

    /// Maps a point of the local, axis-aligned frame into world space.
    fn to_world(&self, local: Vector3<f64>) -> Point3D {
        Point3D::from(self.rotation.apply(local) + self.center.coords())
    }

    /// Maps a world-space point into the local frame: undo the translation, then the
    /// rotations in reverse order.
    fn to_local(&self, point: Point3D) -> Vector3<f64> {
        self.rotation
            .apply_inverse(point.coords() - self.center.coords())
    }

    /// The eight corners in world space, bottom face `0..4` then top face `4..8`.
    pub fn vertices(&self) -> [Point3D; 8] {
        let half = self.half();
        VERTEX_SIGNS.map(|[sx, sy, sz]| self.to_world(Vector3::new(sx, sy, sz) * half))
    }

    /// The twelve edges, in the order of [`EDGE_INDICES`].
    ///
    /// Fails only for cubes so small that neighbouring corners are epsilon-equal.
    pub fn edges(&self) -> Result<Vec<Line3D>, GeometryError> {
        let vertices = self.vertices();
        EDGE_INDICES
            .iter()
            .map(|&[a, b]| Line3D::new(vertices[a], vertices[b]))
            .collect()
    }

    /// Centers of the six faces, ordered -X, +X, -Y, +Y, -Z, +Z in the local frame.
    pub fn face_centers(&self) -> [Point3D; 6] {
        let half = self.half();
        FACE_DIRECTIONS.map(|[dx, dy, dz]| self.to_world(Vector3::new(dx, dy, dz) * half))
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

    /// Adds `angle` to the stored rotation about `axis`.
    pub fn rotate(&self, axis: Axis, angle: f64) -> Self {
        Self {
            rotation: self.rotation.accumulated(axis, angle),
            ..*self
        }
    }

    /// Rotates the cube about an arbitrary axis through its center.
    ///
    /// Each corner is rotated with Rodrigues' formula and the cube is rebuilt with
    /// [`Cube3D::from_vertices`]. The rebuilt cube is axis-aligned: its stored angles are
    /// reset to zero and do not describe the rotation that was applied. Only the center and
    /// side length carry over.
    pub fn rotate_around_axis(&self, axis: Point3D, angle: f64) -> Result<Self, GeometryError> {
        let axis = Unit::new_unchecked(axis.normalize()?.coords());
        let pivot = self.center.coords();

        let rotated = self
            .vertices()
            .map(|v| Point3D::from(rotate_about_pivot(v.coords(), pivot, &axis, angle)));

        debug!(
            axis = ?axis.as_ref(),
            angle,
            "rebuilding cube from rotated vertices, orientation is not kept"
        );
        Self::from_vertices(&rotated)
    }

    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            center: self.center.translate(dx, dy, dz),
            ..*self
        }
    }

    /// Scales the side length about the center; orientation is unchanged.
    pub fn scale(&self, factor: f64) -> Result<Self, GeometryError> {
        let factor = GeometryError::require_positive("scale factor", factor)?;
        Self::with_rotation(
            self.center,
            self.side_length * factor,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Whether `point` lies inside the cube or on its surface, with an epsilon margin.
    pub fn contains_point(&self, point: Point3D) -> bool {
        let local = self.to_local(point);
        let limit = self.half() + EPSILON;
        let inside = local.iter().all(|c| c.abs() <= limit);
        trace!(%point, inside, "cube containment");
        inside
    }

    /// Conservative overlap test using the circumscribed spheres.
    ///
    /// Never misses a real overlap, but reports overlap for some disjoint pairs, notably
    /// rotated cubes whose corners point away from each other.
    pub fn intersects(&self, other: &Cube3D) -> bool {
        spheres_overlap(
            self.center,
            self.circumscribed_sphere_radius(),
            other.center,
            other.circumscribed_sphere_radius(),
        )
    }

    pub fn axis_aligned_bounding_box(&self) -> Aabb {
        Aabb::around_points(self.vertices())
    }

    /// Distance from `point` to the closest point of the solid cube; zero inside and on
    /// the surface.
    pub fn distance_to_point(&self, point: Point3D) -> f64 {
        let local = self.to_local(point);
        let half = self.half();
        let clamped = local.map(|c| c.clamp(-half, half));
        let distance = (local - clamped).norm();
        trace!(%point, distance, "distance from point to cube");
        distance
    }

    /// Approximate silhouette area of the cube seen along `normal`.
    ///
    /// Sums the pairwise products of `|n_i|·s` for the three world axes. The cube's own
    /// orientation does not enter the formula, so a rotated cube reports the same area as
    /// an axis-aligned one, and a normal along a world axis yields zero.
    pub fn projected_area(&self, normal: Point3D) -> Result<f64, GeometryError> {
        let n = normal.normalize()?;
        let [px, py, pz] = [n.x(), n.y(), n.z()].map(|c| c.abs() * self.side_length);
        Ok(px * py + py * pz + pz * px)
    }

    pub fn grid_key(&self) -> CubeKey {
        CubeKey {
            center: self.center.grid_key(),
            scalars: [
                self.side_length,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ]
            .map(quantize),
        }
    }

    /// The edges as a GeoGebra list of segments.
    pub fn geogebra_string(&self) -> String {
        let vertices = self.vertices();
        let segments = EDGE_INDICES
            .iter()
            .map(|&[a, b]| {
                format!(
                    "Segment({}, {})",
                    vertices[a].geogebra_string(),
                    vertices[b].geogebra_string()
                )
            })
            .join(",");
        format!("{{{}}}", segments)
    }
}

impl PartialEq for Cube3D {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && approx_eq(self.side_length, other.side_length)
            && self.rotation.approx_eq(&other.rotation)
    }
}

impl fmt::Display for Cube3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cube3D[center={}, sideLength={:.2}, volume={:.2}, rotations=({:.2}, {:.2}, {:.2})]",
            self.center,
            self.side_length,
            self.volume(),
            self.rotation.x,
            self.rotation.y,
            self.rotation.z
        )
    }
}
