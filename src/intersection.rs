use crate::primitive::line::Line3D;
use crate::primitive::point::Point3D;
use crate::tolerance::EPSILON;

/// Parameters `[s, t]` of the closest approach between two segments, where `s` runs along
/// the first segment and `t` along the second, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentApproach {
    /// The segments are parallel; `s` is pinned to the start of the first segment.
    Parallel([f64; 2]),
    /// The segments are skew or intersecting.
    Skew([f64; 2]),
}

impl SegmentApproach {
    pub fn parameters(&self) -> [f64; 2] {
        match self {
            SegmentApproach::Parallel(st) | SegmentApproach::Skew(st) => *st,
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, SegmentApproach::Parallel(_))
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Computes the closest-approach parameters of two segments.
///
/// Solves the infinite-line problem, clamps both parameters to the segments, then does a
/// single recompute pass: if `s` sits on a segment end `t` is re-projected from it, and if
/// `t` then sits on an end `s` is re-projected from that. This is cheaper than the exact
/// region analysis and can overestimate the distance in some skew configurations near the
/// segment ends; callers rely on these exact parameters, so keep it as is.
///
/// # Arguments
///
/// * `first` - The segment the `s` parameter runs along.
/// * `second` - The segment the `t` parameter runs along.
pub fn closest_approach(first: &Line3D, second: &Line3D) -> SegmentApproach {
    let d1 = first.direction();
    let d2 = second.direction();
    let w = first.start() - second.start();

    let a = d1.dot_product(d1);
    let b = d1.dot_product(d2);
    let c = d2.dot_product(d2);
    let d = d1.dot_product(w);
    let e = d2.dot_product(w);

    let denominator = a * c - b * b;

    if denominator < EPSILON {
        let t = if b > c { d / b } else { e / c };
        return SegmentApproach::Parallel([0.0, clamp_unit(t)]);
    }

    let mut s = clamp_unit((b * e - c * d) / denominator);
    let mut t = clamp_unit((a * e - b * d) / denominator);

    if s <= EPSILON || s >= 1.0 - EPSILON {
        t = clamp_unit((b * s + e) / c);
    }
    if t <= EPSILON || t >= 1.0 - EPSILON {
        s = clamp_unit((b * t - d) / a);
    }

    SegmentApproach::Skew([s, t])
}

/// The pair of points realizing [`closest_approach`], one on each segment.
pub fn closest_points(first: &Line3D, second: &Line3D) -> [Point3D; 2] {
    let [s, t] = closest_approach(first, second).parameters();
    [first.point_at_parameter(s), second.point_at_parameter(t)]
}

/// Whether two spheres touch or overlap.
pub fn spheres_overlap(center1: Point3D, radius1: f64, center2: Point3D, radius2: f64) -> bool {
    center1.distance_to(center2) <= radius1 + radius2
}
