//! Directed 3D segments and the robust line/segment intersection solver.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::point::Point3d;
use super::vector::Vec3;
use crate::error::{GeomError, Result};

/// A directed segment from `start` to `end`.
///
/// The same type doubles as an infinite line through both points when an
/// intersection is requested with `segment_only == false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3d,
    pub end: Point3d,
}

/// Segments produced by triangle intersection are plain lines.
pub type Segment = Line;

impl Line {
    pub fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    /// Build from raw coordinate slices, e.g. data handed over by the modelling kernel.
    pub fn from_coords(start: Option<&[f64]>, end: Option<&[f64]>) -> Result<Self> {
        let start = start.ok_or(GeomError::MissingEndpoint { which: "start" })?;
        let end = end.ok_or(GeomError::MissingEndpoint { which: "end" })?;
        Ok(Self::new(Point3d::try_from(start)?, Point3d::try_from(end)?))
    }

    /// Unnormalized direction, `end - start`.
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn length_squared(&self) -> f64 {
        self.start.distance_squared_to(&self.end)
    }

    pub fn point_at(&self, t: f64) -> Point3d {
        self.start + self.direction() * t
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    pub fn is_degenerate(&self, tol: f64) -> bool {
        self.start.approx_eq(&self.end, tol)
    }

    /// Endpoint-order-insensitive tolerance equality.
    pub fn same_segment(&self, other: &Self, tol: f64) -> bool {
        (self.start.approx_eq(&other.start, tol) && self.end.approx_eq(&other.end, tol))
            || (self.start.approx_eq(&other.end, tol) && self.end.approx_eq(&other.start, tol))
    }
}

/// How two lines relate, with enough detail to test each branch of the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineRelation {
    /// A single intersection point at parameter `t` on the first line and `u` on the second.
    Crossing { point: Point3d, t: f64, u: f64 },
    /// One of the direction vectors is shorter than the tolerance.
    Degenerate,
    /// Parallel and offset from each other.
    Parallel,
    /// Both lines lie on the same carrier. For segments, `overlap` is the shared
    /// parameter interval on the first line, if any.
    Collinear { overlap: Option<(f64, f64)> },
    /// Not coplanar.
    Skew,
    /// The carriers cross, but outside at least one of the segments.
    OutOfRange,
}

/// Classify the relation between two lines or segments.
pub fn classify(l1: &Line, l2: &Line, tol: f64, segment_only: bool) -> LineRelation {
    let d1 = l1.direction();
    let d2 = l2.direction();
    let tol_sq = tol * tol;

    if d1.is_zero(tol) || d2.is_zero(tol) {
        return LineRelation::Degenerate;
    }

    let w = l2.start - l1.start;
    let cross = d1.cross(&d2);

    if cross.length_squared() < tol_sq {
        let a = d1.length_squared();
        if w.cross(&d1).length_squared() >= tol_sq * a {
            return LineRelation::Parallel;
        }
        let overlap = if segment_only {
            let t0 = w.dot(&d1) / a;
            let t1 = (l2.end - l1.start).dot(&d1) / a;
            let lo = t0.min(t1).max(0.0);
            let hi = t0.max(t1).min(1.0);
            (hi >= lo - tol).then_some((lo, hi))
        } else {
            None
        };
        return LineRelation::Collinear { overlap };
    }

    if w.triple(&d1, &d2).abs() > tol * tol * tol {
        return LineRelation::Skew;
    }

    // Normal equations of min |l1(t) - l2(u)|².
    let a = d1.dot(&d1);
    let b = d1.dot(&d2);
    let c = d2.dot(&d2);
    let d = d1.dot(&w);
    let e = d2.dot(&w);
    let denom = a * c - b * b;

    let t = (d * c - b * e) / denom;
    let u = (b * d - a * e) / denom;

    if segment_only && (t < -tol || t > 1.0 + tol || u < -tol || u > 1.0 + tol) {
        return LineRelation::OutOfRange;
    }

    LineRelation::Crossing {
        point: l1.point_at(t).snap_to_zero(tol),
        t,
        u,
    }
}

/// Intersect two lines (or segments, with `segment_only`).
///
/// Collinear infinite lines return the first line's start point. Collinear
/// segments return `None` even when they overlap, since the overlap is a
/// region and not a point.
pub fn intersect(l1: &Line, l2: &Line, tol: f64, segment_only: bool) -> Option<Point3d> {
    match classify(l1, l2, tol, segment_only) {
        LineRelation::Crossing { point, .. } => Some(point),
        LineRelation::Collinear { .. } if !segment_only => Some(l1.start),
        _ => None,
    }
}

/// Fail-soft variant of [`intersect`] for raw coordinates.
///
/// Malformed input (wrong arity, missing endpoint) is logged and yields `None`
/// so a single bad element does not abort a batch.
pub fn intersect_coords(
    line1: [Option<&[f64]>; 2],
    line2: [Option<&[f64]>; 2],
    tol: f64,
    segment_only: bool,
) -> Option<Point3d> {
    let parsed = Line::from_coords(line1[0], line1[1])
        .and_then(|l1| Line::from_coords(line2[0], line2[1]).map(|l2| (l1, l2)));
    match parsed {
        Ok((l1, l2)) => intersect(&l1, &l2, tol, segment_only),
        Err(error) => {
            warn!(%error, "malformed line input, skipping intersection");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn line(a: [f64; 3], b: [f64; 3]) -> Line {
        Line::new(Point3d::from_array(a), Point3d::from_array(b))
    }

    #[test]
    fn test_perpendicular_segments_cross_at_origin() {
        let l1 = line([-5.0, 0.0, 0.0], [5.0, 0.0, 0.0]);
        let l2 = line([0.0, -5.0, 0.0], [0.0, 5.0, 0.0]);
        let p = intersect(&l1, &l2, TOL, true).unwrap();
        assert_eq!(p, Point3d::ORIGIN);
    }

    #[test]
    fn test_crossing_reports_parameters() {
        let l1 = line([0.0, 0.0, 0.0], [4.0, 0.0, 0.0]);
        let l2 = line([1.0, -1.0, 0.0], [1.0, 3.0, 0.0]);
        match classify(&l1, &l2, TOL, true) {
            LineRelation::Crossing { point, t, u } => {
                assert!((t - 0.25).abs() < 1e-12);
                assert!((u - 0.25).abs() < 1e-12);
                assert!(point.distance_to(&Point3d::new(1.0, 0.0, 0.0)) < 1e-12);
            }
            other => panic!("expected crossing, got {:?}", other),
        }
    }

    #[test]
    fn test_collinear_overlap_is_none_for_segments_and_start_for_lines() {
        let l1 = line([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let l2 = line([1.0, 0.0, 0.0], [3.0, 0.0, 0.0]);
        assert!(intersect(&l1, &l2, TOL, true).is_none());
        assert_eq!(
            classify(&l1, &l2, TOL, true),
            LineRelation::Collinear {
                overlap: Some((0.5, 1.0))
            }
        );
        assert_eq!(intersect(&l1, &l2, TOL, false), Some(l1.start));
        assert_eq!(
            classify(&l1, &l2, TOL, false),
            LineRelation::Collinear { overlap: None }
        );
    }

    #[test]
    fn test_collinear_infinite_lines_return_first_start() {
        let l1 = line([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let l2 = line([5.0, 0.0, 0.0], [7.0, 0.0, 0.0]);
        assert_eq!(intersect(&l1, &l2, TOL, false), Some(l1.start));
        assert_eq!(
            classify(&l1, &l2, TOL, true),
            LineRelation::Collinear { overlap: None }
        );
    }

    #[test]
    fn test_parallel_offset_is_none() {
        let l1 = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let l2 = line([0.0, 1.0, 0.0], [1.0, 1.0, 0.0]);
        assert_eq!(classify(&l1, &l2, TOL, false), LineRelation::Parallel);
        assert!(intersect(&l1, &l2, TOL, false).is_none());
    }

    #[test]
    fn test_skew_lines_are_none() {
        let l1 = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let l2 = line([0.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        assert_eq!(classify(&l1, &l2, TOL, false), LineRelation::Skew);
    }

    #[test]
    fn test_degenerate_direction() {
        let l1 = line([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let l2 = line([0.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(classify(&l1, &l2, TOL, true), LineRelation::Degenerate);
    }

    #[test]
    fn test_direction_shorter_than_tolerance_is_degenerate() {
        let short = line([0.0, 0.0, 0.0], [0.5 * TOL, 0.0, 0.0]);
        let l2 = line([0.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(classify(&short, &l2, TOL, false), LineRelation::Degenerate);
        assert_eq!(classify(&l2, &short, TOL, false), LineRelation::Degenerate);
        let just_long_enough = line([0.0, 0.0, 0.0], [TOL, 0.0, 0.0]);
        assert_ne!(classify(&just_long_enough, &l2, TOL, false), LineRelation::Degenerate);
    }

    #[test]
    fn test_small_out_of_plane_offset_is_skew() {
        let l1 = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let coplanar = line([0.5, -1.0, 0.0], [0.5, 1.0, 0.0]);
        let lifted = line([0.5, -1.0, 1e-3], [0.5, 1.0, 1e-3]);
        assert!(matches!(classify(&l1, &coplanar, TOL, true), LineRelation::Crossing { .. }));
        assert_eq!(classify(&l1, &lifted, TOL, true), LineRelation::Skew);
    }

    #[test]
    fn test_segment_only_rejects_out_of_range() {
        let l1 = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let l2 = line([3.0, -1.0, 0.0], [3.0, 1.0, 0.0]);
        assert_eq!(classify(&l1, &l2, TOL, true), LineRelation::OutOfRange);
        let p = intersect(&l1, &l2, TOL, false).unwrap();
        assert!(p.distance_to(&Point3d::new(3.0, 0.0, 0.0)) < 1e-12);
    }

    #[test]
    fn test_endpoint_touch_within_tolerance() {
        let l1 = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let l2 = line([1.0 + 1e-8, 0.0, 0.0], [1.0, 1.0, 0.0]);
        assert!(intersect(&l1, &l2, TOL, true).is_some());
    }

    #[test]
    fn test_result_snaps_near_zero_coordinates() {
        let l1 = line([-1.0, 1e-9, 0.0], [1.0, 1e-9, 0.0]);
        let l2 = line([1e-9, -1.0, 0.0], [1e-9, 1.0, 0.0]);
        let p = intersect(&l1, &l2, TOL, true).unwrap();
        assert_eq!(p, Point3d::ORIGIN);
    }

    #[test]
    fn test_intersect_coords_malformed_is_none() {
        let good_a = [0.0, -1.0, 0.0];
        let good_b = [0.0, 1.0, 0.0];
        let short = [1.0, 0.0];
        let far = [1.0, 0.0, 0.0];
        let hit = intersect_coords(
            [Some(&[-1.0, 0.0, 0.0][..]), Some(&far[..])],
            [Some(&good_a[..]), Some(&good_b[..])],
            TOL,
            true,
        );
        assert_eq!(hit, Some(Point3d::ORIGIN));

        let bad = intersect_coords(
            [Some(&short[..]), Some(&far[..])],
            [Some(&good_a[..]), Some(&good_b[..])],
            TOL,
            true,
        );
        assert!(bad.is_none());

        let missing = intersect_coords([None, Some(&far[..])], [Some(&good_a[..]), None], TOL, true);
        assert!(missing.is_none());
    }

    #[test]
    fn test_from_coords_errors() {
        let p = [0.0, 0.0, 0.0];
        assert_eq!(
            Line::from_coords(Some(&p[..]), None).unwrap_err(),
            GeomError::MissingEndpoint { which: "end" }
        );
    }

    #[test]
    fn test_same_segment_ignores_direction() {
        let a = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert!(a.same_segment(&a.reversed(), TOL));
        assert!(!a.same_segment(&line([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]), TOL));
    }
}
