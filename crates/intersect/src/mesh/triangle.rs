//! Triangle planes and triangle-triangle intersection.
//!
//! The intersection is a cascade of guard clauses; each early exit carries a
//! [`NoIntersection`] reason so every branch can be tested on its own.

use super::{Plane, Triangle};
use crate::geometry::line::Line;
use crate::geometry::point::Point3d;
use crate::geometry::tolerance::remove_all_duplicates;
use crate::geometry::vector::Vec3;

/// Why two triangles produced no intersection segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoIntersection {
    /// One of the triangles has collinear or coincident vertices.
    DegenerateTriangle,
    /// One triangle lies strictly on one side of the other's plane.
    Separated,
    /// Both triangles lie in the same plane. Overlap areas are not computed.
    Coplanar,
    /// The planes are parallel.
    ParallelPlanes,
    /// A triangle only touches the other plane at a single point.
    TouchOnly,
    /// The two crossing intervals on the shared line do not overlap.
    DisjointIntervals,
    /// The shared interval is shorter than the tolerance.
    TooShort,
}

/// Plane of a triangle, or `None` for collinear/coincident vertices.
pub fn triangle_plane(triangle: &Triangle, tol: f64) -> Option<Plane> {
    let n = triangle.area_vector();
    if n.length_squared() < tol * tol {
        return None;
    }
    let normal = n.normalized()?;
    Some(Plane {
        normal,
        d: normal.dot(&triangle.vertices[0].to_vec3()),
    })
}

/// Intersection segment of two triangles, or `None`.
pub fn intersect_triangles(t1: &Triangle, t2: &Triangle, tol: f64) -> Option<Line> {
    try_intersect_triangles(t1, t2, tol).ok()
}

/// Intersection segment of two triangles, or the reason there is none.
pub fn try_intersect_triangles(
    t1: &Triangle,
    t2: &Triangle,
    tol: f64,
) -> Result<Line, NoIntersection> {
    let plane1 = triangle_plane(t1, tol).ok_or(NoIntersection::DegenerateTriangle)?;
    let plane2 = triangle_plane(t2, tol).ok_or(NoIntersection::DegenerateTriangle)?;

    let dist2 = signed_distances(&plane1, t2);
    let dist1 = signed_distances(&plane2, t1);

    if strictly_one_side(&dist2, tol) || strictly_one_side(&dist1, tol) {
        return Err(NoIntersection::Separated);
    }
    if dist1.iter().chain(dist2.iter()).all(|d| d.abs() < tol) {
        return Err(NoIntersection::Coplanar);
    }

    let dir = plane1.normal.cross(&plane2.normal);
    let dir_len_sq = dir.length_squared();
    if dir_len_sq < tol * tol {
        return Err(NoIntersection::ParallelPlanes);
    }

    let crossings1 = plane_crossings(t1, &dist1, tol);
    let crossings2 = plane_crossings(t2, &dist2, tol);
    if crossings1.len() < 2 || crossings2.len() < 2 {
        return Err(NoIntersection::TouchOnly);
    }

    // A point on both planes: n1.X = d1 and n2.X = d2.
    let origin_vec = (plane2.normal * plane1.d - plane1.normal * plane2.d).cross(&dir) / dir_len_sq;
    let origin = Point3d::from_vec3(origin_vec);

    let (lo1, hi1) = project_interval(&crossings1, &origin, &dir);
    let (lo2, hi2) = project_interval(&crossings2, &origin, &dir);
    let lo = lo1.max(lo2);
    let hi = hi1.min(hi2);

    if hi < lo {
        return Err(NoIntersection::DisjointIntervals);
    }
    if hi - lo < tol * dir_len_sq {
        return Err(NoIntersection::TooShort);
    }

    let segment = Line::new(
        origin + dir * (lo / dir_len_sq),
        origin + dir * (hi / dir_len_sq),
    );
    if segment.length_squared() < tol * tol {
        return Err(NoIntersection::TooShort);
    }
    Ok(segment)
}

fn signed_distances(plane: &Plane, triangle: &Triangle) -> [f64; 3] {
    triangle.vertices.map(|v| plane.signed_distance(&v))
}

fn strictly_one_side(dist: &[f64; 3], tol: f64) -> bool {
    dist.iter().all(|&d| d > tol) || dist.iter().all(|&d| d < -tol)
}

/// Points where the triangle's edges meet the other plane.
///
/// On-plane vertices are recorded once, as the start of their outgoing edge.
fn plane_crossings(triangle: &Triangle, dist: &[f64; 3], tol: f64) -> Vec<Point3d> {
    let mut points = Vec::with_capacity(3);
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (a, b) = (triangle.vertices[i], triangle.vertices[j]);
        let (da, db) = (dist[i], dist[j]);

        if da.abs() < tol {
            points.push(a);
        } else if db.abs() >= tol && (da > 0.0) != (db > 0.0) {
            let t = da / (da - db);
            points.push(a.lerp(&b, t));
        }
    }
    remove_all_duplicates(&points, tol)
}

/// Range of `dot(p - origin, dir)` over the points.
fn project_interval(points: &[Point3d], origin: &Point3d, dir: &Vec3) -> (f64, f64) {
    points
        .iter()
        .map(|p| (*p - *origin).dot(dir))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        })
}
