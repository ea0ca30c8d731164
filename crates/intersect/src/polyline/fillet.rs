//! Largest fillet radius each corner of a polyline can take.
//!
//! A fillet of radius `r` in a corner with interior angle `a` touches both edges
//! at distance `r / tan(a / 2)` from the vertex. Each edge is shared by two
//! corners, so a corner may consume at most half of each adjacent edge:
//! `r = min(L1, L2) / 2 * tan(a / 2)`.

use std::f64::consts::PI;

use super::Polyline;

/// Maximum fillet radius at every corner, in vertex order.
///
/// Open polylines have corners at their interior vertices; closed ones at every
/// vertex, including the wraparound. Polylines with fewer than three points
/// have no corners. A corner where the path goes straight on yields 0.
pub fn corner_fillet_radii(polyline: &Polyline, tol: f64) -> Vec<f64> {
    let pts = &polyline.points;
    let n = pts.len();
    if n < 3 {
        return Vec::new();
    }

    let corners: Vec<usize> = if polyline.is_closed {
        (0..n).collect()
    } else {
        (1..n - 1).collect()
    };

    corners
        .into_iter()
        .map(|i| {
            let vertex = pts[i];
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            let to_prev = prev - vertex;
            let to_next = next - vertex;

            let interior = to_prev.angle_to(&to_next);
            let turning = PI - interior;
            if turning < tol {
                return 0.0;
            }

            let shortest = to_prev.length().min(to_next.length());
            shortest / 2.0 * (interior / 2.0).tan()
        })
        .collect()
}

/// The smallest per-corner radius, i.e. a radius every corner can take.
/// Zero when the polyline has no corners.
pub fn safest_fillet_radius(polyline: &Polyline, tol: f64) -> f64 {
    corner_fillet_radii(polyline, tol)
        .into_iter()
        .reduce(f64::min)
        .unwrap_or(0.0)
}
