//! Self-intersection and mutual intersection of polylines.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::Polyline;
use crate::geometry::line::{intersect, Line};
use crate::geometry::point::Point3d;
use crate::geometry::tolerance::remove_all_duplicates;

/// Points where non-adjacent edges of `polyline` cross.
///
/// Needs at least three edges. Consecutive edges are adjacent, and for a closed
/// polyline so are the first and last edge. Collinear overlapping edges do not
/// contribute a point.
#[instrument(skip_all, fields(points = polyline.points.len(), closed = polyline.is_closed))]
pub fn self_intersections(polyline: &Polyline, tol: f64) -> Vec<Point3d> {
    let edges = polyline.edges();
    let n = edges.len();
    if n < 3 {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for i in 0..n {
        for j in (i + 2)..n {
            if polyline.is_closed && i == 0 && j == n - 1 {
                continue;
            }
            if let Some(p) = intersect(&edges[i], &edges[j], tol, true) {
                hits.push(p);
            }
        }
    }

    let hits = remove_all_duplicates(&hits, tol);
    debug!(hits = hits.len(), "self-intersection complete");
    hits
}

/// Points where any edge of `a` crosses any edge of `b`.
#[instrument(skip_all, fields(a = a.points.len(), b = b.points.len()))]
pub fn polyline_intersections(a: &Polyline, b: &Polyline, tol: f64) -> Vec<Point3d> {
    let edges_a = a.edges();
    let edges_b = b.edges();

    let hits = edge_pair_hits(&edges_a, &edges_b, tol);

    let hits = remove_all_duplicates(&hits, tol);
    debug!(hits = hits.len(), "polyline intersection complete");
    hits
}

#[cfg(not(feature = "parallel"))]
fn edge_pair_hits(edges_a: &[Line], edges_b: &[Line], tol: f64) -> Vec<Point3d> {
    edges_a
        .iter()
        .flat_map(|ea| edges_b.iter().filter_map(move |eb| intersect(ea, eb, tol, true)))
        .collect()
}

#[cfg(feature = "parallel")]
fn edge_pair_hits(edges_a: &[Line], edges_b: &[Line], tol: f64) -> Vec<Point3d> {
    edges_a
        .par_iter()
        .flat_map_iter(|ea| edges_b.iter().filter_map(move |eb| intersect(ea, eb, tol, true)))
        .collect()
}
