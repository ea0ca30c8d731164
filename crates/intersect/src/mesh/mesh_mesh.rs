//! Mesh-mesh intersection by brute-force all-pairs triangle tests.
//!
//! There is no broad phase: every triangle of the first mesh is tested against
//! every triangle of the second. Inputs are expected to be tens to low hundreds
//! of triangles.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::triangle::intersect_triangles;
use super::Triangle;
use crate::geometry::line::Line;
use crate::polyline::{reconstruct_polylines, Polyline};

/// All intersection segments between two triangle soups, in pair order
/// (outer loop over `mesh1`, inner loop over `mesh2`).
#[instrument(skip_all, fields(mesh1 = mesh1.len(), mesh2 = mesh2.len()))]
pub fn mesh_mesh_segments(mesh1: &[Triangle], mesh2: &[Triangle], tol: f64) -> Vec<Line> {
    let segments = pair_segments(mesh1, mesh2, tol);
    debug!(
        pairs = mesh1.len() * mesh2.len(),
        segments = segments.len(),
        "mesh-mesh intersection complete"
    );
    segments
}

/// Intersection of two triangle soups, chained into polylines.
#[instrument(skip_all, fields(mesh1 = mesh1.len(), mesh2 = mesh2.len()))]
pub fn mesh_mesh_polylines(mesh1: &[Triangle], mesh2: &[Triangle], tol: f64) -> Vec<Polyline> {
    let segments = mesh_mesh_segments(mesh1, mesh2, tol);
    reconstruct_polylines(&segments, tol)
}

#[cfg(not(feature = "parallel"))]
fn pair_segments(mesh1: &[Triangle], mesh2: &[Triangle], tol: f64) -> Vec<Line> {
    mesh1
        .iter()
        .flat_map(|t1| mesh2.iter().filter_map(move |t2| intersect_triangles(t1, t2, tol)))
        .collect()
}

#[cfg(feature = "parallel")]
fn pair_segments(mesh1: &[Triangle], mesh2: &[Triangle], tol: f64) -> Vec<Line> {
    mesh1
        .par_iter()
        .flat_map_iter(|t1| mesh2.iter().filter_map(move |t2| intersect_triangles(t1, t2, tol)))
        .collect()
}
