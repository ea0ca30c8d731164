//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a scenario collect all failures in one pass.

use std::collections::HashMap;

use cad_intersect::{Line, Polyline, TriangleMesh};

use crate::helpers::{min_point_spacing, point_on_mesh};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Mesh Oracles ────────────────────────────────────────────────────────────

/// Every triangle has a non-zero area.
pub fn check_no_degenerate_triangles(mesh: &TriangleMesh, tol: f64) -> OracleVerdict {
    let degenerate = mesh
        .triangles
        .iter()
        .filter(|t| t.area_vector().length_squared() < tol * tol)
        .count();
    if degenerate == 0 {
        OracleVerdict::pass(
            "no_degenerate_triangles",
            format!("all {} triangles have area", mesh.len()),
        )
    } else {
        OracleVerdict::fail(
            "no_degenerate_triangles",
            format!("{} of {} triangles are degenerate", degenerate, mesh.len()),
        )
    }
}

/// Every undirected edge is shared by exactly two triangles. Vertices are
/// matched by bit pattern, so the soup must reuse exact coordinates.
pub fn check_closed_mesh(mesh: &TriangleMesh) -> OracleVerdict {
    type Key = [u64; 3];
    let key = |p: &cad_intersect::Point3d| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];

    let mut edges: HashMap<(Key, Key), usize> = HashMap::new();
    for t in &mesh.triangles {
        for i in 0..3 {
            let a = key(&t.vertices[i]);
            let b = key(&t.vertices[(i + 1) % 3]);
            let edge = if a <= b { (a, b) } else { (b, a) };
            *edges.entry(edge).or_default() += 1;
        }
    }

    let bad = edges.values().filter(|&&n| n != 2).count();
    if bad == 0 {
        OracleVerdict::pass(
            "closed_mesh",
            format!("all {} edges shared by two triangles", edges.len()),
        )
    } else {
        OracleVerdict::fail(
            "closed_mesh",
            format!("{} of {} edges are not shared by exactly two triangles", bad, edges.len()),
        )
    }
}

// ── Intersection Oracles ────────────────────────────────────────────────────

/// Both endpoints and the midpoint of every segment lie on both meshes.
pub fn check_segments_on_meshes(
    segments: &[Line],
    mesh1: &TriangleMesh,
    mesh2: &TriangleMesh,
    tol: f64,
) -> OracleVerdict {
    let off: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            [s.start, s.point_at(0.5), s.end]
                .iter()
                .any(|p| !point_on_mesh(p, mesh1, tol) || !point_on_mesh(p, mesh2, tol))
        })
        .map(|(i, _)| i)
        .collect();

    if off.is_empty() {
        OracleVerdict::pass(
            "segments_on_meshes",
            format!("all {} segments lie on both meshes", segments.len()),
        )
    } else {
        OracleVerdict::fail(
            "segments_on_meshes",
            format!("segments {:?} leave at least one mesh", off),
        )
    }
}

/// Every polyline is closed.
pub fn check_all_closed(polylines: &[Polyline]) -> OracleVerdict {
    let open: Vec<usize> = polylines
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_closed)
        .map(|(i, _)| i)
        .collect();
    if open.is_empty() {
        OracleVerdict::pass("all_closed", format!("{} closed polylines", polylines.len()))
    } else {
        OracleVerdict::fail("all_closed", format!("polylines {:?} are open", open))
    }
}

/// No polyline stores two tolerance-equal points, in particular no duplicated
/// closing point.
pub fn check_no_repeated_points(polylines: &[Polyline], tol: f64) -> OracleVerdict {
    let spacing = polylines
        .iter()
        .map(|p| min_point_spacing(&p.points))
        .fold(f64::INFINITY, f64::min);
    if spacing >= tol {
        OracleVerdict::pass_val(
            "no_repeated_points",
            format!("minimum point spacing {:.6}", spacing),
            spacing,
        )
    } else {
        OracleVerdict::fail_val(
            "no_repeated_points",
            format!("points {:.3e} apart, tolerance {:.3e}", spacing, tol),
            spacing,
        )
    }
}

/// Total polyline length matches the expected value.
pub fn check_total_length(polylines: &[Polyline], expected: f64, tol: f64) -> OracleVerdict {
    let total: f64 = polylines.iter().map(Polyline::length).sum();
    if (total - expected).abs() <= tol {
        OracleVerdict::pass_val("total_length", format!("length {:.6}", total), total)
    } else {
        OracleVerdict::fail_val(
            "total_length",
            format!("expected length {:.6}, got {:.6}", expected, total),
            total,
        )
    }
}

// ── Batch Runners ───────────────────────────────────────────────────────────

/// Run every loop check that applies to a mesh-mesh cut.
pub fn run_cut_checks(
    mesh1: &TriangleMesh,
    mesh2: &TriangleMesh,
    segments: &[Line],
    polylines: &[Polyline],
    tol: f64,
) -> Vec<OracleVerdict> {
    vec![
        check_no_degenerate_triangles(mesh1, tol),
        check_no_degenerate_triangles(mesh2, tol),
        check_segments_on_meshes(segments, mesh1, mesh2, tol),
        check_all_closed(polylines),
        check_no_repeated_points(polylines, tol),
    ]
}
