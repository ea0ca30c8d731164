//! Helper functions: error type, fixture builders, triangle math.

use cad_intersect::{Line, Point3d, Polyline, Triangle, TriangleMesh};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("fixture error: {0}")]
    Fixture(#[from] cad_intersect::GeomError),
}

// ── Mesh Fixtures ───────────────────────────────────────────────────────────

/// Corner offsets of a unit box, bottom face first.
const BOX_VERTICES: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Two outward-facing triangles per box face.
const BOX_INDICES: [[usize; 3]; 12] = [
    [0, 2, 1], [0, 3, 2], // bottom
    [4, 5, 6], [4, 6, 7], // top
    [0, 1, 5], [0, 5, 4], // front
    [2, 3, 7], [2, 7, 6], // back
    [0, 4, 7], [0, 7, 3], // left
    [1, 2, 6], [1, 6, 5], // right
];

/// Axis-aligned box with its minimum corner at `min`.
pub fn make_box(min: [f64; 3], size: [f64; 3]) -> Result<TriangleMesh, HarnessError> {
    let vertices: Vec<[f64; 3]> = BOX_VERTICES
        .iter()
        .map(|c| {
            [
                min[0] + c[0] * size[0],
                min[1] + c[1] * size[1],
                min[2] + c[2] * size[2],
            ]
        })
        .collect();
    Ok(TriangleMesh::from_indexed(&vertices, &BOX_INDICES)?)
}

/// Unit cube with its minimum corner at `offset`.
pub fn unit_cube(offset: [f64; 3]) -> TriangleMesh {
    let triangles = BOX_INDICES
        .iter()
        .map(|f| {
            let corner = |i: usize| {
                let c = BOX_VERTICES[i];
                Point3d::new(offset[0] + c[0], offset[1] + c[1], offset[2] + c[2])
            };
            Triangle::new(corner(f[0]), corner(f[1]), corner(f[2]))
        })
        .collect();
    TriangleMesh::new(triangles)
}

/// Horizontal square sheet at height `z`, spanning `[-1, 2]` in X and Y so it
/// cuts clean through a unit cube at the origin.
pub fn square_sheet(z: f64) -> TriangleMesh {
    let p0 = Point3d::new(-1.0, -1.0, z);
    let p1 = Point3d::new(2.0, -1.0, z);
    let p2 = Point3d::new(2.0, 2.0, z);
    let p3 = Point3d::new(-1.0, 2.0, z);
    TriangleMesh::new(vec![Triangle::new(p0, p1, p2), Triangle::new(p0, p2, p3)])
}

/// Vertical sheet in the plane `x = x`, spanning `[-1, 2]` in Y and Z.
pub fn vertical_sheet(x: f64) -> TriangleMesh {
    let p0 = Point3d::new(x, -1.0, -1.0);
    let p1 = Point3d::new(x, 2.0, -1.0);
    let p2 = Point3d::new(x, 2.0, 2.0);
    let p3 = Point3d::new(x, -1.0, 2.0);
    TriangleMesh::new(vec![Triangle::new(p0, p1, p2), Triangle::new(p0, p2, p3)])
}

// ── Polyline Fixtures ───────────────────────────────────────────────────────

/// The four corners of the unit square in the XY plane, counter-clockwise.
pub fn unit_square_points() -> Vec<Point3d> {
    vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(1.0, 1.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
    ]
}

/// The four edges of the unit square, in connection order.
pub fn unit_square_segments() -> Vec<Line> {
    Polyline::closed(unit_square_points()).edges()
}

/// Closed 3-4-5 right triangle.
pub fn right_triangle() -> Polyline {
    Polyline::closed(vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(3.0, 0.0, 0.0),
        Point3d::new(3.0, 4.0, 0.0),
    ])
}

/// Closed regular polygon in the XY plane with its first vertex on +X.
pub fn regular_polygon(sides: usize, radius: f64) -> Polyline {
    let step = 2.0 * std::f64::consts::PI / sides as f64;
    let points = (0..sides)
        .map(|i| {
            let a = step * i as f64;
            Point3d::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect();
    Polyline::closed(points)
}

// ── Triangle Math ───────────────────────────────────────────────────────────

/// Whether `p` lies on the triangle, within `tol` of its plane and inside its
/// edges by barycentric coordinates.
pub fn point_on_triangle(p: &Point3d, triangle: &Triangle, tol: f64) -> bool {
    let [a, b, c] = triangle.vertices;
    let n = triangle.area_vector();
    let area2 = n.length_squared();
    if area2 < tol * tol {
        return false;
    }
    let off_plane = (*p - a).dot(&n) / area2.sqrt();
    if off_plane.abs() > tol {
        return false;
    }

    let wa = (c - b).cross(&(*p - b)).dot(&n) / area2;
    let wb = (a - c).cross(&(*p - c)).dot(&n) / area2;
    let wc = 1.0 - wa - wb;
    [wa, wb, wc].iter().all(|&w| w >= -tol)
}

/// Whether `p` lies on any triangle of the mesh.
pub fn point_on_mesh(p: &Point3d, mesh: &TriangleMesh, tol: f64) -> bool {
    mesh.triangles.iter().any(|t| point_on_triangle(p, t, tol))
}

/// Smallest distance between any two distinct points of the sequence.
pub fn min_point_spacing(points: &[Point3d]) -> f64 {
    let mut best = f64::INFINITY;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            best = best.min(points[i].distance_to(&points[j]));
        }
    }
    best
}
