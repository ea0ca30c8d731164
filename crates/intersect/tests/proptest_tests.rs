//! Property-based tests for intersection invariants using the `proptest` crate.

use proptest::prelude::*;

use cad_intersect::geometry::line::{intersect, Line};
use cad_intersect::geometry::point::Point3d;
use cad_intersect::geometry::tolerance::{approx_eq, remove_all_duplicates};
use cad_intersect::geometry::transform::{apply_transform, apply_transforms};
use cad_intersect::mesh::{mesh_mesh_segments, Triangle, TriangleMesh};
use cad_intersect::polyline::{reconstruct_polylines, safest_fillet_radius, Polyline};
use nalgebra::{Matrix4, Vector3};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary 3D coordinate tuple in a reasonable floating-point range.
fn arb_point() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0)
}

/// Integer-valued point in the XY plane, so cross products are exact.
fn arb_grid_point() -> impl Strategy<Value = Point3d> {
    (-50i32..50, -50i32..50).prop_map(|(x, y)| Point3d::new(x as f64, y as f64, 0.0))
}

/// Arbitrary positive tolerance.
fn arb_tolerance() -> impl Strategy<Value = f64> {
    1e-12f64..1.0
}

/// Arbitrary rotation angle in radians.
fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

const TOL: f64 = 1e-6;

fn unit_square(offset: Point3d) -> Vec<Line> {
    let p = |x: f64, y: f64| Point3d::new(offset.x + x, offset.y + y, offset.z);
    vec![
        Line::new(p(0.0, 0.0), p(1.0, 0.0)),
        Line::new(p(1.0, 0.0), p(1.0, 1.0)),
        Line::new(p(1.0, 1.0), p(0.0, 1.0)),
        Line::new(p(0.0, 1.0), p(0.0, 0.0)),
    ]
}

/// `actual` is `expected` up to rotation and reflection of the sequence.
fn cyclic_eq(actual: &[Point3d], expected: &[Point3d], tol: f64) -> bool {
    if actual.len() != expected.len() {
        return false;
    }
    let n = expected.len();
    let mut reflected: Vec<Point3d> = expected.to_vec();
    reflected.reverse();
    [expected.to_vec(), reflected].iter().any(|candidate| {
        (0..n).any(|shift| {
            (0..n).all(|i| actual[i].approx_eq(&candidate[(i + shift) % n], tol))
        })
    })
}

fn cube(min_x: f64) -> Vec<Triangle> {
    let mut vertices = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    for v in vertices.iter_mut() {
        v[0] += min_x;
    }
    let indices = [
        [0, 1, 2], [0, 2, 3],
        [4, 6, 5], [4, 7, 6],
        [0, 4, 5], [0, 5, 1],
        [2, 6, 7], [2, 7, 3],
        [0, 3, 7], [0, 7, 4],
        [1, 5, 6], [1, 6, 2],
    ];
    TriangleMesh::from_indexed(&vertices, &indices).unwrap().triangles
}

// ---------------------------------------------------------------------------
// 1. Tolerance equality is reflexive for positive tolerances, strict at zero
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn approx_eq_reflexive(x in -1e6f64..1e6, tol in arb_tolerance()) {
        prop_assert!(approx_eq(x, x, tol));
        prop_assert!(!approx_eq(x, x, 0.0), "zero tolerance must be strict");
    }
}

// ---------------------------------------------------------------------------
// 2. Deduplication is idempotent and leaves no tolerance-equal pair
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn remove_all_duplicates_idempotent(
        coords in prop::collection::vec(arb_point(), 0..30),
        tol in 1e-3f64..200.0,
    ) {
        let points: Vec<Point3d> = coords.iter().map(|&(x, y, z)| Point3d::new(x, y, z)).collect();
        let once = remove_all_duplicates(&points, tol);
        let twice = remove_all_duplicates(&once, tol);
        prop_assert_eq!(&once, &twice);

        for i in 0..once.len() {
            for j in (i + 1)..once.len() {
                prop_assert!(!once[i].approx_eq(&once[j], tol),
                    "kept points {} and {} are tolerance-equal", i, j);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Segment intersection does not depend on argument order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn segment_intersection_symmetric(
        a in arb_grid_point(), b in arb_grid_point(),
        c in arb_grid_point(), d in arb_grid_point(),
    ) {
        let l1 = Line::new(a, b);
        let l2 = Line::new(c, d);
        let forward = intersect(&l1, &l2, TOL, true);
        let backward = intersect(&l2, &l1, TOL, true);
        match (forward, backward) {
            (Some(p), Some(q)) => prop_assert!(p.distance_to(&q) < 1e-6,
                "asymmetric crossing: {:?} vs {:?}", p, q),
            (None, None) => {}
            other => prop_assert!(false, "asymmetric result: {:?}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// 4. A crossing lies on both segments
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn segment_crossing_lies_on_both(
        a in arb_grid_point(), b in arb_grid_point(),
        c in arb_grid_point(), d in arb_grid_point(),
    ) {
        let l1 = Line::new(a, b);
        let l2 = Line::new(c, d);
        if let Some(p) = intersect(&l1, &l2, TOL, true) {
            for seg in [&l1, &l2] {
                let slack = (p.distance_to(&seg.start) + p.distance_to(&seg.end)) - seg.length();
                prop_assert!(slack < 1e-5, "{:?} is off segment {:?}", p, seg);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Square reconstruction is invariant under permutation and reversal
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn square_reconstruction_order_invariant(
        order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        flips in prop::collection::vec(any::<bool>(), 4),
        (ox, oy, oz) in arb_point(),
    ) {
        let square = unit_square(Point3d::new(ox, oy, oz));
        let expected: Vec<Point3d> = square.iter().map(|s| s.start).collect();
        let soup: Vec<Line> = order
            .iter()
            .zip(&flips)
            .map(|(&i, &flip)| if flip { square[i].reversed() } else { square[i] })
            .collect();

        let polylines = reconstruct_polylines(&soup, TOL);
        prop_assert_eq!(polylines.len(), 1);
        prop_assert!(polylines[0].is_closed);
        prop_assert!(cyclic_eq(&polylines[0].points, &expected, 1e-9),
            "unexpected loop {:?}", polylines[0].points);
    }
}

// ---------------------------------------------------------------------------
// 6. Every surviving segment endpoint appears in the reconstruction
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reconstruction_keeps_every_point(
        pts in prop::collection::vec(arb_point(), 2..12),
    ) {
        let pts: Vec<Point3d> = pts.iter().map(|&(x, y, z)| Point3d::new(x, y, z)).collect();
        let segments: Vec<Line> = pts.windows(2).map(|w| Line::new(w[0], w[1])).collect();
        let polylines = reconstruct_polylines(&segments, TOL);
        for seg in segments.iter().filter(|s| !s.is_degenerate(TOL)) {
            for p in [seg.start, seg.end] {
                prop_assert!(
                    polylines.iter().any(|pl| pl.points.iter().any(|q| q.approx_eq(&p, TOL))),
                    "endpoint {:?} lost", p
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 7. The safest fillet radius of a regular polygon is its apothem
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn regular_polygon_fillet_is_apothem(
        sides in 3usize..13,
        radius in 0.5f64..100.0,
        phase in arb_angle(),
    ) {
        let step = 2.0 * std::f64::consts::PI / sides as f64;
        let points = (0..sides)
            .map(|i| {
                let a = phase + step * i as f64;
                Point3d::new(radius * a.cos(), radius * a.sin(), 0.0)
            })
            .collect();
        let r = safest_fillet_radius(&Polyline::closed(points), TOL);
        let apothem = radius * (std::f64::consts::PI / sides as f64).cos();
        prop_assert!((r - apothem).abs() < 1e-7 * radius,
            "fillet {} != apothem {}", r, apothem);
    }
}

// ---------------------------------------------------------------------------
// 8. Sequential transform application matches the composed matrix
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sequential_transforms_match_composition(
        (px, py, pz) in arb_point(),
        (tx, ty, tz) in arb_point(),
        angle in arb_angle(),
    ) {
        let first = Matrix4::new_translation(&Vector3::new(tx, ty, tz));
        let second = Matrix4::from_axis_angle(&Vector3::z_axis(), angle);
        let p = Point3d::new(px, py, pz);

        let sequential = apply_transforms(&[first, second], &[p]);
        let composed = apply_transform(&(second * first), &p);
        prop_assert!(sequential[0].distance_to(&composed) < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// 9. Cubes apart along X never intersect
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn separated_cubes_have_no_segments(gap in 1.01f64..100.0) {
        let a = cube(0.0);
        let b = cube(gap);
        prop_assert!(mesh_mesh_segments(&a, &b, TOL).is_empty());
    }
}
