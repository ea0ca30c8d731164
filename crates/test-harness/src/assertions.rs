//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes the context label plus expected vs actual values.

use cad_intersect::{Line, Point3d, Polyline};

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

/// Assert two points are within `tol` of each other (Euclidean).
pub fn assert_point_near(
    actual: &Point3d,
    expected: &Point3d,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let dist = actual.distance_to(expected);
    if dist <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected point ({:.6}, {:.6}, {:.6}), got ({:.6}, {:.6}, {:.6}), distance {:.3e} (tol={})",
                ctx, expected.x, expected.y, expected.z, actual.x, actual.y, actual.z, dist, tol,
            ),
        })
    }
}

/// Assert a segment matches the expected endpoints in either order.
pub fn assert_segment_matches(
    actual: &Line,
    expected_start: [f64; 3],
    expected_end: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let expected = Line::new(expected_start.into(), expected_end.into());
    if actual.same_segment(&expected, tol) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected segment {:?} -> {:?} (either order), got {:?} -> {:?}",
                ctx,
                expected_start,
                expected_end,
                actual.start.to_array(),
                actual.end.to_array(),
            ),
        })
    }
}

/// Assert two point sequences describe the same loop: equal up to a rotation
/// of the starting point and a reversal of direction.
pub fn assert_cyclic_eq(
    actual: &[Point3d],
    expected: &[Point3d],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if actual.len() != expected.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} points, got {}",
                ctx,
                expected.len(),
                actual.len()
            ),
        });
    }

    let n = expected.len();
    let forward = |shift: usize| (0..n).all(|i| actual[i].approx_eq(&expected[(i + shift) % n], tol));
    let backward =
        |shift: usize| (0..n).all(|i| actual[i].approx_eq(&expected[(shift + n - i) % n], tol));

    if n == 0 || (0..n).any(|s| forward(s) || backward(s)) {
        Ok(())
    } else {
        let fmt = |pts: &[Point3d]| -> Vec<[f64; 3]> { pts.iter().map(Point3d::to_array).collect() };
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] loops differ beyond rotation/reflection:\n  expected {:?}\n  got      {:?}",
                ctx,
                fmt(expected),
                fmt(actual),
            ),
        })
    }
}

/// Assert a polyline's closure flag and point count.
pub fn assert_polyline_shape(
    polyline: &Polyline,
    closed: bool,
    points: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    if polyline.is_closed == closed && polyline.len() == points {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} polyline with {} points, got {} with {}",
                ctx,
                if closed { "closed" } else { "open" },
                points,
                if polyline.is_closed { "closed" } else { "open" },
                polyline.len(),
            ),
        })
    }
}

/// Assert a scalar is within `tol` of the expected value.
pub fn assert_near(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.9}, got {:.9} (tol={})",
                ctx, expected, actual, tol
            ),
        })
    }
}

/// Fail on the first failed verdict, listing every failure.
pub fn assert_verdicts_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failed: Vec<&OracleVerdict> = verdicts.iter().filter(|v| !v.passed).collect();
    match failed.first() {
        None => Ok(()),
        Some(first) => Err(HarnessError::OracleFailure {
            oracle: first.oracle_name.clone(),
            detail: format!(
                "[{}] {}",
                ctx,
                failed
                    .iter()
                    .map(|v| format!("{}: {}", v.oracle_name, v.detail))
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
        }),
    }
}
