//! Strict tolerance comparisons and tolerance-aware deduplication.
//!
//! Equality is `|a - b| < tol`. A difference of exactly `tol` is *not* equal,
//! and a zero tolerance makes nothing equal, not even a value to itself.

use super::point::{Point2d, Point3d};
use super::vector::Vec3;

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Component-wise equality of coordinate slices of any dimension.
///
/// Slices of different lengths are never equal; there is no coercion
/// between 2D and 3D.
pub fn points_equal(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y, tol))
}

/// Same rule as [`points_equal`]; kept separate so call sites read by intent.
pub fn vectors_equal(a: &[f64], b: &[f64], tol: f64) -> bool {
    points_equal(a, b, tol)
}

/// Tolerance equality for geometric values.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        approx_eq(*self, *other, tol)
    }
}

impl ApproxEq for Point3d {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        Point3d::approx_eq(self, other, tol)
    }
}

impl ApproxEq for Point2d {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        Point2d::approx_eq(self, other, tol)
    }
}

impl ApproxEq for Vec3 {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        vectors_equal(&self.to_array(), &other.to_array(), tol)
    }
}

impl<const N: usize> ApproxEq for [f64; N] {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        points_equal(self, other, tol)
    }
}

impl ApproxEq for Vec<f64> {
    fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        points_equal(self, other, tol)
    }
}

/// Order-preserving O(n²) deduplication.
///
/// An item is kept only if no previously *kept* item is tolerance-equal to it.
pub fn remove_all_duplicates<T: ApproxEq + Clone>(items: &[T], tol: f64) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !kept.iter().any(|k| k.approx_eq(item, tol)) {
            kept.push(item.clone());
        }
    }
    kept
}

/// Collapse each run of consecutive tolerance-equal items to the *last* item of the run.
///
/// With `check_first_and_last`, the sequence is treated as cyclic: if the
/// surviving first and last items are equal, the last one is dropped.
pub fn remove_consecutive_duplicates<T: ApproxEq + Clone>(
    items: &[T],
    check_first_and_last: bool,
    tol: f64,
) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match out.last_mut() {
            Some(last) if last.approx_eq(item, tol) => *last = item.clone(),
            _ => out.push(item.clone()),
        }
    }

    if check_first_and_last && out.len() > 1 && out[0].approx_eq(&out[out.len() - 1], tol) {
        out.pop();
    }
    out
}
