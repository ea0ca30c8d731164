//! Projective 4x4 transforms applied to point sets.
//!
//! Matrices are built by the caller (nalgebra's `Matrix4` builders or any other
//! source). A list of matrices is applied by re-applying each one in order,
//! never by multiplying the matrices together first.

use nalgebra::{Matrix4, Vector4};

use super::point::Point3d;

/// Apply one matrix to one point: homogeneous multiply, then divide by `w`.
pub fn apply_transform(m: &Matrix4<f64>, p: &Point3d) -> Point3d {
    let h = m * Vector4::new(p.x, p.y, p.z, 1.0);
    Point3d::new(h.x / h.w, h.y / h.w, h.z / h.w)
}

/// Apply every matrix in `transforms`, in list order, to every point.
pub fn apply_transforms(transforms: &[Matrix4<f64>], points: &[Point3d]) -> Vec<Point3d> {
    let mut out = points.to_vec();
    for m in transforms {
        for p in out.iter_mut() {
            *p = apply_transform(m, p);
        }
    }
    out
}
