//! Triangle soups, triangle planes and triangle/mesh intersection.

pub mod mesh_mesh;
pub mod triangle;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};
use crate::geometry::point::Point3d;
use crate::geometry::transform::apply_transforms;
use crate::geometry::vector::Vec3;

pub use mesh_mesh::{mesh_mesh_polylines, mesh_mesh_segments};
pub use triangle::{intersect_triangles, triangle_plane, try_intersect_triangles, NoIntersection};

/// Three ordered vertices. Orientation follows `(p1 - p0) x (p2 - p0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point3d; 3],
}

impl Triangle {
    pub fn new(p0: Point3d, p1: Point3d, p2: Point3d) -> Self {
        Self {
            vertices: [p0, p1, p2],
        }
    }

    /// Unnormalized normal, twice the area in length.
    pub fn area_vector(&self) -> Vec3 {
        let [p0, p1, p2] = self.vertices;
        (p1 - p0).cross(&(p2 - p0))
    }
}

impl From<[[f64; 3]; 3]> for Triangle {
    fn from(v: [[f64; 3]; 3]) -> Self {
        Self::new(v[0].into(), v[1].into(), v[2].into())
    }
}

/// The plane `normal . X = d`, with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f64,
}

impl Plane {
    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point3d) -> f64 {
        self.normal.dot(&p.to_vec3()) - self.d
    }

    pub fn contains(&self, p: &Point3d, tol: f64) -> bool {
        self.signed_distance(p).abs() < tol
    }
}

/// A triangle soup, as tessellated from B-Rep faces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Expand an indexed vertex buffer into a soup. Every index must be in range.
    pub fn from_indexed(vertices: &[[f64; 3]], indices: &[[usize; 3]]) -> Result<Self> {
        let vertex_count = vertices.len();
        let lookup = |index: usize| -> Result<Point3d> {
            vertices
                .get(index)
                .map(|v| Point3d::from_array(*v))
                .ok_or(GeomError::IndexOutOfRange {
                    index,
                    vertex_count,
                })
        };

        let triangles = indices
            .iter()
            .map(|&[a, b, c]| Ok(Triangle::new(lookup(a)?, lookup(b)?, lookup(c)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(triangles))
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn transformed(&self, transforms: &[Matrix4<f64>]) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|t| {
                let moved = apply_transforms(transforms, &t.vertices);
                Triangle::new(moved[0], moved[1], moved[2])
            })
            .collect();
        Self::new(triangles)
    }
}
