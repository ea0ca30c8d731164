//! Intersection engine seam.

use nalgebra::Matrix4;
use tracing::info;

use crate::config::EngineConfig;
use crate::geometry::line::{self, Line};
use crate::geometry::point::Point3d;
use crate::geometry::transform;
use crate::mesh::{self, Plane, Triangle};
use crate::polyline::{self, Polyline};

/// Trait for the intersection operations called by the B-Rep kernel and by
/// batch intersection passes.
///
/// Every method takes its tolerance from the engine, so callers pass one value
/// around instead of threading a scalar through each call. Implement this trait
/// to provide alternative backends or mock implementations.
pub trait IntersectionEngine {
    /// Intersection point of two lines or segments.
    fn intersect_lines(&self, l1: &Line, l2: &Line) -> Option<Point3d>;

    /// Plane of a triangle, `None` if degenerate.
    fn triangle_plane(&self, triangle: &Triangle) -> Option<Plane>;

    /// Intersection segment of two triangles.
    fn intersect_triangles(&self, t1: &Triangle, t2: &Triangle) -> Option<Line>;

    /// Raw intersection segments of two triangle soups.
    fn mesh_segments(&self, mesh1: &[Triangle], mesh2: &[Triangle]) -> Vec<Line>;

    /// Intersection of two triangle soups, chained into polylines.
    fn mesh_polylines(&self, mesh1: &[Triangle], mesh2: &[Triangle]) -> Vec<Polyline>;

    /// Chain an unordered segment soup into polylines.
    fn reconstruct_polylines(&self, segments: &[Line]) -> Vec<Polyline>;

    /// Crossings between non-adjacent edges of one polyline.
    fn self_intersections(&self, polyline: &Polyline) -> Vec<Point3d>;

    /// Crossings between the edges of two polylines.
    fn polyline_intersections(&self, a: &Polyline, b: &Polyline) -> Vec<Point3d>;

    /// Largest fillet radius every corner of the polyline can take.
    fn safest_fillet_radius(&self, polyline: &Polyline) -> f64;

    /// Apply transforms in order to each point.
    fn apply_transforms(&self, transforms: &[Matrix4<f64>], points: &[Point3d]) -> Vec<Point3d>;
}

/// Default engine backed by the free functions of this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultIntersectionEngine {
    pub config: EngineConfig,
}

impl DefaultIntersectionEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            tolerance = config.tol(),
            segment_only = config.segment_only,
            "intersection engine configured"
        );
        Self { config }
    }
}

impl IntersectionEngine for DefaultIntersectionEngine {
    fn intersect_lines(&self, l1: &Line, l2: &Line) -> Option<Point3d> {
        line::intersect(l1, l2, self.config.tol(), self.config.segment_only)
    }

    fn triangle_plane(&self, triangle: &Triangle) -> Option<Plane> {
        mesh::triangle_plane(triangle, self.config.tol())
    }

    fn intersect_triangles(&self, t1: &Triangle, t2: &Triangle) -> Option<Line> {
        mesh::intersect_triangles(t1, t2, self.config.tol())
    }

    fn mesh_segments(&self, mesh1: &[Triangle], mesh2: &[Triangle]) -> Vec<Line> {
        mesh::mesh_mesh_segments(mesh1, mesh2, self.config.tol())
    }

    fn mesh_polylines(&self, mesh1: &[Triangle], mesh2: &[Triangle]) -> Vec<Polyline> {
        mesh::mesh_mesh_polylines(mesh1, mesh2, self.config.tol())
    }

    fn reconstruct_polylines(&self, segments: &[Line]) -> Vec<Polyline> {
        polyline::reconstruct_polylines(segments, self.config.tol())
    }

    fn self_intersections(&self, polyline: &Polyline) -> Vec<Point3d> {
        polyline::self_intersections(polyline, self.config.tol())
    }

    fn polyline_intersections(&self, a: &Polyline, b: &Polyline) -> Vec<Point3d> {
        polyline::polyline_intersections(a, b, self.config.tol())
    }

    fn safest_fillet_radius(&self, polyline: &Polyline) -> f64 {
        polyline::safest_fillet_radius(polyline, self.config.tol())
    }

    fn apply_transforms(&self, transforms: &[Matrix4<f64>], points: &[Point3d]) -> Vec<Point3d> {
        transform::apply_transforms(transforms, points)
    }
}
