//! Ordered point sequences: reconstruction from segment soups, intersections,
//! and fillet analysis.

pub mod fillet;
pub mod intersect;
pub mod reconstruct;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::line::Line;
use crate::geometry::point::Point3d;
use crate::geometry::transform::apply_transforms;

pub use fillet::{corner_fillet_radii, safest_fillet_radius};
pub use intersect::{polyline_intersections, self_intersections};
pub use reconstruct::reconstruct_polylines;

/// An ordered sequence of points, open or closed.
///
/// A closed polyline does not repeat its first point at the end; the closing
/// edge from the last point back to the first is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub points: Vec<Point3d>,
    pub is_closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point3d>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    pub fn open(points: Vec<Point3d>) -> Self {
        Self::new(points, false)
    }

    pub fn closed(points: Vec<Point3d>) -> Self {
        Self::new(points, true)
    }

    /// Build from raw coordinate rows; every row must have exactly three entries.
    pub fn from_coords(rows: &[Vec<f64>], is_closed: bool) -> Result<Self> {
        let points = rows
            .iter()
            .map(|row| Point3d::try_from(row.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points, is_closed))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of edges, including the implied closing edge.
    pub fn edge_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.is_closed => n,
            n => n - 1,
        }
    }

    /// Edges in order, with the closing edge synthesized last for closed polylines.
    pub fn edges(&self) -> Vec<Line> {
        let n = self.points.len();
        (0..self.edge_count())
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    pub fn length(&self) -> f64 {
        self.edges().iter().map(Line::length).sum()
    }

    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::new(points, self.is_closed)
    }

    pub fn transformed(&self, transforms: &[Matrix4<f64>]) -> Self {
        Self::new(apply_transforms(transforms, &self.points), self.is_closed)
    }
}
