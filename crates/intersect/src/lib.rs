//! Tolerance-aware intersection geometry for triangle soups and polylines.
//!
//! Everything here is a pure function over immutable values. Expected geometric
//! degeneracies (parallel lines, collinear triangles, coplanar faces, polylines
//! too short to analyse) come back as `None` or an empty `Vec`, never as an error,
//! so callers can run all-pairs tests without wrapping each iteration.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod polyline;

use serde::{Deserialize, Serialize};

pub use config::EngineConfig;
pub use engine::{DefaultIntersectionEngine, IntersectionEngine};
pub use error::{GeomError, Result};
pub use geometry::line::{Line, Segment};
pub use geometry::point::{Point2d, Point3d};
pub use geometry::vector::Vec3;
pub use mesh::{Plane, Triangle, TriangleMesh};
pub use polyline::Polyline;

/// Tolerance configuration for geometric comparisons.
///
/// All comparisons are strict: two values are equal when their difference is
/// *less than* `coincidence`, so a difference of exactly `coincidence` is not equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-6 }
    }
}

impl Tolerance {
    pub fn new(coincidence: f64) -> Self {
        Self { coincidence }
    }

    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.approx_eq(b, self.coincidence)
    }

    /// A usable tolerance is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.coincidence.is_finite() && self.coincidence > 0.0 {
            Ok(())
        } else {
            Err(GeomError::InvalidTolerance(self.coincidence))
        }
    }
}
