use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::tolerance::approx_eq;
use super::vector::Vec3;
use crate::error::GeomError;

/// A position in 3D Euclidean space. Serialized as an `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 3]", from = "[f64; 3]")]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Per-component strict tolerance equality.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        approx_eq(self.x, other.x, tol)
            && approx_eq(self.y, other.y, tol)
            && approx_eq(self.z, other.z, tol)
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    pub fn snap_to_zero(&self, tol: f64) -> Self {
        Self::from_vec3(self.to_vec3().snap_to_zero(tol))
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl TryFrom<&[f64]> for Point3d {
    type Error = GeomError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match coords {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(GeomError::Dimension {
                expected: 3,
                found: coords.len(),
            }),
        }
    }
}

impl From<[f64; 3]> for Point3d {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point3d> for [f64; 3] {
    fn from(p: Point3d) -> Self {
        p.to_array()
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, rhs: Vec3) -> Self::Output {
        Point3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<Vec3> for Point3d {
    type Output = Point3d;
    fn sub(self, rhs: Vec3) -> Self::Output {
        Point3d::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        approx_eq(self.x, other.x, tol) && approx_eq(self.y, other.y, tol)
    }
}

impl TryFrom<&[f64]> for Point2d {
    type Error = GeomError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match coords {
            [x, y] => Ok(Self::new(*x, *y)),
            _ => Err(GeomError::Dimension {
                expected: 2,
                found: coords.len(),
            }),
        }
    }
}
