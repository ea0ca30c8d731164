pub mod point;
pub mod vector;
pub mod tolerance;
pub mod transform;
pub mod line;
