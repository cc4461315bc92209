use glam::Vec3;

use crate::options::EPSILON;

/// A triangle given by its three corners in winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimTriangle {
    /// First corner.
    pub v1: Vec3,
    /// Second corner.
    pub v2: Vec3,
    /// Third corner.
    pub v3: Vec3,
}

impl PrimTriangle {
    /// Creates a triangle.
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    /// Returns the centroid.
    pub fn center(&self) -> Vec3 {
        (self.v1 + self.v2 + self.v3) / 3.0
    }

    /// Returns the component-wise minimum of the corners.
    pub fn minimum(&self) -> Vec3 {
        self.v1.min(self.v2).min(self.v3)
    }

    /// Returns the component-wise maximum of the corners.
    pub fn maximum(&self) -> Vec3 {
        self.v1.max(self.v2).max(self.v3)
    }

    /// Returns the unit normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        (self.v2 - self.v1).cross(self.v3 - self.v2).normalize_or_zero()
    }

    /// Returns the largest per-axis extent of the bounding box.
    pub fn max_dim_extent(&self) -> f32 {
        (self.maximum() - self.minimum()).max_element()
    }

    /// Returns the area of the triangle.
    pub fn area(&self) -> f32 {
        (self.v2 - self.v1).cross(self.v3 - self.v1).length() * 0.5
    }

    /// Returns whether the triangle has (almost) no area.
    pub fn is_degenerated(&self) -> bool {
        self.area() < EPSILON * EPSILON
    }
}
