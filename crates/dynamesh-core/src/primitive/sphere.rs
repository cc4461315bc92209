use glam::Vec3;

/// A solid sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimSphere {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl PrimSphere {
    /// Creates a sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns whether `position` lies inside or on the sphere.
    pub fn contains(&self, position: Vec3) -> bool {
        position.distance_squared(self.center) <= self.radius * self.radius
    }
}
