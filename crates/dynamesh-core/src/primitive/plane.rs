use glam::Vec3;

/// An infinite plane given by a point on it and a unit normal.
///
/// The positive side is the one the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimPlane {
    point: Vec3,
    normal: Vec3,
}

impl PrimPlane {
    /// Creates a plane through `point`. The normal is normalized.
    ///
    /// # Panics
    ///
    /// Panics if `normal` has zero length.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        assert!(normal != Vec3::ZERO, "plane normal must not be zero");
        Self { point, normal }
    }

    /// Returns the point the plane was created through.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Returns the unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Sets the point the plane passes through.
    pub fn set_point(&mut self, point: Vec3) {
        self.point = point;
    }

    /// Sets the normal of the plane.
    pub fn set_normal(&mut self, normal: Vec3) {
        *self = Self::new(self.point, normal);
    }

    /// Returns the signed distance from `position` to the plane.
    pub fn distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }

    /// Returns the unsigned distance from `position` to the plane.
    pub fn abs_distance(&self, position: Vec3) -> f32 {
        self.distance(position).abs()
    }

    /// Projects a point onto the plane.
    pub fn project(&self, position: Vec3) -> Vec3 {
        position - self.distance(position) * self.normal
    }

    /// Reflects a point across the plane.
    pub fn mirror(&self, position: Vec3) -> Vec3 {
        position - 2.0 * self.distance(position) * self.normal
    }

    /// Reflects a direction across the plane.
    pub fn mirror_direction(&self, direction: Vec3) -> Vec3 {
        direction - 2.0 * direction.dot(self.normal) * self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        let plane = PrimPlane::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert!((plane.distance(Vec3::new(5.0, 3.0, 1.0)) - 2.0).abs() < 1e-6);
        assert!((plane.distance(Vec3::new(0.0, -1.0, 0.0)) + 2.0).abs() < 1e-6);
        assert!((plane.abs_distance(Vec3::new(0.0, -1.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_mirror() {
        let plane = PrimPlane::new(Vec3::ZERO, Vec3::X);
        let mirrored = plane.mirror(Vec3::new(2.0, 1.0, -1.0));
        assert!((mirrored - Vec3::new(-2.0, 1.0, -1.0)).length() < 1e-6);

        let direction = plane.mirror_direction(Vec3::new(1.0, 1.0, 0.0));
        assert!((direction - Vec3::new(-1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_project() {
        let plane = PrimPlane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        let projected = plane.project(Vec3::new(3.0, 4.0, 10.0));
        assert!((projected - Vec3::new(3.0, 4.0, 1.0)).length() < 1e-6);
    }
}
