use glam::Vec3;

/// A ray, or an infinite line when `is_line` is set.
///
/// The direction is always normalized, so parameters returned by intersection tests are
/// distances along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimRay {
    origin: Vec3,
    direction: Vec3,
    is_line: bool,
}

impl PrimRay {
    /// Creates a ray starting at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if `direction` has zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_line(false, origin, direction)
    }

    /// Creates an infinite line through `origin`.
    pub fn line(origin: Vec3, direction: Vec3) -> Self {
        Self::with_line(true, origin, direction)
    }

    fn with_line(is_line: bool, origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize_or_zero();
        assert!(direction != Vec3::ZERO, "ray direction must not be zero");
        Self {
            origin,
            direction,
            is_line,
        }
    }

    /// Returns the origin of the ray.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the normalized direction of the ray.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Returns whether negative parameters are accepted.
    pub fn is_line(&self) -> bool {
        self.is_line
    }

    /// Returns the point at parameter `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns the parameter of the point on the ray closest to `point`.
    pub fn project(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.direction)
    }
}
