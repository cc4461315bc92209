use glam::Vec3;

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimAABox {
    minimum: Vec3,
    maximum: Vec3,
}

impl PrimAABox {
    /// Creates a box spanning two opposite corners given in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            minimum: a.min(b),
            maximum: a.max(b),
        }
    }

    /// Creates a cube of width `width` centred at `center`.
    pub fn from_center(center: Vec3, width: f32) -> Self {
        Self::from_center_widths(center, width, width, width)
    }

    /// Creates a box centred at `center` with per-axis widths.
    pub fn from_center_widths(center: Vec3, x_width: f32, y_width: f32, z_width: f32) -> Self {
        let half = Vec3::new(x_width, y_width, z_width) * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn minimum(&self) -> Vec3 {
        self.minimum
    }

    pub fn maximum(&self) -> Vec3 {
        self.maximum
    }

    pub fn center(&self) -> Vec3 {
        (self.minimum + self.maximum) * 0.5
    }

    /// Returns the per-axis half widths.
    pub fn half_widths(&self) -> Vec3 {
        (self.maximum - self.minimum) * 0.5
    }

    pub fn x_width(&self) -> f32 {
        self.maximum.x - self.minimum.x
    }

    pub fn y_width(&self) -> f32 {
        self.maximum.y - self.minimum.y
    }

    pub fn z_width(&self) -> f32 {
        self.maximum.z - self.minimum.z
    }

    /// Returns the largest per-axis width.
    pub fn max_dim_extent(&self) -> f32 {
        (self.maximum - self.minimum).max_element()
    }

    /// Returns whether `position` lies inside or on the box.
    pub fn contains(&self, position: Vec3) -> bool {
        position.cmpge(self.minimum).all() && position.cmple(self.maximum).all()
    }

    /// Returns the 8 corners, corner `b` taking the maximum on x, y, z for bits 1, 2, 4.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|b| {
            Vec3::new(
                if b & 1 == 0 { self.minimum.x } else { self.maximum.x },
                if b & 2 == 0 { self.minimum.y } else { self.maximum.y },
                if b & 4 == 0 { self.minimum.z } else { self.maximum.z },
            )
        })
    }
}
