//! Intersection tests between primitives.
//!
//! Ray tests report the ray parameter of the hit. Because ray directions are normalized,
//! that parameter is the distance from the ray origin. Rays reject hits behind their
//! origin unless they were created as lines.

use glam::Vec3;

use crate::options::EPSILON;
use crate::primitive::{PrimAABox, PrimPlane, PrimRay, PrimSphere, PrimTriangle};

/// The closest hit found so far by a ray query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intersection {
    /// Whether any hit has been recorded.
    pub is_intersection: bool,

    /// Distance from the ray origin to the hit.
    pub distance: f32,

    /// World position of the hit.
    pub position: Vec3,

    /// Surface normal at the hit.
    pub normal: Vec3,
}

impl Intersection {
    /// Creates an empty intersection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit if it is closer than the current one. Returns whether it was recorded.
    pub fn update(&mut self, distance: f32, position: Vec3, normal: Vec3) -> bool {
        if !self.is_intersection || distance < self.distance {
            self.is_intersection = true;
            self.distance = distance;
            self.position = position;
            self.normal = normal;
            true
        } else {
            false
        }
    }

    /// Forgets the recorded hit.
    pub fn reset(&mut self) {
        self.is_intersection = false;
    }

    /// Returns the closer of two intersections, preferring one that actually hit.
    pub fn min<'a>(a: &'a Intersection, b: &'a Intersection) -> &'a Intersection {
        if a.is_intersection && (!b.is_intersection || a.distance < b.distance) {
            a
        } else {
            b
        }
    }
}

/// Real roots of `a·x² + b·x + c`, smallest first.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let radicand = b * b - 4.0 * a * c;
    if radicand < 0.0 || a.abs() < f32::EPSILON {
        return None;
    }
    let root = radicand.sqrt();
    let (s1, s2) = if b.abs() < EPSILON {
        (root / (2.0 * a), -root / (2.0 * a))
    } else {
        let q = -0.5 * (b + b.signum() * root);
        (q / a, c / q)
    };
    Some((s1.min(s2), s1.max(s2)))
}

/// Returns whether `position` lies inside the sphere.
pub fn sphere_point(sphere: &PrimSphere, position: Vec3) -> bool {
    sphere.contains(position)
}

/// Returns whether the sphere touches the triangle.
///
/// Tests the seven separating axes of a sphere/triangle pair: the triangle plane, the
/// three corner regions and the three edge regions.
pub fn sphere_triangle(sphere: &PrimSphere, tri: &PrimTriangle) -> bool {
    let a = tri.v1 - sphere.center;
    let b = tri.v2 - sphere.center;
    let c = tri.v3 - sphere.center;

    let rr = sphere.radius * sphere.radius;
    let v = (b - a).cross(c - a);
    let d = a.dot(v);
    let e = v.dot(v);
    let sep1 = d * d > rr * e;

    let aa = a.dot(a);
    let ab = a.dot(b);
    let ac = a.dot(c);
    let bb = b.dot(b);
    let bc = b.dot(c);
    let cc = c.dot(c);
    let sep2 = (aa > rr) && (ab > aa) && (ac > aa);
    let sep3 = (bb > rr) && (ab > bb) && (bc > bb);
    let sep4 = (cc > rr) && (ac > cc) && (bc > cc);

    let edge_ab = b - a;
    let edge_bc = c - b;
    let edge_ca = a - c;

    let d1 = ab - aa;
    let d2 = bc - bb;
    let d3 = ac - cc;
    let e1 = edge_ab.dot(edge_ab);
    let e2 = edge_bc.dot(edge_bc);
    let e3 = edge_ca.dot(edge_ca);

    let q1 = a * e1 - d1 * edge_ab;
    let q2 = b * e2 - d2 * edge_bc;
    let q3 = c * e3 - d3 * edge_ca;
    let qc = c * e1 - q1;
    let qa = a * e2 - q2;
    let qb = b * e3 - q3;

    let sep5 = (q1.dot(q1) > rr * e1 * e1) && (q1.dot(qc) > 0.0);
    let sep6 = (q2.dot(q2) > rr * e2 * e2) && (q2.dot(qa) > 0.0);
    let sep7 = (q3.dot(q3) > rr * e3 * e3) && (q3.dot(qb) > 0.0);

    !(sep1 || sep2 || sep3 || sep4 || sep5 || sep6 || sep7)
}

/// Returns whether the sphere touches the box.
pub fn sphere_box(sphere: &PrimSphere, aabox: &PrimAABox) -> bool {
    let closest = sphere.center.clamp(aabox.minimum(), aabox.maximum());
    closest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
}

/// Returns whether the box lies entirely inside the sphere.
pub fn sphere_contains_box(sphere: &PrimSphere, aabox: &PrimAABox) -> bool {
    aabox.corners().iter().all(|c| sphere.contains(*c))
}

/// Returns the ray parameter of the first hit with the sphere.
pub fn ray_sphere(ray: &PrimRay, sphere: &PrimSphere) -> Option<f32> {
    let d = ray.direction();
    let v = ray.origin() - sphere.center;
    let (s_min, s_max) = solve_quadratic(
        d.dot(d),
        2.0 * d.dot(v),
        v.dot(v) - sphere.radius * sphere.radius,
    )?;

    if s_min >= 0.0 || ray.is_line() {
        Some(s_min)
    } else if s_max >= 0.0 {
        Some(s_max)
    } else {
        None
    }
}

/// Returns the ray parameter of the hit with the plane. Parallel rays miss.
pub fn ray_plane(ray: &PrimRay, plane: &PrimPlane) -> Option<f32> {
    let d = ray.direction().dot(plane.normal());
    if d.abs() < EPSILON {
        return None;
    }
    let s = (plane.point() - ray.origin()).dot(plane.normal()) / d;
    (s >= 0.0 || ray.is_line()).then_some(s)
}

/// Returns the ray parameter of the hit with the triangle (Möller–Trumbore).
pub fn ray_triangle(ray: &PrimRay, tri: &PrimTriangle) -> Option<f32> {
    let e1 = tri.v2 - tri.v1;
    let e2 = tri.v3 - tri.v1;
    let s1 = ray.direction().cross(e2);
    let det = s1.dot(e1);

    if det.abs() < EPSILON * EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let d = ray.origin() - tri.v1;
    let s2 = d.cross(e1);
    let b1 = d.dot(s1) * inv_det;
    let b2 = ray.direction().dot(s2) * inv_det;
    let t = e2.dot(s2) * inv_det;

    if b1 < 0.0 || b2 < 0.0 || b1 + b2 > 1.0 || (t < 0.0 && !ray.is_line()) {
        None
    } else {
        Some(t)
    }
}

/// Returns whether the ray passes through the box (slab test).
pub fn ray_box(ray: &PrimRay, aabox: &PrimAABox) -> bool {
    let inv_dir = ray.direction().recip();
    let lower = (aabox.minimum() - ray.origin()) * inv_dir;
    let upper = (aabox.maximum() - ray.origin()) * inv_dir;

    let t_min = lower.min(upper).max_element();
    let t_max = lower.max(upper).min_element();

    (t_max >= 0.0 || ray.is_line()) && t_min <= t_max
}

/// Returns whether the plane cuts the box.
pub fn plane_box(plane: &PrimPlane, aabox: &PrimAABox) -> bool {
    let radius = aabox.half_widths().dot(plane.normal().abs());
    plane.abs_distance(aabox.center()) <= radius
}

/// Returns whether the plane cuts or touches the triangle.
pub fn plane_triangle(plane: &PrimPlane, tri: &PrimTriangle) -> bool {
    let d1 = plane.distance(tri.v1);
    let d2 = plane.distance(tri.v2);
    let d3 = plane.distance(tri.v3);

    !((d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0))
}

/// Returns whether `position` lies inside the box.
pub fn box_point(aabox: &PrimAABox, position: Vec3) -> bool {
    aabox.contains(position)
}

/// Returns whether two boxes overlap.
pub fn box_box(a: &PrimAABox, b: &PrimAABox) -> bool {
    a.minimum().cmple(b.maximum()).all() && b.minimum().cmple(a.maximum()).all()
}

/// Returns whether `inner` lies entirely inside `outer`.
pub fn box_contains_box(outer: &PrimAABox, inner: &PrimAABox) -> bool {
    outer.minimum().cmple(inner.minimum()).all() && inner.maximum().cmple(outer.maximum()).all()
}

/// Returns whether the box and the triangle overlap (separating axis test).
pub fn box_triangle(aabox: &PrimAABox, tri: &PrimTriangle) -> bool {
    let center = aabox.center();
    let half = aabox.half_widths();
    let v = [tri.v1 - center, tri.v2 - center, tri.v3 - center];

    let t_min = v[0].min(v[1]).min(v[2]);
    let t_max = v[0].max(v[1]).max(v[2]);
    if t_min.cmpgt(half).any() || t_max.cmplt(-half).any() {
        return false;
    }

    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

    let separated = |axis: Vec3| -> bool {
        if axis.length_squared() < f32::EPSILON {
            return false;
        }
        let p = [axis.dot(v[0]), axis.dot(v[1]), axis.dot(v[2])];
        let r = half.dot(axis.abs());
        p[0].min(p[1]).min(p[2]) > r || p[0].max(p[1]).max(p[2]) < -r
    };

    if separated(edges[0].cross(edges[1])) {
        return false;
    }
    for edge in edges {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            if separated(axis.cross(edge)) {
                return false;
            }
        }
    }
    true
}

/// A shape the octree can be queried with.
///
/// `intersects_box` decides whether a node's loose box is visited, `contains_box` lets
/// callers skip the precise per-triangle test when the whole node is covered, and
/// `intersects_triangle` is that precise test.
pub trait QueryShape {
    /// Returns whether the shape touches the box.
    fn intersects_box(&self, aabox: &PrimAABox) -> bool;

    /// Returns whether the shape covers the whole box.
    fn contains_box(&self, _aabox: &PrimAABox) -> bool {
        false
    }

    /// Returns whether the shape touches the triangle.
    fn intersects_triangle(&self, tri: &PrimTriangle) -> bool;
}

impl QueryShape for PrimRay {
    fn intersects_box(&self, aabox: &PrimAABox) -> bool {
        ray_box(self, aabox)
    }

    fn intersects_triangle(&self, tri: &PrimTriangle) -> bool {
        ray_triangle(self, tri).is_some()
    }
}

impl QueryShape for PrimPlane {
    fn intersects_box(&self, aabox: &PrimAABox) -> bool {
        plane_box(self, aabox)
    }

    fn intersects_triangle(&self, tri: &PrimTriangle) -> bool {
        plane_triangle(self, tri)
    }
}

impl QueryShape for PrimSphere {
    fn intersects_box(&self, aabox: &PrimAABox) -> bool {
        sphere_box(self, aabox)
    }

    fn contains_box(&self, aabox: &PrimAABox) -> bool {
        sphere_contains_box(self, aabox)
    }

    fn intersects_triangle(&self, tri: &PrimTriangle) -> bool {
        sphere_triangle(self, tri)
    }
}

impl QueryShape for PrimAABox {
    fn intersects_box(&self, aabox: &PrimAABox) -> bool {
        box_box(self, aabox)
    }

    fn contains_box(&self, aabox: &PrimAABox) -> bool {
        box_contains_box(self, aabox)
    }

    fn intersects_triangle(&self, tri: &PrimTriangle) -> bool {
        box_triangle(self, tri)
    }
}
