use dynamesh_core::intersection;
use dynamesh_core::{
    Intersection, PrimAABox, PrimPlane, PrimRay, PrimSphere, QueryShape, INVALID_INDEX,
};
use glam::Vec3;

use super::{DynamicFaces, DynamicMesh};

/// The closest ray hit on a mesh, with the face that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshIntersection {
    pub intersection: Intersection,
    pub face: u32,
}

impl Default for MeshIntersection {
    fn default() -> Self {
        Self {
            intersection: Intersection::new(),
            face: INVALID_INDEX,
        }
    }
}

impl MeshIntersection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit on `face` if it is closer than the current one.
    pub fn update(&mut self, distance: f32, position: Vec3, normal: Vec3, face: u32) -> bool {
        let closer = self.intersection.update(distance, position, normal);
        if closer {
            self.face = face;
        }
        closer
    }

    pub fn is_intersection(&self) -> bool {
        self.intersection.is_intersection
    }

    pub fn reset(&mut self) {
        self.intersection.reset();
        self.face = INVALID_INDEX;
    }
}

impl DynamicMesh {
    /// Returns the closest face hit by `ray`.
    pub fn intersects_ray(&self, ray: &PrimRay) -> Option<MeshIntersection> {
        let mut hit = MeshIntersection::new();
        self.octree.intersects_ray(ray, |f| {
            let tri = self.face(f);
            if let Some(t) = intersection::ray_triangle(ray, &tri) {
                hit.update(t, ray.point_at(t), tri.normal(), f);
            }
        });
        hit.is_intersection().then_some(hit)
    }

    /// Updates `hit` with the closest face hit by `ray`. Returns whether `hit` changed.
    pub fn intersects_ray_into(&self, ray: &PrimRay, hit: &mut Intersection) -> bool {
        let mut updated = false;
        self.octree.intersects_ray(ray, |f| {
            let tri = self.face(f);
            if let Some(t) = intersection::ray_triangle(ray, &tri) {
                updated |= hit.update(t, ray.point_at(t), tri.normal());
            }
        });
        updated
    }

    /// Stages every face hit by `ray` in `faces` and commits them.
    pub fn intersects_ray_faces(&self, ray: &PrimRay, faces: &mut DynamicFaces) -> bool {
        self.collect_faces(ray, faces)
    }

    /// Stages every face touching `plane` in `faces` and commits them.
    pub fn intersects_plane(&self, plane: &PrimPlane, faces: &mut DynamicFaces) -> bool {
        self.collect_faces(plane, faces)
    }

    /// Stages every face touching `sphere` in `faces` and commits them.
    pub fn intersects_sphere(&self, sphere: &PrimSphere, faces: &mut DynamicFaces) -> bool {
        self.collect_faces(sphere, faces)
    }

    /// Stages every face touching `aabox` in `faces` and commits them.
    pub fn intersects_box(&self, aabox: &PrimAABox, faces: &mut DynamicFaces) -> bool {
        self.collect_faces(aabox, faces)
    }

    /// Returns whether `faces` holds any face afterwards.
    fn collect_faces<Q: QueryShape>(&self, shape: &Q, faces: &mut DynamicFaces) -> bool {
        self.octree.query(shape, |contains, f| {
            if contains || shape.intersects_triangle(&self.face(f)) {
                faces.insert(f);
            }
        });
        faces.commit();
        !faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use dynamesh_core::Mesh;

    use super::*;

    fn sphere() -> DynamicMesh {
        DynamicMesh::with_mesh(&Mesh::icosphere(2))
    }

    #[test]
    fn test_ray_hits_closest_face() {
        let mesh = sphere();
        let ray = PrimRay::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = mesh.intersects_ray(&ray).unwrap();

        assert!(hit.intersection.position.z > 0.9);
        assert!((hit.intersection.distance - (5.0 - hit.intersection.position.z)).abs() < 1e-4);
        assert!(hit.intersection.normal.z > 0.9);
        assert!(mesh.face(hit.face).center().z > 0.9);

        let miss = PrimRay::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(mesh.intersects_ray(&miss).is_none());
    }

    #[test]
    fn test_ray_into_existing_intersection() {
        let mesh = sphere();
        let ray = PrimRay::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);

        let mut hit = Intersection::new();
        hit.update(1.0, Vec3::new(4.0, 0.0, 0.0), Vec3::X);
        assert!(!mesh.intersects_ray_into(&ray, &mut hit));
        assert_eq!(hit.distance, 1.0);

        hit.reset();
        assert!(mesh.intersects_ray_into(&ray, &mut hit));
        assert!(hit.position.x > 0.9);
    }

    #[test]
    fn test_ray_faces() {
        let mesh = sphere();
        let line = PrimRay::line(Vec3::ZERO, Vec3::Y);
        let mut faces = DynamicFaces::new();
        assert!(mesh.intersects_ray_faces(&line, &mut faces));
        assert!(faces.num_elements() >= 2);
        assert!(faces.iter().all(|f| mesh.face(f).center().y.abs() > 0.8));
    }

    #[test]
    fn test_region_queries() {
        let mesh = sphere();

        let mut faces = DynamicFaces::new();
        let far = PrimSphere::new(Vec3::splat(10.0), 1.0);
        assert!(!mesh.intersects_sphere(&far, &mut faces));

        let cap = PrimSphere::new(Vec3::new(0.0, 1.0, 0.0), 0.3);
        assert!(mesh.intersects_sphere(&cap, &mut faces));
        assert!(faces.iter().all(|f| mesh.face(f).center().y > 0.6));

        let all = PrimAABox::from_center(Vec3::ZERO, 3.0);
        let mut faces = DynamicFaces::new();
        assert!(mesh.intersects_box(&all, &mut faces));
        assert_eq!(faces.num_elements(), 320);

        let equator = PrimPlane::new(Vec3::ZERO, Vec3::Y);
        let mut faces = DynamicFaces::new();
        assert!(mesh.intersects_plane(&equator, &mut faces));
        for f in faces.iter() {
            let tri = mesh.face(f);
            assert!(tri.minimum().y <= 0.0 && tri.maximum().y >= 0.0);
        }
    }

    #[test]
    fn test_queries_skip_deleted_faces() {
        let mut mesh = sphere();
        let all = PrimAABox::from_center(Vec3::ZERO, 3.0);
        for f in 0..100 {
            mesh.delete_face(f);
        }
        let mut faces = DynamicFaces::new();
        mesh.intersects_box(&all, &mut faces);
        assert_eq!(faces.num_elements(), 220);
        assert!(faces.iter().all(|f| !mesh.is_free_face(f)));
    }
}
