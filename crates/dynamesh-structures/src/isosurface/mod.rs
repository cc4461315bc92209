//! Isosurface extraction from an implicit field.
//!
//! The field is sampled on a regular lattice padded around the given bounds. Every
//! lattice cube the surface passes through gets one dual vertex at the average of its
//! edge crossings, and every crossed lattice edge becomes a quad joining the dual
//! vertices of the four cubes around it. Configurations listed in
//! [`tables::NON_MANIFOLD_CONFIG`] keep one vertex per surface sheet when the cube
//! across their ambiguous face is ambiguous too, so the output stays manifold.
//!
//! Sampling runs on several threads, see [`IsosurfaceOptions::num_threads`].
//!
//! # Example
//!
//! ```
//! use dynamesh_core::{PrimAABox, Vec3};
//! use dynamesh_structures::isosurface;
//!
//! let bounds = PrimAABox::from_center(Vec3::ZERO, 2.0);
//! let mesh = isosurface::extract(|p| p.length() - 1.0, &bounds, 0.2);
//! assert!(mesh.num_triangles() > 0);
//! ```

mod grid;
mod sampling;
pub mod tables;

use dynamesh_core::mesh_util;
use dynamesh_core::{
    DynameshError, Intersection, IsosurfaceOptions, Mesh, PrimAABox, PrimRay, Result,
};
use glam::Vec3;

use crate::dynamic_mesh::DynamicMesh;
use grid::Grid;

/// What an intersection callback found along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionSample {
    /// Nothing was hit.
    None,
    /// The surface was hit and the ray switches between inside and outside.
    Sample,
    /// Something was hit that does not change inside and outside.
    Continue,
}

fn check_resolution(resolution: f32) -> Result<()> {
    if resolution > 0.0 && resolution.is_finite() {
        Ok(())
    } else {
        Err(DynameshError::InvalidResolution(resolution))
    }
}

/// Area-weighted vertex normals of a triangle soup.
fn set_normals(mesh: &mut Mesh) {
    let mut normals = vec![Vec3::ZERO; mesh.num_vertices()];
    for t in 0..mesh.num_triangles() {
        let [i1, i2, i3] = mesh.triangle(t);
        let v1 = mesh.vertex(i1);
        let n = (mesh.vertex(i2) - v1).cross(mesh.vertex(i3) - v1);
        for i in [i1, i2, i3] {
            normals[i as usize] += n;
        }
    }
    for (i, n) in normals.into_iter().enumerate() {
        mesh.set_normal(dynamesh_core::to_u32(i), n.normalize_or_zero());
    }
}

fn make_mesh(mut grid: Grid) -> Mesh {
    grid.set_cube_vertices();
    grid.resolve_non_manifolds();
    let mut mesh = grid.make_mesh();
    set_normals(&mut mesh);

    let n = grid.num_samples();
    log::debug!(
        "extracted {} vertices and {} triangles from {}x{}x{} samples",
        mesh.num_vertices(),
        mesh.num_triangles(),
        n.x,
        n.y,
        n.z
    );
    mesh
}

// === Pure distance ===

/// Extracts the zero level set of `distance` (negative inside) with default options.
///
/// A non-positive or non-finite `resolution` yields an empty mesh, as do bounds that are
/// not finite or too large for the lattice.
pub fn extract<D>(distance: D, bounds: &PrimAABox, resolution: f32) -> Mesh
where
    D: Fn(Vec3) -> f32 + Sync,
{
    extract_with_options(distance, bounds, resolution, &IsosurfaceOptions::default())
}

/// Like [`extract`], with explicit options.
pub fn extract_with_options<D>(
    distance: D,
    bounds: &PrimAABox,
    resolution: f32,
    options: &IsosurfaceOptions,
) -> Mesh
where
    D: Fn(Vec3) -> f32 + Sync,
{
    extract_checked(distance, bounds, resolution, options).unwrap_or_else(|err| {
        log::debug!("skipping extraction: {err}");
        Mesh::new()
    })
}

/// Like [`extract_with_options`], but reports an invalid `resolution` or unsampleable `bounds`.
pub fn extract_checked<D>(
    distance: D,
    bounds: &PrimAABox,
    resolution: f32,
    options: &IsosurfaceOptions,
) -> Result<Mesh>
where
    D: Fn(Vec3) -> f32 + Sync,
{
    check_resolution(resolution)?;
    let mut grid = Grid::new(bounds, resolution, options.epsilon)?;
    sampling::sample_distances(&mut grid, &distance, options.resolved_num_threads(), false);
    Ok(make_mesh(grid))
}

// === Distance and intersection ===

/// Extracts a surface classified by casting rays, with default options.
///
/// `intersection` reports the closest hit along a ray through its [`Intersection`]
/// argument. Inside and outside are decided by counting [`IntersectionSample::Sample`]
/// hits along lattice columns. Only samples next to a crossing are passed to
/// `distance`, which must return the unsigned distance to the surface.
pub fn extract_with_intersection<D, I>(
    distance: D,
    intersection: I,
    bounds: &PrimAABox,
    resolution: f32,
) -> Mesh
where
    D: Fn(Vec3) -> f32 + Sync,
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    extract_with_intersection_and_options(
        distance,
        intersection,
        bounds,
        resolution,
        &IsosurfaceOptions::default(),
    )
}

/// Like [`extract_with_intersection`], with explicit options.
pub fn extract_with_intersection_and_options<D, I>(
    distance: D,
    intersection: I,
    bounds: &PrimAABox,
    resolution: f32,
    options: &IsosurfaceOptions,
) -> Mesh
where
    D: Fn(Vec3) -> f32 + Sync,
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    extract_with_intersection_checked(distance, intersection, bounds, resolution, options)
        .unwrap_or_else(|err| {
            log::debug!("skipping extraction: {err}");
            Mesh::new()
        })
}

/// Like [`extract_with_intersection_and_options`], but reports an invalid `resolution` or unsampleable `bounds`.
pub fn extract_with_intersection_checked<D, I>(
    distance: D,
    intersection: I,
    bounds: &PrimAABox,
    resolution: f32,
    options: &IsosurfaceOptions,
) -> Result<Mesh>
where
    D: Fn(Vec3) -> f32 + Sync,
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    check_resolution(resolution)?;
    let mut grid = Grid::new(bounds, resolution, options.epsilon)?;
    let num_threads = options.resolved_num_threads();
    sampling::sample_intersections(&mut grid, &intersection, options.epsilon, num_threads);
    sampling::mark_sample_positions(&mut grid);
    sampling::sample_distances(&mut grid, &distance, num_threads, true);
    Ok(make_mesh(grid))
}

// === Into a dynamic mesh ===

fn replace_mesh(mesh: &mut DynamicMesh, soup: &Mesh) {
    debug_assert!(
        soup.is_empty() || mesh_util::check_consistency(soup),
        "extracted isosurface is not consistent"
    );
    mesh.from_mesh(soup);
}

/// Replaces `mesh` by the zero level set of `distance`, using the mesh's options.
pub fn extract_into<D>(mesh: &mut DynamicMesh, distance: D, bounds: &PrimAABox, resolution: f32)
where
    D: Fn(Vec3) -> f32 + Sync,
{
    let options = mesh.options().isosurface;
    let soup = extract_with_options(distance, bounds, resolution, &options);
    replace_mesh(mesh, &soup);
}

/// Replaces `mesh` by a surface classified with `intersection`, see
/// [`extract_with_intersection`].
pub fn extract_with_intersection_into<D, I>(
    mesh: &mut DynamicMesh,
    distance: D,
    intersection: I,
    bounds: &PrimAABox,
    resolution: f32,
) where
    D: Fn(Vec3) -> f32 + Sync,
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    let options = mesh.options().isosurface;
    let soup =
        extract_with_intersection_and_options(distance, intersection, bounds, resolution, &options);
    replace_mesh(mesh, &soup);
}
