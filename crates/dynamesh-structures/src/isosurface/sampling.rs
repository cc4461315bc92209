//! Parallel evaluation of the field on the lattice.
//!
//! Every partition owns the samples (or columns) whose index is congruent to its id
//! modulo the thread count. Partitions only read the grid and return their values, which
//! are written back after all of them finished.

use dynamesh_core::{Intersection, PrimRay};
use glam::Vec3;
use rayon::prelude::*;

use super::grid::{is_intersecting, Grid};
use super::tables::CORNERS_BY_EDGE;
use super::IntersectionSample;

const MARK_INSIDE: f32 = -0.5;
const MARK_OUTSIDE: f32 = 0.5;
const MARK_INSIDE_TO_SAMPLE: f32 = -0.6;
const MARK_OUTSIDE_TO_SAMPLE: f32 = 0.6;

/// Runs `work(partition)` for every partition on the rayon pool and concatenates the results.
fn run_partitioned<T, F>(num_partitions: usize, work: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    (0..num_partitions).into_par_iter().flat_map_iter(work).collect()
}

/// Evaluates `distance` at every sample.
///
/// With `only_marked`, samples carrying a to-sample marker are evaluated (negated for
/// inside markers) and all others are kept.
pub(super) fn sample_distances<D>(
    grid: &mut Grid,
    distance: &D,
    num_threads: usize,
    only_marked: bool,
) where
    D: Fn(Vec3) -> f32 + Sync,
{
    let num_threads = num_threads.max(1);
    let values = {
        let grid = &*grid;
        run_partitioned(num_threads, |id| {
            grid.sample_coords()
                .filter_map(|(x, y, z)| {
                    let index = grid.sample_index(x, y, z);
                    if index % num_threads != id {
                        return None;
                    }
                    let pos = grid.sample_pos(x, y, z);
                    let sample = grid.samples[index];
                    let value = if !only_marked {
                        distance(pos)
                    } else if sample == MARK_INSIDE_TO_SAMPLE {
                        -distance(pos)
                    } else if sample == MARK_OUTSIDE_TO_SAMPLE {
                        distance(pos)
                    } else {
                        return None;
                    };
                    debug_assert!(!value.is_nan(), "distance at {pos} is NaN");
                    Some((index, value))
                })
                .collect()
        })
    };
    for (index, value) in values {
        grid.samples[index] = value;
    }
}

/// Fills one column along +z by casting rays and toggling inside at every hit.
fn sample_column<I>(grid: &Grid, intersection: &I, epsilon: f32, x: u32, y: u32) -> Vec<(usize, f32)>
where
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    let dir = Vec3::Z;
    let nz = grid.num_samples().z;
    let mut values = Vec::with_capacity(nz as usize);
    let mut inside = false;
    let mut z = 0;
    let mut ray = PrimRay::new(grid.sample_pos(x, y, 0) - dir * epsilon, dir);
    let mut hit = Intersection::new();

    loop {
        hit.reset();
        let kind = intersection(&ray, &mut hit);
        if kind == IntersectionSample::None || !hit.is_intersection {
            break;
        }
        let d2 = hit.distance * hit.distance;
        while z < nz && grid.sample_pos(x, y, z).distance_squared(ray.origin()) < d2 {
            let mark = if inside { MARK_INSIDE } else { MARK_OUTSIDE };
            values.push((grid.sample_index(x, y, z), mark));
            z += 1;
        }
        ray = PrimRay::new(hit.position + dir * epsilon, dir);
        if kind == IntersectionSample::Sample {
            inside = !inside;
        }
    }
    if inside {
        log::debug!("column ({x}, {y}) ends inside the surface");
    }
    for z in z..nz {
        values.push((grid.sample_index(x, y, z), MARK_OUTSIDE));
    }
    values
}

/// Classifies every sample as inside or outside by casting one ray per column.
///
/// Rays start `epsilon` below the column and restart `epsilon` past every hit.
pub(super) fn sample_intersections<I>(
    grid: &mut Grid,
    intersection: &I,
    epsilon: f32,
    num_threads: usize,
)
where
    I: Fn(&PrimRay, &mut Intersection) -> IntersectionSample + Sync,
{
    let num_threads = num_threads.max(1);
    let n = grid.num_samples();
    let values = {
        let grid = &*grid;
        run_partitioned(num_threads, |id| {
            (0..n.y)
                .flat_map(|y| (0..n.x).map(move |x| (x, y)))
                .filter(|&(x, y)| grid.sample_index(x, y, 0) % num_threads == id)
                .flat_map(|(x, y)| sample_column(grid, intersection, epsilon, x, y))
                .collect()
        })
    };
    for (index, value) in values {
        grid.samples[index] = value;
    }
}

/// Promotes the corners of every cube with a crossing edge to "to sample".
pub(super) fn mark_sample_positions(grid: &mut Grid) {
    let coords: Vec<_> = grid.cube_coords().collect();
    for (x, y, z) in coords {
        let indices = grid.corner_sample_indices(x, y, z);
        let samples = indices.map(|i| grid.samples[i]);

        let crosses = CORNERS_BY_EDGE
            .iter()
            .any(|&[c1, c2]| is_intersecting(samples[c1], samples[c2]));
        if !crosses {
            continue;
        }
        for (&index, &sample) in indices.iter().zip(&samples) {
            if sample == MARK_INSIDE {
                grid.samples[index] = MARK_INSIDE_TO_SAMPLE;
            } else if sample == MARK_OUTSIDE {
                grid.samples[index] = MARK_OUTSIDE_TO_SAMPLE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dynamesh_core::{PrimAABox, EPSILON};

    use super::*;

    fn unit_grid() -> Grid {
        Grid::new(&PrimAABox::new(Vec3::splat(-1.0), Vec3::ONE), 0.25, EPSILON).unwrap()
    }

    /// Test that every thread count yields the same samples.
    #[test]
    fn test_distances_independent_of_thread_count() {
        let distance = |p: Vec3| p.length() - 1.0;
        let mut reference = unit_grid();
        sample_distances(&mut reference, &distance, 1, false);
        assert!(reference.samples.iter().all(|&s| s != f32::MAX));

        for num_threads in [2, 3, 7] {
            let mut grid = unit_grid();
            sample_distances(&mut grid, &distance, num_threads, false);
            assert_eq!(grid.samples, reference.samples);
        }
    }

    #[test]
    fn test_only_marked_samples_are_evaluated() {
        let mut grid = unit_grid();
        grid.samples.fill(MARK_OUTSIDE);
        grid.samples[3] = MARK_INSIDE_TO_SAMPLE;
        grid.samples[5] = MARK_OUTSIDE_TO_SAMPLE;
        sample_distances(&mut grid, &|_: Vec3| 2.0, 4, true);

        assert_eq!(grid.samples[3], -2.0);
        assert_eq!(grid.samples[5], 2.0);
        assert_eq!(grid.samples[4], MARK_OUTSIDE);
    }

    /// Test column classification against a slab between two planes.
    #[test]
    fn test_intersection_columns() {
        let (lo, hi) = (-0.3_f32, 0.4_f32);
        let slab = |ray: &PrimRay, hit: &mut Intersection| {
            let o = ray.origin();
            for plane_z in [lo, hi] {
                if plane_z > o.z {
                    let t = plane_z - o.z;
                    hit.update(t, Vec3::new(o.x, o.y, plane_z), Vec3::Z);
                    return IntersectionSample::Sample;
                }
            }
            IntersectionSample::None
        };

        let mut grid = unit_grid();
        sample_intersections(&mut grid, &slab, EPSILON, 3);
        let n = grid.num_samples();
        for (x, y, z) in grid.sample_coords() {
            let s = grid.samples[grid.sample_index(x, y, z)];
            let pz = grid.sample_pos(x, y, z).z;
            let expected = if pz > lo && pz < hi { MARK_INSIDE } else { MARK_OUTSIDE };
            assert_eq!(s, expected, "sample ({x}, {y}, {z}) at z = {pz}");
        }
        assert!(n.z > 2);

        mark_sample_positions(&mut grid);
        let promoted = grid
            .samples
            .iter()
            .filter(|&&s| s == MARK_INSIDE_TO_SAMPLE || s == MARK_OUTSIDE_TO_SAMPLE)
            .count();
        // two layers on each side of both planes
        assert_eq!(promoted, 4 * (n.x * n.y) as usize);
    }

    #[test]
    fn test_continue_does_not_toggle() {
        let ghost = |ray: &PrimRay, hit: &mut Intersection| {
            let o = ray.origin();
            if o.z < 0.0 {
                hit.update(-o.z, Vec3::new(o.x, o.y, 0.0), Vec3::Z);
                IntersectionSample::Continue
            } else {
                IntersectionSample::None
            }
        };
        let mut grid = unit_grid();
        sample_intersections(&mut grid, &ghost, EPSILON, 2);
        assert!(grid.samples.iter().all(|&s| s == MARK_OUTSIDE));
    }
}
