//! Probe generation and density integration.
//!
//! Pipeline: generate city cores -> sample `probe_count` points from a
//! mixture of isotropic bivariate exponentials, one per core, weighted by
//! importance -> snap to a grid -> dedup -> integrate each probe's
//! surrounding population via a Riemann sum over the core mixture density.

use dt_core::{GenerationConfig, Point2, PopulationProbe, RngHandle};

use crate::city_core::{generate_city_cores, CityCores};

/// Snap a local offset to the nearest corner of a `grid`-sided square,
/// floor-division semantics: `floor(v / grid) * grid`.
fn snap_to_grid(local: Point2, grid: f64) -> Point2 {
    Point2::new(
        (local.x / grid).floor() * grid,
        (local.y / grid).floor() * grid,
    )
}

/// Draw one local offset from the isotropic bivariate exponential
/// distribution of scale `expected_radius`:
/// `q ~ U(0,1)`, `r = -E*ln(1-sqrt(q))`, `phi ~ U(0,2pi)`.
fn sample_local_offset(expected_radius: f64, rng: &mut RngHandle) -> Point2 {
    let q = rng.uniform01();
    let r = -expected_radius * (1.0 - q.sqrt()).ln();
    let phi = rng.gen_range(0.0..(2.0 * std::f64::consts::PI));
    Point2::new(r * phi.cos(), r * phi.sin())
}

/// Generate the deduplicated, grid-snapped probe cloud for a given
/// `CityCores` set. `probe_count` is the target sample size before
/// deduplication collapses coincident grid cells.
fn sample_probe_locations(
    city_cores: &CityCores,
    probe_count: usize,
    config: &GenerationConfig,
    rng: &mut RngHandle,
) -> Vec<Point2> {
    let weights: Vec<f64> = city_cores.cores.iter().map(|c| c.weight).collect();

    let mut locations = Vec::with_capacity(probe_count);
    for _ in 0..probe_count {
        let core_idx = rng.choose_weighted(&weights);
        let core = &city_cores.cores[core_idx];

        let local = sample_local_offset(core.expected_radius, rng);
        let snapped = snap_to_grid(local, config.grid);
        let global = core.location + core.basis.apply(snapped);
        locations.push(global);
    }

    // Deduplicate by lexicographic comparison of (x, y), mirroring
    // `numpy.unique` over the probe array's first two columns.
    locations.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap()
            .then(a.y.partial_cmp(&b.y).unwrap())
    });
    locations.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    locations
}

/// Evenly spaced points in `[start, stop]`, `n` of them (matches
/// `numpy.linspace`). Returns `[start]` if `n <= 1`.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Riemann-integrate the core mixture density over a centered
/// `area_width x area_width` square, sub-divided into `patch_width`-sided
/// patches, and scale by `population_size`.
fn integrate_population(
    loc: Point2,
    population_size: f64,
    city_cores: &CityCores,
    area_width: f64,
    patch_width: f64,
) -> f64 {
    let n = (area_width / patch_width) as usize;
    if n == 0 {
        return 0.0;
    }
    let xs = linspace(-area_width / 2.0, area_width / 2.0, n);
    let ys = linspace(-area_width / 2.0, area_width / 2.0, n);

    let mut area_density_sum = 0.0;
    for &x in &xs {
        for &y in &ys {
            let p = Point2::new(loc.x + x, loc.y + y);
            area_density_sum += patch_width * patch_width * city_cores.density_at(p);
        }
    }
    population_size * area_density_sum
}

/// Generate the full, annotated probe set for a generation run. Returns an
/// empty vector if the city is too small to host a single core.
pub fn generate_probes(config: &GenerationConfig, rng: &mut RngHandle) -> Vec<PopulationProbe> {
    let city_cores = generate_city_cores(config, rng);
    if city_cores.is_empty() {
        return vec![];
    }

    let probe_count = (config.city_size * config.city_size * config.probes_per_sqm) as usize;
    let locations = sample_probe_locations(&city_cores, probe_count, config, rng);

    let population_size =
        probe_count as f64 * config.persons_per_probe + config.base_pop_per_sqm * config.city_size.powi(2);

    build_probes(&locations, &city_cores, population_size)
}

#[cfg(not(feature = "parallel"))]
fn build_probes(
    locations: &[Point2],
    city_cores: &CityCores,
    population_size: f64,
) -> Vec<PopulationProbe> {
    locations
        .iter()
        .map(|&loc| probe_at(loc, city_cores, population_size))
        .collect()
}

#[cfg(feature = "parallel")]
fn build_probes(
    locations: &[Point2],
    city_cores: &CityCores,
    population_size: f64,
) -> Vec<PopulationProbe> {
    use rayon::prelude::*;

    locations
        .par_iter()
        .map(|&loc| probe_at(loc, city_cores, population_size))
        .collect()
}

fn probe_at(loc: Point2, city_cores: &CityCores, population_size: f64) -> PopulationProbe {
    let pop200 = integrate_population(loc, population_size, city_cores, 200.0, 50.0);
    let pop1000 = integrate_population(loc, population_size, city_cores, 1000.0, 100.0);
    PopulationProbe {
        location: loc.to_3d(0.0),
        pop200,
        pop1000,
    }
}
