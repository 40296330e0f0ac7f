//! City cores — the Gaussian-like anchors a probe cloud is sampled around.
//!
//! Internal to this crate: downstream stages only ever see the resulting
//! [`PopulationProbe`](dt_core::PopulationProbe)s, never a [`CityCore`]
//! directly.

use dt_core::{Basis2, GenerationConfig, Point2, RngHandle};

/// One Gaussian-like anchor of the probe distribution.
#[derive(Clone, Copy, Debug)]
pub struct CityCore {
    pub location: Point2,
    pub basis: Basis2,
    /// Isotropic scale of the core's exponential radial distribution.
    pub expected_radius: f64,
    /// Importance weight; all cores' weights form a probability simplex.
    pub weight: f64,
}

/// A set of city cores, their weights summing to 1.0.
#[derive(Clone, Debug)]
pub struct CityCores {
    pub cores: Vec<CityCore>,
}

impl CityCores {
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Evaluate the mixture-of-exponentials population density at `loc`
    ///: `sum_i w_i * (1/E_i) / (2*pi*(1+E_i)) * exp(-r_i/E_i)`.
    pub fn density_at(&self, loc: Point2) -> f64 {
        self.cores
            .iter()
            .map(|core| {
                let e = core.expected_radius;
                let lambda = 1.0 / e;
                let r = loc.distance(core.location);
                let core_density = lambda / (2.0 * std::f64::consts::PI * (1.0 + e)) * (-lambda * r).exp();
                core.weight * core_density
            })
            .sum()
    }
}

/// Generate `core_count = floor(size^2 / sqm_per_core)` cores. Returns an
/// empty set if the city is too small to host one core.
pub fn generate_city_cores(config: &GenerationConfig, rng: &mut RngHandle) -> CityCores {
    let core_count = (config.city_size * config.city_size / config.sqm_per_core).floor() as usize;
    if core_count == 0 {
        return CityCores { cores: vec![] };
    }

    let half = config.city_size / 2.0;
    let expected_radius = (config.sqm_per_core / std::f64::consts::PI).sqrt();

    // Draw every core's location, orientation, and raw importance score
    // before normalizing — in that fixed order.
    let mut locations = Vec::with_capacity(core_count);
    let mut bases = Vec::with_capacity(core_count);
    let mut raw_weights = Vec::with_capacity(core_count);

    for _ in 0..core_count {
        let x = rng.gen_range(-half..half);
        let y = rng.gen_range(-half..half);
        locations.push(Point2::new(x, y));

        let theta = rng.gen_range(0.0..(2.0 * std::f64::consts::PI));
        bases.push(Basis2::from_angle(theta));

        raw_weights.push(rng.uniform01());
    }

    let total: f64 = raw_weights.iter().sum();
    let cores = locations
        .into_iter()
        .zip(bases)
        .zip(raw_weights)
        .map(|((location, basis), raw_weight)| CityCore {
            location,
            basis,
            expected_radius,
            weight: raw_weight / total,
        })
        .collect();

    CityCores { cores }
}
