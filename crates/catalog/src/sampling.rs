//! Seeded synthetic catalog generation.
//!
//! Draws target stars and planet populations that are statistically
//! reasonable without pretending to be a survey catalog: distances uniform
//! in volume, V magnitudes near the bright end, log-uniform semi-major
//! axes, isotropic inclinations. Used by the demo binary and the
//! integration tests; real missions load a catalog instead.

use std::f64::consts::PI;

use rand::Rng;
use rand_chacha::ChaChaRng;
use units::{Angle, Length, Mass};

use crate::planet::Planet;
use crate::star::{Star, TargetCatalog};
use crate::universe::Universe;

/// Parameters of the synthetic population.
#[derive(Debug, Clone)]
pub struct PopulationSpec {
    /// Number of target stars
    pub n_stars: usize,
    /// Maximum target distance in parsecs
    pub max_distance_pc: f64,
    /// Planet occurrence per star (expected planets per system)
    pub eta: f64,
    /// Semi-major axis range in AU (log-uniform)
    pub sma_range: (f64, f64),
    /// Planet mass range in Earth masses (log-uniform)
    pub mass_range: (f64, f64),
    /// Exozodi surface brightness floor (1/arcsec²)
    pub f_ez0: f64,
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self {
            n_stars: 50,
            max_distance_pc: 30.0,
            eta: 1.5,
            sma_range: (0.5, 5.0),
            mass_range: (0.5, 300.0),
            f_ez0: 1.5e-7,
        }
    }
}

/// Sample a target catalog of `spec.n_stars` stars.
pub fn sample_catalog(rng: &mut ChaChaRng, spec: &PopulationSpec) -> TargetCatalog {
    let stars = (0..spec.n_stars)
        .map(|i| {
            // Uniform on the sphere
            let lon = Angle::from_radians(rng.random_range(0.0..2.0 * PI));
            let lat = Angle::from_radians((rng.random_range(-1.0..1.0_f64)).asin());
            // Uniform in volume out to the distance cap
            let u: f64 = rng.random();
            let distance_pc = spec.max_distance_pc * u.cbrt();
            // FGK-ish hosts
            let mass = Mass::from_solar_masses(rng.random_range(0.6..1.3));
            let v_mag = rng.random_range(4.0..9.0);
            let comp0 = rng.random_range(0.05..0.45);

            Star::new(
                format!("SYN {i:04}"),
                lon,
                lat,
                Length::from_parsecs(distance_pc),
                v_mag,
                mass,
                comp0,
            )
        })
        .collect();

    TargetCatalog::new(stars)
}

/// Sample planets for every star of `catalog` and assemble a universe.
pub fn sample_universe(rng: &mut ChaChaRng, catalog: TargetCatalog, spec: &PopulationSpec) -> Universe {
    let mut planets = Vec::new();

    for (star_ind, star) in catalog.stars.iter().enumerate() {
        let n_planets = poisson_knuth(rng, spec.eta);
        for _ in 0..n_planets {
            let sma = Length::from_au(sample_log_uniform(rng, spec.sma_range.0, spec.sma_range.1));
            let mass_earth = sample_log_uniform(rng, spec.mass_range.0, spec.mass_range.1);
            let mass = Mass::from_earth_masses(mass_earth);
            // Crude mass-radius relation: R ∝ M^0.55 up to the giant regime
            let radius_earth = mass_earth.powf(0.55).min(11.2);
            // Isotropic orbit orientation
            let inclination = Angle::from_radians((rng.random_range(-1.0..1.0_f64)).acos());
            let mean_anomaly = Angle::from_radians(rng.random_range(0.0..2.0 * PI));
            let albedo = rng.random_range(0.2..0.5);
            // Exozodi scatter about the floor
            let f_ez = spec.f_ez0 * 10.0_f64.powf(rng.random_range(-0.3..0.5));

            planets.push(Planet::new(
                star_ind,
                mass,
                Length::from_earth_radii(radius_earth),
                sma,
                inclination,
                mean_anomaly,
                albedo,
                f_ez,
                star,
            ));
        }
    }

    Universe::new(catalog, planets, Length::from_au(spec.sma_range.1))
}

/// Log-uniform sample in `[min, max]`.
fn sample_log_uniform(rng: &mut ChaChaRng, min: f64, max: f64) -> f64 {
    let u: f64 = rng.random();
    (min.ln() + u * (max.ln() - min.ln())).exp()
}

/// Poisson sample via Knuth's product method; fine for small means.
fn poisson_knuth(rng: &mut ChaChaRng, mean: f64) -> usize {
    let limit = (-mean).exp();
    let mut k = 0;
    let mut p = 1.0;
    loop {
        p *= rng.random::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}
