//! The simulated universe: a target catalog plus the planets around it.

use serde::{Deserialize, Serialize};
use units::{Length, Mass, Time};

use crate::planet::Planet;
use crate::star::TargetCatalog;

/// A target catalog together with the planetary systems around its stars.
///
/// Planets are stored flat, each carrying the index of its host star; the
/// star→planet mapping is recovered with [`Universe::planets_of`]. The
/// population bound `sma_max` (the largest semi-major axis the generating
/// population allows) is carried alongside because the false-alarm
/// working-angle bound needs it even when no sampled planet reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Universe {
    pub catalog: TargetCatalog,
    pub planets: Vec<Planet>,
    /// Maximum semi-major axis of the generating planet population
    pub sma_max: Length,
}

impl Universe {
    /// Assemble a universe from a catalog and its planets.
    ///
    /// # Panics
    /// Panics if any planet references a star index outside the catalog.
    pub fn new(catalog: TargetCatalog, planets: Vec<Planet>, sma_max: Length) -> Self {
        for planet in &planets {
            assert!(
                planet.star_ind < catalog.len(),
                "planet references star {} outside catalog of {}",
                planet.star_ind,
                catalog.len()
            );
        }
        Self {
            catalog,
            planets,
            sma_max,
        }
    }

    /// Number of planets across all systems.
    pub fn n_planets(&self) -> usize {
        self.planets.len()
    }

    /// Indices of the planets orbiting star `star_ind`, in storage order.
    pub fn planets_of(&self, star_ind: usize) -> Vec<usize> {
        self.planets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.star_ind == star_ind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Recompute the apparent state of every planet of `star_ind` at
    /// elapsed mission time `t_norm`.
    pub fn propagate_system(&mut self, star_ind: usize, t_norm: Time) {
        let star_mass = self.catalog.star(star_ind).mass;
        let star_distance = self.catalog.star(star_ind).distance;
        for planet in self.planets.iter_mut().filter(|p| p.star_ind == star_ind) {
            planet.update_apparent_state(t_norm, star_mass, star_distance);
        }
    }

    /// Mean apparent separation over the whole planet population.
    ///
    /// Zero for an empty population; callers treat that as "no information"
    /// rather than dividing by a zero count.
    pub fn mean_separation(&self) -> Length {
        if self.planets.is_empty() {
            return Length::zero();
        }
        let total: f64 = self.planets.iter().map(|p| p.separation.to_au()).sum();
        Length::from_au(total / self.planets.len() as f64)
    }

    /// Mean planet mass over the whole population.
    pub fn mean_planet_mass(&self) -> Mass {
        if self.planets.is_empty() {
            return Mass::zero();
        }
        let total: f64 = self.planets.iter().map(|p| p.mass.to_kg()).sum();
        Mass::from_kg(total / self.planets.len() as f64)
    }
}
