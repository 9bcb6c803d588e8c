//! Survey target stars.
//!
//! A `Star` carries the static per-target attributes the scheduler consumes:
//! sky direction, distance, brightness, mass, and baseline completeness.
//! These are supplied at catalog construction and never mutated by the
//! mission simulation.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use units::{Angle, Length, Mass};

/// A single survey target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    /// Catalog designation (e.g. "HIP 12345")
    pub name: String,
    /// Unit vector toward the star, heliocentric ecliptic frame
    pub direction: Vector3<f64>,
    /// Distance from the Sun
    pub distance: Length,
    /// Apparent V magnitude
    pub v_mag: f64,
    /// Stellar mass
    pub mass: Mass,
    /// Baseline single-visit detection completeness
    pub comp0: f64,
}

impl Star {
    /// Create a star from ecliptic longitude/latitude coordinates.
    pub fn new(
        name: impl Into<String>,
        lon: Angle,
        lat: Angle,
        distance: Length,
        v_mag: f64,
        mass: Mass,
        comp0: f64,
    ) -> Self {
        Self {
            name: name.into(),
            direction: direction_from_lon_lat(lon, lat),
            distance,
            v_mag,
            mass,
            comp0,
        }
    }
}

/// Unit vector from ecliptic longitude and latitude.
pub fn direction_from_lon_lat(lon: Angle, lat: Angle) -> Vector3<f64> {
    Vector3::new(
        lat.cos() * lon.cos(),
        lat.cos() * lon.sin(),
        lat.sin(),
    )
}

/// An ordered collection of survey targets.
///
/// Stars are addressed by their index; the index is the target identity
/// used throughout the mission simulation (visit counts, revisit queue,
/// observation records).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCatalog {
    pub stars: Vec<Star>,
}

impl TargetCatalog {
    /// Create a catalog from a list of stars.
    pub fn new(stars: Vec<Star>) -> Self {
        Self { stars }
    }

    /// Number of targets in the catalog.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// True when the catalog holds no targets.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Reference to the star at `ind`.
    pub fn star(&self, ind: usize) -> &Star {
        &self.stars[ind]
    }

    /// Baseline completeness of every target, in catalog order.
    pub fn baseline_completeness(&self) -> Vec<f64> {
        self.stars.iter().map(|s| s.comp0).collect()
    }
}
