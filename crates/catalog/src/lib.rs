//! Target catalog and simulated universe for exoplanet survey missions.
//!
//! This crate provides the data model the survey scheduler operates on:
//! target stars with their static attributes, planets with time-dependent
//! apparent state, and seeded synthetic population sampling for demos and
//! tests.

pub mod planet;
pub mod sampling;
pub mod star;
pub mod universe;

// Re-export key types at crate root
pub use planet::{lambert_phase, Planet};
pub use sampling::{sample_catalog, sample_universe, PopulationSpec};
pub use star::{direction_from_lon_lat, Star, TargetCatalog};
pub use universe::Universe;
