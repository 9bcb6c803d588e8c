//! Observatory collaborator seams for the survey simulation.
//!
//! The survey core consults five external models: spacecraft geometry and
//! keepout, the optical system, zodiacal brightness, target completeness,
//! and detection statistics. Each is a trait here, consumed as `&dyn` by
//! the simulation, with one reference implementation suitable for demos
//! and tests.

pub mod completeness;
pub mod detection;
pub mod geometry;
pub mod modes;
pub mod optics;
pub mod zodi;

// Re-export the trait seams and reference models at crate root
pub use completeness::{CompletenessModel, StaticCompleteness};
pub use detection::{DetectionModel, ThresholdDetection};
pub use geometry::{angular_separation, GeometryModel, SolarOrbitGeometry};
pub use modes::ObservingMode;
pub use optics::{CoronagraphOptics, CountRates, OpticalModel};
pub use zodi::{BrightnessModel, InverseSquareZodi};

#[cfg(test)]
mod optics_test;
