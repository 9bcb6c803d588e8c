//! Exoplanet survey mission scheduling and observation execution.
//!
//! The simulation repeatedly selects the next target star under keepout,
//! integration-time, and visit-recency constraints, runs the detection and
//! characterization photon-counting model against the simulated universe,
//! and appends the outcome to the mission log until the time budget (or,
//! for occulter missions, the propellant) runs out.
//!
//! External physics — spacecraft geometry, the optical system, zodiacal
//! brightness, completeness, and detection statistics — enter through the
//! trait seams of the `observatory` crate.

pub mod config;
pub mod drm;
pub mod error;
pub mod ledger;
pub mod observation;
pub mod occulter;
pub mod selector;
pub mod sim;
pub mod timekeeping;

// Re-export the working set at crate root
pub use config::SurveyConfig;
pub use drm::{
    CharacterizationStatus, DetectionStatus, MissionCompletion, MissionResult, ObservationRecord,
    OcculterRecord,
};
pub use error::SurveyError;
pub use ledger::{
    DetectionSnapshot, FalseAlarmSighting, PlanetSighting, RevisitEntry, RevisitQueue, VisitLedger,
};
pub use observation::{CharacterizationResult, DetectionResult};
pub use occulter::{OcculterConfig, OcculterLedger};
pub use selector::TargetSelection;
pub use sim::SurveySimulation;
pub use timekeeping::{MissionClock, ObservingBlock};

#[cfg(test)]
mod testkit;

#[cfg(test)]
mod timekeeping_test;
