//! Survey configuration.
//!
//! Loaded from a JSON script file or built in code. All times are JSON
//! numbers in days, angles in radians, masses in kilograms (the base units
//! of the `units` newtypes, which serialize transparently).

use std::path::Path;

use observatory::ObservingMode;
use serde::{Deserialize, Serialize};
use units::{Angle, Time};

use crate::error::SurveyError;
use crate::occulter::OcculterConfig;
use crate::timekeeping::ObservingBlock;

fn default_nt_flux() -> u32 {
    1
}

fn default_settling_time() -> Time {
    Time::from_days(1.0)
}

fn default_dt_alloc() -> Time {
    Time::from_days(1.0)
}

fn default_keepout_angle() -> Angle {
    Angle::from_degrees(45.0)
}

fn default_mission_start() -> Time {
    // MJD 60676 = 2025-01-01
    Time::from_days(60_676.0)
}

/// Full configuration of one survey simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyConfig {
    /// Ceiling on elapsed mission time
    pub mission_life: Time,
    /// Fraction of the mission life reservable for exoplanet observation
    pub mission_portion: f64,
    /// Mission start epoch (MJD)
    #[serde(default = "default_mission_start")]
    pub mission_start: Time,
    /// Explicit observing-block schedule; overrides `ob_duration`
    #[serde(default)]
    pub observing_blocks: Option<Vec<ObservingBlock>>,
    /// Observing-block duration for the auto-generated schedule
    #[serde(default)]
    pub ob_duration: Option<Time>,
    /// Number of sub-intervals each integration is sampled over
    #[serde(default = "default_nt_flux")]
    pub nt_flux: u32,
    /// Settling time charged before each target selection
    #[serde(default = "default_settling_time")]
    pub settling_time: Time,
    /// Retry interval charged when no target is observable
    #[serde(default = "default_dt_alloc")]
    pub dt_alloc: Time,
    /// Telescope solar keepout half-angle
    #[serde(default = "default_keepout_angle")]
    pub keepout_angle: Angle,
    /// Random seed; fixed seed, identical mission
    #[serde(default)]
    pub seed: u64,
    /// Observing modes; exactly one must be flagged for detection
    pub modes: Vec<ObservingMode>,
    /// Starshade occulter parameters, for missions that fly one
    #[serde(default)]
    pub occulter: Option<OcculterConfig>,
}

impl SurveyConfig {
    /// Load a configuration from a JSON script file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
        let script = std::fs::read_to_string(path)?;
        Self::from_json(&script)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(script: &str) -> Result<Self, SurveyError> {
        let config: Self = serde_json::from_str(script)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration; every failure here is fatal at setup.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if !self.mission_life.is_positive() {
            return Err(SurveyError::Config("mission life must be positive".into()));
        }
        if !(self.mission_portion > 0.0 && self.mission_portion <= 1.0) {
            return Err(SurveyError::Config(format!(
                "mission portion must lie in (0, 1], got {}",
                self.mission_portion
            )));
        }
        if let Some(duration) = self.ob_duration {
            if !duration.is_positive() {
                return Err(SurveyError::Config(
                    "observing-block duration must be positive".into(),
                ));
            }
        }
        if self.nt_flux == 0 {
            return Err(SurveyError::Config(
                "integration sampling nt_flux must be at least 1".into(),
            ));
        }
        if !self.dt_alloc.is_positive() {
            return Err(SurveyError::Config(
                "retry interval dt_alloc must be positive".into(),
            ));
        }
        if self.modes.is_empty() {
            return Err(SurveyError::Config("no observing modes given".into()));
        }
        if !self.modes.iter().any(|m| m.detection) {
            return Err(SurveyError::Config(
                "no observing mode is flagged for detection".into(),
            ));
        }
        for mode in &self.modes {
            if mode.iwa >= mode.owa {
                return Err(SurveyError::Config(format!(
                    "mode '{}' has IWA >= OWA",
                    mode.name
                )));
            }
            if mode.time_multiplier < 1.0 {
                return Err(SurveyError::Config(format!(
                    "mode '{}' has time multiplier below 1",
                    mode.name
                )));
            }
            if !mode.int_cutoff.is_positive() {
                return Err(SurveyError::Config(format!(
                    "mode '{}' has a non-positive integration cutoff",
                    mode.name
                )));
            }
        }
        if let Some(occulter) = &self.occulter {
            occulter.validate()?;
        }
        Ok(())
    }

    /// The mode used for detections: the first mode flagged `detection`.
    ///
    /// `validate` guarantees one exists.
    pub fn detection_mode(&self) -> &ObservingMode {
        self.modes
            .iter()
            .find(|m| m.detection)
            .expect("validated configuration has a detection mode")
    }

    /// The mode used for characterization: the first spectroscopy mode, or
    /// the first mode when none is.
    pub fn characterization_mode(&self) -> &ObservingMode {
        self.modes
            .iter()
            .find(|m| m.spectroscopy)
            .unwrap_or(&self.modes[0])
    }

    /// The observing-block schedule: explicit when given, auto-generated
    /// otherwise.
    pub fn block_schedule(&self) -> Vec<ObservingBlock> {
        match &self.observing_blocks {
            Some(blocks) => blocks.clone(),
            None => crate::timekeeping::MissionClock::auto_blocks(
                self.mission_life,
                self.mission_portion,
                self.ob_duration,
            ),
        }
    }
}
