//! Starshade occulter propellant ledger.
//!
//! Missions flying a physically separated occulter pay propellant for every
//! slew between targets and for station-keeping against disturbance forces
//! while observing. When the wet mass falls below the dry-mass floor the
//! mission driver terminates.

use serde::{Deserialize, Serialize};
use units::{Angle, Length, Mass, Time};

use crate::drm::OcculterRecord;
use crate::error::SurveyError;

/// Standard gravity, m/s².
const G0: f64 = 9.80665;

/// Starshade occulter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcculterConfig {
    /// Launch (wet) mass
    pub sc_mass: Mass,
    /// Dry-mass floor; crossing it ends the mission
    pub dry_mass: Mass,
    /// Slew thrust, N
    pub thrust: f64,
    /// Telescope-occulter separation
    pub occulter_sep: Length,
    /// Fraction of a slew spent burning
    pub defburn_portion: f64,
    /// Propellant flow rate while burning, kg/day
    pub flow_rate: f64,
    /// Lateral disturbance force countered while observing, N
    pub sk_lateral_force: f64,
    /// Station-keeping specific impulse, s
    pub sk_isp: f64,
}

impl OcculterConfig {
    /// Validate the occulter parameters; failures are fatal at setup.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.sc_mass <= self.dry_mass {
            return Err(SurveyError::Config(
                "occulter wet mass must exceed the dry-mass floor".into(),
            ));
        }
        if self.thrust <= 0.0 || self.flow_rate <= 0.0 || self.sk_isp <= 0.0 {
            return Err(SurveyError::Config(
                "occulter thrust, flow rate, and Isp must be positive".into(),
            ));
        }
        if !(self.defburn_portion > 0.0 && self.defburn_portion < 1.0) {
            return Err(SurveyError::Config(
                "occulter burn portion must lie in (0, 1)".into(),
            ));
        }
        if !(self.occulter_sep.to_km() > 0.0) {
            return Err(SurveyError::Config(
                "occulter separation must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// The consumable-mass ledger of an occulter mission.
#[derive(Debug, Clone, PartialEq)]
pub struct OcculterLedger {
    config: OcculterConfig,
    sc_mass: Mass,
}

impl OcculterLedger {
    pub fn new(config: OcculterConfig) -> Self {
        let sc_mass = config.sc_mass;
        Self { config, sc_mass }
    }

    /// Current wet mass.
    pub fn sc_mass(&self) -> Mass {
        self.sc_mass
    }

    /// True when the propellant floor has been breached.
    pub fn is_exhausted(&self) -> bool {
        self.sc_mass < self.config.dry_mass
    }

    /// Slew-time factor in s²: `2·d / a0 / (b/2 − b²/4)` with
    /// `a0 = thrust/mass` and `b` the burn portion. A slew across angular
    /// separation `sd` then takes `sqrt(fac · sin(sd/2))`.
    pub fn slew_time_factor_s2(&self) -> f64 {
        let a0 = self.config.thrust / self.sc_mass.to_kg();
        let b = self.config.defburn_portion;
        2.0 * self.config.occulter_sep.to_meters() / a0.abs() / (b / 2.0 - b.powi(2) / 4.0)
    }

    /// Slew time across angular separation `sd`.
    pub fn slew_time(&self, sd: Angle) -> Time {
        let fac_s2 = self.slew_time_factor_s2();
        Time::from_seconds((fac_s2 * (sd / 2.0).sin()).sqrt())
    }

    /// Charge one observation (slew, then detection and characterization
    /// station-keeping) against the wet mass, returning the bookkeeping to
    /// store on the observation record.
    pub fn update_after_observation(
        &mut self,
        slew_time: Time,
        t_det: Time,
        t_char: Time,
    ) -> OcculterRecord {
        let b = self.config.defburn_portion;

        // Slew: recover the slew angle from the slew time, then the burn
        let fac_s2 = self.slew_time_factor_s2();
        let slew_angle =
            Angle::from_radians(2.0 * (slew_time.to_seconds().powi(2) / fac_s2).clamp(0.0, 1.0).asin());
        let a0 = self.config.thrust / self.sc_mass.to_kg();
        let slew_d_v = slew_time.to_seconds() * a0 * b;
        let slew_mass_used = Mass::from_kg(slew_time.to_days() * b * self.config.flow_rate);

        // Detection station-keeping against the lateral disturbance
        let mdot = self.config.sk_lateral_force / (self.config.sk_isp * G0);
        let det_d_v = self.config.sk_lateral_force / self.sc_mass.to_kg() * t_det.to_seconds();
        let det_mass_used = Mass::from_kg(mdot * t_det.to_seconds());

        self.sc_mass = self.sc_mass - (slew_mass_used + det_mass_used);
        let det_sc_mass = self.sc_mass;

        // Characterization station-keeping, against the post-detection mass
        let char_d_v = self.config.sk_lateral_force / self.sc_mass.to_kg() * t_char.to_seconds();
        let char_mass_used = Mass::from_kg(mdot * t_char.to_seconds());

        self.sc_mass = self.sc_mass - char_mass_used;
        let char_sc_mass = self.sc_mass;

        OcculterRecord {
            slew_time,
            slew_angle,
            slew_d_v,
            slew_mass_used,
            det_d_v,
            det_mass_used,
            det_sc_mass,
            char_d_v,
            char_mass_used,
            char_sc_mass,
        }
    }
}
