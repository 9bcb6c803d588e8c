//! Observing modes.
//!
//! A mode bundles the instrument configuration the scheduler needs to plan
//! one observation: working-angle limits, bandwidth, the signal-to-noise
//! target, timing multipliers and overheads, and the integration-time
//! cutoff beyond which a target is not worth chasing.

use serde::{Deserialize, Serialize};
use units::{Angle, Time};

/// One instrument/bandpass configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservingMode {
    /// Human-readable mode name (e.g. "imaging-550", "ifs-spec")
    pub name: String,
    /// True for the mode used to acquire detections
    pub detection: bool,
    /// True for spectroscopy modes (characterization prefers these)
    pub spectroscopy: bool,
    /// Inner working angle
    pub iwa: Angle,
    /// Outer working angle
    pub owa: Angle,
    /// Fractional bandwidth Δλ/λ
    pub bandwidth: f64,
    /// Signal-to-noise target/threshold
    pub snr: f64,
    /// Limiting star-planet delta magnitude
    pub d_mag_limit: f64,
    /// Total observation time per unit integration time (≥ 1)
    pub time_multiplier: f64,
    /// Fixed per-observation overhead
    pub overhead: Time,
    /// Integration times above this are rejected outright
    pub int_cutoff: Time,
}

impl ObservingMode {
    /// Inner margin for a full spectrum: `IWA·(1 + BW/2)`.
    pub fn char_inner_margin(&self) -> Angle {
        self.iwa * (1.0 + self.bandwidth / 2.0)
    }

    /// Outer margin for a full spectrum: `OWA·(1 − BW/2)`.
    pub fn char_outer_margin(&self) -> Angle {
        self.owa * (1.0 - self.bandwidth / 2.0)
    }
}
