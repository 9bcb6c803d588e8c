//! The mission log: Design Reference Mission observation records.

use serde::{Deserialize, Serialize};
use units::{Angle, Mass, Time};

use crate::ledger::FalseAlarmSighting;

/// Outcome of a detection attempt for one planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectionStatus {
    /// Working angle inside the inner working angle
    BelowIwa,
    /// Working angle beyond the outer working angle
    AboveOwa,
    /// In range but missed by the post-processing
    Missed,
    /// Detected
    Detected,
}

/// Outcome of a characterization attempt for one planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterizationStatus {
    /// Not characterized this visit
    NotCharacterized,
    /// SNR threshold reached but outside the bandwidth-adjusted margins
    PartialSpectrum,
    /// SNR threshold reached inside the margins
    FullSpectrum,
}

/// Occulter bookkeeping attached to one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcculterRecord {
    /// Slew duration to reach this target
    pub slew_time: Time,
    /// Slew arc subtended
    pub slew_angle: Angle,
    /// Delta-V spent slewing (m/s)
    pub slew_d_v: f64,
    /// Propellant spent slewing
    pub slew_mass_used: Mass,
    /// Delta-V spent station-keeping during detection (m/s)
    pub det_d_v: f64,
    /// Propellant spent station-keeping during detection
    pub det_mass_used: Mass,
    /// Wet mass after the detection burn
    pub det_sc_mass: Mass,
    /// Delta-V spent station-keeping during characterization (m/s)
    pub char_d_v: f64,
    /// Propellant spent station-keeping during characterization
    pub char_mass_used: Mass,
    /// Wet mass after the characterization burn
    pub char_sc_mass: Mass,
}

/// One entry of the mission log, immutable once appended.
///
/// Vectors indexed per planet are aligned with `plan_inds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    /// Observed target
    pub star_ind: usize,
    /// Elapsed mission time at arrival
    pub arrival_time: Time,
    /// Indices of the planets around the target
    pub plan_inds: Vec<usize>,

    /// Detection integration time
    pub det_int_time: Time,
    /// Per-planet detection outcome
    pub det_status: Vec<DetectionStatus>,
    /// Per-planet detection signal-to-noise (in-range planets only, in
    /// `plan_inds` order restricted to those)
    pub det_snr: Vec<f64>,
    /// Per-planet exozodi brightness at detection (1/arcsec²)
    pub det_f_ez: Vec<f64>,
    /// Per-planet delta magnitude at detection
    pub det_d_mag: Vec<f64>,
    /// Per-planet working angle at detection
    pub det_wa: Vec<Angle>,
    /// The synthesized false alarm, when one occurred
    pub false_alarm: Option<FalseAlarmSighting>,

    /// Characterization integration time (zero when nothing was attempted)
    pub char_int_time: Time,
    /// Per-planet characterization outcome
    pub char_status: Vec<CharacterizationStatus>,
    /// Characterization outcome of the false-alarm source, when present
    pub char_fa_status: Option<CharacterizationStatus>,
    /// Characterization signal-to-noise values, characterized candidates
    /// in order (false alarm last)
    pub char_snr: Vec<f64>,
    /// Per-planet exozodi brightness at characterization (1/arcsec²)
    pub char_f_ez: Vec<f64>,
    /// Per-planet delta magnitude at characterization
    pub char_d_mag: Vec<f64>,
    /// Per-planet working angle at characterization
    pub char_wa: Vec<Angle>,

    /// Occulter propellant bookkeeping, for missions that fly one
    pub occulter: Option<OcculterRecord>,
}

/// Why a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissionCompletion {
    /// Mission life, observation budget, or observing blocks exhausted
    TimeExhausted,
    /// Occulter propellant fell below the dry-mass floor
    PropellantExhausted,
}

/// The outcome of one simulated mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResult {
    pub completion: MissionCompletion,
    /// The mission log, in observation order
    pub drm: Vec<ObservationRecord>,
}
