//! Visit ledger, detection snapshots, and the revisit queue.

use serde::{Deserialize, Serialize};
use units::{Angle, Time};

/// What one planet looked like at the most recent detection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetSighting {
    /// True when the planet was detected at that attempt
    pub detected: bool,
    /// Exozodi brightness (1/arcsec²)
    pub f_ez: f64,
    /// Star-planet delta magnitude
    pub d_mag: f64,
    /// Working angle
    pub wa: Angle,
}

/// A synthesized false-positive source recorded alongside the real planets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FalseAlarmSighting {
    /// Exozodi brightness (1/arcsec²)
    pub f_ez: f64,
    /// Delta magnitude
    pub d_mag: f64,
    /// Working angle
    pub wa: Angle,
}

/// Snapshot of a star's most recent detection attempt.
///
/// `planets` is ordered like the star's planet indices; a false alarm, when
/// one occurred, is kept separate instead of being appended as a phantom
/// planet entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSnapshot {
    pub planets: Vec<PlanetSighting>,
    pub false_alarm: Option<FalseAlarmSighting>,
}

impl DetectionSnapshot {
    /// True when anything (planet or false alarm) was seen.
    pub fn any_detection(&self) -> bool {
        self.false_alarm.is_some() || self.planets.iter().any(|p| p.detected)
    }
}

/// Per-star visit history and per-planet spectra counters.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitLedger {
    visits: Vec<u32>,
    last_obs_time: Vec<Time>,
    last_detected: Vec<Option<DetectionSnapshot>>,
    full_spectra: Vec<u32>,
    partial_spectra: Vec<u32>,
}

impl VisitLedger {
    /// Fresh ledger for `n_stars` targets and `n_planets` planets.
    pub fn new(n_stars: usize, n_planets: usize) -> Self {
        Self {
            visits: vec![0; n_stars],
            last_obs_time: vec![Time::zero(); n_stars],
            last_detected: vec![None; n_stars],
            full_spectra: vec![0; n_planets],
            partial_spectra: vec![0; n_planets],
        }
    }

    /// Number of times `star_ind` has been selected.
    pub fn visits(&self, star_ind: usize) -> u32 {
        self.visits[star_ind]
    }

    /// Record a selection of `star_ind`.
    pub fn record_visit(&mut self, star_ind: usize) {
        self.visits[star_ind] += 1;
    }

    /// Minimum visit count among the given targets.
    pub fn min_visits(&self, star_inds: &[usize]) -> u32 {
        star_inds
            .iter()
            .map(|&i| self.visits[i])
            .min()
            .unwrap_or(0)
    }

    /// Last time `star_ind` was observed.
    pub fn last_obs_time(&self, star_ind: usize) -> Time {
        self.last_obs_time[star_ind]
    }

    /// Update the last-observed time of `star_ind`.
    pub fn set_last_obs_time(&mut self, star_ind: usize, t_norm: Time) {
        self.last_obs_time[star_ind] = t_norm;
    }

    /// The most recent detection snapshot of `star_ind`, if any.
    pub fn snapshot(&self, star_ind: usize) -> Option<&DetectionSnapshot> {
        self.last_detected[star_ind].as_ref()
    }

    /// Replace the detection snapshot of `star_ind`.
    pub fn set_snapshot(&mut self, star_ind: usize, snapshot: DetectionSnapshot) {
        self.last_detected[star_ind] = Some(snapshot);
    }

    /// Full-spectrum count of planet `plan_ind`.
    pub fn full_spectra(&self, plan_ind: usize) -> u32 {
        self.full_spectra[plan_ind]
    }

    /// Partial-spectrum count of planet `plan_ind`.
    pub fn partial_spectra(&self, plan_ind: usize) -> u32 {
        self.partial_spectra[plan_ind]
    }

    /// Count a full-spectrum characterization of planet `plan_ind`.
    pub fn add_full_spectrum(&mut self, plan_ind: usize) {
        self.full_spectra[plan_ind] += 1;
    }

    /// Count a partial-spectrum characterization of planet `plan_ind`.
    pub fn add_partial_spectrum(&mut self, plan_ind: usize) {
        self.partial_spectra[plan_ind] += 1;
    }
}

/// One pending revisit: observe `star_ind` again near `t_rev`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisitEntry {
    pub star_ind: usize,
    pub t_rev: Time,
}

/// Ordered list of scheduled revisits.
///
/// An entry is appended after every detection attempt and never removed, so
/// a star may accumulate several (mostly stale) entries; the selector's
/// revisit window decides which are live. Ordering is by insertion, i.e. by
/// scheduling time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisitQueue {
    entries: Vec<RevisitEntry>,
}

impl RevisitQueue {
    /// Schedule a revisit of `star_ind` at `t_rev`.
    pub fn push(&mut self, star_ind: usize, t_rev: Time) {
        self.entries.push(RevisitEntry { star_ind, t_rev });
    }

    /// Stars with a revisit time strictly within `window` of `now`.
    pub fn due_within(&self, now: Time, window: Time) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.t_rev.abs_diff(now) < window)
            .map(|e| e.star_ind)
            .collect()
    }

    /// All scheduled revisits, in insertion order.
    pub fn entries(&self) -> &[RevisitEntry] {
        &self.entries
    }

    /// Number of scheduled revisits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
