//! Detection statistics: missed detections and false alarms.

use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use units::Angle;

/// Post-processing statistics of one detection attempt.
pub trait DetectionModel {
    /// Given the per-planet signal-to-noise ratios of one integration,
    /// decide whether a false alarm occurred and which planets were
    /// missed. The returned mask is aligned with `snrs`; an empty `snrs`
    /// yields an empty mask (a false alarm is still possible).
    fn detection_outcome(&self, rng: &mut ChaChaRng, snrs: &[f64]) -> (bool, Vec<bool>);

    /// Largest planet/star flux ratio a false positive can plausibly
    /// mimic at working angle `wa`; bounds the synthesized false-alarm
    /// delta magnitude.
    fn max_fa_flux_ratio(&self, wa: Angle) -> f64;
}

/// Threshold detection with a fixed false-alarm probability.
///
/// A planet is missed when its SNR falls below the detection threshold;
/// false alarms fire independently of the planet signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdDetection {
    /// Minimum SNR counted as a detection
    pub snr_min: f64,
    /// Per-observation false-alarm probability
    pub false_alarm_prob: f64,
    /// Contrast floor for synthesized false positives
    pub fa_contrast_floor: f64,
}

impl Default for ThresholdDetection {
    fn default() -> Self {
        Self {
            snr_min: 5.0,
            false_alarm_prob: 3e-5,
            fa_contrast_floor: 1e-10,
        }
    }
}

impl DetectionModel for ThresholdDetection {
    fn detection_outcome(&self, rng: &mut ChaChaRng, snrs: &[f64]) -> (bool, Vec<bool>) {
        let false_alarm = rng.random::<f64>() < self.false_alarm_prob;
        let missed = snrs.iter().map(|&snr| snr < self.snr_min).collect();
        (false_alarm, missed)
    }

    fn max_fa_flux_ratio(&self, _wa: Angle) -> f64 {
        self.fa_contrast_floor
    }
}
