//! Optical-system model: photon count rates and integration times.

use catalog::Star;
use serde::{Deserialize, Serialize};
use units::{Angle, Time};

use crate::modes::ObservingMode;

/// Electron count rates for one planet observation, in counts/day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRates {
    /// Planet signal rate (C_p)
    pub planet: f64,
    /// Background rate: speckle + zodi + detector (C_b)
    pub background: f64,
    /// Residual speckle rate entering as a systematic (C_sp)
    pub speckle: f64,
}

/// Provider of integration times and count rates for an observing mode.
///
/// The signal-to-noise convention throughout is
/// `SNR = C_p·t / sqrt(C_b·t + (C_sp·t)²)`: background integrates down,
/// the speckle residual does not.
pub trait OpticalModel {
    /// Count rates for a planet of brightness `d_mag` at working angle `wa`
    /// around `star`, under local zodi `f_z` and exozodi `f_ez` (1/arcsec²).
    fn photon_counts(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        d_mag: f64,
        wa: Angle,
        mode: &ObservingMode,
    ) -> CountRates;

    /// Integration time to reach the mode's SNR target on a planet of
    /// brightness `d_mag` at `wa`. `None` when the target is unreachable
    /// (the speckle floor dominates).
    fn integration_time(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        d_mag: f64,
        wa: Angle,
        mode: &ObservingMode,
    ) -> Option<Time>;

    /// Integration time to reach the mode's SNR at the mode's limiting
    /// delta magnitude — the deepest useful exposure on this star.
    fn max_integration_time(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        mode: &ObservingMode,
    ) -> Option<Time>;
}

/// A coronagraph with flat throughput and raw contrast across the dark hole.
///
/// Count rates follow the usual budget: the stellar rate is set by the
/// zero-magnitude flux, aperture, and throughput; the planet rate scales it
/// by `10^(−0.4·ΔMag)`; zodiacal light enters through the photometric
/// solid angle; the speckle residual is the stellar rate times the raw
/// contrast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronagraphOptics {
    /// Zero-magnitude photon flux, photons/m²/day (band-integrated)
    pub zero_mag_flux: f64,
    /// Collecting area, m²
    pub collecting_area: f64,
    /// End-to-end throughput
    pub throughput: f64,
    /// Raw contrast of the dark hole
    pub contrast: f64,
    /// Photometric aperture solid angle, arcsec²
    pub photometric_aperture: f64,
    /// Detector dark + clock-induced-charge rate, counts/day
    pub dark_rate: f64,
}

impl CoronagraphOptics {
    /// A 4 m-class instrument with 1e-10 contrast, usable as a demo/test
    /// fixture.
    pub fn demo() -> Self {
        Self {
            zero_mag_flux: 8.6e14,
            collecting_area: 12.6,
            throughput: 0.15,
            contrast: 1e-10,
            photometric_aperture: 0.01,
            dark_rate: 50.0,
        }
    }

    /// Stellar count rate at the detector, counts/day.
    fn star_rate(&self, star: &Star) -> f64 {
        self.zero_mag_flux
            * 10.0_f64.powf(-0.4 * star.v_mag)
            * self.collecting_area
            * self.throughput
    }
}

impl OpticalModel for CoronagraphOptics {
    fn photon_counts(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        d_mag: f64,
        _wa: Angle,
        _mode: &ObservingMode,
    ) -> CountRates {
        let c_star = self.star_rate(star);
        let c_planet = c_star * 10.0_f64.powf(-0.4 * d_mag);
        let c_speckle = c_star * self.contrast;
        let c_zodi = (f_z + f_ez)
            * self.zero_mag_flux
            * self.collecting_area
            * self.throughput
            * self.photometric_aperture;

        CountRates {
            planet: c_planet,
            background: c_speckle + c_zodi + self.dark_rate,
            speckle: c_speckle,
        }
    }

    fn integration_time(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        d_mag: f64,
        wa: Angle,
        mode: &ObservingMode,
    ) -> Option<Time> {
        let rates = self.photon_counts(star, f_z, f_ez, d_mag, wa, mode);
        // Invert SNR = C_p·t / sqrt(C_b·t + (C_sp·t)²) for t
        let denom = rates.planet.powi(2) - (mode.snr * rates.speckle).powi(2);
        if denom <= 0.0 || rates.planet <= 0.0 {
            return None;
        }
        Some(Time::from_days(mode.snr.powi(2) * rates.background / denom))
    }

    fn max_integration_time(
        &self,
        star: &Star,
        f_z: f64,
        f_ez: f64,
        mode: &ObservingMode,
    ) -> Option<Time> {
        self.integration_time(star, f_z, f_ez, mode.d_mag_limit, mode.iwa, mode)
    }
}
