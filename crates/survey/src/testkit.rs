//! Stub models and fixtures shared by the survey unit tests.

use std::collections::HashMap;

use catalog::{Planet, Star, TargetCatalog, Universe};
use nalgebra::Vector3;
use observatory::{
    BrightnessModel, CompletenessModel, CountRates, DetectionModel, GeometryModel, ObservingMode,
    OpticalModel,
};
use rand_chacha::ChaChaRng;
use units::{Angle, Length, Mass, Time};

use crate::config::SurveyConfig;

/// Geometry with no keepout constraint and a spacecraft pinned at 1 AU.
pub struct AlwaysVisible;

impl GeometryModel for AlwaysVisible {
    fn orbit(&self, _t_abs: Time) -> Vector3<f64> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    fn star_direction(&self, star: &Star, _t_abs: Time) -> Vector3<f64> {
        star.direction
    }

    fn keepout(
        &self,
        _catalog: &TargetCatalog,
        star_inds: &[usize],
        _t_abs: Time,
        _r_sc: Vector3<f64>,
        _keepout_angle: Angle,
    ) -> Vec<bool> {
        vec![true; star_inds.len()]
    }
}

/// Geometry blocking a fixed set of stars at all times.
pub struct BlockedStars {
    pub blocked: Vec<usize>,
}

impl GeometryModel for BlockedStars {
    fn orbit(&self, _t_abs: Time) -> Vector3<f64> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    fn star_direction(&self, star: &Star, _t_abs: Time) -> Vector3<f64> {
        star.direction
    }

    fn keepout(
        &self,
        _catalog: &TargetCatalog,
        star_inds: &[usize],
        _t_abs: Time,
        _r_sc: Vector3<f64>,
        _keepout_angle: Angle,
    ) -> Vec<bool> {
        star_inds
            .iter()
            .map(|ind| !self.blocked.contains(ind))
            .collect()
    }
}

/// Geometry blocking one star from a given absolute time on; exercises the
/// end-keepout filter (visible at start, gone by the end of integration).
pub struct BlockedAfter {
    pub star: usize,
    pub after: Time,
}

impl GeometryModel for BlockedAfter {
    fn orbit(&self, _t_abs: Time) -> Vector3<f64> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    fn star_direction(&self, star: &Star, _t_abs: Time) -> Vector3<f64> {
        star.direction
    }

    fn keepout(
        &self,
        _catalog: &TargetCatalog,
        star_inds: &[usize],
        t_abs: Time,
        _r_sc: Vector3<f64>,
        _keepout_angle: Angle,
    ) -> Vec<bool> {
        star_inds
            .iter()
            .map(|&ind| ind != self.star || t_abs < self.after)
            .collect()
    }
}

/// Optics with scripted integration times (by star name) and fixed count
/// rates.
pub struct FixedOptics {
    /// Integration time in days for any star not listed in `per_star`
    pub default_days: f64,
    pub per_star: HashMap<String, f64>,
    pub rates: CountRates,
}

impl FixedOptics {
    pub fn uniform(days: f64) -> Self {
        Self {
            default_days: days,
            per_star: HashMap::new(),
            rates: CountRates {
                planet: 100.0,
                background: 1.0,
                speckle: 0.0,
            },
        }
    }

    fn days_for(&self, star: &Star) -> f64 {
        *self.per_star.get(&star.name).unwrap_or(&self.default_days)
    }
}

impl OpticalModel for FixedOptics {
    fn photon_counts(
        &self,
        _star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _d_mag: f64,
        _wa: Angle,
        _mode: &ObservingMode,
    ) -> CountRates {
        self.rates
    }

    fn integration_time(
        &self,
        star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _d_mag: f64,
        _wa: Angle,
        _mode: &ObservingMode,
    ) -> Option<Time> {
        Some(Time::from_days(self.days_for(star)))
    }

    fn max_integration_time(
        &self,
        star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _mode: &ObservingMode,
    ) -> Option<Time> {
        Some(Time::from_days(self.days_for(star)))
    }
}

/// Constant zodi brightness.
pub struct FlatZodi;

impl BrightnessModel for FlatZodi {
    fn local_zodi(&self, _star: &Star, _r_sc: Vector3<f64>) -> f64 {
        1e-8
    }

    fn exozodi_floor(&self) -> f64 {
        1.5e-7
    }
}

/// Completeness frozen at the catalog baseline (the reference model, local
/// so the stubs are self-contained).
pub struct BaselineCompleteness;

impl CompletenessModel for BaselineCompleteness {
    fn baseline(&self, catalog: &TargetCatalog) -> Vec<f64> {
        catalog.baseline_completeness()
    }

    fn update(&self, catalog: &TargetCatalog, star_inds: &[usize], _t_norm: Time) -> Vec<f64> {
        star_inds.iter().map(|&i| catalog.star(i).comp0).collect()
    }
}

/// Detection statistics with scripted outcomes.
pub struct ScriptedDetection {
    pub false_alarm: bool,
    pub miss_all: bool,
    pub fa_flux_ratio: f64,
}

impl ScriptedDetection {
    pub fn clean() -> Self {
        Self {
            false_alarm: false,
            miss_all: false,
            fa_flux_ratio: 1e-6,
        }
    }
}

impl DetectionModel for ScriptedDetection {
    fn detection_outcome(&self, _rng: &mut ChaChaRng, snrs: &[f64]) -> (bool, Vec<bool>) {
        (self.false_alarm, vec![self.miss_all; snrs.len()])
    }

    fn max_fa_flux_ratio(&self, _wa: Angle) -> f64 {
        self.fa_flux_ratio
    }
}

/// A target star at 10 pc; working angles then come out to
/// `100 mas × a[AU]` for face-on orbits.
pub fn star(name: &str, lon_deg: f64, comp0: f64) -> Star {
    Star::new(
        name,
        Angle::from_degrees(lon_deg),
        Angle::zero(),
        Length::from_parsecs(10.0),
        5.0,
        Mass::from_solar_masses(1.0),
        comp0,
    )
}

/// A face-on planet: its apparent separation stays at the semi-major axis.
pub fn face_on_planet(star_ind: usize, host: &Star, sma_au: f64) -> Planet {
    Planet::new(
        star_ind,
        Mass::from_earth_masses(1.0),
        Length::from_earth_radii(1.0),
        Length::from_au(sma_au),
        Angle::zero(),
        Angle::zero(),
        0.3,
        1.5e-7,
        host,
    )
}

pub fn universe(stars: Vec<Star>, planets: Vec<Planet>) -> Universe {
    Universe::new(TargetCatalog::new(stars), planets, Length::from_au(10.0))
}

pub fn fixture_mode() -> ObservingMode {
    ObservingMode {
        name: "imaging".into(),
        detection: true,
        spectroscopy: false,
        iwa: Angle::from_mas(75.0),
        owa: Angle::from_mas(750.0),
        bandwidth: 0.2,
        snr: 5.0,
        d_mag_limit: 22.5,
        time_multiplier: 1.0,
        overhead: Time::from_days(0.5),
        int_cutoff: Time::from_days(50.0),
    }
}

pub fn base_config(life_days: f64, portion: f64) -> SurveyConfig {
    SurveyConfig {
        mission_life: Time::from_days(life_days),
        mission_portion: portion,
        mission_start: Time::from_days(60_676.0),
        observing_blocks: None,
        ob_duration: None,
        nt_flux: 1,
        settling_time: Time::from_days(0.5),
        dt_alloc: Time::from_days(1.0),
        keepout_angle: Angle::from_degrees(45.0),
        seed: 42,
        modes: vec![fixture_mode()],
        occulter: None,
    }
}
