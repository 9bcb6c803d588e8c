//! End-to-end mission simulations against stub and reference models.

use catalog::{
    sample_catalog, sample_universe, Planet, PopulationSpec, Star, TargetCatalog, Universe,
};
use nalgebra::Vector3;
use observatory::{
    CoronagraphOptics, CountRates, DetectionModel, GeometryModel, InverseSquareZodi, ObservingMode,
    OpticalModel, SolarOrbitGeometry, StaticCompleteness, ThresholdDetection,
};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::collections::HashMap;
use survey::{MissionCompletion, OcculterConfig, SurveyConfig, SurveySimulation};
use units::{Angle, Length, Mass, Time};

/// Geometry with no keepout constraint at all.
struct OpenSky;

impl GeometryModel for OpenSky {
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

/// Optics with one fixed integration time for every target.
struct ConstantOptics {
    days: f64,
}

impl OpticalModel for ConstantOptics {
    fn photon_counts(
        &self,
        _star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _d_mag: f64,
        _wa: Angle,
        _mode: &ObservingMode,
    ) -> CountRates {
        CountRates {
            planet: 100.0,
            background: 1.0,
            speckle: 0.0,
        }
    }

    fn integration_time(
        &self,
        _star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _d_mag: f64,
        _wa: Angle,
        _mode: &ObservingMode,
    ) -> Option<Time> {
        Some(Time::from_days(self.days))
    }

    fn max_integration_time(
        &self,
        _star: &Star,
        _f_z: f64,
        _f_ez: f64,
        _mode: &ObservingMode,
    ) -> Option<Time> {
        Some(Time::from_days(self.days))
    }
}

fn target(name: &str, lon_deg: f64, comp0: f64) -> Star {
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

fn imaging_mode() -> ObservingMode {
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

fn simple_config(life_days: f64, portion: f64) -> SurveyConfig {
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
        modes: vec![imaging_mode()],
        occulter: None,
    }
}

#[test]
fn single_target_mission_has_predictable_cadence() {
    let geometry = OpenSky;
    let optics = ConstantOptics { days: 1.0 };
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    let detection = ThresholdDetection {
        snr_min: 5.0,
        false_alarm_prob: 0.0,
        fa_contrast_floor: 1e-6,
    };

    // One star, no planets: every cycle costs settling + overhead +
    // integration = 0.5 + 0.5 + 1.0 days
    let universe = Universe::new(
        TargetCatalog::new(vec![target("SOLO", 0.0, 0.3)]),
        Vec::new(),
        Length::from_au(10.0),
    );
    let config = simple_config(100.0, 1.0);
    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .unwrap();

    let result = sim.run_sim();
    assert_eq!(result.completion, MissionCompletion::TimeExhausted);

    // missionLife / (integration + overheads) observations, within one
    let expected = (100.0_f64 / 2.0).floor() as i64;
    let count = result.drm.len() as i64;
    assert!(
        (count - expected).abs() <= 1,
        "expected about {expected} observations, got {count}"
    );

    // Arrival times strictly increase and stay inside the mission life
    for pair in result.drm.windows(2) {
        assert!(pair[1].arrival_time > pair[0].arrival_time);
    }
    for record in &result.drm {
        assert_eq!(record.star_ind, 0);
        assert!(record.arrival_time.to_days() <= 100.0);
        assert!(record.plan_inds.is_empty());
        assert!(record.false_alarm.is_none());
    }
}

#[test]
fn forced_false_alarms_populate_every_record() {
    /// Detection statistics that always fire a false alarm.
    struct AlwaysFalseAlarm;

    impl DetectionModel for AlwaysFalseAlarm {
        fn detection_outcome(&self, _rng: &mut ChaChaRng, snrs: &[f64]) -> (bool, Vec<bool>) {
            (true, vec![false; snrs.len()])
        }

        fn max_fa_flux_ratio(&self, _wa: Angle) -> f64 {
            1e-6
        }
    }

    let geometry = OpenSky;
    let optics = ConstantOptics { days: 1.0 };
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    let detection = AlwaysFalseAlarm;

    let host = target("FA", 0.0, 0.3);
    let planet = Planet::new(
        0,
        Mass::from_earth_masses(1.0),
        Length::from_earth_radii(1.0),
        Length::from_au(1.5),
        Angle::zero(),
        Angle::zero(),
        0.3,
        1.5e-7,
        &host,
    );
    let universe = Universe::new(TargetCatalog::new(vec![host]), vec![planet], Length::from_au(10.0));

    let config = simple_config(60.0, 1.0);
    let mode = config.modes[0].clone();
    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .unwrap();

    let result = sim.run_sim();
    assert!(!result.drm.is_empty());

    let wa_pop = Angle::from_radians(
        (10.0 / Length::from_parsecs(10.0).to_au()).atan(),
    );
    let wa_max = mode.owa.min(wa_pop);
    let d_mag_min = -2.5 * 1e-6_f64.log10();

    for record in &result.drm {
        let fa = record
            .false_alarm
            .expect("every record carries the false-alarm fields");
        assert!(fa.wa >= mode.iwa && fa.wa <= wa_max);
        assert!(fa.d_mag >= d_mag_min - 1e-9 && fa.d_mag <= mode.d_mag_limit + 1e-9);
        assert!(fa.f_ez > 0.0);
    }
}

#[test]
fn same_seed_reproduces_the_whole_mission() {
    let run = |seed: u64| {
        let geometry = SolarOrbitGeometry::earth_trailing();
        let optics = CoronagraphOptics::demo();
        let zodi = InverseSquareZodi::default();
        let completeness = StaticCompleteness;
        let detection = ThresholdDetection {
            snr_min: 5.0,
            false_alarm_prob: 0.05,
            fa_contrast_floor: 1e-6,
        };

        let spec = PopulationSpec {
            n_stars: 20,
            ..PopulationSpec::default()
        };
        let mut rng = ChaChaRng::seed_from_u64(7);
        let catalog = sample_catalog(&mut rng, &spec);
        let universe = sample_universe(&mut rng, catalog, &spec);

        let mut config = simple_config(365.0, 0.3);
        config.seed = seed;
        let mut sim = SurveySimulation::new(
            config, universe, &geometry, &optics, &zodi, &completeness, &detection,
        )
        .unwrap();
        sim.run_sim()
    };

    let first = run(42);
    let second = run(42);
    assert_eq!(first, second);
    assert!(!first.drm.is_empty());
}

#[test]
fn occulter_mission_ends_when_propellant_runs_out() {
    let geometry = OpenSky;
    let optics = ConstantOptics { days: 1.0 };
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    let detection = ThresholdDetection {
        snr_min: 5.0,
        false_alarm_prob: 0.0,
        fa_contrast_floor: 1e-6,
    };

    let universe = Universe::new(
        TargetCatalog::new(vec![target("SOLO", 0.0, 0.3)]),
        Vec::new(),
        Length::from_au(10.0),
    );

    // Ten spare kilograms against ~12 kg/day of station-keeping
    let mut config = simple_config(100.0, 1.0);
    config.occulter = Some(OcculterConfig {
        sc_mass: Mass::from_kg(3_410.0),
        dry_mass: Mass::from_kg(3_400.0),
        thrust: 450.0,
        occulter_sep: Length::from_km(55_000.0),
        defburn_portion: 0.05,
        flow_rate: 2.0,
        sk_lateral_force: 0.3,
        sk_isp: 220.0,
    });
    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .unwrap();

    let result = sim.run_sim();
    assert_eq!(result.completion, MissionCompletion::PropellantExhausted);
    assert_eq!(result.drm.len(), 1);

    let occ = result.drm[0].occulter.expect("occulter bookkeeping recorded");
    assert!(occ.det_mass_used.to_kg() > 10.0);
    assert!(occ.char_sc_mass < Mass::from_kg(3_400.0));
}

#[test]
fn observations_stay_inside_observing_blocks() {
    let geometry = OpenSky;
    let optics = ConstantOptics { days: 1.0 };
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    let detection = ThresholdDetection {
        snr_min: 5.0,
        false_alarm_prob: 0.0,
        fa_contrast_floor: 1e-6,
    };

    let universe = Universe::new(
        TargetCatalog::new(vec![target("SOLO", 0.0, 0.3)]),
        Vec::new(),
        Length::from_au(10.0),
    );

    // Two ten-day blocks: [0, 10] and [50, 60]
    let mut config = simple_config(100.0, 0.2);
    config.ob_duration = Some(Time::from_days(10.0));
    let blocks = config.block_schedule();
    assert_eq!(blocks.len(), 2);

    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .unwrap();
    let result = sim.run_sim();
    assert!(!result.drm.is_empty());

    for record in &result.drm {
        let t = record.arrival_time;
        let inside = blocks.iter().any(|b| t >= b.start && t <= b.end);
        assert!(inside, "arrival {:.2} d outside every block", t.to_days());
    }

    // Both blocks were used
    assert!(result
        .drm
        .iter()
        .any(|r| r.arrival_time >= Time::from_days(50.0)));
}


#[test]
fn detected_planets_get_characterized_and_excluded_after_full_spectra() {
    let geometry = OpenSky;
    let optics = ConstantOptics { days: 1.0 };
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    // Everything in range gets detected
    let detection = ThresholdDetection {
        snr_min: 1.0,
        false_alarm_prob: 0.0,
        fa_contrast_floor: 1e-6,
    };

    // One in-range planet at 150 mas, inside the characterization margins
    let host = target("HOST", 0.0, 0.3);
    let planet = Planet::new(
        0,
        Mass::from_earth_masses(1.0),
        Length::from_earth_radii(1.0),
        Length::from_au(1.5),
        Angle::zero(),
        Angle::zero(),
        0.3,
        1.5e-7,
        &host,
    );
    let universe = Universe::new(TargetCatalog::new(vec![host]), vec![planet], Length::from_au(10.0));

    let config = simple_config(40.0, 1.0);
    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .unwrap();
    let result = sim.run_sim();
    assert!(result.drm.len() >= 2);

    // First visit: detected and fully characterized
    let first = &result.drm[0];
    assert_eq!(first.det_status, vec![survey::DetectionStatus::Detected]);
    assert_eq!(
        first.char_status,
        vec![survey::CharacterizationStatus::FullSpectrum]
    );
    assert!(first.char_int_time.is_positive());

    // Every later visit: still detectable, never characterized again
    for record in &result.drm[1..] {
        assert_eq!(
            record.char_status,
            vec![survey::CharacterizationStatus::NotCharacterized]
        );
        assert_eq!(record.char_int_time, Time::zero());
    }
}

// Keep the import used even when individual tests shuffle their fixtures.
#[allow(dead_code)]
fn _unused(_: HashMap<String, f64>) {}
