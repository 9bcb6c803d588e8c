//! Run a seeded survey mission against a synthetic catalog.
//!
//! Usage: cargo run -p survey --example run_survey

use catalog::{sample_catalog, sample_universe, PopulationSpec};
use observatory::{
    CoronagraphOptics, InverseSquareZodi, ObservingMode, SolarOrbitGeometry, StaticCompleteness,
    ThresholdDetection,
};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use survey::{DetectionStatus, SurveyConfig, SurveySimulation};
use units::{Angle, Time};

fn main() {
    let spec = PopulationSpec::default();
    let mut rng = ChaChaRng::seed_from_u64(2_025);
    let catalog = sample_catalog(&mut rng, &spec);
    let universe = sample_universe(&mut rng, catalog, &spec);
    println!(
        "Synthetic universe: {} stars, {} planets",
        universe.catalog.len(),
        universe.n_planets()
    );

    let config = SurveyConfig {
        mission_life: Time::from_years(5.0),
        mission_portion: 0.2,
        mission_start: Time::from_days(60_676.0),
        observing_blocks: None,
        ob_duration: Some(Time::from_days(30.0)),
        nt_flux: 4,
        settling_time: Time::from_days(0.5),
        dt_alloc: Time::from_days(1.0),
        keepout_angle: Angle::from_degrees(45.0),
        seed: 2_025,
        modes: vec![
            ObservingMode {
                name: "imaging-550".into(),
                detection: true,
                spectroscopy: false,
                iwa: Angle::from_mas(75.0),
                owa: Angle::from_mas(750.0),
                bandwidth: 0.10,
                snr: 5.0,
                d_mag_limit: 22.5,
                time_multiplier: 1.1,
                overhead: Time::from_days(0.2),
                int_cutoff: Time::from_days(50.0),
            },
            ObservingMode {
                name: "ifs-spec".into(),
                detection: false,
                spectroscopy: true,
                iwa: Angle::from_mas(90.0),
                owa: Angle::from_mas(600.0),
                bandwidth: 0.18,
                snr: 10.0,
                d_mag_limit: 21.5,
                time_multiplier: 1.1,
                overhead: Time::from_days(0.2),
                int_cutoff: Time::from_days(50.0),
            },
        ],
        occulter: None,
    };

    let geometry = SolarOrbitGeometry::earth_trailing();
    let optics = CoronagraphOptics::demo();
    let zodi = InverseSquareZodi::default();
    let completeness = StaticCompleteness;
    let detection = ThresholdDetection::default();

    let mut sim = SurveySimulation::new(
        config, universe, &geometry, &optics, &zodi, &completeness, &detection,
    )
    .expect("valid survey configuration");

    let result = sim.run_sim();

    println!(
        "Mission complete ({:?}): {} observations",
        result.completion,
        result.drm.len()
    );

    let detections: usize = result
        .drm
        .iter()
        .map(|r| {
            r.det_status
                .iter()
                .filter(|&&s| s == DetectionStatus::Detected)
                .count()
        })
        .sum();
    let false_alarms = result.drm.iter().filter(|r| r.false_alarm.is_some()).count();
    println!("Planet detections: {detections}, false alarms: {false_alarms}");

    for record in result.drm.iter().take(10) {
        println!(
            "  day {:7.2}  star {:3}  t_det {:5.2} d  detected {}",
            record.arrival_time.to_days(),
            record.star_ind,
            record.det_int_time.to_days(),
            record
                .det_status
                .iter()
                .filter(|&&s| s == DetectionStatus::Detected)
                .count(),
        );
    }
    if result.drm.len() > 10 {
        println!("  ... {} more", result.drm.len() - 10);
    }
}
