//! The mission driver.

use catalog::Universe;
use observatory::{
    BrightnessModel, CompletenessModel, DetectionModel, GeometryModel, OpticalModel,
};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::config::SurveyConfig;
use crate::drm::{DetectionStatus, MissionCompletion, MissionResult, ObservationRecord};
use crate::error::SurveyError;
use crate::ledger::{RevisitQueue, VisitLedger};
use crate::occulter::OcculterLedger;
use crate::timekeeping::MissionClock;

/// One survey simulation: the mission clock, ledgers, log, random source,
/// the simulated universe, and the external models it consults.
///
/// All mutable mission state lives here and is only touched through the
/// narrow operations of its components; two simulations with the same
/// configuration, universe, and models produce identical missions.
pub struct SurveySimulation<'a> {
    pub(crate) config: SurveyConfig,
    pub(crate) universe: Universe,
    pub(crate) geometry: &'a dyn GeometryModel,
    pub(crate) optics: &'a dyn OpticalModel,
    pub(crate) zodi: &'a dyn BrightnessModel,
    pub(crate) completeness: &'a dyn CompletenessModel,
    pub(crate) detection: &'a dyn DetectionModel,
    pub(crate) clock: MissionClock,
    pub(crate) ledger: VisitLedger,
    pub(crate) revisits: RevisitQueue,
    pub(crate) extended: Vec<usize>,
    pub(crate) occulter: Option<OcculterLedger>,
    pub(crate) rng: ChaChaRng,
    pub(crate) drm: Vec<ObservationRecord>,
}

impl<'a> SurveySimulation<'a> {
    /// Assemble a simulation; all configuration errors surface here,
    /// before any simulated time elapses.
    pub fn new(
        config: SurveyConfig,
        universe: Universe,
        geometry: &'a dyn GeometryModel,
        optics: &'a dyn OpticalModel,
        zodi: &'a dyn BrightnessModel,
        completeness: &'a dyn CompletenessModel,
        detection: &'a dyn DetectionModel,
    ) -> Result<Self, SurveyError> {
        config.validate()?;
        let clock = MissionClock::new(
            config.mission_start,
            config.mission_life,
            config.mission_portion,
            config.block_schedule(),
        )?;
        let ledger = VisitLedger::new(universe.catalog.len(), universe.n_planets());
        let occulter = config.occulter.clone().map(OcculterLedger::new);
        let rng = ChaChaRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            universe,
            geometry,
            optics,
            zodi,
            completeness,
            detection,
            clock,
            ledger,
            revisits: RevisitQueue::default(),
            extended: Vec::new(),
            occulter,
            rng,
            drm: Vec::new(),
        })
    }

    /// The mission clock.
    pub fn clock(&self) -> &MissionClock {
        &self.clock
    }

    /// The visit ledger.
    pub fn ledger(&self) -> &VisitLedger {
        &self.ledger
    }

    /// The revisit queue.
    pub fn revisits(&self) -> &RevisitQueue {
        &self.revisits
    }

    /// The mission log accumulated so far.
    pub fn drm(&self) -> &[ObservationRecord] {
        &self.drm
    }

    /// The simulated universe in its current propagated state.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Targets that yielded a detection and stay eligible past nominal
    /// mission life.
    pub fn extended_list(&self) -> &[usize] {
        &self.extended
    }

    /// Run the mission to completion and return the log.
    pub fn run_sim(&mut self) -> MissionResult {
        log::info!(
            "survey simulation starting: {} targets, {} planets, mission life {:.1} d",
            self.universe.catalog.len(),
            self.universe.n_planets(),
            self.config.mission_life.to_days()
        );

        let det_mode = self.config.detection_mode().clone();
        let char_mode = self.config.characterization_mode().clone();

        let mut old_sind = None;
        let completion = loop {
            if self.clock.mission_is_over() {
                break MissionCompletion::TimeExhausted;
            }

            let Some(selection) = self.next_target(old_sind, &det_mode) else {
                break MissionCompletion::TimeExhausted;
            };
            let star_ind = selection.star_ind;
            old_sind = Some(star_ind);

            // Past nominal mission life, seed the extended-mission pool from
            // the log, once
            if self.clock.current_time_norm() > self.config.mission_life
                && self.extended.is_empty()
            {
                self.seed_extended_list();
            }

            let arrival_time = self.clock.current_time_norm();
            log::info!(
                "current mission time: {:.2} d, observing target {}",
                arrival_time.to_days(),
                star_ind
            );

            let plan_inds = self.universe.planets_of(star_ind);

            // Detection
            let det_result = self.observation_detection(star_ind, selection.t_det, &det_mode);
            let det_snapshot = self
                .ledger
                .snapshot(star_ind)
                .expect("detection stores a snapshot")
                .clone();

            // Characterization
            let char_outcome = self.observation_characterization(star_ind, &char_mode);

            let char_values: Vec<_> = plan_inds
                .iter()
                .map(|&p| {
                    let planet = &self.universe.planets[p];
                    (planet.f_ez, planet.d_mag, planet.wa)
                })
                .collect();

            let occulter_record = self.occulter.as_mut().map(|ledger| {
                ledger.update_after_observation(
                    selection.slew_time,
                    selection.t_det,
                    char_outcome.t_char,
                )
            });

            let record = ObservationRecord {
                star_ind,
                arrival_time,
                plan_inds: plan_inds.clone(),
                det_int_time: selection.t_det,
                det_status: det_result.status,
                det_snr: det_result.snr,
                det_f_ez: det_snapshot.planets.iter().map(|s| s.f_ez).collect(),
                det_d_mag: det_snapshot.planets.iter().map(|s| s.d_mag).collect(),
                det_wa: det_snapshot.planets.iter().map(|s| s.wa).collect(),
                false_alarm: det_snapshot.false_alarm,
                char_int_time: char_outcome.t_char,
                char_status: char_outcome.status,
                char_fa_status: char_outcome.fa_status,
                char_snr: char_outcome.snr,
                char_f_ez: char_values.iter().map(|v| v.0).collect(),
                char_d_mag: char_values.iter().map(|v| v.1).collect(),
                char_wa: char_values.iter().map(|v| v.2).collect(),
                occulter: occulter_record,
            };

            self.ledger
                .set_last_obs_time(star_ind, self.clock.current_time_norm());
            self.drm.push(record);

            if let Some(ledger) = &self.occulter {
                if ledger.is_exhausted() {
                    log::info!(
                        "occulter propellant exhausted at {:.2} d",
                        self.clock.current_time_norm().to_days()
                    );
                    break MissionCompletion::PropellantExhausted;
                }
            }
        };

        log::info!(
            "survey simulation finished: {:?} after {} observations",
            completion,
            self.drm.len()
        );

        MissionResult {
            completion,
            drm: self.drm.clone(),
        }
    }

    /// Collect every target with a historical detection into the
    /// extended-mission pool, sorted and deduplicated.
    fn seed_extended_list(&mut self) {
        let mut extended: Vec<usize> = self
            .drm
            .iter()
            .filter(|record| {
                record
                    .det_status
                    .iter()
                    .any(|&s| s == DetectionStatus::Detected)
            })
            .map(|record| record.star_ind)
            .collect();
        extended.sort_unstable();
        extended.dedup();
        self.extended = extended;
    }
}
