//! Observation execution: detection, characterization, and the
//! sub-sampled signal/noise integration both share.

use observatory::ObservingMode;
use rand::Rng;
use units::{Angle, Length, Mass, Time};

use crate::drm::{CharacterizationStatus, DetectionStatus};
use crate::ledger::{DetectionSnapshot, FalseAlarmSighting, PlanetSighting};
use crate::sim::SurveySimulation;

/// Gravitational constant, m³/(kg·s²).
const GRAV: f64 = 6.6743e-11;

/// Outcome of one detection attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// Per-planet outcome, aligned with the star's planet indices
    pub status: Vec<DetectionStatus>,
    /// Signal-to-noise of the in-range planets, in order
    pub snr: Vec<f64>,
    /// True when the post-processing produced a false alarm
    pub false_alarm: bool,
}

/// Outcome of one characterization attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterizationResult {
    /// Per-planet outcome, aligned with the star's planet indices
    pub status: Vec<CharacterizationStatus>,
    /// Outcome for the false-alarm source; `None` when none was present
    pub fa_status: Option<CharacterizationStatus>,
    /// Signal-to-noise of the characterized candidates, false alarm last
    pub snr: Vec<f64>,
    /// Shared characterization time (zero when nothing was attempted)
    pub t_char: Time,
}

/// One entry of the characterization worklist, carrying its snapshot
/// values through every filter stage.
#[derive(Debug, Clone, Copy)]
struct CharCandidate {
    /// Position within the star's planet list; `None` for the false alarm
    slot: Option<usize>,
    d_mag: f64,
    wa: Angle,
    f_ez: f64,
    t_char: Time,
}

impl<'a> SurveySimulation<'a> {
    /// Run the detection observation of `star_ind` for integration time
    /// `t_det`, record the snapshot, and schedule a revisit.
    pub fn observation_detection(
        &mut self,
        star_ind: usize,
        t_det: Time,
        mode: &ObservingMode,
    ) -> DetectionResult {
        let plan_inds = self.universe.planets_of(star_ind);

        // Classify by working angle at the start of the observation; the
        // in-range planets are the ones integrated. The classification is
        // frozen here: the integration below propagates the system, and the
        // missed-detection mask must stay aligned with this set.
        let mut status: Vec<DetectionStatus> = plan_inds
            .iter()
            .map(|&p| {
                let wa = self.universe.planets[p].wa;
                if wa < mode.iwa {
                    DetectionStatus::BelowIwa
                } else if wa > mode.owa {
                    DetectionStatus::AboveOwa
                } else {
                    DetectionStatus::Detected
                }
            })
            .collect();
        let obs_inds: Vec<usize> = plan_inds
            .iter()
            .zip(&status)
            .filter(|(_, &s)| s == DetectionStatus::Detected)
            .map(|(&p, _)| p)
            .collect();

        let mut snr = Vec::new();
        if !obs_inds.is_empty() {
            // Integrate signal and noise over nt_flux sub-intervals; each
            // advances the clock and re-evaluates the local zodi
            let dt = t_det / self.config.nt_flux as f64;
            let mut signal = vec![0.0; obs_inds.len()];
            let mut noise = vec![0.0; obs_inds.len()];
            for _ in 0..self.config.nt_flux {
                let (s, n) = self.calc_signal_noise(star_ind, &obs_inds, dt, mode);
                for i in 0..obs_inds.len() {
                    signal[i] += s[i];
                    noise[i] += n[i];
                }
            }
            snr = signal
                .iter()
                .zip(&noise)
                .map(|(&s, &n)| if n > 0.0 { s / n } else { 0.0 })
                .collect();

            // The remainder of the time-multiplier overhead
            let t_extra = t_det * (mode.time_multiplier - 1.0);
            if t_extra.is_positive() {
                self.clock.allocate_time(t_extra, true);
            }
        } else {
            // Nothing in range: the full observation time still elapses
            let t_tot = t_det * mode.time_multiplier;
            if t_tot.is_positive() {
                self.clock.allocate_time(t_tot, true);
            }
        }

        let (false_alarm, missed) = self.detection.detection_outcome(&mut self.rng, &snr);

        // Downgrade the in-range planets the post-processing missed; the
        // mask is aligned with obs_inds
        let mut missed_iter = missed.iter();
        for s in status.iter_mut() {
            if *s == DetectionStatus::Detected
                && *missed_iter.next().expect("mask aligned with in-range planets")
            {
                *s = DetectionStatus::Missed;
            }
        }

        // Minimum apparent separation among detections, and whose it is
        let mut smin: Option<Length> = None;
        let mut smin_planet: Option<usize> = None;
        for (&p, &s) in plan_inds.iter().zip(&status) {
            if s == DetectionStatus::Detected {
                let sep = self.universe.planets[p].separation;
                if smin.is_none_or(|best| sep < best) {
                    smin = Some(sep);
                    smin_planet = Some(p);
                }
            }
        }
        if smin_planet.is_some() {
            let detected: Vec<usize> = plan_inds
                .iter()
                .zip(&status)
                .filter(|(_, &s)| s == DetectionStatus::Detected)
                .map(|(&p, _)| p)
                .collect();
            log::info!("detected planet(s) {detected:?} of target {star_ind}");
        }

        // Record the snapshot the characterization step works from
        let sightings: Vec<PlanetSighting> = plan_inds
            .iter()
            .zip(&status)
            .map(|(&p, &s)| {
                let planet = &self.universe.planets[p];
                PlanetSighting {
                    detected: s == DetectionStatus::Detected,
                    f_ez: planet.f_ez,
                    d_mag: planet.d_mag,
                    wa: planet.wa,
                }
            })
            .collect();

        let fa_sighting = if false_alarm {
            let sighting = self.synthesize_false_alarm(star_ind, mode);
            // The false positive competes in the minimum-separation record
            let star_distance = self.universe.catalog.star(star_ind).distance;
            let s_fa = Length::from_au(sighting.wa.tan() * star_distance.to_au());
            if smin.is_none_or(|best| s_fa < best) {
                smin = Some(s_fa);
            }
            log::info!(
                "false alarm at target {star_ind} with WA {:.1} mas and dMag {:.2}",
                sighting.wa.to_mas(),
                sighting.d_mag
            );
            Some(sighting)
        } else {
            None
        };

        self.ledger.set_snapshot(
            star_ind,
            DetectionSnapshot {
                planets: sightings,
                false_alarm: fa_sighting,
            },
        );

        self.schedule_revisit(star_ind, smin, smin_planet);

        DetectionResult {
            status,
            snr,
            false_alarm,
        }
    }

    /// Draw the working angle and delta magnitude of a false positive.
    ///
    /// The working angle is uniform between the inner working angle and the
    /// smaller of the outer working angle and the angle subtended by the
    /// population's maximum semi-major axis; the delta magnitude is uniform
    /// between the false-alarm contrast floor and the mode's limiting
    /// magnitude.
    fn synthesize_false_alarm(&mut self, star_ind: usize, mode: &ObservingMode) -> FalseAlarmSighting {
        let star_distance = self.universe.catalog.star(star_ind).distance;
        let wa_pop = Angle::from_radians(
            (self.universe.sma_max.to_au() / star_distance.to_au()).atan(),
        );
        let wa_max = mode.owa.min(wa_pop);

        let u: f64 = self.rng.random();
        let wa = mode.iwa + (wa_max - mode.iwa) * u;

        let d_mag_min = -2.5 * self.detection.max_fa_flux_ratio(wa).log10();
        let u: f64 = self.rng.random();
        let d_mag = d_mag_min + (mode.d_mag_limit - d_mag_min) * u;

        FalseAlarmSighting {
            f_ez: self.zodi.exozodi_floor(),
            d_mag,
            wa,
        }
    }

    /// Schedule the next look at `star_ind`.
    ///
    /// After any detection (or false alarm) the revisit lands half an
    /// orbital period of the minimum-separation detection away; otherwise
    /// three quarters of the period implied by the population means.
    fn schedule_revisit(&mut self, star_ind: usize, smin: Option<Length>, smin_planet: Option<usize>) {
        let star_mass = self.universe.catalog.star(star_ind).mass;
        let now = self.clock.current_time_norm();

        let t_rev = match smin {
            Some(sp) => {
                // A false-alarm-only visit has no planet to take a mass
                // from; fall back to the population mean
                let mp = smin_planet
                    .map(|p| self.universe.planets[p].mass)
                    .unwrap_or_else(|| self.universe.mean_planet_mass());
                now + kepler_period(sp, mp + star_mass) / 2.0
            }
            None => {
                let sp = self.universe.mean_separation();
                let mp = self.universe.mean_planet_mass();
                now + kepler_period(sp, mp + star_mass) * 0.75
            }
        };

        self.revisits.push(star_ind, t_rev);
    }

    /// Attempt to characterize the planets detected in the latest snapshot
    /// of `star_ind` that still lack a full spectrum.
    pub fn observation_characterization(
        &mut self,
        star_ind: usize,
        mode: &ObservingMode,
    ) -> CharacterizationResult {
        let plan_inds = self.universe.planets_of(star_ind);

        let Some(snapshot) = self.ledger.snapshot(star_ind).cloned() else {
            return CharacterizationResult {
                status: vec![CharacterizationStatus::NotCharacterized; plan_inds.len()],
                fa_status: None,
                snr: Vec::new(),
                t_char: Time::zero(),
            };
        };

        let nothing = CharacterizationResult {
            status: vec![CharacterizationStatus::NotCharacterized; plan_inds.len()],
            fa_status: snapshot
                .false_alarm
                .map(|_| CharacterizationStatus::NotCharacterized),
            snr: Vec::new(),
            t_char: Time::zero(),
        };

        // Worklist: detected planets without a full spectrum yet; a false
        // alarm is always a candidate
        let mut candidates: Vec<CharCandidate> = snapshot
            .planets
            .iter()
            .enumerate()
            .filter(|(slot, sighting)| {
                sighting.detected && self.ledger.full_spectra(plan_inds[*slot]) == 0
            })
            .map(|(slot, sighting)| CharCandidate {
                slot: Some(slot),
                d_mag: sighting.d_mag,
                wa: sighting.wa,
                f_ez: sighting.f_ez,
                t_char: Time::zero(),
            })
            .collect();
        if let Some(fa) = snapshot.false_alarm {
            candidates.push(CharCandidate {
                slot: None,
                d_mag: fa.d_mag,
                wa: fa.wa,
                f_ez: fa.f_ez,
                t_char: Time::zero(),
            });
        }
        if candidates.is_empty() {
            return nothing;
        }

        // Characterization needs the target visible now
        let t_abs = self.clock.current_time_abs();
        if !self.keepout_ok(star_ind, t_abs) {
            return nothing;
        }

        self.universe
            .propagate_system(star_ind, self.clock.current_time_norm());

        let star = self.universe.catalog.star(star_ind).clone();
        let r_sc = self.geometry.orbit(t_abs);
        let f_z = self.zodi.local_zodi(&star, r_sc);
        let f_ez0 = self.zodi.exozodi_floor();

        // Integration-time window and end keepout, per candidate, exactly
        // as in target selection
        let mut survivors = Vec::new();
        for mut candidate in candidates {
            let Some(t) =
                self.optics
                    .integration_time(&star, f_z, f_ez0, candidate.d_mag, candidate.wa, mode)
            else {
                continue;
            };
            let t_tot = t * mode.time_multiplier;
            if !(t_tot.is_positive() && t_tot < mode.int_cutoff) {
                continue;
            }
            if !self.keepout_ok(star_ind, t_abs + t_tot) {
                continue;
            }
            candidate.t_char = t;
            survivors.push(candidate);
        }
        if survivors.is_empty() {
            return nothing;
        }

        // All survivors are characterized together for the longest
        // requested time
        let t_char = survivors
            .iter()
            .map(|c| c.t_char)
            .fold(Time::zero(), |a, b| if b > a { b } else { a });

        let real_pinds: Vec<usize> = survivors
            .iter()
            .filter_map(|c| c.slot.map(|slot| plan_inds[slot]))
            .collect();
        log::info!("characterizing planet(s) {real_pinds:?} of target {star_ind}");

        // Sub-sampled integration over the shared duration; this also
        // charges the observation time even when only the false alarm
        // survived
        let dt = t_char / self.config.nt_flux as f64;
        let mut signal = vec![0.0; real_pinds.len()];
        let mut noise = vec![0.0; real_pinds.len()];
        for _ in 0..self.config.nt_flux {
            let (s, n) = self.calc_signal_noise(star_ind, &real_pinds, dt, mode);
            for i in 0..real_pinds.len() {
                signal[i] += s[i];
                noise[i] += n[i];
            }
        }
        let t_extra = t_char * (mode.time_multiplier - 1.0);
        if t_extra.is_positive() {
            self.clock.allocate_time(t_extra, true);
        }

        let mut snrs: Vec<f64> = signal
            .iter()
            .zip(&noise)
            .map(|(&s, &n)| if n > 0.0 { s / n } else { 0.0 })
            .collect();

        // The false alarm is not a body in the universe; its SNR comes
        // straight from the stored snapshot values and the count rates
        if let Some(fa) = survivors.iter().find(|c| c.slot.is_none()) {
            let rates = self
                .optics
                .photon_counts(&star, f_z, fa.f_ez, fa.d_mag, fa.wa, mode);
            let t_d = t_char.to_days();
            let noise_fa = (rates.background * t_d + (rates.speckle * t_d).powi(2)).sqrt();
            snrs.push(if noise_fa > 0.0 {
                rates.planet * t_d / noise_fa
            } else {
                0.0
            });
        }

        // Outcomes: full spectrum inside the bandwidth-adjusted margins,
        // partial otherwise, nothing below the SNR threshold
        let mut status = vec![CharacterizationStatus::NotCharacterized; plan_inds.len()];
        let mut fa_status = snapshot
            .false_alarm
            .map(|_| CharacterizationStatus::NotCharacterized);
        for (candidate, &snr) in survivors.iter().zip(&snrs) {
            if snr <= mode.snr {
                continue;
            }
            let outcome = if candidate.wa > mode.char_inner_margin()
                && candidate.wa < mode.char_outer_margin()
            {
                CharacterizationStatus::FullSpectrum
            } else {
                CharacterizationStatus::PartialSpectrum
            };
            match candidate.slot {
                Some(slot) => {
                    status[slot] = outcome;
                    match outcome {
                        CharacterizationStatus::FullSpectrum => {
                            self.ledger.add_full_spectrum(plan_inds[slot]);
                        }
                        CharacterizationStatus::PartialSpectrum => {
                            self.ledger.add_partial_spectrum(plan_inds[slot]);
                        }
                        CharacterizationStatus::NotCharacterized => {}
                    }
                }
                None => fa_status = Some(outcome),
            }
        }

        CharacterizationResult {
            status,
            fa_status,
            snr: snrs,
            t_char,
        }
    }

    /// Integrate signal and noise counts for the given planets over one
    /// sub-interval `dt`.
    ///
    /// The clock advances by `dt` in two half-steps around the snapshot of
    /// the time-varying brightness, so consecutive sub-intervals see the
    /// universe move. With no planets this still advances the clock and
    /// returns empty vectors.
    pub fn calc_signal_noise(
        &mut self,
        star_ind: usize,
        plan_inds: &[usize],
        dt: Time,
        mode: &ObservingMode,
    ) -> (Vec<f64>, Vec<f64>) {
        self.clock.allocate_time(dt / 2.0, true);
        self.universe
            .propagate_system(star_ind, self.clock.current_time_norm());

        let star = self.universe.catalog.star(star_ind);
        let r_sc = self.geometry.orbit(self.clock.current_time_abs());
        let f_z = self.zodi.local_zodi(star, r_sc);

        let dt_days = dt.to_days();
        let mut signal = Vec::with_capacity(plan_inds.len());
        let mut noise = Vec::with_capacity(plan_inds.len());
        for &p in plan_inds {
            let planet = &self.universe.planets[p];
            let rates = self
                .optics
                .photon_counts(star, f_z, planet.f_ez, planet.d_mag, planet.wa, mode);
            signal.push(rates.planet * dt_days);
            noise.push((rates.background * dt_days + (rates.speckle * dt_days).powi(2)).sqrt());
        }

        self.clock.allocate_time(dt / 2.0, true);
        (signal, noise)
    }
}

/// Keplerian orbital period of a body at separation `sp` around total mass
/// `total_mass`: `T = 2π·sqrt(sp³/μ)` with `μ = G·M`.
///
/// Degenerate inputs (zero separation or mass) yield a zero period rather
/// than a numeric error.
fn kepler_period(sp: Length, total_mass: Mass) -> Time {
    let mu = GRAV * total_mass.to_kg();
    let sp_m = sp.to_meters();
    if mu <= 0.0 || sp_m <= 0.0 {
        return Time::zero();
    }
    Time::from_seconds(2.0 * std::f64::consts::PI * (sp_m.powi(3) / mu).sqrt())
}
