//! Target selection: the filter-and-rank pipeline.

use observatory::{angular_separation, ObservingMode};
use rand::Rng;
use units::Time;

use crate::sim::SurveySimulation;

/// The selector's answer: which star to observe next, for how long, and how
/// long the occulter slews to get there (zero without an occulter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSelection {
    pub star_ind: usize,
    pub t_det: Time,
    pub slew_time: Time,
}

/// A star surviving the selection pipeline so far.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    star_ind: usize,
    slew_time: Time,
    /// Absolute time the observation of this candidate would start
    start_abs: Time,
    /// Detection integration time, filled by the integration-time stage
    t_det: Time,
}

impl<'a> SurveySimulation<'a> {
    /// Find the next target star and its integration time.
    ///
    /// The candidate set narrows through keepout at start time, the
    /// integration-time window, keepout at end time, and visit recency
    /// (least-visited targets plus due revisits), then the survivor with
    /// the highest completeness wins, ties broken by the seeded random
    /// source. When nothing survives, the retry interval is charged and the
    /// pipeline runs again; the loop is bounded by the mission clock.
    ///
    /// Returns `None` once the mission is over.
    pub fn next_target(
        &mut self,
        old_sind: Option<usize>,
        mode: &ObservingMode,
    ) -> Option<TargetSelection> {
        // Settling + mode overhead for the upcoming observation. When the
        // charge does not fit (block boundary, budget), wait out the retry
        // interval or jump to the next block; the clock always makes
        // progress, so this cannot spin once time is exhausted.
        while !self
            .clock
            .allocate_time(self.config.settling_time + mode.overhead, true)
        {
            if self.clock.mission_is_over() {
                log::info!("mission complete: no more time available");
                return None;
            }
            if !self.clock.allocate_time(self.config.dt_alloc, false) {
                self.clock.advance_to_next_observing_block();
            }
        }

        loop {
            if self.clock.mission_is_over() {
                log::info!("mission complete: no more time available");
                return None;
            }

            let candidates = self.initial_candidates(old_sind);
            let candidates = self.filter_start_keepout(candidates);
            let candidates = self.filter_integration_time(candidates, mode);
            let candidates = self.filter_end_keepout(candidates);
            let candidates = self.filter_visit_recency(candidates);

            if !candidates.is_empty() {
                let chosen = self.rank_and_choose(candidates);
                self.ledger.record_visit(chosen.star_ind);

                // With an occulter, the slew itself consumes mission time
                if self.occulter.is_some() && chosen.slew_time.is_positive() {
                    self.clock.allocate_time(chosen.slew_time, false);
                    if self.clock.mission_is_over() {
                        log::info!("mission complete: no more time available");
                        return None;
                    }
                }

                return Some(TargetSelection {
                    star_ind: chosen.star_ind,
                    t_det: chosen.t_det,
                    slew_time: chosen.slew_time,
                });
            }

            // No observable target: wait out the retry interval, or jump to
            // the next observing block when the current one cannot fit it
            if !self.clock.allocate_time(self.config.dt_alloc, false) {
                self.clock.advance_to_next_observing_block();
            }
        }
    }

    /// Every catalog star, with its slew time and start time.
    ///
    /// Slew times apply only to occulter missions and are zero for the
    /// first selection of a mission (no previous pointing).
    fn initial_candidates(&self, old_sind: Option<usize>) -> Vec<Candidate> {
        let now_abs = self.clock.current_time_abs();
        let n = self.universe.catalog.len();

        let slew_times: Vec<Time> = match (&self.occulter, old_sind) {
            (Some(ledger), Some(old)) => {
                let u_old = self
                    .geometry
                    .star_direction(self.universe.catalog.star(old), now_abs);
                (0..n)
                    .map(|i| {
                        let u_new = self
                            .geometry
                            .star_direction(self.universe.catalog.star(i), now_abs);
                        ledger.slew_time(angular_separation(&u_old, &u_new))
                    })
                    .collect()
            }
            _ => vec![Time::zero(); n],
        };

        (0..n)
            .map(|i| Candidate {
                star_ind: i,
                slew_time: slew_times[i],
                start_abs: now_abs + slew_times[i],
                t_det: Time::zero(),
            })
            .collect()
    }

    /// Drop candidates violating keepout at their own start time.
    fn filter_start_keepout(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|c| self.keepout_ok(c.star_ind, c.start_abs))
            .collect()
    }

    /// Fill in integration times and keep candidates whose total
    /// observation time lies strictly within `(0, int_cutoff)`.
    fn filter_integration_time(
        &self,
        candidates: Vec<Candidate>,
        mode: &ObservingMode,
    ) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter_map(|mut c| {
                let star = self.universe.catalog.star(c.star_ind);
                let r_sc = self.geometry.orbit(c.start_abs);
                let f_z = self.zodi.local_zodi(star, r_sc);
                let t_det =
                    self.optics
                        .max_integration_time(star, f_z, self.zodi.exozodi_floor(), mode)?;
                let t_tot = t_det * mode.time_multiplier;
                if t_tot.is_positive() && t_tot < mode.int_cutoff {
                    c.t_det = t_det;
                    Some(c)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Drop candidates violating keepout at the end of their integration.
    fn filter_end_keepout(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|c| self.keepout_ok(c.star_ind, c.start_abs + c.t_det))
            .collect()
    }

    /// Keep the least-visited candidates, plus any candidate with a queued
    /// revisit within one week of now.
    fn filter_visit_recency(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.is_empty() {
            return candidates;
        }
        let star_inds: Vec<usize> = candidates.iter().map(|c| c.star_ind).collect();
        let min_visits = self.ledger.min_visits(&star_inds);
        let due = self
            .revisits
            .due_within(self.clock.current_time_norm(), Time::from_weeks(1.0));

        candidates
            .into_iter()
            .filter(|c| self.ledger.visits(c.star_ind) == min_visits || due.contains(&c.star_ind))
            .collect()
    }

    /// Rank survivors by completeness and pick uniformly among the ties at
    /// the maximum.
    ///
    /// Unvisited targets rank by their baseline completeness; visited ones
    /// get the time-updated value from the completeness model.
    fn rank_and_choose(&mut self, candidates: Vec<Candidate>) -> Candidate {
        let t_norm = self.clock.current_time_norm();

        let mut comps: Vec<f64> = candidates
            .iter()
            .map(|c| self.universe.catalog.star(c.star_ind).comp0)
            .collect();

        let visited: Vec<usize> = candidates
            .iter()
            .map(|c| c.star_ind)
            .filter(|&ind| self.ledger.visits(ind) > 0)
            .collect();
        if !visited.is_empty() {
            let updated = self
                .completeness
                .update(&self.universe.catalog, &visited, t_norm);
            let mut by_star = vec![None; self.universe.catalog.len()];
            for (&ind, comp) in visited.iter().zip(updated) {
                by_star[ind] = Some(comp);
            }
            for (comp, c) in comps.iter_mut().zip(&candidates) {
                if let Some(updated) = by_star[c.star_ind] {
                    *comp = updated;
                }
            }
        }

        let max = comps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = comps
            .iter()
            .enumerate()
            .filter(|(_, &comp)| comp == max)
            .map(|(i, _)| i)
            .collect();
        let pick = tied[self.rng.random_range(0..tied.len())];
        candidates[pick]
    }

    /// Keepout check for a single star at a single time.
    pub(crate) fn keepout_ok(&self, star_ind: usize, t_abs: Time) -> bool {
        let r_sc = self.geometry.orbit(t_abs);
        self.geometry.keepout(
            &self.universe.catalog,
            &[star_ind],
            t_abs,
            r_sc,
            self.config.keepout_angle,
        )[0]
    }
}
