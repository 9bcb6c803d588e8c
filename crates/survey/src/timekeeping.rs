//! Mission clock: elapsed time, budgets, and observing blocks.

use serde::{Deserialize, Serialize};
use units::Time;

use crate::error::SurveyError;

/// One scheduling window within the mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservingBlock {
    /// Window start, elapsed mission time
    pub start: Time,
    /// Window end, elapsed mission time
    pub end: Time,
}

/// The mission clock.
///
/// Tracks absolute calendar time, elapsed time since mission start, and the
/// cumulative time charged against the exoplanet observation sub-budget.
/// Scheduling may only occur inside the ordered observing-block windows;
/// `current_time_norm` always lies within the current block, or the mission
/// is over.
///
/// All three time fields move together through [`MissionClock::allocate_time`]
/// and [`MissionClock::advance_to_next_observing_block`]; nothing else
/// mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionClock {
    mission_start: Time,
    current_time_abs: Time,
    current_time_norm: Time,
    exoplanet_obs_time: Time,
    mission_life: Time,
    mission_portion: f64,
    blocks: Vec<ObservingBlock>,
    ob_number: usize,
}

impl MissionClock {
    /// Create a clock over an explicit observing-block schedule.
    ///
    /// The schedule must be non-empty, ordered, non-overlapping, and each
    /// block must have `start < end`; anything else is a fatal setup error.
    pub fn new(
        mission_start: Time,
        mission_life: Time,
        mission_portion: f64,
        blocks: Vec<ObservingBlock>,
    ) -> Result<Self, SurveyError> {
        if blocks.is_empty() {
            return Err(SurveyError::Config(
                "observing-block schedule is empty".into(),
            ));
        }
        for (i, block) in blocks.iter().enumerate() {
            if block.end <= block.start {
                return Err(SurveyError::Config(format!(
                    "observing block {i} has end {:.3} d <= start {:.3} d",
                    block.end.to_days(),
                    block.start.to_days()
                )));
            }
            if i > 0 && block.start < blocks[i - 1].end {
                return Err(SurveyError::Config(format!(
                    "observing block {i} overlaps block {}",
                    i - 1
                )));
            }
        }

        let first_start = blocks[0].start;
        Ok(Self {
            mission_start,
            current_time_abs: mission_start + first_start,
            current_time_norm: first_start,
            exoplanet_obs_time: Time::zero(),
            mission_life,
            mission_portion,
            blocks,
            ob_number: 0,
        })
    }

    /// Auto-generate contiguous observing blocks of `duration` separated by
    /// idle gaps, so that total observing time across the mission equals
    /// `mission_life * mission_portion`: block starts are spaced
    /// `duration / mission_portion` apart.
    pub fn auto_blocks(
        mission_life: Time,
        mission_portion: f64,
        duration: Option<Time>,
    ) -> Vec<ObservingBlock> {
        match duration {
            None => vec![ObservingBlock {
                start: Time::zero(),
                end: mission_life,
            }],
            Some(duration) => {
                let n_blocks = ((mission_life.to_days() * mission_portion)
                    / duration.to_days())
                .floor()
                .max(1.0) as usize;
                let spacing = duration.to_days() / mission_portion;
                (0..n_blocks)
                    .map(|i| {
                        let start = Time::from_days(i as f64 * spacing);
                        ObservingBlock {
                            start,
                            end: start + duration,
                        }
                    })
                    .collect()
            }
        }
    }

    /// Absolute calendar time.
    pub fn current_time_abs(&self) -> Time {
        self.current_time_abs
    }

    /// Elapsed time since mission start.
    pub fn current_time_norm(&self) -> Time {
        self.current_time_norm
    }

    /// Cumulative time charged against the observation sub-budget.
    pub fn exoplanet_obs_time(&self) -> Time {
        self.exoplanet_obs_time
    }

    /// Ceiling on elapsed mission time.
    pub fn mission_life(&self) -> Time {
        self.mission_life
    }

    /// Total observation sub-budget: `mission_life * mission_portion`.
    pub fn obs_budget(&self) -> Time {
        self.mission_life * self.mission_portion
    }

    /// Index of the current observing block.
    pub fn ob_number(&self) -> usize {
        self.ob_number
    }

    /// The current observing block.
    pub fn current_block(&self) -> ObservingBlock {
        self.blocks[self.ob_number]
    }

    /// Advance the clock by `dt`, charging the observation sub-budget when
    /// `charge_obs_budget` is set.
    ///
    /// All-or-nothing: returns false and leaves every field untouched when
    /// `dt` is not strictly positive, would push elapsed time past the
    /// mission life or the current observing block's end, or (charged only)
    /// would exceed the observation sub-budget.
    pub fn allocate_time(&mut self, dt: Time, charge_obs_budget: bool) -> bool {
        if !dt.is_positive() || !dt.is_finite() {
            return false;
        }
        let new_norm = self.current_time_norm + dt;
        if new_norm > self.mission_life {
            return false;
        }
        if new_norm > self.blocks[self.ob_number].end {
            return false;
        }
        if charge_obs_budget && self.exoplanet_obs_time + dt > self.obs_budget() {
            return false;
        }

        self.current_time_abs = self.current_time_abs + dt;
        self.current_time_norm = new_norm;
        if charge_obs_budget {
            self.exoplanet_obs_time = self.exoplanet_obs_time + dt;
        }
        true
    }

    /// True when no further scheduling is possible: the observation
    /// sub-budget is spent, the mission life is exceeded, or the current
    /// observing block is exhausted with no further block.
    pub fn mission_is_over(&self) -> bool {
        self.exoplanet_obs_time >= self.obs_budget()
            || self.current_time_norm >= self.mission_life
            || (self.current_time_norm >= self.blocks[self.ob_number].end
                && self.ob_number + 1 >= self.blocks.len())
    }

    /// Jump to the start of the next observing block.
    ///
    /// With no further block, the clock is parked at the end of the current
    /// block (so that [`MissionClock::mission_is_over`] reads true) and
    /// false is returned.
    pub fn advance_to_next_observing_block(&mut self) -> bool {
        if self.ob_number + 1 >= self.blocks.len() {
            let end = self.blocks[self.ob_number].end;
            if self.current_time_norm < end {
                let dt = end - self.current_time_norm;
                self.current_time_abs = self.current_time_abs + dt;
                self.current_time_norm = end;
            }
            return false;
        }

        self.ob_number += 1;
        let start = self.blocks[self.ob_number].start;
        let dt = start - self.current_time_norm;
        self.current_time_abs = self.current_time_abs + dt;
        self.current_time_norm = start;
        true
    }
}
