//! Progress model - per-experiment slots and the profile-wide state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::id::ExperimentId;
use crate::Time;

/// Number of experiments in the programme.
pub const EXPERIMENT_COUNT: usize = 9;

/// Number of days in each experiment.
pub const DAYS_PER_EXPERIMENT: usize = 3;

/// Lifecycle status of an experiment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    /// Not reachable yet
    Locked,
    /// Can be started
    Available,
    /// At least started
    InProgress,
    /// All three days done
    Completed,
}

impl ExperimentStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentStatus::Locked => "locked",
            ExperimentStatus::Available => "available",
            ExperimentStatus::InProgress => "in_progress",
            ExperimentStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable progress record for one experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSlot {
    /// Catalog id
    pub experiment_id: ExperimentId,

    /// Current status
    pub status: ExperimentStatus,

    /// Days marked done, unique and ascending
    pub completed_days: Vec<u32>,

    /// When the experiment was started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Time>,

    /// When the third day was completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Time>,

    /// Free-text notes keyed by day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<BTreeMap<u32, String>>,
}

impl ExperimentSlot {
    /// A fresh slot with no recorded activity.
    pub fn new(experiment_id: ExperimentId, status: ExperimentStatus) -> Self {
        Self {
            experiment_id,
            status,
            completed_days: Vec::new(),
            started_at: None,
            completed_at: None,
            notes: None,
        }
    }

    /// Whether `day` has been marked done.
    pub fn has_completed_day(&self, day: u32) -> bool {
        self.completed_days.contains(&day)
    }

    /// Record `day` as done, keeping the list unique and sorted.
    ///
    /// Returns `false` if the day was already present. Does not assume the
    /// list was sorted beforehand.
    pub fn insert_day(&mut self, day: u32) -> bool {
        if self.completed_days.contains(&day) {
            return false;
        }
        self.completed_days.push(day);
        self.completed_days.sort_unstable();
        true
    }

    /// Sort and deduplicate `completed_days`. Returns `true` if the list
    /// changed.
    pub fn normalize_days(&mut self) -> bool {
        let before = self.completed_days.clone();
        self.completed_days.sort_unstable();
        self.completed_days.dedup();
        self.completed_days != before
    }

    /// Whether `completed_days` is strictly ascending.
    pub fn days_normalized(&self) -> bool {
        self.completed_days.windows(2).all(|w| w[0] < w[1])
    }

    /// Note recorded for `day`, if any.
    pub fn note(&self, day: u32) -> Option<&str> {
        self.notes.as_ref()?.get(&day).map(String::as_str)
    }

    /// Fraction of the three days completed, in `0.0..=1.0` for valid data.
    pub fn progress_fraction(&self) -> f64 {
        self.completed_days.len() as f64 / DAYS_PER_EXPERIMENT as f64
    }

    /// The next day to work on, if any remain.
    pub fn next_day(&self) -> Option<u32> {
        (1..=DAYS_PER_EXPERIMENT as u32).find(|d| !self.has_completed_day(*d))
    }
}

/// Progress for the whole programme, persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Slots in id order, index == id - 1
    pub experiments: Vec<ExperimentSlot>,

    /// Cached count of completed slots
    pub total_completed: u32,

    /// Stored but not maintained by any transition
    pub current_streak: u32,

    /// True once every experiment is completed
    pub reward_unlocked: bool,
}

impl ProgressState {
    /// Default state: experiment 1 available, the rest locked.
    pub fn initial() -> Self {
        let experiments = (1..=EXPERIMENT_COUNT as u32)
            .map(|raw| {
                let status = if raw == 1 {
                    ExperimentStatus::Available
                } else {
                    ExperimentStatus::Locked
                };
                ExperimentSlot::new(ExperimentId::new(raw), status)
            })
            .collect();

        Self {
            experiments,
            total_completed: 0,
            current_streak: 0,
            reward_unlocked: false,
        }
    }

    /// Slot for `id`.
    pub fn slot(&self, id: ExperimentId) -> Option<&ExperimentSlot> {
        self.experiments.iter().find(|s| s.experiment_id == id)
    }

    /// Mutable slot for `id`.
    pub fn slot_mut(&mut self, id: ExperimentId) -> Option<&mut ExperimentSlot> {
        self.experiments.iter_mut().find(|s| s.experiment_id == id)
    }

    /// Recount completed slots from their statuses.
    pub fn count_completed(&self) -> u32 {
        self.experiments
            .iter()
            .filter(|s| s.status == ExperimentStatus::Completed)
            .count() as u32
    }

    /// Refresh the cached counter and reward flag from the slots.
    pub fn sync_derived(&mut self) {
        self.total_completed = self.count_completed();
        self.reward_unlocked = self.total_completed as usize == EXPERIMENT_COUNT;
    }

    /// Completed share of the programme, rounded to a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        (f64::from(self.total_completed) / EXPERIMENT_COUNT as f64 * 100.0).round() as u32
    }

    /// Ids of completed experiments, ascending.
    pub fn completed_ids(&self) -> Vec<ExperimentId> {
        self.experiments
            .iter()
            .filter(|s| s.status == ExperimentStatus::Completed)
            .map(|s| s.experiment_id)
            .collect()
    }

    /// Check the slot layout only: exactly nine slots with ids 1..=9 in order.
    pub fn validate_layout(&self) -> Result<(), ModelError> {
        if self.experiments.len() != EXPERIMENT_COUNT {
            return Err(ModelError::SlotCount {
                expected: EXPERIMENT_COUNT,
                found: self.experiments.len(),
            });
        }
        for (position, slot) in self.experiments.iter().enumerate() {
            if slot.experiment_id.index() != Some(position) {
                return Err(ModelError::SlotId {
                    position,
                    found: slot.experiment_id,
                });
            }
        }
        Ok(())
    }

    /// Sort and deduplicate every slot's days. Returns `true` if any slot
    /// changed.
    pub fn normalize_days(&mut self) -> bool {
        self.experiments
            .iter_mut()
            .fold(false, |changed, slot| slot.normalize_days() || changed)
    }

    /// Check that the cached counter and reward flag match the slots.
    pub fn validate_counters(&self) -> Result<(), ModelError> {
        let actual = self.count_completed();
        if self.total_completed != actual {
            return Err(ModelError::CompletedCountDrift {
                cached: self.total_completed,
                actual,
            });
        }
        if self.reward_unlocked != (self.total_completed as usize == EXPERIMENT_COUNT) {
            return Err(ModelError::RewardMismatch {
                unlocked: self.reward_unlocked,
                total_completed: self.total_completed,
            });
        }
        Ok(())
    }

    /// Check every invariant, returning the first violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_layout()?;

        for slot in &self.experiments {
            let id = slot.experiment_id;
            if slot.completed_days.len() > DAYS_PER_EXPERIMENT {
                return Err(ModelError::TooManyDays {
                    id,
                    days: slot.completed_days.len(),
                });
            }
            if !slot.days_normalized() {
                return Err(ModelError::UnsortedDays {
                    id,
                    days: slot.completed_days.clone(),
                });
            }
            if slot.completed_days.len() == DAYS_PER_EXPERIMENT
                && slot.status != ExperimentStatus::Completed
            {
                return Err(ModelError::NotCompleted {
                    id,
                    status: slot.status,
                });
            }
            match slot.status {
                ExperimentStatus::InProgress | ExperimentStatus::Completed
                    if slot.started_at.is_none() =>
                {
                    return Err(ModelError::MissingStartedAt {
                        id,
                        status: slot.status,
                    });
                }
                _ => {}
            }
            if slot.status == ExperimentStatus::Completed && slot.completed_at.is_none() {
                return Err(ModelError::MissingCompletedAt { id });
            }
        }

        self.validate_counters()
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::initial()
    }
}
