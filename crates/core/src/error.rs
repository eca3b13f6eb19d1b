//! Model invariant violations.

use crate::id::ExperimentId;
use crate::progress::ExperimentStatus;

/// An invariant of [`crate::ProgressState`] that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Wrong number of experiment slots
    #[error("expected {expected} experiment slots, found {found}")]
    SlotCount {
        /// Required slot count
        expected: usize,
        /// Slots present
        found: usize,
    },

    /// A slot sits at the wrong position (duplicate or gap)
    #[error("slot at position {position} has id {found}")]
    SlotId {
        /// Zero-based position in the list
        position: usize,
        /// Id found at that position
        found: ExperimentId,
    },

    /// More completed days than an experiment has
    #[error("experiment {id} has {days} completed days")]
    TooManyDays {
        /// Offending slot
        id: ExperimentId,
        /// Number of recorded days
        days: usize,
    },

    /// Days not strictly ascending (unsorted or duplicated)
    #[error("experiment {id} has unsorted or duplicate days {days:?}")]
    UnsortedDays {
        /// Offending slot
        id: ExperimentId,
        /// Recorded days
        days: Vec<u32>,
    },

    /// All three days recorded but the slot is not completed
    #[error("experiment {id} has every day recorded but is {status:?}")]
    NotCompleted {
        /// Offending slot
        id: ExperimentId,
        /// Its status
        status: ExperimentStatus,
    },

    /// Started or completed slot without a start time
    #[error("experiment {id} is {status:?} but has no start time")]
    MissingStartedAt {
        /// Offending slot
        id: ExperimentId,
        /// Its status
        status: ExperimentStatus,
    },

    /// Completed slot without a completion time
    #[error("experiment {id} is completed but has no completion time")]
    MissingCompletedAt {
        /// Offending slot
        id: ExperimentId,
    },

    /// Cached completion counter disagrees with slot statuses
    #[error("total completed is {cached} but {actual} slots are completed")]
    CompletedCountDrift {
        /// Stored counter
        cached: u32,
        /// Recount from slots
        actual: u32,
    },

    /// Reward flag disagrees with the completion counter
    #[error("reward unlocked is {unlocked} with {total_completed} experiments completed")]
    RewardMismatch {
        /// Stored flag
        unlocked: bool,
        /// Stored counter
        total_completed: u32,
    },
}

impl ModelError {
    /// Whether the violation concerns the slot list layout itself rather
    /// than the contents of a slot.
    pub fn is_structural(&self) -> bool {
        matches!(self, ModelError::SlotCount { .. } | ModelError::SlotId { .. })
    }
}
