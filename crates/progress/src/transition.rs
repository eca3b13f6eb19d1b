//! Pure progress transitions.
//!
//! Each function mutates a [`ProgressState`] in place and reports what it
//! did. None of them touch storage or read the clock; the store supplies
//! `now` and persists the result. Derived fields (`total_completed`,
//! `reward_unlocked`) are left to [`ProgressState::sync_derived`].

use ninex_core::{
    ExperimentId, ExperimentStatus, ProgressState, Time, DAYS_PER_EXPERIMENT,
};

use crate::config::DayPolicy;

/// Result of applying a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Slot moved from available to in progress
    Started,
    /// A day was recorded without finishing the experiment
    DayRecorded,
    /// The third day finished the experiment
    Completed {
        /// Next slot, if it was unlocked by this completion
        unlocked: Option<ExperimentId>,
    },
    /// Note stored
    NoteSaved,
    /// Valid request that changed nothing (e.g. repeated day)
    Unchanged,
    /// No slot has this id
    UnknownExperiment,
    /// Slot is not in a status the operation accepts
    NotAvailable(ExperimentStatus),
    /// Day rejected by the day policy
    DayOutOfRange(u32),
}

impl Transition {
    /// Whether the request was ignored rather than applied.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            Transition::UnknownExperiment
                | Transition::NotAvailable(_)
                | Transition::DayOutOfRange(_)
        )
    }
}

/// Begin an available experiment.
pub fn start_experiment(state: &mut ProgressState, id: ExperimentId, now: Time) -> Transition {
    let Some(slot) = state.slot_mut(id) else {
        return Transition::UnknownExperiment;
    };
    if slot.status != ExperimentStatus::Available {
        return Transition::NotAvailable(slot.status);
    }

    slot.status = ExperimentStatus::InProgress;
    slot.started_at.get_or_insert(now);
    Transition::Started
}

/// Mark `day` of experiment `id` as done.
///
/// The day is inserted first; if that brings the slot to three days it is
/// completed and the next slot unlocked. Otherwise an available slot is
/// moved to in progress.
pub fn complete_day(
    state: &mut ProgressState,
    id: ExperimentId,
    day: u32,
    now: Time,
    policy: DayPolicy,
) -> Transition {
    let Some(slot) = state.slot_mut(id) else {
        return Transition::UnknownExperiment;
    };
    if !policy.accepts(day) {
        return Transition::DayOutOfRange(day);
    }

    let inserted = slot.insert_day(day);

    if slot.completed_days.len() == DAYS_PER_EXPERIMENT
        && slot.status != ExperimentStatus::Completed
    {
        slot.status = ExperimentStatus::Completed;
        slot.completed_at = Some(now);
        // Keeps "completed implies started" for slots finished via lenient days
        slot.started_at.get_or_insert(now);

        let unlocked = id.next().and_then(|next_id| {
            let next = state.slot_mut(next_id)?;
            if next.status == ExperimentStatus::Locked {
                next.status = ExperimentStatus::Available;
                Some(next_id)
            } else {
                None
            }
        });
        return Transition::Completed { unlocked };
    }

    if slot.status == ExperimentStatus::Available {
        slot.status = ExperimentStatus::InProgress;
        slot.started_at.get_or_insert(now);
        return Transition::Started;
    }

    if inserted {
        Transition::DayRecorded
    } else {
        Transition::Unchanged
    }
}

/// Store a note for `day`, overwriting any previous note. Not gated by
/// status: notes may be left on locked and completed experiments alike.
pub fn add_note(
    state: &mut ProgressState,
    id: ExperimentId,
    day: u32,
    text: impl Into<String>,
) -> Transition {
    let Some(slot) = state.slot_mut(id) else {
        return Transition::UnknownExperiment;
    };
    slot.notes.get_or_insert_with(Default::default).insert(day, text.into());
    Transition::NoteSaved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn id(raw: u32) -> ExperimentId {
        ExperimentId::new(raw)
    }

    #[test]
    fn test_start_requires_available() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        assert_eq!(start_experiment(&mut state, id(1), now), Transition::Started);
        assert_eq!(
            start_experiment(&mut state, id(1), now),
            Transition::NotAvailable(ExperimentStatus::InProgress)
        );
        assert_eq!(
            start_experiment(&mut state, id(2), now),
            Transition::NotAvailable(ExperimentStatus::Locked)
        );
        assert_eq!(start_experiment(&mut state, id(10), now), Transition::UnknownExperiment);
        assert_eq!(state.slot(id(1)).unwrap().started_at, Some(now));
    }

    #[test]
    fn test_first_day_starts_available_slot() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        let t = complete_day(&mut state, id(1), 2, now, DayPolicy::Strict);

        assert_eq!(t, Transition::Started);
        let slot = state.slot(id(1)).unwrap();
        assert_eq!(slot.status, ExperimentStatus::InProgress);
        assert_eq!(slot.started_at, Some(now));
        assert_eq!(slot.completed_days, vec![2]);
    }

    #[test]
    fn test_third_day_completes_and_unlocks() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        complete_day(&mut state, id(1), 3, now, DayPolicy::Strict);
        assert_eq!(
            complete_day(&mut state, id(1), 1, now, DayPolicy::Strict),
            Transition::DayRecorded
        );
        let t = complete_day(&mut state, id(1), 2, now, DayPolicy::Strict);

        assert_eq!(t, Transition::Completed { unlocked: Some(id(2)) });
        assert_eq!(state.slot(id(1)).unwrap().completed_days, vec![1, 2, 3]);
        assert_eq!(state.slot(id(1)).unwrap().completed_at, Some(now));
        assert_eq!(state.slot(id(2)).unwrap().status, ExperimentStatus::Available);
        assert_eq!(state.slot(id(3)).unwrap().status, ExperimentStatus::Locked);
    }

    #[test]
    fn test_repeat_day_after_completion_is_unchanged() {
        let mut state = ProgressState::initial();
        let now = Utc::now();
        for d in 1..=3 {
            complete_day(&mut state, id(1), d, now, DayPolicy::Strict);
        }

        assert_eq!(
            complete_day(&mut state, id(1), 2, now, DayPolicy::Strict),
            Transition::Unchanged
        );
        assert_eq!(state.slot(id(1)).unwrap().completed_days, vec![1, 2, 3]);
    }

    #[test]
    fn test_last_slot_completion_unlocks_nothing() {
        let mut state = ProgressState::initial();
        let now = Utc::now();
        state.experiments[8].status = ExperimentStatus::Available;

        for d in 1..=2 {
            complete_day(&mut state, id(9), d, now, DayPolicy::Strict);
        }
        let t = complete_day(&mut state, id(9), 3, now, DayPolicy::Strict);

        assert_eq!(t, Transition::Completed { unlocked: None });
    }

    #[test]
    fn test_completion_does_not_relock_or_touch_unlocked_next() {
        let mut state = ProgressState::initial();
        let now = Utc::now();
        state.experiments[1].status = ExperimentStatus::InProgress;
        state.experiments[1].started_at = Some(now);

        for d in 1..=3 {
            complete_day(&mut state, id(1), d, now, DayPolicy::Strict);
        }

        assert_eq!(state.slot(id(2)).unwrap().status, ExperimentStatus::InProgress);
    }

    #[test]
    fn test_locked_slot_records_days_without_starting() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        let t = complete_day(&mut state, id(4), 1, now, DayPolicy::Strict);

        assert_eq!(t, Transition::DayRecorded);
        let slot = state.slot(id(4)).unwrap();
        assert_eq!(slot.status, ExperimentStatus::Locked);
        assert_eq!(slot.completed_days, vec![1]);
        assert!(slot.started_at.is_none());
    }

    #[test]
    fn test_strict_policy_ignores_out_of_range_days() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        assert_eq!(
            complete_day(&mut state, id(1), 0, now, DayPolicy::Strict),
            Transition::DayOutOfRange(0)
        );
        assert_eq!(
            complete_day(&mut state, id(1), 7, now, DayPolicy::Strict),
            Transition::DayOutOfRange(7)
        );
        assert_eq!(state, ProgressState::initial());
    }

    #[test]
    fn test_lenient_policy_completes_on_garbage_days() {
        let mut state = ProgressState::initial();
        let now = Utc::now();

        for d in [7, 8, 9] {
            complete_day(&mut state, id(1), d, now, DayPolicy::Lenient);
        }

        let slot = state.slot(id(1)).unwrap();
        assert_eq!(slot.status, ExperimentStatus::Completed);
        assert_eq!(slot.completed_days, vec![7, 8, 9]);
        assert_eq!(state.slot(id(2)).unwrap().status, ExperimentStatus::Available);
    }

    #[test]
    fn test_note_on_locked_slot() {
        let mut state = ProgressState::initial();

        assert_eq!(add_note(&mut state, id(5), 1, "text"), Transition::NoteSaved);
        assert_eq!(add_note(&mut state, id(5), 1, "rewritten"), Transition::NoteSaved);
        assert_eq!(add_note(&mut state, id(0), 1, "lost"), Transition::UnknownExperiment);

        let slot = state.slot(id(5)).unwrap();
        assert_eq!(slot.note(1), Some("rewritten"));
        assert_eq!(slot.status, ExperimentStatus::Locked);
    }

    #[test]
    fn test_is_ignored() {
        assert!(Transition::UnknownExperiment.is_ignored());
        assert!(Transition::DayOutOfRange(4).is_ignored());
        assert!(!Transition::Unchanged.is_ignored());
        assert!(!Transition::Completed { unlocked: None }.is_ignored());
    }
}
