//! Completion celebration.

use ninex_core::{catalog, ExperimentId, ExperimentStatus, ProgressState};

/// Summary shown when an experiment has just been completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    /// Experiment that was completed
    pub experiment_id: ExperimentId,
    /// Its catalog title
    pub title: String,
    /// Experiments completed so far
    pub total_completed: u32,
    /// Completion percentage after this experiment
    pub percentage: u32,
    /// Whether this completion unlocked the reward
    pub reward_unlocked: bool,
}

impl Celebration {
    /// A celebration if experiment `id` went from not completed in `before`
    /// to completed in `after`.
    pub fn detect(before: &ProgressState, after: &ProgressState, id: ExperimentId) -> Option<Self> {
        let was_completed = before
            .slot(id)
            .is_some_and(|s| s.status == ExperimentStatus::Completed);
        let now_completed = after
            .slot(id)
            .is_some_and(|s| s.status == ExperimentStatus::Completed);
        if was_completed || !now_completed {
            return None;
        }

        let title = catalog::experiment(id)
            .map(|e| e.title.to_string())
            .unwrap_or_else(|| format!("Experiment {}", id));

        Some(Self {
            experiment_id: id,
            title,
            total_completed: after.total_completed,
            percentage: after.completion_percentage(),
            reward_unlocked: after.reward_unlocked && !before.reward_unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition;
    use crate::config::DayPolicy;
    use chrono::Utc;

    #[test]
    fn test_detect_only_on_completing_transition() {
        let id = ExperimentId::new(1);
        let now = Utc::now();
        let mut state = ProgressState::initial();

        for d in 1..=2 {
            let before = state.clone();
            transition::complete_day(&mut state, id, d, now, DayPolicy::Strict);
            state.sync_derived();
            assert!(Celebration::detect(&before, &state, id).is_none());
        }

        let before = state.clone();
        transition::complete_day(&mut state, id, 3, now, DayPolicy::Strict);
        state.sync_derived();
        let c = Celebration::detect(&before, &state, id).unwrap();
        assert_eq!(c.title, "Mindful Breathing");
        assert_eq!(c.total_completed, 1);
        assert_eq!(c.percentage, 11);
        assert!(!c.reward_unlocked);

        let before = state.clone();
        transition::complete_day(&mut state, id, 3, now, DayPolicy::Strict);
        assert!(Celebration::detect(&before, &state, id).is_none());
    }

    #[test]
    fn test_detect_final_reward() {
        let now = Utc::now();
        let mut state = ProgressState::initial();
        for raw in 1..=8 {
            for d in 1..=3 {
                transition::complete_day(&mut state, ExperimentId::new(raw), d, now, DayPolicy::Strict);
            }
        }
        state.sync_derived();

        let last = ExperimentId::new(9);
        let before = state.clone();
        for d in 1..=3 {
            transition::complete_day(&mut state, last, d, now, DayPolicy::Strict);
        }
        state.sync_derived();

        let c = Celebration::detect(&before, &state, last).unwrap();
        assert_eq!(c.title, "Integration");
        assert!(c.reward_unlocked);
        assert_eq!(c.percentage, 100);
    }
}
