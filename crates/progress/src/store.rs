//! Persisted progress store.
//!
//! Every operation loads the stored document, applies one transition,
//! recomputes the derived fields, writes the result back and returns it.
//! Operations never fail: unreadable documents fall back to the initial
//! state and write failures are logged, leaving the caller with an
//! updated but unpersisted state.

use ninex_core::{Clock, ExperimentId, ModelError, ProgressState};
use ninex_storage::Storage;
use tracing::{debug, error, info, warn, Level};

use crate::config::StoreConfig;
use crate::transition::{self, Transition};

/// Owner of the persisted [`ProgressState`].
pub struct ProgressStore<S: Storage> {
    storage: S,
    config: StoreConfig,
    clock: Clock,
}

impl<S: Storage> ProgressStore<S> {
    /// Create a store over `storage` with the default configuration.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: StoreConfig::default(),
            clock: Clock::default(),
        }
    }

    /// Set configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the clock used to stamp transitions.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Mutable access to the clock, e.g. to advance a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the persisted state, or the initial state if there is none
    /// usable. A bad document is logged and left in place.
    pub async fn load(&self) -> ProgressState {
        let key = self.config.storage_key.as_str();

        let json = match self.storage.read(key).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!(key, "no stored progress; starting fresh");
                return ProgressState::initial();
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read stored progress; starting fresh");
                return ProgressState::initial();
            }
        };

        let mut state: ProgressState = match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(e) => {
                warn!(key, error = %e, "stored progress is not valid; starting fresh");
                return ProgressState::initial();
            }
        };

        if state.normalize_days() {
            warn!(key, "stored progress had unsorted or duplicate days; normalized");
        }

        match state.validate() {
            Ok(()) => state,
            Err(e) if e.is_structural() => {
                warn!(key, error = %e, "stored progress has a broken slot layout; starting fresh");
                ProgressState::initial()
            }
            Err(e) => {
                warn!(key, error = %e, "stored progress is inconsistent");
                state
            }
        }
    }

    /// Persist `state`. Failures are logged and swallowed.
    pub async fn save(&mut self, state: &ProgressState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize progress");
                return;
            }
        };
        if let Err(e) = self.storage.write(&self.config.storage_key, &json).await {
            error!(key = %self.config.storage_key, error = %e, "failed to save progress");
        }
    }

    /// Move an available experiment to in progress.
    pub async fn start_experiment(&mut self, id: ExperimentId) -> ProgressState {
        let now = self.clock.now();
        self.apply("start_experiment", id, |state| {
            transition::start_experiment(state, id, now)
        })
        .await
    }

    /// Mark `day` of experiment `id` as done, completing the experiment and
    /// unlocking the next one once three days are recorded.
    pub async fn complete_day(&mut self, id: ExperimentId, day: u32) -> ProgressState {
        let now = self.clock.now();
        let policy = self.config.day_policy;
        self.apply("complete_day", id, |state| {
            transition::complete_day(state, id, day, now, policy)
        })
        .await
    }

    /// Store a note for `day` of experiment `id`.
    pub async fn add_note(
        &mut self,
        id: ExperimentId,
        day: u32,
        text: impl Into<String>,
    ) -> ProgressState {
        let text = text.into();
        self.apply("add_note", id, |state| transition::add_note(state, id, day, text))
            .await
    }

    /// Discard all progress and persist the initial state.
    pub async fn reset(&mut self) -> ProgressState {
        let state = ProgressState::initial();
        self.save(&state).await;
        info!("progress reset");
        state
    }

    async fn apply<F>(&mut self, op: &str, id: ExperimentId, f: F) -> ProgressState
    where
        F: FnOnce(&mut ProgressState) -> Transition,
    {
        let mut state = self.load().await;
        let loaded_total = state.total_completed;
        let loaded_consistent = state.validate_counters().is_ok();

        let outcome = f(&mut state);

        let drift = check_completed_count(loaded_total, &outcome, &state);
        if let Err(e) = &drift {
            warn!(op, error = %e, "completion counter drifted; recomputing");
        }
        // A consistent document plus one transition cannot drift
        debug_assert!(!loaded_consistent || drift.is_ok());
        state.sync_derived();

        match (outcome_level(&outcome), outcome) {
            (_, Transition::Completed { unlocked }) => {
                info!(op, experiment = %id, total = state.total_completed, ?unlocked, "experiment completed");
                if state.reward_unlocked {
                    info!("all experiments completed; reward unlocked");
                }
            }
            (level, t) if level == Level::WARN => warn!(op, experiment = %id, outcome = ?t, "request ignored"),
            (_, t) if t.is_ignored() => debug!(op, experiment = %id, outcome = ?t, "ignored"),
            (_, t) => debug!(op, experiment = %id, outcome = ?t, "applied"),
        }

        self.save(&state).await;
        state
    }
}

/// Level at which the outcome of a transition is logged. Out-of-range days
/// are the caller's mistake and surface as warnings.
fn outcome_level(outcome: &Transition) -> Level {
    match outcome {
        Transition::Completed { .. } => Level::INFO,
        Transition::DayOutOfRange(_) => Level::WARN,
        _ => Level::DEBUG,
    }
}

/// Check the stored counter against the slots after one transition: it
/// should have grown by one on completion and stayed put otherwise.
fn check_completed_count(
    loaded_total: u32,
    outcome: &Transition,
    state: &ProgressState,
) -> Result<(), ModelError> {
    let step = u32::from(matches!(outcome, Transition::Completed { .. }));
    let expected = loaded_total.saturating_add(step);
    let actual = state.count_completed();
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::CompletedCountDrift {
            cached: expected,
            actual,
        })
    }
}
