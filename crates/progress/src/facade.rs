//! Progress facade.
//!
//! Holds the last snapshot returned by the store and republishes every new
//! snapshot on a watch channel. It never edits the snapshot itself.

use ninex_core::{ExperimentId, ExperimentSlot, ProgressState};
use ninex_storage::Storage;
use tokio::sync::watch;

use crate::store::ProgressStore;

/// Reactive wrapper around a [`ProgressStore`].
pub struct ProgressFacade<S: Storage> {
    store: ProgressStore<S>,
    snapshot: ProgressState,
    tx: watch::Sender<ProgressState>,
}

impl<S: Storage> ProgressFacade<S> {
    /// Wrap `store`, loading the initial snapshot from it.
    pub async fn open(store: ProgressStore<S>) -> Self {
        let snapshot = store.load().await;
        let (tx, _rx) = watch::channel(snapshot.clone());
        Self { store, snapshot, tx }
    }

    /// Last known state.
    pub fn snapshot(&self) -> &ProgressState {
        &self.snapshot
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.tx.subscribe()
    }

    /// The wrapped store.
    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    /// Re-read the persisted state.
    pub async fn refresh(&mut self) -> &ProgressState {
        let state = self.store.load().await;
        self.publish(state)
    }

    /// See [`ProgressStore::start_experiment`].
    pub async fn start_experiment(&mut self, id: ExperimentId) -> &ProgressState {
        let state = self.store.start_experiment(id).await;
        self.publish(state)
    }

    /// See [`ProgressStore::complete_day`].
    pub async fn complete_day(&mut self, id: ExperimentId, day: u32) -> &ProgressState {
        let state = self.store.complete_day(id, day).await;
        self.publish(state)
    }

    /// See [`ProgressStore::add_note`].
    pub async fn add_note(
        &mut self,
        id: ExperimentId,
        day: u32,
        text: impl Into<String>,
    ) -> &ProgressState {
        let state = self.store.add_note(id, day, text).await;
        self.publish(state)
    }

    /// See [`ProgressStore::reset`].
    pub async fn reset(&mut self) -> &ProgressState {
        let state = self.store.reset().await;
        self.publish(state)
    }

    /// Slot for `id` in the current snapshot.
    pub fn experiment_progress(&self, id: ExperimentId) -> Option<&ExperimentSlot> {
        self.snapshot.slot(id)
    }

    /// Completed share of the programme, rounded to a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        self.snapshot.completion_percentage()
    }

    fn publish(&mut self, state: ProgressState) -> &ProgressState {
        self.tx.send_replace(state.clone());
        self.snapshot = state;
        &self.snapshot
    }
}
