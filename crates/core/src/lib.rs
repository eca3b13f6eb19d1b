//! Nine Experiments core data models.
//!
//! This crate defines the progress model for the nine three-day
//! experiments, the read-only experiment catalog, and the clock used to
//! stamp transitions.

#![warn(missing_docs)]

// Identities
mod id;

// Progress model
mod progress;
mod error;

// Reference data
pub mod catalog;

// Time
mod time;

// Re-exports
pub use id::ExperimentId;
pub use progress::{
    ExperimentSlot, ExperimentStatus, ProgressState, DAYS_PER_EXPERIMENT, EXPERIMENT_COUNT,
};
pub use error::ModelError;
pub use catalog::{Experiment, Reward};
pub use time::Clock;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
