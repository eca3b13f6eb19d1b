//! Progress Tracking
//!
//! Experiment transitions, the persisted progress store, and the facade
//! that republishes snapshots to consumers.

#![warn(missing_docs)]

pub mod config;
pub mod transition;
pub mod store;
pub mod facade;
pub mod celebration;

pub use config::{DayPolicy, ParseDayPolicyError, StoreConfig};
pub use transition::Transition;
pub use store::ProgressStore;
pub use facade::ProgressFacade;
pub use celebration::Celebration;
