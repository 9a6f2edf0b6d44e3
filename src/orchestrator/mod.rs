//! Phase orchestration.
//!
//! - `progress`: line-round counts read from the published progress table
//! - `transition`: the pure next-round decision and the phase counters

pub mod progress;
pub mod transition;

pub use progress::ProgressSchedule;
pub use transition::{next_transition, Hook, NextRound, PhaseCounters, Transition};
