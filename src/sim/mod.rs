//! Deterministic simulation module
//!
//! All experiment logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One sample per explicit tick, no ambient timers
//! - No rendering or platform dependencies

pub mod command;
pub mod histogram;
pub mod sampler;
pub mod state;

pub use command::{Command, apply_command, sample_tick};
pub use histogram::Histogram;
pub use sampler::{intensity, sample_position, theoretical_curve};
pub use state::{Mode, ScreenHit, SimParams, SimState};
