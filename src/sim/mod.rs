//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Platforms kept in ascending x order
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;

use thiserror::Error;

use crate::config::ConfigError;

pub use collision::{is_dead, resolve_landing};
pub use state::{Platform, Player, SimulationState};
pub use tick::{TickInput, TickOutcome, tick};

/// Failures that stop a run from being simulated
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("level generation needed more than {limit} platforms in one step")]
    GenerationStalled { limit: u32 },
}
