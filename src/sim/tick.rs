//! Fixed timestep simulation tick
//!
//! One step runs physics, landing, the death check, camera, generation,
//! culling and scoring in that order.

use serde::{Deserialize, Serialize};

use super::SimError;
use super::camera::update_camera;
use super::collision::{is_dead, resolve_landing};
use super::level::{cull_behind, ensure_ahead};
use super::physics::integrate;
use super::scoring::update_score;
use super::state::SimulationState;
use crate::config::SimConfig;

/// Input flags sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held down; falls faster
    pub down: bool,
    /// Jump request; fires only from the ground
    pub jump: bool,
    /// Dash request; fires only when the dash is ready
    pub dash: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub jumped: bool,
    pub dash_started: bool,
    pub landed: bool,
    pub blocks_gained: u64,
    /// Bottom of the viewport reached; nothing after the death check ran
    pub died: bool,
}

/// Advance the run by one fixed timestep
pub fn tick(
    state: &mut SimulationState,
    config: &SimConfig,
    input: &TickInput,
    dt: f32,
) -> Result<TickOutcome, SimError> {
    state.time_ticks += 1;

    let was_grounded = state.player.on_ground;
    let motion = integrate(&mut state.player, config, input, dt);
    let landing = resolve_landing(&mut state.player, &state.platforms, dt);

    let mut outcome = TickOutcome {
        jumped: motion.jumped,
        dash_started: motion.dash_started,
        landed: landing.is_some() && !was_grounded,
        ..Default::default()
    };

    if is_dead(&state.player, &state.viewport) {
        outcome.died = true;
        return Ok(outcome);
    }

    update_camera(state, config, dt);
    ensure_ahead(state, config)?;
    cull_behind(state, config);
    outcome.blocks_gained = update_score(state, config);

    Ok(outcome)
}
