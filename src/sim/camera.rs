//! Horizontal scroll
//!
//! `world_offset` only ever moves right. The follow camera is a first-order
//! low-pass on the player's overshoot past the lead line; auto-scroll runs at
//! a base speed plus a share of the player's rightward velocity.

use super::state::SimulationState;
use crate::config::{CameraMode, SimConfig};

/// Advance `world_offset` by one step
pub fn update_camera(state: &mut SimulationState, config: &SimConfig, dt: f32) {
    let advance = match config.camera {
        CameraMode::Follow => {
            let lead = state.viewport.width * config.lead_fraction;
            let screen_x = state.to_screen_x(state.player.pos.x);
            (screen_x - lead).max(0.0) * config.follow_easing
        }
        CameraMode::AutoScroll => {
            (config.base_scroll_speed + state.player.vel.x.max(0.0) * config.scroll_boost) * dt
        }
    };
    state.world_offset = (state.world_offset + advance).max(0.0);
}
