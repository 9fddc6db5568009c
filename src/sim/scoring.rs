//! Block count and score
//!
//! The rule follows the camera mode. Follow scores by furthest progress from
//! the start position; auto-scroll credits each platform once, when its right
//! edge crosses the threshold near the left of the screen. Either way
//! `blocks_passed` and `score` never go down within a run.

use super::state::SimulationState;
use crate::config::{CameraMode, SimConfig};

/// Update the tally; returns blocks gained this step
pub fn update_score(state: &mut SimulationState, config: &SimConfig) -> u64 {
    let gained = match config.camera {
        CameraMode::Follow => {
            let progress = state.player.pos.x - config.player_start_x;
            state.furthest_progress = state.furthest_progress.max(progress);
            let blocks = (state.furthest_progress / config.block_size).floor() as u64;
            blocks.saturating_sub(state.blocks_passed)
        }
        CameraMode::AutoScroll => {
            let offset = state.world_offset;
            let mut gained = 0;
            for platform in state.platforms.iter_mut().filter(|p| !p.counted) {
                if platform.right() - offset < config.score_threshold_x {
                    platform.counted = true;
                    gained += u64::from(platform.blocks);
                }
            }
            gained
        }
    };

    state.blocks_passed += gained;
    state.score = state.blocks_passed * config.points_per_block;
    gained
}
