//! Endless platform generation
//!
//! Platforms are appended to the right of the last one so that geometry always
//! exists past the right edge of the screen, and dropped once they are well
//! behind the camera. Widths and gaps are uniform draws; reachability is not
//! checked, a bad roll just ends the run.

use rand::Rng;

use super::SimError;
use super::state::{Platform, SimulationState};
use crate::config::SimConfig;

/// Vertical band platform tops are clamped into (world y)
fn band(state: &SimulationState, config: &SimConfig) -> (f32, f32) {
    let h = state.viewport.height;
    (h * config.platform_band_top, h * config.platform_band_bottom)
}

/// Lay down the starter platform and fill the lookahead buffer
///
/// Returns the number of platforms created.
pub fn generate_initial(state: &mut SimulationState, config: &SimConfig) -> Result<usize, SimError> {
    state.platforms.clear();

    let (top, bottom) = band(state, config);
    let y = (state.viewport.height * 0.5).clamp(top, bottom);
    state.platforms.push(Platform::new(
        config.initial_platform_x,
        y,
        config.initial_platform_blocks,
        config.block_size,
    ));

    Ok(1 + ensure_ahead(state, config)?)
}

/// Append one platform after the current last one
fn spawn_next(state: &mut SimulationState, config: &SimConfig) {
    let (top, bottom) = band(state, config);
    let (anchor_x, prev_y) = match state.platforms.last() {
        Some(last) => (last.right(), last.top()),
        None => (state.world_offset, (top + bottom) / 2.0),
    };

    let rng = &mut state.rng;
    let blocks = rng.random_range(config.platform_width_min..=config.platform_width_max);
    let gap = rng.random_range(config.platform_gap_min..=config.platform_gap_max);
    let jitter = rng.random_range(-config.platform_y_jitter..=config.platform_y_jitter);

    let x = anchor_x + gap * config.block_size;
    let y = (prev_y + jitter).clamp(top, bottom);
    state
        .platforms
        .push(Platform::new(x, y, blocks, config.block_size));
}

/// Keep platforms generated to `viewport width + lookahead margin` past the camera
///
/// Returns the number of platforms appended. Needing more than
/// `max_platforms_per_tick` in one call is reported as a stalled generator.
pub fn ensure_ahead(state: &mut SimulationState, config: &SimConfig) -> Result<usize, SimError> {
    let horizon = state.world_offset + state.viewport.width + config.lookahead_margin;
    let mut appended = 0;

    while state.rightmost_edge().is_none_or(|edge| edge < horizon) {
        if appended >= config.max_platforms_per_tick as usize {
            return Err(SimError::GenerationStalled {
                limit: config.max_platforms_per_tick,
            });
        }
        spawn_next(state, config);
        appended += 1;
    }

    if appended > 0 {
        log::trace!("Generated {appended} platforms up to x={horizon:.0}");
    }
    Ok(appended)
}

/// Drop platforms whose right edge is more than `cull_margin` behind the camera
///
/// Returns the number removed.
pub fn cull_behind(state: &mut SimulationState, config: &SimConfig) -> usize {
    let limit = state.world_offset - config.cull_margin;
    let before = state.platforms.len();
    state.platforms.retain(|p| p.right() >= limit);
    let removed = before - state.platforms.len();
    if removed > 0 {
        log::trace!("Culled {removed} platforms behind x={limit:.0}");
    }
    removed
}
