//! Simulation state and core types
//!
//! Everything a run mutates lives in [`SimulationState`], owned by the loop
//! driver and handed to each step function by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::SimError;
use super::level;
use crate::config::{SimConfig, Viewport};

/// The player character
///
/// `pos` is the top-left corner in world space; +y points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Set only by a landing resolved this step
    pub on_ground: bool,
    /// Seconds of dash left; zero when not dashing
    pub dash_timer: f32,
    /// Seconds until a dash may start; only runs while not dashing
    pub dash_cooldown: f32,
    /// Last nonzero horizontal input direction (-1 or +1)
    pub facing: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
            facing: 1.0,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    /// Neither dashing nor cooling down
    #[inline]
    pub fn dash_ready(&self) -> bool {
        !self.is_dashing() && self.dash_cooldown <= 0.0
    }

    /// Overlaps the platform's horizontal span
    #[inline]
    pub fn overlaps_x(&self, platform: &Platform) -> bool {
        self.right() > platform.pos.x && self.pos.x < platform.right()
    }
}

/// A run of blocks the player can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Width in blocks
    pub blocks: u32,
    /// Already credited by pass-threshold scoring
    pub counted: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, blocks: u32, block_size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(blocks as f32 * block_size, block_size),
            blocks,
            counted: false,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the level generator was started from
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub player: Player,
    /// Ascending by x; new platforms are only ever pushed at the end
    pub platforms: Vec<Platform>,
    /// Subtracted from world x to get screen x; never decreases
    pub world_offset: f32,
    /// Furthest rightward progress from the start position (px)
    pub furthest_progress: f32,
    pub blocks_passed: u64,
    pub score: u64,
    /// Fixed steps simulated so far
    pub time_ticks: u64,
}

impl SimulationState {
    /// Fresh run: starter platform under the player, lookahead filled
    pub fn new(config: &SimConfig, viewport: Viewport, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        viewport.validate()?;

        let size = Vec2::new(config.player_width, config.player_height);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            player: Player::new(Vec2::new(config.player_start_x, 0.0), size),
            platforms: Vec::new(),
            world_offset: 0.0,
            furthest_progress: 0.0,
            blocks_passed: 0,
            score: 0,
            time_ticks: 0,
        };

        let generated = level::generate_initial(&mut state, config)?;
        // Spawn standing on the starter platform
        if let Some(starter) = state.platforms.first() {
            state.player.pos.y = starter.top() - size.y;
        }
        log::debug!(
            "New run (seed {seed}): {generated} platforms for a {}x{} viewport",
            viewport.width,
            viewport.height
        );

        Ok(state)
    }

    /// Right edge of the last platform in world space
    pub fn rightmost_edge(&self) -> Option<f32> {
        self.platforms.last().map(Platform::right)
    }

    /// World x to screen x
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.world_offset
    }
}
