//! Game loop driver
//!
//! Owns the run, turns host frame times into fixed simulation ticks and
//! reports the end of a run exactly once. Host-agnostic: the web adapter and
//! the native runner both drive it the same way.

use serde::{Deserialize, Serialize};

use crate::config::{SimConfig, Viewport};
use crate::sim::{SimError, SimulationState, TickInput, tick};

/// Lifecycle of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start`
    Idle,
    Running,
    /// Run over; waiting for `restart`
    Dead,
}

/// Final tally handed to the leaderboard when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u64,
    pub final_blocks_passed: u64,
    pub ticks: u64,
    pub seed: u64,
}

/// Host input, sampled at the start of every tick
///
/// Left, right and down are held levels. A jump press stays armed for
/// `jump_buffer` seconds so it can fire on landing. A dash press is a request
/// for the next tick only and is dropped if the dash isn't ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    jump: bool,
    jump_window: f32,
    dash: bool,
}

impl InputState {
    pub fn press_jump(&mut self) {
        self.jump = true;
    }

    pub fn press_dash(&mut self) {
        self.dash = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// A jump press is waiting for the ground
    pub fn jump_armed(&self) -> bool {
        self.jump || self.jump_window > 0.0
    }

    /// Flags for the next tick; a fresh jump press is armed for `buffer` seconds
    fn sample(&mut self, buffer: f32, dt: f32) -> TickInput {
        if self.jump {
            self.jump = false;
            // At least the tick it was sampled on
            self.jump_window = buffer.max(dt);
        }
        TickInput {
            left: self.left,
            right: self.right,
            down: self.down,
            jump: self.jump_window > 0.0,
            dash: self.dash,
        }
    }

    /// Retire requests after a tick has seen them
    fn settle(&mut self, jumped: bool, dt: f32) {
        self.jump_window = if jumped {
            0.0
        } else {
            (self.jump_window - dt).max(0.0)
        };
        self.dash = false;
    }
}

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: RectView,
    pub platforms: Vec<RectView>,
    pub world_offset: f32,
    pub blocks_passed: u64,
    pub score: u64,
    pub dashing: bool,
    pub dash_cooldown_remaining: f32,
    pub dash_ready: bool,
}

/// The loop driver
#[derive(Debug)]
pub struct Game {
    config: SimConfig,
    viewport: Viewport,
    /// Base seed; run `n` is generated from `base_seed + n`
    base_seed: u64,
    run_index: u64,
    phase: GamePhase,
    state: SimulationState,
    accumulator: f32,
    pub input: InputState,
}

impl Game {
    /// Validate the config and lay out the first run (not yet started)
    pub fn new(config: SimConfig, viewport: Viewport, seed: u64) -> Result<Self, SimError> {
        let state = SimulationState::new(&config, viewport, seed)?;
        Ok(Self {
            config,
            viewport,
            base_seed: seed,
            run_index: 0,
            phase: GamePhase::Idle,
            state,
            accumulator: 0.0,
            input: InputState::default(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for hosts and tests that need to poke the run
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            log::debug!("start() ignored in {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Running;
        self.accumulator = 0.0;
        self.input.clear();
        log::info!("Run started (seed {})", self.state.seed);
    }

    /// Throw the current run away and begin a fresh one
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.run_index += 1;
        let seed = self.base_seed.wrapping_add(self.run_index);
        self.state = SimulationState::new(&self.config, self.viewport, seed)?;
        self.phase = GamePhase::Running;
        self.accumulator = 0.0;
        self.input.clear();
        log::info!("Run restarted (seed {seed})");
        Ok(())
    }

    /// Host surface changed size; the next tick tops up the lookahead
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SimError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.state.viewport = viewport;
        Ok(())
    }

    /// Feed one host frame of `elapsed` seconds
    ///
    /// Runs as many fixed ticks as the accumulator allows, up to
    /// `max_substeps`. Returns the summary on the frame the run ends. A
    /// simulation error also ends the run; only `restart` resumes play.
    pub fn frame(&mut self, elapsed: f32) -> Result<Option<RunSummary>, SimError> {
        if self.phase != GamePhase::Running {
            return Ok(None);
        }

        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        if elapsed > self.config.max_frame_time {
            log::debug!("Clamping {elapsed:.3}s frame to {}s", self.config.max_frame_time);
        }
        self.accumulator += elapsed.min(self.config.max_frame_time);

        let dt = self.config.fixed_dt();
        let mut substeps = 0;
        while self.accumulator >= dt && substeps < self.config.max_substeps {
            let input = self.input.sample(self.config.jump_buffer, dt);
            let outcome = match tick(&mut self.state, &self.config, &input, dt) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Run aborted: {e}");
                    self.phase = GamePhase::Dead;
                    self.accumulator = 0.0;
                    return Err(e);
                }
            };
            self.accumulator -= dt;
            substeps += 1;

            self.input.settle(outcome.jumped, dt);
            if outcome.died {
                return Ok(Some(self.finish()));
            }
        }

        if self.accumulator >= dt {
            log::debug!("Substep cap hit, dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= dt;
        }

        Ok(None)
    }

    fn finish(&mut self) -> RunSummary {
        self.phase = GamePhase::Dead;
        self.accumulator = 0.0;
        let summary = RunSummary {
            final_score: self.state.score,
            final_blocks_passed: self.state.blocks_passed,
            ticks: self.state.time_ticks,
            seed: self.state.seed,
        };
        log::info!(
            "Run over: {} blocks, {} points after {} ticks",
            summary.final_blocks_passed,
            summary.final_score,
            summary.ticks
        );
        summary
    }

    /// Renderable view of the current run (platform x in screen space)
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let player = &state.player;
        Snapshot {
            phase: self.phase,
            player: RectView {
                x: state.to_screen_x(player.pos.x),
                y: player.pos.y,
                width: player.size.x,
                height: player.size.y,
            },
            platforms: state
                .platforms
                .iter()
                .map(|p| RectView {
                    x: state.to_screen_x(p.pos.x),
                    y: p.pos.y,
                    width: p.size.x,
                    height: p.size.y,
                })
                .collect(),
            world_offset: state.world_offset,
            blocks_passed: state.blocks_passed,
            score: state.score,
            dashing: player.is_dashing(),
            dash_cooldown_remaining: player.dash_cooldown,
            dash_ready: player.dash_ready(),
        }
    }
}
