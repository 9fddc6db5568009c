//! Simulation tuning
//!
//! Every gameplay constant lives in one immutable [`SimConfig`], validated
//! before a run is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must lie in [0, 1] (got {value})")]
    NotAFraction { field: &'static str, value: f32 },
    #[error("`jump_impulse` must be negative (upward), got {0}")]
    JumpNotUpward(f32),
    #[error("`{min_field}` ({min}) exceeds `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },
    #[error(
        "platforms ({height}px tall) are thinner than one step of terminal fall ({per_step}px); \
         the player would tunnel through them"
    )]
    Tunnelling { height: f32, per_step: f32 },
    #[error("viewport must be positive and finite (got {width}x{height})")]
    BadViewport { width: f32, height: f32 },
}

/// Which way the camera tracks the run
///
/// Each mode carries its own scoring rule: following scores by distance,
/// auto-scroll scores by platforms passing the left threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Eases toward the player once they pass the lead threshold
    #[default]
    Follow,
    /// Scrolls at a constant base rate, faster while the player runs right
    AutoScroll,
}

/// Immutable simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    // === Movement ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (px/s, negative is up)
    pub jump_impulse: f32,
    /// Horizontal run speed (px/s)
    pub move_speed: f32,
    /// Per-second velocity retention with no horizontal input (0 = instant stop)
    pub release_damping: f32,
    /// Terminal fall speed (px/s)
    pub max_fall_speed: f32,
    /// Extra downward acceleration while down is held (px/s²)
    pub fast_drop_accel: f32,
    /// How long a jump press stays armed waiting for the ground (s)
    pub jump_buffer: f32,

    // === Dash ===
    /// Distance a full dash covers (px)
    pub dash_distance: f32,
    /// Dash length (s)
    pub dash_duration: f32,
    /// Time after a dash ends before the next one is allowed (s)
    pub dash_cooldown: f32,
    /// Per-step share of the gap to the dash velocity closed while dashing
    pub dash_blend: f32,

    // === Loop ===
    pub physics_hz: f32,
    /// Longest host frame fed to the accumulator (s)
    pub max_frame_time: f32,
    pub max_substeps: u32,

    // === Level ===
    /// Generation unit (px); platforms are one block tall
    pub block_size: f32,
    pub platform_width_min: u32,
    pub platform_width_max: u32,
    /// Gap between platforms, in blocks
    pub platform_gap_min: f32,
    pub platform_gap_max: f32,
    /// Largest vertical step between neighbouring platforms (px)
    pub platform_y_jitter: f32,
    /// Highest allowed platform top, as a fraction of viewport height
    pub platform_band_top: f32,
    /// Lowest allowed platform top, as a fraction of viewport height
    pub platform_band_bottom: f32,
    pub initial_platform_blocks: u32,
    pub initial_platform_x: f32,
    /// Platforms must exist this far past the right edge of the viewport (px)
    pub lookahead_margin: f32,
    /// Platforms further than this behind the camera are dropped (px)
    pub cull_margin: f32,
    pub max_platforms_per_tick: u32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,

    // === Camera ===
    pub camera: CameraMode,
    /// Follow camera: screen fraction the player may cross before it scrolls
    pub lead_fraction: f32,
    /// Follow camera: share of the excess closed per step
    pub follow_easing: f32,
    /// Auto-scroll: base scroll speed (px/s)
    pub base_scroll_speed: f32,
    /// Auto-scroll: extra scroll per px/s of rightward player velocity
    pub scroll_boost: f32,

    // === Scoring ===
    /// Auto-scroll: screen x a platform's right edge must pass to count
    pub score_threshold_x: f32,
    pub points_per_block: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 1400.0,
            jump_impulse: -650.0,
            move_speed: 260.0,
            release_damping: 0.0001,
            max_fall_speed: 1200.0,
            fast_drop_accel: 600.0,
            jump_buffer: 0.1,

            dash_distance: 84.0,
            dash_duration: 0.12,
            dash_cooldown: 3.0,
            dash_blend: 0.18,

            physics_hz: 120.0,
            max_frame_time: 0.05,
            max_substeps: 8,

            block_size: 56.0,
            platform_width_min: 2,
            platform_width_max: 5,
            platform_gap_min: 1.0,
            platform_gap_max: 2.5,
            platform_y_jitter: 80.0,
            platform_band_top: 0.35,
            platform_band_bottom: 0.75,
            initial_platform_blocks: 8,
            initial_platform_x: 60.0,
            lookahead_margin: 400.0,
            cull_margin: 300.0,
            max_platforms_per_tick: 256,

            player_width: 48.0,
            player_height: 56.0,
            player_start_x: 120.0,

            camera: CameraMode::Follow,
            lead_fraction: 0.35,
            follow_easing: 0.15,
            base_scroll_speed: 200.0,
            scroll_boost: 0.4,

            score_threshold_x: 60.0,
            points_per_block: 2,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed simulation step (s)
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.physics_hz
    }

    /// Horizontal speed targeted during a dash (px/s)
    #[inline]
    pub fn dash_velocity(&self) -> f32 {
        self.dash_distance / self.dash_duration
    }

    /// Platform height (one block)
    #[inline]
    pub fn platform_height(&self) -> f32 {
        self.block_size
    }

    /// Check every tunable; the first problem found is returned
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("move_speed", self.move_speed),
            ("release_damping", self.release_damping),
            ("max_fall_speed", self.max_fall_speed),
            ("fast_drop_accel", self.fast_drop_accel),
            ("jump_buffer", self.jump_buffer),
            ("dash_distance", self.dash_distance),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("dash_blend", self.dash_blend),
            ("physics_hz", self.physics_hz),
            ("max_frame_time", self.max_frame_time),
            ("block_size", self.block_size),
            ("platform_gap_min", self.platform_gap_min),
            ("platform_gap_max", self.platform_gap_max),
            ("platform_y_jitter", self.platform_y_jitter),
            ("platform_band_top", self.platform_band_top),
            ("platform_band_bottom", self.platform_band_bottom),
            ("initial_platform_x", self.initial_platform_x),
            ("lookahead_margin", self.lookahead_margin),
            ("cull_margin", self.cull_margin),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_start_x", self.player_start_x),
            ("lead_fraction", self.lead_fraction),
            ("follow_easing", self.follow_easing),
            ("base_scroll_speed", self.base_scroll_speed),
            ("scroll_boost", self.scroll_boost),
            ("score_threshold_x", self.score_threshold_x),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("dash_distance", self.dash_distance),
            ("dash_duration", self.dash_duration),
            ("physics_hz", self.physics_hz),
            ("max_frame_time", self.max_frame_time),
            ("block_size", self.block_size),
            ("platform_gap_min", self.platform_gap_min),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("max_substeps", self.max_substeps as f32),
            ("max_platforms_per_tick", self.max_platforms_per_tick as f32),
            ("platform_width_min", self.platform_width_min as f32),
            ("initial_platform_blocks", self.initial_platform_blocks as f32),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("dash_cooldown", self.dash_cooldown),
            ("fast_drop_accel", self.fast_drop_accel),
            ("jump_buffer", self.jump_buffer),
            ("platform_y_jitter", self.platform_y_jitter),
            ("lookahead_margin", self.lookahead_margin),
            ("cull_margin", self.cull_margin),
            ("base_scroll_speed", self.base_scroll_speed),
            ("scroll_boost", self.scroll_boost),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let fractions = [
            ("release_damping", self.release_damping),
            ("dash_blend", self.dash_blend),
            ("platform_band_top", self.platform_band_top),
            ("platform_band_bottom", self.platform_band_bottom),
            ("lead_fraction", self.lead_fraction),
            ("follow_easing", self.follow_easing),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAFraction { field, value });
            }
        }

        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }

        let ranges = [
            (
                "platform_width_min",
                "platform_width_max",
                self.platform_width_min as f32,
                self.platform_width_max as f32,
            ),
            (
                "platform_gap_min",
                "platform_gap_max",
                self.platform_gap_min,
                self.platform_gap_max,
            ),
            (
                "platform_band_top",
                "platform_band_bottom",
                self.platform_band_top,
                self.platform_band_bottom,
            ),
        ];
        for (min_field, max_field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange {
                    min_field,
                    max_field,
                    min,
                    max,
                });
            }
        }

        let per_step = self.max_fall_speed * self.fixed_dt();
        if self.platform_height() <= per_step {
            return Err(ConfigError::Tunnelling {
                height: self.platform_height(),
                per_step,
            });
        }

        Ok(())
    }
}

/// Host drawing surface, in the same units as world geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::BadViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}
