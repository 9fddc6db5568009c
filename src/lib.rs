//! Squid Dash - A side-scrolling platformer core
//!
//! Core modules:
//! - `config`: Data-driven tuning and viewport
//! - `sim`: Deterministic simulation (physics, collisions, level, camera, scoring)
//! - `game`: Fixed-step loop driver and run lifecycle
//! - `leaderboard`: Best runs, JSON round-trip
//! - `web`: Browser bindings (wasm32 only)

pub mod config;
pub mod game;
pub mod leaderboard;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{CameraMode, SimConfig, Viewport};
pub use game::{Game, GamePhase, RunSummary, Snapshot};
pub use leaderboard::Leaderboard;
