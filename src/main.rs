//! Squid Dash entry point
//!
//! The browser build is driven from JavaScript through `squid_dash::web`.
//! Natively this runs one headless game with a simple autopilot and prints
//! the resulting leaderboard.
//!
//! Usage: `squid-dash [CONFIG.json] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use squid_dash::config::{SimConfig, Viewport};
    use squid_dash::game::{Game, RunSummary};
    use squid_dash::leaderboard::Leaderboard;
    use squid_dash::sim::SimulationState;
    use squid_dash::sim::collision::CONTACT_SLOP;

    /// Host frame rate for the headless run
    const FRAME_TIME: f32 = 1.0 / 60.0;
    /// Give up after this many seconds if the autopilot never falls
    const MAX_SECONDS: f32 = 120.0;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => SimConfig::from_json(&std::fs::read_to_string(&path)?)?,
            None => SimConfig::default(),
        };
        let seed = match args.next() {
            Some(s) => s.parse()?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_millis() as u64,
        };

        log::info!("Squid Dash (native) starting with seed {seed}");
        let mut game = Game::new(config, Viewport::default(), seed)?;
        game.start();

        let mut summary = None;
        let mut elapsed = 0.0;
        while elapsed < MAX_SECONDS {
            steer(&mut game);
            if let Some(s) = game.frame(FRAME_TIME)? {
                summary = Some(s);
                break;
            }
            elapsed += FRAME_TIME;
        }

        let summary = match summary {
            Some(s) => s,
            None => {
                log::info!("Autopilot survived {MAX_SECONDS}s, stopping");
                let state = game.state();
                RunSummary {
                    final_score: state.score,
                    final_blocks_passed: state.blocks_passed,
                    ticks: state.time_ticks,
                    seed: state.seed,
                }
            }
        };

        let mut board = Leaderboard::new();
        board.add_score("autopilot", &summary);
        println!("{}", serde_json::to_string_pretty(&board)?);
        Ok(())
    }

    /// Run right and jump near the end of whatever platform is underfoot
    fn steer(game: &mut Game) {
        let jump_lead = game.config().block_size * 0.5;
        let state = game.state();
        let near_edge =
            standing_on(state).is_some_and(|right| right - state.player.right() < jump_lead);
        let falling = !state.player.on_ground && state.player.vel.y > 0.0;
        let dash_ready = state.player.dash_ready();

        game.input.right = true;
        game.input.left = false;
        if near_edge {
            game.input.press_jump();
        }
        // Stretch a falling jump toward the next platform
        if falling && dash_ready {
            game.input.press_dash();
        }
    }

    /// Right edge of the platform the player is standing on
    fn standing_on(state: &SimulationState) -> Option<f32> {
        let player = &state.player;
        if !player.on_ground {
            return None;
        }
        state
            .platforms
            .iter()
            .find(|p| player.overlaps_x(p) && (p.top() - player.bottom()).abs() <= CONTACT_SLOP)
            .map(|p| p.right())
    }
}
