//! Browser bindings
//!
//! The page owns the canvas, the DOM and the keyboard; it forwards input and
//! `requestAnimationFrame` timestamps here and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::config::{SimConfig, Viewport};
use crate::game::Game;
use crate::leaderboard::Leaderboard;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Squid Dash core loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// A game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` may be omitted for the default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> Result<WebGame, JsError> {
        let config = match config_json {
            Some(json) => SimConfig::from_json(&json).map_err(js_err)?,
            None => SimConfig::default(),
        };
        let viewport = Viewport::new(width, height).map_err(js_err)?;
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, viewport, seed).map_err(js_err)?;
        log::info!("Game initialized with seed: {seed}");
        Ok(WebGame {
            game,
            last_time: None,
        })
    }

    pub fn start(&mut self) {
        self.last_time = None;
        self.game.start();
    }

    pub fn restart(&mut self) -> Result<(), JsError> {
        self.last_time = None;
        self.game.restart().map_err(js_err)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        let viewport = Viewport::new(width, height).map_err(js_err)?;
        self.game.resize(viewport).map_err(js_err)
    }

    /// Held movement keys
    pub fn set_movement(&mut self, left: bool, right: bool, down: bool) {
        self.game.input.left = left;
        self.game.input.right = right;
        self.game.input.down = down;
    }

    pub fn press_jump(&mut self) {
        self.game.input.press_jump();
    }

    pub fn press_dash(&mut self) {
        self.game.input.press_dash();
    }

    /// Advance to the animation-frame timestamp `now_ms`
    ///
    /// Returns the run summary as JSON on the frame the run ends.
    pub fn frame(&mut self, now_ms: f64) -> Result<Option<String>, JsError> {
        let elapsed = self
            .last_time
            .map(|last| ((now_ms - last) / 1000.0) as f32)
            .unwrap_or(0.0);
        self.last_time = Some(now_ms);

        match self.game.frame(elapsed).map_err(js_err)? {
            Some(summary) => Ok(Some(serde_json::to_string(&summary).map_err(js_err)?)),
            None => Ok(None),
        }
    }

    /// Current frame for the renderer and HUD, as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.game.snapshot()).map_err(js_err)
    }

    /// Insert the last finished run into a stored leaderboard
    ///
    /// Takes and returns the leaderboard JSON; storage stays with the page.
    pub fn record_score(
        &self,
        leaderboard_json: Option<String>,
        name: String,
        summary_json: String,
    ) -> Result<String, JsError> {
        let mut board = match leaderboard_json {
            Some(json) => Leaderboard::from_json(&json).map_err(js_err)?,
            None => Leaderboard::new(),
        };
        let summary = serde_json::from_str(&summary_json).map_err(js_err)?;
        board.add_score(name, &summary);
        board.to_json().map_err(js_err)
    }
}
