//! Browser bridge
//!
//! JavaScript owns the three.js scene, the HUD and the animation frame loop.
//! It forwards `keydown`/`keyup` here, calls `frame()` once per animation
//! frame and draws the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::consts::ERROR_FLASH_MS;
use crate::platform::KeyboardInput;
use crate::settings::Settings;
use crate::sim::{AnswerOutcome, GameState, InputEvent, RenderFrame, apply_event, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Math Mage core loaded");
}

/// One run of the game, driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    keyboard: KeyboardInput,
    settings: Settings,
    /// Timestamp (ms) until which the math HUD shows the error color
    error_flash_until: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!(
            "Game initialized with seed: {} (character: {})",
            seed,
            settings.character.as_str()
        );
        WebGame {
            state: GameState::new(seed, settings.character).with_max_enemies(settings.max_enemies),
            keyboard: KeyboardInput::new(),
            settings,
            error_flash_until: 0.0,
        }
    }

    /// Pick a character by name for the next restart (persisted)
    #[wasm_bindgen(js_name = setCharacter)]
    pub fn set_character(&mut self, name: &str) {
        self.settings = Settings {
            max_enemies: self.settings.max_enemies,
            ..Settings::with_character_name(name)
        };
        self.settings.save();
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        let game_over = self.state.is_game_over();
        if let Some(event) = self.keyboard.key_down(key, game_over) {
            self.handle_event(event);
        }
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        self.keyboard.key_up(key);
    }

    /// Restart button
    pub fn restart(&mut self) {
        self.handle_event(InputEvent::Restart);
    }

    /// Advance one tick and return the render snapshot as JSON
    pub fn frame(&mut self) -> String {
        let input = self.keyboard.tick_input();
        let report = tick(&mut self.state, &input);
        if report.kills > 0 {
            log::debug!("{} kill(s), score {}", report.kills, self.state.score);
        }

        match serde_json::to_string(&RenderFrame::capture(&self.state)) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize frame: {}", e);
                String::from("{}")
            }
        }
    }

    /// Whether the math HUD should show the wrong-answer color right now
    #[wasm_bindgen(js_name = errorFlash)]
    pub fn error_flash(&self) -> bool {
        js_sys::Date::now() < self.error_flash_until
    }
}

impl WebGame {
    fn handle_event(&mut self, event: InputEvent) {
        if event == InputEvent::Restart {
            // Character changes apply on restart
            if self.state.player.rig.kind != self.settings.character {
                let seed = js_sys::Date::now() as u64;
                self.state = GameState::new(seed, self.settings.character)
                    .with_max_enemies(self.settings.max_enemies);
            }
            self.keyboard.release_all();
            self.error_flash_until = 0.0;
        }

        if apply_event(&mut self.state, event) == Some(AnswerOutcome::Incorrect) {
            self.error_flash_until = js_sys::Date::now() + ERROR_FLASH_MS;
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
