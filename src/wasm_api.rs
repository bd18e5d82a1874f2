use crate::config::RulesConfig;
use crate::error::checked_square;
use crate::game::Match;
use crate::view::{build_event_views, build_match_view, EventView, MatchView};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SelectResult {
    #[serde(flatten)]
    state: Option<MatchView>,
    accepted: bool,
    events: Vec<EventView>,
    error: Option<String>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Game {
    game: Match,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            game: Match::new(RulesConfig::default()),
        }
    }

    /// Build a game from a JSON rules document; unknown keys are an error.
    pub fn with_rules(rules_json: &str) -> Result<Game, JsValue> {
        let config =
            RulesConfig::from_json(rules_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Game {
            game: Match::new(config),
        })
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&build_match_view(&self.game))
    }

    /// Handle a click on a board cell. Coordinates come straight from the
    /// front end and are validated here.
    pub fn select(&mut self, row: i32, col: i32) -> JsValue {
        let (row, col) = match checked_square(row as i64, col as i64) {
            Ok(square) => square,
            Err(err) => {
                return to_js(&SelectResult {
                    state: None,
                    accepted: false,
                    events: Vec::new(),
                    error: Some(err.to_string()),
                });
            }
        };

        let accepted = self.game.select(row, col);
        self.game.check_winner();
        let events = self.game.drain_events();

        to_js(&SelectResult {
            state: Some(build_match_view(&self.game)),
            accepted,
            events: build_event_views(self.game.board(), &events),
            error: None,
        })
    }

    /// Discard the current match and start a fresh one with the same rules.
    pub fn new_match(&mut self) -> JsValue {
        self.game = Match::new(self.game.config().clone());
        self.get_state()
    }

    pub fn build_timestamp() -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
