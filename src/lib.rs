//! Rules engine and search for a 5x5 placement-and-movement game.
//!
//! Each side has six pieces. A turn either places a new piece or moves one
//! already on the board: a step to any neighbouring cell, or a diagonal
//! slide inside the mover's own zone. A move flips opponent runs sandwiched
//! against another of the mover's pieces. Four in a row wins for the mover,
//! five in a row loses.
//!
//! The Rust API works on typed values; the `wasm_bindgen` exports below
//! take and return plain JavaScript objects.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod normalize;
pub mod types;

pub use ai::search::{Searcher, search_best_move};
pub use board::{Board, Zone};
pub use config::SearchConfig;
pub use error::ActionError;
pub use game::{
    apply_action, apply_value, create_new_game_state, create_waiting_state, forfeit,
    legal_actions, set_ready,
};
pub use normalize::normalize_state;
pub use types::{Action, ActionKind, ActionResponse, Color, GameResult, GameState, Position, Status};

const SERIALIZER: Serializer = Serializer::json_compatible();

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&SERIALIZER)?)
}

fn from_js(value: JsValue) -> serde_json::Value {
    serde_wasm_bindgen::from_value(value).unwrap_or(serde_json::Value::Null)
}

fn state_from_js(value: JsValue) -> GameState {
    normalize_state(&from_js(value))
}

fn color_from_js(value: JsValue) -> Option<Color> {
    Color::from_value(&from_js(value))
}

#[wasm_bindgen(js_name = createWaitingState)]
pub fn create_waiting_state_js() -> Result<JsValue, JsValue> {
    to_js(&create_waiting_state())
}

#[wasm_bindgen(js_name = createNewGameState)]
pub fn create_new_game_state_js() -> Result<JsValue, JsValue> {
    to_js(&create_new_game_state())
}

#[wasm_bindgen(js_name = normalizeState)]
pub fn normalize_state_js(raw: JsValue) -> Result<JsValue, JsValue> {
    to_js(&state_from_js(raw))
}

/// Returns `{ok: true, state}` or `{ok: false, error}`; rule violations never throw.
#[wasm_bindgen(js_name = applyAction)]
pub fn apply_action_js(state: JsValue, action: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state);
    let response = ActionResponse::from(apply_value(&state, &from_js(action)));
    to_js(&response)
}

/// Returns an action object, or `null` when there is nothing to play.
#[wasm_bindgen(js_name = searchBestMove)]
pub fn search_best_move_js(
    state: JsValue,
    color: JsValue,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let state = state_from_js(state);
    let Some(color) = color_from_js(color) else {
        return Ok(JsValue::NULL);
    };
    let config: SearchConfig = serde_wasm_bindgen::from_value(config).unwrap_or_default();
    match search_best_move(&state, color, &config) {
        Some(action) => to_js(&action),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = legalActions)]
pub fn legal_actions_js(state: JsValue, color: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state);
    let actions = match color_from_js(color) {
        Some(color) => legal_actions(&state, color),
        None => Vec::new(),
    };
    to_js(&actions)
}

#[wasm_bindgen(js_name = setReady)]
pub fn set_ready_js(state: JsValue, color: JsValue, ready: bool) -> Result<JsValue, JsValue> {
    let state = state_from_js(state);
    let result = match color_from_js(color) {
        Some(color) => set_ready(&state, color, ready),
        None => Err(ActionError::InvalidColor),
    };
    to_js(&ActionResponse::from(result))
}

#[wasm_bindgen(js_name = forfeit)]
pub fn forfeit_js(state: JsValue, color: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state);
    let result = match color_from_js(color) {
        Some(color) => forfeit(&state, color),
        None => Err(ActionError::InvalidColor),
    };
    to_js(&ActionResponse::from(result))
}

#[wasm_bindgen(js_name = searchConfigForLevel)]
pub fn search_config_for_level_js(level: u8) -> Result<JsValue, JsValue> {
    to_js(&SearchConfig::for_level(level))
}
