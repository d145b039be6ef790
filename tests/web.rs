//! wasm-side checks of the JavaScript exports.
#![cfg(target_arch = "wasm32")]

use flipline::{
    apply_action_js, create_new_game_state_js, create_waiting_state_js, forfeit_js,
    legal_actions_js, normalize_state_js, search_best_move_js, search_config_for_level_js,
    set_ready_js,
};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

fn set(target: &Object, key: &str, value: &JsValue) {
    Reflect::set(target, &JsValue::from_str(key), value).unwrap();
}

fn position(row: f64, col: f64) -> JsValue {
    let pos = Object::new();
    set(&pos, "row", &JsValue::from_f64(row));
    set(&pos, "col", &JsValue::from_f64(col));
    pos.into()
}

fn place(color: &str, row: f64, col: f64) -> JsValue {
    let action = Object::new();
    set(&action, "type", &JsValue::from_str("place"));
    set(&action, "color", &JsValue::from_str(color));
    set(&action, "to", &position(row, col));
    action.into()
}

#[wasm_bindgen_test]
fn new_game_state_has_wire_field_names() {
    let state = create_new_game_state_js().unwrap();

    assert_eq!(get(&state, "status").as_string().as_deref(), Some("playing"));
    assert_eq!(get(&state, "turn").as_string().as_deref(), Some("black"));
    assert!(get(&state, "winner").is_null());
    assert_eq!(get(&get(&state, "placedCount"), "black").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn accepted_action_returns_next_state() {
    let state = create_new_game_state_js().unwrap();

    let response = apply_action_js(state, place("black", 2.0, 2.0)).unwrap();

    assert_eq!(get(&response, "ok").as_bool(), Some(true));
    let next = get(&response, "state");
    assert_eq!(get(&next, "turn").as_string().as_deref(), Some("white"));
}

#[wasm_bindgen_test]
fn rejected_action_returns_error_code() {
    let state = create_waiting_state_js().unwrap();

    let response = apply_action_js(state, place("black", 0.0, 0.0)).unwrap();

    assert_eq!(get(&response, "ok").as_bool(), Some(false));
    assert_eq!(
        get(&response, "error").as_string().as_deref(),
        Some("game_not_active")
    );
}

#[wasm_bindgen_test]
fn garbage_state_normalizes_to_waiting() {
    let state = normalize_state_js(JsValue::from_str("not a state")).unwrap();

    assert_eq!(get(&state, "status").as_string().as_deref(), Some("waiting"));
}

#[wasm_bindgen_test]
fn search_returns_action_or_null() {
    let config = Object::new();
    set(&config, "maxDepth", &JsValue::from_f64(2.0));
    set(&config, "timeLimitMs", &JsValue::from_f64(100.0));

    let playing = create_new_game_state_js().unwrap();
    let action = search_best_move_js(playing, JsValue::from_str("black"), config.clone().into())
        .unwrap();
    assert_eq!(get(&action, "color").as_string().as_deref(), Some("black"));

    let waiting = create_waiting_state_js().unwrap();
    let none = search_best_move_js(waiting, JsValue::from_str("black"), config.into()).unwrap();
    assert!(none.is_null());
}

#[wasm_bindgen_test]
fn both_ready_starts_the_game() {
    let waiting = create_waiting_state_js().unwrap();

    let first = set_ready_js(waiting, JsValue::from_str("black"), true).unwrap();
    assert_eq!(get(&first, "ok").as_bool(), Some(true));
    let half = get(&first, "state");
    assert_eq!(get(&get(&half, "ready"), "black").as_bool(), Some(true));
    assert_eq!(get(&half, "status").as_string().as_deref(), Some("waiting"));

    let second = set_ready_js(half, JsValue::from_str("white"), true).unwrap();
    let started = get(&second, "state");
    assert_eq!(get(&started, "status").as_string().as_deref(), Some("playing"));

    let bad = set_ready_js(started, JsValue::from_str("green"), true).unwrap();
    assert_eq!(get(&bad, "ok").as_bool(), Some(false));
    assert_eq!(get(&bad, "error").as_string().as_deref(), Some("invalid_color"));
}

#[wasm_bindgen_test]
fn forfeit_hands_the_win_to_the_opponent() {
    let playing = create_new_game_state_js().unwrap();

    let response = forfeit_js(playing, JsValue::from_str("black")).unwrap();

    assert_eq!(get(&response, "ok").as_bool(), Some(true));
    let state = get(&response, "state");
    assert_eq!(get(&state, "status").as_string().as_deref(), Some("finished"));
    assert_eq!(get(&state, "winner").as_string().as_deref(), Some("white"));
    assert_eq!(get(&state, "result").as_string().as_deref(), Some("forfeit"));

    let waiting = create_waiting_state_js().unwrap();
    let rejected = forfeit_js(waiting, JsValue::from_str("black")).unwrap();
    assert_eq!(
        get(&rejected, "error").as_string().as_deref(),
        Some("game_not_active")
    );
}

#[wasm_bindgen_test]
fn legal_actions_lists_every_opening_placement() {
    let playing = create_new_game_state_js().unwrap();

    let actions = Array::from(&legal_actions_js(playing, JsValue::from_str("black")).unwrap());

    assert_eq!(actions.length(), 25);
    assert_eq!(get(&actions.get(0), "type").as_string().as_deref(), Some("place"));

    let waiting = create_waiting_state_js().unwrap();
    let none = Array::from(&legal_actions_js(waiting, JsValue::from_str("black")).unwrap());
    assert_eq!(none.length(), 0);
}

#[wasm_bindgen_test]
fn level_config_uses_wire_field_names() {
    let config = search_config_for_level_js(3).unwrap();

    assert_eq!(get(&config, "maxDepth").as_f64(), Some(4.0));
    assert_eq!(get(&config, "timeLimitMs").as_f64(), Some(450.0));
}
