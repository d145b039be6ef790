use log::debug;
use serde_json::Value;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::movegen;
use crate::board::Board;
use crate::error::ActionError;
use crate::types::{
    Action, ActionKind, Color, GameResult, GameState, LastMove, PerColor, Status,
};

/// Pieces each side may place over a whole game.
pub const MAX_PIECES: u8 = 6;
/// Line length that wins for the mover.
pub const WIN_LINE: u8 = 4;
/// Line length that loses for the mover.
pub const OVERLINE: u8 = 5;

/// Empty board, nobody ready yet.
pub fn create_waiting_state() -> GameState {
    GameState {
        board: Board::new(),
        placed_count: PerColor::default(),
        turn: Color::Black,
        status: Status::Waiting,
        ready: PerColor::default(),
        winner: None,
        result: None,
        last_move: None,
    }
}

/// Empty board, both seats ready, Black to move.
pub fn create_new_game_state() -> GameState {
    GameState {
        status: Status::Playing,
        ready: PerColor::new(true, true),
        ..create_waiting_state()
    }
}

/// Applies one action and returns the resulting state. `state` itself is
/// never touched, so a rejection leaves the caller's state as it was.
pub fn apply_action(state: &GameState, action: &Action) -> Result<GameState, ActionError> {
    let result = transition(state, action);
    if let Err(err) = &result {
        debug!("rejected {:?}: {}", action, err.code());
    }
    result
}

/// Entry point for untyped requests. An inactive game and an off-turn
/// colour are reported before the rest of the action is parsed; a colour
/// that cannot be read never matches the side to move.
pub fn apply_value(state: &GameState, action: &Value) -> Result<GameState, ActionError> {
    if !state.is_playing() {
        return Err(ActionError::GameNotActive);
    }
    if action.get("color").and_then(Color::from_value) != Some(state.turn) {
        return Err(ActionError::NotYourTurn);
    }
    let action = Action::from_value(action)?;
    apply_action(state, &action)
}

fn transition(state: &GameState, action: &Action) -> Result<GameState, ActionError> {
    if state.status != Status::Playing {
        return Err(ActionError::GameNotActive);
    }
    if action.color != state.turn {
        return Err(ActionError::NotYourTurn);
    }

    let color = action.color;
    let to = action.to;
    let mut next = state.clone();
    let mut flipped = Vec::new();

    match action.kind {
        ActionKind::Place => {
            if !to.in_bounds() {
                return Err(ActionError::InvalidTarget);
            }
            if next.placed_count[color] >= MAX_PIECES {
                return Err(ActionError::NoPiecesLeft);
            }
            if !next.board.is_empty(to) {
                return Err(ActionError::Occupied);
            }
            next.board.set(to, Some(color));
            next.placed_count[color] += 1;
        }
        ActionKind::Move => {
            let from = action.from.ok_or(ActionError::InvalidTarget)?;
            if !from.in_bounds() || !to.in_bounds() {
                return Err(ActionError::InvalidTarget);
            }
            if next.board.get(from) != Some(color) {
                return Err(ActionError::NotYourPiece);
            }
            if !next.board.is_empty(to) {
                return Err(ActionError::Occupied);
            }
            if !next.board.is_legal_move(from, to, color) {
                return Err(ActionError::InvalidMove);
            }
            next.board.set(from, None);
            next.board.set(to, Some(color));
            flipped = next.board.resolve_flips(to, color);
        }
    }

    // Only the mover's own line decides the outcome.
    let longest = next.board.max_line(color);
    if longest >= OVERLINE {
        finish(&mut next, color.opponent(), GameResult::Five);
    } else if longest == WIN_LINE {
        finish(&mut next, color, GameResult::Four);
    } else {
        next.turn = color.opponent();
    }

    next.last_move = Some(LastMove {
        kind: action.kind,
        color,
        from: action.from.filter(|_| action.kind == ActionKind::Move),
        to,
        flipped,
        timestamp: now_millis(),
    });

    Ok(next)
}

/// Marks a seat ready or not while waiting. Once both seats are ready the
/// match starts from a fresh board.
pub fn set_ready(state: &GameState, color: Color, ready: bool) -> Result<GameState, ActionError> {
    if state.status != Status::Waiting {
        return Err(ActionError::GameNotActive);
    }
    let mut next = state.clone();
    next.ready[color] = ready;
    if next.ready.black && next.ready.white {
        return Ok(create_new_game_state());
    }
    Ok(next)
}

/// `color` gives up; the opponent wins.
pub fn forfeit(state: &GameState, color: Color) -> Result<GameState, ActionError> {
    if state.status != Status::Playing {
        return Err(ActionError::GameNotActive);
    }
    let mut next = state.clone();
    finish(&mut next, color.opponent(), GameResult::Forfeit);
    Ok(next)
}

/// Move hints for `color`; empty unless the game is being played.
pub fn legal_actions(state: &GameState, color: Color) -> Vec<Action> {
    if !state.is_playing() {
        return Vec::new();
    }
    movegen::legal_actions(state, color)
}

fn finish(state: &mut GameState, winner: Color, result: GameResult) {
    state.status = Status::Finished;
    state.winner = Some(winner);
    state.result = Some(result);
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
