//! Untrusted-to-trusted boundary for persisted or transmitted state.
//!
//! Every field has a total defaulting rule, so [`normalize_state`] always
//! yields a structurally valid [`GameState`].

use serde_json::{Map, Value};

use crate::board::{BOARD_SIZE, Board, NUM_CELLS};
use crate::game::{MAX_PIECES, create_waiting_state};
use crate::types::{Color, GameResult, GameState, LastMove, PerColor, Position, Status};

pub fn normalize_state(raw: &Value) -> GameState {
    let Some(obj) = raw.as_object() else {
        return create_waiting_state();
    };

    let mut board = obj.get("board").map(parse_board).unwrap_or_default();
    let status = obj
        .get("status")
        .and_then(parse_status)
        .unwrap_or(Status::Waiting);
    let turn = obj
        .get("turn")
        .and_then(Color::from_value)
        .unwrap_or(Color::Black);
    let placed_count = parse_placed_count(obj, &board);
    trim_to_budget(&mut board, placed_count);
    let ready = obj
        .get("ready")
        .map(|value| {
            PerColor::new(
                value.get("black").and_then(Value::as_bool).unwrap_or(false),
                value.get("white").and_then(Value::as_bool).unwrap_or(false),
            )
        })
        .unwrap_or_default();

    let (winner, result) = if status == Status::Finished {
        (
            obj.get("winner").and_then(Color::from_value),
            obj.get("result").and_then(parse_result),
        )
    } else {
        (None, None)
    };

    let last_move = obj
        .get("lastMove")
        .and_then(|value| serde_json::from_value::<LastMove>(value.clone()).ok());

    GameState {
        board,
        placed_count,
        turn,
        status,
        ready,
        winner,
        result,
        last_move,
    }
}

fn parse_board(value: &Value) -> Board {
    let mut board = Board::new();
    let Some(rows) = value.as_array() else {
        return board;
    };
    for (row, cells) in rows.iter().take(BOARD_SIZE).enumerate() {
        let Some(cells) = cells.as_array() else {
            continue;
        };
        for (col, cell) in cells.iter().take(BOARD_SIZE).enumerate() {
            board.set(Position::new(row as i32, col as i32), parse_cell(cell));
        }
    }
    board
}

fn parse_cell(value: &Value) -> Option<Color> {
    match value {
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Some(Color::Black),
            "white" | "w" => Some(Color::White),
            _ => None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(Color::Black),
            Some(2) => Some(Color::White),
            _ => None,
        },
        _ => None,
    }
}

fn parse_status(value: &Value) -> Option<Status> {
    match value.as_str()?.to_ascii_lowercase().as_str() {
        "waiting" => Some(Status::Waiting),
        "playing" => Some(Status::Playing),
        "finished" => Some(Status::Finished),
        _ => None,
    }
}

fn parse_result(value: &Value) -> Option<GameResult> {
    match value.as_str()?.to_ascii_lowercase().as_str() {
        "four" => Some(GameResult::Four),
        "five" => Some(GameResult::Five),
        "forfeit" => Some(GameResult::Forfeit),
        _ => None,
    }
}

/// Clamps each count to the budget, then raises the counts until they
/// cover every piece on the board.
fn parse_placed_count(obj: &Map<String, Value>, board: &Board) -> PerColor<u8> {
    let read = |color: &str| {
        obj.get("placedCount")
            .and_then(|counts| counts.get(color))
            .and_then(Value::as_u64)
            .map_or(0, |n| n.min(MAX_PIECES as u64) as u8)
    };
    let mut placed = PerColor::new(read("black"), read("white"));

    let (black, white) = board.count();
    let mut deficit = (black + white).saturating_sub(placed.black + placed.white);
    for color in Color::BOTH {
        let room = MAX_PIECES - placed[color];
        let add = room.min(deficit);
        placed[color] += add;
        deficit -= add;
    }
    placed
}

/// Clears pieces from the end of the board, in reverse row-major order,
/// while more pieces are on the board than both sides have placed.
fn trim_to_budget(board: &mut Board, placed: PerColor<u8>) {
    let (black, white) = board.count();
    let mut excess = (black + white).saturating_sub(placed.black + placed.white);
    for pos in (0..NUM_CELLS).rev().map(Position::from_index) {
        if excess == 0 {
            break;
        }
        if board.get(pos).is_some() {
            board.set(pos, None);
            excess -= 1;
        }
    }
}
