use crate::ai::movegen;
use crate::board::Board;
use crate::types::{Color, GameState};

/// Score of a decided game, from the winner's side.
pub const WIN_SCORE: i32 = 100_000;

// Indexed by run length; 4 is weighted close to a win. The opponent side is
// weighted slightly higher so defence wins ties.
const OWN_LINE_WEIGHTS: [i32; 5] = [0, 10, 60, 420, 8000];
const OPP_LINE_WEIGHTS: [i32; 5] = [0, 10, 70, 440, 8200];
const PIECE_WEIGHT: i32 = 5;
const MOBILITY_WEIGHT: i32 = 2;

/// Static evaluation from `color`'s perspective.
pub fn evaluate(state: &GameState, color: Color) -> i32 {
    if state.is_finished() {
        return terminal_score(state, color);
    }

    let opponent = color.opponent();
    line_score(&state.board, color)
        + piece_score(&state.board, color, opponent)
        + mobility_score(state, color, opponent)
}

fn terminal_score(state: &GameState, color: Color) -> i32 {
    match state.winner {
        Some(winner) if winner == color => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

fn line_score(board: &Board, color: Color) -> i32 {
    weighted_runs(board, color, &OWN_LINE_WEIGHTS)
        - weighted_runs(board, color.opponent(), &OPP_LINE_WEIGHTS)
}

fn weighted_runs(board: &Board, color: Color, weights: &[i32; 5]) -> i32 {
    board
        .line_runs(color)
        .into_iter()
        .filter(|len| (1..=4).contains(len))
        .map(|len| weights[len as usize])
        .sum()
}

fn piece_score(board: &Board, color: Color, opponent: Color) -> i32 {
    (board.count_of(color) as i32 - board.count_of(opponent) as i32) * PIECE_WEIGHT
}

fn mobility_score(state: &GameState, color: Color, opponent: Color) -> i32 {
    let own = movegen::legal_actions(state, color).len() as i32;
    let theirs = movegen::legal_actions(state, opponent).len() as i32;
    (own - theirs) * MOBILITY_WEIGHT
}
