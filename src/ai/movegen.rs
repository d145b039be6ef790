use std::collections::HashSet;

use crate::board::{self, DIAGONALS, DIRECTIONS, Zone};
use crate::game::MAX_PIECES;
use crate::types::{Action, Color, GameState, Position};

/// Every legal action for `color`, ignoring whose turn it is.
///
/// Order: placements row-major, then moves grouped by origin (row-major),
/// steps before slides. Slides are only emitted from distance 2 on since
/// the distance-1 diagonal is already a step.
pub fn legal_actions(state: &GameState, color: Color) -> Vec<Action> {
    let board = &state.board;
    let mut actions = Vec::new();
    let mut seen = HashSet::new();

    if state.placed_count[color] < MAX_PIECES {
        for to in Position::all().filter(|pos| board.is_empty(*pos)) {
            push_unique(&mut actions, &mut seen, Action::place(color, to));
        }
    }

    let home = Zone::home_of(color);
    for from in board.positions_of(color) {
        for (dr, dc) in DIRECTIONS {
            let to = from.offset(dr, dc);
            if board.is_empty(to) {
                push_unique(&mut actions, &mut seen, Action::movement(color, from, to));
            }
        }

        if board::zone_of(from) != Some(home) {
            continue;
        }
        for (dr, dc) in DIAGONALS {
            let mut distance = 1;
            loop {
                let to = from.offset(dr * distance, dc * distance);
                if board::zone_of(to) != Some(home) || !board.is_empty(to) {
                    break;
                }
                if distance >= 2 {
                    push_unique(&mut actions, &mut seen, Action::movement(color, from, to));
                }
                distance += 1;
            }
        }
    }

    actions
}

fn push_unique(actions: &mut Vec<Action>, seen: &mut HashSet<Action>, action: Action) {
    if seen.insert(action) {
        actions.push(action);
    }
}
