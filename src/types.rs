use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::{self, Board};
use crate::error::ActionError;

/// A side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Black, Color::White];

    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Reads `"black"` / `"white"` (case-insensitive) from loosely typed input.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()?.to_ascii_lowercase().as_str() {
            "black" => Some(Color::Black),
            "white" => Some(Color::White),
            _ => None,
        }
    }
}

/// A board coordinate. Signed so out-of-range requests stay representable
/// until the transition rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        board::in_bounds(self.row, self.col)
    }

    pub fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Row-major cell index, `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row as usize * board::BOARD_SIZE + self.col as usize)
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new(
            (idx / board::BOARD_SIZE) as i32,
            (idx % board::BOARD_SIZE) as i32,
        )
    }

    /// Every on-board coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..board::NUM_CELLS).map(Position::from_index)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let row = value.get("row")?.as_i64()?;
        let col = value.get("col")?.as_i64()?;
        Some(Self::new(i32::try_from(row).ok()?, i32::try_from(col).ok()?))
    }
}

/// A value kept once per side, serialized as `{black, white}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PerColor<T> {
    pub black: T,
    pub white: T,
}

impl<T> PerColor<T> {
    pub fn new(black: T, white: T) -> Self {
        Self { black, white }
    }
}

impl<T> Index<Color> for PerColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }
}

impl<T> IndexMut<Color> for PerColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Waiting,
    Playing,
    Finished,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    /// The mover completed exactly four in a row.
    Four,
    /// The mover completed five in a row and lost.
    Five,
    Forfeit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Place,
    Move,
}

/// One requested turn: drop a new piece on `to`, or move the piece on
/// `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub color: Color,
    pub to: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Position>,
}

impl Action {
    pub fn place(color: Color, to: Position) -> Self {
        Self {
            kind: ActionKind::Place,
            color,
            to,
            from: None,
        }
    }

    pub fn movement(color: Color, from: Position, to: Position) -> Self {
        Self {
            kind: ActionKind::Move,
            color,
            to,
            from: Some(from),
        }
    }

    /// Parses an untyped action request.
    ///
    /// Unknown `type` is `invalid_action`, unknown `color` is
    /// `invalid_color`, missing or non-integer coordinates are
    /// `invalid_target`. Range checks are left to the transition.
    pub fn from_value(value: &Value) -> Result<Self, ActionError> {
        let obj = value.as_object().ok_or(ActionError::InvalidAction)?;
        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("place") => ActionKind::Place,
            Some("move") => ActionKind::Move,
            _ => return Err(ActionError::InvalidAction),
        };
        let color = obj
            .get("color")
            .and_then(Color::from_value)
            .ok_or(ActionError::InvalidColor)?;
        let to = obj
            .get("to")
            .and_then(Position::from_value)
            .ok_or(ActionError::InvalidTarget)?;

        match kind {
            ActionKind::Place => Ok(Action::place(color, to)),
            ActionKind::Move => {
                let from = obj
                    .get("from")
                    .and_then(Position::from_value)
                    .ok_or(ActionError::InvalidTarget)?;
                Ok(Action::movement(color, from, to))
            }
        }
    }
}

/// Record of the last accepted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Position>,
    pub to: Position,
    #[serde(default)]
    pub flipped: Vec<Position>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

/// Full state of one match.
///
/// Contract:
/// - `winner` and `result` are `None` unless `status` is `Finished`.
/// - `turn` is frozen once `status` is `Finished`.
/// - `placed_count` never exceeds `MAX_PIECES` per side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub placed_count: PerColor<u8>,
    pub turn: Color,
    pub status: Status,
    pub ready: PerColor<bool>,
    pub winner: Option<Color>,
    pub result: Option<GameResult>,
    pub last_move: Option<LastMove>,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }
}

/// `{ok: true, state}` or `{ok: false, error}` as handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ActionError>,
}

impl From<Result<GameState, ActionError>> for ActionResponse {
    fn from(result: Result<GameState, ActionError>) -> Self {
        match result {
            Ok(state) => Self {
                ok: true,
                state: Some(state),
                error: None,
            },
            Err(error) => Self {
                ok: false,
                state: None,
                error: Some(error),
            },
        }
    }
}
