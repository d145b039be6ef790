use serde::Serialize;

/// Reasons an action is rejected. Serialized as the snake_case code the
/// orchestration layer relays to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    #[error("game is not active")]
    GameNotActive,

    #[error("it is not this color's turn")]
    NotYourTurn,

    #[error("color must be black or white")]
    InvalidColor,

    #[error("target is off the board")]
    InvalidTarget,

    #[error("no pieces left to place")]
    NoPiecesLeft,

    #[error("target cell is occupied")]
    Occupied,

    #[error("source cell does not hold the mover's piece")]
    NotYourPiece,

    #[error("move is neither a step nor a zone slide")]
    InvalidMove,

    #[error("malformed action")]
    InvalidAction,
}

impl ActionError {
    /// Wire code, e.g. `"no_pieces_left"`.
    pub fn code(self) -> &'static str {
        match self {
            ActionError::GameNotActive => "game_not_active",
            ActionError::NotYourTurn => "not_your_turn",
            ActionError::InvalidColor => "invalid_color",
            ActionError::InvalidTarget => "invalid_target",
            ActionError::NoPiecesLeft => "no_pieces_left",
            ActionError::Occupied => "occupied",
            ActionError::NotYourPiece => "not_your_piece",
            ActionError::InvalidMove => "invalid_move",
            ActionError::InvalidAction => "invalid_action",
        }
    }
}
