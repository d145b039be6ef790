use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::types::{Color, Position};

pub const BOARD_SIZE: usize = 5;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
/// Vertical, horizontal and both diagonals; each line is walked forward only.
const LINE_AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

const NEUTRAL_CELLS: [(i32, i32); 5] = [(0, 0), (0, 4), (4, 0), (4, 4), (2, 2)];
const BLACK_ZONE_CELLS: [(i32, i32); 8] = [
    (0, 2),
    (1, 1),
    (1, 3),
    (2, 0),
    (2, 4),
    (3, 1),
    (3, 3),
    (4, 2),
];

/// Static partition of the board that gates diagonal slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    Neutral,
    BlackZone,
    WhiteZone,
}

impl Zone {
    /// The zone in which `color` may slide.
    pub fn home_of(color: Color) -> Self {
        match color {
            Color::Black => Zone::BlackZone,
            Color::White => Zone::WhiteZone,
        }
    }
}

static ZONES: Lazy<[Zone; NUM_CELLS]> = Lazy::new(build_zone_table);

fn build_zone_table() -> [Zone; NUM_CELLS] {
    let mut zones = [Zone::WhiteZone; NUM_CELLS];
    for (row, col) in NEUTRAL_CELLS {
        zones[row as usize * BOARD_SIZE + col as usize] = Zone::Neutral;
    }
    for (row, col) in BLACK_ZONE_CELLS {
        zones[row as usize * BOARD_SIZE + col as usize] = Zone::BlackZone;
    }
    zones
}

pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Zone of a cell, `None` off the board.
pub fn zone_of(pos: Position) -> Option<Zone> {
    pos.index().map(|idx| ZONES[idx])
}

/// Single-cell move in any of the 8 directions.
pub fn is_step(from: Position, to: Position) -> bool {
    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    dr.max(dc) == 1
}

/// 5x5 board represented by two 25-bit bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    black: u32,
    white: u32,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bitboards(&self) -> (u32, u32) {
        (self.black, self.white)
    }

    pub fn get(&self, pos: Position) -> Option<Color> {
        let square = pos.index().map(bit).unwrap_or(0);
        if (self.black & square) != 0 {
            Some(Color::Black)
        } else if (self.white & square) != 0 {
            Some(Color::White)
        } else {
            None
        }
    }

    /// True for an empty on-board cell.
    pub fn is_empty(&self, pos: Position) -> bool {
        pos.in_bounds() && self.get(pos).is_none()
    }

    /// Writes a cell. Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, cell: Option<Color>) {
        let Some(idx) = pos.index() else {
            return;
        };
        let square = bit(idx);
        self.black &= !square;
        self.white &= !square;
        match cell {
            Some(Color::Black) => self.black |= square,
            Some(Color::White) => self.white |= square,
            None => {}
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, color: Color) -> u8 {
        self.stones(color).count_ones() as u8
    }

    /// Cells occupied by `color`, row-major.
    pub fn positions_of(&self, color: Color) -> impl Iterator<Item = Position> {
        let mut mask = self.stones(color);
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let idx = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(Position::from_index(idx))
        })
    }

    pub fn to_rows(&self) -> [[Option<Color>; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[None; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all() {
            rows[pos.row as usize][pos.col as usize] = self.get(pos);
        }
        rows
    }

    /// Movement legality against the pre-move board: a step onto an empty
    /// cell, or a slide inside the mover's zone. The slide destination is
    /// not checked for occupancy here.
    pub fn is_legal_move(&self, from: Position, to: Position, color: Color) -> bool {
        if !from.in_bounds() || !to.in_bounds() {
            return false;
        }
        (is_step(from, to) && self.is_empty(to)) || self.is_diagonal_slide(from, to, color)
    }

    pub fn is_diagonal_slide(&self, from: Position, to: Position, color: Color) -> bool {
        let dr = to.row - from.row;
        let dc = to.col - from.col;
        let distance = dr.abs();
        if distance < 2 || distance != dc.abs() {
            return false;
        }

        let home = Zone::home_of(color);
        if zone_of(from) != Some(home) {
            return false;
        }

        let (sr, sc) = (dr.signum(), dc.signum());
        for k in 1..=distance {
            let cell = from.offset(sr * k, sc * k);
            if zone_of(cell) != Some(home) {
                return false;
            }
            if k < distance && !self.is_empty(cell) {
                return false;
            }
        }
        true
    }

    /// Flips every opponent run sandwiched between `origin` and another
    /// `color` piece, each of the 8 directions on its own. Returns the
    /// flipped cells.
    pub fn resolve_flips(&mut self, origin: Position, color: Color) -> Vec<Position> {
        let opponent = color.opponent();
        let mut flipped = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut run = Vec::new();
            let mut cursor = origin.offset(dr, dc);
            while self.get(cursor) == Some(opponent) {
                run.push(cursor);
                cursor = cursor.offset(dr, dc);
            }
            if !run.is_empty() && self.get(cursor) == Some(color) {
                flipped.extend(run);
            }
        }

        for pos in &flipped {
            self.set(*pos, Some(color));
        }
        flipped
    }

    /// Length of every maximal run of `color` along the 4 axes. A run is
    /// counted once, from the cell whose predecessor is not `color`.
    pub fn line_runs(&self, color: Color) -> Vec<u8> {
        let mut runs = Vec::new();
        for start in self.positions_of(color) {
            for (dr, dc) in LINE_AXES {
                if self.get(start.offset(-dr, -dc)) == Some(color) {
                    continue;
                }
                let mut len = 0u8;
                let mut cursor = start;
                while self.get(cursor) == Some(color) {
                    len += 1;
                    cursor = cursor.offset(dr, dc);
                }
                runs.push(len);
            }
        }
        runs
    }

    /// Longest contiguous line of `color`.
    pub fn max_line(&self, color: Color) -> u8 {
        self.line_runs(color).into_iter().max().unwrap_or(0)
    }

    fn stones(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Builds a board from five rows of `B`, `W` and `.`.
    #[cfg(test)]
    pub(crate) fn parse(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'B' => Some(Color::Black),
                    'W' => Some(Color::White),
                    _ => None,
                };
                board.set(Position::new(row as i32, col as i32), cell);
            }
        }
        board
    }
}

impl Serialize for Board {
    /// Five rows of `"black"`, `"white"` or `null`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

fn bit(idx: usize) -> u32 {
    if idx < NUM_CELLS { 1u32 << idx } else { 0 }
}
