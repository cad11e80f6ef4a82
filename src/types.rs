use crate::{
    constants::{INFINITY_SCORE, MAX_PLY, NO_SCORE},
    moves::Move,
};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

/// The six sliding directions of the hex-packed board. The four diagonals
/// step by 7, 8 or 9 square indices depending on rank parity.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    West = 0,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::West,
            Direction::East,
            Direction::NorthWest,
            Direction::NorthEast,
            Direction::SouthWest,
            Direction::SouthEast,
        ]
        .into_iter()
    }

    /// The nearest blocker along West/SouthWest/SouthEast rays has the
    /// highest square index; along the other rays it has the lowest.
    pub fn scans_from_msb(self) -> bool {
        matches!(
            self,
            Direction::West | Direction::SouthWest | Direction::SouthEast
        )
    }
}

/// Contents of a board cell. The discriminants are chosen so a cell state
/// fits the 3-bit tile field of the move codec; a consumed square ("hole")
/// uses `Empty`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    RedPenguin = 0,
    BluePenguin = 1,
    Empty = 3,
    Fish1 = 4,
    Fish2 = 5,
    Fish3 = 6,
    Fish4 = 7,
}

impl Piece {
    /// Tile value of a cell state; pieces and holes are worth nothing.
    pub fn fish_count(self) -> i32 {
        match self {
            Piece::Fish1 => 1,
            Piece::Fish2 => 2,
            Piece::Fish3 => 3,
            Piece::Fish4 => 4,
            _ => 0,
        }
    }

    pub fn from_fish_count(count: i32) -> Piece {
        match count {
            1 => Piece::Fish1,
            2 => Piece::Fish2,
            3 => Piece::Fish3,
            4 => Piece::Fish4,
            _ => Piece::Empty,
        }
    }

    pub fn is_fish(self) -> bool {
        matches!(self, Piece::Fish1 | Piece::Fish2 | Piece::Fish3 | Piece::Fish4)
    }

    pub fn is_penguin(self) -> bool {
        matches!(self, Piece::RedPenguin | Piece::BluePenguin)
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Piece::RedPenguin => Some(Side::Red),
            Piece::BluePenguin => Some(Side::Blue),
            _ => None,
        }
    }

    /// Cell character used by the position string format.
    pub fn symbol(self) -> char {
        match self {
            Piece::RedPenguin => 'r',
            Piece::BluePenguin => 'b',
            Piece::Empty => '0',
            Piece::Fish1 => '1',
            Piece::Fish2 => '2',
            Piece::Fish3 => '3',
            Piece::Fish4 => '4',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            'r' => Some(Piece::RedPenguin),
            'b' => Some(Piece::BluePenguin),
            '0' => Some(Piece::Empty),
            '1' => Some(Piece::Fish1),
            '2' => Some(Piece::Fish2),
            '3' => Some(Piece::Fish3),
            '4' => Some(Piece::Fish4),
            _ => None,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Red = 0,
    Blue = 1,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn penguin(self) -> Piece {
        match self {
            Side::Red => Piece::RedPenguin,
            Side::Blue => Piece::BluePenguin,
        }
    }

    pub fn iter() -> impl Iterator<Item = Side> {
        [Side::Red, Side::Blue].into_iter()
    }
}

/// Per-ply record of a played move and the hash before it, for undo and for
/// cycle detection when reconstructing the principal variation.
#[derive(Copy, Clone, Debug)]
pub struct GameRecord {
    pub mv: Move,
    pub hash: u64,
}

impl GameRecord {
    pub fn empty() -> Self {
        Self {
            mv: Move::INVALID,
            hash: 0,
        }
    }
}

/// A winning line is scored as INFINITY minus the ply at which the win
/// occurs, so shorter wins score higher.
pub fn mate_score(ply: usize) -> i32 {
    INFINITY_SCORE - ply as i32
}

pub fn mated_score(ply: usize) -> i32 {
    -INFINITY_SCORE + ply as i32
}

pub fn is_mate_score(value: i32) -> bool {
    value != NO_SCORE
        && (value < -INFINITY_SCORE + MAX_PLY as i32 || value > INFINITY_SCORE - MAX_PLY as i32)
}

/// Plies until the forced end of the game encoded in a mate score, or
/// INFINITY for a regular score.
pub fn plies_to_mate(value: i32) -> i32 {
    if is_mate_score(value) {
        if value > 0 {
            1 + INFINITY_SCORE - value
        } else {
            1 + INFINITY_SCORE + value
        }
    } else {
        INFINITY_SCORE
    }
}

/// Protocol form of a score: `cp <n>` or `mate <±turns>`.
pub fn score_to_string(value: i32) -> String {
    if is_mate_score(value) {
        let plies = if value > 0 {
            INFINITY_SCORE - value + 1
        } else {
            INFINITY_SCORE + value + 1
        };
        let turns = plies / 2;
        if value < 0 {
            format!("mate -{}", turns)
        } else {
            format!("mate {}", turns)
        }
    } else {
        format!("cp {}", value)
    }
}
