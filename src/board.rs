use crate::{
    bitboard::BitBoard,
    constants::{NUM_SIDES, NUM_SQUARES},
    types::{Piece, Side, Square},
    zobrist_hash::{red_collected_key, square_key},
};

/// The raw board state: one cell value per square plus the redundant
/// bitboards derived from it, the running scores and the incremental hash.
///
/// `bit_fishes[0]` holds every square without a tile: consumed holes *and*
/// squares currently under a piece. `bit_all` (holes plus pieces) is the set
/// of blockers; everything outside it bears a 1-4 tile.
pub struct Board {
    pub value: [Piece; NUM_SQUARES],
    pub bit_penguins: [BitBoard; NUM_SIDES],
    pub bit_fishes: [BitBoard; 5],
    pub bit_all: BitBoard,
    pub bit_trapped: BitBoard,
    pub collected: [i32; NUM_SIDES],
    pub total_fishes: i32,
    pub hash: u64,
}

impl Board {
    /// An empty board: every square is a hole.
    pub fn empty() -> Self {
        Self {
            value: [Piece::Empty; NUM_SQUARES],
            bit_penguins: [BitBoard::EMPTY; NUM_SIDES],
            bit_fishes: [
                BitBoard(!0u64),
                BitBoard::EMPTY,
                BitBoard::EMPTY,
                BitBoard::EMPTY,
                BitBoard::EMPTY,
            ],
            bit_all: BitBoard(!0u64),
            bit_trapped: BitBoard::EMPTY,
            collected: [0; NUM_SIDES],
            total_fishes: 0,
            hash: 0,
        }
    }

    /// Put a piece on a square, keeping cell, bitboard and hash in sync.
    /// The square must already be tile-free.
    pub fn add_penguin(&mut self, side: Side, square: Square) {
        self.bit_penguins[side as usize].set_bit(square);
        self.value[square as usize] = side.penguin();
        self.hash ^= square_key(square, side.penguin());
    }

    /// Remove a piece, leaving a hole behind.
    pub fn remove_penguin(&mut self, side: Side, square: Square) {
        self.bit_penguins[side as usize].clear_bit(square);
        self.value[square as usize] = Piece::Empty;
        self.hash ^= square_key(square, side.penguin());
    }

    /// Remove a piece without writing the cell; the caller restores the
    /// tile that the square held before the piece arrived.
    pub fn lift_penguin(&mut self, side: Side, square: Square) {
        self.bit_penguins[side as usize].clear_bit(square);
        self.hash ^= square_key(square, side.penguin());
    }

    /// Move the square's tile into class 0. The cell value is left for the
    /// caller to overwrite with the arriving piece.
    pub fn consume_fish(&mut self, square: Square) {
        let fish = self.value[square as usize];
        debug_assert!(fish.is_fish());

        self.bit_fishes[fish.fish_count() as usize].clear_bit(square);
        self.bit_fishes[0].set_bit(square);
        self.hash ^= square_key(square, fish);
    }

    /// Put a tile back on a square that a piece just vacated.
    pub fn restore_fish(&mut self, square: Square, fish: Piece) {
        debug_assert!(fish.is_fish());

        self.value[square as usize] = fish;
        self.bit_fishes[fish.fish_count() as usize].set_bit(square);
        self.bit_fishes[0].clear_bit(square);
        self.hash ^= square_key(square, fish);
    }

    /// Adjust a side's collected score. Red's score participates in the
    /// hash, so its key is toggled around the update.
    pub fn add_collected(&mut self, side: Side, amount: i32) {
        if side == Side::Red {
            self.hash ^= red_collected_key(self.collected[Side::Red as usize]);
        }

        self.collected[side as usize] += amount;

        if side == Side::Red {
            self.hash ^= red_collected_key(self.collected[Side::Red as usize]);
        }
    }

    pub fn all_penguins(&self) -> BitBoard {
        BitBoard(self.bit_penguins[Side::Red as usize].0 | self.bit_penguins[Side::Blue as usize].0)
    }

    /// Largest tile value still on the board.
    pub fn max_fishes_on_board(&self) -> i32 {
        for fish_count in (1..5).rev() {
            if !self.bit_fishes[fish_count].is_empty() {
                return fish_count as i32;
            }
        }
        0
    }

    /// Tile value remaining on the board, over an optional mask of squares.
    pub fn fish_value_in(&self, area: BitBoard) -> i32 {
        let mut value = 0;
        for fish_count in 1..5 {
            value += fish_count as i32 * (BitBoard(area.0 & self.bit_fishes[fish_count].0).count() as i32);
        }
        value
    }
}
