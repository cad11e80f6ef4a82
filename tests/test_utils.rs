#![allow(dead_code)]

/// Shared fixtures and helpers for the integration test suites.
use floe_engine::{
    bitboard::BitBoard,
    engine::Engine,
    moves::MoveList,
    position::Position,
};

/// Red to move with exactly one legal move, the capture of the tile on b1.
/// Playing it traps every piece on the board, ending the game 5:4 for Red.
pub const BLOCKED_CAPTURE_FEN: &str = concat!(
    "r1b00000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 4 4 8"
);

/// Every piece on the board is walled in and more than 8 plies were played;
/// Red leads 5:4.
pub const FINISHED_GAME_FEN: &str = concat!(
    "r0b00000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 5 4 8"
);

/// Like FINISHED_GAME_FEN but with equal scores.
pub const FINISHED_DRAW_FEN: &str = concat!(
    "r0b00000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 4 4 8"
);

/// Red to move with the single quiet move a1b1. Blue's only reply collects
/// one tile while a two-tile square remains on the board, so quiescence
/// stands pat right after a1b1.
pub const SINGLE_QUIET_MOVE_FEN: &str = concat!(
    "r10b1000",
    "00000000",
    "00000000",
    "00000002",
    "00000000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 4 4 8"
);

/// Red's only mobile piece sits on d4 with blockers on every ray: exactly
/// five destinations (b4, c4, e4, c5, d5) carrying tiles worth 1-3.
pub const SLIDING_RAYS_FEN: &str = concat!(
    "0000000b",
    "00000000",
    "00000000",
    "012r3000",
    "00120000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 4 4 8"
);

/// Red is completely walled in while Blue's d4 piece still has moves; Red
/// can only pass.
pub const PASS_ONLY_FEN: &str = concat!(
    "r0000000",
    "00000000",
    "00000000",
    "001b1000",
    "00000000",
    "00000000",
    "00000000",
    "bbb00rrr",
    " r 4 4 8"
);

/// A board covered in single tiles, for placement-phase tests.
pub const ALL_ONES_FEN: &str = concat!(
    "11111111",
    "11111111",
    "11111111",
    "11111111",
    "11111111",
    "11111111",
    "11111111",
    "11111111",
    " r 0 0 0"
);

pub fn position_from_fen(fen: &str) -> Position {
    Position::from_fen(fen)
        .unwrap_or_else(|error| panic!("failed to load position '{}': {}", fen, error))
}

pub fn engine_with_position(fen: &str) -> Engine {
    let mut engine = Engine::new();
    engine
        .position
        .set_fen(fen)
        .unwrap_or_else(|error| panic!("failed to load position '{}': {}", fen, error));
    engine
}

/// Sorted move strings of a generated list, for order-independent compares.
pub fn move_strings(list: &MoveList) -> Vec<String> {
    let mut strings: Vec<String> = (0..list.count)
        .map(|i| list.at(i).to_move_string())
        .collect();
    strings.sort();
    strings
}

/// The tile bookkeeping invariant: collected plus remaining always equals
/// the game total.
pub fn assert_score_conserved(position: &Position) {
    let board = &position.board;
    let remaining = board.fish_value_in(BitBoard(!0u64));

    assert_eq!(
        board.collected[0] + board.collected[1] + remaining,
        board.total_fishes,
        "tile value leaked in position {}",
        position.to_fen()
    );
}

/// The incremental state must always match a from-scratch recomputation.
pub fn assert_incremental_state_consistent(position: &Position) {
    assert_eq!(
        position.board.hash,
        position.calculate_hash(),
        "incremental hash diverged in position {}",
        position.to_fen()
    );
    assert_eq!(
        position.board.bit_trapped,
        position.calculate_trapped(),
        "incremental trapped mask diverged in position {}",
        position.to_fen()
    );
    assert_eq!(
        position.board.bit_all.0,
        position.board.bit_fishes[0].0
            | position.board.bit_penguins[0].0
            | position.board.bit_penguins[1].0,
        "blocker board diverged in position {}",
        position.to_fen()
    );
}
