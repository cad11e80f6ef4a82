mod test_utils;

use floe_engine::{
    constants::START_FEN,
    position::Position,
    types::{Piece, Side, Square},
};
use test_utils::*;

#[test]
fn test_start_position_round_trips() {
    let position = position_from_fen(START_FEN);
    assert_eq!(position.to_fen(), START_FEN);
}

#[test]
fn test_loaded_cells_match_the_string() {
    let position = position_from_fen(SLIDING_RAYS_FEN);

    assert_eq!(position.board.value[Square::D4 as usize], Piece::RedPenguin);
    assert_eq!(position.board.value[Square::H1 as usize], Piece::BluePenguin);
    assert_eq!(position.board.value[Square::B4 as usize], Piece::Fish1);
    assert_eq!(position.board.value[Square::C4 as usize], Piece::Fish2);
    assert_eq!(position.board.value[Square::E4 as usize], Piece::Fish3);
    assert_eq!(position.board.value[Square::A1 as usize], Piece::Empty);

    assert_eq!(position.side, Side::Red);
    assert_eq!(position.hmc, 8);
    assert_eq!(position.board.collected, [4, 4]);
}

#[test]
fn test_scores_and_clock_are_corrected_upward() {
    // Eight pieces already placed, but the trailing fields claim nothing
    // happened: each placement was a ply that collected a tile
    let cells = &BLOCKED_CAPTURE_FEN[..64];
    let fen = format!("{} r 0 0 0", cells);

    let position = position_from_fen(&fen);

    assert_eq!(position.hmc, 8);
    assert_eq!(position.board.collected, [4, 4]);
    assert!(position.to_fen().ends_with(" r 4 4 8"));
}

#[test]
fn test_missing_scores_default_to_piece_counts() {
    let cells = &BLOCKED_CAPTURE_FEN[..64];
    let fen = format!("{} b", cells);

    let position = position_from_fen(&fen);

    assert_eq!(position.side, Side::Blue);
    assert_eq!(position.board.collected, [4, 4]);
}

#[test]
fn test_total_fishes_accounting() {
    let position = position_from_fen(SLIDING_RAYS_FEN);

    // 1+2+3 on rank 4, 1+2 on rank 5, plus the 8 already collected
    assert_eq!(position.board.total_fishes, 9 + 8);
    assert_score_conserved(&position);
}

#[test]
fn test_rejects_wrong_cell_count() {
    assert!(Position::from_fen("r1b r 0 0 0").is_err());
    assert!(Position::from_fen("").is_err());
}

#[test]
fn test_rejects_unknown_cell_character() {
    let mut cells = "1".repeat(64);
    cells.replace_range(10..11, "x");

    assert!(Position::from_fen(&format!("{} r 0 0 0", cells)).is_err());
}

#[test]
fn test_rejects_missing_or_bad_side() {
    let cells = "1".repeat(64);

    assert!(Position::from_fen(&cells).is_err());
    assert!(Position::from_fen(&format!("{} q 0 0 0", cells)).is_err());
}

#[test]
fn test_failed_load_leaves_the_position_unchanged() {
    let mut position = position_from_fen(SLIDING_RAYS_FEN);
    let before = position.to_fen();
    let hash_before = position.board.hash;

    assert!(position.set_fen("broken").is_err());
    assert!(position.set_fen(&format!("{} q", "2".repeat(64))).is_err());

    assert_eq!(position.to_fen(), before);
    assert_eq!(position.board.hash, hash_before);
}

#[test]
fn test_fen_round_trips_after_moves() {
    let mut position = position_from_fen(START_FEN);

    let list = position.generate_moves();
    let mv = list.at(0);
    position.make_move(mv);

    let fen = position.to_fen();
    let reloaded = position_from_fen(&fen);

    assert_eq!(reloaded.to_fen(), fen);
    assert_eq!(reloaded.board.hash, position.board.hash);
    assert_eq!(reloaded.board.bit_trapped, position.board.bit_trapped);
}
