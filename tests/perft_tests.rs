mod test_utils;

use floe_engine::constants::START_FEN;
use test_utils::*;

#[test]
fn test_perft_counts_from_the_start_position() {
    let mut position = position_from_fen(START_FEN);

    assert_eq!(position.perft(1), 61);
    assert_eq!(position.perft(2), 3608);
    assert_eq!(position.perft(3), 188_681);
}

#[test]
fn test_perft_is_reproducible() {
    let mut position = position_from_fen(START_FEN);

    let first = position.perft(3);
    let second = position.perft(3);

    assert_eq!(first, second);
}

#[test]
fn test_perft_leaves_the_position_unchanged() {
    let mut position = position_from_fen(START_FEN);
    let fen_before = position.to_fen();
    let hash_before = position.board.hash;

    position.perft(3);

    assert_eq!(position.to_fen(), fen_before);
    assert_eq!(position.board.hash, hash_before);
    assert_incremental_state_consistent(&position);
}

#[test]
fn test_perft_in_the_placement_phase() {
    let mut position = position_from_fen(ALL_ONES_FEN);

    assert_eq!(position.perft(1), 64);
    assert_eq!(position.perft(2), 64 * 63);
}

#[test]
fn test_perft_terminal_positions() {
    // One forced capture, after which every piece is trapped
    let mut position = position_from_fen(BLOCKED_CAPTURE_FEN);
    assert_eq!(position.perft(1), 1);
    assert_eq!(position.perft(2), 0);

    // Already over: no leaves at any depth
    let mut finished = position_from_fen(FINISHED_GAME_FEN);
    assert_eq!(finished.perft(1), 0);
    assert_eq!(finished.perft(3), 0);
}

#[test]
fn test_perft_counts_pass_plies() {
    // Blue is walled in while Red plays on, so the pass shows up as a single
    // branch at every other ply
    let mut position = position_from_fen(SLIDING_RAYS_FEN);

    assert_eq!(position.perft(1), 5);
    assert_eq!(position.perft(2), 5);
    assert_eq!(position.perft(3), 8);
    assert_eq!(position.perft(4), 6);
}

#[test]
fn test_divide_sums_to_perft() {
    let mut position = position_from_fen(START_FEN);

    let expected = position.perft(3);
    let breakdown = position.divide(3);

    assert_eq!(breakdown.len(), 61);
    assert_eq!(breakdown.iter().map(|(_, nodes)| nodes).sum::<u64>(), expected);
}

#[test]
fn test_divide_depth_one_counts_each_move_once() {
    let mut position = position_from_fen(SLIDING_RAYS_FEN);
    let breakdown = position.divide(1);

    assert_eq!(breakdown.len(), 5);
    assert!(breakdown.iter().all(|&(_, nodes)| nodes == 1));
}
