mod test_utils;

use floe_engine::{
    constants::START_FEN,
    evaluator::{Evaluator, Weights},
    moves::Move,
    time::SearchLimits,
    types::{mate_score, Side},
};
use test_utils::*;

fn depth_limits(depth: u32) -> SearchLimits {
    SearchLimits {
        depth,
        ..SearchLimits::default()
    }
}

#[test]
fn test_depth_one_returns_the_negamaxed_child_evaluation() {
    let mut engine = engine_with_position(SINGLE_QUIET_MOVE_FEN);

    let best = engine.search(&depth_limits(1));
    assert_eq!(best.to_move_string(), "a1b1");

    // Recompute the expected value by hand: make the move and negate the
    // static evaluation of the resulting position
    let mut position = position_from_fen(SINGLE_QUIET_MOVE_FEN);
    let mv = position.move_from_string("a1b1").expect("a1b1 is legal");
    position.make_move(mv);

    let mut evaluator = Evaluator::new(&Weights::default());
    let expected = -evaluator.evaluate(&position);

    assert_eq!(engine.last_value, expected);
}

#[test]
fn test_search_sees_the_immediate_win() {
    // a1b1 collects the last open tile and traps everything; Red wins 5:4
    let mut engine = engine_with_position(BLOCKED_CAPTURE_FEN);

    let best = engine.search(&depth_limits(4));

    assert_eq!(best.to_move_string(), "a1b1");
    assert_eq!(engine.last_value, mate_score(1));
}

#[test]
fn test_search_on_a_finished_game_returns_nothing() {
    let mut engine = engine_with_position(FINISHED_GAME_FEN);

    let best = engine.search(&depth_limits(2));

    assert_eq!(best, Move::INVALID);
}

#[test]
fn test_blocked_side_searches_the_pass() {
    let mut engine = engine_with_position(PASS_ONLY_FEN);

    let best = engine.search(&depth_limits(2));

    assert!(best.is_pass());
}

#[test]
fn test_search_is_stable_across_warm_table_repeats() {
    let mut engine = engine_with_position(SLIDING_RAYS_FEN);

    let cold = engine.search(&depth_limits(4));
    let cold_value = engine.last_value;

    // The second search starts from the stored entries and must agree
    let warm = engine.search(&depth_limits(4));

    assert_eq!(cold.to_move_string(), warm.to_move_string());
    assert_eq!(engine.last_value, cold_value);
}

#[test]
fn test_search_leaves_the_position_unchanged() {
    let mut engine = engine_with_position(START_FEN);
    let fen_before = engine.position.to_fen();
    let hash_before = engine.position.board.hash;

    engine.search(&depth_limits(3));

    assert_eq!(engine.position.to_fen(), fen_before);
    assert_eq!(engine.position.board.hash, hash_before);
    assert_incremental_state_consistent(&engine.position);
}

#[test]
fn test_search_reports_progress() {
    let mut engine = engine_with_position(START_FEN);

    engine.search(&depth_limits(3));

    assert_eq!(engine.last_depth, 3);
    assert!(engine.nodes_searched() > 0);
    assert!(!engine.pv_moves().is_empty());
}

#[test]
fn test_placement_search_places_a_piece() {
    let mut engine = engine_with_position(ALL_ONES_FEN);

    let best = engine.search(&depth_limits(2));

    assert!(best.is_placement());
    assert_eq!(best.side(), Side::Red);
    assert!(engine.position.is_valid_move(best));
}

#[test]
fn test_new_game_resets_the_learned_tables() {
    let mut engine = engine_with_position(SLIDING_RAYS_FEN);
    engine.search(&depth_limits(4));

    engine.new_game();

    // With the transposition table cleared, the next search starts from
    // scratch and still finds the same move
    let best = engine.search(&depth_limits(2));
    assert!(engine.position.is_valid_move(best));
}

#[test]
fn test_depth_one_on_start_position_picks_a_top_capture() {
    let mut engine = engine_with_position(START_FEN);

    let best = engine.search(&depth_limits(1));

    assert!(engine.position.is_valid_move(best));
    assert!(best.fish_count() >= 1);
}
