mod test_utils;

use floe_engine::{
    moves::Move,
    pv::PrincipalVariation,
    time::SearchLimits,
    types::{Piece, Square},
};
use test_utils::*;

fn sample_move(from: Square, to: Square) -> Move {
    Move::new(Piece::RedPenguin, from, to, Piece::Fish1)
}

#[test]
fn test_collected_line_stops_on_a_repeated_hash() {
    let mut pv = PrincipalVariation::new();

    assert!(pv.add_collected_move(0, sample_move(Square::A1, Square::B1), 111));
    assert!(pv.add_collected_move(1, sample_move(Square::C1, Square::D1), 222));

    // The same position again: the walk must refuse it and terminate
    assert!(!pv.add_collected_move(2, sample_move(Square::E1, Square::F1), 111));

    assert_eq!(pv.moves().len(), 2);
}

#[test]
fn test_search_line_wins_over_the_collected_line() {
    let mut pv = PrincipalVariation::new();

    pv.add_collected_move(0, sample_move(Square::A1, Square::B1), 1);

    let mut subtree = [Move::INVALID; floe_engine::constants::MAX_PLY];
    subtree[0] = sample_move(Square::C1, Square::D1);
    pv.set_from_search(sample_move(Square::E1, Square::F1), &subtree);

    let moves = pv.moves();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].to_move_string(), "e1f1");
    assert_eq!(moves[1].to_move_string(), "c1d1");
}

#[test]
fn test_line_string_format() {
    let mut pv = PrincipalVariation::new();

    let mut subtree = [Move::INVALID; floe_engine::constants::MAX_PLY];
    subtree[0] = Move::PASS;
    pv.set_from_search(sample_move(Square::A1, Square::B1), &subtree);

    assert_eq!(pv.line_string(), "a1b1 0000");
}

#[test]
fn test_reset_clears_both_lines() {
    let mut pv = PrincipalVariation::new();

    pv.add_collected_move(0, sample_move(Square::A1, Square::B1), 1);
    let mut subtree = [Move::INVALID; floe_engine::constants::MAX_PLY];
    pv.set_from_search(sample_move(Square::C1, Square::D1), &subtree);

    pv.reset();

    assert!(pv.moves().is_empty());
    assert!(pv.line_string().is_empty());
}

#[test]
fn test_search_pv_starts_with_the_best_move() {
    let mut engine = engine_with_position(SINGLE_QUIET_MOVE_FEN);

    let limits = SearchLimits {
        depth: 1,
        ..SearchLimits::default()
    };
    let best = engine.search(&limits);

    let pv = engine.pv_moves();
    assert!(!pv.is_empty());
    assert_eq!(pv[0].id(), best.id());
}

#[test]
fn test_deeper_search_extends_the_line() {
    let mut engine = engine_with_position(SLIDING_RAYS_FEN);

    let limits = SearchLimits {
        depth: 3,
        ..SearchLimits::default()
    };
    engine.search(&limits);

    // Three plies of search reach past the first reply
    assert!(engine.pv_moves().len() >= 2);
}
