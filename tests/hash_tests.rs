/// Transposition table unit tests: packing round trips, bound kinds,
/// collision handling and the mate-distance correction.
mod test_utils;

use floe_engine::{
    hash::{HashFlag, TranspositionTable},
    moves::Move,
    types::{mate_score, mated_score, Piece, Square},
};

fn test_move() -> Move {
    Move::new(Piece::RedPenguin, Square::C2, Square::F5, Piece::Fish3)
}

#[test]
fn test_store_and_probe_round_trip() {
    let mut table = TranspositionTable::new(1);
    let key = 0x1234_5678_9ABC_DEF0;

    table.store(key, 12, 7, HashFlag::Exact, 345, test_move());

    let probe = table.probe(key, 12);
    assert_eq!(probe.flag, HashFlag::Exact);
    assert_eq!(probe.depth, 7);
    assert_eq!(probe.value, 345);
    assert_eq!(probe.mv, test_move().id());
}

#[test]
fn test_probe_unknown_key() {
    let table = TranspositionTable::new(1);
    let probe = table.probe(0xDEAD_BEEF, 0);

    assert_eq!(probe.flag, HashFlag::NotFound);
    assert_eq!(probe.mv, Move::INVALID);
}

#[test]
fn test_bound_kinds_round_trip() {
    let mut table = TranspositionTable::new(1);

    for (key, flag) in [
        (101u64, HashFlag::Exact),
        (102u64, HashFlag::Alpha),
        (103u64, HashFlag::Beta),
    ] {
        table.store(key, 4, 3, flag, -250, Move::PASS);
        assert_eq!(table.probe(key, 4).flag, flag);
        assert_eq!(table.probe(key, 4).value, -250);
    }
}

#[test]
fn test_negative_scores_round_trip() {
    let mut table = TranspositionTable::new(1);

    for value in [-30000, -1, 0, 1, 12345] {
        table.store(7, 0, 1, HashFlag::Exact, value, test_move());
        assert_eq!(table.probe(7, 0).value, value);
    }
}

#[test]
fn test_colliding_slot_reads_as_absent() {
    let mut table = TranspositionTable::new(1);
    let key = 0xABCD_0000_1111_2222;

    // Same slot (low bits unchanged), different full key
    let colliding = key ^ (1u64 << 40);

    table.store(key, 0, 5, HashFlag::Exact, 10, test_move());

    assert_eq!(table.probe(key, 0).flag, HashFlag::Exact);
    assert_eq!(table.probe(colliding, 0).flag, HashFlag::NotFound);

    // Always-replace: the colliding store evicts the original entry
    table.store(colliding, 0, 2, HashFlag::Beta, 20, Move::PASS);
    assert_eq!(table.probe(key, 0).flag, HashFlag::NotFound);
    assert_eq!(table.probe(colliding, 0).flag, HashFlag::Beta);
}

#[test]
fn test_mate_distance_correction() {
    let mut table = TranspositionTable::new(1);
    let key = 42;

    // A win found 10 plies into the game, probed 2 plies deeper: the mate is
    // now 2 plies closer
    table.store(key, 10, 9, HashFlag::Exact, mate_score(10), test_move());
    assert_eq!(table.probe(key, 10).value, mate_score(10));
    assert_eq!(table.probe(key, 12).value, mate_score(12));

    // Same adjustment with the opposite sign for a loss
    table.store(key, 10, 9, HashFlag::Exact, mated_score(10), test_move());
    assert_eq!(table.probe(key, 10).value, mated_score(10));
    assert_eq!(table.probe(key, 12).value, mated_score(12));
}

#[test]
fn test_regular_scores_ignore_the_ply() {
    let mut table = TranspositionTable::new(1);

    table.store(55, 3, 6, HashFlag::Exact, 777, test_move());
    assert_eq!(table.probe(55, 30).value, 777);
}

#[test]
fn test_reset_clears_all_entries() {
    let mut table = TranspositionTable::new(1);

    table.store(1001, 0, 3, HashFlag::Exact, 1, test_move());
    table.reset();

    assert_eq!(table.probe(1001, 0).flag, HashFlag::NotFound);
}

#[test]
fn test_size_rounds_down_to_a_power_of_two() {
    let mut table = TranspositionTable::new(1);

    assert_eq!(table.set_size_mb(1), 1);
    assert_eq!(table.set_size_mb(3), 2);
    assert_eq!(table.set_size_mb(100), 64);
    assert_eq!(table.set_size_mb(5000), 2048);
}

#[test]
fn test_depth_range_round_trips() {
    let mut table = TranspositionTable::new(1);

    for depth in [0, 1, 60, 127] {
        table.store(9, 0, depth, HashFlag::Exact, 0, test_move());
        assert_eq!(table.probe(9, 0).depth, depth);
    }
}
