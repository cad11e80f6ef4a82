mod test_utils;

use floe_engine::{
    constants::START_FEN,
    moves::Move,
    types::{Piece, Side, Square},
};
use test_utils::*;

#[test]
fn test_single_capture_between_pieces() {
    let position = position_from_fen(BLOCKED_CAPTURE_FEN);
    let list = position.generate_moves();

    assert_eq!(list.count, 1);
    assert_eq!(list.at(0).to_move_string(), "a1b1");
    assert_eq!(list.at(0).fish(), Piece::Fish1);
    assert!(!list.at(0).is_placement());
}

#[test]
fn test_sliding_stops_at_blockers() {
    let position = position_from_fen(SLIDING_RAYS_FEN);
    let list = position.generate_moves();

    assert_eq!(
        move_strings(&list),
        vec!["d4b4", "d4c4", "d4c5", "d4d5", "d4e4"]
    );

    for i in 0..list.count {
        let mv = list.at(i);
        let expected = match mv.to_square() {
            Square::B4 | Square::C5 => Piece::Fish1,
            Square::C4 | Square::D5 => Piece::Fish2,
            Square::E4 => Piece::Fish3,
            other => panic!("unexpected destination {:?}", other),
        };
        assert_eq!(mv.fish(), expected);
    }
}

#[test]
fn test_placement_phase_targets_single_tiles() {
    let position = position_from_fen(ALL_ONES_FEN);
    let list = position.generate_moves();

    assert_eq!(list.count, 64);

    for i in 0..list.count {
        let mv = list.at(i);
        assert!(mv.is_placement());
        assert_eq!(mv.fish(), Piece::Fish1);
        assert!(position.is_valid_move(mv));
    }
}

#[test]
fn test_placement_skips_bigger_tiles() {
    // Alternating single and double tiles: only the 32 singles are legal
    let fen = concat!(
        "12121212",
        "12121212",
        "12121212",
        "12121212",
        "12121212",
        "12121212",
        "12121212",
        "12121212",
        " b 0 0 0"
    );
    let position = position_from_fen(fen);
    let list = position.generate_moves();

    assert_eq!(list.count, 32);

    for i in 0..list.count {
        assert_eq!(position.board.value[list.at(i).to_square() as usize], Piece::Fish1);
        assert_eq!(list.at(i).side(), Side::Blue);
    }
}

#[test]
fn test_blocked_side_gets_the_pass_move() {
    let position = position_from_fen(PASS_ONLY_FEN);
    let list = position.generate_moves();

    assert_eq!(list.count, 1);
    assert!(list.at(0).is_pass());
    assert_eq!(list.at(0).to_move_string(), "0000");
    assert!(position.is_valid_move(Move::PASS));
}

#[test]
fn test_finished_game_generates_nothing() {
    let position = position_from_fen(FINISHED_GAME_FEN);
    let list = position.generate_moves();

    assert_eq!(list.count, 0);
    assert!(position.game_over());
}

#[test]
fn test_surrounded_piece_is_trapped() {
    let position = position_from_fen(BLOCKED_CAPTURE_FEN);

    for square in [
        Square::A8,
        Square::B8,
        Square::C8,
        Square::F8,
        Square::G8,
        Square::H8,
    ] {
        assert!(
            position.board.bit_trapped.is_bit_set(square),
            "{} should be trapped",
            square.name()
        );
    }

    // The two pieces next to the b1 tile can still move
    assert!(!position.board.bit_trapped.is_bit_set(Square::A1));
    assert!(!position.board.bit_trapped.is_bit_set(Square::C1));
}

#[test]
fn test_single_move_list() {
    let position = position_from_fen(BLOCKED_CAPTURE_FEN);
    let mv = position.move_from_string("a1b1").expect("a1b1 is legal");

    let list = position.single_move_list(mv);
    assert_eq!(list.count, 1);
    assert_eq!(list.at(0), mv);

    let finished = position_from_fen(FINISHED_GAME_FEN);
    assert_eq!(finished.single_move_list(mv).count, 0);
}

#[test]
fn test_is_valid_move_rejections() {
    let position = position_from_fen(BLOCKED_CAPTURE_FEN);

    // Wrong side
    let blue_move = Move::new(Piece::BluePenguin, Square::C1, Square::B1, Piece::Fish1);
    assert!(!position.is_valid_move(blue_move));

    // Wrong tile count encoded for the destination
    let wrong_fish = Move::new(Piece::RedPenguin, Square::A1, Square::B1, Piece::Fish2);
    assert!(!position.is_valid_move(wrong_fish));

    // Destination blocked by an opposing piece
    let onto_piece = Move::new(Piece::RedPenguin, Square::A1, Square::C1, Piece::Fish1);
    assert!(!position.is_valid_move(onto_piece));

    // Placement after all pieces are down
    let late_placement = Move::placement(Piece::RedPenguin, Square::B1);
    assert!(!position.is_valid_move(late_placement));

    assert!(!position.is_valid_move(Move::INVALID));
}

#[test]
fn test_all_generated_moves_are_valid() {
    for fen in [
        START_FEN,
        BLOCKED_CAPTURE_FEN,
        SLIDING_RAYS_FEN,
        ALL_ONES_FEN,
        PASS_ONLY_FEN,
    ] {
        let position = position_from_fen(fen);
        let list = position.generate_moves();

        for i in 0..list.count {
            assert!(
                position.is_valid_move(list.at(i)),
                "generated move {} flagged illegal in {}",
                list.at(i).to_move_string(),
                fen
            );
        }
    }
}

#[test]
fn test_trapping_move_detection() {
    let position = position_from_fen(BLOCKED_CAPTURE_FEN);
    let capture = position.move_from_string("a1b1").expect("a1b1 is legal");

    // Landing on b1 takes the last open neighbor of the piece on c1
    assert!(position.is_trapping_move(capture));

    let open = position_from_fen(SLIDING_RAYS_FEN);
    let quiet = open.move_from_string("d4c4").expect("d4c4 is legal");
    assert!(!open.is_trapping_move(quiet));
}

#[test]
fn test_move_from_string_parses_against_position() {
    let position = position_from_fen(SLIDING_RAYS_FEN);

    assert!(position.move_from_string("d4c4").is_some());
    assert!(position.move_from_string("0000").is_some());
    assert!(position.move_from_string("d4a4").is_none()); // past a blocker
    assert!(position.move_from_string("a4").is_none());
    assert!(position.move_from_string("z9z9").is_none());

    let placement_board = position_from_fen(ALL_ONES_FEN);
    let placement = placement_board
        .move_from_string("e4e4")
        .expect("placements are legal while pieces are in hand");
    assert!(placement.is_placement());
}

#[test]
fn test_slide_targets_match_generated_moves() {
    let position = position_from_fen(SLIDING_RAYS_FEN);
    let targets = position.slide_targets(Square::D4);

    assert_eq!(targets.count(), 5);
    for square in [Square::B4, Square::C4, Square::E4, Square::C5, Square::D5] {
        assert!(targets.is_bit_set(square));
    }
}
