use rand::{Rng, thread_rng};
use std::sync::OnceLock;

use crate::{
    constants::NUM_SQUARES,
    types::{Piece, Square},
};

/// Maximum value of one side's collected score that can be hashed. The
/// theoretical maximum is bounded by the total tile value on the board; 128
/// leaves generous headroom.
pub const MAX_HASHED_SCORE: usize = 128;

// Global key tables for Zobrist hashing. One key per (square, cell state)
// pair; the hole state hashes as zero (keyed implicitly by absence), as does
// the unused discriminant slot. Only Red's collected score is hashed: for a
// fixed board the other side's score is derivable from the total.
pub static ZOBRIST_SQUARE_KEYS: OnceLock<[[u64; 8]; NUM_SQUARES]> = OnceLock::new();
pub static ZOBRIST_SIDE_TO_MOVE_KEY: OnceLock<u64> = OnceLock::new();
pub static ZOBRIST_RED_COLLECTED_KEYS: OnceLock<[u64; MAX_HASHED_SCORE]> = OnceLock::new();

/// Initialize all key tables with random values. Safe to call more than
/// once; only the first call generates keys.
pub fn initialize_zobrist_hash_tables() {
    if ZOBRIST_SQUARE_KEYS.get().is_some() {
        return;
    }

    let mut rng = thread_rng();
    let mut square_keys = [[0u64; 8]; NUM_SQUARES];

    for square in Square::iter() {
        for piece in [
            Piece::RedPenguin,
            Piece::BluePenguin,
            Piece::Fish1,
            Piece::Fish2,
            Piece::Fish3,
            Piece::Fish4,
        ] {
            square_keys[square as usize][piece as usize] = rng.r#gen();
        }
    }

    let mut red_collected_keys = [0u64; MAX_HASHED_SCORE];
    for key in red_collected_keys.iter_mut().skip(1) {
        *key = rng.r#gen();
    }

    let _ = ZOBRIST_SQUARE_KEYS.set(square_keys);
    let _ = ZOBRIST_SIDE_TO_MOVE_KEY.set(rng.r#gen());
    let _ = ZOBRIST_RED_COLLECTED_KEYS.set(red_collected_keys);
}

/// Key for a cell state on a square. Zero for holes, so a consumed square
/// drops out of the hash.
pub fn square_key(square: Square, piece: Piece) -> u64 {
    match ZOBRIST_SQUARE_KEYS.get() {
        Some(keys) => keys[square as usize][piece as usize],
        None => 0,
    }
}

pub fn side_to_move_key() -> u64 {
    ZOBRIST_SIDE_TO_MOVE_KEY.get().copied().unwrap_or(0)
}

pub fn red_collected_key(score: i32) -> u64 {
    debug_assert!((score as usize) < MAX_HASHED_SCORE);

    match ZOBRIST_RED_COLLECTED_KEYS.get() {
        Some(keys) => keys[score as usize],
        None => 0,
    }
}
