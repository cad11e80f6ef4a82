/// NOTE: 1 ply = one move by a single player

pub const NUM_SQUARES: usize = 64;
pub const NUM_SIDES: usize = 2;
pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;
pub const NUM_DIRECTIONS: usize = 6;

/// Pieces per side once the placement phase is complete.
pub const PENGUIN_COUNT: u32 = 4;

/// Plies taken by the placement phase (both sides place 4 pieces).
pub const SET_PHASE_PLIES: usize = 8;

/// Hard limit for search depth (in ply). Used to size arrays with per-ply
/// information. A side that is trapped early passes every turn, so games can
/// run well past 64 plies.
pub const MAX_PLY: usize = 128;

/// Maximum number of moves in a single position. The placement phase can
/// offer one move per single-tile square (up to ~60).
pub const MAX_MOVES: usize = 256;

// Scores
pub const INFINITY_SCORE: i32 = 32767;
pub const NO_SCORE: i32 = -100_000;
pub const DRAW_SCORE: i32 = 0;
pub const MATE_IN_MAX_PLY: i32 = INFINITY_SCORE - 2 * MAX_PLY as i32;
pub const MATED_IN_MAX_PLY: i32 = -INFINITY_SCORE + 2 * MAX_PLY as i32;

/// Game phase runs from this value (opening/middle-game) down to 0 (endgame)
/// as tiles are consumed.
pub const GAME_PHASE_GRADIENT_MAX: i32 = 50;

/// History table saturation bound; all entries are halved when any entry
/// reaches it.
pub const HISTORY_MAX_VALUE: i32 = 2048;

/// Depth cap when no explicit depth limit was given.
pub const MAX_SEARCH_DEPTH: u32 = 60;

/// Quiescence search gives up and returns the static evaluation past this ply.
pub const QSEARCH_PLY_LIMIT: usize = 60;

// Time control
pub const DEFAULT_MOVETIME_MS: u64 = 1000;
pub const ANOTHER_PLY_RATIO: f64 = 0.30;
pub const NODES_BETWEEN_CHECKS_SLOW: u64 = 100_000;
pub const NODES_BETWEEN_CHECKS_FAST: u64 = 10_000;

// Transposition table / evaluation cache
pub const TT_DEFAULT_SIZE_MB: usize = 64;
pub const EVAL_CACHE_SLOTS: usize = 1 << 21;

/// Move-string token for a pass (the side to move has no legal move).
pub const PASS_TOKEN: &str = "0000";

/// Default starting position: placement phase already played out, mirrored
/// tile distribution, four pieces per side.
pub const START_FEN: &str =
    "3212r11221r3112r12312r13211322322322311231b21321b2113b12211b2123 r 0 0 0";

#[rustfmt::skip]
pub const ROW: [u8; NUM_SQUARES] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3,
    4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7
];

#[rustfmt::skip]
pub const COLUMN: [u8; NUM_SQUARES] = [
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7
];

#[rustfmt::skip]
pub const LSB_64_TABLE: [u8; 64] = [
    63, 30,  3, 32, 59, 14, 11, 33,
    60, 24, 50,  9, 55, 19, 21, 34,
    61, 29,  2, 53, 51, 23, 41, 18,
    56, 28,  1, 43, 46, 27,  0, 35,
    62, 31, 58,  4,  5, 49, 54,  6,
    15, 52, 12, 40,  7, 42, 45, 16,
    25, 57, 48, 13, 10, 39,  8, 44,
    20, 47, 38, 22, 17, 37, 36, 26
];

/// Small positional bonus per square, used only for move ordering.
/// Central squares are worth slightly more; the two dead corners (h1/a8 have
/// only two neighbours) are worth nothing.
#[rustfmt::skip]
pub const SQUARE_BONUS: [i32; NUM_SQUARES] = [
    1, 2, 2, 2, 2, 2, 2, 0,
    1, 4, 4, 4, 4, 4, 4, 3,
    3, 4, 5, 5, 5, 5, 4, 1,
    1, 4, 5, 6, 6, 5, 4, 3,
    3, 4, 5, 6, 6, 5, 4, 1,
    1, 4, 5, 5, 5, 5, 4, 3,
    3, 4, 4, 4, 4, 4, 4, 1,
    0, 2, 2, 2, 2, 2, 2, 1
];
