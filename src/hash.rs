use crate::{
    constants::{MATE_IN_MAX_PLY, MATED_IN_MAX_PLY, NO_SCORE, TT_DEFAULT_SIZE_MB},
    moves::Move,
};

/// What guarantee a stored score carries: an exact value, a fail-low upper
/// bound ("alpha") or a fail-high lower bound ("beta").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum HashFlag {
    NotFound = 0,
    Exact = 1,
    Alpha = 2,
    Beta = 3,
}

// Packed 16-byte entry: the 64-bit key plus two data words.
//
//   data_md              data_mpta
//   off bits name        off bits name
//    0   23  move         0    3  flag
//   23    2  unused       3    9  ply (reserved)
//   25    7  depth       12   17  score + 65536
//                        29    3  age (reserved)
const BITMASK_MOVE: u32 = (1 << 23) - 1;
const BITMASK_DEPTH: u32 = 0x7F;
const BITMASK_FLAG: u32 = 0x7;
const BITMASK_SCORE: u32 = 0x1FFFF;

const BITSHIFT_DEPTH: u32 = 25;
const BITSHIFT_SCORE: u32 = 12;

const SCORE_BIAS: i32 = 65536;

#[derive(Clone, Copy, Default)]
struct HashEntry {
    key: u64,
    data_md: u32,
    data_mpta: u32,
}

/// Everything a probe returns; the score is already corrected for the probing
/// ply so mate scores compare validly anywhere in the tree.
#[derive(Clone, Copy, Debug)]
pub struct HashProbe {
    pub flag: HashFlag,
    pub value: i32,
    pub depth: i32,
    pub mv: Move,
}

impl HashProbe {
    fn not_found() -> Self {
        Self {
            flag: HashFlag::NotFound,
            value: NO_SCORE,
            depth: 0,
            mv: Move::INVALID,
        }
    }
}

/// Fixed-capacity transposition table: direct-mapped by the low hash bits,
/// always-replace on store, full-key comparison on probe so a colliding slot
/// silently reads as absent.
pub struct TranspositionTable {
    entries: Vec<HashEntry>,
    mask: u64,
}

impl TranspositionTable {
    pub fn new(mb_size: usize) -> Self {
        let mut table = Self {
            entries: Vec::new(),
            mask: 0,
        };
        table.set_size_mb(mb_size);
        table
    }

    /// Resize to the given budget, rounded down to a power of two between
    /// 1 MB and 2048 MB. Returns the size actually used.
    pub fn set_size_mb(&mut self, mb_size: usize) -> usize {
        let mb_size = 1 << mb_size.clamp(1, 2048).ilog2();

        let slot_count = mb_size * 1024 * 1024 / std::mem::size_of::<HashEntry>();
        self.entries = vec![HashEntry::default(); slot_count];
        self.mask = slot_count as u64 - 1;

        mb_size
    }

    /// Delete all keys so every entry reads as free.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.key = 0;
        }
    }

    pub fn probe(&self, key: u64, ply: usize) -> HashProbe {
        let entry = &self.entries[(key & self.mask) as usize];

        if entry.key != key {
            return HashProbe::not_found();
        }

        let flag = match entry.data_mpta & BITMASK_FLAG {
            1 => HashFlag::Exact,
            2 => HashFlag::Alpha,
            3 => HashFlag::Beta,
            _ => return HashProbe::not_found(),
        };

        let score = ((entry.data_mpta >> BITSHIFT_SCORE) & BITMASK_SCORE) as i32 - SCORE_BIAS;

        HashProbe {
            flag,
            value: Self::value_from_tt(score, ply),
            depth: ((entry.data_md >> BITSHIFT_DEPTH) & BITMASK_DEPTH) as i32,
            mv: Move(entry.data_md & BITMASK_MOVE),
        }
    }

    pub fn store(&mut self, key: u64, ply: usize, depth: i32, flag: HashFlag, value: i32, mv: Move) {
        let entry = &mut self.entries[(key & self.mask) as usize];
        let score = (Self::value_to_tt(value, ply) + SCORE_BIAS) as u32;

        entry.key = key;
        entry.data_md = (mv.id().0 & BITMASK_MOVE) | ((depth as u32) << BITSHIFT_DEPTH);
        entry.data_mpta = flag as u32 | ((score & BITMASK_SCORE) << BITSHIFT_SCORE);
    }

    /// Mate scores are stored relative to the storing node, so the distance
    /// from the root is removed on the way in and added back on the way out.
    fn value_to_tt(value: i32, ply: usize) -> i32 {
        if value >= MATE_IN_MAX_PLY {
            value + ply as i32
        } else if value <= MATED_IN_MAX_PLY {
            value - ply as i32
        } else {
            value
        }
    }

    fn value_from_tt(value: i32, ply: usize) -> i32 {
        if value == NO_SCORE {
            NO_SCORE
        } else if value >= MATE_IN_MAX_PLY {
            value - ply as i32
        } else if value <= MATED_IN_MAX_PLY {
            value + ply as i32
        } else {
            value
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(TT_DEFAULT_SIZE_MB)
    }
}
