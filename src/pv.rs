use crate::{constants::MAX_PLY, moves::Move};

/// Principal variation bookkeeping. Two sources feed it: the line stitched
/// together from per-node buffers during search, and the line re-collected
/// from exact transposition-table entries after a depth completes. The
/// collected line carries the hash of every visited position so a repeated
/// hash terminates the walk instead of looping.
pub struct PrincipalVariation {
    pub line: [Move; MAX_PLY],
    collected: [Move; MAX_PLY],
    hashes: [u64; MAX_PLY],
    collected_count: usize,
}

impl PrincipalVariation {
    pub fn new() -> Self {
        Self {
            line: [Move::INVALID; MAX_PLY],
            collected: [Move::INVALID; MAX_PLY],
            hashes: [0; MAX_PLY],
            collected_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.line = [Move::INVALID; MAX_PLY];
        self.collected = [Move::INVALID; MAX_PLY];
        self.hashes = [0; MAX_PLY];
        self.collected_count = 0;
    }

    /// Start a fresh search line for a new iteration.
    pub fn clear_search_line(&mut self) {
        self.line[0] = Move::INVALID;
    }

    /// Install the root move followed by the continuation its subtree
    /// produced.
    pub fn set_from_search(&mut self, mv: Move, subtree: &[Move; MAX_PLY]) {
        self.line[0] = mv;

        for i in 0..MAX_PLY - 1 {
            self.line[i + 1] = subtree[i];
            if subtree[i] == Move::INVALID {
                break;
            }
        }
    }

    /// Append a move found by walking the transposition table. Refused when
    /// the position's hash was already seen on this line, which breaks any
    /// cycle caused by collisions or repetitions.
    pub fn add_collected_move(&mut self, ply: usize, mv: Move, hash: u64) -> bool {
        if ply >= MAX_PLY - 1 {
            return false;
        }

        for i in 0..ply {
            if self.hashes[i] == hash {
                return false;
            }
        }

        self.collected[ply] = mv;
        self.collected[ply + 1] = Move::INVALID;
        self.hashes[ply] = hash;
        self.collected_count = ply + 1;

        true
    }

    /// The best available line: the one from search when it exists, the
    /// collected one otherwise.
    pub fn best_line(&self) -> &[Move] {
        if self.line[0] != Move::INVALID {
            &self.line
        } else {
            &self.collected
        }
    }

    pub fn moves(&self) -> Vec<Move> {
        self.best_line()
            .iter()
            .take_while(|&&mv| mv != Move::INVALID)
            .copied()
            .collect()
    }

    pub fn line_string(&self) -> String {
        self.moves()
            .iter()
            .map(|mv| mv.to_move_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PrincipalVariation {
    fn default() -> Self {
        Self::new()
    }
}
