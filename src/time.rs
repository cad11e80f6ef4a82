use std::time::Instant;

use crate::{
    constants::{
        ANOTHER_PLY_RATIO, MAX_SEARCH_DEPTH, NODES_BETWEEN_CHECKS_FAST, NODES_BETWEEN_CHECKS_SLOW,
        NUM_SIDES,
    },
    types::Side,
};

/// The limits a search command may impose: remaining clock and increment per
/// side, moves to the next time control, and fixed depth/node/time caps.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub time: [u64; NUM_SIDES],
    pub inc: [u64; NUM_SIDES],
    pub movestogo: u64,
    pub depth: u32,
    pub nodes: u64,
    pub movetime: u64,
    pub infinite: bool,
}

impl SearchLimits {
    /// The engine manages its own clock only when no explicit cap was given.
    pub fn use_time_management(&self) -> bool {
        self.movetime == 0 && self.depth == 0 && self.nodes == 0 && !self.infinite
    }
}

/// Converts the external limits into a soft and a hard deadline. The soft
/// deadline decides whether another iterative-deepening ply is started; the
/// hard deadline aborts an in-flight search.
pub struct TimeManager {
    limits: SearchLimits,
    start: Instant,
    last_ply_start: Instant,
    soft_limit_ms: u64,
    hard_limit_ms: u64,
    time_checks: u64,
    root_move_number: usize,
}

impl TimeManager {
    pub fn new(limits: &SearchLimits, side: Side) -> Self {
        let mut limits = limits.clone();

        if limits.movestogo == 0 {
            limits.movestogo = 50; // time is for the whole game
        }

        let time_left = limits.time[side as usize];
        let increment = limits.inc[side as usize];
        let movestogo = limits.movestogo;

        let mut soft;
        let mut hard;

        if limits.use_time_management() {
            if increment > 0 {
                // With an increment the increment itself is the budget, plus
                // a slice of the remaining time when there is plenty of it.
                let hard_max = if time_left >= 200 {
                    time_left - 100
                } else {
                    time_left / 2
                };

                soft = increment.min(time_left);
                if time_left - soft > 750 {
                    soft += (time_left - soft) / movestogo;
                }

                hard = hard_max.min(soft + 5 * (time_left - soft) / movestogo);
            } else {
                // Without an increment, spread the remaining time over the
                // moves still to play.
                soft = time_left / (movestogo + 1);
                let hard_max = if movestogo > 9 {
                    5 * soft
                } else {
                    time_left / movestogo
                };

                hard = hard_max.min(time_left.saturating_sub(32 * movestogo));
            }

            if hard < soft {
                soft = hard;
            }

            // Safety buffer on the last move before the time control
            if movestogo == 1 {
                hard = if time_left >= 500 {
                    time_left - 100
                } else if time_left >= 100 {
                    time_left - 50
                } else {
                    time_left.saturating_sub(10)
                };
                soft = hard;
            }
        } else {
            soft = limits.movetime;
            hard = soft;
        }

        // Assume the timer already ran a few ms before we woke up
        hard = hard.saturating_sub(10).max(1);
        soft = soft.min(hard);

        let now = Instant::now();

        Self {
            limits,
            start: now,
            last_ply_start: now,
            soft_limit_ms: soft,
            hard_limit_ms: hard,
            time_checks: 0,
            root_move_number: 0,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Whether there is enough time left to start another ply. Searches spend
    /// well over the check ratio of the previous ply's duration on their
    /// first move, so starting a ply with less than that on the clock only
    /// wastes the time.
    pub fn search_another_ply(&mut self) -> bool {
        if !self.limits.use_time_management() {
            return true;
        }

        let now = Instant::now();
        let last_ply_ms = (now - self.last_ply_start).as_millis() as u64;
        self.last_ply_start = now;

        let time_to_soft_limit = self.soft_limit_ms.saturating_sub(self.elapsed_ms());

        time_to_soft_limit as f64 > last_ply_ms as f64 * ANOTHER_PLY_RATIO
    }

    /// Whether the in-flight search has to stop right now. The hard deadline
    /// always stops; the soft deadline stops only while the first root move
    /// is still being searched, since nothing would be lost.
    pub fn time_up(&mut self) -> bool {
        self.time_checks += 1;

        let elapsed = self.elapsed_ms();
        let resolution = elapsed / self.time_checks;

        if self.limits.use_time_management() {
            if elapsed + resolution >= self.hard_limit_ms {
                return true;
            }
            if elapsed + resolution >= self.soft_limit_ms && self.root_move_number == 0 {
                return true;
            }
        }

        if self.limits.movetime != 0 && elapsed >= self.hard_limit_ms {
            return true;
        }

        false
    }

    pub fn max_depth(&self) -> u32 {
        if self.limits.depth > 0 {
            self.limits.depth
        } else {
            MAX_SEARCH_DEPTH
        }
    }

    pub fn node_limit(&self) -> u64 {
        self.limits.nodes
    }

    pub fn set_root_move_number(&mut self, number: usize) {
        self.root_move_number = number;
    }

    /// How many nodes to search between clock checks: generous when the soft
    /// deadline is far away, tight otherwise.
    pub fn nodes_between_checks(&self) -> u64 {
        if self.limits.movetime == 0
            && self.limits.movestogo > 1
            && self.elapsed_ms() + 1000 <= self.soft_limit_ms
        {
            NODES_BETWEEN_CHECKS_SLOW
        } else {
            NODES_BETWEEN_CHECKS_FAST
        }
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new(&SearchLimits::default(), Side::Red)
    }
}
