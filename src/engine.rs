use std::time::Instant;

use crate::{
    constants::{DRAW_SCORE, INFINITY_SCORE, MAX_PLY, NO_SCORE, QSEARCH_PLY_LIMIT, SQUARE_BONUS},
    evaluator::{Evaluator, Weights},
    hash::{HashFlag, TranspositionTable},
    heuristics::{CounterMoveTable, HistoryTable, KillerTable},
    input::InputReader,
    moves::{Move, MoveList, RootMoveList},
    position::Position,
    pv::PrincipalVariation,
    time::{SearchLimits, TimeManager},
    types::{is_mate_score, mate_score, mated_score, plies_to_mate, score_to_string},
    zobrist_hash::initialize_zobrist_hash_tables,
};

/// Per-iteration search statistics for the telemetry lines.
struct SearchStats {
    nodes: u64,
    ply_start: Instant,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            nodes: 0,
            ply_start: Instant::now(),
        }
    }

    fn reset(&mut self) {
        self.nodes = 0;
        self.ply_start = Instant::now();
    }

    fn elapsed_ms(&self) -> u64 {
        self.ply_start.elapsed().as_millis() as u64
    }

    fn nps(&self) -> u64 {
        let elapsed = self.elapsed_ms();
        if elapsed > 0 {
            self.nodes * 1000 / elapsed
        } else {
            self.nodes * 1000
        }
    }
}

/// The engine: the position under search plus every table the search reads
/// and writes. All state is owned here; nothing global is mutated, and a new
/// game resets the heuristic tables explicitly.
pub struct Engine {
    pub position: Position,
    pub tt: TranspositionTable,
    pub evaluator: Evaluator,
    pub weights: Weights,
    history: HistoryTable,
    killers: KillerTable,
    counters: CounterMoveTable,
    pv: PrincipalVariation,
    time_manager: TimeManager,
    stats: SearchStats,
    input: Option<InputReader>,
    forced_stop: bool,
    pub quit_requested: bool,
    nodes_between_checks: u64,
    check_countdown: i64,
    node_limit: u64,
    finished_nodes: u64,
    pub last_depth: u32,
    pub last_value: i32,
    pub last_time_ms: u64,
}

impl Engine {
    pub fn new() -> Self {
        initialize_zobrist_hash_tables();

        let weights = Weights::default();

        Self {
            position: Position::new(),
            tt: TranspositionTable::default(),
            evaluator: Evaluator::new(&weights),
            weights,
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            counters: CounterMoveTable::new(),
            pv: PrincipalVariation::new(),
            time_manager: TimeManager::default(),
            stats: SearchStats::new(),
            input: None,
            forced_stop: true,
            quit_requested: false,
            nodes_between_checks: 0,
            check_countdown: 0,
            node_limit: 0,
            finished_nodes: 0,
            last_depth: 0,
            last_value: NO_SCORE,
            last_time_ms: 0,
        }
    }

    /// Hand the engine the background reader so the search can poll for a
    /// stop while it is running.
    pub fn attach_input(&mut self, input: InputReader) {
        self.input = Some(input);
    }

    /// Blocking read of the next external command line.
    pub fn read_command(&self) -> Option<String> {
        self.input.as_ref()?.read_line()
    }

    /// Forget everything learned in the previous game. The position itself is
    /// left alone; the host sets it separately.
    pub fn new_game(&mut self) {
        self.tt.reset();
        self.killers.reset();
        self.counters.reset();
        self.history.reset();
    }

    pub fn set_weights(&mut self, weights: Weights) {
        self.weights = weights;
        self.evaluator.set_weights(&self.weights);
    }

    pub fn pv_moves(&self) -> Vec<Move> {
        self.pv.moves()
    }

    pub fn print_eval(&mut self) {
        self.evaluator.print(&self.position);
    }

    pub fn nodes_searched(&self) -> u64 {
        self.finished_nodes
    }

    pub fn request_stop(&mut self) {
        self.forced_stop = true;
    }

    /// Iterative deepening driver: search depth 1, 2, 3, ... until a limit
    /// stops it, report each completed ply and return the best move found.
    pub fn search(&mut self, limits: &SearchLimits) -> Move {
        let mut best_move = Move::INVALID;

        self.pv.reset();

        let list = self.position.generate_moves();
        let mut root_moves = RootMoveList::new(&list.moves[..list.count]);

        self.forced_stop = false;

        if root_moves.is_empty() {
            self.forced_stop = true;
            return Move::INVALID;
        }

        let mut last_value = NO_SCORE;

        self.time_manager = TimeManager::new(limits, self.position.side);
        self.node_limit = self.time_manager.node_limit();
        self.finished_nodes = 0;
        self.nodes_between_checks = self.time_manager.nodes_between_checks();
        self.check_countdown = self.nodes_between_checks as i64;

        // A previous search of this position seeds the starting depth
        let mut depth = 1u32;
        let probe = self.tt.probe(self.position.board.hash, self.position.hmc);
        if probe.flag == HashFlag::Exact {
            depth = (probe.depth.max(1) as u32).min(self.time_manager.max_depth());
        }

        loop {
            self.stats.reset();

            let mv = self.root_search(&mut root_moves, depth, &mut last_value);

            // Rebuild the line from the table as well, in case the search
            // buffers were cut short
            self.collect_pv(0);

            if mv != Move::INVALID {
                best_move = mv;
                println!(
                    "info depth {} score {} nodes {} nps {} time {} pv {}",
                    depth,
                    score_to_string(last_value),
                    self.stats.nodes,
                    self.stats.nps(),
                    self.stats.elapsed_ms(),
                    self.pv.line_string()
                );
            }

            self.finished_nodes += self.stats.nodes;
            depth += 1;

            if self.forced_stop
                || !self.time_manager.search_another_ply()
                || depth > self.time_manager.max_depth()
                || depth as i32 > plies_to_mate(last_value)
            {
                break;
            }
        }

        self.forced_stop = true;
        self.last_depth = depth - 1;
        self.last_value = last_value;
        self.last_time_ms = self.time_manager.elapsed_ms();

        if best_move == Move::INVALID {
            best_move = root_moves.moves[0].mv;
        }

        let total_ms = self.last_time_ms;
        println!(
            "info nodes {} time {} nps {} evalcache {}%",
            self.finished_nodes,
            total_ms,
            if total_ms > 0 {
                self.finished_nodes * 1000 / total_ms
            } else {
                self.finished_nodes * 1000
            },
            self.evaluator.cache.hit_percent()
        );

        best_move
    }

    /// One iteration over the root moves. The list is re-sorted after every
    /// searched move so the best move so far is always at the front, and an
    /// interrupted iteration still stores that move at a reduced draft so the
    /// next search resumes from it instead of losing it.
    fn root_search(
        &mut self,
        root_moves: &mut RootMoveList,
        depth: u32,
        last_value: &mut i32,
    ) -> Move {
        const INF: i32 = INFINITY_SCORE;

        let mut alpha = -INF;
        let mut best = NO_SCORE;

        self.pv.clear_search_line();

        // Only exact entries are expected here; the root is always on the
        // principal variation
        let probe = self.tt.probe(self.position.board.hash, self.position.hmc);
        if probe.flag == HashFlag::Exact && self.position.is_valid_move(probe.mv) {
            root_moves.move_to_top(probe.mv);

            if probe.depth >= depth as i32 {
                *last_value = probe.value;
                return probe.mv;
            }
        }

        root_moves.reset_scores();
        let mut subtree_pv = [Move::INVALID; MAX_PLY];

        for i in 0..root_moves.len() {
            if self.forced_stop {
                root_moves.set_value_at(i, NO_SCORE);
                continue;
            }

            self.time_manager.set_root_move_number(i);
            alpha = root_moves.min_alpha();

            let mv = root_moves.moves[i].mv;

            self.position.make_move(mv);
            let value = -self.pvs(1, depth as i32 - 1, -INF, -alpha, &mut subtree_pv);
            self.position.take_back_move(mv);

            if !self.forced_stop && value > alpha {
                if value > best {
                    best = value;
                    self.pv.set_from_search(mv, &subtree_pv);
                }

                root_moves.set_value_at(i, value);
                root_moves.set_pv_for_move(mv, &subtree_pv);
                root_moves.sort();
            } else {
                root_moves.set_value_at(i, NO_SCORE);
            }
        }

        if best != NO_SCORE {
            *last_value = best;
        }

        if !self.forced_stop {
            self.tt.store(
                self.position.board.hash,
                self.position.hmc,
                depth as i32,
                HashFlag::Exact,
                root_moves.moves[0].value,
                root_moves.moves[0].mv,
            );
        } else if alpha > -INF {
            self.tt.store(
                self.position.board.hash,
                self.position.hmc,
                depth as i32 - 1,
                HashFlag::Exact,
                root_moves.moves[0].value,
                root_moves.moves[0].mv,
            );
        }

        // A single legal move needs no comparison; a shallow search is enough
        // to fill the telemetry
        if root_moves.len() == 1 && depth > 6 {
            self.forced_stop = true;
        }

        if alpha == -INF {
            return Move::INVALID;
        }

        root_moves.moves[0].mv
    }

    /// Principal variation search: full window on the first move, zero-width
    /// probes on the rest, with a re-search whenever a probe beats alpha.
    fn pvs(
        &mut self,
        ply: usize,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        pv: &mut [Move; MAX_PLY],
    ) -> i32 {
        debug_assert!(depth >= 0);

        let is_pv_node = beta - alpha > 1;
        let mut subtree_pv = [Move::INVALID; MAX_PLY];

        if is_pv_node {
            pv[0] = Move::INVALID;
        }

        self.stats.nodes += 1;
        self.check_limits();
        if self.forced_stop {
            return alpha;
        }

        if self.position.game_over() {
            return match self.position.winner() {
                None => DRAW_SCORE,
                Some(winner) if winner == self.position.side => mate_score(ply),
                Some(_) => mated_score(ply),
            };
        }

        if depth <= 0 || ply >= MAX_PLY - 1 {
            return self.qsearch(ply, depth.min(0), alpha, beta, &mut subtree_pv);
        }

        // Transposition table lookup. The returned score is already corrected
        // for the current ply, so mate scores compare directly.
        let mut hash_move = Move::INVALID;
        let probe = self.tt.probe(self.position.board.hash, self.position.hmc);

        match probe.flag {
            HashFlag::Exact => {
                if probe.depth >= depth {
                    return probe.value;
                }
                hash_move = probe.mv;
            }
            HashFlag::Beta => {
                if probe.depth >= depth && probe.value >= beta {
                    return beta;
                }
                hash_move = probe.mv;
            }
            HashFlag::Alpha => {
                if probe.depth >= depth && probe.value <= alpha {
                    return alpha;
                }
                hash_move = probe.mv;
            }
            HashFlag::NotFound => {}
        }

        let mut static_eval = self.evaluator.evaluate(&self.position);

        // A stored bound is a better estimate than the raw evaluation
        if probe.flag == HashFlag::Alpha && static_eval > probe.value {
            static_eval = probe.value;
        }
        if probe.flag == HashFlag::Beta && static_eval < probe.value {
            static_eval = probe.value;
        }

        // Razoring: close to the horizon, far below alpha and outside the
        // principal variation, verify with a zero-window quiescence probe and
        // give up on the node if even that stays under
        let razor_margin = self.position.interpolate(
            self.evaluator.values.razor_margin.mg,
            self.evaluator.values.razor_margin.eg,
        );

        if depth < 3
            && !is_pv_node
            && self.position.hmc < 40
            && static_eval + razor_margin <= alpha
            && !is_mate_score(beta)
        {
            let razor_alpha = alpha - self.evaluator.values.razor_margin.mg;
            let value = self.qsearch(ply, 0, razor_alpha, razor_alpha + 1, pv);
            if value <= razor_alpha {
                return alpha;
            }
        }

        // Reverse futility: the static score beats beta by a depth-scaled
        // margin, so the node is almost certainly a fail-high
        let futility_margin = self.position.interpolate(
            self.evaluator.values.static_null_margin.mg,
            self.evaluator.values.static_null_margin.eg,
        );

        if depth < 6 && !is_mate_score(alpha) && static_eval - futility_margin * depth >= beta {
            return beta;
        }

        let mut best_move = Move::INVALID;
        let mut moves_searched = 0;
        let mut flag = HashFlag::Alpha;

        // Staged move generation: the hash move alone first, the generated
        // and sorted remainder only if it did not cut off
        let start_stage = if hash_move != Move::INVALID { 0 } else { 1 };

        for stage in start_stage..2usize {
            let mut list: MoveList;

            if stage == 0 {
                if !self.position.is_valid_move(hash_move) {
                    continue;
                }
                list = self.position.single_move_list(hash_move);
            } else {
                list = self.position.generate_moves();

                if hash_move != Move::INVALID {
                    list.delete(hash_move.id());
                }

                let (mut killer0, mut killer1) = self.killers.killers(ply);
                killer0 = if killer0 != hash_move.id() && self.position.is_valid_move(killer0) {
                    killer0
                } else {
                    Move::INVALID
                };
                killer1 = if killer1 != hash_move.id() && self.position.is_valid_move(killer1) {
                    killer1
                } else {
                    Move::INVALID
                };

                let counter = self
                    .counters
                    .counter(self.position.next_to_last_move(), self.position.last_move());

                if list.count > 1 {
                    self.award_move_values(&mut list, killer0, killer1, counter);
                    list.sort();
                }
            }

            let lmr_minimum_moves = self.position.interpolate(
                self.evaluator.values.lmr_minimum_moves.mg,
                self.evaluator.values.lmr_minimum_moves.eg,
            );

            for i in 0..list.count {
                if self.forced_stop {
                    break;
                }

                let mv = list.at(i);
                debug_assert!(self.position.is_valid_move(mv));

                moves_searched += 1;
                self.position.make_move(mv);

                let mut value;

                if moves_searched == 1 || depth <= 2 {
                    if moves_searched == 1 {
                        best_move = mv;
                    }
                    value = -self.pvs(ply + 1, depth - 1, -beta, -alpha, &mut subtree_pv);
                } else {
                    // Late move reduction: quiet late moves outside the
                    // principal variation are tried at reduced depth first,
                    // but not near the end of the game where every tile
                    // matters
                    if stage == 1
                        && !is_pv_node
                        && moves_searched > lmr_minimum_moves
                        && depth > 1
                        && self.position.hmc < 52
                    {
                        let reduction = 2 + depth / 8;
                        let new_depth = (depth - reduction).max(1);

                        value = if new_depth < depth {
                            -self.pvs(ply + 1, new_depth - 1, -alpha - 1, -alpha, &mut subtree_pv)
                        } else {
                            alpha + 1
                        };
                    } else {
                        value = alpha + 1; // force the full-depth probe
                    }

                    if value > alpha {
                        value = -self.pvs(ply + 1, depth - 1, -alpha - 1, -alpha, &mut subtree_pv);

                        // Only a PV node profits from a full-window re-search
                        if is_pv_node && value > alpha {
                            value = -self.pvs(ply + 1, depth - 1, -beta, -alpha, &mut subtree_pv);
                        }
                    }
                }

                self.position.take_back_move(mv);

                if value >= beta {
                    if !self.forced_stop {
                        self.tt.store(
                            self.position.board.hash,
                            self.position.hmc,
                            depth,
                            HashFlag::Beta,
                            beta,
                            mv,
                        );
                    }

                    // A cutoff move that does not even collect the current
                    // maximum is worth remembering; the obvious captures sort
                    // first anyway
                    if mv.fish_count() < self.position.max_fishes() {
                        self.killers.store(ply, mv.id());
                        self.counters.store(
                            self.position.next_to_last_move(),
                            self.position.last_move(),
                            mv.id(),
                        );
                    }

                    let bonus = depth * depth;
                    self.history.update(mv, bonus);
                    for k in 0..i {
                        self.history.update(list.at(k), -bonus);
                    }

                    return beta;
                }

                if value > alpha {
                    alpha = value;
                    flag = HashFlag::Exact;
                    best_move = mv;

                    pv[0] = mv;
                    for k in 0..MAX_PLY - 1 {
                        pv[k + 1] = subtree_pv[k];
                        if subtree_pv[k] == Move::INVALID {
                            break;
                        }
                    }
                }
            }
        }

        if !self.forced_stop {
            self.tt.store(
                self.position.board.hash,
                self.position.hmc,
                depth,
                flag,
                alpha,
                best_move,
            );
        }

        alpha
    }

    /// Quiescence search. Only moves that collect the current maximum tile
    /// value or trap an opposing piece are tried, so the horizon is bounded
    /// without cutting off forcing sequences.
    fn qsearch(
        &mut self,
        ply: usize,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        pv: &mut [Move; MAX_PLY],
    ) -> i32 {
        debug_assert!(depth <= 0);

        let mut subtree_pv = [Move::INVALID; MAX_PLY];
        let mut best_move = Move::INVALID;

        // Depth 0 is entered straight from the main search, which already
        // counted this node and checked the clock
        if depth < 0 {
            if beta - alpha > 1 {
                pv[0] = Move::INVALID;
            }

            self.stats.nodes += 1;
            self.check_limits();
            if self.forced_stop {
                return alpha;
            }
        }

        if self.position.game_over() {
            return match self.position.winner() {
                None => DRAW_SCORE,
                Some(winner) if winner == self.position.side => mate_score(ply),
                Some(_) => mated_score(ply),
            };
        }

        let mut hash_move = Move::INVALID;
        let probe = self.tt.probe(self.position.board.hash, self.position.hmc);

        if probe.flag == HashFlag::Beta || probe.flag == HashFlag::Exact {
            if probe.value >= beta {
                return beta;
            }
            hash_move = probe.mv;
        }
        if probe.flag == HashFlag::Alpha || probe.flag == HashFlag::Exact {
            if probe.value <= alpha {
                return alpha;
            }
            hash_move = probe.mv;
        }

        if ply >= QSEARCH_PLY_LIMIT {
            return self.evaluator.evaluate(&self.position);
        }

        let mut stand_pat = self.evaluator.evaluate(&self.position);

        if probe.flag == HashFlag::Alpha && stand_pat > probe.value {
            stand_pat = probe.value;
        }
        if probe.flag == HashFlag::Beta && stand_pat < probe.value {
            stand_pat = probe.value;
        }

        if stand_pat >= beta {
            return beta;
        }
        if alpha < stand_pat {
            alpha = stand_pat;
        }

        let start_stage = if hash_move != Move::INVALID { 0 } else { 1 };

        for stage in start_stage..2usize {
            let mut list: MoveList;

            if stage == 0 {
                if !self.position.is_valid_move(hash_move) {
                    continue;
                }
                list = self.position.single_move_list(hash_move);
            } else {
                list = self.position.generate_moves();

                if hash_move != Move::INVALID {
                    list.delete(hash_move.id());
                }

                if list.count > 1 {
                    self.award_move_values(&mut list, Move::INVALID, Move::INVALID, Move::INVALID);
                    list.sort();
                }
            }

            for i in 0..list.count {
                if self.forced_stop {
                    break;
                }

                let mv = list.at(i);

                // During placement, only placements that trap count as
                // forcing; afterwards, anything short of the best available
                // capture must at least trap an opponent
                if self.position.is_set_phase() && !self.position.is_trapping_move(mv) {
                    continue;
                }
                if !self.position.is_trapping_move(mv)
                    && mv.fish_count() < self.position.max_fishes()
                {
                    continue;
                }

                self.position.make_move(mv);
                let value = -self.qsearch(ply + 1, depth - 1, -beta, -alpha, &mut subtree_pv);
                self.position.take_back_move(mv);

                if value > alpha {
                    best_move = mv;

                    if value >= beta {
                        // The next iteration picks these up as hash moves at
                        // depth 1
                        if !self.forced_stop {
                            self.tt.store(
                                self.position.board.hash,
                                self.position.hmc,
                                0,
                                HashFlag::Beta,
                                beta,
                                mv,
                            );
                        }
                        return beta;
                    }

                    alpha = value;

                    pv[0] = mv;
                    for k in 0..MAX_PLY - 1 {
                        pv[k + 1] = subtree_pv[k];
                        if subtree_pv[k] == Move::INVALID {
                            break;
                        }
                    }
                }
            }
        }

        if !self.forced_stop && depth == 0 {
            self.tt.store(
                self.position.board.hash,
                self.position.hmc,
                0,
                HashFlag::Alpha,
                alpha,
                best_move,
            );
        }

        alpha
    }

    /// Move ordering points: the tile value towers over everything, killers
    /// and the counter move outrank equal captures, and the history score
    /// plus a small positional nudge break the remaining ties.
    fn award_move_values(
        &self,
        list: &mut MoveList,
        killer0: Move,
        killer1: Move,
        counter: Move,
    ) {
        for i in 0..list.count {
            let mv = list.at(i).id();

            if mv == Move::INVALID {
                continue;
            }

            let mut order: i32 = 2058;

            if mv == killer0 {
                order += 4002;
            } else if mv == counter.id() {
                order += 4001;
            } else if mv == killer1 {
                order += 4000;
            }

            order += 4000 * (mv.fish_count() - 1);
            order += self.history.score(mv);
            order += 10 * SQUARE_BONUS[mv.to_square() as usize];
            order -= SQUARE_BONUS[mv.from_square() as usize];

            list.moves[i] = mv.with_order_value(order.max(0) as u32);
        }
    }

    /// Rebuild the principal variation by walking exact entries from the
    /// root. A repeated hash ends the walk, so a collision or repetition can
    /// never loop it.
    fn collect_pv(&mut self, ply: usize) {
        if self.position.hmc + ply >= MAX_PLY {
            return;
        }

        let probe = self.tt.probe(self.position.board.hash, self.position.hmc);

        if probe.flag != HashFlag::Exact {
            return;
        }
        if !self.position.is_valid_move(probe.mv) {
            return;
        }

        if !self
            .pv
            .add_collected_move(ply, probe.mv, self.position.board.hash)
        {
            return;
        }

        self.position.make_move(probe.mv);
        self.collect_pv(ply + 1);
        self.position.take_back_move(probe.mv);
    }

    /// Node-count-gated poll of the clock, the node budget and the command
    /// mailbox. A stop freezes the search; every make is still unwound by the
    /// recursion on the way out.
    fn check_limits(&mut self) {
        if self.forced_stop {
            return;
        }

        self.check_countdown -= 1;
        if self.check_countdown > 0 {
            return;
        }
        self.check_countdown = self.nodes_between_checks as i64;

        if self.time_manager.time_up() {
            self.forced_stop = true;
        }

        if self.node_limit > 0 && self.finished_nodes + self.stats.nodes >= self.node_limit {
            self.forced_stop = true;
        }

        self.drain_input();
    }

    /// Commands arriving while the search runs. Only the stop family acts
    /// here; anything else is dropped.
    fn drain_input(&mut self) {
        let Some(input) = &self.input else {
            return;
        };

        while let Some(line) = input.try_read() {
            match line.trim() {
                "stop" => self.forced_stop = true,
                "quit" => {
                    self.forced_stop = true;
                    self.quit_requested = true;
                }
                "isready" => println!("readyok"),
                _ => {}
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
