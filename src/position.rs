use crate::{
    bitboard::BitBoard,
    board::Board,
    constants::{
        COLUMN, GAME_PHASE_GRADIENT_MAX, MAX_PLY, NUM_DIRECTIONS, NUM_FILES, NUM_RANKS,
        NUM_SQUARES, PENGUIN_COUNT, ROW, SET_PHASE_PLIES, START_FEN,
    },
    moves::{Move, MoveList},
    types::{Direction, GameRecord, Piece, Side, Square},
    zobrist_hash::{
        MAX_HASHED_SCORE, initialize_zobrist_hash_tables, red_collected_key, side_to_move_key,
        square_key,
    },
};

/// The playing position: the raw board plus the precomputed geometry tables
/// and the per-game history that enables make/unmake.
pub struct Position {
    // DYNAMIC
    pub board: Board,
    pub side: Side,
    pub hmc: usize, // Half-move clock; plies played from the start of the game
    pub history: [GameRecord; MAX_PLY],
    // STATIC
    bit_rays: [[BitBoard; NUM_SQUARES]; NUM_DIRECTIONS],
    bit_next: [BitBoard; NUM_SQUARES],
    bit_pattern: [BitBoard; NUM_SQUARES],
}

impl Position {
    /// Whether a single step in the given direction stays on the board. The
    /// diagonals hit the board edge on alternating ranks because odd ranks
    /// are shifted half a cell to the west.
    fn can_step(square: usize, direction: Direction) -> bool {
        let rank = ROW[square] as usize;
        let file = COLUMN[square] as usize;

        match direction {
            Direction::West => file > 0,
            Direction::East => file < 7,
            Direction::NorthWest => rank < 7 && !(file == 0 && rank % 2 == 1),
            Direction::NorthEast => rank < 7 && !(file == 7 && rank % 2 == 0),
            Direction::SouthWest => rank > 0 && !(file == 0 && rank % 2 == 1),
            Direction::SouthEast => rank > 0 && !(file == 7 && rank % 2 == 0),
        }
    }

    /// Square-index delta of one step. The diagonal deltas depend on the rank
    /// parity of the square being stepped from.
    fn step_offset(square: usize, direction: Direction) -> isize {
        let rank = ROW[square] as isize;

        match direction {
            Direction::West => -1,
            Direction::East => 1,
            Direction::NorthWest => 7 + (rank + 1) % 2,
            Direction::NorthEast => 8 + (rank + 1) % 2,
            Direction::SouthWest => -(8 + rank % 2),
            Direction::SouthEast => -(7 + rank % 2),
        }
    }

    fn get_ray_masks() -> [[BitBoard; NUM_SQUARES]; NUM_DIRECTIONS] {
        let mut rays = [[BitBoard::EMPTY; NUM_SQUARES]; NUM_DIRECTIONS];

        for square in Square::iter() {
            for direction in Direction::iter() {
                let mut current = square as usize;

                while Self::can_step(current, direction) {
                    current = (current as isize + Self::step_offset(current, direction)) as usize;
                    rays[direction as usize][square as usize].0 |= 1u64 << current;
                }
            }
        }

        rays
    }

    fn get_neighbor_masks() -> [BitBoard; NUM_SQUARES] {
        let mut neighbors = [BitBoard::EMPTY; NUM_SQUARES];

        for square in Square::iter() {
            for direction in Direction::iter() {
                if Self::can_step(square as usize, direction) {
                    let next = square as isize + Self::step_offset(square as usize, direction);
                    neighbors[square as usize].0 |= 1u64 << next;
                }
            }
        }

        neighbors
    }

    pub fn new() -> Self {
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        initialize_zobrist_hash_tables();

        let bit_rays = Self::get_ray_masks();
        let mut bit_pattern = [BitBoard::EMPTY; NUM_SQUARES];

        for square in 0..NUM_SQUARES {
            for direction in 0..NUM_DIRECTIONS {
                bit_pattern[square].0 |= bit_rays[direction][square].0;
            }
        }

        let mut position = Self {
            board: Board::empty(),
            side: Side::Red,
            hmc: 0,
            history: [GameRecord::empty(); MAX_PLY],
            bit_rays,
            bit_next: Self::get_neighbor_masks(),
            bit_pattern,
        };

        position.set_fen(fen)?;
        Ok(position)
    }

    /// Load a position string: 64 cell characters (a1..h8, values
    /// `r b 0 1 2 3 4`), side to move, and optionally both collected scores
    /// and the half-move clock. On any error the position is left unchanged.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        let cells = parts
            .first()
            .ok_or_else(|| "empty position string".to_string())?;

        if cells.chars().count() != NUM_SQUARES {
            return Err(format!(
                "position string has {} cells, expected {}",
                cells.chars().count(),
                NUM_SQUARES
            ));
        }

        let mut board = Board::empty();

        for (index, symbol) in cells.chars().enumerate() {
            let piece = Piece::from_symbol(symbol).ok_or_else(|| {
                format!("illegal cell character '{}' at position {}", symbol, index)
            })?;

            let square = Square::try_from(index as u8).expect("cell index is 0-63");
            board.value[square as usize] = piece;

            match piece {
                Piece::RedPenguin => board.bit_penguins[Side::Red as usize].set_bit(square),
                Piece::BluePenguin => board.bit_penguins[Side::Blue as usize].set_bit(square),
                Piece::Empty => {}
                fish => {
                    board.bit_fishes[fish.fish_count() as usize].set_bit(square);
                    board.bit_fishes[0].clear_bit(square);
                }
            }
        }

        let side = match parts.get(1) {
            Some(&"r") => Side::Red,
            Some(&"b") => Side::Blue,
            Some(other) => return Err(format!("illegal side to move '{}'", other)),
            None => return Err("position string misses the side to move".to_string()),
        };

        let mut collected = [0i32; 2];
        let mut hmc = 0usize;

        if parts.len() > 4 {
            collected[Side::Red as usize] = parts[2].parse().unwrap_or(0);
            collected[Side::Blue as usize] = parts[3].parse().unwrap_or(0);
            hmc = parts[4].parse().unwrap_or(0);
        }

        // Correct the clock and the scores if they are inconsistent with the
        // pieces already placed: every placement is a ply and collects at
        // least one tile.
        let red_count = board.bit_penguins[Side::Red as usize].count() as i32;
        let blue_count = board.bit_penguins[Side::Blue as usize].count() as i32;
        hmc = hmc.max((red_count + blue_count) as usize);
        collected[Side::Red as usize] = collected[Side::Red as usize].max(red_count);
        collected[Side::Blue as usize] = collected[Side::Blue as usize].max(blue_count);

        if collected[Side::Red as usize] as usize >= MAX_HASHED_SCORE {
            return Err(format!(
                "collected score {} exceeds the hashable maximum",
                collected[Side::Red as usize]
            ));
        }

        board.collected = collected;
        board.total_fishes = collected[0] + collected[1] + board.fish_value_in(BitBoard(!0u64));
        board.bit_all = BitBoard(
            board.bit_fishes[0].0
                | board.bit_penguins[Side::Red as usize].0
                | board.bit_penguins[Side::Blue as usize].0,
        );

        self.board = board;
        self.side = side;
        self.hmc = hmc;
        self.history = [GameRecord::empty(); MAX_PLY];
        self.board.hash = self.calculate_hash();
        self.board.bit_trapped = self.calculate_trapped();

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(NUM_SQUARES + 16);

        for square in Square::iter() {
            fen.push(self.board.value[square as usize].symbol());
        }

        fen.push(' ');
        fen.push(if self.side == Side::Red { 'r' } else { 'b' });
        fen.push_str(&format!(
            " {} {} {}",
            self.board.collected[Side::Red as usize],
            self.board.collected[Side::Blue as usize],
            self.hmc
        ));

        fen
    }

    /// Both sides are still placing pieces during the first 8 plies.
    pub fn is_set_phase(&self) -> bool {
        self.hmc < SET_PHASE_PLIES
    }

    pub fn neighbors(&self, square: Square) -> BitBoard {
        self.bit_next[square as usize]
    }

    /// The full six-ray movement pattern of a piece on an empty board.
    pub fn move_pattern(&self, square: Square) -> BitBoard {
        self.bit_pattern[square as usize]
    }

    /// All squares a piece on the given square can slide to this turn: for
    /// each of the six rays, everything strictly before the nearest blocker.
    /// Every open square bears a tile, since holes and pieces are the only
    /// blockers.
    pub fn slide_targets(&self, square: Square) -> BitBoard {
        let mut result = 0u64;

        for direction in Direction::iter() {
            let ray = self.bit_rays[direction as usize][square as usize];
            let blockers = self.board.bit_all.0 & ray.0;

            if blockers == 0 {
                result |= ray.0;
                continue;
            }

            let nearest = if direction.scans_from_msb() {
                BitBoard(blockers).last_bit()
            } else {
                BitBoard(blockers).first_bit()
            } as usize;

            // Remove the blocker and everything behind it, which is exactly
            // the same ray cast from the blocker square.
            result |= ray.0 & !self.bit_rays[direction as usize][nearest].0 & !(1u64 << nearest);
        }

        BitBoard(result)
    }

    /// All legal moves for the side to move. While the side still has pieces
    /// in hand, only placements onto single-tile squares are generated. A
    /// side with no move in an unfinished game gets the single pass move.
    pub fn generate_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        let piece = self.side.penguin();
        let mut penguins = self.board.bit_penguins[self.side as usize];

        if penguins.count() < PENGUIN_COUNT {
            let mut targets = self.board.bit_fishes[1];

            while !targets.is_empty() {
                let to = Square::try_from(targets.next_bit()).expect("bit index is a square");
                list.add(Move::placement(piece, to));
            }

            return list;
        }

        while !penguins.is_empty() {
            let from = Square::try_from(penguins.next_bit()).expect("bit index is a square");
            let mut targets = self.slide_targets(from);

            while !targets.is_empty() {
                let to = Square::try_from(targets.next_bit()).expect("bit index is a square");
                list.add(Move::new(piece, from, to, self.board.value[to as usize]));
            }
        }

        if list.count == 0 && !self.game_over() {
            list.add(Move::PASS);
        }

        list
    }

    /// A list holding only the given move, used to try a hash move before
    /// generating anything else. Empty if the game is already over.
    pub fn single_move_list(&self, mv: Move) -> MoveList {
        let mut list = MoveList::new();

        if self.game_over() {
            return list;
        }

        list.add(mv);
        list
    }

    /// Full legality check for an arbitrary move, used to validate moves from
    /// the transposition table and from external input.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        let id = mv.id();

        if id == Move::INVALID {
            return false;
        }
        if id == Move::PASS {
            return true;
        }
        if self.game_over() {
            return false;
        }

        let piece = mv.moved_piece();
        if piece.side() != Some(self.side) {
            return false;
        }

        // Every move must collect the tiles actually on its target square
        let fish = mv.fish();
        if !fish.is_fish() {
            return false;
        }
        if fish != self.board.value[mv.to_square() as usize] {
            return false;
        }

        if mv.is_placement()
            && fish == Piece::Fish1
            && self.board.bit_penguins[self.side as usize].count() < PENGUIN_COUNT
        {
            return true;
        }

        if self.board.value[mv.from_square() as usize] != piece {
            return false;
        }

        if !self
            .slide_targets(mv.from_square())
            .is_bit_set(mv.to_square())
        {
            return false;
        }

        true
    }

    pub fn make_move(&mut self, mv: Move) {
        if mv.is_pass() {
            self.make_pass(mv);
        } else {
            self.make_regular_move(mv);
        }
    }

    pub fn take_back_move(&mut self, mv: Move) {
        if mv.is_pass() {
            self.take_back_pass();
        } else {
            self.take_back_regular_move(mv);
        }
    }

    fn make_regular_move(&mut self, mv: Move) {
        debug_assert!(self.is_valid_move(mv));
        debug_assert!(self.hmc < MAX_PLY);

        self.history[self.hmc] = GameRecord {
            mv,
            hash: self.board.hash,
        };
        self.hmc += 1;

        self.move_piece_from_to(mv);

        self.side = self.side.opponent();
        self.board.hash ^= side_to_move_key();

        debug_assert_eq!(self.board.hash, self.calculate_hash());
        debug_assert_eq!(self.board.bit_trapped, self.calculate_trapped());
        debug_assert_eq!(
            self.board.bit_all.0,
            self.board.bit_fishes[0].0
                | self.board.bit_penguins[Side::Red as usize].0
                | self.board.bit_penguins[Side::Blue as usize].0
        );
    }

    fn take_back_regular_move(&mut self, mv: Move) {
        self.side = self.side.opponent();
        self.board.hash ^= side_to_move_key();

        self.move_piece_to_from(mv);
        self.hmc -= 1;

        debug_assert_eq!(self.board.hash, self.calculate_hash());
        debug_assert_eq!(self.board.bit_trapped, self.calculate_trapped());
    }

    fn make_pass(&mut self, mv: Move) {
        debug_assert!(self.hmc < MAX_PLY);

        self.history[self.hmc] = GameRecord {
            mv,
            hash: self.board.hash,
        };
        self.hmc += 1;

        self.side = self.side.opponent();
        self.board.hash ^= side_to_move_key();

        debug_assert_eq!(self.board.hash, self.calculate_hash());
    }

    fn take_back_pass(&mut self) {
        self.side = self.side.opponent();
        self.board.hash ^= side_to_move_key();
        self.hmc -= 1;

        debug_assert_eq!(self.board.hash, self.calculate_hash());
    }

    fn move_piece_from_to(&mut self, mv: Move) {
        let side = mv.side();
        let to = mv.to_square();

        // Step 1: the destination tile moves off the board
        self.board.consume_fish(to);

        // Step 2: the piece leaves its square (skipped for a placement) and
        // lands on the destination
        if !mv.is_placement() {
            self.board.remove_penguin(side, mv.from_square());
        }
        self.board.add_penguin(side, to);

        // Step 3: the tile value is credited
        self.board.add_collected(side, mv.fish_count());

        // Step 4: the destination now blocks sliding
        self.board.bit_all.set_bit(to);

        // Step 5: the arriving piece may have no targets left, and it may
        // have taken the last target of a neighboring piece
        let targets = !self.board.bit_all.0;

        if self.bit_next[to as usize].0 & targets == 0 {
            self.board.bit_trapped.set_bit(to);
        }

        let mut neighbors = BitBoard(self.bit_next[to as usize].0 & self.board.all_penguins().0);
        while !neighbors.is_empty() {
            let neighbor = neighbors.next_bit() as usize;

            if self.bit_next[neighbor].0 & targets == 0 {
                self.board.bit_trapped.0 |= 1u64 << neighbor;
            }
        }
    }

    fn move_piece_to_from(&mut self, mv: Move) {
        let side = mv.side();
        let to = mv.to_square();

        // Step 1: untrap the destination and its whole neighborhood; the
        // restored square always bears a tile, so each of them has a target
        // again
        self.board.bit_trapped.clear_bit(to);

        let mut neighbors = BitBoard(self.bit_next[to as usize].0 & self.board.all_penguins().0);
        while !neighbors.is_empty() {
            let neighbor = neighbors.next_bit();
            self.board.bit_trapped.0 &= !(1u64 << neighbor);
        }

        // Step 2: the destination no longer blocks
        self.board.bit_all.clear_bit(to);

        // Step 3: give the tile value back
        self.board.add_collected(side, -mv.fish_count());

        // Step 4: the piece returns to its old square (skipped for a
        // placement) and the tile reappears on the destination
        self.board.lift_penguin(side, to);
        self.board.restore_fish(to, mv.fish());

        if !mv.is_placement() {
            self.board.add_penguin(side, mv.from_square());
        }
    }

    /// The game ends once all pieces are placed and every piece on the board
    /// is trapped.
    pub fn game_over(&self) -> bool {
        !self.board.bit_trapped.is_empty()
            && self.hmc > 7
            && self.board.all_penguins() == self.board.bit_trapped
    }

    /// The side with the higher collected total; None for a draw or an
    /// unfinished game.
    pub fn winner(&self) -> Option<Side> {
        if !self.game_over() {
            return None;
        }

        let red = self.board.collected[Side::Red as usize];
        let blue = self.board.collected[Side::Blue as usize];

        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(Side::Red),
            std::cmp::Ordering::Less => Some(Side::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Largest tile value the side to move can still collect this turn: one
    /// in the placement phase, otherwise the maximum on the board.
    pub fn max_fishes(&self) -> i32 {
        if self.is_set_phase() {
            return 1;
        }

        self.board.max_fishes_on_board()
    }

    /// Whether the move leaves some opposing neighbor of its destination with
    /// no targets at all.
    pub fn is_trapping_move(&self, mv: Move) -> bool {
        let to = mv.to_square();
        let blockers = self.board.bit_all.0 | (1u64 << (to as u64));

        let mut enemies = BitBoard(
            self.board.bit_penguins[mv.side().opponent() as usize].0 & self.bit_next[to as usize].0,
        );

        while !enemies.is_empty() {
            let square = enemies.next_bit() as usize;

            if self.bit_next[square].0 & !blockers == 0 {
                return true;
            }
        }

        false
    }

    pub fn last_move(&self) -> Move {
        if self.hmc > 1 {
            self.history[self.hmc - 1].mv
        } else {
            Move::INVALID
        }
    }

    pub fn next_to_last_move(&self) -> Move {
        if self.hmc > 1 {
            self.history[self.hmc - 2].mv
        } else {
            Move::INVALID
        }
    }

    /// Slow from-scratch hash, used to initialize the incremental hash and to
    /// verify it in debug builds.
    pub fn calculate_hash(&self) -> u64 {
        let mut hash = 0u64;

        for square in Square::iter() {
            let piece = self.board.value[square as usize];

            if piece != Piece::Empty {
                hash ^= square_key(square, piece);
            }
        }

        if self.side == Side::Red {
            hash ^= side_to_move_key();
        }

        hash ^= red_collected_key(self.board.collected[Side::Red as usize]);
        hash
    }

    /// Slow from-scratch trapped mask, normally maintained incrementally.
    pub fn calculate_trapped(&self) -> BitBoard {
        let mut trapped = BitBoard::EMPTY;
        let targets = !self.board.bit_all.0;

        let mut penguins = self.board.all_penguins();
        while !penguins.is_empty() {
            let square = penguins.next_bit() as usize;

            if self.bit_next[square].0 & targets == 0 {
                trapped.0 |= 1u64 << square;
            }
        }

        trapped
    }

    /// Game phase gradient: GAME_PHASE_GRADIENT_MAX while most tiles are still
    /// on the board, falling to 0 as they are consumed.
    pub fn game_phase(&self) -> i32 {
        (64 - self.board.bit_fishes[0].count() as i32).min(GAME_PHASE_GRADIENT_MAX)
    }

    /// Blend a middle-game and an end-game value by the current game phase.
    pub fn interpolate(&self, mg: i32, eg: i32) -> i32 {
        let phase = self.game_phase();
        (mg * phase + eg * (GAME_PHASE_GRADIENT_MAX - phase)) / GAME_PHASE_GRADIENT_MAX
    }

    /// All squares a side can reach through any number of moves, ignoring the
    /// opponent's replies: a flood fill across direct neighbors that stops at
    /// blockers.
    pub fn reachable_fields(&self, side: Side) -> BitBoard {
        let mut area = BitBoard::EMPTY;
        let mut penguins = self.board.bit_penguins[side as usize];

        while !penguins.is_empty() {
            let square = penguins.next_bit() as usize;

            if area.0 & (1u64 << square) == 0 {
                self.flood_fill_area(square, &mut area);
            }
        }

        area
    }

    /// Tile value inside the side's reachable area.
    pub fn reachable_fishes(&self, side: Side) -> i32 {
        self.board.fish_value_in(self.reachable_fields(side))
    }

    fn flood_fill_area(&self, square: usize, area: &mut BitBoard) {
        area.0 |= 1u64 << square;
        let mut frontier = 1u64 << square;

        while frontier != 0 {
            let mut next = 0u64;
            let mut scan = BitBoard(frontier);

            while !scan.is_empty() {
                next |= self.bit_next[scan.next_bit() as usize].0;
            }

            next &= !area.0 & !self.board.bit_all.0;
            area.0 |= next;
            frontier = next;
        }
    }

    /// The connected region a piece dominates outright: a flood fill across
    /// non-hole neighbors that fails as soon as any visited square touches an
    /// opposing piece. Returns the region without the piece's own square, or
    /// empty if the region leaks to the opponent.
    pub fn floe(&self, square: Square) -> BitBoard {
        let piece = self.board.value[square as usize];
        debug_assert!(piece.is_penguin());

        let Some(side) = piece.side() else {
            return BitBoard::EMPTY;
        };

        let enemies = self.board.bit_penguins[side.opponent() as usize].0;
        let holes = self.board.bit_fishes[0].0;

        let mut floe = 1u64 << (square as u64);
        let mut frontier = floe;

        while frontier != 0 {
            let mut next = 0u64;
            let mut scan = BitBoard(frontier);

            while !scan.is_empty() {
                let visited = scan.next_bit() as usize;

                if self.bit_next[visited].0 & enemies != 0 {
                    return BitBoard::EMPTY;
                }

                next |= self.bit_next[visited].0;
            }

            next &= !floe & !holes;
            floe |= next;
            frontier = next;
        }

        BitBoard(floe & !(1u64 << (square as u64)))
    }

    /// Leaf count of the move tree to the given depth. Deterministic for a
    /// fixed position, which makes it the primary movegen regression check.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 0;
        }

        let list = self.generate_moves();

        if depth == 1 {
            return list.count as u64;
        }

        let mut nodes = 0;

        for i in 0..list.count {
            let mv = list.at(i);
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.take_back_move(mv);
        }

        nodes
    }

    /// Per-root-move perft breakdown.
    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let list = self.generate_moves();
        let mut results = Vec::with_capacity(list.count);

        for i in 0..list.count {
            let mv = list.at(i);
            self.make_move(mv);
            let nodes = if depth > 1 { self.perft(depth - 1) } else { 1 };
            self.take_back_move(mv);
            results.push((mv, nodes));
        }

        results
    }

    /// Parse a move string against the current position: two square names,
    /// with from == to denoting a placement, or the fixed pass token.
    pub fn move_from_string(&self, text: &str) -> Option<Move> {
        let text = text.trim();

        if text == crate::constants::PASS_TOKEN {
            return Some(Move::PASS);
        }

        if text.len() != 4 {
            return None;
        }

        let from = Square::from_name(&text[0..2])?;
        let to = Square::from_name(&text[2..4])?;

        let mv = if from == to {
            Move::placement(self.side.penguin(), to)
        } else {
            let piece = self.board.value[from as usize];
            if !piece.is_penguin() {
                return None;
            }
            Move::new(piece, from, to, self.board.value[to as usize])
        };

        if self.is_valid_move(mv) { Some(mv) } else { None }
    }

    pub fn print_board(&self) {
        println!("--- Board ---");

        for rank in (0..NUM_RANKS).rev() {
            if rank % 2 == 0 {
                print!(" ");
            }
            for file in 0..NUM_FILES {
                print!(
                    "{} ",
                    self.board.value[rank * NUM_FILES + file].symbol()
                );
            }
            match rank {
                7 => print!(
                    "\tSide to move: {:?}\tTrapped: {}",
                    self.side,
                    self.board.bit_trapped.squares_string()
                ),
                6 => print!(
                    "\tRed score : {}+{}/{}",
                    self.board.collected[Side::Red as usize],
                    self.reachable_fishes(Side::Red),
                    self.board.total_fishes
                ),
                5 => print!(
                    "\tBlue score: {}+{}/{}",
                    self.board.collected[Side::Blue as usize],
                    self.reachable_fishes(Side::Blue),
                    self.board.total_fishes
                ),
                3 => print!(
                    "\tHash: {:016x}\tMG: {}%",
                    self.board.hash,
                    100 * self.game_phase() / GAME_PHASE_GRADIENT_MAX
                ),
                _ => {}
            }
            println!();
        }

        println!("\nFEN: {}", self.to_fen());

        let list = self.generate_moves();
        print!("Moves: {}", list.count);
        for i in 0..list.count {
            if i % 16 == 0 {
                println!();
            }
            print!("{} ", list.at(i).to_move_string());
        }
        println!();

        let mut penguins = self.board.all_penguins();
        let mut floe_count = 0;
        while !penguins.is_empty() {
            let square = Square::try_from(penguins.next_bit()).expect("bit index is a square");
            let floe = self.floe(square);

            if !floe.is_empty() {
                println!(
                    "Penguin on {} owns floe: {}",
                    square.name(),
                    floe.squares_string()
                );
                floe_count += 1;
            }
        }
        println!(
            "{} captured floe{} found",
            floe_count,
            if floe_count == 1 { "" } else { "s" }
        );

        println!(
            "Reachable for Red: {}",
            self.reachable_fields(Side::Red).squares_string()
        );
        println!(
            "Reachable for Blue: {}",
            self.reachable_fields(Side::Blue).squares_string()
        );
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
