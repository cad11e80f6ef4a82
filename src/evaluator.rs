use crate::{
    bitboard::BitBoard,
    cache::EvalCache,
    constants::NUM_SIDES,
    position::Position,
    types::{Side, Square},
};

/// A value pair for the middle game and the end game; the evaluator blends
/// the two by the current game phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaperedValue {
    pub mg: i32,
    pub eg: i32,
}

impl TaperedValue {
    pub const fn new(mg: i32, eg: i32) -> Self {
        Self { mg, eg }
    }
}

/// The tunable weight set. Everything the evaluator and the pruning
/// heuristics scale by lives here, so a single table drives both.
#[derive(Clone, Copy, Debug)]
pub struct Weights {
    pub fish_material: TaperedValue,
    pub mobility: TaperedValue,
    pub agility: TaperedValue,
    pub scoreability: TaperedValue,
    pub captured_floe_pct: TaperedValue,
    pub trapped_penalty: TaperedValue,
    pub static_null_margin: TaperedValue,
    pub lmr_minimum_moves: TaperedValue,
    pub razor_margin: TaperedValue,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            fish_material: TaperedValue::new(100, 119),
            mobility: TaperedValue::new(246, 111),
            agility: TaperedValue::new(128, 1),
            scoreability: TaperedValue::new(255, 194),
            captured_floe_pct: TaperedValue::new(10, 74),
            trapped_penalty: TaperedValue::new(848, 279),
            static_null_margin: TaperedValue::new(118, 39),
            lmr_minimum_moves: TaperedValue::new(5, 7),
            razor_margin: TaperedValue::new(250, 164),
        }
    }
}

const MOBILITY_STEPS: usize = 22; // at most 21 squares are reachable
const AGILITY_STEPS: usize = 7; // at most 6 open directions
const SCOREABILITY_STEPS: usize = 41; // tile value in the pattern, capped at 40

/// The weights expanded into the lookup tables the evaluator actually reads.
/// The per-piece features follow a log-shaped curve, so the first reachable
/// squares are worth much more than the tenth.
pub struct Values {
    pub fish_material: TaperedValue,
    pub mobility: [TaperedValue; MOBILITY_STEPS],
    pub agility: [TaperedValue; AGILITY_STEPS],
    pub scoreability: [TaperedValue; SCOREABILITY_STEPS],
    pub captured_floe_pct: TaperedValue,
    pub trapped_penalty: TaperedValue,
    pub static_null_margin: TaperedValue,
    pub lmr_minimum_moves: TaperedValue,
    pub razor_margin: TaperedValue,
}

impl Values {
    pub fn from_weights(weights: &Weights) -> Self {
        let curve = |weight: TaperedValue, shift: f64, drop: f64, step: usize| TaperedValue {
            mg: (weight.mg as f64 * ((step as f64 + shift).ln() - drop)) as i32,
            eg: (weight.eg as f64 * ((step as f64 + shift).ln() - drop)) as i32,
        };

        let mut mobility = [TaperedValue::default(); MOBILITY_STEPS];
        for (step, value) in mobility.iter_mut().enumerate() {
            *value = curve(weights.mobility, 2.0, 2.0, step);
        }

        let mut agility = [TaperedValue::default(); AGILITY_STEPS];
        for (step, value) in agility.iter_mut().enumerate() {
            *value = curve(weights.agility, 1.0, 1.0, step);
        }

        let mut scoreability = [TaperedValue::default(); SCOREABILITY_STEPS];
        for (step, value) in scoreability.iter_mut().enumerate() {
            *value = curve(weights.scoreability, 2.0, 2.0, step);
        }

        Self {
            fish_material: weights.fish_material,
            mobility,
            agility,
            scoreability,
            captured_floe_pct: weights.captured_floe_pct,
            // Penalties carry their sign here so the feature loop only adds
            trapped_penalty: TaperedValue::new(
                -weights.trapped_penalty.mg,
                -weights.trapped_penalty.eg,
            ),
            static_null_margin: weights.static_null_margin,
            lmr_minimum_moves: weights.lmr_minimum_moves,
            razor_margin: weights.razor_margin,
        }
    }
}

/// The phase-blended static evaluator with its result cache. Scores follow
/// the negamax convention: blue minus red, negated when red is to move.
pub struct Evaluator {
    pub values: Values,
    pub cache: EvalCache,
}

impl Evaluator {
    pub fn new(weights: &Weights) -> Self {
        Self {
            values: Values::from_weights(weights),
            cache: EvalCache::new(),
        }
    }

    /// Rebuild the lookup tables after a weight change. Cached scores were
    /// computed with the old values, so the cache is dropped with them.
    pub fn set_weights(&mut self, weights: &Weights) {
        self.values = Values::from_weights(weights);
        self.cache.reset();
    }

    pub fn evaluate(&mut self, position: &Position) -> i32 {
        if let Some(value) = self.cache.probe(position.board.hash) {
            return value;
        }

        let mut mg = [0i32; NUM_SIDES];
        let mut eg = [0i32; NUM_SIDES];
        let mut attacked_by = [BitBoard::EMPTY; NUM_SIDES];

        for side in Side::iter() {
            self.evaluate_material(position, side, &mut mg, &mut eg);
            self.evaluate_positional(position, side, &mut mg, &mut eg, &mut attacked_by);
            self.evaluate_trapped(position, side, &mut mg, &mut eg);
        }

        // Floes are scored after both attack sets are known, so the overlap
        // precheck applies to both sides alike
        for side in Side::iter() {
            self.evaluate_floes(position, side, &mut mg, &mut eg, &attacked_by);
        }

        let red = Side::Red as usize;
        let blue = Side::Blue as usize;

        let mut score = position.interpolate(mg[blue] - mg[red], eg[blue] - eg[red]);

        if position.side == Side::Red {
            score = -score;
        }

        self.cache.store(position.board.hash, score);
        score
    }

    fn evaluate_material(&self, position: &Position, side: Side, mg: &mut [i32], eg: &mut [i32]) {
        let collected = position.board.collected[side as usize];

        mg[side as usize] += collected * self.values.fish_material.mg;
        eg[side as usize] += collected * self.values.fish_material.eg;
    }

    fn evaluate_positional(
        &self,
        position: &Position,
        side: Side,
        mg: &mut [i32],
        eg: &mut [i32],
        attacked_by: &mut [BitBoard],
    ) {
        let mut penguins = BitBoard(
            position.board.bit_penguins[side as usize].0 & !position.board.bit_trapped.0,
        );

        while !penguins.is_empty() {
            let square = Square::try_from(penguins.next_bit()).expect("bit index is a square");
            let attacks = position.slide_targets(square);
            attacked_by[side as usize].0 |= attacks.0;

            let mobility = attacks.count() as usize;
            mg[side as usize] += self.values.mobility[mobility].mg;
            eg[side as usize] += self.values.mobility[mobility].eg;

            let agility = BitBoard(attacks.0 & position.neighbors(square).0).count() as usize;
            mg[side as usize] += self.values.agility[agility].mg;
            eg[side as usize] += self.values.agility[agility].eg;

            let scoreability = (position.board.fish_value_in(attacks) as usize)
                .min(SCOREABILITY_STEPS - 1);
            mg[side as usize] += self.values.scoreability[scoreability].mg;
            eg[side as usize] += self.values.scoreability[scoreability].eg;
        }
    }

    fn evaluate_trapped(&self, position: &Position, side: Side, mg: &mut [i32], eg: &mut [i32]) {
        let trapped = BitBoard(
            position.board.bit_trapped.0 & position.board.bit_penguins[side as usize].0,
        );

        if trapped.is_empty() {
            return;
        }

        mg[side as usize] += trapped.count() as i32 * self.values.trapped_penalty.mg;
        eg[side as usize] += trapped.count() as i32 * self.values.trapped_penalty.eg;
    }

    fn evaluate_floes(
        &self,
        position: &Position,
        side: Side,
        mg: &mut [i32],
        eg: &mut [i32],
        attacked_by: &[BitBoard],
    ) {
        // Placement moves redraw region borders every ply, so floes are not
        // meaningful until all pieces are down
        if position.is_set_phase() {
            return;
        }

        let enemy = side.opponent() as usize;
        let mut penguins = BitBoard(
            position.board.bit_penguins[side as usize].0 & !position.board.bit_trapped.0,
        );
        let mut counted = BitBoard::EMPTY;

        while !penguins.is_empty() {
            let square = Square::try_from(penguins.next_bit()).expect("bit index is a square");

            // A piece whose pattern crosses an enemy pattern cannot own a
            // region outright
            if position.slide_targets(square).0 & attacked_by[enemy].0 != 0 {
                continue;
            }

            let floe = BitBoard(position.floe(square).0 & !counted.0);
            counted.0 |= floe.0;

            if floe.is_empty() {
                continue;
            }

            let fish_value = position.board.fish_value_in(floe);
            mg[side as usize] += fish_value * self.values.captured_floe_pct.mg;
            eg[side as usize] += fish_value * self.values.captured_floe_pct.eg;
        }
    }

    /// Evaluation summary for the console.
    pub fn print(&mut self, position: &Position) {
        let score = self.evaluate(position);

        println!(
            "Phase: {}% MG, collected {} / {}, trapped {} / {}",
            100 * position.game_phase() / crate::constants::GAME_PHASE_GRADIENT_MAX,
            position.board.collected[Side::Red as usize],
            position.board.collected[Side::Blue as usize],
            BitBoard(position.board.bit_trapped.0 & position.board.bit_penguins[0].0).count(),
            BitBoard(position.board.bit_trapped.0 & position.board.bit_penguins[1].0).count(),
        );
        println!(
            "Static evaluation for the side to move ({:?}): {}",
            position.side, score
        );
    }
}
