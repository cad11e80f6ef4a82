#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

use crate::constants::NO_SCORE;
use crate::engine::Engine;
use crate::moves::Move;
use crate::time::SearchLimits;

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub rtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub rinc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movetime_ms: Option<u64>,
    pub depth: Option<u32>,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,      // Best move as a move string (e.g. c2c4, a1a1)
    pub evaluation: i32,        // Score for the side to move, mate scores included
    pub depth: u32,             // Iterative deepening depth reached
    pub nodes: u64,             // Total nodes searched
    pub pv: Vec<String>,        // Principal variation, best move first
    pub time_ms: u64,           // Time spent searching
    pub fen_after_move: String, // Position string after applying the best move
}

/// Main entry point for embedding consumers: analyze a position and return
/// the best move with its line and telemetry.
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse, String> {
    let mut engine = Engine::new();

    engine
        .position
        .set_fen(&request.fen)
        .map_err(|error| format!("Invalid position: {}", error))?;

    let limits = SearchLimits {
        time: [
            request.rtime_ms.unwrap_or(0),
            request.btime_ms.unwrap_or(0),
        ],
        inc: [request.rinc_ms.unwrap_or(0), request.binc_ms.unwrap_or(0)],
        movetime: request.movetime_ms.unwrap_or(0),
        depth: request.depth.unwrap_or(0),
        ..SearchLimits::default()
    };

    let best_move = engine.search(&limits);

    if best_move == Move::INVALID {
        return Err("No legal moves in position (game is over)".to_string());
    }

    let pv = engine
        .pv_moves()
        .iter()
        .map(|mv| mv.to_move_string())
        .collect();

    engine.position.make_move(best_move);
    let fen_after_move = engine.position.to_fen();
    engine.position.take_back_move(best_move);

    Ok(AnalyzeResponse {
        best_move: best_move.to_move_string(),
        evaluation: if engine.last_value == NO_SCORE {
            0
        } else {
            engine.last_value
        },
        depth: engine.last_depth,
        nodes: engine.nodes_searched(),
        pv,
        time_ms: engine.last_time_ms,
        fen_after_move,
    })
}

/// Simpler interface with just a position string and a depth.
pub fn get_best_move(fen: &str, depth: u32) -> Result<AnalyzeResponse, String> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        rtime_ms: None,
        btime_ms: None,
        rinc_ms: None,
        binc_ms: None,
        movetime_ms: None,
        depth: Some(depth),
    })
}
