use std::time::Instant;

use crate::{
    constants::{PASS_TOKEN, START_FEN},
    engine::Engine,
    input::InputReader,
    moves::Move,
    time::SearchLimits,
    types::Side,
};

const ENGINE_NAME: &str = "Floe Engine";
const ENGINE_AUTHOR: &str = "Floe Engine developers";

/// Protocol loop: a background thread reads command lines and the loop
/// drains them one at a time. While a search runs, the engine polls the same
/// mailbox so a stop request reaches it mid-search.
pub fn uci_loop(engine: &mut Engine) {
    engine.attach_input(InputReader::spawn());

    loop {
        let Some(line) = engine.read_command() else {
            break;
        };

        if !handle_command(engine, line.trim()) {
            break;
        }

        if engine.quit_requested {
            break;
        }
    }
}

/// Dispatch one command line. Returns false when the session should end.
/// Malformed input is reported and ignored; the engine state stays as it was.
pub fn handle_command(engine: &mut Engine, input: &str) -> bool {
    if input.is_empty() {
        return true;
    }

    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts[0] {
        "quit" => return false,
        "uci" => {
            println!("id name {}", ENGINE_NAME);
            println!("id author {}", ENGINE_AUTHOR);
            println!("uciok");
        }
        "isready" => println!("readyok"),
        "ucinewgame" => engine.new_game(),
        "position" => {
            if let Err(error) = parse_position_command(engine, input) {
                println!("Error parsing position: {}", error);
            }
        }
        "go" => run_search(engine, input),
        "stop" => {}
        "print" | "d" => engine.position.print_board(),
        "eval" => engine.print_eval(),
        "perft" => run_perft(engine, &parts),
        "divide" => run_divide(engine, &parts),
        "execute" => run_execute(engine, &parts),
        move_str if move_str.len() == 4 => match engine.position.move_from_string(move_str) {
            Some(mv) => engine.position.make_move(mv),
            None => println!("Illegal command: {}", input),
        },
        _ => println!("Illegal command: {}", input),
    }

    true
}

fn run_search(engine: &mut Engine, input: &str) {
    let limits = parse_go_command(input);
    let mv = engine.search(&limits);

    if engine.position.game_over() || mv == Move::INVALID {
        println!("bestmove {}", PASS_TOKEN);
    } else {
        println!("bestmove {}", mv.to_move_string());
    }
}

/// Parse a go command into search limits.
/// Examples:
///   go movetime 1000
///   go depth 8
///   go rtime 120000 btime 120000 rinc 2000 binc 2000
///   go infinite
pub fn parse_go_command(command: &str) -> SearchLimits {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let mut limits = SearchLimits::default();

    let mut i = 1;
    while i < parts.len() {
        let value = parts.get(i + 1).and_then(|text| text.parse::<u64>().ok());

        match parts[i] {
            "rtime" => limits.time[Side::Red as usize] = value.unwrap_or(0),
            "btime" => limits.time[Side::Blue as usize] = value.unwrap_or(0),
            "rinc" => limits.inc[Side::Red as usize] = value.unwrap_or(0),
            "binc" => limits.inc[Side::Blue as usize] = value.unwrap_or(0),
            "movestogo" => limits.movestogo = value.unwrap_or(0),
            "depth" => limits.depth = value.unwrap_or(0) as u32,
            "nodes" => limits.nodes = value.unwrap_or(0),
            "movetime" => limits.movetime = value.unwrap_or(0),
            "infinite" => {
                limits.infinite = true;
                i += 1;
                continue;
            }
            _ => {
                i += 1;
                continue;
            }
        }

        i += 2;
    }

    limits
}

/// Parse a position command.
/// Examples:
///   position startpos
///   position board <64 cells> r 0 0 0
///   position board <64 cells> b 4 4 8 moves c2c4 f6d6
pub fn parse_position_command(engine: &mut Engine, command: &str) -> Result<(), String> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    if parts.len() < 2 {
        return Err("missing position type".to_string());
    }

    let mut index = 1;

    if parts[index] == "startpos" {
        engine.position.set_fen(START_FEN)?;
        index += 1;
    } else if parts[index] == "board" || parts[index] == "fen" {
        index += 1;

        let mut fen_parts = Vec::new();
        while index < parts.len() && parts[index] != "moves" {
            fen_parts.push(parts[index]);
            index += 1;
        }

        engine.position.set_fen(&fen_parts.join(" "))?;
    } else {
        return Err(format!("unknown position type '{}'", parts[index]));
    }

    if index < parts.len() && parts[index] == "moves" {
        for move_str in &parts[index + 1..] {
            let mv = engine
                .position
                .move_from_string(move_str)
                .ok_or_else(|| format!("invalid move '{}' in position command", move_str))?;

            engine.position.make_move(mv);
        }
    }

    Ok(())
}

fn run_perft(engine: &mut Engine, parts: &[&str]) {
    let max_depth = parts.get(1).and_then(|text| text.parse().ok()).unwrap_or(4);

    for depth in 1..=max_depth {
        let start = Instant::now();
        let nodes = engine.position.perft(depth);

        println!(
            "Perft {:2}: {:12}\t{:6} ms",
            depth,
            nodes,
            start.elapsed().as_millis()
        );
    }
}

fn run_divide(engine: &mut Engine, parts: &[&str]) {
    let depth = parts.get(1).and_then(|text| text.parse().ok()).unwrap_or(4);
    let results = engine.position.divide(depth);

    println!("Available Moves: {}", results.len());

    let mut total = 0;
    for (mv, nodes) in &results {
        total += nodes;
        println!("{}: {:8}", mv.to_move_string(), nodes);
    }

    println!("Total Nodes: {:8}", total);
}

/// Run every line of a file through the command handler, for scripted test
/// sessions and reproducing reported games.
fn run_execute(engine: &mut Engine, parts: &[&str]) {
    let Some(filename) = parts.get(1) else {
        println!("Usage: execute <filename>");
        return;
    };

    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(_) => {
            println!("Error reading file: {}", filename);
            return;
        }
    };

    for line in contents.lines() {
        if !handle_command(engine, line.trim()) {
            break;
        }
    }
}
