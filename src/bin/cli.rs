use std::io::{self, BufRead, Write};

use floe_engine::constants::{DEFAULT_MOVETIME_MS, MAX_SEARCH_DEPTH};
use floe_engine::engine::Engine;
use floe_engine::moves::Move;
use floe_engine::time::SearchLimits;
use floe_engine::types::Side;

/// Interactive console driver: play against the engine, set up positions,
/// take moves back and run perft counts.
struct Console {
    engine: Engine,
    computer_side: Option<Side>,
    max_depth: u32,
    movetime_ms: u64,
    display_disabled: bool,
}

impl Console {
    fn new() -> Self {
        Self {
            engine: Engine::new(),
            computer_side: None,
            max_depth: MAX_SEARCH_DEPTH,
            movetime_ms: DEFAULT_MOVETIME_MS,
            display_disabled: false,
        }
    }

    fn show_help(&self) {
        println!("======================= INFORMATION ======================");
        println!("h or help - Displays help on the commands");
        println!("d or D    - Displays board and toggles display setting");
        println!("moves     - Displays a list of possible moves");
        println!("fen       - Displays the position string");
        println!("q or quit - Quits the program");
        println!("================= CONTROLLING THE ENGINE =================");
        println!("go        - Starts the engine from the current position");
        println!("new       - Starts a new game");
        println!("p or play - The computer plays the side to move");
        println!("off       - Turns the computer player off");
        println!("undo      - Takes back the last move");
        println!("===================== CONFIGURATION ======================");
        println!("board <s> - Loads a position string");
        println!("sd <n>    - Sets the search depth");
        println!("st <n>    - Sets the time limit per move in milliseconds");
        println!("perft <n> - Counts the move tree to depth n");
    }

    fn display_board(&self) {
        if !self.display_disabled {
            self.engine.position.print_board();
        }
    }

    fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.max_depth,
            movetime: self.movetime_ms,
            ..SearchLimits::default()
        }
    }

    fn computer_move(&mut self) {
        let limits = self.search_limits();
        let mv = self.engine.search(&limits);

        if mv == Move::INVALID {
            println!("No move possible");
            self.computer_side = None;
            return;
        }

        println!("Computer plays {}", mv.to_move_string());
        self.engine.position.make_move(mv);
        self.display_board();
        self.announce_result();
    }

    fn announce_result(&mut self) {
        if !self.engine.position.game_over() {
            return;
        }

        let red = self.engine.position.board.collected[Side::Red as usize];
        let blue = self.engine.position.board.collected[Side::Blue as usize];

        match self.engine.position.winner() {
            Some(Side::Red) => println!("GAME OVER - Red wins {}:{}", red, blue),
            Some(Side::Blue) => println!("GAME OVER - Blue wins {}:{}", blue, red),
            None => println!("GAME OVER - Draw {}:{}", red, blue),
        }

        self.computer_side = None;
    }

    fn undo_move(&mut self) {
        if self.engine.position.hmc == 0 {
            println!("Nothing to undo");
            return;
        }

        let mv = self.engine.position.history[self.engine.position.hmc - 1].mv;
        self.engine.position.take_back_move(mv);
        self.computer_side = None;
        self.display_board();
    }

    fn run_perft(&mut self, argument: Option<&str>) {
        let max_depth = argument.and_then(|text| text.parse().ok()).unwrap_or(4);

        for depth in 1..=max_depth {
            let start = std::time::Instant::now();
            let nodes = self.engine.position.perft(depth);

            println!(
                "Perft {:2}: {:12}\t{:6} ms",
                depth,
                nodes,
                start.elapsed().as_millis()
            );
        }
    }

    /// Handle one console command; returns false to quit.
    fn handle(&mut self, input: &str) -> bool {
        let parts: Vec<&str> = input.split_whitespace().collect();

        let Some(&command) = parts.first() else {
            return true;
        };

        match command {
            "q" | "quit" => return false,
            "h" | "help" => self.show_help(),
            "d" | "D" => {
                self.display_disabled = !self.display_disabled;
                self.engine.position.print_board();
            }
            "moves" => {
                let list = self.engine.position.generate_moves();
                for i in 0..list.count {
                    print!("{} ", list.at(i).to_move_string());
                    if (i + 1) % 8 == 0 {
                        println!();
                    }
                }
                println!();
            }
            "fen" => println!("{}", self.engine.position.to_fen()),
            "go" => self.computer_move(),
            "new" => {
                self.engine.new_game();
                self.engine.position = floe_engine::position::Position::new();
                self.computer_side = None;
                self.display_board();
            }
            "p" | "play" => {
                self.computer_side = Some(self.engine.position.side);
                self.computer_move();
            }
            "off" => self.computer_side = None,
            "undo" => self.undo_move(),
            "board" => {
                let fen = parts[1..].join(" ");
                match self.engine.position.set_fen(&fen) {
                    Ok(()) => self.display_board(),
                    Err(error) => println!("Invalid position: {}", error),
                }
            }
            "sd" => match parts.get(1).and_then(|text| text.parse().ok()) {
                Some(depth) => self.max_depth = depth,
                None => println!("Usage: sd <depth>"),
            },
            "st" => match parts.get(1).and_then(|text| text.parse().ok()) {
                Some(ms) => self.movetime_ms = ms,
                None => println!("Usage: st <milliseconds>"),
            },
            "perft" => self.run_perft(parts.get(1).copied()),
            _ => match self.engine.position.move_from_string(command) {
                Some(mv) => {
                    self.engine.position.make_move(mv);
                    self.display_board();
                    self.announce_result();

                    if self.computer_side == Some(self.engine.position.side) {
                        self.computer_move();
                    }
                }
                None => println!("Unknown command or illegal move: {}", input),
            },
        }

        true
    }
}

fn main() {
    let mut console = Console::new();

    println!("Floe Engine console - type 'help' for a command list");
    console.display_board();

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush().expect("stdout is writable");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }

        if !console.handle(line.trim()) {
            break;
        }
    }
}
