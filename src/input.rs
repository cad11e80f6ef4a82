use std::io::BufRead;
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError};
use std::thread;

/// Background line reader. A dedicated thread reads stdin and hands each
/// line over through a single-slot channel, so the producer blocks until the
/// search (or the command loop) has drained the previous line. The search
/// polls with `try_read` at bounded intervals and never blocks on it.
pub struct InputReader {
    receiver: Receiver<String>,
}

impl InputReader {
    pub fn spawn() -> Self {
        let (sender, receiver): (SyncSender<String>, Receiver<String>) =
            std::sync::mpsc::sync_channel(1);

        thread::spawn(move || {
            let stdin = std::io::stdin();

            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };

                if line.trim().is_empty() {
                    continue;
                }

                let quit = line.trim() == "quit";

                if sender.send(line).is_err() {
                    return;
                }
                if quit {
                    return;
                }
            }

            // EOF on stdin is treated as a quit request
            let _ = sender.send("quit".to_string());
        });

        Self { receiver }
    }

    /// Non-blocking poll used from inside the search.
    pub fn try_read(&self) -> Option<String> {
        match self.receiver.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocking read used by the command loop between searches.
    pub fn read_line(&self) -> Option<String> {
        self.receiver.recv().ok()
    }
}
