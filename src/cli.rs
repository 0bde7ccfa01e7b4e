//! Command-line REPL
//!
//! Reads inbound messages on a blocking thread and forwards them to the main
//! loop, which owns the device and the host.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Spawn the REPL thread. The channel closes when the user quits.
pub fn spawn_repl() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                warn!("Failed to start line editor: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("io-routing> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == "exit" || trimmed == "quit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);
                    if tx.blocking_send(trimmed.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    warn!("Readline error: {}", e);
                    break;
                }
            }
        }
        debug!("REPL closed");
    });

    rx
}
