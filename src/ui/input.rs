//! Command line input
//!
//! Stdin is read on a plain thread: a blocking read parked on the runtime's
//! blocking pool would hold up shutdown until the next line arrives.

use std::io::BufRead;
use std::thread::JoinHandle;

use crate::app::{Message, MessageSender};

/// Forward stdin into the application loop
pub fn spawn_stdin_reader(tx: MessageSender) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || forward_lines(std::io::stdin().lock(), tx))
}

/// Forward every non-blank line as `Message::Input`, then quit at end of
/// input
pub fn forward_lines<R: BufRead>(reader: R, tx: MessageSender) {
    for line in reader.lines() {
        match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                if tx.send(Message::Input(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                break;
            }
        }
    }
    tracing::debug!("Input closed");
    let _ = tx.send(Message::Quit);
}
