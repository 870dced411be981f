//! Terminal output for streamed answers.
//!
//! Fragments are printed raw as they arrive and flushed immediately;
//! transport errors are printed inline in red.

use std::io::Write;

use console::style;

use docschat_core::chat::session::TurnSink;

/// [`TurnSink`] that writes to stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    /// Whether the current turn has printed any answer text.
    wrote_text: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush() {
        let _ = std::io::stdout().flush();
    }
}

impl TurnSink for TerminalRenderer {
    fn prompt(&mut self) {
        print!("\n{} ", style(">").cyan().bold());
        Self::flush();
    }

    fn text(&mut self, fragment: &str) {
        print!("{fragment}");
        Self::flush();
        self.wrote_text = true;
    }

    fn error(&mut self, message: &str) {
        if self.wrote_text {
            println!();
        }
        print!("{}", style(message).red());
        Self::flush();
    }

    fn turn_finished(&mut self) {
        println!();
        self.wrote_text = false;
    }
}
