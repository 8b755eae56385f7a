use std::io::{self, Write};

use hanabi_core::game::result::GameResult;

use crate::config::OutputFormat;

/// Human-readable line for one finished game.
pub fn format_text(result: &GameResult) -> String {
    format!(
        "Turn: {}, cards: {}, with risk: {}",
        result.turns, result.played_cards, result.risked_turns
    )
}

/// Streams finished games to a writer, one line each.
pub struct ResultWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
        }
    }

    pub fn write(&mut self, result: &GameResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", format_text(result))?,
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut self.writer, result)?;
                self.writer.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
