use std::cell::Cell;
use std::io::{self, BufRead, Lines, Write};
use std::iter::Enumerate;

use hanabi_core::game::action::Action;
use hanabi_core::game::engine::{EngineError, GameEngine};
use thiserror::Error;

use crate::command::{self, CommandError};
use crate::config::ArbiterConfig;
use crate::report::ResultWriter;

/// Reads commands line by line and referees every game they describe.
pub struct Arbiter {
    config: ArbiterConfig,
}

/// Totals returned after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: usize,
    pub games_finished: usize,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("line {line}: {source}: '{text}'")]
    Parse {
        line: usize,
        text: String,
        #[source]
        source: CommandError,
    },
    #[error("line {line}: {source}")]
    Engine {
        line: usize,
        #[source]
        source: EngineError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Arbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        Self { config }
    }

    /// Every input line hands the seat on, including blank lines and lines
    /// skipped in lenient mode.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RunSummary, RunError> {
        let strict = self.config.input.strict;
        let mut engine = GameEngine::new();
        let mut sink = ResultWriter::new(output, self.config.output.format);
        let cursor = Cell::new(0usize);
        let skipped = Cell::new(0usize);
        let refused = Cell::new(false);
        let mut failure = None;

        let stream = ActionStream {
            lines: input.lines().enumerate(),
            strict,
            cursor: &cursor,
            skipped: &skipped,
            refused: &refused,
            failure: &mut failure,
        };

        for outcome in engine.run_games(stream) {
            match outcome {
                Ok(result) => {
                    tracing::info!(
                        line = cursor.get(),
                        turns = result.turns,
                        played = result.played_cards,
                        risked = result.risked_turns,
                        ending = %result.ending,
                        "game finished"
                    );
                    sink.write(&result)?;
                }
                Err(source) => {
                    let err = RunError::Engine {
                        line: cursor.get(),
                        source,
                    };
                    if strict {
                        return Err(err);
                    }
                    tracing::warn!(error = %err, "skipping refused command");
                    skipped.set(skipped.get() + 1);
                    refused.set(true);
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let games_finished = sink.written();
        sink.finish()?;
        Ok(RunSummary {
            lines_read: cursor.get(),
            games_finished,
            skipped: skipped.get(),
        })
    }
}

/// Parsed actions pulled lazily from the input, one per line. Blank and
/// skipped lines become `Action::Pass`. In strict mode a parse failure ends
/// the stream instead.
struct ActionStream<'a, B> {
    lines: Enumerate<Lines<B>>,
    strict: bool,
    cursor: &'a Cell<usize>,
    skipped: &'a Cell<usize>,
    /// Set when the engine refused the last action; it still passes the seat.
    refused: &'a Cell<bool>,
    failure: &'a mut Option<RunError>,
}

impl<B: BufRead> Iterator for ActionStream<'_, B> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        if self.failure.is_some() {
            return None;
        }
        if self.refused.replace(false) {
            return Some(Action::Pass);
        }

        let (index, line) = self.lines.next()?;
        let number = index + 1;
        self.cursor.set(number);
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                *self.failure = Some(RunError::Io(err));
                return None;
            }
        };

        match command::parse_line(&line) {
            Ok(Some(action)) => Some(action),
            Ok(None) => Some(Action::Pass),
            Err(source) => {
                let err = RunError::Parse {
                    line: number,
                    text: line.trim().to_string(),
                    source,
                };
                if self.strict {
                    *self.failure = Some(err);
                    return None;
                }
                tracing::warn!(error = %err, "skipping malformed command");
                self.skipped.set(self.skipped.get() + 1);
                Some(Action::Pass)
            }
        }
    }
}
