//! Interactive pruning of the live dictionary while the game runs.
//!
//! The operator types words they already know; each known word is removed
//! and the dictionary is saved before the next line is read. The loop ends
//! only when the cancellation token fires (the game exited), never because
//! of what was typed.

use std::path::PathBuf;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::dictionary::{Dictionary, DictionaryError};

/// Where the pruned dictionary is written after a mutating line
pub trait DictionarySink {
    fn persist(&mut self, dictionary: &Dictionary) -> Result<(), DictionaryError>;
}

/// Full rewrite of the dictionary file
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DictionarySink for FileSink {
    fn persist(&mut self, dictionary: &Dictionary) -> Result<(), DictionaryError> {
        dictionary.save(&self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrunerState {
    Running,
    Stopped,
}

/// What happened to one typed word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub word: String,
    /// Count the word had before removal, 0 when it was not found
    pub occurrence_count: u32,
    pub removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineReport {
    pub tokens: Vec<TokenOutcome>,
    /// The dictionary was saved after this line
    pub persisted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneSummary {
    pub deleted: usize,
    pub remaining: usize,
}

pub struct Pruner<'a, S> {
    dictionary: &'a mut Dictionary,
    sink: S,
    deleted_count: usize,
    dirty: bool,
    state: PrunerState,
}

impl<'a, S: DictionarySink> Pruner<'a, S> {
    pub fn new(dictionary: &'a mut Dictionary, sink: S) -> Self {
        Self {
            dictionary,
            sink,
            deleted_count: 0,
            dirty: false,
            state: PrunerState::Running,
        }
    }

    pub fn state(&self) -> PrunerState {
        self.state
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_count
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn summary(&self) -> PruneSummary {
        PruneSummary {
            deleted: self.deleted_count,
            remaining: self.dictionary.len(),
        }
    }

    /// Remove every known word of `line`, saving if anything changed
    pub fn prune_line(&mut self, line: &str) -> LineReport {
        let mut report = LineReport::default();

        for token in line.split_whitespace() {
            let word = token.to_lowercase().trim().to_string();
            let outcome = match self.dictionary.remove(&word) {
                Some(entry) => {
                    self.deleted_count += 1;
                    self.dirty = true;
                    TokenOutcome {
                        word,
                        occurrence_count: entry.occurrence_count,
                        removed: true,
                    }
                }
                None => TokenOutcome {
                    word,
                    occurrence_count: 0,
                    removed: false,
                },
            };
            report.tokens.push(outcome);
        }

        if self.dirty {
            match self.flush() {
                Ok(()) => report.persisted = true,
                Err(e) => tracing::error!("Failed to save dictionary: {}", e),
            }
        }

        report
    }

    fn flush(&mut self) -> Result<(), DictionaryError> {
        self.sink.persist(&*self.dictionary)?;
        self.dirty = false;
        tracing::debug!("Dictionary saved, {} words left", self.dictionary.len());
        Ok(())
    }

    /// Prune lines from `input` until `cancel` fires.
    ///
    /// A pending read is abandoned as soon as the token is cancelled. When
    /// the input closes first, the loop idles until cancellation. A save
    /// that failed earlier is retried once more on the way out.
    pub async fn run<F>(
        &mut self,
        input: AsyncReceiver<String>,
        cancel: CancellationToken,
        mut on_line: F,
    ) -> Result<PruneSummary, DictionaryError>
    where
        F: FnMut(&LineReport),
    {
        while self.state == PrunerState::Running {
            let received = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.state = PrunerState::Stopped;
                    break;
                }
                received = input.recv() => received,
            };

            match received {
                Ok(line) => {
                    let report = self.prune_line(&line);
                    on_line(&report);
                }
                Err(_) => {
                    tracing::debug!("Operator input closed, waiting for the game to exit");
                    cancel.cancelled().await;
                    self.state = PrunerState::Stopped;
                }
            }
        }

        if self.dirty {
            self.flush()?;
        }

        let summary = self.summary();
        tracing::info!(
            "Pruning stopped: {} removed, {} left",
            summary.deleted,
            summary.remaining
        );
        Ok(summary)
    }
}
