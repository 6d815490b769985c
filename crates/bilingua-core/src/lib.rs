pub mod annotate;
pub mod dictionary;
pub mod document;
pub mod preprocess;
pub mod prune;
pub mod state;

pub use annotate::HintStyle;
pub use dictionary::{Dictionary, DictionaryError, WordEntry};
pub use document::{DocumentError, DocumentStats};
pub use prune::{DictionarySink, FileSink, LineReport, PruneSummary, Pruner, PrunerState, TokenOutcome};
pub use state::Session;

#[cfg(test)]
mod tests;
