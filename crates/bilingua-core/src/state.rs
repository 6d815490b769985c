use std::fs;
use std::path::Path;

use crate::annotate::HintStyle;
use crate::dictionary::Dictionary;
use crate::document::{self, DocumentError, DocumentStats};

/// Everything one run works on: the live dictionary, the optional
/// new-words dictionary and the hint style
#[derive(Debug, Default)]
pub struct Session {
    pub live: Dictionary,
    pub discovery: Option<Dictionary>,
    pub style: HintStyle,
}

impl Session {
    pub fn new(live: Dictionary, style: HintStyle, collect_new_words: bool) -> Self {
        Self {
            live,
            discovery: collect_new_words.then(Dictionary::new),
            style,
        }
    }

    /// Annotate a document held in memory
    pub fn annotate(&mut self, xml: &str) -> Result<(String, DocumentStats), DocumentError> {
        document::annotate_document(xml, &self.live, self.discovery.as_mut(), self.style)
    }

    /// Annotate the document at `path` and overwrite it.
    ///
    /// The file is only written once the whole document was processed.
    pub fn annotate_file(&mut self, path: &Path) -> Result<DocumentStats, DocumentError> {
        tracing::info!("Injecting translation into {}", path.display());
        let xml = fs::read_to_string(path)?;
        let (annotated, stats) = self.annotate(&xml)?;
        fs::write(path, annotated)?;
        tracing::info!("Translation injected");
        Ok(stats)
    }
}
