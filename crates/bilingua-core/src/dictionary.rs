use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Translation placeholder for words nobody translated yet
pub const NULL_TRANSLATION: &str = "`NULL`";

/// Single dictionary record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Lowercase source-language word
    pub key: String,
    pub translation: String,
    /// How often the word was seen in game text
    pub occurrence_count: u32,
}

impl WordEntry {
    /// Fresh entry with no translation, seen once
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            translation: NULL_TRANSLATION.to_string(),
            occurrence_count: 1,
        }
    }

    pub fn with_translation(
        key: impl Into<String>,
        translation: impl Into<String>,
        occurrence_count: u32,
    ) -> Self {
        Self {
            key: key.into(),
            translation: translation.into(),
            occurrence_count,
        }
    }

    /// Translation as shown in hints, without the surrounding backticks
    pub fn display_translation(&self) -> &str {
        self.translation.trim_matches('`')
    }

    fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let key = fields.next().filter(|k| !k.is_empty())?;
        let translation = fields.next()?;
        let occurrence_count = fields
            .next()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(1);

        Some(Self::with_translation(key, translation, occurrence_count))
    }

    fn write_line(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}",
            self.key, self.translation, self.occurrence_count
        )
    }
}

/// Word table keyed by the normalized word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, WordEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tab-delimited `key\ttranslation\tcount` table.
    ///
    /// Malformed lines are skipped and the first occurrence of a key wins.
    /// An empty result is not an error here; callers decide what it means.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        if !path.exists() {
            return Err(DictionaryError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading dictionary from {}", path.display());
        let content = fs::read_to_string(path)?;
        let dictionary = Self::parse(&content);
        tracing::info!("Loaded {} dictionary entries", dictionary.len());

        Ok(dictionary)
    }

    /// Parse table contents, see [`Dictionary::load`]. A leading byte order
    /// mark is ignored.
    pub fn parse(content: &str) -> Self {
        let mut dictionary = Self::new();
        let mut skipped = 0usize;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for line in content.lines() {
            match WordEntry::parse_line(line) {
                Some(entry) => {
                    dictionary.entries.entry(entry.key.clone()).or_insert(entry);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} malformed dictionary lines", skipped);
        }

        dictionary
    }

    /// Rewrite `path` with every entry in iteration order
    pub fn save(&self, path: &Path) -> Result<(), DictionaryError> {
        write_entries(path, self.entries.values())?;
        tracing::debug!("Saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Rewrite `path` grouped by first character, most frequent words first
    /// inside each group
    pub fn save_grouped(&self, path: &Path) -> Result<(), DictionaryError> {
        write_entries(path, self.grouped())?;
        tracing::info!("Saved {} new words to {}", self.len(), path.display());
        Ok(())
    }

    /// Entries in grouped save order
    pub fn grouped(&self) -> Vec<&WordEntry> {
        let mut groups: BTreeMap<char, Vec<&WordEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            if let Some(first) = entry.key.chars().next() {
                groups.entry(first).or_default().push(entry);
            }
        }

        groups
            .into_values()
            .flat_map(|mut group| {
                group.sort_by(|a, b| {
                    b.occurrence_count
                        .cmp(&a.occurrence_count)
                        .then_with(|| a.key.cmp(&b.key))
                });
                group
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&WordEntry> {
        self.entries.get(key)
    }

    /// Stored key for `word`, borrowed from the dictionary
    pub fn key_of(&self, word: &str) -> Option<&str> {
        self.entries.get_key_value(word).map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert unless the key is already present; returns whether it was added
    pub fn insert(&mut self, entry: WordEntry) -> bool {
        if self.entries.contains_key(&entry.key) {
            return false;
        }
        self.entries.insert(entry.key.clone(), entry);
        true
    }

    /// Count another sighting of `key`, adding it with count 1 when new
    pub fn observe(&mut self, key: &str) {
        match self.entries.get_mut(key) {
            Some(entry) => entry.occurrence_count = entry.occurrence_count.saturating_add(1),
            None => {
                self.entries.insert(key.to_string(), WordEntry::new(key));
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<WordEntry> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.values()
    }
}

impl FromIterator<WordEntry> for Dictionary {
    fn from_iter<I: IntoIterator<Item = WordEntry>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for entry in iter {
            dictionary.insert(entry);
        }
        dictionary
    }
}

fn write_entries<'a>(
    path: &Path,
    entries: impl IntoIterator<Item = &'a WordEntry>,
) -> Result<(), DictionaryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    for entry in entries {
        entry.write_line(&mut out)?;
    }
    out.flush()?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Dictionary not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
