use serde::{Deserialize, Serialize};

fn default_tool() -> String {
    "divine".to_string()
}

fn default_game() -> String {
    "dos2de".to_string()
}

fn default_compression() -> String {
    "lz4".to_string()
}

/// External archive tool used to unpack/pack the localization package
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ArchiveConfig {
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Game identifier passed to the tool
    #[serde(default = "default_game")]
    pub game: String,
    #[serde(default = "default_compression")]
    pub compression: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            game: default_game(),
            compression: default_compression(),
        }
    }
}
