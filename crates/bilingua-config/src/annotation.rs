use serde::{Deserialize, Serialize};

fn default_style() -> String {
    "colors".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Hint style: `colors` or `stars`; anything else disables hints
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
        }
    }
}
