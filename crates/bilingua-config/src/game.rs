use serde::{Deserialize, Serialize};

fn default_launch() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GameConfig {
    /// Launch the game and start pruning once the text is annotated
    #[serde(default = "default_launch")]
    pub launch: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            launch: default_launch(),
        }
    }
}
