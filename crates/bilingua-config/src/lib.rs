use std::env;

use serde::{Deserialize, Serialize};

use self::annotation::AnnotationConfig;
use self::archive::ArchiveConfig;
use self::game::GameConfig;
use self::paths::PathsConfig;

pub mod annotation;
pub mod archive;
pub mod game;
pub mod paths;

/// Name of the optional JSON profile looked up in the application directory
pub const PROFILE_FILE: &str = "bilingua.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub annotation: AnnotationConfig,
    pub archive: ArchiveConfig,
    pub game: GameConfig,
}

impl Config {
    pub fn new() -> Self {
        let mut paths = PathsConfig::default();
        if let Ok(dir) = env::var("BILINGUA_APP_DIR") {
            paths.app_dir = dir.into();
        }

        let mut annotation = AnnotationConfig::default();
        if let Ok(style) = env::var("BILINGUA_STYLE") {
            annotation.style = style;
        }

        let mut archive = ArchiveConfig::default();
        if let Ok(tool) = env::var("BILINGUA_ARCHIVE_TOOL") {
            archive.tool = tool;
        }

        let mut game = GameConfig::default();
        if let Some(launch) = env::var("BILINGUA_LAUNCH_GAME")
            .ok()
            .and_then(|v| parse_flag(&v))
        {
            game.launch = launch;
        }

        Config {
            paths,
            annotation,
            archive,
            game,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
