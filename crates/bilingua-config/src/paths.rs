use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_app_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_package_dir() -> String {
    "Package".to_string()
}

fn default_archive() -> String {
    "English.pak".to_string()
}

fn default_document() -> String {
    "Localization/English/english.xml".to_string()
}

fn default_game_exe() -> String {
    "../../bin/EoCApp.exe".to_string()
}

fn default_dictionary() -> String {
    "Dictionary/en-ru.dic".to_string()
}

fn default_new_dictionary() -> String {
    "Dictionary/_en-ru.dic".to_string()
}

/// File layout relative to the game's localization directory
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PathsConfig {
    /// Localization directory the tool runs from
    #[serde(default = "default_app_dir")]
    pub app_dir: PathBuf,
    /// Scratch directory the archive is unpacked into, relative to `app_dir`
    #[serde(default = "default_package_dir")]
    pub package_dir: String,
    /// Localization archive, relative to `app_dir`
    #[serde(default = "default_archive")]
    pub archive: String,
    /// Localization document, relative to the package directory
    #[serde(default = "default_document")]
    pub document: String,
    #[serde(default = "default_game_exe")]
    pub game_exe: String,
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
    #[serde(default = "default_new_dictionary")]
    pub new_dictionary: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            package_dir: default_package_dir(),
            archive: default_archive(),
            document: default_document(),
            game_exe: default_game_exe(),
            dictionary: default_dictionary(),
            new_dictionary: default_new_dictionary(),
        }
    }
}

impl PathsConfig {
    pub fn package_dir(&self) -> PathBuf {
        self.app_dir.join(&self.package_dir)
    }

    pub fn archive(&self) -> PathBuf {
        self.app_dir.join(&self.archive)
    }

    /// Pristine copy of the archive every run unpacks from
    pub fn origin_archive(&self) -> PathBuf {
        let name = match self.archive.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}_origin.{ext}"),
            None => format!("{}_origin", self.archive),
        };
        self.app_dir.join(name)
    }

    pub fn document(&self) -> PathBuf {
        self.package_dir().join(&self.document)
    }

    pub fn game_exe(&self) -> PathBuf {
        self.app_dir.join(&self.game_exe)
    }

    pub fn dictionary(&self) -> PathBuf {
        self.app_dir.join(&self.dictionary)
    }

    pub fn new_dictionary(&self) -> PathBuf {
        self.app_dir.join(&self.new_dictionary)
    }
}
