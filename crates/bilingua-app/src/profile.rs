use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use bilingua_config::{Config, PROFILE_FILE};
use serde_json::Value;

/// Load `bilingua.json` from the application directory on top of the
/// environment settings
pub fn load_config() -> anyhow::Result<Config> {
    apply_profile(Config::new())
}

/// Values present in the profile replace those of `base`; everything else,
/// environment overrides included, is kept
pub fn apply_profile(base: Config) -> anyhow::Result<Config> {
    let profile_file = base.paths.app_dir.join(PROFILE_FILE);

    if !profile_file.exists() {
        tracing::debug!("No profile at {}, using defaults", profile_file.display());
        return Ok(base);
    }

    tracing::info!("Loading profile {}", profile_file.display());
    let file = File::open(&profile_file)
        .with_context(|| format!("failed to open {}", profile_file.display()))?;
    let profile: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", profile_file.display()))?;

    let mut merged = serde_json::to_value(&base)?;
    merge(&mut merged, profile);

    serde_json::from_value(merged)
        .with_context(|| format!("invalid settings in {}", profile_file.display()))
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
