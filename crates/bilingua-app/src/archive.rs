//! Unpacking and repacking the localization archive.
//!
//! The archive format itself is handled by an external tool; this module
//! only drives it and manages the scratch directory around it.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, bail};
use bilingua_config::archive::ArchiveConfig;

pub trait Archiver {
    fn unpack(&self, archive: &Path, output_dir: &Path) -> anyhow::Result<()>;

    fn pack(&self, source_dir: &Path, archive: &Path, compression: &str) -> anyhow::Result<()>;
}

/// LSLib's `divine` command line tool
pub struct DivineTool {
    program: String,
    game: String,
}

impl DivineTool {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            program: config.tool.clone(),
            game: config.game.clone(),
        }
    }

    fn run(
        &self,
        action: &str,
        source: &Path,
        destination: &Path,
        extra: &[&str],
    ) -> anyhow::Result<()> {
        tracing::debug!(
            "{} --action {} {} -> {}",
            self.program,
            action,
            source.display(),
            destination.display()
        );

        let status = Command::new(&self.program)
            .arg("--game")
            .arg(&self.game)
            .arg("--action")
            .arg(action)
            .arg("--source")
            .arg(source)
            .arg("--destination")
            .arg(destination)
            .args(extra)
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !status.success() {
            bail!("{} {} failed: {}", self.program, action, status);
        }

        Ok(())
    }
}

impl Archiver for DivineTool {
    fn unpack(&self, archive: &Path, output_dir: &Path) -> anyhow::Result<()> {
        self.run("extract-package", archive, output_dir, &[])
    }

    fn pack(&self, source_dir: &Path, archive: &Path, compression: &str) -> anyhow::Result<()> {
        self.run(
            "create-package",
            source_dir,
            archive,
            &["--compression-method", compression],
        )
    }
}

/// Copy the pristine archive to `origin` unless a copy already exists.
///
/// Every run unpacks from the copy, so hints never pile up across runs.
pub fn ensure_origin(archive: &Path, origin: &Path) -> anyhow::Result<()> {
    if origin.exists() {
        return Ok(());
    }

    fs::copy(archive, origin).with_context(|| {
        format!(
            "failed to back up {} to {}",
            archive.display(),
            origin.display()
        )
    })?;
    tracing::info!("Original archive saved as {}", origin.display());

    Ok(())
}

/// Empty scratch directory at `dir`
pub fn reset_dir(dir: &Path) -> anyhow::Result<()> {
    remove_dir(dir)?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

pub fn remove_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("failed to remove {}", dir.display()))?;
    }
    Ok(())
}
