use std::io::Write;

use anyhow::Context;
use bilingua_config::Config;
use bilingua_config::paths::PathsConfig;
use bilingua_core::prune::{DictionarySink, FileSink, PruneSummary, Pruner};
use bilingua_core::{Dictionary, DocumentStats, HintStyle, Session};
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::archive::{self, Archiver};
use crate::console::Console;
use crate::{game, io};

/// Drives one run: load, annotate, save new words, then prune while the
/// game is running
pub struct AppController {
    config: Config,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn run<A>(&self, archiver: A, collect_new_words: bool) -> anyhow::Result<()>
    where
        A: Archiver + Send + 'static,
    {
        let Some(mut session) = self.load_session(collect_new_words)? else {
            return Ok(());
        };

        // Archive tool and document rewrite block; keep them off the runtime
        let paths = self.config.paths.clone();
        let compression = self.config.archive.compression.clone();
        session = tokio::task::spawn_blocking(move || -> anyhow::Result<Session> {
            translate(&paths, &compression, &archiver, &mut session)?;
            Ok(session)
        })
        .await??;

        self.save_new_words(&session)?;

        if self.config.game.launch {
            self.prune(&mut session.live).await?;
        } else {
            tracing::info!("Game launch disabled, done");
        }

        Ok(())
    }

    /// `None` when the dictionary holds no words; nothing should be touched
    /// then
    pub fn load_session(&self, collect_new_words: bool) -> anyhow::Result<Option<Session>> {
        let path = self.config.paths.dictionary();
        let live = Dictionary::load(&path)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?;

        if live.is_empty() {
            tracing::warn!("Dictionary {} is empty, nothing to do", path.display());
            return Ok(None);
        }

        let style = HintStyle::from_name(&self.config.annotation.style);
        if style == HintStyle::Disabled {
            tracing::warn!(
                "Unknown hint style '{}', text will not be annotated",
                self.config.annotation.style
            );
        }

        Ok(Some(Session::new(live, style, collect_new_words)))
    }

    pub fn save_new_words(&self, session: &Session) -> anyhow::Result<()> {
        let Some(discovery) = &session.discovery else {
            return Ok(());
        };

        let path = self.config.paths.new_dictionary();
        discovery
            .save_grouped(&path)
            .with_context(|| format!("failed to save new words to {}", path.display()))
    }

    /// Launch the game and prune `live` until it exits
    pub async fn prune(&self, live: &mut Dictionary) -> anyhow::Result<PruneSummary> {
        let child = game::launch(&self.config.paths.game_exe())?;
        let mut console = Console::new();
        console.banner()?;

        let watcher = game::watch_exit(child, self.cancel_token.clone());
        let input = io::spawn_stdin_reader().context("failed to read operator input")?;

        let mut pruner = Pruner::new(live, FileSink::new(self.config.paths.dictionary()));
        let result =
            prune_until_exit(&mut pruner, input, self.cancel_token.clone(), &mut console).await;

        if let Err(e) = watcher.await {
            tracing::error!("Exit watcher panicked: {}", e);
        }

        result
    }
}

/// Run `pruner` until `cancel` fires, echoing every line.
///
/// The summary is printed even when the last save failed; the failure is
/// returned afterwards.
pub async fn prune_until_exit<S, W>(
    pruner: &mut Pruner<'_, S>,
    input: AsyncReceiver<String>,
    cancel: CancellationToken,
    console: &mut Console<W>,
) -> anyhow::Result<PruneSummary>
where
    S: DictionarySink,
    W: Write,
{
    let result = pruner
        .run(input, cancel, |report| {
            if let Err(e) = console.echo(report) {
                tracing::warn!("Failed to echo input: {}", e);
            }
        })
        .await;

    console.summary(&pruner.summary())?;
    result.context("failed to save the pruned dictionary")
}

/// Unpack the archive, annotate its document and pack it back
pub fn translate<A: Archiver + ?Sized>(
    paths: &PathsConfig,
    compression: &str,
    archiver: &A,
    session: &mut Session,
) -> anyhow::Result<DocumentStats> {
    let archive_path = paths.archive();
    let origin = paths.origin_archive();
    let package_dir = paths.package_dir();

    archive::ensure_origin(&archive_path, &origin)?;
    archive::reset_dir(&package_dir)?;
    archiver
        .unpack(&origin, &package_dir)
        .with_context(|| format!("failed to unpack {}", origin.display()))?;

    let document = paths.document();
    let stats = session
        .annotate_file(&document)
        .with_context(|| format!("failed to annotate {}", document.display()))?;

    archiver
        .pack(&package_dir, &archive_path, compression)
        .with_context(|| format!("failed to pack {}", archive_path.display()))?;
    archive::remove_dir(&package_dir)?;

    Ok(stats)
}
