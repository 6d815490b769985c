use std::path::Path;

use anyhow::Context;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Start the game from its own directory
pub fn launch(exe: &Path) -> anyhow::Result<Child> {
    let mut command = Command::new(exe);
    if let Some(dir) = exe.parent().filter(|d| d.is_dir()) {
        command.current_dir(dir);
    }

    let child = command
        .spawn()
        .with_context(|| format!("failed to launch {}", exe.display()))?;
    tracing::info!("Game launched: {}", exe.display());

    Ok(child)
}

/// Cancel `cancel` once `child` exits
pub fn watch_exit(mut child: Child, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            status = child.wait() => match status {
                Ok(status) => tracing::info!("Game exited: {}", status),
                Err(e) => tracing::error!("Lost track of the game process: {}", e),
            },
            _ = cancel.cancelled() => {
                tracing::debug!("Exit watcher stopping");
            }
        }
        cancel.cancel();
    })
}
