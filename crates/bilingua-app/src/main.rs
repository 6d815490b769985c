use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod archive;
pub mod console;
pub mod controller;
pub mod game;
pub mod io;
pub mod profile;

#[cfg(test)]
mod tests;

use self::archive::DivineTool;
use self::controller::AppController;

#[derive(Parser)]
#[command(name = "bilingua", version, about = "Bilingual word hints for game localization")]
struct Cli {
    /// Collect every matched word into the new-words dictionary
    #[arg(short = 'n', long = "new-dictionary", visible_alias = "nd")]
    new_dictionary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = profile::load_config()?;
    let archiver = DivineTool::new(&config.archive);

    let controller = AppController::new(config);
    if let Err(e) = controller.run(archiver, cli.new_dictionary).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Logs go to stderr; stdout belongs to the operator prompt
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
