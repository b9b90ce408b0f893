mod app;
mod client;
mod config;
mod error;
mod local_state;
mod mappers;
mod upload;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let config = config::load()?;
    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// File logging, opt-in via `TALLY_TUI_LOG=<path>` so nothing writes to the
/// alternate screen. `RUST_LOG` controls the filter as usual.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TALLY_TUI_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_tui=debug,engine=debug".into()),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}
