mod app;
mod client;
mod config;
mod credentials;
mod error;
mod login;
mod session;
mod ui;

use std::sync::Arc;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;
    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// The terminal is owned by the TUI, so logs go to a file.
fn init_logging(config: &config::AppConfig) -> Result<()> {
    if let Some(parent) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("libdrive_tui={}", config.log_level))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
