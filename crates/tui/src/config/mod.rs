use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed server address, used only when the persistent credential tier
    /// has no `server` key yet (first run). Never overrides a stored value.
    pub server: Option<String>,
    pub credentials_path: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: None,
            credentials_path: "config/credentials.json".to_string(),
            log_file: "config/tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "libdrive_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override server seed address (e.g. http://127.0.0.1:9090).
    #[arg(long)]
    server: Option<String>,
    /// Override path of the persistent credential file.
    #[arg(long)]
    credentials_path: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("LIBDRIVE_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(server) = args.server {
        settings.server = Some(server);
    }
    if let Some(credentials_path) = args.credentials_path {
        settings.credentials_path = credentials_path;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
