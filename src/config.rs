//! Application configuration.
//!
//! A single config file at `~/.config/eventdesk/config.toml`, created with
//! commented defaults on first run. Auth stays external: the `user` key only
//! names the uid the identity provider issued.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;

static DEFAULT_CONFIG: &str = "\
# eventdesk configuration

# Where the document store keeps its collections.
data_dir = \"~/.local/share/eventdesk\"

# Uid of the signed-in user, as issued by the identity provider.
# Leave unset to run signed out.
# user = \"your-uid\"
";

fn default_data_dir() -> PathBuf {
    PathBuf::from("~/.local/share/eventdesk")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    pub user: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        let config: AppConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }
}
