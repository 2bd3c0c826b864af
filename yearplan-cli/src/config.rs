//! Client configuration at ~/.config/yearplan/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use yearplan_core::Year;
use yearplan_core::year::DEFAULT_YEAR;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

/// Values can be overridden with `YEARPLAN_SERVER_URL` and `YEARPLAN_YEAR`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the yearplan server; events live at `<server_url>/events`
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_year")]
    pub year: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: default_server_url(),
            year: default_year(),
        }
    }
}

impl ClientConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("yearplan");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("YEARPLAN"))
            .build()
            .context("Could not read config")?
            .try_deserialize()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).context("Could not write config file")?;
        Ok(())
    }

    pub fn year(&self) -> Result<Year> {
        Ok(Year::new(self.year)?)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# yearplan configuration

# Where the yearplan server runs:
# server_url = \"{DEFAULT_SERVER_URL}\"

# Year shown on the heatmap:
# year = {DEFAULT_YEAR}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }
        std::fs::write(path, contents).context("Could not write config file")?;
        Ok(())
    }
}
