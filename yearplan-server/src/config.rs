//! Server configuration from command-line arguments and the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use yearplan_core::year::DEFAULT_YEAR;

static DEFAULT_BIND: &str = "127.0.0.1:4096";
static DEFAULT_DATA_DIR: &str = "~/.local/share/yearplan";

#[derive(Parser, Debug, Clone)]
#[command(name = "yearplan-server")]
#[command(about = "Store a year of yearplan events behind a shared password")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "YEARPLAN_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory holding the events file
    #[arg(long, env = "YEARPLAN_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Year whose events are stored
    #[arg(long, env = "YEARPLAN_YEAR", default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Shared password. Unset or empty accepts every request.
    #[arg(long, env = "APP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ServerConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).into_owned())
    }

    /// Name of the hash holding every day's events.
    pub fn store_key(&self) -> String {
        format!("year_{}_events", self.year)
    }

    pub fn store_file(&self) -> PathBuf {
        self.data_path().join(format!("{}.json", self.store_key()))
    }

    pub fn secret(&self) -> Option<String> {
        self.password.clone().filter(|p| !p.is_empty())
    }
}
