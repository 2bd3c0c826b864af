use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{load, session_for};
use crate::config::ClientConfig;
use crate::sync::LoadOutcome;

pub async fn run(password: Option<String>, server: Option<String>) -> Result<()> {
    let mut config = ClientConfig::load()?;
    if let Some(server) = server {
        config.server_url = server;
        config.save()?;
    }

    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    let mut session = session_for(&config)?;
    if !session.unlock(&password)? {
        anyhow::bail!("Password cannot be empty");
    }

    match load(&mut session).await {
        LoadOutcome::Loaded { days } => {
            println!("{} {} day(s) with events.", "Unlocked.".green(), days);
            Ok(())
        }
        LoadOutcome::AuthorizationRequired => {
            anyhow::bail!("Wrong password, try again")
        }
        LoadOutcome::Failed | LoadOutcome::Locked => {
            println!(
                "{}",
                format!("Password saved, but {} could not be reached.", config.server_url).yellow()
            );
            Ok(())
        }
    }
}
