pub mod add;
pub mod control;
pub mod glyph;
pub mod heatmap;
pub mod login;
pub mod logout;
pub mod shell;
pub mod show;

use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::DateKey;

use crate::client::RemoteClient;
use crate::config::ClientConfig;
use crate::session::Session;
use crate::sync::{LoadOutcome, SyncClient};
use crate::token::TokenStore;
use crate::utils::tui::create_spinner;

/// Build a session from the user's config and saved password.
pub fn new_session() -> Result<Session> {
    let config = ClientConfig::load()?;
    session_for(&config)
}

pub fn session_for(config: &ClientConfig) -> Result<Session> {
    let remote = RemoteClient::new(&config.server_url)?;
    let tokens = TokenStore::in_dir(&ClientConfig::config_dir()?);
    Ok(Session::new(config.year()?, SyncClient::new(remote, tokens)))
}

/// Load with a spinner.
pub async fn load(session: &mut Session) -> LoadOutcome {
    let spinner = create_spinner("Loading events".to_string());
    let outcome = session.load().await;
    spinner.finish_and_clear();
    outcome
}

/// Open a session for a one-shot command.
///
/// A fresh process has no local state of its own, so edits are refused unless
/// the server's copy was actually loaded; saving a day built from nothing
/// would overwrite it.
pub async fn connect(for_writing: bool) -> Result<Session> {
    let mut session = new_session()?;

    match load(&mut session).await {
        LoadOutcome::Loaded { .. } => Ok(session),
        LoadOutcome::Locked => anyhow::bail!(
            "Locked.\n\n\
            Enter your password with:\n  \
            yearplan login"
        ),
        LoadOutcome::AuthorizationRequired => anyhow::bail!(
            "Wrong password, try again with:\n  \
            yearplan login"
        ),
        LoadOutcome::Failed if for_writing => {
            anyhow::bail!("Could not load events from the server, nothing was changed")
        }
        LoadOutcome::Failed => {
            eprintln!("{}", "Could not reach the server, showing an empty year".yellow());
            Ok(session)
        }
    }
}

/// Parse `YYYY-MM-DD` or `today`.
pub fn parse_date(s: &str) -> Result<DateKey, String> {
    match s.trim() {
        "today" => Ok(DateKey::today()),
        other => DateKey::parse(other).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_today() {
        assert_eq!(parse_date("today"), Ok(DateKey::today()));
        assert_eq!(parse_date("2026-03-02").unwrap().to_string(), "2026-03-02");
        assert!(parse_date("yesterday").is_err());
    }
}
