//! Keeps the server in step with local edits.
//!
//! Loads replace the local store wholesale. Writes send one day at a time as
//! detached tasks: the edit is already applied locally, a failed write is only
//! logged, and nothing is retried. Two quick edits of the same day race, and
//! whichever write lands last wins.

use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use yearplan_core::protocol::PersistRequest;
use yearplan_core::{DateKey, Event, EventStore};

use crate::client::{RemoteClient, RemoteError};
use crate::token::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store now holds the server's snapshot.
    Loaded { days: usize },
    /// No password saved; nothing was fetched.
    Locked,
    /// The server rejected the password, which has been forgotten.
    AuthorizationRequired,
    /// The server couldn't be reached or answered nonsense; local state kept.
    Failed,
}

pub struct SyncClient {
    remote: RemoteClient,
    tokens: TokenStore,
    token: Option<String>,
    writes: TaskTracker,
}

impl SyncClient {
    pub fn new(remote: RemoteClient, tokens: TokenStore) -> Self {
        let token = tokens.load();
        SyncClient {
            remote,
            tokens,
            token,
            writes: TaskTracker::new(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.token.is_none()
    }

    /// Save a new password. Returns false (and changes nothing) when it is blank.
    pub fn unlock(&mut self, token: &str) -> anyhow::Result<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }

        self.tokens.save(token)?;
        self.token = Some(token.to_string());
        Ok(true)
    }

    /// Forget the password, locally and on disk.
    pub fn lock(&mut self) -> anyhow::Result<()> {
        self.token = None;
        self.tokens.clear()
    }

    /// Fetch every day from the server into `store`.
    pub async fn load_snapshot(&mut self, store: &mut EventStore) -> LoadOutcome {
        let Some(token) = self.token.clone() else {
            return LoadOutcome::Locked;
        };

        match self.remote.fetch_snapshot(&token).await {
            Ok(body) => match store.replace_all_from_json(body) {
                Ok(()) => {
                    let days = store.dates().count();
                    info!(days, "loaded events");
                    LoadOutcome::Loaded { days }
                }
                Err(e) => {
                    warn!(error = %e, "ignoring unusable events snapshot");
                    LoadOutcome::Failed
                }
            },
            Err(RemoteError::Unauthorized) => {
                warn!("server rejected the saved password");
                self.token = None;
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "could not remove rejected password");
                }
                LoadOutcome::AuthorizationRequired
            }
            Err(e) => {
                warn!(error = %e, "failed to load events");
                LoadOutcome::Failed
            }
        }
    }

    /// Send one day's events to the server without waiting for the result.
    pub fn persist_date(&self, date: DateKey, events: Vec<Event>) {
        let Some(token) = self.token.clone() else {
            warn!(%date, "locked, not saving");
            return;
        };

        let remote = self.remote.clone();
        let request = PersistRequest { date, events };

        self.writes.spawn(async move {
            match remote.persist(&token, &request).await {
                Ok(()) => debug!(date = %request.date, "saved"),
                Err(e) => warn!(date = %request.date, error = %e, "save failed"),
            }
        });
    }

    /// Wait for writes already in flight. Used before the process exits.
    pub async fn drain(&self) {
        self.writes.close();
        self.writes.wait().await;
        self.writes.reopen();
    }
}
