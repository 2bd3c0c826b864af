//! Single-key hash store: one named hash whose fields are date keys and whose
//! values are JSON-encoded event lists.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::debug;

pub struct HashStore {
    key: String,
    path: Option<PathBuf>,
    fields: RwLock<BTreeMap<String, String>>,
}

impl HashStore {
    /// Load the hash from `path`, starting empty when the file doesn't exist yet.
    pub fn open(path: &Path, key: &str) -> Result<Self> {
        let fields = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Corrupt events file {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(HashStore {
            key: key.to_string(),
            path: Some(path.to_path_buf()),
            fields: RwLock::new(fields),
        })
    }

    /// A store that never touches disk.
    pub fn in_memory(key: &str) -> Self {
        HashStore {
            key: key.to_string(),
            path: None,
            fields: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn get_all(&self) -> BTreeMap<String, String> {
        self.fields.read().await.clone()
    }

    /// Set one field. Memory only changes if the file write succeeds.
    pub async fn set(&self, field: &str, value: String) -> Result<()> {
        let mut fields = self.fields.write().await;
        let previous = fields.insert(field.to_string(), value);

        if let Err(e) = self.flush(&fields).await {
            match previous {
                Some(old) => fields.insert(field.to_string(), old),
                None => fields.remove(field),
            };
            return Err(e);
        }

        debug!(key = %self.key, field, "stored field");
        Ok(())
    }

    async fn flush(&self, fields: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(fields)?;
        let temp = path.with_extension("json.tmp");

        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fields_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("year_2026_events.json");

        let store = HashStore::open(&path, "year_2026_events").unwrap();
        store.set("2026-01-01", "[]".to_string()).await.unwrap();
        store.set("2026-01-02", "[{\"id\":1}]".to_string()).await.unwrap();
        store.set("2026-01-01", "[{\"id\":2}]".to_string()).await.unwrap();

        let reopened = HashStore::open(&path, "year_2026_events").unwrap();
        assert_eq!(reopened.key(), "year_2026_events");
        let fields = reopened.get_all().await;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["2026-01-01"], "[{\"id\":2}]");
        assert!(!dir.path().join("year_2026_events.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("events.json");

        let store = HashStore::open(&path, "k").unwrap();
        assert!(store.set("2026-01-01", "[]".to_string()).await.is_err());
        assert!(store.get_all().await.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(HashStore::open(&path, "k").is_err());
    }
}
