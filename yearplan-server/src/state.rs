use std::sync::Arc;

use crate::storage::HashStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<HashStore>,
    /// Password every request must present. `None` accepts everyone.
    pub secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: HashStore, secret: Option<String>) -> Self {
        AppState {
            store: Arc::new(store),
            secret: secret.map(Arc::from),
        }
    }
}
