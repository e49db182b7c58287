/// Storage serialization utilities for chrome.storage.local

use crate::environment::Environment;
use serde::{Deserialize, Serialize};

/// The popup inputs mirrored to storage, restored verbatim on reopen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub url: String,
    pub ticket_id: String,
    pub env: String,
}

impl PersistedState {
    pub fn new(url: &str, ticket_id: &str, env: Option<Environment>) -> Self {
        PersistedState {
            url: url.to_string(),
            ticket_id: ticket_id.to_string(),
            env: env.map(|e| e.as_str()).unwrap_or_default().to_string(),
        }
    }

    pub fn environment(&self) -> Option<Environment> {
        Environment::from_selection(&self.env)
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.ticket_id.is_empty() && self.env.is_empty()
    }
}
