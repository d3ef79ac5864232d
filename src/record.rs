//! The persisted unit of editor content.

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::context::ContextKey;

/// Editor content plus metadata stored under one context key.
///
/// Serialized with camelCase field names so records written by the browser
/// build and the native build share one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    /// Context key, unique per record
    pub id: ContextKey,
    /// Language selected when the content was saved
    pub language: String,
    /// Origin path of an imported file, if any
    #[serde(default)]
    pub file_path: Option<String>,
    /// Full text buffer
    pub content: String,
    /// Milliseconds since the Unix epoch of the last write
    pub updated_at: u64,
}

impl SavedRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn new(
        id: ContextKey,
        language: impl Into<String>,
        file_path: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            language: language.into(),
            file_path,
            content: content.into(),
            updated_at: unix_millis(),
        }
    }

    /// Whether the record holds anything worth restoring.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

fn unix_millis() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as u64,
        Err(e) => {
            log::warn!("System clock is before the Unix epoch: {}", e);
            0
        }
    }
}
