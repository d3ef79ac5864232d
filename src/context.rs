//! Context keys: which record the editor buffer belongs to.
//!
//! The key is derived from the active editing context by a configured
//! [`KeyStrategy`]. Records are stored and looked up by this key only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::keys::{FILE_PREFIX, LANGUAGE_PREFIX};

/// String identifying what is being edited right now.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextKey(String);

impl ContextKey {
    /// Key for content edited under a selected language.
    pub fn for_language(language: &str) -> Self {
        Self(format!("{}{}", LANGUAGE_PREFIX, language))
    }

    /// Key for content imported from a file path.
    ///
    /// The path is percent-encoded so a path can never be mistaken for a
    /// language key.
    pub fn for_file(path: &str) -> Self {
        Self(format!("{}{}", FILE_PREFIX, urlencoding::encode(path)))
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Descriptor of a file imported into the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Origin path of the file
    pub path: String,
}

impl FileDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// How a [`ContextKey`] is derived from the active context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// One record per selected language
    #[default]
    Language,
    /// One record per imported file, falling back to the language key when
    /// no file is open
    File,
}

impl KeyStrategy {
    /// Derive the key for the given active language and current file.
    pub fn derive(self, language: &str, file: Option<&FileDescriptor>) -> ContextKey {
        match (self, file) {
            (KeyStrategy::File, Some(file)) if !file.path.is_empty() => {
                ContextKey::for_file(&file.path)
            }
            _ => ContextKey::for_language(language),
        }
    }

    /// Get the display name for this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            KeyStrategy::Language => "Language",
            KeyStrategy::File => "File",
        }
    }
}
