//! The page hosting the editor.
//!
//! The controller never looks up page elements itself. Everything it needs
//! from the page (selected language, imported file, default templates and
//! the notification toast) comes through [`HostPage`].

use std::collections::HashMap;

use crate::context::FileDescriptor;

/// A message for the page's notification toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Capabilities the controller uses from the host page.
pub trait HostPage {
    /// Currently selected language.
    fn active_language(&self) -> String;

    /// Select `language` and propagate it to everything that depends on the
    /// selection (syntax mode and the like), as a user selection would.
    fn set_active_language(&mut self, language: &str);

    /// Template shown when nothing is saved for `language`.
    fn default_content(&self, language: &str) -> String;

    /// Fire-and-forget notification.
    fn notify(&mut self, notification: Notification);

    /// File the buffer was imported from, if any.
    fn current_file(&self) -> Option<FileDescriptor>;
}

/// In-memory host used by tests and headless embedders.
///
/// Keeps the selected language, per-language templates, the imported file
/// and every notification it has been sent.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    language: String,
    templates: HashMap<String, String>,
    current_file: Option<FileDescriptor>,
    notifications: Vec<Notification>,
    language_changes: usize,
}

impl PageState {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Register the default template for a language.
    pub fn with_template(mut self, language: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(language.into(), template.into());
        self
    }

    /// User picks a language in the selector.
    pub fn select_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_current_file(&mut self, file: Option<FileDescriptor>) {
        self.current_file = file;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// How many times the language was changed programmatically.
    pub fn language_changes(&self) -> usize {
        self.language_changes
    }
}

impl HostPage for PageState {
    fn active_language(&self) -> String {
        self.language.clone()
    }

    fn set_active_language(&mut self, language: &str) {
        log::debug!("Host: active language {} -> {}", self.language, language);
        self.language = language.to_string();
        self.language_changes += 1;
    }

    fn default_content(&self, language: &str) -> String {
        self.templates.get(language).cloned().unwrap_or_default()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn current_file(&self) -> Option<FileDescriptor> {
        self.current_file.clone()
    }
}
