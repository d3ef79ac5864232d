//! Keyboard shortcut for saving.
//!
//! The shortcut is a key plus modifiers. `Meta` is accepted wherever `Ctrl`
//! is required so the same binding works on macOS.

use serde::{Deserialize, Serialize};

/// A key press as reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// Key value, e.g. `"s"` or `"S"`
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Key chord that triggers an explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveShortcut {
    /// Key, compared case-insensitively
    pub key: String,
    /// Require Ctrl (or Meta)
    #[serde(default = "default_true")]
    pub ctrl_or_meta: bool,
    /// Require Shift
    #[serde(default = "default_true")]
    pub shift: bool,
    /// Require Alt. When unset, Alt is ignored rather than forbidden
    #[serde(default)]
    pub alt: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SaveShortcut {
    fn default() -> Self {
        // Ctrl+Shift+S
        Self {
            key: "s".to_string(),
            ctrl_or_meta: true,
            shift: true,
            alt: false,
        }
    }
}

impl SaveShortcut {
    /// Whether `press` triggers this shortcut.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key.eq_ignore_ascii_case(&self.key)
            && (press.ctrl || press.meta) == self.ctrl_or_meta
            && press.shift == self.shift
            && (press.alt || !self.alt)
    }

    /// Human-readable form, e.g. `Ctrl+Shift+S`.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl_or_meta {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.to_uppercase());
        parts.join("+")
    }
}
