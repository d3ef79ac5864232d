//! The editor surface the controller reads from and restores into.
//!
//! User edits and programmatic replacement are separate entry points:
//! [`EditorSurface::replace_all`] never produces a [`BufferChange`], so a
//! restore can not be mistaken for an edit.

/// Change notification sent from the editor to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferChange {
    /// Whether the document text actually changed
    pub doc_changed: bool,
}

impl BufferChange {
    pub const EDITED: Self = Self { doc_changed: true };
    pub const UNCHANGED: Self = Self { doc_changed: false };
}

/// Text buffer capabilities the controller needs.
pub trait EditorSurface {
    /// Current full buffer text.
    fn text(&self) -> String;

    /// Buffer length in bytes.
    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap the whole buffer for `content` as one external change.
    fn replace_all(&mut self, content: &str);
}

/// Plain in-memory editor buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace the text as a user edit and report what changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> BufferChange {
        let text = text.into();
        let doc_changed = text != self.text;
        self.text = text;
        BufferChange { doc_changed }
    }

    /// Append text as a user edit.
    pub fn push_str(&mut self, text: &str) -> BufferChange {
        self.text.push_str(text);
        BufferChange {
            doc_changed: !text.is_empty(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl EditorSurface for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn replace_all(&mut self, content: &str) {
        self.text.clear();
        self.text.push_str(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_reports_change() {
        let mut buffer = TextBuffer::with_text("a");
        assert_eq!(buffer.set_text("b"), BufferChange::EDITED);
        assert_eq!(buffer.set_text("b"), BufferChange::UNCHANGED);
    }

    #[test]
    fn test_push_str() {
        let mut buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.push_str("print(").doc_changed);
        assert!(!buffer.push_str("").doc_changed);
        assert_eq!(buffer.as_str(), "print(");
        assert_eq!(EditorSurface::len(&buffer), 6);
    }

    #[test]
    fn test_replace_all() {
        let mut buffer = TextBuffer::with_text("old");
        buffer.replace_all("new content");
        assert_eq!(buffer.text(), "new content");
    }
}
