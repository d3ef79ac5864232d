//! Events the page and the editor deliver to the controller.

use crate::editor::BufferChange;
use crate::keybindings::KeyPress;

/// Page visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Every signal the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    // Editor
    /// The user changed the buffer
    BufferChanged(BufferChange),

    // User actions
    /// The language selector (or current file) changed
    ContextChanged,
    /// Save button clicked
    SaveClicked,
    /// Reset button clicked
    ResetClicked,
    /// Key pressed anywhere on the page
    KeyDown(KeyPress),

    // Lifecycle
    /// Page is about to unload
    BeforeUnload,
    /// Page visibility changed
    VisibilityChanged(Visibility),
    /// Window lost focus
    WindowBlur,

    // Timers
    /// Check debounce and periodic deadlines
    Tick,
}
