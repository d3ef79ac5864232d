//! Playground autosave
//!
//! Autosave and restore for the browser code playground's editor. Content is
//! persisted per context (selected language or imported file), restored when
//! the context changes, and flushed when the page is about to lose it.
//!
//! The [`AutosaveController`] is the whole state machine; the editor, the
//! record store and the page are injected behind small traits so the same
//! controller runs in the browser and in native tests.

pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod editor;
pub mod events;
pub mod host;
pub mod keybindings;
pub mod logging;
pub mod record;
pub mod store;
pub mod timer;

pub use config::{AutosaveConfig, ConfigError, LogLevel};
pub use context::{ContextKey, FileDescriptor, KeyStrategy};
pub use controller::{AutosaveController, FlushOutcome, ResetOutcome, RestoreOutcome, SkipReason};
pub use editor::{BufferChange, EditorSurface, TextBuffer};
pub use events::{PageEvent, Visibility};
pub use host::{HostPage, Notification, PageState};
pub use keybindings::{KeyPress, SaveShortcut};
pub use record::SavedRecord;
pub use store::{MemoryStore, RecordStore, StoreError};
pub use timer::{Clock, ManualClock, SystemClock};

// Native setup
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativePaths;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
