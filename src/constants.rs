//! Global constants for the playground autosave controller

/// Default interval of the periodic flush loop, in milliseconds
pub const DEFAULT_AUTOSAVE_INTERVAL_MS: u64 = 5_000;

/// Default quiet period after the last edit before a debounced save, in milliseconds
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 400;

/// How often the browser binding drives the controller's timers, in milliseconds
pub const TICK_INTERVAL_MS: i32 = 100;

/// Context key prefixes.
pub mod keys {
    /// Prefix for records keyed by selected language
    pub const LANGUAGE_PREFIX: &str = "lang:";
    /// Prefix for records keyed by imported file path
    pub const FILE_PREFIX: &str = "file:";
    /// Prefix of every record entry written to `localStorage`
    pub const LOCAL_STORAGE_PREFIX: &str = "playground-autosave:";
}

/// Messages shown through the host's notification sink.
pub mod messages {
    pub const RESTORED: &str = "Restored saved content";
    pub const SAVED: &str = "Content saved";
    pub const RESET: &str = "Reset to default and cleared saved content";
    pub const RESET_FAILED: &str = "Error resetting content";
}

/// Element ids the browser binding looks up on the page.
pub mod dom {
    pub const LANGUAGE_SELECT: &str = "language-select";
    pub const SAVE_BUTTON: &str = "save-btn";
    pub const RESET_BUTTON: &str = "reset-btn";
}
