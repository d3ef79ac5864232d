//! Autosave controller.
//!
//! Owns the session state (dirty flag, last saved snapshot, pending
//! debounce) and mediates between the editor, the record store and the
//! host page. All work happens on the caller's thread: the host delivers
//! [`PageEvent`]s, including periodic [`PageEvent::Tick`]s that drive the
//! debounce and autosave deadlines.
//!
//! Operations take `&mut self`, so one operation (store await included)
//! finishes before the next event is handled and flushes never interleave.

use crate::config::AutosaveConfig;
use crate::constants::messages;
use crate::context::ContextKey;
use crate::editor::{BufferChange, EditorSurface};
use crate::events::{PageEvent, Visibility};
use crate::host::{HostPage, Notification};
use crate::record::SavedRecord;
use crate::store::RecordStore;
use crate::timer::{Clock, Debounce, Interval, SystemClock};

/// Why a flush did not write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing changed since the last save and the flush was not forced
    Clean,
    /// Buffer matches the last saved snapshot
    Unchanged,
    /// Buffer holds an imported file that was never edited
    ImportedUntouched,
}

/// Result of a flush attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Saved,
    Skipped(SkipReason),
    /// The store rejected the write; the buffer stays dirty
    Failed,
}

/// Result of restoring content for the active context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Saved content was loaded into the buffer
    Restored,
    /// A record exists but the buffer holds content that must not be replaced
    Kept,
    /// Nothing saved; the default template was loaded
    Defaulted,
    /// The previous context's edit could not be saved. The buffer stays on
    /// it and the restore runs once a later flush succeeds.
    Deferred,
}

/// Result of a reset to default content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Record deleted and default content loaded
    Cleared,
    /// Default content loaded but the record could not be deleted
    StoreFailed,
}

/// The context the buffer content belongs to.
#[derive(Debug, Clone)]
struct Binding {
    key: ContextKey,
    language: String,
    file_path: Option<String>,
}

/// Autosave state machine for one editor.
pub struct AutosaveController<S, E, H, C = SystemClock> {
    config: AutosaveConfig,
    store: S,
    editor: E,
    host: H,
    clock: C,

    /// Buffer changed since the last successful save
    is_dirty: bool,
    /// Buffer content at the last successful save or restore
    last_content: String,

    debounce: Debounce,
    autosave_loop: Interval,
    bound: Option<Binding>,
}

impl<S, E, H> AutosaveController<S, E, H, SystemClock>
where
    S: RecordStore,
    E: EditorSurface,
    H: HostPage,
{
    /// Create a controller driven by the wall clock.
    pub fn new(config: AutosaveConfig, store: S, editor: E, host: H) -> Self {
        Self::with_clock(config, store, editor, host, SystemClock)
    }
}

impl<S, E, H, C> AutosaveController<S, E, H, C>
where
    S: RecordStore,
    E: EditorSurface,
    H: HostPage,
    C: Clock,
{
    /// Create a controller with an explicit clock.
    ///
    /// The controller accepts events immediately; call [`Self::start`] to
    /// run the initial restore and begin the autosave loop.
    pub fn with_clock(config: AutosaveConfig, store: S, editor: E, host: H, clock: C) -> Self {
        let debounce = Debounce::new(config.debounce_delay());
        let autosave_loop = Interval::new(config.autosave_interval());
        Self {
            config,
            store,
            editor,
            host,
            clock,
            is_dirty: false,
            last_content: String::new(),
            debounce,
            autosave_loop,
            bound: None,
        }
    }

    /// Restore content for the active context, then start the autosave loop.
    pub async fn start(&mut self) -> RestoreOutcome {
        let outcome = self.restore_content().await;
        self.autosave_loop.start(self.clock.now());
        log::info!(
            "Autosave started: interval {:?}, debounce {:?}, keyed by {}",
            self.autosave_loop.period(),
            self.debounce.delay(),
            self.config.key_strategy.name()
        );
        outcome
    }

    pub fn is_started(&self) -> bool {
        self.autosave_loop.is_running()
    }

    /// Handle one page or editor event.
    ///
    /// Returns true when the event was consumed and the page should suppress
    /// its default action (the save shortcut).
    pub async fn handle(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::BufferChanged(change) => {
                self.on_buffer_changed(change);
                false
            }
            PageEvent::ContextChanged => {
                self.on_context_changed().await;
                false
            }
            PageEvent::SaveClicked => {
                self.save_now().await;
                false
            }
            PageEvent::ResetClicked => {
                self.reset_to_default().await;
                false
            }
            PageEvent::KeyDown(press) => {
                if self.config.save_shortcut.matches(&press) {
                    self.save_now().await;
                    true
                } else {
                    false
                }
            }
            PageEvent::BeforeUnload
            | PageEvent::WindowBlur
            | PageEvent::VisibilityChanged(Visibility::Hidden) => {
                log::debug!("Forced flush on {:?}", event);
                self.flush_if_dirty(true).await;
                false
            }
            PageEvent::VisibilityChanged(Visibility::Visible) => false,
            PageEvent::Tick => {
                self.tick().await;
                false
            }
        }
    }

    /// Record a user edit and (re)schedule the debounced save.
    pub fn on_buffer_changed(&mut self, change: BufferChange) {
        if !change.doc_changed {
            return;
        }
        self.is_dirty = true;
        self.debounce.schedule(self.clock.now());
    }

    /// Fire whichever deadlines have passed.
    pub async fn tick(&mut self) {
        let now = self.clock.now();
        if self.debounce.fire_if_due(now) {
            log::trace!("Debounce elapsed");
            self.flush_if_dirty(false).await;
        }
        if self.autosave_loop.fire_if_due(now) {
            log::trace!("Autosave interval elapsed");
            self.flush_if_dirty(false).await;
        }
    }

    /// Persist the buffer if it has unsaved changes, or unconditionally when
    /// `force` is set.
    pub async fn flush_if_dirty(&mut self, force: bool) -> FlushOutcome {
        if !self.is_dirty && !force {
            return FlushOutcome::Skipped(SkipReason::Clean);
        }
        let target = self.buffer_binding();
        let switching = target.key != self.current_key();
        let outcome = self.write(target, force).await;
        if switching && outcome != FlushOutcome::Failed {
            log::debug!("Previous context saved, switching to {}", self.current_key());
            self.restore_content().await;
        }
        outcome
    }

    /// Explicit user save.
    pub async fn save_now(&mut self) -> FlushOutcome {
        self.flush_if_dirty(true).await
    }

    /// React to a changed language selection or current file.
    ///
    /// A pending edit is first written under the context it was made in.
    /// If that write fails nothing is replaced and the switch waits for a
    /// later flush. Returns `None` when the derived key did not change.
    pub async fn on_context_changed(&mut self) -> Option<RestoreOutcome> {
        let key = self.current_key();
        if let Some(bound) = &self.bound {
            if bound.key == key {
                log::debug!("Context unchanged ({}), skipping restore", key);
                // Same record, but the language or file behind it may differ
                self.bound = Some(self.current_binding());
                return None;
            }
            if self.is_dirty {
                let previous = bound.clone();
                log::debug!("Committing pending edit to {} before switching", previous.key);
                if self.write(previous, false).await == FlushOutcome::Failed {
                    log::warn!("Switch to {} deferred until the pending edit is saved", key);
                    return Some(RestoreOutcome::Deferred);
                }
            }
        }
        Some(self.restore_content().await)
    }

    /// Load saved content for the active context, or the default template.
    pub async fn restore_content(&mut self) -> RestoreOutcome {
        let key = self.current_key();
        log::debug!("Attempting restore with key: {}", key);

        let record = match self.store.get(&key).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error looking up saved content for {}: {}", key, e);
                None
            }
        };

        let outcome = match record.filter(SavedRecord::has_content) {
            Some(record) => {
                if record.language != self.host.active_language() {
                    self.host.set_active_language(&record.language);
                }

                let current = self.editor.text();
                if current.trim().is_empty() || current == self.last_content {
                    self.editor.replace_all(&record.content);
                    self.mark_clean(record.content);
                    self.host.notify(Notification::info(messages::RESTORED));
                    log::info!("Restored saved content for {}", key);
                    RestoreOutcome::Restored
                } else {
                    log::debug!("Restore for {} skipped: buffer holds unsaved content", key);
                    RestoreOutcome::Kept
                }
            }
            None => {
                self.load_default();
                log::debug!("No saved content for {}, loaded default", key);
                RestoreOutcome::Defaulted
            }
        };

        self.bound = Some(self.current_binding());
        outcome
    }

    /// Delete the saved record for the active context and load the default
    /// template. The client-side reset happens even if the delete fails.
    pub async fn reset_to_default(&mut self) -> ResetOutcome {
        let key = self.current_key();
        let deleted = self.store.delete(&key).await;
        self.load_default();
        self.bound = Some(self.current_binding());

        match deleted {
            Ok(()) => {
                log::info!("Reset {} to default", key);
                self.host.notify(Notification::info(messages::RESET));
                ResetOutcome::Cleared
            }
            Err(e) => {
                log::error!("Error resetting content for {}: {}", key, e);
                self.host.notify(Notification::error(messages::RESET_FAILED));
                ResetOutcome::StoreFailed
            }
        }
    }

    /// Key the active context maps to.
    pub fn current_key(&self) -> ContextKey {
        self.config
            .key_strategy
            .derive(&self.host.active_language(), self.host.current_file().as_ref())
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Buffer content at the last successful save or restore.
    pub fn last_content(&self) -> &str {
        &self.last_content
    }

    /// Whether a debounced save is scheduled.
    pub fn has_pending_save(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Direct editor access. Changes made here are not edits until reported
    /// through [`Self::on_buffer_changed`].
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn current_binding(&self) -> Binding {
        Binding {
            key: self.current_key(),
            language: self.host.active_language(),
            file_path: self.host.current_file().map(|file| file.path),
        }
    }

    /// Binding the buffer content belongs to. Differs from the active
    /// context while a switch waits for the previous edit to be saved.
    fn buffer_binding(&self) -> Binding {
        let current = self.current_binding();
        match &self.bound {
            Some(bound) if bound.key != current.key => bound.clone(),
            _ => current,
        }
    }

    /// Write the buffer under `target`, which is captured before the store
    /// call so a later context switch can not redirect the write.
    async fn write(&mut self, target: Binding, force: bool) -> FlushOutcome {
        let Binding {
            key,
            language,
            file_path,
        } = target;
        let content = self.editor.text();

        if !force && content == self.last_content {
            self.is_dirty = false;
            log::debug!("Save skipped for {}: content unchanged", key);
            return FlushOutcome::Skipped(SkipReason::Unchanged);
        }

        // Don't create a record for an imported file nobody has touched
        if !self.is_dirty && file_path.is_some() {
            log::debug!("Save skipped for {}: imported file not edited", key);
            return FlushOutcome::Skipped(SkipReason::ImportedUntouched);
        }

        let record = SavedRecord::new(key, language, file_path, content);

        match self.store.put(&record).await {
            Ok(()) => {
                log::info!("Saved {} bytes under {}", record.content.len(), record.id);
                self.mark_clean(record.content);
                if force {
                    self.host.notify(Notification::info(messages::SAVED));
                }
                FlushOutcome::Saved
            }
            Err(e) => {
                log::error!("Error saving content under {}: {}", record.id, e);
                FlushOutcome::Failed
            }
        }
    }

    fn load_default(&mut self) {
        let language = self.host.active_language();
        let template = self.host.default_content(&language);
        self.editor.replace_all(&template);
        let snapshot = self.editor.text();
        self.mark_clean(snapshot);
    }

    fn mark_clean(&mut self, snapshot: String) {
        self.last_content = snapshot;
        self.is_dirty = false;
        self.debounce.cancel();
    }
}
