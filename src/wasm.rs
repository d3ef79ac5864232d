//! Browser binding.
//!
//! Wires the controller to the live page: the editor glue object handed in
//! from JavaScript, the language selector and buttons, lifecycle events and
//! a tick timer. Records go to `localStorage`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlSelectElement, KeyboardEvent, VisibilityState};

use crate::config::AutosaveConfig;
use crate::constants::{TICK_INTERVAL_MS, dom};
use crate::context::FileDescriptor;
use crate::controller::AutosaveController;
use crate::editor::{BufferChange, EditorSurface};
use crate::events::{PageEvent, Visibility};
use crate::host::{HostPage, Notification};
use crate::keybindings::{KeyPress, SaveShortcut};
use crate::logging;
use crate::store::LocalStorageStore;

#[wasm_bindgen]
extern "C" {
    /// Editor glue object supplied by the page.
    ///
    /// Must expose `getText(): string` and `replaceAll(text: string)`.
    pub type EditorHandle;

    #[wasm_bindgen(method, js_name = getText)]
    fn get_text(this: &EditorHandle) -> String;

    #[wasm_bindgen(method, js_name = replaceAll)]
    fn replace_all(this: &EditorHandle, content: &str);
}

struct JsEditor(EditorHandle);

impl EditorSurface for JsEditor {
    fn text(&self) -> String {
        self.0.get_text()
    }

    fn replace_all(&mut self, content: &str) {
        self.0.replace_all(content);
    }
}

/// The page around the editor, reached through the DOM and two callbacks.
struct DomHost {
    document: Document,
    /// `(language) => string`
    default_content: js_sys::Function,
    /// `(message, isError) => void`
    notify: js_sys::Function,
    current_file: Rc<RefCell<Option<FileDescriptor>>>,
}

impl DomHost {
    fn language_select(&self) -> Option<HtmlSelectElement> {
        self.document
            .get_element_by_id(dom::LANGUAGE_SELECT)?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }
}

impl HostPage for DomHost {
    fn active_language(&self) -> String {
        self.language_select()
            .map(|select| select.value())
            .unwrap_or_default()
    }

    fn set_active_language(&mut self, language: &str) {
        let Some(select) = self.language_select() else {
            log::warn!("#{} not found, language not changed", dom::LANGUAGE_SELECT);
            return;
        };
        select.set_value(language);

        // Syntax mode and friends listen for `change`
        let dispatched = Event::new("change").and_then(|event| select.dispatch_event(&event));
        if let Err(e) = dispatched {
            log::warn!("Failed to dispatch language change: {:?}", e);
        }
    }

    fn default_content(&self, language: &str) -> String {
        match self
            .default_content
            .call1(&JsValue::NULL, &JsValue::from_str(language))
        {
            Ok(value) => value.as_string().unwrap_or_default(),
            Err(e) => {
                log::error!("Default content lookup for {} failed: {:?}", language, e);
                String::new()
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        let result = self.notify.call2(
            &JsValue::NULL,
            &JsValue::from_str(&notification.message),
            &JsValue::from_bool(notification.is_error),
        );
        if let Err(e) = result {
            log::warn!("Notification callback failed: {:?}", e);
        }
    }

    fn current_file(&self) -> Option<FileDescriptor> {
        self.current_file.borrow().clone()
    }
}

type BrowserController = AutosaveController<LocalStorageStore, JsEditor, DomHost>;

/// Events are queued and drained by a single task that owns the controller
/// while it runs, so each event finishes before the next one starts.
struct Runtime {
    controller: RefCell<Option<BrowserController>>,
    queue: RefCell<VecDeque<PageEvent>>,
}

impl Runtime {
    fn dispatch(self: &Rc<Self>, event: PageEvent) {
        self.queue.borrow_mut().push_back(event);
        // Taken means a drain is already running and will pick this up
        let Some(controller) = self.controller.borrow_mut().take() else {
            return;
        };
        self.spawn_drain(controller, false);
    }

    fn spawn_drain(self: &Rc<Self>, mut controller: BrowserController, start: bool) {
        let runtime = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            if start {
                controller.start().await;
            }
            loop {
                let next = runtime.queue.borrow_mut().pop_front();
                let Some(event) = next else { break };
                controller.handle(event).await;
            }
            *runtime.controller.borrow_mut() = Some(controller);
        });
    }
}

fn listen<T>(target: &web_sys::EventTarget, event_type: &str, handler: T) -> Result<(), JsValue>
where
    T: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Listeners live as long as the page
    Ok(())
}

/// Autosave for the playground editor.
#[wasm_bindgen]
pub struct PlaygroundAutosave {
    runtime: Rc<Runtime>,
    current_file: Rc<RefCell<Option<FileDescriptor>>>,
    shortcut: SaveShortcut,
}

#[wasm_bindgen]
impl PlaygroundAutosave {
    /// Attach autosave to the page and run the initial restore.
    #[wasm_bindgen(constructor)]
    pub fn new(
        editor: EditorHandle,
        default_content: js_sys::Function,
        notify: js_sys::Function,
    ) -> Result<PlaygroundAutosave, JsValue> {
        let config = AutosaveConfig::load_from_local_storage().unwrap_or_default();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object"))?;
        let store = LocalStorageStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let current_file = Rc::new(RefCell::new(None));
        let host = DomHost {
            document: document.clone(),
            default_content,
            notify,
            current_file: Rc::clone(&current_file),
        };
        let shortcut = config.save_shortcut.clone();
        let controller = AutosaveController::new(config, store, JsEditor(editor), host);

        let runtime = Rc::new(Runtime {
            controller: RefCell::new(None),
            queue: RefCell::new(VecDeque::new()),
        });
        runtime.spawn_drain(controller, true);

        let autosave = PlaygroundAutosave {
            runtime,
            current_file,
            shortcut,
        };
        autosave.register_listeners(&window, &document)?;
        log::info!("Playground autosave attached (save with {})", autosave.shortcut.label());
        Ok(autosave)
    }

    /// Report an editor update. Only updates with `docChanged` set count as
    /// edits.
    #[wasm_bindgen(js_name = onDocChanged)]
    pub fn on_doc_changed(&self, doc_changed: bool) {
        self.runtime
            .dispatch(PageEvent::BufferChanged(BufferChange { doc_changed }));
    }

    /// Set or clear the file the buffer was imported from.
    #[wasm_bindgen(js_name = setCurrentFile)]
    pub fn set_current_file(&self, path: Option<String>) {
        *self.current_file.borrow_mut() = path.map(FileDescriptor::new);
        self.runtime.dispatch(PageEvent::ContextChanged);
    }

    #[wasm_bindgen(js_name = saveNow)]
    pub fn save_now(&self) {
        self.runtime.dispatch(PageEvent::SaveClicked);
    }

    pub fn reset(&self) {
        self.runtime.dispatch(PageEvent::ResetClicked);
    }
}

impl PlaygroundAutosave {
    fn register_listeners(&self, window: &web_sys::Window, document: &Document) -> Result<(), JsValue> {
        // Lifecycle
        let runtime = Rc::clone(&self.runtime);
        listen(window, "beforeunload", move |_| runtime.dispatch(PageEvent::BeforeUnload))?;

        let runtime = Rc::clone(&self.runtime);
        listen(window, "blur", move |_| runtime.dispatch(PageEvent::WindowBlur))?;

        let runtime = Rc::clone(&self.runtime);
        let doc = document.clone();
        listen(document, "visibilitychange", move |_| {
            let visibility = match doc.visibility_state() {
                VisibilityState::Hidden => Visibility::Hidden,
                _ => Visibility::Visible,
            };
            runtime.dispatch(PageEvent::VisibilityChanged(visibility));
        })?;

        // Save shortcut; the default action is suppressed synchronously
        let runtime = Rc::clone(&self.runtime);
        let shortcut = self.shortcut.clone();
        listen(document, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let press = KeyPress {
                key: key_event.key(),
                ctrl: key_event.ctrl_key(),
                meta: key_event.meta_key(),
                shift: key_event.shift_key(),
                alt: key_event.alt_key(),
            };
            if shortcut.matches(&press) {
                event.prevent_default();
            }
            runtime.dispatch(PageEvent::KeyDown(press));
        })?;

        // Controls
        let controls: [(&str, &str, PageEvent); 3] = [
            (dom::LANGUAGE_SELECT, "change", PageEvent::ContextChanged),
            (dom::SAVE_BUTTON, "click", PageEvent::SaveClicked),
            (dom::RESET_BUTTON, "click", PageEvent::ResetClicked),
        ];
        for (id, event_type, page_event) in controls {
            let Some(element) = document.get_element_by_id(id) else {
                log::warn!("#{} not found, {} not wired", id, event_type);
                continue;
            };
            let runtime = Rc::clone(&self.runtime);
            listen(&element, event_type, move |_| runtime.dispatch(page_event.clone()))?;
        }

        // Deadlines
        let runtime = Rc::clone(&self.runtime);
        let tick = Closure::wrap(Box::new(move || runtime.dispatch(PageEvent::Tick)) as Box<dyn FnMut()>);
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        )?;
        tick.forget();

        Ok(())
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AutosaveConfig::load_from_local_storage().unwrap_or_default();
    logging::init(config.log_level);
}
