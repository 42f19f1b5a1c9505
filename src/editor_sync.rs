//! Keeps an editing surface in step with a document value owned elsewhere.
//!
//! Programmatic writes go through [`EditorSync::set_value`], which arms a
//! one-shot echo guard before mutating the surface. The surface reports every
//! mutation back through the update listener it was mounted with, and the
//! guard swallows exactly the notification caused by that write, so only
//! genuine user edits reach `on_change`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::editor_core::line_at;
use crate::wiki_link::find_wiki_link_at;

/// Notification raised by a surface after any content mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub text: String,
}

pub type UpdateListener = Rc<dyn Fn(&ViewUpdate)>;

/// The editing widget the controller drives.
///
/// Implementations must invoke their update listener synchronously from
/// inside `replace_all` and from every user-driven mutation.
pub trait TextSurface {
    fn text(&self) -> String;

    fn replace_all(&self, text: &str);

    /// Maps client coordinates to a byte offset into the document.
    fn pos_at_coords(&self, x: f64, y: f64) -> Option<usize>;
}

/// The parts of a pointer-down event the controller inspects.
pub trait PointerDown {
    fn client_x(&self) -> f64;
    fn client_y(&self) -> f64;
    /// Ctrl on Linux/Windows, Cmd on macOS.
    fn secondary_modifier(&self) -> bool;
    fn prevent_default(&self);
}

/// Single slot holding the most recently supplied callback.
pub struct CallbackCell<T> {
    slot: RefCell<Option<Rc<dyn Fn(T)>>>,
}

impl<T> Default for CallbackCell<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }
}

impl<T> CallbackCell<T> {
    pub fn set(&self, callback: Option<Rc<dyn Fn(T)>>) {
        *self.slot.borrow_mut() = callback;
    }

    /// Returns `false` when no callback is installed.
    pub fn call(&self, value: T) -> bool {
        // Clone out first so the callback may replace itself.
        let callback = self.slot.borrow().clone();
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }
}

#[derive(Default)]
struct SyncShared {
    ignore_next_change: Cell<bool>,
    on_change: CallbackCell<String>,
    on_ctrl_click_link: CallbackCell<String>,
}

impl SyncShared {
    fn handle_update(&self, update: &ViewUpdate) {
        if !update.doc_changed {
            return;
        }
        if self.ignore_next_change.replace(false) {
            debug!("editor: suppressed echo of external value");
            return;
        }
        self.on_change.call(update.text.clone());
    }
}

pub struct EditorSync<S> {
    surface: S,
    shared: Rc<SyncShared>,
}

impl<S: TextSurface> EditorSync<S> {
    /// Builds the surface, handing it the listener it must notify.
    pub fn mount(build_surface: impl FnOnce(UpdateListener) -> S) -> Self {
        let shared = Rc::new(SyncShared::default());
        let listener_shared = Rc::clone(&shared);
        let listener: UpdateListener = Rc::new(move |update: &ViewUpdate| {
            listener_shared.handle_update(update);
        });
        Self {
            surface: build_surface(listener),
            shared,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn set_on_change(&self, callback: impl Fn(String) + 'static) {
        self.shared.on_change.set(Some(Rc::new(callback)));
    }

    pub fn set_on_ctrl_click_link(&self, callback: Option<Rc<dyn Fn(String)>>) {
        self.shared.on_ctrl_click_link.set(callback);
    }

    /// Applies an externally owned value. Returns whether the surface was
    /// mutated.
    pub fn set_value(&self, value: &str) -> bool {
        if self.surface.text() == value {
            return false;
        }
        // Armed before the write: the surface notifies synchronously.
        self.shared.ignore_next_change.set(true);
        self.surface.replace_all(value);
        true
    }

    /// Ctrl/Cmd-click on a wiki link. Returns `true` when the event was
    /// consumed; `false` leaves the surface's default handling in place.
    pub fn handle_pointer_down(&self, event: &impl PointerDown) -> bool {
        if !event.secondary_modifier() {
            return false;
        }
        let Some(pos) = self
            .surface
            .pos_at_coords(event.client_x(), event.client_y())
        else {
            debug!("editor: pointer outside document");
            return false;
        };

        let text = self.surface.text();
        let line = line_at(&text, pos);
        let Some(target) = find_wiki_link_at(line.text, pos.saturating_sub(line.from)) else {
            return false;
        };

        event.prevent_default();
        self.shared.on_ctrl_click_link.call(target);
        true
    }
}
