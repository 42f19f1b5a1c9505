use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::{Div, Textarea};
use leptos::prelude::*;
use leptos::web_sys::{HtmlElement, MouseEvent, Node};
use log::debug;

use crate::editor_core::{ChangeOrigin, EditorDocument};
use crate::editor_sync::{EditorSync, PointerDown, TextSurface, UpdateListener, ViewUpdate};
use crate::highlight::highlight_markdown;

/// Textarea with a highlight layer underneath; both share font metrics so
/// the layer can answer coordinate lookups for the textarea.
pub struct TextareaSurface {
    textarea: NodeRef<Textarea>,
    layer: NodeRef<Div>,
    document: RefCell<EditorDocument>,
    set_highlight: WriteSignal<String>,
    listener: UpdateListener,
}

impl TextareaSurface {
    pub fn new(
        initial: &str,
        textarea: NodeRef<Textarea>,
        layer: NodeRef<Div>,
        set_highlight: WriteSignal<String>,
        listener: UpdateListener,
    ) -> Self {
        set_highlight.set(highlight_markdown(initial));
        Self {
            textarea,
            layer,
            document: RefCell::new(EditorDocument::new(initial)),
            set_highlight,
            listener,
        }
    }

    /// Pushes the mirror into the textarea once the element exists.
    pub fn attach(&self) {
        if let Some(textarea) = self.textarea.get() {
            let text = self.text();
            if textarea.value() != text {
                textarea.set_value(&text);
            }
        }
    }

    /// Called from the textarea's `input` event.
    pub fn handle_input(&self) {
        let Some(textarea) = self.textarea.get() else {
            return;
        };
        self.apply(textarea.value(), ChangeOrigin::Input);
    }

    fn apply(&self, text: String, origin: ChangeOrigin) {
        let outcome = self.document.borrow_mut().replace_all(text, origin);
        let text = self.text();
        if outcome.text_changed {
            self.set_highlight.set(highlight_markdown(&text));
            debug!(
                "editor: revision {} ({:?})",
                outcome.revision, outcome.origin
            );
        }
        (self.listener)(&ViewUpdate {
            doc_changed: outcome.text_changed,
            text,
        });
    }

    fn layer_offset_at(&self, x: f64, y: f64) -> Option<usize> {
        let layer: HtmlElement = self.layer.get()?.into();
        let textarea: HtmlElement = self.textarea.get()?.into();
        let document = leptos::prelude::document();

        // The layer is normally transparent to hit-testing; flip it for the
        // duration of the lookup.
        let _ = textarea.style().set_property("pointer-events", "none");
        let _ = layer.style().set_property("pointer-events", "auto");
        let caret = document.caret_position_from_point(x as f32, y as f32);
        let _ = layer.style().set_property("pointer-events", "none");
        let _ = textarea.style().remove_property("pointer-events");

        let caret = caret?;
        let node = caret.offset_node()?;
        let layer_node: &Node = layer.as_ref();
        if !layer_node.contains(Some(&node)) {
            return None;
        }

        let range = document.create_range().ok()?;
        range.select_node_contents(layer_node).ok()?;
        range.set_end(&node, caret.offset()).ok()?;
        let prefix: String = range.to_string().into();
        Some(prefix.len())
    }
}

impl TextSurface for TextareaSurface {
    fn text(&self) -> String {
        self.document.borrow().text().to_string()
    }

    fn replace_all(&self, text: &str) {
        if let Some(textarea) = self.textarea.get() {
            textarea.set_value(text);
        }
        // Assigning `value` does not fire `input`, so notify here.
        self.apply(text.to_string(), ChangeOrigin::External);
    }

    fn pos_at_coords(&self, x: f64, y: f64) -> Option<usize> {
        let offset = self.layer_offset_at(x, y)?;
        let len = self.document.borrow().len();
        // The layer carries a trailing pad beyond the document.
        Some(offset.min(len))
    }
}

impl PointerDown for MouseEvent {
    fn client_x(&self) -> f64 {
        MouseEvent::client_x(self) as f64
    }

    fn client_y(&self) -> f64 {
        MouseEvent::client_y(self) as f64
    }

    fn secondary_modifier(&self) -> bool {
        self.ctrl_key() || self.meta_key()
    }

    fn prevent_default(&self) {
        leptos::web_sys::Event::prevent_default(self);
    }
}

/// Markdown editing pane bound to an externally owned `value`.
#[component]
pub fn EditorAdapter(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] on_ctrl_click_link: Option<Callback<String>>,
) -> impl IntoView {
    let textarea_ref = NodeRef::<Textarea>::new();
    let layer_ref = NodeRef::<Div>::new();
    let (highlight, set_highlight) = signal(String::new());
    let (scroll_top, set_scroll_top) = signal(0);

    let initial = value.get_untracked();
    let sync = Rc::new(EditorSync::mount(|listener| {
        TextareaSurface::new(&initial, textarea_ref, layer_ref, set_highlight, listener)
    }));
    sync.set_on_change(move |text| on_change.run(text));
    sync.set_on_ctrl_click_link(on_ctrl_click_link.map(|callback| {
        Rc::new(move |target: String| callback.run(target)) as Rc<dyn Fn(String)>
    }));

    let sync_mount = Rc::clone(&sync);
    Effect::new(move |_| {
        if textarea_ref.get().is_some() {
            sync_mount.surface().attach();
        }
    });

    let sync_value = Rc::clone(&sync);
    Effect::new(move |_| {
        let next = value.get();
        sync_value.set_value(&next);
    });

    let sync_input = Rc::clone(&sync);
    let on_input = move |_| sync_input.surface().handle_input();

    let sync_pointer = Rc::clone(&sync);
    let on_mousedown = move |ev: MouseEvent| {
        if sync_pointer.handle_pointer_down(&ev) {
            debug!("editor: ctrl-click consumed");
        }
    };

    view! {
        <div class="editor-container">
            <div
                class="markdown-highlight-layer"
                node_ref=layer_ref
                inner_html=move || highlight.get()
                prop:scrollTop=move || scroll_top.get()
            ></div>
            <textarea
                class="raw-editor"
                node_ref=textarea_ref
                on:input=on_input
                on:mousedown=on_mousedown
                on:scroll=move |e| {
                    let target: leptos::web_sys::Element = event_target(&e);
                    set_scroll_top.set(target.scroll_top());
                }
                placeholder="Start writing markdown..."
                spellcheck="false"
            ></textarea>
        </div>
    }
}
