//! The document seam.
//!
//! A host (browser glue, test harness) implements [`Document`] for whatever
//! element handle it has. The engine never holds anything but those handles.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::DomError;

/// One layout box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Computed CSS `visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// The parts of the computed style the engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    pub visibility: Visibility,
    pub display_none: bool,
}

/// A named custom event carrying `{ text }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    pub name: String,
    pub text: String,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl CustomEvent {
    /// The `detail` object as page scripts see it.
    pub fn detail(&self) -> serde_json::Value {
        serde_json::json!({ "text": self.text })
    }
}

/// Read and write access to one page's DOM.
pub trait Document {
    type Element: Clone + Eq + Hash + Debug;

    /// The focused element, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Every element, in document (pre-order) order.
    fn elements(&self) -> Vec<Self::Element>;

    fn parent(&self, el: &Self::Element) -> Option<Self::Element>;

    /// Upper-case tag name, e.g. `TEXTAREA`.
    fn tag_name(&self, el: &Self::Element) -> String;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    /// Inherited editability (`isContentEditable`).
    fn is_content_editable(&self, el: &Self::Element) -> bool;

    /// `getClientRects()`.
    fn client_rects(&self, el: &Self::Element) -> Vec<Rect>;

    fn computed_style(&self, el: &Self::Element) -> ComputedStyle;

    /// Form value of a text-area or input; `None` for other elements.
    fn value(&self, el: &Self::Element) -> Option<String>;

    /// Rendered text of the element and its descendants.
    fn inner_text(&self, el: &Self::Element) -> String;

    fn focus(&mut self, el: &Self::Element) -> Result<(), DomError>;

    fn set_value(&mut self, el: &Self::Element, value: &str) -> Result<(), DomError>;

    /// Replace the element's children with one text node. Must never parse
    /// `text` as markup.
    fn set_text_content(&mut self, el: &Self::Element, text: &str) -> Result<(), DomError>;

    /// Fire a bubbling `input` event at `el`.
    fn dispatch_input(&mut self, el: &Self::Element) -> Result<(), DomError>;

    /// Fire `event` at the document. Returns `false` if a listener cancelled it.
    fn dispatch_custom(&mut self, event: CustomEvent) -> Result<bool, DomError>;
}

/// Listener and observer registration for the capture side.
pub trait EventWiring: Document {
    /// Capturing-phase `keydown` listener on one element.
    fn add_keydown_listener(&mut self, el: &Self::Element) -> Result<(), DomError>;

    /// Capturing-phase `click` listener on the document.
    fn add_click_listener(&mut self) -> Result<(), DomError>;

    fn remove_click_listener(&mut self) -> Result<(), DomError>;

    /// Child-list observer over the body, subtree included.
    fn observe_body(&mut self) -> Result<(), DomError>;

    fn disconnect_observer(&mut self) -> Result<(), DomError>;
}
