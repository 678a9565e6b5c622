//! In-memory [`Document`] for tests and in-process hosts.
//!
//! Keeps a flat arena of element nodes with just enough state for the
//! engine: tags, attributes, form values, own text, layout boxes and
//! computed style. Every dispatched event and every listener registration
//! is recorded so callers can assert on them.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dom::{ComputedStyle, CustomEvent, Document, EventWiring, Rect, Visibility};
use crate::error::DomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    value: String,
    rects: Vec<Rect>,
    style: ComputedStyle,
}

/// An event the document fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Input { target: NodeId },
    Custom(CustomEvent),
}

/// Default layout box given to new elements.
const DEFAULT_RECT: Rect = Rect {
    width: 320.0,
    height: 24.0,
};

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    body: NodeId,
    focused: Option<NodeId>,
    dispatched: Vec<Dispatched>,
    mutations: usize,
    keydown_listeners: HashMap<NodeId, usize>,
    click_listeners: usize,
    observing: bool,
    detached: bool,
    frozen: HashSet<NodeId>,
    /// Custom event names a page integration cancels when handling.
    handled_events: HashSet<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty page: `<html><body></body></html>`.
    pub fn new() -> Self {
        let html = Node {
            tag: "HTML".to_string(),
            attributes: BTreeMap::new(),
            parent: None,
            children: vec![NodeId(1)],
            text: String::new(),
            value: String::new(),
            rects: vec![Rect::new(1280.0, 800.0)],
            style: ComputedStyle::default(),
        };
        let body = Node {
            tag: "BODY".to_string(),
            parent: Some(NodeId(0)),
            children: Vec::new(),
            ..html.clone()
        };
        Self {
            nodes: vec![html, body],
            body: NodeId(1),
            focused: None,
            dispatched: Vec::new(),
            mutations: 0,
            keydown_listeners: HashMap::new(),
            click_listeners: 0,
            observing: false,
            detached: false,
            frozen: HashSet::new(),
            handled_events: HashSet::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new visible element under `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            attributes: BTreeMap::new(),
            parent: Some(parent),
            children: Vec::new(),
            text: String::new(),
            value: String::new(),
            rects: vec![DEFAULT_RECT],
            style: ComputedStyle::default(),
        });
        self.nodes[parent.0].children.push(id);
        self.mutations += 1;
        id
    }

    pub fn textarea(&mut self, parent: NodeId) -> NodeId {
        self.append(parent, "textarea")
    }

    pub fn text_input(&mut self, parent: NodeId) -> NodeId {
        let id = self.append(parent, "input");
        self.set_attribute(id, "type", "text");
        id
    }

    pub fn content_editable(&mut self, parent: NodeId) -> NodeId {
        let id = self.append(parent, "div");
        self.set_attribute(id, "contenteditable", "true");
        id
    }

    pub fn button(&mut self, parent: NodeId, label: &str) -> NodeId {
        let id = self.append(parent, "button");
        self.set_own_text(id, label);
        id
    }

    /// Detach `id` (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.mutations += 1;
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        self.mutations += 1;
    }

    /// Text directly inside `id`, ahead of its children.
    pub fn set_own_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
        self.mutations += 1;
    }

    /// Simulate typing into a form control.
    pub fn type_value(&mut self, id: NodeId, value: &str) {
        self.nodes[id.0].value = value.to_string();
    }

    pub fn set_rects(&mut self, id: NodeId, rects: Vec<Rect>) {
        self.nodes[id.0].rects = rects;
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) {
        self.nodes[id.0].style.visibility = visibility;
    }

    pub fn set_display_none(&mut self, id: NodeId, display_none: bool) {
        self.nodes[id.0].style.display_none = display_none;
    }

    pub fn set_focus(&mut self, id: Option<NodeId>) {
        self.focused = id;
    }

    /// Make writes to `id` fail, as pages that lock their inputs do.
    pub fn freeze(&mut self, id: NodeId) {
        self.frozen.insert(id);
    }

    /// Register a page integration that cancels `name` events.
    pub fn handle_event(&mut self, name: &str) {
        self.handled_events.insert(name.to_string());
    }

    /// Tear the page down; later listener calls fail with [`DomError::Detached`].
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn own_text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn dispatched(&self) -> &[Dispatched] {
        &self.dispatched
    }

    pub fn custom_events(&self) -> Vec<&CustomEvent> {
        self.dispatched
            .iter()
            .filter_map(|d| match d {
                Dispatched::Custom(e) => Some(e),
                Dispatched::Input { .. } => None,
            })
            .collect()
    }

    /// Structural and content changes made through the document so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    pub fn keydown_listener_count(&self, id: NodeId) -> usize {
        self.keydown_listeners.get(&id).copied().unwrap_or(0)
    }

    pub fn click_listener_count(&self) -> usize {
        self.click_listeners
    }

    pub fn is_observed(&self) -> bool {
        self.observing
    }

    fn node(&self, id: &NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::NotFound)
    }

    fn writable(&self, id: &NodeId) -> Result<(), DomError> {
        self.node(id)?;
        if self.detached {
            return Err(DomError::Detached);
        }
        if self.frozen.contains(id) {
            return Err(DomError::Rejected("element is frozen".to_string()));
        }
        Ok(())
    }

    fn live(&self) -> Result<(), DomError> {
        if self.detached {
            Err(DomError::Detached)
        } else {
            Ok(())
        }
    }

    fn collect(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in &self.nodes[id.0].children {
            self.collect(*child, out);
        }
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current.0 == 0 {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(p) if self.nodes[p.0].children.contains(&current) => current = p,
                _ => return false,
            }
        }
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|id| self.is_connected(*id))
    }

    fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect(NodeId(0), &mut out);
        out
    }

    fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.node(el).ok()?.parent
    }

    fn tag_name(&self, el: &NodeId) -> String {
        self.node(el).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.node(el)
            .ok()?
            .attributes
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    fn is_content_editable(&self, el: &NodeId) -> bool {
        let mut current = Some(*el);
        while let Some(id) = current {
            let Ok(node) = self.node(&id) else {
                return false;
            };
            if matches!(node.tag.as_str(), "TEXTAREA" | "INPUT") {
                return false;
            }
            match node.attributes.get("contenteditable").map(|v| v.trim()) {
                Some("false") => return false,
                Some("" | "true" | "plaintext-only") => return true,
                _ => current = node.parent,
            }
        }
        false
    }

    fn client_rects(&self, el: &NodeId) -> Vec<Rect> {
        let Ok(node) = self.node(el) else {
            return Vec::new();
        };
        // Nothing under a display:none ancestor is laid out.
        let mut current = Some(*el);
        while let Some(id) = current {
            let n = &self.nodes[id.0];
            if n.style.display_none {
                return Vec::new();
            }
            current = n.parent;
        }
        node.rects.clone()
    }

    fn computed_style(&self, el: &NodeId) -> ComputedStyle {
        self.node(el).map(|n| n.style).unwrap_or_default()
    }

    fn value(&self, el: &NodeId) -> Option<String> {
        let node = self.node(el).ok()?;
        matches!(node.tag.as_str(), "TEXTAREA" | "INPUT").then(|| node.value.clone())
    }

    fn inner_text(&self, el: &NodeId) -> String {
        let Ok(node) = self.node(el) else {
            return String::new();
        };
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.inner_text(child));
        }
        text
    }

    fn focus(&mut self, el: &NodeId) -> Result<(), DomError> {
        self.node(el)?;
        self.live()?;
        self.focused = Some(*el);
        Ok(())
    }

    fn set_value(&mut self, el: &NodeId, value: &str) -> Result<(), DomError> {
        self.writable(el)?;
        self.nodes[el.0].value = value.to_string();
        self.mutations += 1;
        Ok(())
    }

    fn set_text_content(&mut self, el: &NodeId, text: &str) -> Result<(), DomError> {
        self.writable(el)?;
        let node = &mut self.nodes[el.0];
        let orphans = std::mem::take(&mut node.children);
        node.text = text.to_string();
        for orphan in orphans {
            self.nodes[orphan.0].parent = None;
        }
        self.mutations += 1;
        Ok(())
    }

    fn dispatch_input(&mut self, el: &NodeId) -> Result<(), DomError> {
        self.node(el)?;
        self.live()?;
        self.dispatched.push(Dispatched::Input { target: *el });
        Ok(())
    }

    fn dispatch_custom(&mut self, event: CustomEvent) -> Result<bool, DomError> {
        self.live()?;
        let cancelled = event.cancelable && self.handled_events.contains(&event.name);
        self.dispatched.push(Dispatched::Custom(event));
        Ok(!cancelled)
    }
}

impl EventWiring for MemoryDocument {
    fn add_keydown_listener(&mut self, el: &NodeId) -> Result<(), DomError> {
        self.node(el)?;
        self.live()?;
        *self.keydown_listeners.entry(*el).or_insert(0) += 1;
        Ok(())
    }

    fn add_click_listener(&mut self) -> Result<(), DomError> {
        self.live()?;
        self.click_listeners += 1;
        Ok(())
    }

    fn remove_click_listener(&mut self) -> Result<(), DomError> {
        self.live()?;
        self.click_listeners = self.click_listeners.saturating_sub(1);
        Ok(())
    }

    fn observe_body(&mut self) -> Result<(), DomError> {
        self.live()?;
        self.observing = true;
        Ok(())
    }

    fn disconnect_observer(&mut self) -> Result<(), DomError> {
        self.live()?;
        self.observing = false;
        Ok(())
    }
}
