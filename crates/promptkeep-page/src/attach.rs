//! Keeping the keystroke channel wired as the page mutates.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::dom::EventWiring;
use crate::locator;

/// Explicit record of which elements carry our keydown listener, plus the
/// document-level click listener and body observer.
#[derive(Debug, Clone)]
pub struct AttachmentManager<E> {
    attached: HashSet<E>,
    click_wired: bool,
    observing: bool,
}

impl<E> Default for AttachmentManager<E> {
    fn default() -> Self {
        Self {
            attached: HashSet::new(),
            click_wired: false,
            observing: false,
        }
    }
}

impl<E: Clone + Eq + Hash + Debug> AttachmentManager<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the initial inputs, the click listener and the body observer.
    /// Safe to call more than once.
    pub fn start<D: EventWiring<Element = E>>(&mut self, doc: &mut D) {
        self.attach_to_inputs(doc);

        if !self.click_wired {
            match doc.add_click_listener() {
                Ok(()) => self.click_wired = true,
                Err(e) => tracing::debug!(error = %e, "could not wire click listener"),
            }
        }
        if !self.observing {
            match doc.observe_body() {
                Ok(()) => self.observing = true,
                Err(e) => tracing::debug!(error = %e, "could not observe body"),
            }
        }
    }

    /// Observer callback. Rescans only when nodes were added.
    pub fn on_mutation<D: EventWiring<Element = E>>(
        &mut self,
        doc: &mut D,
        added_nodes: usize,
    ) -> usize {
        if added_nodes == 0 || !self.observing {
            return 0;
        }
        self.attach_to_inputs(doc)
    }

    /// Attach to every visible candidate not yet in the record. Returns how
    /// many were newly wired. Elements no longer in the document are
    /// dropped from the record first.
    pub fn attach_to_inputs<D: EventWiring<Element = E>>(&mut self, doc: &mut D) -> usize {
        self.prune(&*doc);

        let mut wired = 0;
        for el in locator::candidates(&*doc) {
            if self.attached.contains(&el) {
                continue;
            }
            match doc.add_keydown_listener(&el) {
                Ok(()) => {
                    self.attached.insert(el);
                    wired += 1;
                }
                Err(e) => tracing::debug!(error = %e, element = ?el, "could not attach"),
            }
        }
        if wired > 0 {
            tracing::debug!(wired, total = self.attached.len(), "attached to inputs");
        }
        wired
    }

    fn prune<D: EventWiring<Element = E>>(&mut self, doc: &D) {
        if self.attached.is_empty() {
            return;
        }
        let live: HashSet<E> = doc.elements().into_iter().collect();
        let before = self.attached.len();
        self.attached.retain(|el| live.contains(el));
        let dropped = before - self.attached.len();
        if dropped > 0 {
            tracing::debug!(dropped, "forgot removed inputs");
        }
    }

    pub fn is_attached(&self, el: &E) -> bool {
        self.attached.contains(el)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn is_running(&self) -> bool {
        self.click_wired || self.observing
    }

    /// Remove the click listener and disconnect the observer. Errors from an
    /// already torn-down page are ignored.
    pub fn teardown<D: EventWiring<Element = E>>(&mut self, doc: &mut D) {
        if self.click_wired {
            if let Err(e) = doc.remove_click_listener() {
                tracing::debug!(error = %e, "click listener already gone");
            }
            self.click_wired = false;
        }
        if self.observing {
            if let Err(e) = doc.disconnect_observer() {
                tracing::debug!(error = %e, "observer already gone");
            }
            self.observing = false;
        }
    }
}
