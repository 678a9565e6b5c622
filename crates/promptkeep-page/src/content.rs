use std::fmt::Debug;
use std::hash::Hash;

use crate::attach::AttachmentManager;
use crate::capture::{CaptureTrigger, PageOrigin, PromptSink};
use crate::dom::EventWiring;
use crate::events::PageEvent;

/// The capture side running inside one page.
///
/// The host forwards page events to [`ContentScript::handle`]; every
/// capture channel ends in [`ContentScript::save_prompt`].
pub struct ContentScript<E, S> {
    trigger: CaptureTrigger,
    attachments: AttachmentManager<E>,
    origin: PageOrigin,
    sink: S,
}

impl<E, S> ContentScript<E, S>
where
    E: Clone + Eq + Hash + Debug,
    S: PromptSink,
{
    pub fn new(sink: S, origin: PageOrigin, trigger: CaptureTrigger) -> Self {
        Self {
            trigger,
            attachments: AttachmentManager::new(),
            origin,
            sink,
        }
    }

    pub fn attachments(&self) -> &AttachmentManager<E> {
        &self.attachments
    }

    pub fn origin(&self) -> &PageOrigin {
        &self.origin
    }

    /// Initial attach plus the document-wide listeners.
    pub fn boot<D: EventWiring<Element = E>>(&mut self, doc: &mut D) {
        self.attachments.start(doc);
        tracing::debug!(
            site = %self.origin.site,
            inputs = self.attachments.attached_count(),
            "content script loaded"
        );
    }

    /// React to one page event. Returns the text handed to the sink, if any.
    pub fn handle<D: EventWiring<Element = E>>(
        &mut self,
        doc: &mut D,
        event: PageEvent<E>,
    ) -> Option<String> {
        match event {
            PageEvent::KeyDown(key) => {
                let element = self.listening_element(&*doc, &key.target)?;
                let text = self.trigger.on_keydown(&*doc, &element, &key)?;
                self.save_prompt(&text)
            }
            PageEvent::Click { target } => {
                if !self.attachments.is_running() {
                    return None;
                }
                let text = self.trigger.on_click(&*doc, &target)?;
                self.save_prompt(&text)
            }
            PageEvent::Mutation { added_nodes } => {
                self.attachments.on_mutation(doc, added_nodes);
                None
            }
            PageEvent::ManualSave { text } => self.save_prompt(&text),
            PageEvent::Unload => {
                self.attachments.teardown(doc);
                None
            }
        }
    }

    /// Hand non-blank text to the sink with this page's origin.
    pub fn save_prompt(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.sink.save(self.origin.draft(text));
        Some(text.to_string())
    }

    /// The attached element whose capturing listener sees an event on
    /// `target`: the target itself or its nearest attached ancestor.
    fn listening_element<D: EventWiring<Element = E>>(&self, doc: &D, target: &E) -> Option<E> {
        let mut current = Some(target.clone());
        while let Some(el) = current {
            if self.attachments.is_attached(&el) {
                return Some(el);
            }
            current = doc.parent(&el);
        }
        None
    }
}
