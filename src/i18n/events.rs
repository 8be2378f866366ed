//! Minimal publish/subscribe hub used for session notifications.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use tracing::debug;

/// Events a session can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// The root's selected language changed
    LanguageChanged,
}

/// Receives events from an [`EventHub`].
pub trait EventHandler {
    fn handle_event(&self, event: SessionEvent);
}

/// Registry of weakly-held handlers keyed by event.
///
/// Handlers are held weakly so a dropped subscriber is never kept alive by
/// the publisher; dead entries are pruned when the event next fires.
#[derive(Debug, Default)]
pub struct EventHub {
    handlers: RefCell<HashMap<SessionEvent, Vec<Weak<dyn EventHandler>>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn register(&self, event: SessionEvent, handler: Weak<dyn EventHandler>) {
        self.handlers
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(handler);
    }

    /// Deliver `event` to every live handler and return how many were notified.
    ///
    /// The handler list is snapshotted before delivery, so handlers may
    /// register on this hub while it is firing. Such registrations receive
    /// the next event, not the current one.
    pub fn fire(&self, event: SessionEvent) -> usize {
        let live: Vec<_> = {
            let mut handlers = self.handlers.borrow_mut();
            let Some(list) = handlers.get_mut(&event) else {
                return 0;
            };
            list.retain(|handler| handler.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };

        for handler in &live {
            handler.handle_event(event);
        }

        debug!("Fired {:?} to {} handlers", event, live.len());
        live.len()
    }

    /// Number of registered handlers for `event`, including dead ones not yet pruned.
    pub fn handler_count(&self, event: SessionEvent) -> usize {
        self.handlers
            .borrow()
            .get(&event)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
