//! Translation sessions: a tree of language selectors with one authority.
//!
//! Every session belongs to a tree built from parent links. The root of the
//! tree owns the store and is the only session that writes the selected
//! language. Other sessions forward requests to the root, subscribe to its
//! "language changed" event, and keep a cached copy of the selection that
//! they use to render their own bound targets.
//!
//! Sessions are single-threaded (`Rc`-shared) and every operation runs to
//! completion. A language request issued while the root is still notifying
//! its subscribers or rendering its own targets is dropped with a warning.

use crate::i18n::events::{EventHandler, EventHub, SessionEvent};
use crate::i18n::language::DEFAULT_LANGUAGE;
use crate::i18n::target::{BoundTarget, InteractionTarget, PickupTarget, TextTarget};
use crate::i18n::TranslationStore;
use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Maximum number of parent links followed while resolving the root.
pub const MAX_ROOT_HOPS: usize = 10;

/// Per-session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Pick the starting language from the platform locale
    pub load_from_system: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            load_from_system: true,
        }
    }
}

/// One node of the session tree.
#[derive(Debug)]
pub struct TranslationSession {
    name: String,
    parent: Option<Rc<TranslationSession>>,
    store: RefCell<Option<Rc<TranslationStore>>>,
    options: SessionOptions,
    root: OnceCell<Weak<TranslationSession>>,
    selected: Cell<usize>,
    targets: RefCell<Vec<BoundTarget>>,
    events: EventHub,
    notifying: Cell<bool>,
    self_ref: Weak<TranslationSession>,
}

impl TranslationSession {
    /// Create a root session that owns `store`.
    pub fn new_root(
        name: impl Into<String>,
        store: Rc<TranslationStore>,
        options: SessionOptions,
    ) -> Rc<Self> {
        Self::new(name.into(), None, Some(store), options)
    }

    /// Create a session below `parent`. It uses the store of its tree's root.
    pub fn new_child(
        name: impl Into<String>,
        parent: &Rc<TranslationSession>,
        options: SessionOptions,
    ) -> Rc<Self> {
        Self::new(name.into(), Some(Rc::clone(parent)), None, options)
    }

    fn new(
        name: String,
        parent: Option<Rc<TranslationSession>>,
        store: Option<Rc<TranslationStore>>,
        options: SessionOptions,
    ) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            name,
            parent,
            store: RefCell::new(store),
            options,
            root: OnceCell::new(),
            selected: Cell::new(DEFAULT_LANGUAGE),
            targets: RefCell::new(Vec::new()),
            events: EventHub::new(),
            notifying: Cell::new(false),
            self_ref: self_ref.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<TranslationSession>> {
        self.parent.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.root.get().is_some()
    }

    /// The resolved root, once this session has been initialized.
    pub fn root(&self) -> Option<Rc<TranslationSession>> {
        self.root.get().and_then(Weak::upgrade)
    }

    pub fn is_root(&self) -> bool {
        self.root()
            .is_some_and(|root| std::ptr::eq(Rc::as_ptr(&root), self))
    }

    /// Store used for lookups (the root's store after initialization).
    pub fn store(&self) -> Option<Rc<TranslationStore>> {
        self.store.borrow().clone()
    }

    /// Currently selected language index.
    ///
    /// On the root this is the authoritative selection; on other sessions it
    /// is the copy taken at the last change notification.
    pub fn selected_language(&self) -> usize {
        self.selected.get()
    }

    /// Number of sessions subscribed to this session's language changes.
    pub fn subscriber_count(&self) -> usize {
        self.events.handler_count(SessionEvent::LanguageChanged)
    }

    pub fn bound_target_count(&self) -> usize {
        self.targets.borrow().len()
    }

    // ==================== Binding ====================

    /// Bind a target. Once the session is initialized it is rendered immediately.
    pub fn bind(&self, target: BoundTarget) {
        debug!("Session '{}' bound target for {:?}", self.name, target.keys());
        if self.is_initialized() {
            if let Some(store) = self.store() {
                target.apply(&store, self.selected.get());
            }
        }
        self.targets.borrow_mut().push(target);
    }

    pub fn bind_text<T: TextTarget + 'static>(&self, target: &Rc<T>, key: impl Into<String>) {
        self.bind(BoundTarget::text(target, key));
    }

    pub fn bind_pickup<T: PickupTarget + 'static>(
        &self,
        target: &Rc<T>,
        interact_key: impl Into<String>,
        use_key: impl Into<String>,
    ) {
        self.bind(BoundTarget::pickup(target, interact_key, use_key));
    }

    pub fn bind_behavior<T: InteractionTarget + 'static>(
        &self,
        target: &Rc<T>,
        interact_key: impl Into<String>,
    ) {
        self.bind(BoundTarget::behavior(target, interact_key));
    }

    // ==================== Initialization ====================

    /// Initialize the session if it has not been initialized yet.
    ///
    /// Resolves the root, subscribes to it (unless this is the root), picks
    /// the starting language and requests it through the root, which renders
    /// every session in the tree that is already subscribed.
    pub fn ensure_init(&self) {
        if self.is_initialized() {
            return;
        }

        let root = self.resolve_root();
        let _ = self.root.set(Weak::clone(&root.self_ref));

        if !std::ptr::eq(root, self) {
            root.ensure_init();

            match root.store() {
                Some(store) => *self.store.borrow_mut() = Some(store),
                None => warn!(
                    "Session '{}': root '{}' has no translation store",
                    self.name, root.name
                ),
            }

            let handler: Weak<dyn EventHandler> = self.self_ref.clone();
            root.events.register(SessionEvent::LanguageChanged, handler);
            debug!("Session '{}' subscribed to root '{}'", self.name, root.name);
        }

        let Some(store) = self.store() else {
            warn!("Session '{}' has no translation store", self.name);
            return;
        };

        let mut lang = DEFAULT_LANGUAGE;
        if self.options.load_from_system {
            if let Some(system_lang) = store.resolve_system_language() {
                lang = system_lang;
            }
        }

        self.request_language(lang);
    }

    /// Walk parent links up to [`MAX_ROOT_HOPS`] times.
    fn resolve_root(&self) -> &TranslationSession {
        let mut current = self;
        let mut hops = 0;

        while let Some(parent) = current.parent.as_deref() {
            if hops == MAX_ROOT_HOPS {
                warn!(
                    "Session '{}': parent chain deeper than {} links, using '{}' as root",
                    self.name, MAX_ROOT_HOPS, current.name
                );
                break;
            }
            current = parent;
            hops += 1;
        }

        current
    }

    // ==================== Language Selection ====================

    /// Ask the root to select language `index`.
    ///
    /// Initializes the session first if needed. Invalid indices are ignored.
    pub fn request_language(&self, index: usize) {
        self.ensure_init();

        match self.root() {
            Some(root) => root.root_select_language(index),
            None => debug!(
                "Session '{}' has no root, dropping request for language {}",
                self.name, index
            ),
        }
    }

    /// Select the authoritative language on this session and notify subscribers.
    ///
    /// Meant to be called on the root (use [`request_language`](Self::request_language)
    /// from anywhere else). Out-of-range indices are ignored without changing
    /// state or firing an event.
    pub fn root_select_language(&self, index: usize) {
        let Some(store) = self.store() else {
            debug!("Session '{}' has no store, ignoring selection", self.name);
            return;
        };

        if index >= store.language_count() {
            debug!(
                "Session '{}': ignoring language {} ({} available)",
                self.name,
                index,
                store.language_count()
            );
            return;
        }

        if self.notifying.get() {
            warn!(
                "Session '{}': language {} requested while notifying subscribers, dropping it",
                self.name, index
            );
            return;
        }

        self.selected.set(index);
        info!(
            "Session '{}' selected language {} ({})",
            self.name,
            index,
            store.language(index).map(|l| l.code.as_str()).unwrap_or("")
        );

        // Held across the root's own render as well as the fan-out.
        self.notifying.set(true);
        self.events.fire(SessionEvent::LanguageChanged);
        self.update_language();
        self.notifying.set(false);
    }

    fn on_root_language_changed(&self) {
        if let Some(root) = self.root() {
            self.selected.set(root.selected.get());
        }
        self.update_language();
    }

    // ==================== Rendering ====================

    /// Push resolved strings for the selected language to every bound target.
    ///
    /// Returns the number of targets rendered; dropped targets are skipped.
    pub fn update_language(&self) -> usize {
        let Some(store) = self.store() else {
            return 0;
        };

        // Snapshot so targets may bind new targets while being rendered.
        let targets = self.targets.borrow().clone();
        let dropped = targets.iter().filter(|target| !target.is_live()).count();
        if dropped > 0 {
            debug!("Session '{}': skipping {} dropped targets", self.name, dropped);
        }

        let lang = self.selected.get();
        targets
            .iter()
            .filter(|target| target.apply(&store, lang))
            .count()
    }
}

impl EventHandler for TranslationSession {
    fn handle_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::LanguageChanged => self.on_root_language_changed(),
        }
    }
}
