//! Bound targets: display elements that receive resolved strings.
//!
//! Targets are held weakly. A target whose owner has been dropped is skipped
//! during rendering instead of being treated as an error.

use crate::i18n::TranslationStore;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A text label.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

/// A grabbable object with an interaction hint and a use hint.
pub trait PickupTarget {
    fn set_interaction_text(&self, text: &str);
    fn set_use_text(&self, text: &str);
}

/// An interactive behavior with a single interaction hint.
pub trait InteractionTarget {
    fn set_interaction_text(&self, text: &str);
}

/// A target together with the translation keys it displays.
#[derive(Debug, Clone)]
pub enum BoundTarget {
    Text {
        target: Weak<dyn TextTarget>,
        key: String,
    },
    Pickup {
        target: Weak<dyn PickupTarget>,
        interact_key: String,
        use_key: String,
    },
    Behavior {
        target: Weak<dyn InteractionTarget>,
        interact_key: String,
    },
}

impl BoundTarget {
    pub fn text<T: TextTarget + 'static>(target: &Rc<T>, key: impl Into<String>) -> Self {
        let weak = Rc::downgrade(target);
        let target: Weak<dyn TextTarget> = weak;
        Self::Text {
            target,
            key: key.into(),
        }
    }

    pub fn pickup<T: PickupTarget + 'static>(
        target: &Rc<T>,
        interact_key: impl Into<String>,
        use_key: impl Into<String>,
    ) -> Self {
        let weak = Rc::downgrade(target);
        let target: Weak<dyn PickupTarget> = weak;
        Self::Pickup {
            target,
            interact_key: interact_key.into(),
            use_key: use_key.into(),
        }
    }

    pub fn behavior<T: InteractionTarget + 'static>(
        target: &Rc<T>,
        interact_key: impl Into<String>,
    ) -> Self {
        let weak = Rc::downgrade(target);
        let target: Weak<dyn InteractionTarget> = weak;
        Self::Behavior {
            target,
            interact_key: interact_key.into(),
        }
    }

    /// Whether the underlying target still exists.
    pub fn is_live(&self) -> bool {
        match self {
            Self::Text { target, .. } => target.strong_count() > 0,
            Self::Pickup { target, .. } => target.strong_count() > 0,
            Self::Behavior { target, .. } => target.strong_count() > 0,
        }
    }

    /// Translation keys this target displays.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Text { key, .. } => vec![key.as_str()],
            Self::Pickup {
                interact_key,
                use_key,
                ..
            } => vec![interact_key.as_str(), use_key.as_str()],
            Self::Behavior { interact_key, .. } => vec![interact_key.as_str()],
        }
    }

    /// Push the strings for `lang_index` to the target.
    ///
    /// Returns `false` if the target no longer exists.
    pub fn apply(&self, store: &TranslationStore, lang_index: usize) -> bool {
        match self {
            Self::Text { target, key } => {
                let Some(target) = target.upgrade() else {
                    return false;
                };
                target.set_text(store.get_value(lang_index, key));
            }
            Self::Pickup {
                target,
                interact_key,
                use_key,
            } => {
                let Some(target) = target.upgrade() else {
                    return false;
                };
                target.set_interaction_text(store.get_value(lang_index, interact_key));
                target.set_use_text(store.get_value(lang_index, use_key));
            }
            Self::Behavior {
                target,
                interact_key,
            } => {
                let Some(target) = target.upgrade() else {
                    return false;
                };
                target.set_interaction_text(store.get_value(lang_index, interact_key));
            }
        }
        true
    }
}

/// In-memory text label.
#[derive(Debug, Default)]
pub struct TextLabel {
    text: RefCell<String>,
}

impl TextLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl TextTarget for TextLabel {
    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.text.borrow_mut());
    }
}

/// In-memory pickup hints.
#[derive(Debug, Default)]
pub struct PickupHints {
    interaction: RefCell<String>,
    use_text: RefCell<String>,
}

impl PickupHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction_text(&self) -> String {
        self.interaction.borrow().clone()
    }

    pub fn use_text(&self) -> String {
        self.use_text.borrow().clone()
    }
}

impl PickupTarget for PickupHints {
    fn set_interaction_text(&self, text: &str) {
        text.clone_into(&mut self.interaction.borrow_mut());
    }

    fn set_use_text(&self, text: &str) {
        text.clone_into(&mut self.use_text.borrow_mut());
    }
}

/// In-memory interaction hint.
#[derive(Debug, Default)]
pub struct InteractionHint {
    text: RefCell<String>,
}

impl InteractionHint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl InteractionTarget for InteractionHint {
    fn set_interaction_text(&self, text: &str) {
        text.clone_into(&mut self.text.borrow_mut());
    }
}
