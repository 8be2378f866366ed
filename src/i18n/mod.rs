//! Runtime localization for interactive scenes.
//!
//! Strings are authored as a key x language table, optionally overridden per
//! language by JSON overlay documents, and pushed to display targets by a tree
//! of sessions that share one active-language selection.
//!
//! # Architecture
//!
//! - `language`: Language entries and locale-code helpers
//! - `table`: The authored key x language matrix and its file format
//! - `overlay`: Per-language JSON override documents
//! - `store`: Lookup dictionaries with default-language fallback
//! - `locale`: Platform locale sources for automatic language selection
//! - `events`: Minimal publish/subscribe hub between sessions
//! - `target`: Display targets and the keys bound to them
//! - `session`: Session tree with root-owned language selection
//! - `validator`: Table consistency checks
//! - `metrics`: Lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use scene_translate::i18n::*;
//!
//! let table = TableBuilder::new()
//!     .language(LanguageEntry::new("English", "en"))
//!     .language(LanguageEntry::new("Français", "fr"))
//!     .key("hello", ["Hello", "Bonjour"])
//!     .build();
//!
//! let store = Rc::new(TranslationStore::new(table));
//! let root = TranslationSession::new_root("hud", store, SessionOptions::default());
//! let menu = TranslationSession::new_child("menu", &root, SessionOptions::default());
//!
//! let title = Rc::new(TextLabel::new());
//! menu.bind_text(&title, "hello");
//! menu.request_language(1);
//! assert_eq!(title.text(), "Bonjour");
//! ```

mod events;
mod language;
mod locale;
mod metrics;
mod overlay;
mod session;
mod store;
mod table;
mod target;
mod validator;

pub use events::{EventHandler, EventHub, SessionEvent};
pub use language::{base_code, LanguageEntry, DEFAULT_LANGUAGE};
pub use locale::{FixedLocale, LocaleSource, SystemLocale};
pub use metrics::{LookupMetrics, MetricsReport};
pub use overlay::{parse_overlay, try_parse_overlay, OverlayError};
pub use session::{SessionOptions, TranslationSession, MAX_ROOT_HOPS};
pub use store::TranslationStore;
pub use table::{TableBuilder, TableError, TableFile, TranslationTable};
pub use target::{
    BoundTarget, InteractionHint, InteractionTarget, PickupHints, PickupTarget, TextLabel,
    TextTarget,
};
pub use validator::{TableValidator, ValidationReport};
