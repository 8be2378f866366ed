//! Platform locale sources used for automatic language selection.

use std::fmt;

/// Supplies the platform locale code (e.g., `"en-US"`).
pub trait LocaleSource: fmt::Debug {
    /// Current locale code, or `None` if the platform reports none.
    fn current_locale(&self) -> Option<String>;
}

/// Reads the operating system's preferred locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleSource for SystemLocale {
    fn current_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed locale code, used for overrides and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl LocaleSource for FixedLocale {
    fn current_locale(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
