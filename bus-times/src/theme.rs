//! Light/dark colour theme preference.

use std::fmt;

use tracing::warn;

use crate::storage::KeyValueStore;

/// Storage key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// Page colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored theme name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark mode",
            Theme::Dark => "Light mode",
        }
    }

    /// Read the saved theme, falling back to light for anything unknown.
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        storage
            .get(THEME_KEY)
            .ok()
            .flatten()
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    /// Persist this theme. Failure is logged and otherwise ignored.
    pub fn save<S: KeyValueStore + ?Sized>(self, storage: &mut S) {
        if let Err(e) = storage.set(THEME_KEY, self.as_str()) {
            warn!(error = %e, theme = self.as_str(), "failed to persist theme");
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
