//! Light/dark theme, persisted across reloads.

use crate::error::EditorError;
use crate::platform::KeyValueStore;

pub const DEFAULT_THEME_KEY: &str = "wordpad:theme";

/// Class put on `<body>` while the dark theme is active.
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Stored theme, or the default when nothing valid is stored.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Result<Self, EditorError> {
        Ok(store
            .get(key)?
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or_default())
    }

    pub fn store<K: KeyValueStore + ?Sized>(self, store: &mut K, key: &str) -> Result<(), EditorError> {
        store.set(key, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_theme_round_trips_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY).unwrap(), Theme::Light);

        Theme::Dark.store(&mut store, DEFAULT_THEME_KEY).unwrap();
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_garbage_falls_back_to_light() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY).unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert!(Theme::Dark.is_dark());
    }
}
