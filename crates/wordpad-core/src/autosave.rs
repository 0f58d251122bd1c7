//! Periodic persistence of the document to a key-value store.
//!
//! A single record under a single key; every save overwrites it. The platform
//! drives `tick` from a repeating timer.

use std::time::Duration;

use web_time::Instant;

use crate::error::EditorError;
use crate::platform::{DocumentSurface, KeyValueStore};

pub const DEFAULT_AUTOSAVE_KEY: &str = "wordpad:autosave";
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveConfig {
    pub key: String,
    pub interval: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_AUTOSAVE_KEY.to_string(),
            interval: DEFAULT_AUTOSAVE_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Autosave {
    config: AutosaveConfig,
    last_saved: Option<Instant>,
    /// Last save attempt, successful or not. Schedules the next tick.
    last_attempt: Option<Instant>,
}

impl Autosave {
    pub fn new(config: AutosaveConfig) -> Self {
        Self {
            config,
            last_saved: None,
            last_attempt: None,
        }
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    pub fn last_saved(&self) -> Option<Instant> {
        self.last_saved
    }

    /// Write the current content, replacing any previous record.
    pub fn save<D, K>(&mut self, surface: &D, store: &mut K) -> Result<(), EditorError>
    where
        D: DocumentSurface + ?Sized,
        K: KeyValueStore + ?Sized,
    {
        let content = surface.content();
        if let Err(err) = store.set(&self.config.key, &content) {
            tracing::warn!(key = %self.config.key, error = %err, "autosave failed");
            return Err(err);
        }
        self.last_saved = Some(Instant::now());
        self.last_attempt = self.last_saved;
        tracing::debug!(key = %self.config.key, bytes = content.len(), "autosaved");
        Ok(())
    }

    /// Replace the content with the stored record, if there is one.
    pub fn restore<D, K>(&self, surface: &mut D, store: &K) -> Result<bool, EditorError>
    where
        D: DocumentSurface + ?Sized,
        K: KeyValueStore + ?Sized,
    {
        match store.get(&self.config.key)? {
            Some(content) => {
                surface.set_content(&content);
                tracing::info!(key = %self.config.key, bytes = content.len(), "restored autosave");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether a save is due at `now`. A failed attempt waits a full
    /// interval before the next one.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_attempt
            .is_none_or(|last| now.saturating_duration_since(last) >= self.config.interval)
    }

    /// Save if the interval has elapsed since the last save. Returns whether
    /// a save happened.
    pub fn tick<D, K>(&mut self, surface: &D, store: &mut K, now: Instant) -> Result<bool, EditorError>
    where
        D: DocumentSurface + ?Sized,
        K: KeyValueStore + ?Sized,
    {
        if !self.is_due(now) {
            return Ok(false);
        }
        let saved = self.save(surface, store);
        self.last_attempt = Some(now);
        saved?;
        self.last_saved = Some(now);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, MemorySurface};

    #[test]
    fn test_save_restore_round_trip() {
        let mut autosave = Autosave::new(AutosaveConfig::default());
        let mut store = MemoryStore::new();
        let surface = MemorySurface::new("<p>draft <b>one</b></p>");
        autosave.save(&surface, &mut store).unwrap();

        let mut fresh = MemorySurface::new("<p>Start typing here...</p>");
        assert!(autosave.restore(&mut fresh, &store).unwrap());
        assert_eq!(fresh.content(), "<p>draft <b>one</b></p>");
    }

    #[test]
    fn test_restore_without_record_keeps_content() {
        let autosave = Autosave::new(AutosaveConfig::default());
        let store = MemoryStore::new();
        let mut surface = MemorySurface::new("<p>keep</p>");
        assert!(!autosave.restore(&mut surface, &store).unwrap());
        assert_eq!(surface.content(), "<p>keep</p>");
    }

    #[test]
    fn test_last_writer_wins() {
        let mut autosave = Autosave::new(AutosaveConfig::default());
        let mut store = MemoryStore::new();
        autosave
            .save(&MemorySurface::new("<p>first</p>"), &mut store)
            .unwrap();
        autosave
            .save(&MemorySurface::new("<p>second</p>"), &mut store)
            .unwrap();
        assert_eq!(
            store.get(DEFAULT_AUTOSAVE_KEY).unwrap().as_deref(),
            Some("<p>second</p>")
        );
    }

    #[test]
    fn test_tick_respects_interval() {
        let mut autosave = Autosave::new(AutosaveConfig::default());
        let mut store = MemoryStore::new();
        let surface = MemorySurface::new("<p>x</p>");
        let start = Instant::now();

        assert!(autosave.tick(&surface, &mut store, start).unwrap());
        assert!(
            !autosave
                .tick(&surface, &mut store, start + Duration::from_millis(4999))
                .unwrap()
        );
        assert!(
            autosave
                .tick(&surface, &mut store, start + Duration::from_millis(5000))
                .unwrap()
        );
    }

    #[test]
    fn test_failed_write_is_reported_and_state_kept() {
        let mut autosave = Autosave::new(AutosaveConfig::default());
        let mut store = MemoryStore::failing();
        let surface = MemorySurface::new("<p>x</p>");
        let err = autosave.save(&surface, &mut store).unwrap_err();
        assert!(matches!(err, EditorError::Storage(_)));
        assert!(autosave.last_saved().is_none());
        assert_eq!(surface.content(), "<p>x</p>");
    }

    #[test]
    fn test_failed_tick_waits_a_full_interval() {
        let mut autosave = Autosave::new(AutosaveConfig::default());
        let mut store = MemoryStore::failing();
        let surface = MemorySurface::new("<p>x</p>");
        let start = Instant::now();

        assert!(autosave.tick(&surface, &mut store, start).is_err());
        assert!(autosave.last_saved().is_none());
        // The browser polls at a tenth of the period; these must not retry.
        for ms in [500, 1000, 4999] {
            let now = start + Duration::from_millis(ms);
            assert!(!autosave.is_due(now));
            assert!(!autosave.tick(&surface, &mut store, now).unwrap());
        }
        assert!(autosave.is_due(start + Duration::from_millis(5000)));
        assert!(
            autosave
                .tick(&surface, &mut store, start + Duration::from_millis(5000))
                .is_err()
        );
    }
}
