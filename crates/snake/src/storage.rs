//! Persistence collaborator and high-score codec.
//!
//! Storage is best-effort: a missing, unreadable or non-numeric value reads as 0,
//! and a failed write is logged and dropped.

use std::collections::HashMap;

use log::warn;

use crate::error::StorageError;

/// Synchronous key/value store, e.g. the browser's `localStorage`.
pub trait Storage {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store refuses the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store for native hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the high-score codec.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Parse a stored high score. Anything that is not a finite, non-negative number is 0.
/// Fractions are truncated.
#[must_use]
pub fn parse_high_score(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        // Float-to-int casts saturate, so huge values clamp to u32::MAX.
        Ok(v) if v.is_finite() && v >= 0.0 => v as u32,
        _ => 0,
    }
}

/// Reads and writes the single high-score key of a [`Storage`].
#[derive(Debug)]
pub struct HighScoreStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> HighScoreStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn load(&self) -> u32 {
        match self.storage.get(&self.key) {
            Ok(Some(raw)) => parse_high_score(&raw),
            Ok(None) => 0,
            Err(err) => {
                warn!("high score read failed, using 0: {err}");
                0
            }
        }
    }

    pub fn save(&mut self, score: u32) {
        if let Err(err) = self.storage.set(&self.key, &score.to_string()) {
            warn!("high score write dropped: {err}");
        }
    }
}
