//! KEDB: the Knowledge Error Database.
//!
//! An in-memory catalogue of known error signatures, loaded once from a
//! JSON file and read-only during operation. A missing or unreadable
//! file degrades to an empty catalogue: no self-heals are possible until
//! it is corrected, but the system stays up (every match becomes a
//! ticket).

use crate::data_model::KedbEntry;
use crate::error::RemedyError;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KedbEntry>,
}

impl KnowledgeBase {
    /// Build a catalogue from records, keeping load order. Negative
    /// hours-saved values are clamped to zero; duplicate match keys are
    /// tolerated (the matcher resolves them first-wins).
    pub fn new(mut entries: Vec<KedbEntry>) -> Self {
        for entry in &mut entries {
            if entry.hours_saved < 0.0 {
                entry.hours_saved = 0.0;
            }
        }
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the catalogue from a JSON file, degrading to empty on any
    /// failure. This is the only loader the application should use.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(kb) => {
                tracing::info!(path = %path.display(), entries = kb.len(), "KEDB loaded");
                kb
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "KEDB unavailable, starting empty");
                Self::empty()
            }
        }
    }

    /// Strict loader: surfaces the failure instead of degrading.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, RemedyError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RemedyError::KedbLoad(e.to_string()))?;
        let entries: Vec<KedbEntry> =
            serde_json::from_str(&raw).map_err(|e| RemedyError::KedbLoad(e.to_string()))?;
        Ok(Self::new(entries))
    }

    /// Stable iteration order: the order records appeared in storage.
    pub fn entries(&self) -> &[KedbEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
