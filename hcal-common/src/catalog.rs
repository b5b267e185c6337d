//! Audio catalog
//!
//! Fixed, read-only universe of recommendable entries. Built once at
//! startup; nothing here mutates after construction.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use crate::models::{AudioEntry, AudioType, Chakra};
use crate::{Error, Result};

/// Immutable catalog of healing audio entries in declaration order
#[derive(Debug, Clone)]
pub struct AudioCatalog {
    entries: Vec<AudioEntry>,
    /// id -> position in `entries`
    index: HashMap<String, usize>,
}

impl AudioCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(entries: Vec<AudioEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), pos).is_some() {
                return Err(Error::Catalog(format!("Duplicate audio id: {}", entry.id)));
            }
        }
        Ok(Self { entries, index })
    }

    /// Full catalog in declaration order
    pub fn all(&self) -> &[AudioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unknown ids yield `None`
    pub fn get_by_id(&self, id: &str) -> Option<&AudioEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn get_by_type(&self, audio_type: AudioType) -> Vec<&AudioEntry> {
        self.entries
            .iter()
            .filter(|e| e.audio_type == audio_type)
            .collect()
    }

    pub fn get_by_chakra(&self, chakra: Chakra) -> Vec<&AudioEntry> {
        self.entries
            .iter()
            .filter(|e| e.chakra_alignment == Some(chakra))
            .collect()
    }

    /// Case-insensitive substring search over name, description and benefits
    ///
    /// The empty query is a substring of every field, so it returns the
    /// whole catalog.
    pub fn search(&self, query: &str) -> Vec<&AudioEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
                    || e.benefits.iter().any(|b| b.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// `count` distinct entries drawn by shuffling and taking a prefix
    ///
    /// Asking for more than the catalog holds returns every entry.
    pub fn random_sample(&self, count: usize) -> Vec<&AudioEntry> {
        self.random_sample_with(count, &mut rand::thread_rng())
    }

    pub fn random_sample_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&AudioEntry> {
        let mut shuffled: Vec<&AudioEntry> = self.entries.iter().collect();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        shuffled
    }
}
