//! Recommendation engine
//!
//! Maps a [`RecommendationContext`] to a ranked, deduplicated list of at
//! most [`MAX_RECOMMENDATIONS`] catalog entries:
//!
//! 1. Gather candidates from each present dimension's lookup table
//! 2. Deduplicate by id, keeping first occurrences in place
//! 3. Score each candidate against the context
//! 4. Stable sort by score, highest first
//! 5. Truncate
//!
//! Pure per call: no I/O, no shared mutable state, never fails. An empty
//! list is the only "no match" signal.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use hcal_common::{
    AudioCatalog, AudioEntry, AudioType, Dimension, HealingLibrary, MappingTables,
    RecommendationContext,
};

/// Upper bound on returned recommendations
pub const MAX_RECOMMENDATIONS: usize = 5;

const CHAKRA_MATCH_BONUS: u32 = 10;
const FREQUENCY_BONUS: u32 = 5;
const CRYSTAL_BOWL_BONUS: u32 = 8;
const STRESSED_NATURE_BONUS: u32 = 6;
const INTUITION_BINAURAL_BONUS: u32 = 7;

/// Candidate with its priority score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredEntry<'a> {
    pub entry: &'a AudioEntry,
    pub score: u32,
}

/// Integer priority of `entry` under `context`
///
/// Rules are additive and case-sensitive:
/// - chakra focus equals the entry's alignment: +10
/// - frequency entry: +5
/// - meditation type contains "crystal", crystal bowl entry: +8
/// - emotional state is "stressed", nature entry: +6
/// - meditation type contains "intuition", binaural entry: +7
pub fn score(entry: &AudioEntry, context: &RecommendationContext) -> u32 {
    let meditation = context.meditation_type.as_deref().unwrap_or_default();
    let mut score = 0;

    if context.chakra_focus.is_some() && context.chakra_focus == entry.chakra_alignment {
        score += CHAKRA_MATCH_BONUS;
    }

    match entry.audio_type {
        AudioType::Frequency => score += FREQUENCY_BONUS,
        AudioType::CrystalBowl if meditation.contains("crystal") => score += CRYSTAL_BOWL_BONUS,
        AudioType::Nature if context.emotional_state.as_deref() == Some("stressed") => {
            score += STRESSED_NATURE_BONUS
        }
        AudioType::Binaural if meditation.contains("intuition") => {
            score += INTUITION_BINAURAL_BONUS
        }
        _ => {}
    }

    score
}

/// Stable dedup by id; the first occurrence keeps its position
fn dedup_by_id(candidates: Vec<&AudioEntry>) -> Vec<&AudioEntry> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|entry| seen.insert(entry.id.as_str()))
        .collect()
}

/// Recommendation service over a borrowed catalog and mapping tables
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    catalog: &'a AudioCatalog,
    mappings: &'a MappingTables,
}

impl<'a> Recommender<'a> {
    pub fn new(library: &'a HealingLibrary) -> Self {
        Self::from_parts(library.catalog(), library.mappings())
    }

    pub fn from_parts(catalog: &'a AudioCatalog, mappings: &'a MappingTables) -> Self {
        Self { catalog, mappings }
    }

    /// Step 1: every entry reachable from the context, duplicates included
    ///
    /// Dimensions are visited in fixed order (meditation type, chakra focus,
    /// emotional state, time of day, experience). Unmapped values and ids
    /// missing from the catalog contribute nothing.
    pub fn gather_candidates(&self, context: &RecommendationContext) -> Vec<&'a AudioEntry> {
        let mut candidates = Vec::new();

        for dimension in Dimension::ALL {
            let Some(key) = dimension.value_in(context) else {
                continue;
            };

            let ids = self.mappings.lookup(dimension, key);
            if ids.is_empty() {
                debug!(dimension = %dimension, key = %key, "No mapping for context value");
                continue;
            }

            candidates.extend(ids.iter().filter_map(|id| self.catalog.get_by_id(id)));
        }

        candidates
    }

    /// Steps 1-4: deduplicated candidates, ranked, untruncated
    pub fn scored_candidates(&self, context: &RecommendationContext) -> Vec<ScoredEntry<'a>> {
        let unique = dedup_by_id(self.gather_candidates(context));

        let mut scored: Vec<ScoredEntry<'a>> = unique
            .into_iter()
            .map(|entry| ScoredEntry {
                entry,
                score: score(entry, context),
            })
            .collect();

        // Vec::sort_by is stable: ties keep dedup order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Ranked recommendations, at most [`MAX_RECOMMENDATIONS`]
    pub fn recommend(&self, context: &RecommendationContext) -> Vec<&'a AudioEntry> {
        let scored = self.scored_candidates(context);
        let candidate_count = scored.len();

        let recommendations: Vec<&'a AudioEntry> = scored
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|s| s.entry)
            .collect();

        debug!(
            candidates = candidate_count,
            returned = recommendations.len(),
            "Computed recommendations"
        );

        recommendations
    }
}
