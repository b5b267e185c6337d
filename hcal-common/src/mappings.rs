//! Context dimension lookup tables
//!
//! Five hand-authored many-to-many maps, one per context dimension, from a
//! dimension value to an ordered list of audio ids. The tables are plain
//! data loaded with the catalog; lookups of unmapped values return an
//! empty slice.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{Chakra, Experience, RecommendationContext, TimeOfDay};
use crate::{Error, Result};

/// Context dimension that owns a lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    MeditationType,
    ChakraFocus,
    EmotionalState,
    TimeOfDay,
    Experience,
}

impl Dimension {
    /// Gathering order
    pub const ALL: [Dimension; 5] = [
        Dimension::MeditationType,
        Dimension::ChakraFocus,
        Dimension::EmotionalState,
        Dimension::TimeOfDay,
        Dimension::Experience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::MeditationType => "meditationType",
            Dimension::ChakraFocus => "chakraFocus",
            Dimension::EmotionalState => "emotionalState",
            Dimension::TimeOfDay => "timeOfDay",
            Dimension::Experience => "experience",
        }
    }

    /// The context's value for this dimension, as a table key
    pub fn value_in<'a>(&self, context: &'a RecommendationContext) -> Option<&'a str> {
        match self {
            Dimension::MeditationType => context.meditation_type.as_deref(),
            Dimension::ChakraFocus => context.chakra_focus.as_ref().map(|c| c.as_str()),
            Dimension::EmotionalState => context.emotional_state.as_deref(),
            Dimension::TimeOfDay => context.time_of_day.as_ref().map(|t| t.as_str()),
            Dimension::Experience => context.experience.as_ref().map(|e| e.as_str()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five dimension tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MappingTables {
    #[serde(default)]
    meditation_type: HashMap<String, Vec<String>>,
    #[serde(default)]
    chakra_focus: HashMap<String, Vec<String>>,
    #[serde(default)]
    emotional_state: HashMap<String, Vec<String>>,
    #[serde(default)]
    time_of_day: HashMap<String, Vec<String>>,
    #[serde(default)]
    experience: HashMap<String, Vec<String>>,
}

impl MappingTables {
    /// Table for one dimension
    pub fn table(&self, dimension: Dimension) -> &HashMap<String, Vec<String>> {
        match dimension {
            Dimension::MeditationType => &self.meditation_type,
            Dimension::ChakraFocus => &self.chakra_focus,
            Dimension::EmotionalState => &self.emotional_state,
            Dimension::TimeOfDay => &self.time_of_day,
            Dimension::Experience => &self.experience,
        }
    }

    /// Ordered ids mapped under `key`; empty when unmapped
    pub fn lookup(&self, dimension: Dimension, key: &str) -> &[String] {
        self.table(dimension)
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Add or replace one table row
    pub fn insert(&mut self, dimension: Dimension, key: impl Into<String>, ids: Vec<String>) {
        let table = match dimension {
            Dimension::MeditationType => &mut self.meditation_type,
            Dimension::ChakraFocus => &mut self.chakra_focus,
            Dimension::EmotionalState => &mut self.emotional_state,
            Dimension::TimeOfDay => &mut self.time_of_day,
            Dimension::Experience => &mut self.experience,
        };
        table.insert(key.into(), ids);
    }

    /// Enum-keyed tables may only use canonical enum names as keys
    pub fn validate(&self) -> Result<()> {
        fn check<T: FromStr>(dimension: Dimension, table: &HashMap<String, Vec<String>>) -> Result<()> {
            for key in table.keys() {
                if key.parse::<T>().is_err() {
                    return Err(Error::Catalog(format!(
                        "Invalid {} mapping key: {}",
                        dimension, key
                    )));
                }
            }
            Ok(())
        }

        check::<Chakra>(Dimension::ChakraFocus, &self.chakra_focus)?;
        check::<TimeOfDay>(Dimension::TimeOfDay, &self.time_of_day)?;
        check::<Experience>(Dimension::Experience, &self.experience)?;
        Ok(())
    }

    /// Every (dimension, key, id) row, in no particular order
    pub fn rows(&self) -> impl Iterator<Item = (Dimension, &str, &str)> {
        Dimension::ALL.into_iter().flat_map(move |dimension| {
            self.table(dimension).iter().flat_map(move |(key, ids)| {
                ids.iter().map(move |id| (dimension, key.as_str(), id.as_str()))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_unmapped_value_is_empty() {
        let mut tables = MappingTables::default();
        tables.insert(Dimension::EmotionalState, "stressed", ids(&["rain", "alpha"]));

        assert_eq!(tables.lookup(Dimension::EmotionalState, "stressed"), ids(&["rain", "alpha"]).as_slice());
        assert!(tables.lookup(Dimension::EmotionalState, "elated").is_empty());
        assert!(tables.lookup(Dimension::TimeOfDay, "stressed").is_empty());
    }

    #[test]
    fn test_value_in_uses_canonical_names() {
        let ctx = RecommendationContext {
            chakra_focus: Some(Chakra::ThirdEye),
            time_of_day: Some(TimeOfDay::Night),
            meditation_type: Some("crystal_focus".to_string()),
            ..Default::default()
        };

        assert_eq!(Dimension::ChakraFocus.value_in(&ctx), Some("thirdEye"));
        assert_eq!(Dimension::TimeOfDay.value_in(&ctx), Some("night"));
        assert_eq!(Dimension::MeditationType.value_in(&ctx), Some("crystal_focus"));
        assert_eq!(Dimension::Experience.value_in(&ctx), None);
        assert_eq!(Dimension::EmotionalState.value_in(&ctx), None);
    }

    #[test]
    fn test_validate_rejects_bad_enum_keys() {
        let mut tables = MappingTables::default();
        tables.insert(Dimension::MeditationType, "anything goes", ids(&["x"]));
        tables.insert(Dimension::ChakraFocus, "heart", ids(&["x"]));
        assert!(tables.validate().is_ok());

        tables.insert(Dimension::ChakraFocus, "third_eye", ids(&["x"]));
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("chakraFocus"));
    }

    #[test]
    fn test_rows_flattens_all_tables() {
        let mut tables = MappingTables::default();
        tables.insert(Dimension::Experience, "beginner", ids(&["a", "b"]));
        tables.insert(Dimension::TimeOfDay, "night", ids(&["c"]));

        let mut rows: Vec<(Dimension, &str, &str)> = tables.rows().collect();
        rows.sort_by_key(|(_, _, id)| id.to_string());
        assert_eq!(
            rows,
            vec![
                (Dimension::Experience, "beginner", "a"),
                (Dimension::Experience, "beginner", "b"),
                (Dimension::TimeOfDay, "night", "c"),
            ]
        );
    }
}
