//! Healing library loading
//!
//! The catalog and its mapping tables travel together in one TOML document.
//! A copy is embedded in the binary; deployments may point at their own file.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::catalog::AudioCatalog;
use crate::mappings::{Dimension, MappingTables};
use crate::models::AudioEntry;
use crate::{Error, Result};

const BUILTIN_LIBRARY: &str = include_str!("../data/library.toml");

/// On-disk shape of a library document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryFile {
    #[serde(default)]
    entries: Vec<AudioEntry>,
    #[serde(default)]
    mappings: MappingTables,
}

/// A mapping table row whose id the catalog does not contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub dimension: Dimension,
    pub key: String,
    pub id: String,
}

/// Catalog plus mapping tables, immutable once loaded
#[derive(Debug, Clone)]
pub struct HealingLibrary {
    catalog: AudioCatalog,
    mappings: MappingTables,
}

impl HealingLibrary {
    /// Assemble a library from parts, validating both
    pub fn new(catalog: AudioCatalog, mappings: MappingTables) -> Result<Self> {
        mappings.validate()?;
        let library = Self { catalog, mappings };

        for dangling in library.dangling_references() {
            warn!(
                dimension = %dangling.dimension,
                key = %dangling.key,
                id = %dangling.id,
                "Mapping references unknown audio id; it will be skipped"
            );
        }

        Ok(library)
    }

    /// The library compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_LIBRARY)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: LibraryFile = toml::from_str(source)
            .map_err(|e| Error::Catalog(format!("Failed to parse library TOML: {}", e)))?;

        let catalog = AudioCatalog::new(file.entries)?;
        debug!(entries = catalog.len(), "Parsed healing library");
        Self::new(catalog, file.mappings)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read library file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn catalog(&self) -> &AudioCatalog {
        &self.catalog
    }

    pub fn mappings(&self) -> &MappingTables {
        &self.mappings
    }

    /// Mapping rows that point at ids missing from the catalog
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.mappings
            .rows()
            .filter(|(_, _, id)| self.catalog.get_by_id(id).is_none())
            .map(|(dimension, key, id)| DanglingReference {
                dimension,
                key: key.to_string(),
                id: id.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AudioType, Chakra};
    use std::collections::HashSet;

    const SMALL_LIBRARY: &str = r#"
[[entries]]
id = "tone"
name = "Heart Tone"
type = "frequency"
description = "A tone"
frequencyLabel = "639 Hz"
duration = "10 min"
benefits = ["Love"]
chakraAlignment = "heart"

[[entries]]
id = "rain"
name = "Rain"
type = "nature"
description = "Rainfall"
duration = "30 min"

[mappings.chakraFocus]
heart = ["tone", "rain", "ghost"]

[mappings.emotionalState]
stressed = ["rain"]
"#;

    #[test]
    fn test_builtin_library_loads() {
        let library = HealingLibrary::builtin().expect("embedded library should parse");
        assert!(library.catalog().len() >= 15);

        // Every audio type is represented
        for audio_type in AudioType::ALL {
            assert!(
                !library.catalog().get_by_type(audio_type).is_empty(),
                "no {} entries",
                audio_type
            );
        }
    }

    #[test]
    fn test_builtin_library_has_no_dangling_references() {
        let library = HealingLibrary::builtin().unwrap();
        let dangling = library.dangling_references();
        assert!(dangling.is_empty(), "dangling references: {:?}", dangling);
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let library = HealingLibrary::builtin().unwrap();
        let ids: HashSet<&str> = library.catalog().all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), library.catalog().len());
    }

    #[test]
    fn test_from_toml_str_parses_entries_and_mappings() {
        let library = HealingLibrary::from_toml_str(SMALL_LIBRARY).unwrap();

        let tone = library.catalog().get_by_id("tone").unwrap();
        assert_eq!(tone.frequency_label.as_deref(), Some("639 Hz"));
        assert_eq!(tone.chakra_alignment, Some(Chakra::Heart));

        let rain = library.catalog().get_by_id("rain").unwrap();
        assert!(rain.benefits.is_empty());
        assert!(rain.chakra_alignment.is_none());

        assert_eq!(library.mappings().lookup(Dimension::EmotionalState, "stressed"), ["rain".to_string()]);
    }

    #[test]
    fn test_dangling_reference_reported() {
        let library = HealingLibrary::from_toml_str(SMALL_LIBRARY).unwrap();
        assert_eq!(
            library.dangling_references(),
            vec![DanglingReference {
                dimension: Dimension::ChakraFocus,
                key: "heart".to_string(),
                id: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_id_fails_load() {
        let source = r#"
[[entries]]
id = "rain"
name = "Rain"
type = "nature"
description = "Rainfall"
duration = "30 min"

[[entries]]
id = "rain"
name = "Rain Again"
type = "nature"
description = "Duplicate"
duration = "5 min"
"#;
        assert!(matches!(HealingLibrary::from_toml_str(source), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_invalid_enum_key_fails_load() {
        let source = r#"
[mappings.timeOfDay]
midnight = []
"#;
        let err = HealingLibrary::from_toml_str(source).unwrap_err();
        assert!(err.to_string().contains("timeOfDay"));
    }

    #[test]
    fn test_unknown_audio_type_fails_load() {
        let source = r#"
[[entries]]
id = "x"
name = "X"
type = "podcast"
description = "Not healing"
duration = "1 h"
"#;
        assert!(matches!(HealingLibrary::from_toml_str(source), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = HealingLibrary::from_path(Path::new("/nonexistent/hcal/library.toml"));
        assert!(matches!(result, Err(Error::Catalog(_))));
    }
}
