//! # HCAL Common Library
//!
//! Shared code for the healing calendar services:
//! - Audio entry and recommendation context models
//! - Immutable audio catalog and context lookup tables
//! - Library loading (embedded or external TOML)
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod mappings;
pub mod models;

pub use catalog::AudioCatalog;
pub use error::{Error, Result};
pub use library::HealingLibrary;
pub use mappings::{Dimension, MappingTables};
pub use models::{AudioEntry, AudioType, Chakra, Experience, RecommendationContext, TimeOfDay};
