//! Healing audio data model
//!
//! Serialized field names follow the calendar front end's JSON shape:
//! camelCase fields, snake_case audio types, camelCase chakra names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Kind of healing audio asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioType {
    Frequency,
    Nature,
    CrystalBowl,
    Binaural,
    Ambient,
}

impl AudioType {
    pub const ALL: [AudioType; 5] = [
        AudioType::Frequency,
        AudioType::Nature,
        AudioType::CrystalBowl,
        AudioType::Binaural,
        AudioType::Ambient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioType::Frequency => "frequency",
            AudioType::Nature => "nature",
            AudioType::CrystalBowl => "crystal_bowl",
            AudioType::Binaural => "binaural",
            AudioType::Ambient => "ambient",
        }
    }
}

/// One of the seven energy centers an entry can be aligned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Chakra {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl Chakra {
    pub const ALL: [Chakra; 7] = [
        Chakra::Root,
        Chakra::Sacral,
        Chakra::SolarPlexus,
        Chakra::Heart,
        Chakra::Throat,
        Chakra::ThirdEye,
        Chakra::Crown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chakra::Root => "root",
            Chakra::Sacral => "sacral",
            Chakra::SolarPlexus => "solarPlexus",
            Chakra::Heart => "heart",
            Chakra::Throat => "throat",
            Chakra::ThirdEye => "thirdEye",
            Chakra::Crown => "crown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub const ALL: [Experience; 3] = [
        Experience::Beginner,
        Experience::Intermediate,
        Experience::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }
}

// Display/FromStr for the closed enumerations share one shape: the canonical
// wire name is the only accepted spelling.
macro_rules! wire_name_impls {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| Error::InvalidInput(format!("Unknown {}: {}", $label, s)))
            }
        }
    };
}

wire_name_impls!(AudioType, "audio type");
wire_name_impls!(Chakra, "chakra");
wire_name_impls!(TimeOfDay, "time of day");
wire_name_impls!(Experience, "experience level");

/// A recommendable healing-audio asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioEntry {
    /// Stable primary key, never reused
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub audio_type: AudioType,

    pub description: String,

    /// Tone label such as "528 Hz" (tonal entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_label: Option<String>,

    /// Display label only, never parsed
    pub duration: String,

    /// Display order matters to the UI; matching ignores it
    #[serde(default)]
    pub benefits: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chakra_alignment: Option<Chakra>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
}

/// Caller-built recommendation query
///
/// Every field is optional. `duration` and `intention` are accepted and
/// carried through but do not take part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meditation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chakra_focus: Option<Chakra>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intention: Option<String>,
}

impl RecommendationContext {
    /// True when none of the five matching dimensions is set
    pub fn is_empty(&self) -> bool {
        self.meditation_type.is_none()
            && self.chakra_focus.is_none()
            && self.emotional_state.is_none()
            && self.time_of_day.is_none()
            && self.experience.is_none()
    }
}
