//! Core data model
//!
//! `EmojiRecord` is one line of the Unicode emoji test data. Relationships
//! between records (groups, skin-tone variants) live in [`crate::Catalog`]
//! as indices, so records stay plain values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Skin Tone
// =============================================================================

/// Skin-tone category of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkinTone {
    Default,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 6] = [
        SkinTone::Default,
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Default => "Default",
            SkinTone::Light => "Light",
            SkinTone::MediumLight => "MediumLight",
            SkinTone::Medium => "Medium",
            SkinTone::MediumDark => "MediumDark",
            SkinTone::Dark => "Dark",
        }
    }

    /// Map a modifier descriptor from the Unicode data to a tone.
    /// Anything that is not one of the five tone names maps to `None`.
    pub fn from_modifier(modifier: &str) -> Option<Self> {
        match modifier {
            "light skin tone" => Some(SkinTone::Light),
            "medium-light skin tone" => Some(SkinTone::MediumLight),
            "medium skin tone" => Some(SkinTone::Medium),
            "medium-dark skin tone" => Some(SkinTone::MediumDark),
            "dark skin tone" => Some(SkinTone::Dark),
            _ => None,
        }
    }

    /// Swatch shown in a tone picker (the Fitzpatrick modifier glyph)
    pub fn swatch(&self) -> &'static str {
        match self {
            SkinTone::Default => "-",
            SkinTone::Light => "\u{1F3FB}",
            SkinTone::MediumLight => "\u{1F3FC}",
            SkinTone::Medium => "\u{1F3FD}",
            SkinTone::MediumDark => "\u{1F3FE}",
            SkinTone::Dark => "\u{1F3FF}",
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkinTone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| format!("unknown skin tone: {}", s))
    }
}

// =============================================================================
// Qualification Status
// =============================================================================

/// Unicode qualification status of a code point sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    FullyQualified,
    MinimallyQualified,
    Unqualified,
    Component,
    Other(String),
}

impl Status {
    pub fn parse(s: &str) -> Self {
        match s {
            "fully-qualified" => Status::FullyQualified,
            "minimally-qualified" => Status::MinimallyQualified,
            "unqualified" => Status::Unqualified,
            "component" => Status::Component,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::FullyQualified => "fully-qualified",
            Status::MinimallyQualified => "minimally-qualified",
            Status::Unqualified => "unqualified",
            Status::Component => "component",
            Status::Other(s) => s,
        }
    }
}

// =============================================================================
// Emoji Record
// =============================================================================

/// One emoji of the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// Stable identifier derived from the title (see [`slug`])
    pub id: String,
    /// The emoji itself
    pub glyph: String,
    /// Code points as upper-case hexadecimal strings
    pub code: Vec<String>,
    pub group: String,
    pub subgroup: String,
    pub status: Status,
    pub title: String,
    /// Descriptors after the name, e.g. "light skin tone"
    pub modifiers: Vec<String>,
    pub has_skin_tone_modifier: bool,
    /// CLDR keywords
    pub keywords: Vec<String>,
}

impl EmojiRecord {
    /// First code point, the key shared by a base and its tone variants
    pub fn leading_code(&self) -> Option<&str> {
        self.code.first().map(String::as_str)
    }
}

/// True when any modifier names a skin tone
pub fn has_skin_tone(modifiers: &[String]) -> bool {
    modifiers.iter().any(|m| m.ends_with(" skin tone"))
}

/// Identifier used in URLs: lower-cased title with every character outside
/// `[a-z0-9]` replaced by `-`.
pub fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}
