//! crates/moodmorph_core/src/domain.rs
//!
//! Defines the core data structures for the journal: entries, emotion
//! categories, locales and the derived insight response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// The closed set of emotion categories an entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Emotion {
    Angry,
    Happy,
    Sad,
    Anxious,
    Frustrated,
    Excited,
    #[default]
    Neutral,
    Surprised,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Angry,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Frustrated,
        Emotion::Excited,
        Emotion::Neutral,
        Emotion::Surprised,
    ];

    /// The internal category key, as stored in the persisted blob.
    pub fn key(self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Anxious => "Anxious",
            Emotion::Frustrated => "Frustrated",
            Emotion::Excited => "Excited",
            Emotion::Neutral => "Neutral",
            Emotion::Surprised => "Surprised",
        }
    }

    /// The display label for this category in the given locale.
    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.key(),
            Locale::Fa => match self {
                Emotion::Angry => "عصبانی",
                Emotion::Happy => "خوشحال",
                Emotion::Sad => "غمگین",
                Emotion::Anxious => "مضطرب",
                Emotion::Frustrated => "کلافه",
                Emotion::Excited => "هیجان‌زده",
                Emotion::Neutral => "خنثی",
                Emotion::Surprised => "متعجب",
            },
        }
    }
}

/// The supported UI locales. Each one selects its own calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Fa,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fa" => Ok(Locale::Fa),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

/// A single trigger -> reaction -> outcome record. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub action: String,
    pub emotion: Emotion,
    pub reaction: String,
    pub result: String,
    #[serde(deserialize_with = "deserialize_intensity")]
    pub intensity: u8,
}

/// The fields supplied by the entry-creation flow.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub action: String,
    #[serde(default)]
    pub emotion: Emotion,
    #[serde(default)]
    pub reaction: String,
    #[serde(default)]
    pub result: String,
    #[serde(default = "default_intensity")]
    pub intensity: i64,
}

impl JournalEntry {
    /// Builds a complete entry from a draft, assigning a fresh id and the
    /// creation instant.
    pub fn create(draft: NewEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: now,
            action: draft.action,
            emotion: draft.emotion,
            reaction: draft.reaction,
            result: draft.result,
            intensity: clamp_intensity(draft.intensity),
        }
    }
}

/// The derived, non-persisted output of the insight generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightResponse {
    pub summary: String,
    pub patterns: Vec<String>,
    pub advice: String,
}

pub fn clamp_intensity(value: i64) -> u8 {
    value.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as u8
}

fn default_intensity() -> i64 {
    5
}

// Slider values may arrive as floats in hand-edited backups.
fn deserialize_intensity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("intensity must be a finite number"));
    }
    Ok(clamp_intensity(raw.round() as i64))
}
