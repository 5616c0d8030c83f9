//! crates/moodmorph_core/src/aggregate.rs
//!
//! Chart-ready summaries derived from the entry collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarAdapter;
use crate::domain::{Emotion, JournalEntry, Locale};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionFrequency {
    pub name: String,
    pub value: usize,
}

/// Occurrences per emotion with localized names, in order of first occurrence.
/// Categories that never occur are omitted.
pub fn frequency_by_emotion(entries: &[JournalEntry], locale: Locale) -> Vec<EmotionFrequency> {
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(emotion, _)| *emotion == entry.emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.emotion, 1)),
        }
    }
    counts
        .into_iter()
        .map(|(emotion, value)| EmotionFrequency {
            name: emotion.label(locale).to_string(),
            value,
        })
        .collect()
}

//=========================================================================================
// Timeline
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    #[default]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => Some(now - Duration::days(30)),
            TimeRange::All => None,
        }
    }
}

/// Vertical placement of each emotion on the timeline chart.
///
/// The order runs from Angry to Happy. It is a presentation choice for the
/// chart axis and carries no weight anywhere else.
pub fn emotion_ordinal(emotion: Emotion) -> u8 {
    match emotion {
        Emotion::Angry => 0,
        Emotion::Sad => 1,
        Emotion::Frustrated => 2,
        Emotion::Anxious => 3,
        Emotion::Neutral => 4,
        Emotion::Surprised => 5,
        Emotion::Excited => 6,
        Emotion::Happy => 7,
    }
}

/// Axis label for an ordinal value, empty when out of range.
pub fn ordinal_label(value: u8, locale: Locale) -> &'static str {
    Emotion::ALL
        .iter()
        .find(|e| emotion_ordinal(**e) == value)
        .map(|e| e.label(locale))
        .unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint<'a> {
    /// Milliseconds since the Unix epoch.
    pub x: i64,
    pub y: u8,
    pub entry: &'a JournalEntry,
}

/// Scatter points for entries strictly after the range cutoff.
pub fn timeline(entries: &[JournalEntry], range: TimeRange, now: DateTime<Utc>) -> Vec<TimelinePoint<'_>> {
    let cutoff = range.cutoff(now);
    entries
        .iter()
        .filter(|e| cutoff.map_or(true, |c| e.date > c))
        .map(|entry| TimelinePoint {
            x: entry.date.timestamp_millis(),
            y: emotion_ordinal(entry.emotion),
            entry,
        })
        .collect()
}

//=========================================================================================
// Daily summary
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMood {
    pub date: String,
    pub count: usize,
    pub avg_intensity: f64,
}

/// Entry count and mean intensity per calendar day, ordered by day.
pub fn daily_summary(entries: &[JournalEntry], calendar: &dyn CalendarAdapter) -> Vec<DailyMood> {
    let mut days: BTreeMap<String, (usize, u32)> = BTreeMap::new();
    for entry in entries {
        let slot = days.entry(calendar.day_string(entry.date)).or_insert((0, 0));
        slot.0 += 1;
        slot.1 += entry.intensity as u32;
    }
    days.into_iter()
        .map(|(date, (count, total))| DailyMood {
            date,
            count,
            avg_intensity: total as f64 / count as f64,
        })
        .collect()
}
