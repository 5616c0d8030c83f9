//! services/api/src/web/protocol.rs
//!
//! Request and response payloads exchanged between the browser client and the
//! API server.

use chrono::{DateTime, Utc};
use moodmorph_core::aggregate::{emotion_ordinal, ordinal_label};
use moodmorph_core::{
    DailyMood, Emotion, EmotionFrequency, FilterState, InsightResponse, JournalEntry, Locale,
    NewEntry, TimeRange, TimelinePoint,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

/// A new entry as produced by the entry wizard.
#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateEntryRequest {
    pub action: String,
    #[serde(default)]
    #[schema(value_type = String, example = "Neutral")]
    pub emotion: Emotion,
    #[serde(default)]
    pub reaction: String,
    #[serde(default)]
    pub result: String,
    /// Clamped to 1..=10.
    #[serde(default = "default_intensity")]
    pub intensity: i64,
}

fn default_intensity() -> i64 {
    5
}

impl From<CreateEntryRequest> for NewEntry {
    fn from(req: CreateEntryRequest) -> Self {
        NewEntry {
            action: req.action,
            emotion: req.emotion,
            reaction: req.reaction,
            result: req.result,
            intensity: req.intensity,
        }
    }
}

/// Partial update of the active view. Absent fields are left as they are;
/// an empty `date` clears the selected day.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateViewRequest {
    pub query: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SetLocaleRequest {
    #[schema(value_type = String, example = "en")]
    pub locale: Locale,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimelineQuery {
    /// One of `7d`, `30d` or `all`. Defaults to `7d`.
    #[param(value_type = Option<String>)]
    pub range: Option<TimeRange>,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct EntryResponse {
    pub id: String,
    pub date: DateTime<Utc>,
    pub action: String,
    pub emotion: String,
    /// The emotion's label in the active locale.
    pub emotion_label: String,
    pub reaction: String,
    pub result: String,
    pub intensity: u8,
}

impl EntryResponse {
    pub fn from_entry(entry: &JournalEntry, locale: Locale) -> Self {
        Self {
            id: entry.id.clone(),
            date: entry.date,
            action: entry.action.clone(),
            emotion: entry.emotion.key().to_string(),
            emotion_label: entry.emotion.label(locale).to_string(),
            reaction: entry.reaction.clone(),
            result: entry.result.clone(),
            intensity: entry.intensity,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ViewResponse {
    pub locale: String,
    pub query: String,
    /// The selected day in the active calendar, if any.
    pub date: Option<String>,
}

impl From<&FilterState> for ViewResponse {
    fn from(state: &FilterState) -> Self {
        Self {
            locale: state.locale.code().to_string(),
            query: state.query.clone(),
            date: state.date.as_ref().map(|d| d.day.clone()),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub visible: usize,
    pub total: usize,
    pub view: ViewResponse,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ImportResponse {
    pub merged: usize,
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
pub struct FrequencyItem {
    pub name: String,
    pub value: usize,
}

impl From<EmotionFrequency> for FrequencyItem {
    fn from(f: EmotionFrequency) -> Self {
        Self {
            name: f.name,
            value: f.value,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TimelinePointResponse {
    /// Milliseconds since the Unix epoch.
    pub x: i64,
    pub y: u8,
    pub y_label: String,
    pub entry: EntryResponse,
}

impl TimelinePointResponse {
    pub fn from_point(point: &TimelinePoint<'_>, locale: Locale) -> Self {
        Self {
            x: point.x,
            y: point.y,
            y_label: ordinal_label(point.y, locale).to_string(),
            entry: EntryResponse::from_entry(point.entry, locale),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TimelineResponse {
    pub points: Vec<TimelinePointResponse>,
    /// Axis labels indexed by ordinal value.
    pub axis: Vec<String>,
}

impl TimelineResponse {
    pub fn axis_labels(locale: Locale) -> Vec<String> {
        let mut emotions = Emotion::ALL.to_vec();
        emotions.sort_by_key(|e| emotion_ordinal(*e));
        emotions
            .into_iter()
            .map(|e| e.label(locale).to_string())
            .collect()
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DailyMoodResponse {
    pub date: String,
    pub count: usize,
    pub avg_intensity: f64,
}

impl From<DailyMood> for DailyMoodResponse {
    fn from(d: DailyMood) -> Self {
        Self {
            date: d.date,
            count: d.count,
            avg_intensity: d.avg_intensity,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
pub struct InsightPayload {
    pub summary: String,
    pub patterns: Vec<String>,
    pub advice: String,
}

impl From<InsightResponse> for InsightPayload {
    fn from(r: InsightResponse) -> Self {
        Self {
            summary: r.summary,
            patterns: r.patterns,
            advice: r.advice,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
