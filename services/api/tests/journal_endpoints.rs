//! End-to-end checks of the journal endpoints, calling the axum handlers
//! directly against an in-memory or file-backed store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use api_lib::adapters::{JsonFileStorage, LocalInsightAdapter, MemoryStorage};
use api_lib::config::Config;
use api_lib::web::protocol::{CreateEntryRequest, SetLocaleRequest, TimelineQuery, UpdateViewRequest};
use api_lib::web::rest::{
    create_entry_handler, delete_entry_handler, export_handler, frequency_handler,
    get_view_handler, import_handler, insight_handler, list_entries_handler, set_locale_handler,
    timeline_handler, update_view_handler,
};
use api_lib::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::FixedOffset;
use moodmorph_core::ports::{KeyValueStorage, PortError, PortResult};
use moodmorph_core::{Emotion, Locale, TimeRange, STORAGE_KEY};
use tempfile::TempDir;

fn config(locale: Locale) -> Config {
    Config {
        bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        data_dir: PathBuf::from("unused"),
        log_level: tracing::Level::DEBUG,
        default_locale: locale,
        cors_origin: "http://localhost:5173".to_string(),
        persian_utc_offset: FixedOffset::east_opt(3 * 3600 + 1800).unwrap(),
    }
}

fn state_with(storage: Arc<dyn KeyValueStorage>, locale: Locale) -> Arc<AppState> {
    Arc::new(AppState::new(
        &config(locale),
        storage,
        Arc::new(LocalInsightAdapter::new()),
    ))
}

fn memory_state(locale: Locale) -> Arc<AppState> {
    state_with(Arc::new(MemoryStorage::new()), locale)
}

fn draft(action: &str, emotion: Emotion, intensity: i64) -> CreateEntryRequest {
    CreateEntryRequest {
        action: action.to_string(),
        emotion,
        reaction: "took a walk".to_string(),
        result: "calmed down".to_string(),
        intensity,
    }
}

async fn create(state: &Arc<AppState>, action: &str, emotion: Emotion, intensity: i64) -> StatusCode {
    match create_entry_handler(State(state.clone()), Json(draft(action, emotion, intensity))).await {
        Ok(response) => response.into_response().status(),
        Err((status, _)) => status,
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const BACKUP: &str = r#"[
    {"id":"imp-1","date":"2023-01-10T08:00:00.000Z","action":"Exam results",
     "emotion":"Anxious","reaction":"checked twice","result":"passed","intensity":9},
    {"id":"imp-2","date":"2023-01-11T08:00:00.000Z","action":"Coffee with Ali",
     "emotion":"Happy","reaction":"laughed","result":"good mood","intensity":4}
]"#;

#[tokio::test]
async fn create_list_and_delete_entries() {
    let state = memory_state(Locale::En);

    assert_eq!(create(&state, "Traffic jam", Emotion::Angry, 12).await, StatusCode::CREATED);
    assert_eq!(create(&state, "Sunny morning", Emotion::Happy, 3).await, StatusCode::CREATED);

    let listed = list_entries_handler(State(state.clone())).await.0;
    assert_eq!(listed.total, 2);
    assert_eq!(listed.visible, 2);
    let angry = listed
        .entries
        .iter()
        .find(|e| e.action == "Traffic jam")
        .unwrap();
    assert_eq!(angry.intensity, 10);
    assert_eq!(angry.emotion, "Angry");

    let id = angry.id.clone();
    let first = delete_entry_handler(State(state.clone()), Path(id.clone())).await;
    assert_eq!(first.unwrap(), StatusCode::NO_CONTENT);
    let second = delete_entry_handler(State(state.clone()), Path(id)).await;
    assert_eq!(second.unwrap(), StatusCode::NO_CONTENT);

    assert_eq!(list_entries_handler(State(state)).await.0.total, 1);
}

#[tokio::test]
async fn blank_action_is_rejected() {
    let state = memory_state(Locale::En);
    assert_eq!(create(&state, "   ", Emotion::Sad, 5).await, StatusCode::BAD_REQUEST);
    assert_eq!(list_entries_handler(State(state)).await.0.total, 0);
}

#[tokio::test]
async fn search_filters_by_localized_label() {
    let state = memory_state(Locale::Fa);
    create(&state, "Traffic jam", Emotion::Angry, 6).await;
    create(&state, "Sunny morning", Emotion::Happy, 3).await;

    let view = update_view_handler(
        State(state.clone()),
        Json(UpdateViewRequest {
            query: Some("عصبانی".to_string()),
            date: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(view.0.query, "عصبانی");

    let listed = list_entries_handler(State(state)).await.0;
    assert_eq!(listed.visible, 1);
    assert_eq!(listed.total, 2);
    assert_eq!(listed.entries[0].action, "Traffic jam");
}

#[tokio::test]
async fn locale_switch_clears_selected_day() {
    let state = memory_state(Locale::En);
    update_view_handler(
        State(state.clone()),
        Json(UpdateViewRequest {
            query: Some("walk".to_string()),
            date: Some("2024-05-01".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(
        get_view_handler(State(state.clone())).await.0.date.as_deref(),
        Some("2024-05-01")
    );

    let view = set_locale_handler(
        State(state.clone()),
        Json(SetLocaleRequest { locale: Locale::Fa }),
    )
    .await
    .0;
    assert_eq!(view.locale, "fa");
    assert_eq!(view.date, None);
    assert_eq!(view.query, "walk");
}

#[tokio::test]
async fn invalid_day_is_a_bad_request() {
    let state = memory_state(Locale::En);
    let result = update_view_handler(
        State(state),
        Json(UpdateViewRequest {
            query: None,
            date: Some("2024-02-30".to_string()),
        }),
    )
    .await;
    let (status, body) = result.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.0.error, "The selected date is not valid.");
}

#[tokio::test]
async fn import_merges_once_and_reports_no_new_items() {
    let state = memory_state(Locale::En);

    let first = import_handler(State(state.clone()), BACKUP.to_string())
        .await
        .unwrap()
        .0;
    assert_eq!(first.merged, 2);
    assert_eq!(first.message, "2 entries imported successfully.");

    let second = import_handler(State(state.clone()), BACKUP.to_string())
        .await
        .unwrap()
        .0;
    assert_eq!(second.merged, 0);
    assert_eq!(second.message, "No new entries found in the file.");

    assert_eq!(list_entries_handler(State(state)).await.0.total, 2);
}

#[tokio::test]
async fn malformed_import_leaves_store_untouched() {
    let state = memory_state(Locale::Fa);
    create(&state, "Traffic jam", Emotion::Angry, 6).await;

    for payload in [r#"{"id":"x"}"#, "not json at all"] {
        let (status, body) = import_handler(State(state.clone()), payload.to_string())
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "فایل حاوی داده‌های معتبر نیست.");
    }
    assert_eq!(list_entries_handler(State(state)).await.0.total, 1);
}

#[tokio::test]
async fn export_is_a_dated_pretty_json_attachment() {
    let state = memory_state(Locale::En);
    import_handler(State(state.clone()), BACKUP.to_string())
        .await
        .unwrap();

    let response = export_handler(State(state)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"moodmorph_backup_"));

    let body = body_string(response).await;
    assert!(body.contains("\n  {"));
    let reparsed = moodmorph_core::parse_import(&body).unwrap();
    assert_eq!(reparsed.len(), 2);
}

#[tokio::test]
async fn stats_cover_whole_journal() {
    let state = memory_state(Locale::En);
    import_handler(State(state.clone()), BACKUP.to_string())
        .await
        .unwrap();
    create(&state, "Late bus", Emotion::Anxious, 5).await;

    let frequency = frequency_handler(State(state.clone())).await.0;
    let total: usize = frequency.iter().map(|f| f.value).sum();
    assert_eq!(total, 3);
    assert_eq!(frequency[0].name, "Anxious");
    assert_eq!(frequency[0].value, 2);

    // Only the entry created just now falls inside the last 7 days.
    let week = timeline_handler(State(state.clone()), Query(TimelineQuery::default()))
        .await
        .0;
    assert_eq!(week.points.len(), 1);
    assert_eq!(week.points[0].y, 3);
    assert_eq!(week.axis.len(), 8);

    let all = timeline_handler(
        State(state),
        Query(TimelineQuery {
            range: Some(TimeRange::All),
        }),
    )
    .await
    .0;
    assert_eq!(all.points.len(), 3);
}

#[tokio::test]
async fn insight_reflects_recent_entries() {
    let state = memory_state(Locale::En);
    let empty = insight_handler(State(state.clone())).await.unwrap().0;
    assert_eq!(empty.summary, "No entries to analyze yet.");
    assert!(empty.patterns.is_empty());

    create(&state, "Argument", Emotion::Sad, 8).await;
    let insight = insight_handler(State(state)).await.unwrap().0;
    assert_eq!(
        insight.patterns,
        vec![
            "Most frequent emotion: Sad".to_string(),
            "Several high intensity emotional events detected.".to_string(),
        ]
    );
}

#[tokio::test]
async fn journal_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(JsonFileStorage::new(dir.path()).unwrap());

    let state = state_with(storage.clone(), Locale::En);
    create(&state, "Finished the book", Emotion::Excited, 7).await;
    drop(state);

    let reopened = state_with(Arc::new(JsonFileStorage::new(dir.path()).unwrap()), Locale::En);
    let listed = list_entries_handler(State(reopened)).await.0;
    assert_eq!(listed.total, 1);
    assert_eq!(listed.entries[0].action, "Finished the book");
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());
}

#[tokio::test]
async fn corrupt_persisted_state_starts_empty() {
    let storage = Arc::new(MemoryStorage::with_value(STORAGE_KEY, "{{{ definitely not json"));
    let state = state_with(storage, Locale::En);
    assert_eq!(list_entries_handler(State(state)).await.0.total, 0);
}

struct UnwritableStorage;

impl KeyValueStorage for UnwritableStorage {
    fn get(&self, _key: &str) -> PortResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
        Err(PortError::Unexpected("read-only volume".to_string()))
    }
}

#[tokio::test]
async fn failed_save_is_not_visible_afterwards() {
    let state = state_with(Arc::new(UnwritableStorage), Locale::En);

    assert_eq!(
        create(&state, "Traffic jam", Emotion::Angry, 6).await,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    let (status, _) = import_handler(State(state.clone()), BACKUP.to_string())
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(list_entries_handler(State(state)).await.0.total, 0);
}
