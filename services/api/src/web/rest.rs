//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use moodmorph_core::{
    daily_summary, export_file_name, export_json, frequency_by_emotion, parse_import,
    sort_newest_first, timeline, JournalEntry, Message, NewEntry,
};
use tracing::{error, info, warn};
use utoipa::OpenApi;

use crate::web::protocol::{
    CreateEntryRequest, DailyMoodResponse, EntryListResponse, EntryResponse, ErrorResponse,
    FrequencyItem, ImportResponse, InsightPayload, SetLocaleRequest, TimelinePointResponse,
    TimelineQuery, TimelineResponse, UpdateViewRequest, ViewResponse,
};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_entries_handler,
        create_entry_handler,
        delete_entry_handler,
        get_view_handler,
        update_view_handler,
        set_locale_handler,
        import_handler,
        export_handler,
        frequency_handler,
        timeline_handler,
        daily_handler,
        insight_handler,
        health_handler,
    ),
    components(
        schemas(
            CreateEntryRequest, EntryResponse, EntryListResponse, ViewResponse,
            UpdateViewRequest, SetLocaleRequest, ImportResponse, FrequencyItem,
            TimelinePointResponse, TimelineResponse, DailyMoodResponse, InsightPayload,
            ErrorResponse
        )
    ),
    tags(
        (name = "MoodMorph API", description = "Mood journal entries, filtering, statistics and local insights.")
    )
)]
pub struct ApiDoc;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn failure(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn persist_failure(e: impl std::fmt::Debug) -> HandlerError {
    error!("Failed to persist entries: {:?}", e);
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save journal")
}

//=========================================================================================
// Entries
//=========================================================================================

/// List the entries visible under the active view, most recent first.
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "Visible entries", body = EntryListResponse)
    )
)]
pub async fn list_entries_handler(State(app_state): State<Arc<AppState>>) -> Json<EntryListResponse> {
    let view = app_state.view.read().await.clone();
    let store = app_state.store.lock().await;

    let mut visible = view.apply(store.entries(), &app_state.calendars);
    sort_newest_first(&mut visible);

    Json(EntryListResponse {
        entries: visible
            .iter()
            .map(|e| EntryResponse::from_entry(e, view.locale))
            .collect(),
        visible: visible.len(),
        total: store.len(),
        view: ViewResponse::from(&view),
    })
}

/// Record a new entry.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "The trigger description is empty", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if request.action.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "action must not be empty"));
    }

    let locale = app_state.locale().await;
    let entry = JournalEntry::create(NewEntry::from(request), Utc::now());
    let response = EntryResponse::from_entry(&entry, locale);

    app_state
        .store
        .lock()
        .await
        .add(entry)
        .map_err(persist_failure)?;
    info!("Created entry {}", response.id);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete an entry. Unknown ids are accepted.
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    params(("id" = String, Path, description = "The entry id")),
    responses(
        (status = 204, description = "Entry removed or never existed"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    let removed = app_state
        .store
        .lock()
        .await
        .remove(&id)
        .map_err(persist_failure)?;
    if removed {
        info!("Deleted entry {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// View (search, date filter, locale)
//=========================================================================================

#[utoipa::path(
    get,
    path = "/view",
    responses((status = 200, description = "The active view", body = ViewResponse))
)]
pub async fn get_view_handler(State(app_state): State<Arc<AppState>>) -> Json<ViewResponse> {
    Json(ViewResponse::from(&*app_state.view.read().await))
}

/// Update the search text and/or the selected day.
#[utoipa::path(
    put,
    path = "/view",
    request_body = UpdateViewRequest,
    responses(
        (status = 200, description = "The updated view", body = ViewResponse),
        (status = 400, description = "The day is not valid in the active calendar", body = ErrorResponse)
    )
)]
pub async fn update_view_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<UpdateViewRequest>,
) -> Result<Json<ViewResponse>, HandlerError> {
    let mut view = app_state.view.write().await;

    if let Some(date) = request.date.as_deref() {
        if date.trim().is_empty() {
            view.clear_date();
        } else {
            view.set_date(date, &app_state.calendars).map_err(|e| {
                warn!("Rejected date filter: {}", e);
                failure(StatusCode::BAD_REQUEST, Message::InvalidDate.render(e.locale))
            })?;
        }
    }
    if let Some(query) = request.query {
        view.set_query(query);
    }

    Ok(Json(ViewResponse::from(&*view)))
}

/// Switch the active locale. Any selected day is cleared.
#[utoipa::path(
    put,
    path = "/view/locale",
    request_body = SetLocaleRequest,
    responses((status = 200, description = "The updated view", body = ViewResponse))
)]
pub async fn set_locale_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SetLocaleRequest>,
) -> Json<ViewResponse> {
    let mut view = app_state.view.write().await;
    view.set_locale(request.locale);
    info!("Active locale is now {}", view.locale.code());
    Json(ViewResponse::from(&*view))
}

//=========================================================================================
// Import / Export
//=========================================================================================

/// Merge a backup file into the journal. Entries whose id already exists are skipped.
#[utoipa::path(
    post,
    path = "/import",
    request_body(content = String, content_type = "application/json", description = "A JSON array of entries."),
    responses(
        (status = 200, description = "Import finished", body = ImportResponse),
        (status = 400, description = "The payload is not a valid backup", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn import_handler(
    State(app_state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportResponse>, HandlerError> {
    let locale = app_state.locale().await;

    let imported = parse_import(&body).map_err(|e| {
        warn!("Rejected import: {}", e);
        failure(StatusCode::BAD_REQUEST, Message::InvalidData.render(locale))
    })?;

    let merged = app_state
        .store
        .lock()
        .await
        .merge(imported)
        .map_err(persist_failure)?;

    let message = if merged > 0 {
        Message::DataImported(merged)
    } else {
        Message::ImportNoNew
    };
    Ok(Json(ImportResponse {
        merged,
        message: message.render(locale),
    }))
}

/// Download the full journal as a pretty-printed JSON file.
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "Backup file", content_type = "application/json", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn export_handler(State(app_state): State<Arc<AppState>>) -> Result<Response, HandlerError> {
    let json = {
        let store = app_state.store.lock().await;
        export_json(store.entries()).map_err(|e| {
            error!("Failed to encode export: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export journal")
        })?
    };

    let file_name = export_file_name(Utc::now().date_naive());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| {
            error!("Invalid export file name {}: {:?}", file_name, e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export journal")
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        json,
    )
        .into_response())
}

//=========================================================================================
// Statistics
//=========================================================================================

/// How often each emotion occurs across the whole journal.
#[utoipa::path(
    get,
    path = "/stats/frequency",
    responses((status = 200, description = "Counts per emotion", body = [FrequencyItem]))
)]
pub async fn frequency_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<FrequencyItem>> {
    let locale = app_state.locale().await;
    let store = app_state.store.lock().await;
    Json(
        frequency_by_emotion(store.entries(), locale)
            .into_iter()
            .map(FrequencyItem::from)
            .collect(),
    )
}

/// Scatter points of entries within the chosen time range.
#[utoipa::path(
    get,
    path = "/stats/timeline",
    params(TimelineQuery),
    responses((status = 200, description = "Timeline points", body = TimelineResponse))
)]
pub async fn timeline_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<TimelineQuery>,
) -> Json<TimelineResponse> {
    let locale = app_state.locale().await;
    let store = app_state.store.lock().await;
    let points = timeline(store.entries(), query.range.unwrap_or_default(), Utc::now());
    Json(TimelineResponse {
        points: points
            .iter()
            .map(|p| TimelinePointResponse::from_point(p, locale))
            .collect(),
        axis: TimelineResponse::axis_labels(locale),
    })
}

/// Entry count and average intensity per day of the active calendar.
#[utoipa::path(
    get,
    path = "/stats/daily",
    responses((status = 200, description = "Per-day summary", body = [DailyMoodResponse]))
)]
pub async fn daily_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<DailyMoodResponse>> {
    let locale = app_state.locale().await;
    let store = app_state.store.lock().await;
    Json(
        daily_summary(store.entries(), app_state.calendars.for_locale(locale))
            .into_iter()
            .map(DailyMoodResponse::from)
            .collect(),
    )
}

//=========================================================================================
// Insight
//=========================================================================================

/// Summarize the most recently added entries.
#[utoipa::path(
    post,
    path = "/insight",
    responses(
        (status = 200, description = "Insight for the active locale", body = InsightPayload),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn insight_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<InsightPayload>, HandlerError> {
    let locale = app_state.locale().await;
    // Snapshot so the store is not held across the analysis call.
    let entries = app_state.store.lock().await.entries().to_vec();

    let insight = app_state
        .insight
        .analyze(&entries, locale)
        .await
        .map_err(|e| {
            error!("Insight generation failed: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze journal")
        })?;
    Ok(Json(InsightPayload::from(insight)))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}
