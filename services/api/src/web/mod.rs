pub mod protocol;
pub mod rest;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::web::state::AppState;

pub use rest::ApiDoc;

/// The JSON API routes, without CORS or documentation layers.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/entries",
            get(rest::list_entries_handler).post(rest::create_entry_handler),
        )
        .route("/entries/{id}", delete(rest::delete_entry_handler))
        .route(
            "/view",
            get(rest::get_view_handler).put(rest::update_view_handler),
        )
        .route("/view/locale", put(rest::set_locale_handler))
        .route("/import", post(rest::import_handler))
        .route("/export", get(rest::export_handler))
        .route("/stats/frequency", get(rest::frequency_handler))
        .route("/stats/timeline", get(rest::timeline_handler))
        .route("/stats/daily", get(rest::daily_handler))
        .route("/insight", post(rest::insight_handler))
        .route("/health", get(rest::health_handler))
        .with_state(app_state)
}
