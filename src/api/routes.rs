//! API route definitions

use super::channel_handlers;
use super::handlers::{self, ApiState};
use super::note_handlers;
use super::user_handlers;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    let cors = build_cors(&state.allowed_origins);

    let api = Router::new()
        .route("/ping", get(handlers::ping))
        // ====================================================================
        // Notes
        // ====================================================================
        .route(
            "/notes",
            get(note_handlers::search_notes).post(note_handlers::create_note),
        )
        .route(
            "/notes/{note_id}",
            get(note_handlers::get_note)
                .put(note_handlers::update_note)
                .delete(note_handlers::delete_note),
        )
        .route("/notes/{note_id}/history", get(note_handlers::get_history))
        .route("/notes/{note_id}/repair", post(note_handlers::repair_note))
        // ====================================================================
        // Users and channels
        // ====================================================================
        .route(
            "/users",
            get(user_handlers::list_users).post(user_handlers::create_user),
        )
        .route("/me/settings", put(user_handlers::update_settings))
        .route("/channels", get(channel_handlers::list_channels));

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let list: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o.trim_end_matches('/')) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(list))
}
