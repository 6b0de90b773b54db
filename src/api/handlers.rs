//! Shared API state, health endpoints and error mapping

use crate::channels::ChannelDirectory;
use crate::meilisearch::SearchStore;
use crate::notes::{NoteError, NoteManager};
use crate::postgres::RevisionStore;
use crate::users::UserManager;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the user name, set by the fronting proxy
pub const FORWARDED_USER_HEADER: &str = "x-forwarded-user";

/// Shared server state
pub struct ServerState {
    pub notes: Arc<NoteManager>,
    pub users: Arc<UserManager>,
    pub channels: Arc<dyn ChannelDirectory>,
    pub search: Arc<dyn SearchStore>,
    pub revisions: Arc<dyn RevisionStore>,
    /// Origins allowed by CORS. Empty or `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Shared API state
pub type ApiState = Arc<ServerState>;

impl ServerState {
    pub fn new(app: &AppState) -> Self {
        Self {
            notes: Arc::new(app.note_manager()),
            users: Arc::new(UserManager::new(app.search.clone(), app.revisions.clone())),
            channels: app.channels.clone(),
            search: app.search.clone(),
            revisions: app.revisions.clone(),
            allowed_origins: app.config.cors_origins.clone(),
        }
    }
}

// ============================================================================
// Health check
// ============================================================================

/// Connectivity of each backing service
#[derive(Serialize)]
pub struct ServiceHealthStatus {
    pub postgres: String,
    pub meilisearch: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealthStatus,
}

/// Health check handler.
///
/// Returns:
/// - 200 + `"ok"` if both PostgreSQL and Meilisearch are reachable
/// - 200 + `"degraded"` if only PostgreSQL is reachable
/// - 503 + `"unhealthy"` if PostgreSQL is unreachable
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres_ok = state.revisions.health_check().await.unwrap_or(false);
    let meili_ok = state.search.health_check().await.unwrap_or(false);

    let status = if postgres_ok && meili_ok {
        "ok"
    } else if postgres_ok {
        "degraded"
    } else {
        "unhealthy"
    };
    let http_status = if postgres_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let label = |ok: bool| {
        if ok {
            "connected".to_string()
        } else {
            "disconnected".to_string()
        }
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealthStatus {
                postgres: label(postgres_ok),
                meilisearch: label(meili_ok),
            },
        }),
    )
}

/// Liveness probe
pub async fn ping() -> &'static str {
    "pong"
}

// ============================================================================
// Request helpers
// ============================================================================

/// Parse a path segment as a UUID
pub fn parse_id(raw: &str, what: &str) -> Result<uuid::Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {} id: {}", what, raw)))
}

/// Deserialize a JSON body, reporting malformed input as a 400
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))
}

/// User named by the fronting proxy, if any
pub fn forwarded_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<NoteError> for AppError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NoteNotFound(_) | NoteError::EmptyPage(_) => {
                AppError::NotFound(err.to_string())
            }
            NoteError::Validation(msg) => AppError::BadRequest(msg),
            NoteError::Upstream(e) => AppError::Internal(e),
        }
    }
}
