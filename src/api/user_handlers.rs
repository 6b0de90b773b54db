//! User and settings API handlers

use super::handlers::{forwarded_user, parse_json, ApiState, AppError};
use crate::users::{CreateUserRequest, CreatedUser, UserSettingsRequest, UserView};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

/// List users
pub async fn list_users(State(state): State<ApiState>) -> Result<Json<Vec<UserView>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

/// Create a user
pub async fn create_user(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<CreatedUser>, AppError> {
    let req: CreateUserRequest = parse_json(&body)?;
    req.validate().map_err(AppError::BadRequest)?;
    let id = state.users.create_user(req).await?;
    Ok(Json(CreatedUser { id }))
}

/// Store settings of the requesting user
pub async fn update_settings(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let user = forwarded_user(&headers)
        .ok_or_else(|| AppError::BadRequest("missing user".to_string()))?;
    let req: UserSettingsRequest = parse_json(&body)?;
    state
        .users
        .set_default_channel(&user, req.default_channel)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
