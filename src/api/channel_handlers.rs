//! Channel API handlers

use super::handlers::{ApiState, AppError};
use crate::channels::{channel_paths, ChannelPath};
use axum::{extract::State, Json};

/// Public channels with their full paths
pub async fn list_channels(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ChannelPath>>, AppError> {
    let nodes = state.channels.list_public().await?;
    Ok(Json(channel_paths(&nodes)?))
}
