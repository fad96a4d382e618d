use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::require_auth;
use crate::auth::identity::Identity;
use crate::database::manager::DatabaseManager;
use crate::database::models::FavoriteRow;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{EngagementService, EventService, ToggleOutcome};

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub event_id: Uuid,
}

/// GET /api/favorites - the caller's saved events, newest first
pub async fn favorites_get(
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<FavoriteRow>> {
    let user = require_auth(&identity)?;

    let pool = DatabaseManager::main_pool().await?;
    let favorites = EngagementService::new(pool).favorites_for(user.id).await?;

    Ok(ApiResponse::success(favorites))
}

/// POST /api/favorites - toggle an event in the caller's favorites
pub async fn favorites_post(
    Extension(identity): Extension<Identity>,
    Json(body): Json<FavoriteRequest>,
) -> ApiResult<Value> {
    let user = require_auth(&identity)?;

    let pool = DatabaseManager::main_pool().await?;

    // Toggling a nonexistent event is a 404, not a foreign-key blowup.
    EventService::new(pool.clone())
        .get(body.event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    let outcome = EngagementService::new(pool)
        .toggle_favorite(user.id, body.event_id)
        .await?;

    let response = match outcome {
        ToggleOutcome::Added(favorite) => json!({
            "status": "added",
            "message": "Added to favorites",
            "favorite": favorite
        }),
        ToggleOutcome::Removed => json!({
            "status": "removed",
            "message": "Removed from favorites",
            "event_id": body.event_id
        }),
    };

    Ok(ApiResponse::success(response))
}

/// DELETE /api/favorites/:event_id - remove a favorite
pub async fn favorite_delete(
    Extension(identity): Extension<Identity>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Value> {
    let user = require_auth(&identity)?;

    let pool = DatabaseManager::main_pool().await?;
    let removed = EngagementService::new(pool)
        .remove_favorite(user.id, event_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found("Favorite not found"));
    }

    Ok(ApiResponse::success(json!({
        "message": "Removed from favorites"
    })))
}
