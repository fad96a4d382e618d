use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::require_admin;
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::EventService;

#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    pub featured: bool,
}

/// PATCH /api/admin/events/:id/feature - toggle the featured flag
pub async fn feature_patch(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<FeatureRequest>,
) -> ApiResult<Value> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let updated = EventService::new(pool)
        .set_featured(event_id, body.featured)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Event updated",
        "event": updated
    })))
}
