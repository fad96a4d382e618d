use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::require_admin;
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// PATCH /api/admin/users/:id/role - overwrite a user's role
///
/// Bypasses organizer-request bookkeeping on purpose; this is the
/// moderation escape hatch.
pub async fn role_patch(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<RoleUpdateRequest>,
) -> ApiResult<Value> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let updated = UserService::new(pool)
        .set_role(user_id, body.role_id)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "User role updated successfully",
        "user": updated
    })))
}

/// PATCH /api/admin/users/:id/status - activate or deactivate an account
pub async fn status_patch(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<StatusUpdateRequest>,
) -> ApiResult<Value> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let updated = UserService::new(pool)
        .set_status(user_id, &body.status)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "User status updated successfully",
        "user": updated
    })))
}
