use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::require_admin;
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::database::models::{OrganizerListing, PendingRequestRow, RequestHistoryRow};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{Decision, OrganizerService, WorkflowError};

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub user_id: Uuid,
    pub action: String,
    pub comment: Option<String>,
}

/// POST /api/admin/organizer/validate - approve or reject a pending request
pub async fn validate_post(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Json(body): Json<ValidateRequest>,
) -> ApiResult<Value> {
    let admin = require_admin(&identity, &roles)?;

    // Reject unknown decisions before anything touches the database.
    let decision = Decision::parse(&body.action)
        .ok_or_else(|| WorkflowError::UnknownDecision(body.action.clone()))?;

    let pool = DatabaseManager::main_pool().await?;
    let updated = OrganizerService::new(pool)
        .adjudicate(&roles, admin, body.user_id, decision, body.comment)
        .await?;

    Ok(ApiResponse::success(json!({
        "status": updated.organizer_status,
        "user": updated
    })))
}

/// DELETE /api/admin/organizer/:id - demote an organizer to a simple user
pub async fn revoke_delete(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Value> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let updated = OrganizerService::new(pool).revoke(&roles, user_id).await?;

    Ok(ApiResponse::success(json!({
        "message": "Organizer demoted to simple user",
        "user": updated
    })))
}

/// GET /api/admin/organizer/requests - pending requests
pub async fn requests_get(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<PendingRequestRow>> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let requests = OrganizerService::new(pool).pending_requests().await?;

    Ok(ApiResponse::success(requests))
}

/// GET /api/admin/organizer/all-requests - full request history
pub async fn all_requests_get(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<RequestHistoryRow>> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let requests = OrganizerService::new(pool).all_requests().await?;

    Ok(ApiResponse::success(requests))
}

/// GET /api/admin/organizer/all - current organizers with profiles
pub async fn organizers_get(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<OrganizerListing>> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let organizers = OrganizerService::new(pool).organizers(&roles).await?;

    Ok(ApiResponse::success(organizers))
}
