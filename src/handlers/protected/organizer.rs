use axum::extract::Extension;
use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::guard::require_auth;
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::database::models::OrganizerStatus;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{OrganizerProfileInput, OrganizerService};

/// POST /api/organizer/request - submit an organizer request
///
/// Upserts the caller's organizer profile, marks them pending and opens a
/// pending request row, all in one transaction.
pub async fn request_post(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Json(input): Json<OrganizerProfileInput>,
) -> ApiResult<Value> {
    let user = require_auth(&identity)?;

    let pool = DatabaseManager::main_pool().await?;
    let (profile, request) = OrganizerService::new(pool)
        .submit(&roles, user, input)
        .await?;

    Ok(ApiResponse::created(json!({
        "organizer_status": OrganizerStatus::Pending.as_str(),
        "profile": profile,
        "request": request
    })))
}
