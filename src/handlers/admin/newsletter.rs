use axum::extract::Extension;

use crate::auth::guard::require_admin;
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::database::models::NewsletterSubscription;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::EngagementService;

/// GET /api/admin/newsletter - every subscriber, newest first
pub async fn subscribers_get(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<NewsletterSubscription>> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let subscribers = EngagementService::new(pool).subscribers().await?;

    Ok(ApiResponse::success(subscribers))
}
