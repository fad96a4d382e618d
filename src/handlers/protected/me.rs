use axum::extract::Extension;
use serde_json::{json, Value};

use crate::auth::identity::Identity;
use crate::database::manager::DatabaseManager;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::UserService;

/// GET /api/me - current identity with role name
///
/// Anonymous callers get a null identity rather than a 401 so the client
/// can render either state from one call.
pub async fn me_get(Extension(identity): Extension<Identity>) -> ApiResult<Value> {
    let (user, session) = match &identity {
        Identity::Anonymous => {
            return Ok(ApiResponse::success(json!({
                "user": null,
                "session": null
            })));
        }
        Identity::Authenticated { user, session } => (user, session),
    };

    let pool = DatabaseManager::main_pool().await?;
    let role = UserService::new(pool).role_name(user.role_id).await?;

    let mut user_value = serde_json::to_value(user).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = user_value {
        map.insert("role".to_string(), json!(role));
    }

    Ok(ApiResponse::success(json!({
        "user": user_value,
        "session": session
    })))
}
