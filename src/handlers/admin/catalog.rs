use axum::extract::{Extension, Path};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::{require_admin, require_moderator};
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::CatalogService;

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

fn require_name(body: &NameRequest) -> Result<&str, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation_error("The name is required", None));
    }
    Ok(name)
}

/// POST /api/categories - create a category (moderator)
pub async fn category_post(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Json(body): Json<NameRequest>,
) -> ApiResult<Value> {
    require_moderator(&identity, &roles)?;
    let name = require_name(&body)?;

    let pool = DatabaseManager::main_pool().await?;
    let category = CatalogService::new(pool)
        .create_category(name)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::conflict("This category already exists")
            }
            other => other.into(),
        })?;

    Ok(ApiResponse::created(json!({
        "message": "Category created",
        "category": category
    })))
}

/// PATCH /api/categories/:id - rename a category (moderator)
pub async fn category_patch(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(id): Path<Uuid>,
    Json(body): Json<NameRequest>,
) -> ApiResult<Value> {
    require_moderator(&identity, &roles)?;
    let name = require_name(&body)?;

    let pool = DatabaseManager::main_pool().await?;
    let category = CatalogService::new(pool)
        .rename_category(id, name)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::conflict("This category already exists")
            }
            other => other.into(),
        })?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Category updated",
        "category": category
    })))
}

/// DELETE /api/categories/:id - delete a category (admin)
pub async fn category_delete(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    require_admin(&identity, &roles)?;

    let pool = DatabaseManager::main_pool().await?;
    let deleted = CatalogService::new(pool).delete_category(id).await?;

    if !deleted {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(ApiResponse::success(json!({ "message": "Category deleted" })))
}

/// POST /api/cities - create a city (moderator)
pub async fn city_post(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Json(body): Json<NameRequest>,
) -> ApiResult<Value> {
    require_moderator(&identity, &roles)?;
    let name = require_name(&body)?;

    let pool = DatabaseManager::main_pool().await?;
    let city = CatalogService::new(pool)
        .create_city(name)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict("This city already exists"),
            other => other.into(),
        })?;

    Ok(ApiResponse::created(json!({
        "message": "City created",
        "city": city
    })))
}
