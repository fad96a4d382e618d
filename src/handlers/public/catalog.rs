use axum::extract::Path;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Category, City};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::CatalogService;

/// GET /api/categories - alphabetical category list
pub async fn categories_get() -> ApiResult<Vec<Category>> {
    let pool = DatabaseManager::main_pool().await?;
    let categories = CatalogService::new(pool).categories().await?;

    Ok(ApiResponse::success(categories))
}

/// GET /api/categories/:id - single category
pub async fn category_get(Path(id): Path<Uuid>) -> ApiResult<Category> {
    let pool = DatabaseManager::main_pool().await?;
    let category = CatalogService::new(pool)
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(category))
}

/// GET /api/cities - alphabetical city list
pub async fn cities_get() -> ApiResult<Vec<City>> {
    let pool = DatabaseManager::main_pool().await?;
    let cities = CatalogService::new(pool).cities().await?;

    Ok(ApiResponse::success(cities))
}
