use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, City};

/// Reference data behind event classification: categories and cities.
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DatabaseError> {
        sqlx::query_as("SELECT id, name, created_at FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<Category>, DatabaseError> {
        sqlx::query_as("SELECT id, name, created_at FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, DatabaseError> {
        sqlx::query_as(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING id, name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    pub async fn rename_category(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DatabaseError> {
        sqlx::query_as(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(id)
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    /// Returns false when the category did not exist.
    pub async fn delete_category(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn cities(&self) -> Result<Vec<City>, DatabaseError> {
        sqlx::query_as("SELECT id, name, created_at FROM cities ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    pub async fn create_city(&self, name: &str) -> Result<City, DatabaseError> {
        sqlx::query_as(
            "INSERT INTO cities (id, name) VALUES ($1, $2) RETURNING id, name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }
}
