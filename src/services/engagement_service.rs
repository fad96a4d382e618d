use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContactMessage, Favorite, FavoriteRow, NewsletterSubscription};

/// Outcome of a favorite toggle.
#[derive(Debug)]
pub enum ToggleOutcome {
    Added(Favorite),
    Removed,
}

/// Reader-side engagement: favorites, newsletter signups, contact messages.
pub struct EngagementService {
    pool: PgPool,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn favorites_for(&self, user_id: Uuid) -> Result<Vec<FavoriteRow>, DatabaseError> {
        sqlx::query_as(
            r#"
            SELECT f.user_id, f.event_id, f.created_at,
                   e.title, e.image, e.event_date, e.location,
                   c.name AS city_name, cat.name AS category_name
            FROM favorites f
            JOIN events e ON e.id = f.event_id
            JOIN cities c ON c.id = e.city_id
            JOIN categories cat ON cat.id = e.category_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    /// Add the event to favorites, or remove it if already present.
    pub async fn toggle_favorite(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<ToggleOutcome, DatabaseError> {
        let removed =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND event_id = $2")
                .bind(user_id)
                .bind(event_id)
                .execute(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

        if removed.rows_affected() > 0 {
            return Ok(ToggleOutcome::Removed);
        }

        let favorite: Favorite = sqlx::query_as(
            r#"
            INSERT INTO favorites (user_id, event_id)
            VALUES ($1, $2)
            RETURNING user_id, event_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(ToggleOutcome::Added(favorite))
    }

    /// Returns false when the favorite did not exist.
    pub async fn remove_favorite(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected() > 0)
    }

    /// Duplicate emails surface as `DatabaseError::UniqueViolation`.
    pub async fn subscribe(&self, email: &str) -> Result<NewsletterSubscription, DatabaseError> {
        sqlx::query_as(
            r#"
            INSERT INTO newsletter_subscriptions (id, email)
            VALUES ($1, $2)
            RETURNING id, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    pub async fn subscribers(&self) -> Result<Vec<NewsletterSubscription>, DatabaseError> {
        sqlx::query_as(
            "SELECT id, email, created_at FROM newsletter_subscriptions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    pub async fn save_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, DatabaseError> {
        sqlx::query_as(
            r#"
            INSERT INTO contact_messages (id, name, email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }
}
