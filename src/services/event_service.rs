use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Event, EventStatus, EventSummary, OrganizerEventCount, PriceType};

const SUMMARY_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e.details, e.location, e.event_date,
           e.start_time, e.end_time, e.image, e.price, e.price_type, e.status,
           e.featured, e.views, e.user_id, e.city_id, e.category_id, e.created_at,
           c.name AS city_name, cat.name AS category_name, u.name AS organizer_name
    FROM events e
    JOIN cities c ON c.id = e.city_id
    JOIN categories cat ON cat.id = e.category_id
    JOIN users u ON u.id = e.user_id
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventInput {
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub location: String,
    pub event_date: chrono::DateTime<chrono::Utc>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<String>,
    pub status: Option<String>,
    pub city_id: Uuid,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<chrono::DateTime<chrono::Utc>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<String>,
    pub status: Option<String>,
    pub city_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Storage operations over events. Ownership and role checks belong to the
/// handlers; nothing here consults the caller's identity.
pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published events for the public listing, newest first.
    pub async fn list_published(&self) -> Result<Vec<EventSummary>, DatabaseError> {
        let sql = format!("{SUMMARY_SELECT} WHERE e.status = $1 ORDER BY e.created_at DESC");
        sqlx::query_as(&sql)
            .bind(EventStatus::Published.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    /// Every event regardless of status, for admin management views.
    pub async fn list_all(&self) -> Result<Vec<EventSummary>, DatabaseError> {
        let sql = format!("{SUMMARY_SELECT} ORDER BY e.created_at DESC");
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    /// Events owned by one organizer, for their management view.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<EventSummary>, DatabaseError> {
        let sql = format!("{SUMMARY_SELECT} WHERE e.user_id = $1 ORDER BY e.created_at DESC");
        sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    pub async fn get_summary(&self, id: Uuid) -> Result<Option<EventSummary>, DatabaseError> {
        let sql = format!("{SUMMARY_SELECT} WHERE e.id = $1");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        sqlx::query_as(
            r#"
            SELECT id, title, description, details, location, event_date, start_time,
                   end_time, image, price, price_type, status, featured, views,
                   user_id, city_id, category_id, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        input: CreateEventInput,
    ) -> Result<Event, DatabaseError> {
        sqlx::query_as(
            r#"
            INSERT INTO events
                (id, title, description, details, location, event_date, start_time,
                 end_time, image, price, price_type, status, user_id, city_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, title, description, details, location, event_date, start_time,
                      end_time, image, price, price_type, status, featured, views,
                      user_id, city_id, category_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(&input.details)
        .bind(&input.location)
        .bind(input.event_date)
        .bind(&input.start_time)
        .bind(&input.end_time)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.price_type.as_deref().unwrap_or(PriceType::Free.as_str()))
        .bind(input.status.as_deref().unwrap_or(EventStatus::Draft.as_str()))
        .bind(owner_id)
        .bind(input.city_id)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    /// Partial update; absent fields keep their stored values.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEventInput,
    ) -> Result<Option<Event>, DatabaseError> {
        sqlx::query_as(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                details = COALESCE($4, details),
                location = COALESCE($5, location),
                event_date = COALESCE($6, event_date),
                start_time = COALESCE($7, start_time),
                end_time = COALESCE($8, end_time),
                image = COALESCE($9, image),
                price = COALESCE($10, price),
                price_type = COALESCE($11, price_type),
                status = COALESCE($12, status),
                city_id = COALESCE($13, city_id),
                category_id = COALESCE($14, category_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, details, location, event_date, start_time,
                      end_time, image, price, price_type, status, featured, views,
                      user_id, city_id, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.details)
        .bind(&input.location)
        .bind(input.event_date)
        .bind(&input.start_time)
        .bind(&input.end_time)
        .bind(&input.image)
        .bind(input.price)
        .bind(&input.price_type)
        .bind(&input.status)
        .bind(input.city_id)
        .bind(input.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    /// Returns false when the event did not exist.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when the event did not exist.
    pub async fn record_view(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE events SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_featured(
        &self,
        id: Uuid,
        featured: bool,
    ) -> Result<Option<Event>, DatabaseError> {
        sqlx::query_as(
            r#"
            UPDATE events SET featured = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, details, location, event_date, start_time,
                      end_time, image, price, price_type, status, featured, views,
                      user_id, city_id, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(featured)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }

    /// How many events one organizer created inside an optional time window.
    pub async fn count_for_organizer(
        &self,
        owner_id: Uuid,
        from: Option<chrono::DateTime<chrono::Utc>>,
        to: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM events
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.0)
    }

    /// Published-event counts per organizer, busiest first.
    pub async fn organizer_counts(
        &self,
        organizer_role_id: i32,
    ) -> Result<Vec<OrganizerEventCount>, DatabaseError> {
        sqlx::query_as(
            r#"
            SELECT u.id AS organizer_id, u.name, u.image, p.description,
                   COUNT(e.id) AS count
            FROM users u
            LEFT JOIN organizer_profiles p ON p.user_id = u.id
            LEFT JOIN events e ON e.user_id = u.id AND e.status = 'published'
            WHERE u.role_id = $1
            GROUP BY u.id, u.name, u.image, p.description
            ORDER BY count DESC
            "#,
        )
        .bind(organizer_role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)
    }
}
