use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{AccountStatus, User};
use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum UserAdminError {
    #[error("Role {0} does not exist")]
    UnknownRole(i32),

    #[error("Invalid status '{0}'. Must be 'active' or 'inactive'")]
    InvalidStatus(String),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<UserAdminError> for ApiError {
    fn from(err: UserAdminError) -> Self {
        match err {
            UserAdminError::UnknownRole(_) | UserAdminError::InvalidStatus(_) => {
                ApiError::validation_error(err.to_string(), None)
            }
            UserAdminError::UserNotFound(_) => ApiError::not_found(err.to_string()),
            UserAdminError::Database(db) => db.into(),
        }
    }
}

/// Direct admin overwrites of a user's role or account status.
///
/// These deliberately bypass the organizer workflow bookkeeping; they are
/// the moderation escape hatch, not part of the approval state machine.
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn set_role(
        &self,
        target_user_id: Uuid,
        new_role_id: i32,
    ) -> Result<User, UserAdminError> {
        let role_exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM roles WHERE id = $1")
            .bind(new_role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if role_exists.is_none() {
            return Err(UserAdminError::UnknownRole(new_role_id));
        }

        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET role_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, image, role_id, status, organizer_status,
                      created_at, updated_at
            "#,
        )
        .bind(target_user_id)
        .bind(new_role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        updated.ok_or(UserAdminError::UserNotFound(target_user_id))
    }

    pub async fn set_status(
        &self,
        target_user_id: Uuid,
        new_status: &str,
    ) -> Result<User, UserAdminError> {
        let status = AccountStatus::parse(new_status)
            .ok_or_else(|| UserAdminError::InvalidStatus(new_status.to_string()))?;

        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, image, role_id, status, organizer_status,
                      created_at, updated_at
            "#,
        )
        .bind(target_user_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        updated.ok_or(UserAdminError::UserNotFound(target_user_id))
    }

    /// Role name for a role id, for profile responses.
    pub async fn role_name(&self, role_id: i32) -> Result<Option<String>, UserAdminError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(row.map(|(name,)| name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_errors_map_to_expected_status_codes() {
        let api: ApiError = UserAdminError::UnknownRole(42).into();
        assert_eq!(api.status_code(), 400);

        let api: ApiError = UserAdminError::InvalidStatus("frozen".to_string()).into();
        assert_eq!(api.status_code(), 400);

        let api: ApiError = UserAdminError::UserNotFound(Uuid::new_v4()).into();
        assert_eq!(api.status_code(), 404);
    }
}
