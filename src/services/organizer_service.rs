use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    OrganizerListing, OrganizerProfile, OrganizerRequest, OrganizerStatus, PendingRequestRow,
    RequestHistoryRow, User,
};
use crate::error::ApiError;

/// Profile fields supplied with an organizer request.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizerProfileInput {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// Admin decision over a pending request. Parsed before any write happens;
/// anything other than approve/reject never reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Decision::Approve),
            "reject" => Some(Decision::Reject),
            _ => None,
        }
    }

    fn outcome(&self) -> OrganizerStatus {
        match self {
            Decision::Approve => OrganizerStatus::Approved,
            Decision::Reject => OrganizerStatus::Rejected,
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("The organization name is required")]
    MissingName,

    #[error("Admins and organizers cannot request organizer access")]
    Ineligible,

    #[error("An organizer request is already pending for this account")]
    DuplicatePending,

    #[error("Invalid action '{0}'. Must be 'approve' or 'reject'")]
    UnknownDecision(String),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::MissingName | WorkflowError::UnknownDecision(_) => {
                ApiError::validation_error(err.to_string(), None)
            }
            WorkflowError::Ineligible => ApiError::bad_request(err.to_string()),
            WorkflowError::DuplicatePending => ApiError::conflict(err.to_string()),
            WorkflowError::UserNotFound(_) => ApiError::not_found(err.to_string()),
            WorkflowError::Database(db) => db.into(),
        }
    }
}

/// State machine governing a user's progression from simple user to
/// organizer. The per-user `users.organizer_status` and the per-request
/// `organizer_requests.status` always advance together inside one
/// transaction; this service is the only writer for either.
pub struct OrganizerService {
    pool: PgPool,
}

impl OrganizerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new organizer request for `user`.
    ///
    /// Atomically upserts the organizer profile, marks the user pending and
    /// creates the pending request row. At most one pending request can
    /// exist per user: the in-transaction check catches the common case and
    /// the partial unique index on the table backstops concurrent submits.
    pub async fn submit(
        &self,
        roles: &RoleRegistry,
        user: &User,
        input: OrganizerProfileInput,
    ) -> Result<(OrganizerProfile, OrganizerRequest), WorkflowError> {
        if input.name.trim().is_empty() {
            return Err(WorkflowError::MissingName);
        }
        if user.role_id == roles.admin || user.role_id == roles.organizer {
            return Err(WorkflowError::Ineligible);
        }

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let pending: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM organizer_requests WHERE user_id = $1 AND status = $2",
        )
        .bind(user.id)
        .bind(OrganizerStatus::Pending.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        if pending.is_some() {
            return Err(WorkflowError::DuplicatePending);
        }

        let profile: OrganizerProfile = sqlx::query_as(
            r#"
            INSERT INTO organizer_profiles (user_id, name, description, website, phone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                website = EXCLUDED.website,
                phone = EXCLUDED.phone,
                updated_at = now()
            RETURNING user_id, name, description, website, phone, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(&input.website)
        .bind(&input.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        sqlx::query("UPDATE users SET organizer_status = $2, updated_at = now() WHERE id = $1")
            .bind(user.id)
            .bind(OrganizerStatus::Pending.as_str())
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        let request: OrganizerRequest = sqlx::query_as(
            r#"
            INSERT INTO organizer_requests (id, user_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, status, reviewed_by, review_comment, created_at, reviewed_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(OrganizerStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::UniqueViolation(_) => WorkflowError::DuplicatePending,
            other => WorkflowError::Database(other),
        })?;

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok((profile, request))
    }

    /// Approve or reject the target user's pending request.
    ///
    /// Atomically sets the user's role and organizer status and stamps the
    /// matching pending request row(s) with the outcome, the reviewer and
    /// the review time. If a concurrent adjudication already consumed the
    /// pending row, the user row still updates (last write wins); the
    /// mismatch is logged.
    pub async fn adjudicate(
        &self,
        roles: &RoleRegistry,
        reviewer: &User,
        target_user_id: Uuid,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<User, WorkflowError> {
        let outcome = decision.outcome();
        let new_role_id = match decision {
            Decision::Approve => roles.organizer,
            Decision::Reject => roles.user,
        };

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET role_id = $2, organizer_status = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, image, role_id, status, organizer_status,
                      created_at, updated_at
            "#,
        )
        .bind(target_user_id)
        .bind(new_role_id)
        .bind(outcome.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let updated = updated.ok_or(WorkflowError::UserNotFound(target_user_id))?;

        let stamped = sqlx::query(
            r#"
            UPDATE organizer_requests
            SET status = $2, reviewed_by = $3, review_comment = $4, reviewed_at = now()
            WHERE user_id = $1 AND status = $5
            "#,
        )
        .bind(target_user_id)
        .bind(outcome.as_str())
        .bind(reviewer.id)
        .bind(&comment)
        .bind(OrganizerStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        if stamped.rows_affected() == 0 {
            tracing::warn!(
                user_id = %target_user_id,
                "No pending organizer request matched; user record updated anyway"
            );
        }

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(updated)
    }

    /// Demote an organizer back to a simple user, deleting their profile
    /// and resetting the per-user status. Atomic across both writes.
    pub async fn revoke(
        &self,
        roles: &RoleRegistry,
        target_user_id: Uuid,
    ) -> Result<User, WorkflowError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        sqlx::query("DELETE FROM organizer_profiles WHERE user_id = $1")
            .bind(target_user_id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        let updated: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET role_id = $2, organizer_status = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, image, role_id, status, organizer_status,
                      created_at, updated_at
            "#,
        )
        .bind(target_user_id)
        .bind(roles.user)
        .bind(OrganizerStatus::None.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let updated = updated.ok_or(WorkflowError::UserNotFound(target_user_id))?;

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(updated)
    }

    /// Pending requests with requester details, newest first.
    pub async fn pending_requests(&self) -> Result<Vec<PendingRequestRow>, WorkflowError> {
        let rows = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, r.status, r.created_at,
                   u.name AS user_name, u.email AS user_email, u.image AS user_image,
                   u.organizer_status
            FROM organizer_requests r
            JOIN users u ON u.id = r.user_id
            WHERE r.status = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(OrganizerStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows)
    }

    /// Every request ever made, with requester and reviewer details.
    pub async fn all_requests(&self) -> Result<Vec<RequestHistoryRow>, WorkflowError> {
        let rows = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, r.status, r.review_comment, r.created_at, r.reviewed_at,
                   u.name AS user_name, u.email AS user_email, u.image AS user_image,
                   u.role_id AS user_role_id,
                   rev.name AS reviewer_name, rev.email AS reviewer_email
            FROM organizer_requests r
            JOIN users u ON u.id = r.user_id
            LEFT JOIN users rev ON rev.id = r.reviewed_by
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows)
    }

    /// Current organizers with their profiles, newest first.
    pub async fn organizers(
        &self,
        roles: &RoleRegistry,
    ) -> Result<Vec<OrganizerListing>, WorkflowError> {
        let rows = sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.image, u.created_at,
                   p.name AS organization, p.description, p.website, p.phone
            FROM users u
            LEFT JOIN organizer_profiles p ON p.user_id = u.id
            WHERE u.role_id = $1
            ORDER BY u.created_at DESC
            "#,
        )
        .bind(roles.organizer)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_only_known_values() {
        assert_eq!(Decision::parse("approve"), Some(Decision::Approve));
        assert_eq!(Decision::parse("reject"), Some(Decision::Reject));
        assert_eq!(Decision::parse("Approve"), None);
        assert_eq!(Decision::parse("maybe"), None);
        assert_eq!(Decision::parse(""), None);
    }

    #[test]
    fn decision_outcome_matches_status() {
        assert_eq!(Decision::Approve.outcome(), OrganizerStatus::Approved);
        assert_eq!(Decision::Reject.outcome(), OrganizerStatus::Rejected);
    }

    #[test]
    fn workflow_errors_map_to_expected_status_codes() {
        let cases: Vec<(WorkflowError, u16)> = vec![
            (WorkflowError::MissingName, 400),
            (WorkflowError::Ineligible, 400),
            (WorkflowError::DuplicatePending, 409),
            (WorkflowError::UnknownDecision("maybe".to_string()), 400),
            (WorkflowError::UserNotFound(Uuid::new_v4()), 404),
        ];

        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), expected);
        }
    }
}
