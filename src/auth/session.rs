use axum::http::HeaderMap;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Session, User};

/// Read-side view over the session table owned by the external
/// authentication provider. Issuance, refresh and revocation are the
/// provider's concern; this store only resolves tokens.
pub struct SessionStore {
    pool: PgPool,
}

impl SessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve an opaque bearer token to its session and user. Expired
    /// sessions resolve to `None`, as do unknown tokens.
    pub async fn get_session(
        &self,
        token: &str,
    ) -> Result<Option<(Session, User)>, DatabaseError> {
        let session: Option<Session> = sqlx::query_as(
            r#"
            SELECT id, token, user_id, expires_at, created_at
            FROM sessions
            WHERE token = $1 AND expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let Some(session) = session else {
            return Ok(None);
        };

        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, image, role_id, status, organizer_status,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(session.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        // A session pointing at a deleted user is treated as no session.
        Ok(user.map(|user| (session, user)))
    }
}

/// Extract a bearer token from the Authorization header.
///
/// Returns `None` for a missing header, wrong scheme, or empty token; the
/// session resolver treats all of those as an anonymous request.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_wrong_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("Bearer    ");
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
