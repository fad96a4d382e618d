//! Access guards over a resolved [`Identity`].
//!
//! Pure total functions: no side effect beyond the returned error, safe to
//! call any number of times per request. A missing identity is 401; a
//! present identity that fails the role predicate is 403.

use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::models::User;
use crate::error::ApiError;

/// Ensures the request carries an authenticated user.
pub fn require_auth(identity: &Identity) -> Result<&User, ApiError> {
    match identity {
        Identity::Authenticated { user, .. } => Ok(user),
        Identity::Anonymous => Err(ApiError::unauthorized("You must be logged in")),
    }
}

/// Ensures the user has the admin role.
pub fn require_admin<'a>(
    identity: &'a Identity,
    roles: &RoleRegistry,
) -> Result<&'a User, ApiError> {
    let user = require_auth(identity)?;

    if user.role_id != roles.admin {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(user)
}

/// Ensures the user has at least the moderator role.
pub fn require_moderator<'a>(
    identity: &'a Identity,
    roles: &RoleRegistry,
) -> Result<&'a User, ApiError> {
    let user = require_auth(identity)?;

    if user.role_id != roles.admin && user.role_id != roles.moderator {
        return Err(ApiError::forbidden("Moderator access required"));
    }
    Ok(user)
}

/// Ensures the user can manage events: organizer or admin.
pub fn require_organizer<'a>(
    identity: &'a Identity,
    roles: &RoleRegistry,
) -> Result<&'a User, ApiError> {
    let user = require_auth(identity)?;

    if user.role_id != roles.admin && user.role_id != roles.organizer {
        return Err(ApiError::forbidden("Organizer access required"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Session, User};
    use chrono::Utc;
    use uuid::Uuid;

    const ROLES: RoleRegistry = RoleRegistry::CANONICAL;

    fn user_with_role(role_id: i32) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            image: None,
            role_id,
            status: "active".to_string(),
            organizer_status: "none".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticated(role_id: i32) -> Identity {
        let user = user_with_role(role_id);
        let session = Session {
            id: Uuid::new_v4(),
            token: "tok".to_string(),
            user_id: user.id,
            expires_at: Utc::now() + chrono::Duration::hours(1),
            created_at: Utc::now(),
        };
        Identity::Authenticated { user, session }
    }

    #[test]
    fn anonymous_fails_every_guard_with_401() {
        let identity = Identity::Anonymous;
        for result in [
            require_auth(&identity).map(|_| ()),
            require_admin(&identity, &ROLES).map(|_| ()),
            require_moderator(&identity, &ROLES).map(|_| ()),
            require_organizer(&identity, &ROLES).map(|_| ()),
        ] {
            assert_eq!(result.unwrap_err().status_code(), 401);
        }
    }

    #[test]
    fn require_auth_accepts_any_authenticated_user() {
        for role_id in [ROLES.admin, ROLES.moderator, ROLES.user, ROLES.organizer] {
            assert!(require_auth(&authenticated(role_id)).is_ok());
        }
    }

    #[test]
    fn require_admin_accepts_only_admin() {
        assert!(require_admin(&authenticated(ROLES.admin), &ROLES).is_ok());

        for role_id in [ROLES.moderator, ROLES.user, ROLES.organizer] {
            let err = require_admin(&authenticated(role_id), &ROLES).unwrap_err();
            assert_eq!(err.status_code(), 403);
        }
    }

    #[test]
    fn require_moderator_accepts_admin_and_moderator() {
        assert!(require_moderator(&authenticated(ROLES.admin), &ROLES).is_ok());
        assert!(require_moderator(&authenticated(ROLES.moderator), &ROLES).is_ok());

        for role_id in [ROLES.user, ROLES.organizer] {
            let err = require_moderator(&authenticated(role_id), &ROLES).unwrap_err();
            assert_eq!(err.status_code(), 403);
        }
    }

    #[test]
    fn require_organizer_accepts_admin_and_organizer() {
        assert!(require_organizer(&authenticated(ROLES.admin), &ROLES).is_ok());
        assert!(require_organizer(&authenticated(ROLES.organizer), &ROLES).is_ok());

        for role_id in [ROLES.user, ROLES.moderator] {
            let err = require_organizer(&authenticated(role_id), &ROLES).unwrap_err();
            assert_eq!(err.status_code(), 403);
        }
    }

    #[test]
    fn guards_are_repeatable() {
        let identity = authenticated(ROLES.admin);
        for _ in 0..3 {
            assert!(require_admin(&identity, &ROLES).is_ok());
        }
    }
}
