use sqlx::PgPool;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::Role;

pub const ADMIN: &str = "admin";
pub const MODERATOR: &str = "moderator";
pub const USER: &str = "user";
pub const ORGANIZER: &str = "organizer";

#[derive(Debug, Error)]
pub enum RoleRegistryError {
    #[error("Role '{0}' missing from roles table")]
    Missing(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Role ids resolved by name from the roles reference table, once at
/// startup. Guards and services read ids from here; integer literals never
/// appear at call sites, so historical renumbering cannot drift back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRegistry {
    pub admin: i32,
    pub moderator: i32,
    pub user: i32,
    pub organizer: i32,
}

impl RoleRegistry {
    /// The mapping the seeder writes. Also the fallback when the roles
    /// table cannot be read at startup.
    pub const CANONICAL: RoleRegistry = RoleRegistry {
        admin: 1,
        moderator: 2,
        user: 3,
        organizer: 4,
    };

    pub async fn load(pool: &PgPool) -> Result<Self, RoleRegistryError> {
        let rows: Vec<Role> = sqlx::query_as("SELECT id, name FROM roles")
            .fetch_all(pool)
            .await
            .map_err(DatabaseError::from)?;

        Self::from_rows(&rows)
    }

    pub fn from_rows(rows: &[Role]) -> Result<Self, RoleRegistryError> {
        let lookup = |name: &'static str| -> Result<i32, RoleRegistryError> {
            rows.iter()
                .find(|r| r.name == name)
                .map(|r| r.id)
                .ok_or(RoleRegistryError::Missing(name))
        };

        Ok(RoleRegistry {
            admin: lookup(ADMIN)?,
            moderator: lookup(MODERATOR)?,
            user: lookup(USER)?,
            organizer: lookup(ORGANIZER)?,
        })
    }

    pub fn is_known(&self, role_id: i32) -> bool {
        [self.admin, self.moderator, self.user, self.organizer].contains(&role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: i32, name: &str) -> Role {
        Role {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn resolves_ids_by_name_not_position() {
        // Deliberately scrambled ids: resolution must go by name.
        let rows = vec![
            role(7, "organizer"),
            role(1, "admin"),
            role(9, "user"),
            role(4, "moderator"),
        ];

        let registry = RoleRegistry::from_rows(&rows).unwrap();
        assert_eq!(registry.admin, 1);
        assert_eq!(registry.moderator, 4);
        assert_eq!(registry.user, 9);
        assert_eq!(registry.organizer, 7);
    }

    #[test]
    fn missing_role_is_an_error() {
        let rows = vec![role(1, "admin"), role(2, "moderator"), role(3, "user")];
        assert!(matches!(
            RoleRegistry::from_rows(&rows),
            Err(RoleRegistryError::Missing("organizer"))
        ));
    }

    #[test]
    fn canonical_mapping_is_self_consistent() {
        let registry = RoleRegistry::CANONICAL;
        assert!(registry.is_known(registry.admin));
        assert!(registry.is_known(registry.organizer));
        assert!(!registry.is_known(99));
    }
}
