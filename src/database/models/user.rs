use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role_id: i32,
    pub status: String,
    pub organizer_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account status as stored in `users.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AccountStatus::Active),
            "inactive" => Some(AccountStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl User {
    pub fn is_inactive(&self) -> bool {
        AccountStatus::parse(&self.status) == Some(AccountStatus::Inactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(AccountStatus::parse("active"), Some(AccountStatus::Active));
        assert_eq!(AccountStatus::parse("inactive"), Some(AccountStatus::Inactive));
        assert_eq!(AccountStatus::parse("banned"), None);
        assert_eq!(AccountStatus::parse(""), None);
    }

    #[test]
    fn round_trips_as_str() {
        for status in [AccountStatus::Active, AccountStatus::Inactive] {
            assert_eq!(AccountStatus::parse(status.as_str()), Some(status));
        }
    }
}
