use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Organization details attached 1:1 to a user. Created or refreshed only
/// when the user submits an organizer request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizerProfile {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One adjudicable request to become an organizer. Per-request status is a
/// one-shot transition pending -> approved|rejected; a user may open a new
/// request after a terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizerRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub review_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Per-user organizer progression as stored in `users.organizer_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizerStatus {
    None,
    Pending,
    Approved,
    Rejected,
}

impl OrganizerStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(OrganizerStatus::None),
            "pending" => Some(OrganizerStatus::Pending),
            "approved" => Some(OrganizerStatus::Approved),
            "rejected" => Some(OrganizerStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizerStatus::None => "none",
            OrganizerStatus::Pending => "pending",
            OrganizerStatus::Approved => "approved",
            OrganizerStatus::Rejected => "rejected",
        }
    }
}

/// Pending request joined with requester details, for the review queue.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
    pub organizer_status: String,
}

/// Full request history row with requester and reviewer details.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RequestHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub review_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
    pub user_role_id: i32,
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
}

/// Current organizer with their profile, for the admin roster.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrganizerListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(OrganizerStatus::parse("none"), Some(OrganizerStatus::None));
        assert_eq!(OrganizerStatus::parse("pending"), Some(OrganizerStatus::Pending));
        assert_eq!(OrganizerStatus::parse("approved"), Some(OrganizerStatus::Approved));
        assert_eq!(OrganizerStatus::parse("rejected"), Some(OrganizerStatus::Rejected));
        assert_eq!(OrganizerStatus::parse("unknown"), None);
    }

    #[test]
    fn round_trips_as_str() {
        for status in [
            OrganizerStatus::None,
            OrganizerStatus::Pending,
            OrganizerStatus::Approved,
            OrganizerStatus::Rejected,
        ] {
            assert_eq!(OrganizerStatus::parse(status.as_str()), Some(status));
        }
    }
}
