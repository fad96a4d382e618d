use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub price_type: String,
    pub status: String,
    pub featured: bool,
    pub views: i32,
    pub user_id: Uuid,
    pub city_id: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publication status as stored in `events.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Draft,
    Published,
}

impl EventStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(EventStatus::Draft),
            "published" => Some(EventStatus::Published),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
        }
    }
}

/// Pricing model as stored in `events.price_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceType {
    Free,
    Paid,
}

impl PriceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PriceType::Free),
            "paid" => Some(PriceType::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Free => "free",
            PriceType::Paid => "paid",
        }
    }
}

/// Event joined with its city, category and organizer names for listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub price_type: String,
    pub status: String,
    pub featured: bool,
    pub views: i32,
    pub user_id: Uuid,
    pub city_id: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub city_name: String,
    pub category_name: String,
    pub organizer_name: String,
}

/// Published-event tally per organizer for the public leaderboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrganizerEventCount {
    pub organizer_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_status() {
        assert_eq!(EventStatus::parse("draft"), Some(EventStatus::Draft));
        assert_eq!(EventStatus::parse("published"), Some(EventStatus::Published));
        assert_eq!(EventStatus::parse("archived"), None);
    }

    #[test]
    fn parses_price_type() {
        assert_eq!(PriceType::parse("free"), Some(PriceType::Free));
        assert_eq!(PriceType::parse("paid"), Some(PriceType::Paid));
        assert_eq!(PriceType::parse("donation"), None);
    }
}
