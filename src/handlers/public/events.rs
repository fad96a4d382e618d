use axum::extract::{Extension, Path, Query};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::database::models::{EventSummary, OrganizerEventCount};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::EventService;

/// GET /api/events - published events with city, category and organizer info
pub async fn events_get() -> ApiResult<Vec<EventSummary>> {
    let pool = DatabaseManager::main_pool().await?;
    let events = EventService::new(pool).list_published().await?;

    Ok(ApiResponse::success(events))
}

/// GET /api/events/:id - single event
pub async fn event_get(Path(id): Path<Uuid>) -> ApiResult<EventSummary> {
    let pool = DatabaseManager::main_pool().await?;
    let event = EventService::new(pool)
        .get_summary(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(ApiResponse::success(event))
}

/// POST /api/events/:id/view - increment the view counter
pub async fn view_post(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::main_pool().await?;
    let recorded = EventService::new(pool).record_view(id).await?;

    if !recorded {
        return Err(ApiError::not_found("Event not found"));
    }

    Ok(ApiResponse::success(json!({ "recorded": true })))
}

/// GET /api/events/count - published-event counts per organizer
pub async fn counts_get(
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<OrganizerEventCount>> {
    let pool = DatabaseManager::main_pool().await?;
    let counts = EventService::new(pool)
        .organizer_counts(roles.organizer)
        .await?;

    Ok(ApiResponse::success(counts))
}

#[derive(Debug, Deserialize)]
pub struct CountWindow {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/events/count/:organizer_id - one organizer's event count,
/// optionally limited to a creation-date window
pub async fn organizer_count_get(
    Path(organizer_id): Path<Uuid>,
    Query(window): Query<CountWindow>,
) -> ApiResult<Value> {
    let from = window
        .start_date
        .as_deref()
        .map(|raw| parse_window_date(raw, "start_date"))
        .transpose()?;
    let to = window
        .end_date
        .as_deref()
        .map(|raw| parse_window_date(raw, "end_date"))
        .transpose()?;

    let pool = DatabaseManager::main_pool().await?;
    let count = EventService::new(pool)
        .count_for_organizer(organizer_id, from, to)
        .await?;

    Ok(ApiResponse::success(json!({
        "organizer_id": organizer_id,
        "count": count,
        "period": { "start": from, "end": to }
    })))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates.
fn parse_window_date(raw: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(ApiError::validation_error(
        format!("Invalid date for '{field}'"),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_dates_accept_both_formats() {
        assert!(parse_window_date("2026-03-01", "start_date").is_ok());
        assert!(parse_window_date("2026-03-01T12:30:00Z", "start_date").is_ok());
    }

    #[test]
    fn garbage_window_dates_are_refused() {
        for raw in ["yesterday", "03/01/2026", ""] {
            let err = parse_window_date(raw, "end_date").unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }
}
