use axum::extract::{Extension, Path};
use axum::response::Json;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::guard::{require_auth, require_organizer};
use crate::auth::identity::Identity;
use crate::auth::roles::RoleRegistry;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Event, EventStatus, EventSummary, PriceType, User};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{CreateEventInput, EventService, UpdateEventInput};

/// GET /api/manage/events - events visible to the caller's management view.
/// Admins see everything, organizers see their own, everyone else is refused.
pub async fn manage_events_get(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
) -> ApiResult<Vec<EventSummary>> {
    let user = require_auth(&identity)?;
    let pool = DatabaseManager::main_pool().await?;
    let service = EventService::new(pool);

    let events = if user.role_id == roles.admin {
        service.list_all().await?
    } else if user.role_id == roles.organizer {
        service.list_for_owner(user.id).await?
    } else {
        return Err(ApiError::forbidden(
            "Only organizers and admins can manage events",
        ));
    };

    Ok(ApiResponse::success(events))
}

/// POST /api/manage/events - create an event (organizer or admin)
pub async fn events_post(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Json(input): Json<CreateEventInput>,
) -> ApiResult<Value> {
    let user = require_organizer(&identity, &roles)?;
    validate_create(&input)?;

    let pool = DatabaseManager::main_pool().await?;
    let event = EventService::new(pool).create(user.id, input).await?;

    Ok(ApiResponse::created(json!({
        "message": "Event created",
        "event": event
    })))
}

/// PATCH /api/manage/events/:id - partial update (owner or admin)
pub async fn event_patch(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateEventInput>,
) -> ApiResult<Value> {
    let user = require_auth(&identity)?;
    validate_update(&input)?;

    let pool = DatabaseManager::main_pool().await?;
    let service = EventService::new(pool);

    let existing = service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    ensure_owner_or_admin(user, &roles, &existing)?;

    let updated = service
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(ApiResponse::success(json!({
        "message": "Event updated",
        "event": updated
    })))
}

/// DELETE /api/manage/events/:id - delete (owner or admin)
pub async fn event_delete(
    Extension(identity): Extension<Identity>,
    Extension(roles): Extension<RoleRegistry>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let user = require_auth(&identity)?;

    let pool = DatabaseManager::main_pool().await?;
    let service = EventService::new(pool);

    let existing = service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    ensure_owner_or_admin(user, &roles, &existing)?;

    service.delete(id).await?;

    Ok(ApiResponse::success(json!({ "message": "Event deleted" })))
}

fn ensure_owner_or_admin(user: &User, roles: &RoleRegistry, event: &Event) -> Result<(), ApiError> {
    if event.user_id != user.id && user.role_id != roles.admin {
        return Err(ApiError::forbidden(
            "You are not allowed to modify this event",
        ));
    }
    Ok(())
}

fn validate_create(input: &CreateEventInput) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    for (field, value) in [
        ("title", &input.title),
        ("description", &input.description),
        ("location", &input.location),
        ("start_time", &input.start_time),
    ] {
        if value.trim().is_empty() {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }

    if let Some(price_type) = &input.price_type {
        if PriceType::parse(price_type).is_none() {
            field_errors.insert(
                "price_type".to_string(),
                "Must be 'free' or 'paid'".to_string(),
            );
        }
    }
    if let Some(status) = &input.status {
        if EventStatus::parse(status).is_none() {
            field_errors.insert(
                "status".to_string(),
                "Must be 'draft' or 'published'".to_string(),
            );
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "All required fields must be filled",
            Some(field_errors),
        ))
    }
}

fn validate_update(input: &UpdateEventInput) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if let Some(price_type) = &input.price_type {
        if PriceType::parse(price_type).is_none() {
            field_errors.insert(
                "price_type".to_string(),
                "Must be 'free' or 'paid'".to_string(),
            );
        }
    }
    if let Some(status) = &input.status {
        if EventStatus::parse(status).is_none() {
            field_errors.insert(
                "status".to_string(),
                "Must be 'draft' or 'published'".to_string(),
            );
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Invalid field values",
            Some(field_errors),
        ))
    }
}
