use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::EngagementService;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/newsletter - subscribe an email address
pub async fn newsletter_post(Json(body): Json<SubscribeRequest>) -> ApiResult<Value> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation_error("A valid email is required", None));
    }

    let pool = DatabaseManager::main_pool().await?;
    let subscription = EngagementService::new(pool)
        .subscribe(email)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::conflict("This email is already subscribed")
            }
            other => other.into(),
        })?;

    Ok(ApiResponse::created(json!({
        "message": "Subscription successful",
        "subscription": subscription
    })))
}

/// POST /api/contact - store a contact-form message
///
/// Delivery to the site operators happens out of band; this endpoint only
/// validates and persists the message.
pub async fn contact_post(Json(body): Json<ContactRequest>) -> ApiResult<Value> {
    let mut field_errors = HashMap::new();
    if body.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "This field is required".to_string());
    }
    if body.email.trim().is_empty() || !body.email.contains('@') {
        field_errors.insert("email".to_string(), "A valid email is required".to_string());
    }
    if body.message.trim().is_empty() {
        field_errors.insert("message".to_string(), "This field is required".to_string());
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "All fields are required",
            Some(field_errors),
        ));
    }

    let pool = DatabaseManager::main_pool().await?;
    let contact = EngagementService::new(pool)
        .save_contact(body.name.trim(), body.email.trim(), body.message.trim())
        .await?;

    tracing::info!(contact_id = %contact.id, "Contact message stored for operator follow-up");

    Ok(ApiResponse::created(json!({
        "message": "Message received",
        "contact": contact
    })))
}
