use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// POST /api/turnstile/verify - Cloudflare Turnstile challenge passthrough
pub async fn verify_post(Json(body): Json<VerifyRequest>) -> ApiResult<Value> {
    let Some(secret) = config::config().security.turnstile_secret.as_deref() else {
        tracing::warn!("Turnstile verification requested but no secret is configured");
        return Err(ApiError::service_unavailable(
            "Security verification is not configured",
        ));
    };

    let response = reqwest::Client::new()
        .post(SITEVERIFY_URL)
        .form(&[("secret", secret), ("response", body.token.as_str())])
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Turnstile verification request failed: {}", e);
            ApiError::service_unavailable("Security verification is unavailable")
        })?;

    let verdict: Value = response.json().await.map_err(|e| {
        tracing::error!("Turnstile verification returned malformed body: {}", e);
        ApiError::service_unavailable("Security verification is unavailable")
    })?;

    if verdict["success"].as_bool() != Some(true) {
        return Err(ApiError::bad_request("Security verification failed"));
    }

    Ok(ApiResponse::success(json!({ "verified": true })))
}
