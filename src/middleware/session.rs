use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::identity::Identity;
use crate::auth::session::{extract_bearer_token, SessionStore};
use crate::database::manager::DatabaseManager;

/// Session-resolution middleware, applied to every route.
///
/// Resolves the inbound bearer token to an [`Identity`] and attaches it to
/// request extensions so guards read it without re-fetching. Resolution
/// never fails the request: anything that goes wrong degrades to
/// `Identity::Anonymous` and public routes stay reachable.
pub async fn resolve_session_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(&headers).await;
    request.extensions_mut().insert(identity);

    next.run(request).await
}

async fn resolve_identity(headers: &HeaderMap) -> Identity {
    let Some(token) = extract_bearer_token(headers) else {
        return Identity::Anonymous;
    };

    let pool = match DatabaseManager::main_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("Session resolution degraded to anonymous: {}", e);
            return Identity::Anonymous;
        }
    };

    match SessionStore::new(pool).get_session(&token).await {
        Ok(Some((session, user))) => {
            // Disabled accounts lose all authenticated capability
            // immediately, without waiting for session revocation.
            if user.is_inactive() {
                tracing::debug!(user_id = %user.id, "Inactive account treated as unauthenticated");
                return Identity::Anonymous;
            }
            Identity::Authenticated { user, session }
        }
        Ok(None) => Identity::Anonymous,
        Err(e) => {
            tracing::warn!("Session resolution degraded to anonymous: {}", e);
            Identity::Anonymous
        }
    }
}
