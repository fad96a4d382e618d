use axum::{extract::Extension, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use agora_api::auth::roles::RoleRegistry;
use agora_api::config;
use agora_api::database::manager::DatabaseManager;
use agora_api::handlers::{admin, protected, public};
use agora_api::middleware::session::resolve_session_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Agora API in {:?} mode", config.environment);

    let roles = load_role_registry().await;
    let app = app(roles);

    // Allow tests or deployments to override port via env
    let port = std::env::var("AGORA_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Agora API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Role ids resolved from the database at startup. A server booting before
/// the database is reachable falls back to the canonical mapping the seeder
/// writes, so public routes stay up while the database recovers.
async fn load_role_registry() -> RoleRegistry {
    match DatabaseManager::main_pool().await {
        Ok(pool) => match RoleRegistry::load(&pool).await {
            Ok(registry) => {
                tracing::info!(?registry, "Role registry resolved from roles table");
                registry
            }
            Err(e) => {
                tracing::warn!("Falling back to canonical role mapping: {}", e);
                RoleRegistry::CANONICAL
            }
        },
        Err(e) => {
            tracing::warn!(
                "Database unavailable at startup, using canonical role mapping: {}",
                e
            );
            RoleRegistry::CANONICAL
        }
    }
}

fn app(roles: RoleRegistry) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(axum::middleware::from_fn(resolve_session_middleware))
        .layer(Extension(roles))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route("/api/events", get(public::events_get))
        .route("/api/events/count", get(public::counts_get))
        .route(
            "/api/events/count/:organizer_id",
            get(public::organizer_count_get),
        )
        .route("/api/events/:id", get(public::event_get))
        .route("/api/events/:id/view", post(public::view_post))
        // Reference data: public reads, moderated writes
        .route(
            "/api/categories",
            get(public::categories_get).post(admin::category_post),
        )
        .route(
            "/api/categories/:id",
            get(public::category_get)
                .patch(admin::category_patch)
                .delete(admin::category_delete),
        )
        .route("/api/cities", get(public::cities_get).post(admin::city_post))
        .route("/api/newsletter", post(public::newsletter_post))
        .route("/api/contact", post(public::contact_post))
        .route("/api/turnstile/verify", post(public::verify_post))
}

fn protected_routes() -> Router {
    use axum::routing::{delete, patch, post};

    Router::new()
        .route("/api/me", get(protected::me_get))
        .route(
            "/api/manage/events",
            get(protected::manage_events_get).post(protected::events_post),
        )
        .route(
            "/api/manage/events/:id",
            patch(protected::event_patch).delete(protected::event_delete),
        )
        .route(
            "/api/favorites",
            get(protected::favorites_get).post(protected::favorites_post),
        )
        .route("/api/favorites/:event_id", delete(protected::favorite_delete))
        .route("/api/organizer/request", post(protected::request_post))
}

fn admin_routes() -> Router {
    use axum::routing::{delete, patch, post};

    Router::new()
        .route("/api/admin/organizer/validate", post(admin::validate_post))
        .route("/api/admin/organizer/requests", get(admin::requests_get))
        .route(
            "/api/admin/organizer/all-requests",
            get(admin::all_requests_get),
        )
        .route("/api/admin/organizer/all", get(admin::organizers_get))
        .route("/api/admin/organizer/:id", delete(admin::revoke_delete))
        .route("/api/admin/users/:id/role", patch(admin::role_patch))
        .route("/api/admin/users/:id/status", patch(admin::status_patch))
        .route("/api/admin/events/:id/feature", patch(admin::feature_patch))
        .route("/api/admin/newsletter", get(admin::subscribers_get))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;

    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<axum::http::HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Agora API",
            "version": version,
            "description": "Event listing platform backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "events": "/api/events[/:id] (public), /api/manage/events[/:id] (organizer)",
                "catalog": "/api/categories, /api/cities (public reads)",
                "favorites": "/api/favorites (authenticated)",
                "organizer": "/api/organizer/request (authenticated)",
                "me": "/api/me (session-aware)",
                "admin": "/api/admin/* (admin only)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
