//! End-to-end organizer workflow scenarios driven over HTTP, with fixtures
//! written straight into the database. Every test skips cleanly when no
//! database is reachable, mirroring the /health degraded state.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

// Fixture ids follow the canonical mapping the seeder writes.
const ADMIN_ROLE: i32 = 1;
const USER_ROLE: i32 = 3;
const ORGANIZER_ROLE: i32 = 4;

async fn setup() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .ok()?;

    // The reference schema must already be applied; skip otherwise.
    for (id, name) in [(1, "admin"), (2, "moderator"), (3, "user"), (4, "organizer")] {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await
            .ok()?;
    }

    Some(pool)
}

async fn create_user(pool: &PgPool, role_id: i32, status: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let email = format!("user-{}@test.example", id.simple());
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, role_id, status, organizer_status)
        VALUES ($1, $2, $3, $4, $5, 'none')
        "#,
    )
    .bind(id)
    .bind("Test User")
    .bind(&email)
    .bind(role_id)
    .bind(status)
    .execute(pool)
    .await?;
    Ok(id)
}

async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String> {
    let token = format!("tok-{}", Uuid::new_v4().simple());
    sqlx::query(
        r#"
        INSERT INTO sessions (id, token, user_id, expires_at)
        VALUES ($1, $2, $3, now() + interval '1 hour')
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&token)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(token)
}

async fn user_state(pool: &PgPool, id: Uuid) -> Result<(i32, String)> {
    let row: (i32, String) =
        sqlx::query_as("SELECT role_id, organizer_status FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(row)
}

async fn request_count(pool: &PgPool, user_id: Uuid, status: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM organizer_requests WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

#[tokio::test]
async fn organizer_request_lifecycle() -> Result<()> {
    let Some(pool) = setup().await else {
        eprintln!("skipping: database unavailable");
        return Ok(());
    };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let user_id = create_user(&pool, USER_ROLE, "active").await?;
    let user_token = create_session(&pool, user_id).await?;
    let admin_id = create_user(&pool, ADMIN_ROLE, "active").await?;
    let admin_token = create_session(&pool, admin_id).await?;

    // Submit creates the profile, the pending request and the pending
    // per-user status, all together.
    let res = client
        .post(format!("{}/api/organizer/request", server.base_url))
        .bearer_auth(&user_token)
        .json(&json!({ "name": "Acme Co", "description": "Local shows" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(request_count(&pool, user_id, "pending").await?, 1);
    let (role_id, organizer_status) = user_state(&pool, user_id).await?;
    assert_eq!(role_id, USER_ROLE);
    assert_eq!(organizer_status, "pending");

    // A second submit while one is pending is a conflict and never creates
    // a second pending row.
    let res = client
        .post(format!("{}/api/organizer/request", server.base_url))
        .bearer_auth(&user_token)
        .json(&json!({ "name": "Acme Co" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(request_count(&pool, user_id, "pending").await?, 1);

    // Unknown decisions are refused before any write.
    let res = client
        .post(format!("{}/api/admin/organizer/validate", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "user_id": user_id, "action": "maybe" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(request_count(&pool, user_id, "pending").await?, 1);

    // Non-admin callers cannot adjudicate.
    let res = client
        .post(format!("{}/api/admin/organizer/validate", server.base_url))
        .bearer_auth(&user_token)
        .json(&json!({ "user_id": user_id, "action": "approve" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Reject: role stays simple user, both statuses flip to rejected, and
    // the reviewer is stamped on the request row.
    let res = client
        .post(format!("{}/api/admin/organizer/validate", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({
            "user_id": user_id,
            "action": "reject",
            "comment": "insufficient info"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let (role_id, organizer_status) = user_state(&pool, user_id).await?;
    assert_eq!(role_id, USER_ROLE);
    assert_eq!(organizer_status, "rejected");

    let (status, reviewed_by, comment): (String, Option<Uuid>, Option<String>) = sqlx::query_as(
        r#"
        SELECT status, reviewed_by, review_comment
        FROM organizer_requests
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(status, "rejected");
    assert_eq!(reviewed_by, Some(admin_id));
    assert_eq!(comment.as_deref(), Some("insufficient info"));

    // A rejection is terminal for the request, not for the user: a fresh
    // submission opens a new pending cycle.
    let res = client
        .post(format!("{}/api/organizer/request", server.base_url))
        .bearer_auth(&user_token)
        .json(&json!({ "name": "Acme Co", "website": "https://acme.example" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(request_count(&pool, user_id, "pending").await?, 1);

    // Approve: the user becomes an organizer and the pending row drains.
    let res = client
        .post(format!("{}/api/admin/organizer/validate", server.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "user_id": user_id, "action": "approve" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let (role_id, organizer_status) = user_state(&pool, user_id).await?;
    assert_eq!(role_id, ORGANIZER_ROLE);
    assert_eq!(organizer_status, "approved");
    assert_eq!(request_count(&pool, user_id, "pending").await?, 0);
    assert_eq!(request_count(&pool, user_id, "approved").await?, 1);

    // Organizers are ineligible to submit again.
    let res = client
        .post(format!("{}/api/organizer/request", server.base_url))
        .bearer_auth(&user_token)
        .json(&json!({ "name": "Acme Co" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Revoke demotes back to a simple user and clears the profile.
    let res = client
        .delete(format!(
            "{}/api/admin/organizer/{}",
            server.base_url, user_id
        ))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let (role_id, organizer_status) = user_state(&pool, user_id).await?;
    assert_eq!(role_id, USER_ROLE);
    assert_eq!(organizer_status, "none");

    let profiles: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM organizer_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(profiles.0, 0);

    Ok(())
}

#[tokio::test]
async fn inactive_account_is_treated_as_anonymous() -> Result<()> {
    let Some(pool) = setup().await else {
        eprintln!("skipping: database unavailable");
        return Ok(());
    };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let user_id = create_user(&pool, USER_ROLE, "inactive").await?;
    let token = create_session(&pool, user_id).await?;

    // The session itself is valid, but the disabled account must resolve
    // to the null identity.
    let res = client
        .get(format!("{}/api/me", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["data"]["user"].is_null());

    let res = client
        .get(format!("{}/api/favorites", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn admin_mutators_overwrite_role_and_status() -> Result<()> {
    let Some(pool) = setup().await else {
        eprintln!("skipping: database unavailable");
        return Ok(());
    };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let target_id = create_user(&pool, USER_ROLE, "active").await?;
    let admin_id = create_user(&pool, ADMIN_ROLE, "active").await?;
    let admin_token = create_session(&pool, admin_id).await?;
    let bystander_id = create_user(&pool, USER_ROLE, "active").await?;
    let bystander_token = create_session(&pool, bystander_id).await?;

    // Non-admin caller is refused and nothing changes.
    let res = client
        .patch(format!(
            "{}/api/admin/users/{}/role",
            server.base_url, target_id
        ))
        .bearer_auth(&bystander_token)
        .json(&json!({ "role_id": ORGANIZER_ROLE }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let (role_id, _) = user_state(&pool, target_id).await?;
    assert_eq!(role_id, USER_ROLE);

    // Admin overwrites the role directly, no workflow bookkeeping.
    let res = client
        .patch(format!(
            "{}/api/admin/users/{}/role",
            server.base_url, target_id
        ))
        .bearer_auth(&admin_token)
        .json(&json!({ "role_id": ORGANIZER_ROLE }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let (role_id, organizer_status) = user_state(&pool, target_id).await?;
    assert_eq!(role_id, ORGANIZER_ROLE);
    assert_eq!(organizer_status, "none");

    // Unknown role ids are refused before any write.
    let res = client
        .patch(format!(
            "{}/api/admin/users/{}/role",
            server.base_url, target_id
        ))
        .bearer_auth(&admin_token)
        .json(&json!({ "role_id": 99 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Status accepts only the recognized strings.
    let res = client
        .patch(format!(
            "{}/api/admin/users/{}/status",
            server.base_url, target_id
        ))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "frozen" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(format!(
            "{}/api/admin/users/{}/status",
            server.base_url, target_id
        ))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "inactive" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}
