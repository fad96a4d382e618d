use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use agora_api::auth::roles::{self, RoleRegistry};
use agora_api::database::manager::DatabaseManager;
use agora_api::database::models::{AccountStatus, OrganizerStatus};

#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "Agora CLI - administrative tasks for the event platform API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Apply the reference schema to the configured database")]
    InitDb {
        #[arg(long, default_value = "schema.sql")]
        schema: PathBuf,
    },

    #[command(about = "Insert the canonical roles and a bootstrap admin account")]
    Seed {
        #[arg(long)]
        admin_email: String,

        #[arg(long, default_value = "Administrator")]
        admin_name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb { schema } => init_db(&schema).await,
        Commands::Seed {
            admin_email,
            admin_name,
        } => seed(&admin_email, &admin_name).await,
    }
}

async fn init_db(schema: &Path) -> anyhow::Result<()> {
    let sql = std::fs::read_to_string(schema)
        .with_context(|| format!("failed to read schema file {}", schema.display()))?;

    let pool = DatabaseManager::main_pool().await?;

    // The reference schema is plain statements; no function bodies, so a
    // semicolon split is safe.
    for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .with_context(|| format!("failed to execute statement: {statement}"))?;
    }

    println!("Schema applied from {}", schema.display());
    Ok(())
}

async fn seed(admin_email: &str, admin_name: &str) -> anyhow::Result<()> {
    let pool = DatabaseManager::main_pool().await?;
    let registry = RoleRegistry::CANONICAL;

    for (id, name) in [
        (registry.admin, roles::ADMIN),
        (registry.moderator, roles::MODERATOR),
        (registry.user, roles::USER),
        (registry.organizer, roles::ORGANIZER),
    ] {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await?;
    }
    println!("Roles seeded");

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(admin_email)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        println!("Admin account already exists: {admin_email}");
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, role_id, status, organizer_status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(admin_name)
    .bind(admin_email)
    .bind(registry.admin)
    .bind(AccountStatus::Active.as_str())
    .bind(OrganizerStatus::None.as_str())
    .execute(&pool)
    .await?;

    println!("Admin account created: {admin_email} (sessions are issued by the auth provider)");
    Ok(())
}
