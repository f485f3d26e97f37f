//! # Database Migration Management
//!
//! Schema migrations are embedded in the binary at compile time and applied
//! in order on startup when `auto_migrate` is enabled. Applied versions are
//! tracked in a `schema_migrations` table so reruns are no-ops.

use crate::errors::{Error, Result};
use crate::storage::DbPool;
use sqlx::Row;
use tracing::{debug, info};

/// Embedded migrations, applied in array order.
const MIGRATIONS: &[(i64, &str, &str)] =
    &[(1, "create accounts", include_str!("../../migrations/0001_create_accounts.sql"))];

/// Apply all pending migrations to the given pool.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Database {
        source: e,
        context: "Failed to create schema_migrations table".to_string(),
    })?;

    for (version, description, sql) in MIGRATIONS {
        if is_applied(pool, *version).await? {
            debug!(version, description, "Migration already applied, skipping");
            continue;
        }

        let mut tx = pool.begin().await.map_err(|e| Error::Database {
            source: e,
            context: format!("Failed to begin transaction for migration {}", version),
        })?;

        // SQLite executes one statement per query; split on the statement
        // terminator so multi-statement migration files work.
        for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await.map_err(|e| Error::Database {
                source: e,
                context: format!("Migration {} ({}) failed", version, description),
            })?;
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, description, installed_on) VALUES ($1, $2, $3)",
        )
        .bind(version)
        .bind(description)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::Database {
            source: e,
            context: format!("Failed to record migration {}", version),
        })?;

        tx.commit().await.map_err(|e| Error::Database {
            source: e,
            context: format!("Failed to commit migration {}", version),
        })?;

        info!(version, description, "Applied database migration");
    }

    Ok(())
}

async fn is_applied(pool: &DbPool, version: i64) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM schema_migrations WHERE version = $1")
        .bind(version)
        .fetch_one(pool)
        .await
        .map_err(|e| Error::Database {
            source: e,
            context: "Failed to query schema_migrations".to_string(),
        })?;

    let count: i64 = row.get("n");
    Ok(count > 0)
}
