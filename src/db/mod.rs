//! Database bootstrap: connection pool, schema migrations, admin role.
//!
//! SYSTEM CONTEXT
//! ==============
//! `layra-auth migrate` runs this once at deployment start. Migrations create
//! the four LAYRA collections with their unique keys; provisioning then makes
//! sure the administrative role exists and can use them. Both steps are safe
//! to repeat.


use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::config::{AdminCredential, DbConfig};

/// Collections created by the migrations, with their unique key column.
pub const COLLECTIONS: [(&str, &str); 4] = [
    ("model_config", "username"),
    ("conversations", "conversation_id"),
    ("knowledge_bases", "knowledge_base_id"),
    ("files", "file_id"),
];

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connect the `PostgreSQL` pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn init_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Run migrations, then provision the admin role when configured.
///
/// # Errors
///
/// Returns an error if a migration or provisioning statement fails.
pub async fn bootstrap(pool: &PgPool, admin: Option<&AdminCredential>) -> Result<(), DbError> {
    sqlx::migrate!("src/db/migrations").run(pool).await?;
    info!(collections = COLLECTIONS.len(), "migrations applied");

    match admin {
        Some(admin) => provision_admin(pool, admin).await?,
        None => info!("no admin password configured; skipping admin provisioning"),
    }
    Ok(())
}

async fn provision_admin(pool: &PgPool, admin: &AdminCredential) -> Result<(), sqlx::Error> {
    let exists: bool = sqlx::query("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1) AS present")
        .bind(&admin.user)
        .fetch_one(pool)
        .await?
        .get("present");

    let mut tx = pool.begin().await?;
    if !exists {
        sqlx::query(&create_role_sql(admin)).execute(&mut *tx).await?;
        info!(user = %admin.user, "admin role created");
    }
    for statement in grant_sql(&admin.user) {
        sqlx::query(&statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!(user = %admin.user, "admin role provisioned");
    Ok(())
}

/// `CREATE ROLE` cannot take bind parameters, so the name and password are quoted inline.
pub(crate) fn create_role_sql(admin: &AdminCredential) -> String {
    format!(
        "CREATE ROLE {} WITH LOGIN CREATEROLE PASSWORD {}",
        quote_ident(&admin.user),
        quote_literal(&admin.password)
    )
}

pub(crate) fn grant_sql(user: &str) -> Vec<String> {
    let role = quote_ident(user);
    COLLECTIONS
        .iter()
        .flat_map(|(table, _)| {
            [
                format!("GRANT ALL PRIVILEGES ON TABLE {table} TO {role}"),
                format!("GRANT USAGE, SELECT ON SEQUENCE {table}_id_seq TO {role}"),
            ]
        })
        .collect()
}

pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
