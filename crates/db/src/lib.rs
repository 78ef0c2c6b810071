//! Persistence layer: pool bootstrap, migrations, row models and repositories.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default pool size when `DB_MAX_CONNECTIONS` is unset.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while assembling the database URL from the environment.
#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{0} must be set when DATABASE_URL is not")]
    Missing(&'static str),

    #[error("{name} must be a number, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the PostgreSQL cache database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    ///
    /// | Env Var              | Default | Notes                               |
    /// |----------------------|---------|-------------------------------------|
    /// | `DATABASE_URL`       | --      | Wins over the discrete `DB_*` vars  |
    /// | `DB_HOST`            | --      | Required without `DATABASE_URL`     |
    /// | `DB_PORT`            | `5432`  |                                     |
    /// | `DB_USER`            | --      | Required without `DATABASE_URL`     |
    /// | `DB_PASSWORD`        | empty   |                                     |
    /// | `DB_NAME`            | --      | Required without `DATABASE_URL`     |
    /// | `DB_MAX_CONNECTIONS` | `10`    |                                     |
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`DatabaseConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value.parse().map_err(|_| DbConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            return Ok(Self {
                url,
                max_connections,
            });
        }

        let host = lookup("DB_HOST").ok_or(DbConfigError::Missing("DB_HOST"))?;
        let port: u16 = match lookup("DB_PORT") {
            Some(value) => value.parse().map_err(|_| DbConfigError::Invalid {
                name: "DB_PORT",
                value,
            })?,
            None => 5432,
        };
        let user = lookup("DB_USER").ok_or(DbConfigError::Missing("DB_USER"))?;
        let password = lookup("DB_PASSWORD").unwrap_or_default();
        let name = lookup("DB_NAME").ok_or(DbConfigError::Missing("DB_NAME"))?;

        Ok(Self {
            url: format!("postgres://{user}:{password}@{host}:{port}/{name}"),
            max_connections,
        })
    }
}

/// Create a connection pool from the given settings.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query to prove the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
