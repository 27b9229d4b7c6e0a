use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::password::Hasher;
use crate::config::AppConfig;

/// Process-wide collaborators, initialized once at startup and passed by
/// reference to every component needing them.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub hasher: Hasher,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        let hasher = Hasher::new(&config.hash)?;
        Ok(Self { db, config, hasher })
    }
}
