use std::sync::Arc;
use std::time::Instant;

use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::raffle::{RaffleService, RaffleSettings};

/// Server state shared by every handler
///
/// Cloning is shallow: the pool and services are reference counted.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Arc<Config> | immutable configuration |
/// | db | DbService | SQLite pool |
/// | raffles | RaffleService | raffle domain service |
/// | started_at | Instant | process start, for health |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub raffles: RaffleService,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let raffles = RaffleService::new(db.pool.clone(), RaffleSettings::from(&config));
        Self {
            config: Arc::new(config),
            db,
            raffles,
            started_at: Instant::now(),
        }
    }

    /// Open the database, run migrations and make sure today's raffle exists
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Database(e.message))?;
        let state = Self::new(config.clone(), db);

        match state.raffles.ensure_todays_raffle().await? {
            Some(raffle) => tracing::info!(
                raffle_id = raffle.id,
                date = %raffle.date,
                status = raffle.status.as_str(),
                "Today's raffle ready"
            ),
            None => tracing::warn!("No raffle for today (prize catalog empty)"),
        }

        Ok(state)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// Whether `key` matches the configured admin key
    pub fn is_admin_key(&self, key: Option<&str>) -> bool {
        key.is_some_and(|k| !k.is_empty() && k == self.config.admin_key)
    }
}
