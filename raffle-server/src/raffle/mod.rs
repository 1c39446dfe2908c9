//! Raffle domain service
//!
//! [`RaffleService`] owns the daily raffle lifecycle, entry recording,
//! registration and the read-side projections. It is cheap to clone and
//! lives in [`ServerState`](crate::core::ServerState).
//!
//! | Submodule | Operations |
//! |-----------|------------|
//! | `lifecycle` | ensure today's raffle, draw a winner |
//! | `draw` | weighted pick over entry counts |
//! | `participation` | record entries |
//! | `registration` | validate and register a user |
//! | `stats` | stats, recent winners, detail views |

pub mod draw;
pub mod lifecycle;
pub mod participation;
pub mod registration;
pub mod stats;

use chrono_tz::Tz;
use shared::models::Raffle;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::repository::raffle as raffle_repo;
use crate::utils::AppResult;

pub use lifecycle::DrawOutcome;
pub use registration::Registration;
pub use stats::{RaffleStats, RecentWinner};

/// Scheduling knobs taken from [`Config`]
#[derive(Debug, Clone)]
pub struct RaffleSettings {
    pub timezone: Tz,
    pub draw_hour: u32,
    pub max_participants: Option<i64>,
}

impl From<&Config> for RaffleSettings {
    fn from(config: &Config) -> Self {
        Self {
            timezone: config.timezone,
            draw_hour: config.draw_hour,
            max_participants: config.max_participants,
        }
    }
}

#[derive(Clone)]
pub struct RaffleService {
    pool: SqlitePool,
    settings: RaffleSettings,
}

impl RaffleService {
    pub fn new(pool: SqlitePool, settings: RaffleSettings) -> Self {
        Self { pool, settings }
    }

    pub fn settings(&self) -> &RaffleSettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fill in the participant set of a raffle row
    async fn with_participants(&self, mut raffle: Raffle) -> AppResult<Raffle> {
        raffle.participants = raffle_repo::participant_ids(&self.pool, raffle.id).await?;
        Ok(raffle)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::user as user_repo;
    use chrono::{DateTime, TimeZone, Utc};
    use shared::models::{User, UserCreate};

    /// 10:00 UTC, ten hours before the default draw
    pub fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
    }

    /// 21:00 UTC, after the default draw
    pub fn evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 21, 0, 0).unwrap()
    }

    fn settings() -> RaffleSettings {
        RaffleSettings {
            timezone: chrono_tz::UTC,
            draw_hour: 20,
            max_participants: Some(100),
        }
    }

    pub async fn service() -> RaffleService {
        let db = DbService::in_memory().await.unwrap();
        RaffleService::new(db.pool, settings())
    }

    /// Service on a WAL database file with a multi-connection pool
    pub async fn file_service(path: &std::path::Path) -> RaffleService {
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();
        RaffleService::new(db.pool, settings())
    }

    pub async fn user(service: &RaffleService, name: &str) -> User {
        user_repo::create(
            service.pool(),
            &UserCreate {
                name: name.into(),
                email: format!("{}@x.com", name.to_lowercase()),
                phone: "+15551234567".into(),
            },
        )
        .await
        .unwrap()
    }

    /// Active raffle for the morning date
    pub async fn active_raffle(service: &RaffleService) -> Raffle {
        service.ensure_raffle_at(morning()).await.unwrap().unwrap()
    }
}
