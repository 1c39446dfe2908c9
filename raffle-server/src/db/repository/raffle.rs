//! Raffle Repository
//!
//! Rows come back without `participants`; callers that expose the
//! participant set load it with [`participant_ids`].

use super::RepoResult;
use shared::models::{Raffle, RaffleCreate, RaffleStatus, RaffleTally};
use sqlx::SqliteExecutor;

const RAFFLE_SELECT: &str = "SELECT id, date, prize_name, prize_value, prize_image, prize_description, status, winner_id, draw_time, drawn_at, max_participants, created_at FROM raffles";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Raffle>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{RAFFLE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Raffle>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_by_date<'e, E>(executor: E, date: &str) -> RepoResult<Option<Raffle>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{RAFFLE_SELECT} WHERE date = ?");
    let row = sqlx::query_as::<_, Raffle>(&sql)
        .bind(date)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// All raffles, newest date first
pub async fn find_all<'e, E>(executor: E) -> RepoResult<Vec<Raffle>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{RAFFLE_SELECT} ORDER BY date DESC");
    let rows = sqlx::query_as::<_, Raffle>(&sql).fetch_all(executor).await?;
    Ok(rows)
}

/// Completed raffles that have a winner, newest date first
pub async fn find_recent_winners<'e, E>(executor: E, limit: i64) -> RepoResult<Vec<Raffle>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "{RAFFLE_SELECT} WHERE status = 'completed' AND winner_id IS NOT NULL ORDER BY date DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, Raffle>(&sql)
        .bind(limit)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// Insert unless a raffle already exists for the date.
///
/// Returns `true` when this call created the row.
pub async fn insert_if_absent<'e, E>(executor: E, data: &RaffleCreate) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let result = sqlx::query(
        "INSERT OR IGNORE INTO raffles (id, date, prize_name, prize_value, prize_image, prize_description, status, draw_time, max_participants, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(id)
    .bind(&data.date)
    .bind(&data.prize.name)
    .bind(&data.prize.value)
    .bind(&data.prize.image)
    .bind(&data.prize.description)
    .bind(data.status)
    .bind(data.draw_time)
    .bind(data.max_participants)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Close an active raffle. Returns rows affected: 0 when it was no longer active.
pub async fn complete<'e, E>(
    executor: E,
    id: i64,
    winner_id: Option<i64>,
    drawn_at: i64,
) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE raffles SET status = ?1, winner_id = ?2, drawn_at = ?3 WHERE id = ?4 AND status = ?5",
    )
    .bind(RaffleStatus::Completed)
    .bind(winner_id)
    .bind(drawn_at)
    .bind(id)
    .bind(RaffleStatus::Active)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Distinct participant ids in join order
pub async fn participant_ids<'e, E>(executor: E, raffle_id: i64) -> RepoResult<Vec<i64>>
where
    E: SqliteExecutor<'e>,
{
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM raffle_participants WHERE raffle_id = ? ORDER BY joined_at, user_id",
    )
    .bind(raffle_id)
    .fetch_all(executor)
    .await?;
    Ok(ids)
}

/// Add a user to the participant set; a repeat join is a no-op.
pub async fn add_participant<'e, E>(
    executor: E,
    raffle_id: i64,
    user_id: i64,
    joined_at: i64,
) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT OR IGNORE INTO raffle_participants (raffle_id, user_id, joined_at) VALUES (?1, ?2, ?3)",
    )
    .bind(raffle_id)
    .bind(user_id)
    .bind(joined_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Distinct participants and summed entries
pub async fn tally<'e, E>(executor: E, raffle_id: i64) -> RepoResult<RaffleTally>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, RaffleTally>(
        "SELECT (SELECT COUNT(*) FROM raffle_participants WHERE raffle_id = ?1) AS participants, (SELECT COALESCE(SUM(entries), 0) FROM participations WHERE raffle_id = ?1) AS total_entries",
    )
    .bind(raffle_id)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

pub async fn count<'e, E>(executor: E) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM raffles")
        .fetch_one(executor)
        .await?;
    Ok(n)
}

pub async fn count_by_status<'e, E>(executor: E, status: RaffleStatus) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM raffles WHERE status = ?")
        .bind(status)
        .fetch_one(executor)
        .await?;
    Ok(n)
}

/// Prize value strings of every completed raffle
pub async fn completed_prize_values<'e, E>(executor: E) -> RepoResult<Vec<String>>
where
    E: SqliteExecutor<'e>,
{
    let values = sqlx::query_scalar::<_, String>(
        "SELECT prize_value FROM raffles WHERE status = 'completed'",
    )
    .fetch_all(executor)
    .await?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::PrizeSnapshot;

    fn create_payload(date: &str, status: RaffleStatus) -> RaffleCreate {
        RaffleCreate {
            date: date.into(),
            prize: PrizeSnapshot {
                name: "Cash Prize".into(),
                value: "$500".into(),
                image: "💰".into(),
                description: "Premio en efectivo".into(),
            },
            status,
            draw_time: 1_760_904_000_000,
            max_participants: Some(100),
        }
    }

    #[tokio::test]
    async fn test_insert_if_absent_is_idempotent_per_date() {
        let db = DbService::in_memory().await.unwrap();
        let payload = create_payload("2026-10-19", RaffleStatus::Active);
        assert!(insert_if_absent(&db.pool, &payload).await.unwrap());
        assert!(!insert_if_absent(&db.pool, &payload).await.unwrap());
        assert_eq!(count(&db.pool).await.unwrap(), 1);

        let raffle = find_by_date(&db.pool, "2026-10-19").await.unwrap().unwrap();
        assert_eq!(raffle.prize.name, "Cash Prize");
        assert_eq!(raffle.status, RaffleStatus::Active);
        assert_eq!(raffle.max_participants, Some(100));
        assert!(raffle.winner_id.is_none());
    }

    #[tokio::test]
    async fn test_complete_only_once() {
        let db = DbService::in_memory().await.unwrap();
        insert_if_absent(&db.pool, &create_payload("2026-10-19", RaffleStatus::Active))
            .await
            .unwrap();
        let raffle = find_by_date(&db.pool, "2026-10-19").await.unwrap().unwrap();

        assert_eq!(complete(&db.pool, raffle.id, None, 1).await.unwrap(), 1);
        assert_eq!(complete(&db.pool, raffle.id, None, 2).await.unwrap(), 0);

        let raffle = find_by_id(&db.pool, raffle.id).await.unwrap().unwrap();
        assert_eq!(raffle.status, RaffleStatus::Completed);
        assert_eq!(raffle.drawn_at, Some(1));
        assert_eq!(count_by_status(&db.pool, RaffleStatus::Completed).await.unwrap(), 1);
        assert_eq!(completed_prize_values(&db.pool).await.unwrap(), vec!["$500"]);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let db = DbService::in_memory().await.unwrap();
        for date in ["2026-10-17", "2026-10-19", "2026-10-18"] {
            insert_if_absent(&db.pool, &create_payload(date, RaffleStatus::Completed))
                .await
                .unwrap();
        }
        let dates: Vec<String> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, ["2026-10-19", "2026-10-18", "2026-10-17"]);
    }

    #[tokio::test]
    async fn test_empty_tally() {
        let db = DbService::in_memory().await.unwrap();
        insert_if_absent(&db.pool, &create_payload("2026-10-19", RaffleStatus::Active))
            .await
            .unwrap();
        let raffle = find_by_date(&db.pool, "2026-10-19").await.unwrap().unwrap();
        assert_eq!(tally(&db.pool, raffle.id).await.unwrap(), RaffleTally::default());
        assert!(participant_ids(&db.pool, raffle.id).await.unwrap().is_empty());
    }
}
