//! Participation Repository (append-only)

use super::RepoResult;
use shared::models::{Participation, ParticipationCreate};
use sqlx::SqliteExecutor;

const PARTICIPATION_COLUMNS: &str =
    "id, user_id, raffle_id, entries, source, is_initial, participated_at";

pub async fn create<'e, E>(
    executor: E,
    data: &ParticipationCreate,
    is_initial: bool,
    participated_at: i64,
) -> RepoResult<Participation>
where
    E: SqliteExecutor<'e>,
{
    let id = shared::util::snowflake_id();
    let sql = format!(
        "INSERT INTO participations ({PARTICIPATION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {PARTICIPATION_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Participation>(&sql)
        .bind(id)
        .bind(data.user_id)
        .bind(data.raffle_id)
        .bind(data.entries)
        .bind(data.source)
        .bind(is_initial)
        .bind(participated_at)
        .fetch_one(executor)
        .await?;
    Ok(row)
}

/// `(user_id, entries)` per participation in insertion order
pub async fn weights_for_raffle<'e, E>(executor: E, raffle_id: i64) -> RepoResult<Vec<(i64, i64)>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, (i64, i64)>(
        "SELECT user_id, entries FROM participations WHERE raffle_id = ? ORDER BY participated_at, id",
    )
    .bind(raffle_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// A user's participations, newest first
pub async fn find_by_user<'e, E>(executor: E, user_id: i64) -> RepoResult<Vec<Participation>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {PARTICIPATION_COLUMNS} FROM participations WHERE user_id = ? ORDER BY participated_at DESC, id DESC"
    );
    let rows = sqlx::query_as::<_, Participation>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn sum_entries<'e, E>(executor: E, user_id: i64, raffle_id: i64) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(entries), 0) FROM participations WHERE user_id = ? AND raffle_id = ?",
    )
    .bind(user_id)
    .bind(raffle_id)
    .fetch_one(executor)
    .await?;
    Ok(n)
}

pub async fn count<'e, E>(executor: E) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM participations")
        .fetch_one(executor)
        .await?;
    Ok(n)
}
