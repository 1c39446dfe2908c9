//! User Repository

use super::RepoResult;
use shared::models::{User, UserCreate};
use sqlx::SqliteExecutor;

const USER_SELECT: &str =
    "SELECT id, name, email, phone, registered_at, total_entries, is_active FROM users";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Lookup by normalized (trimmed, lower-cased) email
pub async fn find_by_email<'e, E>(executor: E, email: &str) -> RepoResult<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{USER_SELECT} WHERE email = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Insert a new user with the registration entry already counted
///
/// A racing insert of the same email surfaces as `RepoError::Duplicate`.
pub async fn create<'e, E>(executor: E, data: &UserCreate) -> RepoResult<User>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, phone, registered_at, total_entries, is_active) VALUES (?1, ?2, ?3, ?4, ?5, 1, 1) RETURNING id, name, email, phone, registered_at, total_entries, is_active",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(user)
}

/// Add recorded entries to the running total. Returns rows affected.
pub async fn add_entries<'e, E>(executor: E, id: i64, entries: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE users SET total_entries = total_entries + ?1 WHERE id = ?2")
        .bind(entries)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count<'e, E>(executor: E) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await?;
    Ok(n)
}

pub async fn count_active<'e, E>(executor: E) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE is_active = 1")
        .fetch_one(executor)
        .await?;
    Ok(n)
}
