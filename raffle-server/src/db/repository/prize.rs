//! Prize Catalog Repository

use super::RepoResult;
use shared::models::Prize;
use sqlx::SqliteExecutor;

pub async fn find_active<'e, E>(executor: E) -> RepoResult<Vec<Prize>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, Prize>(
        "SELECT id, name, value, image, description, category, rarity, is_active FROM prizes WHERE is_active = 1 ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(rows)
}
