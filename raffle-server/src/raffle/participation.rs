//! Entry recording

use shared::models::{Participation, ParticipationCreate, ParticipationSource};
use sqlx::SqliteConnection;

use super::RaffleService;
use crate::db::repository::{
    RepoError, begin_write, participation as participation_repo, raffle as raffle_repo,
    user as user_repo,
};
use crate::utils::{AppError, AppResult, ErrorCode};

impl RaffleService {
    /// Record earned entries for a user in an active raffle
    ///
    /// Appends the participation, joins the participant set and raises the
    /// user's `total_entries`, all in one transaction.
    pub async fn record_participation(&self, data: ParticipationCreate) -> AppResult<Participation> {
        if data.entries < 1 {
            return Err(AppError::new(ErrorCode::InvalidEntryCount)
                .with_detail("entries", data.entries));
        }

        let mut tx = begin_write(&self.pool).await?;

        if user_repo::find_by_id(&mut *tx, data.user_id).await?.is_none() {
            return Err(AppError::new(ErrorCode::UserNotFound).with_detail("userId", data.user_id));
        }

        let participation = append_entries(&mut *tx, &data, false).await?;
        user_repo::add_entries(&mut *tx, data.user_id, data.entries).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            user_id = data.user_id,
            raffle_id = data.raffle_id,
            entries = data.entries,
            source = ?data.source,
            "Participation recorded"
        );
        Ok(participation)
    }
}

/// Insert a participation and join the participant set.
///
/// Checks the raffle inside the caller's transaction; `total_entries` is
/// left to the caller.
pub(crate) async fn append_entries(
    conn: &mut SqliteConnection,
    data: &ParticipationCreate,
    is_initial: bool,
) -> AppResult<Participation> {
    let raffle = raffle_repo::find_by_id(&mut *conn, data.raffle_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RaffleNotFound))?;
    if !raffle.is_active() {
        return Err(AppError::new(ErrorCode::RaffleNotActive)
            .with_detail("status", raffle.status.as_str()));
    }

    let now = shared::util::now_millis();
    let participation = participation_repo::create(&mut *conn, data, is_initial, now).await?;
    raffle_repo::add_participant(&mut *conn, data.raffle_id, data.user_id, now).await?;
    Ok(participation)
}

/// Registration entry: one entry, already counted in `total_entries`
pub(crate) fn initial_entry(user_id: i64, raffle_id: i64) -> ParticipationCreate {
    ParticipationCreate {
        user_id,
        raffle_id,
        entries: 1,
        source: ParticipationSource::Registration,
    }
}
