//! Daily raffle lifecycle: lazy creation and the draw

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shared::models::{PrizeSnapshot, Raffle, RaffleCreate, RaffleStatus, User};

use super::RaffleService;
use super::draw::pick_weighted;
use crate::db::repository::{participation as participation_repo, prize as prize_repo};
use crate::db::repository::{RepoError, begin_write, raffle as raffle_repo, user as user_repo};
use crate::utils::time::{business_date, date_hms_to_millis, format_date};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Result of a completed draw
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub raffle: Raffle,
    /// `None` when nobody participated
    pub winner: Option<User>,
}

impl RaffleService {
    /// Today's raffle, created on first use.
    ///
    /// Returns `None` only when the active prize catalog is empty.
    pub async fn ensure_todays_raffle(&self) -> AppResult<Option<Raffle>> {
        self.ensure_raffle_at(Utc::now()).await
    }

    pub async fn ensure_raffle_at(&self, now: DateTime<Utc>) -> AppResult<Option<Raffle>> {
        let tz = self.settings.timezone;
        let date = business_date(now, tz);
        let key = format_date(date);

        if let Some(raffle) = raffle_repo::find_by_date(&self.pool, &key).await? {
            return Ok(Some(self.with_participants(raffle).await?));
        }

        let prizes = prize_repo::find_active(&self.pool).await?;
        let picked = {
            let mut rng = rand::thread_rng();
            prizes.choose(&mut rng)
        };
        let Some(prize) = picked else {
            tracing::warn!(date = %key, "No active prizes, skipping raffle creation");
            return Ok(None);
        };

        let draw_time = date_hms_to_millis(date, self.settings.draw_hour, 0, 0, tz);
        let status = if draw_time > now.timestamp_millis() {
            RaffleStatus::Active
        } else {
            RaffleStatus::Completed
        };

        let payload = RaffleCreate {
            date: key.clone(),
            prize: PrizeSnapshot::from(prize),
            status,
            draw_time,
            max_participants: self.settings.max_participants,
        };
        if raffle_repo::insert_if_absent(&self.pool, &payload).await? {
            tracing::info!(
                date = %key,
                prize = %payload.prize.name,
                status = status.as_str(),
                draw_time,
                "Daily raffle created"
            );
        }

        let raffle = raffle_repo::find_by_date(&self.pool, &key)
            .await?
            .ok_or_else(|| AppError::internal(format!("Raffle for {key} missing after insert")))?;
        Ok(Some(self.with_participants(raffle).await?))
    }

    /// Draw a winner for an active raffle and close it
    pub async fn draw_winner(&self, raffle_id: i64) -> AppResult<DrawOutcome> {
        let mut rng = StdRng::from_entropy();
        self.draw_winner_with(raffle_id, &mut rng).await
    }

    /// Draw with a caller-supplied random source
    ///
    /// Fails with `RaffleNotFound` (404) or `RaffleNotActive` (400). The
    /// closing update only matches an active row, so of two concurrent
    /// draws exactly one succeeds.
    pub async fn draw_winner_with<R>(&self, raffle_id: i64, rng: &mut R) -> AppResult<DrawOutcome>
    where
        R: Rng + ?Sized,
    {
        let mut tx = begin_write(&self.pool).await?;

        let raffle = raffle_repo::find_by_id(&mut *tx, raffle_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RaffleNotFound))?;
        if !raffle.is_active() {
            return Err(AppError::new(ErrorCode::RaffleNotActive)
                .with_detail("status", raffle.status.as_str()));
        }

        let weights = participation_repo::weights_for_raffle(&mut *tx, raffle_id).await?;
        let winner_id = pick_weighted(&weights, rng);
        let drawn_at = shared::util::now_millis();

        let updated = raffle_repo::complete(&mut *tx, raffle_id, winner_id, drawn_at).await?;
        if updated == 0 {
            return Err(AppError::new(ErrorCode::RaffleNotActive));
        }
        tx.commit().await.map_err(RepoError::from)?;

        let winner = match winner_id {
            Some(id) => user_repo::find_by_id(&self.pool, id).await?,
            None => None,
        };
        match &winner {
            Some(user) => tracing::info!(
                raffle_id,
                winner_id = user.id,
                total_entries = weights.iter().map(|(_, e)| e).sum::<i64>(),
                "Raffle drawn"
            ),
            None => tracing::info!(raffle_id, "Raffle closed without participants"),
        }

        let raffle = raffle_repo::find_by_id(&self.pool, raffle_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RaffleNotFound))?;
        Ok(DrawOutcome {
            raffle: self.with_participants(raffle).await?,
            winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::TimeZone;
    use shared::models::{ParticipationCreate, ParticipationSource};

    #[tokio::test]
    async fn test_ensure_creates_active_raffle_before_draw_hour() {
        let service = service().await;
        let raffle = service.ensure_raffle_at(morning()).await.unwrap().unwrap();
        assert_eq!(raffle.date, "2026-10-19");
        assert_eq!(raffle.status, RaffleStatus::Active);
        assert_eq!(raffle.max_participants, Some(100));
        assert!(raffle.participants.is_empty());

        let expected = Utc
            .with_ymd_and_hms(2026, 10, 19, 20, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(raffle.draw_time, expected);
    }

    #[tokio::test]
    async fn test_ensure_after_draw_hour_creates_completed_raffle() {
        let service = service().await;
        let raffle = service.ensure_raffle_at(evening()).await.unwrap().unwrap();
        assert_eq!(raffle.status, RaffleStatus::Completed);
        assert!(raffle.winner_id.is_none());
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let service = service().await;
        let first = service.ensure_raffle_at(morning()).await.unwrap().unwrap();
        for _ in 0..5 {
            let again = service.ensure_raffle_at(morning()).await.unwrap().unwrap();
            assert_eq!(again.id, first.id);
            assert_eq!(again.prize, first.prize);
        }
        assert_eq!(raffle_repo::count(service.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ensure_with_empty_catalog_reports_no_raffle() {
        let service = service().await;
        sqlx::query("UPDATE prizes SET is_active = 0")
            .execute(service.pool())
            .await
            .unwrap();
        assert!(service.ensure_raffle_at(morning()).await.unwrap().is_none());
        assert_eq!(raffle_repo::count(service.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_draw_without_participants_completes_with_no_winner() {
        let service = service().await;
        let raffle = active_raffle(&service).await;

        let outcome = service.draw_winner(raffle.id).await.unwrap();
        assert!(outcome.winner.is_none());
        assert_eq!(outcome.raffle.status, RaffleStatus::Completed);
        assert!(outcome.raffle.winner_id.is_none());
        assert!(outcome.raffle.drawn_at.is_some());
    }

    #[tokio::test]
    async fn test_draw_picks_a_participant_and_is_terminal() {
        let service = service().await;
        let raffle = active_raffle(&service).await;
        let ana = user(&service, "Ana").await;
        let luis = user(&service, "Luis").await;
        for (user_id, entries) in [(ana.id, 2), (luis.id, 1)] {
            service
                .record_participation(ParticipationCreate {
                    user_id,
                    raffle_id: raffle.id,
                    entries,
                    source: ParticipationSource::DailyVisit,
                })
                .await
                .unwrap();
        }

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = service.draw_winner_with(raffle.id, &mut rng).await.unwrap();
        let winner = outcome.winner.unwrap();
        assert!(winner.id == ana.id || winner.id == luis.id);
        assert_eq!(outcome.raffle.winner_id, Some(winner.id));
        assert_eq!(outcome.raffle.status, RaffleStatus::Completed);

        let err = service.draw_winner(raffle.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RaffleNotActive);
        let stored = raffle_repo::find_by_id(service.pool(), raffle.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.winner_id, Some(winner.id));
    }

    #[tokio::test]
    async fn test_draw_unknown_raffle_is_not_found() {
        let service = service().await;
        let err = service.draw_winner(404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RaffleNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_completed_implies_winner_or_no_participations() {
        let service = service().await;
        let raffle = active_raffle(&service).await;
        let ana = user(&service, "Ana").await;
        service
            .record_participation(ParticipationCreate {
                user_id: ana.id,
                raffle_id: raffle.id,
                entries: 1,
                source: ParticipationSource::Referral,
            })
            .await
            .unwrap();
        service.draw_winner(raffle.id).await.unwrap();

        for raffle in raffle_repo::find_all(service.pool()).await.unwrap() {
            if raffle.status == RaffleStatus::Completed {
                let weights = participation_repo::weights_for_raffle(service.pool(), raffle.id)
                    .await
                    .unwrap();
                assert!(raffle.winner_id.is_some() || weights.is_empty());
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_draws_close_raffle_once() {
        let dir = tempfile::tempdir().unwrap();
        let service = file_service(&dir.path().join("raffle.db")).await;
        let ana = user(&service, "Ana").await;

        for day in 0..5 {
            let now = morning() + chrono::Duration::days(day);
            let raffle_id = service.ensure_raffle_at(now).await.unwrap().unwrap().id;
            service
                .record_participation(ParticipationCreate {
                    user_id: ana.id,
                    raffle_id,
                    entries: 1,
                    source: ParticipationSource::DailyVisit,
                })
                .await
                .unwrap();

            let first = tokio::spawn({
                let service = service.clone();
                async move { service.draw_winner(raffle_id).await }
            });
            let second = tokio::spawn({
                let service = service.clone();
                async move { service.draw_winner(raffle_id).await }
            });
            let (first, second) = tokio::join!(first, second);

            let (outcome, err) = match (first.unwrap(), second.unwrap()) {
                (Ok(outcome), Err(err)) | (Err(err), Ok(outcome)) => (outcome, err),
                other => panic!("expected exactly one draw to succeed, got {other:?}"),
            };
            assert_eq!(err.code, ErrorCode::RaffleNotActive);
            assert_eq!(outcome.winner.map(|u| u.id), Some(ana.id));
            assert_eq!(outcome.raffle.status, RaffleStatus::Completed);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_entry_racing_a_draw_is_rejected_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        let service = file_service(&dir.path().join("raffle.db")).await;
        let ana = user(&service, "Ana").await;
        let ana_id = ana.id;
        let raffle_id = active_raffle(&service).await.id;

        let entry = tokio::spawn({
            let service = service.clone();
            async move {
                service
                    .record_participation(ParticipationCreate {
                        user_id: ana_id,
                        raffle_id,
                        entries: 2,
                        source: ParticipationSource::TestDrive,
                    })
                    .await
            }
        });
        let draw = tokio::spawn({
            let service = service.clone();
            async move { service.draw_winner(raffle_id).await }
        });
        let (entry, draw) = tokio::join!(entry, draw);

        let outcome = draw.unwrap().unwrap();
        match entry.unwrap() {
            // recorded before the draw closed the raffle
            Ok(_) => assert_eq!(outcome.raffle.winner_id, Some(ana_id)),
            Err(err) => {
                assert_eq!(err.code, ErrorCode::RaffleNotActive);
                assert!(outcome.winner.is_none());
                let stored = user_repo::find_by_id(service.pool(), ana_id)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(stored.total_entries, 1);
            }
        }
    }
}
