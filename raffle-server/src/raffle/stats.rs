//! Read-side projections: stats, recent winners and detail views

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Participation, Prize, Raffle, RaffleStatus, RaffleTally, User};

use super::RaffleService;
use crate::db::repository::{
    participation as participation_repo, prize as prize_repo, raffle as raffle_repo,
    user as user_repo,
};
use crate::utils::time::{business_date, days_between, format_date, parse_date};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Shown when a winner id no longer resolves to a user
pub const ANONYMOUS_WINNER: &str = "Usuario Anónimo";

/// Winners list length on the landing page
pub const RECENT_WINNERS_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleStats {
    pub total_users: i64,
    pub active_users: i64,
    pub total_raffles: i64,
    pub completed_raffles: i64,
    pub total_participations: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_prize_value: Decimal,
    pub formatted_prize_value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWinner {
    /// Raffle id
    pub id: i64,
    pub winner_name: String,
    /// Prize name
    pub prize: String,
    /// Prize value as shown on the prize, e.g. `$28,000`
    pub value: String,
    pub date: String,
    pub time_ago: String,
}

/// Raffle with participant and entry totals
#[derive(Debug, Clone)]
pub struct RaffleDetail {
    pub raffle: Raffle,
    pub tally: RaffleTally,
}

/// A user's share of the entries in one raffle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOdds {
    pub raffle_id: i64,
    pub user_entries: i64,
    pub total_entries: i64,
    /// Percentage, 0 when the raffle has no entries
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct UserDetail {
    pub user: User,
    /// Newest first
    pub participations: Vec<Participation>,
    /// Odds in today's raffle, `None` when no raffle exists today
    pub odds: Option<UserOdds>,
}

/// Parse a display value such as `$28,000` into a decimal.
///
/// `$` and `,` are stripped; anything unparsable counts as zero.
pub fn parse_prize_value(value: &str) -> Decimal {
    let cleaned: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
    Decimal::from_str(cleaned.trim()).unwrap_or(Decimal::ZERO)
}

/// Format as es-ES US dollars: `28.000,00 US$`.
///
/// es-ES only groups thousands when the integer part has five or more
/// digits, so 1200 is written `1200,00 US$`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if int_part.len() >= 5 {
        let digits: Vec<char> = int_part.chars().collect();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(*ch);
        }
        out
    } else {
        int_part.to_string()
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}\u{a0}US$")
}

/// Spanish relative label for a date `days` ago. Future dates read as today.
pub fn time_ago_label(days: i64) -> String {
    match days {
        d if d <= 0 => "Hoy".to_string(),
        1 => "Ayer".to_string(),
        d if d < 7 => format!("{d} días atrás"),
        d if d < 30 => {
            let weeks = d / 7;
            format!("{weeks} semana{} atrás", if weeks > 1 { "s" } else { "" })
        }
        d => {
            let months = d / 30;
            format!("{months} mes{} atrás", if months > 1 { "es" } else { "" })
        }
    }
}

impl RaffleService {
    pub async fn stats(&self) -> AppResult<RaffleStats> {
        let total_prize_value: Decimal = raffle_repo::completed_prize_values(&self.pool)
            .await?
            .iter()
            .map(|v| parse_prize_value(v))
            .sum();

        Ok(RaffleStats {
            total_users: user_repo::count(&self.pool).await?,
            active_users: user_repo::count_active(&self.pool).await?,
            total_raffles: raffle_repo::count(&self.pool).await?,
            completed_raffles: raffle_repo::count_by_status(&self.pool, RaffleStatus::Completed)
                .await?,
            total_participations: participation_repo::count(&self.pool).await?,
            formatted_prize_value: format_currency(total_prize_value),
            total_prize_value,
        })
    }

    pub async fn recent_winners(&self) -> AppResult<Vec<RecentWinner>> {
        self.recent_winners_at(Utc::now()).await
    }

    /// Latest completed raffles with a winner, labelled relative to `now`'s business date
    pub async fn recent_winners_at(&self, now: DateTime<Utc>) -> AppResult<Vec<RecentWinner>> {
        let today = business_date(now, self.settings.timezone);
        let raffles = raffle_repo::find_recent_winners(&self.pool, RECENT_WINNERS_LIMIT).await?;

        let mut winners = Vec::with_capacity(raffles.len());
        for raffle in raffles {
            let winner_name = match raffle.winner_id {
                Some(id) => user_repo::find_by_id(&self.pool, id).await?.map(|u| u.name),
                None => None,
            };
            let days = parse_date(&raffle.date)
                .map(|d| days_between(d, today))
                .unwrap_or(0);
            winners.push(RecentWinner {
                id: raffle.id,
                winner_name: winner_name.unwrap_or_else(|| ANONYMOUS_WINNER.to_string()),
                prize: raffle.prize.name,
                value: raffle.prize.value,
                date: raffle.date,
                time_ago: time_ago_label(days),
            });
        }
        Ok(winners)
    }

    /// Distinct participants and summed entries for a raffle
    pub async fn tally(&self, raffle_id: i64) -> AppResult<RaffleTally> {
        Ok(raffle_repo::tally(&self.pool, raffle_id).await?)
    }

    /// Every raffle, newest date first (participant sets not loaded)
    pub async fn raffle_history(&self) -> AppResult<Vec<Raffle>> {
        Ok(raffle_repo::find_all(&self.pool).await?)
    }

    pub async fn raffle_detail(&self, raffle_id: i64) -> AppResult<RaffleDetail> {
        let raffle = raffle_repo::find_by_id(&self.pool, raffle_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RaffleNotFound))?;
        let raffle = self.with_participants(raffle).await?;
        let tally = raffle_repo::tally(&self.pool, raffle_id).await?;
        Ok(RaffleDetail { raffle, tally })
    }

    pub async fn user_detail(&self, user_id: i64) -> AppResult<UserDetail> {
        self.user_detail_on(user_id, business_date(Utc::now(), self.settings.timezone))
            .await
    }

    /// User with participations and odds in the raffle dated `today`
    pub async fn user_detail_on(&self, user_id: i64, today: NaiveDate) -> AppResult<UserDetail> {
        let user = user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
        let participations = participation_repo::find_by_user(&self.pool, user_id).await?;

        let odds = match raffle_repo::find_by_date(&self.pool, &format_date(today)).await? {
            Some(raffle) => {
                let user_entries =
                    participation_repo::sum_entries(&self.pool, user_id, raffle.id).await?;
                let total_entries = raffle_repo::tally(&self.pool, raffle.id).await?.total_entries;
                Some(odds_for(raffle.id, user_entries, total_entries))
            }
            None => None,
        };

        Ok(UserDetail {
            user,
            participations,
            odds,
        })
    }

    pub async fn active_prizes(&self) -> AppResult<Vec<Prize>> {
        Ok(prize_repo::find_active(&self.pool).await?)
    }
}

fn odds_for(raffle_id: i64, user_entries: i64, total_entries: i64) -> UserOdds {
    let percentage = if total_entries > 0 {
        user_entries as f64 / total_entries as f64 * 100.0
    } else {
        0.0
    };
    UserOdds {
        raffle_id,
        user_entries,
        total_entries,
        percentage,
    }
}
