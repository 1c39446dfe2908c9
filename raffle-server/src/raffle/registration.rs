//! Public registration

use chrono::{DateTime, Utc};
use shared::models::{Raffle, User, UserCreate};

use super::RaffleService;
use super::participation::{append_entries, initial_entry};
use crate::db::repository::{RepoError, begin_write, user as user_repo};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_phone,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    /// Today's raffle, if one exists
    pub raffle: Option<Raffle>,
    /// Whether the registration entry was placed in `raffle`
    pub entered: bool,
}

/// Check the raw form fields and normalize them for storage.
///
/// Missing fields are reported before format errors. Email is trimmed and
/// lower-cased, name and phone are trimmed.
pub fn validate_registration(
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> AppResult<UserCreate> {
    let (Some(name), Some(email), Some(phone)) = (name, email, phone) else {
        return Err(AppError::new(ErrorCode::RequiredField));
    };
    if [name, email, phone].iter().any(|v| v.trim().is_empty()) {
        return Err(AppError::new(ErrorCode::RequiredField));
    }

    let name = name.trim();
    let email = email.trim().to_lowercase();
    let phone = phone.trim();

    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_email(&email)?;
    validate_phone(phone)?;

    Ok(UserCreate {
        name: name.to_string(),
        email,
        phone: phone.to_string(),
    })
}

/// A racing registration with the same email is a 409; any other unique
/// clash (row id) is a server fault.
fn create_user_error(err: RepoError) -> AppError {
    match err {
        e if e.is_unique_on("users.email") => AppError::new(ErrorCode::EmailAlreadyRegistered),
        RepoError::Duplicate(msg) => RepoError::Database(msg).into(),
        other => other.into(),
    }
}

impl RaffleService {
    pub async fn register(&self, data: UserCreate) -> AppResult<Registration> {
        self.register_at(data, Utc::now()).await
    }

    /// Create the user and enter them in the raffle for `now`'s business date
    pub async fn register_at(&self, data: UserCreate, now: DateTime<Utc>) -> AppResult<Registration> {
        if user_repo::find_by_email(&self.pool, &data.email).await?.is_some() {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
        }

        let raffle = self.ensure_raffle_at(now).await?;

        let mut tx = begin_write(&self.pool).await?;
        let user = user_repo::create(&mut *tx, &data)
            .await
            .map_err(create_user_error)?;

        let entered = match raffle.as_ref().filter(|r| r.is_active()) {
            Some(r) => match append_entries(&mut *tx, &initial_entry(user.id, r.id), true).await {
                Ok(_) => true,
                // drawn in the meantime
                Err(e) if e.code == ErrorCode::RaffleNotActive => false,
                Err(e) => return Err(e),
            },
            None => false,
        };
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            user_id = user.id,
            raffle_id = raffle.as_ref().map(|r| r.id),
            entered,
            "User registered"
        );

        let raffle = match raffle {
            Some(r) => Some(self.refresh(r.id).await?),
            None => None,
        };
        Ok(Registration {
            user,
            raffle,
            entered,
        })
    }

    async fn refresh(&self, raffle_id: i64) -> AppResult<Raffle> {
        let raffle = crate::db::repository::raffle::find_by_id(&self.pool, raffle_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RaffleNotFound))?;
        self.with_participants(raffle).await
    }
}
