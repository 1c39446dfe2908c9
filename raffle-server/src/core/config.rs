use std::fmt::Display;
use std::str::FromStr;

use chrono_tz::Tz;

use super::ServerError;

/// Admin key used when `ADMIN_KEY` is unset in development
const DEV_ADMIN_KEY: &str = "autopremium-admin-2024";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | data/raffle.db | SQLite file (`:memory:` allowed) |
/// | ENVIRONMENT | development | development / staging / production |
/// | ADMIN_KEY | dev fallback | admin shared secret, required outside development |
/// | BUSINESS_TIMEZONE | UTC | IANA zone for raffle dates and the draw hour |
/// | DRAW_HOUR | 20 | local draw hour (0-23) |
/// | MAX_PARTICIPANTS | 100 | participant cap per raffle, 0 for none |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (unset) | daily rotating log directory |
///
/// # Example
///
/// ```ignore
/// BUSINESS_TIMEZONE=Europe/Madrid HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    pub admin_key: String,
    pub timezone: Tz,
    pub draw_hour: u32,
    /// `None` when no cap is configured
    pub max_participants: Option<i64>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str, dev_fallback: &str) -> Result<String, ServerError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                dev_fallback.to_string()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables use their defaults; malformed values are rejected.
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| ServerError::Config(format!("BUSINESS_TIMEZONE: {e}")))?,
            Err(_) => chrono_tz::UTC,
        };

        let draw_hour: u32 = parse_var("DRAW_HOUR", env_var("DRAW_HOUR").as_deref(), 20)?;
        if draw_hour > 23 {
            return Err(ServerError::Config(format!(
                "DRAW_HOUR must be 0-23, got {draw_hour}"
            )));
        }

        let max_participants: i64 =
            parse_var("MAX_PARTICIPANTS", env_var("MAX_PARTICIPANTS").as_deref(), 100)?;

        Ok(Self {
            http_port: parse_var("HTTP_PORT", env_var("HTTP_PORT").as_deref(), 3000)?,
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/raffle.db".into()),
            admin_key: Self::require_secret("ADMIN_KEY", &environment, DEV_ADMIN_KEY)?,
            environment,
            timezone,
            draw_hour,
            max_participants: (max_participants > 0).then_some(max_participants),
            log_level: env_var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_var("LOG_DIR"),
        })
    }

    /// Development defaults with an in-memory database
    ///
    /// Used by tests
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            environment: "development".into(),
            admin_key: DEV_ADMIN_KEY.into(),
            timezone: chrono_tz::UTC,
            draw_hour: 20,
            max_participants: Some(100),
            log_level: "info".into(),
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Set and non-blank
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, raw: Option<&str>, default: T) -> Result<T, ServerError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| ServerError::Config(format!("{name}: invalid value {value:?}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        assert_eq!(parse_var::<u32>("DRAW_HOUR", None, 20).unwrap(), 20);
        assert_eq!(parse_var::<u32>("DRAW_HOUR", Some(" 18 "), 20).unwrap(), 18);
    }

    #[test]
    fn test_parse_var_rejects_malformed_values() {
        let err = parse_var::<u32>("DRAW_HOUR", Some("abc"), 20).unwrap_err();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.starts_with("DRAW_HOUR")));

        let err = parse_var::<i64>("MAX_PARTICIPANTS", Some("abc"), 100).unwrap_err();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.starts_with("MAX_PARTICIPANTS")));

        assert!(parse_var::<u16>("HTTP_PORT", Some("70000"), 3000).is_err());
    }

    #[test]
    fn test_secret_falls_back_in_development() {
        let key = Config::require_secret("RAFFLE_TEST_UNSET_SECRET", "development", "dev-key")
            .unwrap();
        assert_eq!(key, "dev-key");
    }

    #[test]
    fn test_secret_required_in_production() {
        let err = Config::require_secret("RAFFLE_TEST_UNSET_SECRET", "production", "dev-key")
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_defaults_for_tests() {
        let config = Config::for_tests();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.draw_hour, 20);
        assert_eq!(config.max_participants, Some(100));
    }
}
