use chrono::NaiveDate;
use serde::Deserialize;

use fitstreak_domain::check_in::date_from_iso_datetime;
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{UserStreakProfile, MAX_STREAK_DAYS};

pub const USER_AGENT: &str = concat!("fitstreak/", env!("CARGO_PKG_VERSION"));

/// HTTP retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: u32,
    /// Initial backoff duration in milliseconds (default: 500ms)
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds (default: 8000ms)
    pub max_backoff_ms: u64,
    /// Backoff multiplier (default: 2.0)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// `GET /users/{id}/streak`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakProfilePayload {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_check_in_date: Option<String>,
}

impl StreakProfilePayload {
    pub fn into_profile(self, user_id: UserId) -> Result<UserStreakProfile, DomainError> {
        if self.current_streak > MAX_STREAK_DAYS {
            return Err(DomainError::ExternalService(format!(
                "Implausible currentStreak {} for user {}",
                self.current_streak, user_id
            )));
        }

        let last_check_in_date = match self.last_check_in_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(date_from_iso_datetime(raw)?),
        };

        Ok(UserStreakProfile::new(
            user_id,
            self.current_streak,
            last_check_in_date,
        ))
    }
}

/// `GET /users/{id}/check-ins`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInHistoryPayload {
    #[serde(default)]
    pub dates: Vec<String>,
}

impl CheckInHistoryPayload {
    pub fn into_dates(self) -> Result<Vec<NaiveDate>, DomainError> {
        self.dates
            .iter()
            .map(|raw| date_from_iso_datetime(raw))
            .collect()
    }
}
