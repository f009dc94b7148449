use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calculator::{derive_streak_chain, streak_chain_between};
use crate::shared::{DomainError, UserId};

/// Streak counters owned by the remote platform; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStreakProfile {
    pub user_id: UserId,
    pub current_streak: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

impl UserStreakProfile {
    pub fn new(user_id: UserId, current_streak: u32, last_check_in_date: Option<NaiveDate>) -> Self {
        Self {
            user_id,
            current_streak,
            last_check_in_date,
        }
    }

    /// Display chain for this profile, oldest first
    pub fn derived_chain(&self) -> Vec<NaiveDate> {
        derive_streak_chain(self.last_check_in_date, self.current_streak)
    }

    /// Chain days inside `from..=to` only
    pub fn chain_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        streak_chain_between(self.last_check_in_date, self.current_streak, from, to)
    }
}

/// Remote profile service
#[async_trait]
pub trait StreakProfileSource: Send + Sync {
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserStreakProfile, DomainError>;

    /// Every calendar date on which the user checked in, in no particular order.
    async fn fetch_check_in_history(&self, user_id: UserId) -> Result<Vec<NaiveDate>, DomainError>;

    /// Notify the platform of a check-in. The server owns the streak counters.
    async fn submit_check_in(&self, user_id: UserId) -> Result<(), DomainError>;
}
