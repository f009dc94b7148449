use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::dtos::{
    CalendarDto, MonthlyRunsDto, StreakChainDto, StreakStatsDto, TaskBoardDto,
};
use fitstreak_domain::check_in::CheckInRecorder;
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::StreakProfileSource;

mod board;
mod calendar;
mod chain;
mod stats;


/// Read side: streak displays, monthly runs, calendars and the task board
pub struct StreakQueries {
    recorder: Arc<CheckInRecorder>,
    profile_source: Option<Arc<dyn StreakProfileSource>>,
}

impl StreakQueries {
    pub fn new(recorder: Arc<CheckInRecorder>) -> Self {
        Self {
            recorder,
            profile_source: None,
        }
    }

    pub fn with_profile_source(mut self, source: Arc<dyn StreakProfileSource>) -> Self {
        self.profile_source = Some(source);
        self
    }

    /// Display chain from the user's remote streak profile
    pub async fn get_streak_chain(&self, user_id: UserId) -> Result<StreakChainDto, DomainError> {
        chain::get_streak_chain(self.profile_source()?, user_id).await
    }

    /// Display chain from already-known counters, no remote call
    pub fn derive_chain(
        &self,
        last_check_in_date: Option<NaiveDate>,
        current_streak: u32,
    ) -> Result<StreakChainDto, DomainError> {
        chain::derive_chain(last_check_in_date, current_streak)
    }

    pub fn get_monthly_runs<S: AsRef<str>>(
        &self,
        dates: &[S],
    ) -> Result<MonthlyRunsDto, DomainError> {
        chain::get_monthly_runs(dates)
    }

    pub async fn get_streak_stats(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<StreakStatsDto, DomainError> {
        stats::get_streak_stats(self.profile_source()?, user_id, today).await
    }

    pub async fn get_calendar(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<CalendarDto, DomainError> {
        calendar::get_calendar(self.profile_source()?, user_id, year, month).await
    }

    pub async fn get_task_board(&self, user_id: UserId, day: NaiveDate) -> TaskBoardDto {
        board::get_task_board(&self.recorder, user_id, day).await
    }

    fn profile_source(&self) -> Result<&dyn StreakProfileSource, DomainError> {
        self.profile_source.as_deref().ok_or_else(|| {
            DomainError::Validation(
                "Profile service is not configured (set profile_service.base_url)".to_string(),
            )
        })
    }
}
