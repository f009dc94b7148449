use chrono::NaiveDate;
use log::info;

use crate::application::dtos::{MonthlyRunsDto, StreakChainDto};
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{
    derive_streak_chain, longest_runs_by_month_str, StreakProfileSource, MAX_STREAK_DAYS,
};

pub(super) async fn get_streak_chain(
    source: &dyn StreakProfileSource,
    user_id: UserId,
) -> Result<StreakChainDto, DomainError> {
    let profile = source.fetch_profile(user_id).await?;
    let chain = profile.derived_chain();

    info!(
        "[streak] chain user_id={} current_streak={} days={}",
        user_id,
        profile.current_streak,
        chain.len()
    );

    Ok(StreakChainDto::new(
        Some(user_id.value()),
        profile.current_streak,
        profile.last_check_in_date,
        &chain,
    ))
}

pub(super) fn derive_chain(
    last_check_in_date: Option<NaiveDate>,
    current_streak: u32,
) -> Result<StreakChainDto, DomainError> {
    if current_streak > MAX_STREAK_DAYS {
        return Err(DomainError::Validation(format!(
            "Streak of {} days exceeds the {} day limit",
            current_streak, MAX_STREAK_DAYS
        )));
    }

    let chain = derive_streak_chain(last_check_in_date, current_streak);
    Ok(StreakChainDto::new(None, current_streak, last_check_in_date, &chain))
}

pub(super) fn get_monthly_runs<S: AsRef<str>>(dates: &[S]) -> Result<MonthlyRunsDto, DomainError> {
    let months = longest_runs_by_month_str(dates)?;
    Ok(MonthlyRunsDto { months })
}
