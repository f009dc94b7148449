use chrono::{Months, NaiveDate};
use log::info;

use crate::application::dtos::CalendarDto;
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{build_month_calendar, StreakProfileSource};

pub(super) async fn get_calendar(
    source: &dyn StreakProfileSource,
    user_id: UserId,
    year: i32,
    month: u32,
) -> Result<CalendarDto, DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation(format!("Invalid month: {}", month)));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;
    let last_day = first_day
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let history = source.fetch_check_in_history(user_id).await?;
    let profile = source.fetch_profile(user_id).await?;
    let active_chain = profile.chain_between(first_day, last_day);

    let calendar = build_month_calendar(year, month, &history, &active_chain)?;

    info!(
        "[streak] calendar user_id={} month={}-{:02} checked_in_days={}",
        user_id, year, month, calendar.stats.checked_in_days
    );

    Ok(CalendarDto::new(user_id.value(), &calendar))
}
