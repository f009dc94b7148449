use chrono::NaiveDate;
use log::info;

use crate::application::dtos::StreakStatsDto;
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{compute_streak_stats, StreakProfileSource};

pub(super) async fn get_streak_stats(
    source: &dyn StreakProfileSource,
    user_id: UserId,
    today: NaiveDate,
) -> Result<StreakStatsDto, DomainError> {
    let history = source.fetch_check_in_history(user_id).await?;
    let stats = compute_streak_stats(history, today);

    info!(
        "[streak] stats user_id={} current={} longest={} total={}",
        user_id, stats.current_streak, stats.longest_streak, stats.total_check_in_days
    );

    Ok(StreakStatsDto::new(user_id.value(), &stats))
}
