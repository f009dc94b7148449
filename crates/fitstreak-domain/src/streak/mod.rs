mod calculator;
mod calendar;
mod profile;

pub use calculator::{
    compute_streak_stats, derive_streak_chain, longest_runs_by_month, longest_runs_by_month_str,
    streak_chain_between, StreakStats, MAX_STREAK_DAYS,
};
pub use calendar::{build_month_calendar, CalendarDay, MonthCalendar, MonthStats};
pub use profile::{StreakProfileSource, UserStreakProfile};
