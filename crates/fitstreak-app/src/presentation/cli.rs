use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::services::LogLevel;
use fitstreak_domain::check_in::{parse_calendar_date, CheckInFlag};
use fitstreak_domain::shared::UserId;

/// Daily check-in flags and streak views
#[derive(Debug, Parser)]
#[command(name = "fitstreak", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "FITSTREAK_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides `database_path`
    #[arg(long, global = true, env = "FITSTREAK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Keep check-ins in memory for this run only
    #[arg(long, global = true, env = "FITSTREAK_IN_MEMORY")]
    pub in_memory: bool,

    #[arg(long, global = true, env = "FITSTREAK_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Record one completion flag for a day
    CheckIn {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        flag: CheckInFlag,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_calendar_date)]
        date: Option<NaiveDate>,
    },

    /// Grant the combined credit once `comment` and `post_article` are both done
    CompleteCombined {
        #[arg(long)]
        user: UserId,
        #[arg(long, value_parser = parse_calendar_date)]
        date: Option<NaiveDate>,
    },

    /// Completion state of every task for a day
    Board {
        #[arg(long)]
        user: UserId,
        #[arg(long, value_parser = parse_calendar_date)]
        date: Option<NaiveDate>,
    },

    /// Streak chain, from the profile service or from explicit counters
    #[command(group(ArgGroup::new("source").required(true).args(["user", "last"])))]
    Chain {
        #[arg(long)]
        user: Option<UserId>,
        #[arg(long, value_parser = parse_calendar_date, conflicts_with = "user")]
        last: Option<NaiveDate>,
        #[arg(long, requires = "last")]
        streak: Option<u32>,
    },

    /// Longest consecutive run per month
    Monthly {
        #[arg(value_name = "DATE")]
        dates: Vec<String>,
    },

    /// Current, longest and total streak figures
    Stats {
        #[arg(long)]
        user: UserId,
        #[arg(long, value_parser = parse_calendar_date)]
        today: Option<NaiveDate>,
    },

    /// Month view with check-in and active-streak markers
    Calendar {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Delete stored check-ins dated before a day
    Prune {
        #[arg(long, value_parser = parse_calendar_date)]
        before: NaiveDate,
    },

    /// Write the effective configuration file
    InitConfig,
}
