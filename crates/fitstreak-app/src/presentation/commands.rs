use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::application::commands::{
    CommandHandler, CompleteCombinedTaskCommand, PruneCheckInsCommand, RecordCheckInCommand,
};
use crate::application::services::ConfigService;
use crate::presentation::bootstrap::build_app_state;
use crate::presentation::cli::{Cli, CliCommand};
use crate::presentation::state::AppState;
use fitstreak_domain::shared::DomainError;

/// Run one CLI invocation and return its pretty-printed JSON output
pub async fn run(cli: Cli, config_service: ConfigService) -> Result<String, DomainError> {
    if cli.command == CliCommand::InitConfig {
        config_service
            .save()
            .map_err(|e| DomainError::Infrastructure(format!("{:#}", e)))?;
        return to_json(&serde_json::json!({
            "config_path": config_service.config_path(),
            "config": config_service.config(),
        }));
    }

    let mut config = config_service.config().clone();
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let today = Local::now().date_naive();
    let state = build_app_state(config, cli.in_memory).await?;
    state.apply_retention(today).await;

    execute(&state, cli.command, today).await
}

/// Dispatch a subcommand against a built state
pub async fn execute(
    state: &AppState,
    command: CliCommand,
    today: NaiveDate,
) -> Result<String, DomainError> {
    let handlers = &state.command_handlers;
    let streak = &state.queries.streak;

    match command {
        CliCommand::CheckIn { user, flag, date } => {
            let result = handlers
                .record_check_in
                .handle(RecordCheckInCommand {
                    user_id: user,
                    flag,
                    date: Some(date.unwrap_or(today)),
                })
                .await?;
            to_json(&result)
        }
        CliCommand::CompleteCombined { user, date } => {
            let result = handlers
                .complete_combined_task
                .handle(CompleteCombinedTaskCommand {
                    user_id: user,
                    date: Some(date.unwrap_or(today)),
                })
                .await?;
            to_json(&result)
        }
        CliCommand::Board { user, date } => {
            to_json(&streak.get_task_board(user, date.unwrap_or(today)).await)
        }
        CliCommand::Chain { user, last, streak: count } => match user {
            Some(user) => to_json(&streak.get_streak_chain(user).await?),
            None => to_json(&streak.derive_chain(last, count.unwrap_or(0))?),
        },
        CliCommand::Monthly { dates } => to_json(&streak.get_monthly_runs(dates.as_slice())?),
        CliCommand::Stats { user, today: as_of } => {
            to_json(&streak.get_streak_stats(user, as_of.unwrap_or(today)).await?)
        }
        CliCommand::Calendar { user, year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            to_json(&streak.get_calendar(user, year, month).await?)
        }
        CliCommand::Prune { before } => {
            let result = handlers
                .prune_check_ins
                .handle(PruneCheckInsCommand { before })
                .await?;
            to_json(&result)
        }
        // Nothing to write once the state is built
        CliCommand::InitConfig => to_json(&state.config),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string_pretty(value).map_err(|e| DomainError::Serialization(e.to_string()))
}
