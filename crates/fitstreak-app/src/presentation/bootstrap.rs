use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::StreakQueries;
use crate::application::services::{AppConfig, ProfileServiceConfig};
use crate::application::ResultExt;
use crate::presentation::state::{AppState, CommandHandlers, Queries, Runtime};
use fitstreak_domain::check_in::{CheckInRecorder, CheckInStore};
use fitstreak_domain::shared::DomainError;
use fitstreak_domain::streak::StreakProfileSource;
use fitstreak_infrastructure::http::{HttpStreakProfileClient, RetryConfig};
use fitstreak_infrastructure::persistence::{
    repositories::{InMemoryCheckInStore, SqliteCheckInStore},
    Database,
};

pub async fn build_app_state(config: AppConfig, in_memory: bool) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();

    let (store, database): (Arc<dyn CheckInStore>, Option<Arc<Database>>) = if in_memory {
        info!("Using in-memory check-in store");
        (
            Arc::new(InMemoryCheckInStore::new()) as Arc<dyn CheckInStore>,
            None,
        )
    } else {
        let db_path = config
            .database_path
            .to_str()
            .ok_or_else(|| DomainError::Infrastructure("Invalid database path".to_string()))?;
        info!("Database path: {}", db_path);

        let started_at = Instant::now();
        let database = Database::new(db_path).await?;
        database.run_migrations().await?;
        info!(
            "✓ Database ready ({}ms)",
            started_at.elapsed().as_millis()
        );

        let pool = Arc::new(database.pool().clone());
        (
            Arc::new(SqliteCheckInStore::new(pool)) as Arc<dyn CheckInStore>,
            Some(Arc::new(database)),
        )
    };

    let profile_source = build_profile_source(&config.profile_service)?;
    let recorder = Arc::new(CheckInRecorder::new(store));

    let mut record_check_in = RecordCheckInCommandHandler::new(recorder.clone());
    let mut streak_queries = StreakQueries::new(recorder.clone());
    if let Some(source) = &profile_source {
        record_check_in = record_check_in.with_profile_source(source.clone());
        streak_queries = streak_queries.with_profile_source(source.clone());
    }

    let command_handlers = CommandHandlers {
        record_check_in: Arc::new(record_check_in),
        complete_combined_task: Arc::new(CompleteCombinedTaskCommandHandler::new(
            recorder.clone(),
        )),
        prune_check_ins: Arc::new(PruneCheckInsCommandHandler::new(recorder)),
    };

    info!(
        "✓ App state ready in {}ms (profile_service={})",
        startup_started_at.elapsed().as_millis(),
        profile_source.is_some()
    );

    Ok(AppState {
        runtime: Runtime {
            database,
            profile_source,
        },
        command_handlers,
        queries: Queries {
            streak: Arc::new(streak_queries),
        },
        config,
    })
}

fn build_profile_source(
    config: &ProfileServiceConfig,
) -> Result<Option<Arc<dyn StreakProfileSource>>, DomainError> {
    let Some(base_url) = config.base_url.as_deref() else {
        return Ok(None);
    };

    let mut client = HttpStreakProfileClient::with_retry_config(
        base_url,
        RetryConfig::with_max_retries(config.max_retries),
    )
    .to_infra_err()?;

    if let Some(token) = &config.api_token {
        client = client.with_api_token(token.clone());
    }

    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::RecordCheckInCommand;
    use crate::application::commands::CommandHandler;
    use crate::application::test_support::date;
    use fitstreak_domain::check_in::CheckInFlag;
    use fitstreak_domain::shared::UserId;

    #[tokio::test]
    async fn test_in_memory_state_without_profile_service() {
        let state = build_app_state(AppConfig::default(), true).await.unwrap();

        assert!(state.runtime.database.is_none());
        assert!(state.runtime.profile_source.is_none());
        assert_eq!(state.apply_retention(date("2024-05-01")).await, None);
    }

    #[tokio::test]
    async fn test_profile_service_is_wired_from_config() {
        let mut config = AppConfig::default();
        config.profile_service.base_url = Some("https://api.example.com/v1".to_string());
        config.profile_service.api_token = Some("secret".to_string());

        let state = build_app_state(config, true).await.unwrap();
        assert!(state.runtime.profile_source.is_some());
    }

    #[tokio::test]
    async fn test_invalid_profile_url_is_an_infrastructure_error() {
        let mut config = AppConfig::default();
        config.profile_service.base_url = Some("not a url".to_string());

        let result = build_app_state(config, true).await;
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_retention_sweep_uses_keep_days() {
        let mut config = AppConfig::default();
        config.retention.keep_days = Some(7);
        let state = build_app_state(config, true).await.unwrap();

        for day in ["2024-04-20", "2024-04-24", "2024-04-25", "2024-05-01"] {
            state
                .command_handlers
                .record_check_in
                .handle(RecordCheckInCommand {
                    user_id: UserId::new(1),
                    flag: CheckInFlag::MealLog,
                    date: Some(date(day)),
                })
                .await
                .unwrap();
        }

        // cutoff is 2024-04-24, which is kept
        assert_eq!(state.apply_retention(date("2024-05-01")).await, Some(1));
        assert_eq!(state.apply_retention(date("2024-05-01")).await, Some(0));
    }

    #[tokio::test]
    async fn test_sqlite_state_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database_path = dir.path().join("data").join("fitstreak.db");

        let command = RecordCheckInCommand {
            user_id: UserId::new(2),
            flag: CheckInFlag::Workout,
            date: Some(date("2024-05-01")),
        };

        {
            let state = build_app_state(config.clone(), false).await.unwrap();
            assert!(state.runtime.database.is_some());
            let result = state
                .command_handlers
                .record_check_in
                .handle(command.clone())
                .await
                .unwrap();
            assert!(result.newly_recorded);
            if let Some(db) = &state.runtime.database {
                db.pool().close().await;
            }
        }

        let state = build_app_state(config, false).await.unwrap();
        let result = state
            .command_handlers
            .record_check_in
            .handle(command)
            .await
            .unwrap();
        assert!(!result.newly_recorded);
    }
}
