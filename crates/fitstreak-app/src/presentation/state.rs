use chrono::{Days, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::commands::{CommandHandler, PruneCheckInsCommand};
use crate::application::queries::StreakQueries;
use crate::application::services::AppConfig;
use fitstreak_domain::streak::StreakProfileSource;
use fitstreak_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub record_check_in: Arc<RecordCheckInCommandHandler>,
    pub complete_combined_task: Arc<CompleteCombinedTaskCommandHandler>,
    pub prune_check_ins: Arc<PruneCheckInsCommandHandler>,
}

pub struct Runtime {
    /// `None` for in-memory runs
    pub database: Option<Arc<Database>>,
    pub profile_source: Option<Arc<dyn StreakProfileSource>>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub command_handlers: CommandHandlers,
    pub queries: Queries,
    pub config: AppConfig,
}

impl AppState {
    /// Drop check-ins older than `retention.keep_days` relative to `today`.
    ///
    /// Returns the number of removed keys, or `None` when retention is
    /// unbounded or the sweep failed.
    pub async fn apply_retention(&self, today: NaiveDate) -> Option<usize> {
        let keep_days = self.config.retention.keep_days?;
        let before = today.checked_sub_days(Days::new(u64::from(keep_days)))?;

        match self
            .command_handlers
            .prune_check_ins
            .handle(PruneCheckInsCommand { before })
            .await
        {
            Ok(result) => {
                info!(
                    "[checkin] retention keep_days={} removed={}",
                    keep_days, result.removed
                );
                Some(result.removed)
            }
            Err(e) => {
                warn!("[checkin] retention sweep failed: {}", e);
                None
            }
        }
    }
}
