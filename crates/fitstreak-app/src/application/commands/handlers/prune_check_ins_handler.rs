use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::check_in_commands::PruneCheckInsCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::PruneResultDto;
use fitstreak_domain::check_in::{format_calendar_date, CheckInRecorder};
use fitstreak_domain::shared::DomainError;

/// Retention sweep; unlike recording, storage failures are returned
pub struct PruneCheckInsCommandHandler {
    recorder: Arc<CheckInRecorder>,
}

impl PruneCheckInsCommandHandler {
    pub fn new(recorder: Arc<CheckInRecorder>) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl CommandHandler<PruneCheckInsCommand> for PruneCheckInsCommandHandler {
    type Result = PruneResultDto;

    async fn handle(&self, cmd: PruneCheckInsCommand) -> Result<Self::Result, DomainError> {
        let removed = self.recorder.prune_before(cmd.before).await?;
        info!("[checkin] prune before={} removed={}", cmd.before, removed);

        Ok(PruneResultDto {
            before: format_calendar_date(cmd.before),
            removed,
        })
    }
}
