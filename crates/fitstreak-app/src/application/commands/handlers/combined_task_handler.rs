use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use crate::application::commands::check_in_commands::CompleteCombinedTaskCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::CombinedTaskResultDto;
use fitstreak_domain::check_in::{format_calendar_date, CheckInRecorder};
use fitstreak_domain::shared::DomainError;

pub struct CompleteCombinedTaskCommandHandler {
    recorder: Arc<CheckInRecorder>,
}

impl CompleteCombinedTaskCommandHandler {
    pub fn new(recorder: Arc<CheckInRecorder>) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl CommandHandler<CompleteCombinedTaskCommand> for CompleteCombinedTaskCommandHandler {
    type Result = CombinedTaskResultDto;

    async fn handle(&self, cmd: CompleteCombinedTaskCommand) -> Result<Self::Result, DomainError> {
        let day = cmd.date.unwrap_or_else(|| Local::now().date_naive());
        let newly_completed = self.recorder.complete_combined_task(cmd.user_id, day).await;

        Ok(CombinedTaskResultDto {
            user_id: cmd.user_id.value(),
            date: format_calendar_date(day),
            newly_completed,
        })
    }
}
