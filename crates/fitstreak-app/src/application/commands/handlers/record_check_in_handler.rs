use async_trait::async_trait;
use chrono::Local;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::check_in_commands::RecordCheckInCommand;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::RecordCheckInResultDto;
use fitstreak_domain::check_in::{format_calendar_date, CheckInRecorder};
use fitstreak_domain::shared::DomainError;
use fitstreak_domain::streak::StreakProfileSource;

/// Record a completion locally and, when newly recorded, notify the platform
pub struct RecordCheckInCommandHandler {
    recorder: Arc<CheckInRecorder>,
    profile_source: Option<Arc<dyn StreakProfileSource>>,
}

impl RecordCheckInCommandHandler {
    pub fn new(recorder: Arc<CheckInRecorder>) -> Self {
        Self {
            recorder,
            profile_source: None,
        }
    }

    pub fn with_profile_source(mut self, source: Arc<dyn StreakProfileSource>) -> Self {
        self.profile_source = Some(source);
        self
    }
}

#[async_trait]
impl CommandHandler<RecordCheckInCommand> for RecordCheckInCommandHandler {
    type Result = RecordCheckInResultDto;

    async fn handle(&self, cmd: RecordCheckInCommand) -> Result<Self::Result, DomainError> {
        let day = cmd.date.unwrap_or_else(|| Local::now().date_naive());

        let newly_recorded = self
            .recorder
            .record_check_in(cmd.user_id, cmd.flag, day)
            .await;

        // The local record stands even when the platform call fails
        let remote_synced = match (&self.profile_source, newly_recorded) {
            (Some(source), true) => match source.submit_check_in(cmd.user_id).await {
                Ok(()) => Some(true),
                Err(e) => {
                    warn!(
                        "[checkin] remote sync failed user_id={} flag={} err={}",
                        cmd.user_id, cmd.flag, e
                    );
                    Some(false)
                }
            },
            _ => None,
        };

        info!(
            "[checkin] user_id={} flag={} day={} newly_recorded={} remote_synced={:?}",
            cmd.user_id, cmd.flag, day, newly_recorded, remote_synced
        );

        Ok(RecordCheckInResultDto {
            user_id: cmd.user_id.value(),
            flag: cmd.flag.as_str().to_string(),
            date: format_calendar_date(day),
            newly_recorded,
            remote_synced,
        })
    }
}
