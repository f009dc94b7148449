use std::sync::Arc;

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::*;
use crate::application::test_support::{date, memory_recorder, BrokenStore, MockProfileSource};
use fitstreak_domain::check_in::{CheckInFlag, CheckInRecorder, CheckInStore, TaskKind};
use fitstreak_domain::shared::{DomainError, UserId};

#[tokio::test]
async fn test_record_check_in_without_profile_source() {
    let (_store, recorder) = memory_recorder();
    let handler = RecordCheckInCommandHandler::new(recorder.clone());

    let command = RecordCheckInCommand {
        user_id: UserId::new(7),
        flag: CheckInFlag::WaterLog,
        date: Some(date("2024-05-02")),
    };

    let first = handler.handle(command.clone()).await.unwrap();
    assert!(first.newly_recorded);
    assert_eq!(first.remote_synced, None);
    assert_eq!(first.flag, "water_log");
    assert_eq!(first.date, "2024-05-02");

    let second = handler.handle(command).await.unwrap();
    assert!(!second.newly_recorded);

    assert!(
        recorder
            .is_task_complete(UserId::new(7), TaskKind::WaterLog, date("2024-05-02"))
            .await
    );
}

#[tokio::test]
async fn test_record_check_in_syncs_only_new_records() {
    let (_store, recorder) = memory_recorder();
    let source = Arc::new(MockProfileSource::new(0, None));
    let handler = RecordCheckInCommandHandler::new(recorder).with_profile_source(source.clone());

    let command = RecordCheckInCommand {
        user_id: UserId::new(7),
        flag: CheckInFlag::Workout,
        date: Some(date("2024-05-02")),
    };

    let first = handler.handle(command.clone()).await.unwrap();
    assert_eq!(first.remote_synced, Some(true));

    let second = handler.handle(command).await.unwrap();
    assert!(!second.newly_recorded);
    assert_eq!(second.remote_synced, None);

    assert_eq!(source.submit_count(), 1);
}

#[tokio::test]
async fn test_remote_failure_keeps_local_record() {
    let (store, recorder) = memory_recorder();
    let source = Arc::new(MockProfileSource::failing());
    let handler = RecordCheckInCommandHandler::new(recorder).with_profile_source(source.clone());

    let result = handler
        .handle(RecordCheckInCommand {
            user_id: UserId::new(3),
            flag: CheckInFlag::MealLog,
            date: Some(date("2024-05-02")),
        })
        .await
        .unwrap();

    assert!(result.newly_recorded);
    assert_eq!(result.remote_synced, Some(false));
    assert_eq!(
        store
            .get("@Checkin_3_meal_log_2024-05-02")
            .await
            .unwrap()
            .as_deref(),
        Some("1")
    );
}

#[tokio::test]
async fn test_record_check_in_defaults_to_today() {
    let (_store, recorder) = memory_recorder();
    let handler = RecordCheckInCommandHandler::new(recorder);

    let result = handler
        .handle(RecordCheckInCommand {
            user_id: UserId::new(1),
            flag: CheckInFlag::WeightLog,
            date: None,
        })
        .await
        .unwrap();

    assert!(result.newly_recorded);
    assert_eq!(result.date.len(), 10);
}

#[tokio::test]
async fn test_record_check_in_storage_failure_is_not_an_error() {
    let recorder = Arc::new(CheckInRecorder::new(Arc::new(BrokenStore)));
    let source = Arc::new(MockProfileSource::new(0, None));
    let handler = RecordCheckInCommandHandler::new(recorder).with_profile_source(source.clone());

    let result = handler
        .handle(RecordCheckInCommand {
            user_id: UserId::new(1),
            flag: CheckInFlag::MealLog,
            date: Some(date("2024-05-02")),
        })
        .await
        .unwrap();

    assert!(!result.newly_recorded);
    assert_eq!(source.submit_count(), 0);
}

#[tokio::test]
async fn test_complete_combined_task_handler() {
    let (_store, recorder) = memory_recorder();
    let handler = CompleteCombinedTaskCommandHandler::new(recorder.clone());
    let user = UserId::new(11);
    let day = date("2024-05-02");

    let command = CompleteCombinedTaskCommand {
        user_id: user,
        date: Some(day),
    };

    recorder.record_check_in(user, CheckInFlag::Comment, day).await;
    assert!(!handler.handle(command.clone()).await.unwrap().newly_completed);

    recorder
        .record_check_in(user, CheckInFlag::PostArticle, day)
        .await;
    let result = handler.handle(command.clone()).await.unwrap();
    assert!(result.newly_completed);
    assert_eq!(result.date, "2024-05-02");

    assert!(!handler.handle(command).await.unwrap().newly_completed);
    assert!(
        recorder
            .is_task_complete(user, TaskKind::CommentAndPost, day)
            .await
    );
}

#[tokio::test]
async fn test_prune_handler_removes_old_keys() {
    let (store, recorder) = memory_recorder();
    let handler = PruneCheckInsCommandHandler::new(recorder.clone());
    let user = UserId::new(5);

    for day in ["2024-04-28", "2024-04-30", "2024-05-01", "2024-05-02"] {
        recorder
            .record_check_in(user, CheckInFlag::MealLog, date(day))
            .await;
    }

    let result = handler
        .handle(PruneCheckInsCommand {
            before: date("2024-05-01"),
        })
        .await
        .unwrap();

    assert_eq!(result.removed, 2);
    assert_eq!(result.before, "2024-05-01");
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_prune_handler_propagates_storage_errors() {
    let recorder = Arc::new(CheckInRecorder::new(Arc::new(BrokenStore)));
    let handler = PruneCheckInsCommandHandler::new(recorder);

    let result = handler
        .handle(PruneCheckInsCommand {
            before: date("2024-05-01"),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
}
