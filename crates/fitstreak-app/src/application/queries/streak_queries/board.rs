use chrono::NaiveDate;

use crate::application::dtos::TaskBoardDto;
use fitstreak_domain::check_in::CheckInRecorder;
use fitstreak_domain::shared::UserId;

pub(super) async fn get_task_board(
    recorder: &CheckInRecorder,
    user_id: UserId,
    day: NaiveDate,
) -> TaskBoardDto {
    let cache = recorder.load_task_board(user_id, day).await;
    TaskBoardDto::from_cache(user_id, day, &cache)
}
