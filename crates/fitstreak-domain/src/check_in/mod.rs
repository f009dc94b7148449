pub mod calendar_date;
mod domain_service;
mod repository;
mod task_completion;
mod value_objects;


pub use calendar_date::{
    date_from_iso_datetime, format_calendar_date, month_key, parse_calendar_date,
};
pub use domain_service::CheckInRecorder;
pub use repository::CheckInStore;
pub use task_completion::TaskCompletionCache;
pub use value_objects::{
    CheckInFlag, CheckInKey, CheckInRecord, TaskKind, CHECK_IN_KEY_PREFIX, COMPLETED_VALUE,
};
