mod combined_task_handler;
mod prune_check_ins_handler;
mod record_check_in_handler;

#[cfg(test)]
mod tests;

pub use combined_task_handler::CompleteCombinedTaskCommandHandler;
pub use prune_check_ins_handler::PruneCheckInsCommandHandler;
pub use record_check_in_handler::RecordCheckInCommandHandler;
