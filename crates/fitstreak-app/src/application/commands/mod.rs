pub mod check_in_commands;
pub mod command_handler;
pub mod handlers;

pub use check_in_commands::*;
pub use command_handler::{Command, CommandHandler};
