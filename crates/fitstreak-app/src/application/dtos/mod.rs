mod check_in_dto;
mod streak_dto;

pub use check_in_dto::*;
pub use streak_dto::*;
