// Domain layer - Pure streak and check-in logic
// No dependencies on infrastructure or presentation layers

pub mod check_in;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use shared::{DomainError, UserId};
