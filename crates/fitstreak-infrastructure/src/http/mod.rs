pub mod profile_client;

pub use profile_client::{HttpStreakProfileClient, RetryConfig};
