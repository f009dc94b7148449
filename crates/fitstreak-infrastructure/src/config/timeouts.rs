use std::time::Duration;

/// Timeout durations shared by the infrastructure adapters
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// HTTP request timeout for the profile service
    pub http_request: Duration,

    /// Time to wait for a pooled database connection
    pub db_acquire: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    http_request: Duration::from_secs(15),
    db_acquire: Duration::from_secs(10),
};
