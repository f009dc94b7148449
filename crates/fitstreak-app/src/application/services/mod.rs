mod config_service;

pub use config_service::{
    default_config_path, default_log_dir, AppConfig, ConfigService, LogLevel,
    ProfileServiceConfig, RetentionConfig,
};
