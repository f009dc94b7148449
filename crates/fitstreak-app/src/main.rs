use clap::Parser;
use log::{error, warn};

use fitstreak_app::application::services::{default_log_dir, ConfigService};
use fitstreak_app::presentation::cli::Cli;
use fitstreak_app::presentation::commands;
use fitstreak_infrastructure::logging::{init_console_logger, init_logger};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_service = ConfigService::load(cli.config.clone());
    let log_level = cli.log_level.unwrap_or_else(|| config_service.log_level());

    if let Err(e) = init_logger(default_log_dir(), log_level.as_str()) {
        init_console_logger(log_level.as_str());
        warn!("File logging unavailable, using console only: {:#}", e);
    }
    config_service.report_load_error();

    match commands::run(cli, config_service).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e.format_with_code());
            eprintln!("{}", e.format_with_code());
            std::process::exit(1);
        }
    }
}
