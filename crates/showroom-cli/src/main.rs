//! Showroom storefront CLI.

use clap::{ColorChoice, Parser};
use showroom_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_add_vehicle, run_book, run_bookings, run_bookmark, run_reset_identity, run_show,
    run_summary, run_vehicles,
};
use showroom_client::{ClientConfig, ShowroomClient};
use showroom_state::TokenStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_base_url(api_url);
    }
    let client =
        ShowroomClient::new(&config).map_err(|error| anyhow::anyhow!(error.user_message()))?;
    let tokens = TokenStore::from_default_file();

    match &cli.command {
        Command::Vehicles(args) => run_vehicles(&client, args).await,
        Command::Show(args) => run_show(&client, &tokens, args).await,
        Command::Summary => run_summary(&client).await,
        Command::Bookmark(command) => run_bookmark(&client, &tokens, command).await,
        Command::Book(args) => run_book(&client, &tokens, args).await,
        Command::Bookings => run_bookings(&client, &tokens).await,
        Command::AddVehicle(args) => run_add_vehicle(&client, args).await,
        Command::ResetIdentity(args) => run_reset_identity(&tokens, args.scope),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
