//! CLI command implementations

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http_server::{build_router, HttpServer};
use crate::store::{
    DynamoDbIntakeRepository, MySqlCareIntakeRepository, MySqlCarePlanRepository,
    MySqlTaskRepository,
};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Dispatch a parsed command line.
pub async fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Serve { config } => serve(config.as_deref()).await,
        Command::Check { config } => check(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<AppConfig> {
    Ok(match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    })
}

/// Boot the gateway: resolve configuration, build one repository per
/// entity, and serve until stopped.
async fn serve(path: Option<&Path>) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config(path)?;
    let intake = DynamoDbIntakeRepository::from_env(&config.intake).await;
    let router = build_router(
        MySqlTaskRepository::new(config.database.clone()),
        MySqlCarePlanRepository::new(config.database.clone()),
        intake,
        MySqlCareIntakeRepository::new(config.database.clone()),
    );

    HttpServer::new(config.http, router).start().await?;
    Ok(())
}

/// Resolve configuration and print it, credentials blanked.
fn check(path: Option<&Path>) -> CliResult<()> {
    let config = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}
