use clap::Parser;

use aws_image_manager::app_data::AppData;
use aws_image_manager::cli::{self, Cli, Commands};
use aws_image_manager::config::{init_logging, AppSettings, DatabaseConnections, SecretManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = AppSettings::from_env().map_err(|e| {
        tracing::error!(setting = e.setting_name(), "Invalid configuration: {}", e);
        e
    })?;
    tracing::debug!("Settings loaded: {:?}", settings);

    let secrets = SecretManager::init().map_err(|e| {
        tracing::error!("Secret loading failed: {}", e);
        e
    })?;
    tracing::debug!("{}", secrets);

    let connections = DatabaseConnections::connect(&settings).await?;
    connections.migrate().await?;

    let app_data = AppData::new(connections, &settings, &secrets);

    cli::execute_command(cli.command.unwrap_or(Commands::Serve), &app_data, &settings).await
}
