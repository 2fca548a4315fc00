// CLI module for administrative operations requiring database access

pub mod bootstrap;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::AppSettings;

/// AWS image manager: authenticated gateway for AMI and launch template operations
#[derive(Parser, Debug)]
#[command(name = "aws-image-manager")]
#[command(about = "Authenticated API gateway for AWS image management", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create an administrator account with a generated password
    BootstrapAdmin {
        /// Username for the new administrator
        #[arg(long)]
        username: String,
    },
}

/// Execute CLI command
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
    settings: &AppSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {
            crate::server::run(app_data, settings).await?;
        }
        Commands::BootstrapAdmin { username } => {
            let password = bootstrap::bootstrap_admin(
                &app_data.credential_store,
                &app_data.password_hasher,
                &username,
            )
            .await?;

            println!("\n=== Administrator created ===\n");
            println!("Username: {}", username);
            println!("Password: {}", password);
            println!("\nThis password is shown once. Store it somewhere safe.\n");
        }
    }

    Ok(())
}
