//! Tamed CLI: create posts from local files and read stored records.
//!
//! Configuration comes from the environment (and `.env`); see `tamed config`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tamed_cli::{init_tracing, print_json, uploads_from_paths};
use tamed_core::Config;
use tamed_services::Services;

#[derive(Parser)]
#[command(name = "tamed", about = "Tamed media post CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one post per file
    Upload {
        /// Files to upload, processed in order
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// Show an art or a user
    View {
        #[command(subcommand)]
        sub: ViewCommands,
    },
    /// Show a stored post
    Post {
        /// Post ID
        id: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum ViewCommands {
    /// Show an art by ID
    Art {
        /// Art ID
        id: String,
    },
    /// Show a user by name
    User {
        /// User name
        name: String,
    },
}

async fn open_services(config: &Config) -> anyhow::Result<Services> {
    Services::from_config(config)
        .await
        .context("Failed to initialize stores")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::debug!(
        environment = %config.environment,
        post_store = %config.post_store_backend,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Upload { files } => {
            let files = uploads_from_paths(&files).await?;
            let services = open_services(&config).await?;
            let results = services.posts.create(&files).await?;
            print_json(&results)?;
        }
        Commands::View { sub } => {
            let services = open_services(&config).await?;
            match sub {
                ViewCommands::Art { id } => print_json(&services.views.view_art(&id).await?)?,
                ViewCommands::User { name } => {
                    print_json(&services.views.view_user(&name).await?)?
                }
            }
        }
        Commands::Post { id } => {
            let services = open_services(&config).await?;
            print_json(&services.posts.get(&id).await?)?;
        }
        Commands::Config => print_json(&config)?,
    }

    Ok(())
}
