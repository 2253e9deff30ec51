//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use binsight_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "binsight")]
#[command(version = "0.1")]
#[command(about = "Waste sorting assistant: classify photos, get disposal guidance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the server base URL from config
    #[arg(long, value_name = "URL", global = true)]
    server: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and clear the stored session token
    Logout,

    /// Show the currently signed-in user
    Whoami,

    /// Classify a waste photo and show disposal guidance
    Classify {
        /// Path to the image file
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Show disposal guidance for a material (all materials if omitted)
    Guide {
        #[arg(value_name = "MATERIAL")]
        material: Option<String>,
    },

    /// Manage past classifications
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum HistoryCommands {
    /// Lists past classifications
    List,
    /// Deletes a classification record
    Delete {
        /// The ID of the record to delete
        #[arg(value_name = "RECORD_ID")]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Show the resolved configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binsight=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let server_url = config.resolve_server_url(cli.server.as_deref())?;
    tracing::debug!("using server {server_url}");

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&server_url, email, password).await
        }
        Commands::Signup {
            name,
            email,
            password,
        } => commands::auth::signup(&server_url, name, email, password).await,
        Commands::Logout => commands::auth::logout(&server_url).await,
        Commands::Whoami => commands::auth::whoami(&server_url).await,
        Commands::Classify { image } => commands::classify::run(&server_url, &image).await,
        Commands::Guide { material } => {
            commands::classify::guide(material.as_deref());
            Ok(())
        }
        Commands::History { command } => match command.unwrap_or(HistoryCommands::List) {
            HistoryCommands::List => commands::history::list(&server_url).await,
            HistoryCommands::Delete { id, yes } => {
                commands::history::delete(&server_url, id, yes).await
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&server_url),
        },
    }
}
