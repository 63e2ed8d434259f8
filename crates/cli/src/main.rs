//! Shop CLI - database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! shop-cli migrate
//!
//! # Create an admin account
//! shop-cli admin create -n "Admin Name" -e admin@example.com -p 'long password'
//!
//! # List unreferenced product images without removing them
//! shop-cli assets sweep --dry-run
//! ```
//!
//! All commands read the same environment as the API server
//! (`SHOP_DATABASE_URL`, `SHOP_UPLOADS_DIR`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shop backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Maintain the product image directory
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum AssetsAction {
    /// Remove image files no product references
    Sweep {
        /// Report orphans without removing them
        #[arg(long)]
        dry_run: bool,

        /// Leave files younger than this alone
        #[arg(long, default_value_t = 60)]
        min_age_minutes: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                name,
                email,
                password,
            } => {
                commands::admin::create(&name, &email, &password).await?;
            }
        },
        Commands::Assets { action } => match action {
            AssetsAction::Sweep {
                dry_run,
                min_age_minutes,
            } => {
                commands::assets::sweep(min_age_minutes, dry_run).await?;
            }
        },
    }
    Ok(())
}
