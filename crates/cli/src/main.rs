//! Edumall CLI - drive the mobile data layer from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Check credentials
//! edumall login -u lan -p matkhau123
//!
//! # Public catalog
//! edumall blogs --keyword "lập trình" --page 2
//! edumall events
//!
//! # Signed-in views (credentials from EDUMALL_USERNAME / EDUMALL_PASSWORD)
//! edumall cart
//! edumall cart-update <cart-detail-id> 3
//! edumall notifications
//! ```
//!
//! Every command prints the validated payload as pretty JSON on stdout. Logs
//! go to stderr; set `RUST_LOG` to change the level (default `edumall=info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use edumall_client::{AppState, ClientConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "edumall")]
#[command(author, version, about = "Edumall mobile API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the signed-in user
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Search blog posts
    Blogs {
        #[arg(short, long)]
        keyword: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Search courses
    Courses {
        #[arg(short, long)]
        keyword: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// List upcoming events
    Events {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// List products
    Products,
    /// Show the cart
    Cart,
    /// Set the quantity of a cart line and show the refreshed cart
    CartUpdate {
        /// Cart detail ID
        detail: String,

        /// New quantity (1-99)
        quantity: u32,
    },
    /// Remove a cart line and show the refreshed cart
    CartRemove {
        /// Cart detail ID
        detail: String,
    },
    /// List notifications with the unread count
    Notifications,
    /// List saved delivery addresses
    Addresses,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Map tracing levels to Sentry: errors and warnings become events, the rest
/// breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "edumall=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), CliError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&state, &username, &password).await?;
        }
        Commands::Blogs {
            keyword,
            page,
            page_size,
        } => commands::catalog::blogs(&state, keyword.as_deref(), page, page_size).await?,
        Commands::Courses {
            keyword,
            page,
            page_size,
        } => {
            commands::login_from_env(&state).await?;
            commands::catalog::courses(&state, keyword.as_deref(), page, page_size).await?;
        }
        Commands::Events { page, page_size } => {
            commands::catalog::events(&state, page, page_size).await?;
        }
        Commands::Products => {
            commands::login_from_env(&state).await?;
            commands::catalog::products(&state).await?;
        }
        Commands::Cart => {
            commands::login_from_env(&state).await?;
            commands::cart::show(&state).await?;
        }
        Commands::CartUpdate { detail, quantity } => {
            commands::login_from_env(&state).await?;
            commands::cart::update(&state, detail, quantity).await?;
        }
        Commands::CartRemove { detail } => {
            commands::login_from_env(&state).await?;
            commands::cart::remove(&state, detail).await?;
        }
        Commands::Notifications => {
            commands::login_from_env(&state).await?;
            commands::account::notifications(&state).await?;
        }
        Commands::Addresses => {
            commands::login_from_env(&state).await?;
            commands::account::addresses(&state).await?;
        }
    }
    Ok(())
}
