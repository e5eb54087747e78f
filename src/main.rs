//! Bandas - Application Entry Point
//!
//! Runs the web server or one-off administrative commands.

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bandas::{
    config::{Config, CONFIG},
    db::{self, repositories::PgUserRepository},
    handlers,
    models::Role,
    services::{auth_service::CreateUserInput, AuthService},
    state::AppState,
};

/// Bandas - content management for musical bands
#[derive(Parser, Debug)]
#[command(name = "bandas")]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web server (default)
    Serve,

    /// Create a user account
    CreateUser {
        username: String,

        #[arg(long, env = "BANDAS_PASSWORD")]
        password: String,

        /// admin, moderator, representative or visitor
        #[arg(long, default_value = "visitor")]
        role: Role,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        locality: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CONFIG.clone();

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::CreateUser {
            username,
            password,
            role,
            bio,
            locality,
        } => {
            let pool = connect(&config).await?;
            let users = PgUserRepository::new(pool);
            let user = AuthService::create_user(
                &users,
                CreateUserInput {
                    username,
                    password,
                    role,
                    bio,
                    locality,
                },
            )
            .await
            .context("Failed to create user")?;

            println!("Created {} ({}) with id {}", user.username, user.role, user.id);
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.server.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect(config: &Config) -> anyhow::Result<sqlx::PgPool> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    Ok(pool)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Bandas server...");

    let pool = connect(&config).await?;

    tokio::fs::create_dir_all(&config.storage.media_root)
        .await
        .with_context(|| {
            format!(
                "Failed to create media root {}",
                config.storage.media_root.display()
            )
        })?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let timeout = Duration::from_secs(config.server.request_timeout_secs);
    let body_limit = config.storage.max_upload_bytes();

    let state = AppState::new(pool, config);

    // Build the router
    let app = handlers::router(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
