use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cf_crypto::FieldCipher;
use cf_server::auth::TokenVerifier;
use cf_server::config;
use cf_server::http::{router, AppState};
use cf_server::service::ContactService;
use cf_store::Store;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cardfile contact service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and run migrations
    Init {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Run the HTTP service
    Run {
        #[arg(long, default_value = "127.0.0.1:8423")]
        bind: SocketAddr,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Mint a bearer token for an owner id (operator helper)
    IssueToken {
        #[arg(long)]
        owner: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init { db } => init_command(db).await,
        Commands::Run { bind, db } => run_command(bind, db).await,
        Commands::IssueToken { owner } => issue_token_command(&owner),
    }
}

async fn init_command(db: Option<PathBuf>) -> Result<()> {
    let db_path = config::resolve_db_path(db)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Store::open(&db_path).await?;
    println!("database ready at {}", db_path.display());
    Ok(())
}

async fn run_command(bind: SocketAddr, db: Option<PathBuf>) -> Result<()> {
    let master_key = config::master_key_from_env()?;
    let token_secret = config::token_secret_from_env()?;
    let db_path = config::resolve_db_path(db)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = Store::open(&db_path).await?;
    let state = AppState {
        service: ContactService::new(store, FieldCipher::new(master_key)),
        verifier: TokenVerifier::new(token_secret),
    };

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    info!("cf-server listening on http://{bind}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("service stopped");
    Ok(())
}

fn issue_token_command(owner: &str) -> Result<()> {
    let verifier = TokenVerifier::new(config::token_secret_from_env()?);
    println!("{}", verifier.mint(owner));
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("service stopping");
}
