//! Git History - browse a repository's commit history in your browser
//!
//! # Usage
//! ```bash
//! git-history                          # Serve the current repository
//! git-history ~/project --port 4000    # Another repository and port
//! git-history --file src/app.js        # Only history touching one file
//! git-history --since v2.0.0 --no-open # Commits after a tag, no browser
//! ```

mod error;
mod git;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git::GitRepository;
use models::GitOptions;

/// Git History - visualize a repository's commit history in your browser
#[derive(Parser)]
#[command(name = "git-history")]
#[command(about = "Serve a repository's commit history, diffs and blame", long_about = None)]
struct Cli {
    /// Path to the git repository (or any directory inside it)
    #[arg(value_name = "REPO_PATH", default_value = ".")]
    repo_path: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Show history only for a specific file
    #[arg(short, long)]
    file: Option<String>,

    /// Show commits since a specific reference (e.g. v2.0.0)
    #[arg(short, long)]
    since: Option<String>,

    /// Filter commits by author
    #[arg(short, long)]
    author: Option<String>,

    /// Do not open the browser after starting
    #[arg(long)]
    no_open: bool,
}

impl Cli {
    fn default_filters(&self) -> GitOptions {
        GitOptions {
            file: self.file.clone(),
            since: self.since.clone(),
            author: self.author.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let repo = match GitRepository::open(&cli.repo_path) {
        Ok(r) => r.with_defaults(cli.default_filters()),
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", cli.repo_path);
            std::process::exit(1);
        }
    };

    let canonical_path = std::fs::canonicalize(&repo.path)
        .unwrap_or_else(|_| PathBuf::from(&repo.path))
        .to_string_lossy()
        .to_string();

    let shared_repo = Arc::new(repo);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(shared_repo))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}", addr);
    println!();
    println!("  Git History");
    println!();
    println!("  Repository: {}", canonical_path);
    println!("  Server:     {}", url);
    if let Some(file) = &cli.file {
        println!("  File:       {}", file);
    }
    if let Some(since) = &cli.since {
        println!("  Since:      {}", since);
    }
    if let Some(author) = &cli.author {
        println!("  Author:     {}", author);
    }
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if !cli.no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
