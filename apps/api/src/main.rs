mod analysis;
mod client;
mod config;
mod errors;
mod gemini;
mod models;
mod routes;
mod sanitize;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ingest::{MIME_DOCX, MIME_PDF};
use crate::client::pages::{AnalysisPage, PageState};
use crate::client::staging::StagedResume;
use crate::config::Config;
use crate::gemini::GeminiAnalyzer;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(about = "CareerLens resume-analysis service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server (the default).
    Serve,
    /// Stage a resume and run the three analysis flows against a running
    /// server at BASE_URL.
    Analyze { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Analyze { file } => analyze(config, file).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting CareerLens API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = Arc::new(GeminiAnalyzer::new(config.gemini_api_key.clone()));
    info!("Gemini analyzer initialized (model: {})", gemini::MODEL);

    let state = AppState {
        analyzer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Headless run of the upload → page flow handoff: stages the file once and
/// mounts each of the three views against the configured server, printing
/// the typed results.
async fn analyze(config: Config, file: PathBuf) -> Result<()> {
    let mime_type = match file.extension().and_then(|e| e.to_str()) {
        Some("pdf") => MIME_PDF,
        Some("docx") => MIME_DOCX,
        _ => anyhow::bail!("Only PDF and DOCX files are supported"),
    };
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume")
        .to_string();
    let bytes = std::fs::read(&file)?;

    let staged = StagedResume::from_bytes(&name, mime_type, &bytes);
    info!("Staged {} ({} bytes)", staged.name, staged.size_bytes);

    let http = reqwest::Client::new();
    let pages = [
        AnalysisPage::career_path(),
        AnalysisPage::recommendations(),
        AnalysisPage::job_matches(),
    ];

    for mut page in pages {
        page.mount(&http, &config.base_url, Some(&staged)).await;
        match page.state {
            PageState::Ready(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            PageState::Failed(message) => error!("Analysis failed: {message}"),
            PageState::Loading => unreachable!("mount always settles the page"),
        }
    }

    Ok(())
}
