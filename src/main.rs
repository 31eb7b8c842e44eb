//! SEO Dashboard API
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use seo_dashboard_api::{config, network::HttpClient, web::create_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{prelude::*, reload, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let Some(config_path) = parse_args()? else {
        return Ok(());
    };

    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Initialize logging; the level is finalized once settings are loaded
    let (filter, filter_handle) = reload::Layer::new(log_filter("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = config::load(config_path.as_deref())?;
    filter_handle.reload(log_filter(settings.general.log_level()))?;

    info!("Starting {} v{}", settings.general.service_name, seo_dashboard_api::VERSION);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Create application state; missing provider credentials are fatal
    let state = AppState::new(settings.clone(), client)
        .context("Failed to initialize the DataForSEO client")?;
    info!("Application state initialized");

    let app = create_router(state);

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` when set, otherwise `level`
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Parse command-line arguments. Returns `None` when the process should exit
/// after printing help or version, otherwise the optional settings path.
fn parse_args() -> Result<Option<Option<PathBuf>>> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("seo-dashboard-api {}", seo_dashboard_api::VERSION);
                return Ok(None);
            }
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a file path", arg))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(Some(config_path))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
SEO Dashboard API v{}
Backend proxy for keyword, domain, competitor and SERP research

USAGE:
    seo-dashboard-api [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SEO_SETTINGS_PATH      Path to settings.yml
    DATAFORSEO_USERNAME    DataForSEO API login (required)
    DATAFORSEO_PASSWORD    DataForSEO API password (required)
    DATAFORSEO_BASE_URL    DataForSEO API base URL
    OPENAI_API_KEY         Enables AI keyword suggestions
    OPENAI_BASE_URL        Chat-completion API base URL
    OPENAI_MODEL           Chat-completion model
    PORT                   Server port (default 5001)
    BIND_ADDRESS           Bind address (default 0.0.0.0)
    DEBUG                  Enable debug logging (true/false), same as general.debug
    RUST_LOG               Log filter, overrides DEBUG
"#,
        seo_dashboard_api::VERSION
    );
}
