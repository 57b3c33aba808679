//! moviedeck - movie browsing backend over TMDB.

/// HTTP routes and handlers.
mod api;
/// Application configuration (TOML).
mod config;
/// JSON error envelope.
mod error;
/// Shared handler state.
mod state;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moviedeck_api::movies::ListMoviesRequest;
use serde::Serialize;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::api::create_router;
use crate::config::{AppConfig, resolve_config_path};
use crate::state::{AppState, build_movie_service};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Run movie queries once and print JSON.
    Movies(MoviesCommand),
    /// Inspect configuration.
    Config(ConfigCommand),
}

/// Arguments for the `serve` subcommand.
#[derive(clap::Args)]
struct ServeArgs {
    /// Bind address (overrides `server.host`).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides `server.port` and `PORT`).
    #[arg(long)]
    port: Option<u16>,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// Print one page of movies (`GET /movies`).
    List(ListArgs),
    /// Print a movie's detail (`GET /movies/{id}`).
    Detail(DetailArgs),
}

/// Arguments for the `movies list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Page number (>= 1).
    #[arg(long, allow_hyphen_values = true)]
    page: Option<String>,

    /// Search term; empty browses.
    #[arg(long)]
    search: Option<String>,

    /// Language code (en, ru, et).
    #[arg(long)]
    lang: Option<String>,
}

/// Arguments for the `movies detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// TMDB movie ID.
    id: String,

    /// Language code (en, ru, et).
    #[arg(long)]
    lang: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration with the API key redacted.
    Show,
}

/// Loads the effective configuration for `dir`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the config
/// is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    tracing::debug!(path = %path.display(), "Loading config");
    AppConfig::load_effective(&path)
}

/// Writes `value` to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")
}

/// Runs the `serve` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid, the address cannot be bound,
/// or the server fails.
#[instrument(skip_all)]
async fn run_serve(args: &ServeArgs, dir: Option<&PathBuf>) -> Result<()> {
    let mut config = load_config(dir)?;
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let addr = listener
        .local_addr()
        .context("failed to read listener address")?;

    tracing::info!("Backend listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Runs the `movies list` subcommand.
///
/// # Errors
///
/// Returns an error if the page is invalid or the TMDB request fails.
#[instrument(skip_all)]
async fn run_movies_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let request = ListMoviesRequest::from_query(
        args.page.as_deref(),
        args.search.as_deref(),
        args.lang.as_deref(),
    )?;
    let service = build_movie_service(&config)?;

    let page = service.list_movies(&request).await?;
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    print_json(&page)
}

/// Runs the `movies detail` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB request fails.
#[instrument(skip_all)]
async fn run_movies_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let service = build_movie_service(&config)?;

    let detail = service
        .get_movie_detail(&args.id, args.lang.as_deref())
        .await?;
    print_json(&detail)
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let shown =
        toml::to_string_pretty(&config.redacted()).context("failed to serialize config to TOML")?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{shown}").context("failed to write to stdout")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => run_serve(&args, cli.dir.as_ref()).await,
        Commands::Movies(movies) => match movies.command {
            MoviesSubcommands::List(args) => run_movies_list(&args, cli.dir.as_ref()).await,
            MoviesSubcommands::Detail(args) => run_movies_detail(&args, cli.dir.as_ref()).await,
        },
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
        },
    }
}
