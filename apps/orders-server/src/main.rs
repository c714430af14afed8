use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use orders::Orders;
use runtime::{AppConfig, AppConfigProvider, CliArgs, ConfigProvider};
use tokio_util::sync::CancellationToken;

mod db;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Orders Server - order management REST backend
#[derive(Parser)]
#[command(name = "orders-server")]
#[command(about = "Orders Server - order management REST backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Orders Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

fn ingress_config(config: &AppConfig, provider: &AppConfigProvider) -> Result<ApiIngressConfig> {
    let mut ingress: ApiIngressConfig = provider.module_config("api_ingress")?;
    ingress.bind_addr = config.bind_addr();
    if config.server.timeout_sec > 0 {
        ingress.request_timeout_secs = config.server.timeout_sec;
    }
    Ok(ingress)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is required"))?;

    // Base dir for resolving relative sqlite paths (already absolute & created)
    let base_dir = PathBuf::from(&config.server.home_dir);
    let dsn = db::resolve_dsn(&db_config, &base_dir, args.mock)?;

    tracing::info!("Connecting to database: {}", dsn);
    let conn = db::connect(&db_config, &dsn).await?;
    Orders::migrate(&conn).await?;

    let provider = AppConfigProvider::new(config.clone());
    let orders = Orders::from_config(&provider, conn)?;
    let ingress = ApiIngress::new(ingress_config(&config, &provider)?);

    let router = ingress.build_router(
        orders.register_rest(axum::Router::new()),
        Some(Orders::openapi()),
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = modkit::shutdown::wait_for_shutdown().await {
            tracing::error!("Signal handler failed: {e:#}");
        }
        on_signal.cancel();
    });

    ingress.serve(router, cancel).await?;
    tracing::info!("Orders Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let provider = AppConfigProvider::new(config.clone());
    let orders_cfg: orders::config::OrdersConfig = provider.module_config(Orders::NAME)?;
    ingress_config(&config, &provider)?;

    if let Some(db_config) = &config.database {
        let dsn = db::resolve_dsn(db_config, Path::new(&config.server.home_dir), args.mock)?;
        tracing::info!("Database DSN resolves to {}", dsn);
    } else {
        return Err(anyhow!("Database configuration is required"));
    }

    tracing::info!(page_size = orders_cfg.page_size, "Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
