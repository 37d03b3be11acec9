use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use url::Url;

use recipe_api::config::DatabaseConfig;
use recipe_api::infra::storage;
use recipe_api::logging::init_logging;
use recipe_api::{router, ApiServices, AppConfig, RouterOptions};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Recipe Box - recipe management REST API server
#[derive(Parser)]
#[command(name = "recipe-server")]
#[command(about = "Recipe Box - recipe management REST API server")]
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

    /// Use an in-memory database instead of the configured one
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
    /// Create an administrative user account
    CreateSuperuser {
        /// Email address for the new superuser
        #[arg(long)]
        email: String,
        /// Password for the new superuser
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    init_logging(&config.logging);
    tracing::info!("Recipe Box server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, cli.mock).await,
        Commands::Check => check_config(config, cli.mock),
        Commands::CreateSuperuser { email, password } => {
            create_superuser(config, cli.mock, &email, &password).await
        }
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    // sqlx needs rwc mode to create the file on first run
    if query.is_none() {
        out.push_str("?mode=rwc");
    }
    Ok(out)
}

/// Resolve the effective DSN: `--mock` forces in-memory SQLite, relative
/// SQLite paths are absolutized against the current directory.
fn resolve_dsn(cfg: &DatabaseConfig, mock: bool) -> Result<String> {
    if mock {
        return Ok("sqlite::memory:".to_string());
    }

    detect_from_dsn(cfg)?;

    let mut dsn = cfg.url.trim().to_owned();
    if dsn.starts_with("sqlite://") {
        let base_dir = std::env::current_dir()?;
        dsn = absolutize_sqlite_dsn(&dsn, &base_dir, true)?;
    }
    Ok(dsn)
}

/// Connect to the database, retrying once per second while it comes up.
async fn connect_with_retry(dsn: &str, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.max_connections(cfg.max_conns)
        .acquire_timeout(Duration::from_secs(5));

    let attempts = cfg.connect_retries.max(1);
    let mut last_err = String::new();

    for attempt in 1..=attempts {
        match Database::connect(opts.clone()).await {
            Ok(db) => match db.ping().await {
                Ok(()) => {
                    tracing::info!("Connected to database");
                    return Ok(db);
                }
                Err(e) => last_err = e.to_string(),
            },
            Err(e) => last_err = e.to_string(),
        }
        if attempt < attempts {
            tracing::warn!(attempt, "Database unavailable, waiting 1 second...");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    Err(anyhow!(
        "Database unavailable after {} attempts: {}",
        attempts,
        last_err
    ))
}

async fn connect_and_migrate(config: &AppConfig, mock: bool) -> Result<DatabaseConnection> {
    let dsn = resolve_dsn(&config.database, mock)?;
    tracing::info!("Connecting to database: {}", dsn);

    let db = connect_with_retry(&dsn, &config.database).await?;
    storage::migrate(&db).await?;
    Ok(db)
}

async fn run_server(config: AppConfig, mock: bool) -> Result<()> {
    let db = connect_and_migrate(&config, mock).await?;

    let services = ApiServices::new(&db);
    let options = RouterOptions {
        enable_docs: config.server.enable_docs,
        cors_enabled: config.server.cors_enabled,
        timeout_sec: config.server.timeout_sec,
    };
    let app = router(&services, &options)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, mock: bool) -> Result<()> {
    tracing::info!("Checking configuration...");

    if !mock {
        detect_from_dsn(&config.database)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

async fn create_superuser(config: AppConfig, mock: bool, email: &str, password: &str) -> Result<()> {
    let db = connect_and_migrate(&config, mock).await?;

    let services = ApiServices::new(&db);
    let user = services
        .users
        .create_superuser(email, password)
        .await
        .map_err(|e| anyhow!("Failed to create superuser: {}", e))?;

    println!("Created superuser {}", user.email);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_memory_dsn() {
        let out = absolutize_sqlite_dsn("sqlite::memory:", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite::memory:");
        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        let out = absolutize_sqlite_dsn("sqlite://data/app.db", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite:///base/data/app.db?mode=rwc");
    }

    #[test]
    fn absolutize_preserves_query() {
        let out = absolutize_sqlite_dsn(
            "sqlite://data/app.db?cache=shared",
            Path::new("/base"),
            false,
        )
        .unwrap();
        assert_eq!(out, "sqlite:///base/data/app.db?cache=shared");
    }

    #[test]
    fn detect_from_dsn_recognizes_schemes() {
        let mut cfg = DatabaseConfig::default();
        assert_eq!(detect_from_dsn(&cfg).unwrap(), "sqlite");

        cfg.url = "postgres://localhost/recipes".to_string();
        assert_eq!(detect_from_dsn(&cfg).unwrap(), "postgres");

        cfg.url = "mysql://localhost/recipes".to_string();
        assert!(detect_from_dsn(&cfg).is_err());

        cfg.url = String::new();
        assert!(detect_from_dsn(&cfg).is_err());
    }
}
