//! Database connection for the server: DSN checks, SQLite path handling
//! and the pooled SeaORM connection.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use runtime::DatabaseConfig;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use url::Url;

pub const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok(MEMORY_DSN.to_string());
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
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create database dir {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

fn is_memory_dsn(dsn: &str) -> bool {
    dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:")
}

/// Detect DB backend from URL scheme (sqlite/postgres/mysql).
pub fn detect_from_dsn(dsn: &str) -> Result<&'static str> {
    let raw = dsn.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        "mysql" | "mariadb" => Ok("mysql"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Final DSN the server connects to: in-memory SQLite under `--mock`,
/// otherwise the configured URL with relative SQLite paths resolved
/// against `base_dir`.
pub fn resolve_dsn(cfg: &DatabaseConfig, base_dir: &Path, mock: bool) -> Result<String> {
    if mock {
        return Ok(MEMORY_DSN.to_string());
    }

    let backend = detect_from_dsn(&cfg.url)?;
    if backend != "sqlite" {
        bail!("Unsupported database backend '{backend}': only sqlite is built in");
    }
    absolutize_sqlite_dsn(cfg.url.trim(), base_dir, true)
}

/// Open the pool and hand it to SeaORM.
pub async fn connect(cfg: &DatabaseConfig, dsn: &str) -> Result<DatabaseConnection> {
    let memory = is_memory_dsn(dsn);

    let mut opts = SqliteConnectOptions::from_str(dsn)
        .with_context(|| format!("invalid sqlite DSN '{dsn}'"))?
        .create_if_missing(true)
        .foreign_keys(true);
    if !memory {
        opts = opts.journal_mode(SqliteJournalMode::Wal);
    }
    if let Some(ms) = cfg.busy_timeout_ms {
        opts = opts.busy_timeout(Duration::from_millis(ms as u64));
    }

    // Every connection to `:memory:` sees its own database, so pin one.
    let pool_opts = if memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(cfg.max_conns.unwrap_or(10))
    };

    let pool = pool_opts
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(opts)
        .await
        .with_context(|| format!("cannot connect to {dsn}"))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}
