use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use anyhow::{Context, Result, bail};
use app::{AppState, build_router};
use clap::Parser;
use services::{Clock, IN_MEMORY_STORE, StoryService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Storybook web server.
#[derive(Debug, Parser)]
#[command(name = "storybook", version, about)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "STORYBOOK_PORT", default_value_t = 5000)]
    port: u16,

    /// Session store: an SQLite URL or path, or `memory` for the in-process store.
    #[arg(long = "db", env = "STORYBOOK_DB_URL", default_value = "sqlite::memory:")]
    db_url: String,

    /// Minutes of inactivity before a session expires.
    #[arg(long, env = "STORYBOOK_SESSION_TTL_MINS", default_value_t = 120)]
    session_ttl_mins: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("app=info,services=info,storage=info,tower_http=info")
        }))
        .init();

    let args = Args::parse();
    let db_url = normalize_sqlite_url(&args.db_url);
    prepare_sqlite_file(&db_url)?;

    let ttl = chrono::Duration::minutes(i64::from(args.session_ttl_mins));
    let story = StoryService::connect(&db_url, Clock::default_clock())
        .await
        .with_context(|| format!("failed to open session store {db_url}"))?
        .with_session_ttl(ttl);
    info!(
        store = %db_url,
        ttl_mins = story.session_ttl().num_minutes(),
        "session store ready"
    );

    spawn_expiry(story.clone());

    let app = build_router(AppState::new(story));
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Starting HTTP server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

/// Purge idle sessions every few minutes.
fn spawn_expiry(story: StoryService) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(StdDuration::from_secs(300));
        loop {
            ticker.tick().await;
            if let Err(err) = story.expire_sessions().await {
                warn!(error = %err, "session expiry failed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// File paths become absolute `sqlite://` URLs; memory stores pass through.
fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == IN_MEMORY_STORE
        || trimmed.contains(":memory:")
        || trimmed.contains("mode=memory")
        || trimmed.starts_with("sqlite://")
    {
        return trimmed.to_owned();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// SQLite will not create a missing database file on its own.
fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("memory"), "memory");
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:file:x?mode=memory&cache=shared"),
            "sqlite:file:x?mode=memory&cache=shared"
        );
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/story.sqlite3");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/story.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/a.db"), "sqlite:///tmp/a.db");
        assert_eq!(normalize_sqlite_url("/tmp/a.db"), "sqlite:///tmp/a.db");
    }

    #[test]
    fn args_fall_back_to_defaults() {
        let args = Args::try_parse_from(["storybook"]).unwrap();
        assert_eq!(args.port, 5000);
        assert_eq!(args.session_ttl_mins, 120);

        let args = Args::try_parse_from(["storybook", "--port", "8080", "--db", "memory"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.db_url, "memory");
    }
}
