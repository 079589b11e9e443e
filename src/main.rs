//! Simple Cache - interactive front end
//!
//! Reads one command per line from stdin and prints one JSON response per line.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simple_cache::cli::{handle_line, AppState};
use simple_cache::{spawn_cleanup_task, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (to stderr)
/// 2. Load configuration from environment variables
/// 3. Create the memory engine and adapter
/// 4. Start background TTL cleanup task
/// 5. Serve commands until EOF or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simple_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Simple Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: false_policy={:?}, cleanup_interval={}s",
        config.false_policy, config.cleanup_interval
    );

    let state = AppState::from_config(&config);
    let cleanup_handle = spawn_cleanup_task(state.engine.clone(), config.cleanup_interval);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    info!("End of input");
                    break;
                };
                if let Some(response) = handle_line(&state, &line) {
                    println!(
                        "{}",
                        serde_json::to_string(&response).context("Failed to encode response")?
                    );
                }
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl+C")?;
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");

    info!("Shutdown complete");
    Ok(())
}
