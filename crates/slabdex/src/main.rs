//! Slabdex CLI binary.

use anyhow::Result;
use slabdex::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the slabdex CLI.
///
/// Uses tokio's current_thread runtime for simplicity and lower overhead.
/// This is appropriate for CLI applications with sequential I/O-bound operations.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=slabdex=debug,slabdex_sheet=trace cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slabdex=info,slabdex_sheet=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse_args();
    cli.execute().await?;

    Ok(())
}
