//! Tracing init for the CLI: env-filtered, stderr, target-free lines.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber from `RUST_LOG`, defaulting to `warn`
/// (or `info` when `verbose` is set) so run-log mirroring is visible with
/// `--verbose` without any env setup.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default = if verbose { "taskweave=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()?;
    Ok(())
}
