//! Log setup for the binary. Logs go to stderr; reports go to stdout.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level.
fn directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(directive(0, true), "error");
        assert_eq!(directive(3, true), "error");
        assert_eq!(directive(0, false), "warn");
        assert_eq!(directive(1, false), "info");
        assert_eq!(directive(2, false), "debug");
        assert_eq!(directive(9, false), "trace");
    }
}
