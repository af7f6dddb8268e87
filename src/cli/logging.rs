//! Logging initialization

/// Initialize logging based on debug flag
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the default `debug` filter.
pub fn init_logging(debug: bool) {
    if !debug {
        // No logging by default (silent operation)
        return;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
