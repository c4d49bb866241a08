use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; when `debug` is set the
/// level becomes `debug` and can be overridden via the `RUST_LOG` environment
/// variable.
pub fn init(debug: bool) {
    // Without debug logging we force `info` so a stray `RUST_LOG` in the
    // user's environment cannot flood the frame loop with trace output.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
