use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing. `RUST_LOG` wins over the configured level.
pub fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if let Err(e) = subscriber.try_init() {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }
}
