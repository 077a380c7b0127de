pub mod config;

use anyhow::Result;
use config::LoggingConfig;

/// Initialize the logging system with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init(config: LoggingConfig) -> Result<()> {
    use tracing_subscriber::{
        fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(true),
        )
        .init();

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default() -> Result<()> {
    init(LoggingConfig::default())
}

/// Initialize logging from CLI arguments
pub fn init_from_args(log_level: Option<String>, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug".to_string()
    } else {
        log_level
            .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
    };

    init(LoggingConfig { level })
}
