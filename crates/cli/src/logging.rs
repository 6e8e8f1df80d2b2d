use std::io;

use storefront_core::config::{AppConfig, LogFormat};
use tracing::Level;

/// Installs the global subscriber. Logs go to stderr so the menu owns stdout.
pub fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(io::stderr);

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
