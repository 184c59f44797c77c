//! Tracing setup.
//!
//! `RUST_LOG` wins when present; otherwise the filter is derived from
//! [`LoggingConfig::level`] with noisy transport crates pinned to `warn`.
//! File output goes through a non-blocking rolling appender whose guard
//! must stay alive for the lifetime of the process.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writer alive. Dropping it flushes and stops
/// file logging.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kinoteka={level},tower_http=warn,hyper=warn,reqwest=warn",
            level = config.level
        ))
    });

    let mut file_guard = None;
    let file_writer = if config.file_enabled {
        let appender = RollingFileAppender::new(
            rotation(&config.file_rotation),
            &config.file_directory,
            &config.file_prefix,
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        Some(writer)
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        let stdout = fmt::layer().json();
        let file = file_writer
            .map(|writer| fmt::layer().json().with_writer(writer).with_ansi(false));
        registry.with(stdout).with(file).init();
    } else {
        let stdout = fmt::layer();
        let file = file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false));
        registry.with(stdout).with(file).init();
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn rotation(value: &str) -> Rotation {
    match value {
        "hourly" => Rotation::HOURLY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
