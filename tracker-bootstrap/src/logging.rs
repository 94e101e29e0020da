use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "anomaly-tracker.log";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
}

/// Installs the global subscriber: stdout always, plus a daily-rolling file
/// when a log directory is given. Keep the returned guard alive until exit or
/// buffered file lines are lost.
pub fn init_tracing(options: &LogOptions) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(if options.json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    });

    let guard = options.dir.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = if options.json {
            fmt::layer().json().with_writer(writer).boxed()
        } else {
            fmt::layer().with_ansi(false).with_writer(writer).boxed()
        };
        layers.push(file_layer);
        guard
    });

    tracing_subscriber::registry().with(layers).with(filter).init();
    guard
}
