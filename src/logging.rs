//! Tracing setup and search logging macros
//!
//! The terminal belongs to the UI, so everything goes to a daily file under
//! the configured log directory.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, DEFAULT_LOG_FILTER};

const LOG_FILE_PREFIX: &str = "bookscout";

/// Pick the directives to run with. Unparseable input falls back to the
/// default instead of silencing the log.
fn effective_directives(requested: &str) -> &str {
    if EnvFilter::try_new(requested).is_ok() {
        requested
    } else {
        DEFAULT_LOG_FILTER
    }
}

fn open_appender(dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .context("building log file appender")
}

/// Install the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes what is still buffered.
pub fn init_logging(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(open_appender(&config.log_dir)?);

    let directives = effective_directives(&config.log_filter);
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(fmt_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    if directives != config.log_filter {
        tracing::warn!(requested = %config.log_filter, "Invalid log filter, using default");
    }
    tracing::info!(dir = %config.log_dir.display(), filter = directives, "Logging initialized");

    Ok(guard)
}

/// Record the start of a catalog search for a fetch ticket
#[macro_export]
macro_rules! log_search_started {
    ($ticket:expr, $criteria:expr) => {
        tracing::debug!(
            ticket = ?$ticket,
            query = %$criteria.free_text,
            subject = $criteria.category.value(),
            "Catalog search started"
        )
    };
}

/// Record how a catalog search for a fetch ticket ended
#[macro_export]
macro_rules! log_search_outcome {
    ($ticket:expr, $result:expr) => {
        match &$result {
            Ok(books) => tracing::info!(ticket = ?$ticket, count = books.len(), "Catalog search returned"),
            Err(e) => tracing::error!(ticket = ?$ticket, error = %e, "Catalog search failed"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_directives_are_kept() {
        assert_eq!(effective_directives("bookscout=trace"), "bookscout=trace");
        assert_eq!(effective_directives("warn"), "warn");
    }

    #[test]
    fn invalid_directives_fall_back_to_default() {
        assert_eq!(effective_directives("bookscout=loudest"), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn appender_creates_missing_directory() {
        let dir = std::env::temp_dir().join(format!("bookscout-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        open_appender(&dir).unwrap();
        assert!(dir.is_dir());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
