// src/utils/logger.rs
use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use time::macros::format_description;
use tracing::Subscriber;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt::{self, time::FormatTime, time::LocalTime, MakeWriter},
    layer::SubscriberExt,
    registry,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_FILE_PREFIX: &str = "portfolio.log";
const DEFAULT_LEVEL: &str = "info";

/// Plain-text event layer shared by the file and stdout outputs.
fn text_layer<S, W, T>(writer: W, timer: T) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    T: FormatTime + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .with_timer(timer)
}

#[derive(Debug)]
pub struct LoggerBuilder {
    log_dir: PathBuf,
    file_prefix: String,
    default_level: String,
}

impl LoggerBuilder {
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }

    /// `RUST_LOG` when set and valid, otherwise the configured default.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_level))
    }

    /// Installs the global subscriber: a daily-rolling file under `log_dir`
    /// plus stdout, both with millisecond local timestamps.
    pub fn init(self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.log_dir)
            .with_context(|| format!("failed to create log directory {}", self.log_dir.display()))?;
        let timer = LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        ));

        registry()
            .with(self.filter())
            .with(text_layer(rolling::daily(&self.log_dir, &self.file_prefix), timer.clone()))
            .with(text_layer(std::io::stdout, timer))
            .try_init()
            .context("a global tracing subscriber is already installed")
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        LoggerBuilder {
            log_dir: PathBuf::from("logs"),
            file_prefix: DEFAULT_FILE_PREFIX.into(),
            default_level: DEFAULT_LEVEL.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Mode, Settings};

    #[test]
    fn defaults_to_relative_logs_at_info() {
        let builder = LoggerBuilder::default();
        assert_eq!(builder.log_dir, PathBuf::from("logs"));
        assert_eq!(builder.file_prefix, "portfolio.log");
        assert_eq!(builder.default_level, "info");
    }

    #[test]
    fn settings_place_logs_under_the_site_root() {
        let settings = Settings {
            mode: Mode::Development,
            host: "127.0.0.1".to_string(),
            port: 3000,
            root: PathBuf::from("/srv/site"),
        };
        let builder = LoggerBuilder::default()
            .log_dir(settings.log_dir())
            .default_level(settings.mode.default_log_level());
        assert_eq!(builder.log_dir, PathBuf::from("/srv/site/logs"));
        assert_eq!(builder.default_level, "debug");
    }
}
