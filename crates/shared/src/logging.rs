//! Logging bootstrap for the meownime binaries.
//!
//! Human-readable output goes to stderr so stdout stays free for tables and
//! JSON dumps; a daily-rolling file per binary keeps the full history.
//! `RUST_LOG` takes precedence over the configured level.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Crates whose own logs follow the configured level
const WORKSPACE_TARGETS: &[&str] = &["shared", "meownime_scraper", "anime_api", "tower_http"];

/// Chatty dependencies capped at warn
const QUIET_TARGETS: &[&str] = &["hyper", "reqwest", "h2", "html5ever", "selectors"];

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Per-binary logging settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Binary name; also the prefix of the rolling log files
    pub component: String,
    pub default_level: Level,
    pub console: bool,
    pub file: bool,
    pub json_format: bool,
}

impl LogConfig {
    /// Settings for `component` from the `[logging]` config section
    pub fn from_config(config: &crate::Config, component: &str) -> Self {
        Self {
            log_dir: config.log_dir(),
            component: component.to_string(),
            default_level: config.log_level(),
            console: config.logging.console,
            file: config.logging.file,
            json_format: config.logging.json_format,
        }
    }
}

fn default_directives(component: &str, level: Level) -> String {
    let own = std::iter::once(component.replace('-', "_"))
        .chain(WORKSPACE_TARGETS.iter().map(|t| t.to_string()))
        .map(|target| format!("{target}={level}"));
    let quiet = QUIET_TARGETS.iter().map(|target| format!("{target}=warn"));

    own.chain(quiet).collect::<Vec<_>>().join(",")
}

fn console_layer<S>() -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .boxed()
}

fn file_layer<S>(config: &LogConfig) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {}", config.log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, &config.component);

    let layer = if config.json_format {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(appender)
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(appender)
            .boxed()
    };
    Ok(layer)
}

/// Install the global subscriber; fails if one is already set
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.component, config.default_level)));

    let mut layers = Vec::new();
    if config.console {
        layers.push(console_layer());
    }
    if config.file {
        layers.push(file_layer(&config)?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::info!(
        component = %config.component,
        log_dir = %config.log_dir.display(),
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use tempfile::TempDir;
    use tracing_subscriber::Registry;

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.logging.default_level = "warn".to_string();
        config.logging.json_format = true;
        config.logging.console = false;

        let log_config = LogConfig::from_config(&config, "anime-api");
        assert_eq!(log_config.component, "anime-api");
        assert_eq!(log_config.log_dir, PathBuf::from("logs"));
        assert_eq!(log_config.default_level, Level::WARN);
        assert!(log_config.json_format);
        assert!(!log_config.console);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let mut config = Config::default();
        config.logging.default_level = "chatty".to_string();

        let log_config = LogConfig::from_config(&config, "meownime");
        assert_eq!(log_config.default_level, Level::INFO);
    }

    #[test]
    fn test_default_directives_use_crate_names() {
        let directives = default_directives("anime-api", Level::DEBUG);
        assert!(directives.starts_with("anime_api=DEBUG,"));
        assert!(directives.contains("meownime_scraper=DEBUG"));
        assert!(directives.contains("html5ever=warn"));
        assert!(directives.ends_with("selectors=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_file_layer_creates_log_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let log_dir = temp_dir.path().join("nested").join("logs");

        let mut config = LogConfig::from_config(&Config::default(), "meownime");
        config.log_dir = log_dir.clone();

        let _layer: BoxedLayer<Registry> = file_layer(&config)?;
        assert!(log_dir.is_dir());

        Ok(())
    }
}
