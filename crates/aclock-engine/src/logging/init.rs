use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "aclock=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter string.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

/// Where the effective filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Explicit(String),
    Env(String),
    Level(log::LevelFilter),
}

fn resolve_filter(config: &LoggingConfig, env: Option<String>) -> FilterSource {
    match (&config.env_filter, env) {
        (Some(filter), _) if !filter.trim().is_empty() => FilterSource::Explicit(filter.clone()),
        (_, Some(filter)) if !filter.trim().is_empty() => FilterSource::Env(filter),
        _ => FilterSource::Level(config.default_level),
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Explicit(filter) | FilterSource::Env(filter) => {
                builder.parse_filters(&filter);
            }
            FilterSource::Level(level) => {
                builder.filter_level(level);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed (tests, embedding).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
