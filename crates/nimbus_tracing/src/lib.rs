//! Tracing configuration for Nimbus programs.
//!
//! Provides [`TracingConfig`], which configures and installs the `tracing`
//! subscriber. The Nimbus crates emit events under the `nimbus_output` and
//! `nimbus_resource` targets; secret values are always redacted before they
//! reach a subscriber.
//!
//! # Example
//!
//! ```
//! use nimbus_tracing::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! // Development: pretty output with debug level
//! let dev = TracingConfig::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .with_span_events(true);
//!
//! // Production: JSON output for log aggregation
//! let prod = TracingConfig::default()
//!     .with_level(Level::INFO)
//!     .with_format(TracingFormat::Json)
//!     .with_env_filter("nimbus_output=info,nimbus_resource=warn");
//! # let _ = (dev, prod);
//! ```
//!
//! # Environment
//!
//! [`TracingConfig::from_env`] reads:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `NIMBUS_LOG` | Filter directives, e.g. `nimbus_output=trace` |
//! | `NIMBUS_LOG_FORMAT` | `pretty`, `compact` or `json` |

use core::fmt;
use core::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "NIMBUS_LOG";

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "NIMBUS_LOG_FORMAT";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

impl FromStr for TracingFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(TracingError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for TracingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Errors configuring or installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The format name is not one of `pretty`, `compact` or `json`.
    #[error("unknown tracing format '{0}': expected pretty, compact or json")]
    UnknownFormat(String),

    /// A global subscriber has already been installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing and logging configuration.
///
/// # Environment Filter
///
/// Use `with_env_filter` to set target-specific log levels. An invalid filter
/// falls back to the configured level.
///
/// ```
/// use nimbus_tracing::TracingConfig;
///
/// TracingConfig::default()
///     .with_env_filter("nimbus_output=debug,nimbus_resource=info")
/// # ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Maximum log level.
    pub level: Level,
    /// Output format.
    pub format: TracingFormat,
    /// Environment filter (e.g., "`nimbus_output=debug`").
    pub env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a new `TracingConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from `NIMBUS_LOG` and `NIMBUS_LOG_FORMAT`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::UnknownFormat`] if `NIMBUS_LOG_FORMAT` is set to
    /// an unrecognized format.
    pub fn from_env() -> Result<Self, TracingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::UnknownFormat`] if the format variable holds an
    /// unrecognized format.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TracingError> {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_ENV).filter(|filter| !filter.trim().is_empty()) {
            config = config.with_env_filter(filter);
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config = config.with_format(format.parse()?);
        }
        Ok(config)
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Builds the filter this configuration installs.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::Install`] if a global subscriber is already set.
    pub fn init(&self) -> Result<(), TracingError> {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let registry = tracing_subscriber::registry().with(self.filter());
        match self.format {
            TracingFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()?,
        }

        tracing::info!(level = %self.level, format = %self.format, "tracing initialized");
        Ok(())
    }
}
