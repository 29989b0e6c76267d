//! Logging initialisation for the netreach CLI.
//!
//! Diagnostics go to `stderr` so the summary on `stdout` stays parseable.
//! `RUST_LOG` decides the filter when it holds valid directives. Otherwise the
//! filter is `info`, widened to `netreach_core=debug` when the command asked
//! for intermediate results. `NETREACH_LOG_FORMAT` selects `human` or `json`.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::{LogTracer, log::SetLoggerError};
use tracing_subscriber::{EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt};

const LOG_FORMAT_ENV: &str = "NETREACH_LOG_FORMAT";
const FILTER_ENV: &str = "RUST_LOG";
const DEFAULT_DIRECTIVES: &str = "info";
const DEBUG_DIRECTIVES: &str = "info,netreach_core=debug";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output formats accepted by `NETREACH_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// One JSON object per line, including the active span list.
    Json,
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `NETREACH_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Another `tracing` subscriber already owns the global default.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing`.
        #[source]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
    /// Another `log` logger already owns the global slot.
    #[error("failed to bridge `log` records into tracing: {source}")]
    BridgeFailed {
        /// Error raised by the `log` facade.
        #[source]
        source: SetLoggerError,
    },
}

/// Resolved logging configuration for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    format: LogFormat,
    directives: String,
}

impl LogSettings {
    /// Builds settings from an explicit format, the raw `RUST_LOG` value and
    /// the command's debug switch.
    ///
    /// A blank or unparsable `rust_log` falls back to the default directives.
    ///
    /// # Examples
    /// ```
    /// use netreach_cli::logging::{LogFormat, LogSettings};
    ///
    /// let quiet = LogSettings::new(LogFormat::Human, None, false);
    /// assert_eq!(quiet.directives(), "info");
    ///
    /// let debug = LogSettings::new(LogFormat::Human, None, true);
    /// assert_eq!(debug.directives(), "info,netreach_core=debug");
    ///
    /// let explicit = LogSettings::new(LogFormat::Json, Some("warn"), true);
    /// assert_eq!(explicit.directives(), "warn");
    /// ```
    #[must_use]
    pub fn new(format: LogFormat, rust_log: Option<&str>, debug: bool) -> Self {
        let fallback = if debug {
            DEBUG_DIRECTIVES
        } else {
            DEFAULT_DIRECTIVES
        };
        let directives = rust_log
            .map(str::trim)
            .filter(|raw| !raw.is_empty() && EnvFilter::try_new(raw).is_ok())
            .unwrap_or(fallback);
        Self {
            format,
            directives: directives.to_owned(),
        }
    }

    /// Reads `NETREACH_LOG_FORMAT` and `RUST_LOG` from the environment.
    ///
    /// # Errors
    /// Returns [`LoggingError`] if either variable is not valid Unicode or the
    /// format is unsupported.
    pub fn from_env(debug: bool) -> Result<Self, LoggingError> {
        let format = match read_env(LOG_FORMAT_ENV)? {
            Some(raw) => parse_log_format(&raw)?,
            None => LogFormat::default(),
        };
        let rust_log = read_env(FILTER_ENV)?;
        Ok(Self::new(format, rust_log.as_deref(), debug))
    }

    /// Returns the selected output format.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns the filter directives the subscriber will use.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }

    /// Builds the `EnvFilter` for these settings.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }
}

/// What [`init_logging`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingStatus {
    /// The subscriber and the `log` bridge were installed by this call.
    Installed,
    /// An earlier call already installed logging.
    AlreadyInstalled,
    /// Another subscriber or logger owned the global slot; it was kept.
    ExternallyConfigured,
}

/// Installs global structured logging if it has not already been configured.
///
/// A subscriber or `log` logger installed by someone else is kept and
/// reported once on `stderr`.
#[expect(
    clippy::print_stderr,
    reason = "Tracing may be owned by another subscriber at this point"
)]
pub fn init_logging(settings: &LogSettings) -> LoggingStatus {
    if INITIALISED.get().is_some() {
        return LoggingStatus::AlreadyInstalled;
    }

    let status = match install_subscriber(settings) {
        Ok(()) => LoggingStatus::Installed,
        Err(err) => {
            eprintln!("structured logging already configured elsewhere: {err}");
            LoggingStatus::ExternallyConfigured
        }
    };
    let _ = INITIALISED.set(());
    status
}

fn install_subscriber(settings: &LogSettings) -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match settings.format() {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(settings.filter())
        .with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| LoggingError::InstallFailed { source })?;
    LogTracer::init().map_err(|source| LoggingError::BridgeFailed { source })
}

fn read_env(name: &'static str) -> Result<Option<String>, LoggingError> {
    match env::var(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source @ env::VarError::NotUnicode(_)) => {
            Err(LoggingError::InvalidUnicode { name, source })
        }
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tracing::level_filters::LevelFilter;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("HUMAN", LogFormat::Human)]
    #[case(" json ", LogFormat::Json)]
    fn parse_log_format_accepts_supported_values(#[case] raw: &str, #[case] expected: LogFormat) {
        let format = parse_log_format(raw).expect("format must parse");
        assert_eq!(format, expected);
    }

    #[rstest]
    #[case("xml")]
    #[case("")]
    fn parse_log_format_rejects_unknown_values(#[case] raw: &str) {
        let err = parse_log_format(raw).expect_err("format is not supported");
        match err {
            LoggingError::UnsupportedFormat { provided } => assert_eq!(provided, raw),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::quiet(None, false, "info")]
    #[case::debug(None, true, "info,netreach_core=debug")]
    #[case::blank_rust_log(Some("  "), true, "info,netreach_core=debug")]
    #[case::explicit(Some("netreach_cli=trace"), false, "netreach_cli=trace")]
    #[case::explicit_beats_debug(Some("warn"), true, "warn")]
    #[case::invalid_rust_log(Some("netreach_core=loud"), true, "info,netreach_core=debug")]
    fn directives_follow_rust_log_then_debug_switch(
        #[case] rust_log: Option<&str>,
        #[case] debug: bool,
        #[case] expected: &str,
    ) {
        let settings = LogSettings::new(LogFormat::Human, rust_log, debug);
        assert_eq!(settings.directives(), expected);
    }

    #[rstest]
    #[case(false, LevelFilter::INFO)]
    #[case(true, LevelFilter::DEBUG)]
    fn debug_switch_widens_the_filter(#[case] debug: bool, #[case] expected: LevelFilter) {
        let filter = LogSettings::new(LogFormat::Human, None, debug).filter();
        assert_eq!(filter.max_level_hint(), Some(expected));
    }

    #[test]
    fn first_install_succeeds_and_repeats_are_noops() {
        let settings = LogSettings::new(LogFormat::Human, None, false);
        assert_eq!(init_logging(&settings), LoggingStatus::Installed);
        assert_eq!(init_logging(&settings), LoggingStatus::AlreadyInstalled);
    }
}
