//! Process-wide tracing subscriber for the room server.
//!
//! `RUMMY_LOG_FORMAT` picks the line format (`json`, the default, or
//! `pretty` for a terminal). `RUST_LOG` overrides the default filter.

use std::env;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::AppError;

/// Room logs at info; actix's own chatter stays at warn unless asked for.
pub const DEFAULT_FILTER: &str = "info,actix_server=warn,actix_web=info,rummy_backend=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(AppError::config(format!(
                "RUMMY_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }

    /// Read `RUMMY_LOG_FORMAT`. Tracing is not up yet, so a bad value is
    /// returned for the caller to report after falling back to JSON.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("RUMMY_LOG_FORMAT") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(LogFormat::default()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter());
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_ansi(false)
                    .json(),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).compact())
            .init(),
    }
}
