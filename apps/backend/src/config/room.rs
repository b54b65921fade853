use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::error::AppError;

/// Per-room tunables, shared by every room the process hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomConfig {
    /// Players required before the first deal.
    pub seats: usize,
    pub turn_seconds: u32,
    pub loser_grace: Duration,
    pub reconnect_grace: Duration,
    pub teardown_delay: Duration,
    /// When set, a win opens the loser-declare window instead of scoring hands directly.
    pub show_hands: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            seats: 2,
            turn_seconds: 30,
            loser_grace: Duration::from_secs(20),
            reconnect_grace: Duration::from_secs(30),
            teardown_delay: Duration::from_secs(5),
            show_hands: false,
        }
    }
}

impl RoomConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seats: usize = parse_or("RUMMY_SEATS", &lookup, defaults.seats)?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats) {
            return Err(AppError::config(format!(
                "RUMMY_SEATS must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {seats}"
            )));
        }

        let turn_seconds: u32 = parse_or("RUMMY_TURN_SECONDS", &lookup, defaults.turn_seconds)?;
        if turn_seconds == 0 {
            return Err(AppError::config(
                "RUMMY_TURN_SECONDS must be positive".to_string(),
            ));
        }

        Ok(Self {
            seats,
            turn_seconds,
            loser_grace: seconds_or("RUMMY_LOSER_GRACE_SECONDS", &lookup, defaults.loser_grace)?,
            reconnect_grace: seconds_or(
                "RUMMY_RECONNECT_SECONDS",
                &lookup,
                defaults.reconnect_grace,
            )?,
            teardown_delay: seconds_or("RUMMY_TEARDOWN_SECONDS", &lookup, defaults.teardown_delay)?,
            show_hands: flag_or("RUMMY_SHOW_HANDS", &lookup, defaults.show_hands)?,
        })
    }
}

fn parse_or<T, F>(name: &str, lookup: &F, default: T) -> Result<T, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
    }
}

fn seconds_or<F>(name: &str, lookup: &F, default: Duration) -> Result<Duration, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(name, lookup, default.as_secs()).map(Duration::from_secs)
}

fn flag_or<F>(name: &str, lookup: &F, default: bool) -> Result<bool, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::config(format!(
            "Environment variable '{name}' must be a boolean, got '{other}'"
        ))),
    }
}
