use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::{filter::ParseError, EnvFilter};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 30;
const DEFAULT_EVENT_CAPACITY: usize = 64;
const DEFAULT_GUEST_REPLY_CHANCE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    /// A page session, and the chat in it, ends after this much inactivity.
    pub session_idle_minutes: i64,
    pub event_capacity: usize,
    pub guest_reply_chance: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CHAT_BIND_ADDR value '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid CHAT_LOG_FILTER value '{value}': {source}")]
    InvalidLogFilter { value: String, source: ParseError },
    #[error("invalid {name} value '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("CHAT_GUEST_REPLY_CHANCE must be between 0 and 1, got {0}")]
    InvalidChance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            guest_reply_chance: DEFAULT_GUEST_REPLY_CHANCE,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

fn checked_log_filter(value: String) -> Result<String, ConfigError> {
    match EnvFilter::try_new(&value) {
        Ok(_) => Ok(value),
        Err(source) => Err(ConfigError::InvalidLogFilter { value, source }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr_raw = non_empty_var("CHAT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr_raw,
                source,
            })?;

        let log_filter = checked_log_filter(
            non_empty_var("CHAT_LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        )?;

        let session_idle_minutes = parsed_var("CHAT_SESSION_IDLE_MINUTES", DEFAULT_SESSION_IDLE_MINUTES)?;
        let event_capacity = parsed_var("CHAT_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY)?;
        let guest_reply_chance = parsed_var("CHAT_GUEST_REPLY_CHANCE", DEFAULT_GUEST_REPLY_CHANCE)?;

        if !(0.0..=1.0).contains(&guest_reply_chance) {
            return Err(ConfigError::InvalidChance(guest_reply_chance));
        }
        // broadcast::channel panics on zero capacity
        if event_capacity == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "CHAT_EVENT_CAPACITY",
                value: "0".to_owned(),
            });
        }

        Ok(Config {
            bind_addr,
            log_filter,
            session_idle_minutes,
            event_capacity,
            guest_reply_chance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.event_capacity > 0);
        assert!((0.0..=1.0).contains(&config.guest_reply_chance));
        assert!(checked_log_filter(config.log_filter).is_ok());
    }

    #[test]
    fn log_filter_is_validated() {
        assert!(checked_log_filter("commonroom=debug,tower_http=info".to_owned()).is_ok());
        assert!(matches!(
            checked_log_filter("commonroom=loud".to_owned()),
            Err(ConfigError::InvalidLogFilter { value, .. }) if value == "commonroom=loud"
        ));
    }
}
