//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::SearchConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Optional JSON file of leg records to seed the timetable
    /// (`TIMETABLE_PATH`).
    pub timetable_path: Option<PathBuf>,

    /// Search tuning (`SEARCH_MAX_EXPANSIONS`, `SEARCH_TIMEOUT_MS`).
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's
    /// value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = match get("BIND_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError {
                var: "BIND_ADDR",
                value,
                reason: "expected host:port",
            })?,
            None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError {
                var: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
                reason: "expected host:port",
            })?,
        };

        let mut search = SearchConfig::default();
        if let Some(value) = get("SEARCH_MAX_EXPANSIONS") {
            search.max_expansions = parse_number(&value, "SEARCH_MAX_EXPANSIONS")?;
        }
        if let Some(value) = get("SEARCH_TIMEOUT_MS") {
            let millis: u64 = parse_number(&value, "SEARCH_TIMEOUT_MS")?;
            search.time_budget = Some(Duration::from_millis(millis));
        }

        Ok(Self {
            bind_addr,
            timetable_path: get("TIMETABLE_PATH").map(PathBuf::from),
            search,
        })
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, var: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        var,
        value: value.to_string(),
        reason: "expected a non-negative integer",
    })
}
