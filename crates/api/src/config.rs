//! Server configuration read from the process environment.

use std::net::SocketAddr;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use splitledger_core::Money;
use splitledger_observability::{LogFormat, LOG_FORMAT_ENV};

pub const BIND_ADDR_ENV: &str = "SPLITLEDGER_BIND_ADDR";
pub const SETTLEMENT_TOLERANCE_ENV: &str = "SPLITLEDGER_SETTLEMENT_TOLERANCE";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SPLITLEDGER_BIND_ADDR: invalid socket address {0:?}")]
    InvalidBindAddr(String),

    #[error("SPLITLEDGER_LOG_FORMAT: {0}")]
    InvalidLogFormat(String),

    #[error("SPLITLEDGER_SETTLEMENT_TOLERANCE: expected a non-negative amount, got {0:?}")]
    InvalidTolerance(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Balances within this distance of zero are left out of settlement plans.
    pub settlement_tolerance: Money,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::default(),
            settlement_tolerance: Money::ZERO,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(BIND_ADDR_ENV) {
            config.bind_addr = raw.parse().map_err(|_| ConfigError::InvalidBindAddr(raw))?;
        }

        if let Some(raw) = get(LOG_FORMAT_ENV) {
            config.log_format = raw.parse().map_err(ConfigError::InvalidLogFormat)?;
        }

        if let Some(raw) = get(SETTLEMENT_TOLERANCE_ENV) {
            config.settlement_tolerance = Decimal::from_str(&raw)
                .ok()
                .and_then(Money::from_decimal)
                .filter(|m| !m.is_negative())
                .ok_or(ConfigError::InvalidTolerance(raw))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_key() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_ENV, "127.0.0.1:9000"),
            (LOG_FORMAT_ENV, "pretty"),
            (SETTLEMENT_TOLERANCE_ENV, "0.01"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.settlement_tolerance, Money::from_cents(1));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_ENV, "  ")])).unwrap();
        assert_eq!(config.bind_addr, ApiConfig::default().bind_addr);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[(BIND_ADDR_ENV, "nowhere")])).unwrap_err(),
            ConfigError::InvalidBindAddr("nowhere".into())
        );
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[(SETTLEMENT_TOLERANCE_ENV, "-1")])).unwrap_err(),
            ConfigError::InvalidTolerance("-1".into())
        );
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_ENV, "xml")])),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }
}
