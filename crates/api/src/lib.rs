//! HTTP API: routing, request/response mapping, and server configuration.
//!
//! The engine lives in `splitledger-ledger`; this crate only transports its
//! inputs and outputs.

pub mod app;
pub mod config;
pub mod middleware;

pub use app::build_app;
pub use app::services::{LedgerService, ServiceError};
pub use config::{ApiConfig, ConfigError};
