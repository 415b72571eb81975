//! TLS configuration for the SQL Server connection
//!
//! The TDS client negotiates encryption during prelogin; this module only
//! decides what to ask for and which certificates to trust.

pub mod config;

pub use config::{TlsConfig, TlsMode};
