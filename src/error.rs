//! Failures a single check can run into.
//!
//! Every variant ends up as a CRITICAL verdict; the `Display` text is the
//! message printed after `SQL CRITICAL: `. The supervisor timeout is not an
//! error here, it is its own outcome (see [`crate::check::Outcome`]).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    /// The connection could not be opened from the descriptor
    #[error("can't connect to server: {0}")]
    Connect(String),

    /// Login or the reachability round trip failed
    #[error("can't ping server: {0}")]
    Ping(String),

    #[error("query error: {0}")]
    Query(String),

    /// The query produced no rows at all
    #[error("query returned no rows")]
    EmptyResult,

    #[error("error getting columns: {0}")]
    Columns(String),

    #[error("error scanning row: {0}")]
    Scan(String),

    /// The classification pattern does not compile
    #[error("Invalid regex: {0}")]
    Pattern(String),

    /// The worker task went away without reporting anything
    #[error("check worker exited without a result")]
    WorkerLost,
}

impl CheckError {
    /// Short label used as a structured logging field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connect(_) | Self::Ping(_) => "connect",
            Self::Query(_) => "query",
            Self::EmptyResult => "empty_result",
            Self::Columns(_) | Self::Scan(_) => "extraction",
            Self::Pattern(_) => "pattern",
            Self::WorkerLost => "worker",
        }
    }
}
