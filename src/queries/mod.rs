pub mod mssql;

use crate::{error::CheckError, settings::ConnectionDescriptor};
use async_trait::async_trait;

pub use mssql::MssqlDriver;

/// A single column value as returned by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bytes(Vec<u8>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Anything else the driver can render to text (dates, decimals, GUIDs, XML)
    Other(String),
}

/// First row of a result set with its column names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

/// Opens connections from a descriptor
#[async_trait]
pub trait Driver: Send + Sync {
    /// Prepare a connection. Implementations may defer the network round trip
    /// to [`Connection::ping`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Connect`] if the descriptor can't be turned into a connection
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn Connection>, CheckError>;
}

/// A connection owned by one check
#[async_trait]
pub trait Connection: Send {
    /// Make sure the server is reachable and accepts the login
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Ping`] if the server can't be reached
    async fn ping(&mut self) -> Result<(), CheckError>;

    /// Run `query` and return only its first row, `None` if there are no rows
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Query`], [`CheckError::Columns`] or [`CheckError::Scan`]
    async fn first_row(&mut self, query: &str) -> Result<Option<RawRow>, CheckError>;

    /// Release the connection
    ///
    /// # Errors
    ///
    /// Returns an error if the server side close fails; the connection is gone either way
    async fn close(self: Box<Self>) -> Result<(), CheckError>;
}
