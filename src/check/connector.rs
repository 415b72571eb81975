use crate::{
    error::CheckError,
    queries::{Connection, Driver},
    settings::ConnectionDescriptor,
};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

/// Open a connection for the descriptor
///
/// # Errors
///
/// Returns [`CheckError::Connect`] if the driver refuses the descriptor
pub async fn open(
    driver: &dyn Driver,
    descriptor: &ConnectionDescriptor,
) -> Result<Box<dyn Connection>, CheckError> {
    debug!(
        connection = %descriptor.redacted_connection_string(),
        "connecting to database"
    );

    driver.connect(descriptor).await.inspect_err(|e| {
        warn!(error = %e, kind = e.kind(), "failed to open connection");
    })
}

/// Verify the server answers before `deadline`
///
/// # Errors
///
/// Returns [`CheckError::Ping`] if the probe fails or the deadline passes
pub async fn ping(conn: &mut dyn Connection, deadline: Instant) -> Result<(), CheckError> {
    time::timeout_at(deadline, conn.ping())
        .await
        .unwrap_or_else(|_| Err(CheckError::Ping("context deadline exceeded".to_string())))
        .inspect_err(|e| {
            warn!(error = %e, kind = e.kind(), "can't ping server");
        })
}
