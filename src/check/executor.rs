use crate::{
    error::CheckError,
    queries::{Connection, RawRow},
};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

/// Run the query and keep only its first row, bounded by `deadline`
///
/// # Errors
///
/// Returns [`CheckError::Query`] on execution failure or when the deadline
/// passes, [`CheckError::EmptyResult`] if there are no rows, and
/// [`CheckError::Columns`] / [`CheckError::Scan`] if the row can't be read
pub async fn fetch_first_row(
    conn: &mut dyn Connection,
    query: &str,
    deadline: Instant,
) -> Result<RawRow, CheckError> {
    let row = time::timeout_at(deadline, conn.first_row(query))
        .await
        .unwrap_or_else(|_| Err(CheckError::Query("context deadline exceeded".to_string())))
        .inspect_err(|e| {
            warn!(error = %e, kind = e.kind(), "query error");
        })?;

    let Some(row) = row else {
        warn!(kind = CheckError::EmptyResult.kind(), "query returned no rows");
        return Err(CheckError::EmptyResult);
    };

    debug!(columns = ?row.columns, values = row.values.len(), "fetched first row");

    Ok(row)
}
