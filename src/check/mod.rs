//! The check engine
//!
//! One worker task connects, pings, runs the query and formats the first row.
//! The caller races that worker against the time budget:
//!
//! ```text
//! supervise ──spawn──> pipeline: open -> ping -> first row -> format
//!     │                                   │
//!     └── select { budget elapsed, oneshot result } <┘
//! ```
//!
//! The worker is never killed when the budget runs out. Its ping and query
//! share one deadline sized from the same budget, so an abandoned worker stops
//! on its own shortly after.

pub mod classify;
pub mod connector;
pub mod executor;
pub mod format;

use crate::{error::CheckError, queries::Driver, settings::CheckSettings, verdict::Verdict};
use std::sync::Arc;
use tokio::{
    sync::oneshot,
    task,
    time::{self, Instant},
};
use tracing::{debug, warn};

/// What the supervisor saw first
#[derive(Debug)]
pub enum Outcome {
    /// The formatted first row
    Completed(String),
    Failed(CheckError),
    TimedOut,
}

/// Run one check and produce its verdict
pub async fn run(driver: Arc<dyn Driver>, settings: &CheckSettings) -> Verdict {
    let outcome = supervise(driver, settings).await;
    verdict_for(outcome, settings)
}

/// Race the pipeline against the time budget
pub async fn supervise(driver: Arc<dyn Driver>, settings: &CheckSettings) -> Outcome {
    // fixed before the worker exists, so the worker's own deadline is never earlier
    let deadline = Instant::now() + settings.timeout;

    let (tx, rx) = oneshot::channel();
    let worker_settings = settings.clone();
    task::spawn(async move {
        let result = pipeline(driver.as_ref(), &worker_settings).await;
        // nobody is listening after a timeout
        let _ = tx.send(result);
    });

    tokio::select! {
        biased;

        () = time::sleep_until(deadline) => {
            warn!(
                host = %settings.host,
                timeout = ?settings.timeout,
                "check timed out"
            );
            Outcome::TimedOut
        }
        result = rx => match result {
            Ok(Ok(formatted)) => Outcome::Completed(formatted),
            Ok(Err(e)) => Outcome::Failed(e),
            Err(_) => Outcome::Failed(CheckError::WorkerLost),
        },
    }
}

/// Map an outcome onto the verdict scale
#[must_use]
pub fn verdict_for(outcome: Outcome, settings: &CheckSettings) -> Verdict {
    match outcome {
        Outcome::Completed(formatted) => {
            classify::classify(&formatted, settings.pattern.as_deref())
        }
        Outcome::Failed(err) => Verdict::failed(&err),
        Outcome::TimedOut => Verdict::timed_out(&settings.host, settings.timeout),
    }
}

/// Connect, ping, fetch the first row and format it
///
/// The connection is closed on every path that gets one.
///
/// # Errors
///
/// Returns the first [`CheckError`] hit by any stage
pub async fn pipeline(driver: &dyn Driver, settings: &CheckSettings) -> Result<String, CheckError> {
    let descriptor = settings.descriptor();
    let mut conn = connector::open(driver, &descriptor).await?;

    // probe and query share this deadline
    let deadline = Instant::now() + settings.timeout;

    let row = async {
        connector::ping(conn.as_mut(), deadline).await?;
        executor::fetch_first_row(conn.as_mut(), &settings.query, deadline).await
    }
    .await;

    if let Err(e) = conn.close().await {
        debug!(error = %e, "failed to close connection");
    }

    row.map(|row| format::format_row(&row.values))
}
