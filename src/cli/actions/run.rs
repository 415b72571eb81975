use super::Action;
use crate::{check, queries::MssqlDriver, verdict::Verdict};
use std::sync::Arc;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> Verdict {
    match action {
        Action::Check { settings } => check::run(Arc::new(MssqlDriver), &settings).await,
    }
}
