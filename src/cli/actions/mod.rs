mod run;

use crate::{settings::CheckSettings, verdict::Verdict};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check { settings: CheckSettings },
}

impl Action {
    /// Execute the action and return the verdict to print
    pub async fn execute(self) -> Verdict {
        run::execute(self).await
    }
}
