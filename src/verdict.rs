//! Plugin verdicts and their one-line rendering
//!
//! The monitoring supervisor only looks at the exit code and the first line
//! of stdout: `SQL <STATE>: <message>[|<perfdata>]`.

use crate::error::CheckError;
use std::{fmt, time::Duration};

/// Monitoring exit code scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    /// Reserved by the scale, no check produces it
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub state: ServiceState,
    pub message: String,
    pub perfdata: Option<String>,
}

impl Verdict {
    /// OK, the result doubles as performance data
    #[must_use]
    pub fn ok(result: &str) -> Self {
        Self {
            state: ServiceState::Ok,
            message: result.to_string(),
            perfdata: Some(result.to_string()),
        }
    }

    /// CRITICAL because the pattern matched the result
    #[must_use]
    pub fn matched(result: &str) -> Self {
        Self {
            state: ServiceState::Critical,
            message: result.to_string(),
            perfdata: Some(result.to_string()),
        }
    }

    /// CRITICAL because the check itself failed
    #[must_use]
    pub fn failed(err: &CheckError) -> Self {
        Self {
            state: ServiceState::Critical,
            message: single_line(&err.to_string()),
            perfdata: None,
        }
    }

    /// UNKNOWN because the budget ran out
    #[must_use]
    pub fn timed_out(host: &str, budget: Duration) -> Self {
        Self {
            state: ServiceState::Unknown,
            message: format!(
                "ERROR connection {host} (timeout after {})",
                format_budget(budget)
            ),
            perfdata: None,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQL {}: {}", self.state, self.message)?;
        if let Some(perfdata) = &self.perfdata {
            write!(f, "|{perfdata}")?;
        }
        Ok(())
    }
}

/// Budget in seconds without a unit, `15` or `0.25`
#[must_use]
pub fn format_budget(budget: Duration) -> String {
    if budget.subsec_nanos() == 0 {
        budget.as_secs().to_string()
    } else {
        budget.as_secs_f64().to_string()
    }
}

/// Collapse multi-line driver or regex errors onto one line
#[must_use]
pub fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
