use crate::{error::CheckError, verdict::Verdict};
use regex::Regex;
use tracing::{debug, warn};

/// Turn a formatted result into a verdict
///
/// Without a pattern the result is always OK. With one, a match anywhere in
/// the joined text is CRITICAL, and a pattern that doesn't compile is
/// CRITICAL too.
#[must_use]
pub fn classify(result: &str, pattern: Option<&str>) -> Verdict {
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return Verdict::ok(result);
    };

    match Regex::new(pattern) {
        Ok(re) if re.is_match(result) => {
            debug!(pattern, "pattern matched result");
            Verdict::matched(result)
        }
        Ok(_) => Verdict::ok(result),
        Err(e) => {
            let err = CheckError::Pattern(e.to_string());
            warn!(error = %err, kind = err.kind(), "invalid pattern");
            Verdict::failed(&err)
        }
    }
}
