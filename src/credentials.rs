//! Credentials file loading
//!
//! Keeps the password out of the process list:
//!
//! ```text
//! # monitoring login
//! username=nagios
//! password=s3cret
//! ```

use anyhow::{Context, Result};
use std::{fmt, fs, path::Path};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Read and parse a credentials file
///
/// # Errors
///
/// Returns an error if the file can't be read or lacks `username` or `password`
pub fn load(path: &Path) -> Result<Credentials> {
    let data = fs::read_to_string(path).context("failed to read credentials file")?;
    parse(&data)
}

/// Parse `key=value` lines; blank lines, `#` comments and lines without `=` are skipped
///
/// # Errors
///
/// Returns an error if `username` or `password` is missing
pub fn parse(data: &str) -> Result<Credentials> {
    let mut username = None;
    let mut password = None;

    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key.trim() {
            "username" => username = Some(value.trim().to_string()),
            "password" => password = Some(value.trim().to_string()),
            _ => {}
        }
    }

    Ok(Credentials {
        username: username.context("credentials file missing username")?,
        password: password.context("credentials file missing password")?,
    })
}
