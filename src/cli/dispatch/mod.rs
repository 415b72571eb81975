use crate::{
    cli::actions::Action,
    credentials,
    settings::{CheckSettings, DEFAULT_PORT, DEFAULT_TIMEOUT},
    tls::{TlsConfig, TlsMode},
};
use anyhow::Result;
use clap::ArgMatches;
use std::{path::PathBuf, time::Duration};

fn get_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .filter(|value| !value.is_empty())
        .cloned()
}

/// Extract TLS configuration from the `--tls-*` options
fn extract_tls_config(matches: &ArgMatches) -> Result<TlsConfig> {
    let mode = matches
        .get_one::<String>("tls-mode")
        .map(|m| m.parse::<TlsMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let ca = matches.get_one::<PathBuf>("tls-ca").cloned();

    Ok(TlsConfig { mode, ca })
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the credentials file can't be used or required
/// parameters are missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let mut username = get_string(matches, "user");
    let mut password = get_string(matches, "pass");

    // the file wins over --user/--pass
    if let Some(path) = matches.get_one::<PathBuf>("credfile") {
        let creds = credentials::load(path)?;
        username = Some(creds.username).filter(|u| !u.is_empty());
        password = Some(creds.password).filter(|p| !p.is_empty());
    }

    let (Some(host), Some(username), Some(password), Some(query)) = (
        get_string(matches, "hostname"),
        username,
        password,
        get_string(matches, "query"),
    ) else {
        anyhow::bail!("Missing required arguments (server, username, password, query)");
    };

    let port = matches.get_one::<u16>("port").copied().unwrap_or(DEFAULT_PORT);

    let timeout = matches
        .get_one::<u64>("timeout")
        .map_or(DEFAULT_TIMEOUT, |secs| Duration::from_secs(*secs));

    let tls = extract_tls_config(matches)?;

    Ok(Action::Check {
        settings: CheckSettings {
            host,
            port,
            username,
            password,
            database: get_string(matches, "database"),
            query,
            pattern: get_string(matches, "regex"),
            timeout,
            tls,
        },
    })
}
