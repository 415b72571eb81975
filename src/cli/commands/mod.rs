use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

/// Pure clap command definitions with zero business logic
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .long_about(
            "Runs a query against an MS-SQL server and returns the first row.\n\
            Returns CRITICAL if the regex matches or errors occur. The row is passed \
            to perfdata in semicolon-delimited format.\n\
            A simple statement like \"SELECT GETDATE()\" verifies server responsiveness.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("hostname")
                .env("CHECK_MSSQL_HOSTNAME")
                .help("Host to connect to")
                .long("hostname")
                .short('H')
                .value_name("HOST"),
        )
        .arg(
            Arg::new("port")
                .default_value("1433")
                .env("CHECK_MSSQL_PORT")
                .help("Port")
                .long("port")
                .short('P')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("user")
                .env("CHECK_MSSQL_USER")
                .help("Username to connect with")
                .long("user")
                .short('u'),
        )
        .arg(
            Arg::new("pass")
                .env("CHECK_MSSQL_PASS")
                .hide_env_values(true)
                .help("Password to connect with")
                .long("pass")
                .short('p'),
        )
        .arg(
            Arg::new("credfile")
                .env("CHECK_MSSQL_CREDFILE")
                .help("Credentials file, overrides --user and --pass")
                .long("credfile")
                .long_help(
                    "Credentials file, overrides --user and --pass.\n\n\
                    Format, one entry per line:\n\
                    username=<user>\n\
                    password=<pass>\n\n\
                    Blank lines and lines starting with # are ignored.",
                )
                .short('f')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("database")
                .env("CHECK_MSSQL_DATABASE")
                .help("Database name")
                .long("database")
                .short('d'),
        )
        .arg(
            Arg::new("timeout")
                .default_value("15")
                .env("CHECK_MSSQL_TIMEOUT")
                .help("Timeout in seconds")
                .long("timeout")
                .long_help(
                    "Timeout in seconds for the whole check: connecting, \
                    login and query all share it.\n\
                    When it runs out the check reports UNKNOWN.",
                )
                .short('t')
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("query")
                .env("CHECK_MSSQL_QUERY")
                .help("Query to execute")
                .long("query")
                .short('q'),
        )
        .arg(
            Arg::new("regex")
                .env("CHECK_MSSQL_REGEX")
                .help("Regex pattern to match against output, CRITICAL if it matches")
                .long("regex")
                .short('r'),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::SetTrue)
                .help("Set logging to verbose level (use caution, may expose credentials)")
                .long("verbose")
                .short('v'),
        )
        .arg(
            Arg::new("tls-mode")
                .default_value("disable")
                .env("CHECK_MSSQL_TLS_MODE")
                .help("TLS mode: disable, require, verify-ca, verify-full")
                .ignore_case(true)
                .long("tls-mode")
                .long_help(
                    "TLS connection mode:\n\n\
                    - disable: only the login packet is encrypted (default)\n\
                    - require: TLS required, no certificate verification\n\
                    - verify-ca: verify server certificate against CA\n\
                    - verify-full: verify certificate and hostname",
                )
                .value_name("MODE")
                .value_parser(["disable", "require", "verify-ca", "verify-full"]),
        )
        .arg(
            Arg::new("tls-ca")
                .env("CHECK_MSSQL_TLS_CA")
                .help("Path to CA certificate file for TLS verification")
                .long("tls-ca")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}
