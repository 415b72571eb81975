use crate::tls::TlsConfig;
use std::{fmt, time::Duration};

pub const DEFAULT_PORT: u16 = 1433;

/// Monitoring-plugin convention
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything a single check needs, resolved once before the engine runs
#[derive(Clone, PartialEq, Eq)]
pub struct CheckSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: Option<String>,
    pub query: String,
    pub pattern: Option<String>,
    pub timeout: Duration,
    pub tls: TlsConfig,
}

impl fmt::Debug for CheckSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("query", &self.query)
            .field("pattern", &self.pattern)
            .field("timeout", &self.timeout)
            .field("tls", &self.tls)
            .finish()
    }
}

impl CheckSettings {
    /// Build the connection descriptor handed to the driver
    #[must_use]
    pub fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            database: self.database.clone().filter(|db| !db.is_empty()),
            connect_timeout: self.timeout,
            tls: self.tls.clone(),
        }
    }
}

/// Read-only view of the settings needed to reach the server
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: Option<String>,
    pub connect_timeout: Duration,
    pub tls: TlsConfig,
}

impl ConnectionDescriptor {
    /// Connection string with the password masked, safe to log
    #[must_use]
    pub fn redacted_connection_string(&self) -> String {
        let mut conn = format!(
            "server={};port={};user id={};password=***;connection timeout={};encrypt={}",
            self.host,
            self.port,
            self.username,
            self.connect_timeout.as_secs(),
            self.tls.mode.as_str()
        );
        if let Some(database) = &self.database {
            conn.push_str(";database=");
            conn.push_str(database);
        }
        conn
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("connect_timeout", &self.connect_timeout)
            .field("tls", &self.tls)
            .finish()
    }
}
