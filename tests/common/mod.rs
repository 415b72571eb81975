#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use check_mssql::{
    error::CheckError,
    queries::{Connection, Driver, RawRow, Value},
    settings::{CheckSettings, ConnectionDescriptor},
    tls::TlsConfig,
};
use std::{
    env,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
    time::Duration,
};

/// What each stage of a [`ScriptedDriver`] does
#[derive(Debug, Clone)]
pub enum Step {
    Ok,
    Fail(CheckErrorKind),
    Hang,
    /// Unwind the worker task before it can report
    Panic,
}

/// `CheckError` is not `Clone`, scripts carry a recipe instead
#[derive(Debug, Clone)]
pub enum CheckErrorKind {
    Connect(&'static str),
    Ping(&'static str),
    Query(&'static str),
    Columns(&'static str),
    Scan(&'static str),
}

impl CheckErrorKind {
    fn build(&self) -> CheckError {
        match self {
            Self::Connect(m) => CheckError::Connect((*m).to_string()),
            Self::Ping(m) => CheckError::Ping((*m).to_string()),
            Self::Query(m) => CheckError::Query((*m).to_string()),
            Self::Columns(m) => CheckError::Columns((*m).to_string()),
            Self::Scan(m) => CheckError::Scan((*m).to_string()),
        }
    }
}

/// In-memory driver that plays back a script
#[derive(Clone)]
pub struct ScriptedDriver {
    pub connect: Step,
    pub ping: Step,
    pub query: Step,
    pub row: Option<RawRow>,
    pub closed: Arc<AtomicBool>,
    pub queries: Arc<AtomicU32>,
}

impl ScriptedDriver {
    pub fn returning(row: Option<RawRow>) -> Self {
        Self {
            connect: Step::Ok,
            ping: Step::Ok,
            query: Step::Ok,
            row,
            closed: Arc::new(AtomicBool::new(false)),
            queries: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_connect(mut self, step: Step) -> Self {
        self.connect = step;
        self
    }

    pub fn with_ping(mut self, step: Step) -> Self {
        self.ping = step;
        self
    }

    pub fn with_query(mut self, step: Step) -> Self {
        self.query = step;
        self
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn query_count(&self) -> u32 {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn arc(&self) -> Arc<dyn Driver> {
        Arc::new(self.clone())
    }
}

async fn play(step: &Step) -> Result<(), CheckError> {
    match step {
        Step::Ok => Ok(()),
        Step::Fail(kind) => Err(kind.build()),
        Step::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
        Step::Panic => panic!("scripted driver panic"),
    }
}

struct ScriptedConnection {
    script: ScriptedDriver,
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn connect(
        &self,
        _descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn Connection>, CheckError> {
        play(&self.connect).await?;
        Ok(Box::new(ScriptedConnection {
            script: self.clone(),
        }))
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn ping(&mut self) -> Result<(), CheckError> {
        play(&self.script.ping).await
    }

    async fn first_row(&mut self, _query: &str) -> Result<Option<RawRow>, CheckError> {
        self.script.queries.fetch_add(1, Ordering::SeqCst);
        play(&self.script.query).await?;
        Ok(self.script.row.clone())
    }

    async fn close(self: Box<Self>) -> Result<(), CheckError> {
        self.script.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn row(values: Vec<Value>) -> RawRow {
    RawRow {
        columns: (0..values.len()).map(|i| format!("col{i}")).collect(),
        values,
    }
}

pub fn settings() -> CheckSettings {
    CheckSettings {
        host: "db1.example.com".into(),
        port: 1433,
        username: "monitor".into(),
        password: "secret".into(),
        database: None,
        query: "SELECT GETDATE()".into(),
        pattern: None,
        timeout: Duration::from_secs(5),
        tls: TlsConfig::default(),
    }
}

pub fn settings_with_pattern(pattern: &str) -> CheckSettings {
    CheckSettings {
        pattern: Some(pattern.to_string()),
        ..settings()
    }
}

pub fn check_mssql_binary_path() -> PathBuf {
    env::var_os("CARGO_BIN_EXE_check_mssql")
        .map_or_else(|| PathBuf::from("target/debug/check_mssql"), PathBuf::from)
}

/// Port on 127.0.0.1 nothing listens on
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

pub fn skip_if_no_mssql() -> bool {
    env::var("SKIP_MSSQL_TESTS").is_ok()
}

/// Live server settings from `CHECK_MSSQL_TEST_*`, defaults match a local container
pub fn live_settings(query: &str) -> CheckSettings {
    let var = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());
    CheckSettings {
        host: var("CHECK_MSSQL_TEST_HOST", "127.0.0.1"),
        port: var("CHECK_MSSQL_TEST_PORT", "1433").parse().unwrap(),
        username: var("CHECK_MSSQL_TEST_USER", "sa"),
        password: var("CHECK_MSSQL_TEST_PASS", "Secret_2024!"),
        database: Some(var("CHECK_MSSQL_TEST_DATABASE", "master")),
        query: query.to_string(),
        pattern: None,
        timeout: Duration::from_secs(10),
        tls: TlsConfig::default(),
    }
}
