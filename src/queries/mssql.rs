use super::{Connection, Driver, RawRow, Value};
use crate::{error::CheckError, settings::ConnectionDescriptor};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use futures::TryStreamExt;
use std::{fmt::Display, time::Duration};
use tiberius::{AuthMethod, Client, ColumnData, Config, FromSql};
use tokio::{net::TcpStream, time};
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

type MssqlClient = Client<Compat<TcpStream>>;

/// SQL Server driver over the `tiberius` TDS client
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDriver;

#[async_trait]
impl Driver for MssqlDriver {
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn Connection>, CheckError> {
        let config = client_config(descriptor)?;
        Ok(Box::new(MssqlConnection {
            config,
            connect_timeout: descriptor.connect_timeout,
            client: None,
        }))
    }
}

/// Build the `tiberius` config for a descriptor
///
/// # Errors
///
/// Returns [`CheckError::Connect`] if the CA certificate file does not exist
pub fn client_config(descriptor: &ConnectionDescriptor) -> Result<Config, CheckError> {
    if let Some(ca) = &descriptor.tls.ca
        && !ca.is_file()
    {
        return Err(CheckError::Connect(format!(
            "CA certificate not found: {}",
            ca.display()
        )));
    }

    let mut config = Config::new();
    config.host(&descriptor.host);
    config.port(descriptor.port);
    config.authentication(AuthMethod::sql_server(
        &descriptor.username,
        &descriptor.password,
    ));
    if let Some(database) = &descriptor.database {
        config.database(database);
    }
    config.application_name(env!("CARGO_PKG_NAME"));
    descriptor.tls.apply(&mut config);

    Ok(config)
}

/// The TCP connection and login happen on first use, usually [`Connection::ping`]
pub struct MssqlConnection {
    config: Config,
    connect_timeout: Duration,
    client: Option<MssqlClient>,
}

impl MssqlConnection {
    async fn client(&mut self) -> Result<&mut MssqlClient, CheckError> {
        if self.client.is_none() {
            let client = time::timeout(self.connect_timeout, login(self.config.clone()))
                .await
                .map_err(|_| {
                    CheckError::Ping(format!("login timed out after {:?}", self.connect_timeout))
                })?
                .map_err(|e| CheckError::Ping(e.to_string()))?;
            self.client = Some(client);
        }

        self.client
            .as_mut()
            .ok_or_else(|| CheckError::Ping("connection not established".to_string()))
    }
}

async fn login(config: Config) -> tiberius::Result<MssqlClient> {
    let tcp = TcpStream::connect(config.get_addr()).await?;
    tcp.set_nodelay(true)?;

    match Client::connect(config.clone(), tcp.compat_write()).await {
        // Azure SQL gateways hand out the real node during login
        Err(tiberius::error::Error::Routing { host, port }) => {
            debug!(host = %host, port, "server redirected the connection");
            let mut config = config;
            config.host(&host);
            config.port(port);

            let tcp = TcpStream::connect(config.get_addr()).await?;
            tcp.set_nodelay(true)?;
            Client::connect(config, tcp.compat_write()).await
        }
        other => other,
    }
}

#[async_trait]
impl Connection for MssqlConnection {
    async fn ping(&mut self) -> Result<(), CheckError> {
        let client = self.client().await?;
        let mut rows = client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| CheckError::Ping(e.to_string()))?
            .into_row_stream();
        rows.try_next()
            .await
            .map_err(|e| CheckError::Ping(e.to_string()))?;
        Ok(())
    }

    async fn first_row(&mut self, query: &str) -> Result<Option<RawRow>, CheckError> {
        let client = self.client().await?;
        let mut stream = client
            .simple_query(query)
            .await
            .map_err(|e| CheckError::Query(e.to_string()))?;

        let columns = stream
            .columns()
            .await
            .map_err(|e| CheckError::Columns(e.to_string()))?
            .map(|columns| {
                columns
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        // the unread remainder is flushed by the client before its next request
        let mut rows = stream.into_row_stream();
        let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| CheckError::Scan(e.to_string()))?
        else {
            return Ok(None);
        };
        drop(rows);

        let values = row
            .into_iter()
            .map(to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(RawRow { columns, values }))
    }

    async fn close(self: Box<Self>) -> Result<(), CheckError> {
        match self.client {
            Some(client) => client
                .close()
                .await
                .map_err(|e| CheckError::Connect(e.to_string())),
            None => Ok(()),
        }
    }
}

fn temporal<T: Display>(parsed: tiberius::Result<Option<T>>) -> Result<Value, CheckError> {
    parsed
        .map(|value| value.map_or(Value::Null, |v| Value::Other(v.to_string())))
        .map_err(|e| CheckError::Scan(e.to_string()))
}

/// Convert a TDS column value into a [`Value`]
///
/// # Errors
///
/// Returns [`CheckError::Scan`] if a date/time value can't be decoded
pub fn to_value(data: ColumnData<'static>) -> Result<Value, CheckError> {
    let value = match data {
        ColumnData::U8(v) => v.map_or(Value::Null, |v| Value::Int(i64::from(v))),
        ColumnData::I16(v) => v.map_or(Value::Null, |v| Value::Int(i64::from(v))),
        ColumnData::I32(v) => v.map_or(Value::Null, |v| Value::Int(i64::from(v))),
        ColumnData::I64(v) => v.map_or(Value::Null, Value::Int),
        ColumnData::F32(v) => v.map_or(Value::Null, |v| Value::Float(f64::from(v))),
        ColumnData::F64(v) => v.map_or(Value::Null, Value::Float),
        ColumnData::Bit(v) => v.map_or(Value::Null, Value::Bool),
        ColumnData::String(v) => v.map_or(Value::Null, |s| Value::Text(s.into_owned())),
        ColumnData::Binary(v) => v.map_or(Value::Null, |b| Value::Bytes(b.into_owned())),
        ColumnData::Guid(v) => v.map_or(Value::Null, |g| Value::Other(g.to_string())),
        ColumnData::Numeric(v) => v.map_or(Value::Null, |n| Value::Other(n.to_string())),
        ColumnData::Xml(v) => v.map_or(Value::Null, |x| Value::Other(x.into_owned().into_string())),
        ref data @ (ColumnData::DateTime(_)
        | ColumnData::SmallDateTime(_)
        | ColumnData::DateTime2(_)) => temporal(NaiveDateTime::from_sql(data))?,
        ref data @ ColumnData::Date(_) => temporal(NaiveDate::from_sql(data))?,
        ref data @ ColumnData::Time(_) => temporal(NaiveTime::from_sql(data))?,
        ref data @ ColumnData::DateTimeOffset(_) => {
            temporal(DateTime::<FixedOffset>::from_sql(data))?
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::tls::{TlsConfig, TlsMode};
    use std::borrow::Cow;

    fn descriptor(port: u16) -> ConnectionDescriptor {
        ConnectionDescriptor {
            host: "127.0.0.1".into(),
            port,
            username: "sa".into(),
            password: "secret".into(),
            database: Some("master".into()),
            connect_timeout: Duration::from_secs(2),
            tls: TlsConfig::default(),
        }
    }

    #[test]
    fn test_to_value_integers() {
        assert_eq!(to_value(ColumnData::U8(Some(7))).unwrap(), Value::Int(7));
        assert_eq!(to_value(ColumnData::I16(Some(-3))).unwrap(), Value::Int(-3));
        assert_eq!(to_value(ColumnData::I32(Some(42))).unwrap(), Value::Int(42));
        assert_eq!(
            to_value(ColumnData::I64(Some(i64::MAX))).unwrap(),
            Value::Int(i64::MAX)
        );
    }

    #[test]
    fn test_to_value_floats_and_bits() {
        assert_eq!(
            to_value(ColumnData::F32(Some(1.5))).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            to_value(ColumnData::F64(Some(0.25))).unwrap(),
            Value::Float(0.25)
        );
        assert_eq!(
            to_value(ColumnData::Bit(Some(true))).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_to_value_text_and_binary() {
        assert_eq!(
            to_value(ColumnData::String(Some(Cow::Owned("online".into())))).unwrap(),
            Value::Text("online".into())
        );
        assert_eq!(
            to_value(ColumnData::Binary(Some(Cow::Owned(b"abc".to_vec())))).unwrap(),
            Value::Bytes(b"abc".to_vec())
        );
    }

    #[test]
    fn test_to_value_nulls() {
        for data in [
            ColumnData::I32(None),
            ColumnData::F64(None),
            ColumnData::Bit(None),
            ColumnData::String(None),
            ColumnData::Binary(None),
            ColumnData::Guid(None),
            ColumnData::DateTime2(None),
            ColumnData::Date(None),
        ] {
            assert_eq!(to_value(data).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_client_config_missing_ca() {
        let mut d = descriptor(1433);
        d.tls = TlsConfig {
            mode: TlsMode::VerifyCA,
            ca: Some("/nonexistent/check_mssql/ca.pem".into()),
        };
        let err = client_config(&d).unwrap_err();
        assert!(matches!(err, CheckError::Connect(_)));
        assert!(err.to_string().contains("CA certificate not found"));
    }

    #[test]
    fn test_client_config_addr() {
        let config = client_config(&descriptor(14330)).unwrap();
        assert_eq!(config.get_addr(), "127.0.0.1:14330");
    }

    #[tokio::test]
    async fn test_ping_closed_port() {
        // bind then drop to get a port nobody listens on
        let port = std::net::TcpListener::bind(("127.0.0.1", 0))
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let mut conn = MssqlDriver.connect(&descriptor(port)).await.unwrap();
        let err = conn.ping().await.unwrap_err();
        assert!(matches!(err, CheckError::Ping(_)), "{err:?}");
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_login_times_out_on_silent_server() {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut d = descriptor(port);
        d.connect_timeout = Duration::from_millis(200);

        let mut conn = MssqlDriver.connect(&d).await.unwrap();
        let err = conn.ping().await.unwrap_err();
        assert!(err.to_string().contains("login timed out"), "{err}");
        drop(listener);
    }
}
