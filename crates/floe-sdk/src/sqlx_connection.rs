//! [`Connection`] over an `sqlx` any-driver pool.

use std::time::Duration;

use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Column, Row as _, TypeInfo, ValueRef};
use tracing::info;

use crate::client::Connection;
use crate::error::BackendError;
use crate::row::{Row, Value};

/// Pool settings for [`SqlxConnection::connect`].
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    url: String,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl ConnectionConfig {
    /// Settings for `url` with a pool of 5 and a 30 second acquire timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets how long to wait for a free connection.
    #[must_use]
    pub const fn acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    /// The connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A connection backed by an [`AnyPool`].
#[derive(Debug, Clone)]
pub struct SqlxConnection {
    pool: AnyPool,
}

impl SqlxConnection {
    /// Opens a pool with the given settings.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, BackendError> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;
        info!(max_connections = config.max_connections, "Connection pool ready");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn from_pool(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

impl Connection for SqlxConnection {
    async fn execute(&self, sql: &str) -> Result<(), BackendError> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, BackendError> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        rows.iter().map(convert_row).collect()
    }
}

fn convert_row(row: &AnyRow) -> Result<Row, BackendError> {
    let mut converted = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match column.type_info().name() {
                "NULL" => Value::Null,
                "BOOLEAN" => row.try_get::<bool, _>(index)?.into(),
                "SMALLINT" => i64::from(row.try_get::<i16, _>(index)?).into(),
                "INTEGER" => i64::from(row.try_get::<i32, _>(index)?).into(),
                "BIGINT" => row.try_get::<i64, _>(index)?.into(),
                "REAL" => f64::from(row.try_get::<f32, _>(index)?).into(),
                "DOUBLE" => row.try_get::<f64, _>(index)?.into(),
                _ => row.try_get::<String, _>(index)?.into(),
            }
        };
        converted.push(column.name(), value);
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Client;

    async fn connection() -> SqlxConnection {
        SqlxConnection::connect(&ConnectionConfig::new("sqlite::memory:").max_connections(1))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_execute_and_query() {
        let client = Client::new(connection().await);
        client
            .exec("CREATE TABLE pools (name TEXT NOT NULL, min_nodes INTEGER, comment TEXT)")
            .await
            .unwrap();
        client
            .exec("INSERT INTO pools VALUES ('cp', 1, NULL)")
            .await
            .unwrap();

        let rows = client.query("SELECT name, min_nodes, comment FROM pools").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].string("name").unwrap(), "cp");
        assert_eq!(rows[0].opt_i64("min_nodes").unwrap(), Some(1));
        assert_eq!(rows[0].opt_string("comment").unwrap(), None);
    }

    #[tokio::test]
    async fn test_backend_errors_are_reported() {
        let client = Client::new(connection().await);
        let err = client.exec("DROP TABLE missing").await.unwrap_err();
        assert!(matches!(err, crate::Error::Backend(_)));
    }

    #[tokio::test]
    async fn test_query_one_counts_rows() {
        let client = Client::new(connection().await);
        assert!(client
            .query_one("SELECT 1 AS n WHERE 1 = 0")
            .await
            .unwrap_err()
            .is_object_not_found());
        assert!(matches!(
            client.query_one("SELECT 1 AS n UNION ALL SELECT 2").await,
            Err(crate::Error::MultipleRows(2))
        ));
    }
}
