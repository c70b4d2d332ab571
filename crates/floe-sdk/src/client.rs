//! Execution façade shared by every resource.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::error::{BackendError, Error, Result};
use crate::render::render;
use crate::row::{FromRow, Row};
use crate::SqlOptions;

/// A source of SQL execution.
///
/// Implementations own connection handling; the SDK only issues statement
/// text and reads back rows. Dropping a returned future cancels the call.
pub trait Connection: Send + Sync {
    /// Runs a statement whose result rows, if any, are ignored.
    fn execute(&self, sql: &str) -> impl Future<Output = std::result::Result<(), BackendError>> + Send;

    /// Runs a statement and collects its rows.
    fn query(
        &self,
        sql: &str,
    ) -> impl Future<Output = std::result::Result<Vec<Row>, BackendError>> + Send;
}

/// The SDK entry point.
///
/// Cloning is cheap; clones share the connection.
#[derive(Debug)]
pub struct Client<C> {
    connection: Arc<C>,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<C: Connection> Client<C> {
    /// Wraps a connection.
    pub fn new(connection: C) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Issues a statement expecting no rows.
    pub async fn exec(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "Executing SQL");
        self.connection
            .execute(sql)
            .await
            .map_err(Error::from_backend)
    }

    /// Issues a query and returns all rows.
    pub async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        debug!(sql = %sql, "Querying SQL");
        self.connection.query(sql).await.map_err(Error::from_backend)
    }

    /// Issues a query that must return exactly one row.
    pub async fn query_one(&self, sql: &str) -> Result<Row> {
        let mut rows = self.query(sql).await?;
        match rows.len() {
            0 => Err(Error::ObjectNotFound),
            1 => rows.pop().ok_or(Error::ObjectNotFound),
            n => Err(Error::MultipleRows(n)),
        }
    }

    /// Validates and renders options; nothing is rendered if validation fails.
    ///
    /// `Option<O>` is itself an option value: `None` fails with the
    /// nil-options validation error.
    pub fn build<O: SqlOptions + ?Sized>(opts: &O) -> Result<String> {
        opts.validate()?;
        Ok(render(opts)?)
    }

    /// Validates, renders and executes options.
    pub async fn validate_and_exec<O: SqlOptions + ?Sized>(&self, opts: &O) -> Result<()> {
        let sql = Self::build(opts)?;
        self.exec(&sql).await
    }

    /// Validates, renders and queries options.
    pub async fn validate_and_query<O: SqlOptions + ?Sized>(&self, opts: &O) -> Result<Vec<Row>> {
        let sql = Self::build(opts)?;
        self.query(&sql).await
    }

    /// Validates, renders and queries options, expecting exactly one row.
    pub async fn validate_and_query_one<O: SqlOptions + ?Sized>(&self, opts: &O) -> Result<Row> {
        let sql = Self::build(opts)?;
        self.query_one(&sql).await
    }

    /// Converts every row into a domain record.
    pub fn convert_rows<T: FromRow>(rows: &[Row]) -> Result<Vec<T>> {
        rows.iter().map(T::from_row).collect()
    }
}
