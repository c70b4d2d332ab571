#![allow(dead_code)]

use std::sync::Mutex;

use floe_sdk::{BackendError, Client, Connection, Row, Value};

type Reply = Result<Vec<Row>, BackendError>;

/// A connection that records every statement and answers by SQL prefix.
///
/// Statements without a registered answer succeed with no rows.
#[derive(Debug, Default)]
pub struct MockConnection {
    statements: Mutex<Vec<String>>,
    replies: Vec<(String, Reply)>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers statements starting with `prefix` with `rows`.
    pub fn on(mut self, prefix: &str, rows: Vec<Row>) -> Self {
        self.replies.push((prefix.to_string(), Ok(rows)));
        self
    }

    /// Fails statements starting with `prefix` with `message`.
    pub fn fail(mut self, prefix: &str, message: &str) -> Self {
        self.replies
            .push((prefix.to_string(), Err(BackendError::new(message))));
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn answer(&self, sql: &str) -> Reply {
        self.statements.lock().unwrap().push(sql.to_string());
        self.replies
            .iter()
            .find(|(prefix, _)| sql.starts_with(prefix.as_str()))
            .map_or_else(|| Ok(Vec::new()), |(_, reply)| reply.clone())
    }
}

impl Connection for MockConnection {
    async fn execute(&self, sql: &str) -> Result<(), BackendError> {
        self.answer(sql).map(|_| ())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, BackendError> {
        self.answer(sql)
    }
}

pub fn client(connection: MockConnection) -> Client<MockConnection> {
    init_tracing();
    Client::new(connection)
}

/// Routes SDK logs to the captured test output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn statements(client: &Client<MockConnection>) -> Vec<String> {
    client.connection().statements()
}

pub fn database_row(name: &str) -> Row {
    Row::new()
        .with("created_on", "2024-05-01 10:00:00.000 -0700")
        .with("name", name)
        .with("is_default", "N")
        .with("is_current", "N")
        .with("origin", "")
        .with("owner", "ACCOUNTADMIN")
        .with("comment", "")
        .with("options", "")
        .with("retention_time", "1")
}

pub fn schema_row(database: &str, name: &str) -> Row {
    Row::new()
        .with("created_on", "2024-05-01 10:00:00.000 -0700")
        .with("name", name)
        .with("is_default", "N")
        .with("is_current", "N")
        .with("database_name", database)
        .with("owner", "ACCOUNTADMIN")
        .with("comment", "")
        .with("options", "")
        .with("retention_time", "1")
}

pub fn compute_pool_row(name: &str, state: &str) -> Row {
    Row::new()
        .with("name", name)
        .with("state", state)
        .with("min_nodes", 1_i64)
        .with("max_nodes", 2_i64)
        .with("instance_family", "CPU_X64_S")
        .with("num_services", 0_i64)
        .with("num_jobs", 0_i64)
        .with("auto_suspend_secs", 3600_i64)
        .with("auto_resume", true)
        .with("active_nodes", 0_i64)
        .with("idle_nodes", 0_i64)
        .with("target_nodes", 1_i64)
        .with("created_on", "2024-05-01 10:00:00.000 -0700")
        .with("resumed_on", Value::Null)
        .with("updated_on", Value::Null)
        .with("owner", "ACCOUNTADMIN")
        .with("comment", Value::Null)
        .with("is_exclusive", false)
        .with("application", Value::Null)
}
