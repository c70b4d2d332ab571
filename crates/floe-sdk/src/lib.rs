//! # floe-sdk
//!
//! Typed DDL and DCL requests for a cloud data warehouse, rendered to exact SQL
//! text, executed over a SQL connection, and parsed back into typed records.
//!
//! This crate provides:
//! - Identifiers at account, database, schema and schema-with-arguments scope
//! - A declarative renderer driven by `#[derive(SqlOptions)]` field directives
//! - Validation that rejects malformed options before any SQL is issued
//! - An execution façade over any [`Connection`]
//! - Safe drop/show wrappers that turn missing parents into "not found"
//! - The parameter subsystem and one module per warehouse resource
//!
//! ## Rendering
//!
//! ```rust
//! use floe_sdk::resources::compute_pools::{ComputePoolInstanceFamily, CreateComputePoolRequest};
//! use floe_sdk::{AccountObjectIdentifier, render};
//!
//! let request = CreateComputePoolRequest::new(
//!     AccountObjectIdentifier::new("cp"),
//!     1,
//!     2,
//!     ComputePoolInstanceFamily::CpuX64S,
//! );
//! let sql = render(&request.to_opts()).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"CREATE COMPUTE POOL "cp" MIN_NODES = 1 MAX_NODES = 2 INSTANCE_FAMILY = CPU_X64_S"#
//! );
//! ```
//!
//! ## Executing
//!
//! ```ignore
//! use floe_sdk::{Client, ConnectionConfig, SqlxConnection};
//!
//! let connection = SqlxConnection::connect(&ConnectionConfig::new(url)).await?;
//! let client = Client::new(connection);
//! client.compute_pools().create(&request).await?;
//! let pools = client.compute_pools().show(&Default::default()).await?;
//! ```

extern crate self as floe_sdk;

#[macro_use]
mod enums;

mod client;
mod error;
pub mod identifiers;
pub mod parameters;
pub mod parsers;
pub mod render;
pub mod resources;
pub mod row;
pub mod safe;
mod sqlx_connection;
pub mod stage;
pub mod validation;

pub use client::{Client, Connection};
pub use enums::ParseEnumError;
pub use error::{BackendError, Error, Result};
pub use floe_derive::SqlOptions;
pub use identifiers::{
    AccountIdentifier, AccountObjectIdentifier, DatabaseObjectIdentifier, IdentifierParseError,
    ObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments,
};
pub use render::{render, RenderError, RenderSql, Static};
pub use row::{FromRow, Row, Value};
pub use sqlx_connection::{ConnectionConfig, SqlxConnection};
pub use stage::StageLocation;
pub use validation::{Validate, ValidationError, ValidationErrors};

/// An option value: something that validates and renders to a statement.
pub trait SqlOptions: RenderSql + Validate {}

impl<T: RenderSql + Validate> SqlOptions for T {}
