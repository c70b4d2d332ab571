//! Schemas.

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, tag_violations, DropMode, In, Like, LimitFrom, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{DatabaseObjectIdentifier, ObjectIdentifier};
use crate::render::Static;
use crate::row::{FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

/// `CREATE SCHEMA`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateSchemaOptions {
    #[sql(static = "CREATE")]
    pub create: Static,
    #[sql(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[sql(keyword = "TRANSIENT")]
    pub transient: bool,
    #[sql(static = "SCHEMA")]
    pub schema: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[sql(keyword = "WITH MANAGED ACCESS")]
    pub with_managed_access: bool,
    #[sql(parameter = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<i64>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[sql(list = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateSchemaOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("CreateSchemaOptions")
            .identifier("name", &self.name)
            .conflicting(&[("OrReplace", &self.or_replace), ("IfNotExists", &self.if_not_exists)])
            .int_in_range("DataRetentionTimeInDays", self.data_retention_time_in_days, 0, 90);
        tag_violations(v, "tag", &self.tag).finish()
    }
}

/// `DROP SCHEMA`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropSchemaOptions {
    #[sql(static = "DROP SCHEMA")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[sql(keyword)]
    pub mode: Option<DropMode>,
}

impl Validate for DropSchemaOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropSchemaOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW SCHEMAS`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowSchemaOptions {
    #[sql(static = "SHOW")]
    pub show: Static,
    #[sql(keyword = "TERSE")]
    pub terse: bool,
    #[sql(static = "SCHEMAS")]
    pub schemas: Static,
    #[sql(keyword = "HISTORY")]
    pub history: bool,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(nested)]
    pub in_: Option<In>,
    #[sql(parameter = "STARTS WITH", single_quotes, no_equals)]
    pub starts_with: Option<String>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowSchemaOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowSchemaOptions")
            .check(!matches!(self.in_, Some(In::Schema(_))), || {
                "ShowSchemaOptions.In must be IN ACCOUNT or IN DATABASE".to_string()
            })
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// Builder for [`CreateSchemaOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateSchemaRequest {
    name: DatabaseObjectIdentifier,
    or_replace: bool,
    transient: bool,
    if_not_exists: bool,
    with_managed_access: bool,
    data_retention_time_in_days: Option<i64>,
    comment: Option<String>,
    tags: Vec<TagAssociation>,
}

impl CreateSchemaRequest {
    /// Creates a request for schema `name`.
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            name,
            or_replace: false,
            transient: false,
            if_not_exists: false,
            with_managed_access: false,
            data_retention_time_in_days: None,
            comment: None,
            tags: Vec::new(),
        }
    }

    /// Adds `OR REPLACE`.
    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    /// Adds `TRANSIENT`.
    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    /// Adds `IF NOT EXISTS`.
    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// Adds `WITH MANAGED ACCESS`.
    pub fn with_managed_access(mut self, managed: bool) -> Self {
        self.with_managed_access = managed;
        self
    }

    /// Sets `DATA_RETENTION_TIME_IN_DAYS`.
    pub fn with_data_retention_time_in_days(mut self, days: i64) -> Self {
        self.data_retention_time_in_days = Some(days);
        self
    }

    /// Sets `COMMENT`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets `WITH TAG`.
    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> CreateSchemaOptions {
        CreateSchemaOptions {
            or_replace: self.or_replace,
            transient: self.transient,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            with_managed_access: self.with_managed_access,
            data_retention_time_in_days: self.data_retention_time_in_days,
            comment: self.comment.clone(),
            tag: self.tags.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`DropSchemaOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropSchemaRequest {
    name: DatabaseObjectIdentifier,
    if_exists: bool,
    mode: Option<DropMode>,
}

impl DropSchemaRequest {
    /// Creates a request to drop schema `name`.
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: false,
            mode: None,
        }
    }

    /// Adds `IF EXISTS`.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// Adds `CASCADE` or `RESTRICT`.
    pub fn with_mode(mut self, mode: DropMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> DropSchemaOptions {
        DropSchemaOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            mode: self.mode,
            ..Default::default()
        }
    }
}

/// Builder for [`ShowSchemaOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowSchemaRequest {
    terse: bool,
    history: bool,
    like: Option<Like>,
    in_: Option<In>,
    starts_with: Option<String>,
    limit: Option<LimitFrom>,
}

impl ShowSchemaRequest {
    /// Lists all visible schemas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `TERSE`.
    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = terse;
        self
    }

    /// Adds `HISTORY`.
    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    /// Adds `LIKE`.
    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    /// Adds `IN ACCOUNT` or `IN DATABASE`.
    pub fn with_in(mut self, scope: In) -> Self {
        self.in_ = Some(scope);
        self
    }

    /// Adds `STARTS WITH`.
    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    /// Adds `LIMIT`.
    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> ShowSchemaOptions {
        ShowSchemaOptions {
            terse: self.terse,
            history: self.history,
            like: self.like.clone(),
            in_: self.in_.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW SCHEMAS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub database_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub options: Option<String>,
    pub retention_time: Option<i64>,
}

impl Schema {
    /// The schema's identifier.
    #[must_use]
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database_name.clone(), self.name.clone())
    }

    /// Returns whether the schema was created `WITH MANAGED ACCESS`.
    #[must_use]
    pub fn is_managed_access(&self) -> bool {
        self.options
            .as_deref()
            .is_some_and(|o| o.contains("MANAGED ACCESS"))
    }
}

impl FromRow for Schema {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            created_on: row.opt_time("created_on")?,
            name: row.string("name")?,
            is_default: row.opt_bool("is_default")?.unwrap_or_default(),
            is_current: row.opt_bool("is_current")?.unwrap_or_default(),
            database_name: row.string("database_name")?,
            owner: row.opt_string("owner")?,
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            options: row.opt_string("options")?.filter(|s| !s.is_empty()),
            retention_time: row.opt_i64("retention_time")?,
        })
    }
}

/// Schema operations.
#[derive(Debug)]
pub struct Schemas<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Schema operations.
    #[must_use]
    pub const fn schemas(&self) -> Schemas<'_, C> {
        Schemas { client: self }
    }
}

impl<C: Connection> Schemas<'_, C> {
    /// Creates a schema.
    pub async fn create(&self, request: &CreateSchemaRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a schema.
    pub async fn drop(&self, request: &DropSchemaRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a schema if it and its database exist.
    pub async fn drop_safely(&self, id: &DatabaseObjectIdentifier) -> Result<()> {
        let request = DropSchemaRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists schemas.
    pub async fn show(&self, request: &ShowSchemaRequest) -> Result<Vec<Schema>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one schema by name inside its database.
    pub async fn show_by_id(&self, id: &DatabaseObjectIdentifier) -> Result<Schema> {
        let request = ShowSchemaRequest::new()
            .with_like(like_name(id))
            .with_in(In::Database(id.database_id()));
        let schemas = self.show(&request).await?;
        find_by_name(schemas, id.name(), |s| &s.name)
    }

    /// Finds one schema, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &DatabaseObjectIdentifier) -> Result<Schema> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::AccountObjectIdentifier;
    use crate::render::render;

    #[test]
    fn test_create_schema() {
        let request = CreateSchemaRequest::new(DatabaseObjectIdentifier::new("db", "s"))
            .with_or_replace(true)
            .with_managed_access(true)
            .with_comment("c");
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"CREATE OR REPLACE SCHEMA "db"."s" WITH MANAGED ACCESS COMMENT = 'c'"#
        );
    }

    #[test]
    fn test_show_schemas_in_database() {
        let request = ShowSchemaRequest::new()
            .with_like(Like::new("s"))
            .with_in(In::Database(AccountObjectIdentifier::new("db")));
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"SHOW SCHEMAS LIKE 's' IN DATABASE "db""#
        );
    }

    #[test]
    fn test_show_schemas_rejects_schema_scope() {
        let opts = ShowSchemaRequest::new()
            .with_in(In::Schema(DatabaseObjectIdentifier::new("db", "s")))
            .to_opts();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_managed_access_flag() {
        let row = Row::new()
            .with("created_on", crate::row::Value::Null)
            .with("name", "S")
            .with("is_default", "N")
            .with("is_current", "N")
            .with("database_name", "D")
            .with("owner", "ROLE")
            .with("comment", "")
            .with("options", "MANAGED ACCESS")
            .with("retention_time", "1");
        let schema = Schema::from_row(&row).unwrap();
        assert!(schema.is_managed_access());
        assert_eq!(schema.id(), DatabaseObjectIdentifier::new("D", "S"));
        assert_eq!(schema.comment, None);
    }
}
