//! Databases.

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, tag_violations, DropMode, Like, LimitFrom, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, ObjectIdentifier};
use crate::render::Static;
use crate::row::{FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

/// `CREATE DATABASE`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateDatabaseOptions {
    #[sql(static = "CREATE")]
    pub create: Static,
    #[sql(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[sql(keyword = "TRANSIENT")]
    pub transient: bool,
    #[sql(static = "DATABASE")]
    pub database: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(parameter = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<i64>,
    #[sql(parameter = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<i64>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[sql(list = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateDatabaseOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("CreateDatabaseOptions")
            .identifier("name", &self.name)
            .conflicting(&[("OrReplace", &self.or_replace), ("IfNotExists", &self.if_not_exists)])
            .int_in_range("DataRetentionTimeInDays", self.data_retention_time_in_days, 0, 90)
            .int_in_range(
                "MaxDataExtensionTimeInDays",
                self.max_data_extension_time_in_days,
                0,
                90,
            );
        tag_violations(v, "tag", &self.tag).finish()
    }
}

/// `DROP DATABASE`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropDatabaseOptions {
    #[sql(static = "DROP DATABASE")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(keyword)]
    pub mode: Option<DropMode>,
}

impl Validate for DropDatabaseOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropDatabaseOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW DATABASES`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowDatabaseOptions {
    #[sql(static = "SHOW")]
    pub show: Static,
    #[sql(keyword = "TERSE")]
    pub terse: bool,
    #[sql(static = "DATABASES")]
    pub databases: Static,
    #[sql(keyword = "HISTORY")]
    pub history: bool,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(parameter = "STARTS WITH", single_quotes, no_equals)]
    pub starts_with: Option<String>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowDatabaseOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowDatabaseOptions")
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// Builder for [`CreateDatabaseOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateDatabaseRequest {
    name: AccountObjectIdentifier,
    or_replace: bool,
    transient: bool,
    if_not_exists: bool,
    data_retention_time_in_days: Option<i64>,
    max_data_extension_time_in_days: Option<i64>,
    comment: Option<String>,
    tags: Vec<TagAssociation>,
}

impl CreateDatabaseRequest {
    /// Creates a request for database `name`.
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            or_replace: false,
            transient: false,
            if_not_exists: false,
            data_retention_time_in_days: None,
            max_data_extension_time_in_days: None,
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

    /// Sets `DATA_RETENTION_TIME_IN_DAYS`.
    pub fn with_data_retention_time_in_days(mut self, days: i64) -> Self {
        self.data_retention_time_in_days = Some(days);
        self
    }

    /// Sets `MAX_DATA_EXTENSION_TIME_IN_DAYS`.
    pub fn with_max_data_extension_time_in_days(mut self, days: i64) -> Self {
        self.max_data_extension_time_in_days = Some(days);
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
    pub fn to_opts(&self) -> CreateDatabaseOptions {
        CreateDatabaseOptions {
            or_replace: self.or_replace,
            transient: self.transient,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            data_retention_time_in_days: self.data_retention_time_in_days,
            max_data_extension_time_in_days: self.max_data_extension_time_in_days,
            comment: self.comment.clone(),
            tag: self.tags.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`DropDatabaseOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropDatabaseRequest {
    name: AccountObjectIdentifier,
    if_exists: bool,
    mode: Option<DropMode>,
}

impl DropDatabaseRequest {
    /// Creates a request to drop database `name`.
    pub fn new(name: AccountObjectIdentifier) -> Self {
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
    pub fn to_opts(&self) -> DropDatabaseOptions {
        DropDatabaseOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            mode: self.mode,
            ..Default::default()
        }
    }
}

/// Builder for [`ShowDatabaseOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowDatabaseRequest {
    terse: bool,
    history: bool,
    like: Option<Like>,
    starts_with: Option<String>,
    limit: Option<LimitFrom>,
}

impl ShowDatabaseRequest {
    /// Lists all databases.
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
    pub fn to_opts(&self) -> ShowDatabaseOptions {
        ShowDatabaseOptions {
            terse: self.terse,
            history: self.history,
            like: self.like.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW DATABASES`.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub origin: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub options: Option<String>,
    pub retention_time: Option<i64>,
    pub kind: Option<String>,
}

impl Database {
    /// The database's identifier.
    #[must_use]
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }
}

impl FromRow for Database {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            created_on: row.opt_time("created_on")?,
            name: row.string("name")?,
            is_default: row.opt_bool("is_default")?.unwrap_or_default(),
            is_current: row.opt_bool("is_current")?.unwrap_or_default(),
            origin: row.opt_string("origin")?.filter(|s| !s.is_empty()),
            owner: row.opt_string("owner")?,
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            options: row.opt_string("options")?.filter(|s| !s.is_empty()),
            retention_time: row.opt_i64("retention_time")?,
            kind: row.maybe_string("kind"),
        })
    }
}

/// Database operations.
#[derive(Debug)]
pub struct Databases<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Database operations.
    #[must_use]
    pub const fn databases(&self) -> Databases<'_, C> {
        Databases { client: self }
    }
}

impl<C: Connection> Databases<'_, C> {
    /// Creates a database.
    pub async fn create(&self, request: &CreateDatabaseRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a database.
    pub async fn drop(&self, request: &DropDatabaseRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a database if it exists.
    pub async fn drop_safely(&self, id: &AccountObjectIdentifier) -> Result<()> {
        let request = DropDatabaseRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists databases.
    pub async fn show(&self, request: &ShowDatabaseRequest) -> Result<Vec<Database>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one database by name.
    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Database> {
        let databases = self
            .show(&ShowDatabaseRequest::new().with_like(like_name(id)))
            .await?;
        find_by_name(databases, id.name(), |d| &d.name)
    }

    /// Finds one database by name, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &AccountObjectIdentifier) -> Result<Database> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::render::render;

    #[test]
    fn test_create_database() {
        let request = CreateDatabaseRequest::new(AccountObjectIdentifier::new("db"))
            .with_transient(true)
            .with_if_not_exists(true)
            .with_data_retention_time_in_days(1)
            .with_comment("c")
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("a", "b", "t"),
                "v",
            )]);
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"CREATE TRANSIENT DATABASE IF NOT EXISTS "db" DATA_RETENTION_TIME_IN_DAYS = 1 COMMENT = 'c' WITH TAG ("a"."b"."t" = 'v')"#
        );
    }

    #[test]
    fn test_create_database_conflicts() {
        let opts = CreateDatabaseRequest::new(AccountObjectIdentifier::new("db"))
            .with_or_replace(true)
            .with_if_not_exists(true)
            .to_opts();
        let errors = opts.validate().unwrap_err();
        assert!(errors.to_string().contains("CreateDatabaseOptions{OrReplace, IfNotExists}"));
    }

    #[test]
    fn test_drop_database() {
        let request = DropDatabaseRequest::new(AccountObjectIdentifier::new("db"))
            .with_if_exists(true)
            .with_mode(DropMode::Cascade);
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"DROP DATABASE IF EXISTS "db" CASCADE"#
        );
    }

    #[test]
    fn test_show_databases() {
        let request = ShowDatabaseRequest::new()
            .with_terse(true)
            .with_history(true)
            .with_like(Like::new("db%"))
            .with_starts_with("d")
            .with_limit(LimitFrom::new(3));
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            "SHOW TERSE DATABASES HISTORY LIKE 'db%' STARTS WITH 'd' LIMIT 3"
        );
    }
}
