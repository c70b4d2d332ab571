//! Warehouse resources.
//!
//! Each resource module follows the same layout: request builders that turn
//! into option structs with `to_opts()`, the option structs themselves
//! (`#[derive(SqlOptions)]` plus a [`Validate`](crate::Validate) impl), the
//! domain records read back from `SHOW`/`DESCRIBE` rows, and a handle type
//! returned by an accessor on [`Client`](crate::Client).

pub mod compute_pools;
pub mod databases;
pub mod git_repositories;
pub mod image_repositories;
pub mod listings;
pub mod procedures;
pub mod programmatic_access_tokens;
pub mod schemas;

use crate::error::{Error, Result};
use crate::identifiers::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier,
    SchemaObjectIdentifier,
};
use crate::render::{ListItem, RenderError, RenderSql, SqlWriter};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

/// A `LIKE '<pattern>'` filter.
///
/// The pattern is emitted verbatim inside single quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    /// The pattern; `%` and `_` are wildcards.
    pub pattern: String,
}

impl Like {
    /// Creates a filter.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl RenderSql for Like {
    fn render_sql(&self, w: &mut SqlWriter) -> std::result::Result<(), RenderError> {
        w.push_token(format!("LIKE '{}'", self.pattern));
        Ok(())
    }
}

/// The `IN ...` scope of a `SHOW` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum In {
    /// `IN ACCOUNT`.
    Account,
    /// `IN DATABASE <db>`.
    Database(AccountObjectIdentifier),
    /// `IN SCHEMA <db>.<schema>`.
    Schema(DatabaseObjectIdentifier),
}

impl RenderSql for In {
    fn render_sql(&self, w: &mut SqlWriter) -> std::result::Result<(), RenderError> {
        match self {
            Self::Account => w.push_token("IN ACCOUNT"),
            Self::Database(id) => w.push_token(format!("IN DATABASE {}", checked(id)?)),
            Self::Schema(id) => w.push_token(format!("IN SCHEMA {}", checked(id)?)),
        }
        Ok(())
    }
}

fn checked<T: ObjectIdentifier>(id: &T) -> std::result::Result<String, RenderError> {
    if id.is_valid() {
        Ok(id.fully_qualified_name())
    } else {
        Err(RenderError::InvalidIdentifier(id.fully_qualified_name()))
    }
}

/// A `LIMIT <rows> [FROM '<name>']` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct LimitFrom {
    /// Maximum number of rows.
    #[sql(parameter = "LIMIT", no_equals)]
    pub rows: i64,
    /// Start after this name.
    #[sql(parameter = "FROM", single_quotes, no_equals)]
    pub from: Option<String>,
}

impl LimitFrom {
    /// Limits the output to `rows` rows.
    #[must_use]
    pub const fn new(rows: i64) -> Self {
        Self { rows, from: None }
    }

    /// Starts the listing after `name`.
    #[must_use]
    pub fn with_from(mut self, name: impl Into<String>) -> Self {
        self.from = Some(name.into());
        self
    }
}

/// A `<tag> = '<value>'` pair for `WITH TAG` and `SET TAG` clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssociation {
    /// The tag.
    pub name: SchemaObjectIdentifier,
    /// The tag value.
    pub value: String,
}

impl TagAssociation {
    /// Creates a tag association.
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl ListItem for TagAssociation {
    fn list_item(&self) -> std::result::Result<String, RenderError> {
        Ok(format!("{} = '{}'", checked(&self.name)?, self.value))
    }
}

sql_enum! {
    /// Behaviour of a drop towards dependent objects.
    pub enum DropMode {
        /// Drop dependents too.
        Cascade => "CASCADE",
        /// Refuse when dependents exist.
        Restrict => "RESTRICT",
    }
}

/// Picks the first record whose name equals `name`.
pub(crate) fn find_by_name<T>(items: Vec<T>, name: &str, key: impl Fn(&T) -> &str) -> Result<T> {
    items
        .into_iter()
        .find(|item| key(item) == name)
        .ok_or(Error::ObjectNotFound)
}

/// A `LIKE` pattern matching exactly one name.
pub(crate) fn like_name<T: ObjectIdentifier>(id: &T) -> Like {
    Like::new(id.name())
}

/// Adds the shared tag identifier checks.
pub(crate) fn tag_violations(mut v: Violations, field: &'static str, tags: &[TagAssociation]) -> Violations {
    for tag in tags {
        v = v.identifier(field, &tag.name);
    }
    v
}

impl Validate for LimitFrom {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("LimitFrom")
            .int_greater_than("rows", Some(self.rows), 0)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn test_like_and_in() {
        assert_eq!(render(&Like::new("cp%")).unwrap(), "LIKE 'cp%'");
        assert_eq!(render(&In::Account).unwrap(), "IN ACCOUNT");
        assert_eq!(
            render(&In::Schema(DatabaseObjectIdentifier::new("db", "s"))).unwrap(),
            r#"IN SCHEMA "db"."s""#
        );
        assert!(render(&In::Database(AccountObjectIdentifier::new(""))).is_err());
    }

    #[test]
    fn test_limit_from() {
        assert_eq!(render(&LimitFrom::new(10)).unwrap(), "LIMIT 10");
        assert_eq!(
            render(&LimitFrom::new(5).with_from("x")).unwrap(),
            "LIMIT 5 FROM 'x'"
        );
        assert!(LimitFrom::new(0).validate().is_err());
    }

    #[test]
    fn test_tag_association() {
        let tag = TagAssociation::new(SchemaObjectIdentifier::new("db", "s", "t"), "v");
        assert_eq!(tag.list_item().unwrap(), r#""db"."s"."t" = 'v'"#);
    }

    #[test]
    fn test_find_by_name_takes_first_match() {
        let items = vec![("a", 1), ("b", 2), ("b", 3)];
        assert_eq!(find_by_name(items.clone(), "b", |i| i.0).unwrap(), ("b", 2));
        assert!(find_by_name(items, "c", |i| i.0)
            .unwrap_err()
            .is_object_not_found());
    }
}
