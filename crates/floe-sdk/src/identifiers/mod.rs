//! Object identifiers.
//!
//! Every server-side object is named by one of four identifier shapes:
//! account objects (`"name"`), database objects (`"db"."name"`), schema
//! objects (`"db"."schema"."name"`) and schema objects with an argument
//! signature (`"db"."schema"."name"(NUMBER, VARCHAR)`), used to tell function
//! and procedure overloads apart.
//!
//! Identifiers keep the caller's case verbatim. Equality is componentwise and
//! case-sensitive, and [`ObjectIdentifier::fully_qualified_name`] always
//! double-quotes every component.

mod parse;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use parse::IdentifierParseError;

use crate::parsers::parse_arguments;

/// Maximum length of a single identifier component, in characters.
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Common behaviour of all identifier shapes.
pub trait ObjectIdentifier {
    /// The object's own (last) name component.
    fn name(&self) -> &str;

    /// All name components, outermost first.
    fn components(&self) -> Vec<&str>;

    /// The double-quoted, dot-joined form used in SQL.
    fn fully_qualified_name(&self) -> String {
        self.components()
            .into_iter()
            .map(quote_component)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Returns whether every component is non-empty and at most 255 characters.
    fn is_valid(&self) -> bool {
        self.components()
            .iter()
            .all(|c| !c.is_empty() && c.chars().count() <= MAX_IDENTIFIER_LENGTH)
    }
}

/// Navigation from an identifier to the parents that contain it.
pub trait ParentHierarchy {
    /// The database the object lives in, if it is database-scoped or deeper.
    fn parent_database(&self) -> Option<AccountObjectIdentifier>;

    /// The schema the object lives in, if it is schema-scoped.
    fn parent_schema(&self) -> Option<DatabaseObjectIdentifier>;
}

/// Double-quotes a single component, doubling interior quotes.
#[must_use]
pub fn quote_component(component: &str) -> String {
    format!("\"{}\"", component.replace('"', "\"\""))
}

/// An object that lives directly in the account (database, warehouse, user, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    /// Creates an account object identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl ParentHierarchy for AccountObjectIdentifier {
    fn parent_database(&self) -> Option<AccountObjectIdentifier> {
        None
    }

    fn parent_schema(&self) -> Option<DatabaseObjectIdentifier> {
        None
    }
}

/// An object that lives in a database (most commonly a schema).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    /// Creates a database object identifier.
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }

    /// The database component.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// The identifier of the containing database.
    #[must_use]
    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database.clone())
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> Vec<&str> {
        vec![self.database.as_str(), self.name.as_str()]
    }
}

impl ParentHierarchy for DatabaseObjectIdentifier {
    fn parent_database(&self) -> Option<AccountObjectIdentifier> {
        Some(self.database_id())
    }

    fn parent_schema(&self) -> Option<DatabaseObjectIdentifier> {
        None
    }
}

/// An object that lives in a schema (table, stage, repository, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    /// Creates a schema object identifier.
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Creates a schema object identifier inside the given schema.
    pub fn in_schema(schema: &DatabaseObjectIdentifier, name: impl Into<String>) -> Self {
        Self::new(schema.database_name(), schema.name(), name)
    }

    /// The database component.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// The schema component.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// The identifier of the containing database.
    #[must_use]
    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database.clone())
    }

    /// The identifier of the containing schema.
    #[must_use]
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database.clone(), self.schema.clone())
    }

    /// Attaches an argument signature.
    #[must_use]
    pub fn with_arguments(self, arguments: Vec<String>) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments {
            database: self.database,
            schema: self.schema,
            name: self.name,
            arguments,
        }
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> Vec<&str> {
        vec![self.database.as_str(), self.schema.as_str(), self.name.as_str()]
    }
}

impl ParentHierarchy for SchemaObjectIdentifier {
    fn parent_database(&self) -> Option<AccountObjectIdentifier> {
        Some(self.database_id())
    }

    fn parent_schema(&self) -> Option<DatabaseObjectIdentifier> {
        Some(self.schema_id())
    }
}

/// A schema object plus the data types of its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifierWithArguments {
    database: String,
    schema: String,
    name: String,
    arguments: Vec<String>,
}

impl SchemaObjectIdentifierWithArguments {
    /// Creates an identifier with an argument signature.
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
            arguments,
        }
    }

    /// The argument data types, in signature order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The identifier without its signature.
    #[must_use]
    pub fn schema_object_id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(self.database.clone(), self.schema.clone(), self.name.clone())
    }

    /// The identifier of the containing database.
    #[must_use]
    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database.clone())
    }

    /// The identifier of the containing schema.
    #[must_use]
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database.clone(), self.schema.clone())
    }
}

impl ObjectIdentifier for SchemaObjectIdentifierWithArguments {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> Vec<&str> {
        vec![self.database.as_str(), self.schema.as_str(), self.name.as_str()]
    }

    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}.{}({})",
            quote_component(&self.database),
            quote_component(&self.schema),
            quote_component(&self.name),
            self.arguments.join(", ")
        )
    }
}

impl ParentHierarchy for SchemaObjectIdentifierWithArguments {
    fn parent_database(&self) -> Option<AccountObjectIdentifier> {
        Some(self.database_id())
    }

    fn parent_schema(&self) -> Option<DatabaseObjectIdentifier> {
        Some(self.schema_id())
    }
}

/// An account inside an organization, written `"ORG"."ACCOUNT"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountIdentifier {
    organization: String,
    account: String,
}

impl AccountIdentifier {
    /// Creates an account identifier.
    pub fn new(organization: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            account: account.into(),
        }
    }

    /// The organization name.
    #[must_use]
    pub fn organization_name(&self) -> &str {
        &self.organization
    }

    /// The account name.
    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.account
    }
}

impl ObjectIdentifier for AccountIdentifier {
    fn name(&self) -> &str {
        &self.account
    }

    fn components(&self) -> Vec<&str> {
        vec![self.organization.as_str(), self.account.as_str()]
    }
}

/// Any identifier shape, for operations that accept objects of several kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyIdentifier {
    /// An account object.
    Account(AccountObjectIdentifier),
    /// A database object.
    Database(DatabaseObjectIdentifier),
    /// A schema object.
    Schema(SchemaObjectIdentifier),
    /// A schema object with arguments.
    SchemaWithArguments(SchemaObjectIdentifierWithArguments),
}

impl ObjectIdentifier for AnyIdentifier {
    fn name(&self) -> &str {
        match self {
            Self::Account(id) => id.name(),
            Self::Database(id) => id.name(),
            Self::Schema(id) => id.name(),
            Self::SchemaWithArguments(id) => id.name(),
        }
    }

    fn components(&self) -> Vec<&str> {
        match self {
            Self::Account(id) => id.components(),
            Self::Database(id) => id.components(),
            Self::Schema(id) => id.components(),
            Self::SchemaWithArguments(id) => id.components(),
        }
    }

    fn fully_qualified_name(&self) -> String {
        match self {
            Self::SchemaWithArguments(id) => id.fully_qualified_name(),
            other => other
                .components()
                .into_iter()
                .map(quote_component)
                .collect::<Vec<_>>()
                .join("."),
        }
    }
}

impl From<AccountObjectIdentifier> for AnyIdentifier {
    fn from(id: AccountObjectIdentifier) -> Self {
        Self::Account(id)
    }
}

impl From<DatabaseObjectIdentifier> for AnyIdentifier {
    fn from(id: DatabaseObjectIdentifier) -> Self {
        Self::Database(id)
    }
}

impl From<SchemaObjectIdentifier> for AnyIdentifier {
    fn from(id: SchemaObjectIdentifier) -> Self {
        Self::Schema(id)
    }
}

impl From<SchemaObjectIdentifierWithArguments> for AnyIdentifier {
    fn from(id: SchemaObjectIdentifierWithArguments) -> Self {
        Self::SchemaWithArguments(id)
    }
}

impl FromStr for AccountObjectIdentifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [name] = parse::components::<1>(s)?;
        Ok(Self::new(name))
    }
}

impl FromStr for DatabaseObjectIdentifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [database, name] = parse::components::<2>(s)?;
        Ok(Self::new(database, name))
    }
}

impl FromStr for SchemaObjectIdentifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [database, schema, name] = parse::components::<3>(s)?;
        Ok(Self::new(database, schema, name))
    }
}

impl FromStr for AccountIdentifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [organization, account] = parse::components::<2>(s)?;
        Ok(Self::new(organization, account))
    }
}

impl FromStr for SchemaObjectIdentifierWithArguments {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (path, signature) = match parse::find_unquoted(trimmed, '(') {
            Some(index) => trimmed.split_at(index),
            None => (trimmed, ""),
        };
        let id: SchemaObjectIdentifier = path.parse()?;
        let arguments = parse_arguments(signature)
            .map_err(|e| IdentifierParseError::Arguments {
                input: s.to_string(),
                message: e.to_string(),
            })?
            .into_iter()
            .map(|argument| argument.data_type)
            .collect();
        Ok(id.with_arguments(arguments))
    }
}

macro_rules! identifier_common_impls {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.fully_qualified_name())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(&self.fully_qualified_name())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value = String::deserialize(deserializer)?;
                    value.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

identifier_common_impls!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
    AccountIdentifier,
);

impl fmt::Display for AnyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_names() {
        assert_eq!(AccountObjectIdentifier::new("cp").fully_qualified_name(), r#""cp""#);
        assert_eq!(
            DatabaseObjectIdentifier::new("db", "sch").fully_qualified_name(),
            r#""db"."sch""#
        );
        assert_eq!(
            SchemaObjectIdentifier::new("db", "sch", "gr").fully_qualified_name(),
            r#""db"."sch"."gr""#
        );
        assert_eq!(
            SchemaObjectIdentifier::new("db", "sch", "p")
                .with_arguments(vec!["NUMBER".into(), "VARCHAR".into()])
                .fully_qualified_name(),
            r#""db"."sch"."p"(NUMBER, VARCHAR)"#
        );
        assert_eq!(AccountIdentifier::new("ORG", "ACC").to_string(), r#""ORG"."ACC""#);
    }

    #[test]
    fn test_interior_quotes_are_doubled() {
        assert_eq!(
            AccountObjectIdentifier::new(r#"a"b"#).fully_qualified_name(),
            r#""a""b""#
        );
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(
            AccountObjectIdentifier::new("abc"),
            AccountObjectIdentifier::new("ABC")
        );
        assert_eq!(
            SchemaObjectIdentifier::new("a", "b", "c"),
            SchemaObjectIdentifier::new("a", "b", "c")
        );
    }

    #[test]
    fn test_validity() {
        assert!(AccountObjectIdentifier::new("x").is_valid());
        assert!(!AccountObjectIdentifier::new("").is_valid());
        assert!(!SchemaObjectIdentifier::new("db", "", "x").is_valid());
        assert!(AccountObjectIdentifier::new("a".repeat(255)).is_valid());
        assert!(!AccountObjectIdentifier::new("a".repeat(256)).is_valid());
    }

    #[test]
    fn test_hierarchy_navigation() {
        let id = SchemaObjectIdentifier::new("D", "S", "T");
        assert_eq!(id.database_id(), AccountObjectIdentifier::new("D"));
        assert_eq!(id.schema_id(), DatabaseObjectIdentifier::new("D", "S"));
        assert_eq!(id.parent_schema(), Some(DatabaseObjectIdentifier::new("D", "S")));
        assert_eq!(
            DatabaseObjectIdentifier::new("D", "S").parent_database(),
            Some(AccountObjectIdentifier::new("D"))
        );
        assert_eq!(AccountObjectIdentifier::new("D").parent_database(), None);
    }

    #[test]
    fn test_round_trip() {
        for name in [
            r#""cp""#,
            r#""db"."sch""#,
            r#""db"."sch"."gr""#,
            r#""a.b"."c d"."E""#,
        ] {
            let parsed: AnyIdentifier = match name.matches("\".\"").count() {
                0 => name.parse::<AccountObjectIdentifier>().unwrap().into(),
                1 => name.parse::<DatabaseObjectIdentifier>().unwrap().into(),
                _ => name.parse::<SchemaObjectIdentifier>().unwrap().into(),
            };
            assert_eq!(parsed.fully_qualified_name(), name);
        }
    }

    #[test]
    fn test_parse_with_arguments() {
        let id: SchemaObjectIdentifierWithArguments =
            r#""db"."sch"."p"(NUMBER(10, 2), VARCHAR)"#.parse().unwrap();
        assert_eq!(id.name(), "p");
        assert_eq!(id.arguments(), &["NUMBER(10, 2)", "VARCHAR"]);
        assert_eq!(
            id.fully_qualified_name(),
            r#""db"."sch"."p"(NUMBER(10, 2), VARCHAR)"#
        );

        let id: SchemaObjectIdentifierWithArguments = r#""db"."sch"."p"()"#.parse().unwrap();
        assert!(id.arguments().is_empty());
    }
}
