//! Option structs for setting, unsetting and listing parameters.

use super::names::{ObjectType, ParameterName};
use super::values::{coerce, ParameterLiteral};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, AnyIdentifier};
use crate::render::{IdentifierValue, ListItem, RenderError, RenderSql, SqlWriter, Static};
use crate::resources::Like;
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

/// `NAME = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterAssignment {
    /// The parameter name.
    pub name: &'static str,
    /// The coerced value.
    pub value: ParameterLiteral,
}

impl ParameterAssignment {
    /// Coerces `value` to the type of `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameterValue`](crate::Error::InvalidParameterValue)
    /// when the value does not fit the parameter's type.
    pub fn new<P: ParameterName>(parameter: P, value: &str) -> Result<Self> {
        Ok(Self {
            name: parameter.name(),
            value: coerce(parameter.name(), parameter.kind(), value)?,
        })
    }
}

impl ListItem for ParameterAssignment {
    fn list_item(&self) -> std::result::Result<String, RenderError> {
        Ok(format!("{} = {}", self.name, self.value))
    }
}

/// The assignments of a `SET` clause, space separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ParameterSet {
    #[sql(list, no_parentheses, no_comma)]
    pub assignments: Vec<ParameterAssignment>,
}

impl ParameterSet {
    /// A single assignment.
    #[must_use]
    pub fn one(assignment: ParameterAssignment) -> Self {
        Self {
            assignments: vec![assignment],
        }
    }
}

impl Validate for ParameterSet {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ParameterSet")
            .non_empty("assignments", &self.assignments)
            .finish()
    }
}

/// The names of an `UNSET` clause, comma separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ParameterUnset {
    #[sql(list, no_parentheses)]
    pub names: Vec<String>,
}

impl ParameterUnset {
    /// A single name.
    #[must_use]
    pub fn one<P: ParameterName>(parameter: P) -> Self {
        Self {
            names: vec![parameter.name().to_string()],
        }
    }
}

impl Validate for ParameterUnset {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ParameterUnset")
            .non_empty("names", &self.names)
            .finish()
    }
}

/// `ALTER ACCOUNT SET|UNSET ...`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterAccountParametersOptions {
    #[sql(static = "ALTER ACCOUNT")]
    pub alter: Static,
    #[sql(nested = "SET")]
    pub set: Option<ParameterSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ParameterUnset>,
}

impl Validate for AlterAccountParametersOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AlterAccountParametersOptions")
            .exactly_one_of(&[("Set", &self.set), ("Unset", &self.unset)])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .finish()
    }
}

/// `ALTER USER [IF EXISTS] <user> SET|UNSET ...`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterUserParametersOptions {
    #[sql(static = "ALTER USER")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(nested = "SET")]
    pub set: Option<ParameterSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ParameterUnset>,
}

impl Validate for AlterUserParametersOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AlterUserParametersOptions")
            .identifier("name", &self.name)
            .exactly_one_of(&[("Set", &self.set), ("Unset", &self.unset)])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .finish()
    }
}

/// `ALTER <object type> [IF EXISTS] <name> SET|UNSET ...`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterObjectParametersOptions {
    #[sql(static = "ALTER")]
    pub alter: Static,
    #[sql(keyword)]
    pub object_type: Option<ObjectType>,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: Option<AnyIdentifier>,
    #[sql(nested = "SET")]
    pub set: Option<ParameterSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ParameterUnset>,
}

impl Validate for AlterObjectParametersOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AlterObjectParametersOptions")
            .check(self.object_type.is_some(), || {
                "object type must be set".to_string()
            })
            .check(self.name.is_some(), || "name must be set".to_string())
            .identifier_if_set("name", self.name.as_ref())
            .exactly_one_of(&[("Set", &self.set), ("Unset", &self.unset)])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .finish()
    }
}

/// The `IN ...` scope of `SHOW PARAMETERS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParametersIn {
    /// `IN SESSION`.
    Session,
    /// `IN ACCOUNT`.
    Account,
    /// `IN USER <user>`.
    User(AccountObjectIdentifier),
    /// `IN <object type> <name>`.
    Object(ObjectType, AnyIdentifier),
}

impl RenderSql for ParametersIn {
    fn render_sql(&self, w: &mut SqlWriter) -> std::result::Result<(), RenderError> {
        match self {
            Self::Session => w.push_token("IN SESSION"),
            Self::Account => w.push_token("IN ACCOUNT"),
            Self::User(user) => w.push_token(format!("IN USER {}", user.qualified_name()?)),
            Self::Object(object_type, name) => {
                w.push_token(format!("IN {object_type} {}", name.qualified_name()?));
            }
        }
        Ok(())
    }
}

/// `SHOW PARAMETERS [LIKE '...'] [IN ...]`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowParametersOptions {
    #[sql(static = "SHOW PARAMETERS")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(nested)]
    pub in_: Option<ParametersIn>,
}

impl ShowParametersOptions {
    /// Parameters matching `like` in scope `in_`.
    #[must_use]
    pub fn new(like: Option<Like>, in_: Option<ParametersIn>) -> Self {
        Self {
            like,
            in_,
            ..Default::default()
        }
    }
}

impl Validate for ShowParametersOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("ShowParametersOptions");
        match &self.in_ {
            Some(ParametersIn::User(user)) => v.identifier("in", user),
            Some(ParametersIn::Object(_, name)) => v.identifier("in", name),
            _ => v,
        }
        .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::parameters::names::{AccountParameter, ObjectParameter, SessionParameter};
    use crate::render::render;

    #[test]
    fn test_alter_account_set() {
        let opts = AlterAccountParametersOptions {
            set: Some(ParameterSet {
                assignments: vec![
                    ParameterAssignment::new(AccountParameter::AllowIdToken, "TRUE").unwrap(),
                    ParameterAssignment::new(AccountParameter::ClientEncryptionKeySize, "256")
                        .unwrap(),
                    ParameterAssignment::new(AccountParameter::Timezone, "UTC").unwrap(),
                ],
            }),
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
        assert_eq!(
            render(&opts).unwrap(),
            "ALTER ACCOUNT SET ALLOW_ID_TOKEN = true CLIENT_ENCRYPTION_KEY_SIZE = 256 TIMEZONE = 'UTC'"
        );
    }

    #[test]
    fn test_alter_account_unset_list() {
        let opts = AlterAccountParametersOptions {
            unset: Some(ParameterUnset {
                names: vec!["AUTOCOMMIT".to_string(), "QUERY_TAG".to_string()],
            }),
            ..Default::default()
        };
        assert_eq!(
            render(&opts).unwrap(),
            "ALTER ACCOUNT UNSET AUTOCOMMIT, QUERY_TAG"
        );
    }

    #[test]
    fn test_alter_account_requires_one_clause() {
        let err = AlterAccountParametersOptions::default().validate().unwrap_err();
        assert!(err.to_string().contains("exactly one of"));

        let empty = AlterAccountParametersOptions {
            set: Some(ParameterSet::default()),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_alter_user() {
        let opts = AlterUserParametersOptions {
            if_exists: true,
            name: AccountObjectIdentifier::new("bob"),
            set: Some(ParameterSet::one(
                ParameterAssignment::new(SessionParameter::LogLevel, "warn").unwrap(),
            )),
            ..Default::default()
        };
        assert_eq!(
            render(&opts).unwrap(),
            r#"ALTER USER IF EXISTS "bob" SET LOG_LEVEL = 'WARN'"#
        );
    }

    #[test]
    fn test_alter_object() {
        let opts = AlterObjectParametersOptions {
            object_type: Some(ObjectType::Table),
            name: Some(SchemaObjectIdentifier::new("db", "s", "t").into()),
            set: Some(ParameterSet::one(
                ParameterAssignment::new(ObjectParameter::DataRetentionTimeInDays, "7").unwrap(),
            )),
            ..Default::default()
        };
        assert_eq!(
            render(&opts).unwrap(),
            r#"ALTER TABLE "db"."s"."t" SET DATA_RETENTION_TIME_IN_DAYS = 7"#
        );

        let missing = AlterObjectParametersOptions {
            unset: Some(ParameterUnset::one(ObjectParameter::LogLevel)),
            ..Default::default()
        };
        let err = missing.validate().unwrap_err();
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_show_parameters_scopes() {
        let like = || Some(Like::new("LOG_LEVEL"));
        assert_eq!(
            render(&ShowParametersOptions::new(like(), Some(ParametersIn::Session))).unwrap(),
            "SHOW PARAMETERS LIKE 'LOG_LEVEL' IN SESSION"
        );
        assert_eq!(
            render(&ShowParametersOptions::new(
                like(),
                Some(ParametersIn::User(AccountObjectIdentifier::new("bob")))
            ))
            .unwrap(),
            r#"SHOW PARAMETERS LIKE 'LOG_LEVEL' IN USER "bob""#
        );
        assert_eq!(
            render(&ShowParametersOptions::new(
                like(),
                Some(ParametersIn::Object(
                    ObjectType::Database,
                    AccountObjectIdentifier::new("db").into()
                ))
            ))
            .unwrap(),
            r#"SHOW PARAMETERS LIKE 'LOG_LEVEL' IN DATABASE "db""#
        );
        assert_eq!(
            render(&ShowParametersOptions::default()).unwrap(),
            "SHOW PARAMETERS"
        );
    }
}
