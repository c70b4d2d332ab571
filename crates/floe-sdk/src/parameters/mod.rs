//! Session, account, user, object and task parameters.
//!
//! Parameter names are closed enums ([`SessionParameter`], [`AccountParameter`],
//! [`ObjectParameter`], [`UserParameter`], [`TaskParameter`]); values are
//! passed as strings and coerced to the parameter's type before any SQL is
//! built. Session parameters requested at account scope go through the
//! session setter.

pub mod names;
pub mod options;
pub mod values;

use tracing::debug;

pub use names::{
    AccountParameter, ObjectParameter, ObjectType, ParameterName, SessionParameter, TaskParameter,
    UserParameter,
};
pub use options::{
    AlterAccountParametersOptions, AlterObjectParametersOptions, AlterUserParametersOptions,
    ParameterAssignment, ParameterSet, ParameterUnset, ParametersIn, ShowParametersOptions,
};
pub use values::{
    coerce, BinaryInputFormat, BinaryOutputFormat, ClientTimestampTypeMapping, EnumKind,
    EnumValue, GeographyOutputFormat, LogLevel, ParameterKind, ParameterLiteral,
    TimestampTypeMapping, TraceLevel, TransactionDefaultIsolationLevel, UnsupportedDdlAction,
    WarehouseSize,
};

use crate::client::{Client, Connection};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, AnyIdentifier, SchemaObjectIdentifier};
use crate::resources::Like;
use crate::row::{FromRow, Row};

/// A row of `SHOW PARAMETERS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: String,
    pub default: String,
    /// Where the effective value was set; empty when it is the default.
    pub level: Option<String>,
    pub description: Option<String>,
    pub parameter_type: Option<String>,
}

impl FromRow for Parameter {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            key: row.string("key")?,
            value: row.opt_string("value")?.unwrap_or_default(),
            default: row.opt_string("default")?.unwrap_or_default(),
            level: row.opt_string("level")?.filter(|s| !s.is_empty()),
            description: row.opt_string("description")?.filter(|s| !s.is_empty()),
            parameter_type: row.maybe_string("type").filter(|s| !s.is_empty()),
        })
    }
}

/// Parameter operations.
#[derive(Debug)]
pub struct Parameters<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Parameter operations.
    #[must_use]
    pub const fn parameters(&self) -> Parameters<'_, C> {
        Parameters { client: self }
    }
}

impl<C: Connection> Parameters<'_, C> {
    /// Sets an account parameter; session parameters go through
    /// [`set_session_parameter_on_account`](Self::set_session_parameter_on_account).
    pub async fn set_account_parameter(&self, parameter: AccountParameter, value: &str) -> Result<()> {
        if let Ok(session) = SessionParameter::try_from(parameter) {
            debug!(parameter = %parameter, "Delegating account parameter to session scope");
            return self.set_session_parameter_on_account(session, value).await;
        }
        self.alter_account_set(ParameterAssignment::new(parameter, value)?)
            .await
    }

    /// Unsets an account parameter; session parameters go through
    /// [`unset_session_parameter_on_account`](Self::unset_session_parameter_on_account).
    pub async fn unset_account_parameter(&self, parameter: AccountParameter) -> Result<()> {
        if let Ok(session) = SessionParameter::try_from(parameter) {
            debug!(parameter = %parameter, "Delegating account parameter to session scope");
            return self.unset_session_parameter_on_account(session).await;
        }
        self.alter_account_unset(ParameterUnset::one(parameter)).await
    }

    /// Sets the account-wide default of a session parameter.
    pub async fn set_session_parameter_on_account(
        &self,
        parameter: SessionParameter,
        value: &str,
    ) -> Result<()> {
        self.alter_account_set(ParameterAssignment::new(parameter, value)?)
            .await
    }

    /// Unsets the account-wide default of a session parameter.
    pub async fn unset_session_parameter_on_account(&self, parameter: SessionParameter) -> Result<()> {
        self.alter_account_unset(ParameterUnset::one(parameter)).await
    }

    /// Sets a session parameter default for `user`.
    pub async fn set_session_parameter_on_user(
        &self,
        user: &AccountObjectIdentifier,
        parameter: SessionParameter,
        value: &str,
    ) -> Result<()> {
        let assignment = ParameterAssignment::new(parameter, value)?;
        self.alter_user(user, Some(ParameterSet::one(assignment)), None)
            .await
    }

    /// Unsets a session parameter default for `user`.
    pub async fn unset_session_parameter_on_user(
        &self,
        user: &AccountObjectIdentifier,
        parameter: SessionParameter,
    ) -> Result<()> {
        self.alter_user(user, None, Some(ParameterUnset::one(parameter)))
            .await
    }

    /// Sets a user-only parameter on `user`.
    pub async fn set_user_parameter(
        &self,
        user: &AccountObjectIdentifier,
        parameter: UserParameter,
        value: &str,
    ) -> Result<()> {
        let assignment = ParameterAssignment::new(parameter, value)?;
        self.alter_user(user, Some(ParameterSet::one(assignment)), None)
            .await
    }

    /// Sets a parameter on an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedParameter`] when objects of `object_type`
    /// do not carry the parameter; nothing is sent in that case.
    pub async fn set_object_parameter(
        &self,
        object_type: ObjectType,
        name: impl Into<AnyIdentifier>,
        parameter: ObjectParameter,
        value: &str,
    ) -> Result<()> {
        check_support(object_type, parameter)?;
        let assignment = ParameterAssignment::new(parameter, value)?;
        self.alter_object(object_type, name.into(), Some(ParameterSet::one(assignment)), None)
            .await
    }

    /// Unsets a parameter on an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedParameter`] when objects of `object_type`
    /// do not carry the parameter.
    pub async fn unset_object_parameter(
        &self,
        object_type: ObjectType,
        name: impl Into<AnyIdentifier>,
        parameter: ObjectParameter,
    ) -> Result<()> {
        check_support(object_type, parameter)?;
        self.alter_object(
            object_type,
            name.into(),
            None,
            Some(ParameterUnset::one(parameter)),
        )
        .await
    }

    /// Sets a task-only parameter on `task`.
    pub async fn set_task_parameter(
        &self,
        task: &SchemaObjectIdentifier,
        parameter: TaskParameter,
        value: &str,
    ) -> Result<()> {
        let assignment = ParameterAssignment::new(parameter, value)?;
        self.alter_object(
            ObjectType::Task,
            task.clone().into(),
            Some(ParameterSet::one(assignment)),
            None,
        )
        .await
    }

    /// Lists parameters.
    pub async fn show_parameters(&self, opts: &ShowParametersOptions) -> Result<Vec<Parameter>> {
        let rows = self.client.validate_and_query(opts).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// The effective account value of `parameter`.
    pub async fn show_account_parameter(&self, parameter: AccountParameter) -> Result<Parameter> {
        self.show_one(parameter, ParametersIn::Account).await
    }

    /// The effective value of `parameter` in the current session.
    pub async fn show_session_parameter(&self, parameter: SessionParameter) -> Result<Parameter> {
        self.show_one(parameter, ParametersIn::Session).await
    }

    /// The value of `parameter` on `user`.
    pub async fn show_user_parameter(
        &self,
        parameter: UserParameter,
        user: &AccountObjectIdentifier,
    ) -> Result<Parameter> {
        self.show_one(parameter, ParametersIn::User(user.clone()))
            .await
    }

    /// The value of `parameter` on an object.
    pub async fn show_object_parameter(
        &self,
        parameter: ObjectParameter,
        object_type: ObjectType,
        name: impl Into<AnyIdentifier>,
    ) -> Result<Parameter> {
        self.show_one(parameter, ParametersIn::Object(object_type, name.into()))
            .await
    }

    async fn show_one<P: ParameterName>(&self, parameter: P, in_: ParametersIn) -> Result<Parameter> {
        let opts = ShowParametersOptions::new(Some(Like::new(parameter.name())), Some(in_));
        self.show_parameters(&opts)
            .await?
            .into_iter()
            .find(|p| p.key.eq_ignore_ascii_case(parameter.name()))
            .ok_or(Error::ObjectNotFound)
    }

    async fn alter_account_set(&self, assignment: ParameterAssignment) -> Result<()> {
        let opts = AlterAccountParametersOptions {
            set: Some(ParameterSet::one(assignment)),
            ..Default::default()
        };
        self.client.validate_and_exec(&opts).await
    }

    async fn alter_account_unset(&self, unset: ParameterUnset) -> Result<()> {
        let opts = AlterAccountParametersOptions {
            unset: Some(unset),
            ..Default::default()
        };
        self.client.validate_and_exec(&opts).await
    }

    async fn alter_user(
        &self,
        user: &AccountObjectIdentifier,
        set: Option<ParameterSet>,
        unset: Option<ParameterUnset>,
    ) -> Result<()> {
        let opts = AlterUserParametersOptions {
            name: user.clone(),
            set,
            unset,
            ..Default::default()
        };
        self.client.validate_and_exec(&opts).await
    }

    async fn alter_object(
        &self,
        object_type: ObjectType,
        name: AnyIdentifier,
        set: Option<ParameterSet>,
        unset: Option<ParameterUnset>,
    ) -> Result<()> {
        let opts = AlterObjectParametersOptions {
            object_type: Some(object_type),
            name: Some(name),
            set,
            unset,
            ..Default::default()
        };
        self.client.validate_and_exec(&opts).await
    }
}

fn check_support(object_type: ObjectType, parameter: ObjectParameter) -> Result<()> {
    if parameter.supports(object_type) {
        Ok(())
    } else {
        Err(Error::UnsupportedParameter {
            parameter: parameter.as_sql().to_string(),
            scope: object_type.as_sql(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Value;

    #[test]
    fn test_parameter_from_row() {
        let row = Row::new()
            .with("key", "LOG_LEVEL")
            .with("value", "WARN")
            .with("default", "OFF")
            .with("level", "ACCOUNT")
            .with("description", "")
            .with("type", "STRING");
        let parameter = Parameter::from_row(&row).unwrap();
        assert_eq!(parameter.key, "LOG_LEVEL");
        assert_eq!(parameter.value, "WARN");
        assert_eq!(parameter.level.as_deref(), Some("ACCOUNT"));
        assert_eq!(parameter.description, None);
        assert_eq!(parameter.parameter_type.as_deref(), Some("STRING"));
    }

    #[test]
    fn test_parameter_from_row_defaults() {
        let row = Row::new()
            .with("key", "QUERY_TAG")
            .with("value", Value::Null)
            .with("default", "")
            .with("level", "")
            .with("description", "Tag");
        let parameter = Parameter::from_row(&row).unwrap();
        assert_eq!(parameter.value, "");
        assert_eq!(parameter.level, None);
        assert_eq!(parameter.parameter_type, None);
    }

    #[test]
    fn test_check_support() {
        assert!(check_support(ObjectType::Warehouse, ObjectParameter::MaxConcurrencyLevel).is_ok());
        let err = check_support(ObjectType::Table, ObjectParameter::MaxConcurrencyLevel).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter MAX_CONCURRENCY_LEVEL is not supported at TABLE scope"
        );
    }
}
