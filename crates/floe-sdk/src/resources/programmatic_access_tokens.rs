//! Programmatic access tokens (PATs).
//!
//! Tokens hang off a user and are managed through `ALTER USER`. The grammar
//! has no `IF EXISTS` for removal, so [`ProgrammaticAccessTokens::remove_safely`]
//! treats the backend's token-not-found error as success instead.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::{Client, Connection};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, ObjectIdentifier};
use crate::render::Static;
use crate::row::{parse_enum_soft, FromRow, Row};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

sql_enum! {
    /// Status reported by `SHOW USER PROGRAMMATIC ACCESS TOKENS`.
    pub enum ProgrammaticAccessTokenStatus {
        Active => "ACTIVE",
        Expired => "EXPIRED",
        Disabled => "DISABLED",
    }
}

/// `ALTER USER ... ADD PROGRAMMATIC ACCESS TOKEN`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AddProgrammaticAccessTokenOptions {
    #[sql(static = "ALTER USER")]
    pub alter_user: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub user: AccountObjectIdentifier,
    #[sql(static = "ADD PROGRAMMATIC ACCESS TOKEN")]
    pub add: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(parameter = "ROLE_RESTRICTION", single_quotes)]
    pub role_restriction: Option<String>,
    #[sql(parameter = "DAYS_TO_EXPIRY")]
    pub days_to_expiry: Option<i64>,
    #[sql(parameter = "MINS_TO_BYPASS_NETWORK_POLICY_REQUIREMENT")]
    pub mins_to_bypass_network_policy_requirement: Option<i64>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for AddProgrammaticAccessTokenOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AddProgrammaticAccessTokenOptions")
            .identifier("user", &self.user)
            .identifier("name", &self.name)
            .int_in_range("DaysToExpiry", self.days_to_expiry, 1, 365)
            .int_greater_or_equal(
                "MinsToBypassNetworkPolicyRequirement",
                self.mins_to_bypass_network_policy_requirement,
                0,
            )
            .finish()
    }
}

/// Properties changed by `MODIFY ... SET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ProgrammaticAccessTokenSet {
    #[sql(parameter = "DISABLED")]
    pub disabled: Option<bool>,
    #[sql(parameter = "MINS_TO_BYPASS_NETWORK_POLICY_REQUIREMENT")]
    pub mins_to_bypass_network_policy_requirement: Option<i64>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for ProgrammaticAccessTokenSet {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ProgrammaticAccessTokenSet")
            .at_least_one_of(&[
                ("Disabled", &self.disabled),
                (
                    "MinsToBypassNetworkPolicyRequirement",
                    &self.mins_to_bypass_network_policy_requirement,
                ),
                ("Comment", &self.comment),
            ])
            .finish()
    }
}

/// Properties reset by `MODIFY ... UNSET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[sql(separator = ", ")]
pub struct ProgrammaticAccessTokenUnset {
    #[sql(keyword = "DISABLED")]
    pub disabled: bool,
    #[sql(keyword = "MINS_TO_BYPASS_NETWORK_POLICY_REQUIREMENT")]
    pub mins_to_bypass_network_policy_requirement: bool,
    #[sql(keyword = "COMMENT")]
    pub comment: bool,
}

impl Validate for ProgrammaticAccessTokenUnset {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ProgrammaticAccessTokenUnset")
            .at_least_one_of(&[
                ("Disabled", &self.disabled),
                (
                    "MinsToBypassNetworkPolicyRequirement",
                    &self.mins_to_bypass_network_policy_requirement,
                ),
                ("Comment", &self.comment),
            ])
            .finish()
    }
}

/// `ALTER USER ... MODIFY PROGRAMMATIC ACCESS TOKEN`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ModifyProgrammaticAccessTokenOptions {
    #[sql(static = "ALTER USER")]
    pub alter_user: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub user: AccountObjectIdentifier,
    #[sql(static = "MODIFY PROGRAMMATIC ACCESS TOKEN")]
    pub modify: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(nested = "SET")]
    pub set: Option<ProgrammaticAccessTokenSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ProgrammaticAccessTokenUnset>,
    #[sql(identifier = "RENAME TO")]
    pub rename_to: Option<AccountObjectIdentifier>,
}

impl Validate for ModifyProgrammaticAccessTokenOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ModifyProgrammaticAccessTokenOptions")
            .identifier("user", &self.user)
            .identifier("name", &self.name)
            .identifier_if_set("RenameTo", self.rename_to.as_ref())
            .exactly_one_of(&[
                ("Set", &self.set),
                ("Unset", &self.unset),
                ("RenameTo", &self.rename_to),
            ])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .finish()
    }
}

/// `ALTER USER ... ROTATE PROGRAMMATIC ACCESS TOKEN`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct RotateProgrammaticAccessTokenOptions {
    #[sql(static = "ALTER USER")]
    pub alter_user: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub user: AccountObjectIdentifier,
    #[sql(static = "ROTATE PROGRAMMATIC ACCESS TOKEN")]
    pub rotate: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(parameter = "EXPIRE_ROTATED_TOKEN_AFTER_HOURS")]
    pub expire_rotated_token_after_hours: Option<i64>,
}

impl Validate for RotateProgrammaticAccessTokenOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("RotateProgrammaticAccessTokenOptions")
            .identifier("user", &self.user)
            .identifier("name", &self.name)
            .int_greater_or_equal(
                "ExpireRotatedTokenAfterHours",
                self.expire_rotated_token_after_hours,
                0,
            )
            .finish()
    }
}

/// `ALTER USER ... REMOVE PROGRAMMATIC ACCESS TOKEN`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct RemoveProgrammaticAccessTokenOptions {
    #[sql(static = "ALTER USER")]
    pub alter_user: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub user: AccountObjectIdentifier,
    #[sql(static = "REMOVE PROGRAMMATIC ACCESS TOKEN")]
    pub remove: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
}

impl Validate for RemoveProgrammaticAccessTokenOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("RemoveProgrammaticAccessTokenOptions")
            .identifier("user", &self.user)
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW USER PROGRAMMATIC ACCESS TOKENS`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowProgrammaticAccessTokenOptions {
    #[sql(static = "SHOW USER PROGRAMMATIC ACCESS TOKENS")]
    pub show: Static,
    #[sql(identifier = "FOR USER")]
    pub user: Option<AccountObjectIdentifier>,
}

impl Validate for ShowProgrammaticAccessTokenOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowProgrammaticAccessTokenOptions")
            .identifier_if_set("user", self.user.as_ref())
            .finish()
    }
}

/// Builder for [`AddProgrammaticAccessTokenOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AddProgrammaticAccessTokenRequest {
    user: AccountObjectIdentifier,
    name: AccountObjectIdentifier,
    role_restriction: Option<String>,
    days_to_expiry: Option<i64>,
    mins_to_bypass_network_policy_requirement: Option<i64>,
    comment: Option<String>,
}

impl AddProgrammaticAccessTokenRequest {
    /// Creates a request adding token `name` to `user`.
    pub fn new(user: AccountObjectIdentifier, name: AccountObjectIdentifier) -> Self {
        Self {
            user,
            name,
            role_restriction: None,
            days_to_expiry: None,
            mins_to_bypass_network_policy_requirement: None,
            comment: None,
        }
    }

    /// Restricts the token to a role.
    pub fn with_role_restriction(mut self, role: impl Into<String>) -> Self {
        self.role_restriction = Some(role.into());
        self
    }

    /// Sets `DAYS_TO_EXPIRY`.
    pub fn with_days_to_expiry(mut self, days: i64) -> Self {
        self.days_to_expiry = Some(days);
        self
    }

    /// Sets `MINS_TO_BYPASS_NETWORK_POLICY_REQUIREMENT`.
    pub fn with_mins_to_bypass_network_policy_requirement(mut self, mins: i64) -> Self {
        self.mins_to_bypass_network_policy_requirement = Some(mins);
        self
    }

    /// Sets `COMMENT`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> AddProgrammaticAccessTokenOptions {
        AddProgrammaticAccessTokenOptions {
            user: self.user.clone(),
            name: self.name.clone(),
            role_restriction: self.role_restriction.clone(),
            days_to_expiry: self.days_to_expiry,
            mins_to_bypass_network_policy_requirement: self
                .mins_to_bypass_network_policy_requirement,
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

/// The single change of a modify request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgrammaticAccessTokenChange {
    /// `SET ...`.
    Set(ProgrammaticAccessTokenSet),
    /// `UNSET ...`.
    Unset(ProgrammaticAccessTokenUnset),
    /// `RENAME TO`.
    RenameTo(AccountObjectIdentifier),
}

/// Builder for [`ModifyProgrammaticAccessTokenOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ModifyProgrammaticAccessTokenRequest {
    user: AccountObjectIdentifier,
    name: AccountObjectIdentifier,
    if_exists: bool,
    change: ProgrammaticAccessTokenChange,
}

impl ModifyProgrammaticAccessTokenRequest {
    /// Creates a request modifying token `name` of `user`.
    pub fn new(
        user: AccountObjectIdentifier,
        name: AccountObjectIdentifier,
        change: ProgrammaticAccessTokenChange,
    ) -> Self {
        Self {
            user,
            name,
            if_exists: false,
            change,
        }
    }

    /// Adds `IF EXISTS` for the user.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> ModifyProgrammaticAccessTokenOptions {
        let mut opts = ModifyProgrammaticAccessTokenOptions {
            if_exists: self.if_exists,
            user: self.user.clone(),
            name: self.name.clone(),
            ..Default::default()
        };
        match &self.change {
            ProgrammaticAccessTokenChange::Set(set) => opts.set = Some(set.clone()),
            ProgrammaticAccessTokenChange::Unset(unset) => opts.unset = Some(unset.clone()),
            ProgrammaticAccessTokenChange::RenameTo(id) => opts.rename_to = Some(id.clone()),
        }
        opts
    }
}

/// Builder for [`RotateProgrammaticAccessTokenOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RotateProgrammaticAccessTokenRequest {
    user: AccountObjectIdentifier,
    name: AccountObjectIdentifier,
    expire_rotated_token_after_hours: Option<i64>,
}

impl RotateProgrammaticAccessTokenRequest {
    /// Creates a request rotating token `name` of `user`.
    pub fn new(user: AccountObjectIdentifier, name: AccountObjectIdentifier) -> Self {
        Self {
            user,
            name,
            expire_rotated_token_after_hours: None,
        }
    }

    /// Keeps the old secret valid for `hours`.
    pub fn with_expire_rotated_token_after_hours(mut self, hours: i64) -> Self {
        self.expire_rotated_token_after_hours = Some(hours);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> RotateProgrammaticAccessTokenOptions {
        RotateProgrammaticAccessTokenOptions {
            user: self.user.clone(),
            name: self.name.clone(),
            expire_rotated_token_after_hours: self.expire_rotated_token_after_hours,
            ..Default::default()
        }
    }
}

/// The secret returned when a token is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProgrammaticAccessToken {
    pub token_name: String,
    pub token_secret: String,
}

impl FromRow for AddedProgrammaticAccessToken {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            token_name: row.string("token_name")?,
            token_secret: row.string("token_secret")?,
        })
    }
}

/// The new secret returned when a token is rotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedProgrammaticAccessToken {
    pub token_name: String,
    pub token_secret: String,
    pub rotated_token_name: String,
}

impl FromRow for RotatedProgrammaticAccessToken {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            token_name: row.string("token_name")?,
            token_secret: row.string("token_secret")?,
            rotated_token_name: row.string("rotated_token_name")?,
        })
    }
}

/// A row of `SHOW USER PROGRAMMATIC ACCESS TOKENS`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgrammaticAccessToken {
    pub name: String,
    pub user_name: String,
    pub role_restriction: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: Option<ProgrammaticAccessTokenStatus>,
    pub comment: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub mins_to_bypass_network_policy_requirement: Option<i64>,
    pub rotated_to: Option<String>,
}

impl FromRow for ProgrammaticAccessToken {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            name: row.string("name")?,
            user_name: row.string("user_name")?,
            role_restriction: row.opt_string("role_restriction")?.filter(|s| !s.is_empty()),
            expires_at: row.opt_time("expires_at")?,
            status: parse_enum_soft("status", row.opt_string("status")?.as_deref()),
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            created_on: row.opt_time("created_on")?,
            created_by: row.opt_string("created_by")?,
            mins_to_bypass_network_policy_requirement: row
                .opt_i64("mins_to_bypass_network_policy_requirement")?,
            rotated_to: row.maybe_string("rotated_to").filter(|s| !s.is_empty()),
        })
    }
}

/// Programmatic access token operations.
#[derive(Debug)]
pub struct ProgrammaticAccessTokens<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Programmatic access token operations.
    #[must_use]
    pub const fn programmatic_access_tokens(&self) -> ProgrammaticAccessTokens<'_, C> {
        ProgrammaticAccessTokens { client: self }
    }
}

impl<C: Connection> ProgrammaticAccessTokens<'_, C> {
    /// Adds a token and returns its secret.
    pub async fn add(
        &self,
        request: &AddProgrammaticAccessTokenRequest,
    ) -> Result<AddedProgrammaticAccessToken> {
        let row = self.client.validate_and_query_one(&request.to_opts()).await?;
        AddedProgrammaticAccessToken::from_row(&row)
    }

    /// Modifies a token.
    pub async fn modify(&self, request: &ModifyProgrammaticAccessTokenRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Rotates a token and returns the new secret.
    pub async fn rotate(
        &self,
        request: &RotateProgrammaticAccessTokenRequest,
    ) -> Result<RotatedProgrammaticAccessToken> {
        let row = self.client.validate_and_query_one(&request.to_opts()).await?;
        RotatedProgrammaticAccessToken::from_row(&row)
    }

    /// Removes a token.
    pub async fn remove(
        &self,
        user: &AccountObjectIdentifier,
        name: &AccountObjectIdentifier,
    ) -> Result<()> {
        let opts = RemoveProgrammaticAccessTokenOptions {
            user: user.clone(),
            name: name.clone(),
            ..Default::default()
        };
        self.client.validate_and_exec(&opts).await
    }

    /// Removes a token, treating an already removed token as success.
    ///
    /// Only the token-not-found error is absorbed. A missing user surfaces as
    /// [`Error::ObjectNotExistOrAuthorized`] and is returned unchanged; users
    /// have no parent to probe.
    pub async fn remove_safely(
        &self,
        user: &AccountObjectIdentifier,
        name: &AccountObjectIdentifier,
    ) -> Result<()> {
        match self.remove(user, name).await {
            Err(err) if err.is_pat_not_found() => {
                debug!(user = %user, token = %name, "token already removed");
                Ok(())
            }
            other => other,
        }
    }

    /// Lists the tokens of `user`, or of the current user.
    pub async fn show(
        &self,
        user: Option<&AccountObjectIdentifier>,
    ) -> Result<Vec<ProgrammaticAccessToken>> {
        let opts = ShowProgrammaticAccessTokenOptions {
            user: user.cloned(),
            ..Default::default()
        };
        let rows = self.client.validate_and_query(&opts).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one token of `user` by name.
    pub async fn show_by_id(
        &self,
        user: &AccountObjectIdentifier,
        name: &AccountObjectIdentifier,
    ) -> Result<ProgrammaticAccessToken> {
        self.show(Some(user))
            .await?
            .into_iter()
            .find(|token| token.name == name.name())
            .ok_or(Error::ObjectNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    fn user() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("u")
    }

    fn token() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("t")
    }

    #[test]
    fn test_add() {
        let request = AddProgrammaticAccessTokenRequest::new(user(), token())
            .with_role_restriction("ANALYST")
            .with_days_to_expiry(30)
            .with_comment("c");
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"ALTER USER "u" ADD PROGRAMMATIC ACCESS TOKEN "t" ROLE_RESTRICTION = 'ANALYST' DAYS_TO_EXPIRY = 30 COMMENT = 'c'"#
        );
    }

    #[test]
    fn test_add_rejects_out_of_range_expiry() {
        let opts = AddProgrammaticAccessTokenRequest::new(user(), token())
            .with_days_to_expiry(0)
            .to_opts();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_modify() {
        let set = ModifyProgrammaticAccessTokenRequest::new(
            user(),
            token(),
            ProgrammaticAccessTokenChange::Set(ProgrammaticAccessTokenSet {
                disabled: Some(true),
                ..Default::default()
            }),
        );
        assert_eq!(
            render(&set.to_opts()).unwrap(),
            r#"ALTER USER "u" MODIFY PROGRAMMATIC ACCESS TOKEN "t" SET DISABLED = true"#
        );
        let unset = ModifyProgrammaticAccessTokenRequest::new(
            user(),
            token(),
            ProgrammaticAccessTokenChange::Unset(ProgrammaticAccessTokenUnset {
                disabled: true,
                comment: true,
                ..Default::default()
            }),
        );
        assert_eq!(
            render(&unset.to_opts()).unwrap(),
            r#"ALTER USER "u" MODIFY PROGRAMMATIC ACCESS TOKEN "t" UNSET DISABLED, COMMENT"#
        );
        let rename = ModifyProgrammaticAccessTokenRequest::new(
            user(),
            token(),
            ProgrammaticAccessTokenChange::RenameTo(AccountObjectIdentifier::new("t2")),
        );
        assert_eq!(
            render(&rename.to_opts()).unwrap(),
            r#"ALTER USER "u" MODIFY PROGRAMMATIC ACCESS TOKEN "t" RENAME TO "t2""#
        );
    }

    #[test]
    fn test_rotate_and_show() {
        let rotate = RotateProgrammaticAccessTokenRequest::new(user(), token())
            .with_expire_rotated_token_after_hours(2);
        assert_eq!(
            render(&rotate.to_opts()).unwrap(),
            r#"ALTER USER "u" ROTATE PROGRAMMATIC ACCESS TOKEN "t" EXPIRE_ROTATED_TOKEN_AFTER_HOURS = 2"#
        );
        let show = ShowProgrammaticAccessTokenOptions {
            user: Some(user()),
            ..Default::default()
        };
        assert_eq!(
            render(&show).unwrap(),
            r#"SHOW USER PROGRAMMATIC ACCESS TOKENS FOR USER "u""#
        );
    }

    #[test]
    fn test_token_from_row() {
        let row = Row::new()
            .with("name", "T")
            .with("user_name", "U")
            .with("role_restriction", "ANALYST")
            .with("expires_at", "2025-01-01T00:00:00Z")
            .with("status", "ACTIVE")
            .with("comment", crate::row::Value::Null)
            .with("created_on", "2024-12-01T00:00:00Z")
            .with("created_by", "ADMIN")
            .with("mins_to_bypass_network_policy_requirement", crate::row::Value::Null);
        let token = ProgrammaticAccessToken::from_row(&row).unwrap();
        assert_eq!(token.status, Some(ProgrammaticAccessTokenStatus::Active));
        assert_eq!(token.role_restriction.as_deref(), Some("ANALYST"));
        assert_eq!(token.rotated_to, None);
    }
}
