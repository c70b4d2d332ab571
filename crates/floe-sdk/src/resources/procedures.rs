//! Stored procedures.
//!
//! Procedures are overloaded by argument types, so drop, alter and describe
//! address them with a [`SchemaObjectIdentifierWithArguments`]. `SHOW
//! PROCEDURES` only reports the signature as text in its `arguments` column
//! (`P(NUMBER, VARCHAR) RETURN NUMBER`); [`Procedure::argument_types`] holds
//! the types recovered from it by the argument tokenizer.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{find_by_name, like_name, tag_violations, In, Like, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{ObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments};
use crate::parsers::parse_arguments;
use crate::render::{RenderError, RenderSql, SqlWriter, Static};
use crate::row::{FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

sql_enum! {
    /// What a procedure does when called with `NULL` arguments.
    pub enum NullInputBehavior {
        CalledOnNullInput => "CALLED ON NULL INPUT",
        ReturnsNullOnNullInput => "RETURNS NULL ON NULL INPUT",
        Strict => "STRICT",
    }
}

sql_enum! {
    /// Whose privileges a procedure runs with.
    pub enum ExecuteAs {
        Caller => "CALLER",
        Owner => "OWNER",
        RestrictedCaller => "RESTRICTED CALLER",
    }
}

/// One declared argument: `"name" TYPE [DEFAULT value]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ProcedureArgument {
    #[sql(parameter, double_quotes)]
    pub name: String,
    #[sql(parameter)]
    pub data_type: String,
    #[sql(parameter = "DEFAULT", no_equals)]
    pub default_value: Option<String>,
}

impl ProcedureArgument {
    /// Creates an argument without a default.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            default_value: None,
        }
    }

    /// Sets the default value expression.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// One column of a `RETURNS TABLE (...)` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ProcedureColumn {
    #[sql(parameter, double_quotes)]
    pub name: String,
    #[sql(parameter)]
    pub data_type: String,
}

/// The `RETURNS` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureReturns {
    /// `RETURNS <type> [[NOT] NULL]`.
    Scalar {
        data_type: String,
        /// `Some(false)` renders `NOT NULL`, `Some(true)` renders `NULL`.
        nullable: Option<bool>,
    },
    /// `RETURNS TABLE (<col> <type>, ...)`.
    Table(Vec<ProcedureColumn>),
}

impl Default for ProcedureReturns {
    fn default() -> Self {
        Self::Scalar {
            data_type: String::new(),
            nullable: None,
        }
    }
}

impl RenderSql for ProcedureReturns {
    fn render_sql(&self, w: &mut SqlWriter) -> std::result::Result<(), RenderError> {
        w.push_token("RETURNS");
        match self {
            Self::Scalar { data_type, nullable } => {
                if data_type.is_empty() {
                    return Err(RenderError::InvalidValue("empty return type".to_string()));
                }
                w.push_token(data_type.clone());
                match nullable {
                    Some(false) => w.push_token("NOT NULL"),
                    Some(true) => w.push_token("NULL"),
                    None => {}
                }
            }
            Self::Table(columns) => {
                let columns = columns
                    .iter()
                    .map(crate::render::ListItem::list_item)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                w.push_token(format!("TABLE ({})", columns.join(", ")));
            }
        }
        Ok(())
    }
}

/// `CREATE PROCEDURE ... LANGUAGE SQL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateProcedureForSqlOptions {
    #[sql(static = "CREATE")]
    pub create: Static,
    #[sql(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[sql(keyword = "SECURE")]
    pub secure: bool,
    #[sql(static = "PROCEDURE")]
    pub procedure: Static,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    #[sql(list, must_parentheses)]
    pub arguments: Vec<ProcedureArgument>,
    #[sql(keyword = "COPY GRANTS")]
    pub copy_grants: bool,
    #[sql(nested)]
    pub returns: ProcedureReturns,
    #[sql(static = "LANGUAGE SQL")]
    pub language: Static,
    #[sql(keyword)]
    pub null_input_behavior: Option<NullInputBehavior>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[sql(parameter = "EXECUTE AS", no_equals)]
    pub execute_as: Option<ExecuteAs>,
    #[sql(parameter = "AS", double_dollar_quotes, no_equals)]
    pub body: String,
}

impl Validate for CreateProcedureForSqlOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut v = Violations::new("CreateProcedureForSqlOptions")
            .identifier("name", &self.name)
            .check(!self.body.is_empty(), || {
                "CreateProcedureForSqlOptions.ProcedureDefinition must not be empty".to_string()
            });
        for argument in &self.arguments {
            v = v.check(!argument.name.is_empty() && !argument.data_type.is_empty(), || {
                "CreateProcedureForSqlOptions.Arguments need a name and a data type".to_string()
            });
        }
        match &self.returns {
            ProcedureReturns::Scalar { data_type, .. } => {
                v = v.check(!data_type.is_empty(), || {
                    "CreateProcedureForSqlOptions.Returns needs a data type".to_string()
                });
            }
            ProcedureReturns::Table(columns) => {
                v = v.non_empty("Returns.Table", columns);
            }
        }
        v.finish()
    }
}

/// `ALTER PROCEDURE`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterProcedureOptions {
    #[sql(static = "ALTER PROCEDURE")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifierWithArguments,
    #[sql(identifier = "RENAME TO")]
    pub rename_to: Option<SchemaObjectIdentifier>,
    #[sql(parameter = "SET COMMENT", single_quotes)]
    pub set_comment: Option<String>,
    #[sql(keyword = "UNSET COMMENT")]
    pub unset_comment: bool,
    #[sql(parameter = "EXECUTE AS", no_equals)]
    pub execute_as: Option<ExecuteAs>,
    #[sql(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[sql(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterProcedureOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("AlterProcedureOptions")
            .identifier("name", &self.name)
            .identifier_if_set("RenameTo", self.rename_to.as_ref())
            .exactly_one_of(&[
                ("RenameTo", &self.rename_to),
                ("SetComment", &self.set_comment),
                ("UnsetComment", &self.unset_comment),
                ("ExecuteAs", &self.execute_as),
                ("SetTags", &self.set_tags),
                ("UnsetTags", &self.unset_tags),
            ]);
        tag_violations(v, "SetTags", &self.set_tags).finish()
    }
}

/// `DROP PROCEDURE`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropProcedureOptions {
    #[sql(static = "DROP PROCEDURE")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifierWithArguments,
}

impl Validate for DropProcedureOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropProcedureOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW PROCEDURES`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowProcedureOptions {
    #[sql(static = "SHOW PROCEDURES")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(nested)]
    pub in_: Option<In>,
}

impl Validate for ShowProcedureOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowProcedureOptions").finish()
    }
}

/// `DESCRIBE PROCEDURE`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DescribeProcedureOptions {
    #[sql(static = "DESCRIBE PROCEDURE")]
    pub describe: Static,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifierWithArguments,
}

impl Validate for DescribeProcedureOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DescribeProcedureOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `CALL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CallProcedureOptions {
    #[sql(static = "CALL")]
    pub call: Static,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    /// Argument expressions, emitted verbatim.
    #[sql(list, must_parentheses)]
    pub arguments: Vec<String>,
}

impl Validate for CallProcedureOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("CallProcedureOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// Builder for [`CreateProcedureForSqlOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateProcedureForSqlRequest {
    name: SchemaObjectIdentifier,
    returns: ProcedureReturns,
    body: String,
    or_replace: bool,
    secure: bool,
    arguments: Vec<ProcedureArgument>,
    copy_grants: bool,
    null_input_behavior: Option<NullInputBehavior>,
    comment: Option<String>,
    execute_as: Option<ExecuteAs>,
}

impl CreateProcedureForSqlRequest {
    /// Creates a request for a SQL procedure with the given body.
    pub fn new(name: SchemaObjectIdentifier, returns: ProcedureReturns, body: impl Into<String>) -> Self {
        Self {
            name,
            returns,
            body: body.into(),
            or_replace: false,
            secure: false,
            arguments: Vec::new(),
            copy_grants: false,
            null_input_behavior: None,
            comment: None,
            execute_as: None,
        }
    }

    /// Adds `OR REPLACE`.
    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    /// Adds `SECURE`.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the argument list.
    pub fn with_arguments(mut self, arguments: Vec<ProcedureArgument>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Adds `COPY GRANTS`.
    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }

    /// Sets the `NULL` input behavior.
    pub fn with_null_input_behavior(mut self, behavior: NullInputBehavior) -> Self {
        self.null_input_behavior = Some(behavior);
        self
    }

    /// Sets `COMMENT`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets `EXECUTE AS`.
    pub fn with_execute_as(mut self, execute_as: ExecuteAs) -> Self {
        self.execute_as = Some(execute_as);
        self
    }

    /// The identifier, with the signature, the created procedure will have.
    #[must_use]
    pub fn id(&self) -> SchemaObjectIdentifierWithArguments {
        self.name.clone().with_arguments(
            self.arguments
                .iter()
                .map(|argument| argument.data_type.clone())
                .collect(),
        )
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> CreateProcedureForSqlOptions {
        CreateProcedureForSqlOptions {
            or_replace: self.or_replace,
            secure: self.secure,
            name: self.name.clone(),
            arguments: self.arguments.clone(),
            copy_grants: self.copy_grants,
            returns: self.returns.clone(),
            null_input_behavior: self.null_input_behavior,
            comment: self.comment.clone(),
            execute_as: self.execute_as,
            body: self.body.clone(),
            ..Default::default()
        }
    }
}

/// The single action of an `ALTER PROCEDURE` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureAction {
    /// `RENAME TO`.
    RenameTo(SchemaObjectIdentifier),
    /// `SET COMMENT = '...'`.
    SetComment(String),
    /// `UNSET COMMENT`.
    UnsetComment,
    /// `EXECUTE AS ...`.
    ExecuteAs(ExecuteAs),
    /// `SET TAG ...`.
    SetTags(Vec<TagAssociation>),
    /// `UNSET TAG ...`.
    UnsetTags(Vec<SchemaObjectIdentifier>),
}

/// Builder for [`AlterProcedureOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AlterProcedureRequest {
    name: SchemaObjectIdentifierWithArguments,
    if_exists: bool,
    action: ProcedureAction,
}

impl AlterProcedureRequest {
    /// Creates a request applying `action` to procedure `name`.
    pub fn new(name: SchemaObjectIdentifierWithArguments, action: ProcedureAction) -> Self {
        Self {
            name,
            if_exists: false,
            action,
        }
    }

    /// Adds `IF EXISTS`.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> AlterProcedureOptions {
        let mut opts = AlterProcedureOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        };
        match &self.action {
            ProcedureAction::RenameTo(id) => opts.rename_to = Some(id.clone()),
            ProcedureAction::SetComment(comment) => opts.set_comment = Some(comment.clone()),
            ProcedureAction::UnsetComment => opts.unset_comment = true,
            ProcedureAction::ExecuteAs(execute_as) => opts.execute_as = Some(*execute_as),
            ProcedureAction::SetTags(tags) => opts.set_tags = tags.clone(),
            ProcedureAction::UnsetTags(tags) => opts.unset_tags = tags.clone(),
        }
        opts
    }
}

/// Builder for [`DropProcedureOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropProcedureRequest {
    name: SchemaObjectIdentifierWithArguments,
    if_exists: bool,
}

impl DropProcedureRequest {
    /// Creates a request to drop procedure `name`.
    pub fn new(name: SchemaObjectIdentifierWithArguments) -> Self {
        Self {
            name,
            if_exists: false,
        }
    }

    /// Adds `IF EXISTS`.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> DropProcedureOptions {
        DropProcedureOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`ShowProcedureOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowProcedureRequest {
    like: Option<Like>,
    in_: Option<In>,
}

impl ShowProcedureRequest {
    /// Lists all visible procedures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `LIKE`.
    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    /// Adds an `IN` scope.
    pub fn with_in(mut self, scope: In) -> Self {
        self.in_ = Some(scope);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> ShowProcedureOptions {
        ShowProcedureOptions {
            like: self.like.clone(),
            in_: self.in_.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW PROCEDURES`.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: Option<String>,
    pub catalog_name: Option<String>,
    pub is_builtin: bool,
    pub is_aggregate: bool,
    pub is_ansi: bool,
    pub min_num_arguments: i64,
    pub max_num_arguments: i64,
    /// The raw signature, e.g. `P(NUMBER) RETURN NUMBER`.
    pub arguments_raw: String,
    /// Argument types recovered from [`Self::arguments_raw`].
    pub argument_types: Vec<String>,
    pub description: Option<String>,
    pub is_table_function: bool,
    pub valid_for_clustering: bool,
    pub is_secure: bool,
    pub secrets: Option<String>,
    pub external_access_integrations: Option<String>,
}

impl Procedure {
    /// The procedure's identifier, with its signature.
    ///
    /// Returns `None` for built-ins, which have no schema.
    #[must_use]
    pub fn id(&self) -> Option<SchemaObjectIdentifierWithArguments> {
        Some(SchemaObjectIdentifierWithArguments::new(
            self.catalog_name.clone()?,
            self.schema_name.clone()?,
            self.name.clone(),
            self.argument_types.clone(),
        ))
    }

    fn has_signature(&self, arguments: &[String]) -> bool {
        self.argument_types.len() == arguments.len()
            && self
                .argument_types
                .iter()
                .zip(arguments)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

/// Extracts argument types from a `NAME(TYPES) RETURN TYPE` signature.
pub(crate) fn argument_types(raw: &str) -> Result<Vec<String>> {
    let signature = match raw.find(" RETURN ") {
        Some(end) => &raw[..end],
        None => raw,
    };
    let Some(start) = signature.find('(') else {
        return Ok(Vec::new());
    };
    Ok(parse_arguments(&signature[start..])?
        .into_iter()
        .map(|argument| argument.data_type)
        .collect())
}

impl FromRow for Procedure {
    fn from_row(row: &Row) -> Result<Self> {
        let arguments_raw = row.string("arguments")?;
        let argument_types = argument_types(&arguments_raw).unwrap_or_else(|err| {
            debug!(column = "arguments", value = %arguments_raw, error = %err, "unparsable signature");
            Vec::new()
        });
        Ok(Self {
            created_on: row.opt_time("created_on")?,
            name: row.string("name")?,
            schema_name: row.opt_string("schema_name")?.filter(|s| !s.is_empty()),
            catalog_name: row.opt_string("catalog_name")?.filter(|s| !s.is_empty()),
            is_builtin: row.opt_bool("is_builtin")?.unwrap_or_default(),
            is_aggregate: row.opt_bool("is_aggregate")?.unwrap_or_default(),
            is_ansi: row.opt_bool("is_ansi")?.unwrap_or_default(),
            min_num_arguments: row.opt_i64("min_num_arguments")?.unwrap_or_default(),
            max_num_arguments: row.opt_i64("max_num_arguments")?.unwrap_or_default(),
            arguments_raw,
            argument_types,
            description: row.opt_string("description")?.filter(|s| !s.is_empty()),
            is_table_function: row.opt_bool("is_table_function")?.unwrap_or_default(),
            valid_for_clustering: row.opt_bool("valid_for_clustering")?.unwrap_or_default(),
            is_secure: row.opt_bool("is_secure")?.unwrap_or_default(),
            secrets: row.maybe_string("secrets").filter(|s| !s.is_empty()),
            external_access_integrations: row
                .maybe_string("external_access_integrations")
                .filter(|s| !s.is_empty()),
        })
    }
}

/// A `property`/`value` row of `DESCRIBE PROCEDURE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDetail {
    pub property: String,
    pub value: Option<String>,
}

impl FromRow for ProcedureDetail {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            property: row.string("property")?,
            value: row.opt_string("value")?,
        })
    }
}

/// Procedure operations.
#[derive(Debug)]
pub struct Procedures<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Procedure operations.
    #[must_use]
    pub const fn procedures(&self) -> Procedures<'_, C> {
        Procedures { client: self }
    }
}

impl<C: Connection> Procedures<'_, C> {
    /// Creates a SQL procedure.
    pub async fn create_for_sql(&self, request: &CreateProcedureForSqlRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Alters a procedure.
    pub async fn alter(&self, request: &AlterProcedureRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a procedure.
    pub async fn drop(&self, request: &DropProcedureRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a procedure, treating a missing schema or database as success.
    pub async fn drop_safely(&self, id: &SchemaObjectIdentifierWithArguments) -> Result<()> {
        let request = DropProcedureRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists procedures.
    pub async fn show(&self, request: &ShowProcedureRequest) -> Result<Vec<Procedure>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds the overload matching `id`'s name and argument types.
    pub async fn show_by_id(&self, id: &SchemaObjectIdentifierWithArguments) -> Result<Procedure> {
        let request = ShowProcedureRequest::new()
            .with_like(like_name(id))
            .with_in(In::Schema(id.schema_id()));
        let overloads: Vec<Procedure> = self
            .show(&request)
            .await?
            .into_iter()
            .filter(|procedure| procedure.has_signature(id.arguments()))
            .collect();
        find_by_name(overloads, id.name(), |p| &p.name)
    }

    /// Finds one procedure, resolving ambiguous errors.
    pub async fn show_by_id_safely(
        &self,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Procedure> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }

    /// Describes a procedure.
    pub async fn describe(
        &self,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Vec<ProcedureDetail>> {
        let opts = DescribeProcedureOptions {
            name: id.clone(),
            ..Default::default()
        };
        let rows = self.client.validate_and_query(&opts).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Calls a procedure with verbatim argument expressions and returns its rows.
    pub async fn call(&self, id: &SchemaObjectIdentifier, arguments: Vec<String>) -> Result<Vec<Row>> {
        let opts = CallProcedureOptions {
            name: id.clone(),
            arguments,
            ..Default::default()
        };
        self.client.validate_and_query(&opts).await
    }
}
