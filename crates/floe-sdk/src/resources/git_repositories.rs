//! Git repositories.
//!
//! A git repository is a schema object mirroring a remote repository through
//! an API integration, optionally authenticated with a secret.

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, tag_violations, In, Like, LimitFrom, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::render::Static;
use crate::row::{parse_identifier_soft, FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

/// `CREATE GIT REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateGitRepositoryOptions {
    #[sql(static = "CREATE")]
    pub create: Static,
    #[sql(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[sql(static = "GIT REPOSITORY")]
    pub git_repository: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    #[sql(parameter = "ORIGIN", single_quotes)]
    pub origin: String,
    #[sql(parameter = "API_INTEGRATION")]
    pub api_integration: AccountObjectIdentifier,
    #[sql(parameter = "GIT_CREDENTIALS")]
    pub git_credentials: Option<SchemaObjectIdentifier>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[sql(list = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateGitRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("CreateGitRepositoryOptions")
            .identifier("name", &self.name)
            .identifier("ApiIntegration", &self.api_integration)
            .identifier_if_set("GitCredentials", self.git_credentials.as_ref())
            .conflicting(&[("OrReplace", &self.or_replace), ("IfNotExists", &self.if_not_exists)])
            .check(!self.origin.is_empty(), || {
                "CreateGitRepositoryOptions.Origin must not be empty".to_string()
            });
        tag_violations(v, "tag", &self.tag).finish()
    }
}

/// Properties changed by `ALTER GIT REPOSITORY ... SET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct GitRepositorySet {
    #[sql(parameter = "API_INTEGRATION")]
    pub api_integration: Option<AccountObjectIdentifier>,
    #[sql(parameter = "GIT_CREDENTIALS")]
    pub git_credentials: Option<SchemaObjectIdentifier>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for GitRepositorySet {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("GitRepositorySet")
            .at_least_one_of(&[
                ("ApiIntegration", &self.api_integration),
                ("GitCredentials", &self.git_credentials),
                ("Comment", &self.comment),
            ])
            .identifier_if_set("ApiIntegration", self.api_integration.as_ref())
            .identifier_if_set("GitCredentials", self.git_credentials.as_ref())
            .finish()
    }
}

/// Properties reset by `ALTER GIT REPOSITORY ... UNSET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[sql(separator = ", ")]
pub struct GitRepositoryUnset {
    #[sql(keyword = "GIT_CREDENTIALS")]
    pub git_credentials: bool,
    #[sql(keyword = "COMMENT")]
    pub comment: bool,
}

impl Validate for GitRepositoryUnset {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("GitRepositoryUnset")
            .at_least_one_of(&[
                ("GitCredentials", &self.git_credentials),
                ("Comment", &self.comment),
            ])
            .finish()
    }
}

/// `ALTER GIT REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterGitRepositoryOptions {
    #[sql(static = "ALTER GIT REPOSITORY")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    #[sql(nested = "SET")]
    pub set: Option<GitRepositorySet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<GitRepositoryUnset>,
    #[sql(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[sql(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    #[sql(keyword = "FETCH")]
    pub fetch: bool,
}

impl Validate for AlterGitRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("AlterGitRepositoryOptions")
            .identifier("name", &self.name)
            .exactly_one_of(&[
                ("Set", &self.set),
                ("Unset", &self.unset),
                ("SetTags", &self.set_tags),
                ("UnsetTags", &self.unset_tags),
                ("Fetch", &self.fetch),
            ])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        tag_violations(v, "SetTags", &self.set_tags).finish()
    }
}

/// `DROP GIT REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropGitRepositoryOptions {
    #[sql(static = "DROP GIT REPOSITORY")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
}

impl Validate for DropGitRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropGitRepositoryOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW GIT REPOSITORIES`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowGitRepositoryOptions {
    #[sql(static = "SHOW GIT REPOSITORIES")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(nested)]
    pub in_: Option<In>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowGitRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowGitRepositoryOptions")
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// `DESCRIBE GIT REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DescribeGitRepositoryOptions {
    #[sql(static = "DESCRIBE GIT REPOSITORY")]
    pub describe: Static,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
}

impl Validate for DescribeGitRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DescribeGitRepositoryOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW GIT BRANCHES`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowGitBranchesOptions {
    #[sql(static = "SHOW GIT BRANCHES")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(identifier = "IN")]
    pub repository: SchemaObjectIdentifier,
}

impl Validate for ShowGitBranchesOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowGitBranchesOptions")
            .identifier("name", &self.repository)
            .finish()
    }
}

/// `SHOW GIT TAGS`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowGitTagsOptions {
    #[sql(static = "SHOW GIT TAGS")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(identifier = "IN")]
    pub repository: SchemaObjectIdentifier,
}

impl Validate for ShowGitTagsOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowGitTagsOptions")
            .identifier("name", &self.repository)
            .finish()
    }
}

/// Builder for [`CreateGitRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateGitRepositoryRequest {
    name: SchemaObjectIdentifier,
    origin: String,
    api_integration: AccountObjectIdentifier,
    or_replace: bool,
    if_not_exists: bool,
    git_credentials: Option<SchemaObjectIdentifier>,
    comment: Option<String>,
    tags: Vec<TagAssociation>,
}

impl CreateGitRepositoryRequest {
    /// Creates a request mirroring `origin` through `api_integration`.
    pub fn new(
        name: SchemaObjectIdentifier,
        origin: impl Into<String>,
        api_integration: AccountObjectIdentifier,
    ) -> Self {
        Self {
            name,
            origin: origin.into(),
            api_integration,
            or_replace: false,
            if_not_exists: false,
            git_credentials: None,
            comment: None,
            tags: Vec::new(),
        }
    }

    /// Adds `OR REPLACE`.
    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    /// Adds `IF NOT EXISTS`.
    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// Sets the secret used to authenticate against the remote.
    pub fn with_git_credentials(mut self, secret: SchemaObjectIdentifier) -> Self {
        self.git_credentials = Some(secret);
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
    pub fn to_opts(&self) -> CreateGitRepositoryOptions {
        CreateGitRepositoryOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            origin: self.origin.clone(),
            api_integration: self.api_integration.clone(),
            git_credentials: self.git_credentials.clone(),
            comment: self.comment.clone(),
            tag: self.tags.clone(),
            ..Default::default()
        }
    }
}

/// The single action of an `ALTER GIT REPOSITORY` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRepositoryAction {
    /// `SET ...`.
    Set(GitRepositorySet),
    /// `UNSET ...`.
    Unset(GitRepositoryUnset),
    /// `SET TAG ...`.
    SetTags(Vec<TagAssociation>),
    /// `UNSET TAG ...`.
    UnsetTags(Vec<SchemaObjectIdentifier>),
    /// `FETCH`.
    Fetch,
}

/// Builder for [`AlterGitRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AlterGitRepositoryRequest {
    name: SchemaObjectIdentifier,
    if_exists: bool,
    action: GitRepositoryAction,
}

impl AlterGitRepositoryRequest {
    /// Creates a request applying `action` to repository `name`.
    pub fn new(name: SchemaObjectIdentifier, action: GitRepositoryAction) -> Self {
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
    pub fn to_opts(&self) -> AlterGitRepositoryOptions {
        let mut opts = AlterGitRepositoryOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        };
        match &self.action {
            GitRepositoryAction::Set(set) => opts.set = Some(set.clone()),
            GitRepositoryAction::Unset(unset) => opts.unset = Some(unset.clone()),
            GitRepositoryAction::SetTags(tags) => opts.set_tags = tags.clone(),
            GitRepositoryAction::UnsetTags(tags) => opts.unset_tags = tags.clone(),
            GitRepositoryAction::Fetch => opts.fetch = true,
        }
        opts
    }
}

/// Builder for [`DropGitRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropGitRepositoryRequest {
    name: SchemaObjectIdentifier,
    if_exists: bool,
}

impl DropGitRepositoryRequest {
    /// Creates a request to drop repository `name`.
    pub fn new(name: SchemaObjectIdentifier) -> Self {
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
    pub fn to_opts(&self) -> DropGitRepositoryOptions {
        DropGitRepositoryOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`ShowGitRepositoryOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowGitRepositoryRequest {
    like: Option<Like>,
    in_: Option<In>,
    limit: Option<LimitFrom>,
}

impl ShowGitRepositoryRequest {
    /// Lists all visible repositories.
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

    /// Adds `LIMIT`.
    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> ShowGitRepositoryOptions {
        ShowGitRepositoryOptions {
            like: self.like.clone(),
            in_: self.in_.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW GIT REPOSITORIES` or `DESCRIBE GIT REPOSITORY`.
#[derive(Debug, Clone, PartialEq)]
pub struct GitRepository {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub origin: String,
    pub api_integration: Option<AccountObjectIdentifier>,
    pub git_credentials: Option<SchemaObjectIdentifier>,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub comment: Option<String>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl GitRepository {
    /// The repository's identifier.
    #[must_use]
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(
            self.database_name.clone(),
            self.schema_name.clone(),
            self.name.clone(),
        )
    }
}

impl FromRow for GitRepository {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            created_on: row.opt_time("created_on")?,
            name: row.string("name")?,
            database_name: row.string("database_name")?,
            schema_name: row.string("schema_name")?,
            origin: row.string("origin")?,
            api_integration: parse_identifier_soft(
                "api_integration",
                row.opt_string("api_integration")?.as_deref(),
            ),
            git_credentials: parse_identifier_soft(
                "git_credentials",
                row.opt_string("git_credentials")?.as_deref(),
            ),
            owner: row.opt_string("owner")?,
            owner_role_type: row.opt_string("owner_role_type")?,
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            last_fetched_at: row.opt_time("last_fetched_at")?,
        })
    }
}

/// A row of `SHOW GIT BRANCHES` or `SHOW GIT TAGS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitReference {
    pub name: String,
    pub path: String,
    pub checkouts: Option<String>,
    pub commit_hash: String,
    /// Only reported for tags.
    pub author: Option<String>,
    /// Only reported for tags.
    pub message: Option<String>,
}

impl FromRow for GitReference {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            name: row.string("name")?,
            path: row.string("path")?,
            checkouts: row.maybe_string("checkouts").filter(|s| !s.is_empty()),
            commit_hash: row.string("commit_hash")?,
            author: row.maybe_string("author"),
            message: row.maybe_string("message"),
        })
    }
}

/// Git repository operations.
#[derive(Debug)]
pub struct GitRepositories<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Git repository operations.
    #[must_use]
    pub const fn git_repositories(&self) -> GitRepositories<'_, C> {
        GitRepositories { client: self }
    }
}

impl<C: Connection> GitRepositories<'_, C> {
    /// Creates a repository.
    pub async fn create(&self, request: &CreateGitRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Alters a repository.
    pub async fn alter(&self, request: &AlterGitRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a repository.
    pub async fn drop(&self, request: &DropGitRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a repository, treating a missing schema or database as success.
    pub async fn drop_safely(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        let request = DropGitRepositoryRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists repositories.
    pub async fn show(&self, request: &ShowGitRepositoryRequest) -> Result<Vec<GitRepository>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one repository by name inside its schema.
    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<GitRepository> {
        let request = ShowGitRepositoryRequest::new()
            .with_like(like_name(id))
            .with_in(In::Schema(id.schema_id()));
        let repositories = self.show(&request).await?;
        find_by_name(repositories, id.name(), |r| &r.name)
    }

    /// Finds one repository, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &SchemaObjectIdentifier) -> Result<GitRepository> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }

    /// Describes a repository.
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<GitRepository> {
        let opts = DescribeGitRepositoryOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row = self.client.validate_and_query_one(&opts).await?;
        GitRepository::from_row(&row)
    }

    /// Lists the branches of a repository.
    pub async fn show_branches(
        &self,
        id: &SchemaObjectIdentifier,
        like: Option<Like>,
    ) -> Result<Vec<GitReference>> {
        let opts = ShowGitBranchesOptions {
            like,
            repository: id.clone(),
            ..Default::default()
        };
        let rows = self.client.validate_and_query(&opts).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Lists the tags of a repository.
    pub async fn show_tags(
        &self,
        id: &SchemaObjectIdentifier,
        like: Option<Like>,
    ) -> Result<Vec<GitReference>> {
        let opts = ShowGitTagsOptions {
            like,
            repository: id.clone(),
            ..Default::default()
        };
        let rows = self.client.validate_and_query(&opts).await?;
        Client::<C>::convert_rows(&rows)
    }
}
