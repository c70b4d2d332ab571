//! Image repositories.

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, tag_violations, In, Like, LimitFrom, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::render::{RenderError, RenderSql, SqlWriter, Static};
use crate::row::{parse_enum_soft, FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

sql_enum! {
    /// Server-side encryption applied to stored images.
    pub enum ImageRepositoryEncryptionType {
        SnowflakeSse => "SNOWFLAKE_SSE",
        SnowflakeFull => "SNOWFLAKE_FULL",
    }
}

/// `ENCRYPTION = (TYPE = '<type>')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRepositoryEncryption(pub ImageRepositoryEncryptionType);

impl RenderSql for ImageRepositoryEncryption {
    fn render_sql(&self, w: &mut SqlWriter) -> std::result::Result<(), RenderError> {
        w.push_token(format!("ENCRYPTION = (TYPE = '{}')", self.0));
        Ok(())
    }
}

/// `CREATE IMAGE REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateImageRepositoryOptions {
    #[sql(static = "CREATE")]
    pub create: Static,
    #[sql(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[sql(static = "IMAGE REPOSITORY")]
    pub image_repository: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    #[sql(nested)]
    pub encryption: Option<ImageRepositoryEncryption>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[sql(list = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateImageRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("CreateImageRepositoryOptions")
            .identifier("name", &self.name)
            .conflicting(&[("OrReplace", &self.or_replace), ("IfNotExists", &self.if_not_exists)]);
        tag_violations(v, "tag", &self.tag).finish()
    }
}

/// `ALTER IMAGE REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterImageRepositoryOptions {
    #[sql(static = "ALTER IMAGE REPOSITORY")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
    #[sql(parameter = "SET COMMENT", single_quotes)]
    pub set_comment: Option<String>,
    #[sql(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[sql(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterImageRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("AlterImageRepositoryOptions")
            .identifier("name", &self.name)
            .exactly_one_of(&[
                ("SetComment", &self.set_comment),
                ("SetTags", &self.set_tags),
                ("UnsetTags", &self.unset_tags),
            ]);
        tag_violations(v, "SetTags", &self.set_tags).finish()
    }
}

/// `DROP IMAGE REPOSITORY`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropImageRepositoryOptions {
    #[sql(static = "DROP IMAGE REPOSITORY")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: SchemaObjectIdentifier,
}

impl Validate for DropImageRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropImageRepositoryOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW IMAGE REPOSITORIES`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowImageRepositoryOptions {
    #[sql(static = "SHOW IMAGE REPOSITORIES")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(nested)]
    pub in_: Option<In>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowImageRepositoryOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowImageRepositoryOptions")
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// Builder for [`CreateImageRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateImageRepositoryRequest {
    name: SchemaObjectIdentifier,
    or_replace: bool,
    if_not_exists: bool,
    encryption: Option<ImageRepositoryEncryptionType>,
    comment: Option<String>,
    tags: Vec<TagAssociation>,
}

impl CreateImageRepositoryRequest {
    /// Creates a request for repository `name`.
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            or_replace: false,
            if_not_exists: false,
            encryption: None,
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

    /// Sets the encryption type.
    pub fn with_encryption(mut self, encryption: ImageRepositoryEncryptionType) -> Self {
        self.encryption = Some(encryption);
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
    pub fn to_opts(&self) -> CreateImageRepositoryOptions {
        CreateImageRepositoryOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            encryption: self.encryption.map(ImageRepositoryEncryption),
            comment: self.comment.clone(),
            tag: self.tags.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`AlterImageRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AlterImageRepositoryRequest {
    name: SchemaObjectIdentifier,
    if_exists: bool,
    set_comment: Option<String>,
    set_tags: Vec<TagAssociation>,
    unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterImageRepositoryRequest {
    /// Creates a request altering repository `name`.
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: false,
            set_comment: None,
            set_tags: Vec::new(),
            unset_tags: Vec::new(),
        }
    }

    /// Adds `IF EXISTS`.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// `SET COMMENT = '...'`.
    pub fn with_set_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment = Some(comment.into());
        self
    }

    /// `SET TAG ...`.
    pub fn with_set_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.set_tags = tags;
        self
    }

    /// `UNSET TAG ...`.
    pub fn with_unset_tags(mut self, tags: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tags = tags;
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> AlterImageRepositoryOptions {
        AlterImageRepositoryOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            set_comment: self.set_comment.clone(),
            set_tags: self.set_tags.clone(),
            unset_tags: self.unset_tags.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`DropImageRepositoryOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropImageRepositoryRequest {
    name: SchemaObjectIdentifier,
    if_exists: bool,
}

impl DropImageRepositoryRequest {
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
    pub fn to_opts(&self) -> DropImageRepositoryOptions {
        DropImageRepositoryOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`ShowImageRepositoryOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowImageRepositoryRequest {
    like: Option<Like>,
    in_: Option<In>,
    limit: Option<LimitFrom>,
}

impl ShowImageRepositoryRequest {
    /// Lists all visible image repositories.
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
    pub fn to_opts(&self) -> ShowImageRepositoryOptions {
        ShowImageRepositoryOptions {
            like: self.like.clone(),
            in_: self.in_.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW IMAGE REPOSITORIES`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRepository {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub repository_url: String,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub comment: Option<String>,
    pub private_link_repository_url: Option<String>,
    pub encryption: Option<ImageRepositoryEncryptionType>,
}

impl ImageRepository {
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

impl FromRow for ImageRepository {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            created_on: row.opt_time("created_on")?,
            name: row.string("name")?,
            database_name: row.string("database_name")?,
            schema_name: row.string("schema_name")?,
            repository_url: row.string("repository_url")?,
            owner: row.opt_string("owner")?,
            owner_role_type: row.opt_string("owner_role_type")?,
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            private_link_repository_url: row
                .maybe_string("privatelink_repository_url")
                .filter(|s| !s.is_empty()),
            encryption: parse_enum_soft("encryption", row.maybe_string("encryption").as_deref()),
        })
    }
}

/// Image repository operations.
#[derive(Debug)]
pub struct ImageRepositories<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Image repository operations.
    #[must_use]
    pub const fn image_repositories(&self) -> ImageRepositories<'_, C> {
        ImageRepositories { client: self }
    }
}

impl<C: Connection> ImageRepositories<'_, C> {
    /// Creates an image repository.
    pub async fn create(&self, request: &CreateImageRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Alters an image repository.
    pub async fn alter(&self, request: &AlterImageRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops an image repository.
    pub async fn drop(&self, request: &DropImageRepositoryRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops an image repository, treating a missing parent as success.
    pub async fn drop_safely(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        let request = DropImageRepositoryRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists image repositories.
    pub async fn show(&self, request: &ShowImageRepositoryRequest) -> Result<Vec<ImageRepository>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one image repository by name inside its schema.
    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<ImageRepository> {
        let request = ShowImageRepositoryRequest::new()
            .with_like(like_name(id))
            .with_in(In::Schema(id.schema_id()));
        let repositories = self.show(&request).await?;
        find_by_name(repositories, id.name(), |r| &r.name)
    }

    /// Finds one image repository, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &SchemaObjectIdentifier) -> Result<ImageRepository> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }
}
