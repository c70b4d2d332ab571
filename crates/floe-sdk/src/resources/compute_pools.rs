//! Compute pools.
//!
//! Compute pools are account-level collections of virtual machine nodes that
//! run container services and jobs.

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, tag_violations, Like, LimitFrom, TagAssociation};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::render::Static;
use crate::row::{parse_enum_soft, parse_identifier_soft, FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

sql_enum! {
    /// Machine type of every node in a pool.
    pub enum ComputePoolInstanceFamily {
        CpuX64Xs => "CPU_X64_XS",
        CpuX64S => "CPU_X64_S",
        CpuX64M => "CPU_X64_M",
        CpuX64L => "CPU_X64_L",
        HighmemX64S => "HIGHMEM_X64_S",
        HighmemX64M => "HIGHMEM_X64_M",
        HighmemX64L => "HIGHMEM_X64_L",
        HighmemX64Sl => "HIGHMEM_X64_SL",
        GpuNvS => "GPU_NV_S",
        GpuNvM => "GPU_NV_M",
        GpuNvL => "GPU_NV_L",
        GpuNvXs => "GPU_NV_XS",
        GpuNvSm => "GPU_NV_SM",
        GpuNv2m => "GPU_NV_2M",
        GpuNv3m => "GPU_NV_3M",
        GpuNvSl => "GPU_NV_SL",
    }
}

sql_enum! {
    /// Lifecycle state reported by `SHOW COMPUTE POOLS`.
    pub enum ComputePoolState {
        Idle => "IDLE",
        Active => "ACTIVE",
        Suspended => "SUSPENDED",
        Starting => "STARTING",
        Stopping => "STOPPING",
        Resizing => "RESIZING",
    }
}

/// `CREATE COMPUTE POOL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateComputePoolOptions {
    #[sql(static = "CREATE COMPUTE POOL")]
    pub create: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(identifier = "FOR APPLICATION")]
    pub for_application: Option<AccountObjectIdentifier>,
    #[sql(parameter = "MIN_NODES")]
    pub min_nodes: i32,
    #[sql(parameter = "MAX_NODES")]
    pub max_nodes: i32,
    #[sql(parameter = "INSTANCE_FAMILY")]
    pub instance_family: Option<ComputePoolInstanceFamily>,
    #[sql(parameter = "AUTO_RESUME")]
    pub auto_resume: Option<bool>,
    #[sql(parameter = "INITIALLY_SUSPENDED")]
    pub initially_suspended: Option<bool>,
    #[sql(parameter = "AUTO_SUSPEND_SECS")]
    pub auto_suspend_secs: Option<i64>,
    #[sql(list = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for CreateComputePoolOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("CreateComputePoolOptions")
            .identifier("name", &self.name)
            .identifier_if_set("ForApplication", self.for_application.as_ref())
            .int_greater_or_equal("MinNodes", Some(i64::from(self.min_nodes)), 1)
            .int_greater_or_equal("MaxNodes", Some(i64::from(self.max_nodes)), 1)
            .check(self.max_nodes >= self.min_nodes, || {
                "CreateComputePoolOptions.MaxNodes must be greater than or equal to MinNodes"
                    .to_string()
            })
            .check(self.instance_family.is_some(), || {
                "CreateComputePoolOptions.InstanceFamily must be set".to_string()
            })
            .int_greater_or_equal("AutoSuspendSecs", self.auto_suspend_secs, 0);
        tag_violations(v, "tag", &self.tag).finish()
    }
}

/// Properties changed by `ALTER COMPUTE POOL ... SET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ComputePoolSet {
    #[sql(parameter = "MIN_NODES")]
    pub min_nodes: Option<i32>,
    #[sql(parameter = "MAX_NODES")]
    pub max_nodes: Option<i32>,
    #[sql(parameter = "AUTO_RESUME")]
    pub auto_resume: Option<bool>,
    #[sql(parameter = "AUTO_SUSPEND_SECS")]
    pub auto_suspend_secs: Option<i64>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for ComputePoolSet {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ComputePoolSet")
            .at_least_one_of(&[
                ("MinNodes", &self.min_nodes),
                ("MaxNodes", &self.max_nodes),
                ("AutoResume", &self.auto_resume),
                ("AutoSuspendSecs", &self.auto_suspend_secs),
                ("Comment", &self.comment),
            ])
            .int_greater_or_equal("MinNodes", self.min_nodes.map(i64::from), 1)
            .int_greater_or_equal("MaxNodes", self.max_nodes.map(i64::from), 1)
            .int_greater_or_equal("AutoSuspendSecs", self.auto_suspend_secs, 0)
            .finish()
    }
}

/// Properties reset by `ALTER COMPUTE POOL ... UNSET`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[sql(separator = ", ")]
pub struct ComputePoolUnset {
    #[sql(keyword = "AUTO_RESUME")]
    pub auto_resume: bool,
    #[sql(keyword = "AUTO_SUSPEND_SECS")]
    pub auto_suspend_secs: bool,
    #[sql(keyword = "COMMENT")]
    pub comment: bool,
}

impl Validate for ComputePoolUnset {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ComputePoolUnset")
            .at_least_one_of(&[
                ("AutoResume", &self.auto_resume),
                ("AutoSuspendSecs", &self.auto_suspend_secs),
                ("Comment", &self.comment),
            ])
            .finish()
    }
}

/// `ALTER COMPUTE POOL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterComputePoolOptions {
    #[sql(static = "ALTER COMPUTE POOL")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(keyword = "RESUME")]
    pub resume: bool,
    #[sql(keyword = "SUSPEND")]
    pub suspend: bool,
    #[sql(keyword = "STOP ALL")]
    pub stop_all: bool,
    #[sql(nested = "SET")]
    pub set: Option<ComputePoolSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ComputePoolUnset>,
    #[sql(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[sql(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterComputePoolOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let v = Violations::new("AlterComputePoolOptions")
            .identifier("name", &self.name)
            .exactly_one_of(&[
                ("Resume", &self.resume),
                ("Suspend", &self.suspend),
                ("StopAll", &self.stop_all),
                ("Set", &self.set),
                ("Unset", &self.unset),
                ("SetTags", &self.set_tags),
                ("UnsetTags", &self.unset_tags),
            ])
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        tag_violations(v, "SetTags", &self.set_tags).finish()
    }
}

/// `DROP COMPUTE POOL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropComputePoolOptions {
    #[sql(static = "DROP COMPUTE POOL")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
}

impl Validate for DropComputePoolOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropComputePoolOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW COMPUTE POOLS`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowComputePoolOptions {
    #[sql(static = "SHOW COMPUTE POOLS")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(parameter = "STARTS WITH", single_quotes, no_equals)]
    pub starts_with: Option<String>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowComputePoolOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowComputePoolOptions")
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// `DESCRIBE COMPUTE POOL`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DescribeComputePoolOptions {
    #[sql(static = "DESCRIBE COMPUTE POOL")]
    pub describe: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
}

impl Validate for DescribeComputePoolOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DescribeComputePoolOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// Builder for [`CreateComputePoolOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateComputePoolRequest {
    name: AccountObjectIdentifier,
    if_not_exists: bool,
    for_application: Option<AccountObjectIdentifier>,
    min_nodes: i32,
    max_nodes: i32,
    instance_family: ComputePoolInstanceFamily,
    auto_resume: Option<bool>,
    initially_suspended: Option<bool>,
    auto_suspend_secs: Option<i64>,
    tags: Vec<TagAssociation>,
    comment: Option<String>,
}

impl CreateComputePoolRequest {
    /// Creates a request with the required node range and instance family.
    pub fn new(
        name: AccountObjectIdentifier,
        min_nodes: i32,
        max_nodes: i32,
        instance_family: ComputePoolInstanceFamily,
    ) -> Self {
        Self {
            name,
            if_not_exists: false,
            for_application: None,
            min_nodes,
            max_nodes,
            instance_family,
            auto_resume: None,
            initially_suspended: None,
            auto_suspend_secs: None,
            tags: Vec::new(),
            comment: None,
        }
    }

    /// Adds `IF NOT EXISTS`.
    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// Dedicates the pool to an application.
    pub fn with_for_application(mut self, application: AccountObjectIdentifier) -> Self {
        self.for_application = Some(application);
        self
    }

    /// Sets `AUTO_RESUME`.
    pub fn with_auto_resume(mut self, auto_resume: bool) -> Self {
        self.auto_resume = Some(auto_resume);
        self
    }

    /// Sets `INITIALLY_SUSPENDED`.
    pub fn with_initially_suspended(mut self, suspended: bool) -> Self {
        self.initially_suspended = Some(suspended);
        self
    }

    /// Sets `AUTO_SUSPEND_SECS`.
    pub fn with_auto_suspend_secs(mut self, secs: i64) -> Self {
        self.auto_suspend_secs = Some(secs);
        self
    }

    /// Sets `WITH TAG`.
    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets `COMMENT`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> CreateComputePoolOptions {
        CreateComputePoolOptions {
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            for_application: self.for_application.clone(),
            min_nodes: self.min_nodes,
            max_nodes: self.max_nodes,
            instance_family: Some(self.instance_family),
            auto_resume: self.auto_resume,
            initially_suspended: self.initially_suspended,
            auto_suspend_secs: self.auto_suspend_secs,
            tag: self.tags.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

/// The single action of an `ALTER COMPUTE POOL` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputePoolAction {
    /// `RESUME`.
    Resume,
    /// `SUSPEND`.
    Suspend,
    /// `STOP ALL`.
    StopAll,
    /// `SET ...`.
    Set(ComputePoolSet),
    /// `UNSET ...`.
    Unset(ComputePoolUnset),
    /// `SET TAG ...`.
    SetTags(Vec<TagAssociation>),
    /// `UNSET TAG ...`.
    UnsetTags(Vec<SchemaObjectIdentifier>),
}

/// Builder for [`AlterComputePoolOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AlterComputePoolRequest {
    name: AccountObjectIdentifier,
    if_exists: bool,
    action: ComputePoolAction,
}

impl AlterComputePoolRequest {
    /// Creates a request applying `action` to pool `name`.
    pub fn new(name: AccountObjectIdentifier, action: ComputePoolAction) -> Self {
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
    pub fn to_opts(&self) -> AlterComputePoolOptions {
        let mut opts = AlterComputePoolOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        };
        match &self.action {
            ComputePoolAction::Resume => opts.resume = true,
            ComputePoolAction::Suspend => opts.suspend = true,
            ComputePoolAction::StopAll => opts.stop_all = true,
            ComputePoolAction::Set(set) => opts.set = Some(set.clone()),
            ComputePoolAction::Unset(unset) => opts.unset = Some(unset.clone()),
            ComputePoolAction::SetTags(tags) => opts.set_tags = tags.clone(),
            ComputePoolAction::UnsetTags(tags) => opts.unset_tags = tags.clone(),
        }
        opts
    }
}

/// Builder for [`DropComputePoolOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropComputePoolRequest {
    name: AccountObjectIdentifier,
    if_exists: bool,
}

impl DropComputePoolRequest {
    /// Creates a request to drop pool `name`.
    pub fn new(name: AccountObjectIdentifier) -> Self {
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
    pub fn to_opts(&self) -> DropComputePoolOptions {
        DropComputePoolOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`ShowComputePoolOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowComputePoolRequest {
    like: Option<Like>,
    starts_with: Option<String>,
    limit: Option<LimitFrom>,
}

impl ShowComputePoolRequest {
    /// Lists all compute pools.
    pub fn new() -> Self {
        Self::default()
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
    pub fn to_opts(&self) -> ShowComputePoolOptions {
        ShowComputePoolOptions {
            like: self.like.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW COMPUTE POOLS`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputePool {
    pub name: String,
    pub state: Option<ComputePoolState>,
    pub min_nodes: i64,
    pub max_nodes: i64,
    pub instance_family: Option<ComputePoolInstanceFamily>,
    pub num_services: i64,
    pub num_jobs: i64,
    pub auto_suspend_secs: i64,
    pub auto_resume: bool,
    pub active_nodes: i64,
    pub idle_nodes: i64,
    pub target_nodes: i64,
    pub created_on: Option<DateTime<Utc>>,
    pub resumed_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub is_exclusive: bool,
    pub application: Option<AccountObjectIdentifier>,
}

impl ComputePool {
    /// The pool's identifier.
    #[must_use]
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }
}

impl FromRow for ComputePool {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            name: row.string("name")?,
            state: parse_enum_soft("state", row.opt_string("state")?.as_deref()),
            min_nodes: row.i64("min_nodes")?,
            max_nodes: row.i64("max_nodes")?,
            instance_family: parse_enum_soft(
                "instance_family",
                row.opt_string("instance_family")?.as_deref(),
            ),
            num_services: row.opt_i64("num_services")?.unwrap_or_default(),
            num_jobs: row.opt_i64("num_jobs")?.unwrap_or_default(),
            auto_suspend_secs: row.opt_i64("auto_suspend_secs")?.unwrap_or_default(),
            auto_resume: row.opt_bool("auto_resume")?.unwrap_or_default(),
            active_nodes: row.opt_i64("active_nodes")?.unwrap_or_default(),
            idle_nodes: row.opt_i64("idle_nodes")?.unwrap_or_default(),
            target_nodes: row.opt_i64("target_nodes")?.unwrap_or_default(),
            created_on: row.opt_time("created_on")?,
            resumed_on: row.opt_time("resumed_on")?,
            updated_on: row.opt_time("updated_on")?,
            owner: row.opt_string("owner")?,
            comment: row.opt_string("comment")?.filter(|s| !s.is_empty()),
            is_exclusive: row.opt_bool("is_exclusive")?.unwrap_or_default(),
            application: parse_identifier_soft(
                "application",
                row.opt_string("application")?.as_deref(),
            ),
        })
    }
}

/// A row of `DESCRIBE COMPUTE POOL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputePoolDetails {
    pub pool: ComputePool,
    pub error_code: Option<String>,
    pub status_message: Option<String>,
}

impl FromRow for ComputePoolDetails {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            pool: ComputePool::from_row(row)?,
            error_code: row.maybe_string("error_code").filter(|s| !s.is_empty()),
            status_message: row.maybe_string("status_message").filter(|s| !s.is_empty()),
        })
    }
}

/// Compute pool operations.
#[derive(Debug)]
pub struct ComputePools<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Compute pool operations.
    #[must_use]
    pub const fn compute_pools(&self) -> ComputePools<'_, C> {
        ComputePools { client: self }
    }
}

impl<C: Connection> ComputePools<'_, C> {
    /// Creates a compute pool.
    pub async fn create(&self, request: &CreateComputePoolRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Alters a compute pool.
    pub async fn alter(&self, request: &AlterComputePoolRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a compute pool.
    pub async fn drop(&self, request: &DropComputePoolRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a compute pool if it exists.
    pub async fn drop_safely(&self, id: &AccountObjectIdentifier) -> Result<()> {
        let request = DropComputePoolRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists compute pools.
    pub async fn show(&self, request: &ShowComputePoolRequest) -> Result<Vec<ComputePool>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one compute pool by name.
    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<ComputePool> {
        let pools = self
            .show(&ShowComputePoolRequest::new().with_like(like_name(id)))
            .await?;
        find_by_name(pools, id.name(), |p| &p.name)
    }

    /// Finds one compute pool, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &AccountObjectIdentifier) -> Result<ComputePool> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }

    /// Describes a compute pool.
    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<ComputePoolDetails> {
        let opts = DescribeComputePoolOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row = self.client.validate_and_query_one(&opts).await?;
        ComputePoolDetails::from_row(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    fn pool() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("cp")
    }

    #[test]
    fn test_create_minimal() {
        let request = CreateComputePoolRequest::new(pool(), 1, 2, ComputePoolInstanceFamily::CpuX64S);
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"CREATE COMPUTE POOL "cp" MIN_NODES = 1 MAX_NODES = 2 INSTANCE_FAMILY = CPU_X64_S"#
        );
    }

    #[test]
    fn test_create_full() {
        let request = CreateComputePoolRequest::new(pool(), 1, 3, ComputePoolInstanceFamily::GpuNvS)
            .with_if_not_exists(true)
            .with_for_application(AccountObjectIdentifier::new("app"))
            .with_auto_resume(true)
            .with_initially_suspended(false)
            .with_auto_suspend_secs(600)
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("db", "s", "t"),
                "v",
            )])
            .with_comment("c");
        assert_eq!(
            render(&request.to_opts()).unwrap(),
            r#"CREATE COMPUTE POOL IF NOT EXISTS "cp" FOR APPLICATION "app" MIN_NODES = 1 MAX_NODES = 3 INSTANCE_FAMILY = GPU_NV_S AUTO_RESUME = true INITIALLY_SUSPENDED = false AUTO_SUSPEND_SECS = 600 WITH TAG ("db"."s"."t" = 'v') COMMENT = 'c'"#
        );
    }

    #[test]
    fn test_create_node_range() {
        let opts = CreateComputePoolRequest::new(pool(), 3, 2, ComputePoolInstanceFamily::CpuX64S)
            .to_opts();
        assert!(opts.validate().is_err());
        let opts = CreateComputePoolRequest::new(pool(), 0, 2, ComputePoolInstanceFamily::CpuX64S)
            .to_opts();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_alter_actions() {
        let render_action = |action| {
            render(&AlterComputePoolRequest::new(pool(), action).to_opts()).unwrap()
        };
        assert_eq!(render_action(ComputePoolAction::Resume), r#"ALTER COMPUTE POOL "cp" RESUME"#);
        assert_eq!(
            render_action(ComputePoolAction::StopAll),
            r#"ALTER COMPUTE POOL "cp" STOP ALL"#
        );
        assert_eq!(
            render_action(ComputePoolAction::Set(ComputePoolSet {
                max_nodes: Some(5),
                auto_resume: Some(false),
                ..Default::default()
            })),
            r#"ALTER COMPUTE POOL "cp" SET MAX_NODES = 5 AUTO_RESUME = false"#
        );
        assert_eq!(
            render_action(ComputePoolAction::Unset(ComputePoolUnset {
                auto_resume: true,
                comment: true,
                ..Default::default()
            })),
            r#"ALTER COMPUTE POOL "cp" UNSET AUTO_RESUME, COMMENT"#
        );
        assert_eq!(
            render_action(ComputePoolAction::UnsetTags(vec![
                SchemaObjectIdentifier::new("db", "s", "t1"),
                SchemaObjectIdentifier::new("db", "s", "t2"),
            ])),
            r#"ALTER COMPUTE POOL "cp" UNSET TAG "db"."s"."t1", "db"."s"."t2""#
        );
    }

    #[test]
    fn test_alter_requires_exactly_one_action() {
        let mut opts = AlterComputePoolRequest::new(pool(), ComputePoolAction::Resume).to_opts();
        opts.suspend = true;
        let errors = opts.validate().unwrap_err();
        assert!(errors.to_string().starts_with(
            "exactly one of AlterComputePoolOptions{Resume, Suspend, StopAll, Set, Unset, SetTags, UnsetTags}"
        ));
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let opts =
            AlterComputePoolRequest::new(pool(), ComputePoolAction::Set(ComputePoolSet::default()))
                .to_opts();
        assert!(opts
            .validate()
            .unwrap_err()
            .to_string()
            .contains("at least one of ComputePoolSet"));
    }
}
