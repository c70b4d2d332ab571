//! Marketplace listings.
//!
//! A listing publishes a share or an application package to consumers. Its
//! content lives in a YAML manifest given inline (`AS $$...$$`) or read from a
//! stage (`FROM @stage/path`).

use chrono::{DateTime, Utc};

use super::{find_by_name, like_name, Like, LimitFrom};
use crate::client::{Client, Connection};
use crate::error::Result;
use crate::identifiers::{AccountIdentifier, AccountObjectIdentifier, ObjectIdentifier};
use crate::parsers::{parse_comma_separated_account_identifiers, parse_comma_separated_unquoted_list};
use crate::render::Static;
use crate::row::{parse_enum_soft, parse_identifier_soft, FromRow, Row};
use crate::safe::{safe_drop, safe_show_by_id};
use crate::stage::StageLocation;
use crate::validation::{Validate, ValidationErrors, Violations};
use crate::SqlOptions;

sql_enum! {
    /// Publication state of a listing.
    pub enum ListingState {
        Draft => "DRAFT",
        Published => "PUBLISHED",
        Unpublished => "UNPUBLISHED",
    }
}

sql_enum! {
    /// Which revision `DESCRIBE LISTING` reports.
    pub enum ListingRevision {
        Draft => "DRAFT",
        Published => "PUBLISHED",
    }
}

/// Where the listing manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingManifest {
    /// YAML given inline.
    Inline(String),
    /// YAML read from a stage.
    Stage(StageLocation),
}

/// `CREATE EXTERNAL LISTING`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct CreateListingOptions {
    #[sql(static = "CREATE EXTERNAL LISTING")]
    pub create: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(identifier = "SHARE")]
    pub share: Option<AccountObjectIdentifier>,
    #[sql(identifier = "APPLICATION PACKAGE")]
    pub application_package: Option<AccountObjectIdentifier>,
    #[sql(parameter = "AS", double_dollar_quotes, no_equals)]
    pub manifest: Option<String>,
    #[sql(parameter = "FROM", no_quotes, no_equals)]
    pub from: Option<StageLocation>,
    #[sql(parameter = "PUBLISH")]
    pub publish: Option<bool>,
    #[sql(parameter = "REVIEW")]
    pub review: Option<bool>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for CreateListingOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("CreateListingOptions")
            .identifier("name", &self.name)
            .identifier_if_set("Share", self.share.as_ref())
            .identifier_if_set("ApplicationPackage", self.application_package.as_ref())
            .conflicting(&[
                ("Share", &self.share),
                ("ApplicationPackage", &self.application_package),
            ])
            .exactly_one_of(&[("As", &self.manifest), ("From", &self.from)])
            .check(self.manifest.as_ref().is_none_or(|m| !m.is_empty()), || {
                "CreateListingOptions.As must not be empty".to_string()
            })
            .check(
                self.from.as_ref().is_none_or(|f| !f.to_sql().is_empty()),
                || "CreateListingOptions.From must be a valid stage location".to_string(),
            )
            .finish()
    }
}

/// `AS $$...$$` branch of `ALTER LISTING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct AlterListingAs {
    #[sql(parameter = "AS", double_dollar_quotes, no_equals)]
    pub manifest: String,
    #[sql(parameter = "PUBLISH")]
    pub publish: Option<bool>,
    #[sql(parameter = "REVIEW")]
    pub review: Option<bool>,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for AlterListingAs {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AlterListingAs")
            .check(!self.manifest.is_empty(), || {
                "AlterListingAs.As must not be empty".to_string()
            })
            .finish()
    }
}

/// `ADD VERSION` branch of `ALTER LISTING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct AddListingVersion {
    #[sql(static = "ADD VERSION")]
    pub add_version: Static,
    #[sql(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[sql(identifier)]
    pub version_name: AccountObjectIdentifier,
    #[sql(parameter = "FROM", no_quotes, no_equals)]
    pub from: StageLocation,
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for AddListingVersion {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AddListingVersion")
            .identifier("VersionName", &self.version_name)
            .check(!self.from.to_sql().is_empty(), || {
                "AddListingVersion.From must be a valid stage location".to_string()
            })
            .finish()
    }
}

/// `SET` branch of `ALTER LISTING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ListingSet {
    #[sql(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl Validate for ListingSet {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ListingSet")
            .at_least_one_of(&[("Comment", &self.comment)])
            .finish()
    }
}

/// `UNSET` branch of `ALTER LISTING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ListingUnset {
    #[sql(keyword = "COMMENT")]
    pub comment: bool,
}

impl Validate for ListingUnset {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ListingUnset")
            .at_least_one_of(&[("Comment", &self.comment)])
            .finish()
    }
}

/// `ALTER LISTING`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct AlterListingOptions {
    #[sql(static = "ALTER LISTING")]
    pub alter: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(keyword = "PUBLISH")]
    pub publish: bool,
    #[sql(keyword = "UNPUBLISH")]
    pub unpublish: bool,
    #[sql(keyword = "REVIEW")]
    pub review: bool,
    #[sql(nested)]
    pub alter_listing_as: Option<AlterListingAs>,
    #[sql(nested)]
    pub add_version: Option<AddListingVersion>,
    #[sql(identifier = "RENAME TO")]
    pub rename_to: Option<AccountObjectIdentifier>,
    #[sql(nested = "SET")]
    pub set: Option<ListingSet>,
    #[sql(nested = "UNSET")]
    pub unset: Option<ListingUnset>,
}

impl Validate for AlterListingOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("AlterListingOptions")
            .identifier("name", &self.name)
            .exactly_one_of(&[
                ("Publish", &self.publish),
                ("Unpublish", &self.unpublish),
                ("Review", &self.review),
                ("AlterListingAs", &self.alter_listing_as),
                ("AddVersion", &self.add_version),
                ("RenameTo", &self.rename_to),
                ("Set", &self.set),
                ("Unset", &self.unset),
            ])
            .identifier_if_set("RenameTo", self.rename_to.as_ref())
            .nested(self.alter_listing_as.as_ref())
            .nested(self.add_version.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .finish()
    }
}

/// `DROP LISTING`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DropListingOptions {
    #[sql(static = "DROP LISTING")]
    pub drop: Static,
    #[sql(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
}

impl Validate for DropListingOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DropListingOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW LISTINGS`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowListingOptions {
    #[sql(static = "SHOW LISTINGS")]
    pub show: Static,
    #[sql(nested)]
    pub like: Option<Like>,
    #[sql(parameter = "STARTS WITH", single_quotes, no_equals)]
    pub starts_with: Option<String>,
    #[sql(nested)]
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowListingOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowListingOptions")
            .nested(self.limit.as_ref())
            .finish()
    }
}

/// `DESCRIBE LISTING`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct DescribeListingOptions {
    #[sql(static = "DESCRIBE LISTING")]
    pub describe: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(parameter = "REVISION")]
    pub revision: Option<ListingRevision>,
}

impl Validate for DescribeListingOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("DescribeListingOptions")
            .identifier("name", &self.name)
            .finish()
    }
}

/// `SHOW VERSIONS IN LISTING`.
#[derive(Debug, Clone, Default, SqlOptions)]
pub struct ShowListingVersionsOptions {
    #[sql(static = "SHOW VERSIONS IN LISTING")]
    pub show: Static,
    #[sql(identifier)]
    pub name: AccountObjectIdentifier,
    #[sql(parameter = "LIMIT", no_equals)]
    pub limit: Option<i64>,
}

impl Validate for ShowListingVersionsOptions {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Violations::new("ShowListingVersionsOptions")
            .identifier("name", &self.name)
            .int_greater_than("Limit", self.limit, 0)
            .finish()
    }
}

/// Builder for [`CreateListingOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateListingRequest {
    name: AccountObjectIdentifier,
    manifest: ListingManifest,
    if_not_exists: bool,
    share: Option<AccountObjectIdentifier>,
    application_package: Option<AccountObjectIdentifier>,
    publish: Option<bool>,
    review: Option<bool>,
    comment: Option<String>,
}

impl CreateListingRequest {
    /// Creates a request for listing `name` with the given manifest.
    pub fn new(name: AccountObjectIdentifier, manifest: ListingManifest) -> Self {
        Self {
            name,
            manifest,
            if_not_exists: false,
            share: None,
            application_package: None,
            publish: None,
            review: None,
            comment: None,
        }
    }

    /// Adds `IF NOT EXISTS`.
    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// Lists a share.
    pub fn with_share(mut self, share: AccountObjectIdentifier) -> Self {
        self.share = Some(share);
        self
    }

    /// Lists an application package.
    pub fn with_application_package(mut self, package: AccountObjectIdentifier) -> Self {
        self.application_package = Some(package);
        self
    }

    /// Sets `PUBLISH`.
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = Some(publish);
        self
    }

    /// Sets `REVIEW`.
    pub fn with_review(mut self, review: bool) -> Self {
        self.review = Some(review);
        self
    }

    /// Sets `COMMENT`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> CreateListingOptions {
        let (manifest, from) = match &self.manifest {
            ListingManifest::Inline(yaml) => (Some(yaml.clone()), None),
            ListingManifest::Stage(location) => (None, Some(location.clone())),
        };
        CreateListingOptions {
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            share: self.share.clone(),
            application_package: self.application_package.clone(),
            manifest,
            from,
            publish: self.publish,
            review: self.review,
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`AlterListingOptions`].
///
/// Exactly one action must be chosen; picking several is caught by
/// validation rather than by the builder.
#[derive(Debug, Clone)]
#[must_use]
pub struct AlterListingRequest {
    name: AccountObjectIdentifier,
    if_exists: bool,
    publish: bool,
    unpublish: bool,
    review: bool,
    alter_listing_as: Option<AlterListingAs>,
    add_version: Option<AddListingVersion>,
    rename_to: Option<AccountObjectIdentifier>,
    set: Option<ListingSet>,
    unset: Option<ListingUnset>,
}

impl AlterListingRequest {
    /// Creates a request altering listing `name`.
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: false,
            publish: false,
            unpublish: false,
            review: false,
            alter_listing_as: None,
            add_version: None,
            rename_to: None,
            set: None,
            unset: None,
        }
    }

    /// Adds `IF EXISTS`.
    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    /// `PUBLISH`.
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// `UNPUBLISH`.
    pub fn with_unpublish(mut self, unpublish: bool) -> Self {
        self.unpublish = unpublish;
        self
    }

    /// `REVIEW`.
    pub fn with_review(mut self, review: bool) -> Self {
        self.review = review;
        self
    }

    /// Replaces the manifest.
    pub fn with_alter_listing_as(mut self, alter: AlterListingAs) -> Self {
        self.alter_listing_as = Some(alter);
        self
    }

    /// Adds a version from a stage.
    pub fn with_add_version(mut self, version: AddListingVersion) -> Self {
        self.add_version = Some(version);
        self
    }

    /// `RENAME TO`.
    pub fn with_rename_to(mut self, new_name: AccountObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    /// `SET ...`.
    pub fn with_set(mut self, set: ListingSet) -> Self {
        self.set = Some(set);
        self
    }

    /// `UNSET ...`.
    pub fn with_unset(mut self, unset: ListingUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    /// The option struct this request renders through.
    #[must_use]
    pub fn to_opts(&self) -> AlterListingOptions {
        AlterListingOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            publish: self.publish,
            unpublish: self.unpublish,
            review: self.review,
            alter_listing_as: self.alter_listing_as.clone(),
            add_version: self.add_version.clone(),
            rename_to: self.rename_to.clone(),
            set: self.set.clone(),
            unset: self.unset.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`DropListingOptions`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DropListingRequest {
    name: AccountObjectIdentifier,
    if_exists: bool,
}

impl DropListingRequest {
    /// Creates a request to drop listing `name`.
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
    pub fn to_opts(&self) -> DropListingOptions {
        DropListingOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// Builder for [`ShowListingOptions`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ShowListingRequest {
    like: Option<Like>,
    starts_with: Option<String>,
    limit: Option<LimitFrom>,
}

impl ShowListingRequest {
    /// Lists all listings.
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
    pub fn to_opts(&self) -> ShowListingOptions {
        ShowListingOptions {
            like: self.like.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// A row of `SHOW LISTINGS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub global_name: Option<String>,
    pub name: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub profile: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub published_on: Option<DateTime<Utc>>,
    pub state: Option<ListingState>,
    pub review_state: Option<String>,
    pub comment: Option<String>,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub regions: Vec<String>,
    pub target_accounts: Vec<AccountIdentifier>,
    pub is_monetized: bool,
    pub is_application: bool,
    pub is_targeted: bool,
    pub is_limited_trial: Option<bool>,
    pub is_by_request: Option<bool>,
    pub distribution: Option<String>,
    pub is_mountless_queryable: Option<bool>,
    pub rejected_on: Option<DateTime<Utc>>,
    pub organization_profile_name: Option<String>,
    pub uniform_listing_locator: Option<String>,
    pub detailed_target_accounts: Option<String>,
}

impl Listing {
    /// The listing's identifier.
    #[must_use]
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn regions(row: &Row) -> Vec<String> {
    row.maybe_string("regions")
        .map(|raw| parse_comma_separated_unquoted_list(&raw))
        .unwrap_or_default()
}

fn target_accounts(row: &Row) -> Vec<AccountIdentifier> {
    let Some(raw) = non_empty(row.maybe_string("target_accounts")) else {
        return Vec::new();
    };
    match parse_comma_separated_account_identifiers(&raw) {
        Ok(accounts) => accounts,
        Err(err) => {
            tracing::debug!(column = "target_accounts", value = %raw, error = %err, "unparsable account list");
            Vec::new()
        }
    }
}

impl FromRow for Listing {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            global_name: non_empty(row.maybe_string("global_name")),
            name: row.string("name")?,
            title: non_empty(row.maybe_string("title")),
            subtitle: non_empty(row.maybe_string("subtitle")),
            profile: non_empty(row.maybe_string("profile")),
            created_on: row.opt_time("created_on")?,
            updated_on: row.opt_time("updated_on")?,
            published_on: row.opt_time("published_on")?,
            state: parse_enum_soft("state", row.opt_string("state")?.as_deref()),
            review_state: non_empty(row.maybe_string("review_state")),
            comment: non_empty(row.opt_string("comment")?),
            owner: row.opt_string("owner")?,
            owner_role_type: row.maybe_string("owner_role_type"),
            regions: regions(row),
            target_accounts: target_accounts(row),
            is_monetized: row.opt_bool("is_monetized")?.unwrap_or_default(),
            is_application: row.opt_bool("is_application")?.unwrap_or_default(),
            is_targeted: row.opt_bool("is_targeted")?.unwrap_or_default(),
            is_limited_trial: optional_bool(row, "is_limited_trial")?,
            is_by_request: optional_bool(row, "is_by_request")?,
            distribution: non_empty(row.maybe_string("distribution")),
            is_mountless_queryable: optional_bool(row, "is_mountless_queryable")?,
            rejected_on: optional_time(row, "rejected_on")?,
            organization_profile_name: non_empty(row.maybe_string("organization_profile_name")),
            uniform_listing_locator: non_empty(row.maybe_string("uniform_listing_locator")),
            detailed_target_accounts: non_empty(row.maybe_string("detailed_target_accounts")),
        })
    }
}

/// Reads a boolean column the backend does not always return.
fn optional_bool(row: &Row, column: &str) -> Result<Option<bool>> {
    if row.get(column).is_some() {
        row.opt_bool(column)
    } else {
        Ok(None)
    }
}

fn optional_time(row: &Row, column: &str) -> Result<Option<DateTime<Utc>>> {
    if row.get(column).is_some() {
        row.opt_time(column)
    } else {
        Ok(None)
    }
}

/// A row of `DESCRIBE LISTING`.
///
/// Most columns are undocumented upstream, so they are kept as optional text.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetails {
    pub global_name: Option<String>,
    pub name: String,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub published_on: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub listing_terms: Option<String>,
    pub state: Option<ListingState>,
    pub share: Option<AccountObjectIdentifier>,
    pub application_package: Option<AccountObjectIdentifier>,
    pub business_needs: Option<String>,
    pub usage_examples: Option<String>,
    pub data_attributes: Option<String>,
    pub categories: Option<String>,
    pub resources: Option<String>,
    pub profile: Option<String>,
    pub customized_contact_info: Option<String>,
    pub data_dictionary: Option<String>,
    pub data_preview: Option<String>,
    pub comment: Option<String>,
    pub revisions: Option<String>,
    pub target_accounts: Vec<AccountIdentifier>,
    pub regions: Vec<String>,
    pub refresh_schedule: Option<String>,
    pub refresh_type: Option<String>,
    pub review_state: Option<String>,
    pub rejection_reason: Option<String>,
    pub unpublished_by_admin_reasons: Option<String>,
    pub is_monetized: Option<bool>,
    pub is_application: Option<bool>,
    pub is_targeted: Option<bool>,
    pub is_limited_trial: Option<bool>,
    pub is_by_request: Option<bool>,
    pub limited_trial_plan: Option<String>,
    pub retried_on: Option<String>,
    pub scheduled_drop_time: Option<String>,
    pub manifest_yaml: Option<String>,
    pub distribution: Option<String>,
    pub is_mountless_queryable: Option<bool>,
    pub organization_profile_name: Option<String>,
    pub uniform_listing_locator: Option<String>,
    pub trial_details: Option<String>,
    pub approver_contact: Option<String>,
    pub support_contact: Option<String>,
    pub live_version_uri: Option<String>,
    pub last_committed_version_uri: Option<String>,
    pub last_committed_version_name: Option<String>,
    pub last_committed_version_alias: Option<String>,
    pub published_version_uri: Option<String>,
    pub published_version_name: Option<String>,
    pub published_version_alias: Option<String>,
    pub is_share: Option<bool>,
    pub request_approval_type: Option<String>,
    pub monetization_display_order: Option<String>,
    pub legacy_uniform_listing_locators: Option<String>,
}

impl FromRow for ListingDetails {
    fn from_row(row: &Row) -> Result<Self> {
        let text = |column: &str| non_empty(row.maybe_string(column));
        Ok(Self {
            global_name: text("global_name"),
            name: row.string("name")?,
            owner: text("owner"),
            owner_role_type: text("owner_role_type"),
            created_on: optional_time(row, "created_on")?,
            updated_on: optional_time(row, "updated_on")?,
            published_on: optional_time(row, "published_on")?,
            title: text("title"),
            subtitle: text("subtitle"),
            description: text("description"),
            listing_terms: text("listing_terms"),
            state: parse_enum_soft("state", text("state").as_deref()),
            share: parse_identifier_soft("share", text("share").as_deref()),
            application_package: parse_identifier_soft(
                "application_package",
                text("application_package").as_deref(),
            ),
            business_needs: text("business_needs"),
            usage_examples: text("usage_examples"),
            data_attributes: text("data_attributes"),
            categories: text("categories"),
            resources: text("resources"),
            profile: text("profile"),
            customized_contact_info: text("customized_contact_info"),
            data_dictionary: text("data_dictionary"),
            data_preview: text("data_preview"),
            comment: text("comment"),
            revisions: text("revisions"),
            target_accounts: target_accounts(row),
            regions: regions(row),
            refresh_schedule: text("refresh_schedule"),
            refresh_type: text("refresh_type"),
            review_state: text("review_state"),
            rejection_reason: text("rejection_reason"),
            unpublished_by_admin_reasons: text("unpublished_by_admin_reasons"),
            is_monetized: optional_bool(row, "is_monetized")?,
            is_application: optional_bool(row, "is_application")?,
            is_targeted: optional_bool(row, "is_targeted")?,
            is_limited_trial: optional_bool(row, "is_limited_trial")?,
            is_by_request: optional_bool(row, "is_by_request")?,
            limited_trial_plan: text("limited_trial_plan"),
            retried_on: text("retried_on"),
            scheduled_drop_time: text("scheduled_drop_time"),
            manifest_yaml: text("manifest_yaml"),
            distribution: text("distribution"),
            is_mountless_queryable: optional_bool(row, "is_mountless_queryable")?,
            organization_profile_name: text("organization_profile_name"),
            uniform_listing_locator: text("uniform_listing_locator"),
            trial_details: text("trial_details"),
            approver_contact: text("approver_contact"),
            support_contact: text("support_contact"),
            live_version_uri: text("live_version_uri"),
            last_committed_version_uri: text("last_committed_version_uri"),
            last_committed_version_name: text("last_committed_version_name"),
            last_committed_version_alias: text("last_committed_version_alias"),
            published_version_uri: text("published_version_uri"),
            published_version_name: text("published_version_name"),
            published_version_alias: text("published_version_alias"),
            is_share: optional_bool(row, "is_share")?,
            request_approval_type: text("request_approval_type"),
            monetization_display_order: text("monetization_display_order"),
            legacy_uniform_listing_locators: text("legacy_uniform_listing_locators"),
        })
    }
}

/// A row of `SHOW VERSIONS IN LISTING`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingVersion {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub alias: Option<String>,
    pub location_url: Option<String>,
    pub is_default: bool,
    pub is_live: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub comment: Option<String>,
    pub source_location_url: Option<String>,
    pub git_commit_hash: Option<String>,
}

impl FromRow for ListingVersion {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            created_on: optional_time(row, "created_on")?,
            name: row.string("name")?,
            alias: non_empty(row.maybe_string("alias")),
            location_url: non_empty(row.maybe_string("location_url")),
            is_default: optional_bool(row, "is_default")?.unwrap_or_default(),
            is_live: optional_bool(row, "is_live")?.unwrap_or_default(),
            is_first: optional_bool(row, "is_first")?.unwrap_or_default(),
            is_last: optional_bool(row, "is_last")?.unwrap_or_default(),
            comment: non_empty(row.maybe_string("comment")),
            source_location_url: non_empty(row.maybe_string("source_location_url")),
            git_commit_hash: non_empty(row.maybe_string("git_commit_hash")),
        })
    }
}

/// Listing operations.
#[derive(Debug)]
pub struct Listings<'a, C> {
    client: &'a Client<C>,
}

impl<C: Connection> Client<C> {
    /// Listing operations.
    #[must_use]
    pub const fn listings(&self) -> Listings<'_, C> {
        Listings { client: self }
    }
}

impl<C: Connection> Listings<'_, C> {
    /// Creates a listing.
    pub async fn create(&self, request: &CreateListingRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Alters a listing.
    pub async fn alter(&self, request: &AlterListingRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a listing.
    pub async fn drop(&self, request: &DropListingRequest) -> Result<()> {
        self.client.validate_and_exec(&request.to_opts()).await
    }

    /// Drops a listing if it exists.
    pub async fn drop_safely(&self, id: &AccountObjectIdentifier) -> Result<()> {
        let request = DropListingRequest::new(id.clone()).with_if_exists(true);
        safe_drop(self.client, id, || self.drop(&request)).await
    }

    /// Lists listings.
    pub async fn show(&self, request: &ShowListingRequest) -> Result<Vec<Listing>> {
        let rows = self.client.validate_and_query(&request.to_opts()).await?;
        Client::<C>::convert_rows(&rows)
    }

    /// Finds one listing by name.
    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Listing> {
        let listings = self
            .show(&ShowListingRequest::new().with_like(like_name(id)))
            .await?;
        find_by_name(listings, id.name(), |l| &l.name)
    }

    /// Finds one listing, resolving ambiguous errors.
    pub async fn show_by_id_safely(&self, id: &AccountObjectIdentifier) -> Result<Listing> {
        safe_show_by_id(self.client, id, || self.show_by_id(id)).await
    }

    /// Describes a listing, optionally at a given revision.
    pub async fn describe(
        &self,
        id: &AccountObjectIdentifier,
        revision: Option<ListingRevision>,
    ) -> Result<ListingDetails> {
        let opts = DescribeListingOptions {
            name: id.clone(),
            revision,
            ..Default::default()
        };
        let row = self.client.validate_and_query_one(&opts).await?;
        ListingDetails::from_row(&row)
    }

    /// Lists the versions of a listing.
    pub async fn show_versions(
        &self,
        id: &AccountObjectIdentifier,
        limit: Option<i64>,
    ) -> Result<Vec<ListingVersion>> {
        let opts = ShowListingVersionsOptions {
            name: id.clone(),
            limit,
            ..Default::default()
        };
        let rows = self.client.validate_and_query(&opts).await?;
        Client::<C>::convert_rows(&rows)
    }
}
