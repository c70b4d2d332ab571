mod common;

use common::{client, statements, MockConnection};
use floe_sdk::resources::listings::{
    AlterListingRequest, CreateListingRequest, ListingManifest, ListingRevision, ListingSet,
    ListingState,
};
use floe_sdk::{
    AccountIdentifier, AccountObjectIdentifier, Error, Row, SchemaObjectIdentifier, StageLocation,
    Value,
};

fn listing() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new("L")
}

fn listing_row(name: &str) -> Row {
    Row::new()
        .with("global_name", "GZ1")
        .with("name", name)
        .with("title", "Weather")
        .with("subtitle", "")
        .with("profile", "")
        .with("created_on", "2024-05-01 10:00:00.000 -0700")
        .with("updated_on", "2024-05-02 10:00:00.000 -0700")
        .with("published_on", Value::Null)
        .with("state", "DRAFT")
        .with("review_state", "")
        .with("comment", Value::Null)
        .with("owner", "ACCOUNTADMIN")
        .with("regions", "PUBLIC.AWS_US_WEST_2, PUBLIC.AWS_EU_WEST_1")
        .with("target_accounts", r#""ORG"."ACC1", "ORG"."ACC2""#)
        .with("is_monetized", false)
        .with("is_application", false)
        .with("is_targeted", true)
}

#[tokio::test]
async fn test_alter_with_two_actions_sends_nothing() {
    let client = client(MockConnection::new());

    let err = client
        .listings()
        .alter(
            &AlterListingRequest::new(listing())
                .with_publish(true)
                .with_unpublish(true),
        )
        .await
        .unwrap_err();

    let Error::Validation(errors) = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    let message = errors.to_string();
    for field in [
        "Publish",
        "Unpublish",
        "Review",
        "AlterListingAs",
        "AddVersion",
        "RenameTo",
        "Set",
        "Unset",
    ] {
        assert!(message.contains(field), "{message} lacks {field}");
    }
    assert!(statements(&client).is_empty());
}

#[tokio::test]
async fn test_create_from_stage_and_set_comment() {
    let client = client(MockConnection::new());
    let stage = StageLocation::new(SchemaObjectIdentifier::new("db", "s", "stg"), "v1");

    client
        .listings()
        .create(
            &CreateListingRequest::new(listing(), ListingManifest::Stage(stage))
                .with_application_package(AccountObjectIdentifier::new("pkg"))
                .with_if_not_exists(true),
        )
        .await
        .unwrap();
    client
        .listings()
        .alter(&AlterListingRequest::new(listing()).with_set(ListingSet {
            comment: Some("ready".to_string()),
        }))
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"CREATE EXTERNAL LISTING IF NOT EXISTS "L" APPLICATION PACKAGE "pkg" FROM @"db"."s"."stg"/v1"#,
            r#"ALTER LISTING "L" SET COMMENT = 'ready'"#,
        ]
    );
}

#[tokio::test]
async fn test_show_by_id_parses_lists() {
    let client = client(MockConnection::new().on("SHOW LISTINGS", vec![listing_row("L")]));

    let found = client.listings().show_by_id(&listing()).await.unwrap();

    assert_eq!(found.state, Some(ListingState::Draft));
    assert_eq!(found.subtitle, None);
    assert_eq!(
        found.regions,
        vec!["PUBLIC.AWS_US_WEST_2".to_string(), "PUBLIC.AWS_EU_WEST_1".to_string()]
    );
    assert_eq!(
        found.target_accounts,
        vec![
            AccountIdentifier::new("ORG", "ACC1"),
            AccountIdentifier::new("ORG", "ACC2"),
        ]
    );
    assert_eq!(statements(&client), vec!["SHOW LISTINGS LIKE 'L'"]);
}

#[tokio::test]
async fn test_describe_with_revision() {
    let client = client(MockConnection::new().on(
        "DESCRIBE LISTING",
        vec![Row::new()
            .with("name", "L")
            .with("state", "PUBLISHED")
            .with("manifest_yaml", "title: Weather")
            .with("is_share", "true")],
    ));

    let details = client
        .listings()
        .describe(&listing(), Some(ListingRevision::Published))
        .await
        .unwrap();

    assert_eq!(details.state, Some(ListingState::Published));
    assert_eq!(details.manifest_yaml.as_deref(), Some("title: Weather"));
    assert_eq!(details.is_share, Some(true));
    assert_eq!(details.rejection_reason, None);
    assert_eq!(
        statements(&client),
        vec![r#"DESCRIBE LISTING "L" REVISION = PUBLISHED"#]
    );
}

#[tokio::test]
async fn test_drop_safely_renders_if_exists() {
    let client = client(MockConnection::new());

    client.listings().drop_safely(&listing()).await.unwrap();

    assert_eq!(statements(&client), vec![r#"DROP LISTING IF EXISTS "L""#]);
}
