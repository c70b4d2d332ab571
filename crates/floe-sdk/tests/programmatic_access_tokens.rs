mod common;

use common::{client, statements, MockConnection};
use floe_sdk::resources::programmatic_access_tokens::{
    AddProgrammaticAccessTokenRequest, ProgrammaticAccessTokenStatus,
    RotateProgrammaticAccessTokenRequest,
};
use floe_sdk::{AccountObjectIdentifier, Error, Row, Value};

fn user() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new("u")
}

fn token() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new("t")
}

fn token_row(name: &str) -> Row {
    Row::new()
        .with("name", name)
        .with("user_name", "U")
        .with("role_restriction", "")
        .with("expires_at", "2025-01-01 00:00:00.000 +0000")
        .with("status", "ACTIVE")
        .with("comment", "")
        .with("created_on", "2024-12-01 00:00:00.000 +0000")
        .with("created_by", "ADMIN")
        .with("mins_to_bypass_network_policy_requirement", Value::Null)
}

#[tokio::test]
async fn test_add_returns_secret() {
    let client = client(MockConnection::new().on(
        "ALTER USER",
        vec![Row::new()
            .with("token_name", "t")
            .with("token_secret", "s3cr3t")],
    ));

    let added = client
        .programmatic_access_tokens()
        .add(&AddProgrammaticAccessTokenRequest::new(user(), token()).with_days_to_expiry(30))
        .await
        .unwrap();

    assert_eq!(added.token_secret, "s3cr3t");
    assert_eq!(
        statements(&client),
        vec![r#"ALTER USER "u" ADD PROGRAMMATIC ACCESS TOKEN "t" DAYS_TO_EXPIRY = 30"#]
    );
}

#[tokio::test]
async fn test_rotate_expects_exactly_one_row() {
    let row = Row::new()
        .with("token_name", "t")
        .with("token_secret", "new")
        .with("rotated_token_name", "t_rotated");
    let client = client(MockConnection::new().on("ALTER USER", vec![row.clone(), row]));

    let err = client
        .programmatic_access_tokens()
        .rotate(&RotateProgrammaticAccessTokenRequest::new(user(), token()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MultipleRows(2)));
}

#[tokio::test]
async fn test_show_by_id_matches_exact_name() {
    let client = client(MockConnection::new().on(
        "SHOW USER PROGRAMMATIC ACCESS TOKENS",
        vec![token_row("T"), token_row("t")],
    ));

    let found = client
        .programmatic_access_tokens()
        .show_by_id(&user(), &token())
        .await
        .unwrap();

    assert_eq!(found.name, "t");
    assert_eq!(found.status, Some(ProgrammaticAccessTokenStatus::Active));
    assert_eq!(found.role_restriction, None);
    assert!(found.expires_at.is_some());
    assert_eq!(found.rotated_to, None);

    let err = client
        .programmatic_access_tokens()
        .show_by_id(&user(), &AccountObjectIdentifier::new("missing"))
        .await
        .unwrap_err();
    assert!(err.is_object_not_found());
}
