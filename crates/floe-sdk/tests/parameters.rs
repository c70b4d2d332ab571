mod common;

use common::{client, statements, MockConnection};
use floe_sdk::parameters::{
    AccountParameter, ObjectParameter, ObjectType, SessionParameter, TaskParameter, UserParameter,
};
use floe_sdk::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, Error, Row, SchemaObjectIdentifier,
};

fn parameter_row(key: &str, value: &str, level: &str) -> Row {
    Row::new()
        .with("key", key)
        .with("value", value)
        .with("default", "")
        .with("level", level)
        .with("description", "")
        .with("type", "STRING")
}

#[tokio::test]
async fn test_account_setter_delegates_session_names() {
    let client = client(MockConnection::new());
    let parameters = client.parameters();

    parameters
        .set_account_parameter(AccountParameter::Autocommit, "FALSE")
        .await
        .unwrap();
    parameters
        .set_account_parameter(AccountParameter::MinDataRetentionTimeInDays, "7")
        .await
        .unwrap();
    parameters
        .unset_account_parameter(AccountParameter::QueryTag)
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            "ALTER ACCOUNT SET AUTOCOMMIT = false",
            "ALTER ACCOUNT SET MIN_DATA_RETENTION_TIME_IN_DAYS = 7",
            "ALTER ACCOUNT UNSET QUERY_TAG",
        ]
    );
}

#[tokio::test]
async fn test_invalid_values_send_nothing() {
    let client = client(MockConnection::new());
    let parameters = client.parameters();

    let err = parameters
        .set_session_parameter_on_account(SessionParameter::Autocommit, "yes")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameterValue { .. }));

    let err = parameters
        .set_account_parameter(AccountParameter::ClientEncryptionKeySize, "big")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidParameterValue { ref parameter, .. } if parameter == "CLIENT_ENCRYPTION_KEY_SIZE"
    ));

    assert!(statements(&client).is_empty());
}

#[tokio::test]
async fn test_user_scope() {
    let client = client(MockConnection::new());
    let parameters = client.parameters();
    let user = AccountObjectIdentifier::new("bob");

    parameters
        .set_session_parameter_on_user(&user, SessionParameter::TimestampTypeMapping, "timestamp_ntz")
        .await
        .unwrap();
    parameters
        .unset_session_parameter_on_user(&user, SessionParameter::TimestampTypeMapping)
        .await
        .unwrap();
    parameters
        .set_user_parameter(&user, UserParameter::NetworkPolicy, "corp")
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"ALTER USER "bob" SET TIMESTAMP_TYPE_MAPPING = 'TIMESTAMP_NTZ'"#,
            r#"ALTER USER "bob" UNSET TIMESTAMP_TYPE_MAPPING"#,
            r#"ALTER USER "bob" SET NETWORK_POLICY = 'corp'"#,
        ]
    );
}

#[tokio::test]
async fn test_object_scope() {
    let client = client(MockConnection::new());
    let parameters = client.parameters();

    parameters
        .set_object_parameter(
            ObjectType::Schema,
            DatabaseObjectIdentifier::new("db", "s"),
            ObjectParameter::LogLevel,
            "chatty",
        )
        .await
        .unwrap();
    parameters
        .unset_object_parameter(
            ObjectType::Database,
            AccountObjectIdentifier::new("db"),
            ObjectParameter::DataRetentionTimeInDays,
        )
        .await
        .unwrap();
    parameters
        .set_task_parameter(
            &SchemaObjectIdentifier::new("db", "s", "t"),
            TaskParameter::UserTaskManagedInitialWarehouseSize,
            "xsmall",
        )
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"ALTER SCHEMA "db"."s" SET LOG_LEVEL = 'chatty'"#,
            r#"ALTER DATABASE "db" UNSET DATA_RETENTION_TIME_IN_DAYS"#,
            r#"ALTER TASK "db"."s"."t" SET USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE = 'XSMALL'"#,
        ]
    );
}

#[tokio::test]
async fn test_unsupported_object_parameter_sends_nothing() {
    let client = client(MockConnection::new());

    let err = client
        .parameters()
        .set_object_parameter(
            ObjectType::Table,
            SchemaObjectIdentifier::new("db", "s", "t"),
            ObjectParameter::MaxConcurrencyLevel,
            "8",
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedParameter { scope: "TABLE", .. }
    ));
    assert!(statements(&client).is_empty());
}

#[tokio::test]
async fn test_show_parameter_returns_matching_row() {
    let client = client(MockConnection::new().on(
        "SHOW PARAMETERS",
        vec![
            parameter_row("LOG_LEVEL_EXTRA", "X", ""),
            parameter_row("LOG_LEVEL", "WARN", "SESSION"),
        ],
    ));

    let parameter = client
        .parameters()
        .show_session_parameter(SessionParameter::LogLevel)
        .await
        .unwrap();

    assert_eq!(parameter.value, "WARN");
    assert_eq!(parameter.level.as_deref(), Some("SESSION"));
    assert_eq!(
        statements(&client),
        vec!["SHOW PARAMETERS LIKE 'LOG_LEVEL' IN SESSION"]
    );
}

#[tokio::test]
async fn test_show_parameter_scopes() {
    let client = client(MockConnection::new());
    let parameters = client.parameters();

    let err = parameters
        .show_account_parameter(AccountParameter::AllowIdToken)
        .await
        .unwrap_err();
    assert!(err.is_object_not_found());
    let _ = parameters
        .show_user_parameter(UserParameter::NetworkPolicy, &AccountObjectIdentifier::new("bob"))
        .await;
    let _ = parameters
        .show_object_parameter(
            ObjectParameter::MaxConcurrencyLevel,
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("wh"),
        )
        .await;

    assert_eq!(
        statements(&client),
        vec![
            "SHOW PARAMETERS LIKE 'ALLOW_ID_TOKEN' IN ACCOUNT",
            r#"SHOW PARAMETERS LIKE 'NETWORK_POLICY' IN USER "bob""#,
            r#"SHOW PARAMETERS LIKE 'MAX_CONCURRENCY_LEVEL' IN WAREHOUSE "wh""#,
        ]
    );
}
