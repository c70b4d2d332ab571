mod common;

use common::{client, statements, MockConnection};
use floe_sdk::resources::procedures::{
    CreateProcedureForSqlRequest, ProcedureArgument, ProcedureReturns,
};
use floe_sdk::{Error, Row, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments, Value};

fn procedure_row(arguments: &str) -> Row {
    Row::new()
        .with("created_on", Value::Null)
        .with("name", "P")
        .with("schema_name", "S")
        .with("catalog_name", "DB")
        .with("is_builtin", "N")
        .with("is_aggregate", "N")
        .with("is_ansi", "N")
        .with("min_num_arguments", 1_i64)
        .with("max_num_arguments", 1_i64)
        .with("arguments", arguments)
        .with("description", "user-defined procedure")
        .with("is_table_function", "N")
        .with("valid_for_clustering", "N")
        .with("is_secure", "N")
}

#[tokio::test]
async fn test_create_returns_usable_id() {
    let client = client(MockConnection::new());
    let request = CreateProcedureForSqlRequest::new(
        SchemaObjectIdentifier::new("DB", "S", "P"),
        ProcedureReturns::Scalar {
            data_type: "VARCHAR".to_string(),
            nullable: None,
        },
        "BEGIN RETURN 'x'; END;",
    )
    .with_arguments(vec![ProcedureArgument::new("n", "NUMBER")]);

    client.procedures().create_for_sql(&request).await.unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"CREATE PROCEDURE "DB"."S"."P" ("n" NUMBER) RETURNS VARCHAR LANGUAGE SQL AS $$BEGIN RETURN 'x'; END;$$"#
        ]
    );
    assert_eq!(
        request.id(),
        SchemaObjectIdentifierWithArguments::new("DB", "S", "P", vec!["NUMBER".to_string()])
    );
}

#[tokio::test]
async fn test_show_by_id_selects_overload() {
    let client = client(MockConnection::new().on(
        "SHOW PROCEDURES",
        vec![
            procedure_row("P(VARCHAR) RETURN VARCHAR"),
            procedure_row("P(NUMBER) RETURN VARCHAR"),
        ],
    ));
    let id = SchemaObjectIdentifierWithArguments::new("DB", "S", "P", vec!["NUMBER".to_string()]);

    let found = client.procedures().show_by_id(&id).await.unwrap();

    assert_eq!(found.arguments_raw, "P(NUMBER) RETURN VARCHAR");
    assert_eq!(found.id(), Some(id));
    assert_eq!(
        statements(&client),
        vec![r#"SHOW PROCEDURES LIKE 'P' IN SCHEMA "DB"."S""#]
    );
}

#[tokio::test]
async fn test_show_by_id_without_matching_overload() {
    let client = client(MockConnection::new().on(
        "SHOW PROCEDURES",
        vec![procedure_row("P(VARCHAR) RETURN VARCHAR")],
    ));
    let id = SchemaObjectIdentifierWithArguments::new("DB", "S", "P", vec![]);

    let err = client.procedures().show_by_id(&id).await.unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound));
}

#[tokio::test]
async fn test_call_returns_rows() {
    let client = client(MockConnection::new().on(
        "CALL",
        vec![Row::new().with("P", "done")],
    ));

    let rows = client
        .procedures()
        .call(
            &SchemaObjectIdentifier::new("DB", "S", "P"),
            vec!["42".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("P"), Some(&Value::Text("done".to_string())));
    assert_eq!(statements(&client), vec![r#"CALL "DB"."S"."P" (42)"#]);
}
