use floe_sdk::parsers::parse_arguments;
use floe_sdk::{render, RenderError, SchemaObjectIdentifier, SqlOptions, StageLocation, Static};

#[derive(Debug, Default, SqlOptions)]
struct Column {
    #[sql(parameter)]
    name: String,
    #[sql(parameter)]
    data_type: String,
}

#[derive(Debug, Default, SqlOptions)]
#[sql(separator = ", ")]
struct Settings {
    #[sql(parameter = "A")]
    a: Option<i64>,
    #[sql(parameter = "B", double_quotes)]
    b: Option<String>,
}

#[derive(Debug, Default, SqlOptions)]
struct CreateThing {
    #[sql(static = "CREATE")]
    create: Static,
    #[sql(keyword = "OR REPLACE")]
    or_replace: bool,
    #[sql(static = "THING")]
    thing: Static,
    #[sql(identifier)]
    name: SchemaObjectIdentifier,
    #[sql(identifier = "LIKE", equals)]
    like: Option<SchemaObjectIdentifier>,
    #[sql(parameter = "SIZE")]
    size: Option<i32>,
    #[sql(parameter = "COMMENT", single_quotes)]
    comment: Option<String>,
    #[sql(parameter = "BODY", double_dollar_quotes, no_equals)]
    body: Option<String>,
    #[sql(list = "COLUMNS")]
    columns: Vec<Column>,
    #[sql(list = "ROLES", no_parentheses, no_comma)]
    roles: Vec<String>,
    #[sql(list = "TAGS", must_parentheses)]
    tags: Vec<String>,
    #[sql(nested = "WITH")]
    settings: Option<Settings>,
}

fn thing() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "s", "t")
}

#[test]
fn test_minimal_statement() {
    let options = CreateThing {
        name: thing(),
        ..Default::default()
    };

    // Empty lists are skipped unless parentheses are mandatory.
    assert_eq!(
        render(&options).unwrap(),
        r#"CREATE THING "db"."s"."t" TAGS ()"#
    );
}

#[test]
fn test_every_directive() {
    let options = CreateThing {
        or_replace: true,
        name: thing(),
        like: Some(SchemaObjectIdentifier::new("db", "s", "template")),
        size: Some(3),
        comment: Some("hi".to_string()),
        body: Some("select 1".to_string()),
        columns: vec![
            Column {
                name: "a".to_string(),
                data_type: "INT".to_string(),
            },
            Column {
                name: "b".to_string(),
                data_type: "VARCHAR".to_string(),
            },
        ],
        roles: vec!["r1".to_string(), "r2".to_string()],
        tags: vec!["x".to_string()],
        settings: Some(Settings {
            a: Some(1),
            b: Some("x".to_string()),
        }),
        ..Default::default()
    };

    assert_eq!(
        render(&options).unwrap(),
        concat!(
            r#"CREATE OR REPLACE THING "db"."s"."t" LIKE = "db"."s"."template" SIZE = 3 "#,
            r#"COMMENT = 'hi' BODY $$select 1$$ COLUMNS (a INT, b VARCHAR) ROLES r1 r2 "#,
            r#"TAGS (x) WITH A = 1, B = "x""#,
        )
    );
}

#[test]
fn test_invalid_identifier_fails_rendering() {
    let err = render(&CreateThing::default()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidIdentifier(_)));
}

#[test]
fn test_stage_location() {
    let location = StageLocation::new(thing_stage(), "path/to/file");
    assert_eq!(location.to_sql(), r#"@"db"."schema"."stage"/path/to/file"#);

    let location = StageLocation::new(SchemaObjectIdentifier::new("db", "", "stage"), "file");
    assert_eq!(location.to_sql(), "");
}

fn thing_stage() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "schema", "stage")
}

#[test]
fn test_argument_tokenizer() {
    let parsed = parse_arguments("(DEFAULT ab NUMBER(10, 2), x FLOAT, DEFAULT FLOAT)").unwrap();
    let parsed: Vec<_> = parsed
        .iter()
        .map(|a| (a.is_default, a.name.as_str(), a.data_type.as_str()))
        .collect();

    assert_eq!(
        parsed,
        vec![
            (true, "ab", "NUMBER(10, 2)"),
            (false, "x", "FLOAT"),
            (true, "", "FLOAT"),
        ]
    );
}
