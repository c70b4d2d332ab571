mod common;

use common::{client, statements, MockConnection};
use floe_sdk::resources::git_repositories::{
    AlterGitRepositoryRequest, CreateGitRepositoryRequest, GitRepositoryAction, GitRepositorySet,
};
use floe_sdk::resources::Like;
use floe_sdk::{AccountObjectIdentifier, Row, SchemaObjectIdentifier, Value};

fn repo() -> SchemaObjectIdentifier {
    "db.sch.gr".parse().unwrap()
}

#[tokio::test]
async fn test_alter_set_full() {
    let client = client(MockConnection::new());

    client
        .git_repositories()
        .alter(&AlterGitRepositoryRequest::new(
            repo(),
            GitRepositoryAction::Set(GitRepositorySet {
                api_integration: Some(AccountObjectIdentifier::new("int")),
                git_credentials: Some("db.sch.cred".parse().unwrap()),
                comment: Some("c".to_string()),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"ALTER GIT REPOSITORY "db"."sch"."gr" SET API_INTEGRATION = "int" GIT_CREDENTIALS = "db"."sch"."cred" COMMENT = 'c'"#
        ]
    );
}

#[tokio::test]
async fn test_create_then_fetch() {
    let client = client(MockConnection::new());
    let repositories = client.git_repositories();

    repositories
        .create(
            &CreateGitRepositoryRequest::new(
                repo(),
                "https://github.com/example/repo.git",
                AccountObjectIdentifier::new("int"),
            )
            .with_if_not_exists(true),
        )
        .await
        .unwrap();
    repositories
        .alter(&AlterGitRepositoryRequest::new(repo(), GitRepositoryAction::Fetch))
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![
            r#"CREATE GIT REPOSITORY IF NOT EXISTS "db"."sch"."gr" ORIGIN = 'https://github.com/example/repo.git' API_INTEGRATION = "int""#,
            r#"ALTER GIT REPOSITORY "db"."sch"."gr" FETCH"#,
        ]
    );
}

#[tokio::test]
async fn test_show_by_id_and_branches() {
    let repository_row = Row::new()
        .with("created_on", "2024-05-01 10:00:00.000 -0700")
        .with("name", "gr")
        .with("database_name", "db")
        .with("schema_name", "sch")
        .with("origin", "https://github.com/example/repo.git")
        .with("api_integration", r#""int""#)
        .with("git_credentials", r#""db"."sch"."cred""#)
        .with("owner", "ACCOUNTADMIN")
        .with("owner_role_type", "ROLE")
        .with("comment", "")
        .with("last_fetched_at", Value::Null);
    let branch_row = Row::new()
        .with("name", "main")
        .with("path", "/branches/main")
        .with("checkouts", "")
        .with("commit_hash", "0123abcd");
    let client = client(
        MockConnection::new()
            .on("SHOW GIT REPOSITORIES", vec![repository_row])
            .on("SHOW GIT BRANCHES", vec![branch_row]),
    );

    let found = client.git_repositories().show_by_id(&repo()).await.unwrap();
    assert_eq!(found.id(), repo());
    assert_eq!(found.api_integration, Some(AccountObjectIdentifier::new("int")));
    assert_eq!(
        found.git_credentials,
        Some(SchemaObjectIdentifier::new("db", "sch", "cred"))
    );
    assert_eq!(found.comment, None);

    let branches = client
        .git_repositories()
        .show_branches(&repo(), Some(Like::new("main")))
        .await
        .unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].commit_hash, "0123abcd");
    assert_eq!(branches[0].checkouts, None);

    assert_eq!(
        statements(&client),
        vec![
            r#"SHOW GIT REPOSITORIES LIKE 'gr' IN SCHEMA "db"."sch""#,
            r#"SHOW GIT BRANCHES LIKE 'main' IN "db"."sch"."gr""#,
        ]
    );
}
