mod common;

use common::{client, compute_pool_row, statements, MockConnection};
use floe_sdk::resources::compute_pools::{
    AlterComputePoolRequest, ComputePoolAction, ComputePoolInstanceFamily, ComputePoolSet,
    ComputePoolState, CreateComputePoolRequest,
};
use floe_sdk::{AccountObjectIdentifier, Error};

fn pool() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new("cp")
}

#[tokio::test]
async fn test_create_minimal() {
    let client = client(MockConnection::new());

    client
        .compute_pools()
        .create(&CreateComputePoolRequest::new(
            pool(),
            1,
            2,
            ComputePoolInstanceFamily::CpuX64S,
        ))
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![r#"CREATE COMPUTE POOL "cp" MIN_NODES = 1 MAX_NODES = 2 INSTANCE_FAMILY = CPU_X64_S"#]
    );
}

#[tokio::test]
async fn test_invalid_create_sends_nothing() {
    let client = client(MockConnection::new());

    let err = client
        .compute_pools()
        .create(&CreateComputePoolRequest::new(
            pool(),
            3,
            2,
            ComputePoolInstanceFamily::CpuX64S,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(statements(&client).is_empty());
}

#[tokio::test]
async fn test_alter_set() {
    let client = client(MockConnection::new());

    client
        .compute_pools()
        .alter(&AlterComputePoolRequest::new(
            pool(),
            ComputePoolAction::Set(ComputePoolSet {
                max_nodes: Some(4),
                comment: Some("bigger".to_string()),
                ..Default::default()
            }),
        ))
        .await
        .unwrap();

    assert_eq!(
        statements(&client),
        vec![r#"ALTER COMPUTE POOL "cp" SET MAX_NODES = 4 COMMENT = 'bigger'"#]
    );
}

#[tokio::test]
async fn test_show_by_id_picks_exact_name() {
    let client = client(MockConnection::new().on(
        "SHOW COMPUTE POOLS",
        vec![compute_pool_row("cp_2", "IDLE"), compute_pool_row("cp", "ACTIVE")],
    ));

    let found = client.compute_pools().show_by_id(&pool()).await.unwrap();

    assert_eq!(found.id(), pool());
    assert_eq!(found.state, Some(ComputePoolState::Active));
    assert_eq!(found.instance_family, Some(ComputePoolInstanceFamily::CpuX64S));
    assert_eq!(statements(&client), vec!["SHOW COMPUTE POOLS LIKE 'cp'"]);
}

#[tokio::test]
async fn test_show_by_id_not_found() {
    let client = client(MockConnection::new());

    let err = client.compute_pools().show_by_id(&pool()).await.unwrap_err();
    assert!(err.is_object_not_found());
}

#[tokio::test]
async fn test_unknown_state_is_tolerated() {
    let client = client(MockConnection::new().on(
        "SHOW COMPUTE POOLS",
        vec![compute_pool_row("cp", "HIBERNATING")],
    ));

    let pools = client
        .compute_pools()
        .show(&Default::default())
        .await
        .unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].state, None);
}

#[tokio::test]
async fn test_describe_expects_one_row() {
    let client = client(MockConnection::new().on(
        "DESCRIBE COMPUTE POOL",
        vec![compute_pool_row("cp", "IDLE").with("error_code", "").with("status_message", "Ready")],
    ));

    let details = client.compute_pools().describe(&pool()).await.unwrap();
    assert_eq!(details.pool.name, "cp");
    assert_eq!(details.error_code, None);
    assert_eq!(details.status_message.as_deref(), Some("Ready"));
    assert_eq!(statements(&client), vec![r#"DESCRIBE COMPUTE POOL "cp""#]);

    let empty = common::client(MockConnection::new());
    let err = empty.compute_pools().describe(&pool()).await.unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound));
}

#[tokio::test]
async fn test_drop_safely_of_account_object() {
    let client = client(MockConnection::new().fail(
        "DROP COMPUTE POOL",
        "Compute pool 'CP' does not exist or not authorized.",
    ));

    // Account-level objects have no parents to probe.
    let err = client.compute_pools().drop_safely(&pool()).await.unwrap_err();
    assert!(err.is_object_not_exist_or_authorized());
    assert_eq!(
        statements(&client),
        vec![r#"DROP COMPUTE POOL IF EXISTS "cp""#]
    );
}
