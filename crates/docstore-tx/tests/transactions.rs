//! Transactional write visibility through a managed session.

mod common;

use serde_json::json;

use docstore_tx::{SessionOptions, TransactionOptions};

use common::fixtures::create_manager;

#[tokio::test]
async fn aborted_writes_are_not_observed() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();

    {
        let session = manager.session_mut().unwrap().driver_mut();
        session.insert("orders/1", json!({"total": 42})).unwrap();
        assert_eq!(
            session.find("orders/1").unwrap(),
            Some(json!({"total": 42}))
        );
    }

    manager.abort_transaction().await.unwrap();

    // Neither the store nor a post-abort read through the session observes
    // the rolled-back write.
    assert_eq!(manager.driver().find("orders/1"), None);
    let session = manager.session_mut().unwrap().driver_mut();
    assert_eq!(session.find("orders/1").unwrap(), None);
}

#[tokio::test]
async fn committed_writes_become_visible() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();

    {
        let session = manager.session_mut().unwrap().driver_mut();
        session.insert("orders/1", json!({"total": 42})).unwrap();
        session.insert("orders/2", json!({"total": 7})).unwrap();

        // Staged writes are invisible outside the transaction until commit.
        assert_eq!(manager.driver().find("orders/1"), None);
    }

    manager.commit_transaction().await.unwrap();

    assert_eq!(
        manager.driver().find("orders/1"),
        Some(json!({"total": 42}))
    );
    assert_eq!(manager.driver().find("orders/2"), Some(json!({"total": 7})));
}

#[tokio::test]
async fn transaction_reads_are_snapshot_isolated() {
    let mut manager = create_manager();
    manager.driver().insert("inventory/widget", json!({"count": 3}));

    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();

    // A write committed outside the transaction after it began...
    manager.driver().insert("inventory/widget", json!({"count": 99}));

    // ...is not visible inside it.
    let session = manager.session_mut().unwrap().driver_mut();
    assert_eq!(
        session.find("inventory/widget").unwrap(),
        Some(json!({"count": 3}))
    );
}

#[tokio::test]
async fn writes_outside_a_transaction_are_immediate() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();

    let session = manager.session_mut().unwrap().driver_mut();
    session.insert("users/ada", json!({"name": "Ada"})).unwrap();

    assert_eq!(
        manager.driver().find("users/ada"),
        Some(json!({"name": "Ada"}))
    );
}
