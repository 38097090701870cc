//! Session and transaction state machine tests.

mod common;

use docstore_tx::{DriverError, SessionError, SessionOptions, TransactionOptions};

use common::fixtures::create_manager;

#[tokio::test]
async fn double_start_session_fails_and_keeps_original() {
    let mut manager = create_manager();
    let original = manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();

    let err = manager
        .start_session(SessionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::AlreadyStarted));

    // The first session is still held, untouched.
    assert_eq!(manager.session().unwrap().id(), &original);
}

#[tokio::test]
async fn end_session_without_start_fails() {
    let mut manager = create_manager();

    let err = manager.end_session().await.unwrap_err();
    assert!(matches!(err, SessionError::NoSession));
    assert!(manager.session().is_none());
}

#[tokio::test]
async fn transaction_opens_and_closes_on_the_same_handle() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();

    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();
    assert!(manager.session().unwrap().in_transaction());

    manager.commit_transaction().await.unwrap();
    assert!(!manager.session().unwrap().in_transaction());

    // The same session can open another transaction.
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();
    assert!(manager.in_transaction());
    manager.abort_transaction().await.unwrap();
    assert!(!manager.in_transaction());
}

#[tokio::test]
async fn full_lifecycle_ends_with_no_session() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();
    manager.commit_transaction().await.unwrap();
    manager.end_session().await.unwrap();

    assert!(manager.session().is_none());
    assert!(!manager.in_transaction());
}

#[tokio::test]
async fn transaction_calls_without_session_fail() {
    let mut manager = create_manager();

    let err = manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NoActiveSession));

    let err = manager.commit_transaction().await.unwrap_err();
    assert!(matches!(err, SessionError::NoActiveSession));

    let err = manager.abort_transaction().await.unwrap_err();
    assert!(matches!(err, SessionError::NoActiveSession));
}

#[tokio::test]
async fn end_session_with_open_transaction_fails_fast() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();

    let err = manager.end_session().await.unwrap_err();
    assert!(matches!(err, SessionError::TransactionOpen));

    // Session and transaction are still usable after the refusal.
    assert!(manager.in_transaction());
    manager.abort_transaction().await.unwrap();
    manager.end_session().await.unwrap();
    assert!(manager.session().is_none());
}

#[tokio::test]
async fn second_start_transaction_surfaces_driver_error() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap();

    let err = manager
        .start_transaction(TransactionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Driver(DriverError::TransactionInProgress)
    ));

    // The original transaction is unaffected.
    assert!(manager.in_transaction());
}

#[tokio::test]
async fn commit_without_open_transaction_surfaces_driver_error() {
    let mut manager = create_manager();
    manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();

    let err = manager.commit_transaction().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Driver(DriverError::NoTransaction)
    ));
}

#[tokio::test]
async fn session_restarts_after_end() {
    let mut manager = create_manager();
    let first = manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    manager.end_session().await.unwrap();

    // A fresh session can be started once the previous one ended.
    let second = manager
        .start_session(SessionOptions::default())
        .await
        .unwrap();
    assert_ne!(first, second);
}
