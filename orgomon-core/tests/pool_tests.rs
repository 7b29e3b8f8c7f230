// File: orgomon-core/tests/pool_tests.rs

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use orgomon_core::models::AccountDescriptor;
use orgomon_core::test_utils::fakes::FakeConnector;
use orgomon_core::{ConnectionPool, Error};

#[tokio::test]
async fn sequential_acquires_create_one_session() -> Result<(), Error> {
    let connector = Arc::new(FakeConnector::new());
    let pool = ConnectionPool::new(connector.clone());
    let account = AccountDescriptor::new(3, "key", "computer-3");

    let a = pool.acquire(&account).await?;
    let b = pool.acquire(&account).await?;

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(connector.connect_count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_acquires_for_same_computer_share_one_connect() -> Result<(), Error> {
    let connector = Arc::new(FakeConnector::new().with_connect_delay(Duration::from_millis(50)));
    let pool = Arc::new(ConnectionPool::new(connector.clone()));
    let account = AccountDescriptor::new(1, "key", "shared-computer");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let account = account.clone();
            tokio::spawn(async move { pool.acquire(&account).await })
        })
        .collect();

    let sessions: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect::<Result<_, _>>()?;

    assert_eq!(connector.connect_count(), 1);
    assert!(sessions.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_computers_connect_independently() -> Result<(), Error> {
    let connector = Arc::new(FakeConnector::new().with_connect_delay(Duration::from_millis(100)));
    let pool = Arc::new(ConnectionPool::new(connector.clone()));

    let started = tokio::time::Instant::now();
    let handles: Vec<_> = (0..5u32)
        .map(|i| {
            let pool = Arc::clone(&pool);
            let account = AccountDescriptor::new(i, "key", format!("computer-{i}"));
            tokio::spawn(async move { pool.acquire(&account).await.map(|_| ()) })
        })
        .collect();
    for joined in join_all(handles).await {
        joined.expect("task panicked")?;
    }

    assert_eq!(connector.connect_count(), 5);
    assert_eq!(pool.len(), 5);
    // Five serialized connects would take at least 500ms.
    assert!(started.elapsed() < Duration::from_millis(450));
    Ok(())
}

#[tokio::test]
async fn refused_connect_surfaces_error_and_is_not_cached() {
    let connector = Arc::new(FakeConnector::new().refusing("bad"));
    let pool = ConnectionPool::new(connector.clone());
    let account = AccountDescriptor::new(9, "key", "bad");

    assert!(matches!(pool.acquire(&account).await, Err(Error::Auth(_))));
    assert!(pool.acquire(&account).await.is_err());
    assert_eq!(connector.connect_count(), 2);
    assert!(pool.is_empty());
}
