mod helpers;

use futures::future::join_all;
use helpers::{make_page, DelayedMockApi};
use std::sync::Arc;
use std::time::Duration;
use votewatch_application::ports::{QueryCacheMaintenance, QueryClient};
use votewatch_domain::{DomainError, LogQuery, QueryKey, QueryKind, Severity};
use votewatch_infrastructure::query::{KeyedQueryClient, RetryPolicy};

fn make_client(
    api: Arc<DelayedMockApi>,
    timeout_ms: u64,
    retry: RetryPolicy,
) -> Arc<KeyedQueryClient> {
    Arc::new(KeyedQueryClient::new(
        api,
        Duration::from_millis(timeout_ms),
        retry,
    ))
}

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(5), Duration::from_millis(20))
        .without_jitter()
}

fn logs_key() -> QueryKey {
    QueryKey::SecurityLogs(LogQuery::default())
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    let api = Arc::new(DelayedMockApi::new(50));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());

    let futures: Vec<_> = (0..10)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.fetch(&logs_key()).await })
        })
        .collect();

    let results = join_all(futures).await;

    assert_eq!(api.call_count(), 1);
    let first = results[0].as_ref().unwrap().as_ref().unwrap();
    for result in &results {
        let data = result.as_ref().unwrap().as_ref().unwrap();
        assert!(Arc::ptr_eq(first, data));
    }
    assert_eq!(client.inflight_count(), 0);
}

#[tokio::test]
async fn test_distinct_keys_are_not_coalesced() {
    let api = Arc::new(DelayedMockApi::new(30));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());

    let filtered = QueryKey::SecurityLogs(LogQuery {
        severity: Some(Severity::High),
        ..LogQuery::default()
    });

    let key = logs_key();
    let (a, b) = tokio::join!(client.fetch(&key), client.fetch(&filtered));
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_followers_receive_leader_error() {
    let api = Arc::new(DelayedMockApi::new(40).failing_with(vec![DomainError::Server {
        status: 403,
        message: Some("Forbidden".into()),
    }]));
    let client = make_client(Arc::clone(&api), 1_000, fast_retry(3));

    let key = logs_key();
    let results = join_all((0..5).map(|_| client.fetch(&key))).await;

    assert_eq!(api.call_count(), 1, "4xx errors are not retried");
    for result in results {
        assert_eq!(
            result.unwrap_err(),
            DomainError::Server {
                status: 403,
                message: Some("Forbidden".into())
            }
        );
    }
    assert!(client.peek(&logs_key()).is_none());
}

#[tokio::test]
async fn test_retryable_errors_are_retried_until_success() {
    let api = Arc::new(DelayedMockApi::new(1).failing_with(vec![
        DomainError::Network("connection reset".into()),
        DomainError::Server {
            status: 502,
            message: None,
        },
    ]));
    let client = make_client(Arc::clone(&api), 1_000, fast_retry(3));

    let result = client.fetch(&logs_key()).await;

    assert!(result.is_ok());
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_retry_is_bounded() {
    let api = Arc::new(DelayedMockApi::new(1).failing_with(vec![
        DomainError::Network("down".into()),
        DomainError::Network("down".into()),
        DomainError::Network("down".into()),
        DomainError::Network("down".into()),
    ]));
    let client = make_client(Arc::clone(&api), 1_000, fast_retry(3));

    let result = client.fetch(&logs_key()).await;

    assert_eq!(result.unwrap_err(), DomainError::Network("down".into()));
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let api = Arc::new(DelayedMockApi::new(200));
    let client = make_client(Arc::clone(&api), 20, RetryPolicy::none());

    let result = client.fetch(&logs_key()).await;

    assert_eq!(result.unwrap_err(), DomainError::Timeout(20));
    assert_eq!(client.inflight_count(), 0);
}

#[tokio::test]
async fn test_unchanged_payload_keeps_shared_allocation() {
    let api = Arc::new(DelayedMockApi::new(1));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());

    let first = client.fetch(&logs_key()).await.unwrap();
    let second = client.fetch(&logs_key()).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    api.set_page(make_page(1, false));
    let third = client.fetch(&logs_key()).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_invalidation_marks_stale_and_notifies() {
    let api = Arc::new(DelayedMockApi::new(1));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());
    let mut rx = client.subscribe_invalidations();

    client.fetch(&logs_key()).await.unwrap();
    client.fetch(&QueryKey::BlockedIps).await.unwrap();
    assert!(!client.is_stale(&logs_key()));

    let affected = client.invalidate(&[QueryKind::BlockedIps]);

    assert_eq!(affected, 1);
    assert!(client.is_stale(&QueryKey::BlockedIps));
    assert!(!client.is_stale(&logs_key()));
    assert_eq!(rx.recv().await.unwrap(), QueryKind::BlockedIps);
    // Stale entries stay readable until refetched.
    assert!(client.peek(&QueryKey::BlockedIps).is_some());
}

#[tokio::test]
async fn test_garbage_collection_drops_unused_entries() {
    let api = Arc::new(DelayedMockApi::new(1));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());

    client.fetch(&logs_key()).await.unwrap();
    client.fetch(&QueryKey::ThreatAlerts).await.unwrap();
    assert_eq!(client.len(), 2);

    tokio::time::sleep(Duration::from_millis(60)).await;
    client.peek(&logs_key());

    let removed = client.collect_garbage(Duration::from_millis(40));

    assert_eq!(removed, 1);
    assert!(client.peek(&logs_key()).is_some());
    assert!(client.peek(&QueryKey::ThreatAlerts).is_none());
}

#[tokio::test]
async fn test_cancelled_leader_hands_over_to_follower() {
    let api = Arc::new(DelayedMockApi::new(80));
    let client = make_client(Arc::clone(&api), 1_000, RetryPolicy::none());

    let leader = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.fetch(&logs_key()).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let follower = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.fetch(&logs_key()).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    leader.abort();

    let result = follower.await.unwrap();
    assert!(result.is_ok());
    assert_eq!(api.call_count(), 2);
}
