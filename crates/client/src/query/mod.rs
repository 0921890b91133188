//! Query/mutation layer.
//!
//! [`QueryClient`] owns one `moka` cache shared by every read hook:
//! - [`QueryClient::fetch`] serves a cached result, or runs the fetcher once
//!   for all concurrent callers of the same [`QueryKey`]. Failures are handed
//!   to every waiter and never cached.
//! - [`QueryClient::mutate`] runs a write and, only if it succeeds, marks every
//!   entry of the related resources stale so the next read refetches.
//!
//! Entries expire after the configured TTL. Every invalidation bumps a
//! generation counter; a fetch that was in flight across an invalidation
//! hands its result to its callers but does not leave it in the cache.

mod cache;
mod key;
mod state;

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use moka::future::Cache;
use tracing::{debug, instrument, warn};

pub use cache::{CacheValue, Cacheable};
pub use key::{KeyValue, QueryKey, Resource};
pub use state::QueryState;

use crate::config::CacheConfig;
use crate::error::{ApiError, QueryError, QueryResult};

/// Shared query cache. Cheap to clone.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<QueryClientInner>,
}

struct QueryClientInner {
    cache: Cache<QueryKey, CacheValue>,
    generations: Generations,
}

/// Invalidation counters. Both only grow, so their sum changes whenever
/// either does.
#[derive(Default)]
struct Generations {
    all: AtomicU64,
    resources: Mutex<HashMap<Resource, u64>>,
}

impl Generations {
    fn resources(&self) -> std::sync::MutexGuard<'_, HashMap<Resource, u64>> {
        self.resources.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self, resource: Resource) -> u64 {
        let own = self.resources().get(&resource).copied().unwrap_or_default();
        self.all.load(Ordering::SeqCst).wrapping_add(own)
    }

    fn bump(&self, resources: &[Resource]) {
        let mut counters = self.resources();
        for resource in resources {
            *counters.entry(*resource).or_default() += 1;
        }
    }

    fn bump_all(&self) {
        self.all.fetch_add(1, Ordering::SeqCst);
    }
}

impl QueryClient {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.time_to_live)
            .support_invalidation_closures()
            .build();

        Self {
            inner: Arc::new(QueryClientInner {
                cache,
                generations: Generations::default(),
            }),
        }
    }

    /// Get the result for `key`, fetching it on a miss.
    ///
    /// Concurrent callers with an equal key share one in-flight fetch. If the
    /// caller driving it is dropped, a remaining waiter takes over.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, or [`QueryError::TypeMismatch`] if the
    /// entry under `key` holds another type.
    #[instrument(skip(self, fetcher), fields(key = %key))]
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryResult<Arc<T>>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(value) = self.inner.cache.get(&key).await {
            debug!("Cache hit");
            return T::from_cache(value).ok_or_else(|| QueryError::TypeMismatch(key.to_string()));
        }

        debug!("Cache miss");
        let started = self.inner.generations.current(key.resource);
        let value = self
            .inner
            .cache
            .try_get_with(key.clone(), async move {
                fetcher().await.map(|data| T::into_cache(Arc::new(data)))
            })
            .await?;

        if self.inner.generations.current(key.resource) != started {
            // Invalidated while in flight: serve it once, refetch next time
            debug!("Dropping result fetched across an invalidation");
            self.inner.cache.invalidate(&key).await;
        }

        T::from_cache(value).ok_or_else(|| QueryError::TypeMismatch(key.to_string()))
    }

    /// The cached result for `key`, if present and not stale.
    pub async fn cached<T: Cacheable>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.inner.cache.get(key).await.and_then(T::from_cache)
    }

    /// Run a write, then invalidate `invalidates` if it succeeded.
    ///
    /// # Errors
    ///
    /// Returns the mutation's error. Nothing is invalidated in that case.
    pub async fn mutate<T, Fut>(&self, mutation: Fut, invalidates: &[Resource]) -> QueryResult<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let output = mutation.await?;
        self.invalidate_resources(invalidates);
        Ok(output)
    }

    /// Mark every entry of `resource` stale.
    pub fn invalidate(&self, resource: Resource) {
        self.invalidate_resources(&[resource]);
    }

    /// Drop every entry, e.g. when the signed-in user changes.
    pub fn invalidate_all(&self) {
        debug!("Invalidating all cached queries");
        self.inner.generations.bump_all();
        self.inner.cache.invalidate_all();
    }

    fn invalidate_resources(&self, resources: &[Resource]) {
        if resources.is_empty() {
            return;
        }
        debug!(?resources, "Invalidating cached queries");
        self.inner.generations.bump(resources);

        let targets = resources.to_vec();
        if let Err(e) = self
            .inner
            .cache
            .invalidate_entries_if(move |key, _| targets.contains(&key.resource))
        {
            warn!(error = %e, "Selective invalidation failed, clearing the whole cache");
            self.inner.cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.inner.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use edumall_core::DataResponse;
    use edumall_core::schema::notification::Notification;
    use edumall_core::schema::shipping::ShippingAddress;

    use super::*;

    type Notifications = DataResponse<Vec<Notification>>;

    fn client() -> QueryClient {
        QueryClient::new(&CacheConfig::default())
    }

    fn notifications(read: &[bool]) -> Notifications {
        DataResponse {
            data: read
                .iter()
                .enumerate()
                .map(|(i, is_read)| Notification {
                    id: format!("n{i}").into(),
                    title: "Khuyến mãi".to_string(),
                    content: "Giảm 50%".to_string(),
                    is_read: *is_read,
                    created_at: "2024-05-01T08:00:00Z".to_string(),
                })
                .collect(),
            message: None,
        }
    }

    fn key() -> QueryKey {
        QueryKey::new(Resource::Notifications)
    }

    async fn counted(calls: &AtomicUsize, read: &[bool]) -> Result<Notifications, ApiError> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(notifications(read))
    }

    #[tokio::test]
    async fn test_concurrent_fetches_are_coalesced() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let (a, b) = tokio::join!(
            client.fetch(key(), || counted(&calls, &[false])),
            client.fetch(key(), || counted(&calls, &[false])),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetcher() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let first: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[true])).await.unwrap();
        let second: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[true])).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let page_one = QueryKey::new(Resource::Notifications).with("page_index", 1_u32);
        let page_two = QueryKey::new(Resource::Notifications).with("page_index", 2_u32);
        let (a, b) = tokio::join!(
            client.fetch(page_one, || counted(&calls, &[false])),
            client.fetch(page_two, || counted(&calls, &[true])),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_errors_reach_every_waiter_and_are_not_cached() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let failing = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err::<Notifications, _>(ApiError::Status {
                status: 503,
                body: "maintenance".to_string(),
            })
        };
        let (a, b) = tokio::join!(client.fetch(key(), failing), client.fetch(key(), failing));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap_err().api().and_then(ApiError::status), Some(503));
        assert_eq!(b.unwrap_err().api().and_then(ApiError::status), Some(503));

        let ok: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[])).await.unwrap();
        assert!(ok.data.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_successful_mutation_invalidates_related_resource() {
        let client = client();
        let calls = AtomicUsize::new(0);
        let _: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[false])).await.unwrap();

        let out = client
            .mutate(async { Ok::<_, ApiError>("done") }, &[Resource::Notifications])
            .await
            .unwrap();
        assert_eq!(out, "done");
        assert!(client.cached::<Notifications>(&key()).await.is_none());

        let _: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[true])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let client = client();
        let calls = AtomicUsize::new(0);
        let _: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[false])).await.unwrap();

        let err = client
            .mutate(
                async {
                    Err::<(), _>(ApiError::Status {
                        status: 400,
                        body: String::new(),
                    })
                },
                &[Resource::Notifications],
            )
            .await
            .unwrap_err();
        assert_eq!(err.api().and_then(ApiError::status), Some(400));
        assert!(client.cached::<Notifications>(&key()).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidation_only_touches_named_resources() {
        let client = client();
        let calls = AtomicUsize::new(0);
        let _: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[false])).await.unwrap();

        client.invalidate(Resource::Cart);
        assert!(client.cached::<Notifications>(&key()).await.is_some());

        client.invalidate_all();
        assert!(client.cached::<Notifications>(&key()).await.is_none());
    }

    async fn slow(calls: &AtomicUsize, read: &[bool]) -> Result<Notifications, ApiError> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(notifications(read))
    }

    #[tokio::test]
    async fn test_mutation_during_fetch_forces_refetch() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let (in_flight, ()) = tokio::join!(client.fetch(key(), || slow(&calls, &[false])), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            client
                .mutate(async { Ok::<_, ApiError>(()) }, &[Resource::Notifications])
                .await
                .unwrap();
        });
        let in_flight: Arc<Notifications> = in_flight.unwrap();
        assert_eq!(in_flight.data.len(), 1);
        assert!(client.cached::<Notifications>(&key()).await.is_none());

        let next: Arc<Notifications> = client
            .fetch(key(), || counted(&calls, &[false, true]))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(next.data.len(), 2);
    }

    #[tokio::test]
    async fn test_clearing_during_fetch_forces_refetch() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let (in_flight, ()) = tokio::join!(client.fetch(key(), || slow(&calls, &[false])), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            client.invalidate_all();
        });
        let _: Arc<Notifications> = in_flight.unwrap();
        assert!(client.cached::<Notifications>(&key()).await.is_none());
    }

    #[tokio::test]
    async fn test_unrelated_invalidation_keeps_in_flight_result() {
        let client = client();
        let calls = AtomicUsize::new(0);

        let (in_flight, ()) = tokio::join!(client.fetch(key(), || slow(&calls, &[false])), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            client.invalidate(Resource::Cart);
        });
        let in_flight: Arc<Notifications> = in_flight.unwrap();
        let cached = client.cached::<Notifications>(&key()).await.unwrap();
        assert!(Arc::ptr_eq(&in_flight, &cached));
    }

    #[tokio::test]
    async fn test_type_mismatch_is_reported() {
        let client = client();
        let calls = AtomicUsize::new(0);
        let _: Arc<Notifications> = client.fetch(key(), || counted(&calls, &[false])).await.unwrap();

        let err = client
            .fetch(key(), || async {
                Ok::<DataResponse<Vec<ShippingAddress>>, ApiError>(DataResponse {
                    data: Vec::new(),
                    message: None,
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch(k) if k == "notifications"));
    }
}
