//! Alias-to-token resolution cache.
//!
//! Checks are addressed by opaque tokens, but people name them with aliases.
//! [`AliasCache`] remembers the alias → token mapping learned from the last
//! full check listing so repeated lookups of the same alias do not refetch
//! every check.
//!
//! The cache is filled wholesale: every refill discards the previous mapping
//! and rebuilds it from the fetched records in order, so when two checks share
//! an alias the later record wins. Entries never expire.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;
use tokio::sync::Mutex;

/// A fetched record that carries an alias and the token it names.
pub trait AliasedRecord {
    /// The human-readable alias. Checks without one use `""`.
    fn alias(&self) -> &str;

    /// The opaque token assigned by updown.
    fn token(&self) -> &str;
}

impl<T: AliasedRecord + ?Sized> AliasedRecord for &T {
    fn alias(&self) -> &str {
        (**self).alias()
    }

    fn token(&self) -> &str {
        (**self).token()
    }
}

impl AliasedRecord for (String, String) {
    fn alias(&self) -> &str {
        &self.0
    }

    fn token(&self) -> &str {
        &self.1
    }
}

impl<'a> AliasedRecord for (&'a str, &'a str) {
    fn alias(&self) -> &str {
        self.0
    }

    fn token(&self) -> &str {
        self.1
    }
}

/// Why an alias could not be resolved.
///
/// A successful resolution is the `Ok(token)` side of the result, so the
/// three outcomes (found, absent, could not check) stay distinct.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The alias is absent from the freshly rebuilt mapping.
    #[error("no check found with alias '{alias}'")]
    NotFound { alias: String },

    /// The refill fetch failed; the cause is passed through untouched.
    #[error(transparent)]
    FetchFailed(E),
}

impl<E> ResolveError<E> {
    /// Returns true if the alias was genuinely absent remotely.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Lazily populated alias → token table.
///
/// The whole check → fetch → rebuild → re-check sequence runs under one async
/// lock, so concurrent misses wait for a single in-flight fetch instead of
/// each issuing their own.
#[derive(Debug, Default)]
pub struct AliasCache {
    // `None` until the first successful fill.
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl AliasCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `alias` to a token, calling `fetch` at most once on a miss.
    ///
    /// On a hit no I/O happens. On a miss `fetch` is awaited once; a failure
    /// is returned as [`ResolveError::FetchFailed`] and leaves the current
    /// mapping untouched. A successful fetch replaces the mapping, after which
    /// the alias is looked up again and [`ResolveError::NotFound`] is returned
    /// if it is still absent.
    #[tracing::instrument(level = "debug", skip(self, fetch))]
    pub async fn resolve<F, Fut, I, E>(
        &self,
        alias: &str,
        fetch: F,
    ) -> core::result::Result<String, ResolveError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = core::result::Result<I, E>>,
        I: IntoIterator,
        I::Item: AliasedRecord,
    {
        let mut entries = self.entries.lock().await;

        if let Some(token) = entries.as_ref().and_then(|map| map.get(alias)) {
            tracing::debug!("alias cache hit");
            return Ok(token.clone());
        }

        tracing::debug!("alias cache miss, refilling");
        let records = fetch().await.map_err(ResolveError::FetchFailed)?;
        let rebuilt = entries.insert(build_mapping(records));
        tracing::debug!(entries = rebuilt.len(), "alias cache refilled");

        rebuilt
            .get(alias)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                alias: alias.to_string(),
            })
    }

    /// Replace the mapping with the given records.
    ///
    /// Used by the check listing so any full listing refreshes the cache.
    /// The listing is fetched outside the lock, so it is not ordered against a
    /// concurrent [`resolve`](Self::resolve) refill: whichever finishes last
    /// wins, even if its data is older.
    pub async fn replace<I>(&self, records: I)
    where
        I: IntoIterator,
        I::Item: AliasedRecord,
    {
        let mapping = build_mapping(records);
        tracing::debug!(entries = mapping.len(), "alias cache replaced");
        *self.entries.lock().await = Some(mapping);
    }

    /// Look up an alias without ever fetching.
    pub async fn peek(&self, alias: &str) -> Option<String> {
        self.entries
            .lock()
            .await
            .as_ref()
            .and_then(|map| map.get(alias).cloned())
    }

    /// Whether at least one fill has succeeded.
    pub async fn is_populated(&self) -> bool {
        self.entries.lock().await.is_some()
    }

    /// Number of cached aliases.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.as_ref().map_or(0, HashMap::len)
    }

    /// Returns true if no alias is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn build_mapping<I>(records: I) -> HashMap<String, String>
where
    I: IntoIterator,
    I::Item: AliasedRecord,
{
    let mut mapping = HashMap::new();
    for record in records {
        mapping.insert(record.alias().to_string(), record.token().to_string());
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Debug, Error, PartialEq)]
    #[error("connection reset")]
    struct TransportError;

    fn records(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, t)| (a.to_string(), t.to_string()))
            .collect()
    }

    /// A fetch closure that counts invocations and returns fixed records.
    fn counting_fetch(
        calls: &AtomicUsize,
        data: Vec<(String, String)>,
    ) -> impl FnOnce() -> std::future::Ready<Result<Vec<(String, String)>, TransportError>> + '_
    {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(data))
        }
    }

    #[tokio::test]
    async fn test_cold_cache_absent_alias_fetches_once() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        let result = cache
            .resolve("Z", counting_fetch(&calls, records(&[("A", "t1")])))
            .await;

        let err = assert_err!(result);
        assert!(err.is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // The miss still leaves current data behind for other aliases.
        assert!(cache.is_populated().await);
        assert_eq!(cache.peek("A").await.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_cold_cache_present_alias() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        let token = cache
            .resolve("A", counting_fetch(&calls, records(&[("A", "t1")])))
            .await;

        assert_eq!(assert_ok!(token), "t1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_warm_cache_does_not_fetch() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .resolve("A", counting_fetch(&calls, records(&[("A", "t1")])))
            .await
            .unwrap();
        let token = cache
            .resolve("A", counting_fetch(&calls, records(&[("A", "other")])))
            .await
            .unwrap();

        assert_eq!(token, "t1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_instead_of_merging() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .resolve("A", counting_fetch(&calls, records(&[("A", "t1")])))
            .await
            .unwrap();
        let token = cache
            .resolve("B", counting_fetch(&calls, records(&[("B", "t2")])))
            .await
            .unwrap();
        assert_eq!(token, "t2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // "A" was dropped by the rebuild, so resolving it fetches again.
        assert_eq!(cache.peek("A").await, None);
        let result = cache
            .resolve("A", counting_fetch(&calls, records(&[("B", "t2")])))
            .await;
        assert!(assert_err!(result).is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_replace_after_refill_overwrites_wholesale() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .resolve("B", counting_fetch(&calls, records(&[("A", "t1"), ("B", "t2")])))
            .await
            .unwrap();

        // A listing that started before the refill lands after it.
        cache.replace(records(&[("A", "t1")])).await;

        assert_eq!(cache.peek("B").await, None);
        assert_eq!(cache.peek("A").await.as_deref(), Some("t1"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_keeps_contents() {
        let cache = AliasCache::new();
        cache.replace(records(&[("A", "t1")])).await;

        let result = cache
            .resolve("B", || async { Err::<Vec<(String, String)>, _>(TransportError) })
            .await;

        match result {
            Err(ResolveError::FetchFailed(e)) => assert_eq!(e, TransportError),
            other => panic!("expected fetch failure, got {other:?}"),
        }
        assert_eq!(cache.peek("A").await.as_deref(), Some("t1"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_on_cold_cache_stays_empty() {
        let cache = AliasCache::new();

        let result = cache
            .resolve("A", || async { Err::<Vec<(String, String)>, _>(TransportError) })
            .await;

        assert!(!assert_err!(result).is_not_found());
        assert!(!cache.is_populated().await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_alias_last_write_wins() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        let token = cache
            .resolve(
                "A",
                counting_fetch(&calls, records(&[("A", "t1"), ("A", "t2")])),
            )
            .await
            .unwrap();

        assert_eq!(token, "t2");
    }

    #[tokio::test]
    async fn test_empty_alias_is_looked_up_literally() {
        let cache = AliasCache::new();
        let calls = AtomicUsize::new(0);

        let token = cache
            .resolve("", counting_fetch(&calls, records(&[("", "t0"), (" ", "t1")])))
            .await
            .unwrap();
        assert_eq!(token, "t0");

        let token = cache
            .resolve(" ", counting_fetch(&calls, records(&[])))
            .await
            .unwrap();
        assert_eq!(token, "t1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_aliases_are_case_sensitive() {
        let cache = AliasCache::new();
        cache.replace([("Web", "t1")]).await;

        assert_eq!(cache.peek("Web").await.as_deref(), Some("t1"));
        assert_eq!(cache.peek("web").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let cache = Arc::new(AliasCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .resolve("A", || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                        Ok::<_, TransportError>(vec![("A".to_string(), "t1".to_string())])
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "t1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
