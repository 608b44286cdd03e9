use async_trait::async_trait;
use shrtn_core::error::StorageError;
use shrtn_core::repository::{Mapping, MappingId, Repository, Result};
use shrtn_core::ShortCode;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A repository decorator that bounds every call with a deadline.
///
/// A call that does not finish within `timeout` is dropped and reported as
/// [`StorageError::Timeout`].
#[derive(Debug, Clone)]
pub struct TimeoutRepository<R> {
    inner: R,
    timeout: Duration,
}

impl<R: Repository> TimeoutRepository<R> {
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(&self, op: &'static str, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "storage call timed out");
                Err(StorageError::Timeout(format!(
                    "{op} did not complete within {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl<R: Repository> Repository for TimeoutRepository<R> {
    async fn put(&self, mapping: Mapping) -> Result<MappingId> {
        self.bounded("put", self.inner.put(mapping)).await
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<Mapping>> {
        self.bounded("query_recent", self.inner.query_recent(limit))
            .await
    }

    async fn query_by_code(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        self.bounded("query_by_code", self.inner.query_by_code(code))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;

    /// A repository whose every call hangs for a long time.
    struct StalledRepository;

    #[async_trait]
    impl Repository for StalledRepository {
        async fn put(&self, _mapping: Mapping) -> Result<MappingId> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(1)
        }

        async fn query_recent(&self, _limit: usize) -> Result<Vec<Mapping>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![])
        }

        async fn query_by_code(&self, _code: &ShortCode) -> Result<Option<Mapping>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(None)
        }
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn passes_through_fast_calls() {
        let repo = TimeoutRepository::new(InMemoryRepository::new(), Duration::from_secs(5));

        repo.put(Mapping::new("https://example.com", code("abcdef")))
            .await
            .unwrap();

        let found = repo.query_by_code(&code("abcdef")).await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://example.com");
        assert_eq!(repo.query_recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stalled_calls_time_out() {
        let repo = TimeoutRepository::new(StalledRepository, Duration::from_millis(20));

        let err = repo
            .put(Mapping::new("https://example.com", code("abcdef")))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Timeout(_)));

        let err = repo.query_recent(10).await.unwrap_err();
        assert!(matches!(err, StorageError::Timeout(_)));

        let err = repo.query_by_code(&code("abcdef")).await.unwrap_err();
        assert!(matches!(err, StorageError::Timeout(_)));
    }
}
