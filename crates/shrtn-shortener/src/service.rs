use crate::normalize::UrlPolicy;
use async_trait::async_trait;
use shrtn_core::{Mapping, Repository, ShortCode, Shortener, ShortenerError};
use shrtn_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL normalization under the configured [`UrlPolicy`]
/// - Short code generation
/// - Persisting the resulting mapping
///
/// Generated codes are not checked against existing mappings before being
/// written. A collision leaves two mappings with the same code and lookups
/// resolve to the newer one.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    policy: UrlPolicy,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a service using the strict URL policy.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_policy(repository, generator, UrlPolicy::Strict)
    }

    pub fn with_policy(repository: R, generator: G, policy: UrlPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            policy,
        }
    }

    pub fn policy(&self) -> UrlPolicy {
        self.policy
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, long_url: &str) -> Result<Mapping, ShortenerError> {
        let long_url = self.policy.normalize(long_url)?;
        let short_code = self.generator.generate()?;
        let mapping = Mapping::new(long_url, short_code);

        let id = self.repository.put(mapping.clone()).await?;
        debug!(id, code = %mapping.short_code, url = %mapping.long_url, "created mapping");

        Ok(mapping)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<Mapping>, ShortenerError> {
        trace!(code = %code, "resolving short code");
        Ok(self.repository.query_by_code(code).await?)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Mapping>, ShortenerError> {
        Ok(self.repository.query_recent(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrtn_core::{GeneratorError, MappingId, StorageError};
    use shrtn_generator::{RandomAlphaGenerator, SeqGenerator};
    use shrtn_storage::InMemoryRepository;

    fn test_service() -> ShortenerService<InMemoryRepository, SeqGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("sh"))
    }

    struct UnavailableRepository;

    #[async_trait]
    impl Repository for UnavailableRepository {
        async fn put(&self, _mapping: Mapping) -> shrtn_core::repository::Result<MappingId> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn query_recent(&self, _limit: usize) -> shrtn_core::repository::Result<Vec<Mapping>> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn query_by_code(
            &self,
            _code: &ShortCode,
        ) -> shrtn_core::repository::Result<Option<Mapping>> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    struct ExhaustedGenerator;

    impl Generator for ExhaustedGenerator {
        fn generate(&self) -> Result<ShortCode, GeneratorError> {
            Err(GeneratorError::Entropy("no entropy".to_string()))
        }
    }

    #[tokio::test]
    async fn shorten_then_resolve() {
        let service = test_service();

        let mapping = service.shorten("https://example.com/page").await.unwrap();
        assert_eq!(mapping.short_code.as_str(), "sh000000");

        let resolved = service.resolve(&mapping.short_code).await.unwrap().unwrap();
        assert_eq!(resolved.long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn shorten_with_random_generator() {
        let service = ShortenerService::new(InMemoryRepository::new(), RandomAlphaGenerator::new());

        let mapping = service.shorten("https://example.com").await.unwrap();
        assert_eq!(mapping.short_code.as_str().len(), 6);

        let resolved = service.resolve(&mapping.short_code).await.unwrap().unwrap();
        assert_eq!(resolved, mapping);
    }

    #[tokio::test]
    async fn strict_policy_rejects_invalid_url() {
        let service = test_service();

        let err = service.shorten("not a url").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        assert!(service.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lenient_policy_stores_prefixed_url() {
        let service = ShortenerService::with_policy(
            InMemoryRepository::new(),
            SeqGenerator::with_prefix("sh"),
            UrlPolicy::Lenient,
        );

        let mapping = service.shorten("not a url").await.unwrap();
        assert_eq!(mapping.long_url, "http://not a url");
        assert_eq!(service.policy(), UrlPolicy::Lenient);
    }

    #[tokio::test]
    async fn resolve_nonexistent_code() {
        let service = test_service();

        let resolved = service.resolve(&ShortCode::new_unchecked("missing")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn recent_lists_newest_first() {
        let service = test_service();

        for i in 0..3 {
            service.shorten(&format!("https://example{i}.com")).await.unwrap();
        }

        let recent = service.recent(10).await.unwrap();
        let codes: Vec<&str> = recent.iter().map(|m| m.short_code.as_str()).collect();
        assert_eq!(codes, vec!["sh000002", "sh000001", "sh000000"]);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let service = ShortenerService::new(UnavailableRepository, SeqGenerator::with_prefix("sh"));

        assert!(matches!(
            service.shorten("https://example.com").await.unwrap_err(),
            ShortenerError::Storage(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            service.recent(10).await.unwrap_err(),
            ShortenerError::Storage(_)
        ));
        assert!(matches!(
            service.resolve(&ShortCode::new_unchecked("abc")).await.unwrap_err(),
            ShortenerError::Storage(_)
        ));
    }

    #[tokio::test]
    async fn generator_errors_propagate() {
        let service = ShortenerService::new(InMemoryRepository::new(), ExhaustedGenerator);

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Generator(GeneratorError::Entropy(_))));
    }
}
