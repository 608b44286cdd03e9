use crate::repository::Mapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Number of mappings shown on the index page.
pub const RECENT_LIMIT: usize = 10;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Normalizes `long_url`, assigns it a fresh short code and stores the mapping.
    async fn shorten(&self, long_url: &str) -> Result<Mapping>;

    /// Resolves a short code to its stored mapping.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<Mapping>>;

    /// Lists up to `limit` mappings, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Mapping>>;
}
