use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Identifier assigned by the store to a persisted mapping.
pub type MappingId = u64;

/// A stored association between a short code and a long URL.
///
/// Mappings are immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// The destination URL.
    pub long_url: String,
    /// The code used as redirect key.
    pub short_code: ShortCode,
    /// When the mapping was created, set server-side.
    pub created_at: Timestamp,
}

impl Mapping {
    /// Creates a mapping stamped with the current time.
    pub fn new(long_url: impl Into<String>, short_code: ShortCode) -> Self {
        Self {
            long_url: long_url.into(),
            short_code,
            created_at: Timestamp::now(),
        }
    }
}

/// The logical grouping all mappings are stored and queried under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition(String);

impl Partition {
    pub const DEFAULT: &'static str = "default_shorten";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Partition {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence contract for mappings, scoped to a single [`Partition`].
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Persists a new mapping and returns its store identifier.
    ///
    /// Short codes are not checked for uniqueness.
    async fn put(&self, mapping: Mapping) -> Result<MappingId>;

    /// Returns up to `limit` mappings, newest `created_at` first.
    async fn query_recent(&self, limit: usize) -> Result<Vec<Mapping>>;

    /// Looks up the mapping for `code`.
    /// When several mappings share a code the newest one is returned.
    async fn query_by_code(&self, code: &ShortCode) -> Result<Option<Mapping>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partition_key() {
        assert_eq!(Partition::default().as_str(), "default_shorten");
    }

    #[test]
    fn new_mapping_is_stamped_now() {
        let before = Timestamp::now();
        let mapping = Mapping::new("https://example.com", ShortCode::new_unchecked("abcdef"));
        let after = Timestamp::now();

        assert!(mapping.created_at >= before && mapping.created_at <= after);
        assert_eq!(mapping.long_url, "https://example.com");
    }
}
