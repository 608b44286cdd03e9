use async_trait::async_trait;
use dashmap::DashMap;
use shrtn_core::repository::{Mapping, MappingId, Repository, Result};
use shrtn_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory storage entry for a mapping.
#[derive(Debug, Clone)]
struct Entry {
    id: MappingId,
    mapping: Mapping,
}

impl Entry {
    /// Recency key: creation time first, insertion order breaks ties.
    fn recency(&self) -> (jiff::Timestamp, MappingId) {
        (self.mapping.created_at, self.id)
    }
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// Entries are bucketed by short code so point lookups stay cheap; the
/// recency query scans every bucket. Each instance is its own partition.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, Vec<Entry>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.iter().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn put(&self, mapping: Mapping) -> Result<MappingId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let key = mapping.short_code.as_str().to_owned();

        self.storage
            .entry(key)
            .or_default()
            .push(Entry { id, mapping });

        Ok(id)
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<Mapping>> {
        let mut entries: Vec<Entry> = self
            .storage
            .iter()
            .flat_map(|bucket| bucket.value().clone())
            .collect();

        entries.sort_unstable_by_key(|entry| std::cmp::Reverse(entry.recency()));

        Ok(entries
            .into_iter()
            .take(limit)
            .map(|entry| entry.mapping)
            .collect())
    }

    async fn query_by_code(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        let Some(bucket) = self.storage.get(code.as_str()) else {
            return Ok(None);
        };

        Ok(bucket
            .iter()
            .max_by_key(|entry| entry.recency())
            .map(|entry| entry.mapping.clone()))
    }
}
