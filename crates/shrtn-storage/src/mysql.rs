use async_trait::async_trait;
use jiff::Timestamp;
use shrtn_core::error::StorageError;
use shrtn_core::repository::{Mapping, MappingId, Partition, Repository, Result};
use shrtn_core::ShortCode;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};

const SCHEMA: &str = include_str!("../ddl/mysql/mappings.sql");

/// MySQL implementation of the repository contract.
///
/// Every row carries a `partition_key` and every query filters on the
/// partition the repository was created with. Both key columns use a binary
/// collation, so codes that differ only in case are distinct. Rows are append-only;
/// `created_at` is stored as microseconds since the Unix epoch and the
/// auto-increment `id` breaks ties between equal timestamps.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
    partition: Partition,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool, partition: Partition) -> Self {
        Self { pool, partition }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str, partition: Partition) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool, partition))
    }

    /// Creates the `mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn row_to_mapping(row: &MySqlRow) -> Result<Mapping> {
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Mapping {
        long_url,
        short_code: ShortCode::new_unchecked(short_code),
        created_at: parse_created_at(created_at)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn put(&self, mapping: Mapping) -> Result<MappingId> {
        let result = sqlx::query(
            r#"
            INSERT INTO mappings (partition_key, short_code, long_url, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(self.partition.as_str())
        .bind(mapping.short_code.as_str())
        .bind(&mapping.long_url)
        .bind(mapping.created_at.as_microsecond())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_id();
        debug!(id, code = %mapping.short_code, partition = %self.partition, "inserted mapping");
        Ok(id)
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<Mapping>> {
        trace!(limit, partition = %self.partition, "querying recent mappings");

        let rows = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM mappings
            WHERE partition_key = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(self.partition.as_str())
        .bind(limit as u64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_mapping).collect()
    }

    async fn query_by_code(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        trace!(code = %code, partition = %self.partition, "querying mapping by code");

        let row = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM mappings
            WHERE partition_key = ?
              AND short_code = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(self.partition.as_str())
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }
}
