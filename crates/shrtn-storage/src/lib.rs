pub mod memory;
pub mod mysql;
pub mod timeout;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use shrtn_core::{Mapping, MappingId, Partition, Repository, StorageError};
pub use timeout::TimeoutRepository;
