//! Core types and traits for the Shrtn URL shortener.
//!
//! This crate provides the mapping model, the storage contract and the
//! shortener contract shared by the generator, storage, shortener and
//! gateway crates.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, GeneratorError, ShortenerError, StorageError};
pub use repository::{Mapping, MappingId, Partition, Repository};
pub use shortcode::ShortCode;
pub use shortener::{Shortener, RECENT_LIMIT};
