use crate::Generator;
use shrtn_core::{GeneratorError, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator producing sequential codes like "seq000000", "seq000001".
///
/// Useful wherever predictable codes matter more than unguessable ones, such
/// as tests and local fixtures. The prefix must be alphanumeric for the codes
/// to be reachable through `/s/{code}`.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a sequential generator starting at zero.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(ShortCode::new_unchecked(format!(
            "{}{:06}",
            self.prefix, count
        )))
    }
}
