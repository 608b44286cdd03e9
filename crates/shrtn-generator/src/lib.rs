pub mod random;
pub mod seq;

pub use random::RandomAlphaGenerator;
pub use seq::SeqGenerator;

use shrtn_core::{GeneratorError, ShortCode};

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage,
/// so they make no uniqueness promise against codes already stored.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next short code.
    ///
    /// Fails only when the underlying source cannot produce a code at all;
    /// implementations must never degrade to a weaker source.
    fn generate(&self) -> Result<ShortCode, GeneratorError>;
}
