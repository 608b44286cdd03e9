use crate::Generator;
use rand::rngs::OsRng;
use rand::RngCore;
use shrtn_core::{GeneratorError, ShortCode};
use std::sync::Mutex;

const ALPHABET: &[u8; ALPHABET_LEN] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHABET_LEN: usize = 52;

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are rejected so every letter is equally likely.
const ACCEPT_BELOW: u8 = (256 / ALPHABET_LEN * ALPHABET_LEN) as u8;

pub const DEFAULT_LENGTH: usize = 6;

/// Generates fixed-length codes of letters drawn uniformly from `a-zA-Z`.
///
/// Randomness comes from the operating system's CSPRNG by default. If the
/// source fails, [`Generator::generate`] returns [`GeneratorError::Entropy`].
#[derive(Debug)]
pub struct RandomAlphaGenerator<R = OsRng> {
    rng: Mutex<R>,
    length: usize,
}

impl RandomAlphaGenerator<OsRng> {
    /// Creates a generator producing 6-letter codes.
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    /// Creates a generator producing codes of `length` letters.
    pub fn with_length(length: usize) -> Self {
        Self::with_rng(OsRng, length)
    }
}

impl Default for RandomAlphaGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + Send + 'static> RandomAlphaGenerator<R> {
    /// Creates a generator backed by a caller-supplied random source.
    pub fn with_rng(rng: R, length: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            length,
        }
    }

    /// Returns the length of the generated codes.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl<R: RngCore + Send + 'static> Generator for RandomAlphaGenerator<R> {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| GeneratorError::Entropy("random source lock is poisoned".to_string()))?;

        let mut code = String::with_capacity(self.length);
        let mut buf = [0u8; 16];

        while code.len() < self.length {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| GeneratorError::Entropy(e.to_string()))?;

            for byte in buf.iter().copied().filter(|b| *b < ACCEPT_BELOW) {
                if code.len() == self.length {
                    break;
                }
                code.push(ALPHABET[usize::from(byte) % ALPHABET_LEN] as char);
            }
        }

        Ok(ShortCode::new_unchecked(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// A random source that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("generator must only call try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("generator must only call try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("generator must only call try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy pool drained"))
        }
    }

    /// Replays a fixed byte pattern.
    struct FixedRng(Vec<u8>);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (i, b) in dest.iter_mut().enumerate() {
                *b = self.0[i % self.0.len()];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn codes_are_six_letters() {
        let generator = RandomAlphaGenerator::new();

        for _ in 0..1_000 {
            let code = generator.generate().unwrap();
            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn custom_length() {
        let generator = RandomAlphaGenerator::with_length(12);
        assert_eq!(generator.length(), 12);
        assert_eq!(generator.generate().unwrap().as_str().len(), 12);
    }

    #[test]
    fn codes_vary() {
        let generator = RandomAlphaGenerator::new();
        let codes: HashSet<String> = (0..100)
            .map(|_| generator.generate().unwrap().to_string())
            .collect();

        // 52^6 possible codes; a repeat within 100 draws is practically impossible.
        assert!(codes.len() > 95);
    }

    #[test]
    fn biased_bytes_are_rejected() {
        // 208..=255 would map unevenly onto the alphabet and must be skipped.
        let generator = RandomAlphaGenerator::with_rng(FixedRng(vec![255, 208, 0, 51, 52]), 3);

        assert_eq!(generator.generate().unwrap().as_str(), "aZa");
    }

    #[test]
    fn broken_entropy_source_fails_loudly() {
        let generator = RandomAlphaGenerator::with_rng(BrokenRng, 6);

        let err = generator.generate().unwrap_err();
        assert!(matches!(err, GeneratorError::Entropy(_)));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomAlphaGenerator>();
    }
}
