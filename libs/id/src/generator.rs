//! Random code generation.
//!
//! Codes are `length` characters drawn independently and uniformly from
//! [`ALPHABET`]. The keyspace is `36^length` (about 2.8e12 for the default
//! length of 8), so callers must still check for collisions before
//! persisting.

use rand::Rng;

use crate::codec::ALPHABET;

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Generates a code of `length` characters using the thread-local CSPRNG.
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::rng(), length)
}

/// Generates a code of `length` characters from the given random source.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
