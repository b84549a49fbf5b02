//! Deterministic short-code generation.
//!
//! The generator turns a monotonically increasing seed into a fixed-length
//! code without ever consulting the durable store on the hot path. Each call
//! advances the seed, and the seed-to-code mapping is a bijection over the
//! `alphabet_len ^ length` code space, so two distinct seeds can never yield
//! the same code. Uniqueness therefore holds by construction rather than by
//! check-and-retry against storage.
//!
//! The seed is restored across restarts from the highest identifier the
//! durable store has assigned (see
//! [`UrlRepository::next_id_hint`](crate::domain::repositories::UrlRepository::next_id_hint)),
//! which is strictly increasing as long as identifiers are assigned densely
//! by a single store.
//!
//! Limitation: several service replicas seeding independently from the same
//! snapshot will produce colliding codes. The scheme assumes a single
//! generator instance per deployment.

use crate::error::AppError;
use std::sync::atomic::{AtomicU64, Ordering};

/// ASCII letters and digits, the 62-symbol alphabet used for short codes.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Prime multiplier (2^31 - 1) used to scramble the seed across the code
/// space. It is coprime to `alphabet_len ^ length` for any alphabet smaller
/// than itself, which keeps the seed-to-code mapping bijective.
const SCRAMBLER: u128 = 2_147_483_647;

/// Thread-safe, deterministic producer of unique short codes.
///
/// Constructed once at startup and shared by handle; the internal seed is an
/// atomic counter, so concurrent `generate` calls within one process never
/// observe the same seed.
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: u32,
    next_seed: AtomicU64,
    /// `alphabet.len() ^ length`, the total number of distinct codes.
    space: u128,
}

impl CodeGenerator {
    /// Creates a generator over `alphabet` producing codes of `length`
    /// characters, starting from `start_seed`.
    ///
    /// `start_seed` should be the highest identifier already consumed by the
    /// durable store (0 for an empty store), so that codes handed out before
    /// a restart are never produced again.
    ///
    /// # Panics
    ///
    /// Panics if the alphabet has fewer than 2 distinct symbols or `length`
    /// is outside `1..=12`. Both are startup-time configuration errors.
    pub fn new(alphabet: &str, length: u32, start_seed: u64) -> Self {
        let alphabet: Vec<char> = alphabet.chars().collect();
        assert!(alphabet.len() >= 2, "alphabet must have at least 2 symbols");
        assert!((1..=12).contains(&length), "code length must be 1..=12");

        let space = (alphabet.len() as u128).pow(length);

        Self {
            alphabet,
            length,
            next_seed: AtomicU64::new(start_seed),
            space,
        }
    }

    /// Produces the next short code, advancing the seed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationExhausted`] once every seed in the code
    /// space has been consumed (with the default 62-symbol alphabet and
    /// length 6 that is ~5.7e10 codes).
    pub fn generate(&self) -> Result<String, AppError> {
        let seed = self.next_seed.fetch_add(1, Ordering::Relaxed);

        if (seed as u128) >= self.space {
            return Err(AppError::GenerationExhausted);
        }

        Ok(self.encode(seed))
    }

    /// Maps a seed to its code: scramble with a coprime multiplier, then
    /// write the result as `length` base-`alphabet.len()` digits.
    fn encode(&self, seed: u64) -> String {
        let base = self.alphabet.len() as u128;
        let mut x = (seed as u128 * SCRAMBLER) % self.space;

        let mut code = String::with_capacity(self.length as usize);
        for _ in 0..self.length {
            code.push(self.alphabet[(x % base) as usize]);
            x /= base;
        }

        code
    }

    /// The length of every generated code.
    pub fn code_length(&self) -> u32 {
        self.length
    }
}
