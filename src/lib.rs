//! Fuzzy vault: key recovery from an approximate set of "words"
//!
//! This crate derives a set of cryptographic keys from a user-chosen
//! unordered set of small integers ("words") and later re-derives the exact
//! same keys from an approximate guess of that set, provided the guess
//! overlaps the original beyond a configurable threshold.
//!
//! ## Construction
//!
//! The original set is encoded as the roots of a monic polynomial over a
//! prime field `GF(p)` ([`field`]). A public "sketch" ([`sketch`]) reveals
//! just the polynomial's top coefficients; a Berlekamp–Welch decoder
//! ([`decoder`], backed by the Gaussian-elimination solver in [`linalg`])
//! recovers the rest from a noisy guess, and the [`recovery`] driver turns
//! the reconstructed polynomial back into a word set. [`kdf`] then stretches
//! the recovered set, together with a per-vault extractor and salt, into
//! deterministic secret keys.
//!
//! ## Invariants
//!
//! - The core is purely synchronous: no suspension points, no shared
//!   mutable state, no cancellation. The only external resource is the OS
//!   random source, consulted exactly twice inside [`params::InputParams::new`].
//! - [`state::VaultState`] is immutable after construction and holds only
//!   plain data, so sharing one across threads for concurrent recovery
//!   attempts is safe without additional synchronization.
//! - No error variant's `Display` ever includes the secret word set or any
//!   derived key (see each module's error enum).
//!
//! This crate does not implement a general polynomial or linear-algebra
//! library, a network protocol, or a persistent store; callers serialize
//! [`state::VaultState`] themselves via [`state::VaultState::dump`]/[`state::VaultState::load`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod decoder;
pub mod field;
pub mod kdf;
pub mod linalg;
pub mod params;
pub mod recovery;
pub mod sketch;
pub mod state;

use params::ParamsError;
use state::{VaultState, VaultStateError};

pub use kdf::KEY_LEN;
pub use params::InputParams;
pub use state::VaultState as FuzzyState;

/// A single 64-byte derived key (§6 "Emitted keys").
pub type SecretKey = [u8; KEY_LEN];

/// The unified error type surfaced by [`generate_secret`] and
/// [`recover_secret`].
///
/// Each variant reports a single terminal failure kind; no error leaks the
/// secret word set or any derived key.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    VaultState(#[from] VaultStateError),
    #[error(transparent)]
    Kdf(#[from] kdf::KdfError),
    #[error(transparent)]
    Recovery(#[from] recovery::RecoveryError),
    #[error("recovered words do not match the stored authenticator hash")]
    HashMismatch,
}

/// Establish a vault's original words, returning the public state to
/// persist and `key_count` derived keys (`GenerateSecret`).
#[tracing::instrument(skip(params, original_words), fields(setsize = params.setsize))]
pub fn generate_secret(
    params: &InputParams,
    original_words: &[u64],
    key_count: usize,
) -> Result<(VaultState, Vec<SecretKey>), FuzzyError> {
    params::check_words(original_words, params.setsize, params.corpus_size)?;
    let state = VaultState::create(params, original_words)?;
    let seed = kdf::derive_seed(&state.extractor, original_words, state.prime, &state.salt)?;
    let keys = kdf::derive_keys(&seed, key_count);
    tracing::debug!("vault generated");
    Ok((state, keys))
}

/// Recover `key_count` keys from a guess of the original words
/// (`RecoverSecret`): first by an exact hash match, falling back to
/// Berlekamp–Welch decoding when the guess differs from the original.
#[tracing::instrument(skip(state, guess), fields(setsize = state.setsize))]
pub fn recover_secret(
    state: &VaultState,
    guess: &[u64],
    key_count: usize,
) -> Result<Vec<SecretKey>, FuzzyError> {
    params::check_words(guess, state.setsize, state.corpus_size)?;

    let guess_hash = kdf::words_hash(guess, &state.salt)?;
    if guess_hash == state.hash {
        tracing::debug!("recovered via exact hash match");
        let seed = kdf::derive_seed(&state.extractor, guess, state.prime, &state.salt)?;
        return Ok(kdf::derive_keys(&seed, key_count));
    }

    let recovered = recovery::recover_words(
        &state.sketch,
        guess,
        state.setsize,
        state.error_threshold(),
        state.prime,
    )?;
    let recovered_hash = kdf::words_hash(&recovered, &state.salt)?;
    if recovered_hash == state.hash {
        tracing::debug!("recovered via Berlekamp-Welch decoding");
        let seed = kdf::derive_seed(&state.extractor, &recovered, state.prime, &state.salt)?;
        return Ok(kdf::derive_keys(&seed, key_count));
    }

    tracing::warn!("recovery produced a set that does not match the stored hash");
    Err(FuzzyError::HashMismatch)
}
