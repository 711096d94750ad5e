//! Input parameters and word-list validation
//!
//! [`InputParams`] is the caller-supplied configuration for a vault: set
//! size, correctness threshold, and corpus size. Constructing it also draws
//! the two pieces of per-vault randomness (the salt and the extractor)
//! from the OS RNG (spec §3, §5). It is deliberately kept separate from
//! [`crate::state::VaultState`], matching the original's `InputParams`
//! (reusable configuration) vs. `FuzzyState` (per-vault public output)
//! split, so the same policy can mint several independent vaults.

#![forbid(unsafe_code)]

use rand::seq::SliceRandom;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::field::first_prime_greater_than;

/// Errors raised while validating parameters or word lists (spec §7).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamsError {
    /// spec §7 lists a negative set size as its own error kind; `setsize` is
    /// a `usize` here, so the type system already rules this out and the
    /// variant is unreachable in practice. Kept for parity with the error
    /// taxonomy and in case a future entry point accepts a signed size.
    #[error("set size must be non-negative")]
    BadSize,
    #[error("correct threshold must be >= 1 and 2*threshold > setsize")]
    BadCorrectThreshold,
    #[error("set size {setsize} must be less than the prime {prime}")]
    SetSizeExceedsPrime { setsize: usize, prime: u64 },
    #[error("word list has length {got}, expected {expected}")]
    BadLength { got: usize, expected: usize },
    #[error("word list contains duplicate entries")]
    NotUnique,
    #[error("word {word} is out of range [0, {corpus_size})")]
    OutOfRange { word: u64, corpus_size: u64 },
}

/// Caller-supplied configuration for a vault, plus the randomness drawn at
/// construction time. Round-trips through serde with the same fields as the
/// original's `InputParams.__repr__`/`Loads` pair (spec §3, §6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputParams {
    pub setsize: usize,
    pub correctthreshold: usize,
    pub corpus_size: u64,
    pub prime: u64,
    #[serde(with = "crate::state::hex_upper")]
    pub salt: [u8; 32],
    pub extractor: Vec<u64>,
}

impl InputParams {
    /// Validate `(setsize, correctthreshold, corpus_size)`, derive the
    /// prime, and draw a fresh salt and extractor (spec §6 "Parameter
    /// validation", §3 "Prime `p`"/"Extractor `s`").
    pub fn new(setsize: usize, correctthreshold: usize, corpus_size: u64) -> Result<Self, ParamsError> {
        if correctthreshold < 1 || 2 * correctthreshold <= setsize {
            return Err(ParamsError::BadCorrectThreshold);
        }
        let prime = first_prime_greater_than(corpus_size);
        let salt = random_salt();
        let extractor = unique_random_elements(prime, setsize)?;
        Ok(InputParams {
            setsize,
            correctthreshold,
            corpus_size,
            prime,
            salt,
            extractor,
        })
    }

    /// Even error threshold `t = 2*(setsize - correctthreshold)` (spec §3).
    pub fn error_threshold(&self) -> u64 {
        2 * (self.setsize - self.correctthreshold) as u64
    }

    /// Serialize to the canonical JSON form (spec §3, §6).
    pub fn dump(&self) -> String {
        serde_json::to_string(self).expect("InputParams always serializes")
    }

    /// Parse the canonical JSON form.
    pub fn load(repn: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(repn)
    }
}

fn random_salt() -> [u8; 32] {
    use rand::RngCore;
    let mut salt = [0u8; 32];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// `setsize` distinct elements of `GF(p)`, drawn uniformly without
/// replacement by shuffling `0..p` and taking a prefix (matching
/// `list_of_unique_random_elements_from_fp` in the original).
fn unique_random_elements(prime: u64, setsize: usize) -> Result<Vec<u64>, ParamsError> {
    if setsize as u64 >= prime {
        return Err(ParamsError::SetSizeExceedsPrime { setsize, prime });
    }
    let mut all: Vec<u64> = (0..prime).collect();
    all.shuffle(&mut OsRng);
    all.truncate(setsize);
    Ok(all)
}

/// Validate a word list against the common rules (spec §6): exact length,
/// all distinct, all within `[0, corpus_size)`.
pub fn check_words(words: &[u64], setsize: usize, corpus_size: u64) -> Result<(), ParamsError> {
    if words.len() != setsize {
        return Err(ParamsError::BadLength {
            got: words.len(),
            expected: setsize,
        });
    }
    let mut seen = std::collections::HashSet::with_capacity(words.len());
    for &w in words {
        if w >= corpus_size {
            return Err(ParamsError::OutOfRange { word: w, corpus_size });
        }
        if !seen.insert(w) {
            return Err(ParamsError::NotUnique);
        }
    }
    Ok(())
}
