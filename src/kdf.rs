//! Extractor and key derivation
//!
//! Turns a recovered (or original) word set into deterministic secret keys:
//! an extractor product binds the per-vault random extractor to the sorted
//! word set, scrypt stretches that product into a seed, and HMAC-SHA-512
//! expands the seed into as many 64-byte keys as requested (spec §4.6). The
//! same pipeline, with a different domain-separated message, produces the
//! authenticator hash stored in the public state.
//!
//! The scrypt parameters are not pinned by the distilled algorithm (spec §9
//! "Scrypt parameterization"); this crate fixes `log2_n = 15, r = 8, p = 1`
//! and documents them here since changing them would make previously
//! serialized vaults unrecoverable.

#![forbid(unsafe_code)]

use hmac::{Hmac, Mac};
use scrypt::Params as ScryptParams;
use sha2::Sha512;

/// Output length of each derived key (spec §6 "Emitted keys").
pub const KEY_LEN: usize = 64;

const SCRYPT_LOG2_N: u8 = 15;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const SEED_LEN: usize = 32;

/// Errors raised by the extractor / KDF pipeline.
#[derive(Debug, thiserror::Error)]
pub enum KdfError {
    #[error("extractor and word list must be the same length (extractor={extractor}, words={words})")]
    LengthMismatch { extractor: usize, words: usize },
    #[error("scrypt key stretching failed: {0}")]
    Scrypt(String),
}

fn scrypt_params() -> ScryptParams {
    ScryptParams::new(SCRYPT_LOG2_N, SCRYPT_R, SCRYPT_P, SEED_LEN)
        .expect("fixed scrypt parameters are always valid")
}

/// Render a word list the way Python's `str(list)` does: `[w0, w1, ..., wn]`,
/// comma-space separated, no trailing comma. This is a domain separator
/// baked into the hash/extractor messages and must be reproduced bit-exactly
/// (spec §4.6).
fn decimal_list(words: &[u64]) -> String {
    let mut s = String::from("[");
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&w.to_string());
    }
    s.push(']');
    s
}

fn scrypt_hash(message: &str, salt: &[u8]) -> Result<[u8; SEED_LEN], KdfError> {
    let mut out = [0u8; SEED_LEN];
    scrypt::scrypt(message.as_bytes(), salt, &scrypt_params(), &mut out)
        .map_err(|e| KdfError::Scrypt(e.to_string()))?;
    Ok(out)
}

/// `e = prod_i (s_i * w_i) mod p`, over the extractor `s` and the *sorted*
/// word set `w` (a copy is sorted; the caller's slice is never mutated,
/// resolving spec §9's Open Question).
fn extractor_product(extractor: &[u64], words: &[u64], p: u64) -> Result<u64, KdfError> {
    if extractor.len() != words.len() {
        return Err(KdfError::LengthMismatch {
            extractor: extractor.len(),
            words: words.len(),
        });
    }
    let mut sorted = words.to_vec();
    sorted.sort_unstable();
    let mut e = crate::field::Scalar::one(p);
    for (&s, &w) in extractor.iter().zip(sorted.iter()) {
        e = e.mul(crate::field::Scalar::new(s, p).mul(crate::field::Scalar::new(w, p)));
    }
    Ok(e.value())
}

/// Derive the scrypt seed `EK` for a given word set and extractor.
pub fn derive_seed(extractor: &[u64], words: &[u64], p: u64, salt: &[u8]) -> Result<[u8; SEED_LEN], KdfError> {
    let e = extractor_product(extractor, words, p)?;
    scrypt_hash(&format!("key:{e}"), salt)
}

/// The authenticator hash `H = Scrypt(salt, "original_words:" || decimal_list(sort(A)))`.
pub fn words_hash(words: &[u64], salt: &[u8]) -> Result<[u8; SEED_LEN], KdfError> {
    let mut sorted = words.to_vec();
    sorted.sort_unstable();
    scrypt_hash(&format!("original_words:{}", decimal_list(&sorted)), salt)
}

/// Expand a seed into `key_count` 64-byte keys: `K_k = HMAC-SHA-512(decimal(k), EK)`.
pub fn derive_keys(seed: &[u8], key_count: usize) -> Vec<[u8; KEY_LEN]> {
    (0..key_count)
        .map(|k| {
            let mut mac = Hmac::<Sha512>::new_from_slice(k.to_string().as_bytes())
                .expect("HMAC accepts keys of any length");
            mac.update(seed);
            let out = mac.finalize().into_bytes();
            let mut key = [0u8; KEY_LEN];
            key.copy_from_slice(&out);
            key
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_list_matches_python_str_list() {
        assert_eq!(decimal_list(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(decimal_list(&[]), "[]");
        assert_eq!(decimal_list(&[42]), "[42]");
    }

    #[test]
    fn hash_is_order_independent() {
        let salt = [7u8; 32];
        let a = words_hash(&[1, 2, 3], &salt).unwrap();
        let b = words_hash(&[3, 1, 2], &salt).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_differs_for_distinct_sets() {
        let salt = [7u8; 32];
        let a = words_hash(&[1, 2, 3], &salt).unwrap();
        let b = words_hash(&[1, 2, 4], &salt).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn extractor_does_not_mutate_input() {
        let words = vec![5u64, 1, 3];
        let extractor = vec![2u64, 4, 6];
        let original = words.clone();
        let _ = extractor_product(&extractor, &words, 17).unwrap();
        assert_eq!(words, original);
    }

    #[test]
    fn keys_are_deterministic_and_distinct_per_index() {
        let seed = [1u8; 32];
        let keys = derive_keys(&seed, 3);
        assert_eq!(keys.len(), 3);
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        let keys2 = derive_keys(&seed, 3);
        assert_eq!(keys, keys2);
    }

    #[test]
    fn mismatched_extractor_length_is_rejected() {
        assert!(matches!(
            extractor_product(&[1, 2], &[1, 2, 3], 17),
            Err(KdfError::LengthMismatch { extractor: 2, words: 3 })
        ));
    }
}
