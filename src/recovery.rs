//! Recovery driver
//!
//! Assembles the sketch and a recovery guess into a Berlekamp–Welch
//! instance, decodes it, and turns the result back into the recovered word
//! set (spec §4.5). `p_high - p_low` equals the true vanishing polynomial
//! `P_A` exactly when decoding succeeded, because the sketch already
//! supplies `P_A`'s top `t` coefficients and the decoder recovers the
//! bottom `n-t`; its roots are therefore the original words.

#![forbid(unsafe_code)]

use crate::decoder::{self, DecodeError};
use crate::field::Scalar;
use crate::sketch;

/// Errors raised by the recovery driver.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("recovery guess length {got} does not match set size {expected}")]
    BadLength { got: usize, expected: usize },
    #[error("decoding failed: {0}")]
    DecodeFailed(#[from] DecodeError),
    #[error("recovered polynomial has a repeated root in GF(p)")]
    RepeatedRoots,
}

/// Recover the original word set from a sketch and a recovery guess.
pub fn recover_words(
    sketch: &[u64],
    guess: &[u64],
    setsize: usize,
    error_threshold: u64,
    p: u64,
) -> Result<Vec<u64>, RecoveryError> {
    if guess.len() != setsize {
        return Err(RecoveryError::BadLength {
            got: guess.len(),
            expected: setsize,
        });
    }

    let p_high = sketch::reconstruct_high_poly(sketch, setsize, p);
    let b: Vec<u64> = guess
        .iter()
        .map(|&a| p_high.eval(Scalar::new(a, p)).value())
        .collect();

    let k = setsize - error_threshold as usize;
    let t_err = (error_threshold / 2) as usize;
    let p_low = decoder::decode(guess, &b, k, t_err, p)?;

    let p_diff = p_high.sub(&p_low);
    if p_diff.has_repeated_roots() {
        return Err(RecoveryError::RepeatedRoots);
    }
    Ok(p_diff.roots_of_squarefree())
}
