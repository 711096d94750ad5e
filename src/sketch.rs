//! Secure sketch construction
//!
//! The sketch of a set `A = {a_1, ..., a_n}` is a window of coefficients of
//! its monic vanishing polynomial `P_A(z) = prod_i (z - a_i)`: the `t`
//! coefficients immediately below the leading `1`, at degrees `n-t .. n-1`.
//! The remaining `n-t` low coefficients stay hidden; an attacker who only
//! sees the sketch cannot recover `A` without brute-forcing the hidden part.

#![forbid(unsafe_code)]

use crate::field::{Poly, Scalar};

/// Errors raised while building or reconstructing a sketch.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SketchError {
    #[error("error threshold must be even, got {0}")]
    BadErrorThreshold(u64),
}

/// The monic vanishing polynomial `P_A(z) = prod_i (z - a_i) mod p`.
pub fn vanishing_poly(words: &[u64], p: u64) -> Poly {
    let mut poly = Poly::new(p, vec![Scalar::one(p)]);
    for &a in words {
        let factor = Poly::new(p, vec![Scalar::new(a, p).neg(), Scalar::one(p)]);
        poly = poly.mul(&factor);
    }
    poly
}

/// Build the sketch: the `t` coefficients of `P_A` at degrees `n-t .. n-1`,
/// in that (low-to-high within the window) order (spec §4.3, scenario 1).
pub fn build_sketch(words: &[u64], p: u64, t: u64) -> Result<Vec<u64>, SketchError> {
    if t % 2 != 0 {
        return Err(SketchError::BadErrorThreshold(t));
    }
    let n = words.len();
    let poly = vanishing_poly(words, p);
    let t = t as usize;
    let coeffs = poly.coeffs();
    // coeffs is padded up to degree n (monic leading term included); index
    // directly by degree rather than relying on trailing-zero trimming,
    // since low coefficients of P_A may legitimately be zero.
    let window = (n - t..n).map(|deg| coeffs.get(deg).copied().unwrap_or(Scalar::zero(p)).value());
    Ok(window.collect())
}

/// Reconstruct `p_high(z) = z^n + sum_j sketch[j] * z^{n-t+j}`, the monic
/// polynomial whose unknown low `n-t` coefficients are set to zero
/// (spec §4.5 step 1).
pub fn reconstruct_high_poly(sketch: &[u64], n: usize, p: u64) -> Poly {
    let t = sketch.len();
    let mut coeffs = vec![Scalar::zero(p); n + 1];
    coeffs[n] = Scalar::one(p);
    for (j, &s) in sketch.iter().enumerate() {
        coeffs[n - t + j] = Scalar::new(s, p);
    }
    Poly::new(p, coeffs)
}
