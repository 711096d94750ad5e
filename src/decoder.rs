//! Berlekamp–Welch decoder
//!
//! Given evaluation points `a = (a_1..a_n)` and received values
//! `b = (b_1..b_n)`, recovers a degree-`< k` polynomial `p_low` and an
//! error locator `E` of degree `<= t_err` (monic, degree exactly `t_err`)
//! such that `E(a_i) * p_low(a_i) = E(a_i) * b_i` for all `i`. Substituting
//! `Q = E * p_low` turns this into the linear system solved in
//! [`decode`] (spec §4.4).

#![forbid(unsafe_code)]

use crate::field::{Poly, Scalar};
use crate::linalg::{self, LinalgError};

/// Errors raised by the decoder.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("evaluation points and received values must be the same non-empty length")]
    BadParams,
    #[error("k and t_err must both be positive")]
    BadDegrees,
    #[error("linear system had no solution: {0}")]
    NoSolution(#[from] LinalgError),
    #[error("Q did not divide evenly by E; too many errors to correct")]
    RemainderNonzero,
}

/// Run the Berlekamp–Welch decoder.
///
/// `k` is the degree bound of the sought low-degree polynomial
/// (`deg p_low < k`); `t_err` is the number of correctable errors. The
/// linear system has exactly `n = k + 2 * t_err` unknowns, so callers must
/// supply `a`/`b` of that length.
pub fn decode(a: &[u64], b: &[u64], k: usize, t_err: usize, p: u64) -> Result<Poly, DecodeError> {
    if a.is_empty() || a.len() != b.len() {
        return Err(DecodeError::BadParams);
    }
    if k < 1 || t_err < 1 {
        return Err(DecodeError::BadDegrees);
    }
    let n = a.len();

    // Precompute a_i^0 .. a_i^{k+t_err} for each i.
    let mut matrix = Vec::with_capacity(n);
    let mut rhs = Vec::with_capacity(n);
    for i in 0..n {
        let ai = Scalar::new(a[i], p);
        let bi = Scalar::new(b[i], p);
        let mut powers = Vec::with_capacity(k + t_err + 1);
        let mut cur = Scalar::one(p);
        for _ in 0..=(k + t_err) {
            powers.push(cur);
            cur = cur.mul(ai);
        }

        let mut row = Vec::with_capacity(k + 2 * t_err);
        for j in 0..(k + t_err) {
            row.push(powers[j]);
        }
        for j in 0..t_err {
            row.push(bi.mul(powers[j]).neg());
        }
        matrix.push(row);
        rhs.push(bi.mul(powers[t_err]));
    }

    let solution = linalg::solve(matrix, rhs)?;

    let q_coeffs: Vec<Scalar> = solution[..(k + t_err)].to_vec();
    let mut e_coeffs: Vec<Scalar> = solution[(k + t_err)..].to_vec();
    e_coeffs.push(Scalar::one(p)); // E is monic of degree t_err.

    let q = Poly::new(p, q_coeffs);
    let e = Poly::new(p, e_coeffs);

    let (p_low, remainder) = q.euclidean_div(&e).map_err(|_| DecodeError::RemainderNonzero)?;
    if !remainder.is_zero() {
        return Err(DecodeError::RemainderNonzero);
    }
    Ok(p_low)
}
