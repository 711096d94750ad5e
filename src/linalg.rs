//! Gaussian elimination over `GF(p)`
//!
//! Solves a square system `M * x = y` with partial pivoting by first
//! non-zero row. Over a field there is no numerical-stability reason to
//! prefer one non-zero pivot candidate over another (spec §4.2), so the
//! first one found is used.
//!
//! Every caller in this crate constructs a square, generically full-rank
//! system (the Berlekamp–Welch linear system, spec §4.4). An
//! under-determined system (a zero pivot column with no non-zero row below
//! it) is therefore always a signal that the decoder cannot distinguish
//! error patterns, and is reported as [`LinalgError::NoSolution`] rather
//! than enumerated as a solution family.

#![forbid(unsafe_code)]

use crate::field::Scalar;

/// Errors raised by the linear solver.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinalgError {
    #[error("linear system has no unique solution")]
    NoSolution,
}

/// Solve `matrix * x = rhs` for `x`, where `matrix` is `n` rows of `n`
/// coefficients each and `rhs` has `n` entries, all over the same `GF(p)`.
pub fn solve(mut matrix: Vec<Vec<Scalar>>, mut rhs: Vec<Scalar>) -> Result<Vec<Scalar>, LinalgError> {
    let n = rhs.len();
    debug_assert!(matrix.iter().all(|row| row.len() == n));
    let modulus = rhs.first().map(|s| s.modulus()).unwrap_or(2);

    for col in 0..n {
        // Find a pivot: any row at or below `col` with a non-zero entry in `col`.
        let pivot_row = (col..n).find(|&r| !matrix[r][col].is_zero());
        let pivot_row = match pivot_row {
            Some(r) => r,
            None => return Err(LinalgError::NoSolution),
        };
        if pivot_row != col {
            matrix.swap(pivot_row, col);
            rhs.swap(pivot_row, col);
        }

        let pivot_inv = matrix[col][col].inverse();
        for c in col..n {
            matrix[col][c] = matrix[col][c].mul(pivot_inv);
        }
        rhs[col] = rhs[col].mul(pivot_inv);

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor.is_zero() {
                continue;
            }
            for c in col..n {
                matrix[row][c] = matrix[row][c].sub(factor.mul(matrix[col][c]));
            }
            rhs[row] = rhs[row].sub(factor.mul(rhs[col]));
        }
    }

    // Every row must now read `x_i = rhs[i]`; an inconsistent row (all-zero
    // coefficients with a non-zero rhs) can only arise from a bug above,
    // since reduction to the identity already forces consistency, but the
    // check is left as a last line of defense matching the defensive style
    // of the rest of the decoder pipeline.
    for row in 0..n {
        let is_identity_row = (0..n).all(|c| {
            let expect_one = c == row;
            let v = matrix[row][c].value();
            if expect_one {
                v == 1 % modulus
            } else {
                v == 0
            }
        });
        if !is_identity_row {
            return Err(LinalgError::NoSolution);
        }
    }

    Ok(rhs)
}
