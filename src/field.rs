//! Prime-field arithmetic and dense univariate polynomials over `GF(p)`
//!
//! Unlike a SNARK's fixed-curve scalar field, the modulus here is chosen per
//! vault (`p = first_prime_greater_than(corpus_size)`, see [`first_prime_greater_than`])
//! and is small enough to fit a `u64` for any realistic corpus (spec §9:
//! "a 64-bit modular arithmetic suffices for realistic corpora"). `Scalar`
//! therefore carries its modulus alongside its value rather than fixing it
//! at the type level.
//!
//! Polynomials are dense, low-to-high coefficient vectors with trailing
//! zeros trimmed by every constructor, so `degree()` always agrees with
//! `coeffs().len() - 1` of the trimmed form.

#![forbid(unsafe_code)]

use std::fmt;

/// An element of `GF(p)` for a modulus `p` fixed at construction time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Scalar {
    value: u64,
    modulus: u64,
}

impl Scalar {
    /// Construct `value mod modulus`.
    #[inline]
    pub fn new(value: u64, modulus: u64) -> Self {
        Scalar {
            value: value % modulus,
            modulus,
        }
    }

    #[inline]
    pub fn zero(modulus: u64) -> Self {
        Scalar { value: 0, modulus }
    }

    #[inline]
    pub fn one(modulus: u64) -> Self {
        Scalar {
            value: 1 % modulus,
            modulus,
        }
    }

    #[inline]
    pub fn modulus(self) -> u64 {
        self.modulus
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.value
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    fn check_modulus(self, other: Scalar) {
        debug_assert_eq!(
            self.modulus, other.modulus,
            "scalar operation across mismatched moduli"
        );
    }

    #[inline]
    pub fn add(self, rhs: Scalar) -> Scalar {
        self.check_modulus(rhs);
        Scalar::new(self.value + rhs.value, self.modulus)
    }

    #[inline]
    pub fn sub(self, rhs: Scalar) -> Scalar {
        self.check_modulus(rhs);
        let m = self.modulus;
        Scalar::new(m + self.value - rhs.value, m)
    }

    #[inline]
    pub fn neg(self) -> Scalar {
        if self.value == 0 {
            self
        } else {
            Scalar::new(self.modulus - self.value, self.modulus)
        }
    }

    #[inline]
    pub fn mul(self, rhs: Scalar) -> Scalar {
        self.check_modulus(rhs);
        let m = self.modulus as u128;
        let v = (self.value as u128 * rhs.value as u128) % m;
        Scalar::new(v as u64, self.modulus)
    }

    /// Multiplicative inverse via Fermat's little theorem (`p` is prime).
    ///
    /// Panics on a zero input; callers in this crate only invert non-zero
    /// pivots after checking for a zero pivot themselves.
    pub fn inverse(self) -> Scalar {
        assert!(!self.is_zero(), "inverse of zero is undefined");
        self.pow(self.modulus - 2)
    }

    pub fn pow(self, mut exp: u64) -> Scalar {
        let mut base = self;
        let mut acc = Scalar::one(self.modulus);
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.mul(base);
            }
            base = base.mul(base);
            exp >>= 1;
        }
        acc
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A dense polynomial `c_0 + c_1 z + ... + c_d z^d` over `GF(p)`, stored
/// low-to-high with trailing zero coefficients trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Scalar>,
    modulus: u64,
}

impl Poly {
    /// Build a polynomial from coefficients, trimming trailing zeros. An
    /// empty or all-zero input yields the zero polynomial (`coeffs() == []`).
    pub fn new(modulus: u64, mut coeffs: Vec<Scalar>) -> Poly {
        while matches!(coeffs.last(), Some(c) if c.is_zero()) {
            coeffs.pop();
        }
        Poly { coeffs, modulus }
    }

    pub fn zero(modulus: u64) -> Poly {
        Poly {
            coeffs: Vec::new(),
            modulus,
        }
    }

    pub fn monomial(modulus: u64, degree: usize, coeff: Scalar) -> Poly {
        let mut coeffs = vec![Scalar::zero(modulus); degree + 1];
        coeffs[degree] = coeff;
        Poly::new(modulus, coeffs)
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Degree of the zero polynomial is conventionally reported as `0` here;
    /// callers that need to distinguish it check `coeffs().is_empty()` first.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[Scalar] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).copied().unwrap_or(Scalar::zero(self.modulus));
            let b = other.coeffs.get(i).copied().unwrap_or(Scalar::zero(self.modulus));
            out.push(a.add(b));
        }
        Poly::new(self.modulus, out)
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).copied().unwrap_or(Scalar::zero(self.modulus));
            let b = other.coeffs.get(i).copied().unwrap_or(Scalar::zero(self.modulus));
            out.push(a.sub(b));
        }
        Poly::new(self.modulus, out)
    }

    pub fn neg(&self) -> Poly {
        Poly::new(self.modulus, self.coeffs.iter().map(|c| c.neg()).collect())
    }

    pub fn mul(&self, other: &Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero(self.modulus);
        }
        let mut out = vec![Scalar::zero(self.modulus); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] = out[i + j].add(a.mul(*b));
            }
        }
        Poly::new(self.modulus, out)
    }

    /// Evaluate via Horner's method.
    pub fn eval(&self, x: Scalar) -> Scalar {
        let mut acc = Scalar::zero(self.modulus);
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(x).add(*c);
        }
        acc
    }

    /// Euclidean division: `self = q * divisor + r` with `deg r < deg divisor`.
    pub fn euclidean_div(&self, divisor: &Poly) -> Result<(Poly, Poly), FieldError> {
        if divisor.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let modulus = self.modulus;
        let lead_inv = divisor.coeffs.last().copied().unwrap().inverse();
        let mut remainder = self.coeffs.clone();
        let dividend_deg = remainder.len();
        let divisor_deg = divisor.coeffs.len();
        if dividend_deg < divisor_deg {
            return Ok((Poly::zero(modulus), self.clone()));
        }
        let mut quotient = vec![Scalar::zero(modulus); dividend_deg - divisor_deg + 1];
        for shift in (0..quotient.len()).rev() {
            let deg = shift + divisor_deg - 1;
            if deg >= remainder.len() {
                continue;
            }
            let coeff = remainder[deg];
            if coeff.is_zero() {
                continue;
            }
            let factor = coeff.mul(lead_inv);
            quotient[shift] = factor;
            for (j, dc) in divisor.coeffs.iter().enumerate() {
                let idx = shift + j;
                remainder[idx] = remainder[idx].sub(factor.mul(*dc));
            }
        }
        Ok((Poly::new(modulus, quotient), Poly::new(modulus, remainder)))
    }

    /// Brute-force root search: evaluate every field element. Kept as a
    /// tested alternative to [`Poly::roots_of_squarefree`] (spec §9 "Dynamic
    /// dispatch": both strategies must agree on the unordered root set).
    pub fn brute_force_roots(&self) -> Vec<u64> {
        (0..self.modulus)
            .filter(|&x| self.eval(Scalar::new(x, self.modulus)).is_zero())
            .collect()
    }

    /// Find the roots of a polynomial the caller guarantees is squarefree,
    /// by repeated synthetic division: for each candidate root, divide it
    /// out if it evaluates to zero. Since the caller guarantees distinct
    /// roots, at most `degree()` candidates ever divide evenly.
    pub fn roots_of_squarefree(&self) -> Vec<u64> {
        let mut roots = Vec::new();
        let mut current = self.clone();
        if current.is_zero() {
            return roots;
        }
        for candidate in 0..self.modulus {
            if current.coeffs.is_empty() {
                break;
            }
            let x = Scalar::new(candidate, self.modulus);
            if !current.eval(x).is_zero() {
                continue;
            }
            let divisor = Poly::new(self.modulus, vec![x.neg(), Scalar::one(self.modulus)]);
            let (q, r) = current
                .euclidean_div(&divisor)
                .expect("linear divisor is never zero");
            debug_assert!(r.is_zero(), "root candidate did not divide evenly");
            roots.push(candidate);
            current = q;
            if roots.len() == self.degree() {
                break;
            }
        }
        roots
    }

    /// `true` iff `self` has a repeated root in `GF(p)`.
    ///
    /// Concretely: `(z^p - z) mod self != 0` (spec §4.1). Computed by
    /// repeated-squaring exponentiation of `z` inside the quotient ring
    /// `GF(p)[z] / (self)`, never materializing a degree-`p` polynomial.
    pub fn has_repeated_roots(&self) -> bool {
        let p = self.modulus;
        let z = Poly::new(p, vec![Scalar::zero(p), Scalar::one(p)]);
        let z_pow_p = poly_pow_mod(&z, p, self);
        let diff = z_pow_p.sub(&z);
        let (_, remainder) = diff
            .euclidean_div(self)
            .expect("has_repeated_roots called with zero modulus polynomial");
        !remainder.is_zero()
    }
}

/// `base^exp mod modulus` inside the polynomial quotient ring `GF(p)[z]/(modulus)`.
fn poly_pow_mod(base: &Poly, mut exp: u64, modulus: &Poly) -> Poly {
    let p = base.modulus();
    let mut acc = Poly::new(p, vec![Scalar::one(p)]);
    let mut cur = reduce_mod(base, modulus);
    while exp > 0 {
        if exp & 1 == 1 {
            acc = reduce_mod(&acc.mul(&cur), modulus);
        }
        cur = reduce_mod(&cur.mul(&cur), modulus);
        exp >>= 1;
    }
    acc
}

fn reduce_mod(poly: &Poly, modulus: &Poly) -> Poly {
    if poly.coeffs().len() < modulus.coeffs().len() {
        return poly.clone();
    }
    let (_, r) = poly
        .euclidean_div(modulus)
        .expect("reduce_mod called with zero modulus polynomial");
    r
}

/// Errors raised by field/polynomial operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("division by the zero polynomial")]
    DivisionByZero,
}

/// Deterministic Miller–Rabin primality test, correct for all `u64` inputs
/// using the witness set `{2,3,5,7,11,13,17,19,23,29,31,37}` (sufficient up
/// to `3,317,044,064,679,887,385,961,981`, well past `u64::MAX`).
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }
    let mut d = n - 1;
    let mut r = 0u32;
    while d % 2 == 0 {
        d /= 2;
        r += 1;
    }
    'witness: for &a in &[2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = mulmod_pow(a % n, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 0..r.saturating_sub(1) {
            x = mulmod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mulmod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn mulmod_pow(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1u64 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mulmod(acc, base, m);
        }
        base = mulmod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// The least prime strictly greater than `k` (spec §6 "Derived constants").
pub fn first_prime_greater_than(k: u64) -> u64 {
    let mut candidate = k + 1;
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality_matches_known_primes() {
        for p in [2u64, 3, 5, 7, 11, 13, 17, 997, 7919] {
            assert!(is_prime(p), "{p} should be prime");
        }
        for c in [0u64, 1, 4, 6, 8, 9, 15, 100, 1000] {
            assert!(!is_prime(c), "{c} should be composite");
        }
    }

    #[test]
    fn first_prime_greater_than_has_no_primes_between() {
        let k = 16u64;
        let p = first_prime_greater_than(k);
        assert_eq!(p, 17);
        for c in (k + 1)..p {
            assert!(!is_prime(c));
        }
    }

    #[test]
    fn vanishing_polynomial_matches_scenario() {
        // p=17, A=[1,2,3,4,5]: (z-1)(z-2)(z-3)(z-4)(z-5) mod 17
        //   = z^5 + 2z^4 + 0z^3 + 13z^2 + 2z + 16
        let p = 17u64;
        let mut poly = Poly::new(p, vec![Scalar::one(p)]);
        for a in [1u64, 2, 3, 4, 5] {
            let factor = Poly::new(p, vec![Scalar::new(a, p).neg(), Scalar::one(p)]);
            poly = poly.mul(&factor);
        }
        let coeffs: Vec<u64> = poly.coeffs().iter().map(|c| c.value()).collect();
        assert_eq!(coeffs, vec![16, 2, 13, 0, 2, 1]);
    }

    #[test]
    fn euclidean_div_round_trips() {
        let p = 101u64;
        let a = Poly::new(
            p,
            vec![Scalar::new(6, p), Scalar::new(11, p), Scalar::new(6, p), Scalar::one(p)],
        ); // (z+1)(z+2)(z+3)
        let b = Poly::new(p, vec![Scalar::new(1, p), Scalar::one(p)]); // z+1
        let (q, r) = a.euclidean_div(&b).unwrap();
        assert!(r.is_zero());
        let back = q.mul(&b);
        assert_eq!(back, a);
    }

    #[test]
    fn division_by_zero_fails() {
        let p = 17u64;
        let a = Poly::new(p, vec![Scalar::one(p)]);
        let zero = Poly::zero(p);
        assert_eq!(a.euclidean_div(&zero), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn roots_agree_between_strategies() {
        let p = 17u64;
        let mut poly = Poly::new(p, vec![Scalar::one(p)]);
        let roots_in = [1u64, 2, 3, 4, 5];
        for a in roots_in {
            let factor = Poly::new(p, vec![Scalar::new(a, p).neg(), Scalar::one(p)]);
            poly = poly.mul(&factor);
        }
        let mut via_factoring = poly.roots_of_squarefree();
        let mut via_brute_force = poly.brute_force_roots();
        via_factoring.sort();
        via_brute_force.sort();
        assert_eq!(via_factoring, via_brute_force);
        assert_eq!(via_factoring, roots_in.to_vec());
    }

    #[test]
    fn repeated_root_is_detected() {
        let p = 17u64;
        // (z-1)^2 (z-2)(z-3)(z-4)
        let mut poly = Poly::new(p, vec![Scalar::one(p)]);
        for a in [1u64, 1, 2, 3, 4] {
            let factor = Poly::new(p, vec![Scalar::new(a, p).neg(), Scalar::one(p)]);
            poly = poly.mul(&factor);
        }
        assert!(poly.has_repeated_roots());
    }

    #[test]
    fn squarefree_poly_has_no_repeated_roots() {
        let p = 17u64;
        let mut poly = Poly::new(p, vec![Scalar::one(p)]);
        for a in [1u64, 2, 3, 4, 5] {
            let factor = Poly::new(p, vec![Scalar::new(a, p).neg(), Scalar::one(p)]);
            poly = poly.mul(&factor);
        }
        assert!(!poly.has_repeated_roots());
    }
}
