//! Number-theoretic primitives over arbitrary-precision integers.
//!
//! These are the plain textbook algorithms (trial division, Euclid,
//! square-and-multiply) rather than the optimized routines of `num-bigint-dig`,
//! so results are reproducible against a hand calculation.

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Deterministic primality test by trial division up to `√n`.
///
/// Checks 2 and 3, then candidates of the form `6k ± 1`.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n < two {
        return false;
    }
    if *n <= three {
        return true;
    }
    if n.is_even() || (n % &three).is_zero() {
        return false;
    }

    let six = BigUint::from(6u32);
    let mut i = BigUint::from(5u32);
    while &i * &i <= *n {
        if (n % &i).is_zero() || (n % (&i + &two)).is_zero() {
            return false;
        }
        i += &six;
    }
    true
}

/// Greatest common divisor by the Euclidean algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let rem = &a % &b;
        a = std::mem::replace(&mut b, rem);
    }
    a
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// The base is reduced modulo `modulus` first, so bases at or above the
/// modulus wrap. Panics if `modulus` is zero.
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exponent = exponent.clone();
    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = (&result * &base) % modulus;
        }
        exponent = exponent >> 1usize;
        base = (&base * &base) % modulus;
    }
    result
}

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm.
///
/// Returns a value in `[0, m)`, or `None` when `gcd(a, m) != 1` or `m` is zero.
/// Bézout coefficients are tracked modulo `m`, which keeps every intermediate
/// value unsigned.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    if m.is_one() {
        return Some(BigUint::zero());
    }

    let mut old_r = a % m;
    let mut r = m.clone();
    let mut old_s = BigUint::one();
    let mut s = BigUint::zero();

    while !r.is_zero() {
        let (quotient, rem) = old_r.div_rem(&r);
        old_r = std::mem::replace(&mut r, rem);
        let step = (&quotient * &s) % m;
        let next_s = (&old_s + m - step) % m;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if old_r.is_one() {
        Some(old_s % m)
    } else {
        None
    }
}
