//! Modular letter arithmetic for the Caesar, Atbash, and Affine ciphers.
//!
//! Letters are numbered `A = 0` through `Z = 25`. All functions here accept
//! any `i64` and reduce every operand mod 26 before combining them, so key
//! material of any size never overflows.

use crate::MODULUS;

/// Returns the multiplicative inverse of `a` mod 26, or `None` if `a` shares
/// a factor with 26.
///
/// This is an exhaustive search over `1..26`, so it works for any `a`
/// including negative or unreduced values.
pub fn mod_inverse(a: i64) -> Option<i64> {
    let a = reduce(a);
    (1..MODULUS).find(|i| (a * i).rem_euclid(MODULUS) == 1)
}

/// Reduces `x` to `0..26`.
pub fn reduce(x: i64) -> i64 {
    x.rem_euclid(MODULUS)
}

/// Encrypts a letter number with a Caesar shift.
pub fn caesar_encrypt(x: i64, shift: i64) -> i64 {
    reduce(reduce(x) + reduce(shift))
}

/// Decrypts a letter number with a Caesar shift.
pub fn caesar_decrypt(y: i64, shift: i64) -> i64 {
    reduce(reduce(y) - reduce(shift))
}

/// Applies Atbash, which is its own inverse.
pub fn atbash(x: i64) -> i64 {
    MODULUS - 1 - reduce(x)
}

/// Encrypts a letter number as `a*x + b`.
pub fn affine_encrypt(x: i64, a: i64, b: i64) -> i64 {
    reduce(reduce(a) * reduce(x) + reduce(b))
}

/// Decrypts a letter number as `a⁻¹ * (y - b)`, or returns `None` if `a` has
/// no inverse.
pub fn affine_decrypt(y: i64, a: i64, b: i64) -> Option<i64> {
    let a_inv = mod_inverse(a)?;
    Some(reduce(a_inv * (reduce(y) - reduce(b))))
}
