//! Hill cipher matrix arithmetic mod 26.

use crate::MODULUS;
use crate::arith::{mod_inverse, reduce};
use crate::error::CipherError;

/// 2x2 Hill key or decryption matrix.
pub type Matrix2 = [[i64; 2]; 2];
/// 3x3 Hill key matrix.
pub type Matrix3 = [[i64; 3]; 3];

/// Reduces every entry of a matrix to `0..26`.
pub fn reduced<const N: usize>(m: [[i64; N]; N]) -> [[i64; N]; N] {
    m.map(|row| row.map(reduce))
}

/// Returns the determinant of a 2x2 matrix, reduced mod 26.
pub fn determinant_2x2(m: Matrix2) -> i64 {
    let [[a, b], [c, d]] = reduced(m);
    reduce(a * d - b * c)
}

/// Returns the determinant of a 3x3 matrix, reduced mod 26.
pub fn determinant_3x3(m: Matrix3) -> i64 {
    let [[a, b, c], [d, e, f], [g, h, i]] = reduced(m);
    (a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)).rem_euclid(MODULUS)
}

/// Returns the inverse of a 2x2 matrix mod 26, or `None` if its determinant
/// has no inverse.
///
/// The inverse is `det⁻¹ * adj(m)` with every entry reduced to `0..26`.
pub fn inverse_2x2(m: Matrix2) -> Option<Matrix2> {
    let det_inv = mod_inverse(determinant_2x2(m))?;
    let [[a, b], [c, d]] = reduced(m);
    let adj = [[d, -b], [-c, a]];
    Some(adj.map(|row| row.map(|x| (det_inv * x).rem_euclid(MODULUS))))
}

/// Returns an error if a 2x2 matrix is not invertible mod 26.
pub fn check_invertible_2x2(m: Matrix2) -> Result<(), CipherError> {
    let det = determinant_2x2(m);
    match mod_inverse(det) {
        Some(_) => Ok(()),
        None => Err(CipherError::SingularMatrix { det }),
    }
}

/// Returns an error if a 3x3 matrix is not invertible mod 26.
pub fn check_invertible_3x3(m: Matrix3) -> Result<(), CipherError> {
    let det = determinant_3x3(m);
    match mod_inverse(det) {
        Some(_) => Ok(()),
        None => Err(CipherError::SingularMatrix { det }),
    }
}

/// Multiplies a matrix by a column vector of letter numbers, mod 26.
pub fn apply<const N: usize>(m: [[i64; N]; N], v: [i64; N]) -> [i64; N] {
    let v = v.map(reduce);
    reduced(m).map(|row| reduce(row.iter().zip(v).map(|(a, b)| a * b).sum::<i64>()))
}

/// Parses a matrix from whitespace- or comma-separated integers in row-major
/// order, such as `"3 3; 2 5"` or `"3,3,2,5"`.
pub fn parse_matrix<const N: usize>(s: &str) -> Result<[[i64; N]; N], CipherError> {
    let bad = || CipherError::BadMatrix {
        size: N,
        text: s.to_owned(),
    };
    let entries = s
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<i64>().map_err(|_| bad()))
        .collect::<Result<Vec<i64>, _>>()?;
    if entries.len() != N * N {
        return Err(bad());
    }
    Ok(std::array::from_fn(|r| std::array::from_fn(|c| entries[r * N + c])))
}
