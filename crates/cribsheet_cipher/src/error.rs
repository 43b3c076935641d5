use thiserror::Error;

use crate::CipherKind;

/// Inconsistency in a cipher's key material.
///
/// Checking and grading never return this; they treat inconsistent key
/// material as unverifiable. It is produced by [`crate::Cipher::validate()`]
/// and by constructors that check their input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Required key field is absent or empty
    #[error("{kind} cipher is missing its {field}")]
    MissingKey {
        /// Cipher kind.
        kind: CipherKind,
        /// Name of the missing field.
        field: &'static str,
    },
    /// Affine coefficient shares a factor with 26
    #[error("affine coefficient {0} has no inverse mod 26")]
    NotInvertible(i64),
    /// Hill matrix determinant shares a factor with 26
    #[error("matrix determinant {det} has no inverse mod 26")]
    SingularMatrix {
        /// Determinant, reduced mod 26.
        det: i64,
    },
    /// Matrix text has the wrong shape or a non-integer entry
    #[error("expected {size}x{size} integer matrix, got {text:?}")]
    BadMatrix {
        /// Expected side length.
        size: usize,
        /// Text that failed to parse.
        text: String,
    },
    /// Random substitution key is not a permutation of the alphabet
    #[error("substitution key {key:?} is not a permutation of the {len}-letter alphabet")]
    BadSubstitutionKey {
        /// Normalized key.
        key: String,
        /// Alphabet length.
        len: usize,
    },
    /// Fractionated Morse table entry is not a 3-symbol code of `.`, `-`, `x`
    #[error("invalid fractionated morse code {0:?}")]
    BadMorseCode(String),
    /// Cryptarithm word and digit counts differ
    #[error("cryptarithm word {word:?} has {letters} letters but {digits} digits")]
    DigitCountMismatch {
        /// Word of the group.
        word: String,
        /// Number of letters in the word.
        letters: usize,
        /// Number of digits in the group.
        digits: usize,
    },
}
