//! Tokenizers for ciphers whose ciphertext is made of symbol groups rather
//! than letters.
//!
//! Each token lines up with one plaintext letter: token `i` encodes the
//! `i`th letter of the plaintext.

use itertools::Itertools;

use crate::DigitGroup;

/// Length of a Baconian group.
pub const BACONIAN_GROUP_LEN: usize = 5;
/// Length of a straddling-checkerboard token.
pub const CHECKERBOARD_TOKEN_LEN: usize = 2;

/// Removes whitespace from `s` and splits the rest into chunks of `n`
/// characters. A trailing partial chunk is dropped.
pub fn chunks(s: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return vec![];
    }
    let symbols = s.chars().filter(|c| !c.is_whitespace()).collect_vec();
    symbols
        .chunks_exact(n)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Splits Baconian ciphertext into its 5-symbol groups.
///
/// Groups are separated by whitespace. A symbol may take several `char`s
/// (emoji with variation selectors, for example), so spaced groups are kept
/// whole. Ciphertext written as a single unbroken run is cut every
/// [`BACONIAN_GROUP_LEN`] `char`s instead.
pub fn baconian_groups(ciphertext: &str) -> Vec<String> {
    let groups = ciphertext.split_whitespace().map(str::to_owned).collect_vec();
    if groups.len() > 1 {
        groups
    } else {
        chunks(ciphertext, BACONIAN_GROUP_LEN)
    }
}

/// Splits checkerboard ciphertext into its 2-symbol tokens.
pub fn checkerboard_tokens(ciphertext: &str) -> Vec<String> {
    chunks(ciphertext, CHECKERBOARD_TOKEN_LEN)
}

/// Flattens cryptarithm groups into `(digit, letter)` cells, one per letter
/// of every group word in order.
///
/// Groups whose digit count does not match their letter count contribute
/// only the cells they can pair.
pub fn cryptarithm_cells(groups: &[DigitGroup]) -> Vec<(String, char)> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .digits()
                .into_iter()
                .map(str::to_owned)
                .zip(group.letters())
                .collect_vec()
        })
        .collect()
}

/// Returns whether `s` is a valid fractionated Morse code: exactly three
/// symbols, each `.`, `-`, or `x`.
pub fn is_morse_triplet(s: &str) -> bool {
    s.chars().count() == 3 && s.chars().all(|c| matches!(c, '.' | '-' | 'x' | 'X'))
}
