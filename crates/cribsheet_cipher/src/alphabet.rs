//! Plaintext/ciphertext alphabet derivation for substitution ciphers.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::text::{is_latin_letter, upper};

/// English alphabet.
pub const ENGLISH: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Spanish alphabet, with `Ñ` between `N` and `O`.
pub const SPANISH: &str = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";

/// Alphabet over which a substitution cipher operates.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    /// 26-letter English alphabet.
    #[default]
    English,
    /// 27-letter Spanish alphabet.
    Spanish,
}

impl Alphabet {
    /// Returns the letters of the alphabet in natural order.
    pub fn standard(self) -> Vec<char> {
        match self {
            Alphabet::English => ENGLISH.chars().collect(),
            Alphabet::Spanish => SPANISH.chars().collect(),
        }
    }

    /// Returns the number of letters in the alphabet.
    pub fn len(self) -> usize {
        match self {
            Alphabet::English => 26,
            Alphabet::Spanish => 27,
        }
    }

    /// Returns whether `c` is an uppercase letter of the alphabet.
    pub fn contains(self, c: char) -> bool {
        is_latin_letter(c) || (self == Alphabet::Spanish && c == 'Ñ')
    }

    /// Returns the uppercase letters of `s` that belong to the alphabet.
    pub fn letters(self, s: &str) -> Vec<char> {
        s.chars().map(upper).filter(|&c| self.contains(c)).collect()
    }

    /// Builds a keyed alphabet: the letters of `keyword` in first-occurrence
    /// order, followed by the remaining letters in natural order.
    ///
    /// Only `A`-`Z` keyword letters are used. The Spanish alphabet places `Ñ`
    /// last, after `Z`.
    pub fn keyed(self, keyword: &str) -> Vec<char> {
        let mut ret: Vec<char> = keyword
            .chars()
            .map(upper)
            .filter(|&c| is_latin_letter(c))
            .unique()
            .collect();
        let rest = ENGLISH.chars().filter(|c| !ret.contains(c)).collect_vec();
        ret.extend(rest);
        if self == Alphabet::Spanish {
            ret.push('Ñ');
        }
        ret
    }
}

/// Keyed alphabet construction used by a substitution cipher.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyedScheme {
    /// Keyed plaintext alphabet, straight ciphertext alphabet.
    K1,
    /// Straight plaintext alphabet, keyed ciphertext alphabet.
    K2,
    /// Keyed plaintext and ciphertext alphabets, offset by a rotation.
    K3,
}

impl KeyedScheme {
    /// Returns the rotation applied to the ciphertext alphabet when none is
    /// specified.
    ///
    /// K3 defaults to 1 so that no letter maps to itself.
    pub fn default_shift(self) -> usize {
        match self {
            KeyedScheme::K1 | KeyedScheme::K2 => 0,
            KeyedScheme::K3 => 1,
        }
    }

    /// Derives the plaintext/ciphertext alphabet pairing for a keyword.
    pub fn alphabet_pair(self, alphabet: Alphabet, keyword: &str, shift: Option<usize>) -> AlphabetPair {
        let keyed = alphabet.keyed(keyword);
        let standard = alphabet.standard();
        let (plain, mut cipher) = match self {
            KeyedScheme::K1 => (keyed, standard),
            KeyedScheme::K2 => (standard, keyed),
            KeyedScheme::K3 => (keyed.clone(), keyed),
        };
        if !cipher.is_empty() {
            let shift = shift.unwrap_or(self.default_shift()) % cipher.len();
            cipher.rotate_left(shift);
        }
        AlphabetPair::new(plain, cipher)
    }
}

/// Pairing of a plaintext alphabet with a ciphertext alphabet: the letter at
/// index `i` of `cipher` decrypts to the letter at index `i` of `plain`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct AlphabetPair {
    /// Plaintext alphabet.
    pub plain: String,
    /// Ciphertext alphabet.
    pub cipher: String,
}

impl AlphabetPair {
    /// Constructs a pairing from two letter sequences.
    pub fn new(plain: impl IntoIterator<Item = char>, cipher: impl IntoIterator<Item = char>) -> Self {
        Self {
            plain: plain.into_iter().collect(),
            cipher: cipher.into_iter().collect(),
        }
    }

    /// Pairs a random-substitution key with the straight alphabet. `key[i]`
    /// is the ciphertext letter for plaintext letter `i`.
    pub fn from_random_key(alphabet: Alphabet, key: &str) -> Self {
        Self::new(alphabet.standard(), key.chars().map(upper))
    }

    /// Returns the plaintext letter that `cipher_letter` decrypts to.
    ///
    /// If the alphabets differ in length, only the common prefix is paired.
    pub fn decrypt(&self, cipher_letter: char) -> Option<char> {
        self.cipher
            .chars()
            .zip(self.plain.chars())
            .find(|&(c, _)| c == cipher_letter)
            .map(|(_, p)| p)
    }

    /// Returns the ciphertext letter that `plain_letter` encrypts to.
    pub fn encrypt(&self, plain_letter: char) -> Option<char> {
        self.plain
            .chars()
            .zip(self.cipher.chars())
            .find(|&(p, _)| p == plain_letter)
            .map(|(_, c)| c)
    }

    /// Returns whether the pairing has no letters.
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() || self.cipher.is_empty()
    }
}
