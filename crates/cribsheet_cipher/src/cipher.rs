use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alphabet::KeyedScheme;
use crate::hill::{self, Matrix2, Matrix3};
use crate::{Alphabet, AlphabetPair, CipherError, CipherKind, arith, text, tokens};

/// Cipher variant together with the key material needed to reproduce its
/// forward transform.
///
/// Every field is optional on the wire; missing key material deserializes to
/// `None` or an empty string and makes the affected units unverifiable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cipher {
    /// Shift cipher.
    Caesar {
        /// Shift applied during encryption.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shift: Option<i64>,
    },
    /// Reversed-alphabet cipher.
    Atbash,
    /// Linear cipher `y = a*x + b`.
    Affine {
        /// Multiplicative coefficient.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        a: Option<i64>,
        /// Additive coefficient.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        b: Option<i64>,
    },
    /// Monoalphabetic substitution (aristocrat, patristocrat, xenocrypt).
    Substitution {
        /// Alphabet and spacing family.
        #[serde(default)]
        family: Family,
        /// How the substitution alphabet was built.
        key: SubstitutionKey,
    },
    /// Hill cipher with a 2x2 key whose decryption matrix is also graded.
    #[serde(rename = "hill_2x2")]
    Hill2x2 {
        /// Encryption key matrix.
        matrix: Matrix2,
        /// Precomputed decryption matrix.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decryption: Option<Matrix2>,
    },
    /// Hill cipher with a given 3x3 key; only the plaintext is graded.
    #[serde(rename = "hill_3x3")]
    Hill3x3 {
        /// Encryption key matrix.
        matrix: Matrix3,
    },
    /// Porta polyalphabetic cipher.
    Porta {
        /// Keyword selecting the table row for each letter.
        #[serde(default)]
        keyword: String,
    },
    /// Nihilist substitution over a keyed Polybius square.
    Nihilist {
        /// Keyword of the Polybius square.
        #[serde(default)]
        polybius_key: String,
        /// Keyword added to each plaintext coordinate pair.
        #[serde(default)]
        cipher_key: String,
    },
    /// Baconian biliteral cipher.
    Baconian {
        /// Description of the two symbol classes, such as `A/B` or
        /// `Vowels/Consonants`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        binary_type: Option<String>,
    },
    /// Straddling checkerboard over a keyed Polybius square.
    Checkerboard {
        /// Row key.
        #[serde(default)]
        row_key: String,
        /// Column key.
        #[serde(default)]
        col_key: String,
        /// Keyword of the Polybius square.
        #[serde(default)]
        polybius_key: String,
        /// Whether `I` and `J` share a cell.
        #[serde(default)]
        uses_ij: bool,
    },
    /// Fractionated Morse.
    FractionatedMorse {
        /// Map from 3-symbol Morse code to ciphertext letter.
        #[serde(default)]
        table: BTreeMap<String, char>,
    },
    /// Complete columnar transposition.
    CompleteColumnar {
        /// Column-order keyword.
        #[serde(default)]
        key: String,
    },
    /// Letter-for-digit arithmetic puzzle.
    Cryptarithm {
        /// Words whose letters the learner recovers from digits.
        #[serde(default)]
        groups: Vec<DigitGroup>,
    },
}

impl Cipher {
    /// Returns the fieldless kind of the cipher.
    pub fn kind(&self) -> CipherKind {
        use CipherKind as K;
        match self {
            Cipher::Caesar { .. } => K::Caesar,
            Cipher::Atbash => K::Atbash,
            Cipher::Affine { .. } => K::Affine,
            Cipher::Substitution { family, key } => match (family, key) {
                (Family::Aristocrat, SubstitutionKey::K1 { .. }) => K::K1Aristocrat,
                (Family::Aristocrat, SubstitutionKey::K2 { .. }) => K::K2Aristocrat,
                (Family::Aristocrat, SubstitutionKey::K3 { .. }) => K::K3Aristocrat,
                (Family::Aristocrat, SubstitutionKey::Random { .. }) => K::RandomAristocrat,
                (Family::Patristocrat, SubstitutionKey::K1 { .. }) => K::K1Patristocrat,
                (Family::Patristocrat, SubstitutionKey::K2 { .. }) => K::K2Patristocrat,
                (Family::Patristocrat, SubstitutionKey::K3 { .. }) => K::K3Patristocrat,
                (Family::Patristocrat, SubstitutionKey::Random { .. }) => K::RandomPatristocrat,
                (Family::Xenocrypt, SubstitutionKey::K1 { .. }) => K::K1Xenocrypt,
                (Family::Xenocrypt, SubstitutionKey::K2 { .. }) => K::K2Xenocrypt,
                (Family::Xenocrypt, SubstitutionKey::K3 { .. }) => K::K3Xenocrypt,
                (Family::Xenocrypt, SubstitutionKey::Random { .. }) => K::RandomXenocrypt,
            },
            Cipher::Hill2x2 { .. } => K::Hill2x2,
            Cipher::Hill3x3 { .. } => K::Hill3x3,
            Cipher::Porta { .. } => K::Porta,
            Cipher::Nihilist { .. } => K::Nihilist,
            Cipher::Baconian { .. } => K::Baconian,
            Cipher::Checkerboard { .. } => K::Checkerboard,
            Cipher::FractionatedMorse { .. } => K::FractionatedMorse,
            Cipher::CompleteColumnar { .. } => K::CompleteColumnar,
            Cipher::Cryptarithm { .. } => K::Cryptarithm,
        }
    }

    /// Returns the alphabet that the cipher's letters are drawn from.
    pub fn alphabet(&self) -> Alphabet {
        match self {
            Cipher::Substitution { family, .. } => family.alphabet(),
            _ => Alphabet::English,
        }
    }

    /// Returns whether the ciphertext keeps the plaintext's word breaks.
    pub fn has_word_spacing(&self) -> bool {
        match self {
            Cipher::Substitution { family, .. } => family.has_word_spacing(),
            _ => true,
        }
    }

    /// Returns the non-empty keyword that a learner can be asked to recover,
    /// if the cipher has one.
    pub fn keyword(&self) -> Option<&str> {
        let keyword = match self {
            Cipher::Substitution { key, .. } => key.keyword()?,
            Cipher::Porta { keyword } => keyword,
            Cipher::Nihilist { cipher_key, .. } => cipher_key,
            Cipher::CompleteColumnar { key } => key,
            _ => return None,
        };
        (!keyword.trim().is_empty()).then_some(keyword)
    }

    /// Returns the plaintext/ciphertext alphabet pairing for substitution
    /// ciphers, or `None` for other ciphers and for missing keys.
    pub fn alphabet_pair(&self) -> Option<AlphabetPair> {
        match self {
            Cipher::Substitution { family, key } => key.alphabet_pair(family.alphabet()),
            _ => None,
        }
    }

    /// Checks the key material for missing fields and values that make the
    /// cipher impossible to decrypt.
    pub fn validate(&self) -> Result<(), CipherError> {
        let kind = self.kind();
        let require = |value: &str, field: &'static str| {
            if value.trim().is_empty() {
                Err(CipherError::MissingKey { kind, field })
            } else {
                Ok(())
            }
        };
        match self {
            Cipher::Caesar { .. } | Cipher::Atbash | Cipher::Baconian { .. } => Ok(()),
            Cipher::Affine { a, b } => {
                let a = a.ok_or(CipherError::MissingKey { kind, field: "a" })?;
                b.ok_or(CipherError::MissingKey { kind, field: "b" })?;
                arith::mod_inverse(a).map(drop).ok_or(CipherError::NotInvertible(a))
            }
            Cipher::Substitution { family, key } => key.validate(kind, family.alphabet()),
            Cipher::Hill2x2 { matrix, decryption } => {
                hill::check_invertible_2x2(*matrix)?;
                match decryption {
                    Some(d) => hill::check_invertible_2x2(*d),
                    None => Ok(()),
                }
            }
            Cipher::Hill3x3 { matrix } => hill::check_invertible_3x3(*matrix),
            Cipher::Porta { keyword } => require(keyword, "keyword"),
            Cipher::Nihilist {
                polybius_key,
                cipher_key,
            } => {
                require(polybius_key, "polybius key")?;
                require(cipher_key, "cipher key")
            }
            Cipher::Checkerboard {
                row_key,
                col_key,
                polybius_key,
                ..
            } => {
                require(row_key, "row key")?;
                require(col_key, "column key")?;
                require(polybius_key, "polybius key")
            }
            Cipher::FractionatedMorse { table } => {
                if table.is_empty() {
                    return Err(CipherError::MissingKey { kind, field: "table" });
                }
                match table.keys().find(|code| !tokens::is_morse_triplet(code)) {
                    Some(code) => Err(CipherError::BadMorseCode(code.clone())),
                    None => Ok(()),
                }
            }
            Cipher::CompleteColumnar { key } => require(key, "key"),
            Cipher::Cryptarithm { groups } => {
                if groups.is_empty() {
                    return Err(CipherError::MissingKey { kind, field: "groups" });
                }
                groups.iter().try_for_each(DigitGroup::validate)
            }
        }
    }
}

/// Family of a monoalphabetic substitution cipher.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// English with word spacing.
    #[default]
    Aristocrat,
    /// English without word spacing.
    Patristocrat,
    /// Spanish with word spacing.
    Xenocrypt,
}

impl Family {
    /// Returns the alphabet of the family.
    pub fn alphabet(self) -> Alphabet {
        match self {
            Family::Aristocrat | Family::Patristocrat => Alphabet::English,
            Family::Xenocrypt => Alphabet::Spanish,
        }
    }

    /// Returns whether ciphertext of this family keeps word breaks.
    pub fn has_word_spacing(self) -> bool {
        self != Family::Patristocrat
    }
}

/// Key of a monoalphabetic substitution cipher.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SubstitutionKey {
    /// Keyed plaintext alphabet.
    K1 {
        /// Keyword.
        #[serde(default)]
        keyword: String,
        /// Rotation of the ciphertext alphabet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shift: Option<usize>,
    },
    /// Keyed ciphertext alphabet.
    K2 {
        /// Keyword.
        #[serde(default)]
        keyword: String,
        /// Rotation of the ciphertext alphabet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shift: Option<usize>,
    },
    /// Same keyed alphabet on both sides, rotated.
    K3 {
        /// Keyword.
        #[serde(default)]
        keyword: String,
        /// Rotation of the ciphertext alphabet (default 1).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shift: Option<usize>,
    },
    /// Arbitrary permutation. `key[i]` is the ciphertext letter for
    /// plaintext letter `i`.
    Random {
        /// Ciphertext alphabet indexed by plaintext letter.
        #[serde(default)]
        key: String,
    },
}

impl SubstitutionKey {
    /// Constructs a random key for a cipher family, checking that it is a
    /// permutation of the family's alphabet.
    pub fn random(family: Family, key: &str) -> Result<Self, CipherError> {
        let ret = SubstitutionKey::Random {
            key: text::normalize_answer(key),
        };
        let kind = match family {
            Family::Aristocrat => CipherKind::RandomAristocrat,
            Family::Patristocrat => CipherKind::RandomPatristocrat,
            Family::Xenocrypt => CipherKind::RandomXenocrypt,
        };
        ret.validate(kind, family.alphabet())?;
        Ok(ret)
    }

    /// Returns the keying scheme, or `None` for a random key.
    pub fn scheme(&self) -> Option<KeyedScheme> {
        match self {
            SubstitutionKey::K1 { .. } => Some(KeyedScheme::K1),
            SubstitutionKey::K2 { .. } => Some(KeyedScheme::K2),
            SubstitutionKey::K3 { .. } => Some(KeyedScheme::K3),
            SubstitutionKey::Random { .. } => None,
        }
    }

    /// Returns the keyword of a keyed alphabet.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            SubstitutionKey::K1 { keyword, .. }
            | SubstitutionKey::K2 { keyword, .. }
            | SubstitutionKey::K3 { keyword, .. } => Some(keyword),
            SubstitutionKey::Random { .. } => None,
        }
    }

    /// Derives the alphabet pairing, or returns `None` if the keyword or key
    /// is empty.
    pub fn alphabet_pair(&self, alphabet: Alphabet) -> Option<AlphabetPair> {
        match self {
            SubstitutionKey::K1 { keyword, shift }
            | SubstitutionKey::K2 { keyword, shift }
            | SubstitutionKey::K3 { keyword, shift } => {
                if text::latin_letters(keyword).is_empty() {
                    return None;
                }
                let scheme = self.scheme()?;
                Some(scheme.alphabet_pair(alphabet, keyword, *shift))
            }
            SubstitutionKey::Random { key } => {
                if key.trim().is_empty() {
                    return None;
                }
                Some(AlphabetPair::from_random_key(alphabet, key))
            }
        }
    }

    fn validate(&self, kind: CipherKind, alphabet: Alphabet) -> Result<(), CipherError> {
        match self {
            SubstitutionKey::K1 { keyword, .. }
            | SubstitutionKey::K2 { keyword, .. }
            | SubstitutionKey::K3 { keyword, .. } => {
                if text::latin_letters(keyword).is_empty() {
                    return Err(CipherError::MissingKey { kind, field: "keyword" });
                }
                Ok(())
            }
            SubstitutionKey::Random { key } => {
                let normalized = text::normalize_answer(key);
                let mut letters: Vec<char> = normalized.chars().collect();
                letters.sort_unstable();
                let mut standard = alphabet.standard();
                standard.sort_unstable();
                if normalized.is_empty() {
                    Err(CipherError::MissingKey { kind, field: "key" })
                } else if letters != standard {
                    Err(CipherError::BadSubstitutionKey {
                        key: normalized,
                        len: alphabet.len(),
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// One word of a cryptarithm with the digits that stand for its letters.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct DigitGroup {
    /// Word spelled by the digits.
    pub word: String,
    /// Space-separated digits, one per letter of `word`.
    pub digits: String,
}

impl DigitGroup {
    /// Constructs a group.
    pub fn new(word: &str, digits: &str) -> Self {
        Self {
            word: word.to_owned(),
            digits: digits.to_owned(),
        }
    }

    /// Returns the uppercase letters of the word.
    pub fn letters(&self) -> Vec<char> {
        text::latin_letters(&self.word)
    }

    /// Returns the digit tokens of the group.
    pub fn digits(&self) -> Vec<&str> {
        self.digits.split_whitespace().collect()
    }

    fn validate(&self) -> Result<(), CipherError> {
        let letters = self.letters().len();
        let digits = self.digits().len();
        if letters == digits {
            Ok(())
        } else {
            Err(CipherError::DigitCountMismatch {
                word: self.word.clone(),
                letters,
                digits,
            })
        }
    }
}
