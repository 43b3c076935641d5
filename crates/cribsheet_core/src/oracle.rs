//! Per-unit correctness checking.
//!
//! Grading, progress, and hints all decide what a unit's correct value is
//! through [`Oracle::expected()`], so the three can never disagree.

use cribsheet_cipher::hill::Matrix2;
use cribsheet_cipher::{AlphabetPair, Cipher, arith, hill, porta, text, tokens};

use crate::scoring::DEFAULT_SCORING;
use crate::{Puzzle, UnitId, domain};

/// Value implied by the forward transform for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expected {
    /// Plaintext (or keyword) letter.
    Letter(char),
    /// Entry of the Hill decryption matrix, in `0..26`.
    Number(i64),
    /// Fractionated Morse code for a ciphertext letter.
    Morse {
        /// Ciphertext letter.
        letter: char,
        /// Code that maps to `letter` in the fractionation table.
        code: String,
    },
}

/// Returns whether `value` is the correct value for `unit` of `puzzle`.
///
/// Returns `false` for units outside the puzzle's domain, for blank values,
/// and for units whose correct value cannot be derived because key material
/// is missing or inconsistent.
pub fn is_unit_correct(puzzle: &Puzzle, unit: UnitId, value: &str) -> bool {
    domain::contains(puzzle, &DEFAULT_SCORING, unit) && Oracle::new(puzzle).check(unit, value)
}

/// Returns the correct value for `unit` of `puzzle`, in the form a learner
/// would enter it, or `None` if it cannot be derived.
///
/// This does not check that `unit` belongs to the puzzle's domain.
pub fn solution(puzzle: &Puzzle, unit: UnitId) -> Option<String> {
    Oracle::new(puzzle).solution(unit)
}

/// Returns whether `value` counts as filled in for the puzzle.
///
/// Fractionated Morse values only count once they are three symbols long.
pub(crate) fn is_filled(puzzle: &Puzzle, value: &str) -> bool {
    let value = value.trim();
    match puzzle.cipher {
        Cipher::FractionatedMorse { .. } if !puzzle.keyword_recovery => value.chars().count() == 3,
        _ => !value.is_empty(),
    }
}

/// Correct-value lookup for every unit of one puzzle.
///
/// Everything derived from the plaintext, ciphertext, and key material is
/// computed once in [`Oracle::new()`], so each lookup is cheap and a pass over
/// all units stays linear in the puzzle length.
#[derive(Debug)]
pub(crate) struct Oracle<'a> {
    puzzle: &'a Puzzle,
    keyword: Option<Vec<char>>,
    plaintext: Vec<char>,
    ciphertext: Vec<char>,
    direct: Option<&'a AlphabetPair>,
    pair: Option<AlphabetPair>,
    /// Number of Baconian groups or checkerboard tokens.
    token_count: usize,
    cells: Vec<(String, char)>,
    porta_key: Vec<char>,
    hill_inverse: Option<Matrix2>,
}

impl<'a> Oracle<'a> {
    pub(crate) fn new(puzzle: &'a Puzzle) -> Self {
        let cipher = &puzzle.cipher;
        Self {
            puzzle,
            keyword: puzzle.graded_keyword(),
            plaintext: puzzle.plaintext_letters(),
            ciphertext: puzzle.ciphertext_letters(),
            direct: puzzle.direct_alphabets.as_ref().filter(|pair| !pair.is_empty()),
            pair: match cipher {
                Cipher::Substitution { .. } => cipher.alphabet_pair(),
                _ => None,
            },
            token_count: match cipher {
                Cipher::Baconian { .. } => tokens::baconian_groups(&puzzle.ciphertext).len(),
                Cipher::Checkerboard { .. } => tokens::checkerboard_tokens(&puzzle.ciphertext).len(),
                _ => 0,
            },
            cells: match cipher {
                Cipher::Cryptarithm { groups } => tokens::cryptarithm_cells(groups),
                _ => vec![],
            },
            porta_key: match cipher {
                Cipher::Porta { keyword } => text::latin_letters(keyword),
                _ => vec![],
            },
            hill_inverse: match cipher {
                Cipher::Hill2x2 { matrix, decryption } => decryption.or_else(|| hill::inverse_2x2(*matrix)),
                _ => None,
            },
        }
    }

    /// Returns the correct value for `unit` in the form a learner would
    /// enter it.
    pub(crate) fn solution(&self, unit: UnitId) -> Option<String> {
        Some(match self.expected(unit)? {
            Expected::Letter(c) => c.to_string(),
            Expected::Number(n) => n.to_string(),
            Expected::Morse { code, .. } => code,
        })
    }

    /// Same as [`is_unit_correct()`], but without the domain check.
    pub(crate) fn check(&self, unit: UnitId, value: &str) -> bool {
        let value = text::normalize_answer(value);
        if value.is_empty() {
            return false;
        }
        let Some(expected) = self.expected(unit) else {
            log::trace!("no derivable solution for unit {unit} of {} puzzle", self.puzzle.kind());
            return false;
        };
        match expected {
            Expected::Letter(c) => single_char(&value).map(|v| self.fold(v)) == Some(c),
            Expected::Number(n) => value
                .parse::<i64>()
                .is_ok_and(|v| v.rem_euclid(cribsheet_cipher::MODULUS) == n),
            Expected::Morse { letter, .. } => {
                let Cipher::FractionatedMorse { table } = &self.puzzle.cipher else {
                    return false;
                };
                value.chars().count() == 3
                    && table
                        .iter()
                        .any(|(code, &v)| code.to_uppercase() == value && text::upper(v) == letter)
            }
        }
    }

    /// Folds letters that the cipher cannot distinguish.
    fn fold(&self, c: char) -> char {
        match self.puzzle.cipher {
            Cipher::Nihilist { .. } if c == 'J' && self.keyword.is_none() => 'I',
            _ => c,
        }
    }

    /// Derives the correct value for a unit from the puzzle's plaintext and
    /// key material.
    pub(crate) fn expected(&self, unit: UnitId) -> Option<Expected> {
        use UnitId::{Cell, Letter, Position};

        if let UnitId::Keyword(i) = unit {
            return self.keyword.as_ref()?.get(i).copied().map(Expected::Letter);
        }
        if self.keyword.is_some() {
            return None;
        }

        if let Letter(c) = unit
            && let Some(pair) = self.direct
        {
            return pair.decrypt(c).map(Expected::Letter);
        }

        let plain_at = |i: usize| self.plaintext.get(i).copied();
        let letter = match (&self.puzzle.cipher, unit) {
            (Cipher::Caesar { shift: Some(shift) }, Letter(c)) => {
                text::latin_letter(arith::caesar_decrypt(text::latin_index(c)?, *shift))
            }
            // Without a shift, fall back to the plaintext letter where `c` first
            // appears.
            (Cipher::Caesar { shift: None }, Letter(c)) => {
                let i = self.ciphertext.iter().position(|&x| x == c)?;
                plain_at(i)?
            }
            (Cipher::Atbash, Letter(c)) => text::latin_letter(arith::atbash(text::latin_index(c)?)),
            (Cipher::Affine { a: Some(a), b: Some(b) }, Letter(c)) => {
                text::latin_letter(arith::affine_decrypt(text::latin_index(c)?, *a, *b)?)
            }
            (Cipher::Substitution { .. }, Letter(c)) => self.pair.as_ref()?.decrypt(c)?,
            (Cipher::FractionatedMorse { table }, Letter(c)) => {
                let (code, _) = table.iter().find(|&(_, &v)| text::upper(v) == c)?;
                return Some(Expected::Morse {
                    letter: c,
                    code: code.to_uppercase(),
                });
            }

            (Cipher::Hill2x2 { .. }, Cell { row, col }) => {
                let n = *self.hill_inverse?.get(row)?.get(col)?;
                return Some(Expected::Number(n.rem_euclid(cribsheet_cipher::MODULUS)));
            }
            (
                Cipher::Hill2x2 { .. } | Cipher::Hill3x3 { .. } | Cipher::CompleteColumnar { .. },
                Position(i),
            ) => plain_at(i)?,
            (Cipher::Nihilist { .. }, Position(i)) => match plain_at(i)? {
                'J' => 'I',
                c => c,
            },
            (Cipher::Porta { .. }, Position(i)) => {
                let c = *self.ciphertext.get(i)?;
                let key = *self.porta_key.get(i.checked_rem(self.porta_key.len())?)?;
                porta::swap(c, key)?
            }
            (Cipher::Baconian { .. } | Cipher::Checkerboard { .. }, Position(i)) => {
                if i >= self.token_count {
                    return None;
                }
                plain_at(i)?
            }
            (Cipher::Cryptarithm { .. }, Position(i)) => self.cells.get(i)?.1,

            _ => return None,
        };
        Some(Expected::Letter(letter))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
