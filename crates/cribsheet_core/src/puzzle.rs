use std::collections::{BTreeMap, BTreeSet};

use cribsheet_cipher::{AlphabetPair, Cipher, CipherKind, text};
use serde::{Deserialize, Serialize};

use crate::UnitId;

/// Cipher puzzle and the learner's progress on it.
///
/// Puzzles are values: the reducer methods ([`Puzzle::apply_answer()`],
/// [`Puzzle::apply_hint()`], etc.) return a new puzzle and leave `self`
/// untouched. Once a puzzle is submitted, every reducer returns an unchanged
/// copy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Cipher variant and key material.
    pub cipher: Cipher,
    /// Source text.
    pub plaintext: String,
    /// Text shown to the learner.
    pub ciphertext: String,

    /// Precomputed plaintext/ciphertext alphabet pairing, which takes
    /// priority over the key material for ciphertext-letter units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_alphabets: Option<AlphabetPair>,
    /// Point value chosen when the puzzle was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    /// Whether the learner recovers the keyword instead of the plaintext.
    #[serde(default)]
    pub keyword_recovery: bool,
    /// Crib word chosen when the puzzle was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crib: Option<String>,

    /// Learner's current answer.
    #[serde(default)]
    pub answer: Answer,
    /// Units revealed by hints. These are excluded from grading.
    #[serde(default)]
    pub hinted: BTreeSet<UnitId>,
    /// Hints requested so far.
    #[serde(default)]
    pub hint_progress: HintProgress,
    /// Whether the puzzle has been submitted.
    #[serde(default)]
    pub submitted: bool,
}

impl Puzzle {
    /// Constructs an unattempted puzzle.
    pub fn new(cipher: Cipher, plaintext: impl Into<String>, ciphertext: impl Into<String>) -> Self {
        Self {
            cipher,
            plaintext: plaintext.into(),
            ciphertext: ciphertext.into(),
            direct_alphabets: None,
            points: None,
            keyword_recovery: false,
            crib: None,
            answer: Answer::default(),
            hinted: BTreeSet::new(),
            hint_progress: HintProgress::default(),
            submitted: false,
        }
    }

    /// Returns the kind of the puzzle's cipher.
    pub fn kind(&self) -> CipherKind {
        self.cipher.kind()
    }

    /// Returns the `A`-`Z` letters of the plaintext.
    ///
    /// Spanish plaintext is folded to unaccented letters first.
    pub fn plaintext_letters(&self) -> Vec<char> {
        text::latin_letters(&text::spanish_normalized(&self.plaintext))
    }

    /// Returns the letters of the ciphertext that belong to the cipher's
    /// alphabet.
    pub fn ciphertext_letters(&self) -> Vec<char> {
        self.cipher.alphabet().letters(&self.ciphertext)
    }

    /// Returns the letters of the keyword graded in keyword-recovery mode, or
    /// `None` if the puzzle does not grade a keyword.
    pub fn graded_keyword(&self) -> Option<Vec<char>> {
        if !self.keyword_recovery {
            return None;
        }
        let letters = text::latin_letters(self.cipher.keyword()?);
        (!letters.is_empty()).then_some(letters)
    }

    /// Returns a copy with the answer for `unit` set to `value`.
    ///
    /// The value is trimmed and uppercased; an empty value clears the unit.
    /// Hinted units keep their revealed value.
    #[must_use]
    pub fn apply_answer(&self, unit: UnitId, value: &str) -> Self {
        let mut ret = self.clone();
        if self.submitted || self.hinted.contains(&unit) {
            return ret;
        }
        ret.answer.set(unit, value);
        ret
    }

    /// Returns a copy with the answer for `unit` removed.
    #[must_use]
    pub fn clear_answer(&self, unit: UnitId) -> Self {
        self.apply_answer(unit, "")
    }

    /// Returns a copy that is frozen for scoring.
    #[must_use]
    pub fn submit(&self) -> Self {
        Self {
            submitted: true,
            ..self.clone()
        }
    }
}

/// Learner-provided values, keyed by unit.
///
/// Values are stored trimmed and uppercased, and are never empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Answer(BTreeMap<UnitId, String>);

impl Answer {
    /// Returns the value for `unit`, if one is filled in.
    pub fn get(&self, unit: UnitId) -> Option<&str> {
        self.0.get(&unit).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    /// Sets the value for `unit`, or clears it if `value` is blank.
    pub fn set(&mut self, unit: UnitId, value: &str) {
        let value = text::normalize_answer(value);
        if value.is_empty() {
            self.0.remove(&unit);
        } else {
            self.0.insert(unit, value);
        }
    }

    /// Iterates over filled units and their values.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &str)> {
        self.0.iter().map(|(&unit, value)| (unit, value.as_str()))
    }

    /// Returns the number of filled units, including units outside the
    /// puzzle's domain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no units are filled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(UnitId, String)> for Answer {
    fn from_iter<T: IntoIterator<Item = (UnitId, String)>>(iter: T) -> Self {
        let mut ret = Answer::default();
        for (unit, value) in iter {
            ret.set(unit, &value);
        }
        ret
    }
}

/// Record of the hints a learner has requested on one puzzle.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HintProgress {
    /// Number of hint requests, including ones that revealed nothing.
    pub requests: u32,
    /// Whether the binary type of a Baconian cipher has been shown.
    pub binary_type_shown: bool,
    /// Whether the keys of a checkerboard have been shown.
    pub keys_shown: bool,
    /// Whether the crib has been shown.
    pub crib_shown: bool,
    /// Whether the second crib of a columnar transposition has been shown.
    pub second_crib_shown: bool,
}
