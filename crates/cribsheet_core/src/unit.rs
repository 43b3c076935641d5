use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier of one gradable unit of a puzzle.
///
/// Which variant a puzzle uses depends on its cipher: substitution ciphers
/// grade one unit per distinct ciphertext letter, positional ciphers grade
/// one unit per plaintext letter, and the Hill 2x2 cipher also grades the
/// cells of its decryption matrix.
///
/// The text form is used as a map key in serialized answers:
///
/// | Unit                       | Text   |
/// |----------------------------|--------|
/// | `Letter('K')`              | `K`    |
/// | `Position(12)`             | `12`   |
/// | `Cell { row: 0, col: 1 }`  | `m0,1` |
/// | `Keyword(3)`               | `k3`   |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitId {
    /// Ciphertext letter.
    Letter(char),
    /// Index into the letters of the plaintext.
    Position(usize),
    /// Cell of the Hill decryption matrix.
    Cell {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Index into the letters of the keyword.
    Keyword(usize),
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitId::Letter(c) => write!(f, "{c}"),
            UnitId::Position(i) => write!(f, "{i}"),
            UnitId::Cell { row, col } => write!(f, "m{row},{col}"),
            UnitId::Keyword(i) => write!(f, "k{i}"),
        }
    }
}

/// Error produced when parsing a [`UnitId`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseUnitError {
    /// Empty string
    #[error("empty unit identifier")]
    Empty,
    /// Bad index
    #[error("bad index in unit identifier: {0}")]
    BadIndex(#[from] ParseIntError),
    /// Matrix cell without a comma
    #[error("expected matrix cell like `m0,1`, got {0:?}")]
    BadCell(String),
    /// Anything else
    #[error("unrecognized unit identifier {0:?}")]
    Unrecognized(String),
}

impl FromStr for UnitId {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(ParseUnitError::Empty);
        };
        if chars.as_str().is_empty() && first.is_alphabetic() {
            return Ok(UnitId::Letter(cribsheet_cipher::text::upper(first)));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return Ok(UnitId::Position(s.parse()?));
        }
        if let Some(rest) = s.strip_prefix('m') {
            let (row, col) = rest
                .split_once(',')
                .ok_or_else(|| ParseUnitError::BadCell(s.to_owned()))?;
            return Ok(UnitId::Cell {
                row: row.trim().parse()?,
                col: col.trim().parse()?,
            });
        }
        if let Some(rest) = s.strip_prefix('k') {
            return Ok(UnitId::Keyword(rest.parse()?));
        }
        Err(ParseUnitError::Unrecognized(s.to_owned()))
    }
}

impl Serialize for UnitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
