//! Unit domains: the sets of units a puzzle is graded on.

use cribsheet_cipher::{Cipher, tokens};
use itertools::Itertools;

use crate::{Puzzle, ScoringConfig, UnitId};

/// Set of units graded together, with the weight of its score.
///
/// Most puzzles have one domain of weight 1. The Hill 2x2 cipher has two: the
/// decryption matrix and the recovered plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// Short name of the domain, used in logs.
    pub label: &'static str,
    /// Fraction of the point value that the domain is worth.
    pub weight: f64,
    /// Units of the domain, without duplicates.
    pub units: Vec<UnitId>,
}

impl Domain {
    fn new(label: &'static str, weight: f64, units: Vec<UnitId>) -> Self {
        Self { label, weight, units }
    }

    fn positions(label: &'static str, weight: f64, len: usize) -> Self {
        Self::new(label, weight, (0..len).map(UnitId::Position).collect())
    }
}

/// Returns the domains that a puzzle is graded on.
pub fn domains(puzzle: &Puzzle, config: &ScoringConfig) -> Vec<Domain> {
    if let Some(keyword) = puzzle.graded_keyword() {
        let units = (0..keyword.len()).map(UnitId::Keyword).collect();
        return vec![Domain::new("keyword", 1.0, units)];
    }

    let plain_len = puzzle.plaintext_letters().len();
    match &puzzle.cipher {
        Cipher::Caesar { .. }
        | Cipher::Atbash
        | Cipher::Affine { .. }
        | Cipher::Substitution { .. }
        | Cipher::FractionatedMorse { .. } => {
            let letters = puzzle.ciphertext_letters().into_iter().unique().map(UnitId::Letter);
            vec![Domain::new("letters", 1.0, letters.collect())]
        }

        Cipher::Hill2x2 { .. } => {
            let cells = (0..2)
                .cartesian_product(0..2)
                .map(|(row, col)| UnitId::Cell { row, col })
                .collect();
            vec![
                Domain::new("matrix", config.hill_matrix_weight, cells),
                Domain::positions("plaintext", config.hill_plaintext_weight, plain_len),
            ]
        }

        Cipher::Hill3x3 { .. }
        | Cipher::Nihilist { .. }
        | Cipher::CompleteColumnar { .. } => vec![Domain::positions("plaintext", 1.0, plain_len)],

        Cipher::Porta { .. } => {
            let len = std::cmp::min(puzzle.ciphertext_letters().len(), plain_len);
            vec![Domain::positions("plaintext", 1.0, len)]
        }

        Cipher::Baconian { .. } => {
            let len = std::cmp::min(tokens::baconian_groups(&puzzle.ciphertext).len(), plain_len);
            vec![Domain::positions("plaintext", 1.0, len)]
        }

        Cipher::Checkerboard { .. } => {
            let len = std::cmp::min(tokens::checkerboard_tokens(&puzzle.ciphertext).len(), plain_len);
            vec![Domain::positions("plaintext", 1.0, len)]
        }

        Cipher::Cryptarithm { groups } => {
            vec![Domain::positions("letters", 1.0, tokens::cryptarithm_cells(groups).len())]
        }
    }
}

/// Returns whether `unit` belongs to any of the puzzle's domains.
pub(crate) fn contains(puzzle: &Puzzle, config: &ScoringConfig, unit: UnitId) -> bool {
    domains(puzzle, config).iter().any(|d| d.units.contains(&unit))
}

#[cfg(test)]
mod tests {
    use cribsheet_cipher::{Family, SubstitutionKey};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_letter_domain_is_unique_in_order() {
        let puzzle = Puzzle::new(Cipher::Caesar { shift: Some(3) }, "Hello", "KHOOR");
        let letter_domains = domains(&puzzle, &ScoringConfig::default());
        assert_eq!(letter_domains.len(), 1);
        assert_eq!(
            letter_domains[0].units,
            "KHOR".chars().map(UnitId::Letter).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn test_hill_2x2_domains() {
        let cipher = Cipher::Hill2x2 {
            matrix: [[3, 3], [2, 5]],
            decryption: None,
        };
        let puzzle = Puzzle::new(cipher, "HELP", "HIAT");
        let hill_domains = domains(&puzzle, &ScoringConfig::default());
        assert_eq!(hill_domains.len(), 2);
        assert_eq!(hill_domains[0].units.len(), 4);
        assert_eq!(hill_domains[0].weight, 0.5);
        assert_eq!(hill_domains[1].units.len(), 4);
    }

    #[test]
    fn test_keyword_domain() {
        let cipher = Cipher::Substitution {
            family: Family::Aristocrat,
            key: SubstitutionKey::K1 {
                keyword: "ZEBRA".to_owned(),
                shift: None,
            },
        };
        let mut puzzle = Puzzle::new(cipher, "ABC", "XYZ");
        puzzle.keyword_recovery = true;
        let keyword_domains = domains(&puzzle, &ScoringConfig::default());
        assert_eq!(keyword_domains[0].units, (0..5).map(UnitId::Keyword).collect::<Vec<_>>());

        // Ciphers without a keyword ignore keyword recovery.
        let mut puzzle = Puzzle::new(Cipher::Atbash, "ABC", "ZYX");
        puzzle.keyword_recovery = true;
        assert_eq!(domains(&puzzle, &ScoringConfig::default())[0].label, "letters");
    }
}
