use cribsheet_cipher::{Cipher, text};

use crate::{Puzzle, ScoringConfig};

/// Returns the maximum score of a puzzle.
///
/// Uses the first of these that is positive:
///
/// 1. `override_points`
/// 2. the point value stored on the puzzle
/// 3. [`heuristic_points()`]
pub fn resolve_points(puzzle: &Puzzle, override_points: Option<f64>, config: &ScoringConfig) -> f64 {
    override_points
        .filter(|&p| p > 0.0)
        .or(puzzle.points.filter(|&p| p > 0.0))
        .unwrap_or_else(|| heuristic_points(puzzle, config))
}

/// Estimates a point value from the cipher kind and the plaintext length.
///
/// The length counts only the plain `A`-`Z` letters of the plaintext, so
/// accented letters and `Ñ` do not count towards it.
///
/// The result is rounded to one decimal place and clamped to the configured
/// range.
pub fn heuristic_points(puzzle: &Puzzle, config: &ScoringConfig) -> f64 {
    let difficulty = match &puzzle.cipher {
        Cipher::Baconian {
            binary_type: Some(binary_type),
        } => config.baconian.for_binary_type(binary_type),
        cipher => config.multiplier(cipher.kind()),
    };
    let length = config.length_multiplier(text::latin_letters(&puzzle.plaintext).len());
    let raw = (config.base_points * difficulty * length).round();
    let points = (raw / config.divisor * 10.0).round() / 10.0;
    points.max(config.min_points).min(config.max_points)
}
