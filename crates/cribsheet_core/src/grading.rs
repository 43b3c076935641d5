use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::oracle::{Oracle, is_filled};
use crate::{Puzzle, ScoringConfig, UnitId, domains, resolve_points};

/// Result of grading one puzzle.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Grade {
    /// Number of gradable units, excluding hinted units.
    pub total_inputs: usize,
    /// Number of gradable units with a value filled in.
    pub filled_inputs: usize,
    /// Number of filled units whose value is correct.
    pub correct_inputs: usize,
    /// Points earned.
    pub score: f64,
    /// Points possible.
    pub max_score: f64,
    /// Points possible for the units filled in.
    pub attempted_score: f64,
}

/// Grades a puzzle against its resolved point value.
pub fn grade_puzzle(puzzle: &Puzzle, config: &ScoringConfig) -> Grade {
    let max_score = resolve_points(puzzle, None, config);
    grade_with(puzzle, max_score, &BTreeSet::new(), config)
}

/// Grades a puzzle against `max_score`, additionally excluding the units in
/// `extra_hinted`.
///
/// Within each domain, `attempted_score` is the filled fraction of
/// `max_score` and `score` is the correct fraction of `attempted_score`. The
/// domains' results are blended by weight.
pub fn grade_with(
    puzzle: &Puzzle,
    max_score: f64,
    extra_hinted: &BTreeSet<UnitId>,
    config: &ScoringConfig,
) -> Grade {
    if let Err(e) = puzzle.cipher.validate() {
        log::warn!("grading {} puzzle with unusable key material: {e}", puzzle.kind());
    }

    let oracle = Oracle::new(puzzle);
    let mut ret = Grade {
        max_score,
        ..Default::default()
    };

    for domain in domains(puzzle, config) {
        let mut total = 0;
        let mut filled = 0;
        let mut correct = 0;
        let gradable = domain
            .units
            .iter()
            .filter(|&&unit| !puzzle.hinted.contains(&unit) && !extra_hinted.contains(&unit));
        for &unit in gradable {
            total += 1;
            let Some(value) = puzzle.answer.get(unit) else {
                continue;
            };
            if !is_filled(puzzle, value) {
                continue;
            }
            filled += 1;
            let is_correct = oracle.check(unit, value);
            log::trace!("unit {unit} = {value:?}: {}", if is_correct { "correct" } else { "incorrect" });
            if is_correct {
                correct += 1;
            }
        }

        let attempted_score = ratio(filled, total) * max_score;
        let score = ratio(correct, filled) * attempted_score;
        log::trace!(
            "{} domain of {} puzzle: {correct}/{filled}/{total} correct/filled/total",
            domain.label,
            puzzle.kind(),
        );

        ret.total_inputs += total;
        ret.filled_inputs += filled;
        ret.correct_inputs += correct;
        ret.attempted_score += domain.weight * attempted_score;
        ret.score += domain.weight * score;
    }

    ret
}

/// Returns `n / d`, or 0 if `d` is 0.
fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}
