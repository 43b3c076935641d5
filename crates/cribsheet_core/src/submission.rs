//! Grading and progress across a whole test.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::oracle::{Oracle, is_filled};
use crate::{Grade, Puzzle, ScoringConfig, UnitId, domains, grade_with, resolve_points};

/// Set of puzzles submitted together.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Submission {
    /// Puzzles, in test order.
    pub puzzles: Vec<Puzzle>,
    /// Point values that replace the puzzles' own, keyed by puzzle index.
    #[serde(default)]
    pub point_overrides: BTreeMap<usize, f64>,
    /// Hinted units tracked outside the puzzles, keyed by puzzle index. These
    /// are merged with each puzzle's own hinted units.
    #[serde(default)]
    pub hinted: BTreeMap<usize, BTreeSet<UnitId>>,
}

/// Result of grading a [`Submission`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SubmissionGrade {
    /// Grade of each puzzle, in test order.
    pub puzzles: Vec<Grade>,
    /// Sum of puzzle scores.
    pub score: f64,
    /// Sum of puzzle maximum scores.
    pub max_score: f64,
    /// Sum of puzzle attempted scores.
    pub attempted_score: f64,
}

/// Grades every puzzle of a submission.
///
/// Puzzles are independent, so they are graded in parallel.
pub fn grade_submission(submission: &Submission, config: &ScoringConfig) -> SubmissionGrade {
    let no_hints = BTreeSet::new();
    let puzzles: Vec<Grade> = submission
        .puzzles
        .par_iter()
        .enumerate()
        .map(|(i, puzzle)| {
            let max_score = resolve_points(puzzle, submission.point_overrides.get(&i).copied(), config);
            let extra_hinted = submission.hinted.get(&i).unwrap_or(&no_hints);
            grade_with(puzzle, max_score, extra_hinted, config)
        })
        .collect();

    log::debug!("graded submission of {} puzzles", puzzles.len());

    SubmissionGrade {
        score: puzzles.iter().map(|g| g.score).sum(),
        max_score: puzzles.iter().map(|g| g.max_score).sum(),
        attempted_score: puzzles.iter().map(|g| g.attempted_score).sum(),
        puzzles,
    }
}

/// Returns the percentage (0 to 100) of a puzzle's units that are filled in
/// or hinted, with domains blended by weight.
pub fn progress(puzzle: &Puzzle, config: &ScoringConfig) -> f64 {
    domains(puzzle, config)
        .iter()
        .filter(|domain| !domain.units.is_empty())
        .map(|domain| {
            let done = domain
                .units
                .iter()
                .filter(|&&unit| {
                    puzzle.hinted.contains(&unit)
                        || puzzle.answer.get(unit).is_some_and(|v| is_filled(puzzle, v))
                })
                .count();
            domain.weight * done as f64 / domain.units.len() as f64 * 100.0
        })
        .sum()
}

/// Returns the mean [`progress()`] of a list of puzzles, or 0 for an empty
/// list.
pub fn average_progress(puzzles: &[Puzzle], config: &ScoringConfig) -> f64 {
    if puzzles.is_empty() {
        return 0.0;
    }
    puzzles.iter().map(|p| progress(p, config)).sum::<f64>() / puzzles.len() as f64
}

/// Returns whether every unit of a puzzle is hinted or correct.
///
/// A puzzle with no units is never solved.
pub fn is_solved(puzzle: &Puzzle, config: &ScoringConfig) -> bool {
    let domains = domains(puzzle, config);
    let oracle = Oracle::new(puzzle);
    let mut units = domains.iter().flat_map(|d| &d.units).peekable();
    units.peek().is_some()
        && units.all(|&unit| {
            puzzle.hinted.contains(&unit)
                || puzzle.answer.get(unit).is_some_and(|v| oracle.check(unit, v))
        })
}
