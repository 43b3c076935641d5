//! Answer checking, grading, and hints for classical cipher practice puzzles.
//!
//! A [`Puzzle`] is a plaintext, its ciphertext, the [`Cipher`] that produced
//! it, and the learner's progress on it. Everything in this crate is a pure
//! function of a puzzle (plus a random source, for hints):
//!
//! - [`is_unit_correct()`] checks one learner-provided value
//! - [`grade_puzzle()`] scores a whole puzzle
//! - [`Puzzle::apply_hint()`] reveals a crib or some units
//! - [`resolve_points()`] decides how much a puzzle is worth
//! - [`grade_submission()`] grades many puzzles at once
//!
//! Invalid or incomplete key material never causes an error here. Units that
//! cannot be verified are simply treated as incorrect.

#[macro_use]
extern crate lazy_static;

mod cribs;
mod domain;
mod grading;
mod hints;
mod oracle;
mod points;
mod puzzle;
mod scoring;
mod submission;
mod unit;

pub use cribs::{choose_crib, second_crib};
pub use domain::{Domain, domains};
pub use grading::{Grade, grade_puzzle, grade_with};
pub use hints::{HintEvent, hint_rng};
pub use oracle::{is_unit_correct, solution};
pub use points::{heuristic_points, resolve_points};
pub use puzzle::{Answer, HintProgress, Puzzle};
pub use scoring::{BaconianMultipliers, ConfigError, LengthBand, ScoringConfig};
pub use submission::{
    Submission, SubmissionGrade, average_progress, grade_submission, is_solved, progress,
};
pub use unit::{ParseUnitError, UnitId};

pub use cribsheet_cipher::{Cipher, CipherKind};

#[cfg(test)]
mod tests;
