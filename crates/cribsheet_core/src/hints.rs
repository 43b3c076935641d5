//! Hints: cribs first, then random reveals.

use cribsheet_cipher::{Cipher, tokens};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::oracle::Oracle;
use crate::{Puzzle, ScoringConfig, UnitId, choose_crib, domains, second_crib};

/// Outcome of a hint request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HintEvent {
    /// Text to show the learner, such as a crib.
    Text(String),
    /// Units whose correct values were written into the answer.
    Revealed(Vec<UnitId>),
    /// Nothing left to reveal.
    Exhausted,
}

/// Returns a random number generator seeded by hashing `seed`, so that a
/// sequence of hints can be reproduced.
pub fn hint_rng(seed: &str) -> ChaCha12Rng {
    let digest = Sha256::digest(seed.as_bytes());
    ChaCha12Rng::from_seed(digest.into())
}

impl Puzzle {
    /// Returns a copy with the next hint applied, along with what the hint
    /// was.
    ///
    /// Hints go through these tiers, skipping any that do not apply:
    ///
    /// 1. Baconian binary type, or checkerboard keys
    /// 2. crib
    /// 3. second crib (complete columnar only)
    /// 4. random reveal
    ///
    /// Cryptarithms go straight to random reveals. A random reveal picks a
    /// unit that is neither hinted nor already correct, writes its correct
    /// value into the answer, and marks it hinted. For ciphers made of symbol
    /// groups, every position sharing the group is revealed together.
    #[must_use]
    pub fn apply_hint<R: Rng + ?Sized>(&self, rng: &mut R, config: &ScoringConfig) -> (Self, HintEvent) {
        let mut ret = self.clone();
        if self.submitted {
            return (ret, HintEvent::Exhausted);
        }
        ret.hint_progress.requests += 1;
        let event = ret.next_hint(rng, config);
        log::debug!("hint #{} on {} puzzle: {event:?}", ret.hint_progress.requests, ret.kind());
        (ret, event)
    }

    fn next_hint<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ScoringConfig) -> HintEvent {
        if matches!(self.cipher, Cipher::Cryptarithm { .. }) {
            return self.reveal(rng, config);
        }

        match &self.cipher {
            Cipher::Baconian {
                binary_type: Some(binary_type),
            } if !self.hint_progress.binary_type_shown && !binary_type.trim().is_empty() => {
                let text = format!("Binary Type: {}", binary_type.trim());
                self.hint_progress.binary_type_shown = true;
                return HintEvent::Text(text);
            }

            Cipher::Checkerboard {
                row_key,
                col_key,
                polybius_key,
                uses_ij,
            } if !self.hint_progress.keys_shown && !row_key.is_empty() && !col_key.is_empty() => {
                let mut text = format!("Row key: {row_key}. Column key: {col_key}. Polybius key: {polybius_key}.");
                if *uses_ij {
                    text += " I/J combined.";
                }
                self.hint_progress.keys_shown = true;
                return HintEvent::Text(text);
            }

            _ => (),
        }

        if !self.hint_progress.crib_shown
            && let Some(crib) = choose_crib(self)
        {
            self.hint_progress.crib_shown = true;
            return HintEvent::Text(format!("Crib: {crib}"));
        }

        if matches!(self.cipher, Cipher::CompleteColumnar { .. })
            && !self.hint_progress.second_crib_shown
            && let Some(crib) = second_crib(self)
        {
            self.hint_progress.second_crib_shown = true;
            return HintEvent::Text(format!("Second Crib: {crib}"));
        }

        self.reveal(rng, config)
    }

    /// Returns the units that a random reveal may pick.
    pub(crate) fn reveal_candidates(&self, config: &ScoringConfig) -> Vec<UnitId> {
        let oracle = Oracle::new(self);
        domains(self, config)
            .into_iter()
            // The Hill matrix is never revealed.
            .filter(|domain| domain.label != "matrix")
            .flat_map(|domain| domain.units)
            .filter(|unit| !self.hinted.contains(unit))
            .filter(|&unit| !self.answer.get(unit).is_some_and(|v| oracle.check(unit, v)))
            .filter(|&unit| oracle.expected(unit).is_some())
            .collect()
    }

    fn reveal<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ScoringConfig) -> HintEvent {
        let candidates = self.reveal_candidates(config);
        let Some(&target) = candidates.choose(rng) else {
            return HintEvent::Exhausted;
        };

        let oracle = Oracle::new(self);
        let values = self
            .reveal_group(target)
            .into_iter()
            .filter(|unit| !self.hinted.contains(unit))
            .filter_map(|unit| Some((unit, oracle.solution(unit)?)))
            .collect::<Vec<_>>();

        let mut revealed = vec![];
        for (unit, value) in values {
            self.answer.set(unit, &value);
            self.hinted.insert(unit);
            revealed.push(unit);
        }
        HintEvent::Revealed(revealed)
    }

    /// Returns every unit that shares a symbol group with `target`, including
    /// `target` itself.
    fn reveal_group(&self, target: UnitId) -> Vec<UnitId> {
        let UnitId::Position(i) = target else {
            return vec![target];
        };
        let group_tokens = match &self.cipher {
            Cipher::Baconian { .. } => tokens::baconian_groups(&self.ciphertext),
            Cipher::Checkerboard { .. } => tokens::checkerboard_tokens(&self.ciphertext),
            Cipher::Cryptarithm { groups } => tokens::cryptarithm_cells(groups)
                .into_iter()
                .map(|(digit, _)| digit)
                .collect(),
            _ => return vec![target],
        };
        let Some(token) = group_tokens.get(i) else {
            return vec![target];
        };
        group_tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| *t == token)
            .map(|(j, _)| UnitId::Position(j))
            .collect()
    }
}
