use std::collections::BTreeMap;
use std::path::Path;

use cribsheet_cipher::CipherKind;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

const SCORING_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_SCORING_STR: &str = include_str!("default_scoring.yaml");

lazy_static! {
    pub(crate) static ref DEFAULT_SCORING: ScoringConfig =
        serde_norway::from_str(DEFAULT_SCORING_STR).expect("error loading default scoring config");
}

/// Error produced when loading a [`ScoringConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading or merging config sources
    #[error("error loading scoring config: {0}")]
    Load(#[from] config::ConfigError),
    /// Error parsing YAML
    #[error("error parsing scoring config: {0}")]
    Parse(#[from] serde_norway::Error),
    /// Config parsed but contains unusable values
    #[error("invalid scoring config: {0}")]
    Invalid(String),
}

/// Tuning constants for grading and point values.
///
/// Any of these can be overridden by a user config file. See
/// `default_scoring.yaml` for the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Weight of the decryption matrix in Hill 2x2 grading.
    pub hill_matrix_weight: f64,
    /// Weight of the recovered plaintext in Hill 2x2 grading.
    pub hill_plaintext_weight: f64,

    /// Points before the difficulty and length multipliers.
    pub base_points: f64,
    /// Divisor applied after the multipliers.
    pub divisor: f64,
    /// Minimum heuristic point value.
    pub min_points: f64,
    /// Maximum heuristic point value.
    pub max_points: f64,

    /// Difficulty multiplier for kinds missing from `multipliers`.
    pub default_multiplier: f64,
    /// Difficulty multiplier per cipher kind.
    #[serde(default)]
    pub multipliers: BTreeMap<CipherKind, f64>,
    /// Difficulty multipliers for Baconian binary types.
    pub baconian: BaconianMultipliers,
    /// Plaintext length bands, in increasing order.
    pub length_bands: Vec<LengthBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        DEFAULT_SCORING.clone()
    }
}

impl ScoringConfig {
    /// Loads the default config, overridden by the YAML file at `path` if
    /// one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SCORING_STR, SCORING_FILE_FORMAT));
        if let Some(path) = path {
            log::debug!("loading scoring config from {}", path.display());
            config = config.add_source(config::File::from(path).format(SCORING_FILE_FORMAT));
        }
        let ret: Self = config.build()?.try_deserialize()?;
        ret.validate()?;
        Ok(ret)
    }

    /// Loads the default config, overridden by a YAML string.
    pub fn from_yaml_overrides(yaml: &str) -> Result<Self, ConfigError> {
        let ret: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SCORING_STR, SCORING_FILE_FORMAT))
            .add_source(config::File::from_str(yaml, SCORING_FILE_FORMAT))
            .build()?
            .try_deserialize()?;
        ret.validate()?;
        Ok(ret)
    }

    /// Returns an error if any constant is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.hill_matrix_weight < 0.0 || self.hill_plaintext_weight < 0.0 {
            return invalid("Hill weights must not be negative".to_owned());
        }
        if self.divisor <= 0.0 {
            return invalid(format!("divisor must be positive, got {}", self.divisor));
        }
        if self.min_points > self.max_points {
            return invalid(format!(
                "min_points ({}) exceeds max_points ({})",
                self.min_points, self.max_points,
            ));
        }
        if self.length_bands.is_empty() {
            return invalid("at least one length band is required".to_owned());
        }
        let missing = CipherKind::iter()
            .filter(|kind| !self.multipliers.contains_key(kind))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            log::debug!("using default multiplier for {missing:?}");
        }
        Ok(())
    }

    /// Returns the difficulty multiplier for a cipher kind.
    pub fn multiplier(&self, kind: CipherKind) -> f64 {
        self.multipliers.get(&kind).copied().unwrap_or(self.default_multiplier)
    }

    /// Returns the length multiplier for a plaintext of `letters` letters.
    pub fn length_multiplier(&self, letters: usize) -> f64 {
        self.length_bands
            .iter()
            .find(|band| band.below.is_none_or(|below| letters < below))
            .or(self.length_bands.last())
            .map_or(1.0, |band| band.multiplier)
    }
}

/// Difficulty multipliers for Baconian binary types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BaconianMultipliers {
    /// `A/B`.
    pub plain: f64,
    /// `Vowels/Consonants` or `Odd/Even`.
    pub paired: f64,
    /// Any type of the form `X vs Y`.
    pub versus: f64,
    /// Anything else, such as symbol sets.
    pub other: f64,
}

impl BaconianMultipliers {
    /// Returns the multiplier for a binary type description.
    pub fn for_binary_type(&self, binary_type: &str) -> f64 {
        match binary_type.trim() {
            "A/B" => self.plain,
            "Vowels/Consonants" | "Odd/Even" => self.paired,
            s if s.contains(" vs ") => self.versus,
            _ => self.other,
        }
    }
}

/// Plaintext length band.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LengthBand {
    /// Exclusive upper bound on letter count, or `None` for the last band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<usize>,
    /// Multiplier for plaintexts in this band.
    pub multiplier: f64,
}
