use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Fieldless name of a cipher variant, including the keying scheme and
/// family of substitution ciphers.
///
/// The display form is the name shown to learners, such as `K1 Aristocrat`
/// or `Hill 2x2`. The serialized form is `snake_case`, such as
/// `k1_aristocrat`.
#[derive(
    Serialize, Deserialize, Display, EnumString, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CipherKind {
    Caesar,
    Atbash,
    Affine,

    #[strum(serialize = "K1 Aristocrat")]
    K1Aristocrat,
    #[strum(serialize = "K2 Aristocrat")]
    K2Aristocrat,
    #[strum(serialize = "K3 Aristocrat")]
    K3Aristocrat,
    #[strum(serialize = "Random Aristocrat")]
    RandomAristocrat,

    #[strum(serialize = "K1 Patristocrat")]
    K1Patristocrat,
    #[strum(serialize = "K2 Patristocrat")]
    K2Patristocrat,
    #[strum(serialize = "K3 Patristocrat")]
    K3Patristocrat,
    #[strum(serialize = "Random Patristocrat")]
    RandomPatristocrat,

    #[strum(serialize = "K1 Xenocrypt")]
    K1Xenocrypt,
    #[strum(serialize = "K2 Xenocrypt")]
    K2Xenocrypt,
    #[strum(serialize = "K3 Xenocrypt")]
    K3Xenocrypt,
    #[strum(serialize = "Random Xenocrypt")]
    RandomXenocrypt,

    #[strum(serialize = "Hill 2x2")]
    #[serde(rename = "hill_2x2")]
    Hill2x2,
    #[strum(serialize = "Hill 3x3")]
    #[serde(rename = "hill_3x3")]
    Hill3x3,
    Porta,
    Nihilist,
    Baconian,
    Checkerboard,
    #[strum(serialize = "Fractionated Morse")]
    FractionatedMorse,
    #[strum(serialize = "Complete Columnar")]
    CompleteColumnar,
    Cryptarithm,
}

impl CipherKind {
    /// Returns whether the kind is one of the twelve keyed or random
    /// substitution kinds.
    pub fn is_substitution(self) -> bool {
        use CipherKind::*;
        matches!(
            self,
            K1Aristocrat
                | K2Aristocrat
                | K3Aristocrat
                | RandomAristocrat
                | K1Patristocrat
                | K2Patristocrat
                | K3Patristocrat
                | RandomPatristocrat
                | K1Xenocrypt
                | K2Xenocrypt
                | K3Xenocrypt
                | RandomXenocrypt
        )
    }
}
