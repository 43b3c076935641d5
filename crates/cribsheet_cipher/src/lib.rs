//! Classical cipher registry and key derivation.
//!
//! This crate defines the closed set of cipher variants that Cribsheet can
//! check, grade, and hint, along with the pure functions that derive
//! decryption material from each variant's key: keyed alphabets, modular
//! inverses, the Porta table, Hill matrix inverses, and the tokenizers for
//! ciphers whose ciphertext is made of symbol groups.
//!
//! Nothing in here performs I/O or holds state.

pub mod alphabet;
pub mod arith;
mod cipher;
mod error;
pub mod hill;
mod kind;
pub mod porta;
pub mod text;
pub mod tokens;

pub use alphabet::{Alphabet, AlphabetPair, KeyedScheme};
pub use cipher::{Cipher, DigitGroup, Family, SubstitutionKey};
pub use error::CipherError;
pub use kind::CipherKind;

/// Size of the modular arithmetic used by the letter-arithmetic ciphers.
pub const MODULUS: i64 = 26;
