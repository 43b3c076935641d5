//! Crib selection.
//!
//! A crib is a plaintext word given away to get the learner started. Crib
//! choice is deterministic: the same puzzle always gets the same crib.

use cribsheet_cipher::{Alphabet, Cipher, Family, text};
use itertools::Itertools;

use crate::Puzzle;

const ENGLISH_FIVE_LETTER_WORDS: &[&str] = &[
    "ABOUT", "THERE", "THEIR", "WHICH", "WOULD", "OTHER", "AFTER", "FIRST", "THESE", "THINK",
    "WHERE", "BEING", "EVERY", "GREAT", "MIGHT", "SHALL", "STILL", "THOSE", "WHILE", "NEVER",
];
const ENGLISH_COMMON_WORDS: &[&str] = &[
    "THAT", "WITH", "HAVE", "THIS", "FROM", "THEY", "WILL", "WHAT", "WHEN", "YOUR", "SAID",
    "EACH", "MAKE", "LIKE", "TIME", "THAN", "THEM", "BEEN", "MANY", "SOME",
];
const ENGLISH_TRIGRAMS: &[&str] = &[
    "THE", "AND", "ING", "ION", "TIO", "ENT", "ERE", "HER", "ATE", "VER", "TER", "THA", "FOR",
];
const ENGLISH_BIGRAMS: &[&str] = &[
    "TH", "HE", "IN", "ER", "AN", "RE", "ON", "AT", "EN", "ND", "TI", "ES", "OR", "TE", "OF",
];

const SPANISH_FIVE_LETTER_WORDS: &[&str] = &[
    "ENTRE", "SOBRE", "TODOS", "DONDE", "PUEDE", "AHORA", "TIENE", "HACER", "MUNDO", "NUNCA",
];
const SPANISH_COMMON_WORDS: &[&str] = &[
    "PARA", "COMO", "PERO", "TODO", "ESTA", "ESTE", "ELLA", "SOLO", "VIDA", "MUCHO",
];
const SPANISH_TRIGRAMS: &[&str] = &["QUE", "ENT", "CON", "EST", "ADO", "DEL", "LOS", "LAS", "ELA"];
const SPANISH_BIGRAMS: &[&str] = &[
    "DE", "ES", "EN", "EL", "LA", "OS", "AR", "UE", "RA", "RE", "ER", "AS", "ON",
];

/// Returns the crib for a puzzle, or `None` if the plaintext has no letters.
///
/// A crib stored on the puzzle always wins. Otherwise the crib is chosen from
/// the plaintext words by [`crib_word()`], except for patristocrats (whose
/// ciphertext has no word breaks), which use [`frequency_crib()`]. Spanish
/// plaintext is stripped of accents first.
pub fn choose_crib(puzzle: &Puzzle) -> Option<String> {
    if let Some(crib) = puzzle.crib.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return Some(crib.to_uppercase());
    }
    let plaintext = text::spanish_normalized(&puzzle.plaintext);
    let is_patristocrat = matches!(
        puzzle.cipher,
        Cipher::Substitution {
            family: Family::Patristocrat,
            ..
        }
    );
    let word_crib = if is_patristocrat { None } else { crib_word(&plaintext) };
    word_crib.or_else(|| {
        let letters = text::latin_letters(&plaintext).into_iter().collect::<String>();
        frequency_crib(&letters, puzzle.cipher.alphabet())
    })
}

/// Returns the second crib given for a complete columnar transposition: the
/// shortest word of at least 5 letters other than the first crib, or else the
/// longest word.
pub fn second_crib(puzzle: &Puzzle) -> Option<String> {
    let first = choose_crib(puzzle);
    let words = text::words(&text::spanish_normalized(&puzzle.plaintext))
        .into_iter()
        .filter(|w| w.len() >= 3 && Some(w) != first.as_ref())
        .sorted_by_key(|w| w.len())
        .collect_vec();
    let ret = words.iter().find(|w| w.len() >= 5).or(words.last())?;
    Some(ret.clone())
}

/// Picks a crib word from the words of `text`: the first of the shortest
/// words with at least 5 letters, or else at least 4 letters, or else the
/// first of the longest words.
pub(crate) fn crib_word(text: &str) -> Option<String> {
    let words = text::words(text);
    let shortest_with_min = |min: usize| {
        let candidates = words.iter().filter(|w| w.len() >= min);
        let shortest = candidates.clone().map(|w| w.len()).min()?;
        candidates.clone().find(|w| w.len() == shortest).cloned()
    };
    shortest_with_min(5)
        .or_else(|| shortest_with_min(4))
        .or_else(|| words.iter().rev().max_by_key(|w| w.len()).cloned())
}

/// Picks a crib from frequency-ranked lists: the first common 5-letter word
/// that appears in `letters`, else the first common word, else the first
/// trigram, else the first bigram, else the most frequent letter.
pub(crate) fn frequency_crib(letters: &str, alphabet: Alphabet) -> Option<String> {
    let lists = match alphabet {
        Alphabet::English => [
            ENGLISH_FIVE_LETTER_WORDS,
            ENGLISH_COMMON_WORDS,
            ENGLISH_TRIGRAMS,
            ENGLISH_BIGRAMS,
        ],
        Alphabet::Spanish => [
            SPANISH_FIVE_LETTER_WORDS,
            SPANISH_COMMON_WORDS,
            SPANISH_TRIGRAMS,
            SPANISH_BIGRAMS,
        ],
    };
    if let Some(found) = lists.iter().flat_map(|list| list.iter()).find(|w| letters.contains(*w)) {
        return Some((*found).to_owned());
    }
    let counts = letters.chars().counts();
    let (letter, _) = counts
        .into_iter()
        .max_by_key(|&(letter, count)| (count, std::cmp::Reverse(letter)))?;
    Some(letter.to_string())
}
