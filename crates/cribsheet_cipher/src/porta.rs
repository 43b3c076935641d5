//! Porta cipher table.
//!
//! The Porta cipher is reciprocal: each keyword letter selects one of 13 rows
//! (one per letter pair `AB`, `CD`, ..., `YZ`), and the row swaps each letter
//! of the header `A`-`M` with the row letter beneath it. Encryption and
//! decryption are the same lookup.

/// Header row shared by every row of the table.
pub const HEADER: &str = "ABCDEFGHIJKLM";

/// Table rows, indexed by keyword letter pair (`AB` is row 0, `YZ` is row 12).
///
/// Only the first 13 letters of each row are used for the swap; the trailing
/// `A`-`M` completes the 26-letter row as it is usually printed.
pub const ROWS: [&str; 13] = [
    "NOPQRSTUVWXYZABCDEFGHIJKLM", // AB
    "OPQRSTUVWXYZNABCDEFGHIJKLM", // CD
    "PQRSTUVWXYZNOABCDEFGHIJKLM", // EF
    "QRSTUVWXYZNOPABCDEFGHIJKLM", // GH
    "RSTUVWXYZNOPQABCDEFGHIJKLM", // IJ
    "STUVWXYZNOPQRABCDEFGHIJKLM", // KL
    "TUVWXYZNOPQRSABCDEFGHIJKLM", // MN
    "UVWXYZNOPQRSTABCDEFGHIJKLM", // OP
    "VWXYZNOPQRSTUABCDEFGHIJKLM", // QR
    "WXYZNOPQRSTUVABCDEFGHIJKLM", // ST
    "XYZNOPQRSTUVWABCDEFGHIJKLM", // UV
    "YZNOPQRSTUVWXABCDEFGHIJKLM", // WX
    "ZNOPQRSTUVWXYABCDEFGHIJKLM", // YZ
];

/// Returns the table row selected by a keyword letter.
pub fn row(key_letter: char) -> Option<&'static str> {
    let i = crate::text::latin_index(crate::text::upper(key_letter))?;
    ROWS.get(i as usize / 2).copied()
}

/// Swaps `letter` using the row selected by `key_letter`.
///
/// Header letters (`A`-`M`) are looked up in the header and replaced by the
/// row letter below them; other letters are looked up in the row and
/// replaced by the header letter above them.
pub fn swap(letter: char, key_letter: char) -> Option<char> {
    let row = row(key_letter)?;
    if let Some(i) = HEADER.find(letter) {
        row.chars().nth(i)
    } else {
        let i = row.find(letter)?;
        HEADER.chars().nth(i)
    }
}

/// Returns the keyword letter used at `position` of the letter stream.
pub fn key_letter_at(keyword: &str, position: usize) -> Option<char> {
    let letters = crate::text::latin_letters(keyword);
    if letters.is_empty() {
        return None;
    }
    letters.get(position % letters.len()).copied()
}

/// Decrypts (or encrypts) a whole letter stream with a keyword.
pub fn apply(text: &[char], keyword: &str) -> Option<Vec<char>> {
    text.iter()
        .enumerate()
        .map(|(i, &c)| swap(c, key_letter_at(keyword, i)?))
        .collect()
}
