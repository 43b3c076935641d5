//! Text normalization shared by every cipher.

/// Returns the uppercase form of a single character.
///
/// Characters whose uppercase form is more than one character (such as `ß`)
/// are returned unchanged.
pub fn upper(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Returns whether `c` is an uppercase letter `A`-`Z`.
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Returns the uppercase `A`-`Z` letters of `s`, dropping everything else.
///
/// Accented letters are dropped rather than folded; use
/// [`spanish_normalized`] first when folding is wanted.
pub fn latin_letters(s: &str) -> Vec<char> {
    s.chars().map(upper).filter(|&c| is_latin_letter(c)).collect()
}

/// Folds Spanish accented vowels and `Ñ` to their plain Latin letters and
/// uppercases the result.
pub fn spanish_normalized(s: &str) -> String {
    s.chars()
        .map(upper)
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Splits `s` into its maximal runs of ASCII letters, uppercased.
pub fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_uppercase())
        .collect()
}

/// Returns the index of `c` in the `A`-`Z` alphabet.
pub fn latin_index(c: char) -> Option<i64> {
    is_latin_letter(c).then(|| c as i64 - 'A' as i64)
}

/// Returns the letter at index `i` (mod 26) of the `A`-`Z` alphabet.
pub fn latin_letter(i: i64) -> char {
    (b'A' + i.rem_euclid(crate::MODULUS) as u8) as char
}

/// Trims a learner-provided value and uppercases it.
pub fn normalize_answer(s: &str) -> String {
    s.trim().chars().map(upper).collect()
}
