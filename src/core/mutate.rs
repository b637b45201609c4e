// src/core/mutate.rs
//! Stem alternations used when conjugating weak verbs.
use crate::error::{BeygjaError, Result};

/// Lowercase letters a stem may contain.
const ALPHABET: &str = "aábcdðeéfghiíjklmnoópqrstuúvwxyýzþæö";

/// Single-letter vowel nuclei.
const VOWELS: &str = "aáeéiíoóuúyýæö";

/// Nuclei written with two letters; they count as one syllable.
const DIGRAPHS: [&str; 3] = ["au", "ei", "ey"];

/// Checks that `stem` only uses lowercase Icelandic letters.
pub fn check_alphabet(stem: &str) -> Result<()> {
    if stem.chars().all(|c| ALPHABET.contains(c)) {
        Ok(())
    } else {
        Err(BeygjaError::Alphabet {
            input: stem.to_string(),
        })
    }
}

/// Byte ranges of the vowel nuclei in `stem`, left to right.
fn nuclei(stem: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut chars = stem.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !VOWELS.contains(c) {
            continue;
        }
        let mut end = start + c.len_utf8();
        if let Some(&(_, next)) = chars.peek() {
            let mut pair = String::with_capacity(2);
            pair.push(c);
            pair.push(next);
            if DIGRAPHS.contains(&pair.as_str()) {
                end += next.len_utf8();
                chars.next();
            }
        }
        found.push((start, end));
    }
    found
}

/// Applies u-umlaut to a stem of `syllables` syllables.
///
/// The nucleus `syllables` places from the end is the base: a plain `a` there
/// becomes `ö`. Every plain `a` nucleus after the base becomes `u`. Digraphs
/// (`au`, `ei`, `ey`) are never touched. When `syllables` exceeds the number
/// of nuclei the first nucleus is the base.
///
/// `kall` -> `köll`, `kallað` (3) -> `kölluð`.
pub fn u_shift(stem: &str, syllables: usize) -> Result<String> {
    check_alphabet(stem)?;
    if !stem.contains('a') {
        return Ok(stem.to_string());
    }

    let nuclei = nuclei(stem);
    let base = nuclei.len().saturating_sub(syllables.max(1));

    let mut shifted = String::with_capacity(stem.len() + 2);
    let mut last = 0;
    for (index, &(start, end)) in nuclei.iter().enumerate().skip(base) {
        shifted.push_str(&stem[last..start]);
        match &stem[start..end] {
            "a" if index == base => shifted.push('ö'),
            "a" => shifted.push('u'),
            nucleus => shifted.push_str(nucleus),
        }
        last = end;
    }
    shifted.push_str(&stem[last..]);
    Ok(shifted)
}

/// Drops the stem-final `j` kept in the infinitive before `-i`/`-ir` endings.
///
/// `segj` -> `seg`, `flýj` -> `flý`, `heyj` -> `hey`; other stems are returned
/// unchanged.
pub fn j_stem(stem: &str) -> String {
    if let Some(rest) = stem.strip_suffix("eyj") {
        return format!("{rest}ey");
    }
    if let Some(rest) = stem.strip_suffix('j') {
        if rest.ends_with(['g', 'k', 'æ', 'ý']) {
            return rest.to_string();
        }
    }
    stem.to_string()
}
