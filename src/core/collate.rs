// src/core/collate.rs
use std::cmp::Ordering;

/// A total order over words. Reports and variant lists are sorted through
/// this so output is stable and reads in dictionary order.
pub trait Collator {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    fn sort(&self, words: &mut [String]) {
        words.sort_by(|a, b| self.compare(a, b));
    }
}

/// The Icelandic alphabet; accented vowels are letters of their own.
const ALPHABET: &str = "aábcdðeéfghiíjklmnoópqrstuúvwxyýzþæö";

/// Icelandic dictionary order.
///
/// Letters compare by their position in the Icelandic alphabet, case folded;
/// characters outside it sort after all letters by code point. Ties on the
/// folded key are broken lowercase-first, then by code point.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcelandicCollator;

impl IcelandicCollator {
    pub fn new() -> Self {
        Self
    }

    fn primary(c: char) -> (usize, u32) {
        let folded = c.to_lowercase().next().unwrap_or(c);
        match ALPHABET.chars().position(|l| l == folded) {
            Some(rank) => (rank, 0),
            None => (ALPHABET.chars().count(), folded as u32),
        }
    }
}

impl Collator for IcelandicCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let key = |s: &str| s.chars().map(Self::primary).collect::<Vec<_>>();
        key(a)
            .cmp(&key(b))
            .then_with(|| {
                let case = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();
                case(a).cmp(&case(b))
            })
            .then_with(|| a.cmp(b))
    }
}
