// src/core/classify.rs
use crate::core::types::Paradigm;
use crate::error::{BeygjaError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The preterite-present verbs plus the copula; their paradigms follow no
/// weak pattern.
const SPECIAL_VERBS: [&str; 11] = [
    "eiga", "kunna", "mega", "muna", "munu", "skulu", "unna", "vita", "þurfa", "knega", "vera",
];

/// True if any recorded 3rd person singular past form (active or middle)
/// is not a weak ending. Single forms are treated as one-element sets.
pub fn is_strong(paradigm: &Paradigm) -> bool {
    let active = paradigm
        .get("Faip3v")
        .is_some_and(|forms| forms.iter().any(|f| !f.ends_with('i')));
    let middle = paradigm
        .get("Fmip3v")
        .is_some_and(|forms| forms.iter().any(|f| !f.ends_with("ist")));
    active || middle
}

pub fn is_special(infinitive: &str) -> bool {
    SPECIAL_VERBS.contains(&infinitive)
}

/// Known irregular ("mixed") infinitive endings.
///
/// A verb is mixed if its active infinitive ends in one of these. Lengths
/// are measured in characters.
#[derive(Debug, Clone, Default)]
pub struct MixedVerbSet {
    bases: HashSet<String>,
    min_len: usize,
    max_len: usize,
}

impl MixedVerbSet {
    pub fn new<I, S>(bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bases: HashSet<String> = bases.into_iter().map(Into::into).collect();
        let lengths = bases.iter().map(|b| b.chars().count());
        let min_len = lengths.clone().min().unwrap_or(0);
        let max_len = lengths.max().unwrap_or(0);
        Self {
            bases,
            min_len,
            max_len,
        }
    }

    /// Reads one ending per line; blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BeygjaError::io(path, e))?;
        let set = Self::parse(&text);
        log::debug!("Loaded {} mixed verb endings from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Longest recorded ending of `infinitive`, after mapping a middle voice
    /// infinitive (`-st`) to the active one.
    pub fn find_base(&self, infinitive: &str) -> Option<&str> {
        if self.bases.is_empty() {
            return None;
        }
        let active = infinitive.strip_suffix("st").unwrap_or(infinitive);
        let chars: Vec<(usize, char)> = active.char_indices().collect();

        (self.min_len.max(1)..=self.max_len.min(chars.len()))
            .rev()
            .find_map(|len| {
                let start = chars[chars.len() - len].0;
                self.bases.get(&active[start..]).map(String::as_str)
            })
    }
}
