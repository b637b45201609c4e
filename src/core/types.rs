// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A unique identifier for a word record in the store.
pub type WordId = usize;

/// A compact Beygja verb inflection code, e.g. `Fair1v` or `Maz`.
pub type VerbCode = String;

/// Distinguishes variant forms sharing the same (word, code) pair. Starts at 1.
pub type OrderNo = u32;

/// The surface realization(s) recorded or predicted for one inflection code.
///
/// Most codes carry a single form; codes with several accepted spellings
/// (e.g. both `kallaði` and an older variant) carry them in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Forms {
    One(String),
    Many(Vec<String>),
}

impl Forms {
    /// Collapses a list of variants: a single form becomes `One`.
    pub fn from_vec(mut forms: Vec<String>) -> Option<Self> {
        match forms.len() {
            0 => None,
            1 => forms.pop().map(Forms::One),
            _ => Some(Forms::Many(forms)),
        }
    }

    /// Iterates the forms, treating `One` as a singleton set.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Forms::One(form) => std::slice::from_ref(form),
            Forms::Many(forms) => forms,
        };
        slice.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            Forms::One(_) => 1,
            Forms::Many(forms) => forms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, form: &str) -> bool {
        self.iter().any(|f| f == form)
    }
}

impl From<&str> for Forms {
    fn from(form: &str) -> Self {
        Forms::One(form.to_string())
    }
}

/// A verb paradigm: inflection code -> recorded forms.
/// Built on demand from stored inflection rows, never persisted.
pub type Paradigm = BTreeMap<VerbCode, Forms>;

/// The two principal parts the regular predictor works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalParts {
    pub infinitive: String,
    /// Every recorded 3rd person singular past indicative form, each ending in `i`.
    pub past_singular: Vec<String>,
    /// Set when the verb has no active voice and the parts were synthesized
    /// by stripping `-st` from the middle voice.
    pub artificial: bool,
}
