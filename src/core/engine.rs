use crate::core::classify::{is_special, is_strong, MixedVerbSet};
use crate::core::collate::{Collator, IcelandicCollator};
use crate::core::compare::{derive_principal_parts, merge_predictions, mismatches, Mismatch};
use crate::core::predict::predict_finite;
use crate::core::types::{Paradigm, PrincipalParts};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Why a verb was left out of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Preterite-present verb or the copula.
    Special,
    /// Infinitive ends in a known mixed verb; carries the matched ending.
    Mixed(String),
    /// A recorded past singular has a strong ending.
    Strong,
    /// Principal parts could not be derived or predicted from.
    NoPrincipalParts(String),
}

/// Prediction and comparison result for one weak verb.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub parts: PrincipalParts,
    #[serde(skip)]
    pub prediction: Paradigm,
    /// Predicted cells that also appear in the recorded paradigm.
    pub shared_cells: usize,
    pub mismatches: Vec<Mismatch>,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Skipped(SkipReason),
    Compared(Analysis),
}

// The verb engine composes the classifier, predictor and comparator.
// It holds no per-verb state, so one engine serves a whole run.
pub struct VerbEngine {
    mixed_verbs: MixedVerbSet,
    collator: Box<dyn Collator>,
    strict: bool,
}

impl VerbEngine {
    pub fn new(strict: bool) -> Self {
        Self {
            mixed_verbs: MixedVerbSet::default(),
            collator: Box::new(IcelandicCollator::new()),
            strict,
        }
    }

    pub fn with_mixed_verbs(mut self, mixed_verbs: MixedVerbSet) -> Self {
        self.mixed_verbs = mixed_verbs;
        self
    }

    /// Loads the mixed verb list once for the lifetime of the engine.
    pub fn load_mixed_verbs(self, path: &Path) -> Result<Self> {
        Ok(self.with_mixed_verbs(MixedVerbSet::load(path)?))
    }

    pub fn collator(&self) -> &dyn Collator {
        self.collator.as_ref()
    }

    /// Runs one verb through classification, prediction and comparison.
    ///
    /// `syllables` is the stem syllable count; callers default missing
    /// counts to 1.
    pub fn analyze(&self, headword: &str, syllables: usize, paradigm: &Paradigm) -> Outcome {
        if is_special(headword) {
            return Outcome::Skipped(SkipReason::Special);
        }
        if let Some(base) = self.mixed_verbs.find_base(headword) {
            return Outcome::Skipped(SkipReason::Mixed(base.to_string()));
        }
        if is_strong(paradigm) {
            return Outcome::Skipped(SkipReason::Strong);
        }

        let parts = match derive_principal_parts(headword, paradigm) {
            Ok(parts) => parts,
            Err(e) => return Outcome::Skipped(SkipReason::NoPrincipalParts(e.to_string())),
        };

        let predictions = parts
            .past_singular
            .iter()
            .map(|past| predict_finite(&parts.infinitive, past, syllables))
            .collect::<Result<Vec<_>>>();
        let predictions = match predictions {
            Ok(predictions) => predictions,
            Err(e) => return Outcome::Skipped(SkipReason::NoPrincipalParts(e.to_string())),
        };

        let prediction = merge_predictions(&predictions, self.collator());
        let shared_cells = prediction
            .keys()
            .filter(|code| paradigm.contains_key(*code))
            .count();
        let mismatches = mismatches(&prediction, paradigm, self.strict, self.collator());
        Outcome::Compared(Analysis {
            parts,
            prediction,
            shared_cells,
            mismatches,
        })
    }
}
