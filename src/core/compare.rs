// src/core/compare.rs
use crate::core::collate::Collator;
use crate::core::types::{Forms, Paradigm, PrincipalParts, VerbCode};
use crate::error::{BeygjaError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Infinitive and weak past singular forms of a verb.
///
/// A middle voice headword (`-st`) or a verb lacking the active past is
/// read from `Fmip3v` with the `-st` stripped, marking the parts artificial.
pub fn derive_principal_parts(headword: &str, paradigm: &Paradigm) -> Result<PrincipalParts> {
    let missing = || BeygjaError::NoPrincipalParts {
        headword: headword.to_string(),
    };

    if let Some(active) = headword.strip_suffix("st") {
        let past = paradigm.get("Fmip3v").ok_or_else(missing)?;
        let past_singular = past
            .iter()
            .map(|form| weak_past(active, form.strip_suffix("st").unwrap_or(form)))
            .collect::<Result<Vec<_>>>()?;
        return Ok(PrincipalParts {
            infinitive: active.to_string(),
            past_singular,
            artificial: true,
        });
    }

    match paradigm.get("Faip3v") {
        Some(past) => Ok(PrincipalParts {
            infinitive: headword.to_string(),
            past_singular: past
                .iter()
                .map(|form| weak_past(headword, form))
                .collect::<Result<_>>()?,
            artificial: false,
        }),
        None => derive_principal_parts(&format!("{headword}st"), paradigm).map_err(|e| match e {
            BeygjaError::NoPrincipalParts { .. } => missing(),
            other => other,
        }),
    }
}

fn weak_past(infinitive: &str, form: &str) -> Result<String> {
    if form.ends_with('i') {
        Ok(form.to_string())
    } else {
        Err(BeygjaError::NotWeakPast {
            infinitive: infinitive.to_string(),
            past: form.to_string(),
        })
    }
}

/// Unions several predictions cell by cell, dropping duplicate forms and
/// ordering each cell's variants with `collator`.
pub fn merge_predictions(predictions: &[Paradigm], collator: &dyn Collator) -> Paradigm {
    let mut cells: BTreeMap<VerbCode, Vec<String>> = BTreeMap::new();
    for prediction in predictions {
        for (code, forms) in prediction {
            let cell = cells.entry(code.clone()).or_default();
            for form in forms.iter() {
                if !cell.iter().any(|f| f == form) {
                    cell.push(form.to_string());
                }
            }
        }
    }

    cells
        .into_iter()
        .filter_map(|(code, mut forms)| {
            collator.sort(&mut forms);
            Forms::from_vec(forms).map(|forms| (code, forms))
        })
        .collect()
}

/// One cell where the prediction does not explain the recorded forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub code: VerbCode,
    pub predicted: Vec<String>,
    pub actual: Vec<String>,
}

/// Cells present on both sides whose forms disagree.
///
/// Every predicted form must be recorded. In `strict` mode the recorded cell
/// must also hold no extra variants. Cells present on only one side are not
/// compared.
pub fn mismatches(
    predicted: &Paradigm,
    actual: &Paradigm,
    strict: bool,
    collator: &dyn Collator,
) -> Vec<Mismatch> {
    predicted
        .iter()
        .filter_map(|(code, expected)| {
            let recorded = actual.get(code)?;
            let explained = expected.iter().all(|form| recorded.contains(form));
            let exact = !strict || expected.len() == recorded.len();
            if explained && exact {
                return None;
            }
            let sorted = |forms: &Forms| {
                let mut forms: Vec<String> = forms.iter().map(str::to_string).collect();
                collator.sort(&mut forms);
                forms
            };
            Some(Mismatch {
                code: code.clone(),
                predicted: sorted(expected),
                actual: sorted(recorded),
            })
        })
        .collect()
}

/// True if the prediction explains every shared cell of `actual`.
pub fn compare(predicted: &Paradigm, actual: &Paradigm, strict: bool, collator: &dyn Collator) -> bool {
    mismatches(predicted, actual, strict, collator).is_empty()
}
