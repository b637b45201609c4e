// src/core/predict.rs
use crate::core::mutate::{j_stem, u_shift};
use crate::core::types::{Forms, Paradigm};
use crate::error::{BeygjaError, Result};

/// Person/number suffixes of the six finite cells, in paradigm order.
const CELLS: [&str; 6] = ["1v", "2v", "3v", "1w", "2w", "3w"];

/// Present-tense `-ar` verb whose surface stem would otherwise pick `-ir`.
const FORCED_AR: &str = "meina";

/// Writes six person/number forms under `Fa` + `mood` + `tense`.
fn fill(paradigm: &mut Paradigm, mood: char, tense: char, forms: [String; 6]) {
    for (cell, form) in CELLS.iter().zip(forms) {
        paradigm.insert(format!("Fa{mood}{tense}{cell}"), Forms::One(form));
    }
}

/// Predicts the active finite forms of a weak verb from its infinitive and
/// one past singular form.
///
/// `syllables` is the syllable count of the verb stem. The past form must end
/// in `i`; strong verbs have to be filtered out beforehand.
///
/// Returns 24 cells: present and past, indicative and subjunctive.
pub fn predict_finite(infinitive: &str, past_singular: &str, syllables: usize) -> Result<Paradigm> {
    let Some(past_stem) = past_singular.strip_suffix('i') else {
        return Err(BeygjaError::NotWeakPast {
            infinitive: infinitive.to_string(),
            past: past_singular.to_string(),
        });
    };

    // `kalla/kallaði` keeps the theme vowel, `dæma/dæmdi` drops it
    let inf_stem = match infinitive.strip_suffix('a') {
        Some(stripped) if !past_singular.ends_with("aði") => stripped,
        _ => infinitive,
    };
    let v_stem = inf_stem.strip_suffix('a').unwrap_or(inf_stem);
    let u_stem = u_shift(v_stem, syllables)?;
    let j = j_stem(v_stem);

    let mut paradigm = Paradigm::new();

    let (sg1, sg2) = if inf_stem.ends_with('a') || infinitive == FORCED_AR {
        (format!("{v_stem}a"), format!("{v_stem}ar"))
    } else {
        (format!("{j}i"), format!("{j}ir"))
    };
    fill(
        &mut paradigm,
        'i',
        'r',
        [
            sg1,
            sg2.clone(),
            sg2,
            format!("{u_stem}um"),
            format!("{j}ið"),
            infinitive.to_string(),
        ],
    );
    fill(
        &mut paradigm,
        's',
        'r',
        [
            format!("{j}i"),
            format!("{j}ir"),
            format!("{j}i"),
            format!("{u_stem}um"),
            format!("{j}ið"),
            format!("{j}i"),
        ],
    );

    let past_syllables = syllables + usize::from(past_stem.ends_with("að"));
    let plural = u_shift(past_stem, past_syllables)?;
    let past = [
        format!("{past_stem}i"),
        format!("{past_stem}ir"),
        format!("{past_stem}i"),
        format!("{plural}um"),
        format!("{plural}uð"),
        format!("{plural}u"),
    ];
    fill(&mut paradigm, 'i', 'p', past.clone());
    fill(&mut paradigm, 's', 'p', past);

    Ok(paradigm)
}
