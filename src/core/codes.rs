// src/core/codes.rs
//! DIM tag -> Beygja verb code translation.
//!
//! A verb code is up to eight category symbols in fixed slot order:
//!
//! | slot | category        | symbols     |
//! |------|-----------------|-------------|
//! | 0    | prefix          | `.` `:` `;` |
//! | 1    | class           | `F Q I M R P S` |
//! | 2    | voice           | `a m`       |
//! | 3    | mood / strength | `i s`       |
//! | 4    | tense           | `r p`       |
//! | 5    | person / gender | `1 2 3`     |
//! | 6    | number          | `v w z`     |
//! | 7    | case            | `4 5 6 7`   |
//!
//! Which slots a code may (and must) fill depends on its class.
use crate::core::types::{OrderNo, VerbCode};
use crate::error::{BeygjaError, Result};
use std::collections::HashMap;

const SLOT_COUNT: usize = 8;
const PREFIX: usize = 0;
const CLASS: usize = 1;
const VOICE: usize = 2;
const PERSON: usize = 5;
const NUMBER: usize = 6;

const SLOT_NAMES: [&str; SLOT_COUNT] = [
    "prefix", "class", "voice", "mood", "tense", "person", "number", "case",
];

/// Per slot, the classes for which the slot is filled. For every slot but
/// the prefix this is also the set of classes for which it is mandatory.
const SLOT_CLASSES: [&[char]; SLOT_COUNT] = [
    &['F', 'I', 'S'],
    &['F', 'Q', 'I', 'M', 'R', 'P', 'S'],
    &['F', 'Q', 'I', 'M', 'S'],
    &['F', 'Q', 'P'],
    &['F', 'Q'],
    &['F', 'Q', 'P'],
    &['F', 'Q', 'M', 'P'],
    &['P'],
];

/// Past tense active infinitive (`mundu`, `skyldu`): the one code that fills
/// tense outside the finite classes.
const PAST_INFINITIVE: &str = "Iap";
/// Clipped imperative (`kalla!`), the only code using number `z`.
const CLIPPED_IMPERATIVE: &str = "Maz";

/// The code fragment a single DIM tag element contributes.
fn element_fragment(element: &str) -> Option<&'static str> {
    let fragment = match element {
        // voice
        "GM" => "a",
        "MM" => "m",
        // mood
        "FH" => "i",
        "VH" => "s",
        // classes (finite `F` is the default and has no element)
        "NH" => "I",
        "BH" => "M",
        "SP" => "Q",
        "LHNT" => "R",
        "LHÞT" => "P",
        "SAGNB" => "S",
        // tense
        "NT" => "r",
        "ÞT" => "p",
        // person
        "1P" => "1",
        "2P" => "2",
        "3P" => "3",
        // number
        "ET" => "v",
        "FT" => "w",
        "ST" => "z",
        // participle strength and gender
        "SB" => "s",
        "VB" => "i",
        "KK" => "1",
        "KVK" => "2",
        "HK" => "3",
        // participle case + number
        "NFET" => "4v",
        "ÞFET" => "5v",
        "ÞGFET" => "6v",
        "EFET" => "7v",
        "NFFT" => "4w",
        "ÞFFT" => "5w",
        "ÞGFFT" => "6w",
        "EFFT" => "7w",
        // impersonal marker and subject prefixes
        "OP" => "",
        "það" => ".",
        "ÞF" => ":",
        "ÞGF" => ";",
        _ => return None,
    };
    Some(fragment)
}

/// The slot a code symbol belongs to.
fn slot_of(symbol: char) -> Option<usize> {
    let slot = match symbol {
        '.' | ':' | ';' => 0,
        'F' | 'Q' | 'I' | 'M' | 'R' | 'P' | 'S' => 1,
        'a' | 'm' => 2,
        'i' | 's' => 3,
        'r' | 'p' => 4,
        '1' | '2' | '3' => 5,
        'v' | 'w' | 'z' => 6,
        '4' | '5' | '6' | '7' => 7,
        _ => return None,
    };
    Some(slot)
}

/// A validated verb code plus the variant order it was tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedCode {
    pub code: VerbCode,
    pub order: OrderNo,
}

/// Splits the trailing variant number off a DIM tag. No digits means order 1.
pub fn split_order(tag: &str) -> Result<(&str, OrderNo)> {
    let body = tag.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &tag[body.len()..];
    if body.is_empty() {
        return Err(BeygjaError::EmptyTag {
            tag: tag.to_string(),
        });
    }
    if digits.is_empty() {
        return Ok((body, 1));
    }
    match digits.parse::<OrderNo>() {
        Ok(order) if order > 0 => Ok((body, order)),
        _ => Err(BeygjaError::UnknownElement {
            tag: tag.to_string(),
            element: digits.to_string(),
        }),
    }
}

/// Translates a DIM verb tag into a verb code without caching.
pub fn dim_to_verb_code(tag: &str) -> Result<MappedCode> {
    let (body, order) = split_order(tag)?;

    let mut slots: [Option<char>; SLOT_COUNT] = [None; SLOT_COUNT];
    for element in body.split('-').filter(|e| !e.is_empty()) {
        let fragment = element_fragment(element).ok_or_else(|| BeygjaError::UnknownElement {
            tag: tag.to_string(),
            element: element.to_string(),
        })?;
        for symbol in fragment.chars() {
            // Fragments are drawn from the code alphabet, so every symbol has a slot.
            let Some(slot) = slot_of(symbol) else {
                continue;
            };
            if let Some(first) = slots[slot] {
                return Err(BeygjaError::SlotConflict {
                    tag: tag.to_string(),
                    first,
                    second: symbol,
                });
            }
            slots[slot] = Some(symbol);
        }
    }

    let class = *slots[CLASS].get_or_insert('F');
    let code: VerbCode = slots.iter().flatten().collect();

    if code == PAST_INFINITIVE {
        return Ok(MappedCode { code, order });
    }

    for (slot, symbol) in slots.iter().enumerate() {
        let allowed = SLOT_CLASSES[slot].contains(&class);
        match symbol {
            Some(symbol) if !allowed => {
                return Err(BeygjaError::IllegalCategory {
                    tag: tag.to_string(),
                    class,
                    symbol: *symbol,
                });
            }
            None if allowed && slot != PREFIX => {
                return Err(BeygjaError::MissingCategory {
                    tag: tag.to_string(),
                    class,
                    category: SLOT_NAMES[slot],
                });
            }
            _ => {}
        }
    }

    if slots[NUMBER] == Some('z') && code != CLIPPED_IMPERATIVE {
        return Err(BeygjaError::ClippedNotAllowed {
            tag: tag.to_string(),
            code,
        });
    }

    if let Some(prefix) = slots[PREFIX] {
        let valid = match prefix {
            '.' => slots[PERSON] == Some('3') && slots[NUMBER] == Some('v'),
            _ => slots[VOICE] == Some('a'),
        };
        if !valid {
            return Err(BeygjaError::PrefixMismatch {
                tag: tag.to_string(),
                code,
                prefix,
            });
        }
    }

    Ok(MappedCode { code, order })
}

/// Memoizing front end to [`dim_to_verb_code`].
///
/// Only successful translations are cached; a failing tag is re-validated on
/// every lookup.
#[derive(Debug, Default)]
pub struct CodeMapper {
    cache: HashMap<String, MappedCode>,
}

impl CodeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_tag(&mut self, tag: &str) -> Result<MappedCode> {
        if let Some(hit) = self.cache.get(tag) {
            return Ok(hit.clone());
        }
        let mapped = dim_to_verb_code(tag)?;
        self.cache.insert(tag.to_string(), mapped.clone());
        Ok(mapped)
    }

    /// Number of distinct tags translated so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(tag: &str) -> (String, u32) {
        let m = dim_to_verb_code(tag).unwrap();
        (m.code, m.order)
    }

    #[test]
    fn maps_documented_tags() {
        assert_eq!(code("GM-NH"), ("Ia".to_string(), 1));
        assert_eq!(code("GM-BH-ST"), ("Maz".to_string(), 1));
        assert_eq!(code("GM-BH-ST2"), ("Maz".to_string(), 2));
        assert_eq!(code("MM-FH-NT-1P-ET"), ("Fmir1v".to_string(), 1));
    }

    #[test]
    fn maps_every_class() {
        assert_eq!(code("GM-VH-ÞT-3P-FT").0, "Fasp3w");
        assert_eq!(code("GM-FH-NT-2P-ET-SP").0, "Qair2v");
        assert_eq!(code("MM-BH-FT").0, "Mmw");
        assert_eq!(code("LHNT").0, "R");
        assert_eq!(code("LHÞT-SB-KK-NFET").0, "Ps1v4");
        assert_eq!(code("LHÞT-VB-HK-ÞGFFT").0, "Pi3w6");
        assert_eq!(code("MM-SAGNB").0, "Sm");
    }

    #[test]
    fn impersonal_marker_contributes_nothing() {
        assert_eq!(code("OP-GM-FH-NT-3P-ET").0, "Fair3v");
        assert_eq!(code("OP-það-GM-FH-ÞT-3P-ET").0, ".Faip3v");
        assert_eq!(code("OP-ÞGF-GM-VH-NT-3P-FT").0, ";Fasr3w");
        assert_eq!(code("OP-ÞF-GM-SAGNB").0, ":Sa");
    }

    #[test]
    fn past_infinitive_is_exempt_from_tense_rule() {
        assert_eq!(code("GM-NH-ÞT").0, "Iap");
        assert!(matches!(
            dim_to_verb_code("MM-NH-ÞT"),
            Err(BeygjaError::IllegalCategory { symbol: 'p', .. })
        ));
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(matches!(
            dim_to_verb_code("GM-XX"),
            Err(BeygjaError::UnknownElement { ref element, .. }) if element == "XX"
        ));
        assert!(matches!(dim_to_verb_code("2"), Err(BeygjaError::EmptyTag { .. })));
        assert!(matches!(dim_to_verb_code(""), Err(BeygjaError::EmptyTag { .. })));
    }

    #[test]
    fn rejects_conflicting_slots() {
        assert!(matches!(
            dim_to_verb_code("GM-MM-NH"),
            Err(BeygjaError::SlotConflict {
                first: 'a',
                second: 'm',
                ..
            })
        ));
        // KK and 1P share the person/gender slot
        assert!(dim_to_verb_code("LHÞT-SB-KK-1P-NFET").is_err());
    }

    #[test]
    fn rejects_missing_mandatory_category() {
        assert!(matches!(
            dim_to_verb_code("GM-FH-NT-1P"),
            Err(BeygjaError::MissingCategory {
                category: "number",
                ..
            })
        ));
        // no elements at all default to F, which has mandatory categories
        assert!(matches!(
            dim_to_verb_code("--"),
            Err(BeygjaError::MissingCategory { class: 'F', .. })
        ));
    }

    #[test]
    fn clipped_number_only_for_maz() {
        assert!(matches!(
            dim_to_verb_code("MM-BH-ST"),
            Err(BeygjaError::ClippedNotAllowed { ref code, .. }) if code == "Mmz"
        ));
        assert!(dim_to_verb_code("GM-FH-NT-1P-ST").is_err());
    }

    #[test]
    fn prefix_constraints() {
        assert!(matches!(
            dim_to_verb_code("það-GM-FH-NT-1P-ET"),
            Err(BeygjaError::PrefixMismatch { prefix: '.', .. })
        ));
        assert!(matches!(
            dim_to_verb_code("ÞGF-MM-FH-NT-3P-ET"),
            Err(BeygjaError::PrefixMismatch { prefix: ';', .. })
        ));
        assert!(matches!(
            dim_to_verb_code("ÞF-GM-BH-ET"),
            Err(BeygjaError::IllegalCategory { class: 'M', symbol: ':', .. })
        ));
    }

    #[test]
    fn mapper_caches_successes_only() {
        let mut mapper = CodeMapper::new();
        assert!(mapper.map_tag("GM-XX").is_err());
        assert_eq!(mapper.cached(), 0);
        let first = mapper.map_tag("GM-FH-ÞT-3P-ET3").unwrap();
        assert_eq!(
            first,
            MappedCode {
                code: "Faip3v".into(),
                order: 3
            }
        );
        assert_eq!(mapper.map_tag("GM-FH-ÞT-3P-ET3").unwrap(), first);
        assert_eq!(mapper.cached(), 1);
    }

    const ELEMENTS: &[&str] = &[
        "GM", "MM", "FH", "VH", "NH", "BH", "SP", "LHNT", "LHÞT", "SAGNB", "NT", "ÞT", "1P",
        "2P", "3P", "ET", "FT", "ST", "SB", "VB", "KK", "KVK", "HK", "NFET", "ÞGFFT", "OP",
        "það", "ÞF", "ÞGF",
    ];

    proptest! {
        #[test]
        fn accepted_codes_are_well_formed(
            picks in proptest::collection::vec(0..ELEMENTS.len(), 1..7),
            order in proptest::option::of(1u32..20),
        ) {
            let mut tag = picks.iter().map(|&i| ELEMENTS[i]).collect::<Vec<_>>().join("-");
            if let Some(order) = order {
                tag.push_str(&order.to_string());
            }
            let mut mapper = CodeMapper::new();
            if let Ok(mapped) = mapper.map_tag(&tag) {
                prop_assert_eq!(mapped.order, order.unwrap_or(1));
                let slots: Vec<usize> = mapped.code.chars().map(|c| slot_of(c).unwrap()).collect();
                prop_assert_eq!(slots.iter().filter(|&&s| s == CLASS).count(), 1);
                prop_assert!(slots.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(mapper.map_tag(&tag).unwrap(), mapped);
            }
        }
    }
}
