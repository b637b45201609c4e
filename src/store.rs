// File: src/store.rs
use crate::core::collate::Collator;
use crate::core::types::{Forms, OrderNo, Paradigm, VerbCode, WordId};
use crate::error::{BeygjaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// DIM word class of verbs (`sagnorð`).
pub const VERB_CLASS: &str = "so";

/// One headword from DIM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: WordId,
    /// DIM's own identifier (`Auðkenni`).
    pub external_id: u64,
    pub headword: String,
    pub class: String,
    /// Syllables in the verb stem, when known.
    pub syllables: Option<u8>,
}

/// One inflected form of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionRecord {
    pub word: WordId,
    /// Beygja verb code for verbs, the raw DIM tag for other classes.
    pub code: VerbCode,
    pub order: OrderNo,
    pub form: String,
    /// DIM correctness grade of the form; lower is more standard.
    pub grade: Option<u8>,
    pub registers: Vec<String>,
    pub values: Vec<String>,
}

/// Which stored forms count when a paradigm is assembled.
#[derive(Debug, Clone, Default)]
pub struct ParadigmFilter {
    pub max_grade: Option<u8>,
    pub excluded_registers: HashSet<String>,
}

impl ParadigmFilter {
    fn admits(&self, record: &InflectionRecord) -> bool {
        let graded = match (self.max_grade, record.grade) {
            (Some(max), Some(grade)) => grade <= max,
            _ => true,
        };
        graded
            && !record
                .registers
                .iter()
                .any(|r| self.excluded_registers.contains(r))
    }
}

/// In-memory word and inflection store with bincode snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    words: Vec<WordRecord>,
    by_external: HashMap<u64, WordId>,
    /// Inflections per word, keyed by (code, order).
    inflections: BTreeMap<WordId, BTreeMap<(VerbCode, OrderNo), InflectionRecord>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the word with `external_id`, creating it if new.
    pub fn add_word(&mut self, external_id: u64, headword: &str, class: &str) -> WordId {
        if let Some(&id) = self.by_external.get(&external_id) {
            return id;
        }
        let id = self.words.len();
        self.words.push(WordRecord {
            id,
            external_id,
            headword: headword.to_string(),
            class: class.to_string(),
            syllables: None,
        });
        self.by_external.insert(external_id, id);
        id
    }

    pub fn add_inflection(&mut self, record: InflectionRecord) -> Result<()> {
        self.word(record.word)?;
        let key = (record.code.clone(), record.order);
        let cells = self.inflections.entry(record.word).or_default();
        if cells.contains_key(&key) {
            return Err(BeygjaError::DuplicateInflection {
                headword: self.words[record.word].headword.clone(),
                code: record.code,
                order: record.order,
            });
        }
        cells.insert(key, record);
        Ok(())
    }

    pub fn set_syllables(&mut self, external_id: u64, syllables: u8) -> bool {
        match self.by_external.get(&external_id) {
            Some(&id) => {
                self.words[id].syllables = Some(syllables);
                true
            }
            None => false,
        }
    }

    pub fn word(&self, id: WordId) -> Result<&WordRecord> {
        self.words.get(id).ok_or(BeygjaError::UnknownWord(id))
    }

    pub fn word_by_external(&self, external_id: u64) -> Option<&WordRecord> {
        self.by_external.get(&external_id).map(|&id| &self.words[id])
    }

    pub fn words(&self) -> impl Iterator<Item = &WordRecord> {
        self.words.iter()
    }

    pub fn verbs(&self) -> impl Iterator<Item = &WordRecord> {
        self.words.iter().filter(|w| w.class == VERB_CLASS)
    }

    pub fn inflections(&self, word: WordId) -> impl Iterator<Item = &InflectionRecord> {
        self.inflections.get(&word).into_iter().flat_map(|cells| cells.values())
    }

    pub fn inflection_count(&self) -> usize {
        self.inflections.values().map(BTreeMap::len).sum()
    }

    /// Assembles the paradigm of `word` from the forms `filter` admits.
    ///
    /// Variants keep their order numbers' sequence with duplicates removed.
    /// Codes left without forms are omitted.
    pub fn paradigm(&self, word: WordId, filter: &ParadigmFilter) -> Result<Paradigm> {
        self.word(word)?;
        let mut cells: BTreeMap<VerbCode, Vec<String>> = BTreeMap::new();
        // (code, order) keys iterate each code's variants in order
        for record in self.inflections(word).filter(|r| filter.admits(r)) {
            let forms = cells.entry(record.code.clone()).or_default();
            if !forms.contains(&record.form) {
                forms.push(record.form.clone());
            }
        }
        Ok(cells
            .into_iter()
            .filter_map(|(code, forms)| Forms::from_vec(forms).map(|forms| (code, forms)))
            .collect())
    }

    /// Like [`Store::paradigm`] with every variant list in collation order.
    pub fn collated_paradigm(
        &self,
        word: WordId,
        filter: &ParadigmFilter,
        collator: &dyn Collator,
    ) -> Result<Paradigm> {
        let mut paradigm = self.paradigm(word, filter)?;
        for forms in paradigm.values_mut() {
            if let Forms::Many(variants) = forms {
                collator.sort(variants);
            }
        }
        Ok(paradigm)
    }

    /// Writes a snapshot atomically: the data lands in a temporary file next
    /// to `path` which is then renamed over it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| BeygjaError::io(parent_dir, e))?;

        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| BeygjaError::io(parent_dir, e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            bincode::serialize_into(&mut writer, self)?;
            writer.flush().map_err(|e| BeygjaError::io(temp_file.path(), e))?;
        }
        temp_file
            .persist(path)
            .map_err(|e| BeygjaError::io(path, e.error))?;
        log::debug!(
            "Saved {} words / {} inflections to {}",
            self.words.len(),
            self.inflection_count(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| BeygjaError::io(path, e))?;
        let store: Store = bincode::deserialize_from(BufReader::new(file))?;
        Ok(store)
    }

    /// Loads `path` if it exists, otherwise starts empty.
    pub fn load_or_new(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collate::IcelandicCollator;
    use pretty_assertions::assert_eq;

    fn row(word: WordId, code: &str, order: OrderNo, form: &str) -> InflectionRecord {
        InflectionRecord {
            word,
            code: code.into(),
            order,
            form: form.into(),
            grade: None,
            registers: vec![],
            values: vec![],
        }
    }

    #[test]
    fn words_are_unique_per_external_id() {
        let mut store = Store::new();
        let a = store.add_word(433568, "kalla", VERB_CLASS);
        let b = store.add_word(433568, "kalla", VERB_CLASS);
        assert_eq!(a, b);
        assert_eq!(store.words().count(), 1);
        assert!(store.set_syllables(433568, 1));
        assert!(!store.set_syllables(1, 1));
        assert_eq!(store.word_by_external(433568).unwrap().syllables, Some(1));
    }

    #[test]
    fn inflections_need_an_existing_word() {
        let mut store = Store::new();
        assert!(matches!(
            store.add_inflection(row(3, "Ia", 1, "kalla")),
            Err(BeygjaError::UnknownWord(3))
        ));
        let id = store.add_word(1, "kalla", VERB_CLASS);
        store.add_inflection(row(id, "Ia", 1, "kalla")).unwrap();
        assert!(matches!(
            store.add_inflection(row(id, "Ia", 1, "kalla")),
            Err(BeygjaError::DuplicateInflection { .. })
        ));
    }

    #[test]
    fn paradigm_groups_variants_in_order() {
        let mut store = Store::new();
        let id = store.add_word(1, "þurrka", VERB_CLASS);
        store.add_inflection(row(id, "Faip3v", 2, "þurkaði")).unwrap();
        store.add_inflection(row(id, "Faip3v", 1, "þurrkaði")).unwrap();
        store.add_inflection(row(id, "Faip3v", 3, "þurrkaði")).unwrap();
        store.add_inflection(row(id, "Ia", 1, "þurrka")).unwrap();

        let paradigm = store.paradigm(id, &ParadigmFilter::default()).unwrap();
        assert_eq!(paradigm["Ia"], Forms::One("þurrka".into()));
        assert_eq!(
            paradigm["Faip3v"],
            Forms::Many(vec!["þurrkaði".into(), "þurkaði".into()])
        );

        let collated = store
            .collated_paradigm(id, &ParadigmFilter::default(), &IcelandicCollator)
            .unwrap();
        assert_eq!(
            collated["Faip3v"],
            Forms::Many(vec!["þurkaði".into(), "þurrkaði".into()])
        );
    }

    #[test]
    fn filter_drops_graded_and_excluded_forms() {
        let mut store = Store::new();
        let id = store.add_word(1, "kalla", VERB_CLASS);
        let mut rare = row(id, "Faip3v", 2, "kallti");
        rare.grade = Some(4);
        let mut old = row(id, "Fair1v", 1, "kalla");
        old.registers = vec!["URE".into()];
        store.add_inflection(row(id, "Faip3v", 1, "kallaði")).unwrap();
        store.add_inflection(rare).unwrap();
        store.add_inflection(old).unwrap();

        let filter = ParadigmFilter {
            max_grade: Some(1),
            excluded_registers: ["URE".to_string()].into_iter().collect(),
        };
        let paradigm = store.paradigm(id, &filter).unwrap();
        assert_eq!(paradigm.len(), 1);
        assert_eq!(paradigm["Faip3v"], Forms::One("kallaði".into()));
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dim.bin");
        let mut store = Store::new();
        let id = store.add_word(7, "dæma", VERB_CLASS);
        store.add_inflection(row(id, "Ia", 1, "dæma")).unwrap();
        store.save(&path).unwrap();

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.word(id).unwrap().headword, "dæma");
        assert_eq!(loaded.inflection_count(), 1);
        assert!(Store::load_or_new(&dir.path().join("missing.bin"))
            .unwrap()
            .words()
            .next()
            .is_none());
    }
}
