// File: src/import.rs
use crate::core::codes::{split_order, CodeMapper};
use crate::dim::{self, DimRecord};
use crate::error::Result;
use crate::store::{InflectionRecord, Store, VERB_CLASS};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Read};
use std::time::Duration;

const TEMPLATE_ROWS: &str = "{spinner} {msg} {pos} rows ({per_sec}) - {elapsed}";

/// Row counter for long imports.
///
/// A spinner is drawn when stderr is a terminal; either way the running
/// count is logged at most once per interval.
pub struct Progress {
    bar: ProgressBar,
    interval: Duration,
    next_report: Duration,
}

impl Progress {
    pub fn new(label: &'static str, interval: Duration) -> Self {
        let bar = if std::io::stderr().is_terminal() {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template(TEMPLATE_ROWS) {
                bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(label);
        Self {
            bar,
            interval,
            next_report: interval,
        }
    }

    pub fn tick(&mut self) {
        self.bar.inc(1);
        let elapsed = self.bar.elapsed();
        if elapsed >= self.next_report {
            self.next_report = elapsed + self.interval;
            let bar = &self.bar;
            bar.suspend(|| log::info!("{}: {} rows processed", bar.message(), bar.position()));
        }
    }

    pub fn rows(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
        log::info!(
            "{}: {} rows in {:.1}s",
            self.bar.message(),
            self.bar.position(),
            self.bar.elapsed().as_secs_f64()
        );
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: u64,
    pub words: usize,
    pub verb_forms: u64,
}

/// Maps a DIM row to a stored inflection: verb tags become verb codes,
/// other classes keep the tag with its variant number split off.
fn inflection_for(
    record: &DimRecord,
    word: usize,
    mapper: &mut CodeMapper,
) -> Result<InflectionRecord> {
    let (code, order) = if record.class == VERB_CLASS {
        let mapped = mapper.map_tag(&record.tag)?;
        (mapped.code, mapped.order)
    } else {
        let (tag, order) = split_order(&record.tag)?;
        (tag.to_string(), order)
    };
    Ok(InflectionRecord {
        word,
        code,
        order,
        form: record.form.clone(),
        grade: record.grade,
        registers: record.registers.clone(),
        values: record.values.clone(),
    })
}

/// Imports a DIM export into `store`. The first bad row aborts the import.
pub fn import_words<R: Read>(
    input: R,
    skip: usize,
    store: &mut Store,
    mapper: &mut CodeMapper,
    progress_interval: Duration,
) -> Result<ImportSummary> {
    let words_before = store.words().count();
    let mut progress = Progress::new("DIM import", progress_interval);
    let mut verb_forms = 0;

    for record in dim::records(input, skip) {
        let record = record?;
        let word = store.add_word(record.external_id, &record.headword, &record.class);
        let inflection = inflection_for(&record, word, mapper).map_err(|e| {
            log::error!(
                "line {}: cannot map {:?} ({}) of word {}: {}",
                record.line,
                record.tag,
                record.form,
                record.external_id,
                e
            );
            e
        })?;
        store.add_inflection(inflection)?;
        if record.class == VERB_CLASS {
            verb_forms += 1;
        }
        progress.tick();
    }

    progress.finish();
    log::debug!("{} distinct verb tags mapped", mapper.cached());
    Ok(ImportSummary {
        rows: progress.rows(),
        words: store.words().count() - words_before,
        verb_forms,
    })
}

/// Applies `id;syllables` lines to stored words; unknown ids are skipped.
pub fn import_syllables<R: Read>(input: R, store: &mut Store) -> Result<usize> {
    let mut applied = 0;
    for record in dim::syllables(input) {
        let record = record?;
        if store.set_syllables(record.external_id, record.syllables) {
            applied += 1;
        } else {
            log::warn!("syllable count for unknown word {}", record.external_id);
        }
    }
    Ok(applied)
}
