// File: src/dim.rs
//! Readers for DIM CSV exports.
//!
//! DIM files are semicolon separated, unquoted, one record per line. Fields
//! are trimmed of spaces and tabs and blank lines are skipped. Array valued
//! fields hold a comma separated list.
use crate::error::{BeygjaError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// Field positions in a Kristínarsnið record.
mod field {
    pub const HEADWORD: usize = 0;
    pub const ID: usize = 1;
    pub const CLASS: usize = 2;
    pub const FORM: usize = 9;
    pub const TAG: usize = 10;
    pub const FORM_GRADE: usize = 11;
    pub const FORM_REGISTERS: usize = 12;
    pub const FORM_VALUES: usize = 13;
    pub const COUNT: usize = 15;
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input)
}

/// Splits a comma separated sub-array, dropping empty elements.
pub fn array(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// One inflected form line of a DIM export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimRecord {
    /// 1-based line in the source file.
    pub line: u64,
    pub headword: String,
    pub external_id: u64,
    pub class: String,
    pub form: String,
    pub tag: String,
    pub grade: Option<u8>,
    pub registers: Vec<String>,
    pub values: Vec<String>,
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str, line: u64) -> Result<T> {
    value.parse().map_err(|_| BeygjaError::Record {
        line,
        message: format!("{what} {value:?} is not a number"),
    })
}

impl DimRecord {
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        let line = line_of(record);
        if record.len() < field::COUNT {
            return Err(BeygjaError::Record {
                line,
                message: format!("expected {} fields, found {}", field::COUNT, record.len()),
            });
        }
        let get = |i: usize| record.get(i).unwrap_or_default();
        let grade = match get(field::FORM_GRADE) {
            "" => None,
            grade => Some(parse_number(grade, "grade", line)?),
        };
        Ok(Self {
            line,
            headword: get(field::HEADWORD).to_string(),
            external_id: parse_number(get(field::ID), "id", line)?,
            class: get(field::CLASS).to_string(),
            form: get(field::FORM).to_string(),
            tag: get(field::TAG).to_string(),
            grade,
            registers: array(get(field::FORM_REGISTERS)),
            values: array(get(field::FORM_VALUES)),
        })
    }
}

/// Iterates DIM records after skipping `skip` leading lines.
///
/// Lines are counted in the source file, blank ones included, so a header
/// block with empty lines never swallows a data row.
pub fn records<R: Read>(input: R, skip: usize) -> impl Iterator<Item = Result<DimRecord>> {
    let skip = skip as u64;
    reader(input)
        .into_records()
        .filter(move |record| {
            let line = match record {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            line.map_or(true, |p| p.line() > skip)
        })
        .map(|record| DimRecord::from_record(&record?))
}

/// A stem syllable count keyed by DIM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllableRecord {
    pub external_id: u64,
    pub syllables: u8,
}

/// Iterates `id;syllables` lines.
pub fn syllables<R: Read>(input: R) -> impl Iterator<Item = Result<SyllableRecord>> {
    reader(input).into_records().map(|record| {
        let record = record?;
        let line = line_of(&record);
        match (record.get(0), record.get(1)) {
            (Some(id), Some(count)) => match parse_number(count, "syllable count", line)? {
                0 => Err(BeygjaError::Record {
                    line,
                    message: "syllable count must be positive".to_string(),
                }),
                syllables => Ok(SyllableRecord {
                    external_id: parse_number(id, "id", line)?,
                    syllables,
                }),
            },
            _ => Err(BeygjaError::Record {
                line,
                message: "expected id;syllables".to_string(),
            }),
        }
    })
}
