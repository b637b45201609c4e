// File: src/report.rs
use crate::core::engine::{Analysis, Outcome, SkipReason};
use crossterm::style::Stylize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// One analyzed verb as it appears in the report.
#[derive(Debug, Clone, Serialize)]
pub struct VerbEntry {
    pub headword: String,
    pub external_id: u64,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// A skipped verb and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkipEntry {
    pub headword: String,
    pub external_id: u64,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Collects outcomes of an analysis run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub strict: bool,
    pub analyzed: usize,
    /// Analyzed verbs whose recorded paradigm has none of the predicted cells.
    pub without_shared_cells: usize,
    pub mismatched: Vec<VerbEntry>,
    pub skipped: Vec<SkipEntry>,
}

impl Report {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    pub fn record(&mut self, headword: &str, external_id: u64, outcome: Outcome) {
        match outcome {
            Outcome::Skipped(reason) => {
                log::debug!("skipping {headword} ({external_id}): {reason:?}");
                self.skipped.push(SkipEntry {
                    headword: headword.to_string(),
                    external_id,
                    reason,
                });
            }
            Outcome::Compared(analysis) => {
                self.analyzed += 1;
                if analysis.shared_cells == 0 {
                    log::debug!("{headword} ({external_id}): no predicted cell is recorded");
                    self.without_shared_cells += 1;
                }
                if !analysis.mismatches.is_empty() {
                    self.mismatched.push(VerbEntry {
                        headword: headword.to_string(),
                        external_id,
                        analysis,
                    });
                }
            }
        }
    }

    /// Skip counts keyed by reason name.
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.skipped {
            let key = match entry.reason {
                SkipReason::Special => "special",
                SkipReason::Mixed(_) => "mixed",
                SkipReason::Strong => "strong",
                SkipReason::NoPrincipalParts(_) => "no principal parts",
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    pub fn write_json<W: Write>(&self, out: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(out, self)
    }

    /// Human-readable report, one block per mismatching verb.
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.mismatched {
            let parts = &entry.analysis.parts;
            let mut header = format!(
                "{} ({}) past {}",
                entry.headword,
                entry.external_id,
                parts.past_singular.join(", ")
            );
            if parts.artificial {
                header.push_str(" [from middle voice]");
            }
            writeln!(out, "{}", header.bold())?;
            for mismatch in &entry.analysis.mismatches {
                writeln!(
                    out,
                    "  {:<8} expected {}  found {}",
                    mismatch.code,
                    mismatch.predicted.join("/").green(),
                    mismatch.actual.join("/").red()
                )?;
            }
        }

        let skipped = self
            .skip_counts()
            .iter()
            .map(|(reason, count)| format!("{count} {reason}"))
            .collect::<Vec<_>>()
            .join(", ");
        let uncovered = match self.without_shared_cells {
            0 => String::new(),
            n => format!(", {n} without shared cells"),
        };
        writeln!(
            out,
            "{} verbs compared ({} mode), {} mismatched{}; skipped: {}",
            self.analyzed,
            if self.strict { "strict" } else { "loose" },
            self.mismatched.len(),
            uncovered,
            if skipped.is_empty() { "none".to_string() } else { skipped }
        )?;
        out.flush()
    }
}
