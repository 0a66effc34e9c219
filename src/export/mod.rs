//! Result export.
//!
//! Writes a batch result (and the optional LLM enrichment) as one JSON
//! document or as JSON Lines, to a file or to stdout.

mod writer;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::BatchResult;
use crate::config::OutputFormat;
use crate::llm::LlmBatchResult;

use writer::IgnoreBrokenPipe;

/// Everything a run produced.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(flatten)]
    pub batch: &'a BatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<&'a LlmBatchResult>,
}

/// Serializes `report` into `writer`.
///
/// JSON writes one pretty-printed document. JSON Lines writes one line per
/// batch entry followed by one line per LLM entry.
///
/// # Returns
///
/// The number of domain entries written.
pub fn write_report<W: Write>(writer: &mut W, report: &Report<'_>, format: OutputFormat) -> Result<usize> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report).context("Failed to serialize report")?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for entry in &report.batch.domains {
                serde_json::to_writer(&mut *writer, entry).context("Failed to serialize record")?;
                writeln!(writer)?;
            }
            for entry in report.llm.iter().flat_map(|llm| &llm.domains) {
                serde_json::to_writer(&mut *writer, entry)
                    .context("Failed to serialize LLM analysis")?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush().context("Failed to flush output")?;
    Ok(report.batch.domains.len())
}

/// Writes the report to `output`, or to stdout when `None`.
pub fn export_report(report: &Report<'_>, format: OutputFormat, output: Option<&Path>) -> Result<usize> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_report(&mut BufWriter::new(file), report, format)
        }
        None => write_report(&mut IgnoreBrokenPipe::new(io::stdout().lock()), report, format),
    }
}
