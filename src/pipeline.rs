//! End-to-end vocabulary run: extract both books, parse, merge, write.

use crate::merge::{count_overrides, merge};
use crate::model::assign_ids;
use crate::{
    FormatAParser, FormatBParser, MergedEntry, PdfTextExtractor, Result, VocabConfig,
    WorkbookWriter,
};
use std::path::{Path, PathBuf};

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries parsed from book A.
    pub format_a_entries: usize,
    /// Distinct words indexed from book B.
    pub index_words: usize,
    /// Rows written to the workbook.
    pub merged_rows: usize,
    /// Rows whose meaning came from book B.
    pub overridden: usize,
    pub output: PathBuf,
}

/// Extract the column text of one book. The document is dropped on return.
pub fn extract_blocks<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let extractor = PdfTextExtractor::from_path(path)?;
    tracing::info!(path = %path.display(), pages = extractor.page_count(), "extracting");
    Ok(extractor.extract_columns())
}

/// Parse, merge and number already extracted text blocks.
///
/// Returns the numbered rows together with the intermediate counts.
pub fn build_rows<A, B>(
    config: &VocabConfig,
    blocks_a: &[A],
    blocks_b: &[B],
) -> Result<(Vec<MergedEntry>, BuildStats)>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let entries = FormatAParser::new(&config.day_label)?.parse(blocks_a);
    let index = FormatBParser::new()?.parse(blocks_b);

    let stats = BuildStats {
        format_a_entries: entries.len(),
        index_words: index.len(),
        overridden: count_overrides(&entries, &index),
    };
    tracing::info!(
        book_a = stats.format_a_entries,
        book_b = stats.index_words,
        overridden = stats.overridden,
        "merged"
    );

    Ok((assign_ids(merge(&entries, &index)), stats))
}

/// Intermediate counts from [`build_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub format_a_entries: usize,
    pub index_words: usize,
    pub overridden: usize,
}

/// Run the whole pipeline described by `config`.
pub fn run(config: &VocabConfig) -> Result<RunSummary> {
    let blocks_a = extract_blocks(&config.book_a)?;
    let blocks_b = extract_blocks(&config.book_b)?;

    let (rows, stats) = build_rows(config, &blocks_a, &blocks_b)?;

    WorkbookWriter::new(config.sheet_name.as_str()).write_to_path(&rows, &config.output)?;

    Ok(RunSummary {
        format_a_entries: stats.format_a_entries,
        index_words: stats.index_words,
        merged_rows: rows.len(),
        overridden: stats.overridden,
        output: config.output.clone(),
    })
}
