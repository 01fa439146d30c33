//! # wordmaster
//!
//! Turns two vocabulary word books, printed as two-column PDFs, into a single
//! spreadsheet of `(ID, Day, English, Korean)` rows.
//!
//! ## What this crate does
//!
//! 1. **Extract columns**: every page is split down the middle and the text
//!    of the left half and the right half is returned separately, left first.
//! 2. **Parse book A**: numbered `n: word ▶ meaning` entries grouped under
//!    day markers, with continuation lines and footer clutter removed.
//! 3. **Parse book B**: `n word meaning` lines grouped under `Day a~b`
//!    headings, collected into a first-seen-wins [`WordIndex`].
//! 4. **Merge**: book A decides order and day, book B supplies the meaning
//!    whenever it knows the word.
//! 5. **Write**: an `.xlsx` workbook with a sequential ID column.
//!
//! Two small project utilities ride along: [`organizer`] flattens selected
//! source files into one directory, and [`tree`] renders a directory tree.
//!
//! ## Quick example
//!
//! ```no_run
//! use wordmaster::{pipeline, VocabConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VocabConfig {
//!     book_a: "book_a.pdf".into(),
//!     book_b: "book_b.pdf".into(),
//!     output: "words.xlsx".into(),
//!     ..Default::default()
//! };
//!
//! let summary = pipeline::run(&config)?;
//! println!("{} rows written to {}", summary.merged_rows, summary.output.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod boilerplate;
pub mod extractor;
mod font_metrics;
pub mod format_a;
pub mod format_b;
pub mod merge;
pub mod model;
pub mod organizer;
pub mod pipeline;
mod text_layout;
pub mod tree;
pub mod xlsx;

pub use extractor::PdfTextExtractor;
pub use format_a::FormatAParser;
pub use format_b::FormatBParser;
pub use model::{Entry, IndexEntry, MergedEntry, WordIndex};
pub use xlsx::WorkbookWriter;

// ── Configuration ────────────────────────────────────────────────────────────

/// Label that marks a new day in book A, e.g. `워마 EBS 파이널 Day 12`.
pub const DEFAULT_DAY_LABEL: &str = "워마 EBS 파이널";

/// Inputs and outputs of one vocabulary run.
#[derive(Debug, Clone)]
pub struct VocabConfig {
    /// Book A: numbered `n: word ▶ meaning` entries. Decides order and days.
    pub book_a: PathBuf,

    /// Book B: `n word meaning` lines. Supplies replacement meanings.
    pub book_b: PathBuf,

    /// Destination workbook. Overwritten if it exists.
    pub output: PathBuf,

    /// Substring identifying a day-marker line in book A.
    pub day_label: String,

    /// Name of the single worksheet in the output workbook.
    pub sheet_name: String,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            book_a: PathBuf::from("워드마스터 ebs파이널 1번 파일.pdf"),
            book_b: PathBuf::from("워드마스터 파이널1200 2번 파일.pdf"),
            output: PathBuf::from("final_output.xlsx"),
            day_label: DEFAULT_DAY_LABEL.to_string(),
            sheet_name: "Words".to_string(),
        }
    }
}

/// Settings for [`organizer::organize`].
///
/// `source_dirs`, `destination` and `excluded_dirs` are interpreted relative
/// to `project_root`.
#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    pub project_root: PathBuf,
    pub source_dirs: Vec<PathBuf>,
    pub destination: PathBuf,

    /// A directory is skipped, with everything below it, when its
    /// root-relative path (using `/` separators) contains any of these.
    pub excluded_dirs: Vec<String>,

    /// Allowed extensions without the leading dot. Matching is exact.
    pub extensions: Vec<String>,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            source_dirs: vec![PathBuf::from("src"), PathBuf::from("prisma")],
            destination: PathBuf::from("project_knowledge"),
            excluded_dirs: vec!["prisma/migrations".to_string()],
            extensions: vec!["ts".to_string(), "tsx".to_string(), "prisma".to_string()],
        }
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum VocabError {
    /// A filesystem I/O error occurred (reading a book, copying, writing output).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying lopdf parser returned an error.
    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The input bytes parsed, but do not form a usable PDF document.
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// A source book does not exist.
    #[error("Source not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// A built-in or user-supplied pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A directory could not be listed while organizing files.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The workbook archive could not be assembled.
    #[error("Workbook archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, VocabError>;
