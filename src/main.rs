//! CLI for the wordmaster crate.
//!
//! `vocab` builds the merged vocabulary workbook from the two word books;
//! `organize` and `tree` are the project housekeeping helpers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use wordmaster::{organizer, pipeline, tree, OrganizerConfig, Result, VocabConfig};

#[derive(Parser)]
#[command(name = "wordmaster")]
#[command(version, about = "Vocabulary PDF extraction and project file utilities")]
struct Cli {
    /// Log per-page and per-file details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract both word books, merge them and write an .xlsx workbook
    Vocab {
        /// Book with `n: word ▶ meaning` entries (decides order and day)
        #[arg(long)]
        book_a: Option<PathBuf>,

        /// Book with `n word meaning` lines (supplies meanings)
        #[arg(long)]
        book_b: Option<PathBuf>,

        /// Output workbook
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text that marks a day heading in book A
        #[arg(long)]
        day_label: Option<String>,
    },

    /// Copy matching source files into one flat directory
    Organize {
        /// Project root all other paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Destination directory
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Source directory (repeatable)
        #[arg(long = "src")]
        sources: Vec<PathBuf>,

        /// Skip directories whose path contains this text (repeatable)
        #[arg(long = "exclude")]
        excluded: Vec<String>,

        /// File extension to copy, without the dot (repeatable)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Write the project's folder structure to a Markdown file
    Tree {
        /// Directory to describe
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output file (default: `<root>/폴더 구조.md`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let result = match cli.command {
        Commands::Vocab {
            book_a,
            book_b,
            output,
            day_label,
        } => {
            let defaults = VocabConfig::default();
            run_vocab(VocabConfig {
                book_a: book_a.unwrap_or(defaults.book_a),
                book_b: book_b.unwrap_or(defaults.book_b),
                output: output.unwrap_or(defaults.output),
                day_label: day_label.unwrap_or(defaults.day_label),
                sheet_name: defaults.sheet_name,
            })
        }
        Commands::Organize {
            root,
            dest,
            sources,
            excluded,
            extensions,
        } => {
            let defaults = OrganizerConfig::default();
            run_organize(OrganizerConfig {
                project_root: root,
                destination: dest.unwrap_or(defaults.destination),
                source_dirs: or_default(sources, defaults.source_dirs),
                excluded_dirs: or_default(excluded, defaults.excluded_dirs),
                extensions: or_default(extensions, defaults.extensions),
            })
        }
        Commands::Tree { root, output } => {
            let output = output.unwrap_or_else(|| root.join(tree::DEFAULT_OUTPUT));
            tree::write_tree(&root, &output).map(|()| {
                println!("Folder structure has been saved to {}", output.display());
            })
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn or_default<T>(given: Vec<T>, default: Vec<T>) -> Vec<T> {
    if given.is_empty() {
        default
    } else {
        given
    }
}

fn run_vocab(config: VocabConfig) -> Result<()> {
    println!("📖 Book A: {}", config.book_a.display());
    println!("📖 Book B: {}", config.book_b.display());

    let summary = pipeline::run(&config)?;

    println!("처리된 항목 수: {}", summary.merged_rows);
    println!(
        "   • {} meaning(s) taken from book B ({} indexed word(s))",
        summary.overridden, summary.index_words
    );
    println!("✅ 최종 Excel 파일이 생성되었습니다: {}", summary.output.display());
    Ok(())
}

fn run_organize(config: OrganizerConfig) -> Result<()> {
    let report = organizer::organize(&config)?;
    for (from, to) in &report.copied {
        println!("Copied: {} -> {}", from.display(), to.display());
    }
    println!("✅ {} file(s) copied", report.copied.len());
    Ok(())
}
