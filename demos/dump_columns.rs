//! Print the left/right column text of every page, to check how a book is
//! split before tuning the parsers.
//!
//! Usage:
//!   cargo run --example dump_columns -- book.pdf
//!   cargo run --example dump_columns -- book.pdf --page 3

use std::{env, process};
use wordmaster::PdfTextExtractor;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf> [--page <n>]", args[0]);
        process::exit(1);
    }

    let only_page: Option<usize> = args
        .windows(2)
        .find(|w| w[0] == "--page")
        .and_then(|w| w[1].parse().ok());

    let extractor = PdfTextExtractor::from_path(&args[1]).unwrap_or_else(|e| {
        eprintln!("Cannot load PDF: {e}");
        process::exit(1);
    });

    let blocks = extractor.extract_columns();
    for (i, pair) in blocks.chunks(2).enumerate() {
        let page = i + 1;
        if only_page.is_some_and(|p| p != page) {
            continue;
        }
        for (side, text) in ["left", "right"].iter().zip(pair) {
            println!("── page {page} ({side}) {}", "─".repeat(40));
            println!("{text}");
        }
    }
}
