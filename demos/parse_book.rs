//! Parse a single book and list what was found, without writing a workbook.
//!
//! Usage:
//!   cargo run --example parse_book -- a book_a.pdf
//!   cargo run --example parse_book -- b book_b.pdf

use std::{env, process};
use wordmaster::pipeline::extract_blocks;
use wordmaster::{FormatAParser, FormatBParser, DEFAULT_DAY_LABEL};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <a|b> <pdf>", args[0]);
        process::exit(1);
    }

    let blocks = extract_blocks(&args[2]).unwrap_or_else(|e| {
        eprintln!("Extraction failed: {e}");
        process::exit(1);
    });

    match args[1].as_str() {
        "a" => {
            let parser = FormatAParser::new(DEFAULT_DAY_LABEL).unwrap_or_else(|e| {
                eprintln!("{e}");
                process::exit(1);
            });
            let entries = parser.parse(&blocks);
            for e in &entries {
                println!("Day {:>3}  {:<30} {}", e.day, e.word, e.meaning);
            }
            println!("\n{} entries", entries.len());
        }
        "b" => {
            let parser = FormatBParser::new().unwrap_or_else(|e| {
                eprintln!("{e}");
                process::exit(1);
            });
            let index = parser.parse(&blocks);
            println!("{} distinct words", index.len());
        }
        other => {
            eprintln!("Unknown book '{other}', expected 'a' or 'b'");
            process::exit(1);
        }
    }
}
