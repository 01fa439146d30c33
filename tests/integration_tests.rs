// Integration tests for wordmaster's parsing, merging and workbook output.
//
// Text-level tests feed the parsers the same strings the column extractor
// produces, so no PDF fixtures are needed here; see `pdf_extraction.rs` for
// tests that go through lopdf.

use calamine::{Reader, Xlsx};
use std::io::Cursor;
use wordmaster::boilerplate::BoilerplateRules;
use wordmaster::merge::merge;
use wordmaster::model::assign_ids;
use wordmaster::pipeline::build_rows;
use wordmaster::{
    Entry, FormatAParser, FormatBParser, MergedEntry, VocabConfig, VocabError, WordIndex,
    WorkbookWriter, DEFAULT_DAY_LABEL,
};

fn parser_a() -> FormatAParser {
    FormatAParser::new(DEFAULT_DAY_LABEL).unwrap()
}

fn read_sheet(bytes: Vec<u8>, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

// ── Book A ────────────────────────────────────────────────────────────────────

#[test]
fn book_a_numbered_line_starts_entry() {
    let entries = parser_a().parse(&["12: hello ▶ world"]);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word, "hello");
    assert!(entries[0].meaning.contains("world"));
}

#[test]
fn book_a_continuations_extend_pending_entry() {
    let text = "1: abandon ▶ 버리다,\n포기하다\n(be) abandoned ▶ 버려진\n2: absorb ▶ 흡수하다";
    let entries = parser_a().parse(&[text]);
    // The captured word keeps its trailing space until the entry is flushed,
    // so the appended part is separated by two spaces.
    assert_eq!(
        entries,
        vec![
            Entry::new(1, "abandon  (be) abandoned", "버리다, 포기하다 버려진"),
            Entry::new(1, "absorb", "흡수하다"),
        ]
    );
}

#[test]
fn book_a_entry_spans_blocks() {
    let entries = parser_a().parse(&["1: run ▶ to move", "fast", ""]);
    assert_eq!(entries, vec![Entry::new(1, "run", "to move fast")]);
}

#[test]
fn book_a_day_marker_applies_at_flush_time() {
    let text = "1: one ▶ 하나\n워마 EBS 파이널 Day 2\n2: two ▶ 둘\n3: three ▶ 셋";
    let entries = parser_a().parse(&[text]);
    let days: Vec<u32> = entries.iter().map(|e| e.day).collect();
    // "one" is still pending when the marker arrives, so it is flushed as day 2.
    assert_eq!(days, vec![2, 2, 2]);
}

#[test]
fn book_a_entries_before_any_marker_are_day_one() {
    let text = "1: one ▶ 하나\n2: two ▶ 둘\n워마 EBS 파이널 Day 7\n3: three ▶ 셋";
    let entries = parser_a().parse(&[text]);
    let days: Vec<u32> = entries.iter().map(|e| e.day).collect();
    assert_eq!(days, vec![1, 7, 7]);
}

#[test]
fn book_a_marker_lines_emit_nothing() {
    let entries = parser_a().parse(&["워마 EBS 파이널 Day 3 ▶ something"]);
    assert!(entries.is_empty());
}

#[test]
fn book_a_meaning_footer_is_stripped() {
    let text = "5: quick ▶ 빠른 -12-\n☎ 010-1234-5678\n애니보카(anyvoca.com) 무료 단어장";
    let entries = parser_a().parse(&[text]);
    assert_eq!(entries, vec![Entry::new(1, "quick", "빠른")]);
}

#[test]
fn book_a_empty_input_has_no_entries() {
    let blocks: Vec<String> = vec![String::new(), String::new()];
    assert!(parser_a().parse(&blocks).is_empty());
}

// ── Boilerplate ───────────────────────────────────────────────────────────────

#[test]
fn boilerplate_phone_number_fully_removed() {
    let rules = BoilerplateRules::book_a().unwrap();
    assert_eq!(rules.strip("뜻 ☎ 010-1234-5678").trim(), "뜻");
}

#[test]
fn boilerplate_page_number_removed() {
    let rules = BoilerplateRules::book_a().unwrap();
    assert_eq!(rules.strip("앞 -12- 뒤"), "앞  뒤");
}

#[test]
fn boilerplate_promo_truncates_remainder() {
    let rules = BoilerplateRules::book_a().unwrap();
    assert_eq!(rules.strip("의미 애니보카(anyvoca.com) 나머지 전부"), "의미 ");
}

#[test]
fn book_a_ships_three_footer_rules() {
    let rules = BoilerplateRules::book_a().unwrap();
    assert_eq!(rules.len(), 3);
    assert!(!rules.is_empty());
}

#[test]
fn custom_rules_replace_defaults() {
    let mut rules = BoilerplateRules::empty();
    assert!(rules.is_empty());
    rules.push(wordmaster::boilerplate::Rule::new("page", r"\[p\.\d+\]", "").unwrap());
    assert_eq!(rules.len(), 1);
    let parser = parser_a().with_rules(rules);
    let entries = parser.parse(&["1: go ▶ 가다 [p.3] -4-"]);
    assert_eq!(entries[0].meaning, "가다  -4-");
}

#[test]
fn invalid_rule_pattern_is_reported() {
    let err = wordmaster::boilerplate::Rule::new("bad", "(", "").unwrap_err();
    assert!(matches!(err, VocabError::Pattern(_)));
}

// ── Book B ────────────────────────────────────────────────────────────────────

#[test]
fn book_b_first_seen_wins() {
    let index = FormatBParser::new()
        .unwrap()
        .parse(&["5 apple fruit-one\n6 apple fruit-two"]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("apple").unwrap().meaning, "fruit-one");
}

#[test]
fn book_b_day_range_sets_day() {
    let index = FormatBParser::new()
        .unwrap()
        .parse(&["1 alpha first", "Day 6~10\n2 beta second meaning  "]);
    assert_eq!(index.get("alpha").unwrap().day, 1);
    let beta = index.get("beta").unwrap();
    assert_eq!(beta.day, 6);
    assert_eq!(beta.meaning, "second meaning");
}

#[test]
fn book_b_day_lines_without_range_are_skipped() {
    let index = FormatBParser::new()
        .unwrap()
        .parse(&["Day 3~4\n12 Day word\n1 gamma third"]);
    assert!(!index.contains("Day"));
    assert_eq!(index.get("gamma").unwrap().day, 3);
}

#[test]
fn book_b_ignores_unnumbered_lines() {
    let index = FormatBParser::new()
        .unwrap()
        .parse(&["apple 사과\n7apple 사과\n"]);
    assert!(index.is_empty());
}

// ── Merge ─────────────────────────────────────────────────────────────────────

#[test]
fn merge_takes_day_from_a_and_meaning_from_b() {
    let mut index = WordIndex::new();
    index.insert_first("apple", 9, "fruit-two");

    let merged = merge(&[Entry::new(3, "apple", "fruit-one")], &index);
    assert_eq!(merged, vec![Entry::new(3, "apple", "fruit-two")]);
}

#[test]
fn merge_keeps_unknown_words_and_drops_b_only_words() {
    let mut index = WordIndex::new();
    index.insert_first("only-in-b", 1, "x");

    let entries = vec![Entry::new(1, "run", "달리다"), Entry::new(1, "run", "뛰다")];
    let merged = merge(&entries, &index);
    assert_eq!(merged, entries);
}

#[test]
fn ids_are_sequential_from_one() {
    let rows = assign_ids(vec![Entry::new(2, "a", "1"), Entry::new(1, "b", "2")]);
    let ids: Vec<usize> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(rows[0].day, 2);
}

// ── Pipeline on text blocks ───────────────────────────────────────────────────

#[test]
fn single_entry_end_to_end() {
    let config = VocabConfig::default();
    let no_b: [&str; 0] = [];
    let (rows, stats) = build_rows(&config, &["1: run ▶ to move fast", ""], &no_b).unwrap();

    assert_eq!(
        rows,
        vec![MergedEntry {
            id: 1,
            day: 1,
            word: "run".into(),
            meaning: "to move fast".into(),
        }]
    );
    assert_eq!(stats.overridden, 0);

    let bytes = WorkbookWriter::default().to_bytes(&rows).unwrap();
    let sheet = read_sheet(bytes, "Words");
    assert_eq!(sheet[0], vec!["ID", "Day", "English", "Korean"]);
    assert_eq!(sheet[1], vec!["1", "1", "run", "to move fast"]);
    assert_eq!(sheet.len(), 2);
}

#[test]
fn book_b_meaning_overrides_in_pipeline() {
    let config = VocabConfig::default();
    let (rows, stats) = build_rows(
        &config,
        &["1: apple ▶ 사과 -3-\n2: pear ▶ 배"],
        &["Day 1~5\n10 apple 사과 (과일)"],
    )
    .unwrap();

    assert_eq!(stats.format_a_entries, 2);
    assert_eq!(stats.index_words, 1);
    assert_eq!(stats.overridden, 1);
    assert_eq!(rows[0].meaning, "사과 (과일)");
    assert_eq!(rows[1].meaning, "배");
}

// ── Workbook ──────────────────────────────────────────────────────────────────

#[test]
fn workbook_preserves_duplicates_and_escapes_text() {
    let rows = assign_ids(vec![
        Entry::new(1, "a&b", "<x>"),
        Entry::new(1, "a&b", "<x>"),
    ]);
    let sheet = read_sheet(WorkbookWriter::new("Sheet").to_bytes(&rows).unwrap(), "Sheet");
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet[1], vec!["1", "1", "a&b", "<x>"]);
    assert_eq!(sheet[2], vec!["2", "1", "a&b", "<x>"]);
}

#[test]
fn workbook_bytes_are_deterministic() {
    let rows = assign_ids(vec![Entry::new(1, "run", "달리다")]);
    let writer = WorkbookWriter::default();
    assert_eq!(writer.to_bytes(&rows).unwrap(), writer.to_bytes(&rows).unwrap());
}

#[test]
fn workbook_written_to_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("words.xlsx");
    let rows = assign_ids(vec![Entry::new(4, "go", "가다")]);

    WorkbookWriter::default().write_to_path(&rows, &path).unwrap();

    let sheet = read_sheet(std::fs::read(&path).unwrap(), "Words");
    assert_eq!(sheet[1], vec!["1", "4", "go", "가다"]);
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn error_display_is_non_empty() {
    let errors: &[VocabError] = &[
        VocabError::InvalidPdf("test".into()),
        VocabError::MissingSource("book.pdf".into()),
        VocabError::Io(std::io::Error::other("disk")),
    ];
    for e in errors {
        assert!(!e.to_string().is_empty(), "empty display for {e:?}");
    }
}
