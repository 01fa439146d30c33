//! Minimal Office Open XML workbook writer.
//!
//! One worksheet, a bold header row, numeric `ID`/`Day` cells and
//! shared-string text cells. Archive entries carry a fixed timestamp so the
//! same rows always produce the same bytes.

use crate::{MergedEntry, Result};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const HEADER: [&str; 4] = ["ID", "Day", "English", "Korean"];

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

// Style 0 is the default, style 1 is bold for the header row.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs></styleSheet>"#;

// ── WorkbookWriter ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WorkbookWriter {
    sheet_name: String,
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new("Words")
    }
}

impl WorkbookWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Serialise `rows` into `.xlsx` bytes.
    pub fn to_bytes(&self, rows: &[MergedEntry]) -> Result<Vec<u8>> {
        let mut strings = SharedStrings::default();
        let sheet = worksheet_xml(rows, &mut strings);

        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", workbook_xml(&self.sheet_name)),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/styles.xml", STYLES.to_string()),
            ("xl/worksheets/sheet1.xml", sheet),
            ("xl/sharedStrings.xml", strings.to_xml()),
        ];

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
        }
        Ok(zip.finish()?.into_inner())
    }

    /// Write the workbook to `path`, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(&self, rows: &[MergedEntry], path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes(rows)?)?;
        tracing::info!(rows = rows.len(), path = %path.display(), "workbook written");
        Ok(())
    }
}

// ── Parts ────────────────────────────────────────────────────────────────────

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    )
}

fn worksheet_xml(rows: &[MergedEntry], strings: &mut SharedStrings) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (col, title) in HEADER.iter().enumerate() {
        let idx = strings.index_of(title);
        xml.push_str(&format!(
            r#"<c r="{}1" s="1" t="s"><v>{idx}</v></c>"#,
            column_letter(col)
        ));
    }
    xml.push_str("</row>");

    for (i, row) in rows.iter().enumerate() {
        let r = i + 2;
        let english = strings.index_of(&row.word);
        let korean = strings.index_of(&row.meaning);
        xml.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}"><v>{}</v></c><c r="B{r}"><v>{}</v></c><c r="C{r}" t="s"><v>{english}</v></c><c r="D{r}" t="s"><v>{korean}</v></c></row>"#,
            row.id, row.day
        ));
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// Shared string table in first-use order.
#[derive(Default)]
struct SharedStrings {
    order: Vec<String>,
    lookup: HashMap<String, usize>,
    uses: usize,
}

impl SharedStrings {
    fn index_of(&mut self, s: &str) -> usize {
        self.uses += 1;
        if let Some(&i) = self.lookup.get(s) {
            return i;
        }
        let i = self.order.len();
        self.order.push(s.to_string());
        self.lookup.insert(s.to_string(), i);
        i
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.uses,
            self.order.len()
        );
        for s in &self.order {
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                xml.push_str(&format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s)));
            } else {
                xml.push_str(&format!("<si><t>{}</t></si>", escape_xml(s)));
            }
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Escape markup characters and drop code points XML 1.0 cannot carry.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}
