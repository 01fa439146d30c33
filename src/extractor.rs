use crate::font_metrics::FontMetrics;
use crate::text_layout::{assemble_lines, split_columns, TextWalker};
use crate::{Result, VocabError};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// US-Letter, used when no `/MediaBox` is found on a page or its ancestors.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

// ── PdfTextExtractor ──────────────────────────────────────────────────────────

/// Reads a two-column PDF and returns the text of each half page.
///
/// ```no_run
/// use wordmaster::PdfTextExtractor;
///
/// let extractor = PdfTextExtractor::from_path("book.pdf").unwrap();
/// let blocks = extractor.extract_columns();
/// assert_eq!(blocks.len(), extractor.page_count() * 2);
/// ```
pub struct PdfTextExtractor {
    document: Document,
}

impl PdfTextExtractor {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Load a PDF from the file system.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VocabError::MissingSource(path.to_path_buf()));
        }
        Self::from_document(Document::load(path)?)
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_document(Document::load_mem(data)?)
    }

    fn from_document(document: Document) -> Result<Self> {
        document
            .catalog()
            .map_err(|e| VocabError::InvalidPdf(format!("missing or invalid catalog: {e}")))?;
        Ok(Self { document })
    }

    // ── Extraction ────────────────────────────────────────────────────────────

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Text of every page split in half: `[p1 left, p1 right, p2 left, …]`.
    ///
    /// A page that cannot be decoded contributes two empty strings.
    pub fn extract_columns(&self) -> Vec<String> {
        let pages = self.document.get_pages();
        let mut blocks = Vec::with_capacity(pages.len() * 2);

        for (page_number, page_id) in pages {
            let (left, right) = match self.page_columns(page_id) {
                Ok(columns) => columns,
                Err(e) => {
                    tracing::warn!(page = page_number, "no text extracted: {e}");
                    (String::new(), String::new())
                }
            };
            tracing::debug!(
                page = page_number,
                left_chars = left.chars().count(),
                right_chars = right.chars().count(),
                "page split"
            );
            blocks.push(left);
            blocks.push(right);
        }

        blocks
    }

    // ── Private: per page ────────────────────────────────────────────────────

    fn page_columns(&self, page_id: ObjectId) -> Result<(String, String)> {
        let [x0, _, x1, _] = self.media_box(page_id);
        let split_x = x0 + (x1 - x0) / 2.0;

        let fonts = self.document.get_page_fonts(page_id)?;
        let metrics: BTreeMap<Vec<u8>, FontMetrics> = fonts
            .into_iter()
            .filter_map(|(name, font)| match FontMetrics::from_font(font, &self.document) {
                Ok(metrics) => Some((name, metrics)),
                Err(e) => {
                    tracing::debug!(
                        font = %String::from_utf8_lossy(&name),
                        "font encoding unavailable: {e}"
                    );
                    None
                }
            })
            .collect();

        let content = Content::decode(&self.document.get_page_content(page_id)?)?;

        let decode = |font: &[u8], bytes: &[u8]| {
            metrics
                .get(font)
                .map(|m| m.glyphs(bytes))
                .unwrap_or_default()
        };
        let fragments = TextWalker::new(decode).walk(&content.operations);

        let (left, right) = split_columns(fragments, split_x);
        Ok((assemble_lines(left), assemble_lines(right)))
    }

    /// Effective `/MediaBox`, following `/Parent` links for inherited values.
    fn media_box(&self, page_id: ObjectId) -> [f64; 4] {
        let mut current = Some(page_id);
        while let Some(id) = current {
            let Ok(dict) = self.document.get_dictionary(id) else {
                break;
            };
            if let Some(rect) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|v| self.resolve_array(v))
                .and_then(|arr| rect_from(&arr))
            {
                return rect;
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }
        DEFAULT_MEDIA_BOX
    }

    /// Resolve a value that might be inline or a reference to an array.
    fn resolve_array(&self, value: &Object) -> Option<Vec<Object>> {
        if let Ok(id) = value.as_reference() {
            self.document
                .get_object(id)
                .ok()
                .and_then(|o| o.as_array().ok().cloned())
        } else {
            value.as_array().ok().cloned()
        }
    }
}

/// Normalised `[x0, y0, x1, y1]` from a PDF rectangle array.
fn rect_from(values: &[Object]) -> Option<[f64; 4]> {
    let nums: Vec<f64> = values
        .iter()
        .filter_map(|v| v.as_float().ok().map(f64::from))
        .collect();
    match nums.as_slice() {
        &[ax, ay, bx, by] => Some([ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)]),
        _ => None,
    }
}
