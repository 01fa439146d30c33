//! Character codes and advance widths for the fonts of one page.
//!
//! Simple fonts use one byte per code and take widths from `/FirstChar` and
//! `/Widths`. Composite (`Type0`) fonts use two-byte codes and read widths
//! from the descendant font's `/W` array, falling back to `/DW`.

use lopdf::{Dictionary, Document, Encoding, Object};

/// `/DW` when a descendant font leaves it out, in glyph space units.
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// One character code of a shown string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Glyph {
    pub text: String,
    /// Advance in ems, if the font states one.
    pub width: Option<f64>,
    /// Single-byte code 32, the only code `Tw` applies to.
    pub is_space_code: bool,
}

impl Glyph {
    /// Advance in ems, estimated from the text when the font has no width.
    pub fn advance(&self) -> f64 {
        self.width.unwrap_or_else(|| estimate_ems(&self.text))
    }
}

/// Half an em for ASCII, a full em for everything else.
pub(crate) fn estimate_ems(text: &str) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.5 } else { 1.0 })
        .sum()
}

enum Widths {
    Simple { first_char: u32, widths: Vec<f64> },
    Cid { default: f64, ranges: Vec<(u32, u32, f64)> },
}

impl Widths {
    fn get(&self, code: u32) -> Option<f64> {
        let units = match self {
            Widths::Simple { first_char, widths } => {
                let index = code.checked_sub(*first_char)?;
                *widths.get(index as usize)?
            }
            Widths::Cid { default, ranges } => ranges
                .iter()
                .find(|(first, last, _)| (*first..=*last).contains(&code))
                .map_or(*default, |(_, _, w)| *w),
        };
        Some(units / 1000.0)
    }
}

/// Decoding and metrics of one font resource.
pub(crate) struct FontMetrics<'a> {
    encoding: Encoding<'a>,
    code_len: usize,
    widths: Widths,
}

impl<'a> FontMetrics<'a> {
    pub(crate) fn from_font(font: &'a Dictionary, doc: &'a Document) -> lopdf::Result<Self> {
        let encoding = font.get_font_encoding(doc)?;
        let composite = matches!(font.get(b"Subtype").and_then(Object::as_name), Ok(b"Type0"));

        let (code_len, widths) = if composite {
            (2, cid_widths(font, doc))
        } else {
            (1, simple_widths(font, doc))
        };

        Ok(Self {
            encoding,
            code_len,
            widths,
        })
    }

    /// Split `bytes` into character codes and decode each one.
    pub(crate) fn glyphs(&self, bytes: &[u8]) -> Vec<Glyph> {
        bytes
            .chunks(self.code_len)
            .map(|chunk| {
                let code = chunk.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
                Glyph {
                    text: Document::decode_text(&self.encoding, chunk).unwrap_or_default(),
                    width: self.widths.get(code),
                    is_space_code: self.code_len == 1 && code == 32,
                }
            })
            .collect()
    }
}

fn simple_widths(font: &Dictionary, doc: &Document) -> Widths {
    let first_char = font
        .get(b"FirstChar")
        .and_then(Object::as_i64)
        .ok()
        .and_then(|c| u32::try_from(c).ok())
        .unwrap_or(0);
    let widths = font
        .get_deref(b"Widths", doc)
        .and_then(Object::as_array)
        .map(|items| items.iter().map(|w| number(doc, w).unwrap_or(0.0)).collect())
        .unwrap_or_default();
    Widths::Simple { first_char, widths }
}

fn cid_widths(font: &Dictionary, doc: &Document) -> Widths {
    let descendant = font
        .get_deref(b"DescendantFonts", doc)
        .and_then(Object::as_array)
        .ok()
        .and_then(|fonts| fonts.first())
        .and_then(|first| doc.dereference(first).ok())
        .and_then(|(_, obj)| obj.as_dict().ok());

    let Some(descendant) = descendant else {
        return Widths::Cid {
            default: DEFAULT_CID_WIDTH,
            ranges: Vec::new(),
        };
    };

    let default = descendant
        .get(b"DW")
        .ok()
        .and_then(|dw| number(doc, dw))
        .unwrap_or(DEFAULT_CID_WIDTH);
    let ranges = descendant
        .get_deref(b"W", doc)
        .and_then(Object::as_array)
        .map(|items| parse_cid_widths(doc, items))
        .unwrap_or_default();
    Widths::Cid { default, ranges }
}

/// `/W` entries come as `c [w1 w2 …]` or `c_first c_last w`.
fn parse_cid_widths(doc: &Document, items: &[Object]) -> Vec<(u32, u32, f64)> {
    let mut ranges = Vec::new();
    let mut rest = items;

    while let Some((first, tail)) = rest.split_first() {
        let Some(first) = code(doc, first) else {
            break;
        };
        match tail.first().map(|o| doc.dereference(o).map(|(_, obj)| obj)) {
            Some(Ok(Object::Array(widths))) => {
                for (offset, w) in (0u32..).zip(widths) {
                    if let Some(w) = number(doc, w) {
                        ranges.push((first + offset, first + offset, w));
                    }
                }
                rest = &tail[1..];
            }
            Some(Ok(last)) => {
                let (Some(last), Some(w)) = (code(doc, last), tail.get(1).and_then(|w| number(doc, w)))
                else {
                    break;
                };
                ranges.push((first, last, w));
                rest = tail.get(2..).unwrap_or(&[]);
            }
            _ => break,
        }
    }

    ranges
}

fn number(doc: &Document, obj: &Object) -> Option<f64> {
    let (_, obj) = doc.dereference(obj).ok()?;
    obj.as_float().ok().map(f64::from)
}

fn code(doc: &Document, obj: &Object) -> Option<u32> {
    let (_, obj) = doc.dereference(obj).ok()?;
    obj.as_i64().ok().and_then(|c| u32::try_from(c).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cid_widths_accept_both_entry_forms() {
        let doc = Document::new();
        let items: Vec<Object> = vec![
            1.into(),
            vec![Object::from(900), Object::from(800)].into(),
            10.into(),
            20.into(),
            500.into(),
        ];
        let ranges = parse_cid_widths(&doc, &items);
        assert_eq!(ranges, vec![(1, 1, 900.0), (2, 2, 800.0), (10, 20, 500.0)]);
    }

    #[test]
    fn cid_codes_outside_w_use_default() {
        let widths = Widths::Cid {
            default: 1000.0,
            ranges: vec![(1, 1, 900.0)],
        };
        assert_eq!(widths.get(1), Some(0.9));
        assert_eq!(widths.get(7), Some(1.0));
    }

    #[test]
    fn simple_widths_are_indexed_from_first_char() {
        let widths = Widths::Simple {
            first_char: 32,
            widths: vec![250.0, 600.0],
        };
        assert_eq!(widths.get(33), Some(0.6));
        assert_eq!(widths.get(31), None);
        assert_eq!(widths.get(40), None);
    }

    #[test]
    fn missing_width_falls_back_to_estimate() {
        let glyph = Glyph {
            text: "가".to_string(),
            width: None,
            is_space_code: false,
        };
        assert_eq!(glyph.advance(), 1.0);
    }
}
