//! Positioned text from a page content stream, and reassembly of that text
//! into lines for one column.
//!
//! Every character code becomes its own [`Fragment`] at its own origin, so a
//! `TJ` run whose offsets carry later strings across the page midline is
//! split between the columns. Advances use the font's widths where it has
//! them.

use crate::font_metrics::Glyph;
use lopdf::content::Operation;
use lopdf::Object;

/// Lines whose baselines differ by at most this many points are merged.
const LINE_TOLERANCE: f64 = 3.0;

/// Fragments further apart than this fraction of the font size get a space.
const WORD_GAP: f64 = 0.25;

/// TJ adjustments below this (thousandths of an em) count as a word break.
const TJ_SPACE_THRESHOLD: f64 = -100.0;

// ── Matrix ───────────────────────────────────────────────────────────────────

/// PDF affine matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    pub(crate) const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(tx: f64, ty: f64) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let v = numbers(operands);
        match v.as_slice() {
            &[a, b, c, d, e, f] => Some(Matrix { a, b, c, d, e, f }),
            _ => None,
        }
    }

    /// `self` applied first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn origin(&self) -> (f64, f64) {
        (self.e, self.f)
    }

    fn horizontal_scale(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

fn number(obj: &Object) -> Option<f64> {
    obj.as_float().ok().map(f64::from)
}

fn numbers(operands: &[Object]) -> Vec<f64> {
    operands.iter().filter_map(number).collect()
}

// ── Fragment ─────────────────────────────────────────────────────────────────

/// One shown character, positioned in page space.
///
/// `text` starts with a space when a space code or a wide `TJ` gap came
/// right before it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment {
    pub x: f64,
    pub y: f64,
    /// Font size in page space.
    pub size: f64,
    /// Advance in page space.
    pub width: f64,
    pub text: String,
}

impl Fragment {
    fn end_x(&self) -> f64 {
        self.x + self.width
    }
}

// ── Text state machine ───────────────────────────────────────────────────────

/// Walks content-stream operations and collects [`Fragment`]s.
///
/// `decode` splits the raw bytes of a string operand into [`Glyph`]s using
/// the font selected by the most recent `Tf`; it receives the font resource
/// name. Strings in an unknown font decode to nothing and do not advance.
pub(crate) struct TextWalker<F>
where
    F: FnMut(&[u8], &[u8]) -> Vec<Glyph>,
{
    decode: F,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font: Vec<u8>,
    font_size: f64,
    leading: f64,
    char_spacing: f64,
    word_spacing: f64,
    /// `Tz` as a fraction.
    horizontal_scaling: f64,
    pending_space: bool,
    fragments: Vec<Fragment>,
}

impl<F> TextWalker<F>
where
    F: FnMut(&[u8], &[u8]) -> Vec<Glyph>,
{
    pub(crate) fn new(decode: F) -> Self {
        Self {
            decode,
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font: Vec::new(),
            font_size: 0.0,
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            pending_space: false,
            fragments: Vec::new(),
        }
    }

    pub(crate) fn walk(mut self, operations: &[Operation]) -> Vec<Fragment> {
        for op in operations {
            self.apply(op);
        }
        self.fragments
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(m) = self.ctm_stack.pop() {
                    self.ctm = m;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
                self.pending_space = false;
            }
            "Tf" => {
                if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                    self.font = name.to_vec();
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some(l) = operands.first().and_then(number) {
                    self.leading = l;
                }
            }
            "Tc" => {
                if let Some(c) = operands.first().and_then(number) {
                    self.char_spacing = c;
                }
            }
            "Tw" => {
                if let Some(w) = operands.first().and_then(number) {
                    self.word_spacing = w;
                }
            }
            "Tz" => {
                if let Some(z) = operands.first().and_then(number) {
                    self.horizontal_scaling = z / 100.0;
                }
            }
            "Td" => {
                if let &[tx, ty] = numbers(operands).as_slice() {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let &[tx, ty] = numbers(operands).as_slice() {
                    self.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => self.show(operands),
            "TJ" => {
                if let Some(Ok(items)) = operands.first().map(Object::as_array) {
                    self.show(items);
                }
            }
            "'" => {
                self.next_line();
                self.show(operands);
            }
            "\"" => {
                // aw ac string
                if let &[aw, ac] = numbers(operands.get(..2).unwrap_or(&[])).as_slice() {
                    self.word_spacing = aw;
                    self.char_spacing = ac;
                }
                self.next_line();
                self.show(operands.get(2..).unwrap_or(&[]));
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.tlm = Matrix::translate(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
        self.pending_space = false;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Show string operands and apply the `TJ` offsets between them.
    fn show(&mut self, items: &[Object]) {
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    let glyphs = (self.decode)(self.font.as_slice(), bytes.as_slice());
                    for glyph in glyphs {
                        self.show_glyph(glyph);
                    }
                }
                other => {
                    if let Some(adjust) = number(other) {
                        if adjust < TJ_SPACE_THRESHOLD {
                            self.pending_space = true;
                        }
                        self.advance(-adjust / 1000.0 * self.font_size);
                    }
                }
            }
        }
    }

    fn show_glyph(&mut self, glyph: Glyph) {
        let ems = glyph.advance();
        let rendering = self.tm.then(&self.ctm);

        if glyph.text.trim().is_empty() {
            self.pending_space |= !glyph.text.is_empty();
        } else {
            let (x, y) = rendering.origin();
            let mut text = glyph.text;
            if std::mem::take(&mut self.pending_space) {
                text.insert(0, ' ');
            }
            self.fragments.push(Fragment {
                x,
                y,
                size: self.font_size * rendering.vertical_scale(),
                width: ems * self.font_size * self.horizontal_scaling * rendering.horizontal_scale(),
                text,
            });
        }

        let mut tx = ems * self.font_size + self.char_spacing;
        if glyph.is_space_code {
            tx += self.word_spacing;
        }
        self.advance(tx);
    }

    /// Move along the baseline by `tx` unscaled text space units.
    fn advance(&mut self, tx: f64) {
        let step = Matrix::translate(tx * self.horizontal_scaling, 0.0);
        self.tm = step.then(&self.tm);
    }
}

// ── Column assembly ──────────────────────────────────────────────────────────

/// Split fragments at `split_x`: origins left of the line go left.
pub(crate) fn split_columns(fragments: Vec<Fragment>, split_x: f64) -> (Vec<Fragment>, Vec<Fragment>) {
    fragments.into_iter().partition(|f| f.x < split_x)
}

/// Reassemble a column's fragments into text, top line first.
pub(crate) fn assemble_lines(mut fragments: Vec<Fragment>) -> String {
    fragments.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<Fragment>> = Vec::new();
    for fragment in fragments {
        match lines.last_mut() {
            Some(line) if (line[0].y - fragment.y).abs() <= LINE_TOLERANCE => line.push(fragment),
            _ => lines.push(vec![fragment]),
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            join_line(&line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_line(line: &[Fragment]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Fragment> = None;
    for fragment in line {
        if let Some(p) = prev {
            let gap = fragment.x - p.end_x();
            if gap > p.size * WORD_GAP && !out.ends_with(' ') && !fragment.text.starts_with(' ') {
                out.push(' ');
            }
        }
        out.push_str(&fragment.text);
        prev = Some(fragment);
    }
    out.trim().to_string()
}
