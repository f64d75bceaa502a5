//! Lexer-facing view of a [`Document`].
//!
//! Style writes are buffered and must be monotonic: each [`Accessor::colour_to`] continues
//! where the previous one ended. Fold levels and properties pass straight through.

use crate::Style;
use crate::document::Document;
use crate::fold::FoldLevel;
use crate::properties::PropertySet;

const BUFFER_SIZE: usize = 4000;
const TAB_WIDTH: u16 = 8;

/// Buffered access to a document during one lex or fold pass.
pub struct Accessor<'a> {
    doc: &'a mut dyn Document,
    props: &'a PropertySet,
    len: usize,
    style_mask: Style,
    start_seg: usize,
    start_pos: usize,
    pending: Vec<Style>,
}

impl<'a> Accessor<'a> {
    /// Wrap a document and the properties of the active language.
    pub fn new(doc: &'a mut dyn Document, props: &'a PropertySet) -> Self {
        let len = doc.len();
        Self {
            doc,
            props,
            len,
            style_mask: Style::MAX,
            start_seg: 0,
            start_pos: 0,
            pending: Vec::with_capacity(BUFFER_SIZE),
        }
    }

    /// Limit written styles to the low `bits` bits.
    pub fn with_style_bits(mut self, bits: u8) -> Self {
        self.style_mask = match bits {
            0 => 0,
            1..=7 => (1 << bits) - 1,
            _ => Style::MAX,
        };
        self
    }

    /// Document length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte at `pos`, or 0 past the end.
    pub fn char_at(&self, pos: usize) -> u8 {
        self.safe_char_at(pos, 0)
    }

    /// Byte at `pos`, or `default` past the end.
    pub fn safe_char_at(&self, pos: usize, default: u8) -> u8 {
        self.doc.byte_at(pos).unwrap_or(default)
    }

    /// Byte at `pos + offset` for a possibly negative offset, or 0 outside the document.
    pub fn char_at_relative(&self, pos: usize, offset: isize) -> u8 {
        match pos.checked_add_signed(offset) {
            Some(p) => self.char_at(p),
            None => 0,
        }
    }

    /// `true` if the bytes at `pos` spell `text`.
    pub fn matches(&self, pos: usize, text: &str) -> bool {
        text.bytes()
            .enumerate()
            .all(|(i, b)| self.safe_char_at(pos + i, b' ') == b)
    }

    /// Text of `start..end`; invalid UTF-8 is replaced.
    pub fn range_text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len);
        let bytes: Vec<u8> = (start..end).map(|pos| self.char_at(pos)).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Style at `pos`, including styles written in this pass but not yet flushed.
    pub fn style_at(&self, pos: usize) -> Style {
        if pos >= self.start_pos && pos < self.start_pos + self.pending.len() {
            self.pending[pos - self.start_pos]
        } else {
            self.doc.style_at(pos)
        }
    }

    /// Line containing `pos`.
    pub fn line_of(&self, pos: usize) -> usize {
        self.doc.line_from_position(pos)
    }

    /// First byte of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.doc.line_start(line)
    }

    /// Position of the terminator of `line`.
    pub fn line_end(&self, line: usize) -> usize {
        self.doc.line_end(line)
    }

    /// Number of lines in the document.
    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    /// Fold level of `line`.
    pub fn level_at(&self, line: usize) -> FoldLevel {
        self.doc.level_at(line)
    }

    /// Set the fold level of `line`.
    pub fn set_level(&mut self, line: usize, level: FoldLevel) {
        if self.doc.level_at(line) != level {
            self.doc.set_level(line, level);
        }
    }

    /// Raw property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.props.get(key)
    }

    /// Integer property value.
    pub fn property_int(&self, key: &str, default: i32) -> i32 {
        self.props.get_int(key, default)
    }

    /// Boolean property value.
    pub fn property_bool(&self, key: &str, default: bool) -> bool {
        self.props.get_bool(key, default)
    }

    /// Begin a styling pass at `pos`, discarding anything not yet flushed.
    pub fn start_at(&mut self, pos: usize) {
        self.flush();
        self.start_pos = pos.min(self.len);
        self.start_seg = self.start_pos;
    }

    /// Start the next style segment at `pos`.
    pub fn start_segment(&mut self, pos: usize) {
        self.start_seg = pos;
    }

    /// Start of the segment the next [`Accessor::colour_to`] will cover.
    pub fn start_segment_pos(&self) -> usize {
        self.start_seg
    }

    /// Style `start_segment..=last` with `style`.
    ///
    /// Ranges ending before the current segment are ignored, so styling stays monotonic.
    pub fn colour_to(&mut self, last: usize, style: Style) {
        if self.len == 0 {
            return;
        }
        let last = last.min(self.len - 1);
        if last < self.start_seg {
            return;
        }
        debug_assert!(style <= self.style_mask, "style {style} exceeds style bits");
        let style = style & self.style_mask;
        let written = self.start_pos + self.pending.len();
        if self.start_seg != written {
            // A gap (start_segment moved forward) is flushed as-is; styles in it are unchanged.
            self.flush();
            self.start_pos = self.start_seg;
        }
        self.pending
            .extend(std::iter::repeat_n(style, last + 1 - self.start_seg));
        self.start_seg = last + 1;
        if self.pending.len() >= BUFFER_SIZE {
            self.flush();
        }
    }

    /// Style `start_segment..pos` (exclusive) with `style`; empty when `pos` is at the segment start.
    pub fn colour_before(&mut self, pos: usize, style: Style) {
        if pos > self.start_seg {
            self.colour_to(pos - 1, style);
        }
    }

    /// Write buffered styles to the document.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.doc.set_styles(self.start_pos, &self.pending);
            self.start_pos += self.pending.len();
            self.pending.clear();
        }
    }

    /// Indentation of `line` in columns (tabs advance to multiples of 8) and whether the line
    /// is blank.
    pub fn indent_amount(&self, line: usize) -> (u16, bool) {
        let end = self.line_end(line);
        let mut pos = self.line_start(line);
        let mut columns: u16 = 0;
        while pos < end {
            match self.char_at(pos) {
                b' ' => columns = columns.saturating_add(1),
                b'\t' => columns = (columns / TAB_WIDTH + 1).saturating_mul(TAB_WIDTH),
                _ => return (columns, false),
            }
            pos += 1;
        }
        (columns, true)
    }
}

impl Drop for Accessor<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
