//! Host document abstraction and a rope-backed implementation.
//!
//! Positions are byte offsets. Lines end at LF, CR, or CRLF.

use crate::Style;
use crate::fold::FoldLevel;
use ropey::Rope;

/// The buffer a lexer reads and annotates.
///
/// Hosts implement this over their own storage; [`TextDocument`] is a ready-made
/// implementation. Reads past the end never panic.
pub trait Document {
    /// Length in bytes.
    fn len(&self) -> usize;

    /// Returns `true` if the document is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `pos`, or `None` past the end.
    fn byte_at(&self, pos: usize) -> Option<u8>;

    /// Number of lines (a trailing line terminator starts one more, empty, line).
    fn line_count(&self) -> usize;

    /// Line containing `pos`; positions past the end map to the last line.
    fn line_from_position(&self, pos: usize) -> usize;

    /// First byte of `line`; lines past the end start at [`Document::len`].
    fn line_start(&self, line: usize) -> usize;

    /// Position of the line terminator of `line` (or the document end for the last line).
    fn line_end(&self, line: usize) -> usize;

    /// Style of the byte at `pos` (0 past the end).
    fn style_at(&self, pos: usize) -> Style;

    /// Overwrite the styles of `styles.len()` bytes starting at `start`.
    ///
    /// Styling is considered valid up to the end of the written range afterwards.
    fn set_styles(&mut self, start: usize, styles: &[Style]);

    /// Fold level of `line` ([`FoldLevel::base`] past the end).
    fn level_at(&self, line: usize) -> FoldLevel;

    /// Set the fold level of `line`, returning the previous one.
    fn set_level(&mut self, line: usize, level: FoldLevel) -> FoldLevel;

    /// Position up to which styles are valid.
    fn end_styled(&self) -> usize;

    /// Mark styles from `pos` onwards as stale.
    fn invalidate_from(&mut self, pos: usize);
}

/// In-memory document: text in a [`Rope`], one style per byte, one level per line.
#[derive(Debug, Clone)]
pub struct TextDocument {
    rope: Rope,
    styles: Vec<Style>,
    levels: Vec<FoldLevel>,
    end_styled: usize,
}

impl TextDocument {
    /// Create an unstyled document.
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let lines = rope.len_lines();
        Self {
            styles: vec![0; rope.len_bytes()],
            levels: vec![FoldLevel::base(); lines],
            rope,
            end_styled: 0,
        }
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// All styles, one per byte.
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// All fold levels, one per line.
    pub fn levels(&self) -> &[FoldLevel] {
        &self.levels
    }

    /// Insert `text` at byte offset `pos` (clamped to the end).
    ///
    /// Inserted bytes get style 0; new lines copy the level of the line they split.
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.len());
        let line = self.line_from_position(pos);
        let lines_before = self.rope.len_lines();

        let char_idx = self.rope.byte_to_char(pos);
        self.rope.insert(char_idx, text);
        self.styles
            .splice(pos..pos, std::iter::repeat_n(0, text.len()));

        let added = self.rope.len_lines().saturating_sub(lines_before);
        let level = self.level_at(line);
        let at = (line + 1).min(self.levels.len());
        self.levels
            .splice(at..at, std::iter::repeat_n(level, added));
        self.fix_line_count();
        self.invalidate_from(pos);
    }

    /// Delete `len` bytes starting at `pos`.
    pub fn delete(&mut self, pos: usize, len: usize) {
        let start = pos.min(self.len());
        let end = pos.saturating_add(len).min(self.len());
        if start >= end {
            return;
        }
        let line = self.line_from_position(start);
        let lines_before = self.rope.len_lines();

        let char_start = self.rope.byte_to_char(start);
        let char_end = self.rope.byte_to_char(end);
        self.rope.remove(char_start..char_end);
        self.styles.drain(start..end);

        let removed = lines_before.saturating_sub(self.rope.len_lines());
        let from = (line + 1).min(self.levels.len());
        let to = (from + removed).min(self.levels.len());
        self.levels.drain(from..to);
        self.fix_line_count();
        if self.is_empty() {
            self.levels = vec![FoldLevel::base()];
        }
        // Keep at least the last byte unstyled so a deletion at the end still refolds the tail.
        self.invalidate_from(start.min(self.len().saturating_sub(1)));
    }

    /// Replace the whole text, dropping all styling.
    pub fn set_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    // A CR/LF pair can be split or joined by an edit at its seam; keep one level per line.
    fn fix_line_count(&mut self) {
        let lines = self.rope.len_lines();
        if self.levels.len() != lines {
            let fill = self.levels.last().copied().unwrap_or_default();
            self.levels.resize(lines, fill);
        }
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document for TextDocument {
    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        (pos < self.len()).then(|| self.rope.byte(pos))
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_from_position(&self, pos: usize) -> usize {
        self.rope.byte_to_line(pos.min(self.len()))
    }

    fn line_start(&self, line: usize) -> usize {
        if line >= self.line_count() {
            self.len()
        } else {
            self.rope.line_to_byte(line)
        }
    }

    fn line_end(&self, line: usize) -> usize {
        if line + 1 >= self.line_count() {
            return self.len();
        }
        let next = self.line_start(line + 1);
        if next >= 2 && self.rope.byte(next - 2) == b'\r' && self.rope.byte(next - 1) == b'\n' {
            next - 2
        } else {
            next - 1
        }
    }

    fn style_at(&self, pos: usize) -> Style {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn set_styles(&mut self, start: usize, styles: &[Style]) {
        let start = start.min(self.styles.len());
        let end = (start + styles.len()).min(self.styles.len());
        self.styles[start..end].copy_from_slice(&styles[..end - start]);
        self.end_styled = end;
    }

    fn level_at(&self, line: usize) -> FoldLevel {
        self.levels.get(line).copied().unwrap_or_default()
    }

    fn set_level(&mut self, line: usize, level: FoldLevel) -> FoldLevel {
        match self.levels.get_mut(line) {
            Some(slot) => std::mem::replace(slot, level),
            None => FoldLevel::base(),
        }
    }

    fn end_styled(&self) -> usize {
        self.end_styled
    }

    fn invalidate_from(&mut self, pos: usize) {
        self.end_styled = self.end_styled.min(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_geometry_mixed_endings() {
        let doc = TextDocument::new("ab\r\ncd\ne\rf");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_start(1), 4);
        assert_eq!(doc.line_end(0), 2);
        assert_eq!(doc.line_end(1), 6);
        assert_eq!(doc.line_end(2), 8);
        assert_eq!(doc.line_end(3), 10);
        assert_eq!(doc.line_start(9), doc.len());
        assert_eq!(doc.line_from_position(5), 1);
        assert_eq!(doc.line_from_position(100), 3);
    }

    #[test]
    fn test_trailing_newline_starts_empty_line() {
        let doc = TextDocument::new("a\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_start(1), 2);
        assert_eq!(doc.line_end(1), 2);
    }

    #[test]
    fn test_out_of_range_reads() {
        let doc = TextDocument::new("x");
        assert_eq!(doc.byte_at(0), Some(b'x'));
        assert_eq!(doc.byte_at(1), None);
        assert_eq!(doc.style_at(7), 0);
        assert_eq!(doc.level_at(7), FoldLevel::base());
    }

    #[test]
    fn test_insert_shifts_styles_and_lines() {
        let mut doc = TextDocument::new("abc\ndef");
        doc.set_styles(0, &[1, 2, 3, 0, 4, 5, 6]);
        doc.set_level(1, FoldLevel::flat(FoldLevel::BASE + 1));
        assert_eq!(doc.end_styled(), 7);

        doc.insert(1, "X\nY");
        assert_eq!(doc.text(), "aX\nYbc\ndef");
        assert_eq!(doc.styles(), &[1, 0, 0, 0, 2, 3, 0, 4, 5, 6]);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.levels().len(), 3);
        assert_eq!(doc.level_at(2), FoldLevel::flat(FoldLevel::BASE + 1));
        assert_eq!(doc.end_styled(), 1);
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut doc = TextDocument::new("ab\ncd\nef");
        doc.set_styles(0, &[1, 1, 0, 2, 2, 0, 3, 3]);
        doc.delete(1, 4);
        assert_eq!(doc.text(), "a\nef");
        assert_eq!(doc.styles(), &[1, 0, 3, 3]);
        assert_eq!(doc.levels().len(), doc.line_count());
        assert_eq!(doc.end_styled(), 1);
    }

    #[test]
    fn test_delete_at_end_leaves_tail_unstyled() {
        let mut doc = TextDocument::new("ab\n}");
        doc.set_styles(0, &[1, 1, 0, 2]);
        doc.delete(3, 1);
        assert_eq!(doc.end_styled(), 2);

        doc.set_level(0, FoldLevel::new(FoldLevel::BASE, FoldLevel::BASE + 1));
        doc.delete(0, 3);
        assert!(doc.is_empty());
        assert_eq!(doc.levels(), &[FoldLevel::base()]);
        assert_eq!(doc.end_styled(), 0);
    }

    #[test]
    fn test_crlf_seam_keeps_level_count() {
        let mut doc = TextDocument::new("a\rb");
        doc.insert(2, "\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.levels().len(), 2);
        doc.delete(1, 1);
        assert_eq!(doc.text(), "a\nb");
        assert_eq!(doc.levels().len(), doc.line_count());
    }
}
