//! Fold levels and fold-structure queries
//!
//! Every line carries a [`FoldLevel`]: the nesting level the line starts at, the level the
//! following line starts at, and a *white* flag for blank lines. A line whose `next` level is
//! deeper than its own is a fold header; the lines below it that are nested deeper are its
//! fold region.

use crate::accessor::Accessor;
use crate::document::Document;

/// Fold information for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldLevel {
    level: u16,
    next: u16,
    white: bool,
}

impl FoldLevel {
    /// Level of top-level text.
    pub const BASE: u16 = 0x400;
    /// Largest representable level.
    pub const NUMBER_MASK: u16 = 0x0FFF;
    /// Packed flag for blank lines.
    pub const WHITE_FLAG: u32 = 0x1000;
    /// Packed flag for fold headers.
    pub const HEADER_FLAG: u32 = 0x2000;

    /// Create a level pair; both numbers are clamped to `[BASE, NUMBER_MASK]`.
    pub fn new(level: u16, next: u16) -> Self {
        Self {
            level: clamp_level(level),
            next: clamp_level(next),
            white: false,
        }
    }

    /// Top-level line that opens nothing.
    pub const fn base() -> Self {
        Self {
            level: Self::BASE,
            next: Self::BASE,
            white: false,
        }
    }

    /// A line that neither opens nor closes anything.
    pub fn flat(level: u16) -> Self {
        Self::new(level, level)
    }

    /// Set or clear the white (blank line) flag.
    pub fn with_white(mut self, white: bool) -> Self {
        self.white = white;
        self
    }

    /// Level this line starts at.
    pub fn level(self) -> u16 {
        self.level
    }

    /// Level the following line starts at.
    pub fn next(self) -> u16 {
        self.next
    }

    /// Nesting depth relative to [`FoldLevel::BASE`].
    pub fn depth(self) -> u16 {
        self.level - Self::BASE
    }

    /// `true` when this line opens a fold region.
    pub fn is_header(self) -> bool {
        self.next > self.level
    }

    /// `true` when the line has no visible characters.
    pub fn is_white(self) -> bool {
        self.white
    }

    /// Packed form: level and flags in the low 16 bits, next level in the high 16 bits.
    pub fn to_bits(self) -> u32 {
        let mut bits = u32::from(self.level) | (u32::from(self.next) << 16);
        if self.white {
            bits |= Self::WHITE_FLAG;
        }
        if self.is_header() {
            bits |= Self::HEADER_FLAG;
        }
        bits
    }

    /// Unpack a value produced by [`FoldLevel::to_bits`].
    ///
    /// The header flag is recomputed from the two levels. A zero high half means "no next
    /// level recorded" and is read as equal to the level.
    pub fn from_bits(bits: u32) -> Self {
        let level = (bits & u32::from(Self::NUMBER_MASK)) as u16;
        let next = ((bits >> 16) & u32::from(Self::NUMBER_MASK)) as u16;
        let next = if next == 0 { level } else { next };
        Self::new(level, next).with_white(bits & Self::WHITE_FLAG != 0)
    }
}

impl Default for FoldLevel {
    fn default() -> Self {
        Self::base()
    }
}

fn clamp_level(level: u16) -> u16 {
    level.clamp(FoldLevel::BASE, FoldLevel::NUMBER_MASK)
}

/// An inclusive range of lines governed by a fold header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldRegion {
    /// Header line.
    pub start_line: usize,
    /// Last line of the region (inclusive).
    pub end_line: usize,
}

impl FoldRegion {
    /// Create a region for an inclusive line range.
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Number of lines hidden when the region is collapsed.
    pub fn hidden_lines(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// Per-line accumulator shared by brace-style folders.
///
/// A folder walks the bytes of a line, calling [`open`](Self::open) and
/// [`close`](Self::close) for each opener/closer and [`visible`](Self::visible) for each
/// non-blank byte, then calls [`end_line`](Self::end_line) at the line terminator.
#[derive(Debug, Clone)]
pub struct LineFolder {
    line: usize,
    level_current: u16,
    level_min: u16,
    level_next: u16,
    visible_chars: usize,
}

impl LineFolder {
    /// Start folding at `line`, seeding from the `next` level of the line before it.
    pub fn starting_at(styler: &Accessor<'_>, line: usize) -> Self {
        let level = if line > 0 {
            styler.level_at(line - 1).next()
        } else {
            FoldLevel::BASE
        };
        Self {
            line,
            level_current: level,
            level_min: level,
            level_next: level,
            visible_chars: 0,
        }
    }

    /// Line currently being folded.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Level the next line will start at, given what has been seen so far.
    pub fn level_next(&self) -> u16 {
        self.level_next
    }

    /// Record an opener.
    pub fn open(&mut self) {
        self.level_min = self.level_min.min(self.level_next);
        self.level_next = (self.level_next + 1).min(FoldLevel::NUMBER_MASK);
    }

    /// Record a closer; never drops below [`FoldLevel::BASE`].
    pub fn close(&mut self) {
        self.level_next = self.level_next.saturating_sub(1).max(FoldLevel::BASE);
    }

    /// Record a visible (non-blank) byte on the current line.
    pub fn visible(&mut self) {
        self.visible_chars += 1;
    }

    /// `true` if no visible byte has been recorded on the current line.
    pub fn line_is_blank(&self) -> bool {
        self.visible_chars == 0
    }

    /// Write the current line's level and move to the next line.
    ///
    /// With `at_else`, the line is reported at the lowest level it reached before an opener,
    /// so `} else {` becomes a header of its own.
    pub fn end_line(&mut self, styler: &mut Accessor<'_>, compact: bool, at_else: bool) {
        let level_use = if at_else {
            self.level_min
        } else {
            self.level_current
        };
        let level = FoldLevel::new(level_use, self.level_next)
            .with_white(compact && self.visible_chars == 0);
        styler.set_level(self.line, level);
        self.line += 1;
        self.level_current = self.level_next;
        self.level_min = self.level_current;
        self.visible_chars = 0;
    }

    /// Give the empty line after a final line terminator the current level.
    pub fn mark_trailing_line(&self, styler: &mut Accessor<'_>) {
        styler.set_level(
            self.line,
            FoldLevel::flat(self.level_current).with_white(true),
        );
    }
}

/// `true` if a line at `candidate` belongs inside a region opened at `level`.
fn is_subordinate(level: u16, candidate: FoldLevel) -> bool {
    candidate.is_white() || level < candidate.level()
}

/// Last line of the fold region headed by `line`, reading levels through `level_of`.
///
/// `level_of` is called with increasing line numbers; callers that style lazily make sure
/// the line is folded before returning its level.
pub(crate) fn scan_last_child(
    line: usize,
    line_count: usize,
    mut level_of: impl FnMut(usize) -> FoldLevel,
) -> usize {
    let level = level_of(line).level();
    let mut last = line;
    while last + 1 < line_count {
        if !is_subordinate(level, level_of(last + 1)) {
            break;
        }
        last += 1;
    }
    if last > line && level > level_of(last + 1).level() {
        // Trailing blank lines belong to the parent.
        if level_of(last).is_white() {
            last -= 1;
        }
    }
    last
}

/// Last line of the fold region headed by `line`, assuming the document is folded.
pub fn last_child(doc: &dyn Document, line: usize) -> usize {
    scan_last_child(line, doc.line_count(), |l| doc.level_at(l))
}

/// Nearest header above `line` whose level is lower than the line's own.
pub fn fold_parent(doc: &dyn Document, line: usize) -> Option<usize> {
    let level = doc.level_at(line).level();
    (0..line).rev().find(|&candidate| {
        let candidate_level = doc.level_at(candidate);
        candidate_level.is_header() && candidate_level.level() < level
    })
}

/// All fold regions of a folded document, ordered by header line.
pub fn fold_regions(doc: &dyn Document) -> Vec<FoldRegion> {
    (0..doc.line_count())
        .filter(|&line| doc.level_at(line).is_header())
        .filter_map(|line| {
            let end = last_child(doc, line);
            (end > line).then(|| FoldRegion::new(line, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    const B: u16 = FoldLevel::BASE;

    #[test]
    fn test_header_is_derived() {
        assert!(FoldLevel::new(B, B + 1).is_header());
        assert!(!FoldLevel::new(B + 1, B).is_header());
        assert!(!FoldLevel::flat(B + 2).is_header());
    }

    #[test]
    fn test_levels_are_clamped() {
        let level = FoldLevel::new(0, 3);
        assert_eq!(level.level(), B);
        assert_eq!(level.next(), B);
        assert_eq!(FoldLevel::new(B, u16::MAX).next(), FoldLevel::NUMBER_MASK);
    }

    #[test]
    fn test_bits_layout() {
        let level = FoldLevel::new(B, B + 1).with_white(true);
        let bits = level.to_bits();
        assert_eq!(bits & 0xFFF, u32::from(B));
        assert_ne!(bits & FoldLevel::HEADER_FLAG, 0);
        assert_ne!(bits & FoldLevel::WHITE_FLAG, 0);
        assert_eq!(bits >> 16, u32::from(B + 1));
        assert_eq!(FoldLevel::from_bits(bits), level);
        assert_eq!(FoldLevel::from_bits(u32::from(B + 2)), FoldLevel::flat(B + 2));
    }

    fn folded(levels: &[(u16, u16, bool)]) -> TextDocument {
        let text = "x\n".repeat(levels.len() - 1) + "x";
        let mut doc = TextDocument::new(&text);
        for (line, &(level, next, white)) in levels.iter().enumerate() {
            doc.set_level(line, FoldLevel::new(level, next).with_white(white));
        }
        doc
    }

    #[test]
    fn test_last_child_and_parent() {
        // 0: fn {      1: body    2: inner {   3: x   4: }   5: }   6: tail
        let doc = folded(&[
            (B, B + 1, false),
            (B + 1, B + 1, false),
            (B + 1, B + 2, false),
            (B + 2, B + 2, false),
            (B + 2, B + 1, false),
            (B + 1, B, false),
            (B, B, false),
        ]);
        assert_eq!(last_child(&doc, 0), 5);
        assert_eq!(last_child(&doc, 2), 4);
        assert_eq!(fold_parent(&doc, 3), Some(2));
        assert_eq!(fold_parent(&doc, 1), Some(0));
        assert_eq!(fold_parent(&doc, 0), None);
        assert_eq!(fold_parent(&doc, 6), None);
        assert_eq!(
            fold_regions(&doc),
            vec![FoldRegion::new(0, 5), FoldRegion::new(2, 4)]
        );
    }

    #[test]
    fn test_trailing_white_lines_go_to_parent() {
        // 0: outer {   1: inner {   2: body   3: (blank)   4: top-level
        let doc = folded(&[
            (B, B + 1, false),
            (B + 1, B + 2, false),
            (B + 2, B, false),
            (B, B, true),
            (B, B, false),
        ]);
        assert_eq!(last_child(&doc, 1), 2);
        assert_eq!(last_child(&doc, 0), 3);
    }

    #[test]
    fn test_line_folder_at_else() {
        let mut doc = TextDocument::new("a {\n} else {\n}\n");
        let props = crate::PropertySet::new();
        let mut styler = Accessor::new(&mut doc, &props);
        let mut folder = LineFolder::starting_at(&styler, 0);
        folder.open();
        folder.end_line(&mut styler, false, true);
        folder.close();
        folder.open();
        folder.end_line(&mut styler, false, true);
        folder.close();
        folder.end_line(&mut styler, false, true);
        folder.mark_trailing_line(&mut styler);
        drop(styler);

        assert_eq!(doc.level_at(0), FoldLevel::new(B, B + 1));
        assert_eq!(doc.level_at(1), FoldLevel::new(B, B + 1));
        assert_eq!(doc.level_at(2), FoldLevel::new(B + 1, B));
        assert_eq!(doc.level_at(3), FoldLevel::flat(B).with_white(true));
    }
}
