//! Host-side styling driver.
//!
//! A [`StyleSession`] binds one language (its module, keyword lists and properties) and keeps
//! a document's styles and fold levels up to date on demand:
//!
//! 1. [`StyleSession::ensure_styled_to`] finds the restart point before the document's
//!    `end_styled` position,
//! 2. lexes from there to the requested position,
//! 3. folds from the line before the restart point.
//!
//! Fold-structure queries style lazily as they walk down the document.

use std::cell::Cell;
use std::sync::Arc;

use crate::accessor::Accessor;
use crate::document::Document;
use crate::fold::{self, FoldRegion};
use crate::lexer::LexerModule;
use crate::properties::PropertySet;
use crate::restart;
use crate::word_list::WordList;

/// A range re-lexed by [`StyleSession::ensure_styled_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRange {
    /// Restart point.
    pub start: usize,
    /// End of the styled range (exclusive).
    pub end: usize,
}

/// Marks a styling pass in progress; dropping it ends the pass.
#[derive(Debug)]
pub struct StylingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> StylingGuard<'a> {
    /// Enter a pass, or `None` if one is already running on `flag`.
    pub fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for StylingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// An activated language: module, keyword lists and properties.
#[derive(Debug)]
pub struct StyleSession {
    module: Arc<LexerModule>,
    word_lists: Vec<WordList>,
    properties: PropertySet,
    performing_style: Cell<bool>,
}

impl StyleSession {
    /// Activate `module` with empty keyword lists and default properties.
    pub fn new(module: Arc<LexerModule>) -> Self {
        let word_lists = vec![WordList::default(); module.word_list_descriptions().len()];
        Self {
            module,
            word_lists,
            properties: PropertySet::new(),
            performing_style: Cell::new(false),
        }
    }

    /// Active language.
    pub fn module(&self) -> &Arc<LexerModule> {
        &self.module
    }

    /// Replace keyword list `index`; returns `true` if its contents changed.
    ///
    /// A change invalidates earlier styling, so callers should follow it with
    /// [`Document::invalidate_from`]`(0)`.
    pub fn set_word_list(&mut self, index: usize, text: &str) -> bool {
        match self.word_lists.get_mut(index) {
            Some(list) => list.set(text),
            None => {
                tracing::warn!(
                    index,
                    lexer = self.module.name(),
                    slots = self.word_lists.len(),
                    "keyword list index out of range"
                );
                false
            }
        }
    }

    /// Keyword lists, positionally matching the module's descriptions.
    pub fn word_lists(&self) -> &[WordList] {
        &self.word_lists
    }

    /// Properties read by the lexer and folder.
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// Mutable properties.
    pub fn properties_mut(&mut self) -> &mut PropertySet {
        &mut self.properties
    }

    /// Set one property; returns `true` if it changed.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.properties.set(key, value)
    }

    /// `true` while a styling pass is running.
    pub fn is_styling(&self) -> bool {
        self.performing_style.get()
    }

    /// Lex `start..end` and fold from the line before `start`.
    ///
    /// The lexer starts in the state of the style just before `start`. A request made while
    /// another pass is running is ignored.
    #[tracing::instrument(level = "trace", skip_all, fields(lexer = self.module.name(), start = start, end = end))]
    pub fn colourise(&self, doc: &mut dyn Document, start: usize, end: usize) {
        let Some(_guard) = StylingGuard::enter(&self.performing_style) else {
            tracing::warn!("re-entrant styling request ignored");
            return;
        };

        let end = end.min(doc.len());
        let start = start.min(end);
        let init_style = if start > 0 { doc.style_at(start - 1) } else { 0 };
        let fold_from = restart::fold_start(doc, start);
        let fold_init = if fold_from > 0 {
            doc.style_at(fold_from - 1)
        } else {
            0
        };
        let folding = self.properties.get_bool("fold", true);

        let lexer = self.module.lexer();
        let mut styler =
            Accessor::new(doc, &self.properties).with_style_bits(self.module.style_bits());
        lexer.lex(start, end - start, init_style, &self.word_lists, &mut styler);
        styler.flush();
        if folding {
            lexer.fold(
                fold_from,
                end - fold_from,
                fold_init,
                &self.word_lists,
                &mut styler,
            );
            styler.flush();
        }
    }

    /// Earliest position that must be re-lexed to make styles valid at `pos`.
    pub fn restart_point(&self, doc: &dyn Document, pos: usize) -> usize {
        restart::restart_point(doc, &self.module, pos)
    }

    /// Bring styles and fold levels up to date through `pos`.
    ///
    /// Returns the re-lexed range, or `None` if nothing needed styling.
    pub fn ensure_styled_to(&self, doc: &mut dyn Document, pos: usize) -> Option<StyledRange> {
        if self.is_styling() {
            return None;
        }
        let pos = pos.min(doc.len());
        let end_styled = doc.end_styled();
        if pos <= end_styled {
            return None;
        }
        let start = self.restart_point(doc, end_styled);
        tracing::debug!(
            lexer = self.module.name(),
            end_styled,
            start,
            end = pos,
            "styling range"
        );
        self.colourise(doc, start, pos);
        Some(StyledRange { start, end: pos })
    }

    /// Style and fold the whole document.
    pub fn style_all(&self, doc: &mut dyn Document) -> Option<StyledRange> {
        let len = doc.len();
        self.ensure_styled_to(doc, len)
    }

    /// Last line of the fold region headed by `line`, styling lines as they are reached.
    pub fn last_child(&self, doc: &mut dyn Document, line: usize) -> usize {
        let line_count = doc.line_count();
        fold::scan_last_child(line, line_count, |l| {
            let through = doc.line_start(l + 1);
            self.ensure_styled_to(doc, through);
            doc.level_at(l)
        })
    }

    /// Nearest enclosing header of `line`, styling through `line` first.
    pub fn fold_parent(&self, doc: &mut dyn Document, line: usize) -> Option<usize> {
        let through = doc.line_start(line + 1);
        self.ensure_styled_to(doc, through);
        fold::fold_parent(doc, line)
    }

    /// All fold regions, styling the whole document first.
    pub fn fold_regions(&self, doc: &mut dyn Document) -> Vec<FoldRegion> {
        self.style_all(doc);
        fold::fold_regions(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use crate::fold::FoldLevel;
    use crate::lexer::{LanguageId, LexState, Lexer, Reach};
    use crate::{Style, StyleContext};

    crate::lex_states! {
        enum Brace {
            Default = 0,
            Comment = 1,
            Word = 2,
        }
    }

    // "(* ... *)" block comments, words, and `{`/`}` folding.
    struct BraceLexer;

    impl Lexer for BraceLexer {
        fn lex(
            &self,
            start: usize,
            length: usize,
            init_style: Style,
            keywords: &[WordList],
            styler: &mut Accessor<'_>,
        ) {
            let mut sc = StyleContext::new(start, length, Brace::from_style(init_style), styler);
            while sc.more() {
                match sc.state() {
                    Brace::Comment if sc.match_pair(b'*', b')') => {
                        sc.forward();
                        sc.forward_set_state(Brace::Default);
                    }
                    Brace::Word if !sc.ch().is_ascii_alphabetic() => {
                        if !keywords[0].contains(&sc.current_text(), false) {
                            sc.change_state(Brace::Default);
                        }
                        sc.set_state(Brace::Default);
                    }
                    _ => {}
                }
                if sc.state() == Brace::Default {
                    if sc.match_pair(b'(', b'*') {
                        sc.set_state(Brace::Comment);
                        sc.forward();
                    } else if sc.ch().is_ascii_alphabetic() {
                        sc.set_state(Brace::Word);
                    }
                }
                sc.forward();
            }
            sc.complete();
        }

        fn fold(
            &self,
            start: usize,
            length: usize,
            _init_style: Style,
            _keywords: &[WordList],
            styler: &mut Accessor<'_>,
        ) {
            let end = start + length;
            let mut folder = fold::LineFolder::starting_at(styler, styler.line_of(start));
            for pos in start..end {
                let ch = styler.char_at(pos);
                if styler.style_at(pos) == Brace::Default.style() {
                    match ch {
                        b'{' => folder.open(),
                        b'}' => folder.close(),
                        _ => {}
                    }
                }
                if ch == b'\n' || pos + 1 == end {
                    folder.end_line(styler, false, false);
                    if ch == b'\n' && pos + 1 == styler.len() {
                        folder.mark_trailing_line(styler);
                    }
                }
            }
        }

        fn reach(&self, style: Style) -> Reach {
            match Brace::from_style(style) {
                Brace::Comment => Reach::LongDistance,
                _ => Reach::Short,
            }
        }
    }

    fn session() -> StyleSession {
        let module = LexerModule::new(LanguageId(500), "brace", BraceLexer, &["Keywords"]);
        let mut session = StyleSession::new(Arc::new(module));
        assert!(session.set_word_list(0, "fn let"));
        session
    }

    #[test]
    fn test_guard_blocks_nested_pass() {
        let flag = Cell::new(false);
        let outer = StylingGuard::enter(&flag);
        assert!(outer.is_some());
        assert!(StylingGuard::enter(&flag).is_none());
        drop(outer);
        assert!(StylingGuard::enter(&flag).is_some());
    }

    #[test]
    fn test_style_all_then_nothing_to_do() {
        let session = session();
        let mut doc = TextDocument::new("fn x {\n  let y\n}\n");
        let range = session.style_all(&mut doc);
        assert_eq!(range, Some(StyledRange { start: 0, end: 17 }));
        assert_eq!(&doc.styles()[..3], &[2, 2, 0]);
        assert_eq!(doc.style_at(3), 0);
        assert_eq!(session.style_all(&mut doc), None);
        assert!(!session.is_styling());

        let base = FoldLevel::BASE;
        assert_eq!(doc.level_at(0), FoldLevel::new(base, base + 1));
        assert_eq!(doc.level_at(1), FoldLevel::flat(base + 1));
        assert_eq!(doc.level_at(2), FoldLevel::new(base + 1, base));
        assert_eq!(doc.level_at(3), FoldLevel::flat(base).with_white(true));
    }

    #[test]
    fn test_restart_backs_over_open_comment() {
        let session = session();
        let mut doc = TextDocument::new("a\n(* one\ntwo\nthree *)\nfn\n");
        session.style_all(&mut doc);
        assert_eq!(doc.style_at(2), 1);
        assert_eq!(doc.style_at(10), 1);

        // Edit inside line 3 ("three *)"): lines 1 and 2 end inside the comment.
        let line3 = doc.line_start(3);
        doc.insert(line3, "x");
        let range = session.style_all(&mut doc).unwrap();
        assert_eq!(range.start, doc.line_start(1));
        assert_eq!(doc.style_at(line3), 1);
    }

    #[test]
    fn test_restart_at_line_start_for_short_state() {
        let session = session();
        let mut doc = TextDocument::new("fn\nlet\nx\n");
        session.style_all(&mut doc);
        doc.insert(7, "fn ");
        let range = session.style_all(&mut doc).unwrap();
        assert_eq!(range.start, 7);
        assert_eq!(&doc.styles()[7..10], &[2, 2, 0]);
    }

    #[test]
    fn test_fold_queries_style_lazily() {
        let session = session();
        let mut doc = TextDocument::new("a {\n b {\n  c\n }\n}\nd\n");
        assert_eq!(session.last_child(&mut doc, 0), 4);
        assert_eq!(session.last_child(&mut doc, 1), 3);
        assert_eq!(session.fold_parent(&mut doc, 2), Some(1));
        assert_eq!(
            session.fold_regions(&mut doc),
            vec![FoldRegion::new(0, 4), FoldRegion::new(1, 3)]
        );
    }

    #[test]
    fn test_fold_property_disables_folding() {
        let mut session = session();
        session.set_property("fold", "0");
        let mut doc = TextDocument::new("a {\n}\n");
        session.style_all(&mut doc);
        assert_eq!(doc.level_at(0), FoldLevel::base());
    }

    #[test]
    fn test_word_list_slot_out_of_range() {
        let mut session = session();
        assert!(!session.set_word_list(3, "x"));
        assert!(!session.set_word_list(0, "let fn"));
        assert_eq!(session.word_lists().len(), 1);
    }
}
