//! Where to resume lexing after an edit.
//!
//! Lexing always restarts at a line start. The line start is usable only when the style of the
//! byte before it (the previous line's terminator) is [`Reach::Short`]; otherwise a
//! multi-line construct may be open there, and the search moves back one more line.

use crate::document::Document;
use crate::lexer::{LexerModule, Reach};

/// Earliest position that must be re-lexed to bring styles up to date at `pos`.
///
/// Styles before `pos` must be valid.
pub fn restart_point(doc: &dyn Document, module: &LexerModule, pos: usize) -> usize {
    let lexer = module.lexer();
    let mut line = doc.line_from_position(pos);
    let mut start = doc.line_start(line);
    while start > 0 && lexer.reach(doc.style_at(start - 1)) == Reach::LongDistance {
        line -= 1;
        start = doc.line_start(line);
    }
    start
}

/// First position a folder should re-examine when styles changed from `pos`.
///
/// Folding restarts one line earlier than lexing: a header is decided by the line after it.
pub fn fold_start(doc: &dyn Document, pos: usize) -> usize {
    let line = doc.line_from_position(pos);
    doc.line_start(line.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use crate::lexer::LanguageId;
    use crate::{Accessor, Lexer, Style, WordList};

    struct Nothing;

    impl Lexer for Nothing {
        fn lex(&self, _: usize, _: usize, _: Style, _: &[WordList], _: &mut Accessor<'_>) {}
    }

    #[test]
    fn test_backs_up_over_long_distance_lines() {
        let module = LexerModule::new(LanguageId(1), "t", Nothing, &[]);
        // Lines: "a\n" "bb\n" "cc\n" "d"
        let mut doc = TextDocument::new("a\nbb\ncc\nd");
        // Line 1 ends inside a long-distance construct (style 3), line 0 ends in style 0.
        doc.set_styles(0, &[0, 0, 3, 3, 3, 3, 3, 3, 0]);

        assert_eq!(restart_point(&doc, &module, 8), 2);
        assert_eq!(restart_point(&doc, &module, 6), 2);
        assert_eq!(restart_point(&doc, &module, 3), 2);
        assert_eq!(restart_point(&doc, &module, 1), 0);
        assert_eq!(restart_point(&doc, &module, 0), 0);
    }

    #[test]
    fn test_fold_start_is_previous_line() {
        let doc = TextDocument::new("a\nb\nc");
        assert_eq!(fold_start(&doc, 4), 2);
        assert_eq!(fold_start(&doc, 2), 0);
        assert_eq!(fold_start(&doc, 0), 0);
    }
}
