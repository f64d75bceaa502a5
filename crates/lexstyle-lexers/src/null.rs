//! Plain text: every byte is style 0 and nothing folds.

use lexstyle_core::{Accessor, LanguageId, Lexer, LexerModule, Reach, Style, WordList};

struct NullLexer;

impl Lexer for NullLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        _init_style: Style,
        _keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        if length == 0 {
            return;
        }
        styler.start_at(start);
        styler.start_segment(start);
        styler.colour_to(start + length - 1, 0);
        styler.flush();
    }

    fn reach(&self, _style: Style) -> Reach {
        Reach::Short
    }
}

/// The `null` module.
pub fn module() -> LexerModule {
    LexerModule::new(LanguageId::NULL, "null", NullLexer, &[])
}
