//! Python.
//!
//! String literals may carry `r`, `u`, `b` and `f` prefixes (the last three individually
//! switchable). Single-quoted strings end at the line end unless continued with `\`;
//! triple-quoted ones span lines. f-strings get their own styles but their `{}` expressions
//! are not lexed separately. The name following `class` or `def` is styled as a class or
//! function name.
//!
//! Folding is by indentation. Blank and comment lines take the level of the code around them,
//! and with `fold.quotes.python` the body of a triple-quoted string folds under its first line.

use lexstyle_core::char_class::{is_digit, is_eol, is_operator};
use lexstyle_core::{
    Accessor, FoldLevel, LanguageId, LexState, Lexer, LexerModule, Reach, Style, StyleContext,
    WordList, lex_states,
};

use crate::in_list;

lex_states! {
    /// Styles of the Python lexer.
    pub enum PyStyle {
        Default = 0,
        CommentLine = 1,
        Number = 2,
        String = 3,
        Character = 4,
        Word = 5,
        Triple = 6,
        TripleDouble = 7,
        ClassName = 8,
        DefName = 9,
        Operator = 10,
        Identifier = 11,
        CommentBlock = 12,
        StringEol = 13,
        Word2 = 14,
        Decorator = 15,
        FString = 16,
        FCharacter = 17,
        FTriple = 18,
        FTripleDouble = 19,
    }
}

impl PyStyle {
    /// `true` for every kind of string literal.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            PyStyle::String
                | PyStyle::Character
                | PyStyle::Triple
                | PyStyle::TripleDouble
                | PyStyle::FString
                | PyStyle::FCharacter
                | PyStyle::FTriple
                | PyStyle::FTripleDouble
        )
    }

    fn is_triple(self) -> bool {
        matches!(
            self,
            PyStyle::Triple | PyStyle::TripleDouble | PyStyle::FTriple | PyStyle::FTripleDouble
        )
    }
}

/// Keyword-list slots.
pub const WORD_LISTS: &[&str] = &["Keywords", "Highlighted identifiers"];

const KEYWORDS: usize = 0;
const KEYWORDS2: usize = 1;

/// The keyword that decides how the next identifier is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastKeyword {
    Other,
    Class,
    Def,
    Import,
}

/// Which string prefixes are recognised; `r` always is.
#[derive(Debug, Clone, Copy)]
struct Prefixes {
    unicode: bool,
    bytes: bool,
    format: bool,
}

impl Prefixes {
    fn is_type_char(self, ch: u8) -> bool {
        (self.bytes && matches!(ch, b'b' | b'B'))
            || (self.unicode && matches!(ch, b'u' | b'U'))
            || (self.format && matches!(ch, b'f' | b'F'))
    }

    fn is_string_start(self, ch: u8, ch_next: u8, ch_next2: u8) -> bool {
        let quote = |c: u8| c == b'"' || c == b'\'';
        let raw = |c: u8| c == b'r' || c == b'R';
        quote(ch)
            || (self.is_type_char(ch) && (quote(ch_next) || (raw(ch_next) && quote(ch_next2))))
            || (raw(ch) && quote(ch_next))
    }

    // Style of the literal starting at `pos`, and the position just past its opening quotes.
    fn string_state(self, styler: &Accessor<'_>, pos: usize) -> (PyStyle, usize) {
        let mut i = pos;
        let mut ch = styler.char_at(i);
        let first_is_f = matches!(ch, b'f' | b'F');
        if matches!(ch, b'r' | b'R') {
            i += 1;
        } else if self.is_type_char(ch) {
            i += if matches!(styler.char_at(i + 1), b'r' | b'R') { 2 } else { 1 };
        }
        ch = styler.char_at(i);
        if ch != b'"' && ch != b'\'' {
            return (PyStyle::Default, i + 1);
        }
        let triple = styler.char_at(i + 1) == ch && styler.char_at(i + 2) == ch;
        let style = match (ch == b'"', triple, first_is_f) {
            (true, true, false) => PyStyle::TripleDouble,
            (true, true, true) => PyStyle::FTripleDouble,
            (false, true, false) => PyStyle::Triple,
            (false, true, true) => PyStyle::FTriple,
            (true, false, false) => PyStyle::String,
            (true, false, true) => PyStyle::FString,
            (false, false, false) => PyStyle::Character,
            (false, false, true) => PyStyle::FCharacter,
        };
        (style, if triple { i + 3 } else { i + 1 })
    }
}

fn is_word_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'.' || ch == b'_'
}

fn is_word_start(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

struct PythonLexer;

impl PythonLexer {
    fn classify_identifier(
        sc: &mut StyleContext<'_, '_, PyStyle>,
        keywords: &[WordList],
        last: LastKeyword,
        no_sub_identifiers: bool,
    ) -> LastKeyword {
        let text = sc.current_text();
        let style = if last == LastKeyword::Import && text == "as" {
            PyStyle::Word
        } else if in_list(keywords, KEYWORDS, &text) {
            PyStyle::Word
        } else if last == LastKeyword::Class {
            PyStyle::ClassName
        } else if last == LastKeyword::Def {
            PyStyle::DefName
        } else if in_list(keywords, KEYWORDS2, &text) {
            let seg = sc.styler().start_segment_pos();
            let after_dot = seg > 0 && sc.styler().char_at(seg - 1) == b'.';
            if no_sub_identifiers && after_dot {
                PyStyle::Identifier
            } else {
                PyStyle::Word2
            }
        } else {
            PyStyle::Identifier
        };
        sc.change_state(style);
        sc.set_state(PyStyle::Default);

        if style != PyStyle::Word {
            return LastKeyword::Other;
        }
        match text.as_str() {
            "class" => LastKeyword::Class,
            "def" => LastKeyword::Def,
            "import" => LastKeyword::Import,
            _ => LastKeyword::Other,
        }
    }
}

impl Lexer for PythonLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        let binary_literals = styler.property_bool("lexer.python.literals.binary", true);
        let prefixes = Prefixes {
            unicode: styler.property_bool("lexer.python.strings.u", true),
            bytes: styler.property_bool("lexer.python.strings.b", true),
            format: styler.property_bool("lexer.python.strings.f", true),
        };
        let strings_over_newline = styler.property_bool("lexer.python.strings.over.newline", false);
        let no_sub_identifiers =
            styler.property_bool("lexer.python.keywords2.no.sub.identifiers", false);

        let init = match PyStyle::from_style(init_style) {
            PyStyle::StringEol => PyStyle::Default,
            style => style,
        };

        let mut last_keyword = LastKeyword::Other;
        let mut base_n_number = false;
        let mut in_continued_string = false;

        let mut sc = StyleContext::new(start, length, init, styler);
        while sc.more() {
            if sc.at_line_start() {
                last_keyword = LastKeyword::Other;
                let state = sc.state();
                if matches!(
                    state,
                    PyStyle::String | PyStyle::Character | PyStyle::FString | PyStyle::FCharacter
                ) {
                    // Keep the continued part a string so only the final line becomes StringEol.
                    sc.set_state(state);
                }
            }

            if sc.at_line_end()
                && matches!(
                    sc.state(),
                    PyStyle::String | PyStyle::Character | PyStyle::FString | PyStyle::FCharacter
                )
            {
                if in_continued_string || strings_over_newline {
                    in_continued_string = false;
                } else {
                    sc.change_state(PyStyle::StringEol);
                    sc.forward_set_state(PyStyle::Default);
                    continue;
                }
            }

            let ch = sc.ch();
            match sc.state() {
                PyStyle::Operator => {
                    last_keyword = LastKeyword::Other;
                    sc.set_state(PyStyle::Default);
                }
                PyStyle::Number => {
                    let exponent_sign = !base_n_number
                        && (ch == b'+' || ch == b'-')
                        && matches!(sc.ch_prev(), b'e' | b'E');
                    if !is_word_char(ch) && !exponent_sign {
                        sc.set_state(PyStyle::Default);
                    }
                }
                PyStyle::Identifier => {
                    if ch == b'.' || !is_word_char(ch) {
                        last_keyword = Self::classify_identifier(
                            &mut sc,
                            keywords,
                            last_keyword,
                            no_sub_identifiers,
                        );
                    }
                }
                PyStyle::CommentLine | PyStyle::CommentBlock => {
                    if is_eol(ch) {
                        sc.set_state(PyStyle::Default);
                    }
                }
                PyStyle::Decorator => {
                    if !is_word_char(ch) {
                        sc.set_state(PyStyle::Default);
                    }
                }
                state @ (PyStyle::String
                | PyStyle::Character
                | PyStyle::FString
                | PyStyle::FCharacter) => {
                    let quote = if matches!(state, PyStyle::String | PyStyle::FString) {
                        b'"'
                    } else {
                        b'\''
                    };
                    if ch == b'\\' {
                        if sc.ch_next() == b'\r' && sc.relative(2) == b'\n' {
                            sc.forward();
                        }
                        if is_eol(sc.ch_next()) {
                            in_continued_string = true;
                        } else {
                            // The escaped byte never ends the string.
                            sc.forward();
                        }
                    } else if ch == quote {
                        sc.forward_set_state(PyStyle::Default);
                    }
                }
                state @ (PyStyle::Triple
                | PyStyle::TripleDouble
                | PyStyle::FTriple
                | PyStyle::FTripleDouble) => {
                    let delimiter = if matches!(state, PyStyle::Triple | PyStyle::FTriple) {
                        "'''"
                    } else {
                        "\"\"\""
                    };
                    if ch == b'\\' {
                        sc.forward();
                    } else if sc.match_str(delimiter) {
                        sc.forward_n(2);
                        sc.forward_set_state(PyStyle::Default);
                    }
                }
                PyStyle::Default
                | PyStyle::Word
                | PyStyle::ClassName
                | PyStyle::DefName
                | PyStyle::StringEol
                | PyStyle::Word2 => {}
            }

            if sc.state() == PyStyle::Default {
                let ch = sc.ch();
                let ch_next = sc.ch_next();
                if is_digit(ch) || (ch == b'.' && is_digit(ch_next)) {
                    if ch == b'0' && matches!(ch_next, b'x' | b'X') {
                        base_n_number = true;
                        sc.set_state(PyStyle::Number);
                    } else if ch == b'0' && matches!(ch_next, b'o' | b'O' | b'b' | b'B') {
                        if binary_literals {
                            base_n_number = true;
                            sc.set_state(PyStyle::Number);
                        } else {
                            sc.set_state(PyStyle::Number);
                            sc.forward_set_state(PyStyle::Identifier);
                        }
                    } else {
                        base_n_number = false;
                        sc.set_state(PyStyle::Number);
                    }
                } else if is_operator(ch) || ch == b'`' {
                    sc.set_state(PyStyle::Operator);
                } else if ch == b'#' {
                    sc.set_state(if ch_next == b'#' {
                        PyStyle::CommentBlock
                    } else {
                        PyStyle::CommentLine
                    });
                } else if ch == b'@' {
                    sc.set_state(if starts_line(sc.styler(), sc.current_pos()) {
                        PyStyle::Decorator
                    } else {
                        PyStyle::Operator
                    });
                } else if prefixes.is_string_start(ch, ch_next, sc.relative(2)) {
                    let (state, next_index) = prefixes.string_state(sc.styler(), sc.current_pos());
                    sc.set_state(state);
                    while next_index > sc.current_pos() + 1 && sc.more() {
                        sc.forward();
                    }
                } else if is_word_start(ch) {
                    sc.set_state(PyStyle::Identifier);
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
        if length == 0 {
            return;
        }
        let fold_quotes = styler.property_bool("fold.quotes.python", false);
        let compact = styler.property_bool("fold.compact", false);
        let line_count = styler.line_count();
        let end = start + length;
        let last = if end >= styler.len() {
            line_count - 1
        } else {
            styler.line_of(end - 1)
        };

        let lines = LineInfo { styler: &*styler };
        // Blank, comment and string lines take their level from code lines, so start at one.
        let mut first = styler.line_of(start);
        while first > 0 && !lines.is_code(first) {
            first -= 1;
        }

        let quoted = |line: usize| fold_quotes && lines.starts_in_triple(line);
        let mut levels: Vec<(u16, bool)> = Vec::new();
        let mut prev_code: Option<u16> = None;
        let mut line = first;
        while line < line_count {
            if quoted(line) {
                let level = prev_code.unwrap_or(FoldLevel::BASE).saturating_add(1);
                levels.push((level, compact && lines.is_blank(line)));
                line += 1;
                continue;
            }
            if lines.is_skippable(line) {
                let mut next = line;
                while next < line_count && lines.is_skippable(next) && !quoted(next) {
                    next += 1;
                }
                let before = prev_code.unwrap_or(FoldLevel::BASE);
                let after = (next < line_count).then(|| {
                    if quoted(next) {
                        before.saturating_add(1)
                    } else {
                        lines.indent_level(next)
                    }
                });
                let mut skip = after.unwrap_or(before);
                let mut run = Vec::with_capacity(next - line);
                for l in (line..next).rev() {
                    if let Some(after) = after {
                        // A blank or comment line indented into the block above stays with it.
                        if compact && lines.indent_level(l) > after {
                            skip = before.max(after);
                        }
                    }
                    run.push((skip, compact && lines.is_blank(l)));
                }
                levels.extend(run.into_iter().rev());
                line = next;
                continue;
            }
            let level = lines.indent_level(line);
            levels.push((level, false));
            prev_code = Some(level);
            if line > last {
                break;
            }
            line += 1;
        }

        for (i, &(level, white)) in levels.iter().enumerate() {
            let line = first + i;
            let next = match levels.get(i + 1) {
                Some(&(next, _)) => next,
                None if line + 1 == line_count => level,
                None => break,
            };
            styler.set_level(line, FoldLevel::new(level, next).with_white(white));
        }
    }

    fn reach(&self, style: Style) -> Reach {
        if PyStyle::from_style(style).is_string() {
            Reach::LongDistance
        } else {
            Reach::Short
        }
    }
}

// Only blanks precede `pos` on its line.
fn starts_line(styler: &Accessor<'_>, pos: usize) -> bool {
    let line_start = styler.line_start(styler.line_of(pos));
    (line_start..pos).all(|p| matches!(styler.char_at(p), b' ' | b'\t'))
}

// Line classification for the indentation folder.
struct LineInfo<'s, 'a> {
    styler: &'s Accessor<'a>,
}

impl LineInfo<'_, '_> {
    fn indent_level(&self, line: usize) -> u16 {
        FoldLevel::BASE.saturating_add(self.styler.indent_amount(line).0)
    }

    fn is_blank(&self, line: usize) -> bool {
        self.styler.indent_amount(line).1
    }

    fn is_comment(&self, line: usize) -> bool {
        let end = self.styler.line_end(line);
        (self.styler.line_start(line)..end)
            .map(|pos| self.styler.char_at(pos))
            .find(|&ch| ch != b' ' && ch != b'\t')
            == Some(b'#')
    }

    fn is_skippable(&self, line: usize) -> bool {
        self.is_blank(line) || self.is_comment(line)
    }

    fn starts_in_triple(&self, line: usize) -> bool {
        let start = self.styler.line_start(line);
        start < self.styler.len() && PyStyle::from_style(self.styler.style_at(start)).is_triple()
    }

    fn is_code(&self, line: usize) -> bool {
        !self.is_skippable(line) && !self.starts_in_triple(line)
    }
}

/// The `python` module.
pub fn module() -> LexerModule {
    LexerModule::new(LanguageId::PYTHON, "python", PythonLexer, WORD_LISTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_with_defaults;
    use lexstyle_core::{Document, TextDocument};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn styled_with(text: &str, props: &[(&str, &str)]) -> TextDocument {
        let mut session = session_with_defaults(Arc::new(module()));
        for (k, v) in props {
            session.set_property(*k, *v);
        }
        let mut doc = TextDocument::new(text);
        session.style_all(&mut doc);
        doc
    }

    fn styled(text: &str) -> TextDocument {
        styled_with(text, &[])
    }

    fn at(doc: &TextDocument, text: &str, needle: &str) -> PyStyle {
        PyStyle::from_style(doc.style_at(text.find(needle).unwrap()))
    }

    #[test]
    fn test_class_and_def_names() {
        let text = "class Foo(Base):\n    def bar(self):\n        return 0x1F\n";
        let doc = styled(text);
        assert_eq!(at(&doc, text, "class"), PyStyle::Word);
        assert_eq!(at(&doc, text, "Foo"), PyStyle::ClassName);
        assert_eq!(at(&doc, text, "Base"), PyStyle::Identifier);
        assert_eq!(at(&doc, text, "bar"), PyStyle::DefName);
        assert_eq!(at(&doc, text, "self"), PyStyle::Word2);
        assert_eq!(at(&doc, text, "("), PyStyle::Operator);
        assert_eq!(at(&doc, text, "0x1F"), PyStyle::Number);
        assert_eq!(at(&doc, text, "1F"), PyStyle::Number);
    }

    #[test]
    fn test_import_as() {
        let text = "import os as o";
        let doc = styled_with(text, &[]);
        assert_eq!(at(&doc, text, "as"), PyStyle::Word);
        assert_eq!(at(&doc, text, "os"), PyStyle::Identifier);
    }

    #[test]
    fn test_string_prefixes() {
        let text = "a = r'x' + b\"y\" + f'{z}' + u'w' + f\"\"\"doc\"\"\"";
        let doc = styled(text);
        assert_eq!(at(&doc, text, "r'"), PyStyle::Character);
        assert_eq!(at(&doc, text, "b\""), PyStyle::String);
        assert_eq!(at(&doc, text, "f'"), PyStyle::FCharacter);
        assert_eq!(at(&doc, text, "{z}"), PyStyle::FCharacter);
        assert_eq!(at(&doc, text, "u'"), PyStyle::Character);
        assert_eq!(at(&doc, text, "f\"\"\""), PyStyle::FTripleDouble);
        assert_eq!(at(&doc, text, "doc"), PyStyle::FTripleDouble);

        let doc = styled_with(text, &[("lexer.python.strings.b", "0")]);
        assert_eq!(at(&doc, text, "b\""), PyStyle::Identifier);
        assert_eq!(at(&doc, text, "\"y"), PyStyle::String);
    }

    #[test]
    fn test_unterminated_and_continued_strings() {
        let text = "s = 'abc\nx = 1\nt = 'a\\\nb'\n";
        let doc = styled(text);
        let quote = text.find('\'').unwrap();
        for pos in quote..=text.find('\n').unwrap() {
            assert_eq!(PyStyle::from_style(doc.style_at(pos)), PyStyle::StringEol);
        }
        assert_eq!(at(&doc, text, "x"), PyStyle::Identifier);
        assert_eq!(at(&doc, text, "b'"), PyStyle::Character);

        let doc = styled_with("s = 'a\nb'", &[("lexer.python.strings.over.newline", "1")]);
        assert_eq!(PyStyle::from_style(doc.style_at(7)), PyStyle::Character);
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let text = "x = '''a\nb'''\ny = 1\n";
        let doc = styled(text);
        let open = text.find("'''").unwrap();
        let close = text.rfind("'''").unwrap() + 2;
        for pos in open..=close {
            assert_eq!(PyStyle::from_style(doc.style_at(pos)), PyStyle::Triple);
        }
        assert_eq!(at(&doc, text, "y"), PyStyle::Identifier);
    }

    #[test]
    fn test_comments_and_decorators() {
        let text = "@app.route\n## block\n# line\nx";
        let doc = styled(text);
        assert_eq!(at(&doc, text, "route"), PyStyle::Decorator);
        assert_eq!(at(&doc, text, "## block"), PyStyle::CommentBlock);
        assert_eq!(at(&doc, text, "# line"), PyStyle::CommentLine);
        assert_eq!(at(&doc, text, "x"), PyStyle::Identifier);

        let text = "c = a @ b\n    @property\n";
        let doc = styled(text);
        assert_eq!(at(&doc, text, "@ b"), PyStyle::Operator);
        assert_eq!(at(&doc, text, " b"), PyStyle::Default);
        assert_eq!(at(&doc, text, "@property"), PyStyle::Decorator);
        assert_eq!(at(&doc, text, "property"), PyStyle::Decorator);
    }

    #[test]
    fn test_continued_string_left_open_ends_on_last_line() {
        let text = "s = 'a\\\nb\nc = 1\n";
        let doc = styled(text);
        let quote = text.find('\'').unwrap();
        let newline = text.find("\nb").unwrap();
        for pos in quote..=newline {
            assert_eq!(PyStyle::from_style(doc.style_at(pos)), PyStyle::Character);
        }
        assert_eq!(at(&doc, text, "b\n"), PyStyle::StringEol);
        assert_eq!(at(&doc, text, "c ="), PyStyle::Identifier);
    }

    #[test]
    fn test_numbers() {
        let text = "1e+5 0o17";
        let doc = styled(text);
        for pos in 0..4 {
            assert_eq!(PyStyle::from_style(doc.style_at(pos)), PyStyle::Number);
        }
        assert_eq!(at(&doc, text, "o17"), PyStyle::Number);

        let doc = styled_with(text, &[("lexer.python.literals.binary", "0")]);
        assert_eq!(at(&doc, text, "0o"), PyStyle::Number);
        assert_eq!(at(&doc, text, "o17"), PyStyle::Identifier);
    }

    #[test]
    fn test_keywords2_as_sub_identifier() {
        let text = "self.x = obj.self";
        let doc = styled(text);
        assert_eq!(at(&doc, text, "self."), PyStyle::Word2);
        assert_eq!(PyStyle::from_style(doc.style_at(13)), PyStyle::Word2);

        let doc = styled_with(text, &[("lexer.python.keywords2.no.sub.identifiers", "1")]);
        assert_eq!(at(&doc, text, "self."), PyStyle::Word2);
        assert_eq!(PyStyle::from_style(doc.style_at(13)), PyStyle::Identifier);
    }

    const B: u16 = FoldLevel::BASE;

    #[test]
    fn test_indentation_folding() {
        let text = "def f():\n    x = 1\n\n    y = 2\nz = 3\n";
        let doc = styled(text);
        assert_eq!(doc.level_at(0), FoldLevel::new(B, B + 4));
        assert_eq!(doc.level_at(1), FoldLevel::flat(B + 4));
        assert_eq!(doc.level_at(2), FoldLevel::flat(B + 4));
        assert_eq!(doc.level_at(3), FoldLevel::new(B + 4, B));
        assert_eq!(doc.level_at(4), FoldLevel::flat(B));
        assert_eq!(doc.level_at(5), FoldLevel::flat(B));
        assert_eq!(lexstyle_core::fold::last_child(&doc, 0), 3);

        let doc = styled_with(text, &[("fold.compact", "1")]);
        assert_eq!(doc.level_at(2), FoldLevel::flat(B + 4).with_white(true));
        assert_eq!(doc.level_at(5), FoldLevel::flat(B).with_white(true));
    }

    #[test]
    fn test_comment_lines_follow_code() {
        let text = "if a:\n    b\n    # trailing\nc\n";
        let doc = styled(text);
        assert_eq!(doc.level_at(1), FoldLevel::new(B + 4, B));
        assert_eq!(doc.level_at(2), FoldLevel::flat(B));

        let doc = styled_with(text, &[("fold.compact", "1")]);
        assert_eq!(doc.level_at(1), FoldLevel::flat(B + 4));
        assert_eq!(doc.level_at(2), FoldLevel::new(B + 4, B));
    }

    #[test]
    fn test_quote_folding() {
        let text = "x = '''\na\nb'''\ny\n";
        let doc = styled_with(text, &[("fold.quotes.python", "1")]);
        assert_eq!(doc.level_at(0), FoldLevel::new(B, B + 1));
        assert_eq!(doc.level_at(1), FoldLevel::flat(B + 1));
        assert_eq!(doc.level_at(2), FoldLevel::new(B + 1, B));
        assert_eq!(doc.level_at(3), FoldLevel::flat(B));

        let doc = styled(text);
        assert_eq!(doc.level_at(0), FoldLevel::flat(B));
        assert_eq!(doc.level_at(1), FoldLevel::flat(B));
    }
}
