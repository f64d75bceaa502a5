//! C, C++ and C#-flavoured sources.
//!
//! Handles `\` line continuations everywhere, `#` directives (only as the first visible
//! character of a line), Doxygen/JavaDoc keywords in doc comments, `L`/`u`/`U`/`u8` literal
//! prefixes, C# `@"verbatim"` strings and the `uuid(...)` attribute. The `cppnocase` variant
//! matches keywords case-insensitively.
//!
//! Folding follows braces (and brackets and parentheses), multi-line comments, explicit
//! `//{` / `//}` markers and, optionally, `#if` / `#region` blocks.

use lexstyle_core::char_class::{is_digit, is_eol, is_operator, is_space_char};
use lexstyle_core::{
    Accessor, CharacterSet, LanguageId, LexState, Lexer, LexerModule, LineFolder, Reach, Style,
    StyleContext, WordList, lex_states,
};

use crate::in_list;

lex_states! {
    /// Styles of the C/C++ lexer.
    pub enum CppStyle {
        Default = 0,
        Comment = 1,
        CommentLine = 2,
        CommentDoc = 3,
        Number = 4,
        Word = 5,
        String = 6,
        Character = 7,
        Uuid = 8,
        Preprocessor = 9,
        Operator = 10,
        Identifier = 11,
        StringEol = 12,
        Verbatim = 13,
        CommentLineDoc = 15,
        Word2 = 16,
        CommentDocKeyword = 17,
        CommentDocKeywordError = 18,
        GlobalClass = 19,
        PreprocessorComment = 23,
        PreprocessorCommentDoc = 24,
    }
}

/// Keyword-list slots.
pub const WORD_LISTS: &[&str] = &[
    "Primary keywords and identifiers",
    "Secondary keywords and identifiers",
    "Documentation comment keywords",
    "Global classes and typedefs",
];

const KEYWORDS: usize = 0;
const KEYWORDS2: usize = 1;
const DOC_KEYWORDS: usize = 2;
const GLOBAL_CLASSES: usize = 3;

// Styles that count as whitespace when deciding whether `#` starts a directive.
fn is_space_equiv(style: CppStyle) -> bool {
    matches!(
        style,
        CppStyle::Default
            | CppStyle::Comment
            | CppStyle::CommentLine
            | CppStyle::CommentDoc
            | CppStyle::CommentLineDoc
            | CppStyle::CommentDocKeyword
            | CppStyle::CommentDocKeywordError
    )
}

fn is_stream_comment(style: CppStyle) -> bool {
    matches!(
        style,
        CppStyle::Comment
            | CppStyle::CommentDoc
            | CppStyle::CommentDocKeyword
            | CppStyle::CommentDocKeywordError
    )
}

// `true` if the line before `start` ends with a backslash.
fn previous_line_continues(styler: &Accessor<'_>, start: usize) -> bool {
    let line = styler.line_of(start);
    if line == 0 {
        return false;
    }
    let mut pos = styler.line_end(line - 1);
    if pos == 0 {
        return false;
    }
    pos -= 1;
    styler.char_at(pos) == b'\\'
}

struct CppLexer {
    case_sensitive: bool,
}

impl CppLexer {
    fn captured(&self, sc: &StyleContext<'_, '_, CppStyle>) -> std::string::String {
        if self.case_sensitive {
            sc.current_text()
        } else {
            sc.current_lowered()
        }
    }
}

impl Lexer for CppLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        use CppStyle::*;

        let within_preprocessor = styler.property_bool("styling.within.preprocessor", false);
        let extra = if styler.property_bool("lexer.cpp.allow.dollars", true) {
            "_$"
        } else {
            "_"
        };
        let word_start = CharacterSet::alpha(extra, true);
        let word = CharacterSet::alpha_numeric(extra, true).with(".");
        let doxygen = CharacterSet::alpha("$@\\&<>#{}[]", false);

        let mut continuation_line = previous_line_continues(styler, start);
        let mut visible_chars = 0usize;
        let mut last_word_was_uuid = false;
        let mut style_before_doc_keyword = CommentDoc;
        let mut include_preprocessor = false;
        let mut string_in_preprocessor = false;

        let mut sc = StyleContext::new(start, length, CppStyle::from_style(init_style), styler);
        while sc.more() {
            if sc.at_line_start() {
                let state = sc.state();
                if matches!(state, String | Character) {
                    // Lock in the part before a continuation so StringEol stays on this line.
                    sc.set_state(state);
                }
                if state == Preprocessor && !continuation_line {
                    sc.set_state(Default);
                }
                visible_chars = 0;
                last_word_was_uuid = false;
                include_preprocessor = false;
                string_in_preprocessor = false;
            }

            if sc.ch() == b'\\' && is_eol(sc.ch_next()) {
                sc.forward();
                if sc.ch() == b'\r' && sc.ch_next() == b'\n' {
                    sc.forward();
                }
                continuation_line = true;
                sc.forward();
                continue;
            }

            let ch = sc.ch();
            match sc.state() {
                Operator => sc.set_state(Default),
                Number => {
                    if !word.contains(ch) {
                        sc.set_state(Default);
                    }
                }
                Identifier => {
                    if !word.contains(ch) || ch == b'.' {
                        let text = self.captured(&sc);
                        if in_list(keywords, KEYWORDS, &text) {
                            last_word_was_uuid = text == "uuid";
                            sc.change_state(Word);
                        } else if in_list(keywords, KEYWORDS2, &text) {
                            sc.change_state(Word2);
                        } else if in_list(keywords, GLOBAL_CLASSES, &text) {
                            sc.change_state(GlobalClass);
                        }
                        let literal_string = ch == b'"';
                        if literal_string || ch == b'\'' {
                            let prefix = sc.current_text();
                            let valid = prefix.is_empty()
                                || matches!(prefix.as_str(), "L" | "u" | "U")
                                || (literal_string && prefix == "u8");
                            if valid {
                                sc.change_state(if literal_string { String } else { Character });
                            } else {
                                sc.set_state(Default);
                            }
                        } else {
                            sc.set_state(Default);
                        }
                    }
                }
                Preprocessor => {
                    if within_preprocessor {
                        if is_space_char(ch) || ch == b'(' {
                            sc.set_state(Default);
                        }
                    } else if string_in_preprocessor {
                        if ch == b'>' || ch == b'"' || sc.at_line_end() {
                            string_in_preprocessor = false;
                        }
                    } else if (include_preprocessor && ch == b'<') || ch == b'"' {
                        string_in_preprocessor = true;
                    } else if sc.match_pair(b'/', b'*') {
                        if sc.match_str("/**") || sc.match_str("/*!") {
                            sc.set_state(PreprocessorCommentDoc);
                        } else {
                            sc.set_state(PreprocessorComment);
                        }
                        sc.forward();
                    } else if sc.match_pair(b'/', b'/') {
                        sc.set_state(Default);
                    }
                }
                PreprocessorComment | PreprocessorCommentDoc => {
                    if sc.match_pair(b'*', b'/') {
                        sc.forward();
                        sc.forward_set_state(Preprocessor);
                        // Re-examine the byte after the comment, which may be a continuation.
                        continue;
                    }
                }
                Comment => {
                    if sc.match_pair(b'*', b'/') {
                        sc.forward();
                        sc.forward_set_state(Default);
                    }
                }
                CommentDoc => {
                    if sc.match_pair(b'*', b'/') {
                        sc.forward();
                        sc.forward_set_state(Default);
                    } else if (ch == b'@' || ch == b'\\')
                        && (is_space_char(sc.ch_prev()) || sc.ch_prev() == b'*')
                        && !is_space_char(sc.ch_next())
                    {
                        style_before_doc_keyword = CommentDoc;
                        sc.set_state(CommentDocKeyword);
                    }
                }
                CommentLine => {
                    if sc.at_line_start() && !continuation_line {
                        sc.set_state(Default);
                    }
                }
                CommentLineDoc => {
                    if sc.at_line_start() && !continuation_line {
                        sc.set_state(Default);
                    } else if (ch == b'@' || ch == b'\\')
                        && (is_space_char(sc.ch_prev())
                            || sc.ch_prev() == b'/'
                            || sc.ch_prev() == b'!')
                        && !is_space_char(sc.ch_next())
                    {
                        style_before_doc_keyword = CommentLineDoc;
                        sc.set_state(CommentDocKeyword);
                    }
                }
                CommentDocKeyword => {
                    if style_before_doc_keyword == CommentDoc && sc.match_pair(b'*', b'/') {
                        sc.change_state(CommentDocKeywordError);
                        sc.forward();
                        sc.forward_set_state(Default);
                    } else if !doxygen.contains(ch) {
                        let text = self.captured(&sc);
                        let name = text.get(1..).unwrap_or("");
                        if !is_space_char(ch) || !in_list(keywords, DOC_KEYWORDS, name) {
                            sc.change_state(CommentDocKeywordError);
                        }
                        sc.set_state(style_before_doc_keyword);
                    }
                }
                String => {
                    if sc.at_line_end() {
                        sc.change_state(StringEol);
                    } else if include_preprocessor {
                        if ch == b'>' {
                            sc.forward_set_state(Default);
                            include_preprocessor = false;
                        }
                    } else if ch == b'\\' {
                        if matches!(sc.ch_next(), b'"' | b'\'' | b'\\') {
                            sc.forward();
                        }
                    } else if ch == b'"' {
                        sc.forward_set_state(Default);
                    }
                }
                Character => {
                    if sc.at_line_end() {
                        sc.change_state(StringEol);
                    } else if ch == b'\\' {
                        if matches!(sc.ch_next(), b'"' | b'\'' | b'\\') {
                            sc.forward();
                        }
                    } else if ch == b'\'' {
                        sc.forward_set_state(Default);
                    }
                }
                StringEol => {
                    if sc.at_line_start() {
                        sc.set_state(Default);
                    }
                }
                Verbatim => {
                    if ch == b'"' {
                        if sc.ch_next() == b'"' {
                            sc.forward();
                        } else {
                            sc.forward_set_state(Default);
                        }
                    }
                }
                Uuid => {
                    if ch == b'\r' || ch == b'\n' || ch == b')' {
                        sc.set_state(Default);
                    }
                }
                Default | Word | Word2 | GlobalClass | CommentDocKeywordError => {}
            }

            if sc.state() == Default {
                let ch = sc.ch();
                if sc.match_pair(b'@', b'"') {
                    sc.set_state(Verbatim);
                    sc.forward();
                } else if is_digit(ch) || (ch == b'.' && is_digit(sc.ch_next())) {
                    if last_word_was_uuid {
                        sc.set_state(Uuid);
                        last_word_was_uuid = false;
                    } else {
                        sc.set_state(Number);
                    }
                } else if word_start.contains(ch) || ch == b'@' {
                    if last_word_was_uuid {
                        sc.set_state(Uuid);
                        last_word_was_uuid = false;
                    } else {
                        sc.set_state(Identifier);
                    }
                } else if sc.match_pair(b'/', b'*') {
                    if sc.match_str("/**") || sc.match_str("/*!") {
                        sc.set_state(CommentDoc);
                    } else {
                        sc.set_state(Comment);
                    }
                    // The `*` must not close the comment.
                    sc.forward();
                } else if sc.match_pair(b'/', b'/') {
                    if (sc.match_str("///") && !sc.match_str("////")) || sc.match_str("//!") {
                        sc.set_state(CommentLineDoc);
                    } else {
                        sc.set_state(CommentLine);
                    }
                } else if ch == b'"' {
                    sc.set_state(String);
                    include_preprocessor = false;
                } else if include_preprocessor && ch == b'<' {
                    sc.set_state(String);
                } else if ch == b'\'' {
                    sc.set_state(Character);
                } else if ch == b'#' && visible_chars == 0 {
                    sc.set_state(Preprocessor);
                    loop {
                        sc.forward();
                        if !(matches!(sc.ch(), b' ' | b'\t') && sc.more()) {
                            break;
                        }
                    }
                    if sc.at_line_end() {
                        sc.set_state(Default);
                    } else if sc.match_str("include") {
                        include_preprocessor = true;
                    }
                } else if is_operator(ch) {
                    sc.set_state(Operator);
                }
            }

            if !is_space_char(sc.ch()) && !is_space_equiv(sc.state()) {
                visible_chars += 1;
            }
            continuation_line = false;
            sc.forward();
        }
        sc.complete();
    }

    fn fold(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        _keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        use CppStyle::*;

        let fold_comment = styler.property_bool("fold.comment", false);
        let comment_multiline = styler.property_bool("fold.cpp.comment.multiline", true);
        let comment_explicit = styler.property_bool("fold.cpp.comment.explicit", true);
        let explicit_start = styler
            .property("fold.cpp.explicit.start")
            .unwrap_or_default()
            .to_owned();
        let explicit_end = styler
            .property("fold.cpp.explicit.end")
            .unwrap_or_default()
            .to_owned();
        let explicit_anywhere = styler.property_bool("fold.cpp.explicit.anywhere", false);
        let fold_preprocessor = styler.property_bool("fold.preprocessor", false);
        let syntax_based = styler.property_bool("fold.cpp.syntax.based", true);
        let compact = styler.property_bool("fold.compact", false);
        let at_else = syntax_based && styler.property_bool("fold.at.else", false);
        let user_markers = !explicit_start.is_empty() && !explicit_end.is_empty();

        let end = start + length;
        let mut folder = LineFolder::starting_at(styler, styler.line_of(start));
        let mut style = CppStyle::from_style(init_style);
        let mut style_next = CppStyle::from_style(styler.style_at(start));
        let mut in_line_comment = false;

        for pos in start..end {
            let ch = styler.char_at(pos);
            let ch_next = styler.char_at(pos + 1);
            let style_prev = style;
            style = style_next;
            style_next = CppStyle::from_style(styler.style_at(pos + 1));
            let at_eol = (ch == b'\r' && ch_next != b'\n') || ch == b'\n';

            if matches!(style, CommentLine | CommentLineDoc) {
                in_line_comment = true;
            }
            if fold_comment && comment_multiline && is_stream_comment(style) && !in_line_comment
            {
                if !is_stream_comment(style_prev) {
                    folder.open();
                } else if !is_stream_comment(style_next) && !at_eol {
                    // The byte after a comment may not be styled yet.
                    folder.close();
                }
            }
            if fold_comment && comment_explicit && (style == CommentLine || explicit_anywhere) {
                if user_markers {
                    if styler.matches(pos, &explicit_start) {
                        folder.open();
                    } else if styler.matches(pos, &explicit_end) {
                        folder.close();
                    }
                } else if ch == b'/' && ch_next == b'/' {
                    match styler.char_at(pos + 2) {
                        b'{' => folder.open(),
                        b'}' => folder.close(),
                        _ => {}
                    }
                }
            }
            if fold_preprocessor && style == Preprocessor && ch == b'#' {
                let mut j = pos + 1;
                while j < end && matches!(styler.char_at(j), b' ' | b'\t') {
                    j += 1;
                }
                if styler.matches(j, "region") || styler.matches(j, "if") {
                    folder.open();
                } else if styler.matches(j, "end") {
                    folder.close();
                }
            }
            if syntax_based && style == Operator {
                match ch {
                    b'{' | b'[' | b'(' => folder.open(),
                    b'}' | b']' | b')' => folder.close(),
                    _ => {}
                }
            }
            if !is_space_char(ch) {
                folder.visible();
            }
            if at_eol || pos + 1 == end {
                folder.end_line(styler, compact, at_else);
                in_line_comment = false;
                if at_eol && pos + 1 == styler.len() {
                    folder.mark_trailing_line(styler);
                }
            }
        }
    }

    fn reach(&self, style: Style) -> Reach {
        use CppStyle::*;
        match CppStyle::from_style(style) {
            Default | StringEol | Operator | Identifier | Number | Word | Word2 | GlobalClass
            | Uuid => Reach::Short,
            _ => Reach::LongDistance,
        }
    }
}

/// The case-sensitive `cpp` module.
pub fn module() -> LexerModule {
    LexerModule::new(
        LanguageId::CPP,
        "cpp",
        CppLexer {
            case_sensitive: true,
        },
        WORD_LISTS,
    )
}

/// The `cppnocase` module: keywords are matched against the lower-cased word.
pub fn nocase_module() -> LexerModule {
    LexerModule::new(
        LanguageId::CPP_NOCASE,
        "cppnocase",
        CppLexer {
            case_sensitive: false,
        },
        WORD_LISTS,
    )
}
