//! Cascading style sheets.
//!
//! Selectors (tags, classes, ids, pseudo-classes, attributes) are told apart from
//! declarations (property identifiers and values) by remembering the state that preceded the
//! last operator. `/* */` comments are transparent: lexing resumes in the state that was
//! active before the comment.
//!
//! With `lexer.css.declarations=1` the document is a bare declaration list, such as the value
//! of an HTML `style` attribute, and starts out expecting property names.

use lexstyle_core::{
    Accessor, LanguageId, LexState, Lexer, LexerModule, LineFolder, Reach, Style, StyleContext,
    WordList, lex_states,
};
use lexstyle_core::char_class::is_space_char;

use crate::in_list;

lex_states! {
    /// Styles of the CSS lexer.
    pub enum CssStyle {
        Default = 0,
        Tag = 1,
        Class = 2,
        PseudoClass = 3,
        UnknownPseudoClass = 4,
        Operator = 5,
        Identifier = 6,
        UnknownIdentifier = 7,
        Value = 8,
        Comment = 9,
        Id = 10,
        Important = 11,
        Directive = 12,
        DoubleString = 13,
        SingleString = 14,
        Identifier2 = 15,
        Attribute = 16,
        Identifier3 = 17,
        PseudoElement = 18,
        ExtendedIdentifier = 19,
        ExtendedPseudoClass = 20,
        ExtendedPseudoElement = 21,
        GroupRule = 22,
    }
}

/// Keyword-list slots.
pub const WORD_LISTS: &[&str] = &[
    "CSS1 Properties",
    "Pseudo-classes",
    "CSS2 Properties",
    "CSS3 Properties",
    "Pseudo-elements",
    "Browser-Specific CSS Properties",
    "Browser-Specific Pseudo-classes",
    "Browser-Specific Pseudo-elements",
];

const CSS1_PROPS: usize = 0;
const PSEUDO_CLASSES: usize = 1;
const CSS2_PROPS: usize = 2;
const CSS3_PROPS: usize = 3;
const PSEUDO_ELEMENTS: usize = 4;
const EX_PROPS: usize = 5;
const EX_PSEUDO_CLASSES: usize = 6;
const EX_PSEUDO_ELEMENTS: usize = 7;

// Bytes >= 0x80 may be part of a non-ASCII identifier.
fn is_word_char(ch: u8) -> bool {
    ch >= 0x80 || ch.is_ascii_alphanumeric() || ch == b'-' || ch == b'_'
}

fn is_css_operator(ch: u8) -> bool {
    matches!(
        ch,
        b'{' | b'}'
            | b':'
            | b','
            | b';'
            | b'.'
            | b'#'
            | b'!'
            | b'@'
            | b'*'
            | b'>'
            | b'+'
            | b'='
            | b'~'
            | b'|'
            | b'['
            | b']'
            | b'('
            | b')'
    )
}

use CssStyle::*;

fn is_simple_selector(state: Option<CssStyle>) -> bool {
    matches!(
        state,
        Some(Tag | Default | Class | Id | PseudoClass | ExtendedPseudoClass | UnknownPseudoClass)
    )
}

fn is_pseudo(state: CssStyle) -> bool {
    matches!(
        state,
        PseudoClass | PseudoElement | ExtendedPseudoClass | ExtendedPseudoElement | UnknownPseudoClass
    )
}

fn is_identifier(state: CssStyle) -> bool {
    matches!(
        state,
        Identifier | Identifier2 | Identifier3 | ExtendedIdentifier | UnknownIdentifier
    )
}

/// Context carried between iterations of one pass; reset at top-level line starts.
#[derive(Debug, Clone, Copy)]
struct Context {
    last_state: Option<CssStyle>,
    before_comment: Option<CssStyle>,
    before_string: Option<CssStyle>,
    before_value: Option<CssStyle>,
    op: u8,
    op_prev: u8,
    inside_parens: bool,
}

impl Context {
    fn new() -> Self {
        Self {
            last_state: None,
            before_comment: None,
            before_string: None,
            before_value: None,
            op: b' ',
            op_prev: b' ',
            inside_parens: false,
        }
    }
}

struct CssLexer;

impl CssLexer {
    // A comment that started before this pass: find the state it interrupted.
    fn state_before_comment(
        sc: &StyleContext<'_, '_, CssStyle>,
        start: usize,
        cx: &mut Context,
    ) -> CssStyle {
        let styler = sc.styler();
        let mut i = start;
        let mut found = Default;
        while i > 0 {
            let style = CssStyle::from_style(styler.style_at(i - 1));
            if style != Comment {
                found = style;
                if style == Operator {
                    cx.op = styler.char_at(i - 1);
                    cx.op_prev = if i >= 2 { styler.char_at(i - 2) } else { b' ' };
                    loop {
                        i -= 1;
                        if i == 0 {
                            break;
                        }
                        let before = CssStyle::from_style(styler.style_at(i - 1));
                        cx.last_state = Some(before);
                        if before != Operator && before != Comment {
                            break;
                        }
                    }
                    if i == 0 {
                        cx.last_state = Some(Default);
                    }
                }
                break;
            }
            i -= 1;
        }
        if i == 0 { Default } else { found }
    }

    // An operator run that started before this pass: recover the operator and what preceded it.
    fn recover_operator(sc: &StyleContext<'_, '_, CssStyle>, start: usize, cx: &mut Context) {
        let styler = sc.styler();
        let mut i = start;
        cx.op = styler.char_at(i - 1);
        cx.op_prev = if i >= 2 { styler.char_at(i - 2) } else { b' ' };
        loop {
            i -= 1;
            if i == 0 {
                break;
            }
            let before = CssStyle::from_style(styler.style_at(i - 1));
            cx.last_state = Some(before);
            if before != Operator && before != Comment {
                break;
            }
        }
    }

    fn after_operator(sc: &mut StyleContext<'_, '_, CssStyle>, cx: &mut Context) {
        let last = cx.last_state;
        match cx.op {
            b'@' => {
                if last == Some(Default) {
                    sc.set_state(Directive);
                }
            }
            b'>' | b'+' => {
                if matches!(
                    last,
                    Some(Tag | Class | Id | PseudoClass | ExtendedPseudoClass | UnknownPseudoClass)
                ) {
                    sc.set_state(Default);
                }
            }
            b'[' => {
                if is_simple_selector(last) {
                    sc.set_state(Attribute);
                }
            }
            b']' => {
                if last == Some(Attribute) {
                    sc.set_state(Tag);
                }
            }
            b'{' => match last {
                Some(GroupRule) => sc.set_state(Default),
                Some(Tag | Directive) => sc.set_state(Identifier),
                _ => {}
            },
            b'}' => {
                if matches!(
                    last,
                    Some(Default | Value | Important | Identifier | Identifier2 | Identifier3)
                ) {
                    sc.set_state(Default);
                }
            }
            b'(' => match last {
                Some(PseudoClass) => sc.set_state(Tag),
                Some(ExtendedPseudoClass) => sc.set_state(ExtendedPseudoClass),
                _ => {}
            },
            b')' => {
                if is_simple_selector(last)
                    || matches!(last, Some(PseudoElement | ExtendedPseudoElement))
                {
                    sc.set_state(Tag);
                }
            }
            b':' => match last {
                Some(
                    Tag | Default | Class | Id | PseudoClass | ExtendedPseudoClass
                    | UnknownPseudoClass | PseudoElement | ExtendedPseudoElement,
                ) => sc.set_state(PseudoClass),
                Some(state) if is_identifier(state) => {
                    sc.set_state(Value);
                    cx.before_value = Some(state);
                }
                _ => {}
            },
            b'.' => {
                if is_simple_selector(last) {
                    sc.set_state(Class);
                }
            }
            b'#' => {
                if is_simple_selector(last) {
                    sc.set_state(Id);
                }
            }
            b',' | b'|' | b'~' => {
                if last == Some(Tag) {
                    sc.set_state(Default);
                }
            }
            b';' => match last {
                Some(Directive) => sc.set_state(Default),
                Some(state @ (Value | Important)) => {
                    // `url(data:...;base64,...)` keeps the value going.
                    if cx.inside_parens {
                        sc.set_state(state);
                    } else {
                        sc.set_state(Identifier);
                    }
                }
                _ => {}
            },
            b'!' => {
                if last == Some(Value) {
                    sc.set_state(Important);
                }
            }
            _ => {}
        }
    }

    fn classify_word(
        sc: &mut StyleContext<'_, '_, CssStyle>,
        cx: &Context,
        keywords: &[WordList],
    ) {
        let lowered = sc.current_lowered();
        let word = lowered.trim_start_matches(|c: char| !is_word_char(c as u8));
        let state = sc.state();
        if is_identifier(state) {
            let class = if in_list(keywords, CSS1_PROPS, word) {
                Identifier
            } else if in_list(keywords, CSS2_PROPS, word) {
                Identifier2
            } else if in_list(keywords, CSS3_PROPS, word) {
                Identifier3
            } else if in_list(keywords, EX_PROPS, word) {
                ExtendedIdentifier
            } else {
                UnknownIdentifier
            };
            sc.change_state(class);
        } else if is_pseudo(state) {
            let (op, op_prev) = (cx.op, cx.op_prev);
            let class = if op == b':' && op_prev != b':' && in_list(keywords, PSEUDO_CLASSES, word)
            {
                PseudoClass
            } else if op_prev == b':' && in_list(keywords, PSEUDO_ELEMENTS, word) {
                PseudoElement
            } else if (op == b':' || (op == b'(' && cx.last_state == Some(ExtendedPseudoClass)))
                && op_prev != b':'
                && in_list(keywords, EX_PSEUDO_CLASSES, word)
            {
                ExtendedPseudoClass
            } else if op_prev == b':' && in_list(keywords, EX_PSEUDO_ELEMENTS, word) {
                ExtendedPseudoElement
            } else {
                UnknownPseudoClass
            };
            sc.change_state(class);
        } else if state == Important {
            if word != "important" {
                sc.change_state(Value);
            }
        } else if state == Directive
            && cx.op == b'@'
            && matches!(word, "media" | "supports" | "document" | "-moz-document")
        {
            sc.change_state(GroupRule);
        }
    }

    // One iteration of the main loop; returning early skips to the next byte.
    fn step(
        sc: &mut StyleContext<'_, '_, CssStyle>,
        cx: &mut Context,
        start: usize,
        keywords: &[WordList],
    ) {
        if sc.at_line_start() && sc.state() == Default {
            *cx = Context::new();
        }

        if sc.state() == Comment && sc.match_pair(b'*', b'/') {
            let resume = match cx.before_comment {
                Some(state) => state,
                None => {
                    let state = Self::state_before_comment(sc, start, cx);
                    cx.before_comment = Some(state);
                    state
                }
            };
            sc.forward();
            sc.forward_set_state(resume);
        }
        if sc.state() == Comment {
            return;
        }

        if matches!(sc.state(), DoubleString | SingleString) {
            let quote = if sc.state() == DoubleString { b'"' } else { b'\'' };
            if sc.ch() != quote {
                return;
            }
            let pos = sc.current_pos();
            let mut i = pos;
            while i > 0 && sc.styler().char_at(i - 1) == b'\\' {
                i -= 1;
            }
            if (pos - i) % 2 == 1 {
                return;
            }
            sc.forward_set_state(cx.before_string.unwrap_or(Default));
        }

        if sc.state() == Operator {
            if cx.op == b' ' && start > 0 {
                Self::recover_operator(sc, start, cx);
            }
            Self::after_operator(sc, cx);
        }

        if sc.ch() == b'*' && sc.state() == Default {
            sc.set_state(Tag);
            return;
        }

        if sc.ch() == b'(' {
            cx.inside_parens = true;
        } else if sc.ch() == b')' {
            cx.inside_parens = false;
        }

        if is_word_char(sc.ch()) {
            if sc.state() == Default {
                sc.set_state(Tag);
            }
            return;
        }

        let state = sc.state();
        if is_word_char(sc.ch_prev())
            && (is_identifier(state) || is_pseudo(state) || matches!(state, Important | Directive))
        {
            Self::classify_word(sc, cx, keywords);
        }

        let ch = sc.ch();
        let state = sc.state();
        if ch != b'.'
            && ch != b':'
            && ch != b'#'
            && (matches!(state, Class | Id) || (ch != b'(' && ch != b')' && is_pseudo(state)))
        {
            sc.set_state(Tag);
        }

        let state = sc.state();
        if sc.match_pair(b'/', b'*') {
            cx.before_comment = Some(state);
            sc.set_state(Comment);
            sc.forward();
        } else if matches!(state, Value | Attribute) && (ch == b'"' || ch == b'\'') {
            cx.before_string = Some(state);
            sc.set_state(if ch == b'"' { DoubleString } else { SingleString });
        } else if is_css_operator(ch)
            && (state != Attribute || ch == b']')
            && (state != Value || matches!(ch, b';' | b'}' | b'!'))
            && (!matches!(state, Directive | GroupRule) || ch == b';' || ch == b'{')
        {
            if state != Operator {
                cx.last_state = Some(state);
            }
            sc.set_state(Operator);
            cx.op = ch;
            cx.op_prev = sc.ch_prev();
        }
    }
}

impl Lexer for CssLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        let declarations = styler.property_bool("lexer.css.declarations", false);
        let mut init = CssStyle::from_style(init_style);
        if declarations && start == 0 && init == Default {
            init = Identifier;
        }

        let mut sc = StyleContext::new(start, length, init, styler);
        let mut cx = Context::new();
        while sc.more() {
            Self::step(&mut sc, &mut cx, start, keywords);
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
        let fold_comment = styler.property_bool("fold.comment", false);
        let compact = styler.property_bool("fold.compact", true);
        let end = start + length;
        let mut folder = LineFolder::starting_at(styler, styler.line_of(start));
        let mut in_comment = start > 0 && styler.style_at(start - 1) == Comment.style();

        for pos in start..end {
            let ch = styler.char_at(pos);
            let style = CssStyle::from_style(styler.style_at(pos));
            if fold_comment {
                if !in_comment && style == Comment {
                    folder.open();
                } else if in_comment && style != Comment {
                    folder.close();
                }
                in_comment = style == Comment;
            }
            if style == Operator {
                match ch {
                    b'{' => folder.open(),
                    b'}' => folder.close(),
                    _ => {}
                }
            }
            if !is_space_char(ch) {
                folder.visible();
            }
            let at_eol = (ch == b'\r' && styler.char_at(pos + 1) != b'\n') || ch == b'\n';
            if at_eol || pos + 1 == end {
                folder.end_line(styler, compact, false);
                if at_eol && pos + 1 == styler.len() {
                    folder.mark_trailing_line(styler);
                }
            }
        }
    }

    fn reach(&self, style: Style) -> Reach {
        if CssStyle::from_style(style) == Default {
            Reach::Short
        } else {
            Reach::LongDistance
        }
    }
}

/// The `css` module.
pub fn module() -> LexerModule {
    LexerModule::new(LanguageId::CSS, "css", CssLexer, WORD_LISTS)
}
