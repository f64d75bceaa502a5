//! Properties / INI files.
//!
//! Line oriented: each line is a comment (`#`, `!`, `;`), a section header (`[name]`), a
//! default value (`@`), or `key = value` / `key: value`. Section headers fold everything up
//! to the next section.

use lexstyle_core::char_class::is_space_char;
use lexstyle_core::{
    Accessor, FoldLevel, LanguageId, LexState, Lexer, LexerModule, Reach, Style, WordList,
    lex_states,
};

lex_states! {
    /// Styles of the properties lexer.
    pub enum PropsStyle {
        /// Values and unrecognised text.
        Default = 0,
        /// Comment line.
        Comment = 1,
        /// `[section]` line.
        Section = 2,
        /// `=` or `:`.
        Assignment = 3,
        /// `@` default-value marker.
        DefVal = 4,
        /// Key before the assignment.
        Key = 5,
    }
}

fn is_assign_char(ch: u8) -> bool {
    ch == b'=' || ch == b':'
}

struct PropsLexer;

impl PropsLexer {
    // Style `line_start..=end` (one line, terminator included).
    fn colourise_line(styler: &mut Accessor<'_>, line_start: usize, end: usize, allow_spaces: bool) {
        let mut i = line_start;
        if allow_spaces {
            while i <= end && is_space_char(styler.char_at(i)) {
                i += 1;
            }
        } else if is_space_char(styler.char_at(i)) {
            i = end + 1;
        }

        if i > end {
            styler.colour_to(end, PropsStyle::Default.style());
            return;
        }
        match styler.char_at(i) {
            b'#' | b'!' | b';' => styler.colour_to(end, PropsStyle::Comment.style()),
            b'[' => styler.colour_to(end, PropsStyle::Section.style()),
            b'@' => {
                styler.colour_to(i, PropsStyle::DefVal.style());
                styler.colour_to(end, PropsStyle::Default.style());
            }
            _ => {
                while i <= end && !is_assign_char(styler.char_at(i)) {
                    i += 1;
                }
                if i <= end {
                    styler.colour_before(i, PropsStyle::Key.style());
                    styler.colour_to(i, PropsStyle::Assignment.style());
                }
                styler.colour_to(end, PropsStyle::Default.style());
            }
        }
    }
}

impl Lexer for PropsLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        _init_style: Style,
        _keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        let end = start + length;
        if length == 0 {
            return;
        }
        let allow_spaces = styler.property_bool("lexer.props.allow.initial.spaces", true);
        styler.start_at(start);
        styler.start_segment(start);

        let mut line = styler.line_of(start);
        let mut seg_start = start;
        while seg_start < end {
            let next_line_start = styler.line_start(line + 1);
            let seg_end = next_line_start.min(end);
            Self::colourise_line(styler, seg_start, seg_end - 1, allow_spaces);
            seg_start = seg_end;
            line += 1;
        }
        styler.flush();
    }

    fn fold(
        &self,
        start: usize,
        length: usize,
        _init_style: Style,
        _keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        let compact = styler.property_bool("fold.compact", true);
        let end = start + length;
        let mut line = styler.line_of(start);
        let mut visible = 0;
        let mut header = false;

        for pos in start..end {
            let ch = styler.char_at(pos);
            if styler.style_at(pos) == PropsStyle::Section.style() {
                header = true;
            }
            if !is_space_char(ch) {
                visible += 1;
            }
            let at_eol = (ch == b'\r' && styler.char_at(pos + 1) != b'\n') || ch == b'\n';
            if at_eol || pos + 1 == end {
                let level = if header {
                    FoldLevel::new(FoldLevel::BASE, FoldLevel::BASE + 1)
                } else {
                    let inherited = if line > 0 {
                        styler.level_at(line - 1).next()
                    } else {
                        FoldLevel::BASE
                    };
                    FoldLevel::flat(inherited)
                };
                styler.set_level(line, level.with_white(compact && visible == 0));
                line += 1;
                visible = 0;
                header = false;
                if at_eol && pos + 1 == styler.len() {
                    let trailing = FoldLevel::flat(styler.level_at(line - 1).next());
                    styler.set_level(line, trailing.with_white(compact));
                }
            }
        }
    }

    fn reach(&self, _style: Style) -> Reach {
        Reach::Short
    }
}

/// The `props` module.
pub fn module() -> LexerModule {
    LexerModule::new(LanguageId::PROPERTIES, "props", PropsLexer, &[])
}
