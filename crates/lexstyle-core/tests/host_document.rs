//! A host-owned buffer implementing `Document` styles exactly like `TextDocument`.

use lexstyle_core::{
    Accessor, Document, FoldLevel, LanguageId, LexState, Lexer, LexerModule, LexerRegistry,
    LineFolder, Reach, Style, StyleContext, StyleSession, TextDocument, WordList, lex_states,
};
use pretty_assertions::assert_eq;

/// LF-only buffer that recomputes line geometry on every query.
#[derive(Default)]
struct VecDocument {
    text: Vec<u8>,
    styles: Vec<Style>,
    levels: Vec<FoldLevel>,
    end_styled: usize,
}

impl VecDocument {
    fn new(text: &str) -> Self {
        let mut doc = Self {
            text: text.as_bytes().to_vec(),
            styles: vec![0; text.len()],
            ..Self::default()
        };
        doc.levels = vec![FoldLevel::base(); doc.line_count()];
        doc
    }

    fn insert(&mut self, pos: usize, text: &str) {
        let line = self.line_from_position(pos);
        self.text.splice(pos..pos, text.bytes());
        self.styles.splice(pos..pos, std::iter::repeat_n(0, text.len()));
        let added = text.bytes().filter(|&b| b == b'\n').count();
        let level = self.level_at(line);
        self.levels
            .splice(line + 1..line + 1, std::iter::repeat_n(level, added));
        self.invalidate_from(pos);
    }
}

impl Document for VecDocument {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.get(pos).copied()
    }

    fn line_count(&self) -> usize {
        self.text.iter().filter(|&&b| b == b'\n').count() + 1
    }

    fn line_from_position(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        self.text[..pos].iter().filter(|&&b| b == b'\n').count()
    }

    fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.text
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(line - 1)
            .map_or(self.len(), |(pos, _)| pos + 1)
    }

    fn line_end(&self, line: usize) -> usize {
        if line + 1 >= self.line_count() {
            self.len()
        } else {
            self.line_start(line + 1) - 1
        }
    }

    fn style_at(&self, pos: usize) -> Style {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn set_styles(&mut self, start: usize, styles: &[Style]) {
        self.styles[start..start + styles.len()].copy_from_slice(styles);
        self.end_styled = start + styles.len();
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

lex_states! {
    enum Toy {
        Default = 0,
        Text = 1,
        Number = 2,
        Keyword = 3,
    }
}

// `"` strings that may span lines, numbers, keywords, and folding on `[` / `]`.
struct ToyLexer;

impl Lexer for ToyLexer {
    fn lex(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        keywords: &[WordList],
        styler: &mut Accessor<'_>,
    ) {
        let mut sc = StyleContext::new(start, length, Toy::from_style(init_style), styler);
        while sc.more() {
            match sc.state() {
                Toy::Text if sc.ch() == b'"' => sc.forward_set_state(Toy::Default),
                Toy::Number if !sc.ch().is_ascii_digit() => sc.set_state(Toy::Default),
                Toy::Keyword if !sc.ch().is_ascii_lowercase() => {
                    if !keywords[0].contains(&sc.current_text(), false) {
                        sc.change_state(Toy::Default);
                    }
                    sc.set_state(Toy::Default);
                }
                _ => {}
            }
            if sc.state() == Toy::Default {
                if sc.ch() == b'"' {
                    sc.set_state(Toy::Text);
                } else if sc.ch().is_ascii_digit() {
                    sc.set_state(Toy::Number);
                } else if sc.ch().is_ascii_lowercase() {
                    sc.set_state(Toy::Keyword);
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
        let mut folder = LineFolder::starting_at(styler, styler.line_of(start));
        for pos in start..end {
            let ch = styler.char_at(pos);
            if styler.style_at(pos) == Toy::Default.style() {
                match ch {
                    b'[' => folder.open(),
                    b']' => folder.close(),
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
        match Toy::from_style(style) {
            Toy::Text => Reach::LongDistance,
            _ => Reach::Short,
        }
    }
}

fn registry() -> LexerRegistry {
    let mut registry = LexerRegistry::new();
    registry
        .register(LexerModule::new(LanguageId(900), "toy", ToyLexer, &["Keywords"]))
        .unwrap();
    registry
}

fn session() -> StyleSession {
    let module = registry().find("toy").unwrap();
    let mut session = StyleSession::new(module);
    session.set_word_list(0, "let in");
    session
}

const TEXT: &str = "let x = [\n  \"two\nlines\" 42\n]\n\nlet y = [ 1 ] in\n";

fn snapshot(doc: &dyn Document) -> (Vec<Style>, Vec<FoldLevel>) {
    let styles = (0..doc.len()).map(|pos| doc.style_at(pos)).collect();
    let levels = (0..doc.line_count()).map(|line| doc.level_at(line)).collect();
    (styles, levels)
}

#[test]
fn test_host_document_matches_text_document() {
    let session = session();
    let mut host = VecDocument::new(TEXT);
    let mut rope = TextDocument::new(TEXT);
    session.style_all(&mut host);
    session.style_all(&mut rope);
    assert_eq!(snapshot(&host), snapshot(&rope));

    let (styles, levels) = snapshot(&host);
    assert_eq!(&styles[..3], &[Toy::Keyword.style(); 3]);
    assert_eq!(styles[TEXT.find('4').unwrap()], Toy::Number.style());
    assert_eq!(levels[0], FoldLevel::new(FoldLevel::BASE, FoldLevel::BASE + 1));
    assert_eq!(levels[3], FoldLevel::new(FoldLevel::BASE + 1, FoldLevel::BASE));
    assert_eq!(levels[4], FoldLevel::flat(FoldLevel::BASE));
}

#[test]
fn test_host_edits_restyle_from_restart_point() {
    let session = session();
    let mut host = VecDocument::new(TEXT);
    session.style_all(&mut host);

    // Line 2 starts inside the string, so styling resumes at line 1.
    let line2 = host.line_start(2);
    assert_eq!(session.restart_point(&host, line2), host.line_start(1));

    host.insert(TEXT.find('2').unwrap(), " ");
    let range = session.style_all(&mut host).unwrap();
    assert_eq!(range.start, host.line_start(1));

    let mut fresh = TextDocument::new(&TEXT.replace("42", "4 2"));
    session.style_all(&mut fresh);
    assert_eq!(snapshot(&host), snapshot(&fresh));
}

#[test]
fn test_lazy_fold_queries_on_host_document() {
    let session = session();
    let mut host = VecDocument::new(TEXT);
    assert_eq!(session.last_child(&mut host, 0), 3);
    assert!(host.end_styled() < host.len());
    assert_eq!(session.fold_parent(&mut host, 2), Some(0));

    let regions = session.fold_regions(&mut host);
    assert_eq!(regions.len(), 1);
    assert_eq!((regions[0].start_line, regions[0].end_line), (0, 3));
}
