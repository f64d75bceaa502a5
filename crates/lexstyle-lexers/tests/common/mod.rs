//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use lexstyle_core::{StyleSession, TextDocument};
use lexstyle_lexers::default_session;

/// One representative document per bundled module.
pub const SAMPLES: &[(&str, &str)] = &[
    ("null", "plain\ntext\n\n"),
    (
        "python",
        "import os as o\n@dec.x\nclass A(B):\n    '''doc\n    more'''\n    def f(self, x=0x1F):\n        \
         return f\"{x}\" + 'a\\\nb'\n\n# c\n## block\ny = 1e+5\n",
    ),
    (
        "cpp",
        "#include <a.h>\n/* block\n   comment */\nint f(int x) {\n  // line\n  return \"s\\\"\" + 'c';\n}\n\
         #if A\nint y; /** @param x doc */\n#endif\n#define M(a) \\\n  (a)\n",
    ),
    (
        "props",
        "# comment\n[section]\nkey = value\n  @default\n\n[other]\nk: v\n",
    ),
    (
        "cppnocase",
        "INT Main() {\n  IF (x) { Return 0; }\n}\n/* c */\n",
    ),
    (
        "css",
        "@media print {\n  a.b:hover, #c > d { color: red; /* x */ }\n}\n\
         p[t='v'] { margin: 0 !important; content: \"a}b\" }\n@import url(x.css);\n",
    ),
];

/// Fragments inserted by the random edit tests: quotes, comment delimiters, brackets, newlines.
pub const FRAGMENTS: &[&str] = &[
    "\n", "'", "\"", "'''", "\"\"\"", "/*", "*/", "//", "#", "{", "}", "(", ")", "[", "]", ":",
    ";", "\\", " ", "    ", "x", "if ", "class ", "def ", "0x", "1e+5", "@", "=", "!important",
    "\\\n", "#if\n", "#endif\n", "'\\\n", "\"\\\n",
];

/// Session for a bundled module with its default keyword lists.
pub fn session(name: &str) -> StyleSession {
    default_session(name).unwrap()
}

/// `text` styled and folded from scratch.
pub fn styled(name: &str, text: &str) -> TextDocument {
    let mut doc = TextDocument::new(text);
    session(name).style_all(&mut doc);
    doc
}

/// Assert that `doc` carries exactly the styles and levels a from-scratch pass gives.
pub fn assert_matches_full(name: &str, doc: &TextDocument, context: &str) {
    let text = doc.text();
    let full = styled(name, &text);
    assert_eq!(doc.styles(), full.styles(), "{name}: styles after {context} in {text:?}");
    assert_eq!(doc.levels(), full.levels(), "{name}: levels after {context} in {text:?}");
}
