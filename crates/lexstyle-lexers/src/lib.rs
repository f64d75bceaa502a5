//! `lexstyle-lexers` - language modules for `lexstyle-core`.
//!
//! Each submodule exposes a `module()` constructor returning a [`LexerModule`] plus the
//! state enum naming its styles. [`default_registry`] registers them all under their
//! canonical ids and names:
//!
//! | name        | id  | module                    |
//! |-------------|-----|---------------------------|
//! | `null`      | 1   | [`null`]                  |
//! | `python`    | 2   | [`python`]                |
//! | `cpp`       | 3   | [`cpp`]                   |
//! | `props`     | 9   | [`props`]                 |
//! | `cppnocase` | 35  | [`cpp::nocase_module`]    |
//! | `css`       | 38  | [`css`]                   |

use std::sync::Arc;

use lexstyle_core::{LexerModule, LexerRegistry, StyleSession, WordList};

pub mod cpp;
pub mod css;
pub mod keywords;
pub mod null;
pub mod props;
pub mod python;

/// Every bundled module, freshly constructed.
pub fn all_modules() -> Vec<LexerModule> {
    vec![
        null::module(),
        python::module(),
        cpp::module(),
        props::module(),
        cpp::nocase_module(),
        css::module(),
    ]
}

/// A registry holding every bundled module.
pub fn default_registry() -> LexerRegistry {
    let mut registry = LexerRegistry::new();
    for module in all_modules() {
        if let Err(err) = registry.register(module) {
            tracing::error!(%err, "bundled lexer not registered");
        }
    }
    registry
}

/// Default keyword lists for a bundled module, by module name.
pub fn default_keywords(name: &str) -> &'static [&'static str] {
    match name {
        "css" => keywords::CSS,
        "cpp" | "cppnocase" => keywords::CPP,
        "python" => keywords::PYTHON,
        _ => &[],
    }
}

/// A session for `module` with its default keyword lists loaded.
pub fn session_with_defaults(module: Arc<LexerModule>) -> StyleSession {
    let name = module.name().to_owned();
    let mut session = StyleSession::new(module);
    for (index, list) in default_keywords(&name).iter().enumerate() {
        session.set_word_list(index, list);
    }
    session
}

/// A session for the bundled module called `name`, with default keyword lists loaded.
pub fn default_session(name: &str) -> Option<StyleSession> {
    let module = default_registry().find_by_name(name)?;
    Some(session_with_defaults(module))
}

// Keyword lookup that treats a missing slot as an empty list.
pub(crate) fn in_list(keywords: &[WordList], index: usize, word: &str) -> bool {
    keywords
        .get(index)
        .is_some_and(|list| list.contains(word, false))
}
