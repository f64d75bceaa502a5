#![warn(missing_docs)]
//! `lexstyle-lang` - data-driven language profiles for `lexstyle-core`.
//!
//! A [`LanguageProfile`] names a registered lexer and carries the properties and keyword lists
//! to give it. Profiles are plain YAML, so hosts can ship per-language settings as data:
//!
//! ```yaml
//! python:
//!   lexer: python
//!   properties:
//!     fold.quotes.python: 1
//!   keywords:
//!     - "and as assert def class"
//!     - "self cls"
//! inline-style:
//!   lexer: css
//!   properties:
//!     lexer.css.declarations: 1
//! ```
//!
//! [`LanguageProfile::activate`] resolves the lexer in a
//! [`LexerRegistry`](lexstyle_core::LexerRegistry) and returns a ready
//! [`StyleSession`](lexstyle_core::StyleSession).

mod error;
mod profile;

pub use error::ProfileError;
pub use profile::{LanguageProfile, ProfileSet};
