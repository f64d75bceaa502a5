#![warn(missing_docs)]
//! lexstyle core - incremental lexical styling and folding framework
//!
//! # Overview
//!
//! `lexstyle-core` assigns a small integer *style* to every byte of a document and a *fold
//! level* to every line, for any registered language, and re-derives them incrementally after
//! edits. Only the range from a computed restart point to the requested end is re-lexed.
//!
//! The crate does not render anything. The host owns the text and exposes it through the
//! [`Document`] trait (or uses the rope-backed [`TextDocument`]); styles and fold levels are
//! written back into the same document.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  StyleSession (restart, lex, fold, queries) │  ← Host-facing driver
//! ├─────────────────────────────────────────────┤
//! │  LexerRegistry / LexerModule / Lexer        │  ← Language plug-ins
//! ├─────────────────────────────────────────────┤
//! │  StyleContext / LineFolder / WordList       │  ← Lexer toolkit
//! ├─────────────────────────────────────────────┤
//! │  Accessor (buffered style writes)           │  ← Lexer-facing view
//! ├─────────────────────────────────────────────┤
//! │  Document / TextDocument (Rope-based)       │  ← Text, styles, levels
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use lexstyle_core::{
//!     Accessor, Document, LanguageId, Lexer, LexerModule, StyleSession, TextDocument, WordList,
//! };
//!
//! /// Styles every digit as 1, everything else as 0.
//! struct Digits;
//!
//! impl Lexer for Digits {
//!     fn lex(&self, start: usize, length: usize, _init: u8, _kw: &[WordList], styler: &mut Accessor<'_>) {
//!         styler.start_at(start);
//!         styler.start_segment(start);
//!         for pos in start..start + length {
//!             let style = if styler.char_at(pos).is_ascii_digit() { 1 } else { 0 };
//!             styler.colour_to(pos, style);
//!         }
//!         styler.flush();
//!     }
//! }
//!
//! let module = Arc::new(LexerModule::new(LanguageId(1000), "digits", Digits, &[]));
//! let session = StyleSession::new(module);
//! let mut doc = TextDocument::new("a1b22");
//! session.style_all(&mut doc);
//! assert_eq!(doc.style_at(1), 1);
//! assert_eq!(doc.style_at(2), 0);
//! ```

pub mod accessor;
pub mod char_class;
pub mod document;
pub mod fold;
pub mod lexer;
pub mod properties;
pub mod registry;
pub mod restart;
pub mod session;
pub mod style_context;
pub mod word_list;

pub use accessor::Accessor;
pub use char_class::CharacterSet;
pub use document::{Document, TextDocument};
pub use fold::{FoldLevel, FoldRegion, LineFolder};
pub use lexer::{LanguageId, LexState, Lexer, LexerModule, Reach};
pub use properties::PropertySet;
pub use registry::{LexerQuery, LexerRegistry, RegistryError};
pub use session::{StyleSession, StyledRange, StylingGuard};
pub use style_context::StyleContext;
pub use word_list::WordList;

/// Style class of a single byte.
///
/// Each [`LexerModule`] declares how many bits of it are significant; values written through
/// an [`Accessor`] are masked to that width.
pub type Style = u8;
