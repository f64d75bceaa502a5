//! The lexer plug-in interface.
//!
//! A language is a [`Lexer`] implementation (tokenize + fold + restart classification) wrapped
//! in a [`LexerModule`] that carries its identity and the descriptions of its keyword lists.

use std::fmt;

use crate::Style;
use crate::accessor::Accessor;
use crate::word_list::WordList;

/// Numeric language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(pub u32);

impl LanguageId {
    /// Plain text: every byte gets style 0.
    pub const NULL: Self = Self(1);
    /// Python.
    pub const PYTHON: Self = Self(2);
    /// C, C++ and similar brace languages.
    pub const CPP: Self = Self(3);
    /// Properties / INI files.
    pub const PROPERTIES: Self = Self(9);
    /// Case-insensitive variant of [`LanguageId::CPP`].
    pub const CPP_NOCASE: Self = Self(35);
    /// Cascading style sheets.
    pub const CSS: Self = Self(38);
}

/// How far a lexer state can reach across line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reach {
    /// Self-contained: a line boundary after this style is a safe place to restart lexing.
    Short,
    /// May continue onto the next line (block comments, multi-line strings, continued
    /// preprocessor lines, ...).
    LongDistance,
}

/// Per-language lexer state, one variant per style.
///
/// Usually declared with [`lex_states!`](crate::lex_states).
pub trait LexState: Copy + Eq + fmt::Debug {
    /// State for a stored style; unknown styles map to the default state.
    fn from_style(style: Style) -> Self;

    /// Style written for this state.
    fn style(self) -> Style;
}

/// Tokenizer and folder for one language.
///
/// Both functions are pure with respect to their inputs: the text, the style preceding
/// `start` (`init_style`), the keyword lists, and properties read through the accessor.
pub trait Lexer: Send + Sync {
    /// Style `start..start + length`.
    fn lex(
        &self,
        start: usize,
        length: usize,
        init_style: Style,
        keywords: &[WordList],
        styler: &mut Accessor<'_>,
    );

    /// Assign fold levels to the lines of `start..start + length`; `start` is a line start.
    fn fold(
        &self,
        _start: usize,
        _length: usize,
        _init_style: Style,
        _keywords: &[WordList],
        _styler: &mut Accessor<'_>,
    ) {
    }

    /// Restart classification of a style found just before a line start.
    fn reach(&self, style: Style) -> Reach {
        if style == 0 {
            Reach::Short
        } else {
            Reach::LongDistance
        }
    }
}

/// A registered language.
pub struct LexerModule {
    id: LanguageId,
    name: String,
    lexer: Box<dyn Lexer>,
    word_lists: &'static [&'static str],
    style_bits: u8,
}

impl LexerModule {
    /// Wrap a lexer. `word_lists` describes each keyword-list slot, in order.
    pub fn new(
        id: LanguageId,
        name: impl Into<String>,
        lexer: impl Lexer + 'static,
        word_lists: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            name: name.into(),
            lexer: Box::new(lexer),
            word_lists,
            style_bits: 5,
        }
    }

    /// Number of significant style bits (default 5).
    pub fn with_style_bits(mut self, bits: u8) -> Self {
        self.style_bits = bits;
        self
    }

    /// Language id.
    pub fn id(&self) -> LanguageId {
        self.id
    }

    /// Language name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptions of the keyword-list slots.
    pub fn word_list_descriptions(&self) -> &'static [&'static str] {
        self.word_lists
    }

    /// Number of significant style bits.
    pub fn style_bits(&self) -> u8 {
        self.style_bits
    }

    /// The tokenizer/folder.
    pub fn lexer(&self) -> &dyn Lexer {
        self.lexer.as_ref()
    }
}

impl fmt::Debug for LexerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerModule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("word_lists", &self.word_lists)
            .field("style_bits", &self.style_bits)
            .finish_non_exhaustive()
    }
}

/// Declare a language state enum with explicit style numbers.
///
/// The first variant is the default state that unknown styles map to.
///
/// ```rust
/// lexstyle_core::lex_states! {
///     /// States of a toy language.
///     pub enum ToyState {
///         /// Whitespace and anything unrecognised.
///         Default = 0,
///         /// A number.
///         Number = 4,
///     }
/// }
///
/// use lexstyle_core::LexState;
/// assert_eq!(ToyState::from_style(4), ToyState::Number);
/// assert_eq!(ToyState::from_style(9), ToyState::Default);
/// assert_eq!(ToyState::Number.style(), 4);
/// assert_eq!(ToyState::Number.name(), "Number");
/// ```
#[macro_export]
macro_rules! lex_states {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            /// Every state, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Variant name.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl $crate::LexState for $name {
            fn from_style(style: $crate::Style) -> Self {
                match style {
                    $($value => $name::$variant,)+
                    _ => Self::ALL[0],
                }
            }

            fn style(self) -> $crate::Style {
                self as $crate::Style
            }
        }
    };
}
