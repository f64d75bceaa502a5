use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or activating language profiles.
pub enum ProfileError {
    #[error("YAML parse error: {0}")]
    /// The profile document is not valid YAML or does not have the expected shape.
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown lexer '{0}'")]
    /// No registered module has the profile's lexer name.
    UnknownLexer(String),

    #[error("lexer '{lexer}' takes {slots} keyword lists, profile gives {given}")]
    /// The profile lists more keyword sets than the lexer declares slots for.
    TooManyKeywordLists {
        /// Lexer the profile names.
        lexer: String,
        /// Keyword lists in the profile.
        given: usize,
        /// Keyword-list slots the lexer declares.
        slots: usize,
    },
}
