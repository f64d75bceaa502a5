use crate::error::ProfileError;
use lexstyle_core::{LexerRegistry, StyleSession};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Everything needed to style one language: which lexer, its properties and keyword lists.
///
/// ```yaml
/// lexer: python
/// properties:
///   fold.quotes.python: 1
///   lexer.python.strings.over.newline: false
/// keywords:
///   - "and as assert def class"
///   - "self cls"
/// ```
///
/// Property values may be written as strings, integers or booleans; booleans become `1`/`0`.
pub struct LanguageProfile {
    /// Registered name of the lexer module.
    pub lexer: String,
    /// Properties set on the session.
    #[serde(default, deserialize_with = "scalar_map")]
    pub properties: BTreeMap<String, String>,
    /// Keyword lists, matched to the lexer's slots by position.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl LanguageProfile {
    /// A profile for `lexer` with no properties or keywords.
    pub fn new(lexer: impl Into<String>) -> Self {
        Self {
            lexer: lexer.into(),
            ..Self::default()
        }
    }

    /// Parse a single profile.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a session for this profile's lexer with its properties and keyword lists applied.
    pub fn activate(&self, registry: &LexerRegistry) -> Result<StyleSession, ProfileError> {
        let module = registry
            .find_by_name(&self.lexer)
            .ok_or_else(|| ProfileError::UnknownLexer(self.lexer.clone()))?;

        let slots = module.word_list_descriptions().len();
        if self.keywords.len() > slots {
            return Err(ProfileError::TooManyKeywordLists {
                lexer: self.lexer.clone(),
                given: self.keywords.len(),
                slots,
            });
        }

        let mut session = StyleSession::new(module);
        for (index, list) in self.keywords.iter().enumerate() {
            session.set_word_list(index, list);
        }
        session.properties_mut().extend(
            self.properties
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        tracing::debug!(
            lexer = %self.lexer,
            properties = self.properties.len(),
            keyword_lists = self.keywords.len(),
            "language profile activated"
        );
        Ok(session)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
/// Named profiles, e.g. one per file type.
pub struct ProfileSet {
    profiles: BTreeMap<String, LanguageProfile>,
}

impl ProfileSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mapping of profile name to profile.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let set: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(profiles = set.len(), "language profiles loaded");
        Ok(set)
    }

    /// Profile called `name`.
    pub fn get(&self, name: &str) -> Option<&LanguageProfile> {
        self.profiles.get(name)
    }

    /// Add or replace a profile, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        profile: LanguageProfile,
    ) -> Option<LanguageProfile> {
        self.profiles.insert(name.into(), profile)
    }

    /// Profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageProfile)> {
        self.profiles.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the set holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => u8::from(b).to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.into_text()))
        .collect())
}
