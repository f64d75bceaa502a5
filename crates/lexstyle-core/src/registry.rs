//! Lookup table of available languages.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::lexer::{LanguageId, LexerModule};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced when registering languages.
pub enum RegistryError {
    #[error("language id {0} is already registered")]
    /// Another module already uses this id.
    DuplicateId(u32),

    #[error("language name '{0}' is already registered")]
    /// Another module already uses this name.
    DuplicateName(String),
}

/// Key for [`LexerRegistry::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerQuery<'a> {
    /// Look up by numeric id.
    Id(LanguageId),
    /// Look up by name.
    Name(&'a str),
}

impl From<LanguageId> for LexerQuery<'_> {
    fn from(id: LanguageId) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for LexerQuery<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

/// Registered languages, addressable by id and by name.
///
/// Modules are only ever added; lookups are pure.
#[derive(Debug, Default)]
pub struct LexerRegistry {
    modules: Vec<Arc<LexerModule>>,
    by_id: HashMap<LanguageId, usize>,
    by_name: HashMap<String, usize>,
}

impl LexerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Ids and names must be unique.
    pub fn register(&mut self, module: LexerModule) -> Result<(), RegistryError> {
        if self.by_id.contains_key(&module.id()) {
            tracing::warn!(id = module.id().0, name = module.name(), "duplicate language id");
            return Err(RegistryError::DuplicateId(module.id().0));
        }
        if self.by_name.contains_key(module.name()) {
            tracing::warn!(id = module.id().0, name = module.name(), "duplicate language name");
            return Err(RegistryError::DuplicateName(module.name().to_string()));
        }

        tracing::debug!(id = module.id().0, name = module.name(), "registered lexer");
        let index = self.modules.len();
        self.by_id.insert(module.id(), index);
        self.by_name.insert(module.name().to_string(), index);
        self.modules.push(Arc::new(module));
        Ok(())
    }

    /// Find a module by id or name.
    pub fn find<'q>(&self, query: impl Into<LexerQuery<'q>>) -> Option<Arc<LexerModule>> {
        match query.into() {
            LexerQuery::Id(id) => self.find_by_id(id),
            LexerQuery::Name(name) => self.find_by_name(name),
        }
    }

    /// Find a module by id.
    pub fn find_by_id(&self, id: LanguageId) -> Option<Arc<LexerModule>> {
        self.by_id.get(&id).map(|&i| Arc::clone(&self.modules[i]))
    }

    /// Find a module by name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<LexerModule>> {
        self.by_name.get(name).map(|&i| Arc::clone(&self.modules[i]))
    }

    /// Modules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LexerModule>> {
        self.modules.iter()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
