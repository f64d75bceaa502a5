//! Named string properties that configure lexers and folders.
//!
//! Values are stored as text and interpreted on read, so hosts can pass through whatever their
//! own configuration files contain (`fold.compact=1`, `lexer.props.allow.initial.spaces=0`, ...).

use std::collections::BTreeMap;

/// A set of `name -> value` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    values: BTreeMap<String, String>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning `true` if its value changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Raw value of a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Integer value of a property.
    ///
    /// Missing or empty values yield `default`. Otherwise the leading integer of the value is
    /// used (`"2 spaces"` reads as 2); a value with no leading digits reads as 0.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            None => default,
            Some(value) if value.trim().is_empty() => default,
            Some(value) => leading_int(value),
        }
    }

    /// Boolean value of a property: any non-zero integer is `true`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_int(key, i32::from(default)) != 0
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PropertySet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

fn leading_int(value: &str) -> i32 {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let mut result: i32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        result = result.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }
    if negative { -result } else { result }
}
