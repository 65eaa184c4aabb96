use alloc::string::{String, ToString};
use alloc::sync::Arc;

use om_value::{Key, Record, Value};

use super::{Extraction, Extractor, ExtractorFactory, Transform, lookup};
use crate::MapError;

// -----------------------------------------------------------------------------
// KeyExtractor

/// Reads and writes a single raw key.
///
/// This is the extractor produced by [`Straight`], [`OverrideName`] and
/// [`SnakeCase`], which only differ in the raw key they pick.
#[derive(Debug)]
pub struct KeyExtractor {
    key: Key,
    path: String,
    transform: Transform,
}

impl KeyExtractor {
    pub fn new(key: Key, transform: Transform) -> Self {
        Self {
            path: key.to_string(),
            key,
            transform,
        }
    }

    /// The raw key this extractor reads and writes.
    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl Extractor for KeyExtractor {
    fn extract(&self, input: &Value) -> Extraction<'_> {
        let value = match input {
            Value::Array(_) => Value::Undefined,
            Value::Record(_) | Value::Instance(_) => self.transform.deserialize(lookup(input, &self.key)),
            other => other.clone(),
        };

        Extraction {
            value,
            path: &self.path,
        }
    }

    fn apply(&self, output: &mut Record, value: Value) {
        output.insert(self.key.clone(), self.transform.serialize(value));
    }
}

// -----------------------------------------------------------------------------
// Straight

/// Uses the property key as the raw key. The default strategy.
#[derive(Debug, Clone, Default)]
pub struct Straight {
    transform: Transform,
}

impl Straight {
    #[inline]
    pub const fn new() -> Self {
        Self {
            transform: Transform::new(),
        }
    }

    #[inline]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl ExtractorFactory for Straight {
    fn build(&self, key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        Ok(Arc::new(KeyExtractor::new(key.clone(), self.transform.clone())))
    }
}

// -----------------------------------------------------------------------------
// OverrideName

/// Uses a fixed raw key regardless of the property key.
///
/// ```
/// use om_mapper::extract::{ExtractorFactory, OverrideName};
/// use om_value::{record, Key, Value};
///
/// let extractor = OverrideName::new("id_property_key").build(&Key::from("id")).unwrap();
/// let raw = Value::from(record! { "id_property_key" => 7 });
///
/// let extraction = extractor.extract(&raw);
/// assert_eq!(extraction.value, Value::from(7));
/// assert_eq!(extraction.path, "id_property_key");
/// ```
#[derive(Debug, Clone)]
pub struct OverrideName {
    name: Key,
    transform: Transform,
}

impl OverrideName {
    #[inline]
    pub fn new(name: impl Into<Key>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
        }
    }

    #[inline]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl ExtractorFactory for OverrideName {
    fn build(&self, _key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        Ok(Arc::new(KeyExtractor::new(self.name.clone(), self.transform.clone())))
    }
}

// -----------------------------------------------------------------------------
// SnakeCase

/// Uses the `snake_case` form of a camel case property key.
///
/// Every ASCII uppercase letter or digit becomes `_` followed by its
/// lowercase form, so `lastName` reads `last_name` and `line2` reads
/// `line_2`.
///
/// # Errors
///
/// Building fails with [`MapError::NotStringPropertyKey`] for symbol keys.
#[derive(Debug, Clone, Default)]
pub struct SnakeCase {
    transform: Transform,
}

impl SnakeCase {
    #[inline]
    pub const fn new() -> Self {
        Self {
            transform: Transform::new(),
        }
    }

    #[inline]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Converts a camel case name into snake case.
    pub fn convert(name: &str) -> String {
        let mut converted = String::with_capacity(name.len() + 4);
        for ch in name.chars() {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                converted.push('_');
                converted.push(ch.to_ascii_lowercase());
            } else {
                converted.push(ch);
            }
        }
        converted
    }
}

impl ExtractorFactory for SnakeCase {
    fn build(&self, key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        let name = key
            .as_name()
            .ok_or_else(|| MapError::NotStringPropertyKey(key.clone()))?;

        Ok(Arc::new(KeyExtractor::new(
            Key::from(Self::convert(name)),
            self.transform.clone(),
        )))
    }
}
