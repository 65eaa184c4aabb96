use alloc::sync::Arc;
use core::fmt;

use om_utils::hash::HashMap;
use om_value::{Class, Key, Value};

use super::ClassData;
use crate::TypeResolveError;

/// Picks the class of a nested value from the value itself.
pub type ConditionalFn = Arc<dyn Fn(&Value) -> Result<Option<Class>, TypeResolveError> + Send + Sync>;

// -----------------------------------------------------------------------------
// TypeEntry

/// An explicit type declaration of a property.
#[derive(Clone)]
pub enum TypeEntry {
    /// Nested values always map to this class.
    Fixed(Class),
    /// The class is chosen per value. Nested array items are resolved one
    /// by one, so arrays may mix classes.
    Conditional(ConditionalFn),
}

impl TypeEntry {
    /// A conditional entry which cannot fail.
    pub fn conditional(f: impl Fn(&Value) -> Option<Class> + Send + Sync + 'static) -> Self {
        Self::Conditional(Arc::new(move |value: &Value| {
            Ok::<_, TypeResolveError>(f(value))
        }))
    }

    /// A conditional entry which may report that it cannot decide.
    pub fn try_conditional(
        f: impl Fn(&Value) -> Result<Option<Class>, TypeResolveError> + Send + Sync + 'static,
    ) -> Self {
        Self::Conditional(Arc::new(f))
    }
}

impl From<Class> for TypeEntry {
    #[inline]
    fn from(class: Class) -> Self {
        Self::Fixed(class)
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(class) => f.debug_tuple("Fixed").field(&class.name()).finish(),
            Self::Conditional(_) => f.write_str("Conditional(..)"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeMap

/// Explicit property types of a class. A subclass entry replaces the
/// inherited one.
#[derive(Clone, Default, Debug)]
pub struct TypeMap {
    entries: HashMap<Key, TypeEntry>,
}

impl TypeMap {
    pub(crate) fn insert(&mut self, key: Key, entry: TypeEntry) {
        self.entries.insert(key, entry);
    }

    #[inline]
    pub fn get(&self, key: &Key) -> Option<&TypeEntry> {
        self.entries.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClassData for TypeMap {
    fn overlay(&mut self, own: &Self) {
        for (key, entry) in own.entries.iter() {
            self.entries.insert(key.clone(), entry.clone());
        }
    }
}
