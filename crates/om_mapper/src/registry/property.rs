use alloc::sync::Arc;
use core::fmt;

use om_utils::collections::OrderedMap;
use om_value::{Class, Key, Setter};

use super::ClassData;
use crate::extract::Extractor;

// -----------------------------------------------------------------------------
// Access

/// How a deserialized value reaches its property.
#[derive(Clone, Copy)]
pub enum Access {
    /// A plain data field, written as an own entry.
    Field,
    /// An accessor with a setter.
    Setter(Setter),
    /// A getter-only accessor. Writes are skipped.
    ReadOnly,
}

impl Access {
    /// Looks the key up along the lineage of `class`.
    pub fn of(class: Class, key: &Key) -> Self {
        match class.accessor(key) {
            None => Self::Field,
            Some(accessor) => match accessor.setter() {
                Some(set) => Self::Setter(set),
                None => Self::ReadOnly,
            },
        }
    }
}

impl fmt::Debug for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Field => "Field",
            Self::Setter(_) => "Setter",
            Self::ReadOnly => "ReadOnly",
        })
    }
}

// -----------------------------------------------------------------------------
// PropertyEntry

/// A mapped property: its extractor and how it is assigned.
#[derive(Clone)]
pub struct PropertyEntry {
    extractor: Arc<dyn Extractor>,
    access: Access,
}

impl PropertyEntry {
    #[inline]
    pub fn extractor(&self) -> &dyn Extractor {
        &*self.extractor
    }

    #[inline]
    pub const fn access(&self) -> Access {
        self.access
    }
}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// PropertyMap

/// The mapped properties of a class, in declaration order.
///
/// Inherited properties come first. A subclass redeclaring a property
/// replaces its extractor but keeps its position.
#[derive(Clone, Default, Debug)]
pub struct PropertyMap {
    entries: OrderedMap<Key, PropertyEntry>,
    bound: Option<Class>,
}

impl PropertyMap {
    pub(crate) fn insert(&mut self, key: Key, extractor: Arc<dyn Extractor>) {
        let entry = PropertyEntry {
            extractor,
            access: Access::Field,
        };
        self.entries.insert(key, entry);
    }

    /// How `entry`, the entry of `key`, is assigned on instances of `class`.
    ///
    /// The stored flag holds for the class this map was built for. A class
    /// reaching the map through an ancestor looks its accessors up again.
    pub fn access_for(&self, class: Class, key: &Key, entry: &PropertyEntry) -> Access {
        match self.bound {
            Some(bound) if bound == class => entry.access,
            _ => Access::of(class, key),
        }
    }

    #[inline]
    pub fn get(&self, key: &Key) -> Option<&PropertyEntry> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Key, &PropertyEntry)> {
        self.entries.iter()
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.entries.keys()
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

impl ClassData for PropertyMap {
    fn overlay(&mut self, own: &Self) {
        for (key, entry) in own.entries.iter() {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    fn bind(&mut self, class: Class) {
        self.bound = Some(class);
        for (key, entry) in self.entries.iter_mut() {
            entry.access = Access::of(class, key);
        }
    }
}
