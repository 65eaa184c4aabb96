use om_utils::hash::HashMap;
use om_utils::hash::hashbrown::hash_map::Entry;
use om_value::{Class, ClassId};

// -----------------------------------------------------------------------------
// ClassMap

/// A map keyed by class identity.
///
/// Each entry remembers its class, so the map can be walked as a list of
/// classes as well.
pub struct ClassMap<V>(HashMap<ClassId, (Class, V)>);

impl<V> Default for ClassMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ClassMap<V> {
    /// Creates an empty `ClassMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(om_utils::hash::FixedHashState))
    }

    /// Gets a mutable reference to the value of `class`,
    /// inserting the result of `f` if the class is not present.
    #[inline]
    pub fn get_or_insert(&mut self, class: Class, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(class.id()) {
            Entry::Vacant(entry) => &mut entry.insert((class, f())).1,
            Entry::Occupied(entry) => &mut entry.into_mut().1,
        }
    }

    #[inline]
    pub fn get(&self, class: Class) -> Option<&V> {
        self.0.get(&class.id()).map(|(_, value)| value)
    }

    /// Inserts a value, returning the previous one.
    #[inline]
    pub fn insert(&mut self, class: Class, value: V) -> Option<V> {
        self.0.insert(class.id(), (class, value)).map(|(_, old)| old)
    }

    /// Iterates all classes in arbitrary order.
    #[inline]
    pub fn classes(&self) -> impl ExactSizeIterator<Item = Class> + '_ {
        self.0.values().map(|(class, _)| *class)
    }
}
