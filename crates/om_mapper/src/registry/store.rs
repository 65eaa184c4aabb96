use alloc::vec::Vec;

use om_value::Class;

use super::ClassMap;

// -----------------------------------------------------------------------------
// ClassData

/// Per-class declarations that merge along the class lineage.
pub trait ClassData: Default + Clone {
    /// Merges `own`, the declarations of a subclass, over `self`.
    fn overlay(&mut self, own: &Self);

    /// Finalizes the effective data of `class` after all overlays.
    fn bind(&mut self, _class: Class) {}
}

// -----------------------------------------------------------------------------
// ClassStore

/// Own declarations per class plus the cached effective view.
///
/// The effective data of a declared class is the overlay of every declared
/// ancestor, root first, then the class itself. It is rebuilt for the class
/// and its declared descendants whenever one of them declares something.
pub struct ClassStore<M> {
    own: ClassMap<M>,
    effective: ClassMap<M>,
}

impl<M> Default for ClassStore<M> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ClassStore<M> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            own: ClassMap::new(),
            effective: ClassMap::new(),
        }
    }

    /// The effective data of `class`, or of its nearest declared ancestor.
    ///
    /// `None` means nothing in the lineage ever declared anything.
    pub fn resolve(&self, class: Class) -> Option<&M> {
        class
            .ancestors()
            .find_map(|ancestor| self.effective.get(ancestor))
    }
}

impl<M: ClassData> ClassStore<M> {
    /// Edits the own declarations of `class`, then refreshes the cache.
    pub fn declare(&mut self, class: Class, f: impl FnOnce(&mut M)) {
        f(self.own.get_or_insert(class, M::default));

        let affected = self
            .own
            .classes()
            .filter(|declared| declared.is_subclass_of(class))
            .collect::<Vec<_>>();

        for declared in affected {
            let merged = self.merge(declared);
            self.effective.insert(declared, merged);
        }
    }

    fn merge(&self, class: Class) -> M {
        let lineage = class.ancestors().collect::<Vec<_>>();

        let mut merged = M::default();
        for ancestor in lineage.into_iter().rev() {
            if let Some(own) = self.own.get(ancestor) {
                merged.overlay(own);
            }
        }
        merged.bind(class);
        merged
    }
}
