use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use om_utils::hash::HashMap;
use om_value::Key;

use super::ClassData;
use crate::Validator;

/// Validators of each property. Subclass validators are appended to the
/// inherited ones.
#[derive(Clone, Default)]
pub struct ValidatorMap {
    entries: HashMap<Key, Vec<Arc<dyn Validator>>>,
}

impl ValidatorMap {
    pub(crate) fn extend(&mut self, key: Key, validators: impl IntoIterator<Item = Arc<dyn Validator>>) {
        self.entries.entry(key).or_default().extend(validators);
    }

    /// The validators of `key`, in declaration order.
    #[inline]
    pub fn get(&self, key: &Key) -> &[Arc<dyn Validator>] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
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

impl ClassData for ValidatorMap {
    fn overlay(&mut self, own: &Self) {
        for (key, validators) in own.entries.iter() {
            self.extend(key.clone(), validators.iter().cloned());
        }
    }
}

impl fmt::Debug for ValidatorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, list)| (key, list.len())))
            .finish()
    }
}
