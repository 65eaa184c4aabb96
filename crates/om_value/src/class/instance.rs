use alloc::vec::Vec;
use core::fmt;

use crate::{Class, ConstructError, Key, Record, Value};

/// A constructed object of some [`Class`].
///
/// An instance owns its data entries. Computed properties stay on the
/// class and are reached through [`Instance::get`] and [`Instance::set`].
#[derive(Clone, PartialEq)]
pub struct Instance {
    class: Class,
    fields: Record,
}

impl Instance {
    /// Constructs an instance without arguments.
    ///
    /// Field defaults are installed from the root class down, then every
    /// initializer along the lineage runs in the same order.
    ///
    /// # Errors
    ///
    /// Fails if any initializer fails.
    pub fn new(class: Class) -> Result<Self, ConstructError> {
        let mut instance = Self {
            class,
            fields: Record::new(),
        };

        let lineage = class.ancestors().collect::<Vec<_>>();

        for ancestor in lineage.iter().rev() {
            for field in ancestor.fields() {
                if let Some(value) = field.default_value() {
                    instance.fields.insert(field.key().clone(), value);
                }
            }
        }

        for ancestor in lineage.iter().rev() {
            if let Some(init) = ancestor.initializer() {
                init(&mut instance)?;
            }
        }

        Ok(instance)
    }

    #[inline]
    pub const fn class(&self) -> Class {
        self.class
    }

    /// Returns `true` if the instance's class is `class` or derives from it.
    #[inline]
    pub fn is_instance_of(&self, class: Class) -> bool {
        self.class.is_subclass_of(class)
    }

    /// The own data entries, in insertion order.
    #[inline]
    pub const fn fields(&self) -> &Record {
        &self.fields
    }

    #[inline]
    pub fn own(&self, key: &Key) -> Option<&Value> {
        self.fields.get(key)
    }

    #[inline]
    pub fn own_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    #[inline]
    pub fn has_own(&self, key: &Key) -> bool {
        self.fields.contains_key(key)
    }

    /// Inserts an own data entry, bypassing accessors.
    #[inline]
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    #[inline]
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Reads a property the way a property access would.
    ///
    /// Own entries win, then a getter along the lineage. A setter-only
    /// accessor and an unknown key both read as `Undefined`.
    pub fn get(&self, key: impl Into<Key>) -> Value {
        self.get_key(&key.into())
    }

    /// Same as [`Instance::get`] with a borrowed key.
    pub fn get_key(&self, key: &Key) -> Value {
        if let Some(value) = self.fields.get(key) {
            return value.clone();
        }
        match self.class.accessor(key).and_then(|accessor| accessor.getter()) {
            Some(get) => get(self),
            None => Value::Undefined,
        }
    }

    /// Writes a property the way an assignment would.
    ///
    /// A setter along the lineage receives the value. A getter-only accessor
    /// ignores the write and `false` is returned. Otherwise an own data entry
    /// is created or replaced.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> bool {
        self.set_key(&key.into(), value.into())
    }

    /// Same as [`Instance::set`] with a borrowed key.
    pub fn set_key(&mut self, key: &Key, value: Value) -> bool {
        match self.class.accessor(key) {
            Some(accessor) => match accessor.setter() {
                Some(set) => {
                    set(self, value);
                    true
                }
                None => false,
            },
            None => {
                self.fields.insert(key.clone(), value);
                true
            }
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class.name())?;
        f.write_str(" ")?;
        f.debug_map().entries(self.fields.iter()).finish()
    }
}
