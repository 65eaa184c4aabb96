use alloc::vec::Vec;

use om_value::{Class, Instance, Record, Value};

use crate::{MapError, Registry, ValidationError};

/// Mapping operations called on a class.
///
/// ```
/// use om_mapper::{MappedClass, MappedObject, Registry};
/// use om_value::{class, record, Value};
///
/// class! { static USER = "User" {} }
///
/// let mut registry = Registry::new();
/// registry.declare(&USER).property("name")?;
///
/// let user = USER.create(&registry, &Value::from(record! { "name" => "Ann" }))?;
/// let copy = user.clone_mapped(&registry)?;
///
/// assert_eq!(copy.serialize(&registry), record! { "name" => "Ann" });
/// assert!(USER.validate(&registry, &Value::Null).is_empty());
/// # Ok::<(), om_mapper::MapError>(())
/// ```
pub trait MappedClass {
    /// See [`create`](crate::create).
    fn create(self, registry: &Registry, partial: &Value) -> Result<Instance, MapError>;

    /// See [`deserialize`](crate::deserialize).
    fn deserialize(self, registry: &Registry, raw: &Value) -> Value;

    /// See [`deserialize_array`](crate::deserialize_array).
    fn deserialize_array(self, registry: &Registry, raw: &Value) -> Result<Vec<Value>, MapError>;

    /// See [`validate`](crate::validate()).
    fn validate(self, registry: &Registry, data: &Value) -> Vec<ValidationError>;
}

impl MappedClass for Class {
    #[inline]
    fn create(self, registry: &Registry, partial: &Value) -> Result<Instance, MapError> {
        crate::create(registry, self, partial)
    }

    #[inline]
    fn deserialize(self, registry: &Registry, raw: &Value) -> Value {
        crate::deserialize(registry, self, raw)
    }

    #[inline]
    fn deserialize_array(self, registry: &Registry, raw: &Value) -> Result<Vec<Value>, MapError> {
        crate::deserialize_array(registry, self, raw)
    }

    #[inline]
    fn validate(self, registry: &Registry, data: &Value) -> Vec<ValidationError> {
        crate::validate(registry, self, data)
    }
}

/// Mapping operations called on an instance.
pub trait MappedObject {
    /// See [`serialize`](crate::serialize).
    fn serialize(&self, registry: &Registry) -> Record;

    /// See [`clone`](crate::clone()).
    fn clone_mapped(&self, registry: &Registry) -> Result<Instance, MapError>;
}

impl MappedObject for Instance {
    #[inline]
    fn serialize(&self, registry: &Registry) -> Record {
        crate::serialize(registry, self)
    }

    #[inline]
    fn clone_mapped(&self, registry: &Registry) -> Result<Instance, MapError> {
        crate::clone(registry, self)
    }
}
