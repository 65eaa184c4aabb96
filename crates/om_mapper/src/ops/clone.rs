use alloc::vec::Vec;

use om_value::{Instance, Value};

use crate::{MapError, Registry};

/// Copies an instance, recursively copying nested mapped instances.
///
/// The copy starts from the class defaults, then receives every own entry
/// of `instance`, mapped or not.
///
/// # Errors
///
/// Fails when the class of `instance`, or of a nested mapped instance,
/// cannot be constructed.
pub fn clone(registry: &Registry, instance: &Instance) -> Result<Instance, MapError> {
    let mut copy = crate::create(registry, instance.class(), &Value::Undefined)?;

    for (key, value) in instance.fields().iter() {
        let value = clone_value(registry, value)?;
        copy.set_key(key, value);
    }

    Ok(copy)
}

fn clone_value(registry: &Registry, value: &Value) -> Result<Value, MapError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| clone_value(registry, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Instance(nested) if registry.is_mapped(nested.class()) => {
            clone(registry, nested).map(Value::from)
        }
        other => Ok(other.clone()),
    }
}
