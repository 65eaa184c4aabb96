use om_value::{Class, Instance, Key, Value};

use crate::{MapError, Registry, TypeResolver};

/// Builds an instance of `class` from partial data.
///
/// Every key present in `partial` is assigned, an explicit `Null` or
/// `Undefined` included, so only absent keys keep their defaults. Values
/// whose property resolves to a mapped class are created recursively, item
/// by item for arrays. `partial` is a record or an instance; anything else
/// provides no keys.
///
/// Given an instance of `class`, or of a subclass, the result is a deep
/// copy of it, see [`clone`](crate::clone).
///
/// # Errors
///
/// Fails when `class`, or the class of a nested value, cannot be constructed.
///
/// # Examples
///
/// ```
/// use om_mapper::{Registry, create};
/// use om_value::{class, record, FieldInfo, Value};
///
/// class! {
///     static ITEM = "Item" {
///         fields: [
///             FieldInfo::new("title").with_default(|| Value::from("untitled")),
///             FieldInfo::new("count").with_default(|| Value::from(1)),
///         ],
///     }
/// }
///
/// let registry = Registry::new();
/// let item = create(&registry, &ITEM, &Value::from(record! { "count" => Value::Null }))?;
///
/// assert_eq!(item.get("title"), Value::from("untitled"));
/// assert_eq!(item.get("count"), Value::Null);
/// # Ok::<(), om_mapper::MapError>(())
/// ```
pub fn create(registry: &Registry, class: Class, partial: &Value) -> Result<Instance, MapError> {
    if let Value::Instance(existing) = partial
        && existing.is_instance_of(class)
    {
        return crate::clone(registry, existing);
    }

    let mut instance = Instance::new(class)?;

    let entries = match partial {
        Value::Record(record) => record.iter(),
        Value::Instance(other) => other.fields().iter(),
        _ => return Ok(instance),
    };

    let resolver = TypeResolver::new(registry, class);

    for (key, value) in entries {
        let value = create_nested(registry, &resolver, key, value)?;
        instance.set_key(key, value);
    }

    Ok(instance)
}

fn create_nested(
    registry: &Registry,
    resolver: &TypeResolver<'_>,
    key: &Key,
    value: &Value,
) -> Result<Value, MapError> {
    let nested = |item: &Value| -> Result<Value, MapError> {
        if !matches!(item, Value::Record(_) | Value::Instance(_)) {
            return Ok(item.clone());
        }
        match resolver.resolve_mapped(key, item) {
            Some(class) => create(registry, class, item).map(Value::from),
            None => Ok(item.clone()),
        }
    };

    match value {
        Value::Array(items) => items.iter().map(nested).collect::<Result<_, _>>().map(Value::Array),
        other => nested(other),
    }
}
