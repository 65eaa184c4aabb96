use alloc::vec::Vec;

use om_value::{Class, Instance, Key, Value};

use crate::registry::Access;
use crate::{MapError, Registry, TypeResolver};

/// Builds an instance of `class` from raw data.
///
/// Each mapped property is extracted in declaration order:
///
/// - `Undefined` leaves the property untouched, so defaults survive,
/// - other falsy values are assigned as they are,
/// - arrays are mapped item by item, each item resolving its own class,
/// - records and instances are deserialized into their resolved class,
/// - anything else is assigned as it is.
///
/// A getter-only accessor never receives a value. A class that fails to
/// construct yields a copy of `raw` instead of an instance.
///
/// # Examples
///
/// ```
/// use om_mapper::{Registry, deserialize};
/// use om_value::{class, record, FieldInfo, Value};
///
/// class! {
///     static POINT = "Point" {
///         fields: [FieldInfo::new("x").with_default(|| Value::from(0))],
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.declare(&POINT).property("x")?.property("y")?;
///
/// let point = deserialize(&registry, &POINT, &Value::from(record! { "y" => 2 }));
/// let point = point.as_instance().unwrap();
///
/// assert_eq!(point.get("x"), Value::from(0));
/// assert_eq!(point.get("y"), Value::from(2));
/// # Ok::<(), om_mapper::MapError>(())
/// ```
pub fn deserialize(registry: &Registry, class: Class, raw: &Value) -> Value {
    let mut instance = match Instance::new(class) {
        Ok(instance) => instance,
        Err(error) => {
            log::debug!("deserialize keeps raw data: {error}");
            return raw.clone();
        }
    };

    let Some(properties) = registry.properties(class) else {
        return Value::from(instance);
    };

    let resolver = TypeResolver::new(registry, class);

    for (key, entry) in properties.iter() {
        let value = entry.extractor().extract(raw).value;

        crate::cfg::debug! {
            log::trace!("deserialize `{}.{key}` from {}", class.name(), value.kind());
        }

        if value.is_undefined() {
            continue;
        }

        let value = if value.is_falsy() {
            value
        } else {
            map_nested(registry, &resolver, key, value)
        };

        let access = properties.access_for(class, key, entry);
        assign(&mut instance, key, access, value);
    }

    Value::from(instance)
}

fn map_nested(registry: &Registry, resolver: &TypeResolver<'_>, key: &Key, value: Value) -> Value {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match resolver.resolve_mapped(key, &item) {
                Some(class) => deserialize(registry, class, &item),
                None => item,
            })
            .collect(),
        Value::Record(_) | Value::Instance(_) => match resolver.resolve_mapped(key, &value) {
            Some(class) => deserialize(registry, class, &value),
            None => value,
        },
        other => other,
    }
}

fn assign(instance: &mut Instance, key: &Key, access: Access, value: Value) {
    match access {
        Access::Field => {
            instance.insert(key.clone(), value);
        }
        Access::Setter(set) => set(instance, value),
        Access::ReadOnly => {
            log::debug!(
                "skip read-only property `{key}` of `{}`",
                instance.class().name()
            );
        }
    }
}

/// Deserializes every item of a raw array into `class`.
///
/// # Errors
///
/// Fails with [`MapError::NotAnArray`] when `raw` is not an array.
pub fn deserialize_array(registry: &Registry, class: Class, raw: &Value) -> Result<Vec<Value>, MapError> {
    match raw {
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| deserialize(registry, class, item))
            .collect()),
        other => Err(MapError::NotAnArray(other.kind())),
    }
}
