use om_value::{Instance, Record, Value};

use crate::Registry;

/// Turns an instance into raw data through its extractors.
///
/// Arrays are serialized item by item through [`serialize_value`] and
/// mapped instances recursively. Other values are written as they are. Entries left `Undefined` are
/// removed from the result and from every nested record.
///
/// An instance of an unmapped class serializes to an empty record.
///
/// # Examples
///
/// ```
/// use om_mapper::{Registry, create, serialize};
/// use om_mapper::extract::SnakeCase;
/// use om_value::{class, record, Value};
///
/// class! { static PERSON = "Person" {} }
///
/// let mut registry = Registry::new();
/// registry
///     .declare(&PERSON)
///     .property("name")?
///     .property_with("lastName", SnakeCase::new())?;
///
/// let person = create(&registry, &PERSON, &Value::from(record! {
///     "name" => "John",
///     "lastName" => Value::Undefined,
/// }))?;
///
/// assert_eq!(serialize(&registry, &person), record! { "name" => "John" });
/// # Ok::<(), om_mapper::MapError>(())
/// ```
pub fn serialize(registry: &Registry, instance: &Instance) -> Record {
    let mut output = Record::new();

    let Some(properties) = registry.properties(instance.class()) else {
        return output;
    };

    for (key, entry) in properties.iter() {
        let value = match instance.get_key(key) {
            Value::Array(items) => items.iter().map(|item| serialize_value(registry, item)).collect(),
            Value::Instance(nested) if registry.is_mapped(nested.class()) => {
                Value::Record(serialize(registry, &nested))
            }
            other => other,
        };

        crate::cfg::debug! {
            log::trace!("serialize `{}.{key}` as {}", instance.class().name(), value.kind());
        }

        entry.extractor().apply(&mut output, value);
    }

    strip_undefined(&mut output);
    output
}

/// Serializes a value reached inside an array.
///
/// Instances become records through [`serialize`]. Plain records and
/// nested arrays have no mapped properties and serialize to an empty
/// record. Scalars are returned as they are.
pub fn serialize_value(registry: &Registry, value: &Value) -> Value {
    match value {
        Value::Instance(instance) => Value::Record(serialize(registry, instance)),
        Value::Record(_) | Value::Array(_) => Value::Record(Record::new()),
        other => other.clone(),
    }
}

fn strip_undefined(record: &mut Record) {
    record.retain(|_, value| {
        if let Value::Record(nested) = value {
            strip_undefined(nested);
        }
        !value.is_undefined()
    });
}
