//! [`Serialize`] and [`Deserialize`] for [`Value`].
//!
//! Serialization follows JSON conventions: `Undefined` entries are left out
//! of records, symbol keys are skipped, instances are written as their own
//! data entries and integral numbers are written as integers.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{MapAccess, SeqAccess, Visitor};
use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Key, Record, Value};

// -----------------------------------------------------------------------------
// Serialize

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Number(value) => serialize_number(*value, serializer),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => serialize_record(record, serializer),
            Value::Instance(instance) => serialize_record(instance.fields(), serializer),
        }
    }
}

fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    let integral = (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
        && (value as i64) as f64 == value;

    if integral {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

fn serialize_record<S: Serializer>(record: &Record, serializer: S) -> Result<S::Ok, S::Error> {
    let entries = || {
        record
            .iter()
            .filter(|(_, value)| !value.is_undefined())
            .filter_map(|(key, value)| key.as_name().map(|name| (name, value)))
    };

    let mut map = serializer.serialize_map(Some(entries().count()))?;
    for (name, value) in entries() {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a self-describing value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(String::from(v)))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut record = Record::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            record.insert(Key::from(key), value);
        }
        Ok(Value::Record(record))
    }
}

#[cfg(test)]
mod tests {
    use crate::{class, record, FieldInfo, Instance, Key, Symbol, Value};
    use alloc::vec;
    use serde_json::json;

    static HIDDEN: Symbol = Symbol::new("hidden");

    class! {
        static POINT = "Point" {
            fields: [
                FieldInfo::new("x").with_default(|| Value::from(1)),
                FieldInfo::new("y").with_default(|| Value::Undefined),
                FieldInfo::symbol(&HIDDEN).with_default(|| Value::from(true)),
            ],
        }
    }

    #[test]
    fn parse_json() {
        let value: Value = serde_json::from_value(json!({
            "name": "Ada",
            "age": 36,
            "tags": ["a", null],
            "ratio": 0.5,
        }))
        .unwrap();

        let record = value.as_record().unwrap();
        assert_eq!(record.get(&Key::from("age")), Some(&Value::Number(36.0)));
        assert_eq!(
            record.get(&Key::from("tags")),
            Some(&Value::Array(vec![Value::from("a"), Value::Null]))
        );
    }

    #[test]
    fn write_json() {
        let value = Value::from(record! {
            "count" => 3,
            "ratio" => 0.25,
            "missing" => Value::Undefined,
            "list" => vec![Value::Undefined, Value::from(false)],
        });

        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({ "count": 3, "ratio": 0.25, "list": [null, false] })
        );
    }

    #[test]
    fn instances_write_own_named_fields() {
        let point = Value::from(Instance::new(&POINT).unwrap());

        assert_eq!(serde_json::to_value(&point).unwrap(), json!({ "x": 1 }));
    }
}
