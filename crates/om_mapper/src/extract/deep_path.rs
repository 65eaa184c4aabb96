use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use om_value::{Key, Record, Value};

use super::{Extraction, Extractor, ExtractorFactory, Transform, lookup};
use crate::MapError;

// -----------------------------------------------------------------------------
// DeepPathExtractor

/// Reads and writes a value nested inside records.
#[derive(Debug)]
pub struct DeepPathExtractor {
    path: String,
    segments: Vec<Key>,
    transform: Transform,
}

impl DeepPathExtractor {
    pub fn new(path: &str, transform: Transform) -> Self {
        let segments = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| Key::from(String::from(segment)))
            .collect();

        Self {
            path: String::from(path),
            segments,
            transform,
        }
    }
}

impl Extractor for DeepPathExtractor {
    fn extract(&self, input: &Value) -> Extraction<'_> {
        let value = match input {
            Value::Array(_) => Value::Undefined,
            Value::Record(_) | Value::Instance(_) => {
                let mut current: Option<Value> = None;
                for segment in &self.segments {
                    let source = current.as_ref().unwrap_or(input);
                    let next = match source {
                        Value::Record(_) | Value::Instance(_) => lookup(source, segment),
                        _ => Value::Undefined,
                    };
                    current = Some(next);
                }
                self.transform
                    .deserialize(current.unwrap_or_else(|| input.clone()))
            }
            other => other.clone(),
        };

        Extraction {
            value,
            path: &self.path,
        }
    }

    fn apply(&self, output: &mut Record, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            return;
        };

        let mut target = output;
        for segment in parents {
            let slot = target.get_or_insert_with(segment.clone(), || Value::Record(Record::new()));
            if !matches!(slot, Value::Record(_)) {
                *slot = Value::Record(Record::new());
            }
            target = match slot {
                Value::Record(record) => record,
                _ => return,
            };
        }

        target.insert(last.clone(), self.transform.serialize(value));
    }
}

// -----------------------------------------------------------------------------
// DeepPath

/// Reads a dotted path such as `"address.city"` through nested records.
///
/// A missing intermediate level, or one that is not a record, yields
/// `Undefined`. Like every extractor, an array input yields `Undefined` and
/// any other non-record input is returned as it is. Writing creates the
/// intermediate records.
///
/// ```
/// use om_mapper::extract::{DeepPath, ExtractorFactory};
/// use om_value::{record, Key, Record, Value};
///
/// let extractor = DeepPath::new("address.city").build(&Key::from("city")).unwrap();
///
/// let raw = Value::from(record! { "address" => record! { "city" => "Oslo" } });
/// assert_eq!(extractor.extract(&raw).value, Value::from("Oslo"));
/// assert_eq!(extractor.extract(&raw).path, "address.city");
///
/// let mut output = Record::new();
/// extractor.apply(&mut output, Value::from("Bergen"));
/// assert_eq!(output, record! { "address" => record! { "city" => "Bergen" } });
/// ```
#[derive(Debug, Clone)]
pub struct DeepPath {
    path: Cow<'static, str>,
    transform: Transform,
}

impl DeepPath {
    #[inline]
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            transform: Transform::new(),
        }
    }

    #[inline]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl ExtractorFactory for DeepPath {
    fn build(&self, _key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        Ok(Arc::new(DeepPathExtractor::new(&self.path, self.transform.clone())))
    }
}
