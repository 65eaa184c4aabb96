use alloc::sync::Arc;

use om_value::{Key, Record, Value};

use super::{Extraction, Extractor, ExtractorFactory};
use crate::MapError;

/// Extracts like the wrapped extractor, never writes.
pub struct DeserializeOnlyExtractor {
    inner: Arc<dyn Extractor>,
}

impl DeserializeOnlyExtractor {
    #[inline]
    pub fn new(inner: Arc<dyn Extractor>) -> Self {
        Self { inner }
    }
}

impl Extractor for DeserializeOnlyExtractor {
    #[inline]
    fn extract(&self, input: &Value) -> Extraction<'_> {
        self.inner.extract(input)
    }

    #[inline]
    fn apply(&self, _output: &mut Record, _value: Value) {}
}

/// Wraps a factory so the property is read but left out of serialized data.
///
/// ```
/// use om_mapper::extract::{DeserializeOnly, ExtractorFactory, SnakeCase};
/// use om_value::{record, Key, Record, Value};
///
/// let extractor = DeserializeOnly::new(SnakeCase::new())
///     .build(&Key::from("createdAt"))
///     .unwrap();
///
/// let raw = Value::from(record! { "created_at" => 1 });
/// assert_eq!(extractor.extract(&raw).value, Value::from(1));
///
/// let mut output = Record::new();
/// extractor.apply(&mut output, Value::from(2));
/// assert!(output.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeserializeOnly<F>(F);

impl<F: ExtractorFactory> DeserializeOnly<F> {
    #[inline]
    pub const fn new(factory: F) -> Self {
        Self(factory)
    }
}

impl<F: ExtractorFactory> ExtractorFactory for DeserializeOnly<F> {
    fn build(&self, key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        let inner = self.0.build(key)?;
        Ok(Arc::new(DeserializeOnlyExtractor::new(inner)))
    }
}
