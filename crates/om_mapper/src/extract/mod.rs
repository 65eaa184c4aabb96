//! Extraction strategies: how a property is read from raw data and written
//! back into it.
//!
//! An [`Extractor`] is bound to one property of one class. It is produced by
//! an [`ExtractorFactory`] at declaration time, which receives the property
//! key and may reject it.
//!
//! Built-in factories:
//!
//! | Factory | Raw key |
//! |---------|---------|
//! | [`Straight`] | the property key itself |
//! | [`OverrideName`] | a fixed name |
//! | [`SnakeCase`] | the `snake_case` form of the property key |
//! | [`DeepPath`] | a dotted path into nested records |
//! | [`DeserializeOnly`] | whatever the wrapped factory reads, never written |

// -----------------------------------------------------------------------------
// Modules

mod deep_path;
mod keyed;
mod transform;
mod wrapper;

// -----------------------------------------------------------------------------
// Exports

pub use deep_path::{DeepPath, DeepPathExtractor};
pub use keyed::{KeyExtractor, OverrideName, SnakeCase, Straight};
pub use transform::{Transform, TransformFn};
pub use wrapper::{DeserializeOnly, DeserializeOnlyExtractor};

use alloc::sync::Arc;

use om_value::{Key, Record, Value};

use crate::MapError;

// -----------------------------------------------------------------------------
// Extraction

/// The outcome of [`Extractor::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<'a> {
    /// The extracted value, `Undefined` when nothing matched.
    pub value: Value,
    /// Where the value lives in raw data, reported by validation errors.
    pub path: &'a str,
}

// -----------------------------------------------------------------------------
// Extractor

/// Reads one property from raw data and writes it back.
///
/// Implementations are expected to follow the common contract:
///
/// - a record or an instance is searched for the property,
/// - an array never matches and yields `Undefined`,
/// - any other input is returned unchanged.
pub trait Extractor: Send + Sync + 'static {
    fn extract(&self, input: &Value) -> Extraction<'_>;

    fn apply(&self, output: &mut Record, value: Value);
}

// -----------------------------------------------------------------------------
// ExtractorFactory

/// Builds the [`Extractor`] of a property from its key.
///
/// Closures with the matching signature are factories too, which is the way
/// to plug in user-defined extractors.
pub trait ExtractorFactory {
    /// # Errors
    ///
    /// Fails when the extractor cannot work with `key`.
    fn build(&self, key: &Key) -> Result<Arc<dyn Extractor>, MapError>;
}

impl<F> ExtractorFactory for F
where
    F: Fn(&Key) -> Result<Arc<dyn Extractor>, MapError>,
{
    #[inline]
    fn build(&self, key: &Key) -> Result<Arc<dyn Extractor>, MapError> {
        self(key)
    }
}

/// Reads `key` from a record, or through [`Instance::get_key`] from an instance.
///
/// [`Instance::get_key`]: om_value::Instance::get_key
pub(crate) fn lookup(input: &Value, key: &Key) -> Value {
    match input {
        Value::Record(record) => record.get(key).cloned().unwrap_or_default(),
        Value::Instance(instance) => instance.get_key(key),
        _ => Value::Undefined,
    }
}
