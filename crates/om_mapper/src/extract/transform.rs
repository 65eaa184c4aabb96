use alloc::sync::Arc;
use core::fmt;

use om_value::Value;

/// A value conversion applied by an extractor.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Optional conversions run when reading from and writing to raw data.
///
/// Both directions also run for `Undefined`, so a transform may turn an
/// absent value into a concrete one.
///
/// ```
/// use om_mapper::extract::Transform;
/// use om_value::Value;
///
/// let transform = Transform::new()
///     .on_deserialize(|value| match value {
///         Value::String(text) => Value::from(text.len()),
///         other => other,
///     })
///     .on_serialize(|value| if value.is_undefined() { Value::Null } else { value });
///
/// assert_eq!(transform.deserialize(Value::from("four")), Value::from(4));
/// assert_eq!(transform.serialize(Value::Undefined), Value::Null);
/// ```
#[derive(Clone, Default)]
pub struct Transform {
    on_deserialize: Option<TransformFn>,
    on_serialize: Option<TransformFn>,
}

impl Transform {
    /// A transform which leaves values untouched.
    #[inline]
    pub const fn new() -> Self {
        Self {
            on_deserialize: None,
            on_serialize: None,
        }
    }

    /// Sets the conversion applied to extracted values.
    pub fn on_deserialize(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.on_deserialize = Some(Arc::new(f));
        self
    }

    /// Sets the conversion applied to values before they are written.
    pub fn on_serialize(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.on_serialize = Some(Arc::new(f));
        self
    }

    #[inline]
    pub fn deserialize(&self, value: Value) -> Value {
        match &self.on_deserialize {
            Some(f) => f(value),
            None => value,
        }
    }

    #[inline]
    pub fn serialize(&self, value: Value) -> Value {
        match &self.on_serialize {
            Some(f) => f(value),
            None => value,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("on_deserialize", &self.on_deserialize.is_some())
            .field("on_serialize", &self.on_serialize.is_some())
            .finish()
    }
}
