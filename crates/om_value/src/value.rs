use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use om_utils::collections::OrderedMap;

use crate::{Instance, Key};

// -----------------------------------------------------------------------------
// Record

/// An untyped key/value object in insertion order.
///
/// Records are what raw data (for example parsed JSON) looks like before it
/// is turned into instances, and what serialization produces.
pub type Record = OrderedMap<Key, Value>;

/// Builds a [`Record`] from `key => value` pairs.
///
/// Keys go through [`Key::from`], values through [`Value::from`].
///
/// ```
/// use om_value::{record, Key, Value};
///
/// let person = record! { "name" => "Ada", "age" => 36 };
///
/// assert_eq!(person.len(), 2);
/// assert_eq!(person.get(&Key::from("age")), Some(&Value::Number(36.0)));
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $( record.insert($crate::Key::from($key), $crate::Value::from($value)); )+
        record
    }};
}

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
///
/// `Undefined` marks an absent value and is distinct from `Null`.
/// Serialization drops record entries holding `Undefined`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Record(Record),
    Instance(Box<Instance>),
}

impl Value {
    /// A short name of the variant, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
            Self::Instance(_) => "instance",
        }
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Undefined` and `Null`.
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns `true` for `Undefined`, `Null`, `false`, `0`, `NaN` and `""`.
    ///
    /// ```
    /// use om_value::Value;
    ///
    /// assert!(Value::from(0).is_falsy());
    /// assert!(Value::Number(f64::NAN).is_falsy());
    /// assert!(Value::from("").is_falsy());
    /// assert!(!Value::from("0").is_falsy());
    /// assert!(!Value::Array(vec![]).is_falsy());
    /// ```
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => true,
            Self::Bool(value) => !*value,
            Self::Number(value) => *value == 0.0 || value.is_nan(),
            Self::String(value) => value.is_empty(),
            Self::Array(_) | Self::Record(_) | Self::Instance(_) => false,
        }
    }

    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    /// Returns `true` for arrays, records and instances.
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Record(_) | Self::Instance(_))
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Self::Instance(instance) => Some(*instance),
            _ => None,
        }
    }

    /// Looks up an own entry of a record or an instance.
    ///
    /// Accessors are not consulted, see [`Instance::get`] for that.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        match self {
            Self::Record(record) => record.get(&key),
            Self::Instance(instance) => instance.own(&key),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Number(value as f64)
            }
        }
    )*};
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Record> for Value {
    #[inline]
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Instance> for Value {
    #[inline]
    fn from(value: Instance) -> Self {
        Self::Instance(Box::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `Null`.
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn truthiness_follows_dynamic_rules() {
        let falsy = [
            Value::Undefined,
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(-0.0),
            Value::Number(f64::NAN),
            Value::from(String::new()),
        ];
        for value in falsy {
            assert!(value.is_falsy(), "{value:?} should be falsy");
        }

        let truthy = [
            Value::from(true),
            Value::from(1),
            Value::from("0"),
            Value::Array(vec![]),
            Value::Record(record! {}),
        ];
        for value in truthy {
            assert!(value.is_truthy(), "{value:?} should be truthy");
        }
    }

    #[test]
    fn objects_and_kinds() {
        assert!(Value::Array(vec![]).is_object());
        assert!(Value::Record(record! {}).is_object());
        assert!(!Value::Null.is_object());
        assert_eq!(Value::from(Some(3)).kind(), "number");
        assert_eq!(Value::from(None::<bool>), Value::Null);
    }

    #[test]
    fn record_lookup() {
        let value = Value::from(record! { "a" => 1, "b" => Value::Undefined });

        assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(value.get("b"), Some(&Value::Undefined));
        assert_eq!(value.get("c"), None);
        assert_eq!(Value::from(1).get("a"), None);
    }
}
