//! Validation of raw data against the declared validators.
//!
//! Validation walks raw data the same way [`deserialize`](crate::deserialize)
//! does, but reports problems instead of assigning values. Each problem is a
//! [`ValidationError`] whose path locates the offending value, for example
//! `nested.[0].deepNested.property`.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod rules;

// -----------------------------------------------------------------------------
// Exports

pub use error::ValidationError;
pub use rules::{NumberRange, Required, StringLength, TypeOf};

crate::cfg::std! {
    pub use rules::Pattern;
}

use alloc::format;
use alloc::vec::Vec;

use om_value::{Class, Instance, Value};

use crate::{Registry, TypeResolver};

// -----------------------------------------------------------------------------
// Validator

/// A rule checked against the extracted value of a property.
///
/// Closures taking `(&Value, &str)` are validators too. Their argument
/// types must be spelled out so the closure accepts any lifetime.
///
/// ```
/// use om_mapper::validate::{ValidationError, Validator};
/// use om_value::Value;
///
/// let positive = |value: &Value, path: &str| match value.as_f64() {
///     Some(n) if n <= 0.0 => Some(ValidationError::new("Value should be positive", path)),
///     _ => None,
/// };
///
/// assert!(positive.validate(&Value::from(1), "p").is_none());
/// assert_eq!(positive.validate(&Value::from(-1), "p").unwrap().path(), "p");
/// ```
pub trait Validator: Send + Sync + 'static {
    /// Returns an error for an invalid `value` found at `path`.
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&Value, &str) -> Option<ValidationError> + Send + Sync + 'static,
{
    #[inline]
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
        self(value, path)
    }
}

// -----------------------------------------------------------------------------
// Engine

/// Validates raw data against the validators declared for `class`.
///
/// An array is validated item by item, with paths prefixed by `[index]`.
/// Nested records and arrays whose property resolves to a mapped class are
/// validated recursively. An empty list means the data is valid.
///
/// # Examples
///
/// ```
/// use om_mapper::{Registry, validate};
/// use om_mapper::validate::{Required, StringLength};
/// use om_value::{class, record, Value};
///
/// class! { static NAMED = "Named" {} }
///
/// let mut registry = Registry::new();
/// registry
///     .declare(&NAMED)
///     .property("name")?
///     .validator("name", Required)
///     .validator("name", StringLength::at_least(1));
///
/// let data = Value::Array(vec![
///     Value::from(record! { "name" => "ok" }),
///     Value::from(record! { "name" => "" }),
/// ]);
/// let errors = validate(&registry, &NAMED, &data);
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path(), "[1].name");
/// # Ok::<(), om_mapper::MapError>(())
/// ```
pub fn validate(registry: &Registry, class: Class, data: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match data {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let prefix = format!("[{index}]");
                errors.extend(
                    validate(registry, class, item)
                        .into_iter()
                        .map(|error| error.prefixed(&prefix)),
                );
            }
        }
        _ => validate_object(registry, class, data, &mut errors),
    }

    errors
}

fn validate_object(registry: &Registry, class: Class, data: &Value, errors: &mut Vec<ValidationError>) {
    let Some(properties) = registry.properties(class) else {
        return;
    };

    if let Err(error) = Instance::new(class) {
        log::debug!("skip validation: {error}");
        return;
    }

    let validators = registry.validators(class);
    let resolver = TypeResolver::new(registry, class);

    for (key, entry) in properties.iter() {
        let extraction = entry.extractor().extract(data);
        let (value, path) = (&extraction.value, extraction.path);

        if let Some(validators) = validators {
            errors.extend(
                validators
                    .get(key)
                    .iter()
                    .filter_map(|validator| validator.validate(value, path))
                    .map(ValidationError::sanitized),
            );
        }

        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(nested) = resolver.resolve_mapped(key, item) {
                        let prefix = format!("{path}.[{index}]");
                        errors.extend(
                            validate(registry, nested, item)
                                .into_iter()
                                .map(|error| error.prefixed(&prefix)),
                        );
                    }
                }
            }
            Value::Record(_) | Value::Instance(_) => {
                if let Some(nested) = resolver.resolve_mapped(key, value) {
                    errors.extend(
                        validate(registry, nested, value)
                            .into_iter()
                            .map(|error| error.prefixed(path)),
                    );
                }
            }
            _ => {}
        }
    }
}
