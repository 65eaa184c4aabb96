use alloc::format;

use om_value::Value;

use super::{ValidationError, Validator};

// -----------------------------------------------------------------------------
// Required

/// Rejects `Undefined` and `Null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator for Required {
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
        value
            .is_nullish()
            .then(|| ValidationError::new("Property is required", path))
    }
}

// -----------------------------------------------------------------------------
// StringLength

/// Bounds the length of strings, in UTF-16 code units. Other values pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLength {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLength {
    #[inline]
    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    #[inline]
    pub const fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    #[inline]
    pub const fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl Validator for StringLength {
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
        let length = value.as_str()?.encode_utf16().count();

        if let Some(min) = self.min
            && length < min
        {
            return Some(ValidationError::new(
                format!("Property length should be greater than or equal {min}"),
                path,
            ));
        }
        if let Some(max) = self.max
            && length > max
        {
            return Some(ValidationError::new(
                format!("Property length should be less than or equal {max}"),
                path,
            ));
        }
        None
    }
}

// -----------------------------------------------------------------------------
// NumberRange

/// Bounds numbers, inclusively. Other values pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRange {
    #[inline]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    #[inline]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    #[inline]
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl Validator for NumberRange {
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
        let number = value.as_f64()?;

        if let Some(min) = self.min
            && number < min
        {
            return Some(ValidationError::new(
                format!("Value should be greater than or equal to {min}"),
                path,
            ));
        }
        if let Some(max) = self.max
            && number > max
        {
            return Some(ValidationError::new(
                format!("Value should be less than or equal to {max}"),
                path,
            ));
        }
        None
    }
}

// -----------------------------------------------------------------------------
// TypeOf

/// Requires a value of the given kind. `Undefined` and `Null` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOf {
    String,
    Number,
    Boolean,
    /// Records, instances and arrays.
    Object,
}

impl Validator for TypeOf {
    fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
        if value.is_nullish() {
            return None;
        }

        let (matches, name) = match self {
            Self::String => (matches!(value, Value::String(_)), "String"),
            Self::Number => (matches!(value, Value::Number(_)), "Number"),
            Self::Boolean => (matches!(value, Value::Bool(_)), "Boolean"),
            Self::Object => (value.is_object(), "Object"),
        };

        (!matches).then(|| ValidationError::new(format!("Value must be of type {name}"), path))
    }
}

// -----------------------------------------------------------------------------
// Pattern

crate::cfg::std! {
    use regex::Regex;

    /// Requires strings to match a regular expression. Other values pass.
    #[derive(Debug, Clone)]
    pub struct Pattern(Regex);

    impl Pattern {
        #[inline]
        pub fn new(regex: Regex) -> Self {
            Self(regex)
        }

        /// Compiles `pattern`.
        ///
        /// # Errors
        ///
        /// Fails on an invalid regular expression.
        pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
            Regex::new(pattern).map(Self)
        }
    }

    impl Validator for Pattern {
        fn validate(&self, value: &Value, path: &str) -> Option<ValidationError> {
            let text = value.as_str()?;

            (!self.0.is_match(text)).then(|| {
                ValidationError::new(
                    format!("Property does not match the regexp /{}/", self.0.as_str()),
                    path,
                )
            })
        }
    }
}
