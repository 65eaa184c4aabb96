use alloc::borrow::Cow;

use thiserror::Error;

use crate::Class;

/// An error returned when a class refuses to be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot construct `{class}`: {reason}")]
pub struct ConstructError {
    class: &'static str,
    reason: Cow<'static, str>,
}

impl ConstructError {
    #[inline]
    pub fn new(class: Class, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            class: class.name(),
            reason: reason.into(),
        }
    }

    /// The class needs constructor arguments that were not provided.
    #[inline]
    pub fn missing_arguments(class: Class) -> Self {
        Self::new(class, "required constructor arguments are missing")
    }

    #[inline]
    pub const fn class_name(&self) -> &'static str {
        self.class
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
