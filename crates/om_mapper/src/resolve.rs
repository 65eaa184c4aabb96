use alloc::borrow::Cow;

use om_value::{Class, Key, Value};
use thiserror::Error;

use crate::Registry;
use crate::registry::{TypeEntry, TypeMap};

// -----------------------------------------------------------------------------
// TypeResolveError

/// Reported by a conditional type resolver that cannot decide.
///
/// The resolver swallows it: the value is left unmapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot resolve the type of a nested value: {reason}")]
pub struct TypeResolveError {
    reason: Cow<'static, str>,
}

impl TypeResolveError {
    #[inline]
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

// -----------------------------------------------------------------------------
// TypeResolver

/// Decides which class governs the nested value of a property.
///
/// In order of precedence:
///
/// 1. a [`TypeEntry::Fixed`] declared for the property,
/// 2. a [`TypeEntry::Conditional`] declared for the property, evaluated
///    against the candidate value, where a failure means "no type",
/// 3. the declared class of the field, see [`FieldInfo::with_type`].
///
/// [`FieldInfo::with_type`]: om_value::FieldInfo::with_type
#[derive(Clone, Copy)]
pub struct TypeResolver<'r> {
    registry: &'r Registry,
    class: Class,
    types: Option<&'r TypeMap>,
}

impl<'r> TypeResolver<'r> {
    #[inline]
    pub fn new(registry: &'r Registry, class: Class) -> Self {
        Self {
            registry,
            class,
            types: registry.types(class),
        }
    }

    /// The class of `candidate`, the value of property `key`.
    pub fn resolve(&self, key: &Key, candidate: &Value) -> Option<Class> {
        match self.types.and_then(|types| types.get(key)) {
            Some(TypeEntry::Fixed(class)) => Some(*class),
            Some(TypeEntry::Conditional(resolve)) => match resolve(candidate) {
                Ok(class) => class,
                Err(error) => {
                    log::debug!(
                        "property `{key}` of `{}` is left unmapped: {error}",
                        self.class.name()
                    );
                    None
                }
            },
            None => self.class.declared_type(key),
        }
    }

    /// Like [`resolve`](Self::resolve), keeping only mapped classes.
    #[inline]
    pub fn resolve_mapped(&self, key: &Key, candidate: &Value) -> Option<Class> {
        self.resolve(key, candidate)
            .filter(|class| self.registry.is_mapped(*class))
    }
}
