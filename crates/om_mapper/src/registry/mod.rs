//! Per-class mapping declarations.
//!
//! A [`Registry`] holds three stores keyed by class identity:
//!
//! - properties: the mapped properties with their extractors,
//! - types: explicit classes of nested values,
//! - validators: rules checked by [`validate`](crate::validate).
//!
//! Declarations are inherited. Looking up a class that declared nothing
//! yields the data of its nearest declared ancestor, and a subclass that
//! declares something sees its ancestors' declarations merged below its own.
//!
//! # Example
//!
//! ```
//! use om_mapper::Registry;
//! use om_mapper::extract::SnakeCase;
//! use om_mapper::validate::Required;
//! use om_value::{class, Key};
//!
//! class! { static BASE = "Base" {} }
//! class! { static SUB = "Sub" extends BASE {} }
//!
//! let mut registry = Registry::new();
//! registry
//!     .declare(&BASE)
//!     .property("id")?
//!     .validator("id", Required);
//! registry
//!     .declare(&SUB)
//!     .property_with("createdAt", SnakeCase::new())?;
//!
//! let keys: Vec<_> = registry.properties(&SUB).unwrap().keys().cloned().collect();
//! assert_eq!(keys, [Key::from("id"), Key::from("createdAt")]);
//! assert_eq!(registry.properties(&BASE).unwrap().len(), 1);
//! # Ok::<(), om_mapper::MapError>(())
//! ```

// -----------------------------------------------------------------------------
// Modules

mod class_map;
mod property;
mod store;
mod types;
mod validators;

// Plain `#[cfg]`: `submit_declaration!` is named by path inside the crate.
#[cfg(feature = "auto_register")]
mod auto_register;

#[cfg(feature = "auto_register")]
pub use auto_register::ClassDeclaration;

// -----------------------------------------------------------------------------
// Exports

pub use class_map::ClassMap;
pub use property::{Access, PropertyEntry, PropertyMap};
pub use store::{ClassData, ClassStore};
pub use types::{ConditionalFn, TypeEntry, TypeMap};
pub use validators::ValidatorMap;

use alloc::sync::Arc;

use om_value::{Class, Key, Value};

use crate::extract::{ExtractorFactory, Straight};
use crate::{MapError, TypeResolveError, Validator};

// -----------------------------------------------------------------------------
// Registry

/// The store of all mapping declarations.
///
/// Declarations happen once, before any mapping. Mapping operations only
/// borrow the registry immutably.
#[derive(Default)]
pub struct Registry {
    properties: ClassStore<PropertyMap>,
    types: ClassStore<TypeMap>,
    validators: ClassStore<ValidatorMap>,
    auto_registered: bool,
}

impl Registry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            properties: ClassStore::new(),
            types: ClassStore::new(),
            validators: ClassStore::new(),
            auto_registered: false,
        }
    }

    /// Starts a fluent declaration block for `class`.
    #[inline]
    pub fn declare(&mut self, class: Class) -> ClassDeclarer<'_> {
        ClassDeclarer {
            registry: self,
            class,
        }
    }

    /// Maps the property `key` of `class` with the extractor built by `factory`.
    ///
    /// Redeclaring a property replaces its extractor.
    ///
    /// # Errors
    ///
    /// Fails when the factory rejects the key.
    pub fn register_property(
        &mut self,
        class: Class,
        key: impl Into<Key>,
        factory: &dyn ExtractorFactory,
    ) -> Result<(), MapError> {
        let key = key.into();
        let extractor = factory.build(&key)?;

        crate::cfg::debug! {
            log::trace!("map property `{key}` of `{}`", class.name());
        }

        self.properties.declare(class, |map| map.insert(key, extractor));
        Ok(())
    }

    /// Maps the constructor parameter at `index`, by its declared name.
    ///
    /// # Errors
    ///
    /// Fails when `class` names no parameter at `index`, or when the factory
    /// rejects the key.
    pub fn register_param(
        &mut self,
        class: Class,
        index: usize,
        factory: &dyn ExtractorFactory,
    ) -> Result<(), MapError> {
        let name = param_name(class, index)?;
        self.register_property(class, name, factory)
    }

    /// Declares the class of nested values of property `key`.
    pub fn register_type(&mut self, class: Class, key: impl Into<Key>, entry: TypeEntry) {
        let key = key.into();
        self.types.declare(class, |map| map.insert(key, entry));
    }

    /// Appends validators to property `key`.
    pub fn register_validators(
        &mut self,
        class: Class,
        key: impl Into<Key>,
        validators: impl IntoIterator<Item = Arc<dyn Validator>>,
    ) {
        let key = key.into();
        self.validators
            .declare(class, |map| map.extend(key, validators));
    }

    /// Appends validators to the constructor parameter at `index`.
    ///
    /// # Errors
    ///
    /// Fails when `class` names no parameter at `index`.
    pub fn register_param_validators(
        &mut self,
        class: Class,
        index: usize,
        validators: impl IntoIterator<Item = Arc<dyn Validator>>,
    ) -> Result<(), MapError> {
        let name = param_name(class, index)?;
        self.register_validators(class, name, validators);
        Ok(())
    }

    /// The effective mapped properties of `class`.
    ///
    /// `None` when neither the class nor an ancestor mapped anything.
    #[inline]
    pub fn properties(&self, class: Class) -> Option<&PropertyMap> {
        self.properties.resolve(class)
    }

    /// The effective explicit types of `class`.
    #[inline]
    pub fn types(&self, class: Class) -> Option<&TypeMap> {
        self.types.resolve(class)
    }

    /// The effective validators of `class`.
    #[inline]
    pub fn validators(&self, class: Class) -> Option<&ValidatorMap> {
        self.validators.resolve(class)
    }

    /// Returns `true` if `class` has at least one mapped property.
    #[inline]
    pub fn is_mapped(&self, class: Class) -> bool {
        self.properties(class).is_some_and(|map| !map.is_empty())
    }

    /// Runs every declaration submitted with
    /// [`submit_declaration!`](crate::submit_declaration), once.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    ///
    /// # Errors
    ///
    /// Stops at the first failing declaration.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> Result<bool, MapError> {
        crate::cfg::auto_register! {
            if {
                if !self.auto_registered {
                    auto_register::run_all(self)?;
                    self.auto_registered = true;
                }
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }
}

fn param_name(class: Class, index: usize) -> Result<&'static str, MapError> {
    class.param(index).ok_or(MapError::UnknownParameter {
        class: class.name(),
        index,
    })
}

// -----------------------------------------------------------------------------
// ClassDeclarer

/// Fluent declarations for one class, see [`Registry::declare`].
pub struct ClassDeclarer<'r> {
    registry: &'r mut Registry,
    class: Class,
}

impl ClassDeclarer<'_> {
    /// Maps `key` with the [`Straight`] extractor.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_property`].
    #[inline]
    pub fn property(&mut self, key: impl Into<Key>) -> Result<&mut Self, MapError> {
        self.property_with(key, Straight::new())
    }

    /// Maps `key` with the extractor built by `factory`.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_property`].
    pub fn property_with(
        &mut self,
        key: impl Into<Key>,
        factory: impl ExtractorFactory,
    ) -> Result<&mut Self, MapError> {
        self.registry.register_property(self.class, key, &factory)?;
        Ok(self)
    }

    /// Maps the constructor parameter at `index` with the [`Straight`] extractor.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_param`].
    #[inline]
    pub fn param(&mut self, index: usize) -> Result<&mut Self, MapError> {
        self.param_with(index, Straight::new())
    }

    /// Maps the constructor parameter at `index` with the extractor built by `factory`.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_param`].
    pub fn param_with(
        &mut self,
        index: usize,
        factory: impl ExtractorFactory,
    ) -> Result<&mut Self, MapError> {
        self.registry.register_param(self.class, index, &factory)?;
        Ok(self)
    }

    /// Nested values of `key` map to `class`.
    pub fn ty(&mut self, key: impl Into<Key>, class: Class) -> &mut Self {
        self.registry
            .register_type(self.class, key, TypeEntry::Fixed(class));
        self
    }

    /// Nested values of `key` map to the class returned by `f`, if any.
    pub fn conditional_ty(
        &mut self,
        key: impl Into<Key>,
        f: impl Fn(&Value) -> Option<Class> + Send + Sync + 'static,
    ) -> &mut Self {
        self.registry
            .register_type(self.class, key, TypeEntry::conditional(f));
        self
    }

    /// Like [`conditional_ty`](Self::conditional_ty), with a resolver that
    /// may fail. A failure leaves the value unmapped.
    pub fn try_conditional_ty(
        &mut self,
        key: impl Into<Key>,
        f: impl Fn(&Value) -> Result<Option<Class>, TypeResolveError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.registry
            .register_type(self.class, key, TypeEntry::try_conditional(f));
        self
    }

    /// Appends one validator to `key`.
    pub fn validator(&mut self, key: impl Into<Key>, validator: impl Validator) -> &mut Self {
        let validator: Arc<dyn Validator> = Arc::new(validator);
        self.registry.register_validators(self.class, key, [validator]);
        self
    }

    /// Appends validators to `key`.
    pub fn validators(
        &mut self,
        key: impl Into<Key>,
        validators: impl IntoIterator<Item = Arc<dyn Validator>>,
    ) -> &mut Self {
        self.registry
            .register_validators(self.class, key, validators);
        self
    }

    /// Appends validators to the constructor parameter at `index`.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_param_validators`].
    pub fn param_validators(
        &mut self,
        index: usize,
        validators: impl IntoIterator<Item = Arc<dyn Validator>>,
    ) -> Result<&mut Self, MapError> {
        self.registry
            .register_param_validators(self.class, index, validators)?;
        Ok(self)
    }
}
