#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use om_cfg as cfg;
pub use om_mapper as mapper;
pub use om_utils as utils;
pub use om_value as value;

pub mod prelude {
    //! The items needed to declare and map classes.

    pub use om_mapper::extract::{DeepPath, DeserializeOnly, OverrideName, SnakeCase, Straight, Transform};
    pub use om_mapper::validate::{NumberRange, Required, StringLength, TypeOf};
    pub use om_mapper::{MapError, MappedClass, MappedObject, Registry, ValidationError, Validator};
    pub use om_value::{AccessorInfo, FieldInfo, Instance, Key, Record, Symbol, Value, class, record};
}
