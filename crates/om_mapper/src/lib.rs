#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    om_cfg::define_alias! {
        #[cfg(feature = "std")] => std,
        #[cfg(feature = "auto_register")] => auto_register,
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

// -----------------------------------------------------------------------------
// no_std support

crate::cfg::std! {
    extern crate std;
}

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod mapped;
mod resolve;

pub mod extract;
pub mod ops;
pub mod registry;
pub mod validate;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    crate::cfg::auto_register! {
        pub use inventory;
    }
}

pub use error::MapError;
pub use mapped::{MappedClass, MappedObject};
pub use ops::{clone, create, deserialize, deserialize_array, serialize, serialize_value};
pub use registry::Registry;
pub use resolve::{TypeResolveError, TypeResolver};
pub use validate::{ValidationError, Validator, validate};
