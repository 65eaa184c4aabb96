#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

pub mod cfg {
    om_cfg::define_alias! {
        #[cfg(feature = "std")] => std,
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

mod key;
mod serde;
mod value;

pub mod class;

// -----------------------------------------------------------------------------
// Exports

pub use class::{
    AccessorInfo, Class, ClassId, ClassInfo, ConstructError, FieldInfo, Getter, Initializer,
    Instance, Setter,
};
pub use key::{Key, Symbol};
pub use value::{Record, Value};
