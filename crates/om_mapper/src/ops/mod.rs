//! The mapping operations.
//!
//! Every operation reads declarations from a [`Registry`](crate::Registry)
//! and walks nested records, instances and arrays recursively.
//!
//! | Operation | From | To |
//! |-----------|------|----|
//! | [`create`] | partial data | instance, defaults kept for absent keys |
//! | [`deserialize`] | raw data | instance, through extractors |
//! | [`deserialize_array`] | raw array | instances |
//! | [`serialize`] | instance | raw record, through extractors |
//! | [`clone`] | instance | independent instance |

// -----------------------------------------------------------------------------
// Modules

mod clone;
mod create;
mod deserialize;
mod serialize;

// -----------------------------------------------------------------------------
// Exports

pub use clone::clone;
pub use create::create;
pub use deserialize::{deserialize, deserialize_array};
pub use serialize::{serialize, serialize_value};
