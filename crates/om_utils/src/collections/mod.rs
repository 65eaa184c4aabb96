//! Collection types.

mod ordered_map;

pub use ordered_map::{IntoIter, Iter, IterMut, OrderedMap};
