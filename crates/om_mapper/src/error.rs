use om_value::{ConstructError, Key};
use thiserror::Error;

/// A configuration error raised by the mapping API.
///
/// Malformed input data never produces a `MapError`. Only misuse of the
/// declaration API, a non-array handed to
/// [`deserialize_array`](crate::deserialize_array), or a class that cannot
/// be constructed for [`create`](crate::create) does.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MapError {
    /// A case-converting extractor was bound to a symbolic key.
    #[error("snake case extraction needs a textual property key, got {0}")]
    NotStringPropertyKey(Key),
    /// Array deserialization was given something else.
    #[error("expected an array to deserialize, got {0}")]
    NotAnArray(&'static str),
    /// A constructor parameter position that the class does not name.
    #[error("class `{class}` has no constructor parameter at position {index}")]
    UnknownParameter { class: &'static str, index: usize },
    #[error(transparent)]
    Construct(#[from] ConstructError),
}
