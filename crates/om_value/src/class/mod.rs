//! Static class descriptors and their instances.
//!
//! A class is a `static` [`ClassInfo`]: a name, an optional parent, data
//! fields with defaults, computed accessors, constructor parameter names and
//! an optional initializer. Lineage is a chain of `parent` links.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod info;
mod instance;

// -----------------------------------------------------------------------------
// Exports

pub use error::ConstructError;
pub use info::{AccessorInfo, Class, ClassId, ClassInfo, FieldInfo, Getter, Initializer, Setter};
pub use instance::Instance;

/// Declares a `static` [`ClassInfo`].
///
/// Member lists are placed in their own `static` items so the descriptor can
/// borrow them for `'static`. Sections are optional but keep this order:
/// `fields`, `accessors`, `params`, `init`.
///
/// ```
/// use om_value::{class, FieldInfo, Instance, Value};
///
/// class! {
///     pub static ANIMAL = "Animal" {
///         fields: [FieldInfo::new("legs").with_default(|| Value::from(4))],
///     }
/// }
///
/// class! {
///     static BIRD = "Bird" extends ANIMAL {
///         fields: [FieldInfo::new("legs").with_default(|| Value::from(2))],
///         params: ["species"],
///     }
/// }
///
/// let bird = Instance::new(&BIRD).unwrap();
/// assert_eq!(bird.get("legs"), Value::from(2));
/// assert!(bird.is_instance_of(&ANIMAL));
/// assert_eq!(BIRD.param(0), Some("species"));
/// ```
#[macro_export]
macro_rules! class {
    (
        $(#[$attr:meta])*
        $vis:vis static $ident:ident = $name:literal $(extends $parent:path)? {
            $(fields: [$($field:expr),* $(,)?] $(,)?)?
            $(accessors: [$($accessor:expr),* $(,)?] $(,)?)?
            $(params: [$($param:literal),* $(,)?] $(,)?)?
            $(init: $init:expr $(,)?)?
        }
    ) => {
        $(#[$attr])*
        $vis static $ident: $crate::ClassInfo = {
            let info = $crate::ClassInfo::new($name);
            $(let info = info.extends(&$parent);)?
            $(let info = info.with_fields({
                static FIELDS: &[$crate::FieldInfo] = &[$($field),*];
                FIELDS
            });)?
            $(let info = info.with_accessors({
                static ACCESSORS: &[$crate::AccessorInfo] = &[$($accessor),*];
                ACCESSORS
            });)?
            $(let info = info.with_params({
                static PARAMS: &[&str] = &[$($param),*];
                PARAMS
            });)?
            $(let info = info.with_init($init);)?
            info
        };
    };
}
