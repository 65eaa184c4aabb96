use super::Registry;
use crate::MapError;

/// A declaration function collected at link time.
///
/// Submit one with [`submit_declaration!`](crate::submit_declaration) and
/// run all of them with [`Registry::auto_register`].
pub struct ClassDeclaration {
    declare: fn(&mut Registry) -> Result<(), MapError>,
}

impl ClassDeclaration {
    #[inline]
    pub const fn new(declare: fn(&mut Registry) -> Result<(), MapError>) -> Self {
        Self { declare }
    }

    #[inline]
    pub(crate) fn run(&self, registry: &mut Registry) -> Result<(), MapError> {
        (self.declare)(registry)
    }
}

inventory::collect!(ClassDeclaration);

/// Collects a declaration function for [`Registry::auto_register`].
///
/// ```
/// use om_mapper::{MapError, Registry, submit_declaration};
/// use om_value::class;
///
/// class! {
///     static TAG = "Tag" {}
/// }
///
/// fn declare_tag(registry: &mut Registry) -> Result<(), MapError> {
///     registry.declare(&TAG).property("label")?;
///     Ok(())
/// }
///
/// submit_declaration!(declare_tag);
///
/// fn main() {
///     let mut registry = Registry::new();
///     assert!(registry.auto_register().unwrap());
///     assert!(registry.is_mapped(&TAG));
/// }
/// ```
#[macro_export]
macro_rules! submit_declaration {
    ($declare:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ClassDeclaration::new($declare)
        }
    };
}

pub(super) fn run_all(registry: &mut Registry) -> Result<(), MapError> {
    for declaration in inventory::iter::<ClassDeclaration> {
        declaration.run(registry)?;
    }
    Ok(())
}
