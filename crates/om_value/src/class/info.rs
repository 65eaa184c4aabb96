use core::fmt;
use core::ptr;

use crate::{ConstructError, Instance, Key, Symbol, Value};

// -----------------------------------------------------------------------------
// Aliases

/// A class handle. Classes are `static` descriptors compared by address.
pub type Class = &'static ClassInfo;

/// Reads a computed property.
pub type Getter = fn(&Instance) -> Value;

/// Writes a computed property.
pub type Setter = fn(&mut Instance, Value);

/// Runs at construction, after all field defaults are installed.
pub type Initializer = fn(&mut Instance) -> Result<(), ConstructError>;

// -----------------------------------------------------------------------------
// ClassId

/// The identity of a class, derived from the descriptor's address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

// -----------------------------------------------------------------------------
// FieldInfo

/// A plain data field declared by a class.
///
/// A field with a default is installed as an own entry on every new
/// instance. A field without a default only carries a declared type.
#[derive(Debug)]
pub struct FieldInfo {
    key: Key,
    default: Option<fn() -> Value>,
    declared: Option<Class>,
}

impl FieldInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            key: Key::from_static(name),
            default: None,
            declared: None,
        }
    }

    #[inline]
    pub const fn symbol(symbol: &'static Symbol) -> Self {
        Self {
            key: Key::Symbol(symbol),
            default: None,
            declared: None,
        }
    }

    /// Sets the value installed on construction.
    #[inline]
    pub const fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the declared class of the field, used for type inference.
    #[inline]
    pub const fn with_type(mut self, class: Class) -> Self {
        self.declared = Some(class);
        self
    }

    #[inline]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    /// Produces a fresh default value, if any.
    #[inline]
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|default| default())
    }

    #[inline]
    pub const fn declared_type(&self) -> Option<Class> {
        self.declared
    }
}

// -----------------------------------------------------------------------------
// AccessorInfo

/// A computed property, either half may be absent.
#[derive(Debug)]
pub struct AccessorInfo {
    key: Key,
    get: Option<Getter>,
    set: Option<Setter>,
}

impl AccessorInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            key: Key::from_static(name),
            get: None,
            set: None,
        }
    }

    #[inline]
    pub const fn symbol(symbol: &'static Symbol) -> Self {
        Self {
            key: Key::Symbol(symbol),
            get: None,
            set: None,
        }
    }

    #[inline]
    pub const fn with_getter(mut self, get: Getter) -> Self {
        self.get = Some(get);
        self
    }

    #[inline]
    pub const fn with_setter(mut self, set: Setter) -> Self {
        self.set = Some(set);
        self
    }

    #[inline]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub const fn getter(&self) -> Option<Getter> {
        self.get
    }

    #[inline]
    pub const fn setter(&self) -> Option<Setter> {
        self.set
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// The static description of a class.
///
/// Prefer the [`class!`](crate::class) macro, which takes care of placing
/// the member slices in `static` storage.
pub struct ClassInfo {
    name: &'static str,
    parent: Option<Class>,
    fields: &'static [FieldInfo],
    accessors: &'static [AccessorInfo],
    params: &'static [&'static str],
    init: Option<Initializer>,
}

impl ClassInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            fields: &[],
            accessors: &[],
            params: &[],
            init: None,
        }
    }

    #[inline]
    pub const fn extends(mut self, parent: Class) -> Self {
        self.parent = Some(parent);
        self
    }

    #[inline]
    pub const fn with_fields(mut self, fields: &'static [FieldInfo]) -> Self {
        self.fields = fields;
        self
    }

    #[inline]
    pub const fn with_accessors(mut self, accessors: &'static [AccessorInfo]) -> Self {
        self.accessors = accessors;
        self
    }

    /// Names the constructor parameters, by position.
    #[inline]
    pub const fn with_params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    #[inline]
    pub const fn with_init(mut self, init: Initializer) -> Self {
        self.init = Some(init);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn parent(&self) -> Option<Class> {
        self.parent
    }

    /// Fields declared by this class only.
    #[inline]
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    /// Accessors declared by this class only.
    #[inline]
    pub const fn accessors(&self) -> &'static [AccessorInfo] {
        self.accessors
    }

    #[inline]
    pub const fn initializer(&self) -> Option<Initializer> {
        self.init
    }

    #[inline]
    pub fn id(&self) -> ClassId {
        ClassId(ptr::from_ref(self) as usize)
    }

    /// Iterates the class itself, then its parent, up to the root.
    pub fn ancestors(&'static self) -> impl Iterator<Item = Class> + Clone {
        core::iter::successors(Some(self), |class| class.parent)
    }

    /// Returns `true` when `other` is this class or one of its ancestors.
    pub fn is_subclass_of(&'static self, other: Class) -> bool {
        self.ancestors().any(|class| ptr::eq(class, other))
    }

    /// Finds a field declaration along the lineage, nearest first.
    pub fn field(&'static self, key: &Key) -> Option<&'static FieldInfo> {
        self.ancestors()
            .find_map(|class| class.fields.iter().find(|field| field.key == *key))
    }

    /// Finds an accessor declaration along the lineage, nearest first.
    pub fn accessor(&'static self, key: &Key) -> Option<&'static AccessorInfo> {
        self.ancestors()
            .find_map(|class| class.accessors.iter().find(|accessor| accessor.key == *key))
    }

    /// The declared class of a field, if the field names one.
    pub fn declared_type(&'static self, key: &Key) -> Option<Class> {
        self.field(key).and_then(FieldInfo::declared_type)
    }

    /// The name of the constructor parameter at `index`.
    ///
    /// Only this class's own parameter list is consulted.
    #[inline]
    pub fn param(&self, index: usize) -> Option<&'static str> {
        self.params.get(index).copied()
    }
}

impl PartialEq for ClassInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for ClassInfo {}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("parent", &self.parent.map(ClassInfo::name))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ClassInfo {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
