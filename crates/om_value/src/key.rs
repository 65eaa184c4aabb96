use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;

// -----------------------------------------------------------------------------
// Symbol

/// A unique, non-textual property key.
///
/// The identity of a symbol is its address, so symbols are declared as
/// `static` items. Two symbols with the same description are still distinct.
///
/// # Examples
///
/// ```
/// use om_value::{Key, Symbol};
///
/// static A: Symbol = Symbol::new("tag");
/// static B: Symbol = Symbol::new("tag");
///
/// assert_eq!(Key::from(&A), Key::from(&A));
/// assert_ne!(Key::from(&A), Key::from(&B));
/// ```
#[derive(Debug)]
pub struct Symbol {
    description: &'static str,
}

impl Symbol {
    /// Creates a symbol with a human readable description.
    #[inline]
    pub const fn new(description: &'static str) -> Self {
        Self { description }
    }

    /// Returns the description given at declaration.
    #[inline]
    pub const fn description(&self) -> &'static str {
        self.description
    }
}

// -----------------------------------------------------------------------------
// Key

/// The key of a record entry or of a class property.
///
/// Raw data only ever carries [`Key::Name`] keys, [`Key::Symbol`] keys
/// can only live on instances.
#[derive(Clone)]
pub enum Key {
    /// A textual key.
    Name(Cow<'static, str>),
    /// A symbolic key, compared by identity.
    Symbol(&'static Symbol),
}

impl Key {
    /// Creates a textual key from a static string, usable in `const` items.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }

    /// Returns the text of a [`Key::Name`].
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Symbol(_) => None,
        }
    }

    /// Returns `true` for [`Key::Symbol`].
    #[inline]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Name(name) => {
                state.write_u8(0);
                name.as_ref().hash(state);
            }
            Self::Symbol(symbol) => {
                state.write_u8(1);
                ptr::hash(*symbol, state);
            }
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => fmt::Debug::fmt(name, f),
            Self::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
        }
    }
}

impl From<&'static str> for Key {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for Key {
    #[inline]
    fn from(value: String) -> Self {
        Self::Name(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Key {
    #[inline]
    fn from(value: Cow<'static, str>) -> Self {
        Self::Name(value)
    }
}

impl From<&'static Symbol> for Key {
    #[inline]
    fn from(value: &'static Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<&Key> for Key {
    #[inline]
    fn from(value: &Key) -> Self {
        value.clone()
    }
}
