//! Compile-time configuration aliases shared by the `om_*` crates.
//!
//! Each crate declares a `cfg` module through [`define_alias!`], turning a
//! `#[cfg(..)]` predicate into a function-like macro:
//!
//! ```
//! mod cfg {
//!     om_cfg::define_alias! {
//!         #[cfg(debug_assertions)] => debug,
//!         #[cfg(feature = "nonexistent")] => nothing,
//!     }
//! }
//!
//! cfg::nothing! {
//!     compile_error!("never expanded");
//! }
//!
//! let level = cfg::debug! {
//!     if { "debug" } else { "release" }
//! };
//! assert!(level == "debug" || level == "release");
//! assert!(!cfg::nothing!());
//! ```
#![no_std]

/// Expands the wrapped code unconditionally.
///
/// Used as the target of an alias whose predicate is active.
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($p)* } };
    ($($p:tt)*) => { $($p)* };
}

/// Discards the wrapped code.
///
/// Used as the target of an alias whose predicate is inactive.
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($n)* } };
    ($($p:tt)*) => {};
}

/// Declares one macro alias per `#[cfg(..)] => name` pair.
///
/// The generated macro supports three forms:
///
/// - `name!()` evaluates to `true` or `false`.
/// - `name! { items }` keeps or drops the items.
/// - `name! { if { .. } else { .. } }` picks one branch.
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $p:ident),* $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc = concat!("Active: `#[cfg(", stringify!($meta), ")]` holds for this build.")]
            pub use $crate::enabled as $p;

            #[cfg(not($meta))]
            #[doc = concat!("Inactive: `#[cfg(", stringify!($meta), ")]` does not hold for this build.")]
            pub use $crate::disabled as $p;
        )*
    };
}
