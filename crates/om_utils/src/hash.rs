//! Deterministic hashing for the `om_*` containers.
//!
//! Every map in the workspace hashes keys with [`FixedHashState`], a
//! `foldhash` state with a constant seed, so lookups never depend on
//! process-level randomness and `const` construction stays possible.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: FixedState = FixedState::with_seed(0x6F6D_5F6B_6579_7331);

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A zero-sized [`BuildHasher`] with a constant seed.
///
/// ```
/// use core::hash::BuildHasher;
/// use om_utils::hash::FixedHashState;
///
/// assert_eq!(
///     FixedHashState.hash_one("last_name"),
///     FixedHashState.hash_one("last_name"),
/// );
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] hashing with [`FixedHashState`].
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

pub use hashbrown::HashTable;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
