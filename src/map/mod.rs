//! Storage for mesh elements and sets of handles.
//!
//! - [`DenseMap`] is the arena used by the mesh itself: elements are stored
//!   in a vector indexed by handle ID.
//! - [`HandleSet`] is a small hash set used by algorithms to mark visited
//!   elements without storing a flag inside the elements themselves.

use std::{
    collections::HashSet,
    fmt,
};

use crate::handle::Handle;


mod dense;

pub use self::dense::{DenseMap, Handles, Iter, Values, ValuesMut};


/// A set of handles, e.g. to remember which elements were already visited.
///
/// This implementation currently uses `ahash` as the hash function, which is
/// fast for integer keys while still being resistant against bad key
/// patterns.
#[derive(Clone)]
pub struct HandleSet<H: Handle>(HashSet<H, ahash::RandomState>);

impl<H: Handle> HandleSet<H> {
    pub fn new() -> Self {
        HandleSet(HashSet::default())
    }

    /// Creates an empty set with memory for `cap` many handles.
    pub fn with_capacity(cap: usize) -> Self {
        HandleSet(HashSet::with_capacity_and_hasher(cap, Default::default()))
    }

    /// Adds `handle` to the set. Returns `true` if it was not yet contained.
    pub fn insert(&mut self, handle: H) -> bool {
        self.0.insert(handle)
    }

    /// Removes `handle` from the set. Returns `true` if it was contained.
    pub fn remove(&mut self, handle: H) -> bool {
        self.0.remove(&handle)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.0.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<H: Handle> Default for HandleSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> Extend<H> for HandleSet<H> {
    fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<H: Handle> std::iter::FromIterator<H> for HandleSet<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<H: Handle> fmt::Debug for HandleSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut handles = self.0.iter().collect::<Vec<_>>();
        handles.sort();
        f.debug_set().entries(handles).finish()
    }
}
