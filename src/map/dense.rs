use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{
        Indices, Iter as SvIter, Values as SvValues, ValuesMut as SvValuesMut,
    },
};

use crate::handle::{hsize, Handle};


/// A map from handles to elements that uses a simple contiguous vector to
/// store the elements.
///
/// The handle is simply used as an index into the underlying `StableVec`.
/// Removing an element leaves a hole; handles of other elements stay valid.
/// This is the arena in which a [`HalfEdgeMesh`][crate::HalfEdgeMesh] stores
/// all its vertices, half edges and cells.
///
/// # Memory requirements
///
/// The memory requirement of this map doesn't grow with the number of
/// elements stored inside this map, but rather with the highest handle ID.
/// Since meshes never reuse IDs, a mesh that is heavily edited will slowly
/// accumulate holes. That's fine for the typical editing session.
///
/// # Example
///
/// ```
/// use hedge::{
///     CellHandle,
///     handle::Handle,
///     map::DenseMap,
/// };
///
/// let mut map = DenseMap::new();
///
/// let c0 = CellHandle::new(0);
/// assert_eq!(map.get(c0), None);
/// map.insert(c0, "bob");
/// assert_eq!(map.get(c0), Some(&"bob"));
///
/// let c5 = CellHandle::new(5);
/// map.insert(c5, "lena");
/// assert_eq!(map.handles().collect::<Vec<_>>(), vec![c0, c5]);
/// ```
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Returns the number of elements in this map (not the highest handle).
    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Inserts `elem` at `handle`, growing the underlying storage if
    /// necessary. Returns the element previously stored there, if any.
    pub fn insert(&mut self, handle: H, elem: T) -> Option<T> {
        let idx = handle.to_usize();
        self.vec.reserve_for(idx);
        self.vec.insert(idx, elem)
    }

    pub fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.to_usize();
        if idx >= self.vec.capacity() {
            return None;
        }

        self.vec.remove(idx)
    }

    /// Returns the highest handle that currently has an element.
    pub fn last_handle(&self) -> Option<H> {
        self.vec.find_last_index().map(H::from_usize)
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    /// Iterates over all `(handle, element)` pairs in ascending handle order.
    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter::new(self)
    }

    /// Iterates over all handles in ascending order.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles::new(self)
    }

    pub fn values(&self) -> Values<'_, H, T> {
        Values::new(self)
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, H, T> {
        ValuesMut::new(self)
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.vec.indices().map(|k| (H::from_usize(k), &self.vec[k])))
            .finish()
    }
}


// ===== Iterator wrappers =======================================================================

/// This macro generates an iterator wrapper. The usage is kinda awkward, but
/// this way we can avoid duplicate code.
macro_rules! gen_iter_wrapper {
    (
        $name:ident, $sv_name:ident, $iter_method:ident, [$($mutable:ident)?], [$($clone:ident)?],
        |$lt:tt, $h:ident, $t:ident| $item:ty,
        [$($mapping:tt)*] $(,)?
    ) => {
        #[derive(Debug, $($clone)?)]
        pub struct $name<$lt, $h: Handle, $t> {
            iter: $sv_name<$lt, $t, DefaultCore<$t>>,
            _dummy: PhantomData<&$lt $h>,
        }

        impl<$lt, $h: Handle, $t> $name<$lt, $h, $t> {
            fn new(map: &$lt $($mutable)? DenseMap<$h, $t>) -> Self {
                Self {
                    iter: map.vec.$iter_method(),
                    _dummy: PhantomData,
                }
            }
        }

        impl<$lt, $h: Handle, $t> Iterator for $name<$lt, $h, $t> {
            type Item = $item;
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next() $($mapping)*
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }

            fn count(self) -> usize {
                self.iter.count()
            }
        }

        impl<$lt, $h: Handle, $t> DoubleEndedIterator for $name<$lt, $h, $t> {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back() $($mapping)*
            }
        }

        impl<$lt, $h: Handle, $t> ExactSizeIterator for $name<$lt, $h, $t> {
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl<$lt, $h: Handle, $t> FusedIterator for $name<$lt, $h, $t> {}
    };
}

gen_iter_wrapper!(
    Iter, SvIter, iter, [], [Clone],
    |'map, H, T| (H, &'map T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(Handles, Indices, indices, [], [Clone], |'map, H, T| H, [.map(H::from_usize)]);
gen_iter_wrapper!(Values, SvValues, values, [], [Clone], |'map, H, T| &'map T, []);
gen_iter_wrapper!(ValuesMut, SvValuesMut, values_mut, [mut], [], |'map, H, T| &'map mut T, []);
