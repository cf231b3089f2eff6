//! Handles to refer to vertices, half edges and cells of a mesh.
//!
//! A handle is just a thin wrapper around an integer ID. IDs are handed out by
//! the mesh and are never reused after the element they refer to has been
//! removed. That way, handles stored somewhere outside of the mesh never
//! silently start to point to a different element.

use std::fmt;

use static_assertions::assert_eq_size;


/// The integer type used to store handle IDs.
///
/// By default this is `u32`, which is sufficient for meshes with up to four
/// billion elements of each kind. Enable the `large-handle` feature to use
/// `u64` instead.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// Types that are handles to some mesh element.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + std::hash::Hash {
    /// Creates a handle from the given ID.
    fn new(id: hsize) -> Self;

    /// Returns the ID of this handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function panics.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(raw <= hsize::max_value() as usize, "handle index {} is too large", raw);
        Self::new(raw as hsize)
    }

    /// Helper method to get the ID as a usize directly from an handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}


macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident, $short:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(id: hsize) -> Self {
                $name(id)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl From<hsize> for $name {
            fn from(id: hsize) -> Self {
                $name(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx())
            }
        }

        /// Displays only the bare ID (as used in file formats and messages).
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                self.idx().fmt(f)
            }
        }

        assert_eq_size!($name, hsize);
    }
}

make_handle_type!(
    /// A handle that is associated with a vertex.
    VertexHandle, "V"
);
make_handle_type!(
    /// A handle that is associated with a directed half edge.
    HalfEdgeHandle, "HE"
);
make_handle_type!(
    /// A handle that is associated with a polygonal cell.
    CellHandle, "C"
);
