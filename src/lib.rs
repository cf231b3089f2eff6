//! A half edge data structure for polygon meshes with arbitrary cells.
//!
//! The central type is [`HalfEdgeMesh`]. It stores vertices, half edges and
//! cells (polygons with three or more vertices) in three id-keyed arenas and
//! offers editing operations that keep the mesh consistent:
//!
//! - adding and deleting cells,
//! - splitting edges and cells,
//! - collapsing edges,
//! - joining two cells and triangulating a cell.
//!
//! Operations that would break an invariant of the mesh refuse to do so and
//! leave the mesh unchanged. The `check_*` methods validate the whole data
//! structure and report the first problem found.
//!
//! On top of that, [`measure`] computes edge length and angle statistics,
//! [`algo::decimate`] runs batch edit passes over a mesh,
//! [`algo::quads`] subdivides it into quadrilaterals and [`io`] reads and
//! writes OFF files.
//!
//! ```
//! use hedge::{HalfEdgeMesh, VertexHandle, Handle};
//!
//! let mut mesh = HalfEdgeMesh::new();
//! let (a, b, c, d) = (
//!     VertexHandle::new(0),
//!     VertexHandle::new(1),
//!     VertexHandle::new(2),
//!     VertexHandle::new(3),
//! );
//! mesh.add_new_cell(&[a, b, c]).unwrap();
//! mesh.add_new_cell(&[b, d, c]).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.count_edges(), 5);
//! assert_eq!(mesh.count_boundary_edges(), 4);
//! assert!(mesh.check_all().is_ok());
//! ```

pub mod algo;
pub mod core;
pub mod handle;
#[cfg(feature = "io")]
pub mod io;
pub mod map;
pub mod math;
pub mod measure;

pub use self::{
    core::{
        Cell, ErrorInfo, Error, HalfEdge, HalfEdgeMesh, JoinRefusal, ManifoldInfo,
        OrientationInfo, SplitCellRefusal, TopologyChange, Vertex, DIMENSION,
    },
    handle::{hsize, CellHandle, HalfEdgeHandle, Handle, VertexHandle},
    math::Pos3Like,
};
