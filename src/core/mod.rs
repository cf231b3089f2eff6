//! The half edge mesh: element records, accessors and counts.
//!
//! The actual editing operations live in submodules, but they are all
//! inherent methods of [`HalfEdgeMesh`]:
//!
//! - `edit`: structural mutators (`add_cell`, `split_edge`, `collapse_edge`,
//!   `split_cell`, `join_two_cells`, ...),
//! - `predicates`: legality and topology change oracles,
//! - `check`: consistency checkers,
//! - `kernel`: the low level link/unlink primitives (crate private).

// # Some notes for developers about this implementation
//
// - All relations are stored as handles which are resolved through the three
//   `DenseMap`s. Records never store their own ID; the ID is the key in the
//   map.
// - Every half edge is part of two cycles: the cycle of half edges around its
//   cell (`next`/`prev`) and the cycle of half edges around its edge
//   (`next_around_edge`). A boundary half edge is the only member of its
//   around-edge cycle, i.e. it points to itself.
// - Every walk over one of those cycles is bounded (usually by the number of
//   outgoing half edges of both endpoints). A corrupted mesh can thus lead to
//   wrong results, but never to an endless loop.
// - IDs are handed out by the high-water counters below and are never reused.

use std::{
    cmp,
    fmt,
    ops,
};

use cgmath::Point3;
use failure::Fail;
use optional::Optioned as Opt;
use smallvec::SmallVec;

use crate::{
    handle::{hsize, CellHandle, HalfEdgeHandle, Handle, VertexHandle},
    map::{DenseMap, HandleSet, Handles},
};


mod check;
mod edit;
mod kernel;
mod predicates;
#[cfg(test)]
mod tests;

pub use self::{
    check::{ErrorInfo, ManifoldInfo, OrientationInfo},
    predicates::{JoinRefusal, SplitCellRefusal, TopologyChange},
};


/// Number of coordinates per vertex.
pub const DIMENSION: usize = 3;


// ===============================================================================================
// ===== Error
// ===============================================================================================

/// Programming contract violations reported by the mutators of
/// [`HalfEdgeMesh`].
///
/// Requests that are well formed but would break a mesh invariant (e.g. an
/// illegal edge collapse) are *not* errors: those operations return `Ok(None)`
/// and leave the mesh untouched.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "vertex {} does not exist", _0)]
    UnknownVertex(VertexHandle),

    #[fail(display = "half edge {} does not exist", _0)]
    UnknownHalfEdge(HalfEdgeHandle),

    #[fail(display = "cell {} does not exist", _0)]
    UnknownCell(CellHandle),

    #[fail(display = "vertex {} already exists", _0)]
    VertexExists(VertexHandle),

    #[fail(display = "cell {} already exists", _0)]
    CellExists(CellHandle),

    #[fail(display = "a cell needs 3 or more vertices, but {} were given", _0)]
    TooFewCellVertices(usize),

    #[fail(display = "coordinate index {} is out of bounds (dimension is 3)", _0)]
    CoordIndexOutOfRange(usize),

    #[fail(
        display = "cannot split cell {} with {} vertices into quadrilaterals",
        cell,
        num_vertices
    )]
    CannotSplitIntoQuads {
        cell: CellHandle,
        num_vertices: hsize,
    },

    #[fail(display = "mesh data structure is corrupted: {}", _0)]
    Corrupted(String),
}


// ===============================================================================================
// ===== Element records
// ===============================================================================================

/// Data stored per vertex.
#[derive(Clone)]
pub struct Vertex {
    position: Point3<f32>,

    /// All half edges whose `from` vertex is this vertex. If any of those is
    /// a boundary half edge, the first one is a boundary half edge.
    outgoing: SmallVec<[HalfEdgeHandle; 6]>,
}

impl Vertex {
    fn new() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            outgoing: SmallVec::new(),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Returns all outgoing half edges. The first one is a boundary half edge
    /// if the vertex is incident to any boundary half edge.
    pub fn outgoing(&self) -> &[HalfEdgeHandle] {
        &self.outgoing
    }

    pub fn num_outgoing(&self) -> usize {
        self.outgoing.len()
    }

    /// Returns `true` if no half edge starts at this vertex.
    pub fn is_isolated(&self) -> bool {
        self.outgoing.is_empty()
    }
}

/// Data stored per half edge.
#[derive(Clone, Copy)]
pub struct HalfEdge {
    /// The vertex this half edge starts at. The target vertex is the `from`
    /// vertex of `next`.
    from: VertexHandle,

    /// Next half edge in the cell.
    next: HalfEdgeHandle,

    /// Previous half edge in the cell.
    prev: HalfEdgeHandle,

    /// Next half edge in the cycle of all half edges with the same endpoints.
    /// Points to the half edge itself for boundary half edges.
    next_around_edge: HalfEdgeHandle,

    cell: CellHandle,
}

impl HalfEdge {
    /// A half edge that is linked only with itself (in both cycles).
    fn self_linked(id: HalfEdgeHandle, cell: CellHandle, from: VertexHandle) -> Self {
        Self {
            from,
            next: id,
            prev: id,
            next_around_edge: id,
            cell,
        }
    }

    pub fn from(&self) -> VertexHandle {
        self.from
    }

    pub fn next(&self) -> HalfEdgeHandle {
        self.next
    }

    pub fn prev(&self) -> HalfEdgeHandle {
        self.prev
    }

    pub fn next_around_edge(&self) -> HalfEdgeHandle {
        self.next_around_edge
    }

    pub fn cell(&self) -> CellHandle {
        self.cell
    }
}

/// Data stored per cell (polygon).
#[derive(Clone, Copy)]
pub struct Cell {
    /// One arbitrary half edge of the cell.
    half_edge: HalfEdgeHandle,

    /// Number of vertices, equal to the number of half edges in the cell.
    num_vertices: hsize,
}

impl Cell {
    pub fn half_edge(&self) -> HalfEdgeHandle {
        self.half_edge
    }

    pub fn num_vertices(&self) -> hsize {
        self.num_vertices
    }

    pub fn is_triangle(&self) -> bool {
        self.num_vertices == 3
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ position: [{}, {}, {}], outgoing: {:?} }}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.outgoing.as_slice(),
        )
    }
}

impl fmt::Debug for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HalfEdge {{ from: {:5} next: {:6} prev: {:6} around: {:6} cell: {:?} }}",
            format!("{:?},", self.from),
            format!("{:?},", self.next),
            format!("{:?},", self.prev),
            format!("{:?},", self.next_around_edge),
            self.cell,
        )
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell {{ half_edge: {:?}, num_vertices: {} }}", self.half_edge, self.num_vertices)
    }
}


// ===============================================================================================
// ===== The mesh
// ===============================================================================================

/// A polygon mesh stored as *half edge* data structure.
///
/// Each cell is bounded by a cycle of half edges. In contrast to the classic
/// half edge mesh, an edge is not represented by a pair of twins but by the
/// cycle of *all* half edges with the same two endpoints (`next_around_edge`).
/// This allows non-manifold edges (incident to more than two cells) and
/// inconsistently oriented cells. Those can be detected by
/// [`check_manifold`][HalfEdgeMesh::check_manifold] and
/// [`check_orientation`][HalfEdgeMesh::check_orientation].
///
/// # Example
///
/// ```
/// use hedge::HalfEdgeMesh;
///
/// let mut mesh = HalfEdgeMesh::new();
/// mesh.add_vertices(4);
/// let v = mesh.vertex_handles().collect::<Vec<_>>();
/// mesh.add_new_cell(&[v[0], v[1], v[2], v[3]])?;
///
/// assert_eq!(mesh.num_cells(), 1);
/// assert_eq!(mesh.count_boundary_edges(), 4);
/// assert!(mesh.check_all().is_ok());
/// # Ok::<(), hedge::Error>(())
/// ```
#[derive(Clone)]
pub struct HalfEdgeMesh {
    vertices: DenseMap<VertexHandle, Vertex>,
    half_edges: DenseMap<HalfEdgeHandle, HalfEdge>,
    cells: DenseMap<CellHandle, Cell>,

    /// High-water marks of issued IDs. `none` means no ID was issued yet.
    max_vertex: Opt<hsize>,
    max_half_edge: Opt<hsize>,
    max_cell: Opt<hsize>,
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HalfEdgeMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HalfEdgeMesh")
            .field("vertices", &self.vertices)
            .field("half_edges", &self.half_edges)
            .field("cells", &self.cells)
            .finish()
    }
}

impl ops::Index<VertexHandle> for HalfEdgeMesh {
    type Output = Vertex;
    fn index(&self, v: VertexHandle) -> &Self::Output {
        &self.vertices[v]
    }
}

impl ops::Index<HalfEdgeHandle> for HalfEdgeMesh {
    type Output = HalfEdge;
    fn index(&self, he: HalfEdgeHandle) -> &Self::Output {
        &self.half_edges[he]
    }
}

impl ops::Index<CellHandle> for HalfEdgeMesh {
    type Output = Cell;
    fn index(&self, c: CellHandle) -> &Self::Output {
        &self.cells[c]
    }
}

/// Raises the high-water mark `counter` to at least `id`.
fn raise_counter(counter: &mut Opt<hsize>, id: hsize) {
    *counter = Opt::some(counter.into_option().map_or(id, |old| cmp::max(old, id)));
}

/// Returns the first ID above the high-water mark `counter`.
fn next_id(counter: Opt<hsize>) -> hsize {
    counter.into_option().map_or(0, |max| max + 1)
}

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: DenseMap::new(),
            half_edges: DenseMap::new(),
            cells: DenseMap::new(),
            max_vertex: Opt::none(),
            max_half_edge: Opt::none(),
            max_cell: Opt::none(),
        }
    }

    // ----- Element access ----------------------------------------------------------------------

    pub fn vertex(&self, v: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    pub fn half_edge(&self, he: HalfEdgeHandle) -> Option<&HalfEdge> {
        self.half_edges.get(he)
    }

    pub fn cell(&self, c: CellHandle) -> Option<&Cell> {
        self.cells.get(c)
    }

    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.contains_handle(v)
    }

    pub fn contains_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self.half_edges.contains_handle(he)
    }

    pub fn contains_cell(&self, c: CellHandle) -> bool {
        self.cells.contains_handle(c)
    }

    /// Returns the handles of all vertices in ascending order.
    pub fn vertex_handles(&self) -> Handles<'_, VertexHandle, Vertex> {
        self.vertices.handles()
    }

    /// Returns the handles of all half edges in ascending order.
    pub fn half_edge_handles(&self) -> Handles<'_, HalfEdgeHandle, HalfEdge> {
        self.half_edges.handles()
    }

    /// Returns the handles of all cells in ascending order.
    pub fn cell_handles(&self) -> Handles<'_, CellHandle, Cell> {
        self.cells.handles()
    }

    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    pub fn num_half_edges(&self) -> hsize {
        self.half_edges.num_elements()
    }

    pub fn num_cells(&self) -> hsize {
        self.cells.num_elements()
    }

    /// Returns the highest vertex handle ever issued by this mesh, or `None`
    /// if no vertex was ever added. The vertex itself might have been deleted
    /// already.
    pub fn max_vertex_index(&self) -> Option<VertexHandle> {
        self.max_vertex.into_option().map(VertexHandle::new)
    }

    /// Like [`max_vertex_index`][Self::max_vertex_index], but for half edges.
    pub fn max_half_edge_index(&self) -> Option<HalfEdgeHandle> {
        self.max_half_edge.into_option().map(HalfEdgeHandle::new)
    }

    /// Like [`max_vertex_index`][Self::max_vertex_index], but for cells.
    pub fn max_cell_index(&self) -> Option<CellHandle> {
        self.max_cell.into_option().map(CellHandle::new)
    }

    pub(crate) fn next_vertex_handle(&self) -> VertexHandle {
        VertexHandle::new(next_id(self.max_vertex))
    }

    pub(crate) fn next_half_edge_handle(&self) -> HalfEdgeHandle {
        HalfEdgeHandle::new(next_id(self.max_half_edge))
    }

    pub(crate) fn next_cell_handle(&self) -> CellHandle {
        CellHandle::new(next_id(self.max_cell))
    }

    /// Position of vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not exist (as do all the query methods below that
    /// take handles and do not return an `Option`).
    pub fn position(&self, v: VertexHandle) -> Point3<f32> {
        self[v].position
    }

    // ----- Half edge queries -------------------------------------------------------------------

    pub fn from_vertex(&self, he: HalfEdgeHandle) -> VertexHandle {
        self[he].from
    }

    pub fn to_vertex(&self, he: HalfEdgeHandle) -> VertexHandle {
        self[self[he].next].from
    }

    /// Returns `true` if no other half edge shares the edge of `he`.
    pub fn is_boundary_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self[he].next_around_edge == he
    }

    /// Returns the previous half edge around the `from` vertex of `he`. If
    /// the previous half edge in the cell is a boundary half edge, that one
    /// (which ends at the vertex) is returned.
    pub fn prev_half_edge_around_from_vertex(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        self[self[he].prev].next_around_edge
    }

    /// Returns the previous half edge around `v`, which has to be an endpoint
    /// of `he`. If `v` is the target of `he`, the half edge after `he`'s next
    /// around the edge is returned so that repeated calls keep moving in the
    /// same direction.
    pub fn prev_half_edge_around_vertex(&self, he: HalfEdgeHandle, v: VertexHandle) -> HalfEdgeHandle {
        if self[he].from == v {
            self.prev_half_edge_around_from_vertex(he)
        } else {
            self[self[he].next].next_around_edge
        }
    }

    /// Upper bound for the length of the around-edge cycle of `he`: every
    /// member starts at one of the two endpoints.
    pub(crate) fn max_half_edges_around_edge(&self, he: HalfEdgeHandle) -> usize {
        let from = self[he].from;
        let to = self.to_vertex(he);
        self[from].outgoing.len() + self[to].outgoing.len()
    }

    /// Counts the half edges in the around-edge cycle of `he` (including
    /// `he`). On a corrupted cycle, the count stops one above the upper
    /// bound.
    pub fn count_half_edges_around_edge(&self, he: HalfEdgeHandle) -> usize {
        let max = self.max_half_edges_around_edge(he);
        let mut num = 1;
        let mut current = self[he].next_around_edge;
        while current != he && num <= max {
            current = self[current].next_around_edge;
            num += 1;
        }
        num
    }

    /// Iterates over the around-edge cycle of `he`, starting with `he`.
    pub fn half_edges_around_edge(&self, he: HalfEdgeHandle) -> HalfEdgesAroundEdge<'_> {
        HalfEdgesAroundEdge {
            mesh: self,
            start: he,
            current: Some(he),
            remaining: cmp::max(self.max_half_edges_around_edge(he), 1),
        }
    }

    /// Returns the half edge with the smallest ID in the around-edge cycle of
    /// `he`. Used as representative of an edge.
    pub fn min_index_half_edge_around_edge(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        self.half_edges_around_edge(he).min().unwrap_or(he)
    }

    /// Returns `true` if `a` and `b` connect the same two vertices (in any
    /// direction).
    pub fn same_endpoints(&self, a: HalfEdgeHandle, b: HalfEdgeHandle) -> bool {
        let (a_from, a_to) = (self[a].from, self.to_vertex(a));
        let (b_from, b_to) = (self[b].from, self.to_vertex(b));
        (a_from == b_to && a_to == b_from) || (a_from == b_from && a_to == b_to)
    }

    /// Returns the cell of the next half edge around the edge of `he`. For
    /// boundary half edges, that's the cell of `he`.
    pub fn next_cell_around_edge(&self, he: HalfEdgeHandle) -> CellHandle {
        self[self[he].next_around_edge].cell
    }

    // ----- Vertex queries ----------------------------------------------------------------------

    /// Returns `true` if `v` is a boundary vertex.
    ///
    /// Thanks to the boundary-first ordering of outgoing half edges, this is
    /// an O(1) check. Vertices without any outgoing half edge count as
    /// boundary vertices.
    pub fn is_boundary_vertex(&self, v: VertexHandle) -> bool {
        match self[v].outgoing.first() {
            None => true,
            Some(&first) => {
                self.is_boundary_half_edge(first)
                    || self.is_boundary_half_edge(self[first].prev)
            }
        }
    }

    /// Returns the first outgoing half edge of `v` pointing to `w`.
    pub fn find_half_edge_to(&self, v: VertexHandle, w: VertexHandle) -> Option<HalfEdgeHandle> {
        self[v].outgoing.iter().cloned().find(|&he| self.to_vertex(he) == w)
    }

    /// Counts the outgoing half edges of `v` pointing to `w`.
    pub fn count_half_edges_to(&self, v: VertexHandle, w: VertexHandle) -> usize {
        self[v].outgoing.iter().filter(|&&he| self.to_vertex(he) == w).count()
    }

    /// Returns `true` if `v` is incident to more than two edges.
    ///
    /// Interior vertices have as many incident edges as outgoing half edges.
    /// A boundary vertex has one incident edge more than outgoing half edges
    /// (as long as it is part of a single fan).
    pub fn is_vertex_incident_on_more_than_two_edges(&self, v: VertexHandle) -> bool {
        let num_outgoing = self[v].outgoing.len();
        if num_outgoing > 2 {
            return true;
        }
        if !self.is_boundary_vertex(v) {
            return false;
        }

        num_outgoing == 2
    }

    // ----- Cell queries ------------------------------------------------------------------------

    /// Iterates over the half edges of cell `c`, starting at its
    /// representative half edge.
    pub fn cell_half_edges(&self, c: CellHandle) -> CellHalfEdges<'_> {
        self.half_edges_in_cell_from(self[c].half_edge)
    }

    /// Iterates over the half edges of the cell of `he`, starting at `he`.
    pub fn half_edges_in_cell_from(&self, he: HalfEdgeHandle) -> CellHalfEdges<'_> {
        let num_vertices = self[self[he].cell].num_vertices as usize;
        CellHalfEdges {
            mesh: self,
            start: he,
            current: Some(he),
            remaining: cmp::max(num_vertices, 1),
        }
    }

    /// Iterates over the vertices of cell `c`, starting at the `from` vertex
    /// of its representative half edge.
    pub fn cell_vertices(&self, c: CellHandle) -> impl Iterator<Item = VertexHandle> + '_ {
        self.cell_half_edges(c).map(move |he| self[he].from)
    }

    /// Returns the vertices of the cell of `he`, starting at the `from`
    /// vertex of `he`.
    pub fn cell_vertex_list(&self, he: HalfEdgeHandle) -> Vec<VertexHandle> {
        self.half_edges_in_cell_from(he).map(|he| self[he].from).collect()
    }

    pub fn is_triangle(&self, c: CellHandle) -> bool {
        self[c].is_triangle()
    }

    // ----- Counts ------------------------------------------------------------------------------

    /// Counts vertices without any outgoing half edge.
    pub fn count_isolated_vertices(&self) -> usize {
        self.vertices.values().filter(|v| v.is_isolated()).count()
    }

    /// Counts edges, i.e. around-edge cycles.
    pub fn count_edges(&self) -> usize {
        self.half_edges.handles()
            .filter(|&he| self.min_index_half_edge_around_edge(he) == he)
            .count()
    }

    /// Counts boundary half edges (which is the number of boundary edges).
    pub fn count_boundary_edges(&self) -> usize {
        self.half_edges.handles().filter(|&he| self.is_boundary_half_edge(he)).count()
    }

    /// Counts cells with exactly `num_vertices` vertices.
    pub fn count_cells_of_size(&self, num_vertices: hsize) -> usize {
        self.cells.values().filter(|c| c.num_vertices == num_vertices).count()
    }

    /// Counts cells with `num_vertices` or more vertices.
    pub fn count_cells_of_size_ge(&self, num_vertices: hsize) -> usize {
        self.cells.values().filter(|c| c.num_vertices >= num_vertices).count()
    }

    pub fn count_triangles(&self) -> usize {
        self.count_cells_of_size(3)
    }

    pub fn count_quads(&self) -> usize {
        self.count_cells_of_size(4)
    }

    pub fn count_pentagons(&self) -> usize {
        self.count_cells_of_size(5)
    }

    // ----- Lookups -----------------------------------------------------------------------------

    /// Returns one half edge per edge (the one with the smallest ID of its
    /// around-edge cycle), in ascending order.
    pub fn edge_list(&self) -> Vec<HalfEdgeHandle> {
        self.half_edges.handles()
            .filter(|&he| self.min_index_half_edge_around_edge(he) == he)
            .collect()
    }

    /// Returns a half edge from `v0` to `v1` or, if there is none, from `v1`
    /// to `v0`.
    pub fn find_edge(&self, v0: VertexHandle, v1: VertexHandle) -> Option<HalfEdgeHandle> {
        self.find_half_edge_to(v0, v1).or_else(|| self.find_half_edge_to(v1, v0))
    }

    /// Returns the neighbors of `v`: the target of each outgoing half edge
    /// and the origin of the previous half edge in its cell. The latter
    /// catches neighbors across boundaries and inconsistently oriented cells.
    /// Might contain duplicates.
    fn vertex_neighbors(&self, v: VertexHandle) -> impl Iterator<Item = VertexHandle> + '_ {
        self[v].outgoing.iter().flat_map(move |&he| {
            let to = self.to_vertex(he);
            let before = self[self[he].prev].from;
            Some(to).into_iter().chain(if before != v { Some(before) } else { None })
        })
    }

    /// Returns all vertices adjacent to both `a` and `b`, each once.
    pub fn common_vertex_neighbors(&self, a: VertexHandle, b: VertexHandle) -> Vec<VertexHandle> {
        let mut of_a = self.vertex_neighbors(a).collect::<HandleSet<_>>();
        let mut out = Vec::new();
        for w in self.vertex_neighbors(b) {
            // Removing `w` makes sure it's only added once.
            if of_a.remove(w) {
                out.push(w);
            }
        }

        out
    }

    /// Counts the vertices shared by cells `a` and `b`.
    pub fn count_vertices_shared_by_two_cells(&self, a: CellHandle, b: CellHandle) -> usize {
        let of_a = self.cell_vertices(a).collect::<HandleSet<_>>();
        self.cell_vertices(b).filter(|&v| of_a.contains(v)).count()
    }
}


// ===============================================================================================
// ===== Circulators
// ===============================================================================================

/// Iterator over the around-edge cycle of a half edge. Stops after at most
/// as many elements as both endpoints have outgoing half edges.
#[derive(Debug, Clone)]
pub struct HalfEdgesAroundEdge<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeHandle,
    current: Option<HalfEdgeHandle>,
    remaining: usize,
}

impl Iterator for HalfEdgesAroundEdge<'_> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        self.remaining -= 1;

        let next = self.mesh[out].next_around_edge;
        self.current = if next == self.start || self.remaining == 0 {
            None
        } else {
            Some(next)
        };

        Some(out)
    }
}

/// Iterator over the half edges of a cell. Stops after at most as many
/// elements as the cell has vertices.
#[derive(Debug, Clone)]
pub struct CellHalfEdges<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeHandle,
    current: Option<HalfEdgeHandle>,
    remaining: usize,
}

impl Iterator for CellHalfEdges<'_> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        self.remaining -= 1;

        let next = self.mesh[out].next;
        self.current = if next == self.start || self.remaining == 0 {
            None
        } else {
            Some(next)
        };

        Some(out)
    }
}
