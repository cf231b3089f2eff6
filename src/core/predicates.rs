//! Legality checks and topology change oracles for the edit operations.
//!
//! The `illegal_*` checks are enforced by the corresponding mutators. The
//! topology change oracles are not: they are meant for editing programs that
//! want to warn about or skip such edits.

use derive_more::Display;

use crate::handle::{CellHandle, HalfEdgeHandle, VertexHandle};
use super::HalfEdgeMesh;


/// Why [`HalfEdgeMesh::split_cell`] refuses to split a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SplitCellRefusal {
    #[display(fmt = "half edges are in different cells")]
    DifferentCells,

    #[display(fmt = "both half edges are the same")]
    SameHalfEdge,

    /// The two `from` vertices are adjacent in the cell, so the diagonal
    /// would be a cell edge.
    #[display(fmt = "vertices are adjacent, not a cell diagonal")]
    AdjacentVertices,

    /// An edge between the two vertices exists already. The split would
    /// create an edge incident on three or more cells.
    #[display(fmt = "edge ({},{}) already exists", _0, _1)]
    DiagonalExists(VertexHandle, VertexHandle),
}

/// Why [`HalfEdgeMesh::join_two_cells`] refuses to join two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum JoinRefusal {
    #[display(fmt = "edge is a boundary edge")]
    BoundaryEdge,

    /// The vertex is incident on only two edges.
    #[display(fmt = "vertex {} is incident on only two edges", _0)]
    LowDegreeVertex(VertexHandle),

    #[display(fmt = "edge is incident on more than two cells")]
    NonManifoldEdge,

    /// Both half edges of the edge point in the same direction. Joining
    /// would splice the cells into one with a repeated vertex.
    #[display(fmt = "cells have inconsistent orientations")]
    InconsistentOrientation,

    /// The two cells share this many (more than two) vertices.
    #[display(fmt = "cells share {} vertices", _0)]
    SharedVertices(usize),
}

/// Ways in which collapsing an edge changes the topology of the mesh. See
/// [`HalfEdgeMesh::edge_collapse_topology_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyChange {
    /// A common neighbor of both endpoints that does not form a triangle with
    /// the edge. Collapsing would close the hole bounded by the three edges.
    pub triangle_hole: Option<VertexHandle>,

    /// The edge is an interior edge, but both endpoints are on the boundary.
    /// Collapsing would pinch the mesh.
    pub interior_edge_with_boundary_vertices: bool,

    /// The cell of the half edge is a triangle with only boundary edges.
    pub isolated_triangle: bool,

    /// The cell of the half edge is part of a tetrahedron.
    pub in_tetrahedron: bool,
}

impl TopologyChange {
    pub fn changes_topology(&self) -> bool {
        self.triangle_hole.is_some()
            || self.interior_edge_with_boundary_vertices
            || self.isolated_triangle
            || self.in_tetrahedron
    }
}


impl HalfEdgeMesh {
    // ===== Collapse ================================================================================

    /// Returns `true` if collapsing the edge `(va, vb)` is illegal: some cell
    /// contains both vertices, but not as neighbors. Collapsing would create
    /// a cell with a repeated vertex.
    ///
    /// Only the cells around the vertex with fewer outgoing half edges are
    /// inspected.
    pub fn is_illegal_edge_collapse(&self, va: VertexHandle, vb: VertexHandle) -> bool {
        let (v, w) = if self[va].outgoing.len() > self[vb].outgoing.len() {
            (vb, va)
        } else {
            (va, vb)
        };

        for &h0 in &self[v].outgoing {
            let num_vertices = self[self[h0].cell].num_vertices;
            if num_vertices <= 3 {
                // All pairs of triangle vertices form an edge.
                continue;
            }

            // Check all vertices that are not neighbors of `v` in this cell.
            let mut he = self[self[h0].next].next;
            for _ in 2..num_vertices - 1 {
                if self[he].from == w {
                    return true;
                }
                he = self[he].next;
            }
        }

        false
    }

    /// Like [`is_illegal_edge_collapse`][Self::is_illegal_edge_collapse] for
    /// the endpoints of `he`.
    pub fn is_illegal_edge_collapse_h(&self, he: HalfEdgeHandle) -> bool {
        self.is_illegal_edge_collapse(self[he].from, self.to_vertex(he))
    }

    /// Returns `true` if some triangle around the edge of `he` has `v` as
    /// third vertex.
    pub fn is_in_triangle(&self, he: HalfEdgeHandle, v: VertexHandle) -> bool {
        self.half_edges_around_edge(he).any(|h| {
            self[self[h].cell].is_triangle() && self[self[h].prev].from == v
        })
    }

    /// Returns a vertex that is adjacent to both endpoints of `he`, but does
    /// not form a triangle with them.
    pub fn find_triangle_hole(&self, he: HalfEdgeHandle) -> Option<VertexHandle> {
        let va = self[he].from;
        let vb = self.to_vertex(he);
        self.common_vertex_neighbors(va, vb)
            .into_iter()
            .find(|&vc| !self.is_in_triangle(he, vc))
    }

    /// Returns `true` if `he` is not a boundary half edge, but both its
    /// endpoints are boundary vertices.
    pub fn is_interior_edge_with_boundary_vertices(&self, he: HalfEdgeHandle) -> bool {
        !self.is_boundary_half_edge(he)
            && self.is_boundary_vertex(self[he].from)
            && self.is_boundary_vertex(self.to_vertex(he))
    }

    /// Returns `true` if `c` is a triangle whose three edges are all boundary
    /// edges. Returns `false` if `c` does not exist.
    pub fn is_isolated_triangle(&self, c: CellHandle) -> bool {
        match self.cell(c) {
            Some(cell) if cell.is_triangle() => {
                self.cell_half_edges(c).all(|he| self.is_boundary_half_edge(he))
            }
            _ => false,
        }
    }

    /// Returns `true` if the triangle `c` is one of the four faces of a
    /// tetrahedron. Returns `false` if `c` does not exist.
    ///
    /// ```text
    ///              (v2)
    ///             / |  \
    ///            /  |   \
    ///         (v0)--+---(v1)
    ///            \  |   /
    ///             \ |  /
    ///              (x)
    /// ```
    ///
    /// Checks whether a triangle `(v1, v0, x)` on the other side of the edge
    /// `(v0, v1)` is completed to a tetrahedron by triangles `(v0, x, v2)`
    /// and `(x, v1, v2)`.
    pub fn is_in_tetrahedron(&self, c: CellHandle) -> bool {
        let he0 = match self.cell(c) {
            Some(cell) if cell.is_triangle() => cell.half_edge,
            _ => return false,
        };
        let v2 = self[self[he0].prev].from;

        self.half_edges_around_edge(he0).skip(1).any(|he| {
            self[self[he].cell].is_triangle()
                && self.is_in_triangle(self[he].prev, v2)
                && self.is_in_triangle(self[he].next, v2)
        })
    }

    /// Returns all reasons why collapsing the edge of `he` changes the
    /// topology of the mesh.
    pub fn edge_collapse_topology_change(&self, he: HalfEdgeHandle) -> TopologyChange {
        let cell = self[he].cell;
        TopologyChange {
            triangle_hole: self.find_triangle_hole(he),
            interior_edge_with_boundary_vertices: self.is_interior_edge_with_boundary_vertices(he),
            isolated_triangle: self.is_isolated_triangle(cell),
            in_tetrahedron: self.is_in_tetrahedron(cell),
        }
    }

    /// Returns `true` if collapsing the edge of `he` changes the topology of
    /// the mesh.
    pub fn does_edge_collapse_change_topology(&self, he: HalfEdgeHandle) -> bool {
        self.edge_collapse_topology_change(he).changes_topology()
    }


    // ===== Split cell ==============================================================================

    /// Returns the reason why splitting the cell of `a` and `b` with a
    /// diagonal from `a.from` to `b.from` is refused, or `None` if the split
    /// is legal.
    pub fn illegal_split_cell(&self, a: HalfEdgeHandle, b: HalfEdgeHandle) -> Option<SplitCellRefusal> {
        if self[a].cell != self[b].cell {
            return Some(SplitCellRefusal::DifferentCells);
        }
        if a == b {
            return Some(SplitCellRefusal::SameHalfEdge);
        }
        if self[a].from == self.to_vertex(b) || self.to_vertex(a) == self[b].from {
            return Some(SplitCellRefusal::AdjacentVertices);
        }

        let va = self[a].from;
        let vb = self[b].from;
        if self.find_edge(va, vb).is_some() {
            return Some(SplitCellRefusal::DiagonalExists(va, vb));
        }

        None
    }

    pub fn is_illegal_split_cell(&self, a: HalfEdgeHandle, b: HalfEdgeHandle) -> bool {
        self.illegal_split_cell(a, b).is_some()
    }


    // ===== Join cells ==============================================================================

    /// Returns the reason why joining the two cells around the edge of `he`
    /// is refused, or `None` if the join is legal.
    pub fn illegal_join_two_cells(&self, he: HalfEdgeHandle) -> Option<JoinRefusal> {
        if self.is_boundary_half_edge(he) {
            return Some(JoinRefusal::BoundaryEdge);
        }

        for &v in &[self[he].from, self.to_vertex(he)] {
            if !self.is_vertex_incident_on_more_than_two_edges(v) {
                return Some(JoinRefusal::LowDegreeVertex(v));
            }
        }

        let other = self[he].next_around_edge;
        if self[other].next_around_edge != he {
            return Some(JoinRefusal::NonManifoldEdge);
        }
        if self[other].from == self[he].from {
            return Some(JoinRefusal::InconsistentOrientation);
        }

        let num_shared = self.count_vertices_shared_by_two_cells(self[he].cell, self[other].cell);
        if num_shared > 2 {
            return Some(JoinRefusal::SharedVertices(num_shared));
        }

        None
    }

    pub fn is_illegal_join_two_cells(&self, he: HalfEdgeHandle) -> bool {
        self.illegal_join_two_cells(he).is_some()
    }


    // ===== Triangulation ===========================================================================

    /// Returns `true` if some diagonal of the fan triangulation from
    /// `he.from` is already an edge of the mesh.
    pub fn does_triangulate_cell_from_vertex_change_topology(&self, he: HalfEdgeHandle) -> bool {
        let cell = self[he].cell;
        if self[cell].num_vertices <= 3 {
            return false;
        }

        let va = self[he].from;
        let num_diagonals = self[cell].num_vertices as usize - 3;
        self.half_edges_in_cell_from(he)
            .skip(2)
            .take(num_diagonals)
            .any(|h| self.find_edge(va, self[h].from).is_some())
    }
}
