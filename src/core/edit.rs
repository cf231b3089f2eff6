//! Structural mutators of the half edge mesh.
//!
//! All methods here resolve the handles they get and return an [`Error`] if
//! one doesn't exist. Edits that are refused because they would break the
//! mesh (e.g. an illegal edge collapse) return `Ok(None)` without touching
//! the mesh. When a method returns `Ok`, all mesh invariants hold again.

use crate::{
    handle::{hsize, CellHandle, HalfEdgeHandle, Handle, VertexHandle},
    math::{self, Pos3Like},
};
use super::{Error, HalfEdgeMesh, DIMENSION};


impl HalfEdgeMesh {
    fn check_half_edge(&self, he: HalfEdgeHandle) -> Result<(), Error> {
        if self.contains_half_edge(he) {
            Ok(())
        } else {
            Err(Error::UnknownHalfEdge(he))
        }
    }

    // ===== Vertices ================================================================================

    /// Adds an isolated vertex with handle `v` at the origin.
    pub fn add_vertex(&mut self, v: VertexHandle) -> Result<(), Error> {
        if self.contains_vertex(v) {
            return Err(Error::VertexExists(v));
        }

        self.create_vertex(v);
        Ok(())
    }

    /// Adds an isolated vertex with a fresh handle at the origin.
    pub fn add_new_vertex(&mut self) -> VertexHandle {
        let v = self.next_vertex_handle();
        self.create_vertex(v);
        v
    }

    /// Makes sure the vertices `0..n` exist. Existing vertices are not
    /// modified.
    pub fn add_vertices(&mut self, n: hsize) {
        for i in 0..n {
            self.create_vertex(VertexHandle::new(i));
        }
    }

    /// Sets the position of `v`, creating the vertex if it does not exist yet.
    pub fn set_coord(&mut self, v: VertexHandle, pos: impl Pos3Like) {
        self.create_vertex(v).position = pos.to_point3();
    }

    /// Sets coordinate `ic` (0, 1 or 2) of `v`, creating the vertex if it does
    /// not exist yet.
    pub fn set_coord_component(&mut self, v: VertexHandle, ic: usize, c: f32) -> Result<(), Error> {
        if ic >= DIMENSION {
            return Err(Error::CoordIndexOutOfRange(ic));
        }

        self.create_vertex(v).position[ic] = c;
        Ok(())
    }


    // ===== Adding and deleting cells ===============================================================

    /// Adds the cell `c` with the given vertices (in order). Vertices that do
    /// not exist yet are created at the origin.
    ///
    /// Each new half edge is linked with the existing half edges between the
    /// same two vertices. Vertices occurring more than once in `vertices` are
    /// not rejected here, but lead to a mesh that fails `check_all`.
    pub fn add_cell(&mut self, c: CellHandle, vertices: &[VertexHandle]) -> Result<(), Error> {
        if vertices.len() < 3 {
            return Err(Error::TooFewCellVertices(vertices.len()));
        }
        if self.contains_cell(c) {
            return Err(Error::CellExists(c));
        }

        for &v in vertices {
            self.create_vertex(v);
        }

        let first = self.next_half_edge_handle();
        self.create_cell_record(c, first);

        let mut prev = None;
        for (i, &from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % vertices.len()];
            let he = self.add_and_link_half_edge(c, from, to, prev);
            prev = Some(he);
        }

        // Close the cycle. `first` is the handle of the first half edge added
        // above.
        if let Some(last) = prev {
            self.relink_half_edges_in_cell(last, first);
        }

        for &v in vertices {
            self.move_boundary_half_edge_to_front(v);
        }

        debug_assert_eq!(self[c].num_vertices as usize, vertices.len());

        Ok(())
    }

    /// Like [`add_cell`][Self::add_cell], but with a fresh cell handle, which
    /// is returned.
    pub fn add_new_cell(&mut self, vertices: &[VertexHandle]) -> Result<CellHandle, Error> {
        let c = self.next_cell_handle();
        self.add_cell(c, vertices)?;
        Ok(c)
    }

    /// Deletes cell `c` with all its half edges.
    ///
    /// Vertices are never deleted: a vertex that only belonged to `c` stays as
    /// isolated vertex.
    pub fn delete_cell(&mut self, c: CellHandle) -> Result<(), Error> {
        if !self.contains_cell(c) {
            return Err(Error::UnknownCell(c));
        }

        let half_edges = self.cell_half_edges(c).collect::<Vec<_>>();
        let vertices = half_edges.iter().map(|&he| self[he].from).collect::<Vec<_>>();

        for he in half_edges {
            self.delete_half_edge(he);
        }
        self.delete_cell_record(c);

        for v in vertices {
            self.move_boundary_half_edge_to_front(v);
        }

        Ok(())
    }


    // ===== Splitting ===============================================================================

    /// Splits the edge of `he` at its midpoint. Returns the new vertex.
    ///
    /// Every cell around the edge gets one more vertex. Half edges with the
    /// same orientation stay in the same around-edge cycle:
    ///
    /// ```text
    ///               he                          he           n
    ///   (a) ------------------> (b)   =>   (a) -----> (v) -----> (b)
    ///   (a) <------------------ (b)        (a) <----- (v) <----- (b)
    ///               x                           n'          x
    /// ```
    pub fn split_edge(&mut self, he: HalfEdgeHandle) -> Result<VertexHandle, Error> {
        self.check_half_edge(he)?;

        let va = self[he].from;
        let vb = self.to_vertex(he);
        let mid = math::midpoint(self.position(va), self.position(vb));
        let cycle = self.half_edges_around_edge(he).collect::<Vec<_>>();

        let vnew = self.add_new_vertex();
        self.set_coord(vnew, mid);

        let pairs = cycle.iter()
            .map(|&h| (h, self.split_half_edge(h, vnew)))
            .collect::<Vec<_>>();

        for &(h, _) in &pairs {
            self.half_edges[h].next_around_edge = h;
        }

        // Boundary edges have only one pair, nothing to link then.
        let (h0, n0) = pairs[0];
        for &(h, n) in &pairs[1..] {
            if self[h].from == va {
                self.link_half_edges_around_edge(h0, h);
                self.link_half_edges_around_edge(n0, n);
            } else {
                self.link_half_edges_around_edge(h0, n);
                self.link_half_edges_around_edge(n0, h);
            }
        }

        self.move_boundary_half_edge_to_front(vnew);
        self.move_boundary_half_edge_to_front(va);
        self.move_boundary_half_edge_to_front(vb);

        Ok(vnew)
    }

    /// Splits the cell of `he` into quadrilaterals around a new vertex at the
    /// cell's centroid. Returns the new vertex.
    ///
    /// The cell has to have an even number of vertices, at least 4. With
    /// vertices `v0, v1, ...` starting at the `from` vertex of `he`, the new
    /// cells are `(new, v0, v1, v2)`, `(new, v2, v3, v4)` and so on.
    pub fn split_cell_into_quads(&mut self, he: HalfEdgeHandle) -> Result<VertexHandle, Error> {
        self.check_half_edge(he)?;

        let cell = self[he].cell;
        let num_vertices = self[cell].num_vertices;
        if num_vertices < 4 || num_vertices % 2 != 0 {
            return Err(Error::CannotSplitIntoQuads { cell, num_vertices });
        }

        let vertices = self.cell_vertex_list(he);
        let center = math::centroid(vertices.iter().map(|&v| self.position(v)));

        self.delete_cell(cell)?;
        let vnew = self.add_new_vertex();
        self.set_coord(vnew, center);

        let n = vertices.len();
        for i in (0..n).step_by(2) {
            self.add_new_cell(&[vnew, vertices[i], vertices[i + 1], vertices[(i + 2) % n]])?;
        }

        Ok(vnew)
    }

    /// Splits the cell containing `a` and `b` with a new edge between
    /// `a.from` and `b.from`.
    ///
    /// The cell is deleted and replaced by two new cells: first the run of
    /// vertices from `a.from` to `b.from`, then the run from `b.from` back to
    /// `a.from`. The old cell handle no longer exists afterwards.
    ///
    /// ```text
    ///      (vb) <------------ (x)             (vb) <------------ (x)
    ///       |                  ^               | ^                ^
    ///     b |       old        |         =>    | |     new A      |
    ///       v                  |               v |                |
    ///      (y) ------------> (va)             (y) ----------->  (va)
    ///                 a                          new B
    /// ```
    ///
    /// Returns the new half edge from `a.from` to `b.from` (which lies in the
    /// second new cell) or `None` if the split was refused (see
    /// [`illegal_split_cell`][Self::illegal_split_cell]).
    pub fn split_cell(
        &mut self,
        a: HalfEdgeHandle,
        b: HalfEdgeHandle,
    ) -> Result<Option<HalfEdgeHandle>, Error> {
        self.check_half_edge(a)?;
        self.check_half_edge(b)?;
        if self.is_illegal_split_cell(a, b) {
            return Ok(None);
        }

        let cell = self[a].cell;
        let va = self[a].from;
        let vb = self[b].from;
        let run = |from: HalfEdgeHandle, to: HalfEdgeHandle| {
            let mut vertices = self.half_edges_in_cell_from(from)
                .take_while(|&h| h != to)
                .map(|h| self[h].from)
                .collect::<Vec<_>>();
            vertices.push(self[to].from);
            vertices
        };
        let run_a = run(a, b);
        let run_b = run(b, a);

        self.delete_cell(cell)?;
        self.add_new_cell(&run_a)?;
        self.add_new_cell(&run_b)?;

        match self.find_half_edge_to(va, vb) {
            Some(diag) => Ok(Some(diag)),
            None => Err(Error::Corrupted(format!(
                "no half edge ({},{}) after splitting a cell",
                va,
                vb,
            ))),
        }
    }

    /// Fan-triangulates the cell of `he` from `he.from`. Does nothing if the
    /// cell is a triangle already.
    ///
    /// The cell is replaced by new cells. Use
    /// [`does_triangulate_cell_from_vertex_change_topology`][Self::does_triangulate_cell_from_vertex_change_topology]
    /// to check beforehand whether a diagonal of the fan already exists.
    pub fn triangulate_cell_from_vertex(&mut self, he: HalfEdgeHandle) -> Result<(), Error> {
        self.check_half_edge(he)?;

        let cell = self[he].cell;
        if self[cell].num_vertices <= 3 {
            return Ok(());
        }

        let vertices = self.cell_vertex_list(he);
        self.delete_cell(cell)?;
        for i in 1..vertices.len() - 1 {
            self.add_new_cell(&[vertices[0], vertices[i], vertices[i + 1]])?;
        }

        Ok(())
    }


    // ===== Collapsing and joining ==================================================================

    /// Collapses the edge of `he`: `he.from` is merged into `he.to`, which
    /// is moved to the edge's midpoint. Returns the surviving vertex or
    /// `None` if the collapse is illegal (see
    /// [`is_illegal_edge_collapse`][Self::is_illegal_edge_collapse]).
    ///
    /// All triangles around the edge are deleted. All other cells around the
    /// edge lose one vertex.
    ///
    /// This does not check whether the collapse changes the topology of the
    /// mesh; use [`collapse_edge_checked`][Self::collapse_edge_checked] for
    /// that.
    pub fn collapse_edge(&mut self, he: HalfEdgeHandle) -> Result<Option<VertexHandle>, Error> {
        self.check_half_edge(he)?;

        let v0 = self[he].from;
        let v1 = self.to_vertex(he);
        if self.is_illegal_edge_collapse(v0, v1) {
            return Ok(None);
        }

        let mid = math::midpoint(self.position(v0), self.position(v1));
        let around = self.half_edges_around_edge(he).collect::<Vec<_>>();

        self.link_half_edges_around_merged_edges(v0, v1);

        let mut opposite = Vec::new();
        for &h in &around {
            let cell = self[h].cell;
            let prev = self[h].prev;
            let next = self[h].next;

            if self[cell].half_edge == h {
                self.cells[cell].half_edge = next;
            }

            if self[cell].is_triangle() {
                //           (v2)
                //          ^    \
                //    prev /      \ next
                //        /        v
                //     (v0) -----> (v1)
                //            h
                opposite.push(self[prev].from);
                self.delete_half_edge(next);
                self.delete_half_edge(prev);
                self.delete_cell_record(cell);
            } else {
                self.relink_half_edges_in_cell(prev, next);
                self.cells[cell].num_vertices -= 1;
            }
        }

        self.delete_half_edges_around_edge(he);
        self.move_outgoing_list(v0, v1);
        self.set_coord(v1, mid);
        self.vertices.remove(v0);

        self.move_boundary_half_edge_to_front(v1);
        for v in opposite {
            self.move_boundary_half_edge_to_front(v);
        }
        let neighbors = self.vertex_neighbors(v1).collect::<Vec<_>>();
        for v in neighbors {
            self.move_boundary_half_edge_to_front(v);
        }

        Ok(Some(v1))
    }

    /// Like [`collapse_edge`][Self::collapse_edge], but additionally refuses
    /// the collapse if it would change the topology of the mesh (see
    /// [`edge_collapse_topology_change`][Self::edge_collapse_topology_change])
    /// and `allow_topology_change` is `false`.
    pub fn collapse_edge_checked(
        &mut self,
        he: HalfEdgeHandle,
        allow_topology_change: bool,
    ) -> Result<Option<VertexHandle>, Error> {
        self.check_half_edge(he)?;
        if !allow_topology_change && self.does_edge_collapse_change_topology(he) {
            return Ok(None);
        }

        self.collapse_edge(he)
    }

    /// Joins the two cells sharing the edge of `he` by removing that edge.
    /// Returns the cell of `he`, which now contains the vertices of both
    /// cells, or `None` if the join was refused (see
    /// [`illegal_join_two_cells`][Self::illegal_join_two_cells]).
    ///
    /// ```text
    ///     (x) ------- (vb) ------- (y)          (x) ------- (vb) ------- (y)
    ///      |         ^  |           |            |                        |
    ///      | cell_a  |  |  cell_b   |     =>     |         cell_a         |
    ///      |      he |  | b         |            |                        |
    ///      |         |  v           |            |                        |
    ///     (w) ------- (va) ------- (z)          (w) ------- (va) ------- (z)
    /// ```
    pub fn join_two_cells(&mut self, he: HalfEdgeHandle) -> Result<Option<CellHandle>, Error> {
        self.check_half_edge(he)?;
        if self.is_illegal_join_two_cells(he) {
            return Ok(None);
        }

        let a = he;
        let b = self[a].next_around_edge;
        let cell_a = self[a].cell;
        let cell_b = self[b].cell;
        let va = self[a].from;
        let vb = self.to_vertex(a);
        let num_vertices_a = self[cell_a].num_vertices;
        let num_vertices_b = self[cell_b].num_vertices;

        if self[cell_a].half_edge == a {
            self.cells[cell_a].half_edge = self[a].next;
        }

        let mut h = self[b].next;
        for _ in 1..num_vertices_b {
            self.half_edges[h].cell = cell_a;
            h = self[h].next;
        }
        self.cells[cell_a].num_vertices = num_vertices_a + num_vertices_b - 2;

        let (prev_a, next_a) = (self[a].prev, self[a].next);
        let (prev_b, next_b) = (self[b].prev, self[b].next);
        self.relink_half_edges_in_cell(prev_a, next_b);
        self.relink_half_edges_in_cell(prev_b, next_a);

        self.delete_half_edge(a);
        self.delete_half_edge(b);
        self.delete_cell_record(cell_b);

        self.move_boundary_half_edge_to_front(va);
        self.move_boundary_half_edge_to_front(vb);

        Ok(Some(cell_a))
    }
}
