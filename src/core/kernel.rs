//! Low level primitives to link and unlink half edges.
//!
//! None of these restores all mesh invariants on its own. Each method states
//! which relation it fixes; the mutators in `edit` combine them so that the
//! mesh is consistent again when they return.

use std::mem;

use crate::handle::{CellHandle, HalfEdgeHandle, Handle, VertexHandle};
use super::{raise_counter, Cell, HalfEdge, HalfEdgeMesh, Vertex};


/// Sets the `next` and `prev` handles in one line. These two always have to
/// be set together, so with this macro you cannot forget one of them.
macro_rules! set_next_prev {
    ($mesh:ident, $prev:tt -> $next:tt) => {{
        $mesh.half_edges[$prev].next = $next;
        $mesh.half_edges[$next].prev = $prev;
    }};
}


impl HalfEdgeMesh {
    // ===== Element creation and removal ============================================================

    /// Returns the vertex `v`, creating it (at the origin) if it does not
    /// exist yet. Raises the vertex counter to at least `v`.
    pub(super) fn create_vertex(&mut self, v: VertexHandle) -> &mut Vertex {
        if !self.vertices.contains_handle(v) {
            self.vertices.insert(v, Vertex::new());
        }
        raise_counter(&mut self.max_vertex, v.idx());
        &mut self.vertices[v]
    }

    /// Inserts an empty cell record with handle `c`. The caller has to add
    /// half edges and set the representative half edge.
    pub(super) fn create_cell_record(&mut self, c: CellHandle, half_edge: HalfEdgeHandle) {
        self.cells.insert(c, Cell { half_edge, num_vertices: 0 });
        raise_counter(&mut self.max_cell, c.idx());
    }

    /// Creates a self-linked half edge in `cell` starting at `from` with a
    /// fresh ID and increments the vertex count of `cell`. The half edge is
    /// *not* added to the outgoing list of `from`.
    fn create_half_edge_record(&mut self, cell: CellHandle, from: VertexHandle) -> HalfEdgeHandle {
        let he = self.next_half_edge_handle();
        self.half_edges.insert(he, HalfEdge::self_linked(he, cell, from));
        raise_counter(&mut self.max_half_edge, he.idx());
        self.cells[cell].num_vertices += 1;
        he
    }

    /// Creates a self-linked half edge in `cell` starting at `from` and
    /// appends it to the outgoing list of `from`. Increments the vertex count
    /// of `cell`.
    ///
    /// The caller has to link the half edge into its cell and around its
    /// edge. Appending to the outgoing list might violate the boundary-first
    /// invariant of `from`.
    pub(super) fn add_half_edge(&mut self, cell: CellHandle, from: VertexHandle) -> HalfEdgeHandle {
        let he = self.create_half_edge_record(cell, from);
        self.vertices[from].outgoing.push(he);
        he
    }

    /// Creates a half edge from `from` to `to` in `cell`, links it after
    /// `prev` (if given) and adds it to the around-edge cycle of an existing
    /// edge between `from` and `to`.
    ///
    /// A half edge with reversed endpoints (the regular manifold case) is
    /// preferred over one with the same direction. If no edge exists, the new
    /// half edge stays a boundary half edge. The `next` of the new half edge
    /// is not set.
    pub(super) fn add_and_link_half_edge(
        &mut self,
        cell: CellHandle,
        from: VertexHandle,
        to: VertexHandle,
        prev: Option<HalfEdgeHandle>,
    ) -> HalfEdgeHandle {
        let he = self.create_half_edge_record(cell, from);
        if let Some(prev) = prev {
            set_next_prev!(self, prev -> he);
        }

        let partner = self.find_half_edge_to(to, from)
            .or_else(|| self.find_half_edge_to(from, to));
        if let Some(partner) = partner {
            self.link_half_edges_around_edge(partner, he);
        }

        self.vertices[from].outgoing.push(he);
        he
    }

    /// Removes `he` from its around-edge cycle and from the outgoing list of
    /// its `from` vertex and deletes the record. The cell is not touched and
    /// the boundary-first invariant of both endpoints might be violated
    /// afterwards.
    pub(super) fn delete_half_edge(&mut self, he: HalfEdgeHandle) {
        self.unlink_half_edge_around_edge(he);
        self.remove_half_edge_from_vertex_list(he);
        self.half_edges.remove(he);
    }

    /// Deletes all half edges in the around-edge cycle of `he` (including
    /// `he`), removing them from the outgoing lists of their `from` vertices.
    ///
    /// Only the `next_around_edge` links of the cycle are followed, so the
    /// cells of the half edges may already be partially dismantled.
    pub(super) fn delete_half_edges_around_edge(&mut self, he: HalfEdgeHandle) {
        let mut around = vec![he];
        let mut current = self.half_edges[he].next_around_edge;
        while current != he && around.len() < self.half_edges.num_elements() as usize {
            around.push(current);
            current = self.half_edges[current].next_around_edge;
        }

        for he in around {
            self.remove_half_edge_from_vertex_list(he);
            self.half_edges.remove(he);
        }
    }

    /// Removes the record of cell `c` without touching its half edges.
    pub(super) fn delete_cell_record(&mut self, c: CellHandle) {
        self.cells.remove(c);
    }


    // ===== Around-edge cycles ======================================================================

    /// Inserts `b` after `a` into the around-edge cycle of `a`. `b` has to be
    /// self-linked (or be the only member of its cycle).
    pub(super) fn link_half_edges_around_edge(&mut self, a: HalfEdgeHandle, b: HalfEdgeHandle) {
        let after_a = self.half_edges[a].next_around_edge;
        self.half_edges[a].next_around_edge = b;
        self.half_edges[b].next_around_edge = after_a;
    }

    /// Swaps the `next_around_edge` handles of `a` and `b`.
    ///
    /// If `a` and `b` are in different cycles, the two cycles are merged into
    /// one. If they are in the same cycle, it is split into two.
    ///
    /// ```text
    ///   a -> a1 -> ... -> a        b -> b1 -> ... -> b
    ///
    /// becomes
    ///
    ///   a -> b1 -> ... -> b -> a1 -> ... -> a
    /// ```
    pub(super) fn swap_next_around_edge(&mut self, a: HalfEdgeHandle, b: HalfEdgeHandle) {
        let after_a = self.half_edges[a].next_around_edge;
        let after_b = self.half_edges[b].next_around_edge;
        self.half_edges[a].next_around_edge = after_b;
        self.half_edges[b].next_around_edge = after_a;
    }

    /// Returns the half edge whose `next_around_edge` is `he`. For boundary
    /// half edges, that's `he` itself.
    ///
    /// In contrast to [`HalfEdgeMesh::half_edges_around_edge`], this does not
    /// look at the endpoints of `he`, so it can be used while the cell of `he`
    /// is being dismantled. The walk is bounded by the number of half edges.
    pub(super) fn prev_half_edge_around_edge(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        let mut current = he;
        for _ in 0..self.half_edges.num_elements() {
            let next = self.half_edges[current].next_around_edge;
            if next == he {
                return current;
            }
            current = next;
        }

        he
    }

    /// Removes `he` from its around-edge cycle. Afterwards, `he` is a
    /// boundary half edge and the remaining cycle is closed again.
    pub(super) fn unlink_half_edge_around_edge(&mut self, he: HalfEdgeHandle) {
        let prev = self.prev_half_edge_around_edge(he);
        if prev != he {
            self.half_edges[prev].next_around_edge = self.half_edges[he].next_around_edge;
            self.half_edges[he].next_around_edge = he;
        }
    }

    /// Merges the around-edge cycles of all edges that become the same edge
    /// when `v0` is merged into `v1`.
    ///
    /// For each common neighbor `x` of `v0` and `v1`, the edges `(v0, x)` and
    /// `(v1, x)` are merged. The boundary-first invariant of `x` is restored,
    /// the one of `v0` and `v1` is not.
    ///
    /// ```text
    ///          (x)                       (x)
    ///         /   \                       |
    ///        /     \          =>          |
    ///       /       \                     |
    ///    (v0) ----- (v1)                (v1)
    /// ```
    pub(super) fn link_half_edges_around_merged_edges(&mut self, v0: VertexHandle, v1: VertexHandle) {
        for x in self.common_vertex_neighbors(v0, v1) {
            let e0 = self.find_edge(v0, x);
            let e1 = self.find_edge(v1, x);
            if let (Some(e0), Some(e1)) = (e0, e1) {
                self.swap_next_around_edge(e0, e1);
                self.move_boundary_half_edge_to_front(x);
            }
        }
    }


    // ===== Cell cycles =============================================================================

    /// Makes `next` the successor of `prev` in their cell. Nothing else is
    /// checked or changed.
    pub(super) fn relink_half_edges_in_cell(&mut self, prev: HalfEdgeHandle, next: HalfEdgeHandle) {
        set_next_prev!(self, prev -> next);
    }

    /// Inserts a new half edge starting at `split` right after `he` in the
    /// cell of `he`. Returns the new half edge, which is self-linked around
    /// its edge.
    ///
    /// ```text
    ///   (a) ---- he ----> (b)    =>    (a) -- he --> (split) -- new --> (b)
    /// ```
    pub(super) fn split_half_edge(&mut self, he: HalfEdgeHandle, split: VertexHandle) -> HalfEdgeHandle {
        let cell = self.half_edges[he].cell;
        let next = self.half_edges[he].next;
        let new = self.add_half_edge(cell, split);
        set_next_prev!(self, he -> new);
        set_next_prev!(self, new -> next);
        new
    }


    // ===== Outgoing lists ==========================================================================

    /// Restores the boundary-first invariant of `v`: if any outgoing half
    /// edge is a boundary half edge, one of them is moved to the front.
    ///
    /// If there is none, an outgoing half edge whose previous half edge is a
    /// boundary half edge is moved to the front instead. That happens at
    /// boundary vertices around inconsistently oriented cells.
    pub(super) fn move_boundary_half_edge_to_front(&mut self, v: VertexHandle) {
        let pos = {
            let outgoing = &self.vertices[v].outgoing;
            if outgoing.is_empty() || self.is_boundary_half_edge(outgoing[0]) {
                return;
            }

            match outgoing.iter().position(|&he| self.is_boundary_half_edge(he)) {
                Some(pos) => Some(pos),
                None if self.is_boundary_half_edge(self[outgoing[0]].prev) => None,
                None => outgoing.iter()
                    .position(|&he| self.is_boundary_half_edge(self[he].prev)),
            }
        };

        if let Some(pos) = pos {
            self.vertices[v].outgoing.swap(0, pos);
        }
    }

    /// Removes `he` from the outgoing list of its `from` vertex. The last
    /// element of the list takes its place.
    pub(super) fn remove_half_edge_from_vertex_list(&mut self, he: HalfEdgeHandle) {
        let from = self.half_edges[he].from;
        let outgoing = &mut self.vertices[from].outgoing;
        if let Some(pos) = outgoing.iter().position(|&x| x == he) {
            outgoing.swap_remove(pos);
        }
    }

    /// Moves all outgoing half edges of `v0` to `v1` (setting their `from`
    /// vertex). Afterwards, `v0` is isolated.
    pub(super) fn move_outgoing_list(&mut self, v0: VertexHandle, v1: VertexHandle) {
        let moved = mem::replace(&mut self.vertices[v0].outgoing, Default::default());
        for &he in &moved {
            self.half_edges[he].from = v1;
        }
        self.vertices[v1].outgoing.extend(moved);
    }
}
