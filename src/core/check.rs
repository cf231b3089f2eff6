//! Consistency checks of the half edge mesh.
//!
//! None of the checks panics on a corrupted mesh: dangling handles are
//! reported like every other inconsistency. The checks return the first
//! problem they find.

use std::fmt;

use optional::Optioned as Opt;

use crate::{
    handle::{hsize, HalfEdgeHandle, Handle, VertexHandle},
    map::HandleSet,
};
use super::HalfEdgeMesh;


// ===============================================================================================
// ===== Result types
// ===============================================================================================

/// Result of a consistency check. The default value means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Index of the problematic element (vertex, half edge or cell, depending
    /// on the check).
    pub index: Option<hsize>,

    /// Human readable description of the problem.
    pub message: String,
}

impl ErrorInfo {
    fn error(index: hsize, message: String) -> Self {
        Self { index: Some(index), message }
    }

    pub fn is_ok(&self) -> bool {
        self.index.is_none()
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_ok() {
            write!(f, "no error")
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Result of [`HalfEdgeMesh::check_manifold`] and its two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifoldInfo {
    /// `true` if every edge is incident on at most two cells.
    pub manifold_edges: bool,

    /// `true` if the cells around every vertex form a single fan.
    pub manifold_vertices: bool,

    /// A half edge of a non-manifold edge.
    pub half_edge: Option<HalfEdgeHandle>,

    /// A non-manifold vertex.
    pub vertex: Option<VertexHandle>,
}

impl ManifoldInfo {
    pub fn is_manifold(&self) -> bool {
        self.manifold_edges && self.manifold_vertices
    }
}

impl Default for ManifoldInfo {
    fn default() -> Self {
        Self {
            manifold_edges: true,
            manifold_vertices: true,
            half_edge: None,
            vertex: None,
        }
    }
}

/// Result of [`HalfEdgeMesh::check_orientation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationInfo {
    /// A half edge whose next half edge around the edge has the same
    /// direction, i.e. the two cells are oriented inconsistently.
    pub half_edge: Option<HalfEdgeHandle>,
}

impl OrientationInfo {
    pub fn is_oriented(&self) -> bool {
        self.half_edge.is_none()
    }
}


// ===============================================================================================
// ===== Checks
// ===============================================================================================

fn counter_str(counter: Opt<hsize>) -> String {
    match counter.into_option() {
        Some(max) => max.to_string(),
        None => "none".to_string(),
    }
}

impl HalfEdgeMesh {
    /// `to` vertex of `he` or `None` if a handle on the way is dangling.
    fn checked_to_vertex(&self, he: HalfEdgeHandle) -> Option<VertexHandle> {
        let next = self.half_edges.get(he)?.next;
        self.half_edges.get(next).map(|n| n.from)
    }

    /// Formats `he` as `"7 (2,3)"` for messages. An unknown `to` vertex is
    /// printed as `*`.
    fn half_edge_str(&self, he: HalfEdgeHandle) -> String {
        let from = match self.half_edges.get(he) {
            Some(h) => h.from.to_string(),
            None => "*".to_string(),
        };
        let to = match self.checked_to_vertex(he) {
            Some(v) => v.to_string(),
            None => "*".to_string(),
        };

        format!("{} ({},{})", he, from, to)
    }

    fn count_checked_half_edges_to(&self, v: VertexHandle, w: VertexHandle) -> usize {
        self[v].outgoing.iter()
            .filter(|&&he| self.checked_to_vertex(he) == Some(w))
            .count()
    }

    /// Checks the vertex counter and the outgoing half edge list of every
    /// vertex, including the boundary-first order.
    pub fn check_vertices(&self) -> ErrorInfo {
        if let Some(last) = self.vertices.last_handle() {
            if self.max_vertex.into_option().map_or(true, |max| max < last.idx()) {
                return ErrorInfo::error(last.idx(), format!(
                    "Incorrect value ({}) of max vertex index. Max vertex is {}.",
                    counter_str(self.max_vertex),
                    last,
                ));
            }
        }

        for (v, vertex) in self.vertices.iter() {
            let mut boundary = None;
            for (k, &he) in vertex.outgoing.iter().enumerate() {
                let half_edge = match self.half_edges.get(he) {
                    Some(h) => h,
                    None => return ErrorInfo::error(v.idx(), format!(
                        "Vertex {} outgoing half edge [{}] = {} does not exist.",
                        v, k, he,
                    )),
                };

                if half_edge.from != v {
                    return ErrorInfo::error(v.idx(), format!(
                        "Vertex {} outgoing half edge [{}] = {} starts at vertex {}.",
                        v, k, he, half_edge.from,
                    ));
                }

                if half_edge.next_around_edge == he && boundary.is_none() {
                    boundary = Some(he);
                }
            }

            if let Some(boundary) = boundary {
                if !self.is_boundary_half_edge(vertex.outgoing[0]) {
                    return ErrorInfo::error(v.idx(), format!(
                        "Vertex {} is on a boundary half edge {} but first incident \
                            half edge is not a boundary half edge.",
                        v,
                        self.half_edge_str(boundary),
                    ));
                }
            }
        }

        ErrorInfo::default()
    }

    /// Checks the half edge counter, all handles stored in half edges, the
    /// membership in outgoing lists, both cycles and the consistency between
    /// around-edge cycles and the outgoing lists of the endpoints.
    pub fn check_half_edges(&self) -> ErrorInfo {
        if let Some(last) = self.half_edges.last_handle() {
            if self.max_half_edge.into_option().map_or(true, |max| max < last.idx()) {
                return ErrorInfo::error(last.idx(), format!(
                    "Incorrect value ({}) of max half edge index. Max half edge is {}.",
                    counter_str(self.max_half_edge),
                    last,
                ));
            }
        }

        // First check for dangling handles.
        for (he, half_edge) in self.half_edges.iter() {
            let err = |msg: &str| ErrorInfo::error(he.idx(), format!(
                "Half edge {} {}",
                self.half_edge_str(he),
                msg,
            ));

            let from = match self.vertices.get(half_edge.from) {
                Some(v) => v,
                None => return err("has a from vertex that does not exist."),
            };

            let num_match = from.outgoing.iter().filter(|&&x| x == he).count();
            if num_match < 1 {
                return err(&format!(
                    "does not appear in outgoing half edge list for vertex {}.",
                    half_edge.from,
                ));
            } else if num_match > 1 {
                return err(&format!(
                    "appears more than once in outgoing half edge list for vertex {}.",
                    half_edge.from,
                ));
            }

            if !self.cells.contains_handle(half_edge.cell) {
                return err("is in a cell that does not exist.");
            }
            if !self.half_edges.contains_handle(half_edge.prev) {
                return err("is missing previous half edge in cell.");
            }
            if !self.half_edges.contains_handle(half_edge.next) {
                return err("is missing next half edge in cell.");
            }
            if !self.half_edges.contains_handle(half_edge.next_around_edge) {
                return err("is missing next half edge around edge.");
            }
        }

        // Check for mismatches between half edges.
        for (he, half_edge) in self.half_edges.iter() {
            let err = |msg: String| ErrorInfo::error(he.idx(), format!(
                "Half edge {} {}",
                self.half_edge_str(he),
                msg,
            ));

            let first = self[half_edge.from].outgoing[0];
            if self.is_boundary_half_edge(he) && !self.is_boundary_half_edge(first) {
                return err(format!(
                    "is a boundary half edge but the first outgoing half edge of vertex {} \
                        is not a boundary half edge.",
                    half_edge.from,
                ));
            }

            let prev = half_edge.prev;
            if self[prev].cell != half_edge.cell {
                return err(format!(
                    "and previous half edge {} are in different cells.",
                    self.half_edge_str(prev),
                ));
            }

            let next = half_edge.next;
            if self[next].cell != half_edge.cell {
                return err(format!(
                    "and next half edge {} are in different cells.",
                    self.half_edge_str(next),
                ));
            }

            let x = half_edge.next_around_edge;
            if x != he {
                if !self.same_endpoints(he, x) {
                    return err(format!(
                        "and next half edge around edge {} have different endpoints.",
                        self.half_edge_str(x),
                    ));
                }

                if self[x].cell == half_edge.cell {
                    return err(format!(
                        "and next half edge around edge {} are in the same cell.",
                        self.half_edge_str(x),
                    ));
                }
            }
        }

        // Compare each around-edge cycle with the outgoing lists of the two
        // endpoints. Every cycle is only inspected once.
        let mut visited = HandleSet::with_capacity(self.half_edges.num_elements() as usize);
        for he in self.half_edges.handles() {
            if visited.contains(he) {
                continue;
            }

            let from = self[he].from;
            let to = self.to_vertex(he);
            let num_around = self.count_half_edges_around_edge(he);
            let num_incident = self.count_checked_half_edges_to(to, from)
                + self.count_checked_half_edges_to(from, to);

            if num_around != num_incident {
                return ErrorInfo::error(he.idx(), format!(
                    "Inconsistency between half edges around edge and vertex \
                        incident lists for edge ({},{}).",
                    from,
                    to,
                ));
            }

            visited.extend(self.half_edges_around_edge(he));
        }

        ErrorInfo::default()
    }

    /// Checks the cell counter, the representative half edge of each cell and
    /// the stored number of vertices.
    pub fn check_cells(&self) -> ErrorInfo {
        if let Some(last) = self.cells.last_handle() {
            if self.max_cell.into_option().map_or(true, |max| max < last.idx()) {
                return ErrorInfo::error(last.idx(), format!(
                    "Incorrect value ({}) of max cell index. Max cell is {}.",
                    counter_str(self.max_cell),
                    last,
                ));
            }
        }

        for (c, cell) in self.cells.iter() {
            let he0 = cell.half_edge;
            match self.half_edges.get(he0) {
                None => return ErrorInfo::error(c.idx(), format!(
                    "Cell {} is missing half edge.",
                    c,
                )),
                Some(h) if h.cell != c => return ErrorInfo::error(c.idx(), format!(
                    "Incorrect half edge stored in cell {}.",
                    c,
                )),
                Some(_) => {}
            }

            let num_vertices = cell.num_vertices;
            let mut he = he0;
            for k in 1..num_vertices {
                he = match self.half_edges.get(he) {
                    Some(h) => h.next,
                    None => return ErrorInfo::error(c.idx(), format!(
                        "Half edge {} in cell {} does not exist.",
                        he, c,
                    )),
                };

                if he == he0 {
                    return ErrorInfo::error(c.idx(), format!(
                        "Incorrect number of vertices ({}) stored in cell {}. Counted {} vertices.",
                        num_vertices, c, k,
                    ));
                }
            }

            if self.half_edges.get(he).map(|h| h.next) != Some(he0) {
                return ErrorInfo::error(c.idx(), format!(
                    "Incorrect number of vertices ({}) stored in cell {}. \
                        Cell has more than {} vertices.",
                    num_vertices, c, num_vertices,
                ));
            }
        }

        ErrorInfo::default()
    }

    /// Runs [`check_vertices`][Self::check_vertices],
    /// [`check_half_edges`][Self::check_half_edges] and
    /// [`check_cells`][Self::check_cells] and returns the first error.
    pub fn check_all(&self) -> ErrorInfo {
        let info = self.check_vertices();
        if !info.is_ok() {
            return info;
        }

        let info = self.check_half_edges();
        if !info.is_ok() {
            return info;
        }

        self.check_cells()
    }

    /// Checks that all cells are oriented consistently: two half edges of the
    /// same edge never start at the same vertex.
    ///
    /// Assumes that `check_all` passes.
    pub fn check_orientation(&self) -> OrientationInfo {
        let half_edge = self.half_edges.iter()
            .find(|&(he, h)| {
                h.next_around_edge != he && self[h.next_around_edge].from == h.from
            })
            .map(|(he, _)| he);

        OrientationInfo { half_edge }
    }

    /// Checks that every edge is incident on at most two cells.
    ///
    /// Assumes that `check_all` passes.
    pub fn check_manifold_edges(&self) -> ManifoldInfo {
        match self.half_edges.handles().find(|&he| self.count_half_edges_around_edge(he) >= 3) {
            Some(he) => ManifoldInfo {
                manifold_edges: false,
                half_edge: Some(he),
                ..ManifoldInfo::default()
            },
            None => ManifoldInfo::default(),
        }
    }

    /// Checks that the cells around each vertex form a single fan.
    ///
    /// Starting at the first outgoing half edge, the check walks around the
    /// vertex with [`prev_half_edge_around_vertex`][Self::prev_half_edge_around_vertex]
    /// until it is back at the start or hits the boundary. The number of
    /// cells visited has to equal the number of outgoing half edges.
    ///
    /// Assumes that `check_all` passes.
    pub fn check_manifold_vertices(&self) -> ManifoldInfo {
        for (v, vertex) in self.vertices.iter() {
            let num_outgoing = vertex.outgoing.len();
            if num_outgoing == 0 {
                continue;
            }

            let he0 = vertex.outgoing[0];
            let mut he = self.prev_half_edge_around_vertex(he0, v);
            let mut num_cells = 1;
            while he != he0 && !self.is_boundary_half_edge(he) && num_cells <= num_outgoing {
                num_cells += 1;
                he = self.prev_half_edge_around_vertex(he, v);
            }

            if num_cells != num_outgoing {
                return ManifoldInfo {
                    manifold_vertices: false,
                    vertex: Some(v),
                    ..ManifoldInfo::default()
                };
            }
        }

        ManifoldInfo::default()
    }

    /// Combines [`check_manifold_edges`][Self::check_manifold_edges] and
    /// [`check_manifold_vertices`][Self::check_manifold_vertices].
    pub fn check_manifold(&self) -> ManifoldInfo {
        let edges = self.check_manifold_edges();
        let vertices = self.check_manifold_vertices();
        ManifoldInfo {
            manifold_vertices: vertices.manifold_vertices,
            vertex: vertices.vertex,
            ..edges
        }
    }

    /// Checks that `v` is the handle of an existing vertex. Meant for
    /// validating user input.
    pub fn check_vertex_index(&self, v: VertexHandle) -> ErrorInfo {
        if self.vertices.is_empty() {
            return ErrorInfo::error(v.idx(), "Mesh has no vertices.".to_string());
        }

        if let Some(max) = self.max_vertex.into_option() {
            if v.idx() > max {
                return ErrorInfo::error(v.idx(), format!(
                    "Illegal vertex index: {}\n  Maximum vertex index: {}",
                    v, max,
                ));
            }
        }

        if !self.vertices.contains_handle(v) {
            return ErrorInfo::error(v.idx(), format!(
                "Illegal vertex index: {}\n  Vertex does not exist.",
                v,
            ));
        }

        ErrorInfo::default()
    }
}
