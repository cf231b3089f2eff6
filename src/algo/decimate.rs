//! Simple mesh decimation: passes of edits over all cells.
//!
//! Each pass takes a snapshot of the cell handles (in ascending order) and
//! then edits one cell after another. Cells that were deleted by an earlier
//! edit in the same pass are skipped. Whatever happens is reported as
//! [`Event`] to a sink passed by the caller; nothing is printed here.
//!
//! The single step functions ([`collapse_edge`], [`split_edge`], ...) are
//! public as well: they perform one edit and report it the same way.

use std::fmt;

use crate::{
    core::{Error, HalfEdgeMesh, JoinRefusal, SplitCellRefusal, TopologyChange},
    handle::{hsize, CellHandle, HalfEdgeHandle, VertexHandle},
    measure,
};


/// Meshes with at least this many cells are checked less often.
pub const LARGE_MESH_NUM_CELLS: hsize = 10_000;

/// Cells with this many vertices (or more) are not joined with other cells.
pub const MAX_JOIN_CELL_SIZE: hsize = 6;

/// Which passes to run and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimateConfig {
    /// Collapse the shortest edge of each cell.
    pub collapse_short_edges: bool,

    /// Split the longest edge of each cell.
    pub split_long_edges: bool,

    /// Split each cell from its largest angle to the opposite vertex.
    pub split_cells: bool,

    /// Join each small cell with the cell across its longest edge.
    pub join_cells: bool,

    /// Triangulate each cell from its largest angle.
    pub triangulate_cells: bool,

    /// Perform edge collapses that change the topology of the mesh.
    pub allow_non_manifold: bool,

    /// Check the mesh only once per pass instead of after every edit. This
    /// is switched on automatically for meshes with at least
    /// [`LARGE_MESH_NUM_CELLS`] cells.
    pub reduce_checks: bool,
}

impl DecimateConfig {
    /// Returns `true` if at least one pass is enabled.
    pub fn has_edits(&self) -> bool {
        self.collapse_short_edges
            || self.split_long_edges
            || self.split_cells
            || self.join_cells
            || self.triangulate_cells
    }
}


// ===============================================================================================
// ===== Events
// ===============================================================================================

/// Something that happened (or was refused) during an edit.
///
/// The `Display` impl produces a human readable (possibly multi-line)
/// message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The mesh is large, checks are reduced.
    ReducingChecks { num_cells: hsize },

    EdgeCollapsed { from: VertexHandle, to: VertexHandle, vertex: VertexHandle },

    /// Some cell contains both endpoints, but not the edge.
    CollapseIllegal { from: VertexHandle, to: VertexHandle },

    /// The collapse changes the topology. It is performed anyway if
    /// `skipped` is `false`.
    CollapseChangesTopology {
        from: VertexHandle,
        to: VertexHandle,
        cell: CellHandle,
        change: TopologyChange,
        skipped: bool,
    },

    EdgeSplit { from: VertexHandle, to: VertexHandle, vertex: VertexHandle },

    CellSplit { cell: CellHandle, va: VertexHandle, vb: VertexHandle },

    SplitRefused {
        cell: CellHandle,
        va: VertexHandle,
        vb: VertexHandle,
        reason: SplitCellRefusal,
    },

    CellsJoined {
        cell: CellHandle,
        other: CellHandle,
        from: VertexHandle,
        to: VertexHandle,
    },

    JoinRefused {
        cell: CellHandle,
        other: CellHandle,
        from: VertexHandle,
        to: VertexHandle,
        reason: JoinRefusal,
    },

    CellTriangulated { cell: CellHandle, vertex: VertexHandle },

    /// The cell was split into quadrilaterals around the new `vertex`.
    CellSplitIntoQuads { cell: CellHandle, vertex: VertexHandle },

    /// The cell has an odd number of vertices and cannot be split into
    /// quadrilaterals.
    OddCell { cell: CellHandle, num_vertices: hsize },

    /// A check found that the mesh is not an oriented manifold. Contains
    /// the message of [`check_oriented_manifold`].
    NotOrientedManifold(String),
}

impl Event {
    /// Returns `true` for refusals and other warnings, `false` for edits
    /// that were performed.
    pub fn is_warning(&self) -> bool {
        match self {
            Event::EdgeCollapsed { .. }
            | Event::EdgeSplit { .. }
            | Event::CellSplit { .. }
            | Event::CellsJoined { .. }
            | Event::CellTriangulated { .. }
            | Event::CellSplitIntoQuads { .. } => false,
            _ => true,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::ReducingChecks { num_cells } => {
                write!(f, "Large data set with {} cells.\n  Reducing checks.", num_cells)
            }
            Event::EdgeCollapsed { from, to, .. } => {
                write!(f, "Collapsing edge ({},{}).", from, to)
            }
            Event::CollapseIllegal { from, to } => {
                write!(
                    f,
                    "Collapse of edge ({},{}) is illegal.\n  Some cell contains vertices {} \
                        and {} but not edge ({},{}).",
                    from, to, from, to, from, to,
                )
            }
            Event::CollapseChangesTopology { from, to, cell, change, skipped } => {
                let mut lines = Vec::new();
                if let Some(x) = change.triangle_hole {
                    lines.push(format!(
                        "Collapsing edge ({},{}) will change the mesh topology.\n  \
                            Vertices ({}, {}, {}) form a triangle hole.",
                        from, to, from, to, x,
                    ));
                }
                if change.interior_edge_with_boundary_vertices {
                    lines.push(format!(
                        "Collapsing edge ({},{}) merges two non-adjacent boundary vertices.",
                        from, to,
                    ));
                }
                if change.isolated_triangle {
                    lines.push(format!(
                        "Collapsing edge ({},{}) will delete isolated triangle {}.",
                        from, to, cell,
                    ));
                }
                if change.in_tetrahedron {
                    lines.push(format!(
                        "Collapsing edge ({},{}) will collapse a tetrahedron.",
                        from, to,
                    ));
                }
                if skipped {
                    lines.push(format!("Skipped collapse of edge ({},{}).", from, to));
                }

                f.write_str(&lines.join("\n"))
            }
            Event::EdgeSplit { from, to, .. } => {
                write!(f, "Splitting edge ({},{}).", from, to)
            }
            Event::CellSplit { cell, va, vb } => {
                write!(f, "Splitting cell {} at diagonal ({},{}).", cell, va, vb)
            }
            Event::SplitRefused { cell, va, vb, reason } => match reason {
                SplitCellRefusal::AdjacentVertices => {
                    write!(f, "({},{}) is a cell edge, not a cell diagonal.", va, vb)
                }
                SplitCellRefusal::DiagonalExists(..) => {
                    write!(
                        f,
                        "Splitting cell {} with diagonal ({},{}) creates an edge incident on \
                            three or more cells.",
                        cell, va, vb,
                    )
                }
                _ => write!(f, "Illegal split of cell {} with diagonal ({},{}).", cell, va, vb),
            },
            Event::CellsJoined { cell, other, from, to } => {
                write!(
                    f,
                    "Joining cell {} to cell {} by deleting edge ({},{}).",
                    cell, other, from, to,
                )
            }
            Event::JoinRefused { cell, other, from, to, reason } => {
                match reason {
                    JoinRefusal::BoundaryEdge => {
                        write!(f, "Only one cell contains edge ({},{}).", from, to)?
                    }
                    JoinRefusal::LowDegreeVertex(v) => {
                        write!(f, "Half edge endpoint {} is incident on only two edges.", v)?
                    }
                    JoinRefusal::NonManifoldEdge => {
                        write!(f, "More than two cells are incident on edge ({},{}).", from, to)?
                    }
                    JoinRefusal::InconsistentOrientation => {
                        write!(
                            f,
                            "Cells {} and {} have inconsistent orientations on edge ({},{}).",
                            cell, other, from, to,
                        )?
                    }
                    JoinRefusal::SharedVertices(n) => {
                        write!(f, "Cells {} and {} share {} vertices.", cell, other, n)?
                    }
                }
                write!(f, "\nSkipping join of cell {} to cell {}.", cell, other)
            }
            Event::CellTriangulated { cell, vertex } => {
                write!(f, "Triangulating cell {} from vertex {}.", cell, vertex)
            }
            Event::CellSplitIntoQuads { cell, .. } => {
                write!(f, "Splitting cell {} into quadrilaterals.", cell)
            }
            Event::OddCell { cell, num_vertices } => {
                write!(
                    f,
                    "Error in cell {}. Cell has odd number ({}) of vertices.\n  \
                        Skipping split of cell {}.",
                    cell, num_vertices, cell,
                )
            }
            Event::NotOrientedManifold(ref msg) => f.write_str(msg),
        }
    }
}


// ===============================================================================================
// ===== Checks
// ===============================================================================================

/// Runs [`HalfEdgeMesh::check_all`] and turns a failure into
/// [`Error::Corrupted`].
pub fn check_mesh(mesh: &HalfEdgeMesh) -> Result<(), Error> {
    let info = mesh.check_all();
    if info.is_ok() {
        Ok(())
    } else {
        Err(Error::Corrupted(info.message))
    }
}

/// Returns a description of the first problem if the mesh is not an
/// oriented manifold, `None` otherwise.
pub fn check_oriented_manifold(mesh: &HalfEdgeMesh) -> Option<String> {
    let endpoints = |he: HalfEdgeHandle| {
        format!("({},{})", mesh.from_vertex(he), mesh.to_vertex(he))
    };

    let manifold = mesh.check_manifold();
    if !manifold.manifold_edges {
        let edge = manifold.half_edge.map(endpoints).unwrap_or_default();
        return Some(format!("Non-manifold edge {}.", edge));
    }

    let orientation = mesh.check_orientation();
    match (orientation.half_edge, manifold.vertex) {
        (None, None) => None,
        (None, Some(v)) => Some(format!("Non-manifold vertex {}.", v)),
        (Some(_), Some(v)) => Some(format!(
            "Non-manifold vertex or inconsistent orientation in cells incident on vertex {}.",
            v,
        )),
        (Some(he), None) => Some(format!(
            "Inconsistent orientation of cells incident on edge {}.",
            endpoints(he),
        )),
    }
}


// ===============================================================================================
// ===== Single steps
// ===============================================================================================

/// Collapses the edge of `he` unless that is illegal or (with
/// `allow_non_manifold == false`) changes the topology.
pub fn collapse_edge(
    mesh: &mut HalfEdgeMesh,
    he: HalfEdgeHandle,
    allow_non_manifold: bool,
    sink: &mut impl FnMut(&Event),
) -> Result<Option<VertexHandle>, Error> {
    let from = mesh.from_vertex(he);
    let to = mesh.to_vertex(he);
    if mesh.is_illegal_edge_collapse_h(he) {
        sink(&Event::CollapseIllegal { from, to });
        return Ok(None);
    }

    let change = mesh.edge_collapse_topology_change(he);
    if change.changes_topology() {
        let skipped = !allow_non_manifold;
        sink(&Event::CollapseChangesTopology { from, to, cell: mesh[he].cell(), change, skipped });
        if skipped {
            return Ok(None);
        }
    }

    let out = mesh.collapse_edge(he)?;
    match out {
        Some(vertex) => sink(&Event::EdgeCollapsed { from, to, vertex }),
        None => sink(&Event::CollapseIllegal { from, to }),
    }

    Ok(out)
}

/// Splits the edge of `he` at its midpoint.
pub fn split_edge(
    mesh: &mut HalfEdgeMesh,
    he: HalfEdgeHandle,
    sink: &mut impl FnMut(&Event),
) -> Result<VertexHandle, Error> {
    let from = mesh.from_vertex(he);
    let to = mesh.to_vertex(he);
    let vertex = mesh.split_edge(he)?;
    sink(&Event::EdgeSplit { from, to, vertex });
    Ok(vertex)
}

/// Splits the cell of `a` and `b` at the diagonal `(a.from, b.from)` unless
/// that is refused.
pub fn split_cell(
    mesh: &mut HalfEdgeMesh,
    a: HalfEdgeHandle,
    b: HalfEdgeHandle,
    sink: &mut impl FnMut(&Event),
) -> Result<Option<HalfEdgeHandle>, Error> {
    let cell = mesh[a].cell();
    let va = mesh.from_vertex(a);
    let vb = mesh.from_vertex(b);
    if let Some(reason) = mesh.illegal_split_cell(a, b) {
        sink(&Event::SplitRefused { cell, va, vb, reason });
        return Ok(None);
    }

    let diag = mesh.split_cell(a, b)?;
    if diag.is_some() {
        sink(&Event::CellSplit { cell, va, vb });
    }

    Ok(diag)
}

/// Joins the two cells incident on the edge of `he` unless that is refused.
pub fn join_two_cells(
    mesh: &mut HalfEdgeMesh,
    he: HalfEdgeHandle,
    sink: &mut impl FnMut(&Event),
) -> Result<Option<CellHandle>, Error> {
    let cell = mesh[he].cell();
    let other = mesh.next_cell_around_edge(he);
    let from = mesh.from_vertex(he);
    let to = mesh.to_vertex(he);
    if let Some(reason) = mesh.illegal_join_two_cells(he) {
        sink(&Event::JoinRefused { cell, other, from, to, reason });
        return Ok(None);
    }

    let joined = mesh.join_two_cells(he)?;
    if joined.is_some() {
        sink(&Event::CellsJoined { cell, other, from, to });
    }

    Ok(joined)
}

/// Triangulates the cell of `he` from `he.from`. Triangles are left alone
/// without an event.
pub fn triangulate_cell(
    mesh: &mut HalfEdgeMesh,
    he: HalfEdgeHandle,
    sink: &mut impl FnMut(&Event),
) -> Result<(), Error> {
    let cell = mesh[he].cell();
    if mesh.is_triangle(cell) {
        return Ok(());
    }

    sink(&Event::CellTriangulated { cell, vertex: mesh.from_vertex(he) });
    mesh.triangulate_cell_from_vertex(he)
}


// ===============================================================================================
// ===== Passes
// ===============================================================================================

/// Runs all passes enabled in `config` (in the order of the fields of
/// [`DecimateConfig`]) and checks the mesh a final time.
///
/// Returns an error if a check finds the mesh corrupted. A mesh that is not
/// an oriented manifold is only reported as [`Event::NotOrientedManifold`].
pub fn decimate(
    mesh: &mut HalfEdgeMesh,
    config: &DecimateConfig,
    mut sink: impl FnMut(&Event),
) -> Result<(), Error> {
    let mut reduce_checks = config.reduce_checks;
    if !reduce_checks && mesh.num_cells() >= LARGE_MESH_NUM_CELLS {
        sink(&Event::ReducingChecks { num_cells: mesh.num_cells() });
        reduce_checks = true;
    }

    let mut decimator = Decimator {
        mesh,
        config: *config,
        reduce_checks,
        sink,
    };

    if config.collapse_short_edges {
        decimator.for_each_cell(Decimator::collapse_shortest_edge)?;
    }
    if config.split_long_edges {
        decimator.for_each_cell(Decimator::split_longest_edge)?;
    }
    if config.split_cells {
        decimator.for_each_cell(Decimator::split_at_largest_angle)?;
    }
    if config.join_cells {
        decimator.for_each_cell(Decimator::join_across_longest_edge)?;
    }
    if config.triangulate_cells {
        decimator.for_each_cell(Decimator::triangulate_from_largest_angle)?;
    }

    decimator.check()
}

struct Decimator<'a, F: FnMut(&Event)> {
    mesh: &'a mut HalfEdgeMesh,
    config: DecimateConfig,
    reduce_checks: bool,
    sink: F,
}

impl<F: FnMut(&Event)> Decimator<'_, F> {
    /// Calls `op` for every cell that existed at the start and still exists.
    /// `op` returns whether the cell counts as processed. With reduced checks,
    /// the mesh is checked once half of the cells are processed.
    fn for_each_cell(
        &mut self,
        op: impl Fn(&mut Self, CellHandle) -> Result<bool, Error>,
    ) -> Result<(), Error> {
        let cells = self.mesh.cell_handles().collect::<Vec<_>>();
        let half = cells.len() / 2;
        let mut count = 0;

        for c in cells {
            if !self.mesh.contains_cell(c) {
                continue;
            }

            if op(&mut *self, c)? {
                count += 1;
                if self.reduce_checks && count == half {
                    self.check()?;
                }
            }
        }

        Ok(())
    }

    fn check(&mut self) -> Result<(), Error> {
        check_mesh(self.mesh)?;
        if let Some(msg) = check_oriented_manifold(self.mesh) {
            (self.sink)(&Event::NotOrientedManifold(msg));
        }

        Ok(())
    }

    fn check_after_edit(&mut self) -> Result<(), Error> {
        if self.reduce_checks {
            Ok(())
        } else {
            self.check()
        }
    }

    fn collapse_shortest_edge(&mut self, c: CellHandle) -> Result<bool, Error> {
        let he = match measure::cell_min_max_edge_length_squared(self.mesh, c).imin {
            Some(he) => he,
            None => return Ok(true),
        };

        if collapse_edge(self.mesh, he, self.config.allow_non_manifold, &mut self.sink)?.is_some() {
            self.check_after_edit()?;
        }
        Ok(true)
    }

    fn split_longest_edge(&mut self, c: CellHandle) -> Result<bool, Error> {
        let he = match measure::cell_min_max_edge_length_squared(self.mesh, c).imax {
            Some(he) => he,
            None => return Ok(true),
        };

        split_edge(self.mesh, he, &mut self.sink)?;
        self.check_after_edit()?;
        Ok(true)
    }

    fn split_at_largest_angle(&mut self, c: CellHandle) -> Result<bool, Error> {
        if self.mesh.is_triangle(c) {
            return Ok(true);
        }

        let a = match measure::cos_min_max_cell_angles(self.mesh, c).imax {
            Some(he) => he,
            None => return Ok(true),
        };
        let half = self.mesh[c].num_vertices() as usize / 2;
        let b = match self.mesh.half_edges_in_cell_from(a).nth(half) {
            Some(he) => he,
            None => return Ok(true),
        };

        if split_cell(self.mesh, a, b, &mut self.sink)?.is_some() {
            self.check_after_edit()?;
        }
        Ok(true)
    }

    fn join_across_longest_edge(&mut self, c: CellHandle) -> Result<bool, Error> {
        if self.mesh[c].num_vertices() >= MAX_JOIN_CELL_SIZE {
            return Ok(false);
        }

        let he = match measure::cell_min_max_edge_length_squared(self.mesh, c).imax {
            Some(he) => he,
            None => return Ok(false),
        };
        let other = self.mesh.next_cell_around_edge(he);
        if self.mesh[other].num_vertices() >= MAX_JOIN_CELL_SIZE {
            return Ok(false);
        }

        if join_two_cells(self.mesh, he, &mut self.sink)?.is_some() {
            self.check_after_edit()?;
        }
        Ok(true)
    }

    fn triangulate_from_largest_angle(&mut self, c: CellHandle) -> Result<bool, Error> {
        if self.mesh.is_triangle(c) {
            return Ok(true);
        }

        let he = match measure::cos_min_max_cell_angles(self.mesh, c).imax {
            Some(he) => he,
            None => return Ok(true),
        };

        triangulate_cell(self.mesh, he, &mut self.sink)?;
        self.check_after_edit()?;
        Ok(true)
    }
}
