//! Subdividing a mesh into quadrilaterals.
//!
//! Every edge is split at its midpoint, which doubles the number of vertices
//! of every cell. Then every cell is split into quadrilaterals around its
//! centroid:
//!
//! ```text
//!    (2)                        (2)
//!     | \                        |  \
//!     |  \                      (5)  (4)
//!     |   \          =>          | \ / \
//!     |    \                     | (6)  \
//!     |     \                    |  |    \
//!    (0) -- (1)                 (0)-(3)--(1)
//! ```
//!
//! Progress is reported through the same [`Event`]s as decimation.

use crate::{
    core::{Error, HalfEdgeMesh},
    handle::VertexHandle,
};
use super::decimate::{check_mesh, check_oriented_manifold, split_edge, Event};


/// What [`split_into_quads`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadsSummary {
    pub num_split_edges: usize,
    pub num_split_cells: usize,
}

/// Splits all edges and then all cells of `mesh` into quadrilaterals.
///
/// The mesh is checked before and after. If it is not an oriented manifold
/// beforehand, [`Event::NotOrientedManifold`] is reported and the split is
/// performed anyway. An error is returned if a check fails afterwards, if
/// an oriented manifold lost that property, or if the number of boundary
/// edges did not exactly double.
pub fn split_into_quads(
    mesh: &mut HalfEdgeMesh,
    mut sink: impl FnMut(&Event),
) -> Result<QuadsSummary, Error> {
    check_mesh(mesh)?;
    let was_oriented_manifold = match check_oriented_manifold(mesh) {
        Some(msg) => {
            sink(&Event::NotOrientedManifold(msg));
            false
        }
        None => true,
    };
    let num_boundary_edges = mesh.count_boundary_edges();

    // Handles are never reused, so every vertex created below has a larger
    // handle than all original vertices.
    let max_old_vertex = mesh.max_vertex_index();
    let is_old = |v: VertexHandle| max_old_vertex.map_or(false, |max| v <= max);

    let mut summary = QuadsSummary::default();
    for he in mesh.edge_list() {
        split_edge(mesh, he, &mut sink)?;
        summary.num_split_edges += 1;
    }

    let cells = mesh.cell_handles().collect::<Vec<_>>();
    for cell in cells {
        let num_vertices = mesh[cell].num_vertices();
        if num_vertices % 2 != 0 {
            sink(&Event::OddCell { cell, num_vertices });
            continue;
        }

        // Start at an edge midpoint so that every quad contains one original
        // vertex.
        let mut he = mesh[cell].half_edge();
        if is_old(mesh.from_vertex(he)) {
            he = mesh[he].next();
        }

        let vertex = mesh.split_cell_into_quads(he)?;
        sink(&Event::CellSplitIntoQuads { cell, vertex });
        summary.num_split_cells += 1;
    }

    check_mesh(mesh)?;
    if was_oriented_manifold {
        if let Some(msg) = check_oriented_manifold(mesh) {
            return Err(Error::Corrupted(format!(
                "input mesh is an oriented manifold, but mesh after split is not: {}",
                msg,
            )));
        }
    }

    let new_num_boundary_edges = mesh.count_boundary_edges();
    if new_num_boundary_edges != 2 * num_boundary_edges {
        return Err(Error::Corrupted(format!(
            "mesh has {} boundary edges after splitting, but should have {} (twice as many \
                as before)",
            new_num_boundary_edges,
            2 * num_boundary_edges,
        )));
    }

    Ok(summary)
}
