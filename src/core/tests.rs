use cgmath::Point3;

use crate::handle::{hsize, CellHandle, HalfEdgeHandle, Handle, VertexHandle};
use super::{Error, HalfEdgeMesh, JoinRefusal, SplitCellRefusal};


/// Checks the consistency of the mesh and compares the element counts.
macro_rules! check_mesh {
    ($mesh:expr => {
        vertices: $nv:expr,
        half_edges: $nh:expr,
        edges: $ne:expr,
        boundary_edges: $nb:expr,
        cells: $nc:expr $(,)?
    }) => {{
        let mesh: &HalfEdgeMesh = &$mesh;
        let info = mesh.check_all();
        assert!(info.is_ok(), "`check_all` failed: {}\n{:#?}", info, mesh);
        assert_eq!(mesh.num_vertices(), $nv, "number of vertices");
        assert_eq!(mesh.num_half_edges(), $nh, "number of half edges");
        assert_eq!(mesh.count_edges(), $ne, "number of edges");
        assert_eq!(mesh.count_boundary_edges(), $nb, "number of boundary edges");
        assert_eq!(mesh.num_cells(), $nc, "number of cells");
    }};
}

fn v(idx: hsize) -> VertexHandle {
    VertexHandle::new(idx)
}

fn c(idx: hsize) -> CellHandle {
    CellHandle::new(idx)
}

fn he(idx: hsize) -> HalfEdgeHandle {
    HalfEdgeHandle::new(idx)
}

/// Creates a mesh with the given vertex positions and cells (given as lists
/// of vertex indices). Cell `i` gets the handle `i`.
fn mesh_with(positions: &[[f32; 3]], cells: &[&[hsize]]) -> HalfEdgeMesh {
    let mut mesh = HalfEdgeMesh::new();
    for (i, &pos) in positions.iter().enumerate() {
        mesh.set_coord(VertexHandle::from_usize(i), pos);
    }
    for (i, cell) in cells.iter().enumerate() {
        let vertices = cell.iter().map(|&idx| v(idx)).collect::<Vec<_>>();
        mesh.add_cell(CellHandle::from_usize(i), &vertices).unwrap();
    }

    mesh
}

/// ```text
///    (2) ----- (3)
///     | \       |
///     |  \  1   |
///     |   \     |
///     | 0  \    |
///     |     \   |
///    (0) ----- (1)
/// ```
///
/// Half edges: `HE0..HE2` are `0->1, 1->2, 2->0` and `HE3..HE5` are
/// `1->3, 3->2, 2->1`.
fn two_triangles() -> HalfEdgeMesh {
    mesh_with(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        &[&[0, 1, 2], &[1, 3, 2]],
    )
}

/// ```text
///    (3) ----- (2)
///     |         |
///     |    0    |
///     |         |
///    (0) ----- (1)
/// ```
///
/// Half edges `HE0..HE3` are `0->1, 1->2, 2->3, 3->0`.
fn square() -> HalfEdgeMesh {
    mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]],
        &[&[0, 1, 2, 3]],
    )
}

/// ```text
///    (3) ----- (4) ----- (5)
///     |         |         |
///     |    0    |    1    |
///     |         |         |
///    (0) ----- (1) ----- (2)
/// ```
fn quad_strip() -> HalfEdgeMesh {
    mesh_with(
        &[
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [2.0, 1.0, 0.0],
        ],
        &[&[0, 1, 4, 3], &[1, 2, 5, 4]],
    )
}

/// Closed surface with four triangles.
fn tetrahedron() -> HalfEdgeMesh {
    mesh_with(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]],
    )
}


// ===============================================================================================
// ===== Construction and queries
// ===============================================================================================

#[test]
fn empty() {
    let mesh = HalfEdgeMesh::new();
    check_mesh!(mesh => {
        vertices: 0,
        half_edges: 0,
        edges: 0,
        boundary_edges: 0,
        cells: 0,
    });
    assert_eq!(mesh.max_vertex_index(), None);
    assert_eq!(mesh.max_half_edge_index(), None);
    assert_eq!(mesh.max_cell_index(), None);
}

#[test]
fn isolated_vertices() {
    let mut mesh = HalfEdgeMesh::new();
    mesh.add_vertices(3);
    let v3 = mesh.add_new_vertex();

    assert_eq!(v3, v(3));
    assert_eq!(mesh.count_isolated_vertices(), 4);
    assert!(mesh.is_boundary_vertex(v(0)));
    assert!(mesh[v(1)].is_isolated());
    assert_eq!(mesh.max_vertex_index(), Some(v(3)));
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 0,
        edges: 0,
        boundary_edges: 0,
        cells: 0,
    });
}

#[test]
fn single_triangle() -> Result<(), Error> {
    //
    //         (2)
    //        /   \
    //       /     \
    //      /       \
    //    (0) ----- (1)
    //
    let mut mesh = HalfEdgeMesh::new();
    mesh.add_vertices(3);
    let cell = mesh.add_new_cell(&[v(0), v(1), v(2)])?;

    check_mesh!(mesh => {
        vertices: 3,
        half_edges: 3,
        edges: 3,
        boundary_edges: 3,
        cells: 1,
    });

    assert_eq!(cell, c(0));
    assert!(mesh.is_triangle(cell));
    assert_eq!(mesh.cell_vertices(cell).collect::<Vec<_>>(), [v(0), v(1), v(2)]);
    assert_eq!(mesh.cell_half_edges(cell).collect::<Vec<_>>(), [he(0), he(1), he(2)]);
    assert_eq!(mesh.to_vertex(he(0)), v(1));
    assert_eq!(mesh.find_half_edge_to(v(2), v(0)), Some(he(2)));
    assert_eq!(mesh.find_half_edge_to(v(0), v(2)), None);
    assert_eq!(mesh.find_edge(v(0), v(2)), Some(he(2)));
    assert!(mesh.is_isolated_triangle(cell));
    assert!(!mesh.is_in_tetrahedron(cell));
    assert!(mesh.check_manifold().is_manifold());
    assert!(mesh.check_orientation().is_oriented());

    for vertex in mesh.vertex_handles() {
        assert!(mesh.is_boundary_vertex(vertex));
        assert_eq!(mesh[vertex].num_outgoing(), 1);
    }

    Ok(())
}

#[test]
fn two_triangles_queries() {
    let mesh = two_triangles();
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 6,
        edges: 5,
        boundary_edges: 4,
        cells: 2,
    });

    // The shared edge.
    assert!(!mesh.is_boundary_half_edge(he(1)));
    assert_eq!(mesh[he(1)].next_around_edge(), he(5));
    assert_eq!(mesh[he(5)].next_around_edge(), he(1));
    assert_eq!(mesh.count_half_edges_around_edge(he(1)), 2);
    assert_eq!(mesh.half_edges_around_edge(he(5)).collect::<Vec<_>>(), [he(5), he(1)]);
    assert_eq!(mesh.min_index_half_edge_around_edge(he(5)), he(1));
    assert!(mesh.same_endpoints(he(1), he(5)));
    assert_eq!(mesh.next_cell_around_edge(he(1)), c(1));
    assert_eq!(mesh.edge_list(), [he(0), he(1), he(2), he(3), he(4)]);

    // Boundary half edges come first.
    assert_eq!(mesh[v(1)].outgoing()[0], he(3));
    assert_eq!(mesh[v(2)].outgoing()[0], he(2));

    assert_eq!(mesh.common_vertex_neighbors(v(1), v(2)), [v(0), v(3)]);
    assert_eq!(mesh.count_vertices_shared_by_two_cells(c(0), c(1)), 2);
    assert!(mesh.is_interior_edge_with_boundary_vertices(he(1)));
    assert!(!mesh.is_interior_edge_with_boundary_vertices(he(0)));
    assert!(mesh.is_in_triangle(he(1), v(0)));
    assert!(mesh.is_in_triangle(he(1), v(3)));
    assert_eq!(mesh.find_triangle_hole(he(1)), None);

    assert!(mesh.check_manifold().is_manifold());
    assert!(mesh.check_orientation().is_oriented());
}

#[test]
fn closed_fan_has_interior_vertex() {
    //
    //          (2)
    //         / | \
    //        /  |  \
    //       /  (0)  \
    //      /  /   \  \
    //     (1) ----- (3)
    //
    let mesh = mesh_with(
        &[[0.0, 0.0, 1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        &[&[0, 1, 2], &[0, 2, 3], &[0, 3, 1]],
    );

    assert!(!mesh.is_boundary_vertex(v(0)));
    assert!(mesh.is_boundary_vertex(v(1)));
    assert!(mesh.is_vertex_incident_on_more_than_two_edges(v(0)));
    assert_eq!(mesh.count_boundary_edges(), 3);
    assert!(mesh.check_manifold().is_manifold());
}

#[test]
fn add_cell_errors() {
    let mut mesh = two_triangles();

    match mesh.add_cell(c(5), &[v(0), v(1)]) {
        Err(Error::TooFewCellVertices(2)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match mesh.add_cell(c(1), &[v(0), v(1), v(3)]) {
        Err(Error::CellExists(cell)) => assert_eq!(cell, c(1)),
        other => panic!("unexpected result: {:?}", other),
    }
    match mesh.add_vertex(v(2)) {
        Err(Error::VertexExists(vertex)) => assert_eq!(vertex, v(2)),
        other => panic!("unexpected result: {:?}", other),
    }
    match mesh.set_coord_component(v(9), 3, 1.0) {
        Err(Error::CoordIndexOutOfRange(3)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match mesh.delete_cell(c(7)) {
        Err(Error::UnknownCell(cell)) => assert_eq!(cell, c(7)),
        other => panic!("unexpected result: {:?}", other),
    }
    match mesh.split_edge(he(100)) {
        Err(Error::UnknownHalfEdge(h)) => assert_eq!(h, he(100)),
        other => panic!("unexpected result: {:?}", other),
    }

    // Nothing was changed, in particular vertex 9 was not created.
    assert!(!mesh.contains_vertex(v(9)));
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 6,
        edges: 5,
        boundary_edges: 4,
        cells: 2,
    });
}

#[test]
fn add_cell_creates_vertices() -> Result<(), Error> {
    let mut mesh = HalfEdgeMesh::new();
    mesh.add_cell(c(3), &[v(5), v(2), v(7)])?;

    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.max_vertex_index(), Some(v(7)));
    assert_eq!(mesh.max_cell_index(), Some(c(3)));
    assert_eq!(mesh.add_new_cell(&[v(7), v(2), v(8)])?, c(4));
    assert!(mesh.check_all().is_ok());

    Ok(())
}

#[test]
fn set_coord() -> Result<(), Error> {
    let mut mesh = HalfEdgeMesh::new();
    mesh.set_coord(v(2), [1.0, 2.0, 3.0]);
    mesh.set_coord_component(v(2), 1, 5.0)?;
    mesh.set_coord_component(v(4), 0, -1.0)?;

    assert_eq!(mesh.position(v(2)), Point3::new(1.0, 5.0, 3.0));
    assert_eq!(mesh.position(v(4)), Point3::new(-1.0, 0.0, 0.0));
    assert_eq!(mesh.num_vertices(), 2);
    assert_eq!(mesh.max_vertex_index(), Some(v(4)));

    Ok(())
}

#[test]
fn delete_cell() -> Result<(), Error> {
    let mut mesh = two_triangles();
    mesh.delete_cell(c(1))?;

    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 3,
        edges: 3,
        boundary_edges: 3,
        cells: 1,
    });
    assert_eq!(mesh.count_isolated_vertices(), 1);
    assert!(mesh[v(3)].is_isolated());
    assert_eq!(mesh[v(1)].outgoing(), [he(1)]);
    assert!(mesh.is_boundary_half_edge(he(1)));

    // IDs are never reused.
    assert_eq!(mesh.add_new_cell(&[v(1), v(3), v(2)])?, c(2));
    assert_eq!(mesh.cell_half_edges(c(2)).collect::<Vec<_>>(), [he(6), he(7), he(8)]);
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 6,
        edges: 5,
        boundary_edges: 4,
        cells: 2,
    });

    Ok(())
}


// ===============================================================================================
// ===== Splitting
// ===============================================================================================

#[test]
fn split_boundary_edge() -> Result<(), Error> {
    let mut mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
        &[&[0, 1, 2]],
    );
    let vnew = mesh.split_edge(he(0))?;

    assert_eq!(vnew, v(3));
    assert_eq!(mesh.position(vnew), Point3::new(1.0, 0.0, 0.0));
    assert_eq!(mesh.cell_vertices(c(0)).collect::<Vec<_>>(), [v(0), v(3), v(1), v(2)]);
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 4,
        edges: 4,
        boundary_edges: 4,
        cells: 1,
    });

    Ok(())
}

#[test]
fn split_interior_edge() -> Result<(), Error> {
    let mut mesh = two_triangles();
    let vnew = mesh.split_edge(he(1))?;

    assert_eq!(vnew, v(4));
    assert_eq!(mesh.position(vnew), Point3::new(0.5, 0.5, 0.0));
    assert_eq!(mesh.cell_vertices(c(0)).collect::<Vec<_>>(), [v(0), v(1), v(4), v(2)]);
    assert_eq!(mesh.cell_vertices(c(1)).collect::<Vec<_>>(), [v(1), v(3), v(2), v(4)]);
    assert_eq!(mesh[vnew].num_outgoing(), 2);
    assert!(!mesh.is_boundary_vertex(vnew));
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 8,
        edges: 6,
        boundary_edges: 4,
        cells: 2,
    });
    assert!(mesh.check_manifold().is_manifold());
    assert!(mesh.check_orientation().is_oriented());

    Ok(())
}

#[test]
fn split_cell_into_quads() -> Result<(), Error> {
    let mut mesh = square();
    let vnew = mesh.split_cell_into_quads(he(0))?;

    assert_eq!(vnew, v(4));
    assert_eq!(mesh.position(vnew), Point3::new(1.0, 1.0, 0.0));
    assert!(!mesh.contains_cell(c(0)));
    assert_eq!(mesh.cell_vertices(c(1)).collect::<Vec<_>>(), [v(4), v(0), v(1), v(2)]);
    assert_eq!(mesh.cell_vertices(c(2)).collect::<Vec<_>>(), [v(4), v(2), v(3), v(0)]);
    assert_eq!(mesh.count_quads(), 2);
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 8,
        edges: 6,
        boundary_edges: 4,
        cells: 2,
    });
    assert!(mesh.check_orientation().is_oriented());

    Ok(())
}

#[test]
fn split_triangle_into_quads_fails() {
    let mut mesh = two_triangles();
    match mesh.split_cell_into_quads(he(0)) {
        Err(Error::CannotSplitIntoQuads { cell, num_vertices: 3 }) => assert_eq!(cell, c(0)),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(mesh.num_cells(), 2);
}

#[test]
fn split_cell() -> Result<(), Error> {
    let mut mesh = square();
    let diag = mesh.split_cell(he(0), he(2))?.expect("split refused");

    // The square is replaced by two new cells, the old handle is gone.
    assert!(mesh.cell(c(0)).is_none());
    assert_eq!(mesh.cell_handles().collect::<Vec<_>>(), [c(1), c(2)]);
    assert_eq!(mesh.max_cell_index(), Some(c(2)));
    assert_eq!(mesh.cell_vertices(c(1)).collect::<Vec<_>>(), [v(0), v(1), v(2)]);
    assert_eq!(mesh.cell_vertices(c(2)).collect::<Vec<_>>(), [v(2), v(3), v(0)]);

    assert_eq!(mesh.from_vertex(diag), v(0));
    assert_eq!(mesh.to_vertex(diag), v(2));
    assert_eq!(mesh[diag].cell(), c(2));
    assert_eq!(mesh.next_cell_around_edge(diag), c(1));
    assert_eq!(mesh.count_triangles(), 2);
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 6,
        edges: 5,
        boundary_edges: 4,
        cells: 2,
    });
    assert!(mesh.check_manifold().is_manifold());
    assert!(mesh.check_orientation().is_oriented());

    Ok(())
}

#[test]
fn split_cell_refusals() -> Result<(), Error> {
    // The triangle shares the (non-)diagonal (0, 2) of the square.
    //
    //    (3) ----- (2)
    //     |       / |
    //     |     /   |
    //     |   /    (4)
    //     | /
    //    (0) ----- (1)
    let mut mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0], [3.0, 1.0, 0.0]],
        &[&[0, 1, 2, 3], &[0, 2, 4]],
    );
    let tri = mesh.cell_half_edges(c(1)).next().unwrap();

    assert_eq!(mesh.illegal_split_cell(he(0), he(0)), Some(SplitCellRefusal::SameHalfEdge));
    assert_eq!(mesh.illegal_split_cell(he(0), he(1)), Some(SplitCellRefusal::AdjacentVertices));
    assert_eq!(mesh.illegal_split_cell(he(0), tri), Some(SplitCellRefusal::DifferentCells));
    assert_eq!(
        mesh.illegal_split_cell(he(0), he(2)),
        Some(SplitCellRefusal::DiagonalExists(v(0), v(2))),
    );
    assert_eq!(mesh.illegal_split_cell(he(1), he(3)), None);

    assert_eq!(mesh.split_cell(he(0), he(2))?, None);
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 7,
        edges: 7,
        boundary_edges: 7,
        cells: 2,
    });

    Ok(())
}

#[test]
fn triangulate_pentagon() -> Result<(), Error> {
    let mut mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 1.0, 0.0], [1.0, 3.0, 0.0], [-1.0, 1.0, 0.0]],
        &[&[0, 1, 2, 3, 4]],
    );
    assert!(!mesh.does_triangulate_cell_from_vertex_change_topology(he(0)));
    mesh.triangulate_cell_from_vertex(he(0))?;

    assert_eq!(mesh.count_triangles(), 3);
    assert_eq!(mesh.cell_vertices(c(1)).collect::<Vec<_>>(), [v(0), v(1), v(2)]);
    assert_eq!(mesh.cell_vertices(c(2)).collect::<Vec<_>>(), [v(0), v(2), v(3)]);
    assert_eq!(mesh.cell_vertices(c(3)).collect::<Vec<_>>(), [v(0), v(3), v(4)]);
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 9,
        edges: 7,
        boundary_edges: 5,
        cells: 3,
    });

    // Triangles stay as they are.
    mesh.triangulate_cell_from_vertex(he(9))?;
    assert_eq!(mesh.num_cells(), 3);

    Ok(())
}

#[test]
fn triangulation_diagonal_exists() {
    // Same as in `split_cell_refusals`: the fan from 0 would duplicate (0, 2).
    let mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0], [3.0, 1.0, 0.0]],
        &[&[0, 1, 2, 3], &[0, 2, 4]],
    );
    assert!(mesh.does_triangulate_cell_from_vertex_change_topology(he(0)));
    assert!(!mesh.does_triangulate_cell_from_vertex_change_topology(he(1)));
}


// ===============================================================================================
// ===== Collapsing and joining
// ===============================================================================================

#[test]
fn collapse_edge_in_quad_strip() -> Result<(), Error> {
    let mut mesh = quad_strip();
    let h = mesh.find_half_edge_to(v(1), v(4)).unwrap();
    assert!(!mesh.is_illegal_edge_collapse_h(h));

    let survivor = mesh.collapse_edge(h)?;

    assert_eq!(survivor, Some(v(4)));
    assert!(!mesh.contains_vertex(v(1)));
    assert_eq!(mesh.position(v(4)), Point3::new(1.0, 0.5, 0.0));
    assert_eq!(mesh.cell_vertices(c(0)).collect::<Vec<_>>(), [v(0), v(4), v(3)]);
    assert_eq!(mesh.cell_vertices(c(1)).collect::<Vec<_>>(), [v(4), v(2), v(5)]);
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 6,
        edges: 6,
        boundary_edges: 6,
        cells: 2,
    });

    Ok(())
}

#[test]
fn collapse_deletes_triangles() -> Result<(), Error> {
    let mut mesh = two_triangles();

    let change = mesh.edge_collapse_topology_change(he(1));
    assert!(change.interior_edge_with_boundary_vertices);
    assert!(change.changes_topology());
    assert_eq!(mesh.collapse_edge_checked(he(1), false)?, None);
    assert_eq!(mesh.num_cells(), 2);

    assert_eq!(mesh.collapse_edge_checked(he(1), true)?, Some(v(2)));
    check_mesh!(mesh => {
        vertices: 3,
        half_edges: 0,
        edges: 0,
        boundary_edges: 0,
        cells: 0,
    });
    assert_eq!(mesh.count_isolated_vertices(), 3);

    Ok(())
}

#[test]
fn illegal_collapse_leaves_mesh_unchanged() -> Result<(), Error> {
    // Vertices 0 and 2 are opposite corners of the square, but connected by
    // an edge of the triangle.
    let mut mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0], [3.0, 1.0, 0.0]],
        &[&[0, 1, 2, 3], &[0, 2, 4]],
    );
    let h = mesh.find_half_edge_to(v(0), v(2)).unwrap();

    assert!(mesh.is_illegal_edge_collapse(v(0), v(2)));
    assert!(mesh.is_illegal_edge_collapse(v(2), v(0)));
    assert!(!mesh.is_illegal_edge_collapse(v(0), v(1)));
    assert_eq!(mesh.collapse_edge(h)?, None);
    check_mesh!(mesh => {
        vertices: 5,
        half_edges: 7,
        edges: 7,
        boundary_edges: 7,
        cells: 2,
    });

    Ok(())
}

#[test]
fn tetrahedron_collapse_refused() -> Result<(), Error> {
    let mut mesh = tetrahedron();
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 12,
        edges: 6,
        boundary_edges: 0,
        cells: 4,
    });
    assert!(mesh.check_manifold().is_manifold());
    assert!(mesh.check_orientation().is_oriented());

    for cell in mesh.cell_handles() {
        assert!(mesh.is_in_tetrahedron(cell));
        assert!(!mesh.is_isolated_triangle(cell));
    }

    for h in mesh.edge_list() {
        assert!(mesh.edge_collapse_topology_change(h).in_tetrahedron);
        assert_eq!(mesh.collapse_edge_checked(h, false)?, None);
    }
    assert_eq!(mesh.num_cells(), 4);

    Ok(())
}

#[test]
fn join_two_triangles() -> Result<(), Error> {
    let mut mesh = two_triangles();
    assert_eq!(mesh.illegal_join_two_cells(he(1)), None);

    let cell = mesh.join_two_cells(he(1))?;

    assert_eq!(cell, Some(c(0)));
    assert!(!mesh.contains_cell(c(1)));
    assert_eq!(mesh.cell_vertices(c(0)).collect::<Vec<_>>(), [v(0), v(1), v(3), v(2)]);
    check_mesh!(mesh => {
        vertices: 4,
        half_edges: 4,
        edges: 4,
        boundary_edges: 4,
        cells: 1,
    });

    Ok(())
}

#[test]
fn join_refusals() -> Result<(), Error> {
    let mut mesh = two_triangles();
    assert_eq!(mesh.illegal_join_two_cells(he(0)), Some(JoinRefusal::BoundaryEdge));
    assert_eq!(mesh.join_two_cells(he(0))?, None);

    // Vertex 1 is an interior vertex with only two incident edges.
    //
    //         (0)
    //       /  |  \
    //      /   |   \
    //    (2)  (1)  (3)
    //      \   |   /
    //       \  |  /
    //         (4)
    let mesh = mesh_with(
        &[[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
        &[&[0, 1, 4, 2], &[1, 0, 3, 4]],
    );
    let h = mesh.find_half_edge_to(v(0), v(1)).unwrap();
    assert_eq!(mesh.illegal_join_two_cells(h), Some(JoinRefusal::LowDegreeVertex(v(1))));

    // The cells share the vertices 0, 1 and 2, but only the edge (0, 1).
    let mesh = mesh_with(
        &[
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0], [2.0, -1.0, 0.0], [2.0, 1.0, 0.0],
        ],
        &[&[0, 1, 2, 3], &[1, 0, 4, 5, 2, 6]],
    );
    assert_eq!(mesh.illegal_join_two_cells(he(0)), Some(JoinRefusal::SharedVertices(3)));

    // Three cells around one edge.
    let mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
        &[&[0, 1, 2], &[1, 0, 3], &[0, 1, 4]],
    );
    assert_eq!(mesh.illegal_join_two_cells(he(0)), Some(JoinRefusal::NonManifoldEdge));

    Ok(())
}

#[test]
fn join_refuses_inconsistent_orientation() -> Result<(), Error> {
    // Cells 0 and 1 both contain the half edge (0,1). Cells 2 and 3 only
    // give vertices 0 and 1 a third incident edge.
    //
    //    (3) ----- (2)
    //     |    0    |
    //    (0) ----- (1)
    //     |    1    |
    //    (5) ----- (4)
    let mut mesh = mesh_with(
        &[
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0], [1.0, -1.0, 0.0], [0.0, -1.0, 0.0],
        ],
        &[&[0, 1, 2, 3], &[0, 1, 4, 5], &[0, 3, 5], &[1, 2, 4]],
    );
    let h = mesh.find_half_edge_to(v(0), v(1)).unwrap();
    assert!(!mesh.check_orientation().is_oriented());

    assert_eq!(mesh.illegal_join_two_cells(h), Some(JoinRefusal::InconsistentOrientation));
    assert_eq!(mesh.join_two_cells(h)?, None);
    assert_eq!(mesh.num_cells(), 4);
    assert_eq!(mesh.cell_vertices(c(0)).collect::<Vec<_>>(), [v(0), v(1), v(2), v(3)]);

    Ok(())
}


// ===============================================================================================
// ===== Checks
// ===============================================================================================

#[test]
fn non_manifold_edge() {
    let mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
        &[&[0, 1, 2], &[1, 0, 3], &[0, 1, 4]],
    );
    assert!(mesh.check_all().is_ok());
    assert_eq!(mesh.count_half_edges_around_edge(he(0)), 3);

    let info = mesh.check_manifold();
    assert!(!info.manifold_edges);
    assert_eq!(info.half_edge, Some(he(0)));
    assert!(!info.is_manifold());
}

#[test]
fn non_manifold_vertex() {
    // Two triangles touching in vertex 0 only.
    //
    //    (2)           (3)
    //     |  \       /  |
    //     |    (0)      |
    //     |  /       \  |
    //    (1)           (4)
    let mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [-1.0, -1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, -1.0, 0.0]],
        &[&[0, 2, 1], &[0, 4, 3]],
    );
    assert!(mesh.check_all().is_ok());

    let info = mesh.check_manifold();
    assert!(info.manifold_edges);
    assert!(!info.manifold_vertices);
    assert_eq!(info.vertex, Some(v(0)));
}

#[test]
fn inconsistent_orientation() {
    let mesh = mesh_with(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        &[&[0, 1, 2], &[1, 2, 3]],
    );
    assert!(mesh.check_all().is_ok());

    let info = mesh.check_orientation();
    assert!(!info.is_oriented());
    assert_eq!(info.half_edge, Some(he(1)));
}

#[test]
fn check_detects_wrong_vertex_count() {
    let mut mesh = two_triangles();
    mesh.cells[c(0)].num_vertices = 4;

    let info = mesh.check_cells();
    assert_eq!(info.index, Some(0));
    assert_eq!(info.message, "Incorrect number of vertices (4) stored in cell 0. Counted 3 vertices.");

    mesh.cells[c(0)].num_vertices = 2;
    let info = mesh.check_cells();
    assert_eq!(
        info.message,
        "Incorrect number of vertices (2) stored in cell 0. Cell has more than 2 vertices.",
    );
}

#[test]
fn check_detects_boundary_order() {
    let mut mesh = two_triangles();
    mesh.vertices[v(1)].outgoing.swap(0, 1);

    let info = mesh.check_vertices();
    assert_eq!(info.index, Some(1));
    assert_eq!(
        info.message,
        "Vertex 1 is on a boundary half edge 3 (1,3) but first incident half edge \
            is not a boundary half edge.",
    );
    assert!(!mesh.check_all().is_ok());
}

#[test]
fn check_detects_dangling_handles() {
    let mut mesh = two_triangles();
    mesh.half_edges[he(4)].next = he(42);

    let info = mesh.check_half_edges();
    assert_eq!(info.index, Some(4));
    assert_eq!(info.message, "Half edge 4 (3,*) is missing next half edge in cell.");
}

#[test]
fn check_vertex_index() {
    assert_eq!(HalfEdgeMesh::new().check_vertex_index(v(0)).message, "Mesh has no vertices.");

    let mut mesh = two_triangles();
    assert!(mesh.check_vertex_index(v(3)).is_ok());
    assert_eq!(
        mesh.check_vertex_index(v(4)).message,
        "Illegal vertex index: 4\n  Maximum vertex index: 3",
    );

    mesh.delete_cell(c(1)).unwrap();
    mesh.vertices.remove(v(3));
    assert_eq!(
        mesh.check_vertex_index(v(3)).message,
        "Illegal vertex index: 3\n  Vertex does not exist.",
    );
}
