//! Longer sequences of edits on grid meshes. The mesh has to stay consistent
//! after each of them.

use hedge::{
    algo::decimate,
    hsize, HalfEdgeMesh, Handle, VertexHandle,
};


/// Creates a grid of `n * n` unit quads in the xy plane. Vertex `(x, y)` has
/// the handle `y * (n + 1) + x`.
///
/// ```text
///   (6) --- (7) --- (8)
///    |   2   |   3   |
///   (3) --- (4) --- (5)
///    |   0   |   1   |
///   (0) --- (1) --- (2)
/// ```
fn quad_grid(n: hsize) -> HalfEdgeMesh {
    let mut mesh = HalfEdgeMesh::new();
    let idx = |x: hsize, y: hsize| VertexHandle::new(y * (n + 1) + x);
    for y in 0..=n {
        for x in 0..=n {
            mesh.set_coord(idx(x, y), [x as f32, y as f32, 0.0]);
        }
    }
    for y in 0..n {
        for x in 0..n {
            mesh.add_new_cell(&[idx(x, y), idx(x + 1, y), idx(x + 1, y + 1), idx(x, y + 1)])
                .unwrap();
        }
    }

    mesh
}

fn assert_valid(mesh: &HalfEdgeMesh) {
    let info = mesh.check_all();
    assert!(info.is_ok(), "mesh is corrupted: {}", info.message);
}

fn assert_consistent(mesh: &HalfEdgeMesh) {
    assert_valid(mesh);
    assert_eq!(decimate::check_oriented_manifold(mesh), None);
}

#[test]
fn grid_counts() {
    let mesh = quad_grid(2);

    assert_eq!(mesh.num_vertices(), 9);
    assert_eq!(mesh.num_cells(), 4);
    assert_eq!(mesh.count_edges(), 12);
    assert_eq!(mesh.count_boundary_edges(), 8);
    assert!(!mesh.is_boundary_vertex(VertexHandle::new(4)));
    assert!(mesh.is_boundary_vertex(VertexHandle::new(1)));
    assert_consistent(&mesh);
}

#[test]
fn splitting_all_edges_doubles_boundary() {
    let mut mesh = quad_grid(2);
    let boundary = mesh.count_boundary_edges();

    for he in mesh.edge_list() {
        mesh.split_edge(he).unwrap();
        assert_consistent(&mesh);
    }
    assert_eq!(mesh.count_boundary_edges(), 2 * boundary);
    assert_eq!(mesh.count_cells_of_size(8), 4);

    // Every cell has an even number of vertices now. Splitting them into
    // quads does not touch the boundary.
    let cells = mesh.cell_handles().collect::<Vec<_>>();
    for c in cells {
        let he = mesh[c].half_edge();
        mesh.split_cell_into_quads(he).unwrap();
        assert_consistent(&mesh);
    }
    assert_eq!(mesh.count_boundary_edges(), 2 * boundary);

    // Same counts as a 4x4 grid.
    assert_eq!(mesh.num_vertices(), 25);
    assert_eq!(mesh.num_cells(), 16);
    assert_eq!(mesh.count_quads(), 16);
    assert_eq!(mesh.count_edges(), 40);
}

#[test]
fn manifold_fan_walk() {
    let mut mesh = quad_grid(2);
    let c = mesh.cell_handles().next().unwrap();
    let he = mesh[c].half_edge();
    mesh.triangulate_cell_from_vertex(he).unwrap();

    assert!(mesh.check_manifold().is_manifold());
    for v in mesh.vertex_handles() {
        let outgoing = mesh[v].outgoing();
        let he0 = outgoing[0];

        // Walk around `v` until we are back at the start or hit the
        // boundary. Count the cells visited.
        let mut cells = vec![mesh[he0].cell()];
        let mut he = mesh.prev_half_edge_around_vertex(he0, v);
        while he != he0 && !mesh.is_boundary_half_edge(he) {
            cells.push(mesh[he].cell());
            he = mesh.prev_half_edge_around_vertex(he, v);
        }

        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), outgoing.len(), "wrong number of cells around {}", v);
    }
}

#[test]
fn mixed_edits_keep_mesh_consistent() {
    let mut mesh = quad_grid(3);

    // Split every second edge.
    for he in mesh.edge_list().into_iter().step_by(2) {
        mesh.split_edge(he).unwrap();
        assert_consistent(&mesh);
    }

    // Triangulate every third cell.
    let cells = mesh.cell_handles().collect::<Vec<_>>();
    for c in cells.into_iter().step_by(3) {
        let he = mesh[c].half_edge();
        if !mesh.does_triangulate_cell_from_vertex_change_topology(he) {
            mesh.triangulate_cell_from_vertex(he).unwrap();
            assert_consistent(&mesh);
        }
    }

    // Collapse all edges that can be collapsed without changing the
    // topology.
    let mut num_collapsed = 0;
    for he in mesh.edge_list() {
        if !mesh.contains_half_edge(he) {
            continue;
        }

        let num_cells = mesh.num_cells();
        match mesh.collapse_edge_checked(he, false).unwrap() {
            Some(v) => {
                num_collapsed += 1;
                assert!(mesh.contains_vertex(v));
                assert_valid(&mesh);
            }
            None => assert_eq!(mesh.num_cells(), num_cells),
        }
    }
    assert!(num_collapsed > 0);

    // Join across all legal edges.
    for he in mesh.edge_list() {
        if mesh.contains_half_edge(he) && !mesh.is_illegal_join_two_cells(he) {
            assert!(mesh.join_two_cells(he).unwrap().is_some());
            assert_valid(&mesh);
        }
    }

    // Finally delete all cells. Only isolated vertices remain.
    let cells = mesh.cell_handles().collect::<Vec<_>>();
    for c in cells {
        mesh.delete_cell(c).unwrap();
        assert_valid(&mesh);
    }
    assert_eq!(mesh.num_half_edges(), 0);
    assert_eq!(mesh.count_isolated_vertices(), mesh.num_vertices() as usize);
}
