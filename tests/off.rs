//! Reading and writing OFF files through the file system.

#![cfg(feature = "io")]

use std::{fs, path::PathBuf};

use hedge::{
    io::off::{self, Error},
    HalfEdgeMesh, Handle, VertexHandle,
};


/// Returns a path in the temporary directory that is unique for this test
/// binary and `name`.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hedge-test-{}-{}.off", std::process::id(), name))
}

/// ```text
///    (3) ----- (4) ----- (5)
///     |         |  2  /   |
///     |    0    |   /  1  |
///     |         | /       |
///    (0) ----- (1) ----- (2)
/// ```
const MIXED: &str = "\
OFF
6 3 0
0 0 0
1 0 0
2 0 0
0 1 0
1 1 0.25
2 1 0
4 0 1 4 3
3 1 2 5
3 1 5 4
";

fn cells_of(mesh: &HalfEdgeMesh) -> Vec<Vec<VertexHandle>> {
    mesh.cell_handles().map(|c| mesh.cell_vertices(c).collect()).collect()
}

#[test]
fn round_trip() -> Result<(), Error> {
    let mut original = HalfEdgeMesh::new();
    off::read(MIXED.as_bytes(), &mut original)?;
    assert!(original.check_all().is_ok());

    let path = temp_path("round-trip");
    off::write_file(&path, &original)?;
    let copy = off::read_file(&path)?;
    fs::remove_file(&path)?;

    assert_eq!(copy.num_vertices(), original.num_vertices());
    assert_eq!(copy.num_cells(), original.num_cells());
    for v in original.vertex_handles() {
        assert_eq!(copy.position(v), original.position(v));
    }
    assert_eq!(cells_of(&copy), cells_of(&original));
    assert!(copy.check_all().is_ok());

    Ok(())
}

#[test]
fn round_trip_after_edits() -> Result<(), Error> {
    let mut mesh = HalfEdgeMesh::new();
    off::read(MIXED.as_bytes(), &mut mesh)?;

    // Collapsing (0,1) removes vertex 0 and leaves a gap in the vertex IDs.
    let he = mesh.find_edge(VertexHandle::new(0), VertexHandle::new(1)).unwrap();
    assert_eq!(mesh.collapse_edge(he).unwrap(), Some(VertexHandle::new(1)));
    assert!(!mesh.contains_vertex(VertexHandle::new(0)));

    let mut buf = Vec::new();
    off::write(&mut buf, &mesh)?;
    let mut copy = HalfEdgeMesh::new();
    off::read(&buf[..], &mut copy)?;

    // The gap is filled with a vertex at the origin that is not used by any
    // cell.
    assert_eq!(copy.num_vertices(), 6);
    assert!(copy[VertexHandle::new(0)].is_isolated());
    assert_eq!(copy.position(VertexHandle::new(1)), mesh.position(VertexHandle::new(1)));
    assert_eq!(cells_of(&copy), cells_of(&mesh));
    assert!(copy.check_all().is_ok());

    Ok(())
}

#[test]
fn missing_file() {
    match off::read_file(temp_path("does-not-exist")) {
        Err(Error::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}
