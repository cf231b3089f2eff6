use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    core::HalfEdgeMesh,
    handle::{Handle, VertexHandle},
};
use super::Error;


/// Writes `mesh` as OFF file to `w`.
///
/// The file lists the vertices `0..=max_vertex_index` (vertices that do not
/// exist are written as `0.0 0.0 0.0`) and all cells in ascending handle
/// order. Each cell starts at the `from` vertex of its stored half edge.
pub fn write(mut w: impl Write, mesh: &HalfEdgeMesh) -> Result<(), Error> {
    let numv = mesh.max_vertex_index().map(|v| v.to_usize() + 1).unwrap_or(0);

    writeln!(w, "OFF")?;
    writeln!(w, "{} {} 0", numv, mesh.num_cells())?;
    writeln!(w)?;

    for iv in 0..numv {
        match mesh.vertex(VertexHandle::from_usize(iv)) {
            Some(vertex) => {
                let p = vertex.position();
                writeln!(w, "{:?} {:?} {:?}", p.x, p.y, p.z)?;
            }
            None => writeln!(w, "0.0 0.0 0.0")?,
        }
    }
    writeln!(w)?;

    for c in mesh.cell_handles() {
        write!(w, "{} ", mesh[c].num_vertices())?;
        for v in mesh.cell_vertices(c) {
            write!(w, " {}", v)?;
        }
        writeln!(w)?;
    }

    w.flush()?;
    Ok(())
}

/// Writes `mesh` to the file at `path`. Overwrites the file if it already
/// exists.
pub fn write_file(path: impl AsRef<Path>, mesh: &HalfEdgeMesh) -> Result<(), Error> {
    write(BufWriter::new(File::create(path)?), mesh)
}
