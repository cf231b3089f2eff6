use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{
    core::HalfEdgeMesh,
    handle::{hsize, CellHandle, Handle, VertexHandle},
};
use super::Error;


/// Reads an OFF file from `reader` into `mesh`.
///
/// Vertices `0..numv` are created (or, if they exist already, their position
/// is overwritten) and polygon `j` is added as cell `j`. The mesh is usually
/// empty before; if it already contains a cell with one of those handles, an
/// error is returned.
pub fn read(reader: impl BufRead, mesh: &mut HalfEdgeMesh) -> Result<(), Error> {
    let mut lines = Lines::new(reader);

    match lines.next_raw()?.map(|line| line.trim() == "OFF") {
        None => return Err(lines.error("file is empty")),
        Some(true) => {}
        Some(false) => return Err(lines.error("file does not begin with OFF")),
    }

    // ----- Header ------------------------------------------------------------------------------
    let header = lines.next_content()?
        .ok_or_else(|| lines.error("file does not contain the number of vertices and polygons"))?;
    let mut fields = header.split_whitespace();
    let numv = lines.parse::<hsize>(fields.next(), "number of vertices")?;
    let numpoly = lines.parse::<hsize>(fields.next(), "number of polygons")?;

    // ----- Vertices ----------------------------------------------------------------------------
    mesh.add_vertices(numv);
    for iv in 0..numv {
        let line = lines.next_content()?
            .ok_or_else(|| lines.error("file is missing some vertex coordinates"))?;
        let mut fields = line.split_whitespace();
        let what = format!("coordinate of vertex {}", iv);
        let x = lines.parse::<f32>(fields.next(), &what)?;
        let y = lines.parse::<f32>(fields.next(), &what)?;
        let z = lines.parse::<f32>(fields.next(), &what)?;

        mesh.set_coord(VertexHandle::new(iv), [x, y, z]);
    }

    // ----- Polygons ----------------------------------------------------------------------------
    let mut vertices = Vec::new();
    for ipoly in 0..numpoly {
        let line = lines.next_content()?
            .ok_or_else(|| lines.error("file is missing some polygons"))?;
        let mut fields = line.split_whitespace();
        let what = format!("vertex of polygon {}", ipoly);
        let k = lines.parse::<usize>(fields.next(), &format!("size of polygon {}", ipoly))?;

        vertices.clear();
        for _ in 0..k {
            let idx = lines.parse::<hsize>(fields.next(), &what)?;
            if idx >= numv {
                return Err(lines.error(format!(
                    "polygon {} refers to vertex {}, but the file only has {} vertices",
                    ipoly,
                    idx,
                    numv,
                )));
            }
            vertices.push(VertexHandle::new(idx));
        }

        mesh.add_cell(CellHandle::new(ipoly), &vertices)
            .map_err(|cause| Error::Mesh { line: lines.line, cause })?;
    }

    Ok(())
}

/// Opens the file at `path` and reads it into a new mesh.
pub fn read_file(path: impl AsRef<Path>) -> Result<HalfEdgeMesh, Error> {
    let file = File::open(path)?;
    let mut mesh = HalfEdgeMesh::new();
    read(BufReader::new(file), &mut mesh)?;

    Ok(mesh)
}


/// Line reader that keeps track of the current line number.
struct Lines<R> {
    reader: R,
    buf: String,

    /// 1-based number of the line last read.
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Returns the next line, whatever it contains.
    fn next_raw(&mut self) -> Result<Option<&str>, Error> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        Ok(Some(&self.buf))
    }

    /// Returns the next line that is neither blank nor a comment, trimmed.
    fn next_content(&mut self) -> Result<Option<String>, Error> {
        loop {
            match self.next_raw()? {
                None => return Ok(None),
                Some(line) => {
                    let line = line.trim();
                    if !line.is_empty() && !line.starts_with('#') {
                        return Ok(Some(line.to_owned()));
                    }
                }
            }
        }
    }

    fn parse<T: FromStr>(&self, field: Option<&str>, what: &str) -> Result<T, Error> {
        let field = field.ok_or_else(|| self.error(format!("missing {}", what)))?;
        field.parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, field)))
    }

    fn error(&self, msg: impl Into<String>) -> Error {
        Error::Parse {
            line: self.line,
            msg: msg.into(),
        }
    }
}
