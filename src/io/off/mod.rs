//! Reading and writing the ASCII OFF format.
//!
//! An OFF file looks like this:
//!
//! ```text
//! OFF
//! # comment
//! 4 2 0
//!
//! 0.0 0.0 0.0
//! 1.0 0.0 0.0
//! 0.0 1.0 0.0
//! 1.0 1.0 0.0
//!
//! 3  0 1 2
//! 3  1 3 2
//! ```
//!
//! The first line is the keyword `OFF`. It is followed by the number of
//! vertices, the number of polygons and (optionally) the number of edges,
//! which is ignored. Then all vertex coordinates follow, one vertex per line,
//! and then all polygons: the number of vertices `k` followed by `k` vertex
//! indices. Blank lines and lines starting with `#` are skipped everywhere.
//!
//! Vertex `i` of the file becomes vertex `i` of the mesh and the `j`th
//! polygon becomes cell `j`.

use std::io;

use failure::Fail;

use crate::core;


mod read;
mod write;

pub use self::{
    read::{read, read_file},
    write::{write, write_file},
};


/// Everything that can go wrong when reading or writing an OFF file.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "IO error: {}", _0)]
    Io(#[cause] io::Error),

    /// The file is not a valid OFF file. `line` is 1-based.
    #[fail(display = "invalid OFF file (line {}): {}", line, msg)]
    Parse {
        line: usize,
        msg: String,
    },

    /// The file is syntactically fine, but a polygon could not be added to
    /// the mesh.
    #[fail(display = "invalid OFF file (line {}): {}", line, cause)]
    Mesh {
        line: usize,
        #[cause]
        cause: core::Error,
    },
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}
