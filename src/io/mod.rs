//! Reading and writing meshes from and to files.
//!
//! Currently, only the ASCII OFF format is supported (see [`off`]). The
//! whole module can be disabled by turning off the default `io` feature.

pub mod off;
