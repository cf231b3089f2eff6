//! Algorithms built on top of the editing operations of the mesh.

pub mod decimate;
pub mod quads;

pub use self::{
    decimate::{decimate, DecimateConfig, Event},
    quads::{split_into_quads, QuadsSummary},
};
