//! Edge length and angle statistics of a mesh.
//!
//! Lengths are reported squared. Angles are reported as cosines: keep in
//! mind that the *smallest* angle has the *largest* cosine. Vertices incident
//! on an edge of length 0 have no defined angle and are skipped; this is
//! reported via `flag_zero`.

use crate::{
    core::HalfEdgeMesh,
    handle::{CellHandle, HalfEdgeHandle},
    math,
};


/// Minimum and maximum of some value over a set of half edges, together
/// with the half edges where they are attained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxInfo {
    pub min: f64,
    pub imin: Option<HalfEdgeHandle>,
    pub max: f64,
    pub imax: Option<HalfEdgeHandle>,
}

impl MinMaxInfo {
    fn new(val: f64, he: HalfEdgeHandle) -> Self {
        Self {
            min: val,
            imin: Some(he),
            max: val,
            imax: Some(he),
        }
    }

    fn update(&mut self, val: f64, he: HalfEdgeHandle) {
        if val < self.min {
            self.min = val;
            self.imin = Some(he);
        }
        if val > self.max {
            self.max = val;
            self.imax = Some(he);
        }
    }
}

impl Default for MinMaxInfo {
    fn default() -> Self {
        Self {
            min: 0.0,
            imin: None,
            max: 0.0,
            imax: None,
        }
    }
}

/// Ratio of the shortest to the longest edge (both squared) of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinCellRatioInfo {
    /// `lengths.min / lengths.max`. 1.0 if not computed.
    pub ratio: f64,
    pub cell: Option<CellHandle>,
    pub lengths: MinMaxInfo,
}

impl Default for MinCellRatioInfo {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            cell: None,
            lengths: MinMaxInfo::default(),
        }
    }
}

/// Cosines of the smallest and largest angle, together with the half edges
/// whose `from` vertex forms the angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosMinMaxAngleInfo {
    pub cos_min_angle: f64,
    pub imin: Option<HalfEdgeHandle>,
    pub cos_max_angle: f64,
    pub imax: Option<HalfEdgeHandle>,

    /// `true` if some vertex was skipped because it is incident on an edge
    /// of length 0.
    pub flag_zero: bool,
}

impl CosMinMaxAngleInfo {
    /// The smallest angle in degrees.
    pub fn min_angle_degrees(&self) -> f64 {
        self.cos_min_angle.acos().to_degrees()
    }

    /// The largest angle in degrees.
    pub fn max_angle_degrees(&self) -> f64 {
        self.cos_max_angle.acos().to_degrees()
    }

    fn set_min(&mut self, cos_angle: f64, he: Option<HalfEdgeHandle>) {
        self.cos_min_angle = cos_angle;
        self.imin = he;
    }

    fn set_max(&mut self, cos_angle: f64, he: Option<HalfEdgeHandle>) {
        self.cos_max_angle = cos_angle;
        self.imax = he;
    }
}

impl Default for CosMinMaxAngleInfo {
    /// No angle yet: the smallest angle is 180° and the largest 0°.
    fn default() -> Self {
        Self {
            cos_min_angle: -1.0,
            imin: None,
            cos_max_angle: 1.0,
            imax: None,
            flag_zero: false,
        }
    }
}

/// An angle bound (in degrees) and the number of cells beyond it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBoundCount {
    pub bound: f32,
    pub num_cells: usize,
}

/// Result of [`angle_info`].
#[derive(Debug, Clone, PartialEq)]
pub struct AngleInfo {
    pub cos_min_max: CosMinMaxAngleInfo,

    /// For each small bound: the number of cells whose smallest angle is at
    /// most the bound.
    pub small: Vec<AngleBoundCount>,

    /// For each large bound: the number of cells whose largest angle is at
    /// least the bound.
    pub large: Vec<AngleBoundCount>,
}


// ===============================================================================================
// ===== Edge lengths
// ===============================================================================================

/// Squared length of the edge of `he`.
pub fn edge_length_squared(mesh: &HalfEdgeMesh, he: HalfEdgeHandle) -> f64 {
    let from = mesh.position(mesh.from_vertex(he));
    let to = mesh.position(mesh.to_vertex(he));
    math::distance_squared(from, to)
}

fn min_max_over(
    mesh: &HalfEdgeMesh,
    half_edges: impl IntoIterator<Item = HalfEdgeHandle>,
) -> MinMaxInfo {
    let mut half_edges = half_edges.into_iter();
    let mut info = match half_edges.next() {
        Some(he) => MinMaxInfo::new(edge_length_squared(mesh, he), he),
        None => return MinMaxInfo::default(),
    };

    for he in half_edges {
        info.update(edge_length_squared(mesh, he), he);
    }

    info
}

/// Shortest and longest edge (squared) of cell `c`. On ties, the first half
/// edge in the cell wins.
pub fn cell_min_max_edge_length_squared(mesh: &HalfEdgeMesh, c: CellHandle) -> MinMaxInfo {
    min_max_over(mesh, mesh.cell_half_edges(c))
}

/// Shortest and longest edge (squared) of the whole mesh.
pub fn min_max_edge_length_squared(mesh: &HalfEdgeMesh) -> MinMaxInfo {
    min_max_over(mesh, mesh.edge_list())
}

/// Edge length ratio of cell `c`. If all edges of the cell have length 0,
/// the default (ratio 1.0 without cell) is returned.
pub fn cell_edge_length_ratio_squared(mesh: &HalfEdgeMesh, c: CellHandle) -> MinCellRatioInfo {
    let lengths = cell_min_max_edge_length_squared(mesh, c);
    if lengths.max > 0.0 {
        MinCellRatioInfo {
            ratio: lengths.min / lengths.max,
            cell: Some(c),
            lengths,
        }
    } else {
        MinCellRatioInfo::default()
    }
}

/// The cell with the smallest edge length ratio.
pub fn min_cell_edge_length_ratio_squared(mesh: &HalfEdgeMesh) -> MinCellRatioInfo {
    let mut out: Option<MinCellRatioInfo> = None;
    for c in mesh.cell_handles() {
        let info = cell_edge_length_ratio_squared(mesh, c);
        if out.as_ref().map_or(true, |min| info.ratio < min.ratio) {
            out = Some(info);
        }
    }

    out.unwrap_or_default()
}


// ===============================================================================================
// ===== Angles
// ===============================================================================================

/// Cosine of the cell angle at the `from` vertex of `he`, i.e. between the
/// previous half edge and `he`. `None` if one of the two edges has length 0.
pub fn cos_vertex_angle(mesh: &HalfEdgeMesh, he: HalfEdgeHandle) -> Option<f64> {
    let half_edge = &mesh[he];
    let p0 = mesh.position(mesh[half_edge.prev()].from());
    let p1 = mesh.position(half_edge.from());
    let p2 = mesh.position(mesh[half_edge.next()].from());
    math::cos_triangle_angle(p0, p1, p2)
}

/// Smallest and largest angle of cell `c`.
pub fn cos_min_max_cell_angles(mesh: &HalfEdgeMesh, c: CellHandle) -> CosMinMaxAngleInfo {
    let mut info = CosMinMaxAngleInfo::default();
    for he in mesh.cell_half_edges(c) {
        let cos_angle = match cos_vertex_angle(mesh, he) {
            Some(cos_angle) => cos_angle,
            None => {
                info.flag_zero = true;
                continue;
            }
        };

        if info.imin.is_none() {
            info.set_min(cos_angle, Some(he));
            info.set_max(cos_angle, Some(he));
        } else {
            if cos_angle > info.cos_min_angle {
                info.set_min(cos_angle, Some(he));
            }
            if cos_angle < info.cos_max_angle {
                info.set_max(cos_angle, Some(he));
            }
        }
    }

    info
}

/// Smallest and largest angle over all cells of the mesh.
pub fn cos_min_max_mesh_angles(mesh: &HalfEdgeMesh) -> CosMinMaxAngleInfo {
    angle_info(mesh, &[], &[]).cos_min_max
}

/// Like [`cos_min_max_mesh_angles`], but additionally counts the cells whose
/// smallest angle is `<=` each of `small_bounds` and the cells whose largest
/// angle is `>=` each of `large_bounds`. Bounds are given in degrees.
pub fn angle_info(mesh: &HalfEdgeMesh, small_bounds: &[f32], large_bounds: &[f32]) -> AngleInfo {
    let cos_of = |deg: f32| (deg as f64).to_radians().cos();
    let cos_small = small_bounds.iter().map(|&b| cos_of(b)).collect::<Vec<_>>();
    let cos_large = large_bounds.iter().map(|&b| cos_of(b)).collect::<Vec<_>>();

    let mut out = AngleInfo {
        cos_min_max: CosMinMaxAngleInfo::default(),
        small: small_bounds.iter().map(|&bound| AngleBoundCount { bound, num_cells: 0 }).collect(),
        large: large_bounds.iter().map(|&bound| AngleBoundCount { bound, num_cells: 0 }).collect(),
    };

    let mut first = true;
    for c in mesh.cell_handles() {
        let cell_info = cos_min_max_cell_angles(mesh, c);
        let total = &mut out.cos_min_max;
        total.flag_zero |= cell_info.flag_zero;

        if first || cell_info.cos_min_angle > total.cos_min_angle {
            total.set_min(cell_info.cos_min_angle, cell_info.imin);
        }
        if first || cell_info.cos_max_angle < total.cos_max_angle {
            total.set_max(cell_info.cos_max_angle, cell_info.imax);
        }
        first = false;

        // A large cosine means a small angle.
        for (count, &cos_bound) in out.small.iter_mut().zip(&cos_small) {
            if cell_info.cos_min_angle >= cos_bound {
                count.num_cells += 1;
            }
        }
        for (count, &cos_bound) in out.large.iter_mut().zip(&cos_large) {
            if cell_info.cos_max_angle <= cos_bound {
                count.num_cells += 1;
            }
        }
    }

    out
}
