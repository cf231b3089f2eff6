use std::time::Duration;

use failure::{bail, Error, ResultExt};
use hedge::{
    algo::decimate::{self as algo, Event},
    io::off,
    measure, HalfEdgeMesh,
};

use crate::{
    args::OutputArgs,
    ui,
};


pub mod decimate;
pub mod edit;
pub mod info;
pub mod quads;


/// Angles (in degrees) for which the number of cells with a smaller angle is
/// printed.
pub const SMALL_ANGLE_BOUNDS: &[f32] = &[1.0, 5.0, 10.0];

/// Angles (in degrees) for which the number of cells with a larger angle is
/// printed.
pub const LARGE_ANGLE_BOUNDS: &[f32] = &[175.0, 170.0];


pub fn read_mesh(path: &str) -> Result<(HalfEdgeMesh, Duration), Error> {
    let (mesh, time) = progress!(["Reading '{}'", path] => {
        off::read_file(path).context(format!("failed to read '{}'", path))?
    });

    Ok((mesh, time))
}

pub fn write_mesh(path: &str, mesh: &HalfEdgeMesh) -> Result<Duration, Error> {
    let ((), time) = progress!(["Writing '{}'", path] => {
        off::write_file(path, mesh).context(format!("failed to write '{}'", path))?
    });

    Ok(time)
}

/// Returns the file to write the result to: the one given or `out.off`. If
/// that's the input file, `out2.off` is used instead.
pub fn output_path(input: &str, output: Option<&str>) -> String {
    let out = match output {
        Some(path) if !path.is_empty() => path,
        _ => "out.off",
    };

    if out == input {
        "out2.off".to_string()
    } else {
        out.to_string()
    }
}

/// Returns an error if the mesh data structure is corrupted.
pub fn check_mesh(mesh: &HalfEdgeMesh) -> Result<(), Error> {
    let info = mesh.check_all();
    if !info.is_ok() {
        bail!("error detected in mesh data structure: {}", info.message);
    }

    Ok(())
}


/// Prints events of edit operations according to the output options and
/// remembers whether the mesh was found to be non-manifold.
pub struct Reporter<'a> {
    args: &'a OutputArgs,
    found_non_manifold: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(args: &'a OutputArgs) -> Self {
        Self {
            args,
            found_non_manifold: false,
        }
    }

    pub fn report(&mut self, event: &Event) {
        if let Event::NotOrientedManifold(_) = event {
            self.found_non_manifold = true;
        }

        if event.is_warning() {
            if !self.args.no_warn {
                warn!("{}", event);
            }
        } else if !self.args.is_terse() {
            info!("{}", event);
        }
    }

    /// Checks the final mesh. Returns an error if it is corrupted or if it is
    /// not an oriented manifold and `--fail-on-non-manifold` was given.
    pub fn finish(mut self, mesh: &HalfEdgeMesh) -> Result<(), Error> {
        check_mesh(mesh)?;
        if let Some(msg) = algo::check_oriented_manifold(mesh) {
            self.report(&Event::NotOrientedManifold(msg));
        }

        if self.args.fail_on_non_manifold && self.found_non_manifold {
            bail!("detected non-manifold or inconsistent orientations");
        }

        if !self.args.silent {
            info!("Mesh data structure passed check.");
        }

        Ok(())
    }
}


/// Prints a short summary of the mesh after edits.
pub fn print_mesh_summary(mesh: &HalfEdgeMesh) {
    let lengths = measure::min_max_edge_length_squared(mesh);
    let ratio = measure::min_cell_edge_length_ratio_squared(mesh);
    let angles = measure::angle_info(mesh, SMALL_ANGLE_BOUNDS, LARGE_ANGLE_BOUNDS);

    info!("Number of vertices: {}", mesh.num_vertices());
    info!("Number of mesh edges: {}", mesh.count_edges());
    info!("Number of boundary mesh edges: {}", mesh.count_boundary_edges());
    info!("Number of mesh cells: {}", mesh.num_cells());
    info!("  Number of mesh triangles: {}", mesh.count_triangles());
    info!("  Number of mesh quadrilaterals: {}", mesh.count_quads());
    info!("  Number of cells with > 4 vertices: {}", mesh.count_cells_of_size_ge(5));
    info!("Min edge length: {:.4}", lengths.min.sqrt());
    info!("Max edge length: {:.4}", lengths.max.sqrt());
    info!("Min cell edge length ratio: {:.4}", ratio.ratio.sqrt());

    info!("Minimum cell angle: {:.2}", angles.cos_min_max.min_angle_degrees());
    for b in &angles.small {
        info!("  Num cells with angle <= {:.0}: {}", b.bound, b.num_cells);
    }
    info!("Maximum cell angle: {:.2}", angles.cos_min_max.max_angle_degrees());
    for b in &angles.large {
        info!("  Num cells with angle >= {:.0}: {}", b.bound, b.num_cells);
    }

    if algo::check_oriented_manifold(mesh).is_none() {
        info!("Mesh is an oriented manifold.");
    } else {
        info!("Mesh is non-manifold or has inconsistent cell orientations.");
    }
}

/// Prints the times of the single steps (for `--time`).
pub fn print_times(read: Duration, process: Duration, write: Duration) {
    info!("Time to read file:  {}", ui::fmt_seconds(read));
    info!("Time to edit mesh:  {}", ui::fmt_seconds(process));
    info!("Time to write file: {}", ui::fmt_seconds(write));
    info!("Total time:         {}", ui::fmt_seconds(read + process + write));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_defaults() {
        assert_eq!(output_path("in.off", None), "out.off");
        assert_eq!(output_path("in.off", Some("")), "out.off");
        assert_eq!(output_path("in.off", Some("res.off")), "res.off");
        assert_eq!(output_path("out.off", None), "out2.off");
        assert_eq!(output_path("a.off", Some("a.off")), "out2.off");
    }
}
