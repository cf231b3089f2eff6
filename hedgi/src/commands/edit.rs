use std::time::Instant;

use failure::{bail, Error};
use hedge::{
    algo::decimate::{self as algo, Event},
    HalfEdgeHandle, HalfEdgeMesh, VertexHandle,
};

use crate::{
    args::{EdgeArg, EditArgs, SplitCellArg},
    commands::{
        check_mesh, output_path, print_mesh_summary, print_times, read_mesh, write_mesh,
        Reporter,
    },
};


pub fn run(args: &EditArgs) -> Result<(), Error> {
    if !args.has_edits() {
        bail!("no edit operations specified (see `--help`)");
    }

    let (mut mesh, read_time) = read_mesh(&args.input)?;

    let mut reporter = Reporter::new(&args.output);
    let before = Instant::now();
    {
        let mut sink = |e: &Event| reporter.report(e);

        for edge in &args.split_edge {
            if let Some(he) = lookup_half_edge(&mesh, *edge) {
                algo::split_edge(&mut mesh, he, &mut sink)?;
                check_after_edit(&mesh, args)?;
            }
        }

        for edge in &args.collapse {
            if let Some(he) = lookup_half_edge(&mesh, *edge) {
                algo::collapse_edge(&mut mesh, he, args.allow_non_manifold, &mut sink)?;
                check_after_edit(&mesh, args)?;
            }
        }

        for split in &args.split_cell {
            if let Some((a, b)) = lookup_diagonal(&mesh, *split) {
                algo::split_cell(&mut mesh, a, b, &mut sink)?;
                check_after_edit(&mesh, args)?;
            }
        }

        for edge in &args.join {
            if let Some(he) = lookup_half_edge(&mesh, *edge) {
                if mesh.is_boundary_half_edge(he) {
                    warn!("Edge {} is a boundary edge. Cells cannot be joined.", edge);
                    continue;
                }
                algo::join_two_cells(&mut mesh, he, &mut sink)?;
                check_after_edit(&mesh, args)?;
            }
        }
    }
    let process_time = before.elapsed();
    reporter.finish(&mesh)?;

    if !args.output.silent {
        println!();
        print_mesh_summary(&mesh);
        println!();
    }

    let path = output_path(&args.input, args.output_file.as_ref().map(|s| s.as_str()));
    let write_time = write_mesh(&path, &mesh)?;

    if args.output.time {
        println!();
        print_times(read_time, process_time, write_time);
    }

    Ok(())
}

/// Checks the data structure unless `--reduce-checks` was given.
fn check_after_edit(mesh: &HalfEdgeMesh, args: &EditArgs) -> Result<(), Error> {
    if args.output.reduce_checks {
        Ok(())
    } else {
        check_mesh(mesh)
    }
}

/// Returns the half edge from `edge.from` to `edge.to`. Prints a warning and
/// returns `None` if there is no such half edge.
fn lookup_half_edge(mesh: &HalfEdgeMesh, edge: EdgeArg) -> Option<HalfEdgeHandle> {
    for &v in &[edge.from, edge.to] {
        let info = mesh.check_vertex_index(v);
        if !info.is_ok() {
            warn!("{}", info.message);
            return None;
        }
    }

    let he = mesh.find_half_edge_to(edge.from, edge.to);
    if he.is_none() {
        warn!("Mesh does not have a half edge {}.", edge);
    }

    he
}

/// Returns the half edges of the cell that start at the endpoints of the
/// diagonal. Prints a warning and returns `None` if there are none.
fn lookup_diagonal(
    mesh: &HalfEdgeMesh,
    split: SplitCellArg,
) -> Option<(HalfEdgeHandle, HalfEdgeHandle)> {
    let cell = match mesh.cell(split.cell) {
        Some(cell) => cell,
        None => {
            warn!("No cell has index {}.", split.cell);
            return None;
        }
    };

    if cell.num_vertices() <= 3 {
        warn!("Cell {} has fewer than four vertices and cannot be split.", split.cell);
        return None;
    }

    let starting_at = |v: VertexHandle| mesh.cell_half_edges(split.cell).find(|&he| mesh.from_vertex(he) == v);
    match (starting_at(split.diagonal.from), starting_at(split.diagonal.to)) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => {
            warn!("Vertices are not in cell {}.", split.cell);
            None
        }
    }
}
