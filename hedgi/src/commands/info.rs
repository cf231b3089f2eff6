use failure::Error;
use hedge::{measure, HalfEdgeHandle, HalfEdgeMesh, Handle};

use crate::{
    args::InfoArgs,
    commands::{check_mesh, read_mesh, LARGE_ANGLE_BOUNDS, SMALL_ANGLE_BOUNDS},
};


pub fn run(args: &InfoArgs) -> Result<(), Error> {
    let (mesh, _) = read_mesh(&args.file)?;
    check_mesh(&mesh)?;

    println!();
    print_size(&mesh, args.more);
    print_edge_lengths(&mesh, args.more);
    print_cell_ratio(&mesh, args.more);
    print_angles(&mesh, args.more);
    print_manifold_info(&mesh);

    Ok(())
}

fn endpoints(mesh: &HalfEdgeMesh, he: HalfEdgeHandle) -> String {
    format!("{},{}", mesh.from_vertex(he), mesh.to_vertex(he))
}

fn print_size(mesh: &HalfEdgeMesh, more: bool) {
    let num_vertices = mesh.num_vertices() as usize;
    let num_isolated = mesh.count_isolated_vertices();

    info!("Number of mesh vertices: {}", num_vertices - num_isolated);
    if num_isolated > 0 {
        info!("Total number of vertices in the input file: {}", num_vertices);
    }
    info!("Number of mesh edges: {}", mesh.count_edges());
    info!("Number of boundary mesh edges: {}", mesh.count_boundary_edges());
    info!("Number of mesh cells: {}", mesh.num_cells());

    if more {
        info!("  Number of mesh triangles: {}", mesh.count_triangles());
        info!("  Number of mesh quadrilaterals: {}", mesh.count_quads());
        let num_pentagons = mesh.count_pentagons();
        if num_pentagons > 0 {
            info!("  Number of mesh pentagons: {}", num_pentagons);
            info!("  Number of cells with > 5 vertices: {}", mesh.count_cells_of_size_ge(6));
        } else {
            info!("  Number of cells with > 4 vertices: {}", mesh.count_cells_of_size_ge(5));
        }
    }
}

fn print_edge_lengths(mesh: &HalfEdgeMesh, more: bool) {
    let info = measure::min_max_edge_length_squared(mesh);

    info!("Min edge length: {:.4}", info.min.sqrt());
    if let (true, Some(he)) = (more, info.imin) {
        info!(
            "  Min length = length of edge {} ({}) in cell {}.",
            he.idx(),
            endpoints(mesh, he),
            mesh[he].cell(),
        );
    }

    info!("Max edge length: {:.4}", info.max.sqrt());
    if let (true, Some(he)) = (more, info.imax) {
        info!(
            "  Max length = length of edge {} ({}) in cell {}.",
            he.idx(),
            endpoints(mesh, he),
            mesh[he].cell(),
        );
    }
}

fn print_cell_ratio(mesh: &HalfEdgeMesh, more: bool) {
    let info = measure::min_cell_edge_length_ratio_squared(mesh);

    info!("Min cell edge length ratio: {:.4}.", info.ratio.sqrt());
    if !more {
        return;
    }

    if let (Some(c), Some(imin), Some(imax)) = (info.cell, info.lengths.imin, info.lengths.imax) {
        info!("  In cell: {}", c);
        info!(
            "  Min cell edge length: {:.4}. Edge: ({}).",
            info.lengths.min.sqrt(),
            endpoints(mesh, imin),
        );
        info!(
            "  Max cell edge length: {:.4}. Edge: ({}).",
            info.lengths.max.sqrt(),
            endpoints(mesh, imax),
        );
    }
}

fn print_angles(mesh: &HalfEdgeMesh, more: bool) {
    let info = measure::angle_info(mesh, SMALL_ANGLE_BOUNDS, LARGE_ANGLE_BOUNDS);
    let angles = &info.cos_min_max;

    info!("Min angle: {:.4}.", angles.min_angle_degrees());
    if let (true, Some(he)) = (more, angles.imin) {
        info!("  At vertex {} in cell {}.", mesh.from_vertex(he), mesh[he].cell());
    }
    for b in &info.small {
        info!("Num cells with angle <= {:.0}: {}", b.bound, b.num_cells);
    }

    info!("Max angle: {:.4}.", angles.max_angle_degrees());
    if let (true, Some(he)) = (more, angles.imax) {
        info!("  At vertex {} in cell {}.", mesh.from_vertex(he), mesh[he].cell());
    }
    for b in &info.large {
        info!("Num cells with angle >= {:.0}: {}", b.bound, b.num_cells);
    }

    if angles.flag_zero {
        warn!("Some cells have edges of length 0. Angles at their endpoints are ignored.");
    }
}

fn print_manifold_info(mesh: &HalfEdgeMesh) {
    let manifold = mesh.check_manifold();
    let orientation = mesh.check_orientation();

    if manifold.is_manifold() && orientation.is_oriented() {
        info!("Mesh is an oriented manifold.");
    } else if !manifold.manifold_edges {
        if let Some(he) = manifold.half_edge {
            info!("Mesh has a non-manifold edge ({}).", endpoints(mesh, he));
        }
    } else if let Some(v) = manifold.vertex {
        if orientation.is_oriented() {
            info!("Mesh has a non-manifold vertex {}.", v);
        } else {
            info!("Non-manifold or inconsistent orientations at vertex {}.", v);
        }
    } else if let Some(he) = orientation.half_edge {
        let other = mesh.next_cell_around_edge(he);
        info!("Mesh is a manifold.");
        info!("Inconsistent orientations of cells {} and {}.", mesh[he].cell(), other);
    }
}
