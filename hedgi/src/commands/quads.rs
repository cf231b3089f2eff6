use std::time::Instant;

use failure::Error;
use hedge::algo::split_into_quads;

use crate::{
    args::QuadsArgs,
    commands::{output_path, print_mesh_summary, print_times, read_mesh, write_mesh, Reporter},
};


pub fn run(args: &QuadsArgs) -> Result<(), Error> {
    let (mut mesh, read_time) = read_mesh(&args.input)?;

    let mut reporter = Reporter::new(&args.output);
    let before = Instant::now();
    let summary = split_into_quads(&mut mesh, |e| reporter.report(e))?;
    let process_time = before.elapsed();

    if !args.output.silent {
        info!(
            "Split {} edges and {} cells.",
            summary.num_split_edges,
            summary.num_split_cells,
        );
    }
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
