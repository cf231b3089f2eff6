use std::time::Instant;

use failure::{bail, Error};
use hedge::algo::decimate;

use crate::{
    args::DecimateArgs,
    commands::{output_path, print_mesh_summary, print_times, read_mesh, write_mesh, Reporter},
};


pub fn run(args: &DecimateArgs) -> Result<(), Error> {
    let config = args.config();
    if !config.has_edits() {
        bail!("no edit operations specified (see `--help`)");
    }

    let (mut mesh, read_time) = read_mesh(&args.input)?;

    // Events are printed while the passes run, so `progress!` can't be used.
    let mut reporter = Reporter::new(&args.output);
    let before = Instant::now();
    decimate(&mut mesh, &config, |e| reporter.report(e))?;
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
