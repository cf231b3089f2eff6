//! `hedgi`: inspect and edit half-edge meshes stored in OFF files.

use failure::Error;
use structopt::StructOpt;

#[macro_use]
mod ui;

mod args;
mod commands;

use crate::args::{Args, Command};


fn main() {
    let args = Args::from_args();
    if let Err(e) = run(&args.command) {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(command: &Command) -> Result<(), Error> {
    match command {
        Command::Info { args } => commands::info::run(args),
        Command::Decimate { args } => commands::decimate::run(args),
        Command::Edit { args } => commands::edit::run(args),
        Command::Quads { args } => commands::quads::run(args),
    }
}

/// Prints the error with its chain of causes. The backtrace is only printed
/// if `RUST_BACKTRACE` is set.
fn print_error(e: &Error) {
    let mut causes = e.iter_chain();
    if let Some(first) = causes.next() {
        error!("{}", first);
    }
    for cause in causes {
        error!("  ... caused by: {}", cause);
    }

    let backtrace = e.backtrace().to_string();
    if std::env::var_os("RUST_BACKTRACE").is_some() && !backtrace.is_empty() {
        error!();
        error!("{}", backtrace);
    }
}
