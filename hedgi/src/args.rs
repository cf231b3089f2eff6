//! Defines `Args` which is used to parse command line arguments.

use std::{fmt, str::FromStr};

use structopt::StructOpt;
use hedge::{
    algo::DecimateConfig,
    hsize, CellHandle, Handle, VertexHandle,
};


#[derive(StructOpt, Debug)]
#[structopt(raw(setting = "structopt::clap::AppSettings::VersionlessSubcommands"))]
pub struct Args {
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print information about a mesh stored in an OFF file.
    #[structopt(name = "info")]
    Info {
        #[structopt(flatten)]
        args: InfoArgs,
    },

    /// Collapse, split, join or triangulate all cells of a mesh.
    #[structopt(name = "decimate")]
    Decimate {
        #[structopt(flatten)]
        args: DecimateArgs,
    },

    /// Apply single edits (given by vertex and cell indices) to a mesh.
    #[structopt(name = "edit")]
    Edit {
        #[structopt(flatten)]
        args: EditArgs,
    },

    /// Split every edge at its midpoint and every cell into quadrilaterals
    /// around its centroid.
    #[structopt(name = "quads")]
    Quads {
        #[structopt(flatten)]
        args: QuadsArgs,
    },
}

#[derive(StructOpt, Debug)]
pub struct InfoArgs {
    /// Print additional information, e.g. where the shortest edge or the
    /// smallest angle is located.
    #[structopt(long = "--more")]
    pub more: bool,

    /// Path to the OFF file.
    pub file: String,
}

/// Options controlling how much is printed. Shared by `decimate` and `edit`.
#[derive(StructOpt, Debug)]
pub struct OutputArgs {
    /// Terse output. Suppress the messages printed for each
    /// collapse/join/split. Warnings and the final mesh information are still
    /// printed.
    #[structopt(long = "--terse")]
    pub terse: bool,

    /// Silent. Print only warnings and errors. Implies `--terse`.
    #[structopt(short = "-s", long = "--silent")]
    pub silent: bool,

    /// Do not print warnings about non-manifold conditions, inconsistent
    /// orientations and refused edits.
    #[structopt(long = "--no-warn")]
    pub no_warn: bool,

    /// Report run times.
    #[structopt(long = "--time")]
    pub time: bool,

    /// Exit with a non-zero exit code if the resulting mesh is not an
    /// oriented manifold.
    #[structopt(long = "--fail-on-non-manifold")]
    pub fail_on_non_manifold: bool,

    /// Check the mesh only a few times instead of after every edit. This is
    /// enabled automatically for large meshes.
    #[structopt(long = "--reduce-checks")]
    pub reduce_checks: bool,
}

impl OutputArgs {
    pub fn is_terse(&self) -> bool {
        self.terse || self.silent
    }
}

#[derive(StructOpt, Debug)]
pub struct DecimateArgs {
    /// Attempt to collapse the shortest edge in each cell.
    #[structopt(long = "--collapse-short-edges")]
    pub collapse_short_edges: bool,

    /// Split the longest edge in each cell.
    #[structopt(long = "--split-long-edges")]
    pub split_long_edges: bool,

    /// Split cells at the vertices with the largest angles.
    #[structopt(long = "--split-cells")]
    pub split_cells: bool,

    /// Shorthand for `--split-long-edges --split-cells`.
    #[structopt(long = "--split-long-edges-cells")]
    pub split_long_edges_cells: bool,

    /// Join cells sharing long edges.
    #[structopt(long = "--join-cells")]
    pub join_cells: bool,

    /// Triangulate each cell from the vertex with the largest angle.
    #[structopt(long = "--triangulate-cells", alias = "triangulate")]
    pub triangulate_cells: bool,

    /// Allow edge collapses that change the mesh topology.
    #[structopt(long = "--allow-non-manifold")]
    pub allow_non_manifold: bool,

    #[structopt(flatten)]
    pub output: OutputArgs,

    /// Path to the input OFF file.
    pub input: String,

    /// Path to the output OFF file. Defaults to `out.off` (or `out2.off` if
    /// the input is called `out.off`).
    pub output_file: Option<String>,
}

impl DecimateArgs {
    pub fn config(&self) -> DecimateConfig {
        DecimateConfig {
            collapse_short_edges: self.collapse_short_edges,
            split_long_edges: self.split_long_edges || self.split_long_edges_cells,
            split_cells: self.split_cells || self.split_long_edges_cells,
            join_cells: self.join_cells,
            triangulate_cells: self.triangulate_cells,
            allow_non_manifold: self.allow_non_manifold,
            reduce_checks: self.output.reduce_checks,
        }
    }
}

#[derive(StructOpt, Debug)]
pub struct EditArgs {
    /// Split the edge from vertex `a` to vertex `b`. Can be given multiple
    /// times. Example: `--split-edge 3,7`.
    #[structopt(long = "--split-edge", raw(number_of_values = "1"))]
    pub split_edge: Vec<EdgeArg>,

    /// Collapse the edge from vertex `a` to vertex `b`. Can be given multiple
    /// times.
    #[structopt(long = "--collapse", raw(number_of_values = "1"))]
    pub collapse: Vec<EdgeArg>,

    /// Split cell `c` with the diagonal from vertex `a` to vertex `b`. Can be
    /// given multiple times. Example: `--split-cell 4:0,2`.
    #[structopt(long = "--split-cell", raw(number_of_values = "1"))]
    pub split_cell: Vec<SplitCellArg>,

    /// Join the two cells sharing the edge from vertex `a` to vertex `b`. Can
    /// be given multiple times.
    #[structopt(long = "--join", raw(number_of_values = "1"))]
    pub join: Vec<EdgeArg>,

    /// Allow edge collapses that change the mesh topology.
    #[structopt(long = "--allow-non-manifold")]
    pub allow_non_manifold: bool,

    #[structopt(flatten)]
    pub output: OutputArgs,

    /// Path to the input OFF file.
    pub input: String,

    /// Path to the output OFF file. Defaults to `out.off` (or `out2.off` if
    /// the input is called `out.off`).
    pub output_file: Option<String>,
}

#[derive(StructOpt, Debug)]
pub struct QuadsArgs {
    #[structopt(flatten)]
    pub output: OutputArgs,

    /// Path to the input OFF file.
    pub input: String,

    /// Path to the output OFF file. Defaults to `out.off` (or `out2.off` if
    /// the input is called `out.off`).
    pub output_file: Option<String>,
}

impl EditArgs {
    pub fn has_edits(&self) -> bool {
        !self.split_edge.is_empty()
            || !self.collapse.is_empty()
            || !self.split_cell.is_empty()
            || !self.join.is_empty()
    }
}


/// A half edge given by its two endpoints: `a,b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeArg {
    pub from: VertexHandle,
    pub to: VertexHandle,
}

impl FromStr for EdgeArg {
    type Err = String;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut parts = src.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => Ok(Self {
                from: parse_index(a)?,
                to: parse_index(b)?,
            }),
            _ => Err(format!("'{}' is not a pair of vertex indices like '3,7'", src)),
        }
    }
}

impl fmt::Display for EdgeArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.from, self.to)
    }
}

/// A cell and two of its vertices: `c:a,b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCellArg {
    pub cell: CellHandle,
    pub diagonal: EdgeArg,
}

impl FromStr for SplitCellArg {
    type Err = String;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let colon = src.find(':')
            .ok_or_else(|| format!("'{}' is not a cell and a diagonal like '4:0,2'", src))?;
        Ok(Self {
            cell: parse_index(&src[..colon])?,
            diagonal: src[colon + 1..].parse()?,
        })
    }
}

fn parse_index<H: Handle>(src: &str) -> Result<H, String> {
    src.trim()
        .parse::<hsize>()
        .map(H::new)
        .map_err(|e| format!("invalid index '{}': {}", src.trim(), e))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_edge() {
        let e: EdgeArg = "3,7".parse().unwrap();
        assert_eq!(e, EdgeArg { from: VertexHandle::new(3), to: VertexHandle::new(7) });
        assert_eq!(e.to_string(), "(3,7)");
        assert_eq!(" 0 , 12".parse::<EdgeArg>().unwrap().to, VertexHandle::new(12));

        assert!("3".parse::<EdgeArg>().is_err());
        assert!("3,7,8".parse::<EdgeArg>().is_err());
        assert!("3,-1".parse::<EdgeArg>().is_err());
    }

    #[test]
    fn parse_split_cell() {
        let s: SplitCellArg = "4:0,2".parse().unwrap();
        assert_eq!(s.cell, CellHandle::new(4));
        assert_eq!(s.diagonal, EdgeArg { from: VertexHandle::new(0), to: VertexHandle::new(2) });

        assert!("0,2".parse::<SplitCellArg>().is_err());
        assert!("x:0,2".parse::<SplitCellArg>().is_err());
    }

    #[test]
    fn split_long_edges_cells_sets_both() {
        let args = Args::from_iter(&["hedgi", "decimate", "--split-long-edges-cells", "in.off"]);
        let config = match args.command {
            Command::Decimate { args } => args.config(),
            other => panic!("unexpected command {:?}", other),
        };

        assert!(config.split_long_edges);
        assert!(config.split_cells);
        assert!(!config.collapse_short_edges);
        assert!(config.has_edits());
    }

    #[test]
    fn quads_command() {
        let args = Args::from_iter(&["hedgi", "quads", "--terse", "in.off", "out.off"]);
        match args.command {
            Command::Quads { args } => {
                assert!(args.output.is_terse());
                assert_eq!(args.input, "in.off");
                assert_eq!(args.output_file.as_ref().map(|s| s.as_str()), Some("out.off"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
