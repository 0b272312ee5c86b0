//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::DEFAULT_MEASUREMENTS;
use crate::figure::YScale;

/// Plot benchmark CSV files: measurement columns against scale, one line per build.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV files or directories to search recursively for CSV files
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Location for the output image
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the graph in a window, even when writing --output
    #[arg(short, long)]
    pub show: bool,

    /// Log scale for the y axis
    #[arg(long)]
    pub logy: bool,

    /// Overwrite an existing --output file
    #[arg(short, long)]
    pub force: bool,

    /// Measurement column to plot (repeatable); defaults to the standard timers
    #[arg(short = 'y', long = "ycol", value_name = "NAME")]
    pub ycols: Vec<String>,
}

impl Args {
    pub fn y_scale(&self) -> YScale {
        if self.logy {
            YScale::Log10
        } else {
            YScale::Linear
        }
    }

    /// Candidate measurement columns, in plotting order.
    pub fn measurements(&self) -> Vec<String> {
        if self.ycols.is_empty() {
            DEFAULT_MEASUREMENTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.ycols.clone()
        }
    }

    /// Whether the figure should be written to disk.
    pub fn should_save(&self) -> bool {
        self.output
            .as_deref()
            .is_some_and(|out| !out.exists() || self.force)
    }

    /// Whether the figure should be shown in a window.
    pub fn should_show(&self) -> bool {
        self.output.is_none() || self.show
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("csv-plot").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn files_are_required() {
        assert!(Args::try_parse_from(["csv-plot"]).is_err());
        assert!(Args::try_parse_from(["csv-plot", "--logy"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["csv-plot", "a.csv", "--bogus"]).is_err());
    }

    #[test]
    fn defaults_show_without_output() {
        let args = parse(&["a.csv", "dir"]);
        assert_eq!(args.files, vec![PathBuf::from("a.csv"), PathBuf::from("dir")]);
        assert!(args.should_show());
        assert!(!args.should_save());
        assert_eq!(args.y_scale(), YScale::Linear);
        assert_eq!(args.measurements(), vec!["time_stepping_total", "momentum_total"]);
    }

    #[test]
    fn short_and_long_flags() {
        let args = parse(&["-o", "out.png", "-s", "-f", "--logy", "a.csv"]);
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert!(args.show && args.force && args.logy);
        assert_eq!(args.y_scale(), YScale::Log10);
        assert!(args.should_show());
    }

    #[test]
    fn output_alone_does_not_show() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("plot.png");
        let out = out.to_str().unwrap();
        let args = parse(&["--output", out, "a.csv"]);
        assert!(!args.should_show());
        assert!(args.should_save());
    }

    #[test]
    fn existing_output_is_saved_only_with_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("plot.png");
        std::fs::write(&out, b"old").unwrap();
        let out = out.to_str().unwrap();

        assert!(!parse(&["-o", out, "a.csv"]).should_save());
        assert!(parse(&["-o", out, "-f", "a.csv"]).should_save());
    }

    #[test]
    fn ycol_overrides_defaults() {
        let args = parse(&["-y", "bcs_total", "--ycol", "next_total", "a.csv"]);
        assert_eq!(args.measurements(), vec!["bcs_total", "next_total"]);
    }
}
