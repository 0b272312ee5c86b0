use std::path::PathBuf;

use thiserror::Error;

/// Failures the tool reports to the user before or instead of plotting.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("no valid files provided")]
    NoValidFiles,

    #[error("output path {0} is a directory")]
    OutputIsDirectory(PathBuf),

    #[error("output file {0} already exists, use -f/--force to overwrite")]
    OutputExists(PathBuf),

    #[error("cannot write {0}: unsupported image format, use .png or .jpg")]
    UnsupportedFormat(PathBuf),

    #[error("{0} column missing")]
    MissingColumn(&'static str),

    #[error("no measurement column to plot: none of {candidates:?} present and the table has only {columns} column(s)")]
    NoMeasurementColumn {
        candidates: Vec<String>,
        columns: usize,
    },
}
