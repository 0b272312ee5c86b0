use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PlotError;
use crate::export::output_format;

/// Extension gating which files count as benchmark tables.
pub const CSV_EXT: &str = ".csv";

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Expand files and directories into a sorted, deduplicated list of CSV paths.
///
/// Directories are walked recursively. Paths that are neither a CSV file nor a
/// directory are skipped with a warning. An empty result is an error.
pub fn resolve_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, PlotError> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for input in inputs {
        let path = input.as_ref();
        if path.is_file() && has_csv_ext(path) {
            found.insert(path.to_path_buf());
        } else if path.is_dir() {
            for entry in WalkDir::new(path) {
                match entry {
                    Ok(e) if e.path().is_file() && has_csv_ext(e.path()) => {
                        found.insert(e.into_path());
                    }
                    Ok(_) => {}
                    Err(err) => log::warn!("Skipping unreadable entry under {}: {err}", path.display()),
                }
            }
        } else {
            log::warn!("Provided file {} does not exist", path.display());
        }
    }

    if found.is_empty() {
        return Err(PlotError::NoValidFiles);
    }
    Ok(found.into_iter().collect())
}

fn has_csv_ext(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(CSV_EXT))
}

// ---------------------------------------------------------------------------
// Output validation
// ---------------------------------------------------------------------------

/// Refuse to plot when the output location cannot be written, or its
/// extension names a format the image writer does not support.
///
/// Existence is checked up front only; a file appearing between this check
/// and the write is not detected.
pub fn check_output(output: Option<&Path>, force: bool) -> Result<(), PlotError> {
    let Some(output) = output else {
        return Ok(());
    };
    if output.is_dir() {
        return Err(PlotError::OutputIsDirectory(output.to_path_buf()));
    }
    if output.is_file() && !force {
        return Err(PlotError::OutputExists(output.to_path_buf()));
    }
    output_format(output)?;
    Ok(())
}
