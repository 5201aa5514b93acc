use crate::error::{HistogramError, Result};
use std::fs;
use std::path::Path;

/// Read a whole input file, reporting a missing file as [`HistogramError::FileNotFound`]
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path_ref = path.as_ref();
    fs::read(path_ref).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HistogramError::FileNotFound(path_ref.display().to_string())
        } else {
            HistogramError::ReadFile {
                path: path_ref.to_path_buf(),
                source: e,
            }
        }
    })
}
