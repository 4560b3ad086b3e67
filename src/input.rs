//! Opening dataset files from the data directory.

use crate::datasets::InputFileSource;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A dataset file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file for `source` inside the data directory `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, source: &InputFileSource) -> Self {
        Self::new(dir.as_ref().join(source.file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file for buffered reading.
    pub fn open(&self) -> Result<BufReader<File>> {
        File::open(&self.path)
            .map(BufReader::new)
            .map_err(|source| Error::Open {
                path: self.path.clone(),
                source,
            })
    }
}
