//! Locating and loading test-case definition files

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::Error;

/// Extension of a definition file
pub const DEFINITION_EXTENSION: &str = "tests";

/// A definition file, fully read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl DefinitionFile {
    /// Read the file at `path` in full; the handle is closed before this returns.
    pub fn load(path: &Path) -> Result<DefinitionFile, Error> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::MissingInput(path.to_path_buf())
            } else {
                Error::FileIo {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        debug!("Loaded {path:?}");
        Ok(DefinitionFile::from_text(path, &text))
    }

    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> DefinitionFile {
        DefinitionFile {
            path: path.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Every definition file reachable from `input`, in a stable order.
///
/// A file is returned as-is. A directory is walked recursively, entries sorted
/// by path at each level, keeping files with the `.tests` extension.
pub fn scan(input: &Path) -> Result<Vec<PathBuf>, Error> {
    if !input.exists() {
        return Err(Error::MissingInput(input.to_path_buf()));
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut found = Vec::new();
    walk(input, &mut found)?;
    debug!("Found {} definition files under {input:?}", found.len());
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), Error> {
    let io_err = |source| Error::FileIo {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, found)?;
        } else if path.is_file() && path.extension() == Some(OsStr::new(DEFINITION_EXTENSION)) {
            found.push(path);
        }
    }
    Ok(())
}
