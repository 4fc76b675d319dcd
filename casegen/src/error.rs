use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing input '{0}'")]
    MissingInput(PathBuf),
    #[error("'{0}' exists but is not a directory")]
    ExpectedDirectory(PathBuf),
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: expected at least {expected} ';'-separated fields in '{text}'")]
    Malformed {
        path: PathBuf,
        line: usize,
        expected: usize,
        text: String,
    },
    #[error("{path}:{line}: field '{field}' cannot be embedded in a string literal")]
    UnrepresentableField {
        path: PathBuf,
        line: usize,
        field: String,
    },
    #[error(
        "'{identifier}' generated twice, from {first_path}:{first_line} and {path}:{line}; \
         the font names fold to the same fragment"
    )]
    IdentifierCollision {
        identifier: String,
        first_path: PathBuf,
        first_line: usize,
        path: PathBuf,
        line: usize,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Unable to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("No target named '{0}'")]
    UnknownTarget(String),
    #[error("Generated files are out of date: {0:?}")]
    Stale(Vec<String>),
}
