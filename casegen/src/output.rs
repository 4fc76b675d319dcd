//! Assembling and writing generated files

use std::{
    fmt::Write as _,
    fs, io,
    path::Path,
};

use log::debug;

use crate::{emit::GeneratedTestFunction, Error};

/// Named in the header of every generated file
pub const GENERATOR_NAME: &str = "casegen";

/// The complete text of one generated file.
///
/// Nothing touches the destination until the buffer is finished and
/// [`OutputBuffer::write`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    declarations: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuffer {
    pub fn new() -> OutputBuffer {
        let mut text = String::new();
        text.push_str(&format!(
            "// This file was auto-generated by `{GENERATOR_NAME}`, do not edit manually.\n\n"
        ));
        text.push_str("#![allow(non_snake_case)]\n\n");
        text.push_str("use crate::*;\n\n");
        OutputBuffer {
            text,
            declarations: 0,
        }
    }

    pub fn push(&mut self, test: &GeneratedTestFunction) {
        // writing to a String can't fail
        let _ = writeln!(self.text, "{test}");
        self.declarations += 1;
    }

    pub fn extend<'a>(&mut self, tests: impl IntoIterator<Item = &'a GeneratedTestFunction>) {
        for test in tests {
            self.push(test);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn declarations(&self) -> usize {
        self.declarations
    }

    /// Whether `path` already holds exactly this text.
    pub fn matches(&self, path: &Path) -> Result<bool, Error> {
        match fs::read(path) {
            Ok(existing) => Ok(existing == self.text.as_bytes()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::FileIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Replace the contents of `path` with this buffer.
    ///
    /// Returns false if the file was already identical and left alone.
    pub fn write(&self, path: &Path) -> Result<bool, Error> {
        require_parent_dir(path)?;
        if self.matches(path)? {
            debug!("{path:?} is up to date");
            return Ok(false);
        }
        fs::write(path, &self.text).map_err(|source| Error::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }
}

fn require_parent_dir(path: &Path) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.exists() {
        return Err(Error::MissingInput(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::ExpectedDirectory(dir.to_path_buf()));
    }
    Ok(())
}

/// A line diff of `expected` against `actual`, for reporting stale files.
pub fn line_diff(expected: &str, actual: &str) -> String {
    let mut out = String::new();
    for line in diff::lines(expected, actual) {
        let _ = match line {
            diff::Result::Left(l) => writeln!(out, "-{l}"),
            diff::Result::Right(r) => writeln!(out, "+{r}"),
            diff::Result::Both(..) => Ok(()),
        };
    }
    out
}
