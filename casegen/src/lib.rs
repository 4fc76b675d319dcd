//! Generates `#[test]` functions from plain-text test-case definitions.
//!
//! Each definition line names a font and a glyph selector. For every line and
//! every function under test of an output target, one test declaration is
//! emitted. A run reads everything, assembles every output in memory, and only
//! then writes; any error leaves all outputs untouched.

#[cfg(feature = "cli")]
mod args;
pub mod case;
pub mod config;
pub mod disambiguate;
pub mod emit;
mod error;
pub mod fold;
pub mod output;
pub mod paths;
pub mod source;

#[cfg(feature = "cli")]
pub use args::Args;
pub use config::{Config, Target};
pub use error::Error;

use std::path::PathBuf;

use log::{debug, info, warn};

use emit::Emitter;
use output::{line_diff, OutputBuffer};
use paths::Paths;
use source::DefinitionFile;

/// A fully assembled output file, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub target: String,
    pub path: PathBuf,
    pub buffer: OutputBuffer,
}

/// Assemble the output for one target.
///
/// Inputs are traversed in configured order, each expanded to its definition
/// files; declarations follow file order, then line order, then function order.
pub fn generate_target(target: &Target, paths: &Paths) -> Result<Generated, Error> {
    debug!("Scanning inputs of '{}'", target.name);
    let mut emitter = Emitter::new(target.functions.clone(), target.shape());
    let mut buffer = OutputBuffer::new();
    let mut files = 0;
    for input in target.inputs.iter() {
        for path in source::scan(&paths.resolve(input))? {
            let file = DefinitionFile::load(&path)?;
            buffer.extend(&emitter.emit_file(&file)?);
            files += 1;
        }
    }
    if buffer.declarations() == 0 {
        warn!("'{}' generated no tests", target.name);
    }
    info!(
        "'{}': {} tests from {} files",
        target.name,
        buffer.declarations(),
        files
    );
    Ok(Generated {
        target: target.name.clone(),
        path: paths.resolve(&target.output),
        buffer,
    })
}

/// Assemble every selected target; fails before anything could be written.
pub fn generate(config: &Config, filter: &[String], paths: &Paths) -> Result<Vec<Generated>, Error> {
    config
        .select(filter)?
        .into_iter()
        .map(|target| generate_target(target, paths))
        .collect()
}

/// Write each output, returning how many files actually changed.
pub fn write_all(generated: &[Generated]) -> Result<usize, Error> {
    let mut written = 0;
    for output in generated {
        if output.buffer.write(&output.path)? {
            info!("Wrote {:?}", output.path);
            written += 1;
        }
    }
    Ok(written)
}

/// Fail if any output on disk differs from what would be generated.
pub fn check_all(generated: &[Generated]) -> Result<(), Error> {
    let mut stale = Vec::new();
    for output in generated {
        if output.buffer.matches(&output.path)? {
            continue;
        }
        let existing = match std::fs::read_to_string(&output.path) {
            Ok(existing) => existing,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(Error::FileIo {
                    path: output.path.clone(),
                    source,
                })
            }
        };
        eprintln!(
            "{:?} is out of date:\n{}",
            output.path,
            line_diff(&existing, output.buffer.text())
        );
        stale.push(output.target.clone());
    }
    if stale.is_empty() {
        Ok(())
    } else {
        Err(Error::Stale(stale))
    }
}

/// Generate, then write or check, as the arguments ask.
#[cfg(feature = "cli")]
pub fn run(args: &Args) -> Result<(), Error> {
    let paths = args.paths();
    debug!("Root {:?}", paths.root());
    let config = Config::load(args.config.as_ref(), &paths)?;
    let generated = generate(&config, &args.targets, &paths)?;
    if args.check {
        return check_all(&generated);
    }
    let written = write_all(&generated)?;
    info!("{written} of {} files changed", generated.len());
    Ok(())
}

#[cfg(test)]
pub(crate) fn testdata_dir() -> PathBuf {
    let dir = std::path::Path::new("../resources/testdata/casegen");
    assert!(dir.is_dir(), "testdata missing, cwd {:?}", std::env::current_dir());
    dir.to_path_buf()
}
