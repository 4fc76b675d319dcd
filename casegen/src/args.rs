//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::paths::{default_root, Paths};

/// Generate test functions from test-case definition files.
///
/// With no arguments, regenerates every target of the test crate next to this one.
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct Args {
    /// Directory definition inputs and generated outputs are relative to.
    ///
    /// Defaults to the `tests` directory beside this crate.
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// A YAML file describing output targets.
    ///
    /// Defaults to `casegen.yml` in the root if present, else the built-in targets.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only generate the named target. May be repeated.
    #[arg(short, long = "target")]
    pub targets: Vec<String>,

    /// Don't write anything; fail if any generated file is out of date.
    #[arg(long)]
    pub check: bool,
}

impl Args {
    pub fn paths(&self) -> Paths {
        Paths::new(&self.root.clone().unwrap_or_else(default_root))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_arguments() {
        let args = Args::parse_from(["casegen"]);
        assert_eq!(Args::default(), args);
        assert_eq!(default_root(), args.paths().root());
    }

    #[test]
    fn all_arguments() {
        let args = Args::parse_from([
            "casegen", "--root", "/r", "-c", "/r/c.yml", "-t", "a", "--target", "b", "--check",
        ]);
        assert_eq!(
            Args {
                root: Some(PathBuf::from("/r")),
                config: Some(PathBuf::from("/r/c.yml")),
                targets: vec!["a".to_string(), "b".to_string()],
                check: true,
            },
            args
        );
    }
}
