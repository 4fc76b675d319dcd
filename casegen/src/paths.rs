//! Where definition files are read from and generated files go

use std::path::{Path, PathBuf};

/// Name of the optional config file in the root directory
pub const CONFIG_FILE: &str = "casegen.yml";

/// The test crate whose definitions we read, located relative to this crate.
pub fn default_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("tests")
}

#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    pub fn new(root: &Path) -> Paths {
        Paths {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Config paths are relative to the root; absolute paths are left alone.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Paths::new(&default_root())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::Paths;

    #[test]
    fn resolve_relative_and_absolute() {
        let paths = Paths::new(Path::new("/work/tests"));
        assert_eq!(
            PathBuf::from("/work/tests/data/subsets"),
            paths.resolve(Path::new("data/subsets"))
        );
        assert_eq!(
            PathBuf::from("/elsewhere/x.tests"),
            paths.resolve(Path::new("/elsewhere/x.tests"))
        );
    }

    #[test]
    fn default_root_is_beside_the_crate() {
        assert!(Paths::default().root().ends_with("tests"));
    }
}
