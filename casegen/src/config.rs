//! Output targets: which definitions feed which generated file, and how

use std::{collections::HashSet, fs, path::PathBuf};

use log::{debug, info, log_enabled, Level};
use serde::{Deserialize, Serialize};

use crate::{emit::is_identifier, emit::InvocationShape, paths::Paths, Error};

/// One generated file and the definitions that feed it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub name: String,
    /// Definition files or directories, relative to the root
    pub inputs: Vec<PathBuf>,
    /// Generated file, relative to the root
    pub output: PathBuf,
    /// Functions under test, in emission order
    pub functions: Vec<String>,
    /// Pass the per-font counter as a trailing integer argument
    #[serde(default)]
    pub pass_counter: bool,
    /// Fields after the selector passed through as string arguments
    #[serde(default)]
    pub extra_fields: usize,
}

impl Target {
    pub fn shape(&self) -> InvocationShape {
        InvocationShape {
            extra_fields: self.extra_fields,
            pass_counter: self.pass_counter,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let invalid = |msg: String| Err(Error::InvalidConfig(format!("target '{}' {msg}", self.name)));
        if self.inputs.is_empty() {
            return invalid("has no inputs".to_string());
        }
        if self.functions.is_empty() {
            return invalid("has no functions".to_string());
        }
        let mut seen = HashSet::new();
        for function in self.functions.iter() {
            if !is_identifier(function) {
                return invalid(format!("function '{function}' is not a valid identifier"));
            }
            if !seen.insert(function) {
                return invalid(format!("lists function '{function}' twice"));
            }
        }
        Ok(())
    }
}

/// Every output target of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub targets: Vec<Target>,
}

impl Default for Config {
    /// The subsetter test suite: metrics and outline comparisons, plus
    /// fonttools reference checks that need the counter to name their files.
    fn default() -> Self {
        Config {
            targets: vec![
                Target {
                    name: "subsets".to_string(),
                    inputs: vec![PathBuf::from("data/subsets")],
                    output: PathBuf::from("src/subsets.rs"),
                    functions: [
                        "face_metrics",
                        "glyph_metrics",
                        "glyph_outlines_ttf_parser",
                        "glyph_outlines_skrifa",
                        "glyph_outlines_freetype",
                    ]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                    pass_counter: false,
                    extra_fields: 0,
                },
                Target {
                    name: "font_tools".to_string(),
                    inputs: vec![PathBuf::from("data/font_tools")],
                    output: PathBuf::from("src/font_tools.rs"),
                    functions: vec!["test_font_tools".to_string()],
                    pass_counter: true,
                    extra_fields: 0,
                },
            ],
        }
    }
}

impl Config {
    pub fn from_yaml(yml: &str, source: PathBuf) -> Result<Config, Error> {
        let config: Config = serde_yaml::from_str(yml)
            .map_err(|source_err| Error::ConfigParse {
                path: source,
                source: source_err,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config for a run.
    ///
    /// An explicit file wins, then `casegen.yml` in the root, then the defaults.
    pub fn load(explicit: Option<&PathBuf>, paths: &Paths) -> Result<Config, Error> {
        let file = match explicit {
            Some(file) => file.clone(),
            None if paths.config_file().is_file() => paths.config_file(),
            None => {
                info!("Using built-in targets");
                let config = Config::default();
                config.validate()?;
                config.log_effective();
                return Ok(config);
            }
        };
        info!("Loading targets from {file:?}");
        let yml = fs::read_to_string(&file).map_err(|source| Error::FileIo {
            path: file.clone(),
            source,
        })?;
        let config = Config::from_yaml(&yml, file)?;
        config.log_effective();
        Ok(config)
    }

    fn log_effective(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        match self.to_yaml() {
            Ok(yml) => debug!("Effective targets:\n{yml}"),
            Err(e) => debug!("Unable to serialize targets: {e}"),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.targets.is_empty() {
            return Err(Error::InvalidConfig("no targets".to_string()));
        }
        let mut names = HashSet::new();
        let mut outputs = HashSet::new();
        for target in self.targets.iter() {
            target.validate()?;
            if !names.insert(&target.name) {
                return Err(Error::InvalidConfig(format!(
                    "target '{}' is defined twice",
                    target.name
                )));
            }
            if !outputs.insert(&target.output) {
                return Err(Error::InvalidConfig(format!(
                    "{:?} is the output of more than one target",
                    target.output
                )));
            }
        }
        Ok(())
    }

    /// The targets named in `filter`, in config order; all of them if it's empty.
    pub fn select(&self, filter: &[String]) -> Result<Vec<&Target>, Error> {
        if let Some(unknown) = filter
            .iter()
            .find(|name| !self.targets.iter().any(|t| &&t.name == name))
        {
            return Err(Error::UnknownTarget(unknown.clone()));
        }
        Ok(self
            .targets
            .iter()
            .filter(|t| filter.is_empty() || filter.contains(&t.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const YML: &str = r#"
targets:
  - name: outlines
    inputs: [data/outlines, extra.tests]
    output: src/outlines.rs
    functions: [glyph_outlines_skrifa, glyph_outlines_freetype]
  - name: refs
    inputs: [data/refs]
    output: src/refs.rs
    functions: [test_font_tools]
    pass_counter: true
    extra_fields: 1
"#;

    #[test]
    fn parse_yaml() {
        let config = Config::from_yaml(YML, PathBuf::from("casegen.yml")).unwrap();
        assert_eq!(2, config.targets.len());
        let outlines = &config.targets[0];
        assert_eq!(
            vec![PathBuf::from("data/outlines"), PathBuf::from("extra.tests")],
            outlines.inputs
        );
        assert_eq!(InvocationShape::default(), outlines.shape());
        assert_eq!(
            InvocationShape {
                extra_fields: 1,
                pass_counter: true
            },
            config.targets[1].shape()
        );
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(
            vec!["subsets", "font_tools"],
            config.targets.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );
        assert!(config.targets[1].pass_counter);
    }

    #[test]
    fn load_prefers_root_config() {
        let temp_dir = tempdir().unwrap();
        let paths = Paths::new(temp_dir.path());
        assert_eq!(Config::default(), Config::load(None, &paths).unwrap());

        fs::write(paths.config_file(), YML).unwrap();
        assert_eq!(2, Config::load(None, &paths).unwrap().targets.len());
        assert_eq!("outlines", Config::load(None, &paths).unwrap().targets[0].name);
    }

    #[test]
    fn load_missing_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let paths = Paths::new(temp_dir.path());
        let file = temp_dir.path().join("nope.yml");
        assert!(matches!(
            Config::load(Some(&file), &paths),
            Err(Error::FileIo { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yml = "targets: []\nverbose: true\n";
        assert!(matches!(
            Config::from_yaml(yml, PathBuf::from("x.yml")),
            Err(Error::ConfigParse { .. })
        ));
    }

    fn assert_invalid(yml: &str) {
        let result = Config::from_yaml(yml, PathBuf::from("x.yml"));
        assert!(matches!(result, Err(Error::InvalidConfig(..))), "{result:?}");
    }

    #[test]
    fn rejects_empty() {
        assert_invalid("targets: []");
    }

    #[test]
    fn rejects_duplicate_function() {
        assert_invalid("targets: [{name: a, inputs: [d], output: a.rs, functions: [f, f]}]");
    }

    #[test]
    fn rejects_bad_function_name() {
        assert_invalid("targets: [{name: a, inputs: [d], output: a.rs, functions: [glyph-metrics]}]");
    }

    #[test]
    fn rejects_keyword_function() {
        for keyword in ["match", "fn", "type", "self", "super", "crate", "Self"] {
            assert_invalid(&format!(
                "targets: [{{name: a, inputs: [d], output: a.rs, functions: [{keyword}]}}]"
            ));
        }
    }

    #[test]
    fn yaml_round_trip() {
        let config = Config::default();
        let yml = config.to_yaml().unwrap();
        assert_eq!(config, Config::from_yaml(&yml, PathBuf::from("x.yml")).unwrap());
    }

    #[test]
    fn rejects_shared_output() {
        assert_invalid(
            "targets:\n  - {name: a, inputs: [d], output: a.rs, functions: [f]}\n  - {name: b, inputs: [e], output: a.rs, functions: [g]}",
        );
    }

    #[test]
    fn rejects_no_inputs() {
        assert_invalid("targets: [{name: a, inputs: [], output: a.rs, functions: [f]}]");
    }

    #[test]
    fn select_targets() {
        let config = Config::default();
        assert_eq!(2, config.select(&[]).unwrap().len());
        let only = config.select(&["font_tools".to_string()]).unwrap();
        assert_eq!(vec!["font_tools"], only.iter().map(|t| t.name.as_str()).collect::<Vec<_>>());
        assert!(matches!(
            config.select(&["ttf".to_string()]),
            Err(Error::UnknownTarget(name)) if name == "ttf"
        ));
    }
}
