use std::fs;
use std::path::Path;

use hm_core::errors::{ErrorInfo, HmError};
use hm_graph::PreprocessOptions;
use hm_repr::BuildConfig;
use serde::{Deserialize, Serialize};

/// Output switches of a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Also write the representation as JSON next to the `.net` file.
    #[serde(default)]
    pub write_json: bool,
}

/// Contents of a `run.yaml` file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Representation and walk flags.
    #[serde(default)]
    pub build: BuildConfig,
    /// Filters applied before building.
    #[serde(default)]
    pub preprocess: PreprocessOptions,
    /// Output switches.
    #[serde(default)]
    pub output: OutputOptions,
}

/// Reads and parses a YAML run configuration.
pub fn load_run_config(path: &Path) -> Result<RunConfig, HmError> {
    let text = fs::read_to_string(path).map_err(|err| {
        HmError::Config(ErrorInfo::new("read-config", err.to_string()))
            .with_context("path", path.display())
    })?;
    parse_run_config(&text).map_err(|err| err.with_context("path", path.display()))
}

/// Parses a YAML run configuration.
pub fn parse_run_config(text: &str) -> Result<RunConfig, HmError> {
    serde_yaml::from_str(text)
        .map_err(|err| HmError::Config(ErrorInfo::new("parse-config", err.to_string())))
}
