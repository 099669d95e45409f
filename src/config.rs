use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Site layout and build options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix substituted for root-relative `href="/` and `src="/` links.
    pub base_path: String,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: PathBuf,
    /// Remove the output directory before building.
    pub clean: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("public"),
            template: PathBuf::from("template.html"),
            clean: true,
        }
    }
}

impl Config {
    /// The bundled `default_config.toml` (checked by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if the
    /// file does not exist. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve relative paths against `root`.
    pub fn relative_to(mut self, root: &Path) -> Self {
        for path in [
            &mut self.content_dir,
            &mut self.static_dir,
            &mut self.output_dir,
            &mut self.template,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}
