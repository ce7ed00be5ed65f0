//! Configuration - optional YAML settings for bomcheck
//!
//! Lookup order: an explicit `--config` path, then `bomcheck.yaml` in the
//! working directory, then `config.yaml` in the per-user config directory.
//! Command-line flags override anything loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::analysis::{Analyzer, CommandAnalyzer, FileAnalyzer, Unconfigured};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "bomcheck.yaml";

/// Errors loading configuration
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    #[diagnostic(code(bomcheck::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    #[diagnostic(
        code(bomcheck::config::yaml),
        help("See `bomcheck --help` for the supported keys")
    )]
    Yaml { path: String, message: String },
}

/// How to reach the external analysis collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalyzerConfig {
    /// No analyzer; the external outcome is always a failure
    #[default]
    None,

    /// Pre-computed analysis document
    File { path: PathBuf },

    /// External program reading the order on stdin
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl AnalyzerConfig {
    pub fn build(&self) -> Box<dyn Analyzer> {
        match self {
            AnalyzerConfig::None => Box::new(Unconfigured),
            AnalyzerConfig::File { path } => Box::new(FileAnalyzer::new(path.clone())),
            AnalyzerConfig::Command { program, args } => {
                Box::new(CommandAnalyzer::new(program.clone(), args.clone()))
            }
        }
    }
}

/// Settings read from a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference catalog CSV
    pub reference_file: Option<PathBuf>,

    /// CSV report appended after each check
    pub csv_report: Option<PathBuf>,

    /// Report external analysis only
    pub skip_local_validation: bool,

    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Parse config YAML; relative paths are resolved against `base_dir`
    pub fn from_yaml(content: &str, filename: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yml::from_str(content).map_err(|e| ConfigError::Yaml {
                path: filename.to_string(),
                message: e.to_string(),
            })?
        };
        config.resolve_paths(base_dir);
        Ok(config)
    }

    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml(&content, &path.display().to_string(), base_dir)
    }

    /// Find and load configuration
    ///
    /// An explicit path must exist. Without one, the first existing file in
    /// the lookup order is used, or defaults when none exists.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = [Some(cwd.join(LOCAL_CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                debug!(path = %path.display(), "loading config");
                return Self::from_file(&path);
            }
        }

        Ok(Config::default())
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        if let Some(p) = self.reference_file.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.csv_report.as_mut() {
            resolve(p);
        }
        if let AnalyzerConfig::File { path } = &mut self.analyzer {
            resolve(path);
        }
    }
}

/// `config.yaml` in the per-user config directory
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bomcheck").map(|dirs| dirs.config_dir().join("config.yaml"))
}
